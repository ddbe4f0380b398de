//! Renderer-agnostic UI helpers

pub mod layout;

pub use layout::PixelScale;
