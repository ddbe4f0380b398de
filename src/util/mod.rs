//! Utility modules shared across targets

pub mod dblclick;
