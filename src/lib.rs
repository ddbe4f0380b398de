//! blockfall - falling-block blockchain explorer
//!
//! Recent blocks and transactions drop from above the screen and stack into a
//! responsive, bottom-anchored grid. The layout and animation engine lives in
//! [`visualizer`] and has no terminal dependencies; the rest of the crate is a
//! ratatui host around it.
//!
//! ## Architecture
//!
//! - **Core**: `visualizer` (cell sizing, grid mapping, motion, reconciliation)
//! - **Host**: `app` state, `ui` drawing, `source_sim` feed (native only)
//! - **Snapshot**: `ui_snapshot` serializes a frame for non-terminal frontends
//!
//! ## Usage
//!
//! ```bash
//! cargo run --features native -- --max-rows 6 --theme light
//! ```

// Core modules (available on all platforms)
pub mod config;
pub mod constants;
pub mod types;
pub mod util_text;
pub mod visualizer;

// Theme system
pub mod theme;

// UI core (terminal cell <-> pixel mapping)
pub mod ui_core;

pub mod app;
pub mod ui;

// UI feature flags
pub mod flags;

// UI snapshot types for DOM-based rendering
pub mod ui_snapshot;

// Simulated chain feed (needs the tokio timer)
#[cfg(feature = "native")]
pub mod source_sim;

// Utility modules
pub mod util;

// Re-export commonly used types
pub use app::{App, Pane};
pub use config::Config;
pub use types::{AppEvent, BlockRow, DisplayItem, ItemKey, TxLite};
pub use visualizer::{Visualizer, VisualizerConfig};
