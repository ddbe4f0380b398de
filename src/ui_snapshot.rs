//! Render snapshot for non-terminal frontends
//!
//! A serializable picture of one pane's grid at the current frame, so a DOM or
//! canvas host can paint the same animation the TUI draws.

use serde::Serialize;

use crate::app::Pane;
use crate::types::ItemKey;

/// One pane's grid at the current frame (one-way data flow: Rust → host)
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub pane: Pane,
    /// Height of the occupied grid rows in pixels
    pub container_height: f64,
    /// True when nothing is moving
    pub settled: bool,
    /// Number of items still moving
    pub active: usize,
    pub cell_size: Option<f64>,
    pub columns: Option<usize>,
    /// Items in index order (bottom-left first)
    pub items: Vec<ItemSnapshot>,
}

impl RenderSnapshot {
    /// JSON payload handed to a web frontend each frame
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemSnapshot {
    pub key: ItemKey,
    pub x: f64,
    pub y: f64,
    /// Side of the square in pixels
    pub size: f64,
    pub fee: u64,
    pub count: u32,
    pub settled: bool,
}
