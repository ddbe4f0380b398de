//! Falling-block grid visualizer
//!
//! Lays an arbitrary, changing set of items out on a responsive grid and
//! animates each one from above the viewport into its cell. The pieces, leaf
//! first:
//!
//! - [`cell_size`]: largest square cell that fits everything in a bounded
//!   number of rows
//! - [`grid`]: column count and bottom-anchored cell positions
//! - [`motion`]: per-item motion state and the frame integrator
//! - [`reconcile`]: diffing a new item list or viewport against existing state
//!
//! [`Visualizer`] ties them together for a host render loop: feed it items and
//! a viewport whenever they change, call [`Visualizer::tick`] once per frame,
//! and paint [`Visualizer::render_positions`].

pub mod cell_size;
pub mod grid;
pub mod motion;
pub mod reconcile;

pub use cell_size::{solve, solve_with};
pub use grid::{layout, GridGeometry};
pub use motion::{advance, clamp_dt, MotionState, Physics};
pub use reconcile::{reconcile, Entry, ReconcileStats, Reconciled, SpawnJitter};

use crate::constants::{layout as lc, motion as mc};
use crate::types::{DisplayItem, ItemKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Container size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Negative or non-finite sizes become 0.
    pub fn new(width: f64, height: f64) -> Self {
        let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: clean(width),
            height: clean(height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Grid sizing and ordering rules.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutPolicy {
    pub gap: f64,
    pub min_cell: f64,
    pub max_cell: f64,
    pub max_rows: usize,
    pub sort: SortDirection,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            gap: lc::GAP,
            min_cell: lc::MIN_CELL,
            max_cell: lc::MAX_CELL,
            max_rows: lc::MAX_ROWS,
            sort: SortDirection::Ascending,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub layout: LayoutPolicy,
    pub physics: Physics,
    /// Upper bound of the random extra spawn height
    pub spawn_jitter: f64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            layout: LayoutPolicy::default(),
            physics: Physics::default(),
            spawn_jitter: mc::SPAWN_JITTER,
        }
    }
}

impl VisualizerConfig {
    /// Blocks, ascending by height: the newest block lands bottom-left.
    pub fn blocks() -> Self {
        Self::default()
    }

    /// Transactions, ascending by timestamp: the latest tx lands bottom-left.
    pub fn transactions() -> Self {
        Self::default()
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.layout.max_rows = max_rows;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.layout.gap = gap;
        self
    }

    pub fn with_sort(mut self, sort: SortDirection) -> Self {
        self.layout.sort = sort;
        self
    }
}

/// Layout and animation state for one grid.
#[derive(Debug)]
pub struct Visualizer {
    config: VisualizerConfig,
    viewport: Viewport,
    jitter: SpawnJitter,
    items: Vec<DisplayItem>,
    states: HashMap<ItemKey, MotionState>,
    entries: Vec<Entry>,
    cell_size: Option<f64>,
    geometry: Option<GridGeometry>,
    last_stats: ReconcileStats,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Self {
        Self::with_jitter(config, SpawnJitter::from_entropy())
    }

    pub fn with_jitter(config: VisualizerConfig, jitter: SpawnJitter) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            jitter,
            items: Vec::new(),
            states: HashMap::new(),
            entries: Vec::new(),
            cell_size: None,
            geometry: None,
            last_stats: ReconcileStats::default(),
        }
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace the item set and reconcile.
    pub fn set_items(&mut self, items: &[DisplayItem]) -> ReconcileStats {
        self.items = items.to_vec();
        self.reconcile()
    }

    /// Resize the container; an unchanged viewport does nothing.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ReconcileStats {
        if viewport == self.viewport {
            return ReconcileStats::default();
        }
        log::debug!(
            "viewport {:.0}x{:.0} -> {:.0}x{:.0}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        self.reconcile()
    }

    fn reconcile(&mut self) -> ReconcileStats {
        let out = reconcile(
            &self.items,
            self.viewport,
            &self.config.layout,
            self.config.spawn_jitter,
            &mut self.states,
            &mut self.jitter,
        );
        self.entries = out.entries;
        self.cell_size = out.cell_size;
        self.geometry = out.geometry;
        self.last_stats = out.stats;
        out.stats
    }

    /// Advance every moving item by `dt` ticks; returns how many still move.
    pub fn tick(&mut self, dt: f64) -> usize {
        advance(self.states.values_mut(), dt, &self.config.physics)
    }

    /// [`Visualizer::tick`] with a wall-clock frame duration.
    pub fn tick_elapsed(&mut self, elapsed: Duration) -> usize {
        let dt = elapsed.as_secs_f64() * 1000.0 / mc::TICK_MS;
        self.tick(dt)
    }

    /// Put every item on its target immediately.
    pub fn settle_all(&mut self) {
        for state in self.states.values_mut() {
            state.settle();
        }
    }

    /// Drop all motion state so every item falls in again.
    pub fn replay(&mut self) -> ReconcileStats {
        self.states.clear();
        self.reconcile()
    }

    pub fn render_positions(&self) -> HashMap<ItemKey, Point> {
        self.states
            .iter()
            .map(|(key, state)| (key.clone(), state.position()))
            .collect()
    }

    /// Items with their motion state, in index order (bottom-left first).
    pub fn entries(&self) -> impl Iterator<Item = (&DisplayItem, &MotionState)> + '_ {
        let by_key: HashMap<&ItemKey, &DisplayItem> =
            self.items.iter().rev().map(|i| (&i.key, i)).collect();
        self.entries.iter().filter_map(move |e| {
            let item = by_key.get(&e.key).copied()?;
            let state = self.states.get(&e.key)?;
            Some((item, state))
        })
    }

    pub fn container_height(&self) -> f64 {
        self.geometry
            .map(|g| g.container_height(self.entries.len()))
            .unwrap_or(0.0)
    }

    pub fn active_count(&self) -> usize {
        self.states.values().filter(|s| !s.settled).count()
    }

    pub fn is_settled(&self) -> bool {
        self.states.values().all(|s| s.settled)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn cell_size(&self) -> Option<f64> {
        self.cell_size
    }

    pub fn geometry(&self) -> Option<GridGeometry> {
        self.geometry
    }

    pub fn last_stats(&self) -> ReconcileStats {
        self.last_stats
    }

    pub fn state(&self, key: &ItemKey) -> Option<&MotionState> {
        self.states.get(key)
    }

    pub fn item(&self, key: &ItemKey) -> Option<&DisplayItem> {
        self.items.iter().find(|i| &i.key == key)
    }

    /// Item whose square currently covers `point`, if any.
    pub fn item_at(&self, point: Point) -> Option<&DisplayItem> {
        let size = self.cell_size?;
        let key = self.entries.iter().map(|e| &e.key).find(|key| {
            self.states.get(*key).is_some_and(|s| {
                point.x >= s.x && point.x < s.x + size && point.y >= s.y && point.y < s.y + size
            })
        })?;
        self.item(key)
    }
}
