//! Reconciliation: diff a new item list (or viewport) against the existing
//! motion states.

use super::cell_size::solve_with;
use super::grid::{layout, GridGeometry};
use super::motion::MotionState;
use super::{LayoutPolicy, Point, SortDirection, Viewport};
use crate::types::{DisplayItem, ItemKey};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

/// Source of the spawn-height offset that staggers simultaneous arrivals.
#[derive(Debug, Clone)]
pub enum SpawnJitter {
    Random(StdRng),
    /// Same offset for every spawn (clamped into the allowed range)
    Fixed(f64),
}

impl SpawnJitter {
    pub fn from_entropy() -> Self {
        SpawnJitter::Random(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        SpawnJitter::Random(StdRng::seed_from_u64(seed))
    }

    pub fn fixed(offset: f64) -> Self {
        SpawnJitter::Fixed(offset)
    }

    /// Offset in `[0, max)`; 0 when `max` is not positive.
    pub fn sample(&mut self, max: f64) -> f64 {
        if max.is_nan() || max <= 0.0 {
            return 0.0;
        }
        match self {
            SpawnJitter::Random(rng) => rng.gen_range(0.0..max),
            SpawnJitter::Fixed(offset) => offset.clamp(0.0, max),
        }
    }
}

impl Default for SpawnJitter {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// One laid-out item.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub key: ItemKey,
    pub index: usize,
    pub target: Point,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub spawned: usize,
    pub retargeted: usize,
    pub removed: usize,
}

/// Result of one pass. `entries` are in index order (index 0 first).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reconciled {
    pub entries: Vec<Entry>,
    pub cell_size: Option<f64>,
    pub geometry: Option<GridGeometry>,
    pub stats: ReconcileStats,
}

/// Sort items by the policy's direction and drop repeated keys.
///
/// Ties on `order` fall back to the key so the layout is deterministic.
pub fn sort_items<'a>(items: &'a [DisplayItem], direction: SortDirection) -> Vec<&'a DisplayItem> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut sorted: Vec<&DisplayItem> = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(&item.key) {
            sorted.push(item);
        } else {
            log::warn!("duplicate item key {} ignored", item.key);
        }
    }

    sorted.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.key.cmp(&b.key)));
    if direction == SortDirection::Descending {
        sorted.reverse();
    }
    sorted
}

/// Bring `existing` in line with `items` laid out in `viewport`.
///
/// New keys spawn above the viewport, keys whose cell moved are retargeted
/// (their on-screen position is kept), and keys no longer listed are dropped.
/// Afterwards `existing` holds exactly one state per distinct key in `items`.
pub fn reconcile(
    items: &[DisplayItem],
    viewport: Viewport,
    policy: &LayoutPolicy,
    spawn_jitter_max: f64,
    existing: &mut HashMap<ItemKey, MotionState>,
    jitter: &mut SpawnJitter,
) -> Reconciled {
    let mut stats = ReconcileStats::default();

    let sorted = sort_items(items, policy.sort);
    if sorted.is_empty() {
        stats.removed = existing.len();
        existing.clear();
        return Reconciled {
            stats,
            ..Reconciled::default()
        };
    }

    let count = sorted.len();
    let cell_size = solve_with(count, viewport.width, viewport.height, policy);
    let geometry = layout(cell_size, viewport.width, policy.gap);

    let mut entries = Vec::with_capacity(count);
    // the last item in sorted order takes index 0 (bottom-left)
    for (position, item) in sorted.iter().enumerate() {
        let index = count - 1 - position;
        let target = geometry.position_of(index, viewport.height);

        match existing.get_mut(&item.key) {
            Some(state) => {
                if state.retarget(target) {
                    stats.retargeted += 1;
                }
            }
            None => {
                let offset = jitter.sample(spawn_jitter_max);
                existing.insert(
                    item.key.clone(),
                    MotionState::spawn(target, cell_size, offset),
                );
                stats.spawned += 1;
            }
        }

        entries.push(Entry {
            key: item.key.clone(),
            index,
            target,
        });
    }
    entries.reverse();

    let live: HashSet<&ItemKey> = entries.iter().map(|e| &e.key).collect();
    let before = existing.len();
    existing.retain(|key, _| live.contains(key));
    stats.removed = before - existing.len();

    log::debug!(
        "reconcile: {} items cell={:.1} cols={} spawned={} retargeted={} removed={}",
        count,
        cell_size,
        geometry.columns,
        stats.spawned,
        stats.retargeted,
        stats.removed
    );

    Reconciled {
        entries,
        cell_size: Some(cell_size),
        geometry: Some(geometry),
        stats,
    }
}
