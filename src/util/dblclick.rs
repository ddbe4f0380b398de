//! Double-click detector for grid items
//!
//! Tracks consecutive clicks on the same item within a time threshold. Items
//! move while they animate, so clicks are compared by item identity rather
//! than by terminal cell.

use std::time::{Duration, Instant};

/// Two clicks on the same target within the threshold make a double-click.
///
/// # Example
/// ```
/// use blockfall::util::dblclick::DblClick;
/// use std::time::Duration;
///
/// let mut dbl = DblClick::new(Duration::from_millis(280));
///
/// // First click on block 10 - returns false
/// assert_eq!(dbl.register(10u64), false);
///
/// // Second click on the same block within threshold - returns true
/// assert_eq!(dbl.register(10u64), true);
///
/// // Third click - resets, returns false
/// assert_eq!(dbl.register(10u64), false);
/// ```
#[derive(Debug, Clone)]
pub struct DblClick<K> {
    last: Option<(K, Instant)>,
    threshold: Duration,
}

impl<K: PartialEq> Default for DblClick<K> {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::constants::app::DBLCLICK_MS))
    }
}

impl<K: PartialEq> DblClick<K> {
    /// Create a new double-click detector with specified time threshold
    pub fn new(threshold: Duration) -> Self {
        Self {
            last: None,
            threshold,
        }
    }

    /// Register a click on `target`.
    ///
    /// Returns `true` if this click completes a double-click (same target as
    /// the previous click, within the threshold); the detector then resets.
    pub fn register(&mut self, target: K) -> bool {
        self.register_at(target, Instant::now())
    }

    fn register_at(&mut self, target: K, now: Instant) -> bool {
        if let Some((last, when)) = &self.last {
            if *last == target && now.saturating_duration_since(*when) <= self.threshold {
                self.last = None;
                return true;
            }
        }

        self.last = Some((target, now));
        false
    }

    /// Reset the detector state (useful when the pane changes)
    pub fn reset(&mut self) {
        self.last = None;
    }
}
