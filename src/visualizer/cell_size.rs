//! Cell-size solver: the largest square cell that fits every item in a
//! bounded number of rows.

use super::LayoutPolicy;

/// Solve with the default [`LayoutPolicy`].
pub fn solve(count: usize, viewport_w: f64, viewport_h: f64) -> f64 {
    solve_with(count, viewport_w, viewport_h, &LayoutPolicy::default())
}

/// Largest feasible cell edge for `count` items in a `viewport_w` × `viewport_h`
/// container.
///
/// Every row count from 1 to `min(count, max_rows)` is tried; for each one the
/// edge is bounded by the row height, by the width available to the minimum
/// column count, and by `max_cell`. Candidates below `min_cell` are rejected.
/// When nothing qualifies the result is `min_cell`: an overcrowded grid shrinks
/// items to the smallest readable size rather than dropping any.
pub fn solve_with(count: usize, viewport_w: f64, viewport_h: f64, policy: &LayoutPolicy) -> f64 {
    let mut best: Option<f64> = None;

    for rows in 1..=count.min(policy.max_rows) {
        let by_height = (viewport_h / rows as f64).floor() - policy.gap;
        let min_cols = count.div_ceil(rows);
        let by_width = (viewport_w / min_cols as f64).floor() - policy.gap;
        let candidate = by_height.min(by_width).min(policy.max_cell);

        if candidate >= policy.min_cell && best.map_or(true, |b| candidate > b) {
            best = Some(candidate);
        }
    }

    best.unwrap_or(policy.min_cell)
}
