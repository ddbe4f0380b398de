//! Grid mapper: column count and bottom-anchored cell positions.

use super::Point;
use serde::Serialize;

/// Grid derived from a cell size and the viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GridGeometry {
    /// Always at least 1
    pub columns: usize,
    /// Stretched so the columns fill the whole width
    pub cell_width: f64,
    /// `cell_size + gap`
    pub cell_height: f64,
    pub cell_size: f64,
    pub gap: f64,
}

/// Lay out square cells of `cell_size` across `viewport_w`.
///
/// A viewport narrower than one cell (possible when the cell size was solved
/// for an older, wider snapshot) still gets a single column.
pub fn layout(cell_size: f64, viewport_w: f64, gap: f64) -> GridGeometry {
    let raw = (viewport_w / (cell_size + gap)).floor();
    let columns = if raw.is_finite() && raw >= 1.0 {
        raw as usize
    } else {
        1
    };

    GridGeometry {
        columns,
        cell_width: viewport_w.max(0.0) / columns as f64,
        cell_height: cell_size + gap,
        cell_size,
        gap,
    }
}

impl GridGeometry {
    /// Target position of the item at linear `index`.
    ///
    /// Row 0 sits on the bottom edge of the viewport; higher rows stack upward.
    pub fn position_of(&self, index: usize, viewport_h: f64) -> Point {
        let col = index % self.columns;
        let row = index / self.columns;
        Point {
            x: self.cell_width * col as f64 + self.gap / 2.0,
            y: viewport_h - (row + 1) as f64 * self.cell_height + self.gap / 2.0,
        }
    }

    pub fn rows_for(&self, count: usize) -> usize {
        count.div_ceil(self.columns)
    }

    /// Height the host must reserve to show `count` items.
    pub fn container_height(&self, count: usize) -> f64 {
        self.rows_for(count) as f64 * self.cell_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_stretch_to_fill_width() {
        let g = layout(46.0, 100.0, 4.0);
        assert_eq!(g.columns, 2);
        assert_eq!(g.cell_width, 50.0);
        assert_eq!(g.cell_height, 50.0);
    }

    #[test]
    fn narrow_viewport_clamps_to_one_column() {
        let g = layout(100.0, 30.0, 4.0);
        assert_eq!(g.columns, 1);
        assert_eq!(g.cell_width, 30.0);

        let zero = layout(10.0, 0.0, 4.0);
        assert_eq!(zero.columns, 1);
        assert_eq!(zero.cell_width, 0.0);
        // modulo by the clamped column count never panics
        let p = zero.position_of(3, 100.0);
        assert_eq!(p.x, 2.0);
    }

    #[test]
    fn degenerate_divisor_still_yields_a_column() {
        let g = layout(0.0, 100.0, 0.0);
        assert_eq!(g.columns, 1);
    }

    #[test]
    fn row_zero_is_bottom_anchored() {
        let g = layout(46.0, 100.0, 4.0);
        let p0 = g.position_of(0, 200.0);
        assert_eq!(p0, Point { x: 2.0, y: 152.0 });

        let p1 = g.position_of(1, 200.0);
        assert_eq!(p1, Point { x: 52.0, y: 152.0 });

        let p2 = g.position_of(2, 200.0);
        assert_eq!(p2, Point { x: 2.0, y: 102.0 });
    }

    #[test]
    fn container_height_counts_partial_rows() {
        let g = layout(46.0, 100.0, 4.0);
        assert_eq!(g.rows_for(0), 0);
        assert_eq!(g.rows_for(3), 2);
        assert_eq!(g.container_height(3), 100.0);
    }
}
