use crate::constants::ui::{PX_PER_COL, PX_PER_ROW};
use crate::visualizer::{Point, Viewport};
use ratatui::layout::Rect;

/// Maps between terminal cells and the visualizer's pixel space.
///
/// The visualizer thinks in pixels (like a browser canvas); a terminal cell is
/// treated as a `px_per_col` × `px_per_row` block of them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelScale {
    pub px_per_col: f64,
    pub px_per_row: f64,
}

impl Default for PixelScale {
    fn default() -> Self {
        Self {
            px_per_col: PX_PER_COL,
            px_per_row: PX_PER_ROW,
        }
    }
}

impl PixelScale {
    /// Pixel viewport covered by `area`.
    pub fn viewport(&self, area: Rect) -> Viewport {
        Viewport::new(
            area.width as f64 * self.px_per_col,
            area.height as f64 * self.px_per_row,
        )
    }

    /// Terminal rectangle for a `w_px` × `h_px` box at `pos`, clipped to `area`.
    ///
    /// Boxes are at least one cell in each direction. Returns `None` when the
    /// box lies entirely outside `area` (e.g. an item still above the top edge).
    pub fn to_cell_rect(&self, area: Rect, pos: Point, w_px: f64, h_px: f64) -> Option<Rect> {
        let left = (pos.x / self.px_per_col).floor() as i64;
        let top = (pos.y / self.px_per_row).floor() as i64;
        let width = ((w_px / self.px_per_col).round() as i64).max(1);
        let height = ((h_px / self.px_per_row).round() as i64).max(1);

        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = (left + width).min(area.width as i64);
        let y1 = (top + height).min(area.height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(Rect {
            x: area.x + x0 as u16,
            y: area.y + y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }

    /// Pixel point at the centre of terminal cell (`col`, `row`), relative to
    /// `area`. `None` when the cell is outside `area`.
    pub fn to_pixels(&self, area: Rect, col: u16, row: u16) -> Option<Point> {
        if col < area.x || row < area.y || col >= area.right() || row >= area.bottom() {
            return None;
        }
        Some(Point {
            x: ((col - area.x) as f64 + 0.5) * self.px_per_col,
            y: ((row - area.y) as f64 + 0.5) * self.px_per_row,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect {
        x: 2,
        y: 3,
        width: 40,
        height: 10,
    };

    #[test]
    fn viewport_scales_area() {
        let v = PixelScale::default().viewport(AREA);
        assert_eq!(v, Viewport::new(320.0, 160.0));
    }

    #[test]
    fn box_maps_to_cells() {
        let s = PixelScale::default();
        let r = s
            .to_cell_rect(AREA, Point { x: 16.0, y: 32.0 }, 32.0, 32.0)
            .unwrap();
        assert_eq!(r, Rect::new(4, 5, 4, 2));
    }

    #[test]
    fn tiny_box_still_gets_a_cell() {
        let s = PixelScale::default();
        let r = s
            .to_cell_rect(AREA, Point { x: 0.0, y: 0.0 }, 3.0, 3.0)
            .unwrap();
        assert_eq!(r, Rect::new(2, 3, 1, 1));
    }

    #[test]
    fn box_above_area_is_hidden_or_clipped() {
        let s = PixelScale::default();
        assert!(s
            .to_cell_rect(AREA, Point { x: 0.0, y: -100.0 }, 32.0, 32.0)
            .is_none());

        let clipped = s
            .to_cell_rect(AREA, Point { x: 0.0, y: -16.0 }, 32.0, 32.0)
            .unwrap();
        assert_eq!(clipped, Rect::new(2, 3, 4, 1));
    }

    #[test]
    fn cell_to_pixels_round_trips_inside_area() {
        let s = PixelScale::default();
        let p = s.to_pixels(AREA, 4, 5).unwrap();
        assert_eq!(p, Point { x: 20.0, y: 40.0 });
        assert!(s.to_pixels(AREA, 0, 0).is_none());
        assert!(s.to_pixels(AREA, 42, 5).is_none());
    }
}
