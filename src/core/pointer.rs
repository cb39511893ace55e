//! Pointer tracking in viewport pixel space.
//!
//! The terminal reports the mouse as a `(column, row)` cell.  Effects work in
//! a virtual pixel space instead, so every cell is mapped to the pixel at its
//! centre through [`CellMetrics`].  The tracker only records what the host
//! tells it; everything else ([`GridCell`], glow radius) is derived on read.

/// Size of one terminal cell in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub px_per_col: f64,
    pub px_per_row: f64,
}

impl Default for CellMetrics {
    /// Terminal glyphs are roughly twice as tall as they are wide.
    fn default() -> Self {
        Self {
            px_per_col: 5.0,
            px_per_row: 10.0,
        }
    }
}

impl CellMetrics {
    /// Pixel position at the centre of a terminal cell.
    pub fn cell_center(&self, column: u16, row: u16) -> (f64, f64) {
        (
            (column as f64 + 0.5) * self.px_per_col,
            (row as f64 + 0.5) * self.px_per_row,
        )
    }

    /// Viewport size in pixels for a terminal of `cols × rows` cells.
    pub fn viewport_px(&self, cols: u16, rows: u16) -> (f64, f64) {
        (cols as f64 * self.px_per_col, rows as f64 * self.px_per_row)
    }
}

/// A square region of the draw surface, `cell_size` pixels on a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: i64,
    pub col: i64,
}

impl GridCell {
    /// The cell containing pixel `(x, y)`.
    pub fn containing(x: f64, y: f64, cell_size: f64) -> Self {
        Self {
            row: (y / cell_size).floor() as i64,
            col: (x / cell_size).floor() as i64,
        }
    }

    /// Pixel position of the cell's centre.
    pub fn center(&self, cell_size: f64) -> (f64, f64) {
        (
            (self.col as f64 + 0.5) * cell_size,
            (self.row as f64 + 0.5) * cell_size,
        )
    }
}

/// Last known pointer position.  `present` drops to `false` on leave; the
/// coordinates are kept so consumers can keep easing toward them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub present: bool,
}

/// Records pointer movement/leave notifications from the host.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    state: PointerState,
    /// `false` until the first movement arrives.
    seen: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_move(&mut self, x: f64, y: f64) {
        self.state = PointerState {
            x,
            y,
            present: true,
        };
        self.seen = true;
    }

    pub fn on_leave(&mut self) {
        self.state.present = false;
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.present
    }

    /// `None` until the host has delivered at least one position.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.seen.then_some((self.state.x, self.state.y))
    }

    /// Grid cell under the pointer, if it is currently active.
    pub fn grid_cell(&self, cell_size: f64) -> Option<GridCell> {
        self.state
            .present
            .then(|| GridCell::containing(self.state.x, self.state.y, cell_size))
    }

    /// Glow radius snaps between `0` and `radius` with no easing.
    pub fn glow_radius(&self, radius: f64) -> f64 {
        if self.state.present {
            radius
        } else {
            0.0
        }
    }
}
