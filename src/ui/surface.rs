//! Off-screen RGB draw surface and its half-block blitter.
//!
//! The surface holds two texels per terminal cell (top and bottom half), so a
//! texel is `px_per_col × px_per_row / 2` viewport pixels: square with the
//! default metrics.  All drawing primitives take viewport-pixel coordinates
//! and alpha-blend onto whatever is already there.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};
use thiserror::Error;

use crate::core::pointer::CellMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `self` with `over` painted on top at opacity `alpha`.
    pub fn blend(self, over: Rgb, alpha: f64) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |under: u8, top: u8| -> u8 {
            (under as f64 + (top as f64 - under as f64) * a).round() as u8
        };
        Rgb(mix(self.0, over.0), mix(self.1, over.1), mix(self.2, over.2))
    }

    pub fn to_color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb(r, g, b)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("surface has zero size ({cols}x{rows})")]
    ZeroSize { cols: u16, rows: u16 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    cols: u16,
    rows: u16,
    metrics: CellMetrics,
    /// Row-major, `cols × rows * 2`.
    texels: Vec<Rgb>,
}

impl Surface {
    /// Acquire a surface covering a `cols × rows` terminal.
    pub fn new(cols: u16, rows: u16, metrics: CellMetrics) -> Result<Self, SurfaceError> {
        if cols == 0 || rows == 0 {
            return Err(SurfaceError::ZeroSize { cols, rows });
        }
        Ok(Self {
            cols,
            rows,
            metrics,
            texels: vec![Rgb::default(); cols as usize * rows as usize * 2],
        })
    }

    /// Reallocate for a new terminal size.  The old pixels are discarded, not
    /// rescaled.
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<(), SurfaceError> {
        *self = Self::new(cols, rows, self.metrics)?;
        Ok(())
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Surface size in viewport pixels.
    pub fn size_px(&self) -> (f64, f64) {
        self.metrics.viewport_px(self.cols, self.rows)
    }

    fn texel_w(&self) -> usize {
        self.cols as usize
    }

    fn texel_h(&self) -> usize {
        self.rows as usize * 2
    }

    fn texel_px(&self) -> (f64, f64) {
        (self.metrics.px_per_col, self.metrics.px_per_row / 2.0)
    }

    /// Texel at `(tx, ty)` in texel coordinates.
    pub fn texel(&self, tx: usize, ty: usize) -> Option<Rgb> {
        if tx >= self.texel_w() || ty >= self.texel_h() {
            return None;
        }
        Some(self.texels[ty * self.texel_w() + tx])
    }

    /// Texel containing viewport pixel `(x, y)`.
    pub fn texel_at_px(&self, x: f64, y: f64) -> Option<Rgb> {
        let (tw, th) = self.texel_px();
        if x < 0.0 || y < 0.0 {
            return None;
        }
        self.texel((x / tw) as usize, (y / th) as usize)
    }

    fn blend_texel(&mut self, tx: usize, ty: usize, color: Rgb, alpha: f64) {
        let w = self.texel_w();
        if tx < w && ty < self.texel_h() {
            let t = &mut self.texels[ty * w + tx];
            *t = t.blend(color, alpha);
        }
    }

    pub fn clear(&mut self, color: Rgb) {
        self.texels.fill(color);
    }

    /// 1px vertical line at `x`, blended over the whole texel column it falls in.
    pub fn vline(&mut self, x: f64, color: Rgb, alpha: f64) {
        let (tw, _) = self.texel_px();
        if x < 0.0 {
            return;
        }
        let tx = (x / tw) as usize;
        for ty in 0..self.texel_h() {
            self.blend_texel(tx, ty, color, alpha);
        }
    }

    /// 1px horizontal line at `y`.
    pub fn hline(&mut self, y: f64, color: Rgb, alpha: f64) {
        let (_, th) = self.texel_px();
        if y < 0.0 {
            return;
        }
        let ty = (y / th) as usize;
        for tx in 0..self.texel_w() {
            self.blend_texel(tx, ty, color, alpha);
        }
    }

    /// Texel range whose centres may lie within `r` of `(cx, cy)`.
    fn bounds(&self, cx: f64, cy: f64, r: f64) -> Option<(usize, usize, usize, usize)> {
        let (tw, th) = self.texel_px();
        let x0 = ((cx - r) / tw).floor().max(0.0);
        let y0 = ((cy - r) / th).floor().max(0.0);
        let x1 = ((cx + r) / tw).floor().min(self.texel_w() as f64 - 1.0);
        let y1 = ((cy + r) / th).floor().min(self.texel_h() as f64 - 1.0);
        if x1 < x0 || y1 < y0 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    /// Filled circle.  The texel under the centre is always painted so tiny
    /// circles never vanish between texel centres.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb, alpha: f64) {
        let (tw, th) = self.texel_px();
        if let Some((x0, y0, x1, y1)) = self.bounds(cx, cy, r.max(0.0)) {
            let center = (cx >= 0.0 && cy >= 0.0).then(|| ((cx / tw) as usize, (cy / th) as usize));
            for ty in y0..=y1 {
                for tx in x0..=x1 {
                    let px = (tx as f64 + 0.5) * tw;
                    let py = (ty as f64 + 0.5) * th;
                    let inside = (px - cx).powi(2) + (py - cy).powi(2) <= r * r;
                    if inside || center == Some((tx, ty)) {
                        self.blend_texel(tx, ty, color, alpha);
                    }
                }
            }
        }
    }

    /// Soft disc: opacity `alpha` at the centre fading linearly to zero at `r`.
    pub fn radial_glow(&mut self, cx: f64, cy: f64, r: f64, color: Rgb, alpha: f64) {
        if r <= 0.0 {
            return;
        }
        let (tw, th) = self.texel_px();
        if let Some((x0, y0, x1, y1)) = self.bounds(cx, cy, r) {
            for ty in y0..=y1 {
                for tx in x0..=x1 {
                    let px = (tx as f64 + 0.5) * tw;
                    let py = (ty as f64 + 0.5) * th;
                    let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                    if d < r {
                        self.blend_texel(tx, ty, color, alpha * (1.0 - d / r));
                    }
                }
            }
        }
    }
}

/// Blits a [`Surface`] into the terminal buffer using `▀` half-blocks:
/// top texel as foreground, bottom texel as background.
pub struct SurfaceView<'a> {
    pub surface: &'a Surface,
}

impl Widget for SurfaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let s = self.surface;
        let w = area.width.min(s.cols);
        let h = area.height.min(s.rows);
        for row in 0..h {
            for col in 0..w {
                let top = s.texel(col as usize, row as usize * 2).unwrap_or_default();
                let bottom = s.texel(col as usize, row as usize * 2 + 1).unwrap_or_default();
                if let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y + row)) {
                    cell.set_char('▀')
                        .set_fg(top.to_color())
                        .set_bg(bottom.to_color());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb(0, 0, 0);
    const WHITE: Rgb = Rgb(255, 255, 255);

    fn surface(cols: u16, rows: u16) -> Surface {
        Surface::new(cols, rows, CellMetrics::default()).unwrap()
    }

    #[test]
    fn zero_size_is_refused() {
        assert_eq!(
            Surface::new(0, 10, CellMetrics::default()),
            Err(SurfaceError::ZeroSize { cols: 0, rows: 10 })
        );
        let mut s = surface(4, 4);
        assert!(s.resize(4, 0).is_err());
    }

    #[test]
    fn blend_interpolates() {
        assert_eq!(BLACK.blend(WHITE, 0.0), BLACK);
        assert_eq!(BLACK.blend(WHITE, 1.0), WHITE);
        assert_eq!(BLACK.blend(Rgb(200, 100, 0), 0.5), Rgb(100, 50, 0));
        assert_eq!(BLACK.blend(WHITE, 7.0), WHITE);
    }

    #[test]
    fn resize_reallocates_and_discards_pixels() {
        let mut s = surface(160, 60);
        s.clear(WHITE);
        s.resize(80, 30).unwrap();
        assert_eq!((s.cols(), s.rows()), (80, 30));
        assert_eq!(s.size_px(), (400.0, 300.0));
        assert_eq!(s.texel(79, 59), Some(BLACK));
        assert_eq!(s.texel(80, 0), None);
        assert_eq!(s.texel(0, 60), None);
    }

    #[test]
    fn lines_hit_the_texel_they_fall_in() {
        let mut s = surface(10, 5);
        s.clear(BLACK);
        s.vline(20.0, WHITE, 1.0);
        s.hline(20.0, WHITE, 1.0);
        // 5px texels: x=20 → column 4, y=20 → texel row 4.
        assert_eq!(s.texel(4, 0), Some(WHITE));
        assert_eq!(s.texel(3, 0), Some(BLACK));
        assert_eq!(s.texel(0, 4), Some(WHITE));
        assert_eq!(s.texel(0, 3), Some(BLACK));
    }

    #[test]
    fn glow_fades_to_nothing_at_the_edge() {
        let mut s = surface(40, 20);
        s.clear(BLACK);
        s.radial_glow(100.0, 100.0, 50.0, WHITE, 1.0);
        let centre = s.texel_at_px(100.0, 100.0).unwrap();
        let near_edge = s.texel_at_px(100.0, 142.0).unwrap();
        assert!(centre.0 > near_edge.0);
        assert_eq!(s.texel_at_px(100.0, 160.0), Some(BLACK));
        assert_eq!(s.texel_at_px(10.0, 10.0), Some(BLACK));
    }

    #[test]
    fn tiny_circle_still_paints_its_centre() {
        let mut s = surface(10, 5);
        s.clear(BLACK);
        s.fill_circle(11.0, 11.0, 0.1, WHITE, 1.0);
        assert_eq!(s.texel_at_px(11.0, 11.0), Some(WHITE));
        assert_eq!(s.texel_at_px(20.0, 20.0), Some(BLACK));
    }

    #[test]
    fn off_surface_drawing_is_clipped() {
        let mut s = surface(4, 2);
        s.clear(BLACK);
        s.fill_circle(-50.0, -50.0, 10.0, WHITE, 1.0);
        s.radial_glow(500.0, 500.0, 20.0, WHITE, 1.0);
        s.vline(-1.0, WHITE, 1.0);
        s.hline(1000.0, WHITE, 1.0);
        assert!((0..4).all(|x| (0..4).all(|y| s.texel(x, y) == Some(BLACK))));
    }

    #[test]
    fn view_uses_half_blocks() {
        let mut s = surface(2, 1);
        s.clear(BLACK);
        s.fill_circle(2.5, 2.5, 0.1, WHITE, 1.0);
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        SurfaceView { surface: &s }.render(area, &mut buf);
        let cell = &buf[Position::new(0, 0)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 255, 255));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
    }
}
