//! Pointer-reactive background renderer.
//!
//! One [`EffectRenderer`] owns the draw surface plus whatever per-mode state
//! its [`VisualMode`] needs (trail history or follower chain).  Everything
//! mode-specific is created in one batch by [`EffectRenderer::mount`] and
//! released in one batch by [`EffectRenderer::teardown`]; nothing is
//! allocated per frame.
//!
//! Mutation happens at exactly two points: [`EffectRenderer::on_pointer_move`]
//! (trail) and the update step at the top of [`EffectRenderer::frame`]
//! (follower chain).  Drawing only reads.

use std::time::Duration;

use crate::core::{
    follower::FollowerChain,
    pointer::PointerTracker,
    scene::{EffectSettings, VisualMode},
    trail::TrailHistory,
};

use super::surface::{Rgb, Surface};
use super::theme::Theme;

pub struct EffectRenderer {
    mode: VisualMode,
    settings: EffectSettings,
    /// `None` while the terminal reports a zero dimension.
    surface: Option<Surface>,
    trail: Option<TrailHistory>,
    chain: Option<FollowerChain>,
    mounted: bool,
    /// Glow radius used by the most recent draw.
    last_glow_radius: f64,
    /// Time since the session started, as of the latest frame.
    elapsed: Duration,
}

impl EffectRenderer {
    /// Acquire a surface for a `cols × rows` terminal and create the mode's
    /// state.  A zero-sized terminal yields a renderer that draws nothing
    /// until a valid [`resize`](Self::resize) arrives.
    pub fn mount(
        mode: VisualMode,
        settings: EffectSettings,
        cols: u16,
        rows: u16,
        pointer: &PointerTracker,
    ) -> Self {
        let mut renderer = Self {
            mode,
            settings,
            surface: None,
            trail: None,
            chain: None,
            mounted: false,
            last_glow_radius: 0.0,
            elapsed: Duration::ZERO,
        };
        renderer.activate(mode, cols, rows, pointer);
        renderer
    }

    fn activate(&mut self, mode: VisualMode, cols: u16, rows: u16, pointer: &PointerTracker) {
        self.mode = mode;
        self.surface = match Surface::new(cols, rows, self.settings.metrics) {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::warn!(error = %e, "no draw surface, background disabled");
                None
            }
        };
        self.trail = (mode == VisualMode::Trail)
            .then(|| TrailHistory::new(self.settings.trail_capacity));
        self.chain = (mode == VisualMode::Follower).then(|| {
            let origin = pointer.position().unwrap_or_else(|| {
                let (w, h) = self.settings.metrics.viewport_px(cols, rows);
                (w / 2.0, h / 2.0)
            });
            FollowerChain::new(self.settings.follower_count, self.settings.follower_ease, origin)
        });
        self.mounted = true;
        self.last_glow_radius = 0.0;
        tracing::debug!(mode = mode.label(), cols, rows, "effect renderer mounted");
        self.draw(pointer);
    }

    /// Release the surface and all mode state.  Returns `true` only on the
    /// first call.
    pub fn teardown(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        if let Some(trail) = self.trail.as_mut() {
            trail.clear();
        }
        self.trail = None;
        self.chain = None;
        self.surface = None;
        self.mounted = false;
        tracing::debug!(mode = self.mode.label(), "effect renderer torn down");
        true
    }

    /// Tear down and mount again in `mode` on the same terminal.
    pub fn remount(&mut self, mode: VisualMode, pointer: &PointerTracker) {
        let (cols, rows) = self
            .surface
            .as_ref()
            .map_or((0, 0), |s| (s.cols(), s.rows()));
        self.teardown();
        self.activate(mode, cols, rows, pointer);
    }

    pub fn mode(&self) -> VisualMode {
        self.mode
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn trail(&self) -> Option<&TrailHistory> {
        self.trail.as_ref()
    }

    pub fn chain(&self) -> Option<&FollowerChain> {
        self.chain.as_ref()
    }

    pub fn last_glow_radius(&self) -> f64 {
        self.last_glow_radius
    }

    /// Viewport changed.  The surface is reallocated (never rescaled) and
    /// redrawn immediately; a zero dimension drops it until a valid size
    /// shows up.
    pub fn resize(&mut self, cols: u16, rows: u16, pointer: &PointerTracker) {
        if !self.mounted {
            return;
        }
        let result = if let Some(surface) = self.surface.as_mut() {
            surface.resize(cols, rows)
        } else {
            Surface::new(cols, rows, self.settings.metrics).map(|s| self.surface = Some(s))
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "skipping redraw until a valid size arrives");
            self.surface = None;
            return;
        }
        self.draw(pointer);
    }

    /// Record the pointer's cell in trail mode.  Call once per movement event.
    pub fn on_pointer_move(&mut self, pointer: &PointerTracker) {
        if !self.mounted {
            return;
        }
        let cell_size = self.settings.cell_size;
        if let (Some(trail), Some(cell)) = (self.trail.as_mut(), pointer.grid_cell(cell_size)) {
            trail.record_if_new_cell(cell);
        }
    }

    /// One animation frame at `elapsed` into the session: update step, then
    /// draw.
    pub fn frame(&mut self, pointer: &PointerTracker, elapsed: Duration) {
        if !self.mounted {
            return;
        }
        self.elapsed = elapsed;
        if let (Some(chain), Some(target)) = (self.chain.as_mut(), pointer.position()) {
            chain.tick(target);
        }
        self.draw(pointer);
    }

    fn draw(&mut self, pointer: &PointerTracker) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let s = &self.settings;

        surface.clear(Theme::BACKGROUND);

        // Parallax and drift only apply while the glow is the active effect.
        let (mut ox, oy) = match (self.mode, pointer.position()) {
            (VisualMode::Glow, Some((x, y))) => (x * s.parallax, y * s.parallax),
            _ => (0.0, 0.0),
        };
        if self.mode == VisualMode::Glow {
            ox += drift_offset(self.elapsed, s.drift_period, s.drift_px);
        }
        draw_grid(surface, s.cell_size, ox, oy);

        self.last_glow_radius = 0.0;
        match self.mode {
            VisualMode::Grid => {}
            VisualMode::Glow => {
                let radius = pointer.glow_radius(s.glow_radius);
                if radius > 0.0 {
                    let p = pointer.state();
                    surface.radial_glow(p.x, p.y, radius, Theme::NEON, Theme::GLOW_ALPHA);
                }
                self.last_glow_radius = radius;
            }
            VisualMode::Trail => {
                if let Some(trail) = &self.trail {
                    let n = trail.len() as f64;
                    for (i, cell) in trail.iter().enumerate() {
                        let (cx, cy) = cell.center(s.cell_size);
                        // Oldest marks are faintest.
                        let alpha = Theme::TRAIL_ALPHA * (i as f64 + 1.0) / n;
                        surface.fill_circle(cx, cy, s.trail_radius, Theme::NEON, alpha);
                    }
                }
            }
            VisualMode::Follower => {
                if let Some(chain) = &self.chain {
                    // Tail first so the head ends up on top.
                    for (i, node) in chain.nodes().iter().enumerate().rev() {
                        let r = chain.radius_of(i, s.follower_radius);
                        surface.fill_circle(node.x, node.y, r, Rgb::from(node.color), Theme::NODE_ALPHA);
                    }
                }
            }
        }
    }
}

/// Horizontal drift at `elapsed`: eases out to `travel` and back once per
/// `period`, starting and ending at rest.
fn drift_offset(elapsed: Duration, period: Duration, travel: f64) -> f64 {
    let period = period.as_secs_f64();
    if period <= 0.0 || travel == 0.0 {
        return 0.0;
    }
    let phase = (elapsed.as_secs_f64() / period).fract();
    travel * (1.0 - (std::f64::consts::TAU * phase).cos()) / 2.0
}

/// Reference grid: 1px lines every `cell_size` pixels, shifted by `(ox, oy)`.
fn draw_grid(surface: &mut Surface, cell_size: f64, ox: f64, oy: f64) {
    if cell_size <= 0.0 {
        return;
    }
    let (w, h) = surface.size_px();
    let mut x = ox.rem_euclid(cell_size);
    while x < w {
        surface.vline(x, Theme::NEON, Theme::GRID_ALPHA);
        x += cell_size;
    }
    let mut y = oy.rem_euclid(cell_size);
    while y < h {
        surface.hline(y, Theme::NEON, Theme::GRID_ALPHA);
        y += cell_size;
    }
}
