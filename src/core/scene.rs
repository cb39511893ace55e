//! Presentation mode and tunables for the background effect.

use std::time::Duration;

use super::pointer::CellMetrics;

/// Exactly one visual mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum VisualMode {
    /// Static reference grid only.
    Grid,
    /// Grid with parallax plus a soft glow under the pointer.
    #[default]
    Glow,
    /// Grid plus marks on recently visited cells.
    Trail,
    /// Grid plus a chain of nodes chasing the pointer.
    Follower,
}

impl VisualMode {
    pub const ALL: [VisualMode; 4] = [
        VisualMode::Grid,
        VisualMode::Glow,
        VisualMode::Trail,
        VisualMode::Follower,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VisualMode::Grid => "grid",
            VisualMode::Glow => "glow",
            VisualMode::Trail => "trail",
            VisualMode::Follower => "follower",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == s)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Numeric parameters, all lengths in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSettings {
    pub metrics: CellMetrics,
    pub cell_size: f64,
    pub glow_radius: f64,
    /// Grid offset per pixel of pointer position in glow mode.
    pub parallax: f64,
    /// Horizontal travel of the idle background drift in glow mode.
    pub drift_px: f64,
    /// One full out-and-back drift cycle.
    pub drift_period: Duration,
    pub trail_capacity: usize,
    pub trail_radius: f64,
    pub follower_count: usize,
    pub follower_ease: f64,
    /// Radius of the head node; later nodes scale down from this.
    pub follower_radius: f64,
    pub fps: u32,
    pub copy_feedback: Duration,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            metrics: CellMetrics::default(),
            cell_size: 20.0,
            glow_radius: 100.0,
            parallax: 0.1,
            drift_px: 50.0,
            drift_period: Duration::from_secs(30),
            trail_capacity: 50,
            trail_radius: 6.0,
            follower_count: 20,
            follower_ease: 0.3,
            follower_radius: 14.0,
            fps: 30,
            copy_feedback: Duration::from_millis(2000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_cycle_through_all_and_wrap() {
        let mut m = VisualMode::Grid;
        let mut seen = Vec::new();
        for _ in 0..VisualMode::ALL.len() {
            seen.push(m);
            m = m.next();
        }
        assert_eq!(seen, VisualMode::ALL.to_vec());
        assert_eq!(m, VisualMode::Grid);
    }

    #[test]
    fn labels_round_trip() {
        for m in VisualMode::ALL {
            assert_eq!(VisualMode::from_label(m.label()), Some(m));
        }
        assert_eq!(VisualMode::from_label("sparkles"), None);
    }
}
