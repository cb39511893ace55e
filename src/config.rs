//! User configuration: key bindings, effect tunables, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/neon-profile/config.toml` (default
//! `~/.config/neon-profile/config.toml`).  Unknown keys and unparsable values
//! are ignored; numbers are clamped so a bad file can never produce a
//! degenerate effect.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::scene::{EffectSettings, VisualMode};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SelectPrev,
    SelectNext,
    CopySelected,
    CycleMode,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::SelectPrev,
        Action::SelectNext,
        Action::CopySelected,
        Action::CycleMode,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::SelectPrev => "select_prev",
            Action::SelectNext => "select_next",
            Action::CopySelected => "copy_selected",
            Action::CycleMode => "cycle_mode",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Named keys: (config spelling, display spelling, code).
const NAMED_KEYS: &[(&str, &str, KeyCode)] = &[
    ("Up", "↑", KeyCode::Up),
    ("Down", "↓", KeyCode::Down),
    ("Left", "←", KeyCode::Left),
    ("Right", "→", KeyCode::Right),
    ("Enter", "Enter", KeyCode::Enter),
    ("Esc", "Esc", KeyCode::Esc),
    ("Tab", "Tab", KeyCode::Tab),
    ("Backspace", "Bksp", KeyCode::Backspace),
    ("Space", "Space", KeyCode::Char(' ')),
];

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared; platform modifiers are ignored.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    fn key_name(&self, display: bool) -> String {
        if let Some(&(cfg, shown, _)) = NAMED_KEYS.iter().find(|(_, _, c)| *c == self.code) {
            let name = if display { shown } else { cfg };
            return name.to_string();
        }
        match self.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"↑"`, `"q"`).
    pub fn display(&self) -> String {
        self.modifier_prefix() + &self.key_name(true)
    }

    fn to_config_string(&self) -> String {
        self.modifier_prefix() + &self.key_name(false)
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let (mods, key) = match s.rsplit_once('+') {
            // A bare "+" is the plus key itself.
            Some((m, "")) => (Some(m), "+"),
            Some((m, k)) => (Some(m), k),
            None => (None, s),
        };
        for part in mods.into_iter().flat_map(|m| m.split('+')) {
            match part.to_lowercase().as_str() {
                // Left over from "Ctrl++" or a bare "+".
                "" => {}
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let lower = key.to_lowercase();
        let code = if let Some((_, _, code)) = NAMED_KEYS
            .iter()
            .find(|(cfg, _, _)| cfg.to_lowercase() == lower)
        {
            *code
        } else if lower.len() > 1 && lower.starts_with('f') {
            KeyCode::F(lower[1..].parse().ok()?)
        } else {
            let mut chars = key.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and effect settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub mode: VisualMode,
    pub effects: EffectSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            mode: VisualMode::default(),
            effects: EffectSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(SelectPrev, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(SelectNext, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(CopySelected, vec![KeyBind::new(Enter, n), KeyBind::new(Char('y'), n)]);
        m.insert(CycleMode, vec![KeyBind::new(Char('m'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: select | {}/click: copy address | {}: effect | {}: quit",
            self.short_binding(Action::SelectPrev),
            self.short_binding(Action::SelectNext),
            self.short_binding(Action::CopySelected),
            self.short_binding(Action::CycleMode),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Self::parse(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    pub fn parse(s: &str) -> Self {
        let mut cfg = Self::default();
        let fx = &mut cfg.effects;

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "mode" => {
                    if let Some(m) = VisualMode::from_label(value) {
                        cfg.mode = m;
                    }
                }
                "fps" => {
                    if let Ok(v) = value.parse::<u32>() {
                        fx.fps = v.clamp(1, 240);
                    }
                }
                "cell_size" => set_f64(&mut fx.cell_size, value, 4.0, 400.0),
                "glow_radius" => set_f64(&mut fx.glow_radius, value, 0.0, 2000.0),
                "parallax" => set_f64(&mut fx.parallax, value, 0.0, 1.0),
                "drift_px" => set_f64(&mut fx.drift_px, value, 0.0, 1000.0),
                "drift_period_s" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() {
                            fx.drift_period = Duration::from_secs_f64(v.clamp(1.0, 600.0));
                        }
                    }
                }
                "trail_capacity" => {
                    if let Ok(v) = value.parse::<usize>() {
                        fx.trail_capacity = v.clamp(1, 1000);
                    }
                }
                "follower_count" => {
                    if let Ok(v) = value.parse::<usize>() {
                        fx.follower_count = v.clamp(1, 200);
                    }
                }
                "follower_ease" => set_f64(&mut fx.follower_ease, value, 0.01, 1.0),
                "copy_feedback_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        fx.copy_feedback = Duration::from_millis(v.clamp(100, 60_000));
                    }
                }
                _ => {
                    let Some(action) = Action::from_config_key(key) else {
                        continue;
                    };
                    let parsed: Vec<KeyBind> = value
                        .split(',')
                        .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                        .collect();
                    if !parsed.is_empty() {
                        cfg.bindings.insert(action, parsed);
                    }
                }
            }
        }

        cfg
    }

    fn serialise(&self) -> String {
        let fx = &self.effects;
        let mut lines = vec![
            "# neon-profile configuration".to_string(),
            String::new(),
            "# Background effect: grid | glow | trail | follower".to_string(),
            format!("mode = {}", self.mode.label()),
            format!("fps = {}", fx.fps),
            format!("cell_size = {}", fx.cell_size),
            format!("glow_radius = {}", fx.glow_radius),
            format!("parallax = {}", fx.parallax),
            format!("drift_px = {}", fx.drift_px),
            format!("drift_period_s = {}", fx.drift_period.as_secs_f64()),
            format!("trail_capacity = {}", fx.trail_capacity),
            format!("follower_count = {}", fx.follower_count),
            format!("follower_ease = {}", fx.follower_ease),
            format!("copy_feedback_ms = {}", fx.copy_feedback.as_millis()),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn set_f64(slot: &mut f64, value: &str, min: f64, max: f64) {
    if let Ok(v) = value.parse::<f64>() {
        if v.is_finite() {
            *slot = v.clamp(min, max);
        }
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/neon-profile/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("neon-profile").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn defaults_match_expected_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), Some(Action::Quit));
        assert_eq!(cfg.match_key(key(KeyCode::Enter, KeyModifiers::NONE)), Some(Action::CopySelected));
        assert_eq!(cfg.match_key(key(KeyCode::Char('m'), KeyModifiers::NONE)), Some(Action::CycleMode));
        assert_eq!(cfg.match_key(key(KeyCode::Char('m'), KeyModifiers::ALT)), None);
        assert_eq!(cfg.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn plus_key_parses_bare_and_with_modifiers() {
        let bare = KeyBind::parse("+").expect("bare plus");
        assert_eq!(bare, KeyBind::new(KeyCode::Char('+'), KeyModifiers::NONE));

        let ctrl = KeyBind::parse("Ctrl++").expect("ctrl plus");
        assert_eq!(ctrl, KeyBind::new(KeyCode::Char('+'), KeyModifiers::CONTROL));
        assert_eq!(ctrl.to_config_string(), "Ctrl++");

        assert!(KeyBind::parse("Hyper+x").is_none());
    }

    #[test]
    fn parse_reads_effects_and_clamps() {
        let cfg = AppConfig::parse(
            "# comment\n\
             mode = follower\n\
             fps = 9000\n\
             cell_size = 16\n\
             follower_ease = 3.5\n\
             trail_capacity = 0\n\
             copy_feedback_ms = 750\n\
             drift_px = 12.5\n\
             drift_period_s = 0\n\
             glow_radius = nope\n\
             bogus = 1\n",
        );
        assert_eq!(cfg.mode, VisualMode::Follower);
        assert_eq!(cfg.effects.fps, 240);
        assert_eq!(cfg.effects.cell_size, 16.0);
        assert_eq!(cfg.effects.follower_ease, 1.0);
        assert_eq!(cfg.effects.drift_px, 12.5);
        assert_eq!(cfg.effects.drift_period, Duration::from_secs(1));
        assert_eq!(cfg.effects.trail_capacity, 1);
        assert_eq!(cfg.effects.copy_feedback, Duration::from_millis(750));
        assert_eq!(cfg.effects.glow_radius, EffectSettings::default().glow_radius);
    }

    #[test]
    fn parse_rebinds_actions() {
        let cfg = AppConfig::parse("quit = Ctrl+x, F10\ncycle_mode = Alt+Space\ncopy_selected = Hyper+c\n");
        assert_eq!(
            cfg.match_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(cfg.match_key(key(KeyCode::F(10), KeyModifiers::NONE)), Some(Action::Quit));
        assert_eq!(cfg.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), None);
        assert_eq!(
            cfg.match_key(key(KeyCode::Char(' '), KeyModifiers::ALT)),
            Some(Action::CycleMode)
        );
        // Unparsable binding leaves the default in place.
        assert_eq!(cfg.match_key(key(KeyCode::Enter, KeyModifiers::NONE)), Some(Action::CopySelected));
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut cfg = AppConfig::default();
        cfg.mode = VisualMode::Trail;
        cfg.effects.cell_size = 24.0;
        cfg.bindings.insert(Action::Quit, vec![KeyBind::new(KeyCode::Up, KeyModifiers::CONTROL)]);

        let back = AppConfig::parse(&cfg.serialise());
        assert_eq!(back.mode, VisualMode::Trail);
        assert_eq!(back.effects, cfg.effects);
        assert_eq!(back.bindings, cfg.bindings);
    }

    #[test]
    fn hint_uses_first_binding() {
        let hint = AppConfig::default().status_bar_hint();
        assert!(hint.starts_with("←/→: select"));
        assert!(hint.ends_with("q: quit"));
    }
}
