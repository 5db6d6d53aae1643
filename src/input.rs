//! Keyboard handling for the terminal front end
//!
//! Uses a polling-based approach that doesn't rely on key release events,
//! which are unreliable on Linux terminals: a held key is considered
//! released once no repeat has arrived for [`KEY_TIMEOUT`].

use blockfall::{Settings, Shift, TickInput};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};
use std::time::{Duration, Instant};

/// Time after which we consider a key "released" if no repeat received
const KEY_TIMEOUT: Duration = Duration::from_millis(100);

/// Actions a key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCW,
    RotateCCW,
    Hold,
    Restart,
    Quit,
}

/// Key bindings configuration - supports multiple keys per action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(Action, Vec<KeyCode>)>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let key = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "shift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
            "ctrl" | "control" => KeyCode::Modifier(ModifierKeyCode::LeftControl),
            "alt" => KeyCode::Modifier(ModifierKeyCode::LeftAlt),
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Parse a list of key strings into KeyCodes, skipping unknown names
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter()
            .filter_map(|s| {
                let key = Self::parse_key(s);
                if key.is_none() {
                    tracing::warn!("Ignoring unknown key binding {:?}", s);
                }
                key
            })
            .collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let keys = &settings.keys;
        Self {
            bindings: vec![
                (Action::MoveLeft, Self::parse_keys(&keys.move_left)),
                (Action::MoveRight, Self::parse_keys(&keys.move_right)),
                (Action::SoftDrop, Self::parse_keys(&keys.soft_drop)),
                (Action::HardDrop, Self::parse_keys(&keys.hard_drop)),
                (Action::RotateCW, Self::parse_keys(&keys.rotate_cw)),
                (Action::RotateCCW, Self::parse_keys(&keys.rotate_ccw)),
                (Action::Hold, Self::parse_keys(&keys.hold)),
                (Action::Restart, Self::parse_keys(&keys.restart)),
                (Action::Quit, Self::parse_keys(&keys.quit)),
            ],
        }
    }

    /// Every action bound to `code`
    fn actions(&self, code: KeyCode) -> impl Iterator<Item = Action> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, keys)| keys.contains(&code))
            .map(|(action, _)| *action)
    }
}

/// Collects key events between frames into a [`TickInput`]
pub struct InputHandler {
    /// Last time each direction was seen pressed
    left_seen: Option<Instant>,
    right_seen: Option<Instant>,
    /// Most recently pressed direction wins when both are held
    last_shift: Option<Shift>,
    /// Presses gathered since the last frame
    pressed: TickInput,
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create input handler from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            left_seen: None,
            right_seen: None,
            last_shift: None,
            pressed: TickInput::default(),
            bindings: KeyBindings::from_settings(settings),
        }
    }

    /// Handle a key press (or terminal repeat) event
    pub fn key_down(&mut self, key: KeyEvent, now: Instant) -> Vec<Action> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }

        let actions: Vec<Action> = self.bindings.actions(normalize_key(key.code)).collect();
        for &action in &actions {
            match action {
                Action::MoveLeft => {
                    self.left_seen = Some(now);
                    self.last_shift = Some(Shift::Left);
                }
                Action::MoveRight => {
                    self.right_seen = Some(now);
                    self.last_shift = Some(Shift::Right);
                }
                Action::SoftDrop => self.pressed.soft_drop = true,
                Action::HardDrop => self.pressed.hard_drop = true,
                Action::RotateCW => self.pressed.rotate_cw = true,
                Action::RotateCCW => self.pressed.rotate_ccw = true,
                Action::Hold => self.pressed.hold = true,
                Action::Restart => self.pressed.restart = true,
                Action::Quit => {}
            }
        }
        actions
    }

    /// Handle a key release event (may not be called on Linux)
    pub fn key_up(&mut self, key: KeyEvent) {
        for action in self.bindings.actions(normalize_key(key.code)) {
            match action {
                Action::MoveLeft => self.left_seen = None,
                Action::MoveRight => self.right_seen = None,
                _ => {}
            }
        }
    }

    /// Input for this frame. Clears the gathered presses.
    pub fn frame_input(&mut self, now: Instant) -> TickInput {
        let expired = |seen: Option<Instant>| {
            seen.filter(|&t| now.duration_since(t) <= KEY_TIMEOUT)
        };
        self.left_seen = expired(self.left_seen);
        self.right_seen = expired(self.right_seen);

        let shift = match (self.left_seen.is_some(), self.right_seen.is_some()) {
            (true, true) => self.last_shift,
            (true, false) => Some(Shift::Left),
            (false, true) => Some(Shift::Right),
            (false, false) => None,
        };

        let mut input = std::mem::take(&mut self.pressed);
        input.shift = shift;
        input
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
