use anyhow::bail;
use macroquad::prelude::{KeyCode, is_key_pressed};
use tracing::warn;
use warp_core::{InputSource, Keybinds, WarpAction};

/// Keys with a fixed meaning in the app; binding a time warp action to one of
/// them triggers both.
pub const RESERVED_KEYS: [KeyCode; 8] = [
    KeyCode::P,
    KeyCode::Space,
    KeyCode::T,
    KeyCode::O,
    KeyCode::D,
    KeyCode::F,
    KeyCode::Escape,
    KeyCode::Enter,
];

const KEY_NAMES: &[(&str, KeyCode)] = &[
    ("A", KeyCode::A),
    ("B", KeyCode::B),
    ("C", KeyCode::C),
    ("D", KeyCode::D),
    ("E", KeyCode::E),
    ("F", KeyCode::F),
    ("G", KeyCode::G),
    ("H", KeyCode::H),
    ("I", KeyCode::I),
    ("J", KeyCode::J),
    ("K", KeyCode::K),
    ("L", KeyCode::L),
    ("M", KeyCode::M),
    ("N", KeyCode::N),
    ("O", KeyCode::O),
    ("P", KeyCode::P),
    ("Q", KeyCode::Q),
    ("R", KeyCode::R),
    ("S", KeyCode::S),
    ("T", KeyCode::T),
    ("U", KeyCode::U),
    ("V", KeyCode::V),
    ("W", KeyCode::W),
    ("X", KeyCode::X),
    ("Y", KeyCode::Y),
    ("Z", KeyCode::Z),
    ("Key0", KeyCode::Key0),
    ("Key1", KeyCode::Key1),
    ("Key2", KeyCode::Key2),
    ("Key3", KeyCode::Key3),
    ("Key4", KeyCode::Key4),
    ("Key5", KeyCode::Key5),
    ("Key6", KeyCode::Key6),
    ("Key7", KeyCode::Key7),
    ("Key8", KeyCode::Key8),
    ("Key9", KeyCode::Key9),
    ("F1", KeyCode::F1),
    ("F2", KeyCode::F2),
    ("F3", KeyCode::F3),
    ("F4", KeyCode::F4),
    ("F5", KeyCode::F5),
    ("F6", KeyCode::F6),
    ("F7", KeyCode::F7),
    ("F8", KeyCode::F8),
    ("F9", KeyCode::F9),
    ("F10", KeyCode::F10),
    ("F11", KeyCode::F11),
    ("F12", KeyCode::F12),
    ("Space", KeyCode::Space),
    ("Slash", KeyCode::Slash),
    ("Backslash", KeyCode::Backslash),
    ("Period", KeyCode::Period),
    ("Comma", KeyCode::Comma),
    ("Semicolon", KeyCode::Semicolon),
    ("Apostrophe", KeyCode::Apostrophe),
    ("Minus", KeyCode::Minus),
    ("Equal", KeyCode::Equal),
    ("LeftBracket", KeyCode::LeftBracket),
    ("RightBracket", KeyCode::RightBracket),
    ("GraveAccent", KeyCode::GraveAccent),
    ("Tab", KeyCode::Tab),
    ("Enter", KeyCode::Enter),
    ("Escape", KeyCode::Escape),
    ("Backspace", KeyCode::Backspace),
    ("Insert", KeyCode::Insert),
    ("Delete", KeyCode::Delete),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Kp0", KeyCode::Kp0),
    ("Kp1", KeyCode::Kp1),
    ("Kp2", KeyCode::Kp2),
    ("Kp3", KeyCode::Kp3),
    ("Kp4", KeyCode::Kp4),
    ("Kp5", KeyCode::Kp5),
    ("Kp6", KeyCode::Kp6),
    ("Kp7", KeyCode::Kp7),
    ("Kp8", KeyCode::Kp8),
    ("Kp9", KeyCode::Kp9),
    ("KpAdd", KeyCode::KpAdd),
    ("KpSubtract", KeyCode::KpSubtract),
    ("KpMultiply", KeyCode::KpMultiply),
    ("KpDivide", KeyCode::KpDivide),
    ("KpDecimal", KeyCode::KpDecimal),
    ("KpEnter", KeyCode::KpEnter),
];

/// Resolves a key name from the config file. `"None"` and `""` mean unbound.
pub fn parse_key_code(name: &str) -> anyhow::Result<Option<KeyCode>> {
    let name = name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    match KEY_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
    {
        Some((_, key)) => Ok(Some(*key)),
        None => bail!("unknown key name '{}'", name),
    }
}

/// Every key name accepted in the config file, in display order.
pub fn key_names() -> impl Iterator<Item = &'static str> {
    KEY_NAMES.iter().map(|(name, _)| *name)
}

pub fn key_name(key: KeyCode) -> &'static str {
    KEY_NAMES
        .iter()
        .find(|(_, known)| *known == key)
        .map(|(name, _)| *name)
        .unwrap_or("?")
}

/// Resolved keys for the four mirrored time-panel buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyBindings {
    slow_motion: Option<KeyCode>,
    normal_speed: Option<KeyCode>,
    fast_forward: Option<KeyCode>,
    warp: Option<KeyCode>,
}

impl KeyBindings {
    pub fn from_keybinds(keybinds: &Keybinds) -> anyhow::Result<Self> {
        let mut bindings = Self::default();
        for action in WarpAction::ALL {
            let key = match keybinds.get(action) {
                Some(name) => parse_key_code(name)?,
                None => None,
            };
            if let Some(key) = key {
                if RESERVED_KEYS.contains(&key) {
                    warn!(
                        "{} is bound to {}, which is also an app shortcut",
                        action.label(),
                        key_name(key)
                    );
                }
            }
            *bindings.slot_mut(action) = key;
        }
        Ok(bindings)
    }

    pub fn get(&self, action: WarpAction) -> Option<KeyCode> {
        match action {
            WarpAction::SlowMotion => self.slow_motion,
            WarpAction::NormalSpeed => self.normal_speed,
            WarpAction::FastForward => self.fast_forward,
            WarpAction::Warp => self.warp,
        }
    }

    pub fn describe(&self, action: WarpAction) -> &'static str {
        self.get(action).map(key_name).unwrap_or("unbound")
    }

    fn slot_mut(&mut self, action: WarpAction) -> &mut Option<KeyCode> {
        match action {
            WarpAction::SlowMotion => &mut self.slow_motion,
            WarpAction::NormalSpeed => &mut self.normal_speed,
            WarpAction::FastForward => &mut self.fast_forward,
            WarpAction::Warp => &mut self.warp,
        }
    }
}

impl InputSource for KeyBindings {
    fn is_just_pressed(&self, action: WarpAction) -> bool {
        self.get(action).is_some_and(is_key_pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key_code("Slash").unwrap(), Some(KeyCode::Slash));
        assert_eq!(parse_key_code("period").unwrap(), Some(KeyCode::Period));
        assert_eq!(parse_key_code(" F5 ").unwrap(), Some(KeyCode::F5));
        assert_eq!(parse_key_code("None").unwrap(), None);
        assert_eq!(parse_key_code("").unwrap(), None);
        assert!(parse_key_code("Hyper").is_err());
    }

    #[test]
    fn test_key_name_round_trip() {
        assert_eq!(key_name(KeyCode::Kp5), "Kp5");
        assert_eq!(key_name(KeyCode::LeftShift), "?");
        for name in key_names() {
            let key = parse_key_code(name).unwrap().unwrap();
            assert_eq!(key_name(key), name);
        }
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::from_keybinds(&Keybinds::default()).unwrap();
        assert_eq!(bindings.get(WarpAction::NormalSpeed), Some(KeyCode::Slash));
        assert_eq!(bindings.get(WarpAction::SlowMotion), None);
        assert_eq!(bindings.describe(WarpAction::NormalSpeed), "Slash");
        assert_eq!(bindings.describe(WarpAction::Warp), "unbound");
    }

    #[test]
    fn test_bindings_from_custom_keybinds() {
        let keybinds = Keybinds {
            slow_motion: Some("Comma".to_string()),
            normal_speed: Some("Slash".to_string()),
            fast_forward: Some("Period".to_string()),
            warp: Some("W".to_string()),
        };
        let bindings = KeyBindings::from_keybinds(&keybinds).unwrap();
        assert_eq!(bindings.get(WarpAction::SlowMotion), Some(KeyCode::Comma));
        assert_eq!(bindings.get(WarpAction::FastForward), Some(KeyCode::Period));
        assert_eq!(bindings.get(WarpAction::Warp), Some(KeyCode::W));
    }
}
