use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SettingsError;
use crate::mode::WarpAction;
use crate::table::{clamp_slot, ModeLadder};

pub const DEFAULT_SLOW_MOTION_SLOT: usize = 5;
pub const DEFAULT_FAST_FORWARD_SLOT: usize = 8;

/// Key names for the four mirrored time-panel buttons. `None` leaves the
/// button without a keybind. Names are resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybinds {
    pub slow_motion: Option<String>,
    pub normal_speed: Option<String>,
    pub fast_forward: Option<String>,
    pub warp: Option<String>,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            slow_motion: None,
            normal_speed: Some("Slash".to_string()),
            fast_forward: None,
            warp: None,
        }
    }
}

impl Keybinds {
    pub fn get(&self, action: WarpAction) -> Option<&str> {
        match action {
            WarpAction::SlowMotion => self.slow_motion.as_deref(),
            WarpAction::NormalSpeed => self.normal_speed.as_deref(),
            WarpAction::FastForward => self.fast_forward.as_deref(),
            WarpAction::Warp => self.warp.as_deref(),
        }
    }

    fn slot_mut(&mut self, action: WarpAction) -> &mut Option<String> {
        match action {
            WarpAction::SlowMotion => &mut self.slow_motion,
            WarpAction::NormalSpeed => &mut self.normal_speed,
            WarpAction::FastForward => &mut self.fast_forward,
            WarpAction::Warp => &mut self.warp,
        }
    }
}

/// User-facing time warp settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpSettings {
    /// Absolute table index entered by the slow-motion button.
    pub default_slow_motion_slot: usize,
    /// Absolute table index entered by the fast-forward button.
    pub default_fast_forward_slot: usize,
    /// Unpausing returns to the speed active before the pause. When off,
    /// unpausing always returns to 1x.
    pub pause_maintains_warp_speed: bool,
    pub keybinds: Keybinds,
    pub ladder: ModeLadder,
}

impl Default for WarpSettings {
    fn default() -> Self {
        Self {
            default_slow_motion_slot: DEFAULT_SLOW_MOTION_SLOT,
            default_fast_forward_slot: DEFAULT_FAST_FORWARD_SLOT,
            pause_maintains_warp_speed: true,
            keybinds: Keybinds::default(),
            ladder: ModeLadder::standard(),
        }
    }
}

/// Owner of the live settings.
///
/// Every change that affects the mode table bumps `revision`; the controller
/// compares it with the revision it last built a table for.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: WarpSettings,
    revision: u64,
}

impl SettingsStore {
    /// Validates the ladder and clamps both slots into their regions.
    pub fn new(mut settings: WarpSettings) -> Result<Self, SettingsError> {
        settings.ladder.validate()?;

        let slow_range = settings.ladder.slow_motion_slots();
        let clamped = clamp_slot(settings.default_slow_motion_slot, slow_range.clone());
        if clamped != settings.default_slow_motion_slot {
            warn!(
                "default_slow_motion_slot {} outside {:?}, using {}",
                settings.default_slow_motion_slot, slow_range, clamped
            );
            settings.default_slow_motion_slot = clamped;
        }

        let fast_range = settings.ladder.fast_forward_slots();
        let clamped = clamp_slot(settings.default_fast_forward_slot, fast_range.clone());
        if clamped != settings.default_fast_forward_slot {
            warn!(
                "default_fast_forward_slot {} outside {:?}, using {}",
                settings.default_fast_forward_slot, fast_range, clamped
            );
            settings.default_fast_forward_slot = clamped;
        }

        Ok(Self {
            settings,
            revision: 0,
        })
    }

    pub fn settings(&self) -> &WarpSettings {
        &self.settings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn slow_motion_slots(&self) -> RangeInclusive<usize> {
        self.settings.ladder.slow_motion_slots()
    }

    pub fn fast_forward_slots(&self) -> RangeInclusive<usize> {
        self.settings.ladder.fast_forward_slots()
    }

    /// Returns true if the stored value changed.
    pub fn set_default_slow_motion_slot(&mut self, slot: usize) -> bool {
        let slot = clamp_slot(slot, self.slow_motion_slots());
        if slot == self.settings.default_slow_motion_slot {
            return false;
        }
        self.settings.default_slow_motion_slot = slot;
        self.bump("default_slow_motion_slot");
        true
    }

    /// Returns true if the stored value changed.
    pub fn set_default_fast_forward_slot(&mut self, slot: usize) -> bool {
        let slot = clamp_slot(slot, self.fast_forward_slots());
        if slot == self.settings.default_fast_forward_slot {
            return false;
        }
        self.settings.default_fast_forward_slot = slot;
        self.bump("default_fast_forward_slot");
        true
    }

    /// Returns true if the stored value changed.
    pub fn set_pause_maintains_warp_speed(&mut self, enabled: bool) -> bool {
        if enabled == self.settings.pause_maintains_warp_speed {
            return false;
        }
        self.settings.pause_maintains_warp_speed = enabled;
        self.bump("pause_maintains_warp_speed");
        true
    }

    /// Keybinds don't feed the mode table, so the revision is left alone.
    pub fn set_keybind(&mut self, action: WarpAction, key: Option<String>) {
        *self.settings.keybinds.slot_mut(action) = key;
    }

    fn bump(&mut self, field: &str) {
        self.revision += 1;
        debug!("{} changed, settings revision {}", field, self.revision);
    }
}
