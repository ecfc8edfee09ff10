use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::mode::{Region, TimeMode};
use crate::settings::WarpSettings;

pub const PAUSE_INDEX: usize = 0;
pub const FIRST_SLOW_MOTION_INDEX: usize = PAUSE_INDEX + 1;

pub const PAUSED_LABEL: &str = "Paused";
pub const SLOW_MO_LABEL: &str = "Slow-Mo";

const NORMAL_MULTIPLIER: f64 = 1.0;

/// Multiplier rows for the three variable-length regions of the table.
///
/// Pause (0x) and Normal (1x) are always singletons and are not listed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeLadder {
    pub slow_motion: Vec<f64>,
    pub fast_forward: Vec<f64>,
    pub warp: Vec<f64>,
}

impl Default for ModeLadder {
    fn default() -> Self {
        Self::standard()
    }
}

impl ModeLadder {
    /// 6 slow-motion, 3 fast-forward and 6 warp modes (17 table entries).
    pub fn standard() -> Self {
        Self {
            slow_motion: standard_slow_motion(),
            fast_forward: standard_fast_forward(),
            warp: vec![10.0, 25.0, 100.0, 500.0, 2_500.0, 10_000.0],
        }
    }

    /// Standard ladder with the warp row running up to 100,000,000x.
    pub fn extended() -> Self {
        Self {
            slow_motion: standard_slow_motion(),
            fast_forward: standard_fast_forward(),
            warp: vec![
                10.0,
                25.0,
                100.0,
                500.0,
                2_500.0,
                10_000.0,
                50_000.0,
                250_000.0,
                1_000_000.0,
                5_000_000.0,
                25_000_000.0,
                100_000_000.0,
            ],
        }
    }

    /// Total number of table entries this ladder produces.
    pub fn mode_count(&self) -> usize {
        self.slow_motion.len() + self.fast_forward.len() + self.warp.len() + 2
    }

    /// Absolute table indices a slow-motion slot may take.
    pub fn slow_motion_slots(&self) -> RangeInclusive<usize> {
        FIRST_SLOW_MOTION_INDEX..=self.slow_motion.len()
    }

    /// Absolute table indices a fast-forward slot may take.
    pub fn fast_forward_slots(&self) -> RangeInclusive<usize> {
        let first = self.slow_motion.len() + 2;
        first..=self.slow_motion.len() + 1 + self.fast_forward.len()
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        check_region(Region::SlowMotion, &self.slow_motion, |m| {
            m > 0.0 && m < NORMAL_MULTIPLIER
        })?;
        check_region(Region::FastForward, &self.fast_forward, |m| {
            m > NORMAL_MULTIPLIER
        })?;
        check_region(Region::Warp, &self.warp, |m| m > NORMAL_MULTIPLIER)?;

        let fast_forward = self.fast_forward[self.fast_forward.len() - 1];
        let warp = self.warp[0];
        if warp < fast_forward {
            return Err(SettingsError::WarpOverlapsFastForward { warp, fast_forward });
        }
        Ok(())
    }
}

fn standard_slow_motion() -> Vec<f64> {
    vec![
        1.0 / 64.0,
        1.0 / 32.0,
        1.0 / 16.0,
        1.0 / 8.0,
        1.0 / 4.0,
        1.0 / 2.0,
    ]
}

fn standard_fast_forward() -> Vec<f64> {
    vec![2.0, 4.0, 8.0]
}

fn check_region(
    region: Region,
    multipliers: &[f64],
    in_band: impl Fn(f64) -> bool,
) -> Result<(), SettingsError> {
    if multipliers.is_empty() {
        return Err(SettingsError::EmptyRegion(region));
    }
    for (position, &multiplier) in multipliers.iter().enumerate() {
        if !multiplier.is_finite() || !in_band(multiplier) {
            return Err(SettingsError::OutOfRange {
                region,
                position,
                multiplier,
            });
        }
        if position > 0 && multiplier <= multipliers[position - 1] {
            return Err(SettingsError::NotIncreasing { region, position });
        }
    }
    Ok(())
}

/// Clamps without panicking on an inverted range (empty region).
pub(crate) fn clamp_slot(slot: usize, range: RangeInclusive<usize>) -> usize {
    slot.max(*range.start()).min(*range.end())
}

/// Ordered, index-addressable list of time modes.
///
/// Layout: `[Pause | SlowMotion.. | Normal | FastForward.. | Warp..]`. A table
/// is never edited after construction; a settings change produces a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeTable {
    modes: Vec<TimeMode>,
    slow_motion_count: usize,
    fast_forward_count: usize,
    slow_motion_slot: usize,
    fast_forward_slot: usize,
}

impl ModeTable {
    /// Builds the table for the given settings. Slots outside their region
    /// are clamped into it.
    pub fn rebuild(settings: &WarpSettings) -> Self {
        let ladder = &settings.ladder;
        let slow_motion_slot =
            clamp_slot(settings.default_slow_motion_slot, ladder.slow_motion_slots());
        let fast_forward_slot =
            clamp_slot(settings.default_fast_forward_slot, ladder.fast_forward_slots());

        let mut modes = Vec::with_capacity(ladder.mode_count());
        modes.push(TimeMode::physics(0.0).with_label(PAUSED_LABEL));
        for (offset, &multiplier) in ladder.slow_motion.iter().enumerate() {
            let mode = TimeMode::physics(multiplier);
            if FIRST_SLOW_MOTION_INDEX + offset == slow_motion_slot {
                modes.push(mode.with_label(SLOW_MO_LABEL));
            } else {
                modes.push(mode);
            }
        }
        modes.push(TimeMode::physics(NORMAL_MULTIPLIER));
        modes.extend(ladder.fast_forward.iter().map(|&m| TimeMode::physics(m)));
        modes.extend(ladder.warp.iter().map(|&m| TimeMode::warp(m)));

        Self {
            modes,
            slow_motion_count: ladder.slow_motion.len(),
            fast_forward_count: ladder.fast_forward.len(),
            slow_motion_slot,
            fast_forward_slot,
        }
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimeMode> {
        self.modes.get(index)
    }

    pub fn modes(&self) -> &[TimeMode] {
        &self.modes
    }

    pub fn last_slow_motion_index(&self) -> usize {
        self.slow_motion_count
    }

    pub fn normal_index(&self) -> usize {
        self.slow_motion_count + 1
    }

    pub fn first_fast_forward_index(&self) -> usize {
        self.normal_index() + 1
    }

    pub fn last_fast_forward_index(&self) -> usize {
        self.normal_index() + self.fast_forward_count
    }

    pub fn first_warp_index(&self) -> usize {
        self.last_fast_forward_index() + 1
    }

    /// Index entered by the slow-motion button when not already slowed down.
    pub fn slow_motion_slot(&self) -> usize {
        self.slow_motion_slot
    }

    /// Index entered by the fast-forward button when not already sped up.
    pub fn fast_forward_slot(&self) -> usize {
        self.fast_forward_slot
    }

    pub fn slow_motion_multiplier(&self) -> f64 {
        self.modes[self.slow_motion_slot].multiplier()
    }

    pub fn fast_forward_multiplier(&self) -> f64 {
        self.modes[self.fast_forward_slot].multiplier()
    }

    pub fn region_of(&self, index: usize) -> Option<Region> {
        if index >= self.modes.len() {
            None
        } else if index == PAUSE_INDEX {
            Some(Region::Pause)
        } else if index <= self.last_slow_motion_index() {
            Some(Region::SlowMotion)
        } else if index == self.normal_index() {
            Some(Region::Normal)
        } else if index <= self.last_fast_forward_index() {
            Some(Region::FastForward)
        } else {
            Some(Region::Warp)
        }
    }

    pub fn is_in(&self, index: usize, region: Region) -> bool {
        self.region_of(index) == Some(region)
    }
}
