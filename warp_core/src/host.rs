use crate::error::Refusal;
use crate::mode::{TimeMode, WarpAction};
use crate::table::ModeTable;

/// What the controller needs from the simulation it is driving.
pub trait TimeHost {
    /// Per-tick logic only runs while this returns true.
    fn is_in_simulation_scene(&self) -> bool;

    /// Whether `mode` can be entered right now, e.g. warp while thrusting.
    fn can_enter_mode(&self, index: usize, mode: &TimeMode) -> Result<(), Refusal>;

    /// Commit `mode` as the active time rate.
    fn apply_mode(&mut self, index: usize, mode: &TimeMode) -> Result<(), Refusal>;

    /// One-way message sink for refused transitions.
    fn show_user_message(&mut self, text: &str);

    /// Called after every rebuild so the host can refresh anything derived
    /// from the table (button multipliers, first warp index).
    fn table_rebuilt(&mut self, _table: &ModeTable) {}
}

/// Discrete key presses, polled once per tick per action.
pub trait InputSource {
    fn is_just_pressed(&self, action: WarpAction) -> bool;
}

/// An input source with nothing pressed.
pub struct NoInput;

impl InputSource for NoInput {
    fn is_just_pressed(&self, _action: WarpAction) -> bool {
        false
    }
}
