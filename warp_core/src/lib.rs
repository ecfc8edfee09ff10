//! Time warp mode selection for a tick-driven simulation.
//!
//! The [`ModeTable`] is an ordered list of time multipliers split into pause,
//! slow motion, normal, fast forward and warp regions. [`ModeController`]
//! moves between its entries, remembers the speed to return to after a pause,
//! and rebuilds the table when the [`SettingsStore`] revision changes. The
//! simulation plugs in through [`TimeHost`] and [`InputSource`].

pub mod controller;
pub mod display;
pub mod error;
pub mod host;
pub mod mode;
pub mod settings;
pub mod table;

pub use controller::{ModeController, ModeIndexState};
pub use error::{Refusal, SettingsError};
pub use host::{InputSource, NoInput, TimeHost};
pub use mode::{Region, TimeMode, WarpAction};
pub use settings::{Keybinds, SettingsStore, WarpSettings};
pub use table::{ModeLadder, ModeTable, PAUSE_INDEX};
