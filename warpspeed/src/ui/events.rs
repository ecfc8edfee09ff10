use warp_core::WarpAction;

/// Actions the UI asks the application to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    StartFlight,
    EndFlight,
    TogglePause,
    ToggleEngine,
    Warp(WarpAction),
    SetMode(usize),
    ChangeSetting(SettingChange),
}

/// Edits made in the settings window.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingChange {
    SlowMotionSlot(usize),
    FastForwardSlot(usize),
    PauseMaintainsWarpSpeed(bool),
    Keybind(WarpAction, Option<String>),
}

/// Events handled inside the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UIEvent {
    ToggleTimePanel,
    ToggleSettingsPanel,
    ToggleDebugPanel,
    ShowEndFlightConfirmDialog,
}
