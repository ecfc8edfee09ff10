// Components for the UI system
mod debug_panel;
mod dialog;
mod settings_panel;
mod telemetry_bar;
mod time_panel;

// Export components
pub use debug_panel::DebugPanel;
pub use dialog::DialogPopup;
pub use settings_panel::SettingsPanel;
pub use telemetry_bar::TelemetryBar;
pub use time_panel::TimePanel;
