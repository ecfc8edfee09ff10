use macroquad::prelude::*;
use tracing::{info, warn};
use warp_core::{InputSource, NoInput, SettingsStore};

use crate::config::{AppConfig, FlightConfig};
use crate::engine::Renderer;
use crate::input::KeyBindings;
use crate::simulation::FlightScene;
use crate::ui::UIManager;
use crate::ui::components::DialogPopup;
use crate::ui::events::{AppAction, SettingChange};

/// Real frame time is capped so a stalled window doesn't turn into a jump.
const MAX_FRAME_TIME: f64 = 0.25;

/// Main application structure for WarpSpeed.
pub struct WarpApp {
    ui: UIManager,                 // Manages all UI elements and interactions.
    renderer: Renderer,            // Draws the planet and the vessel.
    store: SettingsStore,          // Live time warp settings.
    bindings: KeyBindings,         // Keys resolved from the settings' keybinds.
    flight_config: FlightConfig,   // Initial vessel state for each launch.
    scene: Option<FlightScene>,    // None while in the main menu.
}

impl WarpApp {
    pub fn new(app_config: AppConfig) -> Self {
        Self {
            ui: UIManager::new(),
            renderer: Renderer::new(),
            store: app_config.store,
            bindings: app_config.bindings,
            flight_config: app_config.flight,
            scene: None,
        }
    }

    /// Runs the main application loop.
    pub async fn run(&mut self) {
        let mut last_time = get_time(); // wall-clock seconds

        loop {
            let now = get_time();
            let dt = (now - last_time).min(MAX_FRAME_TIME);
            last_time = now;

            // Keybinds are ignored while a dialog has the keyboard.
            let input: &dyn InputSource = if self.ui.is_dialog_open() {
                &NoInput
            } else {
                &self.bindings
            };
            if let Some(scene) = &mut self.scene {
                scene.update(dt, input, &self.store);
            }
            self.flush_flight_messages();

            // Draw one frame
            self.update_ui();
            self.render(dt as f32);

            // Yield back to Macroquad (swap buffers, poll events, vsync)
            next_frame().await;
        }
    }

    /// Moves queued host messages into info dialogs.
    fn flush_flight_messages(&mut self) {
        let Some(scene) = &mut self.scene else {
            return;
        };
        for message in scene.flight.drain_messages() {
            self.ui.show_dialog(DialogPopup::new_info(&message));
        }
    }

    /// Updates the UI state and handles input.
    fn update_ui(&mut self) {
        // Handle global shortcuts first, as they might trigger actions
        self.handle_global_shortcuts();

        let (app_action, _ui_consumed_input) =
            self.ui
                .update(self.scene.as_ref(), &self.store, &self.bindings);

        self.handle_app_actions(app_action);
    }

    /// Handles global keyboard shortcuts.
    fn handle_global_shortcuts(&mut self) -> bool {
        // If a dialog popup is open, do not process shortcuts
        if self.ui.is_dialog_open() {
            return false;
        }

        if is_key_pressed(KeyCode::O) {
            self.ui.toggle_settings_panel();
            return true;
        }
        if is_key_pressed(KeyCode::D) {
            self.ui.toggle_debug_panel();
            return true;
        }

        if self.scene.is_none() {
            if is_key_pressed(KeyCode::Enter) {
                self.handle_app_actions(Some(AppAction::StartFlight));
                return true;
            }
            return false;
        }

        if is_key_pressed(KeyCode::P) || is_key_pressed(KeyCode::Space) {
            self.handle_app_actions(Some(AppAction::TogglePause));
            return true;
        } else if is_key_pressed(KeyCode::T) {
            self.handle_app_actions(Some(AppAction::ToggleEngine));
            return true;
        } else if is_key_pressed(KeyCode::F) {
            self.ui.toggle_time_panel();
            return true;
        } else if is_key_pressed(KeyCode::Escape) {
            self.ui.confirm_end_flight();
            return true;
        }

        false
    }

    /// Processes application-level actions triggered by UI or shortcuts.
    fn handle_app_actions(&mut self, action: Option<AppAction>) {
        let Some(action) = action else {
            return;
        };

        match action {
            AppAction::StartFlight => self.start_flight(),
            AppAction::EndFlight => self.end_flight(),
            AppAction::ChangeSetting(change) => self.apply_setting_change(change),
            AppAction::ToggleEngine => {
                if let Some(scene) = &mut self.scene {
                    if let Err(msg) = scene.flight.toggle_engine() {
                        self.ui.show_dialog(DialogPopup::new_info(&msg));
                    }
                }
            }
            // Refusals reach the user through the flight's message queue.
            AppAction::TogglePause => {
                if let Some(scene) = &mut self.scene {
                    let _ = scene.controller.toggle_pause(&mut scene.flight);
                }
            }
            AppAction::Warp(warp_action) => {
                if let Some(scene) = &mut self.scene {
                    let _ = scene.controller.perform(&mut scene.flight, warp_action);
                }
            }
            AppAction::SetMode(index) => {
                if let Some(scene) = &mut self.scene {
                    let _ = scene.controller.set_mode(&mut scene.flight, index, false);
                }
            }
        }
        self.flush_flight_messages();
    }

    fn start_flight(&mut self) {
        if self.scene.is_some() {
            return;
        }
        self.scene = Some(FlightScene::new(&self.flight_config, &self.store));
    }

    fn end_flight(&mut self) {
        if let Some(mut scene) = self.scene.take() {
            scene.end();
            info!("Returned to main menu");
        }
    }

    fn apply_setting_change(&mut self, change: SettingChange) {
        match change {
            SettingChange::SlowMotionSlot(slot) => {
                self.store.set_default_slow_motion_slot(slot);
            }
            SettingChange::FastForwardSlot(slot) => {
                self.store.set_default_fast_forward_slot(slot);
            }
            SettingChange::PauseMaintainsWarpSpeed(enabled) => {
                self.store.set_pause_maintains_warp_speed(enabled);
            }
            SettingChange::Keybind(action, key) => {
                let previous = self.store.settings().keybinds.get(action).map(str::to_string);
                self.store.set_keybind(action, key);
                match KeyBindings::from_keybinds(&self.store.settings().keybinds) {
                    Ok(bindings) => self.bindings = bindings,
                    Err(e) => {
                        warn!("Rejected keybind for {}: {:#}", action.label(), e);
                        self.store.set_keybind(action, previous);
                        self.ui.show_dialog(DialogPopup::new_info_with_title(
                            "Keybinds",
                            &format!("Could not bind {}: {}", action.label(), e),
                        ));
                    }
                }
            }
        }
    }

    /// Renders the current scene and UI.
    fn render(&mut self, dt: f32) {
        self.renderer
            .render(self.scene.as_ref().map(|scene| &scene.flight), dt);

        // Render UI
        self.ui.render();
    }
}
