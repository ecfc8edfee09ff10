use std::collections::VecDeque;

use catppuccin_egui::set_theme;
use egui::{self};
use warp_core::SettingsStore;

use crate::input::KeyBindings;
use crate::simulation::FlightScene;
use crate::ui::components::{DebugPanel, DialogPopup, SettingsPanel, TelemetryBar, TimePanel};
use crate::ui::events::{AppAction, UIEvent};
use crate::ui::{BASE_BUTTON_HEIGHT, BASE_PADDING};

fn auto_zoom(ctx: &egui::Context, base_px: egui::Vec2) -> f32 {
    let logical = ctx.screen_rect().size();
    let win_px = logical * ctx.pixels_per_point(); // physical pixels
    let s = (win_px.x / base_px.x).min(win_px.y / base_px.y);
    ((s * 4.0).round() / 4.0).clamp(0.75, 3.0) // snap to 0.25 for crisp text
}

pub struct UIManager {
    debug_panel: DebugPanel,
    time_panel: TimePanel,
    settings_panel: SettingsPanel,
    telemetry_bar: TelemetryBar,
    dialog_popup: Option<DialogPopup>,
    queued_dialogs: VecDeque<DialogPopup>,
    last_win_px: egui::Vec2,
    time_panel_visible: bool,
}

impl UIManager {
    pub fn new() -> Self {
        Self {
            debug_panel: DebugPanel::new(),
            time_panel: TimePanel::new(),
            settings_panel: SettingsPanel::new(),
            telemetry_bar: TelemetryBar::new(),
            dialog_popup: None,
            queued_dialogs: VecDeque::new(),
            last_win_px: egui::vec2(0.0, 0.0),
            time_panel_visible: true,
        }
    }

    /// Draws the UI for this frame. Returns the action requested by the user
    /// and whether the UI consumed the pointer.
    pub fn update(
        &mut self,
        scene: Option<&FlightScene>,
        store: &SettingsStore,
        bindings: &KeyBindings,
    ) -> (Option<AppAction>, bool) {
        self.debug_panel.update();
        self.time_panel.update_animation(self.time_panel_visible);

        let mut input_consumed = false;
        let mut app_action = None;
        let mut ui_event = None;

        new_egui_macroquad::ui(|egui_ctx| {
            set_theme(egui_ctx, catppuccin_egui::MOCHA);
            // Auto-zoom only on window resize or DPI change
            let win_px = egui_ctx.screen_rect().size() * egui_ctx.pixels_per_point();
            if (win_px.x - self.last_win_px.x).abs() > 1.0
                || (win_px.y - self.last_win_px.y).abs() > 1.0
            {
                self.last_win_px = win_px;
                let target = auto_zoom(egui_ctx, egui::vec2(1920.0, 1080.0));
                egui_ctx.set_zoom_factor(target);
            }

            if let Some(dialog) = &mut self.dialog_popup {
                if !dialog.draw(egui_ctx) {
                    app_action = dialog.take_action();
                    self.dialog_popup = self.queued_dialogs.pop_front();
                }
                input_consumed = true;
            } else {
                let (new_ui_event, new_app_action, consumed_by_components) =
                    self.draw_ui_components(egui_ctx, scene, store, bindings);
                ui_event = new_ui_event;
                app_action = new_app_action;
                input_consumed = consumed_by_components || egui_ctx.is_pointer_over_area();
            }
        });

        if let Some(event) = ui_event {
            match event {
                UIEvent::ToggleTimePanel => self.toggle_time_panel(),
                UIEvent::ToggleSettingsPanel => self.toggle_settings_panel(),
                UIEvent::ToggleDebugPanel => self.toggle_debug_panel(),
                UIEvent::ShowEndFlightConfirmDialog => self.confirm_end_flight(),
            }
        }

        (app_action, input_consumed)
    }

    /// Shows a dialog now, or after the ones already open are dismissed.
    pub fn show_dialog(&mut self, dialog: DialogPopup) {
        if self.dialog_popup.is_none() {
            self.dialog_popup = Some(dialog);
        } else {
            self.queued_dialogs.push_back(dialog);
        }
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_popup.is_some()
    }

    pub fn confirm_end_flight(&mut self) {
        self.show_dialog(DialogPopup::new_confirm(
            "End the flight and return to the main menu?",
            AppAction::EndFlight,
        ));
    }

    fn draw_ui_components(
        &mut self,
        egui_ctx: &egui::Context,
        scene: Option<&FlightScene>,
        store: &SettingsStore,
        bindings: &KeyBindings,
    ) -> (Option<UIEvent>, Option<AppAction>, bool) {
        let mut ui_event = None;
        let mut app_action = None;
        let mut input_consumed = false;

        match scene {
            Some(scene) => {
                let mut panel_bottom_y = 0.0;
                if self.time_panel_visible || self.time_panel.animation_progress > 0.01 {
                    let (panel_event, panel_action, consumed, bottom_y) = self.time_panel.draw(
                        egui_ctx,
                        scene,
                        bindings,
                        self.settings_panel.is_enabled(),
                        self.debug_panel.is_enabled(),
                    );
                    ui_event = panel_event;
                    app_action = panel_action;
                    input_consumed |= consumed;
                    panel_bottom_y = bottom_y;
                }

                let y_offset = if self.time_panel_visible {
                    panel_bottom_y + BASE_PADDING
                } else {
                    0.0
                };
                if let Some(toggle_event) = self.time_panel.draw_toggle_bar_always(
                    egui_ctx,
                    self.time_panel.animation_progress > 0.01,
                    y_offset,
                ) {
                    ui_event.get_or_insert(toggle_event);
                }

                self.telemetry_bar.draw(egui_ctx, &scene.flight);
            }
            None => {
                if self.draw_main_menu(egui_ctx) {
                    app_action = Some(AppAction::StartFlight);
                    input_consumed = true;
                }
            }
        }

        let rebuild_pending = scene.is_some_and(|s| s.controller.is_rebuild_pending(store));
        if let Some(settings_action) = self.settings_panel.draw(egui_ctx, store, rebuild_pending) {
            app_action = Some(settings_action);
        }
        self.debug_panel.draw(egui_ctx, scene, store);

        (ui_event, app_action, input_consumed)
    }

    /// Returns true when the launch button was clicked.
    fn draw_main_menu(&mut self, egui_ctx: &egui::Context) -> bool {
        let mut launch = false;
        let mut toggle_settings = false;
        egui::Window::new("WarpSpeed")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(260.0)
            .show(egui_ctx, |ui| {
                ui.label("A vessel sits on the pad. Launch to start a flight.");
                ui.add_space(BASE_PADDING);
                ui.horizontal(|ui| {
                    let launch_btn = egui::Button::new("🚀 Launch")
                        .fill(catppuccin_egui::MOCHA.surface1)
                        .min_size(egui::vec2(120.0, BASE_BUTTON_HEIGHT));
                    if ui.add(launch_btn).on_hover_text("Enter").clicked() {
                        launch = true;
                    }
                    if ui.button("⚙ Settings").clicked() {
                        toggle_settings = true;
                    }
                });
            });
        if toggle_settings {
            self.toggle_settings_panel();
        }
        launch
    }

    pub fn render(&self) {
        new_egui_macroquad::draw();
    }

    pub fn toggle_time_panel(&mut self) {
        self.time_panel_visible = !self.time_panel_visible;
    }

    pub fn toggle_settings_panel(&mut self) {
        self.settings_panel.toggle();
    }

    pub fn toggle_debug_panel(&mut self) {
        self.debug_panel.toggle();
    }
}
