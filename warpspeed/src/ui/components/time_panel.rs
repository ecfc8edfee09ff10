use epaint::Margin;
use new_egui_macroquad::egui::{self, epaint};
use warp_core::display::{format_multiplier, mode_label};
use warp_core::{Region, WarpAction};

use crate::input::KeyBindings;
use crate::simulation::FlightScene;
use crate::ui::events::{AppAction, UIEvent};
use crate::ui::{
    BASE_BUTTON_HEIGHT, BASE_BUTTON_WIDTH, BASE_ICON_SIZE, BASE_PADDING, BASE_SPACING,
    LADDER_BUTTON_HEIGHT,
};

/// Time controls at the top of the screen: the four mode buttons, pause, the
/// ladder strip with the active mode highlighted, and the panel toggles.
pub struct TimePanel {
    pub animation_progress: f32, // 0.0 = hidden, 1.0 = shown
    pub animation_target: f32,   // 0.0 = hidden, 1.0 = shown
}

impl TimePanel {
    pub fn new() -> Self {
        Self {
            animation_progress: 1.0,
            animation_target: 1.0,
        }
    }

    /// Call this every frame to update the animation progress
    pub fn update_animation(&mut self, visible: bool) {
        self.animation_target = if visible { 1.0 } else { 0.0 };
        let speed = 0.15; // Lower = slower
        if (self.animation_progress - self.animation_target).abs() > 0.001 {
            self.animation_progress += (self.animation_target - self.animation_progress) * speed;
            if (self.animation_progress - self.animation_target).abs() < 0.001 {
                self.animation_progress = self.animation_target;
            }
        }
    }

    fn icon_button(&self, ui: &mut egui::Ui, label: &str, active: bool) -> egui::Response {
        let mut button = egui::Button::new(egui::RichText::new(label).size(20.0));
        if active {
            button = button.fill(catppuccin_egui::MOCHA.overlay0);
        }
        ui.add_sized([BASE_ICON_SIZE, BASE_ICON_SIZE], button)
    }

    fn mode_button(
        &self,
        ui: &mut egui::Ui,
        label: &str,
        active: bool,
        hover: String,
    ) -> egui::Response {
        let mut button = egui::Button::new(label);
        if active {
            button = button.fill(catppuccin_egui::MOCHA.surface2);
        }
        ui.add_sized([BASE_BUTTON_WIDTH, BASE_BUTTON_HEIGHT], button)
            .on_hover_text(hover)
    }

    fn draw_help_tooltip(&self, egui_ctx: &egui::Context, bindings: &KeyBindings) {
        if let Some(mouse_pos) = egui_ctx.input(|i| i.pointer.hover_pos()) {
            egui::Window::new("")
                .title_bar(false)
                .collapsible(false)
                .resizable(false)
                .fixed_pos(mouse_pos + egui::vec2(-320.0, 10.0))
                .show(egui_ctx, |ui| {
                    ui.heading("Keyboard Shortcuts");
                    ui.add_space(BASE_PADDING);
                    egui::Grid::new("keyboard_shortcuts")
                        .num_columns(2)
                        .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                        .striped(true)
                        .show(ui, |ui| {
                            for (key, action) in keyboard_shortcuts() {
                                ui.monospace(key);
                                ui.label(action);
                                ui.end_row();
                            }
                        });
                    ui.add_space(BASE_PADDING * 2.0);
                    ui.heading("Time Warp Keybinds");
                    ui.add_space(BASE_PADDING);
                    egui::Grid::new("time_warp_keybinds")
                        .num_columns(2)
                        .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                        .striped(true)
                        .show(ui, |ui| {
                            for action in WarpAction::ALL {
                                ui.monospace(bindings.describe(action));
                                ui.label(action.label());
                                ui.end_row();
                            }
                        });
                });
        }
    }

    pub fn draw_toggle_bar_always(
        &self,
        egui_ctx: &egui::Context,
        panel_visible: bool,
        y_offset: f32,
    ) -> Option<UIEvent> {
        let base_width = 200.0;
        let hover_width = 220.0;
        let height = 10.0;
        let button_height = 18.0;
        let screen_width = egui_ctx.screen_rect().width();
        let area_x = (screen_width - hover_width) / 2.0;

        // While the panel is shown the bar only appears under the pointer.
        if panel_visible {
            let bar_rect = egui::Rect::from_min_size(
                egui::pos2(area_x, y_offset),
                egui::vec2(hover_width, button_height),
            );
            let hovered = egui_ctx
                .input(|i| i.pointer.hover_pos())
                .is_some_and(|pos| bar_rect.contains(pos));
            if !hovered {
                return None;
            }
        }

        let mut event = None;
        egui::Area::new(egui::Id::new("time_panel_toggle_bar"))
            .fixed_pos(egui::pos2(area_x, y_offset))
            .constrain(false)
            .order(egui::Order::Foreground)
            .show(egui_ctx, |ui| {
                let (rect, response) = ui.allocate_exact_size(
                    egui::vec2(hover_width, button_height),
                    egui::Sense::click(),
                );
                let width = if response.hovered() {
                    hover_width
                } else {
                    base_width
                };
                let color = if response.hovered() {
                    egui::Color32::from_rgba_unmultiplied(180, 180, 220, 220)
                } else {
                    egui::Color32::from_rgba_unmultiplied(120, 120, 160, 180)
                };
                let pill_rect = egui::Rect::from_min_size(
                    rect.min + egui::vec2((hover_width - width) / 2.0, (button_height - height) / 2.0),
                    egui::vec2(width, height),
                );
                ui.painter().rect_filled(pill_rect, height * 0.5, color);
                if response.clicked() {
                    event = Some(UIEvent::ToggleTimePanel);
                }
                response.on_hover_text("Show/hide the time controls (F)");
            });
        event
    }

    /// Returns the UI event, the app action, whether input was consumed and
    /// the bottom edge of the panel.
    pub fn draw(
        &mut self,
        egui_ctx: &egui::Context,
        scene: &FlightScene,
        bindings: &KeyBindings,
        settings_open: bool,
        debug_open: bool,
    ) -> (Option<UIEvent>, Option<AppAction>, bool, f32) {
        let mut ui_event = None;
        let mut app_action = None;
        let mut input_consumed = false;
        let mut panel_bottom_y = 0.0;

        let controller = &scene.controller;
        let table = controller.table();
        let region = controller.current_region();
        let current_index = controller.current_index();

        let min_offset = -110.0; // Hide panel above the screen
        let y_offset = min_offset * (1.0 - self.animation_progress);
        egui::Area::new(egui::Id::new("time_panel_area_anim"))
            .anchor(
                egui::Align2::CENTER_TOP,
                egui::Vec2::new(0.0, BASE_PADDING + y_offset),
            )
            .constrain(false)
            .order(egui::Order::Middle)
            .show(egui_ctx, |ui| {
                egui::Frame::none()
                    .fill(egui_ctx.style().visuals.panel_fill)
                    .inner_margin(Margin::same(BASE_PADDING))
                    .rounding(egui::Rounding::same(6.0))
                    .show(ui, |ui| {
                        ui.add_enabled_ui(self.animation_progress > 0.01, |ui| {
                            ui.horizontal(|ui| {
                                ui.spacing_mut().item_spacing.x = BASE_SPACING;

                                let pause_btn = self
                                    .icon_button(
                                        ui,
                                        if controller.is_paused() { "▶" } else { "⏸" },
                                        controller.is_paused(),
                                    )
                                    .on_hover_text("Pause/resume (P or Space)");
                                if pause_btn.clicked() {
                                    app_action = Some(AppAction::TogglePause);
                                    input_consumed = true;
                                }
                                ui.add_space(BASE_SPACING);

                                let buttons = [
                                    (
                                        WarpAction::SlowMotion,
                                        format!(
                                            "🐢 {}",
                                            format_multiplier(scene.flight.slow_motion_multiplier())
                                        ),
                                        region == Some(Region::SlowMotion),
                                    ),
                                    (
                                        WarpAction::NormalSpeed,
                                        "1x".to_string(),
                                        region == Some(Region::Normal),
                                    ),
                                    (
                                        WarpAction::FastForward,
                                        format!(
                                            "⏩ {}",
                                            format_multiplier(
                                                scene.flight.fast_forward_multiplier()
                                            )
                                        ),
                                        region == Some(Region::FastForward),
                                    ),
                                    (
                                        WarpAction::Warp,
                                        "🚀 Warp".to_string(),
                                        region == Some(Region::Warp),
                                    ),
                                ];
                                for (action, label, active) in buttons {
                                    let hover = format!(
                                        "{} ({})",
                                        action.label(),
                                        bindings.describe(action)
                                    );
                                    if self.mode_button(ui, &label, active, hover).clicked() {
                                        app_action = Some(AppAction::Warp(action));
                                        input_consumed = true;
                                    }
                                }

                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        ui.add_space(BASE_SPACING);
                                        let help_response = ui.add(
                                            egui::Label::new("❓").sense(egui::Sense::hover()),
                                        );
                                        if help_response.hovered() {
                                            self.draw_help_tooltip(egui_ctx, bindings);
                                        }
                                        ui.add_space(BASE_SPACING);
                                        let debug_btn = self
                                            .icon_button(ui, "🛠", debug_open)
                                            .on_hover_text("Show/hide debug panel (D)");
                                        if debug_btn.clicked() {
                                            ui_event = Some(UIEvent::ToggleDebugPanel);
                                            input_consumed = true;
                                        }
                                        let settings_btn = self
                                            .icon_button(ui, "⚙", settings_open)
                                            .on_hover_text("Time warp settings (O)");
                                        if settings_btn.clicked() {
                                            ui_event = Some(UIEvent::ToggleSettingsPanel);
                                            input_consumed = true;
                                        }
                                        ui.add_space(2.0 * BASE_SPACING);
                                        let engine_btn = self
                                            .icon_button(ui, "🔥", scene.flight.vessel.engine_on)
                                            .on_hover_text("Toggle engine (T)");
                                        if engine_btn.clicked() {
                                            app_action = Some(AppAction::ToggleEngine);
                                            input_consumed = true;
                                        }
                                        let end_btn = self
                                            .icon_button(ui, "⏏", false)
                                            .on_hover_text("End flight (Esc)");
                                        if end_btn.clicked() {
                                            ui_event = Some(UIEvent::ShowEndFlightConfirmDialog);
                                            input_consumed = true;
                                        }
                                    },
                                );
                            });

                            ui.add_space(BASE_SPACING);
                            ui.separator();

                            // Ladder strip
                            ui.horizontal(|ui| {
                                ui.spacing_mut().item_spacing.x = 2.0;
                                for (index, mode) in table.modes().iter().enumerate() {
                                    let mut button = egui::Button::new(
                                        egui::RichText::new(mode_label(mode)).small(),
                                    );
                                    if index == current_index {
                                        button = button.fill(catppuccin_egui::MOCHA.mauve);
                                    } else if mode.is_warp() {
                                        button = button.fill(catppuccin_egui::MOCHA.surface0);
                                    }
                                    let response = ui
                                        .add(button.min_size(egui::vec2(0.0, LADDER_BUTTON_HEIGHT)))
                                        .on_hover_text(format!("Mode {}", index));
                                    if response.clicked() {
                                        app_action = Some(AppAction::SetMode(index));
                                        input_consumed = true;
                                    }
                                }
                            });
                            panel_bottom_y = ui.min_rect().bottom();
                        });
                    });
            });
        (ui_event, app_action, input_consumed, panel_bottom_y)
    }
}

fn keyboard_shortcuts() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Enter", "Launch from the main menu"),
        ("P or Space", "Pause/resume"),
        ("T", "Toggle engine"),
        ("O", "Toggle time warp settings"),
        ("D", "Toggle debug panel"),
        ("F", "Toggle time controls"),
        ("Esc", "End flight / Close dialog"),
    ]
}
