use new_egui_macroquad::egui;
use warp_core::display::{format_multiplier, slot_label};
use warp_core::{ModeTable, SettingsStore, WarpAction};

use crate::input::key_names;
use crate::ui::events::{AppAction, SettingChange};
use crate::ui::{BASE_PADDING, BASE_SPACING};

const UNBOUND: &str = "None";

/// Time warp settings window: default slots, unpause behavior and keybinds.
pub struct SettingsPanel {
    show_settings: bool,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self {
            show_settings: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.show_settings
    }

    pub fn toggle(&mut self) -> bool {
        self.show_settings = !self.show_settings;
        self.show_settings
    }

    /// Draw the settings window. Edits are returned as an action and only
    /// reach the mode table on the controller's next rebuild.
    pub fn draw(
        &mut self,
        egui_ctx: &egui::Context,
        store: &SettingsStore,
        rebuild_pending: bool,
    ) -> Option<AppAction> {
        if !self.show_settings {
            return None;
        }

        let settings = store.settings();
        // Slot labels come from the table the current settings would build.
        let preview = ModeTable::rebuild(settings);
        let mut change = None;

        egui::Window::new("Time Warp Settings")
            .resizable(false)
            .collapsible(true)
            .default_pos(egui::pos2(32.0, 140.0))
            .default_width(300.0)
            .show(egui_ctx, |ui| {
                ui.heading("Default speeds");
                egui::Grid::new("slot_grid")
                    .num_columns(2)
                    .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                    .show(ui, |ui| {
                        ui.label("Slow motion:");
                        let mut slot = settings.default_slow_motion_slot;
                        let slider = egui::Slider::new(&mut slot, store.slow_motion_slots())
                            .clamp_to_range(true)
                            .step_by(1.0)
                            .custom_formatter(|n, _| slot_label(&preview, n as usize));
                        if ui.add(slider).changed() {
                            change = Some(SettingChange::SlowMotionSlot(slot));
                        }
                        ui.end_row();

                        ui.label("Fast forward:");
                        let mut slot = settings.default_fast_forward_slot;
                        let slider = egui::Slider::new(&mut slot, store.fast_forward_slots())
                            .clamp_to_range(true)
                            .step_by(1.0)
                            .custom_formatter(|n, _| slot_label(&preview, n as usize));
                        if ui.add(slider).changed() {
                            change = Some(SettingChange::FastForwardSlot(slot));
                        }
                        ui.end_row();
                    });

                ui.add_space(BASE_PADDING);
                let mut maintains = settings.pause_maintains_warp_speed;
                if ui
                    .checkbox(&mut maintains, "Unpause to the previous speed")
                    .on_hover_text("When off, unpausing always returns to 1x")
                    .changed()
                {
                    change = Some(SettingChange::PauseMaintainsWarpSpeed(maintains));
                }

                ui.add_space(BASE_PADDING);
                ui.heading("Keybinds");
                egui::Grid::new("keybind_grid")
                    .num_columns(2)
                    .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                    .show(ui, |ui| {
                        for action in WarpAction::ALL {
                            ui.label(action.label());
                            let current = settings.keybinds.get(action).unwrap_or(UNBOUND);
                            egui::ComboBox::from_id_source(("keybind", action))
                                .width(110.0)
                                .selected_text(current)
                                .show_ui(ui, |ui| {
                                    for name in std::iter::once(UNBOUND).chain(key_names()) {
                                        let selected = current.eq_ignore_ascii_case(name);
                                        if ui.selectable_label(selected, name).clicked() && !selected
                                        {
                                            let key = (name != UNBOUND).then(|| name.to_string());
                                            change = Some(SettingChange::Keybind(action, key));
                                        }
                                    }
                                });
                            ui.end_row();
                        }
                    });

                ui.add_space(BASE_PADDING);
                ui.separator();
                let ladder = &settings.ladder;
                ui.label(format!(
                    "{} modes, warp up to {}",
                    ladder.mode_count(),
                    ladder
                        .warp
                        .last()
                        .map(|&m| format_multiplier(m))
                        .unwrap_or_default()
                ));
                ui.label(format!("Settings revision {}", store.revision()));
                if rebuild_pending {
                    ui.colored_label(catppuccin_egui::MOCHA.yellow, "Applies on the next tick");
                }
            });

        change.map(AppAction::ChangeSetting)
    }
}
