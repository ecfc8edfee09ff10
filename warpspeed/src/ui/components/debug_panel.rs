use macroquad::prelude::*;
use new_egui_macroquad::egui;
use new_egui_macroquad::egui::Color32;
use warp_core::SettingsStore;

use crate::simulation::FlightScene;
use crate::ui::{BASE_PADDING, BASE_SPACING};

/// Debug panel component that displays debug information
pub struct DebugPanel {
    displayed_fps: i32,
    fps_timer: f32,
    show_debug: bool,
}

impl DebugPanel {
    pub fn new() -> Self {
        Self {
            displayed_fps: get_fps(),
            fps_timer: 0.0,
            show_debug: false,
        }
    }

    /// Update the FPS counter
    pub fn update(&mut self) {
        self.fps_timer += get_frame_time();
        if self.fps_timer >= 0.5 {
            self.displayed_fps = get_fps();
            self.fps_timer = 0.0;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.show_debug
    }

    pub fn toggle(&mut self) -> bool {
        self.show_debug = !self.show_debug;
        self.show_debug
    }

    pub fn draw(
        &mut self,
        egui_ctx: &egui::Context,
        scene: Option<&FlightScene>,
        store: &SettingsStore,
    ) {
        if !self.show_debug {
            return;
        }

        egui::Window::new("Debug Info")
            .resizable(true)
            .collapsible(true)
            .default_pos(egui::pos2(screen_width() - 320.0, 140.0))
            .default_size(egui::vec2(300.0, 320.0))
            .show(egui_ctx, |ui| {
                ui.heading("Performance");
                ui.group(|ui| {
                    let fps_color = if self.displayed_fps > 55 {
                        Color32::from_rgb(0, 180, 0)
                    } else if self.displayed_fps > 30 {
                        Color32::from_rgb(220, 180, 70)
                    } else {
                        Color32::from_rgb(220, 100, 100)
                    };
                    egui::Grid::new("perf_grid")
                        .num_columns(2)
                        .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                        .show(ui, |ui| {
                            ui.label("FPS:");
                            ui.colored_label(fps_color, format!("{}", self.displayed_fps));
                            ui.end_row();
                        });
                });

                ui.add_space(BASE_PADDING);
                ui.heading("Time Warp");
                ui.group(|ui| {
                    egui::Grid::new("warp_state")
                        .num_columns(2)
                        .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                        .show(ui, |ui| {
                            ui.label("Settings revision:");
                            ui.label(store.revision().to_string());
                            ui.end_row();

                            let Some(scene) = scene else {
                                ui.label("Scene:");
                                ui.label("Main menu");
                                ui.end_row();
                                return;
                            };
                            let controller = &scene.controller;
                            let table = controller.table();

                            ui.label("Flight active:");
                            ui.label(scene.flight.is_active().to_string());
                            ui.end_row();

                            ui.label("Rebuild pending:");
                            ui.label(controller.is_rebuild_pending(store).to_string());
                            ui.end_row();

                            ui.label("Current index:");
                            ui.label(format!(
                                "{} ({:?})",
                                controller.current_index(),
                                controller.current_region()
                            ));
                            ui.end_row();

                            ui.label("Unpause index:");
                            ui.label(controller.unpause_index().to_string());
                            ui.end_row();

                            ui.label("Table size:");
                            ui.label(table.len().to_string());
                            ui.end_row();

                            ui.label("Slots (slow / fast):");
                            ui.label(format!(
                                "{} / {}",
                                table.slow_motion_slot(),
                                table.fast_forward_slot()
                            ));
                            ui.end_row();

                            ui.label("First warp index:");
                            ui.label(format!(
                                "{} (host sees {:?})",
                                table.first_warp_index(),
                                scene.flight.first_warp_index()
                            ));
                            ui.end_row();

                            ui.label("Applied mode:");
                            ui.label(format!(
                                "{:?} at {}x",
                                scene.flight.mode_index(),
                                scene.flight.multiplier()
                            ));
                            ui.end_row();
                        });
                });
            });
    }
}
