use new_egui_macroquad::egui;
use warp_core::display::format_multiplier;

use crate::simulation::Flight;

/// Mission elapsed time as `T+ hh:mm:ss`, with days once past 24 hours.
pub fn format_mission_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (days, rem) = (total / 86_400, total % 86_400);
    let (hours, minutes, secs) = (rem / 3_600, (rem % 3_600) / 60, rem % 60);
    if days > 0 {
        format!("T+ {}d {:02}:{:02}:{:02}", days, hours, minutes, secs)
    } else {
        format!("T+ {:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

/// Vessel readout along the bottom of the screen.
pub struct TelemetryBar {}

impl TelemetryBar {
    pub fn new() -> Self {
        Self {}
    }

    pub fn draw(&mut self, ctx: &egui::Context, flight: &Flight) -> f32 {
        let bar_height = 24.0;
        let vessel = &flight.vessel;

        let rate = if flight.multiplier() == 0.0 {
            "Paused".to_string()
        } else if flight.is_warping() {
            format!("Warp {}", format_multiplier(flight.multiplier()))
        } else {
            format_multiplier(flight.multiplier())
        };

        egui::TopBottomPanel::bottom("telemetry_bar")
            .exact_height(bar_height)
            .resizable(false)
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.spacing_mut().item_spacing.x = 18.0;
                    ui.monospace(format_mission_time(flight.mission_time));
                    ui.separator();
                    ui.label(format!("Rate {}", rate));
                    ui.separator();
                    ui.label(format!("Alt {:.1} km", vessel.altitude / 1_000.0));
                    ui.label(format!("V/S {:+.1} m/s", vessel.vertical_speed));
                    ui.label(format!("Fuel {:.1}", vessel.fuel));
                    ui.separator();
                    if vessel.engine_on {
                        ui.colored_label(catppuccin_egui::MOCHA.peach, "ENGINE ON");
                    } else if vessel.is_landed() {
                        ui.label("Landed");
                    } else {
                        ui.label("Coasting");
                    }
                });
            });

        bar_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mission_time() {
        assert_eq!(format_mission_time(0.0), "T+ 00:00:00");
        assert_eq!(format_mission_time(3_725.9), "T+ 01:02:05");
        assert_eq!(format_mission_time(90_061.0), "T+ 1d 01:01:01");
        assert_eq!(format_mission_time(-5.0), "T+ 00:00:00");
    }
}
