use macroquad::prelude::*;

use super::{
    ALTITUDE_MARKERS, ATMOSPHERE_COLOR_VAL, BOTTOM_MARGIN, FLAME_COLOR_VAL, GROUND_COLOR_VAL,
    GROUND_HEIGHT, MARKER_COLOR_VAL, MAX_DISPLAY_ALTITUDE, SPACE_COLOR_VAL, TOP_MARGIN,
    VESSEL_COLOR_VAL, VESSEL_HEIGHT, VESSEL_WIDTH, WARP_COLOR_VAL,
};
use crate::simulation::{ATMOSPHERE_HEIGHT, Flight, Vessel};

const ATMOSPHERE_BANDS: usize = 24;

/// Maps an altitude to `[0, 1]` on a logarithmic scale so the ground, the
/// atmosphere edge and high orbits all fit on one screen.
pub fn altitude_fraction(altitude: f64) -> f32 {
    let altitude = altitude.clamp(0.0, MAX_DISPLAY_ALTITUDE);
    ((1.0 + altitude / 1_000.0).ln() / (1.0 + MAX_DISPLAY_ALTITUDE / 1_000.0).ln()) as f32
}

fn format_altitude(altitude: f64) -> String {
    if altitude >= 1_000_000.0 {
        format!("{:.0} Mm", altitude / 1_000_000.0)
    } else {
        format!("{:.0} km", altitude / 1_000.0)
    }
}

/// Draws the planet, the altitude scale and the vessel.
pub struct Renderer {
    /// Accumulated real time, drives the flame and warp streak flicker.
    anim_time: f32,
}

impl Renderer {
    pub fn new() -> Self {
        Self { anim_time: 0.0 }
    }

    /// Screen y coordinate of the given altitude.
    fn altitude_to_y(&self, altitude: f64) -> f32 {
        let ground_y = screen_height() - BOTTOM_MARGIN - GROUND_HEIGHT;
        let span = ground_y - TOP_MARGIN;
        ground_y - altitude_fraction(altitude) * span
    }

    /// Main rendering function. Without a flight, an idle vessel sits on the pad.
    pub fn render(&mut self, flight: Option<&Flight>, dt: f32) {
        self.anim_time += dt;
        clear_background(Color::from_hex(SPACE_COLOR_VAL));

        self.draw_atmosphere();
        self.draw_ground();
        self.draw_altitude_markers();

        match flight {
            Some(flight) => self.draw_vessel(&flight.vessel, flight.is_warping()),
            None => {
                let idle = Vessel {
                    altitude: 0.0,
                    vertical_speed: 0.0,
                    fuel: 0.0,
                    engine_on: false,
                };
                self.draw_vessel(&idle, false);
            }
        }
    }

    fn draw_ground(&self) {
        let ground_y = screen_height() - BOTTOM_MARGIN - GROUND_HEIGHT;
        draw_rectangle(
            0.0,
            ground_y,
            screen_width(),
            GROUND_HEIGHT,
            Color::from_hex(GROUND_COLOR_VAL),
        );
    }

    fn draw_atmosphere(&self) {
        let base = Color::from_hex(ATMOSPHERE_COLOR_VAL);
        let ground_y = self.altitude_to_y(0.0);
        let top_y = self.altitude_to_y(ATMOSPHERE_HEIGHT);
        let band_height = (ground_y - top_y) / ATMOSPHERE_BANDS as f32;

        // Fades out with altitude.
        for band in 0..ATMOSPHERE_BANDS {
            let alpha = 0.35 * (1.0 - band as f32 / ATMOSPHERE_BANDS as f32);
            let y = ground_y - (band + 1) as f32 * band_height;
            draw_rectangle(
                0.0,
                y,
                screen_width(),
                band_height + 1.0,
                Color::new(base.r, base.g, base.b, alpha),
            );
        }
    }

    fn draw_altitude_markers(&self) {
        let color = Color::from_hex(MARKER_COLOR_VAL);
        for altitude in ALTITUDE_MARKERS {
            let y = self.altitude_to_y(altitude);
            let thickness = if altitude == ATMOSPHERE_HEIGHT { 2.0 } else { 1.0 };
            draw_line(0.0, y, 60.0, y, thickness, color);
            draw_text(&format_altitude(altitude), 66.0, y + 5.0, 18.0, color);
        }
    }

    fn draw_vessel(&self, vessel: &Vessel, warping: bool) {
        let x = screen_width() * 0.5;
        let base_y = self.altitude_to_y(vessel.altitude);
        let half_width = VESSEL_WIDTH * 0.5;

        if warping {
            let streak = Color::from_hex(WARP_COLOR_VAL);
            let phase = (self.anim_time * 6.0).fract();
            // Streaks trail behind the direction of travel.
            let dir = if vessel.vertical_speed >= 0.0 { 1.0 } else { -1.0 };
            for i in 0..4 {
                let y = base_y + dir * ((i as f32 + phase) * 18.0 + 8.0);
                let alpha = 0.6 - i as f32 * 0.12;
                draw_line(
                    x - 20.0,
                    y,
                    x + 20.0,
                    y,
                    1.5,
                    Color::new(streak.r, streak.g, streak.b, alpha),
                );
            }
        }

        if vessel.engine_on {
            let flicker = 1.0 + (self.anim_time * 40.0).sin() * 0.2;
            draw_triangle(
                vec2(x - half_width * 0.7, base_y),
                vec2(x + half_width * 0.7, base_y),
                vec2(x, base_y + 22.0 * flicker),
                Color::from_hex(FLAME_COLOR_VAL),
            );
        }

        let body = Color::from_hex(VESSEL_COLOR_VAL);
        draw_rectangle(
            x - half_width,
            base_y - VESSEL_HEIGHT * 0.7,
            VESSEL_WIDTH,
            VESSEL_HEIGHT * 0.7,
            body,
        );
        draw_triangle(
            vec2(x - half_width, base_y - VESSEL_HEIGHT * 0.7),
            vec2(x + half_width, base_y - VESSEL_HEIGHT * 0.7),
            vec2(x, base_y - VESSEL_HEIGHT),
            body,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altitude_fraction_bounds() {
        assert_eq!(altitude_fraction(0.0), 0.0);
        assert_eq!(altitude_fraction(-50.0), 0.0);
        assert!((altitude_fraction(MAX_DISPLAY_ALTITUDE) - 1.0).abs() < 1e-6);
        assert!((altitude_fraction(MAX_DISPLAY_ALTITUDE * 10.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_altitude_fraction_is_increasing() {
        let samples = [0.0, 10.0, 1_000.0, 70_000.0, 1_000_000.0, 9_000_000.0];
        for pair in samples.windows(2) {
            assert!(altitude_fraction(pair[0]) < altitude_fraction(pair[1]));
        }
    }

    #[test]
    fn test_format_altitude() {
        assert_eq!(format_altitude(70_000.0), "70 km");
        assert_eq!(format_altitude(5_000_000.0), "5 Mm");
    }
}
