use tracing::{debug, info};
use warp_core::{ModeTable, Refusal, TimeHost, TimeMode};

use crate::config::FlightConfig;

use super::{
    ATMOSPHERE_HEIGHT, ENGINE_ACCELERATION, ENGINE_FIRING_MESSAGE, FLIGHT_ENDED_MESSAGE,
    FUEL_BURN_RATE, GRAVITY, LOW_ALTITUDE_MESSAGE, MAX_PHYSICS_STEPS_PER_FRAME, PHYSICS_STEP,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Vessel {
    pub altitude: f64,       // meters above the surface
    pub vertical_speed: f64, // m/s, positive is up
    pub fuel: f64,
    pub engine_on: bool,
}

impl Vessel {
    pub fn is_landed(&self) -> bool {
        self.altitude <= 0.0 && self.vertical_speed <= 0.0
    }

    fn is_thrusting(&self) -> bool {
        self.engine_on && self.fuel > 0.0
    }

    /// One explicit Euler step of gravity and thrust.
    fn step_physics(&mut self, dt: f64) {
        let mut acceleration = -GRAVITY;
        if self.is_thrusting() {
            acceleration += ENGINE_ACCELERATION;
            self.fuel = (self.fuel - FUEL_BURN_RATE * dt).max(0.0);
            if self.fuel == 0.0 {
                self.engine_on = false;
                info!("Fuel exhausted, engine shut down");
            }
        }

        self.vertical_speed += acceleration * dt;
        self.altitude += self.vertical_speed * dt;
        self.clamp_to_ground();
    }

    /// Closed-form propagation with no thrust. Returns true if the vessel
    /// dropped below the atmosphere boundary, in which case it stops there.
    fn propagate_on_rails(&mut self, dt: f64) -> bool {
        if self.is_landed() {
            return false;
        }

        let start_altitude = self.altitude;
        let mut t = dt;
        let end_altitude = start_altitude + self.vertical_speed * t - 0.5 * GRAVITY * t * t;
        let crossed = start_altitude >= ATMOSPHERE_HEIGHT && end_altitude < ATMOSPHERE_HEIGHT;
        if crossed {
            // Positive root of h0 + v t - g t^2 / 2 = H.
            let v = self.vertical_speed;
            let discriminant = v * v + 2.0 * GRAVITY * (start_altitude - ATMOSPHERE_HEIGHT);
            t = (v + discriminant.sqrt()) / GRAVITY;
        }

        self.altitude = start_altitude + self.vertical_speed * t - 0.5 * GRAVITY * t * t;
        self.vertical_speed -= GRAVITY * t;
        if crossed {
            self.altitude = ATMOSPHERE_HEIGHT;
        }
        self.clamp_to_ground();
        crossed
    }

    fn clamp_to_ground(&mut self) {
        if self.altitude <= 0.0 {
            self.altitude = 0.0;
            if self.vertical_speed < 0.0 {
                self.vertical_speed = 0.0;
            }
        }
    }
}

/// A single flight from launch to the end of the scene. Implements
/// [`TimeHost`] so the mode controller can drive its clock.
pub struct Flight {
    pub mission_time: f64,
    pub vessel: Vessel,
    multiplier: f64,
    warping: bool,
    mode_index: Option<usize>, // None until the controller first applies a mode
    active: bool,
    pending_messages: Vec<String>,
    // Mirrors of the current mode table, refreshed on rebuild.
    slow_motion_multiplier: f64,
    fast_forward_multiplier: f64,
    first_warp_index: Option<usize>,
    warp_interrupted: bool,
}

impl Flight {
    pub fn new(config: &FlightConfig) -> Self {
        Self {
            mission_time: 0.0,
            vessel: Vessel {
                altitude: config.initial_altitude.max(0.0),
                vertical_speed: config.initial_vertical_speed,
                fuel: config.fuel,
                engine_on: false,
            },
            multiplier: 1.0,
            warping: false,
            mode_index: None,
            active: true,
            pending_messages: Vec::new(),
            slow_motion_multiplier: 0.0,
            fast_forward_multiplier: 0.0,
            first_warp_index: None,
            warp_interrupted: false,
        }
    }

    /// Advances the flight by `dt` seconds of wall-clock time scaled by the
    /// active multiplier.
    pub fn update(&mut self, dt: f64) {
        if !self.active || self.multiplier <= 0.0 {
            return;
        }

        let sim_dt = dt * self.multiplier;
        if self.warping {
            if self.vessel.propagate_on_rails(sim_dt) {
                self.warp_interrupted = true;
            }
            self.mission_time += sim_dt;
            return;
        }

        let mut remaining = sim_dt.min(PHYSICS_STEP * MAX_PHYSICS_STEPS_PER_FRAME as f64);
        while remaining > 0.0 {
            let step = remaining.min(PHYSICS_STEP);
            self.vessel.step_physics(step);
            self.mission_time += step;
            remaining -= step;
        }
    }

    pub fn toggle_engine(&mut self) -> Result<(), String> {
        if self.vessel.engine_on {
            self.vessel.engine_on = false;
            debug!("Engine off");
            return Ok(());
        }
        if self.warping {
            return Err("Cannot fire the engine during time warp.".to_string());
        }
        if self.vessel.fuel <= 0.0 {
            return Err("Out of fuel.".to_string());
        }
        self.vessel.engine_on = true;
        debug!("Engine on");
        Ok(())
    }

    pub fn end(&mut self) {
        if self.active {
            self.active = false;
            self.vessel.engine_on = false;
            info!("Flight ended after {:.1} s", self.mission_time);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn is_warping(&self) -> bool {
        self.warping
    }

    pub fn mode_index(&self) -> Option<usize> {
        self.mode_index
    }

    pub fn slow_motion_multiplier(&self) -> f64 {
        self.slow_motion_multiplier
    }

    pub fn fast_forward_multiplier(&self) -> f64 {
        self.fast_forward_multiplier
    }

    pub fn first_warp_index(&self) -> Option<usize> {
        self.first_warp_index
    }

    pub fn drain_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_messages)
    }

    /// Returns and clears the atmosphere-entry flag raised during warp.
    pub fn take_warp_interrupt(&mut self) -> bool {
        std::mem::take(&mut self.warp_interrupted)
    }
}

impl TimeHost for Flight {
    fn is_in_simulation_scene(&self) -> bool {
        self.active
    }

    fn can_enter_mode(&self, _index: usize, mode: &TimeMode) -> Result<(), Refusal> {
        if !mode.is_warp() {
            return Ok(());
        }
        if self.vessel.engine_on {
            return Err(Refusal::new(ENGINE_FIRING_MESSAGE));
        }
        if self.vessel.altitude < ATMOSPHERE_HEIGHT && !self.vessel.is_landed() {
            return Err(Refusal::new(LOW_ALTITUDE_MESSAGE));
        }
        Ok(())
    }

    fn apply_mode(&mut self, index: usize, mode: &TimeMode) -> Result<(), Refusal> {
        if !self.active {
            return Err(Refusal::new(FLIGHT_ENDED_MESSAGE));
        }
        self.multiplier = mode.multiplier();
        self.warping = mode.is_warp();
        self.mode_index = Some(index);
        Ok(())
    }

    fn show_user_message(&mut self, text: &str) {
        self.pending_messages.push(text.to_string());
    }

    fn table_rebuilt(&mut self, table: &ModeTable) {
        self.slow_motion_multiplier = table.slow_motion_multiplier();
        self.fast_forward_multiplier = table.fast_forward_multiplier();
        self.first_warp_index = Some(table.first_warp_index());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp_core::WarpSettings;

    fn flight_at(altitude: f64, vertical_speed: f64) -> Flight {
        Flight::new(&FlightConfig {
            initial_altitude: altitude,
            initial_vertical_speed: vertical_speed,
            fuel: 10.0,
        })
    }

    #[test]
    fn test_free_fall_lands_on_ground() {
        let mut flight = flight_at(10.0, 0.0);
        for _ in 0..200 {
            flight.update(1.0 / 60.0);
        }
        assert_eq!(flight.vessel.altitude, 0.0);
        assert_eq!(flight.vessel.vertical_speed, 0.0);
        assert!(flight.vessel.is_landed());
    }

    #[test]
    fn test_engine_lifts_off_and_burns_fuel() {
        let mut flight = flight_at(0.0, 0.0);
        flight.toggle_engine().unwrap();
        flight.update(1.0);
        assert!(flight.vessel.altitude > 0.0);
        assert!(flight.vessel.vertical_speed > 0.0);
        assert!((flight.vessel.fuel - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_engine_shuts_down_when_fuel_runs_out() {
        let mut flight = flight_at(0.0, 0.0);
        flight.toggle_engine().unwrap();
        flight.update(11.0);
        assert_eq!(flight.vessel.fuel, 0.0);
        assert!(!flight.vessel.engine_on);
        assert_eq!(flight.toggle_engine(), Err("Out of fuel.".to_string()));
    }

    #[test]
    fn test_paused_flight_does_not_advance() {
        let mut flight = flight_at(1_000.0, 0.0);
        flight.apply_mode(0, &TimeMode::physics(0.0)).unwrap();
        flight.update(5.0);
        assert_eq!(flight.vessel.altitude, 1_000.0);
        assert_eq!(flight.mission_time, 0.0);
    }

    #[test]
    fn test_multiplier_scales_mission_time() {
        let mut flight = flight_at(0.0, 0.0);
        flight.apply_mode(8, &TimeMode::physics(4.0)).unwrap();
        flight.update(0.5);
        assert!((flight.mission_time - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_warp_refusals() {
        let warp = TimeMode::warp(10.0);

        let mut flight = flight_at(0.0, 0.0);
        assert!(flight.can_enter_mode(11, &warp).is_ok());
        flight.toggle_engine().unwrap();
        assert_eq!(
            flight.can_enter_mode(11, &warp),
            Err(Refusal::new(ENGINE_FIRING_MESSAGE))
        );
        assert!(flight.can_enter_mode(8, &TimeMode::physics(2.0)).is_ok());

        let flight = flight_at(5_000.0, 100.0);
        assert_eq!(
            flight.can_enter_mode(11, &warp),
            Err(Refusal::new(LOW_ALTITUDE_MESSAGE))
        );

        let flight = flight_at(80_000.0, 0.0);
        assert!(flight.can_enter_mode(11, &warp).is_ok());
    }

    #[test]
    fn test_warp_propagates_on_rails() {
        let mut flight = flight_at(200_000.0, 500.0);
        flight.apply_mode(11, &TimeMode::warp(10.0)).unwrap();
        flight.update(1.0);
        let expected = 200_000.0 + 500.0 * 10.0 - 0.5 * GRAVITY * 100.0;
        assert!((flight.vessel.altitude - expected).abs() < 1e-6);
        assert!((flight.vessel.vertical_speed - (500.0 - GRAVITY * 10.0)).abs() < 1e-9);
        assert!(!flight.take_warp_interrupt());
    }

    #[test]
    fn test_warp_stops_at_atmosphere() {
        let mut flight = flight_at(71_000.0, -200.0);
        flight.apply_mode(11, &TimeMode::warp(100.0)).unwrap();
        flight.update(1.0);
        assert_eq!(flight.vessel.altitude, ATMOSPHERE_HEIGHT);
        assert!(flight.vessel.vertical_speed < -200.0);
        assert!(flight.take_warp_interrupt());
        assert!(!flight.take_warp_interrupt());
    }

    #[test]
    fn test_engine_refused_during_warp() {
        let mut flight = flight_at(0.0, 0.0);
        flight.apply_mode(11, &TimeMode::warp(10.0)).unwrap();
        assert!(flight.toggle_engine().is_err());
        assert!(!flight.vessel.engine_on);
    }

    #[test]
    fn test_apply_refused_after_end() {
        let mut flight = flight_at(0.0, 0.0);
        flight.end();
        assert!(!flight.is_in_simulation_scene());
        assert_eq!(
            flight.apply_mode(7, &TimeMode::physics(1.0)),
            Err(Refusal::new(FLIGHT_ENDED_MESSAGE))
        );
    }

    #[test]
    fn test_table_rebuilt_mirrors_table() {
        let mut flight = flight_at(0.0, 0.0);
        flight.table_rebuilt(&ModeTable::rebuild(&WarpSettings::default()));
        assert_eq!(flight.slow_motion_multiplier(), 0.25);
        assert_eq!(flight.fast_forward_multiplier(), 2.0);
        assert_eq!(flight.first_warp_index(), Some(11));
    }

    #[test]
    fn test_messages_are_drained_once() {
        let mut flight = flight_at(0.0, 0.0);
        flight.show_user_message("one");
        flight.show_user_message("two");
        assert_eq!(flight.drain_messages(), vec!["one", "two"]);
        assert!(flight.drain_messages().is_empty());
    }
}
