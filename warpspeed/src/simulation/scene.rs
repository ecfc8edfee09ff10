use tracing::info;
use warp_core::{InputSource, ModeController, SettingsStore, TimeHost, WarpAction};

use crate::config::FlightConfig;

use super::{ATMOSPHERE_ENTRY_MESSAGE, Flight};

/// The flight scene: a vessel and the time warp controller driving it. Both
/// are created at launch and dropped together when the flight ends.
pub struct FlightScene {
    pub flight: Flight,
    pub controller: ModeController,
}

impl FlightScene {
    pub fn new(config: &FlightConfig, store: &SettingsStore) -> Self {
        info!(
            "Flight scene started at {:.0} m with {:.0} fuel",
            config.initial_altitude, config.fuel
        );
        Self {
            flight: Flight::new(config),
            controller: ModeController::new(store),
        }
    }

    /// One frame: time warp logic first, then the flight advances at the
    /// resulting rate. Returns the keybind action dispatched this frame.
    pub fn update<I>(&mut self, dt: f64, input: &I, store: &SettingsStore) -> Option<WarpAction>
    where
        I: InputSource + ?Sized,
    {
        let action = self.controller.tick(&mut self.flight, input, store);
        self.flight.update(dt);

        if self.flight.take_warp_interrupt()
            && self
                .controller
                .set_normal_speed_mode(&mut self.flight)
                .is_ok()
        {
            self.flight.show_user_message(ATMOSPHERE_ENTRY_MESSAGE);
        }
        action
    }

    pub fn end(&mut self) {
        self.flight.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{ENGINE_FIRING_MESSAGE, LOW_ALTITUDE_MESSAGE};
    use warp_core::{NoInput, WarpSettings};

    struct Pressed(Vec<WarpAction>);

    impl InputSource for Pressed {
        fn is_just_pressed(&self, action: WarpAction) -> bool {
            self.0.contains(&action)
        }
    }

    fn scene_at(altitude: f64, vertical_speed: f64) -> (FlightScene, SettingsStore) {
        let store = SettingsStore::new(WarpSettings::default()).unwrap();
        let config = FlightConfig {
            initial_altitude: altitude,
            initial_vertical_speed: vertical_speed,
            fuel: 50.0,
        };
        (FlightScene::new(&config, &store), store)
    }

    #[test]
    fn test_first_frame_rebuilds_and_mirrors_table() {
        let (mut scene, store) = scene_at(0.0, 0.0);
        assert_eq!(scene.flight.first_warp_index(), None);
        scene.update(1.0 / 60.0, &NoInput, &store);
        assert_eq!(scene.flight.first_warp_index(), Some(11));
        assert_eq!(scene.flight.slow_motion_multiplier(), 0.25);
    }

    #[test]
    fn test_keybind_changes_flight_rate() {
        let (mut scene, store) = scene_at(0.0, 0.0);
        let action = scene.update(0.0, &Pressed(vec![WarpAction::FastForward]), &store);
        assert_eq!(action, Some(WarpAction::FastForward));
        assert_eq!(scene.flight.multiplier(), 2.0);
        assert_eq!(scene.flight.mode_index(), Some(8));
    }

    #[test]
    fn test_warp_refused_while_engine_fires() {
        let (mut scene, store) = scene_at(0.0, 0.0);
        scene.flight.toggle_engine().unwrap();
        scene.update(0.0, &Pressed(vec![WarpAction::Warp]), &store);
        assert!(!scene.flight.is_warping());
        assert_eq!(scene.flight.drain_messages(), vec![ENGINE_FIRING_MESSAGE]);
    }

    #[test]
    fn test_warp_refused_low_in_flight() {
        let (mut scene, store) = scene_at(10_000.0, 300.0);
        scene.update(0.0, &Pressed(vec![WarpAction::Warp]), &store);
        assert_eq!(scene.controller.current_index(), 7);
        assert_eq!(scene.flight.drain_messages(), vec![LOW_ALTITUDE_MESSAGE]);
    }

    #[test]
    fn test_atmosphere_entry_drops_out_of_warp() {
        let (mut scene, store) = scene_at(70_500.0, -100.0);
        scene.update(0.0, &Pressed(vec![WarpAction::Warp]), &store);
        assert!(scene.flight.is_warping());

        scene.update(1.0, &NoInput, &store);
        assert!(!scene.flight.is_warping());
        assert_eq!(scene.controller.current_index(), 7);
        assert_eq!(scene.flight.drain_messages(), vec![ATMOSPHERE_ENTRY_MESSAGE]);
    }

    #[test]
    fn test_ended_flight_ignores_input() {
        let (mut scene, store) = scene_at(0.0, 0.0);
        scene.update(0.0, &NoInput, &store);
        scene.end();
        let action = scene.update(0.0, &Pressed(vec![WarpAction::FastForward]), &store);
        assert_eq!(action, None);
        assert_eq!(scene.flight.multiplier(), 1.0);
    }
}
