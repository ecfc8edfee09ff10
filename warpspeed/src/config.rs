use macroquad::prelude::Conf;
use serde::Deserialize;
use warp_core::{ModeLadder, SettingsStore, WarpSettings};

use crate::input::KeyBindings;

// Window constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Initial vessel state for a new flight.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FlightConfig {
    pub initial_altitude: f64,      // meters above the surface
    pub initial_vertical_speed: f64, // m/s, positive is up
    pub fuel: f64,                  // seconds of full-throttle burn
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            initial_altitude: 0.0,
            initial_vertical_speed: 0.0,
            fuel: 90.0,
        }
    }
}

/// Layout of the TOML configuration file. Every table is optional.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct FileConfig {
    pub warp: WarpSettings,
    pub flight: FlightConfig,
}

/// Configuration for the entire application including CLI parameters
pub struct AppConfig {
    pub flight: FlightConfig,
    pub store: SettingsStore,
    pub bindings: KeyBindings,
}

impl AppConfig {
    pub fn from_cli_and_config(cli: &crate::Cli, mut file: FileConfig) -> anyhow::Result<Self> {
        if cli.extended_warp {
            file.warp.ladder = ModeLadder::extended();
        }

        let bindings = KeyBindings::from_keybinds(&file.warp.keybinds)?;
        let store = SettingsStore::new(file.warp)?;

        if file.flight.fuel < 0.0 {
            anyhow::bail!("flight.fuel must not be negative");
        }

        Ok(Self {
            flight: file.flight,
            store,
            bindings,
        })
    }
}

pub fn window_conf() -> Conf {
    Conf {
        window_title: "WarpSpeed".to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH as i32,
        window_height: DEFAULT_WINDOW_HEIGHT as i32,
        high_dpi: true,
        ..Default::default()
    }
}
