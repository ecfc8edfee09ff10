mod flight;
mod scene;

// Re-export key types for easier imports
pub use flight::{Flight, Vessel};
pub use scene::FlightScene;

// Planet constants
pub const GRAVITY: f64 = 9.81; // m/s^2, constant with altitude
pub const ATMOSPHERE_HEIGHT: f64 = 70_000.0; // meters, warp is refused below this while airborne

// Vessel constants
pub const ENGINE_ACCELERATION: f64 = 25.0; // m/s^2 at full throttle
pub const FUEL_BURN_RATE: f64 = 1.0; // fuel units per second of burn

// Integration constants
pub const PHYSICS_STEP: f64 = 0.02; // seconds of simulated time per physics sub-step
pub const MAX_PHYSICS_STEPS_PER_FRAME: usize = 2000; // caps fast-forward work on slow frames

// User messages
pub const ENGINE_FIRING_MESSAGE: &str = "Cannot time warp while the engine is firing.";
pub const LOW_ALTITUDE_MESSAGE: &str = "Cannot time warp below 70 km while in flight.";
pub const FLIGHT_ENDED_MESSAGE: &str = "The flight has ended.";
pub const ATMOSPHERE_ENTRY_MESSAGE: &str = "Entering the atmosphere, time warp stopped.";
