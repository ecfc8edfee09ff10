mod rendering;

pub use rendering::Renderer;

// Rendering constants
pub const SPACE_COLOR_VAL: u32 = 0x11111b; // Catppuccin Mocha crust
pub const GROUND_COLOR_VAL: u32 = 0x45475a;
pub const ATMOSPHERE_COLOR_VAL: u32 = 0x89b4fa;
pub const VESSEL_COLOR_VAL: u32 = 0xcdd6f4;
pub const FLAME_COLOR_VAL: u32 = 0xfab387;
pub const WARP_COLOR_VAL: u32 = 0xcba6f7;
pub const MARKER_COLOR_VAL: u32 = 0x6c7086;

pub const GROUND_HEIGHT: f32 = 40.0; // pixels
pub const TOP_MARGIN: f32 = 110.0; // leaves room for the time panel
pub const BOTTOM_MARGIN: f32 = 36.0; // leaves room for the telemetry bar
pub const VESSEL_WIDTH: f32 = 14.0;
pub const VESSEL_HEIGHT: f32 = 34.0;

/// Highest altitude on the display scale; anything above is pinned to the top.
pub const MAX_DISPLAY_ALTITUDE: f64 = 10_000_000.0;
/// Altitude markers drawn on the scale, in meters.
pub const ALTITUDE_MARKERS: [f64; 6] = [1_000.0, 10_000.0, 70_000.0, 250_000.0, 1_000_000.0, 5_000_000.0];
