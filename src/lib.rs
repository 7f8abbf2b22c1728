//! Butterfly Meadow - A single-screen flower-collecting platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, levels, session state)
//! - `platform`: Browser/native platform abstraction (input collection)
//! - `renderer`: Canvas2D painter (wasm only)
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{HazardPenalty, Settings, WingColor};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the cadence the physics numbers assume)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Player (butterfly) box size
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Spawn point, measured from the left edge and from the bottom of the world
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_FROM_BOTTOM: f32 = 200.0;

    pub const PLATFORM_HEIGHT: f32 = 20.0;
    /// Distance from the bottom of the world to the top of the ground
    pub const GROUND_MARGIN: f32 = 50.0;

    pub const FLOWER_SIZE: f32 = 30.0;
    /// Flowers sit this far above the platform top
    pub const FLOWER_LIFT: f32 = 25.0;

    pub const CLOUD_SIZE: f32 = 60.0;
    pub const CLOUD_COUNT: usize = 5;

    pub const BEE_SIZE: f32 = 35.0;
    /// Bees hover this far above the platform they patrol
    pub const BEE_LIFT: f32 = 60.0;
    /// Patrol range extends this far past each platform edge
    pub const BEE_PATROL_OVERHANG: f32 = 50.0;
    pub const MAX_BEES: u32 = 5;

    pub const PARTICLE_BURST: usize = 15;

    /// Pointer presses closer than this to the butterfly start a drag
    pub const DRAG_HIT_RADIUS: f32 = 80.0;

    /// Vertical space taken by the HUD and control bar around the canvas
    pub const UI_CHROME_HEIGHT: f32 = 140.0;
}

/// Dimensions of the playable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl WorldSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// World size for a browser window, leaving room for the UI chrome
    pub fn from_window(inner_width: f32, inner_height: f32) -> Self {
        Self::new(inner_width, (inner_height - consts::UI_CHROME_HEIGHT).max(0.0))
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - consts::GROUND_MARGIN
    }
}

impl Default for WorldSize {
    fn default() -> Self {
        Self::new(1280.0, 580.0)
    }
}
