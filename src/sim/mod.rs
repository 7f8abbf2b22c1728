//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per call, no wall-clock reads
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod countdown;
pub mod draw;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::{Bounds, Rect, collides};
pub use countdown::Countdown;
pub use draw::{DrawItem, Hud};
pub use level::{Level, generate_level};
pub use state::{
    Bee, Cloud, Facing, Flower, GameEvent, GamePhase, GameState, Particle, Platform, Player,
    Screen,
};
pub use tick::{TickInput, tick};
