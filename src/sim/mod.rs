//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (the level's stored brick order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod particles;
pub mod state;
pub mod tick;

pub use body::{Body, BodyState, integrate, interpolate};
pub use collision::{Contact, Side, circle_rect_overlap, rect_overlap};
pub use particles::{Particle, ParticleEmitter};
pub use state::{Ball, Brick, GameEvent, GameState, Level, Paddle, Powerup, PowerupKind};
pub use tick::{FrameClock, TickInput, tick};
