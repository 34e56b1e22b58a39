//! Brickfall - a classic breakout arcade game
//!
//! Core modules:
//! - `sim`: deterministic simulation (physics, collisions, powerups, particles)
//! - `level`: tile-grid level parsing
//! - `resources`: named texture/sound handle registry
//! - `render`: per-frame draw-command list for the render backend
//! - `audio`: audio sink capability and sound-cue dispatch
//! - `settings`: startup configuration

pub mod audio;
pub mod level;
pub mod render;
pub mod resources;
pub mod settings;
pub mod sim;

pub use settings::Config;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (100 Hz)
    pub const SIM_DT: f32 = 0.01;
    /// Upper bound on a single frame's elapsed time (stall protection)
    pub const MAX_FRAME_DT: f32 = 0.2;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PLAYER_VELOCITY: f32 = 500.0;
    /// Hit-offset multiplier for bounce-angle control off the paddle
    pub const PADDLE_BOUNCE_STRENGTH: f32 = 2.0;
    /// Paddle width gained per size-increase powerup (uncapped)
    pub const PADDLE_GROW_AMOUNT: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);

    /// Powerup defaults
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// Independent spawn probability per powerup kind on brick destruction
    pub const POWERUP_SPAWN_CHANCE: f32 = 0.15;
    /// Ball speed multiplier applied by the speed powerup
    pub const SPEED_BOOST: f32 = 1.2;

    /// Screen-shake duration after a solid brick hit (seconds)
    pub const SHAKE_DURATION: f32 = 0.5;

    /// Particle trail pool capacity
    pub const PARTICLE_POOL_SIZE: usize = 500;
    /// Alpha fade rate for live particles (per second)
    pub const PARTICLE_FADE_RATE: f32 = 2.5;
    /// Quad size for rendered trail particles
    pub const PARTICLE_SIZE: f32 = 10.0;
}
