//! Game state: entities, levels, powerups, and the top-level `GameState`

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyState};
use super::particles::ParticleEmitter;
use crate::consts::{
    BALL_RADIUS, INITIAL_BALL_VELOCITY, PARTICLE_POOL_SIZE, PLAYER_SIZE, POWERUP_SIZE,
    POWERUP_SPAWN_CHANCE, POWERUP_VELOCITY,
};
use crate::resources::{Resources, TextureHandle};

/// One tile of the level grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub body: Body,
    pub color: Vec3,
    pub texture: TextureHandle,
    /// Solid bricks absorb hits without breaking
    pub is_solid: bool,
    pub is_destroyed: bool,
}

/// The player paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub body: Body,
    pub color: Vec3,
    pub texture: TextureHandle,
}

/// The ball and its powerup-driven modifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: Body,
    pub radius: f32,
    pub color: Vec3,
    pub texture: TextureHandle,
    /// Resting on the paddle, waiting for launch
    pub is_stuck: bool,
    /// Re-sticks to the paddle on contact
    pub is_sticky: bool,
    /// Passes through breakable bricks without reflecting
    pub is_pass_through: bool,
}

impl Ball {
    /// Center of the ball; `body.position` is the top-left of its quad
    pub fn center(&self) -> Vec2 {
        self.body.current.position + self.radius
    }
}

/// The four powerup kinds dropped by destroyed bricks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Speed,
    Sticky,
    PassThrough,
    PaddleGrow,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 4] = [
        PowerupKind::Speed,
        PowerupKind::Sticky,
        PowerupKind::PassThrough,
        PowerupKind::PaddleGrow,
    ];

    /// Active duration in seconds; zero means the effect applies instantly
    /// and never reverts
    pub fn duration(self) -> f32 {
        match self {
            PowerupKind::Speed => 0.0,
            PowerupKind::Sticky => 20.0,
            PowerupKind::PassThrough => 10.0,
            PowerupKind::PaddleGrow => 0.0,
        }
    }

    pub fn tint(self) -> Vec3 {
        match self {
            PowerupKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerupKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerupKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerupKind::PaddleGrow => Vec3::new(1.0, 0.6, 0.4),
        }
    }

    /// Texture registry key for this kind's drop sprite
    pub fn texture_key(self) -> &'static str {
        match self {
            PowerupKind::Speed => "speed",
            PowerupKind::Sticky => "sticky",
            PowerupKind::PassThrough => "passthrough",
            PowerupKind::PaddleGrow => "size-increase",
        }
    }
}

/// A falling powerup drop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub body: Body,
    pub kind: PowerupKind,
    /// Remaining active time once caught
    pub duration: f32,
    pub is_activated: bool,
    pub is_destroyed: bool,
    pub color: Vec3,
    pub texture: TextureHandle,
}

impl Powerup {
    pub fn spawn(kind: PowerupKind, position: Vec2, texture: TextureHandle) -> Self {
        Self {
            body: Body::from_state(BodyState {
                position,
                velocity: POWERUP_VELOCITY,
                size: POWERUP_SIZE,
                ..Default::default()
            }),
            kind,
            duration: kind.duration(),
            is_activated: false,
            is_destroyed: false,
            color: kind.tint(),
            texture,
        }
    }
}

/// A parsed level: a named set of bricks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub bricks: Vec<Brick>,
    /// Set once when the last breakable brick falls
    pub completed: bool,
}

impl Level {
    /// Cleared when every non-solid brick is destroyed
    ///
    /// A level with no breakable bricks at all can never clear.
    pub fn is_cleared(&self) -> bool {
        self.bricks.iter().any(|b| !b.is_solid)
            && self
                .bricks
                .iter()
                .filter(|b| !b.is_solid)
                .all(|b| b.is_destroyed)
    }
}

/// Event emitted by the simulation for the outer shell (audio, scoring, UI)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BrickDestroyed,
    SolidBrickHit,
    PaddleHit,
    WallBounce,
    PowerupSpawned(PowerupKind),
    PowerupCaught(PowerupKind),
    PowerupExpired(PowerupKind),
    BallLost,
    LevelCleared,
}

/// Complete simulation state; everything the tick function reads or writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Playfield size in world units
    pub width: f32,
    pub height: f32,
    pub seed: u64,
    pub rng: Pcg32,
    pub level: Level,
    /// Pristine copy of the level for round resets
    pub initial_level: Level,
    pub paddle: Paddle,
    pub ball: Ball,
    pub powerups: Vec<Powerup>,
    pub particles: ParticleEmitter,
    pub particle_texture: TextureHandle,
    /// Drop textures indexed by `PowerupKind as usize`
    pub powerup_textures: [TextureHandle; 4],
    /// Per-kind spawn probability on brick destruction
    pub powerup_chance: f32,
    /// Remaining screen-shake time
    pub shake_time: f32,
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(width: f32, height: f32, level: Level, seed: u64, resources: &Resources) -> Self {
        let mut powerup_textures = [TextureHandle::default(); 4];
        for kind in PowerupKind::ALL {
            powerup_textures[kind as usize] =
                resources.texture(kind.texture_key()).unwrap_or_default();
        }

        let mut state = Self {
            width,
            height,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            initial_level: level.clone(),
            level,
            paddle: Paddle {
                body: Body::default(),
                color: Vec3::ONE,
                texture: resources.texture("paddle").unwrap_or_default(),
            },
            ball: Ball {
                body: Body::default(),
                radius: BALL_RADIUS,
                color: Vec3::ONE,
                texture: resources.texture("ball").unwrap_or_default(),
                is_stuck: true,
                is_sticky: false,
                is_pass_through: false,
            },
            powerups: Vec::new(),
            particles: ParticleEmitter::new(PARTICLE_POOL_SIZE),
            particle_texture: resources.texture("particle").unwrap_or_default(),
            powerup_textures,
            powerup_chance: POWERUP_SPAWN_CHANCE,
            shake_time: 0.0,
            time_ticks: 0,
        };

        state.reset_paddle();
        state.reset_ball();
        state
    }

    pub fn powerup_texture(&self, kind: PowerupKind) -> TextureHandle {
        self.powerup_textures[kind as usize]
    }

    /// Center the paddle at the bottom edge and restore its default size
    pub fn reset_paddle(&mut self) {
        self.paddle.body.current = BodyState {
            position: Vec2::new(
                self.width / 2.0 - PLAYER_SIZE.x / 2.0,
                self.height - PLAYER_SIZE.y,
            ),
            size: PLAYER_SIZE,
            ..Default::default()
        };
        self.paddle.body.previous = self.paddle.body.current;
        self.paddle.color = Vec3::ONE;
    }

    /// Park the ball on the paddle with its launch velocity staged
    pub fn reset_ball(&mut self) {
        let paddle = &self.paddle.body.current;
        self.ball.body.current = BodyState {
            position: paddle.position
                + Vec2::new(
                    paddle.size.x / 2.0 - self.ball.radius,
                    -self.ball.radius * 2.0,
                ),
            velocity: INITIAL_BALL_VELOCITY,
            size: Vec2::splat(self.ball.radius * 2.0),
            ..Default::default()
        };
        self.ball.body.previous = self.ball.body.current;
        self.ball.color = Vec3::ONE;
        self.ball.is_stuck = true;
        self.ball.is_sticky = false;
        self.ball.is_pass_through = false;
    }

    /// Full round reset after the ball falls out: paddle, ball, drops,
    /// particles, and the level itself
    pub fn reset_round(&mut self) {
        self.reset_paddle();
        self.reset_ball();
        self.powerups.clear();
        self.particles.reset();
        self.level = self.initial_level.clone();
    }
}
