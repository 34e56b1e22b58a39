//! Per-frame draw-command list
//!
//! The simulation never draws; `draw_list` flattens the interpolated game
//! state into textured-quad commands in back-to-front order for whatever
//! backend consumes them.

use glam::{Vec2, Vec3, Vec4};

use crate::consts::PARTICLE_SIZE;
use crate::resources::TextureHandle;
use crate::sim::{GameState, interpolate};

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureHandle,
    /// Top-left corner in world units
    pub position: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub color: Vec4,
}

/// Everything the backend needs to present one frame
#[derive(Debug, Clone, Default)]
pub struct FrameDraw {
    pub commands: Vec<DrawCommand>,
    /// Apply a screen-shake offset this frame
    pub shake: bool,
}

fn opaque(color: Vec3) -> Vec4 {
    color.extend(1.0)
}

/// Flatten the game state at blend factor `alpha` into draw commands
///
/// Order is bricks, paddle, drops, particles, then the ball on top.
pub fn draw_list(state: &GameState, alpha: f32) -> FrameDraw {
    let mut commands = Vec::new();

    for brick in &state.level.bricks {
        if brick.is_destroyed {
            continue;
        }
        let body = interpolate(&brick.body, alpha);
        commands.push(DrawCommand {
            texture: brick.texture,
            position: body.position,
            size: body.size,
            rotation: body.rotation,
            color: opaque(brick.color),
        });
    }

    let paddle = interpolate(&state.paddle.body, alpha);
    commands.push(DrawCommand {
        texture: state.paddle.texture,
        position: paddle.position,
        size: paddle.size,
        rotation: paddle.rotation,
        color: opaque(state.paddle.color),
    });

    for powerup in &state.powerups {
        if powerup.is_destroyed {
            continue;
        }
        let body = interpolate(&powerup.body, alpha);
        commands.push(DrawCommand {
            texture: powerup.texture,
            position: body.position,
            size: body.size,
            rotation: body.rotation,
            color: opaque(powerup.color),
        });
    }

    for particle in state.particles.iter() {
        if particle.is_dead() {
            continue;
        }
        commands.push(DrawCommand {
            texture: state.particle_texture,
            position: particle.position,
            size: Vec2::splat(PARTICLE_SIZE),
            rotation: 0.0,
            color: particle.color,
        });
    }

    let ball = interpolate(&state.ball.body, alpha);
    commands.push(DrawCommand {
        texture: state.ball.texture,
        position: ball.position,
        size: ball.size,
        rotation: ball.rotation,
        color: opaque(state.ball.color),
    });

    FrameDraw {
        commands,
        shake: state.shake_time > 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SHAKE_DURATION;
    use crate::resources::Resources;
    use crate::sim::{Level, Powerup, PowerupKind};

    fn test_state() -> GameState {
        let level = Level {
            name: "test".into(),
            bricks: Vec::new(),
            completed: false,
        };
        GameState::new(800.0, 600.0, level, 1, &Resources::with_defaults())
    }

    #[test]
    fn test_ball_is_drawn_last() {
        let state = test_state();
        let frame = draw_list(&state, 0.0);

        // Empty level: paddle then ball
        assert_eq!(frame.commands.len(), 2);
        assert_eq!(frame.commands[0].texture, state.paddle.texture);
        assert_eq!(frame.commands[1].texture, state.ball.texture);
    }

    #[test]
    fn test_destroyed_entities_are_skipped() {
        let mut state = test_state();
        let mut caught = Powerup::spawn(PowerupKind::Speed, Vec2::ZERO, Default::default());
        caught.is_destroyed = true;
        state.powerups.push(caught);
        state.powerups.push(Powerup::spawn(
            PowerupKind::Sticky,
            Vec2::ZERO,
            Default::default(),
        ));

        let frame = draw_list(&state, 0.0);
        // Paddle, one live drop, ball
        assert_eq!(frame.commands.len(), 3);
    }

    #[test]
    fn test_alpha_blends_positions() {
        let mut state = test_state();
        state.ball.body.snapshot();
        state.ball.body.current.position += Vec2::new(10.0, 0.0);

        let at_prev = draw_list(&state, 0.0);
        let at_mid = draw_list(&state, 0.5);

        let prev_ball = at_prev.commands.last().copied();
        let mid_ball = at_mid.commands.last().copied();
        match (prev_ball, mid_ball) {
            (Some(prev), Some(mid)) => assert_eq!(mid.position.x, prev.position.x + 5.0),
            _ => panic!("missing ball command"),
        }
    }

    #[test]
    fn test_shake_flag_follows_timer() {
        let mut state = test_state();
        assert!(!draw_list(&state, 0.0).shake);

        state.shake_time = SHAKE_DURATION;
        assert!(draw_list(&state, 0.0).shake);
    }
}
