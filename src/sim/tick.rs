//! Fixed-timestep simulation tick
//!
//! `tick` advances the whole game by one `SIM_DT` step and returns the
//! events that occurred, in the order they occurred. The caller owns the
//! frame loop; `FrameClock` converts wall-clock frame times into a step
//! count plus a render blend factor.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::body::integrate;
use super::collision::{Side, circle_rect_overlap, rect_overlap};
use super::state::{GameEvent, GameState, Powerup, PowerupKind};
use crate::consts::{
    INITIAL_BALL_VELOCITY, MAX_FRAME_DT, MAX_SUBSTEPS, PADDLE_BOUNCE_STRENGTH, PADDLE_GROW_AMOUNT,
    PLAYER_VELOCITY, SHAKE_DURATION, SIM_DT, SPEED_BOOST,
};

/// Player input sampled for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub launch: bool,
}

/// Advance the simulation by one fixed step
pub fn tick(state: &mut GameState, input: TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    move_paddle(state, input, dt);
    if input.launch {
        state.ball.is_stuck = false;
    }
    move_ball(state, dt, &mut events);
    resolve_collisions(state, &mut events);
    update_particles(state, dt);
    update_powerups(state, dt, &mut events);

    if state.ball.body.current.position.y >= state.height {
        events.push(GameEvent::BallLost);
        state.reset_round();
    }

    if !state.level.completed && state.level.is_cleared() {
        state.level.completed = true;
        events.push(GameEvent::LevelCleared);
    }

    state.shake_time = (state.shake_time - dt).max(0.0);
    events
}

/// Slide the paddle within the playfield; a stuck ball rides along
fn move_paddle(state: &mut GameState, input: TickInput, dt: f32) {
    state.paddle.body.snapshot();
    state.ball.body.snapshot();

    let amount = PLAYER_VELOCITY * dt;
    let paddle = &mut state.paddle.body.current;

    if input.move_left && paddle.position.x >= 0.0 {
        paddle.position.x -= amount;
        if state.ball.is_stuck {
            state.ball.body.current.position.x -= amount;
        }
    }
    if input.move_right && paddle.position.x <= state.width - paddle.size.x {
        paddle.position.x += amount;
        if state.ball.is_stuck {
            state.ball.body.current.position.x += amount;
        }
    }
}

/// Integrate the ball and reflect it off the side and top walls
fn move_ball(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    if state.ball.is_stuck {
        return;
    }

    let ball = &mut state.ball.body.current;
    integrate(ball, dt);

    if ball.position.x <= 0.0 {
        ball.velocity.x = -ball.velocity.x;
        ball.position.x = 0.0;
        events.push(GameEvent::WallBounce);
    } else if ball.position.x + ball.size.x >= state.width {
        ball.velocity.x = -ball.velocity.x;
        ball.position.x = state.width - ball.size.x;
        events.push(GameEvent::WallBounce);
    }
    if ball.position.y <= 0.0 {
        ball.velocity.y = -ball.velocity.y;
        ball.position.y = 0.0;
        events.push(GameEvent::WallBounce);
    }
}

/// Ball vs bricks, ball vs paddle, and falling drops vs paddle
fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut spawn_sites: Vec<Vec2> = Vec::new();

    if !state.ball.is_stuck {
        for brick in &mut state.level.bricks {
            if brick.is_destroyed {
                continue;
            }
            let contact =
                circle_rect_overlap(state.ball.center(), state.ball.radius, &brick.body.current);
            if !contact.overlapped {
                continue;
            }

            if brick.is_solid {
                state.shake_time = SHAKE_DURATION;
                events.push(GameEvent::SolidBrickHit);
            } else {
                brick.is_destroyed = true;
                spawn_sites.push(brick.body.current.position);
                events.push(GameEvent::BrickDestroyed);
            }

            // A pass-through ball plows through breakables without reflecting
            if brick.is_solid || !state.ball.is_pass_through {
                let ball = &mut state.ball;
                match contact.side {
                    Side::Left | Side::Right => {
                        ball.body.current.velocity.x = -ball.body.current.velocity.x;
                        let depth = ball.radius - contact.penetration.x.abs();
                        if contact.side == Side::Left {
                            ball.body.current.position.x += depth;
                        } else {
                            ball.body.current.position.x -= depth;
                        }
                    }
                    Side::Up | Side::Down => {
                        ball.body.current.velocity.y = -ball.body.current.velocity.y;
                        let depth = ball.radius - contact.penetration.y.abs();
                        if contact.side == Side::Up {
                            ball.body.current.position.y -= depth;
                        } else {
                            ball.body.current.position.y += depth;
                        }
                    }
                }
            }
        }

        for site in spawn_sites {
            spawn_powerups(state, site, events);
        }

        let contact = circle_rect_overlap(
            state.ball.center(),
            state.ball.radius,
            &state.paddle.body.current,
        );
        if contact.overlapped {
            let paddle = state.paddle.body.current;
            let paddle_center = paddle.position.x + paddle.size.x / 2.0;
            let distance = state.ball.center().x - paddle_center;
            let percentage = distance / (paddle.size.x / 2.0);

            // Steer by hit offset, keep the speed, always send the ball up
            let ball = &mut state.ball;
            let old_velocity = ball.body.current.velocity;
            ball.body.current.velocity.x =
                INITIAL_BALL_VELOCITY.x * percentage * PADDLE_BOUNCE_STRENGTH;
            ball.body.current.velocity =
                ball.body.current.velocity.normalize_or_zero() * old_velocity.length();
            ball.body.current.velocity.y = -ball.body.current.velocity.y.abs();
            ball.is_stuck = ball.is_sticky;
            events.push(GameEvent::PaddleHit);
        }
    }

    let mut caught: Vec<usize> = Vec::new();
    for (i, powerup) in state.powerups.iter_mut().enumerate() {
        if powerup.is_destroyed {
            continue;
        }
        if powerup.body.current.position.y > state.height {
            powerup.is_destroyed = true;
            continue;
        }
        if rect_overlap(&powerup.body.current, &state.paddle.body.current) {
            caught.push(i);
        }
    }
    for i in caught {
        let kind = state.powerups[i].kind;
        state.powerups[i].is_activated = true;
        state.powerups[i].is_destroyed = true;
        activate_powerup(state, kind);
        events.push(GameEvent::PowerupCaught(kind));
    }
}

/// Roll every powerup kind independently at a destroyed brick's position
fn spawn_powerups(state: &mut GameState, position: Vec2, events: &mut Vec<GameEvent>) {
    for kind in PowerupKind::ALL {
        if state.rng.random::<f32>() < state.powerup_chance {
            let texture = state.powerup_texture(kind);
            state.powerups.push(Powerup::spawn(kind, position, texture));
            events.push(GameEvent::PowerupSpawned(kind));
        }
    }
}

fn activate_powerup(state: &mut GameState, kind: PowerupKind) {
    match kind {
        PowerupKind::Speed => state.ball.body.current.velocity *= SPEED_BOOST,
        PowerupKind::Sticky => {
            state.ball.is_sticky = true;
            state.paddle.color = kind.tint();
        }
        PowerupKind::PassThrough => {
            state.ball.is_pass_through = true;
            state.ball.color = kind.tint();
        }
        // Width gain persists until the round resets
        PowerupKind::PaddleGrow => state.paddle.body.current.size.x += PADDLE_GROW_AMOUNT,
    }
}

fn same_kind_still_active(powerups: &[Powerup], kind: PowerupKind) -> bool {
    powerups.iter().any(|p| p.is_activated && p.kind == kind)
}

/// Revert a timed effect, unless another drop of the same kind is still
/// running its own clock
fn deactivate_powerup(state: &mut GameState, kind: PowerupKind) {
    if same_kind_still_active(&state.powerups, kind) {
        return;
    }
    match kind {
        PowerupKind::Sticky => {
            state.ball.is_sticky = false;
            state.paddle.color = Vec3::ONE;
        }
        PowerupKind::PassThrough => {
            state.ball.is_pass_through = false;
            state.ball.color = Vec3::ONE;
        }
        // Instant effects have nothing to revert
        PowerupKind::Speed | PowerupKind::PaddleGrow => {}
    }
}

/// Trail the ball with one particle per tick while it is in flight
fn update_particles(state: &mut GameState, dt: f32) {
    let spawn = if state.ball.is_stuck { 0 } else { 1 };
    let anchor = state.ball.body.current;
    let offset = Vec2::splat(state.ball.radius / 2.0);
    state
        .particles
        .update(dt, &anchor, spawn, offset, &mut state.rng);
}

/// Move drops, run active-effect countdowns, and garbage-collect
fn update_powerups(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let mut expired: Vec<PowerupKind> = Vec::new();

    for powerup in &mut state.powerups {
        powerup.body.snapshot();
        let velocity = powerup.body.current.velocity;
        powerup.body.current.position += velocity * dt;

        if powerup.is_activated {
            powerup.duration -= dt;
            if powerup.duration <= 0.0 {
                powerup.is_activated = false;
                expired.push(powerup.kind);
            }
        }
    }

    for kind in expired {
        deactivate_powerup(state, kind);
        events.push(GameEvent::PowerupExpired(kind));
    }

    // Keep drops that are still falling, and spent drops whose effect is
    // still counting down
    state.powerups.retain(|p| !(p.is_destroyed && !p.is_activated));
}

/// Accumulator that turns variable frame times into fixed simulation steps
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank a frame's elapsed time and return how many fixed steps to run
    ///
    /// Frame time is clamped to `MAX_FRAME_DT` so a long stall cannot queue
    /// an unbounded burst of steps; if the step cap is still hit, the excess
    /// backlog is shed.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Blend factor in `[0, 1]` for rendering between the last two ticks
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}
