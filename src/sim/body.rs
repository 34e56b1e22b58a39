//! Double-buffered body state and fixed-timestep integration
//!
//! Every moving entity owns a `Body`: a current and a previous snapshot of
//! its positional state. The previous snapshot is written once at the start
//! of a motion step, before `current` is mutated, so the renderer can
//! interpolate between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Positional state of a simulated entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub size: Vec2,
    /// Scalar acceleration factor; acceleration = velocity * factor
    pub acceleration: f32,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            size: Vec2::ONE,
            acceleration: 0.0,
        }
    }
}

/// Double-buffered body for render interpolation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub current: BodyState,
    pub previous: BodyState,
}

impl Body {
    pub fn from_state(state: BodyState) -> Self {
        Self {
            current: state,
            previous: state,
        }
    }

    /// Copy `current` into `previous`; call once at the start of a motion step
    pub fn snapshot(&mut self) {
        self.previous = self.current;
    }
}

/// Blend previous -> current state for rendering between ticks
pub fn interpolate(body: &Body, alpha: f32) -> BodyState {
    BodyState {
        position: body.previous.position.lerp(body.current.position, alpha),
        velocity: body.current.velocity,
        rotation: body.previous.rotation + (body.current.rotation - body.previous.rotation) * alpha,
        size: body.previous.size.lerp(body.current.size, alpha),
        acceleration: body.current.acceleration,
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Derivative {
    position: Vec2,
    velocity: Vec2,
}

fn accelerate(state: &BodyState) -> Vec2 {
    state.velocity * state.acceleration
}

fn evaluate_initial(state: &BodyState) -> Derivative {
    Derivative {
        position: state.velocity,
        velocity: accelerate(state),
    }
}

fn evaluate(initial: &BodyState, dt: f32, d: &Derivative) -> Derivative {
    let mut state = *initial;
    state.position += d.position * dt;
    state.velocity += d.velocity * dt;

    Derivative {
        position: state.velocity,
        velocity: accelerate(&state),
    }
}

/// Advance a body state by `dt` with the classic four-stage scheme:
/// derivative at the start state, two half-step refinements, one full-step
/// refinement, combined with weights 1, 2, 2, 1 scaled by 1/6
pub fn integrate(state: &mut BodyState, dt: f32) {
    let a = evaluate_initial(state);
    let b = evaluate(state, dt * 0.5, &a);
    let c = evaluate(state, dt * 0.5, &b);
    let d = evaluate(state, dt, &c);

    let dpos_dt = (a.position + 2.0 * (b.position + c.position) + d.position) / 6.0;
    let dvel_dt = (a.velocity + 2.0 * (b.velocity + c.velocity) + d.velocity) / 6.0;

    state.position += dpos_dt * dt;
    state.velocity += dvel_dt * dt;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving_state() -> BodyState {
        BodyState {
            position: Vec2::new(10.0, 20.0),
            velocity: Vec2::new(3.0, -7.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_integrate_deterministic() {
        let mut a = moving_state();
        let mut b = moving_state();

        for _ in 0..100 {
            integrate(&mut a, 0.01);
            integrate(&mut b, 0.01);
        }

        assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
        assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
        assert_eq!(a.velocity.x.to_bits(), b.velocity.x.to_bits());
        assert_eq!(a.velocity.y.to_bits(), b.velocity.y.to_bits());
    }

    #[test]
    fn test_integrate_constant_velocity() {
        let mut state = moving_state();
        integrate(&mut state, 0.5);

        // No acceleration: velocity is untouched, position advances by v * dt
        assert_eq!(state.velocity, Vec2::new(3.0, -7.0));
        assert!((state.position.x - 11.5).abs() < 1e-4);
        assert!((state.position.y - 16.5).abs() < 1e-4);
    }

    #[test]
    fn test_integrate_acceleration_factor() {
        let mut state = moving_state();
        state.acceleration = 0.5;

        let speed_before = state.velocity.length();
        integrate(&mut state, 0.1);

        // Positive factor scales velocity along its own direction
        assert!(state.velocity.length() > speed_before);
        assert!(state.velocity.x > 0.0 && state.velocity.y < 0.0);
    }

    #[test]
    fn test_snapshot_writes_previous() {
        let mut body = Body::from_state(moving_state());
        body.current.position = Vec2::new(99.0, 99.0);
        assert_ne!(body.previous.position, body.current.position);

        body.snapshot();
        assert_eq!(body.previous, body.current);
    }

    #[test]
    fn test_interpolate_endpoints() {
        let mut body = Body::from_state(moving_state());
        body.snapshot();
        body.current.position = Vec2::new(20.0, 30.0);

        let start = interpolate(&body, 0.0);
        let end = interpolate(&body, 1.0);
        let mid = interpolate(&body, 0.5);

        assert_eq!(start.position, Vec2::new(10.0, 20.0));
        assert_eq!(end.position, Vec2::new(20.0, 30.0));
        assert_eq!(mid.position, Vec2::new(15.0, 25.0));
    }
}
