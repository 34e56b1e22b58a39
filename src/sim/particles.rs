//! Fixed-capacity particle pool for the ball trail
//!
//! Slots are recycled in place with a roaming cursor: scan forward from the
//! last reused slot, wrap to the front, and fall back to slot 0 under full
//! pressure. The pool never grows past its configured capacity.

use glam::{Vec2, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::BodyState;
use crate::consts::PARTICLE_FADE_RATE;

/// A single short-lived trail particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Vec4,
    /// Remaining life in seconds; dead when <= 0
    pub life: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            color: Vec4::ONE,
            life: 0.0,
        }
    }
}

impl Particle {
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Fixed-capacity pool of trail particles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleEmitter {
    particles: Vec<Particle>,
    capacity: usize,
    last_used: usize,
}

impl ParticleEmitter {
    /// Pre-populate `capacity` dead slots
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::default(); capacity],
            capacity,
            last_used: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Find a dead slot: forward from the cursor, then from the front,
    /// else force slot 0
    fn find_unused(&mut self) -> usize {
        for i in self.last_used..self.capacity {
            if self.particles[i].is_dead() {
                self.last_used = i;
                return i;
            }
        }

        for i in 0..self.last_used {
            if self.particles[i].is_dead() {
                self.last_used = i;
                return i;
            }
        }

        self.last_used = 0;
        0
    }

    /// Revive one slot with a jittered pose near the anchor body
    fn respawn(&mut self, slot: usize, anchor: &BodyState, offset: Vec2, rng: &mut impl Rng) {
        let jitter = (rng.random_range(0..=100) as f32 - 50.0) / 10.0;
        let tint = 0.5 + rng.random_range(0..=100) as f32 / 100.0;

        let particle = &mut self.particles[slot];
        particle.position = anchor.position + jitter + offset;
        particle.color = Vec4::new(tint, tint, tint, 1.0);
        particle.life = 1.0;
        particle.velocity = anchor.velocity * 0.1;
    }

    /// Spawn `new_particles` around the anchor, then age the whole pool:
    /// live particles trail backward along their velocity and fade out
    pub fn update(
        &mut self,
        dt: f32,
        anchor: &BodyState,
        new_particles: usize,
        offset: Vec2,
        rng: &mut impl Rng,
    ) {
        for _ in 0..new_particles {
            let slot = self.find_unused();
            self.respawn(slot, anchor, offset, rng);
        }

        for particle in &mut self.particles {
            particle.life -= dt;
            if particle.life > 0.0 {
                particle.position -= particle.velocity * dt;
                particle.color.w -= dt * PARTICLE_FADE_RATE;
            }
        }
    }

    /// Clear and refill with dead slots; used when the round restarts
    pub fn reset(&mut self) {
        self.particles.clear();
        self.particles.resize(self.capacity, Particle::default());
        self.last_used = 0;
    }
}
