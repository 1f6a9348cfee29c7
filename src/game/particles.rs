//! Food-burst particles
//!
//! Particles live in logical pixel space and are stepped from the simulation
//! tick, not the render frame, so their decay rate follows game speed.

use macroquad::prelude::Color;

use crate::config::{PARTICLE_DECAY, PARTICLE_SPREAD, PARTICLES_PER_BURST};

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining life in (0, 1]; drives render alpha and radius
    pub life: f32,
    pub color: Color,
}

/// Spawn one burst at a pixel position, velocities drawn uniformly from a
/// symmetric range
pub fn spawn_burst(particles: &mut Vec<Particle>, x: f32, y: f32, color: Color) {
    for _ in 0..PARTICLES_PER_BURST {
        particles.push(Particle {
            x,
            y,
            vx: macroquad::rand::gen_range(-PARTICLE_SPREAD, PARTICLE_SPREAD),
            vy: macroquad::rand::gen_range(-PARTICLE_SPREAD, PARTICLE_SPREAD),
            life: 1.0,
            color,
        });
    }
}

/// Advance all particles one tick and drop the expired ones
pub fn advance(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| {
        p.x += p.vx;
        p.y += p.vy;
        p.life -= PARTICLE_DECAY;
        p.life > 0.0
    });
}
