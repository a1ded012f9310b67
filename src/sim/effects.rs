//! Collision particle effects
//!
//! Purely visual; nothing here feeds back into ball physics.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{CollisionEffect, Particle};
use crate::consts::*;

/// Fewest particles in a burst (zero intensity)
pub const MIN_BURST: usize = 8;
/// Extra particles added at full intensity
pub const BURST_RANGE: usize = 12;

/// Number of particles for an impact of the given intensity (0-1)
pub fn burst_size(intensity: f32) -> usize {
    let intensity = intensity.clamp(0.0, 1.0);
    MIN_BURST + (intensity * BURST_RANGE as f32).floor() as usize
}

/// Build a burst of particles scattered around `origin`
pub fn spawn_effect(origin: Vec2, intensity: f32, rng: &mut Pcg32) -> CollisionEffect {
    let intensity = intensity.clamp(0.0, 1.0);
    let count = burst_size(intensity);
    let particles = (0..count)
        .map(|_| {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(1.0..4.0) * (0.5 + intensity);
            Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                size: rng.random_range(1.5..4.0),
            }
        })
        .collect();

    CollisionEffect {
        origin,
        particles,
        life: 1.0,
    }
}

/// Add a burst to the active set, evicting the oldest when at capacity
pub fn emit(
    effects: &mut Vec<CollisionEffect>,
    max_effects: usize,
    origin: Vec2,
    intensity: f32,
    rng: &mut Pcg32,
) {
    if max_effects == 0 {
        return;
    }
    while effects.len() >= max_effects {
        effects.remove(0);
    }
    effects.push(spawn_effect(origin, intensity, rng));
}

/// Age every effect and its particles by `dt` nominal frames
///
/// Particles are not pruned individually; they stop drawing once dead and
/// disappear with their owning effect.
pub fn decay_effects(effects: &mut Vec<CollisionEffect>, dt: f32) {
    for effect in effects.iter_mut() {
        effect.life -= EFFECT_DECAY * dt;
        for particle in effect.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.vel *= PARTICLE_DAMPING;
            particle.life -= PARTICLE_DECAY * dt;
        }
    }
    effects.retain(|e| e.life > LIFE_EPSILON);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_burst_size_range() {
        assert_eq!(burst_size(0.0), 8);
        assert_eq!(burst_size(0.3), 11);
        assert_eq!(burst_size(1.0), 20);
        assert_eq!(burst_size(5.0), 20);
        assert_eq!(burst_size(-1.0), 8);
    }

    #[test]
    fn test_spawn_effect_starts_fresh() {
        let mut rng = Pcg32::seed_from_u64(1);
        let effect = spawn_effect(Vec2::new(10.0, 20.0), 0.5, &mut rng);
        assert_eq!(effect.life, 1.0);
        assert_eq!(effect.particles.len(), 14);
        for p in &effect.particles {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.life, 1.0);
            assert!(p.size >= 1.5 && p.size < 4.0);
        }
    }

    #[test]
    fn test_emit_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut effects = Vec::new();
        for i in 0..5 {
            emit(&mut effects, 3, Vec2::new(i as f32, 0.0), 0.0, &mut rng);
        }
        assert_eq!(effects.len(), 3);
        // Oldest evicted first
        assert_eq!(effects[0].origin, Vec2::new(2.0, 0.0));

        emit(&mut effects, 0, Vec2::ZERO, 1.0, &mut rng);
        assert_eq!(effects.len(), 3);
    }

    #[test]
    fn test_effect_removed_by_frame_fifty() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut effects = vec![spawn_effect(Vec2::ZERO, 1.0, &mut rng)];
        for _ in 0..49 {
            decay_effects(&mut effects, 1.0);
        }
        assert_eq!(effects.len(), 1);
        decay_effects(&mut effects, 1.0);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_particles_outlive_their_life_until_effect_expires() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut effects = vec![spawn_effect(Vec2::ZERO, 0.0, &mut rng)];
        // Particles die after ~34 frames, the effect after 50
        for _ in 0..40 {
            decay_effects(&mut effects, 1.0);
        }
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].particles.len(), 8);
        assert!(effects[0].particles.iter().all(|p| !p.is_alive()));
    }

    #[test]
    fn test_particles_move_and_slow() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut effects = vec![spawn_effect(Vec2::ZERO, 1.0, &mut rng)];
        let v0 = effects[0].particles[0].vel;
        decay_effects(&mut effects, 1.0);
        let p = &effects[0].particles[0];
        assert!((p.pos - v0).length() < 1e-5);
        assert!((p.vel - v0 * PARTICLE_DAMPING).length() < 1e-5);
    }
}
