//! Splash particles
//!
//! Each particle is a plain value integrated by the frame clock. Coordinates
//! are percent of the splash container: x from the left edge, y down from the
//! rim. Velocities are in px/s and scaled into that space by `POSITION_SCALE`.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::SessionState;
use crate::tuning::Tuning;

/// Droplet diameter range (px)
pub const SIZE_MIN: f32 = 8.0;
pub const SIZE_RANGE: f32 = 12.0;
/// Spawn band across the rim (%)
pub const SPAWN_X_MIN: f32 = 20.0;
pub const SPAWN_X_RANGE: f32 = 60.0;
/// Spawn band around the rim, slightly above it (%)
pub const SPAWN_Y_MIN: f32 = -5.0;
pub const SPAWN_Y_RANGE: f32 = 10.0;
/// Launch cone, centred on horizontal (radians)
pub const LAUNCH_CONE: f32 = PI * 0.6;
/// Launch speed range (px/s)
pub const SPEED_MIN: f32 = 80.0;
pub const SPEED_RANGE: f32 = 120.0;
/// Upward kick added to every launch (px/s)
pub const LAUNCH_LIFT: f32 = 60.0;
/// Downward acceleration (px/s²)
pub const GRAVITY: f32 = 220.0;
/// px → % of container
pub const POSITION_SCALE: f32 = 0.1;
/// Opacity lost per second
pub const FADE_RATE: f32 = 1.8;
/// Scale gained per second
pub const GROWTH_RATE: f32 = 0.3;
/// Spin rate range, centred on 0 (°/s)
pub const SPIN_RANGE: f32 = 720.0;
/// Particles below this y (%) have left the container
pub const VISIBLE_BOTTOM: f32 = 100.0;

/// Blue-ish HSL tint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Tint {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            hue: 200.0 + rng.random::<f32>() * 20.0,
            saturation: 80.0 + rng.random::<f32>() * 20.0,
            lightness: 60.0 + rng.random::<f32>() * 20.0,
        }
    }

    /// Radial gradient, brighter in the middle
    pub fn css_gradient(&self) -> String {
        format!(
            "radial-gradient(circle, hsla({:.0}, {:.0}%, {:.0}%, 0.95) 0%, hsla({:.0}, {:.0}%, {:.0}%, 0.8) 100%)",
            self.hue,
            self.saturation,
            self.lightness + 20.0,
            self.hue,
            self.saturation,
            self.lightness
        )
    }
}

/// A single droplet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    /// Position (% of container)
    pub pos: Vec2,
    /// Velocity (px/s, +y is down)
    pub vel: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Degrees per second
    pub rotation_rate: f32,
    /// 1 at spawn, fades to 0
    pub opacity: f32,
    /// 1 at spawn, grows
    pub scale: f32,
    /// Diameter (px)
    pub size: f32,
    pub tint: Tint,
}

impl Particle {
    /// Launch a droplet from just above the rim
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let size = SIZE_MIN + rng.random::<f32>() * SIZE_RANGE;
        let x = SPAWN_X_MIN + rng.random::<f32>() * SPAWN_X_RANGE;
        let y = SPAWN_Y_MIN + rng.random::<f32>() * SPAWN_Y_RANGE;
        let tint = Tint::random(rng);

        let angle = rng.random::<f32>() * LAUNCH_CONE - LAUNCH_CONE / 2.0;
        let speed = SPEED_MIN + rng.random::<f32>() * SPEED_RANGE;
        let vel = Vec2::new(angle.cos() * speed, angle.sin() * speed - LAUNCH_LIFT);

        let rotation = rng.random::<f32>() * 360.0;
        let rotation_rate = (rng.random::<f32>() - 0.5) * SPIN_RANGE;

        Self {
            pos: Vec2::new(x, y),
            vel,
            rotation,
            rotation_rate,
            opacity: 1.0,
            scale: 1.0,
            size,
            tint,
        }
    }

    /// Integrate one frame
    pub fn step(&mut self, dt: f32) {
        self.vel.y += GRAVITY * dt;
        self.pos += self.vel * dt * POSITION_SCALE;
        self.opacity -= FADE_RATE * dt;
        self.rotation += self.rotation_rate * dt;
        self.scale += GROWTH_RATE * dt;
    }

    pub fn is_alive(&self) -> bool {
        self.opacity > 0.0 && self.pos.y < VISIBLE_BOTTOM
    }
}

/// Number of droplets in one burst: `min + floor(r * extra)`
pub fn burst_size(rng: &mut impl Rng, tuning: &Tuning) -> usize {
    let extra = (rng.random::<f32>() * tuning.splash_extra_particles as f32).floor() as u32;
    (tuning.splash_min_particles + extra.min(tuning.splash_extra_particles.saturating_sub(1)))
        as usize
}

/// Push `count` droplets, evicting the oldest once `cap` is reached
pub fn spawn_burst(particles: &mut Vec<Particle>, rng: &mut impl Rng, count: usize, cap: usize) {
    if cap == 0 {
        return;
    }
    for _ in 0..count {
        if particles.len() >= cap {
            particles.remove(0);
        }
        particles.push(Particle::spawn(rng));
    }
}

/// Step every particle and drop the finished ones
pub fn advance_particles(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.step(dt);
    }
    particles.retain(Particle::is_alive);
}

/// Roll for a splash burst. Returns the number of droplets spawned.
pub fn maybe_splash(state: &mut SessionState) -> usize {
    if state.particle_cap == 0 || state.rng.random::<f32>() >= state.tuning.splash_chance {
        return 0;
    }
    let count = burst_size(&mut state.rng, &state.tuning);
    spawn_burst(&mut state.particles, &mut state.rng, count, state.particle_cap);
    log::trace!("Splash: {} droplets", count);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng);
            assert!((8.0..=20.0).contains(&p.size));
            assert!((20.0..=80.0).contains(&p.pos.x));
            assert!((-5.0..=5.0).contains(&p.pos.y));
            assert!((200.0..=220.0).contains(&p.tint.hue));
            assert!((-360.0..=360.0).contains(&p.rotation_rate));
            assert_eq!(p.opacity, 1.0);
            assert_eq!(p.scale, 1.0);

            // Launch stays within the cone, with the upward kick on top
            let undo_lift = Vec2::new(p.vel.x, p.vel.y + LAUNCH_LIFT);
            let speed = undo_lift.length();
            assert!((79.9..200.1).contains(&speed));
            assert!(undo_lift.x > 0.0);
            assert!(undo_lift.y.atan2(undo_lift.x).abs() <= LAUNCH_CONE / 2.0 + 1e-4);
        }
    }

    #[test]
    fn test_burst_size_range() {
        let mut rng = Pcg32::seed_from_u64(9);
        let tuning = Tuning::default();
        let mut seen = [false; 10];
        for _ in 0..2000 {
            let n = burst_size(&mut rng, &tuning);
            assert!((5..=9).contains(&n));
            seen[n] = true;
        }
        assert!(seen[5..=9].iter().all(|s| *s));
    }

    #[test]
    fn test_step_kinematics() {
        let mut p = Particle {
            pos: Vec2::new(50.0, 0.0),
            vel: Vec2::new(100.0, -60.0),
            rotation: 10.0,
            rotation_rate: 90.0,
            opacity: 1.0,
            scale: 1.0,
            size: 10.0,
            tint: Tint {
                hue: 210.0,
                saturation: 90.0,
                lightness: 70.0,
            },
        };
        p.step(0.1);
        // Gravity applies before the position update
        assert!((p.vel.y - (-38.0)).abs() < 1e-4);
        assert!((p.pos.x - 51.0).abs() < 1e-4);
        assert!((p.pos.y - (-0.38)).abs() < 1e-4);
        assert!((p.opacity - 0.82).abs() < 1e-5);
        assert!((p.rotation - 19.0).abs() < 1e-4);
        assert!((p.scale - 1.03).abs() < 1e-5);
        assert!(p.is_alive());
    }

    #[test]
    fn test_particles_fade_out() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, 9, 100);
        assert_eq!(particles.len(), 9);

        // Opacity hits 0 after 1/1.8 s
        for _ in 0..40 {
            advance_particles(&mut particles, 1.0 / 60.0);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_leaving_container_kills() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = Particle::spawn(&mut rng);
        p.pos.y = 100.0;
        assert!(!p.is_alive());
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, 4, 6);
        let survivor = particles[2].pos;
        spawn_burst(&mut particles, &mut rng, 4, 6);
        assert_eq!(particles.len(), 6);
        assert_eq!(particles[0].pos, survivor);
    }

    #[test]
    fn test_zero_cap_spawns_nothing() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, 9, 0);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_tint_css() {
        let tint = Tint {
            hue: 210.0,
            saturation: 90.0,
            lightness: 65.0,
        };
        assert_eq!(
            tint.css_gradient(),
            "radial-gradient(circle, hsla(210, 90%, 85%, 0.95) 0%, hsla(210, 90%, 65%, 0.8) 100%)"
        );
    }
}
