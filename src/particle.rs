/*
 * Particle Module
 *
 * This module defines the Particle struct: a point with a fixed velocity,
 * radius and opacity, whose position drifts every frame and wraps around
 * the edges of the drawing surface.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::FieldConfig;
use crate::surface::Size;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, alpha: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            alpha,
        }
    }

    // Place a particle uniformly over the surface with randomized attributes
    pub fn random<R: Rng>(rng: &mut R, bounds: Size, config: &FieldConfig) -> Self {
        let x = rng.gen_range(0.0..=bounds.width.max(0.0));
        let y = rng.gen_range(0.0..=bounds.height.max(0.0));
        let vx = rng.gen_range(config.speed.as_range());
        let vy = rng.gen_range(config.speed.as_range());

        Self {
            position: vec2(x, y),
            velocity: vec2(vx, vy),
            radius: rng.gen_range(config.radius.as_range()),
            alpha: rng.gen_range(config.alpha.as_range()),
        }
    }

    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    // Hard wrap: leaving through one edge re-enters at the opposite one.
    // Each axis is handled on its own.
    pub fn wrap_edges(&mut self, bounds: Size) {
        if self.position.x < 0.0 {
            self.position.x = bounds.width;
        }
        if self.position.x > bounds.width {
            self.position.x = 0.0;
        }

        if self.position.y < 0.0 {
            self.position.y = bounds.height;
        }
        if self.position.y > bounds.height {
            self.position.y = 0.0;
        }
    }

    pub fn update(&mut self, bounds: Size) {
        self.advance();
        self.wrap_edges(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle_at(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle::new(vec2(x, y), vec2(vx, vy), 1.0, 0.5)
    }

    #[test]
    fn crossing_the_right_edge_wraps_to_zero() {
        let mut p = particle_at(799.9, 300.0, 0.3, 0.0);
        p.update(Size::new(800.0, 600.0));
        assert_eq!(p.position, vec2(0.0, 300.0));
    }

    #[test]
    fn crossing_the_left_and_top_edges_wraps_to_the_maximum() {
        let mut p = particle_at(0.1, 0.05, -0.15, -0.1);
        p.update(Size::new(800.0, 600.0));
        assert_eq!(p.position, vec2(800.0, 600.0));
    }

    #[test]
    fn interior_motion_is_plain_advance() {
        let mut p = particle_at(10.0, 20.0, 0.1, -0.1);
        p.update(Size::new(800.0, 600.0));
        assert!((p.position.x - 10.1).abs() < 1e-4);
        assert!((p.position.y - 19.9).abs() < 1e-4);
        assert_eq!(p.velocity, vec2(0.1, -0.1));
    }

    #[test]
    fn particles_outside_a_shrunk_surface_are_not_clamped_until_they_cross() {
        // Surface shrank after the particle was placed at x = 700
        let mut p = particle_at(700.0, 100.0, -0.1, 0.0);
        p.update(Size::new(400.0, 300.0));
        assert_eq!(p.position.x, 0.0);

        let mut q = particle_at(700.0, 100.0, 0.0, 0.0);
        q.wrap_edges(Size::new(800.0, 300.0));
        assert_eq!(q.position.x, 700.0);
    }

    #[test]
    fn random_particles_respect_configured_ranges() {
        let config = FieldConfig::default();
        let bounds = Size::new(640.0, 480.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let p = Particle::random(&mut rng, bounds, &config);
            assert!(config.radius.contains(p.radius));
            assert!(config.alpha.contains(p.alpha));
            assert!(config.speed.contains(p.velocity.x));
            assert!(config.speed.contains(p.velocity.y));
            assert!(p.position.x >= 0.0 && p.position.x <= bounds.width);
            assert!(p.position.y >= 0.0 && p.position.y <= bounds.height);
        }
    }
}
