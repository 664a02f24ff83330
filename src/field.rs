/*
 * Field Module
 *
 * This module defines the ParticleField: a fixed population of particles
 * and the per-frame routine that moves them and paints them, together with
 * the faint links drawn between every pair of particles closer than the
 * link distance.
 *
 * The link scan is a full pairwise pass by default. With `use_spatial_grid`
 * it only visits pairs in neighbouring grid cells, which yields the same
 * links in the same order.
 */

use nannou::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::palette::DisplayMode;
use crate::params::FieldConfig;
use crate::particle::Particle;
use crate::spatial_grid::SpatialGrid;
use crate::surface::{DrawingSurface, Size};

// A link between particles `a` and `b` (a < b)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub opacity: f32,
}

// What one rendered frame put on the surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub particles_drawn: usize,
    pub links_drawn: usize,
}

/// Opacity of a link: fades linearly from `max_opacity` at distance 0 to
/// nothing at `link_distance`, rounded to three decimals.
pub fn link_opacity(distance: f32, link_distance: f32, max_opacity: f32) -> f32 {
    let opacity = (1.0 - distance / link_distance) * max_opacity;
    (opacity * 1000.0).round() / 1000.0
}

pub struct ParticleField {
    particles: Vec<Particle>,
    config: FieldConfig,
    grid: Option<SpatialGrid>,
}

impl ParticleField {
    // Spread `config.particle_count` particles uniformly over the bounds
    pub fn seed<R: Rng>(rng: &mut R, bounds: Size, config: &FieldConfig) -> Self {
        let particles = (0..config.particle_count)
            .map(|_| Particle::random(rng, bounds, config))
            .collect();
        Self::from_particles(particles, config)
    }

    pub fn from_particles(particles: Vec<Particle>, config: &FieldConfig) -> Self {
        let grid = config
            .use_spatial_grid
            .then(|| SpatialGrid::new(config.link_distance, Size::new(config.link_distance, config.link_distance)));

        Self {
            particles,
            config: config.clone(),
            grid,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    // Advance every particle one step without drawing
    pub fn step(&mut self, bounds: Size) {
        for particle in &mut self.particles {
            particle.update(bounds);
        }
    }

    // Links between current positions, in (a, b) lexicographic order
    pub fn links(&mut self, bounds: Size) -> Vec<Link> {
        let link_distance = self.config.link_distance;
        let max_opacity = self.config.link_opacity;
        let positions: Vec<Vec2> = self.particles.iter().map(|p| p.position).collect();

        let link_for = |a: usize, b: usize| {
            let distance = positions[a].distance(positions[b]);
            (distance < link_distance).then(|| Link {
                a,
                b,
                distance,
                opacity: link_opacity(distance, link_distance, max_opacity),
            })
        };

        match self.grid.as_mut() {
            Some(grid) => grid
                .candidate_pairs(&positions, bounds)
                .into_iter()
                .filter_map(|(a, b)| link_for(a, b))
                .collect(),
            None => {
                let mut links = Vec::new();
                for a in 0..positions.len() {
                    for b in (a + 1)..positions.len() {
                        if let Some(link) = link_for(a, b) {
                            links.push(link);
                        }
                    }
                }
                links
            }
        }
    }

    /// Render one animation frame: clear, move and paint each particle, then
    /// paint the links between the moved positions.
    pub fn render<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        bounds: Size,
        mode: DisplayMode,
    ) -> FrameReport {
        surface.clear_rect(0.0, 0.0, bounds.width, bounds.height);

        let palette = self.config.palette;
        for particle in &mut self.particles {
            particle.update(bounds);

            surface.begin_path();
            surface.arc(particle.position, particle.radius, 0.0, TAU);
            surface.set_fill_color(palette.accent(mode, particle.alpha));
            surface.fill();
        }

        let links = self.links(bounds);
        for link in &links {
            surface.begin_path();
            surface.move_to(self.particles[link.a].position);
            surface.line_to(self.particles[link.b].position);
            surface.set_stroke_color(palette.accent(mode, link.opacity));
            surface.set_line_width(self.config.line_width);
            surface.stroke();
        }

        FrameReport {
            particles_drawn: self.particles.len(),
            links_drawn: links.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;
    use crate::surface::{DrawCommand, RecordingSurface, Shape};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(vec2(x, y), Vec2::ZERO, 1.0, 0.5)
    }

    fn surface(width: f32, height: f32) -> RecordingSurface {
        let mut surface = RecordingSurface::new(Size::new(width, height));
        surface.set_backing_size(Size::new(width, height));
        surface
    }

    #[test]
    fn seeding_creates_the_configured_population() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let field = ParticleField::seed(&mut rng, Size::new(800.0, 600.0), &config);

        assert_eq!(field.len(), 80);
        for p in field.particles() {
            assert!(p.radius >= 0.3 && p.radius <= 1.8);
            assert!(p.alpha >= 0.1 && p.alpha <= 0.6);
        }
    }

    #[test]
    fn opacity_fades_with_distance() {
        assert!((link_opacity(50.0, 100.0, 0.15) - 0.075).abs() < 1e-6);
        assert!((link_opacity(0.0, 100.0, 0.15) - 0.15).abs() < 1e-6);
        // 0.10005 is cut to three decimals
        assert!((link_opacity(33.3, 100.0, 0.15) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn close_pair_is_linked() {
        let config = FieldConfig::default();
        let mut field = ParticleField::from_particles(vec![still(0.0, 0.0), still(50.0, 0.0)], &config);
        let links = field.links(Size::new(800.0, 600.0));

        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert!((links[0].distance - 50.0).abs() < 1e-6);
        assert!((links[0].opacity - 0.075).abs() < 1e-6);
    }

    #[test]
    fn distant_pair_is_not_linked() {
        let config = FieldConfig::default();
        let mut field = ParticleField::from_particles(vec![still(0.0, 0.0), still(150.0, 0.0)], &config);
        assert!(field.links(Size::new(800.0, 600.0)).is_empty());

        let mut field = ParticleField::from_particles(vec![still(0.0, 0.0), still(100.0, 0.0)], &config);
        assert!(field.links(Size::new(800.0, 600.0)).is_empty());
    }

    #[test]
    fn render_clears_then_paints_particles_and_links() {
        let config = FieldConfig::default();
        let mut field = ParticleField::from_particles(vec![still(0.0, 0.0), still(50.0, 0.0)], &config);
        let mut surface = surface(800.0, 600.0);
        surface.take_commands();

        let report = field.render(&mut surface, Size::new(800.0, 600.0), DisplayMode::Dark);

        assert_eq!(report, FrameReport { particles_drawn: 2, links_drawn: 1 });
        assert_eq!(
            surface.commands()[0],
            DrawCommand::ClearRect { x: 0.0, y: 0.0, width: 800.0, height: 600.0 }
        );

        let lines: Vec<_> = surface.visible_lines().cloned().collect();
        assert_eq!(lines.len(), 1);
        match &lines[0] {
            Shape::Line { from, to, color, width } => {
                assert_eq!((*from, *to), (vec2(0.0, 0.0), vec2(50.0, 0.0)));
                assert_eq!((color.r, color.g, color.b), (0, 212, 255));
                assert!((color.a - 0.075).abs() < 1e-6);
                assert_eq!(*width, 0.5);
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn light_mode_paints_with_the_light_accent() {
        let config = FieldConfig::default();
        let mut field = ParticleField::from_particles(vec![still(10.0, 10.0)], &config);
        let mut surface = surface(100.0, 100.0);
        field.render(&mut surface, Size::new(100.0, 100.0), DisplayMode::Light);

        let discs: Vec<_> = surface.visible_discs().cloned().collect();
        assert_eq!(
            discs,
            vec![Shape::Disc { center: vec2(10.0, 10.0), radius: 1.0, color: Color::rgba(0, 100, 200, 0.5) }]
        );
    }

    #[test]
    fn grid_scan_matches_pairwise_scan() {
        let bounds = Size::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(3);
        let brute_config = FieldConfig { particle_count: 300, ..FieldConfig::default() };
        let grid_config = FieldConfig { use_spatial_grid: true, ..brute_config.clone() };

        let mut brute = ParticleField::seed(&mut rng, bounds, &brute_config);
        let mut grid = ParticleField::from_particles(brute.particles().to_vec(), &grid_config);

        for _ in 0..5 {
            brute.step(bounds);
            grid.step(bounds);
            assert_eq!(brute.links(bounds), grid.links(bounds));
        }
    }
}
