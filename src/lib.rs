/*
 * Particle Field - Module Definitions
 *
 * This file defines the module structure for the particle field animator.
 * The core (particle, field, animator) only talks to the outside world
 * through the DrawingSurface, FrameScheduler and ResizeSignal traits; the
 * nannou window shell plugs real implementations into them.
 */

// Re-export key components for easier access
pub use animator::Animator;
pub use debug::DebugInfo;
pub use error::ConfigError;
pub use field::{link_opacity, FrameReport, Link, ParticleField};
pub use host::{FrameHandle, FrameScheduler, HostLoop, ListenerId, ResizeSignal};
pub use palette::{Color, DisplayMode, Palette};
pub use params::{FieldConfig, ValueRange};
pub use particle::Particle;
pub use renderer::NannouSurface;
pub use spatial_grid::SpatialGrid;
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface, Shape, Size};

// Define modules
pub mod animator;
pub mod app;
pub mod debug;
pub mod error;
pub mod field;
pub mod host;
pub mod input;
pub mod palette;
pub mod params;
pub mod particle;
pub mod renderer;
pub mod spatial_grid;
pub mod surface;
pub mod ui;
