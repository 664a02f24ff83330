/*
 * Animator Module
 *
 * This module defines the Animator, the scoped resource that runs a particle
 * field on a drawing surface. Attaching sizes the surface, subscribes to
 * viewport resizes, seeds the population and starts the frame loop. Dropping
 * the animator (or calling `detach`) unsubscribes and cancels the pending
 * frame, so no loop or listener outlives it on any exit path.
 *
 * The loop is a chain of one-shot frame requests: each frame schedules the
 * next one, and a frame whose handle is no longer pending is ignored.
 */

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::field::{FrameReport, ParticleField};
use crate::host::{FrameHandle, FrameScheduler, ListenerId, ResizeSignal};
use crate::palette::DisplayMode;
use crate::params::FieldConfig;
use crate::surface::{DrawingSurface, Size};

pub struct Animator<S, H>
where
    S: DrawingSurface,
    H: FrameScheduler + ResizeSignal,
{
    field: ParticleField,
    surface: S,
    host: H,
    config: FieldConfig,
    mode: DisplayMode,
    bounds: Size,
    rng: StdRng,
    pending: Option<FrameHandle>,
    listener: Option<ListenerId>,
    last_report: FrameReport,
    frames_rendered: u64,
}

impl<S, H> Animator<S, H>
where
    S: DrawingSurface,
    H: FrameScheduler + ResizeSignal,
{
    /// Attach a particle field to `surface` and start animating.
    ///
    /// A surface that could not be acquired (`None`) is not an error: nothing
    /// is drawn, the host is left untouched and `None` is returned.
    pub fn attach(surface: Option<S>, host: H, config: FieldConfig, mode: DisplayMode) -> Option<Self> {
        let surface = match surface {
            Some(surface) => surface,
            None => {
                debug!("no drawing surface available, particle field not attached");
                return None;
            }
        };

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut animator = Self {
            field: ParticleField::from_particles(Vec::new(), &config),
            surface,
            host,
            config,
            mode,
            bounds: Size::default(),
            rng,
            pending: None,
            listener: None,
            last_report: FrameReport::default(),
            frames_rendered: 0,
        };
        animator.start();
        Some(animator)
    }

    fn start(&mut self) {
        self.bounds = self.surface.displayed_size();
        self.surface.set_backing_size(self.bounds);
        self.listener = Some(self.host.subscribe_resize());
        self.field = ParticleField::seed(&mut self.rng, self.bounds, &self.config);

        debug!(
            "particle field attached: {} particles on {}x{}",
            self.field.len(),
            self.bounds.width,
            self.bounds.height
        );

        self.draw_frame();
    }

    fn draw_frame(&mut self) {
        self.last_report = self.field.render(&mut self.surface, self.bounds, self.mode);
        self.frames_rendered += 1;
        self.pending = Some(self.host.request_frame());

        trace!(
            "frame {}: {} particles, {} links",
            self.frames_rendered,
            self.last_report.particles_drawn,
            self.last_report.links_drawn
        );
    }

    /// Frame callback. Renders and reschedules only if `handle` is the frame
    /// this animator is waiting for.
    pub fn on_frame(&mut self, handle: FrameHandle) -> Option<FrameReport> {
        if self.pending != Some(handle) {
            trace!("ignoring stale frame {:?}", handle);
            return None;
        }
        self.pending = None;
        self.draw_frame();
        Some(self.last_report)
    }

    // Resize listener: re-measure the container and resize the backing store.
    // Particles keep their positions; any left outside wrap on their next crossing.
    pub fn on_resize(&mut self) {
        self.bounds = self.surface.displayed_size();
        self.surface.set_backing_size(self.bounds);
        debug!("particle field resized to {}x{}", self.bounds.width, self.bounds.height);
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;

        if self.config.reseed_on_mode_change {
            debug!("display mode changed to {:?}, rebuilding particle field", mode);
            self.teardown();
            self.start();
        }
    }

    // Unsubscribe and cancel the pending frame. Safe to call repeatedly.
    fn teardown(&mut self) {
        if let Some(id) = self.listener.take() {
            self.host.unsubscribe_resize(id);
        }
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
    }

    pub fn detach(mut self) {
        self.teardown();
        debug!("particle field detached after {} frames", self.frames_rendered);
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn last_report(&self) -> FrameReport {
        self.last_report
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl<S, H> Drop for Animator<S, H>
where
    S: DrawingSurface,
    H: FrameScheduler + ResizeSignal,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostLoop;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn seeded() -> FieldConfig {
        FieldConfig {
            seed: Some(11),
            ..FieldConfig::default()
        }
    }

    #[test]
    fn attach_sizes_subscribes_seeds_and_draws() {
        let host = HostLoop::shared();
        let surface = RecordingSurface::new(Size::new(800.0, 600.0));
        let animator = Animator::attach(Some(surface), host.clone(), seeded(), DisplayMode::Dark).unwrap();

        assert_eq!(animator.surface().backing_size(), Size::new(800.0, 600.0));
        assert_eq!(animator.field().len(), 80);
        assert_eq!(animator.frames_rendered(), 1);
        assert!(animator.is_running());
        assert_eq!(host.borrow().listener_count(), 1);
        assert_eq!(host.borrow().frames_requested(), 1);
        assert_eq!(
            animator.surface().commands()[0],
            DrawCommand::SetBackingSize(Size::new(800.0, 600.0))
        );
    }

    #[test]
    fn missing_surface_is_a_silent_no_op() {
        let host = HostLoop::shared();
        let animator = Animator::<RecordingSurface, _>::attach(None, host.clone(), seeded(), DisplayMode::Dark);

        assert!(animator.is_none());
        assert_eq!(host.borrow().frames_requested(), 0);
        assert_eq!(host.borrow().listener_count(), 0);
    }

    #[test]
    fn stale_frames_do_not_reschedule() {
        let host = HostLoop::shared();
        let surface = RecordingSurface::new(Size::new(200.0, 200.0));
        let mut animator = Animator::attach(Some(surface), host.clone(), seeded(), DisplayMode::Dark).unwrap();

        let due = host.borrow_mut().due_frames();
        assert_eq!(due.len(), 1);
        assert!(animator.on_frame(due[0]).is_some());
        assert!(animator.on_frame(due[0]).is_none());
        assert_eq!(host.borrow().frames_requested(), 2);
    }

    #[test]
    fn detach_unsubscribes_and_cancels() {
        let host = HostLoop::shared();
        let surface = RecordingSurface::new(Size::new(200.0, 200.0));
        let animator = Animator::attach(Some(surface), host.clone(), seeded(), DisplayMode::Dark).unwrap();
        animator.detach();

        assert_eq!(host.borrow().listener_count(), 0);
        assert_eq!(host.borrow().pending_frames(), 0);
        assert_eq!(host.borrow().frames_cancelled(), 1);
    }

    #[test]
    fn mode_change_recolors_without_reseeding() {
        let host = HostLoop::shared();
        let surface = RecordingSurface::new(Size::new(300.0, 300.0));
        let mut animator = Animator::attach(Some(surface), host.clone(), seeded(), DisplayMode::Dark).unwrap();
        let listener = animator.listener();
        let before: Vec<_> = animator.field().particles().to_vec();

        animator.set_display_mode(DisplayMode::Light);

        assert_eq!(animator.mode(), DisplayMode::Light);
        assert_eq!(animator.field().particles(), &before[..]);
        assert_eq!(animator.listener(), listener);
        assert_eq!(host.borrow().frames_cancelled(), 0);
    }

    #[test]
    fn mode_change_can_rebuild_the_field() {
        let host = HostLoop::shared();
        let surface = RecordingSurface::new(Size::new(300.0, 300.0));
        let config = FieldConfig {
            reseed_on_mode_change: true,
            ..seeded()
        };
        let mut animator = Animator::attach(Some(surface), host.clone(), config, DisplayMode::Dark).unwrap();
        let old_listener = animator.listener().unwrap();
        let before: Vec<_> = animator.field().particles().to_vec();

        animator.set_display_mode(DisplayMode::Light);

        assert_ne!(animator.field().particles(), &before[..]);
        assert_eq!(animator.field().len(), 80);
        assert!(!host.borrow().is_listening(old_listener));
        assert_eq!(host.borrow().listener_count(), 1);
        assert_eq!(host.borrow().frames_cancelled(), 1);
        assert_eq!(host.borrow().pending_frames(), 1);
    }

    #[test]
    fn resize_after_a_rebuild_reaches_the_new_field() {
        let host = HostLoop::shared();
        let surface = RecordingSurface::new(Size::new(300.0, 300.0));
        let config = FieldConfig {
            reseed_on_mode_change: true,
            ..seeded()
        };
        let mut animator = Animator::attach(Some(surface), host.clone(), config, DisplayMode::Dark).unwrap();
        animator.set_display_mode(DisplayMode::Light);
        let rebuilt = animator.field().particles().to_vec();

        animator.surface_mut().set_displayed_size(Size::new(120.0, 90.0));
        animator.on_resize();

        assert!(host.borrow().is_listening(animator.listener().unwrap()));
        assert_eq!(animator.bounds(), Size::new(120.0, 90.0));
        assert_eq!(animator.surface().backing_size(), Size::new(120.0, 90.0));
        assert_eq!(animator.field().particles(), &rebuilt[..]);
    }
}
