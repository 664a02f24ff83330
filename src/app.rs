/*
 * Application Module
 *
 * This module defines the window shell around the particle field: command
 * line options, the nannou model, and the update and resize handlers.
 *
 * The window plays the role of the field's container. The nannou update
 * loop acts as the frame scheduler: every update drains the frames that
 * were requested from the HostLoop and hands them to the animator.
 */

use log::{info, warn};
use nannou::prelude::*;
use nannou_egui::Egui;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::OnceLock;
use structopt::StructOpt;

use crate::animator::Animator;
use crate::debug::DebugInfo;
use crate::host::HostLoop;
use crate::input;
use crate::palette::{Color, DisplayMode};
use crate::params::FieldConfig;
use crate::renderer::{self, NannouSurface};
use crate::surface::{DrawingSurface, Size};
use crate::ui::{self, UiActions};

const DARK_BACKGROUND: Color = Color::rgba(8, 10, 20, 1.0);
const LIGHT_BACKGROUND: Color = Color::rgba(240, 244, 250, 1.0);

// Parsed once in main; nannou's model function cannot capture them
static STARTUP_OPTS: OnceLock<Opts> = OnceLock::new();

#[derive(StructOpt, Debug, Clone)]
#[structopt(name = "particle_field", about = "Drifting particle field with proximity links")]
pub struct Opts {
    /// JSON file with field parameters
    #[structopt(long = "config", parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Start in light display mode
    #[structopt(long = "light")]
    pub light: bool,

    /// Override the number of particles
    #[structopt(long = "particles")]
    pub particles: Option<usize>,

    /// Find links with a spatial grid instead of a pairwise scan
    #[structopt(long = "spatial-grid")]
    pub spatial_grid: bool,

    /// Seed for particle placement
    #[structopt(long = "seed")]
    pub seed: Option<u64>,

    #[structopt(long = "log-level")]
    pub log_level: Option<log::LevelFilter>,
}

impl Opts {
    pub fn display_mode(&self) -> DisplayMode {
        if self.light {
            DisplayMode::Light
        } else {
            DisplayMode::Dark
        }
    }
}

// Load the config file (if any) and apply command line overrides.
// An unusable config is reported and replaced by the defaults.
pub fn resolve_config(opts: &Opts) -> FieldConfig {
    let mut config = match &opts.config {
        Some(path) => match FieldConfig::load(path) {
            Ok(config) => {
                info!("loaded field config from {}", path.display());
                config
            }
            Err(err) => {
                warn!("{}, using defaults", err);
                FieldConfig::default()
            }
        },
        None => FieldConfig::default(),
    };

    if let Some(count) = opts.particles {
        config.particle_count = count;
    }
    if opts.spatial_grid {
        config.use_spatial_grid = true;
    }
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }

    if let Err(err) = config.validate() {
        warn!("{}, using defaults", err);
        return FieldConfig::default();
    }
    config
}

// Run the window with options that were already parsed
pub fn run(opts: Opts) {
    if STARTUP_OPTS.set(opts).is_err() {
        warn!("command line options were already set, keeping the first ones");
    }
    nannou::app(model).update(update).run();
}

pub fn startup_opts() -> &'static Opts {
    STARTUP_OPTS.get_or_init(Opts::from_args)
}

pub fn background_for(mode: DisplayMode) -> Color {
    match mode {
        DisplayMode::Dark => DARK_BACKGROUND,
        DisplayMode::Light => LIGHT_BACKGROUND,
    }
}

pub type FieldAnimator = Animator<NannouSurface, Rc<RefCell<HostLoop>>>;

// Main model for the application
pub struct Model {
    pub window_id: WindowId,
    pub animator: Option<FieldAnimator>,
    pub host: Rc<RefCell<HostLoop>>,
    pub config: FieldConfig,
    pub mode: DisplayMode,
    pub draw: Draw,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub show_debug: bool,
    pub queued_actions: UiActions,
}

impl Model {
    pub fn background(&self) -> Color {
        background_for(self.mode)
    }

    // Attach a fresh animator to the window, if the window is still there
    pub fn attach(&mut self, app: &App) {
        let surface = app.window(self.window_id).map(|window| {
            let rect = window.rect();
            NannouSurface::new(self.draw.clone(), Size::new(rect.w(), rect.h()), self.background())
        });

        self.animator = Animator::attach(surface, self.host.clone(), self.config.clone(), self.mode);
        if let Some(animator) = &self.animator {
            self.debug_info
                .record_frame(animator.last_report(), animator.frames_rendered());
        }
    }

    pub fn reattach(&mut self, app: &App) {
        // Dropping the old animator tears it down before the new one subscribes
        self.animator = None;
        self.attach(app);
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
        let background = self.background();
        if let Some(animator) = self.animator.as_mut() {
            animator.surface_mut().set_background(background);
            animator.set_display_mode(mode);
        }
        info!("display mode: {:?}", mode);
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let opts = startup_opts();
    let config = resolve_config(opts);

    let window_id = app
        .new_window()
        .title("Particle Field")
        .size(1024, 768)
        .view(renderer::view)
        .resized(resized)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to create window");

    let egui = {
        let window = app.window(window_id).expect("Failed to get window");
        Egui::from_window(&window)
    };

    let mut model = Model {
        window_id,
        animator: None,
        host: HostLoop::shared(),
        config,
        mode: opts.display_mode(),
        draw: Draw::new(),
        egui,
        debug_info: DebugInfo::default(),
        show_debug: false,
        queued_actions: UiActions::default(),
    };
    model.attach(app);
    model
}

// Fire the frames requested since the last update
pub fn fire_due_frames<S: DrawingSurface>(
    host: &Rc<RefCell<HostLoop>>,
    animator: Option<&mut Animator<S, Rc<RefCell<HostLoop>>>>,
    debug_info: &mut DebugInfo,
) {
    let due = host.borrow_mut().due_frames();
    if let Some(animator) = animator {
        for handle in due {
            if let Some(report) = animator.on_frame(handle) {
                debug_info.record_frame(report, animator.frames_rendered());
            }
        }
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let actions = ui::update_ui(
        &mut model.egui,
        model.mode,
        &mut model.config,
        &mut model.show_debug,
        &model.debug_info,
    )
    .merge(std::mem::take(&mut model.queued_actions));

    // Frames first: a field attached below has already drawn its first
    // frame and must not advance again before it is viewed
    fire_due_frames(&model.host, model.animator.as_mut(), &mut model.debug_info);

    if actions.toggle_mode {
        model.set_mode(model.mode.toggled());
    }
    if actions.needs_reattach() {
        model.reattach(app);
    }
}

// Window resize handler: the container changed size
pub fn resized(_app: &App, model: &mut Model, dims: Vec2) {
    if let Some(animator) = model.animator.as_mut() {
        animator.surface_mut().set_displayed_size(Size::new(dims.x, dims.y));

        let listening = animator
            .listener()
            .map_or(false, |id| model.host.borrow().is_listening(id));
        if listening {
            animator.on_resize();
        }
    }
}
