/*
 * Particle Field
 *
 * A decorative background layer: a fixed population of faint particles
 * drifting across the window, wrapping around its edges, with thin links
 * between every pair closer than the link distance.
 *
 * Press D to switch between the dark and light palettes and R to reseed.
 */

use log::info;
use structopt::StructOpt;

use particle_field::app::{self, Opts};

fn main() {
    let opts = Opts::from_args();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = opts.log_level {
        logger.filter_level(level);
    }
    logger.init();

    info!("starting particle field ({:?} mode)", opts.display_mode());

    app::run(opts);
}
