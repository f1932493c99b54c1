#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Omega Squirrel.

mod config;
mod scene;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use log::info;
use omega_squirrel_core::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH, WINDOW_TITLE};
use omega_squirrel_rendering::{Presentation, RenderingBackend, GRASS_COLOR};
use omega_squirrel_rendering_macroquad::MacroquadBackend;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use self::{config::Settings, simulation::Simulation};

/// Squirrel Eat Squirrel: eat smaller squirrels, avoid bigger ones, grow huge.
#[derive(Debug, Parser)]
#[command(name = "omega-squirrel", version)]
struct Args {
    /// TOML file with `seed`, `vsync` and `show_fps` keys [default: omega-squirrel.toml if present].
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for the random generator; drawn from the OS when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_name = "BOOL")]
    vsync: Option<bool>,
    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Omega Squirrel command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let file = config::load(args.config.as_deref()).context("failed to load configuration")?;
    let settings = Settings::resolve(file, args.seed, args.vsync, args.show_fps);
    info!("launching with {settings:?}");

    let rng = match settings.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut simulation = Simulation::new(rng);

    let presentation = Presentation::new(
        WINDOW_TITLE,
        GRASS_COLOR,
        Vec2::new(VIEWPORT_WIDTH as f32, VIEWPORT_HEIGHT as f32),
        scene::build(simulation.world()),
    )
    .context("failed to describe the game window")?;

    let backend = MacroquadBackend::new()
        .with_vsync(settings.vsync)
        .with_show_fps(settings.show_fps);

    backend.run(presentation, move |dt, input, scene| {
        simulation.handle_input(&input.intents);
        simulation.advance(dt);
        *scene = scene::build(simulation.world());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_every_flag() {
        let args = Args::try_parse_from([
            "omega-squirrel",
            "--config",
            "custom.toml",
            "--seed",
            "12",
            "--vsync",
            "false",
            "--show-fps",
        ])
        .expect("valid arguments");

        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(args.seed, Some(12));
        assert_eq!(args.vsync, Some(false));
        assert!(args.show_fps);
    }

    #[test]
    fn flags_are_optional() {
        let args = Args::try_parse_from(["omega-squirrel"]).expect("no arguments needed");
        assert_eq!(args.config, None);
        assert_eq!(args.seed, None);
        assert_eq!(args.vsync, None);
        assert!(!args.show_fps);
    }
}
