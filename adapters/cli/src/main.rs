#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the photosynthesis bubble simulation.

mod config;
mod simulation;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use photosynthesis_core::FilterColor;
use photosynthesis_rendering::{palette, Presentation, RenderingBackend, Scene};
use photosynthesis_rendering_macroquad::MacroquadBackend;
use photosynthesis_system_rate_resolver::RateResolver;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use self::{config::SimulationConfig, simulation::Session};

/// Oxygen bubbles released by an aquatic plant under coloured light.
#[derive(Parser, Debug)]
#[command(name = "photosynthesis", author, version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Colour of the filter in front of the light (colorless, red, blue, green)
    #[arg(long)]
    filter: Option<FilterColor>,

    /// Light intensity, clamped to 0..=10
    #[arg(long, allow_negative_numbers = true)]
    light: Option<i32>,

    /// Carbon dioxide level, clamped to 0..=10
    #[arg(long, allow_negative_numbers = true)]
    co2: Option<i32>,

    /// Seed for every random draw; a fresh one is picked when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window and print a summary once every bubble has surfaced
    #[arg(long)]
    headless: bool,

    /// Fixed frame rate used to step headless runs
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1_000))]
    frame_rate: u32,

    /// PNG picture drawn inside the plant container
    #[arg(long)]
    plant_image: Option<PathBuf>,

    /// Synchronise presentation with the display refresh rate
    #[arg(long)]
    vsync: Option<bool>,
}

impl Args {
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let config = SimulationConfig::from_file(path)?;
                log::info!("loaded config from {}", path.display());
                config
            }
            None => SimulationConfig::default(),
        };

        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if let Some(light) = self.light {
            config.light = light;
        }
        if let Some(co2) = self.co2 {
            config.co2 = co2;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(plant_image) = &self.plant_image {
            config.plant_image = Some(plant_image.clone());
        }
        if let Some(vsync) = self.vsync {
            config.vsync = vsync;
        }

        Ok(config)
    }
}

/// Entry point for the photosynthesis command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.resolve_config()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("using seed {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let resolution = RateResolver::default()
        .resolve(config.filter, config.light, config.co2, &mut rng)
        .context("configuration error")?;
    for notice in &resolution.notices {
        log::warn!("{notice}");
    }

    let inputs = resolution.inputs;
    let mut session = Session::start(inputs, resolution.target, &mut rng);

    if args.headless {
        run_headless(session, args.frame_rate, seed);
        return Ok(());
    }

    let mut scene = Scene::new(inputs);
    session.populate_scene(&mut scene);

    let presentation = Presentation::new("Photosynthesis", palette::BACKGROUND, scene);
    MacroquadBackend::new()
        .with_vsync(config.vsync)
        .with_plant_image(config.plant_image)
        .run(presentation, move |dt, scene| {
            session.advance(dt);
            session.populate_scene(scene);
        })
}

fn run_headless(mut session: Session, frame_rate: u32, seed: u64) {
    let dt = Duration::from_secs(1) / frame_rate;
    while !session.is_settled() {
        session.advance(dt);
    }

    let status = session.status();
    println!(
        "{} of {} bubbles reached the surface in {:.2}s (seed {seed})",
        status.visible,
        status.target,
        status.elapsed.as_secs_f64(),
    );
}
