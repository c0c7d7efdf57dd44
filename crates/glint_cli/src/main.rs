use std::io::{self, BufWriter};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{render, write_ppm, Camera, Perlin, PixelBuffer};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod config;
mod demo;
mod logger;

use cli::Args;
use config::RenderFile;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.log_level.into());

    info!("Glint {}", env!("CARGO_PKG_VERSION"));

    let mut file = match &args.config {
        Some(path) => RenderFile::load(path)?,
        None => RenderFile::default(),
    };
    file.apply_args(&args);
    let (settings, camera_settings) = file.resolve();

    // The scene is fully built and frozen before any worker starts
    let mut scene_rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let perlin = Arc::new(Perlin::new(&mut scene_rng));
    let scene = demo::random_spheres_scene(&mut scene_rng, perlin)
        .context("failed to build demo scene")?;

    let camera = Camera::new(&camera_settings).context("invalid camera settings")?;

    let image = render(&scene, &camera, &settings, None).context("render failed")?;

    write_output(&image, &args.output)?;
    Ok(())
}

fn write_output(image: &PixelBuffer, output: &str) -> Result<()> {
    if output == "-" {
        let stdout = io::stdout();
        write_ppm(image, BufWriter::new(stdout.lock())).context("failed to write PPM to stdout")?;
        info!("Wrote {}x{} PPM to stdout", image.width(), image.height());
    } else {
        image
            .save(output)
            .with_context(|| format!("failed to write {output}"))?;
        info!("Saved to {}", output);
    }
    Ok(())
}
