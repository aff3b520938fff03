use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use image::{ImageBuffer, Rgb};
use log::{info, warn, LevelFilter};
use rayon::prelude::*;

use prism::scene::Scene;

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Renders a JSON sphere scene to a PNG.
#[derive(Parser)]
#[command(name = "prism")]
struct Args {
    /// Scene description
    #[arg(default_value = "scene.json")]
    scene: PathBuf,

    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "800")]
    height: u32,

    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let scene = Scene::load(&args.scene)?;
    let (width, height) = (args.width, args.height);

    info!("Start drawing {}x{} ...", width, height);
    let now = Instant::now();

    let mut buf = vec![0u8; width as usize * height as usize * 3];
    buf.par_chunks_mut(3).enumerate().for_each(|(n, c)| {
        let x = (n % width as usize) as u32;
        let y = (n / width as usize) as u32;

        let color = scene
            .camera
            .primary_ray(x, y, width, height)
            .and_then(|ray| scene.trace(&ray))
            .unwrap_or_else(|err| {
                warn!("pixel ({}, {}): {}", x, y, err);
                scene.background
            })
            .to_rgb();

        c.copy_from_slice(&color.0);
    });

    info!("Finished, elapsed: {:.3} ms", now.elapsed().as_secs_f64() * 1000.0);

    let image: ImageBuffer<Rgb<u8>, _> =
        ImageBuffer::from_raw(width, height, buf).ok_or("pixel buffer does not match image size")?;
    image.save(&args.output)?;
    info!("saved {:?}", args.output);

    Ok(())
}
