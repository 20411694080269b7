use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image::{Rgba, RgbaImage};
use log::info;
use rand::Rng;

use timing_view::host::{render_offscreen, run_window};
use timing_view::{
    BitmapDrawable, Drawable, Easing, TimingAttributes, TimingView, View, WindowConfig,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EasingArg {
    Linear,
    AccelDecel,
}

impl From<EasingArg> for Easing {
    fn from(arg: EasingArg) -> Self {
        match arg {
            EasingArg::Linear => Easing::Linear,
            EasingArg::AccelDecel => Easing::AccelerateDecelerate,
        }
    }
}

/// Circular countdown that sweeps a start image over an end image
#[derive(Debug, Parser)]
#[command(name = "timing-view", version)]
struct Args {
    /// Sweep duration in seconds
    #[arg(short, long, default_value_t = timing_view::DEFAULT_DURATION_SECS)]
    duration: u32,

    /// Image revealed by the sweep (random gradient when omitted)
    #[arg(long)]
    start: Option<PathBuf>,

    /// Base image (random gradient when omitted)
    #[arg(long)]
    end: Option<PathBuf>,

    #[arg(long, default_value_t = 300)]
    width: usize,

    #[arg(long, default_value_t = 300)]
    height: usize,

    /// Frame rate cap
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    #[arg(long, value_enum, default_value_t = EasingArg::Linear)]
    easing: EasingArg,

    /// Render the final frame to a PNG instead of opening a window
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

/// Radial gradient from a random color to transparent at the edge.
fn random_disc(size: u32) -> RgbaImage {
    let mut rng = rand::rng();
    let (r, g, b) = (rng.random::<u8>(), rng.random::<u8>(), rng.random::<u8>());
    let half = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - half;
        let dy = y as f32 + 0.5 - half;
        let t = ((dx * dx + dy * dy).sqrt() / half).min(1.0);
        Rgba([r, g, b, (255.0 * (1.0 - t * t)) as u8])
    })
}

fn load(path: Option<&PathBuf>, which: &str) -> Result<Box<dyn Drawable>> {
    let drawable = match path {
        Some(path) => BitmapDrawable::open(path)
            .with_context(|| format!("loading {which} image"))?,
        None => BitmapDrawable::new(random_disc(128)),
    };
    Ok(Box::new(drawable))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let attrs = TimingAttributes::builder()
        .duration_secs(args.duration)
        .start_drawable(load(args.start.as_ref(), "start")?)
        .end_drawable(load(args.end.as_ref(), "end")?)
        .easing(args.easing.into())
        .build();
    let mut view = TimingView::new(attrs).context("creating timing view")?;

    if let Some(path) = args.snapshot {
        let t0 = Instant::now();
        view.on_frame(t0);
        view.on_frame(t0 + view.duration());
        let image = render_offscreen(
            &mut view,
            args.width as u32,
            args.height as u32,
            (0xff, 0xff, 0xff),
        );
        image
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Snapshot written to {}", path.display());
        return Ok(());
    }

    let config = WindowConfig {
        width: args.width,
        height: args.height,
        max_framerate: args.fps,
        ..WindowConfig::default()
    };
    info!("Running {}s sweep", args.duration);
    run_window(&mut view, &config)?;
    Ok(())
}
