use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wave_match_core::{
    AnimationDriver, RecordingSurface, WaveField, WaveMatchState, WaveOverrides, WaveRenderer,
    TARGET_FPS,
};

fn main() -> wave_match_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Preview {
            width,
            height,
            scale,
            frames,
            params,
            output,
        } => run_preview(width, height, scale, frames, params.as_deref(), output),
        Commands::Animate { seconds, fps } => run_animate(seconds, fps),
        Commands::Round { duration_ms } => run_round(duration_ms),
    }
}

fn run_preview(
    width: f32,
    height: f32,
    scale: f32,
    frames: u32,
    params: Option<&str>,
    output: Option<PathBuf>,
) -> wave_match_core::Result<()> {
    tracing::info!(width, height, scale, frames, "rendering preview frames");

    let overrides = params.map(WaveOverrides::from_json).transpose()?;
    let mut renderer = WaveRenderer::new(RecordingSurface::new(), width, height, scale, overrides)?;
    for _ in 0..frames {
        renderer.render();
    }

    let surface = renderer.into_surface();
    let path = surface
        .last_stroke()
        .ok_or_else(|| wave_match_core::WaveMatchError::msg("no frames were rendered"))?;
    let json = serde_json::to_string_pretty(path)?;

    match output {
        Some(target) => std::fs::write(target, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn run_animate(seconds: f32, fps: u32) -> wave_match_core::Result<()> {
    tracing::info!(seconds, fps, "running the animation driver");

    let mut renderer = WaveRenderer::new(RecordingSurface::new(), 800.0, 200.0, 1.0, None)?;
    let rendered = Arc::new(AtomicU64::new(0));

    let counter = rendered.clone();
    let mut driver = AnimationDriver::new(fps);
    driver.start(move |_| {
        renderer.render();
        counter.fetch_add(1, Ordering::SeqCst);
    });

    thread::sleep(Duration::from_secs_f32(seconds));
    driver.stop();

    let frames = rendered.load(Ordering::SeqCst);
    tracing::info!(frames, "animation finished");
    Ok(())
}

fn run_round(duration_ms: u32) -> wave_match_core::Result<()> {
    let mut state = WaveMatchState::new(duration_ms);
    tracing::info!(target = ?state.target_wave, "starting wave match round");

    // Walk every field toward the target one step at a time, the way a
    // player works the sliders.
    let mut adjustments = 0_u32;
    while !state.is_matched() && adjustments < 10_000 {
        for field in WaveField::ALL {
            let user = &state.user_wave;
            let target = &state.target_wave;
            let direction = match field {
                WaveField::Speed => target.speed - user.speed,
                WaveField::Amplitude => target.amplitude - user.amplitude,
                WaveField::Wavelength => target.wavelength - user.wavelength,
                WaveField::SegmentLength => target.segment_length - user.segment_length,
                WaveField::LineWidth => target.line_width - user.line_width,
                WaveField::TimeModifier => target.time_modifier - user.time_modifier,
            };
            if direction.abs() > f32::EPSILON {
                state.adjust(field, direction.signum() as i32);
                adjustments += 1;
            }
        }
    }

    tracing::info!(
        adjustments,
        match_percent = state.match_percent(),
        matched = state.is_matched(),
        "round finished"
    );
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Wave match overlay renderer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a number of frames and dump the final stroked path as JSON.
    Preview {
        /// Logical surface width in pixels.
        #[arg(long, default_value_t = 800.0)]
        width: f32,
        /// Logical surface height in pixels.
        #[arg(long, default_value_t = 200.0)]
        height: f32,
        /// Device pixel scale applied to the backing store.
        #[arg(long, default_value_t = 1.0)]
        scale: f32,
        /// Number of frames to advance before dumping.
        #[arg(short, long, default_value_t = 1)]
        frames: u32,
        /// Partial wave parameters as JSON, e.g. '{"amplitude": 20}'.
        #[arg(short, long)]
        params: Option<String>,
        /// Output path for the JSON dump; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the frame pump against a renderer for a while and report the
    /// achieved frame count.
    Animate {
        /// How long to keep the driver running.
        #[arg(short, long, default_value_t = 2.0)]
        seconds: f32,
        /// Target frames per second.
        #[arg(long, default_value_t = TARGET_FPS)]
        fps: u32,
    },
    /// Simulate one wave match round against a random target.
    Round {
        /// Round duration in milliseconds.
        #[arg(long, default_value_t = 3_000)]
        duration_ms: u32,
    },
}
