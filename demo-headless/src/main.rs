//! Headless campfire demo.
//!
//! Runs a full campfire session without a window: stocks the pit, lights
//! it, optionally keeps feeding it, and prints HUD report lines plus a
//! closing summary. Exercises either rendering pipeline end to end.
//!
//! ```bash
//! cargo run --package demo-headless -- --duration 90 --feed-interval 20
//! ```

use campfire_sim_core::render::{select_pipeline, HeadlessBackend};
use campfire_sim_core::{
    Campfire, CanvasRenderer, FuelKind, Pipeline, SceneRenderer, TickEvent,
};
use clap::Parser;

/// Campfire simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "campfire-demo")]
#[command(about = "Interactive campfire simulation demo", long_about = None)]
struct Args {
    /// Simulation duration in seconds
    #[arg(short, long, default_value_t = 60.0)]
    duration: f32,

    /// Tick timestep in seconds
    #[arg(long, default_value_t = 0.016)]
    dt: f32,

    /// Use the planar (canvas) pipeline instead of the scene pipeline
    #[arg(long)]
    planar: bool,

    /// RNG seed for a reproducible session (omit for OS entropy)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pieces of tinder stocked before lighting
    #[arg(long, default_value_t = 2)]
    tinder: u32,

    /// Pieces of kindling stocked before lighting
    #[arg(long, default_value_t = 1)]
    kindling: u32,

    /// Logs stocked before lighting
    #[arg(long, default_value_t = 1)]
    logs: u32,

    /// Toss another log every this many seconds (0 = never feed)
    #[arg(short, long, default_value_t = 0.0)]
    feed_interval: f32,

    /// Spark output multiplier (0-2)
    #[arg(long, default_value_t = 1.0)]
    sparkiness: f32,

    /// Report interval in seconds
    #[arg(short, long, default_value_t = 5.0)]
    report_interval: f32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let pipeline = if args.planar {
        Pipeline::Planar
    } else {
        select_pipeline(&mut HeadlessBackend)
    };

    let mut fire = match args.seed {
        Some(seed) => Campfire::with_seed(pipeline, seed),
        None => Campfire::new(pipeline),
    };
    fire.set_sparkiness(args.sparkiness);

    for _ in 0..args.tinder {
        fire.deposit_fuel(FuelKind::Tinder);
    }
    for _ in 0..args.kindling {
        fire.deposit_fuel(FuelKind::Kindling);
    }
    for _ in 0..args.logs {
        fire.deposit_fuel(FuelKind::Log);
    }

    match fire.start() {
        Ok(()) => println!(
            "Lit the fire: {:.0}s of fuel stocked, {:?} pipeline",
            fire.hud().remaining_seconds,
            pipeline
        ),
        Err(err) => {
            eprintln!("Could not start: {err}");
            return;
        }
    }

    let mut canvas = CanvasRenderer::new();
    let mut scene = SceneRenderer::new();

    let mut elapsed = 0.0_f32;
    let mut next_feed = args.feed_interval;
    let mut next_report = args.report_interval;
    let mut went_out_at = None;

    while elapsed < args.duration {
        if args.feed_interval > 0.0 && fire.is_alive() && elapsed >= next_feed {
            fire.deposit_fuel(FuelKind::Log);
            next_feed += args.feed_interval;
            println!("[{elapsed:6.1}s] tossed a log ({:.0}s of fuel left)", fire.hud().remaining_seconds);
        }

        if pipeline == Pipeline::Scene {
            fire.advance_physics(args.dt);
        }
        if let Some(TickEvent::Extinguished) = fire.tick(args.dt) {
            println!("[{elapsed:6.1}s] {}", TickEvent::Extinguished.message());
            went_out_at = Some(elapsed);
        }

        if elapsed >= next_report {
            report(&fire, &mut canvas, &mut scene, elapsed);
            next_report += args.report_interval;
        }

        elapsed += args.dt;
    }

    println!();
    println!("═══════════════ SESSION SUMMARY ═══════════════");
    println!("Score:             {}", fire.score());
    println!("Pile units:        {}", fire.pile().len());
    println!("Burning units:     {}", fire.pile().burning_count());
    match went_out_at {
        Some(t) => println!("Fire went out at:  {t:.1}s"),
        None => println!(
            "Still burning:     {}% intensity, ~{:.0}s of fuel left",
            fire.hud().intensity_percent,
            fire.hud().remaining_seconds
        ),
    }
    println!("═══════════════════════════════════════════════");
}

fn report(
    fire: &Campfire,
    canvas: &mut CanvasRenderer,
    scene: &mut SceneRenderer,
    elapsed: f32,
) {
    let hud = fire.hud();
    let bar = intensity_bar(fire.intensity());

    match fire.pipeline() {
        Pipeline::Planar => {
            let frame = canvas.render(fire);
            println!(
                "[{elapsed:6.1}s] {bar} {:3}%  fuel {:5.0}s  pile {:2} ({} lit)  {} draw ops",
                hud.intensity_percent,
                hud.remaining_seconds,
                fire.pile().len(),
                fire.pile().burning_count(),
                frame.ops.len(),
            );
        }
        Pipeline::Scene => {
            let frame = scene.render(fire);
            println!(
                "[{elapsed:6.1}s] {bar} {:3}%  fuel {:5.0}s  pile {:2} ({} lit)  {} flames / {} sparks  light {:.2}",
                hud.intensity_percent,
                hud.remaining_seconds,
                fire.pile().len(),
                fire.pile().burning_count(),
                frame.flames.len(),
                frame.sparks.len(),
                frame.light_intensity,
            );
        }
    }
}

/// Ten-cell glyph ramp for the intensity readout.
fn intensity_bar(intensity: f32) -> String {
    let filled = (intensity * 10.0).round() as usize;
    let mut bar = String::with_capacity(12);
    bar.push('[');
    for i in 0..10 {
        bar.push(if i < filled { '█' } else { '·' });
    }
    bar.push(']');
    bar
}
