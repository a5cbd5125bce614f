//! Headless demo replaying a scripted series of taps against one spawner.

use std::io::Write;

use anyhow::{ensure, Context, Result};
use bevy::prelude::*;
use clap::Parser;
use serde::Serialize;
use tap_spawn::attributes::{BoxGeometry, Material, Position, ScaleAnimation, Shadow};
use tap_spawn::{
    init_logging, ManualClock, SpawnClock, SpawnSettings, SpawnedFrom, TapSpawnPlugin, TapSpawner,
    TouchStart,
};

/// Spawn clones of a template wherever a scripted tap lands
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Number of taps to replay
    #[arg(long, default_value_t = 6)]
    taps: u32,
    /// Milliseconds between consecutive taps
    #[arg(long, default_value_t = 300)]
    interval_ms: u64,
    /// Smallest entry scale
    #[arg(long, default_value_t = 1.0)]
    min_scale: f32,
    /// Upper bound of the entry scale
    #[arg(long, default_value_t = 3.0)]
    max_scale: f32,
    /// Seed for reproducible scales
    #[arg(long)]
    seed: Option<u64>,
    /// Print a JSON report of spawned entities to stdout
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SpawnRecord {
    entity: String,
    position: Position,
    target_scale: f32,
}

#[derive(Serialize)]
struct Report {
    taps: u32,
    spawned: Vec<SpawnRecord>,
}

fn build_app(args: &Args, clock: ManualClock) -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(SpawnSettings {
        rng_seed: args.seed,
        ..SpawnSettings::default()
    });
    app.insert_resource(SpawnClock::new(clock));
    app.add_plugins(TapSpawnPlugin);

    let world = app.world_mut();
    let template = world
        .spawn((
            Position(Vec3::new(0.0, 5.0, 0.0)),
            BoxGeometry::default(),
            Material {
                color: [0.9, 0.4, 0.1],
                ..Material::default()
            },
            Shadow {
                cast: true,
                receive: false,
            },
        ))
        .id();
    let spawner = world
        .spawn(TapSpawner::new(template).with_scale_range(args.min_scale, args.max_scale))
        .id();
    (app, spawner)
}

fn collect_report(app: &mut App, taps: u32) -> Report {
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &SpawnedFrom, &Position, &ScaleAnimation)>();
    let mut clones: Vec<_> = query.iter(world).collect();
    clones.sort_by_key(|(_, origin, _, _)| origin.sequence);
    let spawned = clones
        .into_iter()
        .map(|(entity, _, position, animation)| SpawnRecord {
            entity: entity.to_string(),
            position: *position,
            target_scale: animation.to.x,
        })
        .collect();
    Report { taps, spawned }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    ensure!(
        args.min_scale <= args.max_scale,
        "--min-scale {} exceeds --max-scale {}",
        args.min_scale,
        args.max_scale
    );

    let clock = ManualClock::starting_at(0);
    let (mut app, spawner) = build_app(&args, clock.clone());
    app.update();

    for tap in 0..args.taps {
        #[expect(
            clippy::cast_precision_loss,
            reason = "Tap counts in a demo stay tiny."
        )]
        let x = tap as f32;
        app.world_mut().write_message(TouchStart {
            spawner,
            world_position: Vec3::new(x, 0.0, -2.0),
        });
        app.update();
        clock.advance(args.interval_ms);
    }

    let report = collect_report(&mut app, args.taps);
    log::info!(
        "{} taps produced {} spawns",
        report.taps,
        report.spawned.len()
    );
    if args.json {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &report).context("writing JSON report")?;
        writeln!(stdout).context("writing JSON report")?;
    }
    Ok(())
}
