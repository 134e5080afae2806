//! Boss encounter simulator.
//!
//! Runs the boss brain against a player walking a scripted orbit and logs which behavior the
//! brain picks and every projectile it launches.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use ai_boss::{build_brain, Collaborators, EncounterConfig, RecordingSpawner};
use ai_core::Vec3;
use ai_motion::ThrustRig;
use ai_nav::{GridNavAgent, NavAgent, NavGrid};

const ARENA_CELLS: u32 = 40;
const PILLARS: [(i32, i32); 4] = [(14, 14), (25, 14), (14, 25), (25, 25)];

#[derive(Parser)]
#[command(name = "boss-sim")]
#[command(about = "Run a scripted boss encounter headlessly", version)]
struct Cli {
    /// Encounter config (YAML); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of simulation steps
    #[arg(short, long, default_value_t = 1200)]
    ticks: u32,

    /// Seconds per step
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Print the final tree snapshot as JSON
    #[arg(long)]
    snapshot: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Player orbiting the arena center while drifting in and out of range.
fn player_position(center: Vec3, time: f32) -> Vec3 {
    let radius = 11.0 + 5.0 * (0.3 * time).sin();
    let angle = 0.5 * time;
    center + Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).with_target(false).init();

    if cli.dt.is_nan() || cli.dt <= 0.0 {
        anyhow::bail!("--dt must be positive (got {})", cli.dt);
    }

    let config = match &cli.config {
        Some(path) => EncounterConfig::load(path)
            .with_context(|| format!("Failed to load encounter from {}", path.display()))?,
        None => EncounterConfig::default(),
    };

    run(&cli, &config)
}

fn run(cli: &Cli, config: &EncounterConfig) -> Result<()> {
    let mut grid = NavGrid::new(ARENA_CELLS, ARENA_CELLS, 1.0).context("Failed to build arena")?;
    for (x, y) in PILLARS {
        grid.set_blocked(x, y, true);
    }

    let center = Vec3::new(20.5, 0.0, 20.5);
    let nav = Rc::new(RefCell::new(GridNavAgent::new(grid, center)));
    let rig = Rc::new(RefCell::new(ThrustRig::new(config.rig, center)));
    let player = Rc::new(Cell::new(player_position(center, 0.0)));
    let spawner = Rc::new(RefCell::new(RecordingSpawner::default()));

    let collab = Collaborators {
        rig: Some(rig.clone()),
        nav: Some(nav.clone()),
        target: Some(player.clone()),
        spawner: Some(spawner.clone()),
    };
    let mut brain = build_brain(config, &collab);

    info!(ticks = cli.ticks, dt = cli.dt, "Starting encounter");

    let mut active: Option<String> = None;
    let mut logged = 0;
    for step in 0..cli.ticks {
        let time = step as f32 * cli.dt;
        player.set(player_position(center, time));

        nav.borrow_mut().advance(cli.dt);
        {
            let mut rig = rig.borrow_mut();
            rig.set_position(nav.borrow().position());
            rig.face_towards(player.get());
            rig.advance(cli.dt);
        }
        brain.update(cli.dt);

        let snapshot = brain.snapshot();
        let leaf = snapshot.active_path().last().map(|name| name.to_string());
        if leaf.is_some() && leaf != active {
            info!(
                step,
                behavior = leaf.as_deref().unwrap_or_default(),
                distance = nav.borrow().position().distance(player.get()),
                "Behavior selected"
            );
        }
        active = leaf;

        let spawner = spawner.borrow();
        for launch in &spawner.launches[logged..] {
            info!(
                step,
                prefab = %launch.prefab,
                speed = launch.velocity.length(),
                "Projectile launched"
            );
        }
        logged = spawner.launches.len();
    }

    let spawner = spawner.borrow();
    info!(
        spit = spawner.count(&config.spit.prefab),
        wave = spawner.count(&config.wave.prefab),
        total = spawner.launches.len(),
        "Encounter finished"
    );

    if cli.snapshot {
        let json = serde_json::to_string_pretty(&brain.snapshot())
            .context("Failed to serialize tree snapshot")?;
        println!("{json}");
    }

    Ok(())
}
