#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a scripted Lane Rush battle headlessly.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use lane_rush_core::Tuning;

mod demo;

#[derive(Debug, Parser)]
#[command(name = "lane-rush", about = "Headless scripted battle demo")]
struct Args {
    /// Maximum number of simulation ticks to run.
    #[arg(long, default_value_t = 20_000)]
    ticks: u32,

    /// Milliseconds of simulated time per tick.
    #[arg(long, default_value_t = 10)]
    tick_ms: u64,

    /// Ticks between scripted enemy spawns.
    #[arg(long, default_value_t = 1_500)]
    enemy_wave_interval: u32,

    /// Tower health override; the default match value runs far longer than
    /// the default tick budget.
    #[arg(long)]
    tower_health: Option<f32>,

    /// TOML file overriding the simulation tuning.
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Drive ticks through the fixed-rate scheduler in real time instead of
    /// fast-forwarding.
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut tuning = match &args.tuning {
        Some(path) => load_tuning(path)?,
        None => Tuning::default(),
    };
    if let Some(health) = args.tower_health {
        tuning.tower_health = health;
    }

    let summary = demo::run_demo(
        tuning,
        demo::DemoConfig {
            ticks: args.ticks,
            tick: Duration::from_millis(args.tick_ms.max(1)),
            enemy_wave_interval: args.enemy_wave_interval,
            realtime: args.realtime,
        },
    )?;

    match summary.outcome {
        Some(outcome) => println!("match ended after {} ticks: {outcome:?}", summary.ticks_run),
        None => println!("undecided after {} ticks", summary.ticks_run),
    }
    println!(
        "balance {} | units {}v{} | towers {:.0}v{:.0} | {} outbound messages",
        summary.balance,
        summary.player_units,
        summary.enemy_units,
        summary.player_tower,
        summary.enemy_tower,
        summary.outbound_messages,
    );

    Ok(())
}

fn load_tuning(path: &Path) -> anyhow::Result<Tuning> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    toml::from_str(&contents).context("failed to parse tuning toml contents")
}
