#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that executes a rover plan and prints the transcript.

mod plan_args;

use std::{fs, path::PathBuf, time::Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rover_mission_core::{Direction, Event, MissionOutcome, Position, RoverPose};
use rover_mission_system_control::{MissionController, MissionProgress};
use rover_mission_world::{query, World, WorldConfig};
use serde::Serialize;

/// Executes a rover command sequence against a mission configuration.
#[derive(Debug, Parser)]
#[command(name = "rover-mission", version)]
struct Args {
    /// Path to a JSON mission configuration; defaults to the built-in layout.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a machine-readable mission report instead of the transcript.
    #[arg(long)]
    report: bool,

    /// Plan tokens in execution order: advance:N, turn:left|right, collect, analyze.
    #[arg(required = true, value_name = "INSTRUCTION")]
    plan: Vec<String>,
}

/// Machine-readable summary of an executed mission.
#[derive(Debug, Serialize)]
struct MissionReport {
    success: bool,
    steps: usize,
    elapsed_ms: u128,
    rover: RoverPose,
    sample_collected: bool,
    sample_analyzed: bool,
}

/// Entry point for the Rover Mission command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let mut world = World::new(config).context("invalid mission configuration")?;
    let sequence = plan_args::parse_sequence(&args.plan)?;

    let mut controller = MissionController::default();
    let mut events = Vec::new();
    if !controller.begin(&mut world, &sequence, &mut events)? {
        bail!("an execution attempt is already running");
    }

    let started = Instant::now();
    let mut last_tick = started;
    let mut progress = controller.advance(&mut world, &mut events);
    while matches!(progress, MissionProgress::InProgress { .. }) {
        let now = Instant::now();
        controller.advance_time(now - last_tick);
        last_tick = now;
        progress = controller.advance(&mut world, &mut events);
    }

    if args.report {
        print_report(&world, &controller, sequence.len(), progress)?;
    } else {
        for event in &events {
            println!("{}", describe(event));
        }
    }

    match progress {
        MissionProgress::Finished {
            outcome: MissionOutcome::Success,
        } => Ok(()),
        MissionProgress::Finished {
            outcome: MissionOutcome::Incomplete,
        } => bail!("sequence completed but the objectives were not met"),
        MissionProgress::Aborted { step, reason } => {
            bail!("mission aborted at step {}: {reason}", step + 1)
        }
        MissionProgress::InProgress { .. } | MissionProgress::Idle => {
            bail!("execution stopped unexpectedly")
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<WorldConfig> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("could not read configuration {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("could not parse configuration {}", path.display()))
        }
        None => Ok(WorldConfig::default()),
    }
}

fn print_report(
    world: &World,
    controller: &MissionController,
    steps: usize,
    progress: MissionProgress,
) -> Result<()> {
    let snapshot = query::mission_snapshot(world);
    let report = MissionReport {
        success: matches!(
            progress,
            MissionProgress::Finished {
                outcome: MissionOutcome::Success,
            }
        ),
        steps,
        elapsed_ms: controller.elapsed().as_millis(),
        rover: snapshot.rover,
        sample_collected: snapshot.sample_collected,
        sample_analyzed: snapshot.sample_analyzed,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("could not serialize mission report")?
    );
    Ok(())
}

fn describe(event: &Event) -> String {
    match event {
        Event::RoverMoved { from, to } => {
            format!("rover moved {} -> {}", cell(*from), cell(*to))
        }
        Event::RoverTurned { from, to } => {
            format!("rover turned {} -> {}", heading(*from), heading(*to))
        }
        Event::SampleCollected { at } => format!("sample collected at {}", cell(*at)),
        Event::SampleAnalyzed { at } => format!("sample analyzed at {}", cell(*at)),
        Event::CollectRejected { at } => format!("collect refused at {}", cell(*at)),
        Event::AnalyzeRejected { at } => format!("analyze refused at {}", cell(*at)),
        Event::MissionReset => "mission state reset".to_owned(),
        Event::StepStarted { index } => format!("step {} started", index + 1),
        Event::StepCompleted { index } => format!("step {} completed", index + 1),
        Event::StepFailed { index, reason } => {
            format!("step {} failed: {reason}", index + 1)
        }
        Event::MissionCompleted { outcome, elapsed } => match outcome {
            MissionOutcome::Success => {
                format!("mission completed in {} ms", elapsed.as_millis())
            }
            MissionOutcome::Incomplete => "sequence completed, objectives unmet".to_owned(),
        },
    }
}

fn cell(position: Position) -> String {
    format!("({}, {})", position.x(), position.y())
}

fn heading(direction: Direction) -> &'static str {
    match direction {
        Direction::Right => "right",
        Direction::Down => "down",
        Direction::Left => "left",
        Direction::Up => "up",
    }
}
