//! Headless command-line runner for the platformer movement core.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use coyote::components::{OnGround, Position, Velocity};
use coyote::{init_logging, FrameInput, InputCode, LevelDescriptor, Simulation, SimulationConfig};
use log::info;
use serde::de::DeserializeOwned;

/// Runs the platformer core headlessly with a scripted player
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Number of fixed ticks to simulate
    #[arg(long, default_value_t = 240)]
    ticks: u32,
    /// Level descriptor JSON; the built-in demo level is used otherwise
    #[arg(long)]
    level: Option<PathBuf>,
    /// Simulation config JSON
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Scripted inputs for a given tick: walk right, hop, switch character and
/// use the first ability.
fn script(frame: &mut FrameInput, tick: u32) {
    match tick {
        10 => frame.press(InputCode::L),
        30 | 100 | 160 => frame.press(InputCode::SPACE),
        45 | 115 | 175 => frame.release(InputCode::SPACE),
        80 | 140 => frame.press(InputCode::Z),
        81 | 141 => frame.release(InputCode::Z),
        120 | 180 => frame.press(InputCode::C),
        135 | 181 => frame.release(InputCode::C),
        _ => {}
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config: SimulationConfig = match &args.config {
        Some(path) => load_json(path)?,
        None => SimulationConfig::default(),
    };
    let level: LevelDescriptor = match &args.level {
        Some(path) => load_json(path)?,
        None => LevelDescriptor::demo(),
    };

    let mut sim = Simulation::new(config)?;
    let player = sim.spawn_level(&level)?;
    info!("level loaded with {} tiles", level.tiles.len());

    let mut frame = FrameInput::default();
    for tick in 0..args.ticks {
        script(&mut frame, tick);
        sim.step(&frame);
        frame.end_frame();

        if tick % 30 == 0 {
            let world = sim.world();
            let pos = world.get::<Position>(player).copied().unwrap_or_default();
            let vel = world.get::<Velocity>(player).copied().unwrap_or_default();
            let grounded = world.get::<OnGround>(player).is_some();
            info!(
                "t={:.3} pos=({}, {}) vel=({}, {}) grounded={grounded}",
                sim.now(),
                pos.x,
                pos.y,
                vel.x,
                vel.y
            );
        }
    }

    if let Some(snapshot) = sim.describe_level() {
        info!("final state: {}", serde_json::to_string(&snapshot.player)?);
    }
    Ok(())
}
