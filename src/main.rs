//! Headless demo loop
//!
//! Runs a scripted session against the core at a fixed 60 Hz step and prints
//! HUD snapshots and events. Stands in for a real host (renderer/audio/input
//! live there); useful for smoke-testing balance changes from the terminal.

use tube_rush::sim::{GameEvent, InputState, RunPhase, RunState, tick};
use tube_rush::Tuning;

const DT: f32 = 1.0 / 60.0;
const MAX_SECONDS: f32 = 120.0;

fn main() {
    env_logger::init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("cannot read tuning file {path}: {e}");
                std::process::exit(1);
            });
            Tuning::from_json(&json).unwrap_or_else(|e| {
                eprintln!("invalid tuning file {path}: {e}");
                std::process::exit(1);
            })
        }
        None => Tuning::default(),
    };

    let seed = 0xC0FFEE;
    let mut state = RunState::new(seed, &tuning);
    println!("tube-rush demo, seed {seed:#x}");

    let total_ticks = (MAX_SECONDS / DT) as u32;
    for i in 0..total_ticks {
        // Scripted input: weave around the tube, jump every couple seconds,
        // boost in bursts
        let input = InputState {
            left: (i / 90) % 2 == 0,
            right: (i / 90) % 2 == 1,
            jump: i % 150 == 0,
            boost: (i / 300) % 3 == 2,
        };

        for event in tick(&mut state, &input, &tuning, DT) {
            match event {
                GameEvent::JumpStarted => println!("  * jump"),
                GameEvent::LapCompleted { lap } => println!("  * lap {lap} complete"),
                GameEvent::Milestone { level } => println!("  * milestone {level}"),
                GameEvent::Crashed => println!("  * crash"),
            }
        }

        if i % 60 == 0 {
            let hud = state.hud();
            println!(
                "t={:5.1}s lap {} progress {:.3} speed {:.3} score {:6.1} [{}]",
                state.elapsed, hud.lap_count, hud.progress, hud.speed, hud.score, hud.theme
            );
        }

        if state.phase == RunPhase::Crashed {
            break;
        }
    }

    let hud = state.hud();
    println!(
        "run over: {} laps, score {:.0}, final speed {:.3}",
        hud.lap_count, hud.score, hud.speed
    );
}
