//! Per-frame orchestration
//!
//! One synchronous pass per frame: player kinematics, progression policy,
//! hazard animation, collision, lap transition. No component suspends
//! mid-update; cross-component writes happen only inside the lap transition,
//! as one atomic batch within the tick.

use super::collision::any_collision;
use super::player::InputState;
use super::state::{GameEvent, RunPhase, RunState};
use crate::tuning::Tuning;

/// Speed oscillation rate for the Bloodstream beat sync.
const BEAT_RATE: f32 = 3.0;

/// Advance the run by one frame.
///
/// `dt` is the elapsed real time for this frame and must be clamped by the
/// caller (e.g. against backgrounded-tab stalls): a single tick covering most
/// of a revolution would defeat the lap latch, and that contract is the
/// host's, not the core's.
///
/// Returns the discrete events of this tick for the audio/HUD collaborators.
pub fn tick(state: &mut RunState, input: &InputState, tuning: &Tuning, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase == RunPhase::Crashed {
        return events;
    }

    state.time_ticks += 1;
    state.elapsed += dt;
    let time = state.elapsed;

    // Player kinematics
    if state.player.advance(input, tuning, dt) {
        events.push(GameEvent::JumpStarted);
    }

    // Continuous acceleration policy. Owned here, not by the kinematics:
    // the player must accept external speed mutation between ticks.
    let mut acceleration = tuning.acceleration;
    if state.themes.current().id == "BLOODSTREAM" {
        // Music-synced speed fluctuation
        acceleration += (time * BEAT_RATE).sin() * tuning.beat_acceleration;
    }
    state.player.speed += acceleration * dt;

    if let Some(level) = state.accrue_score(dt) {
        log::info!("milestone {level}, speed {:.4}", state.player.speed);
        events.push(GameEvent::Milestone { level });
    }

    // Cosmetic hazard motion; also refreshes every collider for this tick
    state.hazards.animate(time, dt, state.time_ticks);

    // Broad-phase collision against the refreshed boxes
    let player_box = state.player.collision_box(&state.track, tuning);
    if any_collision(&player_box, state.hazards.colliders(state.time_ticks)) {
        log::info!("crash at progress {:.3}", state.player.progress);
        state.phase = RunPhase::Crashed;
        events.push(GameEvent::Crashed);
        return events;
    }

    // Lap transition: theme cycle, speed bump, and hazard regeneration are
    // one batch; no partial transition is observable outside this tick.
    if state.laps.observe(state.player.progress, tuning) {
        let lap = state.laps.lap_count();
        state.themes.select_for_lap(lap);
        state.player.speed += tuning.speed_bump;
        state
            .hazards
            .regenerate(&state.track, &mut state.rng, tuning, lap);
        log::info!(
            "lap {lap} complete, theme {:?}, speed {:.4}",
            state.themes.current().display_name,
            state.player.speed
        );
        events.push(GameEvent::LapCompleted { lap });
    }

    events
}
