//! Fixed timestep simulation tick
//!
//! Applies queued input, then advances the active phase by one step.

use std::time::Duration;

use super::input::{InputAction, apply_input};
use super::runner::RunnerState;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the game state by one tick.
///
/// `elapsed` is the wall time since the previous tick. It only drives the
/// timers (shield, pickup spawn, screen shake); everything else moves a fixed
/// amount per tick. A tick that restarts from the game-over screen counts
/// as zero elapsed time, so the wait on that screen is not charged to the
/// new run.
pub fn tick(state: &mut GameState, actions: &[InputAction], elapsed: Duration) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut elapsed = elapsed;

    for &action in actions {
        if let Some((from, to)) = apply_input(state, action) {
            log::debug!("Phase {:?} -> {:?} on {:?}", from, to, action);
            if from == GamePhase::Over && to == GamePhase::InProgress {
                elapsed = Duration::ZERO;
            }
        }
    }

    state.update_shake(elapsed);

    match state.phase {
        GamePhase::Start | GamePhase::Over | GamePhase::Paused => {}
        GamePhase::Intro => tick_intro(state),
        GamePhase::InProgress => tick_in_progress(state, elapsed, &mut events),
    }

    events
}

fn tick_intro(state: &mut GameState) {
    if state.intro_jump_pending {
        state.intro_jump_pending = false;
        state.runner.jump();
    }

    state.runner.update_position();
    // Ground holds still until the opening jump lands
    if state.runner.state() == RunnerState::Run {
        state.land.update(state.speed);
    }
    state.clouds.update(state.speed);

    state.intro_countdown += state.speed;
    if state.intro_countdown <= 0.0 {
        log::debug!("Intro finished");
        state.phase = GamePhase::InProgress;
    }
}

fn tick_in_progress(state: &mut GameState, elapsed: Duration, events: &mut Vec<GameEvent>) {
    state.speed += SPEED_RAMP;
    let speed = state.speed;

    state.runner.update_position();
    state.land.update(speed);
    state.clouds.update(speed);
    state.obstacles.update(speed);
    state.shield.update(elapsed);

    let runner_box = state.runner.hitbox();
    let mut collected = false;
    state.pickups.retain_mut(|pickup| {
        pickup.advance(speed);
        if pickup.hitbox().intersects(&runner_box) {
            collected = true;
            return false;
        }
        !pickup.is_off_screen()
    });
    if collected {
        state.shield.activate();
        events.push(GameEvent::ShieldCollected);
    }

    state.since_shield_spawn += elapsed;
    if state.since_shield_spawn >= SHIELD_SPAWN_INTERVAL {
        state.since_shield_spawn = Duration::ZERO;
        let id = state.spawn_shield_pickup();
        log::debug!("Spawned shield pickup {}", id);
        events.push(GameEvent::ShieldSpawned);
    }

    if state.obstacles.is_collision(&runner_box) && !state.shield.is_active() {
        state.phase = GamePhase::Over;
        state.runner.game_over();
        state.trigger_shake();
        let score = state.score.current();
        state.score.record_final();
        log::info!("Game over at {} (speed {:.3})", score, state.speed);
        events.push(GameEvent::GameOver { score });
    } else if state.score.score_up() {
        events.push(GameEvent::ScoreMilestone);
    }
}
