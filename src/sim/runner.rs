//! The player-controlled runner
//!
//! The runner never moves horizontally; the world scrolls past it. Only the
//! vertical axis is integrated, and the feet are the reference point so that
//! switching between standing and ducking keeps the runner on the ground.

use glam::Vec2;

use super::hitbox::Hitbox;
use crate::consts::*;

/// Runner sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Run,
    Jump,
    /// Ducking: shorter, wider hitbox
    DownRun,
    /// Terminal until `reset`
    Dead,
}

impl RunnerState {
    pub fn size(&self) -> Vec2 {
        match self {
            RunnerState::DownRun => Vec2::new(RUNNER_DUCK_WIDTH, RUNNER_DUCK_HEIGHT),
            _ => Vec2::new(RUNNER_WIDTH, RUNNER_HEIGHT),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Runner {
    /// x is the left edge, y is the feet line
    pos: Vec2,
    vel_y: f32,
    state: RunnerState,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(RUNNER_X, GROUND_Y),
            vel_y: 0.0,
            state: RunnerState::Run,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Left edge and feet line
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn velocity_y(&self) -> f32 {
        self.vel_y
    }

    pub fn is_airborne(&self) -> bool {
        self.pos.y < GROUND_Y
    }

    pub fn is_dead(&self) -> bool {
        self.state == RunnerState::Dead
    }

    /// Start a jump. No-op while airborne or dead.
    pub fn jump(&mut self) {
        if self.is_airborne() || self.is_dead() {
            return;
        }
        self.vel_y = JUMP_VELOCITY;
        self.state = RunnerState::Jump;
    }

    /// Set the sub-state directly (input handlers). Dead can only be left via `reset`.
    pub fn set_state(&mut self, state: RunnerState) {
        if self.is_dead() {
            return;
        }
        self.state = state;
    }

    /// Integrate one tick of gravity
    pub fn update_position(&mut self) {
        if self.is_dead() {
            return;
        }
        if !self.is_airborne() && self.vel_y >= 0.0 {
            return;
        }

        self.vel_y += GRAVITY;
        self.pos.y += self.vel_y;

        if self.pos.y >= GROUND_Y {
            self.pos.y = GROUND_Y;
            self.vel_y = 0.0;
            if self.state == RunnerState::Jump {
                self.state = RunnerState::Run;
            }
        }
    }

    /// Sprite bounds for the current sub-state
    pub fn bounds(&self) -> Hitbox {
        let size = self.state.size();
        Hitbox::from_min_size(Vec2::new(self.pos.x, self.pos.y - size.y), size)
    }

    /// Collision box: sprite bounds shrunk slightly so grazes don't count
    pub fn hitbox(&self) -> Hitbox {
        self.bounds().inset(RUNNER_HITBOX_INSET)
    }

    /// Back on the ground, running, alive
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Freeze in place and switch to the dead sub-state. Idempotent.
    pub fn game_over(&mut self) {
        self.vel_y = 0.0;
        self.state = RunnerState::Dead;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_until_landed(runner: &mut Runner) -> u32 {
        let mut ticks = 0;
        while runner.is_airborne() || runner.state() == RunnerState::Jump {
            runner.update_position();
            ticks += 1;
            assert!(ticks < 10_000, "runner never landed");
        }
        ticks
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut runner = Runner::new();
        runner.jump();
        assert_eq!(runner.state(), RunnerState::Jump);
        assert_eq!(runner.velocity_y(), JUMP_VELOCITY);

        runner.update_position();
        assert!(runner.is_airborne());

        let ticks = ticks_until_landed(&mut runner);
        assert!(ticks > 10);
        assert_eq!(runner.position().y, GROUND_Y);
        assert_eq!(runner.velocity_y(), 0.0);
        assert_eq!(runner.state(), RunnerState::Run);
    }

    #[test]
    fn test_jump_is_noop_while_airborne() {
        let mut runner = Runner::new();
        runner.jump();
        runner.update_position();
        runner.update_position();
        let vel = runner.velocity_y();
        runner.jump();
        assert_eq!(runner.velocity_y(), vel);
    }

    #[test]
    fn test_grounded_runner_does_not_move() {
        let mut runner = Runner::new();
        runner.update_position();
        assert_eq!(runner.position().y, GROUND_Y);
        assert_eq!(runner.state(), RunnerState::Run);
    }

    #[test]
    fn test_duck_hitbox_is_lower() {
        let mut runner = Runner::new();
        let standing = runner.hitbox();
        runner.set_state(RunnerState::DownRun);
        let ducking = runner.hitbox();
        assert!(ducking.top() > standing.top());
        assert_eq!(ducking.bottom(), standing.bottom());
    }

    #[test]
    fn test_game_over_freezes_and_is_idempotent() {
        let mut runner = Runner::new();
        runner.jump();
        runner.update_position();
        let frozen = runner.position();

        runner.game_over();
        runner.game_over();
        assert!(runner.is_dead());

        runner.update_position();
        runner.jump();
        runner.set_state(RunnerState::Run);
        assert_eq!(runner.position(), frozen);
        assert_eq!(runner.state(), RunnerState::Dead);

        runner.reset();
        assert_eq!(runner.state(), RunnerState::Run);
        assert_eq!(runner.position().y, GROUND_Y);
    }
}
