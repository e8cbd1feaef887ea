//! Fixed-rate game loop
//!
//! Runs on its own thread. Every iteration drains queued input, advances the
//! simulation one tick, carries out the side effects of whatever happened
//! (ledger write, sounds), renders, then sleeps out the rest of the frame.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant, SystemTime};

use glam::Vec2;

use crate::audio::{AudioSink, SoundEffect};
use crate::highscores::Ledger;
use crate::platform::InputQueue;
use crate::renderer::{self, Frame, RenderSurface};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState};

/// Sleep rules between ticks
pub mod pacing {
    use std::time::Duration;

    use crate::consts::{GAME_OVER_SLEEP, MIN_TICK_SLEEP};
    use crate::sim::GamePhase;

    /// Rest of the target interval, never less than the minimum. An overrun
    /// frame gets the minimum rather than skipping ticks.
    pub fn frame_sleep(target: Duration, frame_time: Duration) -> Duration {
        target.saturating_sub(frame_time).max(MIN_TICK_SLEEP)
    }

    /// Sleep before the next tick. The game-over screen gets a long pause
    /// so a held key doesn't restart straight away.
    pub fn next_sleep(target: Duration, frame_time: Duration, phase: GamePhase) -> Duration {
        match phase {
            GamePhase::Over => GAME_OVER_SLEEP,
            _ => frame_sleep(target, frame_time),
        }
    }
}

pub struct GameLoop<R, A> {
    state: GameState,
    ledger: Ledger,
    player: String,
    input: InputQueue,
    renderer: R,
    audio: A,
    target: Duration,
    screen_shake: bool,
}

impl<R: RenderSurface, A: AudioSink> GameLoop<R, A> {
    /// Build the loop, loading the high score from the ledger
    pub fn new(settings: &Settings, input: InputQueue, renderer: R, audio: A) -> Self {
        let ledger = Ledger::new(&settings.ledger_path);
        let high_score = ledger.load_high_score();
        let seed = settings.resolve_seed();
        log::info!(
            "Game loop ready: {} Hz, seed {}, player {}",
            settings.tick_rate_hz,
            seed,
            settings.player_tag()
        );

        let mut state = GameState::new(seed, high_score);
        state.show_hitboxes = settings.show_hitboxes;

        Self {
            state,
            ledger,
            player: settings.player_tag(),
            input,
            renderer,
            audio,
            target: settings.tick_interval(),
            screen_shake: settings.effective_screen_shake(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tools and tests that stage a scene
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// One iteration without the sleep
    pub fn step(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let actions = self.input.drain();
        let events = sim::tick(&mut self.state, &actions, elapsed);

        for event in &events {
            self.handle_event(*event);
        }

        let mut frame = Frame::capture(&self.state);
        if !self.screen_shake {
            frame.shake = Vec2::ZERO;
        }
        if let Err(e) = renderer::render(&mut self.renderer, &frame) {
            log::warn!("Render failed: {}", e);
        }

        events
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::ScoreMilestone => self.audio.play(SoundEffect::ScoreUp),
            GameEvent::ShieldSpawned => {}
            GameEvent::ShieldCollected => self.audio.play(SoundEffect::PickupCollect),
            GameEvent::GameOver { score } => {
                self.write_score(score);
                self.audio.play(SoundEffect::GameOver);
            }
        }
    }

    /// Append the finished run to the ledger if it beats the high score
    fn write_score(&self, score: u32) {
        let Some(record) = self.state.score.record_for(&self.player, SystemTime::now()) else {
            log::debug!("Score {} does not beat {}", score, self.state.score.high_score());
            return;
        };
        match self.ledger.append(&record) {
            Ok(()) => log::info!("New high score {} saved to {}", score, self.ledger.path().display()),
            Err(e) => log::warn!("{e}"),
        }
    }

    /// Run forever at the target rate
    pub fn run(mut self) -> ! {
        let mut last_tick = Instant::now();
        loop {
            let frame_start = Instant::now();
            self.step(frame_start - last_tick);
            last_tick = frame_start;

            let frame_time = frame_start.elapsed();
            self.audio
                .set_pacing_hint(pacing::frame_sleep(self.target, frame_time));
            thread::sleep(pacing::next_sleep(self.target, frame_time, self.state.phase));
        }
    }
}

impl<R, A> GameLoop<R, A>
where
    R: RenderSurface + Send + 'static,
    A: AudioSink + Send + 'static,
{
    /// Start the loop on its own thread
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("game-loop".into())
            .spawn(move || {
                self.run();
            })
    }
}
