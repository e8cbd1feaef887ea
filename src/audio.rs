//! Sound effects
//!
//! Procedurally described cues, no sample files. The game loop calls
//! `play`, which only queues the effect; a worker thread turns it into tones
//! and hands them to a `ToneOutput`.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Score crossed a multiple of 100
    ScoreUp,
    /// Runner hit an obstacle
    GameOver,
    /// Shield picked up
    PickupCollect,
}

/// One sine tone with an exponential fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    /// Offset from the start of the effect
    pub delay: Duration,
    pub duration: Duration,
    pub gain: f32,
}

impl SoundEffect {
    /// Tones making up this effect at the given volume
    pub fn tones(&self, vol: f32) -> Vec<Tone> {
        if vol <= 0.0 {
            return Vec::new();
        }
        match self {
            // Quick rising chirp
            SoundEffect::ScoreUp => arpeggio(&[500.0, 700.0, 1000.0], 60, 150, vol * 0.25),
            // Slow descend
            SoundEffect::GameOver => arpeggio(&[400.0, 350.0, 300.0, 200.0], 200, 400, vol * 0.3),
            SoundEffect::PickupCollect => arpeggio(&[600.0, 800.0, 1000.0], 80, 200, vol * 0.25),
        }
    }
}

fn arpeggio(freqs: &[f32], step_ms: u64, length_ms: u64, gain: f32) -> Vec<Tone> {
    freqs
        .iter()
        .enumerate()
        .map(|(i, &freq_hz)| Tone {
            freq_hz,
            delay: Duration::from_millis(i as u64 * step_ms),
            duration: Duration::from_millis(length_ms),
            gain,
        })
        .collect()
}

/// Where the audio worker sends finished effects
pub trait ToneOutput: Send + 'static {
    fn emit(&mut self, effect: SoundEffect, tones: &[Tone]) -> io::Result<()>;
}

/// Rings the terminal bell once per effect
#[derive(Debug, Default)]
pub struct TerminalBell;

impl ToneOutput for TerminalBell {
    fn emit(&mut self, _effect: SoundEffect, _tones: &[Tone]) -> io::Result<()> {
        let mut err = io::stderr().lock();
        err.write_all(b"\x07")?;
        err.flush()
    }
}

/// What the game loop needs from audio
pub trait AudioSink {
    /// Queue an effect. Never blocks.
    fn play(&self, effect: SoundEffect);

    /// Latest frame pacing, for outputs that want to line up with the loop
    fn set_pacing_hint(&self, _sleep: Duration) {}
}

/// Audio that makes no sound (tests, or when output fails to start)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&self, _effect: SoundEffect) {}
}

/// Audio manager for the game
pub struct AudioManager {
    tx: Option<Sender<SoundEffect>>,
    worker: Option<JoinHandle<()>>,
    pacing_hint_nanos: AtomicU64,
}

impl AudioManager {
    /// Start the worker thread with volume taken from the settings
    pub fn spawn(settings: &Settings, output: impl ToneOutput) -> io::Result<Self> {
        Self::with_volume(settings.effective_volume(), output)
    }

    pub fn with_volume(vol: f32, mut output: impl ToneOutput) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel::<SoundEffect>();
        let worker = thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                for effect in rx {
                    let tones = effect.tones(vol);
                    if tones.is_empty() {
                        continue;
                    }
                    if let Err(e) = output.emit(effect, &tones) {
                        log::warn!("Failed to play {:?}: {}", effect, e);
                    }
                }
                log::debug!("Audio worker stopped");
            })?;

        Ok(Self {
            tx: Some(tx),
            worker: Some(worker),
            pacing_hint_nanos: AtomicU64::new(0),
        })
    }

    /// Most recent pacing hint from the loop
    pub fn pacing_hint(&self) -> Duration {
        Duration::from_nanos(self.pacing_hint_nanos.load(Ordering::Relaxed))
    }

    /// Stop accepting effects and wait for queued ones to finish
    pub fn shutdown(mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("Audio worker panicked");
            }
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&self, effect: SoundEffect) {
        let Some(tx) = &self.tx else { return };
        if tx.send(effect).is_err() {
            log::debug!("Audio worker gone, dropping {:?}", effect);
        }
    }

    fn set_pacing_hint(&self, sleep: Duration) {
        let nanos = u64::try_from(sleep.as_nanos()).unwrap_or(u64::MAX);
        self.pacing_hint_nanos.store(nanos, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<SoundEffect>>>);

    impl ToneOutput for Recorder {
        fn emit(&mut self, effect: SoundEffect, _tones: &[Tone]) -> io::Result<()> {
            self.0.lock().unwrap().push(effect);
            Ok(())
        }
    }

    #[test]
    fn test_worker_plays_in_order() {
        let recorder = Recorder::default();
        let audio = AudioManager::with_volume(0.5, recorder.clone()).unwrap();
        audio.play(SoundEffect::PickupCollect);
        audio.play(SoundEffect::GameOver);
        audio.shutdown();

        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![SoundEffect::PickupCollect, SoundEffect::GameOver]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let recorder = Recorder::default();
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let audio = AudioManager::spawn(&settings, recorder.clone()).unwrap();
        audio.play(SoundEffect::ScoreUp);
        audio.shutdown();
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_pacing_hint_round_trips() {
        let audio = AudioManager::with_volume(1.0, Recorder::default()).unwrap();
        assert_eq!(audio.pacing_hint(), Duration::ZERO);
        audio.set_pacing_hint(Duration::from_millis(7));
        assert_eq!(audio.pacing_hint(), Duration::from_millis(7));
        audio.shutdown();
    }

    #[test]
    fn test_tones_scale_with_volume() {
        let tones = SoundEffect::GameOver.tones(1.0);
        assert_eq!(tones.len(), 4);
        assert!(tones.windows(2).all(|w| w[0].freq_hz > w[1].freq_hz));
        assert!(tones.windows(2).all(|w| w[0].delay < w[1].delay));
        let quiet = SoundEffect::GameOver.tones(0.5);
        assert!(quiet[0].gain < tones[0].gain);
    }
}
