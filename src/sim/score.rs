//! Running score and high score
//!
//! The score is a fractional accumulator bumped every in-progress tick; the
//! integer part is what the player sees and what gets written to the ledger.

use std::time::SystemTime;

use super::state::GamePhase;
use crate::consts::{SCORE_CUE_INTERVAL, SCORE_DIGITS, SCORE_INCREMENT};
use crate::highscores::LedgerRecord;

#[derive(Debug, Clone, Default)]
pub struct Score {
    value: f64,
    high_score: u32,
    /// High score when this run started; records must beat this
    run_start_high: u32,
}

impl Score {
    /// Start at zero with a high score taken from the ledger
    pub fn new(high_score: u32) -> Self {
        Self {
            value: 0.0,
            high_score,
            run_start_high: high_score,
        }
    }

    /// Raw fractional score
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Truncated integer score
    pub fn current(&self) -> u32 {
        self.value as u32
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Add one tick's worth of score.
    ///
    /// Returns true when the score has just crossed a multiple of 100. The
    /// check is `score % 100 <= increment` on the float accumulator, so drift
    /// can make it fire twice or not at all around a boundary.
    pub fn score_up(&mut self) -> bool {
        self.value += SCORE_INCREMENT;
        self.current() != 0 && self.value % SCORE_CUE_INTERVAL <= SCORE_INCREMENT
    }

    /// Fold the final score into the high score as soon as the run ends.
    /// Qualification still compares against the high score the run started with.
    pub fn record_final(&mut self) {
        self.high_score = self.high_score.max(self.current());
    }

    /// Fold the finished run into the high score and start over from zero
    pub fn reset(&mut self) {
        self.record_final();
        self.run_start_high = self.high_score;
        self.value = 0.0;
    }

    /// Whether the integer score beats the high score known at startup or last reset
    pub fn beats_high_score(&self) -> bool {
        self.current() > self.run_start_high
    }

    /// Ledger line for this run, if it is a new record
    pub fn record_for(&self, player: &str, now: SystemTime) -> Option<LedgerRecord> {
        self.beats_high_score()
            .then(|| LedgerRecord::new(self.current(), player, now))
    }

    /// Zero-padded digits of the current score
    pub fn display(&self) -> String {
        format_digits(self.current() as u64, SCORE_DIGITS)
    }

    /// Zero-padded digits of the high score
    pub fn high_display(&self) -> String {
        format_digits(self.high_score as u64, SCORE_DIGITS)
    }

    /// The score blinks for a short stretch after every hundred, except on
    /// the game-over screen.
    pub fn digits_visible(&self, phase: GamePhase) -> bool {
        if phase == GamePhase::Over {
            return true;
        }
        let score = self.current();
        let blinking = score >= 12 && score % 100 <= 12;
        !blinking || score % 3 == 0
    }
}

/// Fixed-width, zero-padded decimal. Values wider than `width` keep only
/// their lowest-order digits.
pub fn format_digits(value: u64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let wrapped = match 10u64.checked_pow(width as u32) {
        Some(modulus) => value % modulus,
        None => value,
    };
    format!("{wrapped:0width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_digits() {
        assert_eq!(format_digits(42, 5), "00042");
        assert_eq!(format_digits(0, 5), "00000");
        assert_eq!(format_digits(99_999, 5), "99999");
        assert_eq!(format_digits(123_456, 5), "23456");
        assert_eq!(format_digits(100_000, 5), "00000");
        assert_eq!(format_digits(7, 0), "");
    }

    #[test]
    fn test_score_up_accumulates() {
        let mut score = Score::new(0);
        for _ in 0..25 {
            score.score_up();
        }
        assert_eq!(score.current(), 2);
        assert_eq!(score.display(), "00002");
    }

    #[test]
    fn test_no_cue_at_start() {
        let mut score = Score::new(0);
        for _ in 0..900 {
            assert!(!score.score_up());
        }
    }

    #[test]
    fn test_first_cue_near_one_hundred() {
        let mut score = Score::new(0);
        let mut first_cue = None;
        for tick in 1..=1_100u32 {
            if score.score_up() {
                first_cue = Some((tick, score.current()));
                break;
            }
        }
        let (tick, value) = first_cue.expect("cue should fire around 100");
        assert!((1_000..=1_001).contains(&tick), "fired at tick {tick}");
        assert_eq!(value, 100);
    }

    fn play_until(score: &mut Score, target: u32) {
        while score.current() < target {
            score.score_up();
        }
    }

    #[test]
    fn test_reset_folds_into_high_score() {
        let mut score = Score::new(250);
        play_until(&mut score, 200);
        assert!(!score.beats_high_score());
        score.reset();
        assert_eq!(score.high_score(), 250);
        assert_eq!(score.current(), 0);

        play_until(&mut score, 300);
        assert!(score.beats_high_score());
        score.reset();
        assert_eq!(score.high_score(), 300);
    }

    #[test]
    fn test_record_final_shows_new_high_but_still_qualifies() {
        let mut score = Score::new(250);
        play_until(&mut score, 300);
        score.record_final();
        assert_eq!(score.high_score(), 300);
        assert_eq!(score.high_display(), "00300");
        assert!(score.beats_high_score());
        assert!(score.record_for("Dino", SystemTime::UNIX_EPOCH).is_some());

        score.reset();
        assert!(!score.beats_high_score());
        play_until(&mut score, 300);
        assert!(score.record_for("Dino", SystemTime::UNIX_EPOCH).is_none());
    }

    #[test]
    fn test_record_final_keeps_higher_best() {
        let mut score = Score::new(250);
        play_until(&mut score, 200);
        score.record_final();
        assert_eq!(score.high_score(), 250);
        assert!(!score.beats_high_score());
    }

    #[test]
    fn test_record_only_for_new_best() {
        let mut score = Score::new(10);
        assert!(score.record_for("Dino", SystemTime::UNIX_EPOCH).is_none());
        play_until(&mut score, 20);
        let record = score
            .record_for("Dino", SystemTime::UNIX_EPOCH)
            .expect("20 beats 10");
        assert_eq!(record.result, 20);
        assert_eq!(record.player, "Dino");
    }

    #[test]
    fn test_blink_window() {
        let mut score = Score::new(0);
        assert!(score.digits_visible(GamePhase::InProgress));

        // 101 is inside the window after 100 and not a multiple of 3
        play_until(&mut score, 101);
        assert!(!score.digits_visible(GamePhase::InProgress));
        assert!(score.digits_visible(GamePhase::Over));

        play_until(&mut score, 102);
        assert!(score.digits_visible(GamePhase::InProgress));

        play_until(&mut score, 113);
        assert!(score.digits_visible(GamePhase::InProgress));
    }
}
