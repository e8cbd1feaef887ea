//! Game settings and preferences
//!
//! Stored as JSON next to the score ledger. Missing fields take their
//! defaults, so older files keep loading as options are added.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GROUND_Y, SCORE_DIGITS, TICK_RATE_HZ, WORLD_HEIGHT, WORLD_WIDTH};
use crate::highscores::{DEFAULT_LEDGER_FILE, DEFAULT_PLAYER, is_word_char};

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "dino-runner.json";
/// Environment variable overriding the settings path
pub const SETTINGS_ENV: &str = "DINO_RUNNER_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Screen geometry handed to the render surface. Never changes after startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_y: f32,
    /// Size of one score digit cell
    pub digit_width: f32,
    pub digit_height: f32,
    /// Digits in the score display
    pub score_length: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            screen_width: WORLD_WIDTH,
            screen_height: WORLD_HEIGHT,
            ground_y: GROUND_Y,
            digit_width: 20.0,
            digit_height: 21.0,
            score_length: SCORE_DIGITS,
        }
    }
}

impl Layout {
    /// Score block width plus the right-hand margin
    fn score_span(&self) -> f32 {
        self.digit_width * self.score_length as f32 + self.margin()
    }

    fn margin(&self) -> f32 {
        self.screen_width / 100.0
    }

    /// Left edge of the running score
    pub fn score_x(&self) -> f32 {
        self.screen_width - self.score_span()
    }

    /// Left edge of the high score digits
    pub fn high_score_x(&self) -> f32 {
        self.screen_width - 2.0 * self.score_span()
    }

    /// Left edge of the "HI" label
    pub fn high_label_x(&self) -> f32 {
        self.screen_width - (2.0 * self.score_span() + 2.0 * self.digit_width + self.margin())
    }

    /// Top edge of the score row
    pub fn score_y(&self) -> f32 {
        self.screen_height / 25.0
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Persistence ===
    /// Append-only high score ledger
    pub ledger_path: PathBuf,
    /// Tag written with each record (letters, digits, underscore)
    pub player: String,

    // === Simulation ===
    /// Target ticks per second
    pub tick_rate_hz: u32,
    /// Fixed RNG seed; derived from the clock when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Visual Effects ===
    /// Screen shake when the runner crashes
    pub screen_shake: bool,
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,

    // === Debug ===
    /// Start with the hitbox overlay on
    pub show_hitboxes: bool,

    pub layout: Layout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_FILE),
            player: DEFAULT_PLAYER.to_string(),

            tick_rate_hz: TICK_RATE_HZ,
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            screen_shake: true,
            reduced_motion: false,

            show_hitboxes: false,

            layout: Layout::default(),
        }
    }
}

impl Settings {
    /// Settings path from the environment, or the default file name
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read settings, falling back to the defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let to_error = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| to_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(path, json).map_err(to_error)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Target time between ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate_hz.max(1)
    }

    /// Player tag safe to write to the ledger. Anything the ledger scan
    /// would not read back is dropped; an empty result falls back to the default.
    pub fn player_tag(&self) -> String {
        let tag: String = self.player.chars().filter(|&c| is_word_char(c)).collect();
        if tag.is_empty() {
            DEFAULT_PLAYER.to_string()
        } else {
            tag
        }
    }

    /// Effective sound effect volume (respects mute)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Seed for this session
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.player_tag(), "Dino");
        assert_eq!(settings.tick_interval(), Duration::from_millis(10));
        assert_eq!(settings.ledger_path, PathBuf::from("best-scores.txt"));
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "player": "Rex", "seed": 7, "layout": { "digit_width": 10.0 } }"#)
                .unwrap();
        assert_eq!(settings.player, "Rex");
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tick_rate_hz, TICK_RATE_HZ);
        assert_eq!(settings.layout.digit_width, 10.0);
        assert_eq!(settings.layout.screen_width, WORLD_WIDTH);
    }

    #[test]
    fn test_player_tag_sanitized() {
        let mut settings = Settings {
            player: "Dr. Rex-2".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.player_tag(), "DrRex2");
        settings.player = " ,= ".to_string();
        assert_eq!(settings.player_tag(), "Dino");
    }

    #[test]
    fn test_muted_volume() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut settings = Settings::default();
        assert!(settings.effective_screen_shake());
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_zero_tick_rate_does_not_divide_by_zero() {
        let settings = Settings {
            tick_rate_hz: 0,
            ..Default::default()
        };
        assert_eq!(settings.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_missing_file_is_default() {
        let settings = Settings::try_load(Path::new("/nonexistent-dino-runner/settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_layout_score_positions() {
        let layout = Layout::default();
        assert_eq!(layout.score_x(), 692.0);
        assert_eq!(layout.high_score_x(), 584.0);
        assert_eq!(layout.high_label_x(), 536.0);
        assert_eq!(layout.score_y(), 20.0);
    }
}
