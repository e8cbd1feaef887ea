//! High score ledger
//!
//! A plain-text, append-only file with one record per line:
//!
//! ```text
//! result=<int>,date=<yyyyMMdd_HHmmss>,player=<tag>
//! ```
//!
//! The high score is recomputed at startup by scanning every line; lines
//! that don't match the record pattern are skipped.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

/// Default ledger file name
pub const DEFAULT_LEDGER_FILE: &str = "best-scores.txt";
/// Player tag written when none is configured
pub const DEFAULT_PLAYER: &str = "Dino";

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to read score ledger {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to append to score ledger {path}: {source}")]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A single finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    /// Final integer score
    pub result: u32,
    /// `yyyyMMdd_HHmmss` (UTC)
    pub date: String,
    pub player: String,
}

impl LedgerRecord {
    pub fn new(result: u32, player: &str, when: SystemTime) -> Self {
        Self {
            result,
            date: format_timestamp(when),
            player: player.to_string(),
        }
    }

    /// Find the first `result=<digits>,date=<digits/_>,player=<word>` in a line.
    ///
    /// The pattern may appear anywhere in the line; trailing text after the
    /// player tag is ignored.
    pub fn parse(line: &str) -> Option<Self> {
        line.match_indices("result=")
            .find_map(|(start, _)| Self::parse_at(&line[start..]))
    }

    fn parse_at(text: &str) -> Option<Self> {
        let rest = text.strip_prefix("result=")?;
        let (result, rest) = split_nonempty(rest, |c| c.is_ascii_digit())?;
        let rest = rest.strip_prefix(",date=")?;
        let (date, rest) = split_nonempty(rest, |c| c.is_ascii_digit() || c == '_')?;
        let rest = rest.strip_prefix(",player=")?;
        let (player, _) = split_nonempty(rest, is_word_char)?;

        Some(Self {
            result: result.parse().ok()?,
            date: date.to_string(),
            player: player.to_string(),
        })
    }
}

impl fmt::Display for LedgerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "result={},date={},player={}",
            self.result, self.date, self.player
        )
    }
}

/// Characters allowed in a player tag
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split off the longest non-empty prefix matching `pred`
fn split_nonempty(text: &str, pred: impl Fn(char) -> bool) -> Option<(&str, &str)> {
    let end = text.find(|c: char| !pred(c)).unwrap_or(text.len());
    (end > 0).then(|| text.split_at(end))
}

/// File-backed ledger
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All well-formed records, in file order. A missing file has no records.
    pub fn read_records(&self) -> Result<Vec<LedgerRecord>, LedgerError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LedgerError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut records = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            match LedgerRecord::parse(line) {
                Some(record) => records.push(record),
                None if line.trim().is_empty() => {}
                None => log::debug!("Skipping malformed ledger line {}: {:?}", index + 1, line),
            }
        }
        Ok(records)
    }

    /// Best result on record, if any
    pub fn scan_high_score(&self) -> Result<Option<u32>, LedgerError> {
        Ok(self.read_records()?.iter().map(|r| r.result).max())
    }

    /// High score for startup. Failures are logged and count as "no high score".
    pub fn load_high_score(&self) -> u32 {
        match self.scan_high_score() {
            Ok(Some(high)) => {
                log::info!("Loaded high score {} from {}", high, self.path.display());
                high
            }
            Ok(None) => {
                log::info!("No recorded scores in {}, starting fresh", self.path.display());
                0
            }
            Err(e) => {
                log::warn!("{e}; starting without a high score");
                0
            }
        }
    }

    /// Append one record as a new line
    pub fn append(&self, record: &LedgerRecord) -> Result<(), LedgerError> {
        let to_error = |source| LedgerError::Append {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(to_error)?;
        writeln!(file, "{record}").map_err(to_error)?;
        Ok(())
    }
}

/// Format a timestamp as `yyyyMMdd_HHmmss` in UTC
pub fn format_timestamp(when: SystemTime) -> String {
    let secs = when
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let days = (secs / 86_400) as i64;
    let time_of_day = secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        year,
        month,
        day,
        time_of_day / 3_600,
        (time_of_day % 3_600) / 60,
        time_of_day % 60
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian (year, month, day)
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
