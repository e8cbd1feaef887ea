//! Score ledger and settings against a real file system

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use dino_runner::GameLoop;
use dino_runner::audio::SilentAudio;
use dino_runner::highscores::{Ledger, LedgerError, LedgerRecord};
use dino_runner::platform::{self, InputSender};
use dino_runner::renderer::{Frame, NullSurface};
use dino_runner::settings::{Settings, SettingsError};
use dino_runner::sim::{GameEvent, GamePhase, InputAction, ObstacleKind};

type TestResult = Result<(), Box<dyn Error>>;

const FRAME: Duration = Duration::from_millis(10);

type TestLoop = GameLoop<NullSurface, SilentAudio>;

fn loop_for(ledger_path: &Path) -> (TestLoop, InputSender) {
    let settings = Settings {
        ledger_path: ledger_path.to_path_buf(),
        seed: Some(5),
        ..Default::default()
    };
    let (tx, queue) = platform::channel();
    (GameLoop::new(&settings, queue, NullSurface, SilentAudio), tx)
}

/// Step until the loop reaches `phase`
fn step_until(game: &mut TestLoop, phase: GamePhase) {
    for _ in 0..1_000 {
        if game.state().phase == phase {
            return;
        }
        game.step(FRAME);
    }
    panic!("never reached {phase:?}");
}

/// Run the score up to `target`, then crash into a cactus on the next step
fn crash_at(game: &mut TestLoop, target: u32) -> Vec<GameEvent> {
    let state = game.state_mut();
    while state.score.current() < target {
        state.score.score_up();
    }
    let x = state.runner.position().x;
    state.obstacles.insert(ObstacleKind::LargeCactus, x);
    game.step(FRAME)
}

#[test]
fn ledger_scenario_only_appends_new_bests() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("best-scores.txt");
    fs::write(
        &path,
        "result=100,date=20240101_120000,player=Dino\n\
         not a record\n\
         result=250,date=20240102_120000,player=Dino\n",
    )?;
    let ledger = Ledger::new(&path);
    assert_eq!(ledger.scan_high_score()?, Some(250));

    let (mut game, tx) = loop_for(&path);
    assert_eq!(game.state().score.high_score(), 250);

    // Title screen, intro, then the first run
    tx.send(InputAction::ConfirmReleased);
    step_until(&mut game, GamePhase::InProgress);
    let events = crash_at(&mut game, 300);
    assert_eq!(events, vec![GameEvent::GameOver { score: 300 }]);
    assert_eq!(game.state().phase, GamePhase::Over);

    let records = ledger.read_records()?;
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].result, 300);
    assert_eq!(records[2].player, "Dino");
    assert_eq!(ledger.scan_high_score()?, Some(300));
    // The game-over screen already shows the new best
    assert_eq!(Frame::capture(game.state()).high_score_digits, "00300");

    tx.send(InputAction::ConfirmReleased);
    game.step(FRAME);
    assert_eq!(game.state().phase, GamePhase::InProgress);
    crash_at(&mut game, 200);
    assert_eq!(game.state().phase, GamePhase::Over);
    assert_eq!(ledger.read_records()?.len(), 3);
    assert_eq!(game.state().score.high_score(), 300);
    Ok(())
}

#[test]
fn tying_the_high_score_does_not_append() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("best-scores.txt");
    let ledger = Ledger::new(&path);
    ledger.append(&LedgerRecord::new(120, "Dino", SystemTime::now()))?;

    let (mut game, _tx) = loop_for(&path);
    game.state_mut().phase = GamePhase::InProgress;
    crash_at(&mut game, 120);
    assert_eq!(game.state().phase, GamePhase::Over);
    assert_eq!(ledger.read_records()?.len(), 1);
    Ok(())
}

#[test]
fn appended_lines_match_the_record_format() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("best-scores.txt");
    let ledger = Ledger::new(&path);
    ledger.append(&LedgerRecord::new(42, "Rex_2", SystemTime::UNIX_EPOCH))?;
    ledger.append(&LedgerRecord::new(43, "Rex_2", SystemTime::UNIX_EPOCH))?;

    let contents = fs::read_to_string(&path)?;
    assert_eq!(
        contents,
        "result=42,date=19700101_000000,player=Rex_2\n\
         result=43,date=19700101_000000,player=Rex_2\n"
    );
    Ok(())
}

#[test]
fn unreadable_ledger_means_no_high_score() -> TestResult {
    let dir = tempfile::tempdir()?;
    // A directory where the file should be
    let ledger = Ledger::new(dir.path());

    assert!(matches!(ledger.read_records(), Err(LedgerError::Read { .. })));
    assert_eq!(ledger.load_high_score(), 0);
    let record = LedgerRecord::new(10, "Dino", SystemTime::now());
    assert!(matches!(ledger.append(&record), Err(LedgerError::Append { .. })));
    Ok(())
}

#[test]
fn game_loop_starts_with_persisted_high_score() -> TestResult {
    let dir = tempfile::tempdir()?;
    let ledger_path = dir.path().join("best-scores.txt");
    fs::write(&ledger_path, "result=250,date=20240102_120000,player=Dino\n")?;

    let settings = Settings {
        ledger_path,
        seed: Some(5),
        ..Default::default()
    };
    let (_tx, queue) = platform::channel();
    let game = GameLoop::new(&settings, queue, NullSurface, SilentAudio);
    assert_eq!(game.state().score.high_score(), 250);
    Ok(())
}

#[test]
fn settings_round_trip_and_bad_json() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("dino-runner.json");

    let settings = Settings {
        player: "Rex".to_string(),
        seed: Some(99),
        muted: true,
        ..Default::default()
    };
    settings.save(&path)?;
    assert_eq!(Settings::try_load(&path)?, settings);

    fs::write(&path, "{ not json")?;
    assert!(matches!(
        Settings::try_load(&path),
        Err(SettingsError::Parse { .. })
    ));
    assert_eq!(Settings::load(&path), Settings::default());
    Ok(())
}
