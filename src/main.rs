//! Dino Runner - terminal entry point

use std::fs::File;
use std::io::{self, BufWriter, stdout};
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal,
};

use dino_runner::GameLoop;
use dino_runner::audio::{AudioManager, TerminalBell};
use dino_runner::platform::{self, InputSender, KeyBinder, KeyOutcome};
use dino_runner::renderer::TerminalSurface;
use dino_runner::settings::Settings;

/// Log file written next to the settings file
const LOG_FILE: &str = "dino-runner.log";
/// How often the input thread wakes up without key events
const INPUT_POLL: Duration = Duration::from_millis(20);

/// The terminal belongs to the game, so logs go to a file
fn init_logging(settings_path: &Path) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    let log_path = settings_path.with_file_name(LOG_FILE);
    match File::create(&log_path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // Nowhere safe to write; stay quiet rather than scribble on the game
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn main() -> io::Result<()> {
    let settings_path = Settings::default_path();
    init_logging(&settings_path);
    log::info!("Dino Runner starting...");

    let settings = Settings::load(&settings_path);

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key release events need the keyboard enhancement protocol (kitty, Ghostty, ...)
    let release_events = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("Key release events: {}", release_events);

    let result = run(&settings, release_events);

    // Always restore the terminal
    if release_events {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("Exiting with error: {}", e);
    }
    result
}

fn run(settings: &Settings, release_events: bool) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let surface = TerminalSurface::new(BufWriter::new(stdout()), settings.layout, cols, rows);
    let audio = AudioManager::spawn(settings, TerminalBell)?;

    let (tx, queue) = platform::channel();
    let game = GameLoop::new(settings, queue, surface, audio).spawn()?;

    read_keys(&tx, KeyBinder::new(release_events), || game.is_finished())?;
    log::info!("Dino Runner shutting down");
    Ok(())
}

/// Forward key events to the loop until the player quits or the loop dies
fn read_keys(
    tx: &InputSender,
    mut binder: KeyBinder,
    loop_finished: impl Fn() -> bool,
) -> io::Result<()> {
    loop {
        if loop_finished() {
            log::error!("Game loop stopped unexpectedly");
            return Ok(());
        }

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                match binder.map(key, Instant::now()) {
                    KeyOutcome::Quit => return Ok(()),
                    KeyOutcome::Actions(actions) => {
                        for action in actions {
                            tx.send(action);
                        }
                    }
                }
            }
        }

        if let Some(action) = binder.expire(Instant::now()) {
            tx.send(action);
        }
    }
}
