//! BLOCKFALL - falling blocks in the terminal

mod canvas;
mod input;
mod ui;

use blockfall::{AutoRepeat, Game, Score, Settings};
use canvas::TileCanvas;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use input::{Action, InputHandler};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blockfall=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    // Write the file on first run so it can be edited
    if Settings::settings_path().is_some_and(|path| !path.exists()) {
        if let Err(e) = settings.save() {
            eprintln!("Warning: Could not save settings: {}", e);
        }
    }

    if let Ok(score) = &result {
        println!("\nThanks for playing BLOCKFALL!");
        println!("Final Score: {}", score.points);
        println!("Lines: {} | Pieces: {}", score.lines, score.pieces);
    }

    result.map(|_| ())
}

/// Main loop: draw, gather a frame of input, tick the session
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> io::Result<Score> {
    let config = settings.game_config();
    let canvas = TileCanvas::default();
    let mut game = match settings.gameplay.seed {
        Some(seed) => Game::with_seed(config, seed, canvas),
        None => Game::new(config, canvas),
    };
    let mut input = InputHandler::from_settings(settings);
    let mut repeat = AutoRepeat::new(settings.repeat_interval());
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::render_game(frame, &game, settings))?;

        // Drain events until the frame is due
        let deadline = last_frame + FRAME_DURATION;
        while event::poll(deadline.saturating_duration_since(Instant::now()))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match key.kind {
                KeyEventKind::Release => input.key_up(key),
                _ => {
                    if input.key_down(key, Instant::now()).contains(&Action::Quit) {
                        tracing::info!("Quit requested");
                        return Ok(game.score().clone());
                    }
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame);
        last_frame = now;

        let tick = input.frame_input(now);
        game.tick(dt, &tick, &mut repeat);
    }
}
