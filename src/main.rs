use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tomatimer::{
    config::{Config, ConfigStore, FileConfigStore, MAX_TICK_MS, MIN_TICK_MS},
    keys::KeyRouter,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    selection::DEFAULT_PRESETS,
    session::Session,
    ui::SessionView,
};
use tracing::info;

/// pomodoro countdown timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Pick one of the preset durations, then start, stop or reset the countdown with single keys."
)]
pub struct Cli {
    /// clock resolution in milliseconds while the countdown runs
    #[clap(short = 't', long, value_parser = clap::value_parser!(u64).range(MIN_TICK_MS..=MAX_TICK_MS))]
    tick_ms: Option<u64>,

    /// hide the progress bar under the countdown
    #[clap(long)]
    no_progress: bool,

    /// write logs to this file (filter with TOMATIMER_LOG, default "info")
    #[clap(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// save the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layers command line overrides on top of the stored config
    fn apply(&self, stored: Config) -> Config {
        Config {
            tick_ms: self.tick_ms.unwrap_or(stored.tick_ms),
            show_progress: stored.show_progress && !self.no_progress,
        }
        .normalized()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init(cli.log_file.as_deref())?;

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved config");
    }

    let mut session = Session::new(&DEFAULT_PRESETS)?;

    enable_raw_mode()?;
    let result = run_tui(&mut session, &config);
    let restored = restore_terminal();
    result?;
    restored?;

    if let Some(preset) = session.chosen() {
        println!("Timer started for {}", preset.label);
    }

    Ok(())
}

fn run_tui(session: &mut Session<'_>, config: &Config) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(tick_ms = config.tick_ms, "session started");

    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(config.tick_ms)),
    );
    runner.drive(session, &KeyRouter::default(), |s| {
        terminal
            .draw(|f| f.render_widget(SessionView::new(s, config.show_progress), f.area()))
            .map(|_| ())
    })?;

    info!(phase = %session.phase(), "session ended");
    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}
