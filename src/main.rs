use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use memory_match::config::{AppConfig, ConfigSource, LoggingConfig};
use memory_match::controller::{GameController, GameSettings};
use memory_match::scores::{FileStore, ScoreStore};
use memory_match::ui::App;

/// Flip tiles two at a time and clear the board as fast as you can.
#[derive(Parser)]
#[command(name = "memory-match", about = "Terminal memory-matching game")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "memory_match.toml")]
    config: PathBuf,

    /// Override the leaderboard file
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Seed the shuffler for a reproducible board
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let (mut app_config, source) = AppConfig::load_with_source(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(scores) = cli.scores {
        app_config.leaderboard.path = scores;
    }

    init_logging(&app_config.logging)?;
    if source == ConfigSource::Defaults {
        tracing::warn!(path = %cli.config.display(), "config file not found, using defaults");
    }
    tracing::info!(
        config = %cli.config.display(),
        scores = %app_config.leaderboard.path.display(),
        seed = ?cli.seed,
        "starting"
    );

    let settings = GameSettings::from_config(&app_config).context("building game settings")?;
    let scores = ScoreStore::new(FileStore::new(&app_config.leaderboard.path))
        .with_key(app_config.leaderboard.key.clone())
        .with_capacity(app_config.leaderboard.capacity);
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let controller = GameController::new(settings, scores, rng);
    let mut app = App::new(controller, app_config.game.columns);
    run_tui(&mut app)
}

/// Send `tracing` output to the log file; the terminal belongs to the UI.
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .with_context(|| format!("opening log file {}", config.file.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_tui(app: &mut App<FileStore>) -> Result<()> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = app.run(&mut terminal);

    // Restore terminal on every exit path
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();

    res.context("running game")
}
