//! civic-banner - terminal announcement banner for the civic grievance portal

use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        EventStream,
    },
    execute, terminal,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

use civic_banner::announcement;
use civic_banner::app::App;
use civic_banner::carousel::{self, GoToPolicy, SlideshowController};
use civic_banner::settings::Settings;

#[derive(Parser, Debug)]
#[command(version, about = "Rotating civic announcements in the terminal")]
struct Cli {
    /// JSON file with an array of announcements
    #[arg(long)]
    deck: Option<PathBuf>,

    /// Milliseconds between automatic slide changes
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    period_ms: Option<u64>,

    /// Reject out-of-range slide numbers
    #[arg(long, conflicts_with = "clamp")]
    strict: bool,

    /// Snap out-of-range slide numbers to the last slide
    #[arg(long)]
    clamp: bool,

    /// Widest the banner may grow, in columns
    #[arg(long)]
    width: Option<u16>,

    /// Persist the effective settings before starting
    #[arg(long)]
    save_settings: bool,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(deck) = &self.deck {
            settings.carousel.deck_path = Some(deck.clone());
        }
        if let Some(period_ms) = self.period_ms {
            settings.carousel.autoplay_period_ms = period_ms;
        }
        if self.strict {
            settings.carousel.go_to_policy = GoToPolicy::Reject;
        } else if self.clamp {
            settings.carousel.go_to_policy = GoToPolicy::Clamp;
        }
        if let Some(width) = self.width {
            settings.display.width = width;
        }
    }
}

/// Restores the terminal however the front end exits
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            cursor::Hide
        )?;
        Ok(Self)
    }

    fn restore() {
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        Self::restore();
    }
}

fn log_file_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("in", "civic", "CivicBanner")
        .map(|dirs| dirs.data_local_dir().join("civic-banner.log"))
}

/// Log to a file, since the banner owns the whole terminal. Without a
/// writable data directory logs are discarded.
fn init_logging() {
    let file = log_file_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });
    let writer = match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(writer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let mut settings = Settings::load();
    cli.apply(&mut settings);

    if cli.save_settings {
        let path = settings.save()?;
        info!("Settings saved to {}", path.display());
    }

    let slides = match &settings.carousel.deck_path {
        Some(path) => announcement::load_deck(path)
            .with_context(|| format!("loading announcements from {}", path.display()))?,
        None => announcement::default_deck(),
    };

    let mut controller = SlideshowController::new(slides, settings.carousel.to_config())?;
    let (changes_tx, changes_rx) = mpsc::unbounded_channel();
    controller.on_slide_change(move |change| {
        let _ = changes_tx.send(*change);
    });

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        TerminalGuard::restore();
        original_hook(info);
    }));

    let guard = TerminalGuard::enter().context("preparing the terminal")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let (handle, task) = carousel::spawn(controller);
    let app = App::new(handle, &settings);
    let result = app.run(&mut terminal, EventStream::new(), changes_rx).await;
    task.await?;

    drop(guard);
    result
}
