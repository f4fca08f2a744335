mod app;
mod catalog;
mod components;
mod config;
mod error;
mod event;
mod handler;
mod theme;
mod tui;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::catalog::loader::load_movies;
use crate::catalog::poster::{DirectoryPosters, NoPosters, PosterSource};
use crate::catalog::Catalog;
use crate::config::{AppConfig, CatalogConfig, GeneralConfig, ThemeConfig};
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};

/// Browse a movie catalog by year, genre, director and actor.
#[derive(Parser, Debug)]
#[command(name = "cm", version, about)]
struct Cli {
    /// Movie catalog JSON file (defaults to data/movies.json)
    path: Option<PathBuf>,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial title sort: asc or desc
    #[arg(long)]
    sort: Option<String>,

    /// Color scheme: dark, light or custom
    #[arg(long)]
    theme: Option<String>,

    /// Directory of cached poster images
    #[arg(long)]
    posters: Option<PathBuf>,

    /// Write logs to this file (filter with CINEMATE_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Config overrides derived from flags.
    fn overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                movies_path: self.path.as_ref().map(|p| p.display().to_string()),
                posters_dir: self.posters.as_ref().map(|p| p.display().to_string()),
            },
            catalog: CatalogConfig {
                sort: self.sort.clone(),
            },
            theme: ThemeConfig {
                scheme: self.theme.clone(),
                custom: None,
            },
            ..Default::default()
        }
    }
}

/// Route `tracing` output to `path`. Without a log file nothing is installed,
/// since stderr would draw over the terminal UI.
fn init_logging(path: &Path) -> error::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env("CINEMATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn poster_source(config: &AppConfig) -> error::Result<Box<dyn PosterSource>> {
    match config.posters_dir() {
        Some(dir) if dir.is_dir() => Ok(Box::new(DirectoryPosters::new(dir))),
        Some(dir) => Err(error::AppError::InvalidPath(format!(
            "{} is not a directory",
            dir.display()
        ))),
        None => Ok(Box::new(NoPosters)),
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();

    if let Some(log_file) = &cli.log_file {
        init_logging(log_file)?;
    }

    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));
    let posters = poster_source(&config)?;

    let movies_path = config.movies_path();
    let (movies, load_warning) = load_movies(&movies_path);
    let catalog = Catalog::new(movies, config.sort_direction());
    info!(
        path = %movies_path.display(),
        movies = catalog.len(),
        theme = config.theme_scheme(),
        "starting"
    );

    let mut app = App::new(catalog)
        .with_movies_path(movies_path)
        .with_posters(posters)
        .with_theme(theme::resolve_theme(&config.theme));
    app.show_detail = config.show_detail();
    if let Some(warning) = load_warning {
        app.set_error_message(warning);
    } else if app.catalog.is_empty() {
        app.set_status_message("Catalog is empty".to_string());
    }

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(250));

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick => app.clear_expired_status(),
            Event::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    Ok(())
}
