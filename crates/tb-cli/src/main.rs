use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tb_cli::commands::{edit, export, history, report, reset, settings, status, timer, watch};
use tb_cli::{App, Cli, Commands, Config};
use tb_core::SystemClock;
use tb_store::Store;

/// Load config and open the store, ensuring the parent directory exists.
fn load_app(config_path: Option<&Path>) -> Result<App<SystemClock>> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.store_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let store = Store::open(&config.store_path);
    Ok(App::load(store, SystemClock))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = io::stdout();
    match &cli.command {
        Some(Commands::Start) => {
            let mut app = load_app(cli.config.as_deref())?;
            timer::start(&mut stdout, &mut app)?;
        }
        Some(Commands::Pause) => {
            let mut app = load_app(cli.config.as_deref())?;
            timer::pause(&mut stdout, &mut app)?;
        }
        Some(Commands::Toggle) => {
            let mut app = load_app(cli.config.as_deref())?;
            timer::toggle(&mut stdout, &mut app)?;
        }
        Some(Commands::ResetTimer) => {
            let mut app = load_app(cli.config.as_deref())?;
            timer::reset(&mut stdout, &mut app)?;
        }
        Some(Commands::Status) => {
            let app = load_app(cli.config.as_deref())?;
            status::run(&mut stdout, &app)?;
        }
        Some(Commands::Watch { duration }) => {
            let mut app = load_app(cli.config.as_deref())?;
            watch::run(&mut stdout, &mut app, *duration)?;
        }
        Some(Commands::History { limit, kind }) => {
            let app = load_app(cli.config.as_deref())?;
            history::run(&mut stdout, &app, *limit, *kind)?;
        }
        Some(Commands::Report { json }) => {
            let app = load_app(cli.config.as_deref())?;
            report::run(&mut stdout, &app, *json)?;
        }
        Some(Commands::Edit { date, adjust, set }) => {
            let mut app = load_app(cli.config.as_deref())?;
            edit::run(&mut stdout, &mut app, date, *adjust, *set)?;
        }
        Some(Commands::Settings {
            hours,
            minutes,
            days,
            dark_mode,
        }) => {
            let mut app = load_app(cli.config.as_deref())?;
            settings::run(
                &mut stdout,
                &mut app,
                *hours,
                *minutes,
                days.clone(),
                *dark_mode,
            )?;
        }
        Some(Commands::Reset { yes }) => {
            let mut app = load_app(cli.config.as_deref())?;
            reset::run(&mut stdout, &mut app, *yes)?;
        }
        Some(Commands::Export) => {
            let app = load_app(cli.config.as_deref())?;
            export::run(&mut stdout, &app)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
