use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use quickopen::app::{self, Outcome};
use quickopen::config::Config;
use quickopen::host::{DocumentHost, EditorLauncher};
use quickopen::services::fs::LocalFs;
use std::path::PathBuf;
use std::sync::Arc;

/// An incremental type-ahead path picker for the terminal
#[derive(Parser, Debug)]
#[command(name = "quickopen")]
#[command(about = "Type-ahead path picker: resolve, descend, open or create", long_about = None)]
#[command(version)]
struct Args {
    /// Directory to start picking from (default: the working directory)
    #[arg(value_name = "DIRECTORY")]
    directory: Option<PathBuf>,

    /// Print the finalized path instead of launching $VISUAL/$EDITOR
    #[arg(long)]
    print: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (no logging without it)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: &PathBuf) -> AnyhowResult<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let file = std::fs::File::create(log_file)
        .with_context(|| format!("failed to create log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        init_tracing(log_file)?;
    }

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    let initial_dir = match args.directory {
        Some(dir) => {
            let dir = if dir.is_absolute() {
                dir
            } else {
                std::env::current_dir()
                    .context("cannot resolve the working directory")?
                    .join(dir)
            };
            anyhow::ensure!(dir.is_dir(), "{} is not a directory", dir.display());
            dir
        }
        None => std::env::current_dir().context("cannot resolve the working directory")?,
    };
    let initial_dir = initial_dir.to_string_lossy().into_owned();

    let fs = Arc::new(LocalFs::new());
    let mut terminal = ratatui::init();
    let outcome = app::run(&mut terminal, fs, config, &initial_dir).await;
    ratatui::restore();

    match outcome? {
        Outcome::Open(path) => {
            if args.print {
                println!("{}", path.display());
            } else {
                EditorLauncher::from_env().open_document(&path).await?;
            }
            Ok(())
        }
        Outcome::CreatedDirectory(path) => {
            if args.print {
                println!("{}", path.display());
            } else {
                eprintln!("created directory {}", path.display());
            }
            Ok(())
        }
        Outcome::Cancelled => Ok(()),
        Outcome::Failed(e) => Err(e.into()),
    }
}
