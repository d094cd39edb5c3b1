mod app;
mod command;
mod mode;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Context};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tabedit::opener::{self, OpenerRegistry};
use tabedit::{EditorConfig, LocalFs, OpenOutcome};

use app::App;

struct Args {
    file_path: PathBuf,
    config_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
}

/// Parse command line arguments
fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    let mut file_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut log_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                let value = args.get(i + 1).context("--config requires an argument")?;
                config_path = Some(PathBuf::from(value));
                i += 2;
            }
            "--log" => {
                let value = args.get(i + 1).context("--log requires an argument")?;
                log_path = Some(PathBuf::from(value));
                i += 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => bail!("Unknown option: {}", arg),
            _ => {
                file_path = Some(PathBuf::from(&args[i]));
                i += 1;
            }
        }
    }

    let Some(file_path) = file_path else {
        print_help();
        bail!("no file given");
    };
    Ok(Args { file_path, config_path, log_path })
}

fn print_help() {
    eprintln!("tabedit - edit CSV and TSV files as a table");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    tabedit [OPTIONS] FILE");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <FILE>  Read settings from a TOML file");
    eprintln!("    --log <FILE>         Write logs here (default: tabedit.log in the temp dir)");
    eprintln!("    -h, --help           Print this help message");
    eprintln!();
    eprintln!("The delimiter is a tab for .tsv files and a comma otherwise.");
}

/// Logs go to a file so they don't tear up the alternate screen.
/// Filtering follows RUST_LOG, defaulting to `info`.
fn init_tracing(log_path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = log_path.unwrap_or_else(|| std::env::temp_dir().join("tabedit.log"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Handle panics gracefully
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occured"
            );
        } else {
            error!("panic occured");
        }

        default_hook(info);
    }));
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    init_tracing(args.log_path)?;
    info!("tabedit started");

    let config = match &args.config_path {
        Some(path) => EditorConfig::from_file(path)?,
        None => EditorConfig::default(),
    };

    let mut registry = OpenerRegistry::new();
    let activation = opener::activate(&mut registry, &config);

    let outcome = registry
        .open(&args.file_path, &LocalFs)
        .with_context(|| format!("{} is not a .csv or .tsv file", args.file_path.display()))?
        .map_err(|e| {
            error!(error = %e, "failed to open table");
            e
        })?;

    let editor = match outcome {
        OpenOutcome::Table(editor) => editor,
        OpenOutcome::Fallback(path) => {
            bail!(
                "{} is larger than {} bytes; open it in a text editor instead",
                path.display(),
                config.max_file_size
            );
        }
    };

    install_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(editor, config.max_col_width);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    activation.deactivate(&mut registry);
    result
}
