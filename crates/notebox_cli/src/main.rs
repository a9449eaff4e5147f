//! `notebox` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration from environment and flags.
//! - Open the notes file, run one subcommand, and save when it mutated.
//! - Print results as text or JSON; report failures on stderr.

mod commands;

use clap::Parser;
use commands::{execute, Command};
use log::info;
use notebox_core::{init_logging, AppConfig, NoteSession};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "notebox")]
#[command(about = "Categorized notes kept in a single JSON file", version)]
struct Cli {
    /// Notes file (defaults to NOTEBOX_NOTES_PATH, then ./notes.json)
    #[arg(long, global = true)]
    notes: Option<PathBuf>,

    /// Directory for rolling log files (defaults to NOTEBOX_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("notebox: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, Box<dyn Error>> {
    let config = resolve_config(&cli)?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, &absolutize(log_dir)?)?;
    }

    let json = cli.json;
    let mutates = cli.command.mutates();
    let report = if matches!(cli.command, Command::Config) {
        // Printing config must work even when the notes file is unreadable.
        let mut session = NoteSession::new(Default::default(), &config.notes_path, false);
        execute(&mut session, cli.command, &config)?
    } else {
        let mut session = NoteSession::open(&config)?;
        let report = execute(&mut session, cli.command, &config)?;
        if mutates {
            info!(
                "event=cli_save module=cli status=start path={} autosave={}",
                session.notes_path().display(),
                session.autosave_enabled()
            );
            session.close()?;
        }
        report
    };
    info!(
        "event=cli_command module=cli status=ok mutates={} json={}",
        mutates, json
    );

    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
    } else {
        Ok(report.to_text())
    }
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, Box<dyn Error>> {
    let mut config = AppConfig::from_env()?;
    if let Some(path) = cli.notes.as_ref() {
        config.notes_path = path.clone();
    }
    if let Some(dir) = cli.log_dir.as_ref() {
        config.log_dir = Some(dir.clone());
    }
    if let Some(level) = cli.log_level.as_deref() {
        config.set_log_level(level)?;
    }
    Ok(config)
}

fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}
