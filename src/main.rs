#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use formlab::automation::{Driver, Scenario, ScenarioError};
use formlab::config::Config;
use formlab::logging::{self, LogTarget};
use formlab::tui::{App, AppError};

#[derive(Parser)]
#[command(name = "formlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "FORMLAB_CONFIG")]
    config: Option<PathBuf>,

    /// Log file for the interactive UI
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run a JSON scenario headlessly and print a report instead of opening the UI
    #[arg(short, long)]
    script: Option<PathBuf>,
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(log_file) = cli.log_file {
        config.log_file = Some(log_file);
    }

    match cli.script {
        Some(script) => run_script(&config, &script),
        None => {
            run_interactive(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn run_script(config: &Config, script: &Path) -> Result<ExitCode, Box<dyn std::error::Error>> {
    logging::init(&config.log_filter, LogTarget::Stderr)?;
    let scenario = Scenario::from_path(script).map_err(AppError::from)?;
    info!(script = %script.display(), steps = scenario.steps.len(), "running scenario");

    let mut driver = Driver::new(config.headless_width, config.headless_height)
        .map_err(|e| AppError::from(ScenarioError::from(e)))?;
    let report = scenario.run(&mut driver);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn run_interactive(config: &Config) -> Result<(), AppError> {
    if let Some(path) = config.log_path() {
        logging::init(&config.log_filter, LogTarget::File(path))?;
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    info!("interactive session started");
    let mut app = App::new();
    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    match result {
        Err(e) => Err(e),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
