mod app;
mod cli;
mod config;
mod error;
mod model;
mod parser;
mod pipeline;
mod render;
mod ui;
mod watcher;

use std::env;
use std::fs::File;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::Session;
use cli::{Cli, OutputFormat};
use config::Config;
use parser::{find_report, load_report};
use pipeline::PipelineState;
use render::{JsonRenderer, TextRenderer};
use ui::{Theme, TuiRenderer};
use watcher::Reloader;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to `--log-file` when given, otherwise to stderr. The TUI owns the
/// terminal, so without a log file nothing is logged while it runs.
fn init_logging(cli: &Cli) -> io::Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("gherkin_results=debug")
    } else if cli.quiet {
        EnvFilter::new("gherkin_results=error")
    } else {
        EnvFilter::new("gherkin_results=info")
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if cli.interactive() => {}
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn run(cli: &Cli) -> error::Result<()> {
    info!("gherkin-results v{}", env!("CARGO_PKG_VERSION"));

    let start = match &cli.path {
        Some(path) => path.clone(),
        None => env::current_dir()?,
    };
    let report_path = find_report(&start)?;

    let config = match &cli.config {
        Some(path) => Config::load_file(path)?,
        None => Config::load(report_path.parent().unwrap_or(Path::new("."))),
    };
    let options = config.report_options();
    let document = load_report(&report_path, &options)?;

    let mut state = PipelineState::new();
    state.set_show_all(cli.all || config.view.show_all);
    state.page = cli.page.unwrap_or(0);
    let mut session = Session::new(document, config.grouper(), config.labels(), state);

    if !cli.interactive() {
        let stdout = io::stdout().lock();
        return match cli.format {
            OutputFormat::Json => app::run(&mut JsonRenderer::new(stdout), &mut session, || None),
            OutputFormat::Text => app::run(&mut TextRenderer::new(stdout), &mut session, || None),
        };
    }

    let mut reloader = if cli.watch || config.view.watch {
        Some(Reloader::new(&report_path, options)?)
    } else {
        None
    };
    let theme = Theme::by_name(config.theme.name.as_deref());
    let mut renderer = TuiRenderer::new(theme)?;

    app::run(&mut renderer, &mut session, || {
        reloader.as_mut().and_then(Reloader::poll)
    })
}
