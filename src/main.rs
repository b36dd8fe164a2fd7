// tinyfront: lexer and parser for a small imperative language

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tinyfront::cli::TinyfrontArgs;
use tinyfront::config::AnalyzerConfig;
use tinyfront::report::{self, Analysis, Outcome};
use tinyfront::ui::App;

fn main() -> anyhow::Result<ExitCode> {
    let args = TinyfrontArgs::parse();
    let config = args.config();

    init_logging(&config, args.verbose);
    debug!(?config, files = args.files.len(), "starting");

    let mut all_accepted = true;
    let stdout = io::stdout();

    for path in &args.files {
        info!(path = %path.display(), mode = ?config.mode, "analyzing file");

        let analysis = {
            let mut out = stdout.lock();
            let analysis = report::run_file(&mut out, path, &config)?;
            out.flush()?;
            analysis
        };

        let Some(analysis) = analysis else {
            all_accepted = false;
            continue;
        };

        if analysis.outcome() == Outcome::Rejected {
            all_accepted = false;
        }

        if args.view {
            run_viewer(path.display().to_string(), analysis)?;
        }
    }

    Ok(if all_accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Log to stderr so the tables on stdout stay clean. `RUST_LOG` takes
/// precedence over the flags.
fn init_logging(config: &AnalyzerConfig, verbose: bool) {
    let default_directive = if verbose || config.is_tracing() {
        "tinyfront=debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run_viewer(name: String, analysis: Analysis) -> anyhow::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(name, analysis);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
