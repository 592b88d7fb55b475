//! envcheck CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use envcheck::cli::{CheckCommand, Cli, Command};
use envcheck::shell::is_ci;
use envcheck::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("envcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("envcheck=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// A `--python` value with a directory part is taken from the working
/// directory; bare names stay bare for the PATH search.
fn python_from_cwd(python: PathBuf) -> PathBuf {
    let has_dir = python
        .parent()
        .is_some_and(|dir| !dir.as_os_str().is_empty());
    if python.is_relative() && has_dir {
        std::path::absolute(&python).unwrap_or(python)
    } else {
        python
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("envcheck starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let project_root = cli
        .project
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| Path::new(".").into()));

    let mut ui = create_ui(!is_ci(), output_mode);

    let command = CheckCommand::new(&project_root)
        .with_config(cli.config.clone())
        .with_python(cli.python.clone().map(python_from_cwd));

    match command.execute(ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
