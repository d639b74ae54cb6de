use clap::{Parser, Subcommand};
use pf_app::{
    AppResult, BatchItem, ErrorKind, RunOptions, RunProgressEvent, RunReport, check_flowsheet,
    execute_batch_files, handle_request_with_progress, load_flowsheet, load_settings,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pipeflow")]
#[command(about = "Pipeflow CLI - single pipe feed/product hydraulics solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a flowsheet and print the response envelope
    Solve {
        /// Path to the flowsheet (JSON, or YAML by extension)
        flowsheet: PathBuf,
        /// Solver settings file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Report request stages on stderr
        #[arg(long)]
        progress: bool,
    },
    /// Check a flowsheet up to mode resolution without solving
    Validate {
        /// Path to the flowsheet
        flowsheet: PathBuf,
        /// Solver settings file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Solve many flowsheets in parallel
    Batch {
        /// Flowsheet paths
        #[arg(required = true)]
        flowsheets: Vec<PathBuf>,
        /// Solver settings file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Exit status for an error classification.
fn exit_code(kind: Option<ErrorKind>) -> u8 {
    match kind {
        None => 0,
        Some(ErrorKind::Internal) => 1,
        Some(_) => 2,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve {
            flowsheet,
            config,
            pretty,
            progress,
        } => cmd_solve(&flowsheet, config.as_deref(), pretty, progress),
        Commands::Validate { flowsheet, config } => cmd_validate(&flowsheet, config.as_deref()),
        Commands::Batch {
            flowsheets,
            config,
            pretty,
        } => cmd_batch(&flowsheets, config.as_deref(), pretty),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            if err.kind().is_client_error() {
                tracing::warn!("{err}");
            } else {
                tracing::error!("{err}");
            }
            let report = pf_app::error_report(Vec::new(), &err);
            print_json(&report, true);
            ExitCode::from(exit_code(Some(err.kind())))
        }
    }
}

fn options(config: Option<&Path>) -> AppResult<RunOptions> {
    Ok(RunOptions {
        settings: load_settings(config)?,
    })
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match text {
        Ok(text) => println!("{text}"),
        Err(e) => tracing::error!("failed to serialize output: {e}"),
    }
}

fn render_progress(event: &RunProgressEvent) {
    match &event.message {
        Some(message) => eprintln!(
            "[{:>8.3} ms] {:<13} {}",
            event.elapsed_wall_s * 1e3,
            event.stage.as_str(),
            message
        ),
        None => eprintln!(
            "[{:>8.3} ms] {}",
            event.elapsed_wall_s * 1e3,
            event.stage.as_str()
        ),
    }
}

fn cmd_solve(path: &Path, config: Option<&Path>, pretty: bool, progress: bool) -> AppResult<u8> {
    let options = options(config)?;
    let flowsheet = load_flowsheet(path)?;

    let mut render = |event: RunProgressEvent| render_progress(&event);
    let progress_cb: Option<&mut dyn FnMut(RunProgressEvent)> =
        if progress { Some(&mut render) } else { None };

    let response = handle_request_with_progress(&flowsheet, &options, progress_cb);
    print_json(&response.report, pretty);
    Ok(exit_code(response.error_kind))
}

fn cmd_validate(path: &Path, config: Option<&Path>) -> AppResult<u8> {
    let options = options(config)?;
    let flowsheet = load_flowsheet(path)?;
    let summary = check_flowsheet(&flowsheet, &options)?;
    eprintln!(
        "✓ Flowsheet is valid: {} ({})",
        summary.order.join(" -> "),
        summary.calculation_mode
    );
    print_json(&summary, true);
    Ok(0)
}

#[derive(Serialize)]
struct BatchEntry<'a> {
    path: String,
    status_code: u16,
    #[serde(flatten)]
    report: &'a RunReport,
}

fn cmd_batch(paths: &[PathBuf], config: Option<&Path>, pretty: bool) -> AppResult<u8> {
    let options = options(config)?;
    let items = execute_batch_files(paths, &options);

    let entries: Vec<BatchEntry<'_>> = items
        .iter()
        .map(|item| BatchEntry {
            path: item.path.display().to_string(),
            status_code: item.response.status_code,
            report: &item.response.report,
        })
        .collect();
    print_json(&entries, pretty);

    let failed = items
        .iter()
        .filter(|i| i.response.error_kind.is_some())
        .count();
    tracing::info!(total = items.len(), failed, "batch finished");

    Ok(batch_exit_code(&items))
}

/// Any internal failure wins over client failures.
fn batch_exit_code(items: &[BatchItem]) -> u8 {
    let mut code = 0;
    for kind in items.iter().filter_map(|i| i.response.error_kind) {
        if kind == ErrorKind::Internal {
            return exit_code(Some(kind));
        }
        code = exit_code(Some(kind));
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_app::{RunResponse, error_report};

    fn item(kind: Option<ErrorKind>) -> BatchItem {
        let report = match kind {
            Some(_) => error_report(Vec::new(), &pf_app::AppError::internal("x")),
            None => RunReport {
                order: Vec::new(),
                results: Default::default(),
                calculation_mode: "OUTLET_PRESSURE".to_string(),
                warnings: Vec::new(),
                error: None,
            },
        };
        BatchItem {
            path: PathBuf::from("f.json"),
            response: RunResponse {
                report,
                status_code: kind.map_or(200, ErrorKind::status_code),
                error_kind: kind,
            },
        }
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code(None), 0);
        assert_eq!(exit_code(Some(ErrorKind::Topology)), 2);
        assert_eq!(exit_code(Some(ErrorKind::Bracket)), 2);
        assert_eq!(exit_code(Some(ErrorKind::Internal)), 1);
    }

    #[test]
    fn batch_internal_failure_wins() {
        let items = [
            item(None),
            item(Some(ErrorKind::Internal)),
            item(Some(ErrorKind::Domain)),
        ];
        assert_eq!(batch_exit_code(&items), 1);
        assert_eq!(batch_exit_code(&items[..1]), 0);
        assert_eq!(batch_exit_code(&[item(None), item(Some(ErrorKind::Parse))]), 2);
    }

    #[test]
    fn parses_solve_arguments() {
        let cli = Cli::try_parse_from([
            "pipeflow",
            "solve",
            "sheet.json",
            "--config",
            "solver.yaml",
            "--pretty",
        ])
        .unwrap();
        match cli.command {
            Commands::Solve {
                flowsheet,
                config,
                pretty,
                progress,
            } => {
                assert_eq!(flowsheet, PathBuf::from("sheet.json"));
                assert_eq!(config, Some(PathBuf::from("solver.yaml")));
                assert!(pretty);
                assert!(!progress);
            }
            _ => panic!("expected solve command"),
        }
    }

    #[test]
    fn batch_requires_files() {
        assert!(Cli::try_parse_from(["pipeflow", "batch"]).is_err());
    }
}
