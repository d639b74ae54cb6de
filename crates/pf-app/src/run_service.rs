//! Request execution service.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::time::Instant;

use pf_project::{Flowsheet, SolverSettings, validate_flowsheet};
use pf_solver::{CalculationMode, PipeProblem, solve};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult, ErrorKind};
use crate::progress::{RunProgressEvent, RunStage};
use crate::project_service;
use crate::report::{RunReport, aggregate, error_report};
use crate::runtime_compile::{
    self, ChainIds, build_graph, build_problem, check_chain, lower_edge_pipe, node_names,
    order_graph,
};

/// Options for running a request.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunOptions {
    pub settings: SolverSettings,
}

/// Envelope plus the transport status it maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResponse {
    pub report: RunReport,
    pub status_code: u16,
    pub error_kind: Option<ErrorKind>,
}

/// Outcome of a dry run: everything up to mode resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckSummary {
    pub order: Vec<String>,
    pub calculation_mode: String,
}

/// One file of a batch.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub path: PathBuf,
    pub response: RunResponse,
}

type ProgressCallback<'a> = Option<&'a mut dyn FnMut(RunProgressEvent)>;

fn emit_progress(
    progress_cb: &mut ProgressCallback<'_>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            message,
        ));
    }
}

/// Typed problem ready for the solver.
struct Prepared {
    ids: ChainIds,
    problem: PipeProblem,
    mode: CalculationMode,
}

/// RECEIVED → MODE_RESOLVED. `order` is filled as soon as it is known so a
/// failure envelope can still carry it.
fn prepare(
    flowsheet: &Flowsheet,
    options: &RunOptions,
    progress_cb: &mut ProgressCallback<'_>,
    started: Instant,
    order: &mut Vec<String>,
) -> AppResult<Prepared> {
    emit_progress(
        progress_cb,
        RunStage::Received,
        started,
        Some(format!(
            "{} nodes, {} edges",
            flowsheet.nodes.len(),
            flowsheet.edges.len()
        )),
    );

    options.settings.validate()?;
    validate_flowsheet(flowsheet)?;

    let lowered = lower_edge_pipe(flowsheet);
    let graph = build_graph(&lowered)?;
    let node_ids = order_graph(&graph)?;
    *order = node_names(&graph, &node_ids);
    emit_progress(
        progress_cb,
        RunStage::Ordered,
        started,
        Some(order.join(" -> ")),
    );

    let ordered = check_chain(graph, &node_ids)?;
    emit_progress(progress_cb, RunStage::Validated, started, None);

    let ids = ordered.ids()?;
    let problem = build_problem(&lowered, &ids, &options.settings)?;
    let mode = CalculationMode::resolve(problem.known())?;
    emit_progress(
        progress_cb,
        RunStage::ModeResolved,
        started,
        Some(mode.to_string()),
    );

    Ok(Prepared { ids, problem, mode })
}

fn run(
    flowsheet: &Flowsheet,
    options: &RunOptions,
    progress_cb: &mut ProgressCallback<'_>,
    order: &mut Vec<String>,
) -> AppResult<RunReport> {
    let started = Instant::now();
    let prepared = prepare(flowsheet, options, progress_cb, started, order)?;

    let config = runtime_compile::solve_config(&options.settings);
    let solution = solve(&prepared.problem, &config)?;
    emit_progress(progress_cb, RunStage::Solved, started, None);

    let report = aggregate(
        order.clone(),
        &prepared.ids,
        &prepared.problem.feed.fluid,
        &solution,
    );
    emit_progress(progress_cb, RunStage::Aggregated, started, None);

    info!(
        mode = %prepared.mode,
        pipe = %prepared.ids.pipe,
        elapsed_s = started.elapsed().as_secs_f64(),
        "flowsheet solved"
    );
    Ok(report)
}

/// Execute a flowsheet request.
pub fn execute_flowsheet(flowsheet: &Flowsheet, options: &RunOptions) -> AppResult<RunReport> {
    execute_flowsheet_with_progress(flowsheet, options, None)
}

/// Execute a flowsheet request and stream stage events.
pub fn execute_flowsheet_with_progress(
    flowsheet: &Flowsheet,
    options: &RunOptions,
    mut progress_cb: ProgressCallback<'_>,
) -> AppResult<RunReport> {
    let started = Instant::now();
    let mut order = Vec::new();
    run(flowsheet, options, &mut progress_cb, &mut order).inspect_err(|err| {
        emit_progress(
            &mut progress_cb,
            RunStage::Error,
            started,
            Some(err.public_message()),
        );
    })
}

/// Check a flowsheet through mode resolution without solving.
pub fn check_flowsheet(flowsheet: &Flowsheet, options: &RunOptions) -> AppResult<CheckSummary> {
    let mut order = Vec::new();
    let prepared = prepare(flowsheet, options, &mut None, Instant::now(), &mut order)?;
    Ok(CheckSummary {
        order,
        calculation_mode: prepared.mode.as_str().to_string(),
    })
}

fn failure(order: Vec<String>, err: &AppError) -> RunResponse {
    let kind = err.kind();
    if kind.is_client_error() {
        warn!(kind = kind.as_str(), "request rejected: {err}");
    } else {
        error!("request failed: {err}");
    }
    RunResponse {
        report: error_report(order, err),
        status_code: kind.status_code(),
        error_kind: Some(kind),
    }
}

/// Boundary entry point: always produces an envelope.
///
/// Errors become the failure envelope; a panic inside the pipeline is
/// reported as an internal error without details.
pub fn handle_request(flowsheet: &Flowsheet, options: &RunOptions) -> RunResponse {
    handle_request_with_progress(flowsheet, options, None)
}

/// [`handle_request`] with stage events.
pub fn handle_request_with_progress(
    flowsheet: &Flowsheet,
    options: &RunOptions,
    mut progress_cb: ProgressCallback<'_>,
) -> RunResponse {
    let started = Instant::now();
    let mut order = Vec::new();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        run(flowsheet, options, &mut progress_cb, &mut order)
    }));

    let err = match outcome {
        Ok(Ok(report)) => {
            return RunResponse {
                report,
                status_code: 200,
                error_kind: None,
            };
        }
        Ok(Err(err)) => err,
        Err(_) => AppError::internal("solver panicked"),
    };
    emit_progress(
        &mut progress_cb,
        RunStage::Error,
        started,
        Some(err.public_message()),
    );
    failure(order, &err)
}

/// Load and handle one request file.
pub fn handle_file(path: &Path, options: &RunOptions) -> RunResponse {
    match project_service::load_flowsheet(path) {
        Ok(flowsheet) => handle_request(&flowsheet, options),
        Err(err) => failure(Vec::new(), &err),
    }
}

/// Solve independent flowsheets in parallel, preserving input order.
pub fn execute_batch(flowsheets: &[Flowsheet], options: &RunOptions) -> Vec<RunResponse> {
    flowsheets
        .par_iter()
        .map(|flowsheet| handle_request(flowsheet, options))
        .collect()
}

/// Load and solve request files in parallel, preserving input order.
pub fn execute_batch_files(paths: &[PathBuf], options: &RunOptions) -> Vec<BatchItem> {
    paths
        .par_iter()
        .map(|path| BatchItem {
            path: path.clone(),
            response: handle_file(path, options),
        })
        .collect()
}
