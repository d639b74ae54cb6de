//! Application service layer for pipeflow.
//!
//! Turns a flowsheet request into a response envelope: structural
//! validation, graph ordering, typed entity construction, mode resolution,
//! solving and result aggregation. Shared by the CLI and any transport
//! placed in front of it.

pub mod error;
pub mod progress;
pub mod project_service;
pub mod report;
pub mod run_service;
pub mod runtime_compile;

// Re-export key types for convenience
pub use error::{AppError, AppResult, ErrorKind};
pub use progress::{RunProgressEvent, RunStage};
pub use project_service::{load_flowsheet, load_settings, parse_request};
pub use report::{NodeReport, PipeReport, RunReport, aggregate, error_report};
pub use run_service::{
    BatchItem, CheckSummary, RunOptions, RunResponse, check_flowsheet, execute_batch,
    execute_batch_files, execute_flowsheet, execute_flowsheet_with_progress, handle_file,
    handle_request, handle_request_with_progress,
};
pub use runtime_compile::{ChainIds, OrderedFlowsheet, build_problem, lower_edge_pipe};
