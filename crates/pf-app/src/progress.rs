//! Request stages and the events reported as a run moves through them.

use serde::Serialize;

/// Request lifecycle. `Error` is reachable from every other stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStage {
    Received,
    Ordered,
    Validated,
    ModeResolved,
    Solved,
    Aggregated,
    Error,
}

impl RunStage {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStage::Received => "RECEIVED",
            RunStage::Ordered => "ORDERED",
            RunStage::Validated => "VALIDATED",
            RunStage::ModeResolved => "MODE_RESOLVED",
            RunStage::Solved => "SOLVED",
            RunStage::Aggregated => "AGGREGATED",
            RunStage::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
        }
    }
}
