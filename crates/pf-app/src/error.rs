//! Error types for the pf-app service layer.

use std::path::PathBuf;

use pf_components::ComponentError;
use pf_graph::GraphError;
use pf_project::{ProjectError, ValidationError};
use pf_solver::SolverError;
use serde::Serialize;

/// Client-facing classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Payload is not well-formed JSON/YAML
    Parse,
    /// Request file could not be read
    Io,
    Validation,
    Topology,
    AmbiguousInput,
    Domain,
    Bracket,
    Internal,
}

impl ErrorKind {
    /// HTTP-style status for a transport in front of the service.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Domain | ErrorKind::Bracket => 422,
            ErrorKind::Internal => 500,
            _ => 400,
        }
    }

    pub fn is_client_error(self) -> bool {
        self != ErrorKind::Internal
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Io => "io",
            ErrorKind::Validation => "validation",
            ErrorKind::Topology => "topology",
            ErrorKind::AmbiguousInput => "ambiguous_input",
            ErrorKind::Domain => "domain",
            ErrorKind::Bracket => "bracket",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Application error wrapping every backend failure of a request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read file: {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Topology error: {0}")]
    Topology(#[from] GraphError),

    #[error("{0}")]
    Component(#[from] ComponentError),

    #[error("{0}")]
    Solver(#[from] SolverError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Result type for pf-app operations.
pub type AppResult<T> = Result<T, AppError>;

fn component_kind(err: &ComponentError) -> ErrorKind {
    match err {
        ComponentError::NonPhysical { .. } => ErrorKind::Domain,
        ComponentError::InvalidParameter(_) | ComponentError::MissingInput { .. } => {
            ErrorKind::Validation
        }
    }
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::FileRead { .. } => ErrorKind::Io,
            AppError::Project(err) => match err {
                ProjectError::Validation(_) => ErrorKind::Validation,
                ProjectError::Io(_) => ErrorKind::Io,
                ProjectError::Yaml(_) | ProjectError::Json(_) => ErrorKind::Parse,
            },
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Topology(err) => match err {
                GraphError::DuplicateNode { .. }
                | GraphError::DuplicateEdge { .. }
                | GraphError::UnknownNode { .. }
                | GraphError::InvalidNodeRef { .. } => ErrorKind::Validation,
                GraphError::CycleOrDisconnected { .. }
                | GraphError::UnexpectedSequence { .. }
                | GraphError::MissingLink { .. } => ErrorKind::Topology,
            },
            AppError::Component(err) => component_kind(err),
            AppError::Solver(err) => match err {
                SolverError::AmbiguousInput { .. } => ErrorKind::AmbiguousInput,
                SolverError::Domain { .. } => ErrorKind::Domain,
                SolverError::Bracket { .. } => ErrorKind::Bracket,
                SolverError::InvalidConfig { .. } => ErrorKind::Validation,
                SolverError::Component(inner) => component_kind(inner),
            },
            AppError::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Message safe to return to a caller; internal details are withheld.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}
