//! pf-project: flowsheet request format, validation and settings files.

pub mod schema;
pub mod settings;
pub mod validate;

pub use schema::*;
pub use settings::{FrictionMethodDef, SolverSettings};
pub use validate::{ValidationError, validate_flowsheet};

use std::path::Path;

use serde::de::DeserializeOwned;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encodings accepted for flowsheets and settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.yaml`/`.yml` read as YAML; anything else as JSON.
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Format::Yaml,
            _ => Format::Json,
        }
    }

    fn decode<T: DeserializeOwned>(self, text: &str) -> ProjectResult<T> {
        Ok(match self {
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => serde_yaml::from_str(text)?,
        })
    }

    fn flowsheet(self, text: &str) -> ProjectResult<Flowsheet> {
        let flowsheet: Flowsheet = self.decode(text)?;
        validate_flowsheet(&flowsheet)?;
        Ok(flowsheet)
    }
}

/// Parse and validate a JSON request body.
pub fn parse_json(content: &str) -> ProjectResult<Flowsheet> {
    Format::Json.flowsheet(content)
}

/// Parse and validate a YAML flowsheet.
pub fn parse_yaml(content: &str) -> ProjectResult<Flowsheet> {
    Format::Yaml.flowsheet(content)
}

pub fn load_json(path: &Path) -> ProjectResult<Flowsheet> {
    Format::Json.flowsheet(&std::fs::read_to_string(path)?)
}

pub fn load_yaml(path: &Path) -> ProjectResult<Flowsheet> {
    Format::Yaml.flowsheet(&std::fs::read_to_string(path)?)
}

/// Load a flowsheet, picking the decoder from the file extension.
pub fn load_flowsheet(path: &Path) -> ProjectResult<Flowsheet> {
    Format::of(path).flowsheet(&std::fs::read_to_string(path)?)
}

/// Validate, then write pretty JSON.
pub fn save_json(path: &Path, flowsheet: &Flowsheet) -> ProjectResult<()> {
    validate_flowsheet(flowsheet)?;
    std::fs::write(path, serde_json::to_string_pretty(flowsheet)?)?;
    Ok(())
}

/// Load solver settings from YAML or JSON and check their ranges.
pub fn load_settings(path: &Path) -> ProjectResult<SolverSettings> {
    let text = std::fs::read_to_string(path)?;
    let settings: SolverSettings = Format::of(path).decode(&text)?;
    settings.validate()?;
    Ok(settings)
}
