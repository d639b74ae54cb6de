//! Request and settings file loading.

use std::path::Path;

use pf_project::{Flowsheet, ProjectError, SolverSettings};

use crate::error::{AppError, AppResult};

fn file_error(path: &Path, err: ProjectError) -> AppError {
    match err {
        ProjectError::Io(source) => AppError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        other => AppError::Project(other),
    }
}

/// Load and validate a flowsheet (YAML or JSON by extension).
pub fn load_flowsheet(path: &Path) -> AppResult<Flowsheet> {
    pf_project::load_flowsheet(path).map_err(|e| file_error(path, e))
}

/// Load solver settings, or defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> AppResult<SolverSettings> {
    match path {
        Some(path) => pf_project::load_settings(path).map_err(|e| file_error(path, e)),
        None => Ok(SolverSettings::default()),
    }
}

/// Parse and validate a JSON request body.
pub fn parse_request(body: &str) -> AppResult<Flowsheet> {
    Ok(pf_project::parse_json(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn missing_file_reports_path() {
        let err = load_flowsheet(Path::new("/nonexistent/request.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("/nonexistent/request.json"));
    }

    #[test]
    fn no_settings_path_means_defaults() {
        assert_eq!(load_settings(None).unwrap(), SolverSettings::default());
    }

    #[test]
    fn invalid_body_is_parse_error() {
        let err = parse_request("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn structurally_invalid_body_is_validation_error() {
        let err = parse_request(r#"{"nodes": [{"id": "a", "type": "valve"}]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
