use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Enrollment, Student};

/// SeedError
///
/// Raised when the startup seed file cannot be read or parsed.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// SeedData
///
/// Initial contents of the student directory and enrollment store:
///
/// ```json
/// { "students": [{ "studentId": "S1", "firstName": "Ada", ... }],
///   "enrollments": [{ "studentId": "S1", "courseId": "CS101" }] }
/// ```
///
/// Both keys are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
}

impl SeedData {
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}
