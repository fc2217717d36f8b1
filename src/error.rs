// ⚠️ Error taxonomy - every variant is terminal for the run

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Reference table not found: {}", path.display())]
    MissingReferenceData { path: PathBuf },

    #[error("Failed to read reference table {}: {source}", path.display())]
    ReferenceTable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Country '{name}' appears more than once in the reference table")]
    DuplicateCountry { name: String },

    /// `context` says where the name came from (player or club)
    #[error("Country '{name}' not found in countries.csv ({context})")]
    UnknownCountry { name: String, context: String },

    #[error("Failed to read season directory {}: {source}", path.display())]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed input file {}: {message}", path.display())]
    MalformedInput { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", path.display())]
    Output { path: PathBuf, message: String },
}

impl ConvertError {
    pub fn unknown_country(name: &str, context: impl Into<String>) -> Self {
        ConvertError::UnknownCountry {
            name: name.to_string(),
            context: context.into(),
        }
    }

    pub fn output(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        ConvertError::Output {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
