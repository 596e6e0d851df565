use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `EpisimError` and maps other errors to
/// convert to an `EpisimError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum EpisimError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CSVError(csv::Error),
    ReportError(String),
    EpisimError(String),
}

impl From<io::Error> for EpisimError {
    fn from(error: io::Error) -> Self {
        EpisimError::IoError(error)
    }
}

impl From<serde_json::Error> for EpisimError {
    fn from(error: serde_json::Error) -> Self {
        EpisimError::JsonError(error)
    }
}

impl From<csv::Error> for EpisimError {
    fn from(error: csv::Error) -> Self {
        EpisimError::CSVError(error)
    }
}

impl From<String> for EpisimError {
    fn from(error: String) -> Self {
        EpisimError::EpisimError(error)
    }
}

impl From<&str> for EpisimError {
    fn from(error: &str) -> Self {
        EpisimError::EpisimError(error.to_string())
    }
}

impl std::error::Error for EpisimError {}

impl Display for EpisimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error: {self:?}")?;
        Ok(())
    }
}
