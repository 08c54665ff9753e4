use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced at the dashboard's boundaries.
///
/// An empty selection is not an error; it renders as zero metrics and empty
/// charts.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source file is missing or could not be parsed.
    #[error("data unavailable: {}", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl DashboardError {
    /// The message followed by its full cause chain.
    pub fn detail(&self) -> String {
        match self {
            DashboardError::DataUnavailable { source, .. } => format!("{self}: {source:#}"),
            other => other.to_string(),
        }
    }
}
