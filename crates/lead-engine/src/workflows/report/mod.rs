mod reader;
mod summary;
pub mod views;
mod writer;

pub use reader::ScoredResultReader;
pub use summary::{RunSummary, SummaryLine, TOP_LIMIT};
pub use writer::ResultWriter;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to access result table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid result table: {0}")]
    Csv(#[from] csv::Error),
}
