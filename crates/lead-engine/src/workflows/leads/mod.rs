mod domain;
mod normalizer;
mod parser;

pub use domain::{CompanyRecord, EmployeeCount};
pub use normalizer::parse_employees;
pub(crate) use normalizer::truncate_chars;

use crate::config::InputConfig;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum LeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDelimiter(char),
}

impl std::fmt::Display for LeadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadImportError::Io(err) => write!(f, "failed to read lead source: {}", err),
            LeadImportError::Csv(err) => write!(f, "invalid lead source data: {}", err),
            LeadImportError::InvalidDelimiter(delimiter) => write!(
                f,
                "input delimiter must be a single ASCII character (got {:?})",
                delimiter
            ),
        }
    }
}

impl std::error::Error for LeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadImportError::Io(err) => Some(err),
            LeadImportError::Csv(err) => Some(err),
            LeadImportError::InvalidDelimiter(_) => None,
        }
    }
}

impl From<std::io::Error> for LeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads candidate companies from a delimited table using the configured
/// column positions.
pub struct LeadImporter;

impl LeadImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        input: &InputConfig,
    ) -> Result<Vec<CompanyRecord>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, input)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        input: &InputConfig,
    ) -> Result<Vec<CompanyRecord>, LeadImportError> {
        let delimiter = u8::try_from(input.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(LeadImportError::InvalidDelimiter(input.delimiter))?;

        let records = parser::parse_records(reader, input, delimiter)?;
        tracing::debug!(records = records.len(), "loaded lead records");
        Ok(records)
    }
}
