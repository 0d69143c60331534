//! Bulk profile import from admin CSV exports.
//!
//! Parsing and schema validation happen here, before any scoring: a row
//! either converts cleanly into an [`AgentProfileInput`] or is reported with
//! its full violation list, so the engine only ever sees the validated shape.

mod parser;

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use super::agents::domain::AgentProfileInput;
use super::agents::schema::{self, SchemaViolation};

#[derive(Debug, thiserror::Error)]
pub enum ProfileImportError {
    #[error("failed to read profile export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid profile CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Data row that failed schema validation, numbered from 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub row: usize,
    pub violations: Vec<SchemaViolation>,
}

/// Partition of an export into importable profiles and rejected rows.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub profiles: Vec<AgentProfileInput>,
    pub rejected: Vec<RejectedRow>,
}

pub struct CsvProfileImporter;

impl CsvProfileImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportOutcome, ProfileImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ImportOutcome, ProfileImportError> {
        let mut outcome = ImportOutcome::default();

        for (index, row) in parser::parse_rows(reader)?.into_iter().enumerate() {
            match schema::validate_row(&row) {
                Ok(profile) => outcome.profiles.push(profile),
                Err(violations) => outcome.rejected.push(RejectedRow {
                    row: index + 1,
                    violations,
                }),
            }
        }

        Ok(outcome)
    }
}
