
use std::fmt;
use std::fmt::{Display, Formatter};

use tracing::{debug, info};

use crate::ingest::{self, FileFormat};
use crate::models::{ImportError, Indicator, UploadResult, ValidationError};
use crate::submit::{SyncApi, submit_batch};
use crate::validate;

/// Display position of the first data row; row 1 is the header.
const FIRST_DATA_ROW: u32 = 2;

/// Discrete progress markers for operator feedback. They carry no retry
/// or cancellation semantics.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Stage {
    Read,
    Validate,
    Map,
    Submit,
    Complete,
}

impl Display for Stage {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read => "read",
            Stage::Validate => "validate",
            Stage::Map => "map",
            Stage::Submit => "submit",
            Stage::Complete => "complete",
        };
        write!(formatter, "{name}")
    }
}

pub trait StageObserver {
    fn on_stage(&self, stage: Stage);
}

/// Reports stages through tracing, for the CLI.
pub struct LogObserver;

impl StageObserver for LogObserver {
    fn on_stage(&self, stage: Stage) {
        info!("Import stage: {stage}");
    }
}

/// What one import attempt produced for the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// At least one row failed validation; nothing reached the network.
    Rejected(Vec<ValidationError>),
    Submitted(UploadResult),
}

/// The combined import pipeline, parameterized by the batch indicator so
/// one module serves every transaction type.
///
/// Each run is one sequential pass: ingest, validate fail-closed, map,
/// submit, aggregate. No retry, no partial commit, no resumability; the
/// unit of work is "all rows or none reach the network".
pub struct ImportPipeline<S: SyncApi> {
    api: S,
    indicator: Indicator,
}

impl<S: SyncApi> ImportPipeline<S> {
    pub fn new(api: S, indicator: Indicator) -> Self {
        Self { api, indicator }
    }

    pub async fn run(
        &self,
        bytes: &[u8],
        format: FileFormat,
        observer: &impl StageObserver,
    ) -> Result<ImportOutcome, ImportError> {
        observer.on_stage(Stage::Read);
        let rows = ingest::ingest(bytes, format)?;

        observer.on_stage(Stage::Validate);
        let mut errors = Vec::new();
        let mut validated = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let row_number = index as u32 + FIRST_DATA_ROW;
            match validate::validate_row(row, row_number) {
                Ok(clean) => validated.push(clean),
                Err(mut row_errors) => errors.append(&mut row_errors),
            }
        }

        if !errors.is_empty() {
            debug!("Rejecting batch: {} validation errors across {} rows", errors.len(), rows.len());
            return Ok(ImportOutcome::Rejected(errors));
        }

        observer.on_stage(Stage::Map);
        let transactions: Vec<_> = validated
            .into_iter()
            .map(|row| row.into_transaction(self.indicator))
            .collect();

        observer.on_stage(Stage::Submit);
        let result = submit_batch(&self.api, &transactions).await;

        observer.on_stage(Stage::Complete);
        info!(
            "Import complete: {} synced, {} errors",
            result.success_count,
            result.errors.len()
        );

        Ok(ImportOutcome::Submitted(result))
    }
}
