use serde::{Deserialize, Serialize};

/// One per-row outcome reported by the sync endpoint. Row 0 is the
/// whole-batch sentinel used when the submission itself failed rather
/// than any individual row.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    pub row: u32,
    pub message: String,
}

/// The transient operator report produced once per import attempt.
///
/// Server accounting is passed through verbatim; the aggregator never
/// recomputes it. Overwritten, not merged, on the next attempt.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct UploadResult {
    pub success_count: u32,
    pub errors: Vec<RowError>,
}

impl UploadResult {
    pub fn new(success_count: u32, errors: Vec<RowError>) -> Self {
        Self {
            success_count,
            errors,
        }
    }

    /// Collapses a transport-level failure into the row-0 sentinel form.
    pub fn whole_batch_failure(message: impl Into<String>) -> Self {
        Self {
            success_count: 0,
            errors: vec![RowError {
                row: 0,
                message: message.into(),
            }],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
