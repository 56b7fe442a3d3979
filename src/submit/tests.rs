use super::{SubmitError, SyncApi, SyncOutcome, submit_batch};

use std::cell::RefCell;

use crate::models::{CanonicalTransaction, Indicator, RowError};

fn transaction(client_code: &str) -> CanonicalTransaction {
    CanonicalTransaction {
        client_code: client_code.to_string(),
        indicator_name: Indicator::Investment,
        amount: "100.00".to_string(),
        remark: String::new(),
        transaction_date: "2024-03-15T00:00:00.000Z".to_string(),
    }
}

struct AcceptAll {
    received: RefCell<usize>,
}

impl SyncApi for AcceptAll {
    async fn submit(
        &self,
        transactions: &[CanonicalTransaction],
    ) -> Result<SyncOutcome, SubmitError> {
        *self.received.borrow_mut() = transactions.len();
        Ok(SyncOutcome {
            success: transactions.len() as u32,
            errors: Vec::new(),
        })
    }
}

struct RejectRowThree;

impl SyncApi for RejectRowThree {
    async fn submit(&self, _: &[CanonicalTransaction]) -> Result<SyncOutcome, SubmitError> {
        Ok(SyncOutcome {
            success: 1,
            errors: vec![RowError {
                row: 3,
                message: "Client not found".to_string(),
            }],
        })
    }
}

struct Unreachable;

impl SyncApi for Unreachable {
    async fn submit(&self, _: &[CanonicalTransaction]) -> Result<SyncOutcome, SubmitError> {
        Err(SubmitError::MalformedBody("connection reset".to_string()))
    }
}

#[tokio::test]
async fn test_server_accounting_passes_through_unmodified() {
    let api = AcceptAll {
        received: RefCell::new(0),
    };
    let batch = vec![transaction("CLIENT001"), transaction("CLIENT002")];

    let result = submit_batch(&api, &batch).await;

    assert_eq!(*api.received.borrow(), 2);
    assert_eq!(result.success_count, 2);
    assert!(result.is_clean());
}

#[tokio::test]
async fn test_per_row_server_errors_are_not_revalidated() {
    let batch = vec![transaction("CLIENT001"), transaction("CLIENT002")];

    let result = submit_batch(&RejectRowThree, &batch).await;

    // An inconsistent server tally is reported as-is.
    assert_eq!(result.success_count, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, 3);
    assert_eq!(result.errors[0].message, "Client not found");
}

#[tokio::test]
async fn test_transport_failure_collapses_to_row_zero() {
    let batch = vec![transaction("CLIENT001")];

    let result = submit_batch(&Unreachable, &batch).await;

    assert_eq!(result.success_count, 0);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, 0);
    assert!(result.errors[0].message.contains("connection reset"));
}
