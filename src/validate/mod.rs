
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::str::FromStr;

use crate::dates;
use crate::models::{CanonicalTransaction, Indicator, RawRow, RawValue, RowField, ValidationError};

const CLIENT_CODE_REQUIRED: &str = "Client code is required";
const CLIENT_CODE_TOO_LONG: &str = "Client code must be 50 characters or less";
const CLIENT_CODE_NOT_ALPHANUMERIC: &str = "Client code must be alphanumeric";
const DATE_REQUIRED: &str = "Date is required";
const DATE_INVALID: &str = "Invalid date format. Use DD-MM-YYYY";
const AMOUNT_REQUIRED: &str = "Amount is required";
const AMOUNT_NOT_NUMERIC: &str = "Amount must be numeric";
const AMOUNT_NOT_POSITIVE: &str = "Amount must be positive";
const AMOUNT_OVER_LIMIT: &str = "Amount exceeds maximum limit (999999999.99)";
const REMARK_TOO_LONG: &str = "Remark must be 500 characters or less";

const CLIENT_CODE_MAX_CHARS: usize = 50;
const REMARK_MAX_CHARS: usize = 500;

/// 999999999.99, the largest amount the backend accepts.
fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999, 2)
}

/// A row that passed every rule, with its fields already coerced to their
/// canonical types. Mapping this into a transaction cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRow {
    pub client_code: String,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub remark: String,
}

impl ValidatedRow {
    /// The transaction mapper: tags the row with the batch-wide indicator
    /// and re-serializes the amount as a decimal string for the wire.
    pub fn into_transaction(self, indicator: Indicator) -> CanonicalTransaction {
        CanonicalTransaction {
            client_code: self.client_code,
            indicator_name: indicator,
            amount: self.amount.to_string(),
            remark: self.remark,
            transaction_date: self.date.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Applies every field rule to one row, independently, so the operator
/// sees all problems in a single pass instead of one per round-trip.
///
/// Pure function of its inputs; `row_number` is the 1-based display
/// position including the header offset. An `Err` list is never empty.
pub fn validate_row(row: &RawRow, row_number: u32) -> Result<ValidatedRow, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let client_code = check_client_code(row)
        .map_err(|message| errors.push(ValidationError::new(row_number, RowField::ClientCode, message)))
        .ok();
    let date = check_date(row)
        .map_err(|message| errors.push(ValidationError::new(row_number, RowField::Date, message)))
        .ok();
    let amount = check_amount(row)
        .map_err(|message| errors.push(ValidationError::new(row_number, RowField::Amount, message)))
        .ok();
    let remark = check_remark(row)
        .map_err(|message| errors.push(ValidationError::new(row_number, RowField::Remark, message)))
        .ok();

    match (client_code, date, amount, remark) {
        (Some(client_code), Some(date), Some(amount), Some(remark)) if errors.is_empty() => {
            Ok(ValidatedRow {
                client_code,
                date,
                amount,
                remark,
            })
        }
        _ => Err(errors),
    }
}

fn check_client_code(row: &RawRow) -> Result<String, &'static str> {
    // A numeric cell is the wrong type and reads as missing.
    let text = row
        .get("client_code")
        .and_then(RawValue::as_text)
        .map(str::trim)
        .unwrap_or_default();

    if text.is_empty() {
        Err(CLIENT_CODE_REQUIRED)
    } else if text.chars().count() > CLIENT_CODE_MAX_CHARS {
        Err(CLIENT_CODE_TOO_LONG)
    } else if !text.chars().all(|character| character.is_ascii_alphanumeric()) {
        Err(CLIENT_CODE_NOT_ALPHANUMERIC)
    } else {
        Ok(text.to_string())
    }
}

fn check_date(row: &RawRow) -> Result<DateTime<Utc>, &'static str> {
    let value = row.get("date").ok_or(DATE_REQUIRED)?;

    if value.as_text().is_some_and(|text| text.trim().is_empty()) {
        return Err(DATE_REQUIRED);
    }

    dates::normalize(value).map_err(|_| DATE_INVALID)
}

fn check_amount(row: &RawRow) -> Result<Decimal, &'static str> {
    let value = row.get("amount").ok_or(AMOUNT_REQUIRED)?;

    let amount = match value {
        RawValue::Number(number) => Decimal::from_f64(*number).ok_or(AMOUNT_NOT_NUMERIC)?,
        RawValue::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(AMOUNT_REQUIRED);
            }
            Decimal::from_str(text).map_err(|_| AMOUNT_NOT_NUMERIC)?
        }
    };

    if amount <= Decimal::ZERO {
        Err(AMOUNT_NOT_POSITIVE)
    } else if amount > max_amount() {
        Err(AMOUNT_OVER_LIMIT)
    } else {
        Ok(amount)
    }
}

fn check_remark(row: &RawRow) -> Result<String, &'static str> {
    let remark = row.get("remark").map(RawValue::display).unwrap_or_default();

    if remark.chars().count() > REMARK_MAX_CHARS {
        Err(REMARK_TOO_LONG)
    } else {
        Ok(remark)
    }
}
