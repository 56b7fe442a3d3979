
use serde::Serialize;

use crate::models::Indicator;

/// One example upload row, in exactly the schema the importer expects,
/// so operators can self-serve the correct format.
#[derive(Debug, Clone, Serialize)]
pub struct SampleRow {
    pub client_code: &'static str,
    pub date: &'static str,
    pub amount: &'static str,
    pub remark: &'static str,
}

pub fn sample_rows(indicator: Indicator) -> Vec<SampleRow> {
    match indicator {
        Indicator::Investment => vec![
            SampleRow {
                client_code: "CLIENT001",
                date: "15-03-2024",
                amount: "5000.00",
                remark: "Initial investment",
            },
            SampleRow {
                client_code: "CLIENT002",
                date: "16-03-2024",
                amount: "12500.50",
                remark: "Top-up",
            },
        ],
        Indicator::Withdrawal => vec![
            SampleRow {
                client_code: "CLIENT001",
                date: "20-03-2024",
                amount: "1500.00",
                remark: "Partial withdrawal",
            },
            SampleRow {
                client_code: "CLIENT003",
                date: "21-03-2024",
                amount: "800.25",
                remark: "",
            },
        ],
        Indicator::Payout => vec![
            SampleRow {
                client_code: "CLIENT002",
                date: "31-03-2024",
                amount: "230.40",
                remark: "Quarterly payout",
            },
            SampleRow {
                client_code: "CLIENT004",
                date: "31-03-2024",
                amount: "95.10",
                remark: "Quarterly payout",
            },
        ],
        Indicator::Closure => vec![
            SampleRow {
                client_code: "CLIENT005",
                date: "01-04-2024",
                amount: "18250.75",
                remark: "Account closure settlement",
            },
        ],
    }
}

/// Renders the sample rows as a structured-text file in the upload schema.
pub fn sample_file(indicator: Indicator) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(&sample_rows(indicator))
}
