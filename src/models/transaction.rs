use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed transaction category assigned to an entire import batch.
///
/// One upload flow carries exactly one indicator; it is never taken from
/// the file itself.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Indicator {
    Investment,
    Withdrawal,
    Payout,
    Closure,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::Investment,
        Indicator::Withdrawal,
        Indicator::Payout,
        Indicator::Closure,
    ];
}

impl Display for Indicator {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Indicator::Investment => "Investment",
            Indicator::Withdrawal => "Withdrawal",
            Indicator::Payout => "Payout",
            Indicator::Closure => "Closure",
        };
        write!(formatter, "{name}")
    }
}

impl FromStr for Indicator {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "investment" => Ok(Indicator::Investment),
            "withdrawal" => Ok(Indicator::Withdrawal),
            "payout" => Ok(Indicator::Payout),
            "closure" => Ok(Indicator::Closure),
            other => Err(format!("Unknown indicator '{other}'")),
        }
    }
}

/// The canonical record submitted over the wire, one per validation-clean
/// input row. Amount travels as a decimal string to avoid floating-point
/// drift; the date is an ISO-8601 instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTransaction {
    pub client_code: String,
    pub indicator_name: Indicator,
    pub amount: String,
    pub remark: String,
    pub transaction_date: String,
}
