mod errors;
mod report;
mod row;
mod transaction;

pub use errors::{ImportError, RowField, ValidationError};
pub use report::{RowError, UploadResult};
pub use row::{RawRow, RawValue};
pub use transaction::{CanonicalTransaction, Indicator};
