//! Response Document

use serde::{Deserialize, Serialize};

/// Status reported while no failures are stored
pub const STATUS_OK: u8 = 0;
/// Status reported while at least one failure is stored
pub const STATUS_FAILING: u8 = 1;

/// Health document served to scrapers.
///
/// `errors` is left out entirely when healthy; consumers treat a missing
/// field, not an empty list, as the healthy signal. `E` is `String` for the
/// formatted document and shared [`Reason`](reason::Reason)s for the expanded one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response<E = String> {
    pub status: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<E>>,
}

impl<E> Response<E> {
    /// Build a document from a snapshot of stored errors
    pub(crate) fn from_errors(errors: Vec<E>) -> Self {
        if errors.is_empty() {
            Self {
                status: STATUS_OK,
                errors: None,
            }
        } else {
            Self {
                status: STATUS_FAILING,
                errors: Some(errors),
            }
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == STATUS_OK
    }
}
