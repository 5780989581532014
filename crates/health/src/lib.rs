//! Health Aggregation
//!
//! Components alert and resolve keyed failures; the aggregator derives a
//! single status and a list of formatted failure descriptions from them.

mod aggregator;
mod config;
mod response;

pub use aggregator::{Health, KEY_SEPARATOR};
pub use config::HealthConfig;
pub use response::{Response, STATUS_FAILING, STATUS_OK};

pub use reason::{Formatter, Reason, DELIMITER_ASCII, DELIMITER_UNICODE};
