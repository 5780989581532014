//! Aggregator configuration

use reason::{DELIMITER_ASCII, DELIMITER_UNICODE};
use serde::{Deserialize, Serialize};

/// Aggregator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Hierarchy delimiter placed between a message and its cause.
    /// Consumers re-parsing the errors must use the same value.
    pub delimiter: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            delimiter: DELIMITER_UNICODE.to_string(),
        }
    }
}

impl HealthConfig {
    /// Plain ASCII output for consumers that can't render the arrow glyph
    pub fn ascii() -> Self {
        Self {
            delimiter: DELIMITER_ASCII.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(HealthConfig::default().delimiter, " → ");
        assert_eq!(HealthConfig::ascii().delimiter, ": ");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: HealthConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, HealthConfig::default());
    }
}
