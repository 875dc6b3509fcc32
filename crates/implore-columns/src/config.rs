//! Evaluation settings
//!
//! Settings only change how name patterns compare. Literal and positional
//! selectors behave the same under every configuration.

use serde::{Deserialize, Serialize};

/// Default limit on the compiled size of a `matches` pattern (1 MiB)
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Settings applied to one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Compare names case-insensitively in `starts_with`, `ends_with`,
    /// `contains` and `matches`
    pub ignore_case: bool,
    /// Upper bound on compiled regex size, in bytes
    pub regex_size_limit: usize,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            ignore_case: false,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

impl SelectConfig {
    /// Enable or disable case-insensitive name patterns
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Set the regex size limit
    pub fn with_regex_size_limit(mut self, limit: usize) -> Self {
        self.regex_size_limit = limit;
        self
    }
}
