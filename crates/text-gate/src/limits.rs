//! Threshold configuration for the validation boundary.

use serde::{Deserialize, Serialize};

/// Tunable limits and thresholds.
///
/// Every field has a fixed default so the struct can be deserialized from a
/// partial config file; [`Default`] mirrors the serde defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum accepted length in codepoints for message text.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Maximum accepted length in codepoints for search-query text.
    #[serde(default = "default_query_max_length")]
    pub query_max_length: usize,
    /// More zero-width characters than this is treated as abuse.
    #[serde(default = "default_zero_width_max")]
    pub zero_width_max: usize,
    /// More suspicious-Unicode characters than this is treated as a flood.
    #[serde(default = "default_suspicious_max")]
    pub suspicious_max: usize,
    /// Below this visible ratio (and above the length gate) the input is
    /// treated as an invisible flood.
    #[serde(default = "default_visible_ratio_min")]
    pub visible_ratio_min: f64,
    /// The invisible-flood check only applies to inputs longer than this.
    #[serde(default = "default_visible_len_gate")]
    pub visible_len_gate: usize,
    /// This many consecutive special characters is treated as a flood.
    #[serde(default = "default_special_run_len")]
    pub special_run_len: usize,
    /// Whether `validate` runs the injection-pattern check.
    #[serde(default = "default_check_injection")]
    pub check_injection: bool,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            query_max_length: default_query_max_length(),
            zero_width_max: default_zero_width_max(),
            suspicious_max: default_suspicious_max(),
            visible_ratio_min: default_visible_ratio_min(),
            visible_len_gate: default_visible_len_gate(),
            special_run_len: default_special_run_len(),
            check_injection: default_check_injection(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default-value functions used by serde
// ---------------------------------------------------------------------------

fn default_max_length() -> usize {
    10_000
}

fn default_query_max_length() -> usize {
    500
}

fn default_zero_width_max() -> usize {
    5
}

fn default_suspicious_max() -> usize {
    50
}

fn default_visible_ratio_min() -> f64 {
    0.3
}

fn default_visible_len_gate() -> usize {
    50
}

fn default_special_run_len() -> usize {
    3
}

fn default_check_injection() -> bool {
    true
}
