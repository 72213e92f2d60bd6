//! Validation outcomes as plain values.
//!
//! Rejections are never errors: every outcome is a [`Verdict`] carrying an
//! explicit `is_valid` flag and a closed [`RejectReason`], so the boundary
//! stays total over arbitrary input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an input was rejected (or `Ok` when it was not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    Ok,
    Empty,
    TooLong,
    ControlChars,
    ZeroWidthAbuse,
    SpecialCharFlood,
    InvisibleFlood,
    UnicodeFlood,
    InjectionDetected,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ok => "ok",
            Self::Empty => "empty",
            Self::TooLong => "too_long",
            Self::ControlChars => "control_chars",
            Self::ZeroWidthAbuse => "zero_width_abuse",
            Self::SpecialCharFlood => "special_char_flood",
            Self::InvisibleFlood => "invisible_flood",
            Self::UnicodeFlood => "unicode_flood",
            Self::InjectionDetected => "injection_detected",
        };
        write!(f, "{s}")
    }
}

/// The outcome of a hard validation pass.
///
/// Invariant: `is_valid == true` exactly when `reason == RejectReason::Ok`.
/// On rejection, `sanitized` holds at most the single targeted fix for the
/// failing check (not the full pipeline), or is empty when no targeted fix
/// applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub is_valid: bool,
    pub reason: RejectReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub sanitized: String,
}

impl Verdict {
    /// An accepting verdict; the input passes through unchanged.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            reason: RejectReason::Ok,
            details: None,
            sanitized: text.into(),
        }
    }

    /// A rejecting verdict for the given reason.
    ///
    /// `sanitized` is the targeted fix for the failing check, or empty.
    pub fn reject(
        reason: RejectReason,
        details: Option<String>,
        sanitized: impl Into<String>,
    ) -> Self {
        debug_assert_ne!(reason, RejectReason::Ok, "reject called with Ok reason");
        Self {
            is_valid: false,
            reason,
            details,
            sanitized: sanitized.into(),
        }
    }
}
