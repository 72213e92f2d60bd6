//! Compiled pattern registry.
//!
//! Compiles the static catalogue in [`crate::patterns`] into a
//! [`RegexSet`](regex::RegexSet) for fast multi-pattern matching, with
//! individual [`Regex`] objects kept alongside for extracting match details.
//! The registry is built once at startup and is read-only thereafter; a
//! malformed static pattern is the only fatal error in this crate.

use regex::{Regex, RegexSet};

use crate::patterns::{PatternCategory, PATTERNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while constructing a [`PatternRegistry`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to compile injection pattern: {0}")]
    RegexCompile(#[from] regex::Error),
}

// ---------------------------------------------------------------------------
// Match detail
// ---------------------------------------------------------------------------

/// The lowest-offset pattern match found in a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    /// The `name` field of the catalogue entry that matched.
    pub name: &'static str,
    /// The family of adversarial technique.
    pub category: PatternCategory,
    /// Byte offset of the match within the scanned text.
    pub offset: usize,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Process-wide, immutable set of compiled injection patterns.
///
/// Cheap to share (`&PatternRegistry` or `Arc`); all methods take `&self`
/// and perform no I/O or mutation.
pub struct PatternRegistry {
    /// Used to cheaply determine *whether* and *which* patterns match.
    set: RegexSet,
    /// Parallel vec of individually compiled regexes (same order as
    /// [`PATTERNS`]) for extracting match positions.
    individual: Vec<Regex>,
}

impl PatternRegistry {
    /// Compile every pattern in the catalogue and return a ready registry.
    pub fn new() -> Result<Self, RegistryError> {
        let pattern_strings: Vec<&str> = PATTERNS.iter().map(|p| p.pattern).collect();

        let set = RegexSet::new(&pattern_strings)?;

        let individual = pattern_strings
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { set, individual })
    }

    /// Returns `true` when any pattern in the catalogue matches `text`.
    ///
    /// Empty or whitespace-only input never matches.  This method never
    /// fails and performs no mutation.
    pub fn match_any(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.set.is_match(text)
    }

    /// Returns the lowest-offset match in `text`, if any.
    ///
    /// Used to populate verdict details and log fields; detection itself is
    /// a boolean over the whole set, so which pattern "wins" only affects
    /// diagnostics.
    pub fn first_match(&self, text: &str) -> Option<PatternMatch> {
        if text.trim().is_empty() {
            return None;
        }

        let mut best: Option<PatternMatch> = None;
        for idx in self.set.matches(text).into_iter() {
            let def = &PATTERNS[idx];
            if let Some(m) = self.individual[idx].find(text) {
                let candidate = PatternMatch {
                    name: def.name,
                    category: def.category,
                    offset: m.start(),
                };
                if best.map_or(true, |b| candidate.offset < b.offset) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    /// Returns the number of patterns in the compiled set.
    pub fn pattern_count(&self) -> usize {
        self.individual.len()
    }
}
