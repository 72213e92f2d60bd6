//! Unconditional sanitization pipeline.
//!
//! Every step always runs, in a fixed order; nothing here short-circuits or
//! rejects.  The pipeline is idempotent and bounds its output to the
//! requested length in codepoints.

use regex::Regex;

use crate::charclass;

/// Best-effort cleaning pipeline with its regexes compiled once.
pub struct Sanitizer {
    /// Matches a role marker so a space can be inserted before the colon.
    role_re: Regex,
    /// Runs of spaces/tabs.
    space_run_re: Regex,
    /// Three or more consecutive newlines.
    newline_run_re: Regex,
}

impl Sanitizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            role_re: Regex::new(r"(?i)\b(system|assistant|user)[ \t]*:")?,
            space_run_re: Regex::new(r"[ \t]+")?,
            newline_run_re: Regex::new(r"\n{3,}")?,
        })
    }

    /// Run the full pipeline.
    ///
    /// Steps, in order:
    /// 1. truncate to `max_length` codepoints, keeping the prefix;
    /// 2. strip control characters, preserving tab and newline;
    /// 3. insert a space before the colon of a role marker
    ///    (`system:` becomes `system : `);
    /// 4. collapse space/tab runs to one space and three-or-more newlines
    ///    to exactly two;
    /// 5. trim leading and trailing whitespace.
    ///
    /// Role-marker spacing can push the text back over the limit, so the
    /// result is re-clamped at the end; the trailing trim after the clamp
    /// keeps the pipeline idempotent when the clamp cuts mid-whitespace.
    pub fn clean(&self, text: &str, max_length: usize) -> String {
        let truncated = truncate_chars(text, max_length);
        let stripped = charclass::strip_control(truncated);
        let spaced = self.role_re.replace_all(&stripped, "$1 : ");
        let collapsed = self.space_run_re.replace_all(&spaced, " ");
        let collapsed = self.newline_run_re.replace_all(&collapsed, "\n\n");
        let trimmed = collapsed.trim();
        truncate_chars(trimmed, max_length).trim_end().to_string()
    }
}

/// Keep the first `max` codepoints of `text`.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
