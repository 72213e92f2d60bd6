//! Character-class analysis over explicit codepoint range tables.
//!
//! Unicode general category alone cannot separate legitimate punctuation
//! from steganographic zero-width flooding or private-use-plane abuse, so
//! every class here is an explicit, auditable range table rather than a
//! platform Unicode-database predicate.

// ---------------------------------------------------------------------------
// Range tables
// ---------------------------------------------------------------------------

/// C0 controls except tab/newline, DEL, and C1 controls.
///
/// Carriage return counts as control: the sanitizer normalises `\r\n` by
/// dropping the `\r`.
pub fn is_control(c: char) -> bool {
    matches!(c,
        '\u{0000}'..='\u{0008}'
        | '\u{000B}'..='\u{001F}'
        | '\u{007F}'..='\u{009F}')
}

/// Zero-width characters exploitable for invisible content flooding.
pub fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}')
}

/// Private-use area plus everything above U+2FFFF.
///
/// The high cutoff covers both supplementary private-use planes, the tag
/// block (U+E0000..), and the supplementary reserved ranges in one rule.
pub fn is_suspicious(c: char) -> bool {
    matches!(c, '\u{E000}'..='\u{F8FF}') || c as u32 > 0x2FFFF
}

/// Invisible formatting characters: soft hyphen, directional marks and
/// embeddings, invisible operators, deprecated format controls.
pub fn is_invisible_format(c: char) -> bool {
    matches!(c,
        '\u{00AD}'
        | '\u{034F}'
        | '\u{180E}'
        | '\u{200E}' | '\u{200F}'
        | '\u{202A}'..='\u{202E}'
        | '\u{2061}'..='\u{2064}'
        | '\u{2066}'..='\u{2069}'
        | '\u{206A}'..='\u{206F}')
}

/// A character that actually renders: not whitespace and not in any of the
/// invisible tables above.
pub fn is_visible(c: char) -> bool {
    !c.is_whitespace()
        && !is_control(c)
        && !is_zero_width(c)
        && !is_suspicious(c)
        && !is_invisible_format(c)
}

/// Structural/template characters counted toward the consecutive
/// special-character flood check.
///
/// Deliberately excludes sentence punctuation and common markdown runs
/// (`...`, `###`, `***`, code fences) to keep the hard validator usable on
/// pasted prose.
pub fn is_special(c: char) -> bool {
    matches!(c, '{' | '}' | '[' | ']' | '<' | '>' | '|' | '\\' | '$' | '%' | '^' | '~' | '@')
}

// ---------------------------------------------------------------------------
// Aggregate scan
// ---------------------------------------------------------------------------

/// Per-class character counts for one piece of text, computed in a single
/// pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharScan {
    pub total: usize,
    pub control: usize,
    pub zero_width: usize,
    pub suspicious: usize,
    pub visible: usize,
    pub whitespace: usize,
}

impl CharScan {
    /// Classify every codepoint in `text`.
    pub fn analyze(text: &str) -> Self {
        let mut scan = Self::default();
        for c in text.chars() {
            scan.total += 1;
            if is_control(c) {
                scan.control += 1;
            } else if is_zero_width(c) {
                scan.zero_width += 1;
            } else if is_suspicious(c) {
                scan.suspicious += 1;
            } else if c.is_whitespace() {
                scan.whitespace += 1;
            } else if is_visible(c) {
                scan.visible += 1;
            }
        }
        scan
    }

    /// Fraction of the text that renders as content.
    ///
    /// Whitespace is counted on the visible side so that ordinary prose with
    /// many spaces is not mistaken for an invisible flood.  Empty input is
    /// fully visible by definition.
    pub fn visible_ratio(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.visible + self.whitespace) as f64 / self.total as f64
    }
}

/// Returns `true` when `text` contains `run_len` or more consecutive
/// characters from the special set.
pub fn has_special_run(text: &str, run_len: usize) -> bool {
    if run_len == 0 {
        return true;
    }
    let mut run = 0usize;
    for c in text.chars() {
        if is_special(c) {
            run += 1;
            if run >= run_len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

// ---------------------------------------------------------------------------
// Targeted strips
// ---------------------------------------------------------------------------

/// Remove every control character, preserving tab and newline.
pub fn strip_control(text: &str) -> String {
    text.chars().filter(|&c| !is_control(c)).collect()
}

/// Remove every zero-width character.
pub fn strip_zero_width(text: &str) -> String {
    text.chars().filter(|&c| !is_zero_width(c)).collect()
}
