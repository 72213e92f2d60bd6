//! Injection pattern catalogue.
//!
//! Static catalogue of regex patterns used to detect prompt-injection and
//! jailbreak attempts in untrusted text.  Each entry carries a short
//! snake_case name, a [`PatternCategory`] for grouping/reporting, and a regex
//! string that is compiled at registry-construction time.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Broad classification of the adversarial technique a pattern targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternCategory {
    /// Literal conversation-role markers (`system:`, `assistant:`, ...).
    RoleConfusion,
    /// Attempts to cancel or replace the original instructions.
    InstructionOverride,
    /// Jailbreak and developer-mode tokens.
    Jailbreak,
    /// Attempts to redefine the model's persona ("act as", "pretend to be").
    RoleplayOverride,
    /// Instructions scoped to "from now on" / the rest of the conversation.
    TemporalOverride,
    /// Special chat-template delimiters recognised by common model formats.
    TemplateToken,
    /// JSON/array anchors at string boundaries that mimic a chat payload.
    JsonAnchor,
    /// Code-execution call patterns embedded in the text.
    CodeExecution,
    /// Templating syntax (`{{ }}`, `{% %}`).
    TemplateInjection,
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoleConfusion => write!(f, "RoleConfusion"),
            Self::InstructionOverride => write!(f, "InstructionOverride"),
            Self::Jailbreak => write!(f, "Jailbreak"),
            Self::RoleplayOverride => write!(f, "RoleplayOverride"),
            Self::TemporalOverride => write!(f, "TemporalOverride"),
            Self::TemplateToken => write!(f, "TemplateToken"),
            Self::JsonAnchor => write!(f, "JsonAnchor"),
            Self::CodeExecution => write!(f, "CodeExecution"),
            Self::TemplateInjection => write!(f, "TemplateInjection"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pattern definition
// ---------------------------------------------------------------------------

/// A single detection pattern.
pub struct InjectionPattern {
    /// Short, snake_case identifier used in logs and verdict details.
    pub name: &'static str,
    /// The family of adversarial technique this pattern belongs to.
    pub category: PatternCategory,
    /// A regex string (compiled by [`crate::registry::PatternRegistry`]).
    pub pattern: &'static str,
}

// ---------------------------------------------------------------------------
// Pattern catalogue
// ---------------------------------------------------------------------------

/// The built-in pattern library.
///
/// Kept as a static slice so the catalogue carries zero runtime cost until
/// the registry compiles it.  Detection is a boolean over the whole set, so
/// ordering here only affects which pattern name ends up in diagnostics.
pub static PATTERNS: &[InjectionPattern] = &[
    // ---- Role confusion -------------------------------------------------
    InjectionPattern {
        name: "role_marker",
        category: PatternCategory::RoleConfusion,
        pattern: r"(?i)\b(system|assistant|user|model)[ \t]*:",
    },
    // ---- Instruction override -------------------------------------------
    InjectionPattern {
        name: "ignore_previous",
        category: PatternCategory::InstructionOverride,
        pattern: r"(?i)ignore\s+(all\s+)?(previous|prior|above|earlier)\s+(instructions?|prompts?|rules?|context)",
    },
    InjectionPattern {
        name: "disregard_prior",
        category: PatternCategory::InstructionOverride,
        pattern: r"(?i)disregard\s+(all\s+)?(prior|previous|above|earlier)",
    },
    InjectionPattern {
        name: "forget_instructions",
        category: PatternCategory::InstructionOverride,
        pattern: r"(?i)forget\s+(all\s+)?(your|previous|prior)\s+(instructions?|rules?|training)",
    },
    InjectionPattern {
        name: "new_instruction",
        category: PatternCategory::InstructionOverride,
        pattern: r"(?i)new\s+instructions?\s*:",
    },
    InjectionPattern {
        name: "do_not_follow",
        category: PatternCategory::InstructionOverride,
        pattern: r"(?i)\bdo\s+not\s+follow\s+(any|the)\s+(previous|above|prior)",
    },
    // ---- Jailbreak ------------------------------------------------------
    InjectionPattern {
        name: "jailbreak",
        category: PatternCategory::Jailbreak,
        pattern: r"(?i)\bjail\s*break",
    },
    InjectionPattern {
        name: "developer_mode",
        category: PatternCategory::Jailbreak,
        pattern: r"(?i)\b(developer|dev|god)\s+mode\b",
    },
    InjectionPattern {
        name: "dan_mode",
        category: PatternCategory::Jailbreak,
        pattern: r"(?i)\bdan\s+(mode|prompt)\b",
    },
    InjectionPattern {
        name: "do_anything_now",
        category: PatternCategory::Jailbreak,
        pattern: r"(?i)do\s+anything\s+now",
    },
    InjectionPattern {
        name: "no_restrictions",
        category: PatternCategory::Jailbreak,
        pattern: r"(?i)without\s+(any\s+)?(restrictions?|limitations?|filters?)",
    },
    // ---- Role-play override ---------------------------------------------
    InjectionPattern {
        name: "act_as",
        category: PatternCategory::RoleplayOverride,
        pattern: r"(?i)\bact\s+as\s+(if\s+you\s+are\s+)?an?\b",
    },
    InjectionPattern {
        name: "pretend_to_be",
        category: PatternCategory::RoleplayOverride,
        pattern: r"(?i)pretend\s+(to\s+be|you\s+are)",
    },
    InjectionPattern {
        name: "you_are_now",
        category: PatternCategory::RoleplayOverride,
        pattern: r"(?i)you\s+are\s+now\s+an?\b",
    },
    InjectionPattern {
        name: "roleplay_as",
        category: PatternCategory::RoleplayOverride,
        pattern: r"(?i)\brole\s*play\s+as\b",
    },
    // ---- Temporal override ----------------------------------------------
    InjectionPattern {
        name: "from_now_on",
        category: PatternCategory::TemporalOverride,
        pattern: r"(?i)from\s+now\s+on",
    },
    InjectionPattern {
        name: "rest_of_conversation",
        category: PatternCategory::TemporalOverride,
        pattern: r"(?i)for\s+the\s+rest\s+of\s+(this|the)\s+(conversation|chat|session)",
    },
    // ---- Chat-template tokens -------------------------------------------
    InjectionPattern {
        name: "im_start_token",
        category: PatternCategory::TemplateToken,
        pattern: r"(?i)<\|\s*im_(start|end)\s*\|>",
    },
    InjectionPattern {
        name: "endoftext_token",
        category: PatternCategory::TemplateToken,
        pattern: r"(?i)<\|\s*endoftext\s*\|>",
    },
    InjectionPattern {
        name: "inst_tag",
        category: PatternCategory::TemplateToken,
        pattern: r"(?i)\[\s*/?\s*INST\s*\]",
    },
    InjectionPattern {
        name: "sys_delimiter",
        category: PatternCategory::TemplateToken,
        pattern: r"(?i)<<\s*/?\s*SYS\s*>>",
    },
    InjectionPattern {
        name: "system_tag",
        category: PatternCategory::TemplateToken,
        pattern: r"(?i)<\s*/?\s*system\s*>",
    },
    InjectionPattern {
        // Bracketed instruction blocks may span lines, hence (?s).
        name: "bracketed_block",
        category: PatternCategory::TemplateToken,
        pattern: r"(?is)\[\s*(system|instructions?)\b[^\]]{0,200}\]",
    },
    // ---- JSON / array confusion anchors ----------------------------------
    InjectionPattern {
        name: "json_open_anchor",
        category: PatternCategory::JsonAnchor,
        pattern: r#"(?s)^\s*[\[{]\s*""#,
    },
    InjectionPattern {
        name: "json_close_anchor",
        category: PatternCategory::JsonAnchor,
        pattern: r#"(?s)"\s*[}\]]\s*$"#,
    },
    InjectionPattern {
        name: "json_role_field",
        category: PatternCategory::JsonAnchor,
        pattern: r#"(?is)^\s*[\[{].{0,80}"(role|content|messages)"\s*:"#,
    },
    // ---- Code execution --------------------------------------------------
    InjectionPattern {
        name: "eval_call",
        category: PatternCategory::CodeExecution,
        pattern: r"(?i)\b(eval|exec)\s*\(",
    },
    InjectionPattern {
        name: "os_system_call",
        category: PatternCategory::CodeExecution,
        pattern: r"(?i)\bos\.system\s*\(",
    },
    InjectionPattern {
        name: "subprocess_call",
        category: PatternCategory::CodeExecution,
        pattern: r"(?i)\bsubprocess\.(run|call|popen)\s*\(",
    },
    InjectionPattern {
        name: "import_dunder",
        category: PatternCategory::CodeExecution,
        pattern: r"(?i)__import__\s*\(",
    },
    // ---- Templating syntax -----------------------------------------------
    InjectionPattern {
        name: "mustache_braces",
        category: PatternCategory::TemplateInjection,
        pattern: r"(?s)\{\{.+?\}\}",
    },
    InjectionPattern {
        name: "jinja_statement",
        category: PatternCategory::TemplateInjection,
        pattern: r"(?s)\{%.+?%\}",
    },
];
