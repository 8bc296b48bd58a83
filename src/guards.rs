//! Sample sanitization and prompt-injection guard rails
//!
//! Every sampled text passes through here before it is placed in a prompt:
//! control characters are stripped, long texts are capped, role markers are
//! neutralized and suspicious patterns are surfaced as warnings.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::config::GuardSettings;

/// Suffix appended to texts cut at the per-sample cap
pub const TRUNCATION_MARKER: &str = " …[truncated]";

/// Maximum warnings listed in the report footer
const SUMMARY_WARNING_LIMIT: usize = 8;

const SUSPECT_PATTERNS: &[&str] = &[
    r"(?i)\bignore all instructions\b",
    r"(?i)\boverride\b.*\binstructions\b",
    r"(?i)\bdisregard\b.*\brules\b",
    r"(?i)\bsystem:",
    r"(?i)\bassistant:",
    r"(?i)\buser:.*\bsystem\b",
    r"(?i)<<.*system.*>>",
];

static CONTROL_CHARS: OnceLock<Regex> = OnceLock::new();
static ROLE_MARKER: OnceLock<Regex> = OnceLock::new();
static SUSPECT_REGEXES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();

fn control_chars() -> &'static Regex {
    CONTROL_CHARS.get_or_init(|| {
        Regex::new(r"[\x00-\x08\x0B-\x1F\x7F]").expect("Invalid regex pattern")
    })
}

fn role_marker() -> &'static Regex {
    ROLE_MARKER.get_or_init(|| {
        Regex::new(r"(?i)\b(system|assistant|user):").expect("Invalid regex pattern")
    })
}

fn suspect_regexes() -> &'static [(&'static str, Regex)] {
    SUSPECT_REGEXES.get_or_init(|| {
        SUSPECT_PATTERNS
            .iter()
            .map(|p| (*p, Regex::new(p).expect("Invalid regex pattern")))
            .collect()
    })
}

/// Sanitized texts plus the warnings raised while cleaning them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizedSample {
    pub texts: Vec<String>,
    pub warnings: Vec<String>,
}

/// Clean sampled texts for prompt use.
pub fn sanitize_samples<S: AsRef<str>>(samples: &[S], settings: &GuardSettings) -> SanitizedSample {
    let mut result = SanitizedSample::default();

    for sample in samples {
        let original = sample.as_ref();
        result.warnings.extend(detect_suspicious(original));

        let cleaned = control_chars().replace_all(original, "");
        let cleaned = truncate_chars(&cleaned, settings.max_chars_per_sample);
        let cleaned = neutralize_role_markers(&cleaned);
        result.texts.push(cleaned);
    }

    if !result.warnings.is_empty() {
        tracing::warn!(
            "Guard rails flagged {} suspicious pattern match(es) in samples",
            result.warnings.len()
        );
    }

    result
}

/// Cut `text` to at most `limit` characters, marking the cut.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

fn neutralize_role_markers(text: &str) -> String {
    role_marker()
        .replace_all(text, |caps: &regex::Captures| {
            format!("[role-redacted:{}]", caps[1].to_lowercase())
        })
        .into_owned()
}

fn detect_suspicious(text: &str) -> Vec<String> {
    suspect_regexes()
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(pattern, _)| format!("Suspicious pattern matched: /{}/", pattern))
        .collect()
}

/// One-line guard-rail note for the report footer.
pub fn guard_rails_summary(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return "Guard rails: OK (no suspicious patterns detected).".to_string();
    }

    let mut seen = HashSet::new();
    let unique: Vec<&str> = warnings
        .iter()
        .map(String::as_str)
        .filter(|w| seen.insert(*w))
        .collect();

    let shown = unique
        .iter()
        .take(SUMMARY_WARNING_LIMIT)
        .copied()
        .collect::<Vec<_>>()
        .join("; ");

    if unique.len() > SUMMARY_WARNING_LIMIT {
        format!(
            "Guard rails warnings: {} (+{} more)",
            shown,
            unique.len() - SUMMARY_WARNING_LIMIT
        )
    } else {
        format!("Guard rails warnings: {}", shown)
    }
}
