//! Parsing of model output into insight sections

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;

use crate::{InsightsError, Result};

static FENCED_JSON: OnceLock<Regex> = OnceLock::new();

fn fenced_json() -> &'static Regex {
    FENCED_JSON.get_or_init(|| {
        Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("Invalid regex pattern")
    })
}

/// The five-part summary returned by the model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightSections {
    pub summary: String,
    pub themes: Vec<String>,
    pub improvements: Vec<String>,
    pub quick_wins: Vec<String>,
    pub long_term_actions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    #[serde(default)]
    tldr: Option<Value>,
    #[serde(default)]
    summary: Option<Value>,
    #[serde(default)]
    themes: Option<Value>,
    #[serde(default)]
    improvements: Option<Value>,
    #[serde(default)]
    quick_wins: Option<Value>,
    #[serde(default)]
    long_term: Option<Value>,
    #[serde(default)]
    long_term_actions: Option<Value>,
}

impl RawInsights {
    fn is_empty(&self) -> bool {
        self.tldr.is_none()
            && self.summary.is_none()
            && self.themes.is_none()
            && self.improvements.is_none()
            && self.quick_wins.is_none()
            && self.long_term.is_none()
            && self.long_term_actions.is_none()
    }
}

/// Parse model output into sections.
///
/// Accepts a bare JSON object, a fenced ```json block, or the first balanced
/// object embedded in prose. Missing sections become empty.
pub fn parse_insight_sections(text: &str) -> Result<InsightSections> {
    let value = extract_json(text).ok_or_else(|| {
        InsightsError::Service("Model returned non-JSON output".to_string())
    })?;

    if !value.is_object() {
        return Err(InsightsError::Service(
            "Model output is not a JSON object".to_string(),
        ));
    }

    let raw: RawInsights = serde_json::from_value(value)
        .map_err(|e| InsightsError::Service(format!("Unexpected insight JSON shape: {}", e)))?;

    if raw.is_empty() {
        return Err(InsightsError::Service(
            "Model output contains none of the expected sections".to_string(),
        ));
    }

    Ok(InsightSections {
        summary: value_to_text(raw.tldr.or(raw.summary)),
        themes: value_to_list(raw.themes),
        improvements: value_to_list(raw.improvements),
        quick_wins: value_to_list(raw.quick_wins),
        long_term_actions: value_to_list(raw.long_term.or(raw.long_term_actions)),
    })
}

fn extract_json(text: &str) -> Option<Value> {
    if let Some(caps) = fenced_json().captures(text) {
        if let Ok(value) = serde_json::from_str(&caps[1]) {
            return Some(value);
        }
    }

    if let Some(candidate) = first_balanced_object(text) {
        if let Ok(value) = serde_json::from_str(candidate) {
            return Some(value);
        }
    }

    serde_json::from_str(text.trim()).ok()
}

/// Find the first `{...}` slice with balanced braces, skipping braces inside
/// string literals.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_str = false;
    let mut escape = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_str {
            match ch {
                _ if escape => escape = false,
                '\\' => escape = true,
                '"' => in_str = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_str = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

fn value_to_text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(item_to_string)
            .collect::<Vec<_>>()
            .join(" "),
        Some(other) => other.to_string(),
    }
}

fn value_to_list(value: Option<Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.into_iter().filter_map(item_to_string).collect(),
        Some(other) => item_to_string(other).into_iter().collect(),
    }
}

fn item_to_string(value: Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s,
        other => other.to_string(),
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
