//! Turns an event's `DESCRIPTION` back into the JSON payload it was written as.
//!
//! The feed stores a small JSON object (`role`, `type`) in the description.
//! Calendar text escaping mangles it on the way in: commas and semicolons
//! pick up a backslash and line breaks become `\n` escapes (or real breaks,
//! depending on who produced the file). [`normalize`] reverses exactly those
//! artifacts and [`decode`] parses the result without ever failing.

use regex::Regex;
use serde_json::{json, Value};
use std::sync::LazyLock;

// A line break is a real one or the `\n` / `\N` text escape, padded by any
// folding whitespace.
static COMMA_BEFORE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\,(?:[ \t]*(?:\r?\n|\\[nN]))+[ \t]*").expect("Invalid comma break regex")
});
static OPEN_BRACE_BEFORE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(?:[ \t]*(?:\r?\n|\\[nN]))+[ \t]*").expect("Invalid open brace regex")
});
static BREAK_BEFORE_CLOSE_BRACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[ \t]*(?:\r?\n|\\[nN]))+[ \t]*\}").expect("Invalid close brace regex")
});
static ESCAPED_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([,;'])").expect("Invalid punctuation regex"));

/// What a description decoded to.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredDescription {
    /// Any JSON document; only the `role` and `type` fields are read.
    Decoded(Value),
    /// The text did not parse. Holds the normalized text for diagnostics.
    Malformed { original_data: String },
}

impl StructuredDescription {
    /// Returns a string field of the decoded object, or `""` when the field is
    /// missing, not a string, or the description was malformed.
    pub fn field(&self, name: &str) -> &str {
        match self {
            StructuredDescription::Decoded(value) => {
                value.get(name).and_then(Value::as_str).unwrap_or("")
            }
            StructuredDescription::Malformed { .. } => "",
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, StructuredDescription::Malformed { .. })
    }

    pub fn to_json(&self) -> Value {
        match self {
            StructuredDescription::Decoded(value) => value.clone(),
            StructuredDescription::Malformed { original_data } => json!({
                "malformedJson": true,
                "originalData": original_data,
            }),
        }
    }
}

/// Undoes calendar escaping so the description can be parsed as JSON.
///
/// Absent or empty input becomes `"{}"`. The scoped comma rule runs before the
/// generic unescape, otherwise the break after an escaped comma would survive.
/// Any `\n` escape left over after that is a break somewhere else in the
/// payload and is expanded by [`expand_line_breaks`].
pub fn normalize(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(text) if !text.is_empty() => text,
        _ => "{}",
    };

    let text = COMMA_BEFORE_BREAK.replace_all(raw, ",");
    let text = OPEN_BRACE_BEFORE_BREAK.replace_all(&text, "{");
    let text = BREAK_BEFORE_CLOSE_BRACE.replace_all(&text, "}");
    let text = ESCAPED_PUNCTUATION.replace_all(&text, "$1");
    expand_line_breaks(&text)
}

/// Turns `\n` / `\N` escapes outside JSON strings into real line breaks.
///
/// Inside a string the escape is kept as `\n`, which JSON reads as the same
/// line break; a raw one there would not parse.
fn expand_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_string = !in_string;
                out.push(c);
            }
            '\\' => match chars.next() {
                Some('n' | 'N') if !in_string => out.push('\n'),
                Some('N') => out.push_str("\\n"),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }

    out
}

pub fn decode(text: &str) -> StructuredDescription {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => StructuredDescription::Decoded(value),
        Err(_) => StructuredDescription::Malformed {
            original_data: text.to_string(),
        },
    }
}

pub fn parse_description(raw: Option<&str>) -> StructuredDescription {
    decode(&normalize(raw))
}
