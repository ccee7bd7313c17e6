//! Credential redaction.
//!
//! Two passes over everything that reaches the audit trail:
//!
//! - structured payloads: any object key containing a sensitive name has
//!   its value replaced, at any depth
//! - free-form strings: `key=value`, `key: value` and `"key":"value"`
//!   shapes keep the key and separator, the value becomes [`REDACTED`]

use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Fixed marker written in place of a secret.
pub const REDACTED: &str = "***";

/// Key names treated as sensitive (case-insensitive, matched as substrings
/// of object keys).
const SENSITIVE_KEYS: &[&str] = &["password", "secret"];

/// `<key><sep><value>` where value is double-quoted, single-quoted or bare.
/// Quoted values honour backslash escapes; an unterminated quote runs to the
/// end of the text.
static INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i)((?:password|secret)[\w-]*["']?)(\s*[:=]\s*)"#,
        r#"("(?:[^"\\]|\\.)*"?|'(?:[^'\\]|\\.)*'?|[^"'\s,;}&]+)"#,
    ))
    .expect("valid redaction pattern")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct Redactor;

impl Redactor {
    pub fn new() -> Self {
        Self
    }

    /// Whether an object key names a secret.
    pub fn is_sensitive_key(&self, key: &str) -> bool {
        let key = key.to_ascii_lowercase();
        SENSITIVE_KEYS.iter().any(|k| key.contains(k))
    }

    /// Mask inline `key=value` style secrets in free text.
    pub fn redact_text<'t>(&self, text: &'t str) -> Cow<'t, str> {
        INLINE.replace_all(text, |caps: &Captures<'_>| {
            let value = &caps[3];
            let masked = match value.chars().next() {
                Some(q @ ('"' | '\'')) => format!("{q}{REDACTED}{q}"),
                _ => REDACTED.to_string(),
            };
            format!("{}{}{}", &caps[1], &caps[2], masked)
        })
    }

    /// Redact a structured payload recursively.
    pub fn redact_value(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| {
                        let v = if self.is_sensitive_key(&k) {
                            Value::String(REDACTED.to_string())
                        } else {
                            self.redact_value(v)
                        };
                        (k, v)
                    })
                    .collect::<Map<String, Value>>(),
            ),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.redact_value(v)).collect())
            }
            Value::String(s) => Value::String(self.redact_text(&s).into_owned()),
            other => other,
        }
    }
}
