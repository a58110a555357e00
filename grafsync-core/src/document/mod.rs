//! JSON field editing for Grafana documents.
//!
//! Everything here works on `serde_json` values, so field values are never
//! spliced into text: a password containing `$`, `!` or quotes is stored as
//! an ordinary JSON string.

use serde_json::{Map, Value};

use crate::error::DocumentError;
use crate::models::ResourceKind;

/// Fields that identify a datasource on its source instance only
pub const DATASOURCE_IDENTIFIER_FIELDS: &[&str] = &["id", "uid"];

/// Object holding write-only datasource secrets
pub const SECURE_JSON_DATA: &str = "secureJsonData";

/// Key of the password inside `secureJsonData`
pub const PASSWORD_FIELD: &str = "password";

/// Maximum number of characters of a raw response body shown in messages
pub const MAX_BODY_EXCERPT_CHARS: usize = 200;

/// Parses bytes as a JSON document.
///
/// # Errors
///
/// Returns `DocumentError::InvalidJson` when the bytes are not valid JSON
/// (including invalid UTF-8).
pub fn parse_document(bytes: &[u8]) -> Result<Value, DocumentError> {
    serde_json::from_slice(bytes).map_err(|e| DocumentError::InvalidJson(e.to_string()))
}

/// Parses bytes as a JSON object.
///
/// # Errors
///
/// Returns `DocumentError::InvalidJson` for invalid JSON and
/// `DocumentError::NotAnObject` when the top level is not an object.
pub fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>, DocumentError> {
    match parse_document(bytes)? {
        Value::Object(object) => Ok(object),
        _ => Err(DocumentError::NotAnObject),
    }
}

/// Removes the given top-level fields. Absent fields are ignored.
pub fn strip_fields(object: &mut Map<String, Value>, fields: &[&str]) {
    for field in fields {
        object.remove(*field);
    }
}

/// Removes `id` and `uid` from a datasource.
///
/// Stripping an already-stripped datasource leaves it unchanged.
pub fn strip_datasource_identifiers(object: &mut Map<String, Value>) {
    strip_fields(object, DATASOURCE_IDENTIFIER_FIELDS);
}

/// Sets `secureJsonData.password`, creating `secureJsonData` when needed.
///
/// Other keys already present in `secureJsonData` are kept.
///
/// # Errors
///
/// Returns `DocumentError::UnexpectedFieldType` when `secureJsonData` exists
/// but is not an object.
pub fn set_secure_password(
    object: &mut Map<String, Value>,
    password: &str,
) -> Result<(), DocumentError> {
    let secure = object
        .entry(SECURE_JSON_DATA)
        .or_insert_with(|| Value::Object(Map::new()));

    if secure.is_null() {
        *secure = Value::Object(Map::new());
    }

    match secure {
        Value::Object(fields) => {
            fields.insert(PASSWORD_FIELD.to_string(), Value::String(password.to_string()));
            Ok(())
        }
        _ => Err(DocumentError::UnexpectedFieldType(SECURE_JSON_DATA.to_string())),
    }
}

/// Serializes a value as pretty JSON and checks that it parses back.
///
/// # Errors
///
/// Returns `DocumentError::Serialize` if serialization fails and
/// `DocumentError::InvalidJson` if the output does not parse.
pub fn render_validated(value: &Value) -> Result<String, DocumentError> {
    let mut text =
        serde_json::to_string_pretty(value).map_err(|e| DocumentError::Serialize(e.to_string()))?;
    parse_document(text.as_bytes())?;
    text.push('\n');
    Ok(text)
}

/// Returns a string field of an object, if present and non-empty
#[must_use]
pub fn string_field<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    object
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Replaces characters that cannot appear in a file name component.
///
/// Spaces and `/` become `_`; everything else is kept.
#[must_use]
pub fn sanitize_file_component(name: &str) -> String {
    name.chars()
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .collect()
}

/// Builds `<kind>_<id-or-uid>_<sanitized-name>.json`
#[must_use]
pub fn export_file_name(kind: ResourceKind, key: &str, name: &str) -> String {
    format!(
        "{}_{}_{}.json",
        kind.file_prefix(),
        sanitize_file_component(key),
        sanitize_file_component(name)
    )
}

/// Extracts a human-readable error from a Grafana response body.
///
/// Uses the `message` field, then `error`, and otherwise an excerpt of the
/// raw body of at most [`MAX_BODY_EXCERPT_CHARS`] characters.
#[must_use]
pub fn error_message_from_body(body: &str) -> String {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = string_field(&object, key) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }

    let mut chars = trimmed.chars();
    let excerpt: String = chars.by_ref().take(MAX_BODY_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{excerpt}...")
    } else {
        excerpt
    }
}
