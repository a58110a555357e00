//! Property-based tests for JSON field editing
//!
//! Identifier stripping, export file naming and error message extraction.

use grafsync_core::ResourceKind;
use grafsync_core::document::{
    MAX_BODY_EXCERPT_CHARS, error_message_from_body, export_file_name, sanitize_file_component,
    strip_datasource_identifiers,
};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

// ========== Strategies ==========

/// Strategy for datasource-like objects that may or may not carry `id`/`uid`
fn arb_datasource() -> impl Strategy<Value = Map<String, Value>> {
    (
        proptest::option::of(1u32..10_000),
        proptest::option::of("[A-Za-z0-9]{4,12}"),
        "[A-Za-z][A-Za-z0-9 _-]{0,24}",
        prop_oneof![Just("prometheus"), Just("loki"), Just("postgres")],
    )
        .prop_map(|(id, uid, name, kind)| {
            let mut object = Map::new();
            if let Some(id) = id {
                object.insert("id".to_string(), json!(id));
            }
            if let Some(uid) = uid {
                object.insert("uid".to_string(), json!(uid));
            }
            object.insert("name".to_string(), json!(name));
            object.insert("type".to_string(), json!(kind));
            object
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Stripping identifiers twice gives the same result as stripping once
    #[test]
    fn strip_is_idempotent(datasource in arb_datasource()) {
        let mut once = datasource.clone();
        strip_datasource_identifiers(&mut once);

        let mut twice = once.clone();
        strip_datasource_identifiers(&mut twice);

        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.contains_key("id"));
        prop_assert!(!once.contains_key("uid"));
        prop_assert_eq!(once.get("name"), datasource.get("name"));
    }

    /// Sanitized components never contain spaces or slashes and keep their length
    #[test]
    fn sanitize_removes_separators(name in "\\PC{0,40}") {
        let sanitized = sanitize_file_component(&name);
        prop_assert!(!sanitized.contains(' '));
        prop_assert!(!sanitized.contains('/'));
        prop_assert_eq!(sanitized.chars().count(), name.chars().count());
    }

    /// Export file names follow `<kind>_<key>_<name>.json`
    #[test]
    fn export_file_name_shape(key in "[0-9]{1,6}", name in "[A-Za-z /]{1,20}") {
        let file = export_file_name(ResourceKind::Datasource, &key, &name);
        let expected_prefix = format!("datasource_{key}_");
        prop_assert!(file.starts_with(&expected_prefix));
        prop_assert!(file.ends_with(".json"));
        prop_assert!(!file.contains('/'));
        prop_assert!(!file.contains(' '));
    }

    /// Raw bodies are cut to the excerpt bound plus an ellipsis
    #[test]
    fn error_excerpt_is_bounded(body in "[a-z<>]{1,600}") {
        let message = error_message_from_body(&body);
        prop_assert!(message.chars().count() <= MAX_BODY_EXCERPT_CHARS + 3);
        if body.chars().count() > MAX_BODY_EXCERPT_CHARS {
            prop_assert!(message.ends_with("..."));
        } else {
            prop_assert_eq!(message, body);
        }
    }

    /// The `message` field wins over `error` and the raw body
    #[test]
    fn error_message_field_preferred(message in "[A-Za-z ]{1,50}", error in "[A-Za-z ]{1,50}") {
        let body = json!({"message": message, "error": error}).to_string();
        prop_assert_eq!(error_message_from_body(&body), message);
    }
}
