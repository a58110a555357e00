//! Property-based tests for password patching
//!
//! Any password, including quotes, backslashes and shell metacharacters,
//! must survive the patch and leave a valid JSON document.

use grafsync_core::add_password;
use grafsync_core::document::render_validated;
use proptest::prelude::*;
use serde_json::{Value, json};

/// Strategy for passwords full of characters that break naive quoting
fn arb_password() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{1,40}",
        "[$!\"'\\\\`{}@%&*]{1,20}",
        Just("P@ss!".to_string()),
    ]
}

/// Strategy for pre-existing `secureJsonData` contents
fn arb_secure_json_data() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        Just(Some(Value::Null)),
        Just(Some(json!({}))),
        Just(Some(json!({"basicAuthPassword": "keep-me"}))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The patched document renders to valid JSON holding the exact password
    #[test]
    fn patched_password_round_trips(
        name in "[A-Za-z0-9_-]{1,16}",
        password in arb_password(),
        existing in arb_secure_json_data(),
    ) {
        let mut document = json!({"name": name, "type": "postgres"});
        if let Some(existing) = existing.clone() {
            document["secureJsonData"] = existing;
        }

        let patched = add_password(document, &password).expect("object document");
        let text = render_validated(&patched).expect("valid JSON");
        let reparsed: Value = serde_json::from_str(&text).expect("parses back");

        prop_assert_eq!(reparsed["secureJsonData"]["password"].as_str(), Some(password.as_str()));
        prop_assert_eq!(reparsed["name"].as_str(), Some(name.as_str()));

        if existing == Some(json!({"basicAuthPassword": "keep-me"})) {
            prop_assert_eq!(
                reparsed["secureJsonData"]["basicAuthPassword"].as_str(),
                Some("keep-me")
            );
        }
    }
}
