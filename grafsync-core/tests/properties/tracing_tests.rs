//! Property-based tests for the tracing configuration

use grafsync_core::tracing::{TracingConfig, TracingLevel, TracingOutput, span_names};
use proptest::prelude::*;

// ========== Strategies ==========

/// Strategy for generating tracing levels
fn arb_tracing_level() -> impl Strategy<Value = TracingLevel> {
    prop_oneof![
        Just(TracingLevel::Error),
        Just(TracingLevel::Warn),
        Just(TracingLevel::Info),
        Just(TracingLevel::Debug),
        Just(TracingLevel::Trace),
    ]
}

/// Strategy for generating tracing output types
fn arb_tracing_output() -> impl Strategy<Value = TracingOutput> {
    prop_oneof![Just(TracingOutput::Stdout), Just(TracingOutput::Stderr)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Level and output set through the builder are kept
    #[test]
    fn config_builder_keeps_values(level in arb_tracing_level(), output in arb_tracing_output()) {
        let config = TracingConfig::new().with_level(level).with_output(output.clone());
        prop_assert_eq!(config.level, level);
        prop_assert_eq!(config.output, output);
        prop_assert!(config.filter.is_none());
    }

    /// Levels survive a Display/FromStr round trip
    #[test]
    fn level_display_parses_back(level in arb_tracing_level()) {
        prop_assert_eq!(level.to_string().parse::<TracingLevel>(), Ok(level));
    }

    /// More `-v` flags never lower the level, and quiet always wins
    #[test]
    fn verbosity_is_monotonic(verbose in 0u8..10) {
        let level = TracingLevel::from_verbosity(verbose, false);
        let louder = TracingLevel::from_verbosity(verbose.saturating_add(1), false);
        prop_assert!(louder >= level);
        prop_assert_eq!(TracingLevel::from_verbosity(verbose, true), TracingLevel::Error);
    }

    /// The level directive names both crates at the chosen level
    #[test]
    fn level_directive_mentions_crates(level in arb_tracing_level()) {
        let directive = TracingConfig::new().with_level(level).level_directive();
        let expected_grafsync = format!("grafsync={level}");
        let expected_core = format!("grafsync_core={level}");
        prop_assert!(directive.contains(&expected_grafsync));
        prop_assert!(directive.contains(&expected_core));
    }
}

#[test]
fn span_names_are_dotted() {
    for name in [
        span_names::IMPORT_RECONCILE,
        span_names::IMPORT_ITEM,
        span_names::EXPORT_EXECUTE,
        span_names::FOLDER_RESOLVE,
        span_names::CREDENTIAL_PATCH,
    ] {
        assert!(name.contains('.'), "{name} should be namespaced");
    }
}
