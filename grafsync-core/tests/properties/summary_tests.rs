//! Property-based tests for run tallies
//!
//! Every item yields exactly one outcome, so the buckets always add up to
//! the total, whatever the mix of responses.

use grafsync_core::{ApiResponse, ImportOutcome, ItemReport, ResourceKind, RunSummary};
use proptest::prelude::*;

fn arb_kind() -> impl Strategy<Value = ResourceKind> {
    prop_oneof![Just(ResourceKind::Datasource), Just(ResourceKind::Dashboard)]
}

/// Statuses the target might answer with, weighted toward the interesting ones
fn arb_status() -> impl Strategy<Value = u16> {
    prop_oneof![
        Just(200u16),
        Just(201),
        Just(409),
        Just(412),
        Just(400),
        Just(500),
        100u16..600,
    ]
}

fn arb_body() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just(r#"{"message":"Dashboard not found"}"#.to_string()),
        Just(r#"{"status":"plugin-dashboard","message":"plugin"}"#.to_string()),
        Just(r#"{"status":"version-mismatch","message":"changed"}"#.to_string()),
        "[a-z ]{0,30}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// succeeded + duplicates + failed == total for any response sequence
    #[test]
    fn tally_adds_up(
        kind in arb_kind(),
        responses in prop::collection::vec((arb_status(), arb_body()), 0..30),
        transport_failures in 0usize..5,
    ) {
        let mut summary = RunSummary::new(kind);

        for (i, (status, body)) in responses.iter().enumerate() {
            summary.record(ItemReport {
                origin: format!("{i}.json"),
                name: format!("item {i}"),
                outcome: ImportOutcome::classify(kind, &ApiResponse::new(*status, body.clone())),
            });
        }
        for i in 0..transport_failures {
            summary.record(ItemReport {
                origin: format!("t{i}.json"),
                name: format!("t{i}"),
                outcome: ImportOutcome::failed("connection refused"),
            });
        }

        prop_assert_eq!(summary.total, responses.len() + transport_failures);
        prop_assert_eq!(summary.succeeded + summary.duplicates + summary.failed, summary.total);
        prop_assert_eq!(summary.reports.len(), summary.total);
        prop_assert_eq!(summary.has_failures(), summary.failed > 0);
    }

    /// Only 200 and datasource 201 count as created
    #[test]
    fn created_statuses(kind in arb_kind(), status in arb_status(), body in arb_body()) {
        let outcome = ImportOutcome::classify(kind, &ApiResponse::new(status, body));
        let created = matches!(outcome, ImportOutcome::Created { .. });
        let expected = status == 200 || (kind == ResourceKind::Datasource && status == 201);
        prop_assert_eq!(created, expected);
        prop_assert_eq!(outcome.status(), Some(status));
    }
}
