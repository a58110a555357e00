//! Reconciler tests against a mock Grafana

use grafsync_core::{
    ConnectivityError, ImportOptions, ImportOutcome, InputSource, Reconciler, ResourceKind,
    check_connection, collect_sources,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{TOKEN, client_for, sources_in_dir};

#[tokio::test]
async fn datasources_created_and_duplicate() {
    let server = MockServer::start().await;
    let auth = format!("Bearer {TOKEN}");

    for (name, kind, status) in [
        ("Prometheus", "prometheus", 200u16),
        ("Loki", "loki", 201),
        ("PostgreSQL", "postgres", 409),
    ] {
        let body = if status == 409 {
            json!({"message": "data source with the same name already exists"})
        } else {
            json!({"id": 10, "message": "Datasource added"})
        };
        Mock::given(method("POST"))
            .and(path("/api/datasources"))
            .and(header("authorization", auth.as_str()))
            .and(body_json(json!({"name": name, "type": kind, "access": "proxy"})))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let (_dir, sources) = sources_in_dir(&[
        (
            "datasource_1_Prometheus.json",
            r#"{"id": 1, "uid": "P1", "name": "Prometheus", "type": "prometheus", "access": "proxy"}"#,
        ),
        (
            "datasource_2_Loki.json",
            r#"{"id": 2, "uid": "L2", "name": "Loki", "type": "loki", "access": "proxy"}"#,
        ),
        (
            "datasource_3_PostgreSQL.json",
            r#"{"id": 3, "name": "PostgreSQL", "type": "postgres", "access": "proxy"}"#,
        ),
    ]);

    let client = client_for(&server);
    let summary = Reconciler::new(&client, ResourceKind::Datasource, ImportOptions::new())
        .reconcile(&sources)
        .await;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.failed, 0);
    assert!(!summary.has_failures());

    let names: Vec<_> = summary.reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Prometheus", "Loki", "PostgreSQL"]);
    assert_eq!(
        summary.reports[2].outcome,
        ImportOutcome::AlreadyExists {
            status: 409,
            reason: "data source with the same name already exists".to_string()
        }
    );
}

#[tokio::test]
async fn same_datasource_twice_is_created_then_duplicate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/datasources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/datasources"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"message": "data source with the same name already exists"})),
        )
        .mount(&server)
        .await;

    let datasource = r#"{"name": "db1", "type": "postgres"}"#;
    let (_dir, sources) = sources_in_dir(&[("a.json", datasource), ("b.json", datasource)]);

    let client = client_for(&server);
    let summary = Reconciler::new(&client, ResourceKind::Datasource, ImportOptions::new())
        .reconcile(&sources)
        .await;

    assert!(matches!(summary.reports[0].outcome, ImportOutcome::Created { status: 200 }));
    assert!(matches!(
        summary.reports[1].outcome,
        ImportOutcome::AlreadyExists { status: 409, .. }
    ));
}

#[tokio::test]
async fn dashboard_folder_is_recreated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/folders/abc"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "folder not found"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/folders"))
        .and(body_json(json!({"uid": "abc", "title": "Infra"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "uid": "abc"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/dashboards/db"))
        .and(body_json(json!({
            "dashboard": {"uid": "cpu", "title": "CPU"},
            "overwrite": false,
            "folderId": 7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, sources) = sources_in_dir(&[(
        "dashboard_cpu_CPU.json",
        r#"{"dashboard": {"id": 12, "uid": "cpu", "title": "CPU"},
            "meta": {"folderUid": "abc", "folderTitle": "Infra"}}"#,
    )]);

    let client = client_for(&server);
    let options = ImportOptions::new().with_preserve_folders(true);
    let summary = Reconciler::new(&client, ResourceKind::Dashboard, options)
        .reconcile(&sources)
        .await;

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.folders_created, 1);
    assert!(matches!(summary.reports[0].outcome, ImportOutcome::Created { status: 200 }));
}

#[tokio::test]
async fn shared_folder_is_created_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/folders/shared"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "uid": "shared"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/dashboards/db"))
        .and(body_partial_json(json!({"folderId": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(2)
        .mount(&server)
        .await;

    let (_dir, sources) = sources_in_dir(&[
        (
            "a.json",
            r#"{"dashboard": {"uid": "a", "title": "A"}, "meta": {"folderUid": "shared"}}"#,
        ),
        (
            "b.json",
            r#"{"dashboard": {"uid": "b", "title": "B"}, "meta": {"folderUid": "shared"}}"#,
        ),
    ]);

    let client = client_for(&server);
    let options = ImportOptions::new().with_preserve_folders(true);
    let summary = Reconciler::new(&client, ResourceKind::Dashboard, options)
        .reconcile(&sources)
        .await;

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.folders_created, 1);
}

#[tokio::test]
async fn invalid_json_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (_dir, sources) = sources_in_dir(&[("broken.json", r#"{"name": "db1","#)]);

    let client = client_for(&server);
    let summary = Reconciler::new(&client, ResourceKind::Datasource, ImportOptions::new())
        .reconcile(&sources)
        .await;

    assert_eq!(summary.total, 1);
    assert_eq!(summary.failed, 1);
    assert!(summary.has_failures());
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn unreadable_file_fails_alone() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/datasources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("a.json"), r#"{"name": "a"}"#).expect("write a");
    std::os::unix::fs::symlink("/proc/self/mem", dir.path().join("b.json")).expect("symlink");
    std::fs::write(dir.path().join("c.json"), r#"{"name": "c"}"#).expect("write c");

    let sources = collect_sources(&InputSource::Directory(dir.path().to_path_buf()))
        .expect("an unreadable file is not fatal");

    let client = client_for(&server);
    let summary = Reconciler::new(&client, ResourceKind::Datasource, ImportOptions::new())
        .reconcile(&sources)
        .await;

    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.reports[1].origin, "b.json");
}

#[tokio::test]
async fn server_errors_are_failures_with_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dashboards/db"))
        .respond_with(
            ResponseTemplate::new(412)
                .set_body_json(json!({"status": "plugin-dashboard", "message": "Dashboard belongs to plugin Foo"})),
        )
        .mount(&server)
        .await;

    let (_dir, sources) = sources_in_dir(&[("d.json", r#"{"title": "Foo", "uid": "foo"}"#)]);

    let client = client_for(&server);
    let options = ImportOptions::new().with_overwrite(true);
    let summary = Reconciler::new(&client, ResourceKind::Dashboard, options)
        .reconcile(&sources)
        .await;

    assert_eq!(summary.failed, 1);
    assert_eq!(
        summary.reports[0].outcome,
        ImportOutcome::Failed {
            status: Some(412),
            message: "Dashboard belongs to plugin Foo".to_string()
        }
    );
}

#[tokio::test]
async fn connection_check_rejects_bad_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"database": "ok"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/org"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .mount(&server)
        .await;

    let err = check_connection(&client_for(&server)).await.unwrap_err();
    assert_eq!(err, ConnectivityError::AuthenticationRejected(401));
}

#[tokio::test]
async fn connection_check_passes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/org"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Main Org."})))
        .expect(1)
        .mount(&server)
        .await;

    check_connection(&client_for(&server))
        .await
        .expect("connection is healthy");
}
