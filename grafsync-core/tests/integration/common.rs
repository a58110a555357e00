//! Shared helpers for integration tests

use std::fs;

use grafsync_core::{HttpClient, InputSource, SourceDocument, TargetConfig, collect_sources};
use secrecy::SecretString;
use tempfile::TempDir;
use wiremock::MockServer;

/// Token every mock expects in the `Authorization` header
pub const TOKEN: &str = "glsa_integration";

/// Creates a client pointed at the mock server
pub fn client_for(server: &MockServer) -> HttpClient {
    let target = TargetConfig::new(&server.uri(), SecretString::from(TOKEN))
        .expect("mock server URI is a valid target");
    HttpClient::new(&target).expect("client builds")
}

/// Writes the given files into a fresh directory and collects them
pub fn sources_in_dir(files: &[(&str, &str)]) -> (TempDir, Vec<SourceDocument>) {
    let dir = TempDir::new().expect("temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect(&format!("write {name}"));
    }
    let sources = collect_sources(&InputSource::Directory(dir.path().to_path_buf()))
        .expect("directory has json files");
    (dir, sources)
}
