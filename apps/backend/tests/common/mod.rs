#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::http::Method;
use actix_web::test::TestRequest;
use backend::{AppState, AssetStore};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tempfile::TempDir;

pub const BOUNDARY: &str = "----catalog-test-boundary";

/// Build an AppState backed by an in-memory SQLite database with the full
/// schema applied and a tempdir-backed asset store. The returned TempDir
/// must be kept alive for the duration of the test.
pub async fn test_state() -> (AppState, TempDir) {
    // A single pooled connection: every checkout sees the same in-memory
    // database.
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");

    let tmp = tempfile::tempdir().expect("create tempdir");
    let assets = AssetStore::new(tmp.path().join("files"));
    assets.ensure_dir().await.expect("create asset dir");

    let state = AppState::new(db, assets, "http://localhost:8080".to_string());
    (state, tmp)
}

/// Number of files currently sitting in the asset directory.
pub fn asset_file_count(state: &AppState) -> usize {
    std::fs::read_dir(state.assets.root())
        .expect("read asset dir")
        .count()
}

/// Hand-built multipart/form-data body: text fields plus an optional file
/// part `(field, file name, bytes)`.
pub fn multipart_body(text_fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in text_fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((field, file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// A TestRequest carrying a multipart body with the shared boundary.
pub fn multipart_request(method: Method, uri: &str, body: Vec<u8>) -> TestRequest {
    TestRequest::default()
        .method(method)
        .uri(uri)
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}
