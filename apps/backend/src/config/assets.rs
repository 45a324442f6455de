use std::env;
use std::path::PathBuf;

/// Directory uploaded images are written to; its final component is also
/// the URL segment the directory is served under.
pub fn asset_dir() -> PathBuf {
    env::var("ASSET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("files"))
}

/// Base URL prepended to relative asset paths when rendering responses.
pub fn public_base_url() -> String {
    env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}
