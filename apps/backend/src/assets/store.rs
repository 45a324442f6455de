use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::AppError;

/// Persists uploaded binaries into the public asset directory and hands
/// back the relative path stored in the database (`files/<name>`).
///
/// Generated names are `{uuid-v4}-{sanitized original name}`, so parallel
/// writes never target the same file.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
    public_prefix: String,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let public_prefix = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "files".to_string());
        Self {
            root,
            public_prefix,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// URL segment the directory is mounted under, e.g. `files`.
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::asset_write(format!(
                "failed to create asset directory {}: {e}",
                self.root.display()
            ))
        })
    }

    /// Write `content` under a freshly generated name and return the
    /// relative path used as the database's image value.
    pub async fn store(&self, original_name: &str, content: &[u8]) -> Result<String, AppError> {
        let name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_name));
        let path = self.root.join(&name);
        tokio::fs::write(&path, content).await.map_err(|e| {
            AppError::asset_write(format!("failed to write {}: {e}", path.display()))
        })?;
        Ok(format!("{}/{}", self.public_prefix, name))
    }

    /// Best-effort removal of a previously stored asset. Never fails the
    /// request: problems are logged and swallowed.
    pub async fn remove(&self, relative: &str) {
        let prefix = format!("{}/", self.public_prefix);
        let Some(name) = relative.strip_prefix(&prefix) else {
            tracing::warn!(path = relative, "asset removal skipped: unexpected prefix");
            return;
        };
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            tracing::warn!(path = relative, "asset removal skipped: unsafe name");
            return;
        }
        if let Err(e) = tokio::fs::remove_file(self.root.join(name)).await {
            tracing::warn!(path = relative, error = %e, "asset removal failed");
        }
    }
}

/// Keep the final path component and drop anything outside
/// `[A-Za-z0-9._-]`; browsers may send full client paths.
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_file_name, AssetStore};

    #[test]
    fn sanitize_keeps_simple_names() {
        assert_eq!(sanitize_file_name("logo.png"), "logo.png");
    }

    #[test]
    fn sanitize_strips_client_paths_and_odd_characters() {
        assert_eq!(sanitize_file_name("C:\\Users\\me\\logo.png"), "logo.png");
        assert_eq!(sanitize_file_name("/tmp/a b?.png"), "ab.png");
        assert_eq!(sanitize_file_name("äöü"), "upload");
        assert_eq!(sanitize_file_name(".."), "upload");
    }

    #[tokio::test]
    async fn store_writes_file_and_returns_prefixed_path() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path().join("files"));
        store.ensure_dir().await.unwrap();

        let relative = store.store("logo.png", b"png-bytes").await.unwrap();
        assert!(relative.starts_with("files/"));
        assert!(relative.ends_with("-logo.png"));

        let name = relative.strip_prefix("files/").unwrap();
        let on_disk = tokio::fs::read(tmp.path().join("files").join(name))
            .await
            .unwrap();
        assert_eq!(on_disk, b"png-bytes");
    }

    #[tokio::test]
    async fn store_generates_distinct_names_for_the_same_original() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path().join("files"));
        store.ensure_dir().await.unwrap();

        let first = store.store("logo.png", b"a").await.unwrap();
        let second = store.store("logo.png", b"b").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn remove_deletes_stored_assets_and_refuses_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let store = AssetStore::new(tmp.path().join("files"));
        store.ensure_dir().await.unwrap();

        let relative = store.store("logo.png", b"x").await.unwrap();
        store.remove(&relative).await;
        let left = std::fs::read_dir(tmp.path().join("files")).unwrap().count();
        assert_eq!(left, 0);

        // outside the prefix or escaping the directory: silently refused
        store.remove("elsewhere/logo.png").await;
        store.remove("files/../../etc/passwd").await;
    }
}
