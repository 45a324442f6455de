use sea_orm::DatabaseConnection;

use crate::assets::AssetStore;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pooled database connection
    pub db: DatabaseConnection,
    /// Asset store backing image uploads
    pub assets: AssetStore,
    /// Base URL prepended to relative asset paths in responses
    pub public_base_url: String,
}

impl AppState {
    pub fn new(db: DatabaseConnection, assets: AssetStore, public_base_url: String) -> Self {
        Self {
            db,
            assets,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Render a persisted relative asset path as the absolute URL used in
    /// every response body.
    pub fn image_url(&self, relative: &str) -> String {
        format!("{}/{}", self.public_base_url, relative)
    }
}
