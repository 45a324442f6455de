use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

/// Wire shape shared by every error response. The 404 body is exactly
/// `{"detail": "not found"}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error("database error: {detail}")]
    Db { detail: String },
    #[error("asset store error: {detail}")]
    AssetWrite { detail: String },
    #[error("configuration error: {detail}")]
    Config { detail: String },
    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn asset_write(detail: impl Into<String>) -> Self {
        Self::AssetWrite {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AssetWrite { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::NotFound => "not found".to_string(),
            AppError::Db { detail } => detail.clone(),
            AppError::AssetWrite { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
            AppError::Internal { detail } => detail.clone(),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("db error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request_failed");
        }
        HttpResponse::build(status).json(ErrorBody {
            detail: self.detail(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;
    use actix_web::http::StatusCode;

    #[test]
    fn not_found_maps_to_404_with_fixed_detail() {
        let err = AppError::not_found();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.detail(), "not found");
    }

    #[test]
    fn infrastructure_errors_map_to_500() {
        for err in [
            AppError::db("statement failed"),
            AppError::asset_write("disk full"),
            AppError::config("missing var"),
            AppError::internal("boom"),
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn db_err_converts_to_db_variant() {
        let err: AppError = sea_orm::DbErr::Custom("bad statement".to_string()).into();
        assert!(matches!(err, AppError::Db { .. }));
    }
}
