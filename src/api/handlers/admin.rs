use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::api::error::{ApiError, ApiResult};
use crate::config::settings::AppConfig;

/// Mutating admin routes expect `Authorization: Bearer <admin token>`.
pub fn authorize(headers: &HeaderMap, config: &AppConfig) -> ApiResult<()> {
    let auth_header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    let expected = format!("Bearer {}", config.server.admin_token);

    if auth_header == Some(expected.as_str()) {
        Ok(())
    } else {
        log::warn!("Rejected admin request without valid token");
        Err(ApiError::Unauthorized)
    }
}
