use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::auth::verify_token;

// Аутентифицированный пользователь, доступный хендлерам как экстрактор
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
}

fn unauthorized(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message })))
}

// Достает Bearer <jwt> из заголовка Authorization
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    let token = auth_header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

// Bearer JWT extractor
impl FromRequestParts<Arc<crate::AppState>> for AuthUser {
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Получаем заголовок Authorization
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| unauthorized("Missing token"))?;

        let token =
            extract_bearer(auth_header).ok_or_else(|| unauthorized("Invalid token format"))?;

        let user_id = verify_token(token, &state.config.jwt.secret)
            .ok_or_else(|| unauthorized("Invalid or expired token"))?;

        Ok(AuthUser { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer("Basic abc"), None);
        assert_eq!(extract_bearer("abc.def.ghi"), None);
    }

    #[test]
    fn empty_bearer_is_rejected() {
        assert_eq!(extract_bearer("Bearer "), None);
        assert_eq!(extract_bearer("Bearer"), None);
    }
}
