//! Caller identity.
//!
//! Authentication happens upstream; the gateway forwards the verified user id in
//! `X-User-Id`. Handlers take a [`Principal`] argument instead of reading ambient state.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

pub const PRINCIPAL_HEADER: &str = "x-user-id";

/// The authenticated caller. For employer endpoints the same id is the company id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(PRINCIPAL_HEADER) else {
            tracing::warn!(
                event = "auth_failure",
                reason = "missing_principal_header",
                "Missing {PRINCIPAL_HEADER} header"
            );
            return Err(AppError::Unauthorized);
        };

        let user_id = raw
            .to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or_else(|| {
                tracing::warn!(
                    event = "auth_failure",
                    reason = "malformed_principal_header",
                    "Malformed {PRINCIPAL_HEADER} header"
                );
                AppError::Unauthorized
            })?;

        Ok(Principal { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<Principal, AppError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(PRINCIPAL_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Principal::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_header_yields_principal() {
        let id = Uuid::new_v4();
        let principal = extract(Some(&id.to_string())).await.unwrap();
        assert_eq!(principal.user_id, id);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        assert!(matches!(extract(None).await, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_malformed_header_is_unauthorized() {
        assert!(matches!(
            extract(Some("not-a-uuid")).await,
            Err(AppError::Unauthorized)
        ));
    }
}
