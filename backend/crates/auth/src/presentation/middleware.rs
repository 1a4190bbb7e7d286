//! Auth Middleware
//!
//! Bearer-token gate for protected routes: validate the token, resolve
//! the principal, then check the role. Missing header or wrong role is
//! 401; a bad or expired token is 403.

use axum::body::Body;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::{principal_id::PrincipalId, role::Role};
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: PrincipalRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Resolved principal attached to the request extensions
#[derive(Clone, Debug)]
pub struct CurrentPrincipal {
    pub principal_id: Uuid,
    pub role: Role,
    pub email: String,
    pub display_name: String,
}

/// Middleware that requires a valid token carrying `required` role
pub async fn require_role<R>(
    state: AuthMiddlewareState<R>,
    required: Role,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: PrincipalRepository + Clone + Send + Sync + 'static,
{
    let token = extract_bearer_token(req.headers())
        .ok_or_else(|| AuthError::MissingToken.into_response())?;

    let tokens = TokenService::new(&state.config);
    let claims = tokens.validate(&token).map_err(|e| e.into_response())?;

    let principal = state
        .repo
        .find_by_id(claims.role, &PrincipalId::from_uuid(claims.principal_id))
        .await
        .map_err(|e| e.into_response())?
        .ok_or_else(|| AuthError::TokenPrincipalNotFound.into_response())?;

    if claims.role != required {
        return Err(AuthError::WrongRole(required).into_response());
    }

    req.extensions_mut().insert(CurrentPrincipal {
        principal_id: *principal.principal_id.as_uuid(),
        role: claims.role,
        email: principal.email.to_string(),
        display_name: principal.display_name.clone(),
    });

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def"),
        );
        assert_eq!(extract_bearer_token(&headers), Some("abc.def".to_string()));
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn test_extract_bearer_token_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
