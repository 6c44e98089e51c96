//! Social login middleware and extractors for axum.
//!
//! This module provides:
//! - `social_auth_middleware` - Layer that runs check-path requests through the firewall
//! - `RequireAuth` - Extractor that requires a completed social login
//! - `OptionalAuth` - Extractor for optional authentication
//!
//! # Architecture
//!
//! The middleware only talks to `SocialAuthFirewall`; which toolkit backs
//! the firewall is invisible here.
//!
//! ```text
//! Request → social_auth_middleware ─ check path? ─no──► handler
//!                    │ yes
//!                    ▼
//!            firewall.handle(session key, path)
//!              ├─ Redirect(url)      → 302 to provider
//!              ├─ Authenticated(tok) → injects AuthenticatedUser + token → handler
//!              ├─ NotHandled         → handler
//!              └─ Err                → 302 to login path (503 if transient)
//! ```
//!
//! The session key travels in a cookie; a fresh key is minted and set
//! when the request carries none.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get, middleware};
//! use std::sync::Arc;
//!
//! let firewall = Arc::new(SocialAuthFirewall::new(&config, factory, users, store)?);
//!
//! let app = Router::new()
//!     .route("/login/check-facebook", get(callback))
//!     .layer(middleware::from_fn_with_state(firewall.clone(), social_auth_middleware));
//!
//! async fn callback(RequireAuth(user): RequireAuth) -> String {
//!     format!("Hello, {}!", user.username)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::handlers::{entry_point_response, found};
use crate::application::{AuthenticationResult, SocialAuthFirewall};
use crate::domain::foundation::{AuthenticatedUser, SessionKey};

/// Middleware state - the configured firewall.
pub type SocialAuthState = Arc<SocialAuthFirewall>;

/// Social login middleware.
///
/// This middleware:
/// 1. Reads the session key from the session cookie, minting one if absent
/// 2. Runs the request path through `SocialAuthFirewall::handle`
/// 3. On redirect, answers 302 with the provider's URL
/// 4. On success, injects `AuthenticatedUser` and `SocialAuthToken` into extensions
/// 5. On provider or lookup failure, redirects to the login path
/// 6. On infrastructure failure, returns 503 Service Unavailable
///
/// The `SessionKey` is always inserted into request extensions.
pub async fn social_auth_middleware(
    State(firewall): State<SocialAuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let (key, minted) = match session_key_from_headers(request.headers(), firewall.cookie_name()) {
        Some(key) => (key, false),
        None => (SessionKey::new(), true),
    };
    let path = request.uri().path().to_string();

    let mut response = match firewall.handle(&key, &path).await {
        Ok(AuthenticationResult::NotHandled) => {
            request.extensions_mut().insert(key);
            next.run(request).await
        }
        Ok(AuthenticationResult::Redirect(url)) => {
            tracing::debug!(path = %path, "Sending user to provider");
            found(&url)
        }
        Ok(AuthenticationResult::Authenticated(token)) => {
            request.extensions_mut().insert(key);
            request.extensions_mut().insert(token.user.clone());
            request.extensions_mut().insert(token);
            next.run(request).await
        }
        Err(e) if e.is_transient() => {
            tracing::error!(error = %e, "Social auth unavailable");
            service_unavailable()
        }
        Err(e) => {
            tracing::warn!(
                path = %path,
                provider = e.provider().map(|p| p.as_str()).unwrap_or("-"),
                error = %e,
                "Social login failed"
            );
            entry_point_response(firewall.login_path())
        }
    };

    if minted {
        if let Some(cookie) = session_cookie(firewall.cookie_name(), &key) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }
    response
}

/// Reads the session key from the named cookie.
///
/// A cookie that is missing or does not hold a valid key yields `None`.
pub fn session_key_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<SessionKey> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| value.parse().ok())
}

fn session_cookie(cookie_name: &str, key: &SessionKey) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        cookie_name, key
    ))
    .ok()
}

fn service_unavailable() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({
            "error": "Authentication service unavailable",
            "code": "AUTH_UNAVAILABLE"
        })),
    )
        .into_response()
}

/// Extractor that requires authentication.
///
/// Succeeds only on requests where the middleware completed a social
/// login; returns 401 Unauthorized otherwise.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor for optional authentication.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.username),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts.extensions.get::<AuthenticatedUser>().cloned();
            Ok(OptionalAuth(user))
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No social login was completed on this request.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHENTICATED"
            })),
        )
            .into_response()
    }
}
