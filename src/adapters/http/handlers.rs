//! Entry point and logout endpoints.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::middleware::{session_key_from_headers, SocialAuthState};

/// 302 Found pointing at `location`.
pub fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::error!(location, "Redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Sends an unauthenticated user to the login page.
pub fn entry_point_response(login_path: &str) -> Response {
    found(login_path)
}

/// Logs the current session out of every connected provider, then
/// redirects to the login path.
///
/// Requests without a session cookie are redirected straight away.
pub async fn logout_handler(
    State(firewall): State<SocialAuthState>,
    headers: HeaderMap,
) -> Response {
    let Some(key) = session_key_from_headers(&headers, firewall.cookie_name()) else {
        return entry_point_response(firewall.login_path());
    };

    match firewall.logout(&key).await {
        Ok(providers) => {
            tracing::info!(session = %key, providers = providers.len(), "Social logout complete");
            entry_point_response(firewall.login_path())
        }
        Err(e) if e.is_transient() => {
            tracing::error!(error = %e, "Social logout unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "error": "Authentication service unavailable",
                    "code": "AUTH_UNAVAILABLE"
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(session = %key, error = %e, "Social logout failed");
            entry_point_response(firewall.login_path())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session::InMemorySessionStore;
    use crate::adapters::social::{
        MockClientFactory, MockSocialAuthClient, MockUserProvider, ProviderBehavior,
    };
    use crate::domain::profile::UserProfile;
    use crate::application::SocialAuthFirewall;
    use crate::config::SocialAuthConfig;
    use crate::domain::foundation::SessionKey;
    use crate::domain::provider::SessionData;
    use crate::ports::SessionStore;
    use axum::{body::Body, routing::get, Router};
    use std::sync::Arc;
    use tower::ServiceExt;

    const YAML: &str = r#"
firewall:
  login_path: /connect
  providers_check_path:
    - { name: facebook, check_path: /connect/facebook }
  user_provider:
    service: users
client:
  base_url: https://example.com/auth
  providers:
    facebook: {}
"#;

    fn client() -> MockSocialAuthClient {
        MockSocialAuthClient::new()
            .with_provider("facebook", ProviderBehavior::connect(UserProfile::new("fb-1")))
    }

    fn state(store: Arc<InMemorySessionStore>) -> SocialAuthState {
        Arc::new(
            SocialAuthFirewall::new(
                &SocialAuthConfig::from_yaml_str(YAML).unwrap(),
                Arc::new(MockClientFactory::new(client)),
                Arc::new(MockUserProvider::new()),
                store,
            )
            .unwrap(),
        )
    }

    fn app(state: SocialAuthState) -> Router {
        Router::new()
            .route("/logout", get(logout_handler))
            .with_state(state)
    }

    #[test]
    fn entry_point_redirects_to_login_path() {
        let response = entry_point_response("/connect");

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/connect");
    }

    #[test]
    fn found_rejects_invalid_location() {
        let response = found("/bad\nheader");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn logout_without_cookie_redirects() {
        let response = app(state(Arc::new(InMemorySessionStore::new())))
            .oneshot(
                axum::http::Request::builder()
                    .uri("/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/connect");
    }

    #[tokio::test]
    async fn logout_removes_stored_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let key = SessionKey::new();
        store
            .save(&key, &SessionData::new(r#"{"connected":["facebook"],"pending":[]}"#))
            .await
            .unwrap();

        let response = app(state(store.clone()))
            .oneshot(
                axum::http::Request::builder()
                    .uri("/logout")
                    .header(header::COOKIE, format!("social_auth_session={}", key))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(store.load(&key).await.unwrap(), None);
    }
}
