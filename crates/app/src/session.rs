//! AuthSession - login state, persistence and inactivity expiry

use crate::error::{AppError, Result};
use api::{ApiClient, ApiResponse};
use chrono::Utc;
use shared::text::is_valid_email;
use shared::{
    Logger, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest, User,
    ValidationError,
};
use std::sync::Arc;
use std::time::Duration;
use store::{keys, LocalStore};

const LOGIN_FAILED: &str = "No se pudo iniciar sesión";
const REGISTER_FAILED: &str = "No se pudo completar el registro";
const RESET_FAILED: &str = "No se pudo restablecer la contraseña";

/// Authenticated session backed by the local store.
///
/// The stored token is the session; the API client carries it as a bearer
/// token. A session idle for longer than the inactivity limit is dropped on
/// the next check.
pub struct AuthSession {
    api: ApiClient,
    store: Arc<dyn LocalStore>,
    logger: Arc<dyn Logger>,
    inactivity_limit: Duration,
}

impl AuthSession {
    /// Create a session, restoring any stored token into the client
    pub fn new(
        api: ApiClient,
        store: Arc<dyn LocalStore>,
        logger: Arc<dyn Logger>,
        inactivity_limit: Duration,
    ) -> Self {
        api.set_token(keys::stored_token(store.as_ref()));
        Self {
            api,
            store,
            logger,
            inactivity_limit,
        }
    }

    /// Log in and persist the token, user and activity timestamp
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = self.api.login(&request).await;
        if !response.is_success() {
            self.logger.warn(
                &format!("Login rejected with status {}", response.status),
                None,
            );
            return Err(AppError::rejected(&response, LOGIN_FAILED));
        }

        let body: LoginResponse = response
            .json()
            .ok_or_else(|| AppError::InvalidResponse("login body lacks token or user".into()))?;
        if body.token.trim().is_empty() {
            return Err(AppError::InvalidResponse("login returned an empty token".into()));
        }

        keys::save_session(self.store.as_ref(), &body.token, &body.user)?;
        keys::record_activity(self.store.as_ref(), now_millis())?;
        self.api.set_token(Some(body.token));

        self.logger
            .info(&format!("Logged in as '{}'", body.user.email), None);
        Ok(body.user)
    }

    /// Best-effort backend logout, then drop every session key
    pub async fn logout(&self) -> Result<()> {
        if self.api.token().is_some() {
            let response = self.api.logout().await;
            if response.is_error() {
                self.logger.warn(
                    &format!("Backend logout failed with status {}", response.status),
                    None,
                );
            }
        }
        self.clear()
    }

    /// Register a new account; returns the backend's confirmation message
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role_id: Option<i64>,
    ) -> Result<String> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::new("email", "is not a valid address").into());
        }
        if name.trim().is_empty() {
            return Err(ValidationError::new("name", "is required").into());
        }
        if password.is_empty() {
            return Err(ValidationError::new("password", "is required").into());
        }

        let request = RegisterRequest {
            name: name.trim().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role_id,
        };
        let response = self.api.register(&request).await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, REGISTER_FAILED));
        }
        Ok(success_message(&response))
    }

    /// Reset a password; returns the backend's confirmation message
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<String> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::new("email", "is not a valid address").into());
        }

        let request = ResetPasswordRequest {
            email: email.to_string(),
            new_password: new_password.to_string(),
        };
        let response = self.api.reset_password(&request).await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, RESET_FAILED));
        }
        Ok(success_message(&response))
    }

    /// Whether a live session exists; an idle session is expired here
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(now_millis())
    }

    /// `is_authenticated` against an explicit clock (Unix millis)
    pub fn is_authenticated_at(&self, now: i64) -> bool {
        if keys::stored_token(self.store.as_ref()).is_none() {
            return false;
        }

        match keys::last_activity(self.store.as_ref()) {
            Some(last) if now - last >= self.limit_millis() => {
                self.logger
                    .info("Session expired after inactivity", None);
                if let Err(e) = self.clear() {
                    self.logger
                        .error(&format!("Failed to clear expired session: {}", e), None);
                }
                false
            }
            Some(_) => true,
            None => {
                // No activity recorded yet: the session starts now
                if let Err(e) = keys::record_activity(self.store.as_ref(), now) {
                    self.logger
                        .warn(&format!("Failed to record activity: {}", e), None);
                }
                true
            }
        }
    }

    /// Record user activity now
    pub fn touch(&self) -> Result<()> {
        self.touch_at(now_millis())
    }

    pub fn touch_at(&self, now: i64) -> Result<()> {
        if keys::stored_token(self.store.as_ref()).is_some() {
            keys::record_activity(self.store.as_ref(), now)?;
        }
        Ok(())
    }

    /// The cached user of the live session
    pub fn current_user(&self) -> Option<User> {
        if !self.is_authenticated() {
            return None;
        }
        keys::stored_user(self.store.as_ref())
    }

    /// The cached user, or `NotAuthenticated`
    pub fn require_user(&self) -> Result<User> {
        self.current_user().ok_or(AppError::NotAuthenticated)
    }

    fn clear(&self) -> Result<()> {
        keys::clear_session(self.store.as_ref())?;
        self.api.set_token(None);
        Ok(())
    }

    fn limit_millis(&self) -> i64 {
        i64::try_from(self.inactivity_limit.as_millis()).unwrap_or(i64::MAX)
    }
}

/// `message` field of a successful response, if any
fn success_message(response: &ApiResponse) -> String {
    response
        .data
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or_default()
        .to_string()
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{ClientConfig, NullLogger};
    use store::MemoryStore;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LIMIT: Duration = Duration::from_secs(30 * 60);
    const MINUTE: i64 = 60_000;

    fn session_for(server: &MockServer, store: Arc<MemoryStore>) -> AuthSession {
        let api = ApiClient::new(ClientConfig::default().with_base_url(server.uri())).unwrap();
        AuthSession::new(api, store, Arc::new(NullLogger), LIMIT)
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "ok",
                "token": "tok-1",
                "user": {"id": 7, "name": "Ana", "email": "ana@uni.edu", "roles": [{"id": 10, "name": "PONENTE"}]}
            })))
            .mount(server)
            .await;
    }

    // ============== Login Tests ==============

    #[tokio::test]
    async fn test_login_persists_session() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        let store = Arc::new(MemoryStore::new());
        let session = session_for(&server, store.clone());

        let user = session.login("ana@uni.edu", "secreta").await.unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(keys::stored_token(store.as_ref()).as_deref(), Some("tok-1"));
        assert_eq!(keys::stored_user(store.as_ref()), Some(user));
        assert!(keys::last_activity(store.as_ref()).is_some());
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_rejected_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Credenciales inválidas"})),
            )
            .mount(&server)
            .await;
        let store = Arc::new(MemoryStore::new());
        let session = session_for(&server, store.clone());

        let err = session.login("ana@uni.edu", "mala").await.unwrap_err();
        match err {
            AppError::Rejected { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Credenciales inválidas");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_login_without_token_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .mount(&server)
            .await;
        let session = session_for(&server, Arc::new(MemoryStore::new()));

        let err = session.login("ana@uni.edu", "x").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidResponse(_)));
    }

    // ============== Logout Tests ==============

    #[tokio::test]
    async fn test_logout_clears_even_when_backend_fails() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        let store = Arc::new(MemoryStore::new());
        store.set_item(keys::RESOURCE_PERMISSIONS, r#"{"events.create": 99}"#).unwrap();
        let session = session_for(&server, store.clone());

        session.login("ana@uni.edu", "secreta").await.unwrap();
        session.logout().await.unwrap();

        assert!(!session.is_authenticated());
        assert!(keys::stored_user(store.as_ref()).is_none());
        assert!(store.get_item(keys::RESOURCE_PERMISSIONS).unwrap().is_some());
    }

    // ============== Inactivity Tests ==============

    #[tokio::test]
    async fn test_inactivity_expires_session() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        keys::save_session(store.as_ref(), "tok", &User::new(1, "Ana", "a@b.co")).unwrap();
        keys::record_activity(store.as_ref(), 0).unwrap();
        let session = session_for(&server, store.clone());

        assert!(session.is_authenticated_at(29 * MINUTE));
        session.touch_at(29 * MINUTE).unwrap();
        assert!(session.is_authenticated_at(58 * MINUTE));

        assert!(!session.is_authenticated_at(59 * MINUTE));
        assert!(keys::stored_token(store.as_ref()).is_none());
        assert!(keys::stored_user(store.as_ref()).is_none());
    }

    #[tokio::test]
    async fn test_missing_activity_starts_clock() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        store.set_item(keys::AUTH_TOKEN, "tok").unwrap();
        let session = session_for(&server, store.clone());

        assert!(session.is_authenticated_at(5 * MINUTE));
        assert_eq!(keys::last_activity(store.as_ref()), Some(5 * MINUTE));
    }

    #[tokio::test]
    async fn test_touch_without_session_records_nothing() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        let session = session_for(&server, store.clone());

        session.touch_at(1).unwrap();
        assert!(store.is_empty());
        assert!(matches!(session.require_user(), Err(AppError::NotAuthenticated)));
    }

    // ============== Register Tests ==============

    #[tokio::test]
    async fn test_register_validates_email_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;
        let session = session_for(&server, Arc::new(MemoryStore::new()));

        let err = session.register("Ana", "ana@", "x", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_returns_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"message": "Usuario registrado"})),
            )
            .mount(&server)
            .await;
        let session = session_for(&server, Arc::new(MemoryStore::new()));

        let message = session.register("Ana", "ana@uni.edu", "x", Some(2)).await.unwrap();
        assert_eq!(message, "Usuario registrado");
    }
}
