//! Authentication capability handed to every page

mod session;

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::HubConfig;
use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::models::User;

pub use session::*;

/// What the pages need to know about the signed-in user.
///
/// Initialised once at the application root; pages only read from it,
/// except for an explicit [`refresh_user`](AuthContext::refresh_user).
#[async_trait]
pub trait AuthContext: Send + Sync {
    fn current_user(&self) -> Option<User>;

    fn access_token(&self) -> Option<String>;

    async fn login(&self, email: &str, password: &str) -> Result<User>;

    async fn logout(&self) -> Result<()>;

    /// Re-read the user from the backend
    async fn refresh_user(&self) -> Result<Option<User>>;
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Debug, Default)]
struct AuthState {
    session: Option<Session>,
    user: Option<User>,
}

/// Client for the backend's `/auth` endpoints
#[derive(Clone)]
pub struct SessionAuth {
    config: Arc<HubConfig>,
    client: Client,
    state: Arc<RwLock<AuthState>>,
}

impl SessionAuth {
    pub fn new(config: Arc<HubConfig>, client: Client) -> Self {
        Self {
            config,
            client,
            state: Arc::new(RwLock::new(AuthState::default())),
        }
    }

    /// Get the current session
    pub fn session(&self) -> Option<Session> {
        self.read(|state| state.session.clone())
    }

    /// Set the session, e.g. one restored from storage
    pub fn set_session(&self, session: Session) {
        self.write(|state| state.session = Some(session));
    }

    fn read<R>(&self, f: impl FnOnce(&AuthState) -> R) -> R {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut AuthState) -> R) -> R {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    async fn fetch_me(&self, token: &str) -> Result<User> {
        let url = self.config.endpoint("/auth/me")?;
        Fetch::get(&self.client, url.as_str())
            .bearer_auth(token)
            .execute::<User>()
            .await
    }
}

#[async_trait]
impl AuthContext for SessionAuth {
    fn current_user(&self) -> Option<User> {
        self.read(|state| state.user.clone())
    }

    fn access_token(&self) -> Option<String> {
        self.read(|state| {
            state
                .session
                .as_ref()
                .filter(|s| !s.is_expired())
                .map(|s| s.access_token.clone())
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<User> {
        let url = self.config.endpoint("/auth/login")?;
        let response = Fetch::post(&self.client, url.as_str())
            .json(&Credentials { email, password })?
            .execute::<LoginResponse>()
            .await?;

        let session = Session::new(response.access_token, response.refresh_token);
        let user = match response.user {
            Some(user) => user,
            None => self.fetch_me(&session.access_token).await?,
        };
        info!("Signed in as {} ({})", user.email, user.role);
        self.write(|state| {
            state.session = Some(session);
            state.user = Some(user.clone());
        });
        Ok(user)
    }

    async fn logout(&self) -> Result<()> {
        let token = self
            .read(|state| state.session.as_ref().map(|s| s.access_token.clone()))
            .ok_or_else(|| Error::auth("Not logged in"))?;

        let url = self.config.endpoint("/auth/logout")?;
        let result = Fetch::post(&self.client, url.as_str())
            .bearer_auth(&token)
            .execute_empty()
            .await;

        // Local state goes regardless of what the server said
        self.write(|state| *state = AuthState::default());
        result
    }

    async fn refresh_user(&self) -> Result<Option<User>> {
        let Some(token) = self.access_token() else {
            self.write(|state| state.user = None);
            return Ok(None);
        };

        match self.fetch_me(&token).await {
            Ok(user) => {
                self.write(|state| state.user = Some(user.clone()));
                Ok(Some(user))
            }
            Err(err) if err.status() == Some(401) => {
                debug!("Session rejected by the backend, clearing it");
                self.write(|state| *state = AuthState::default());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

/// Fixed identity: anonymous, or a pre-issued token
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    token: Option<String>,
    user: Option<User>,
}

impl StaticAuth {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            token: Some(token.into()),
            user,
        }
    }
}

#[async_trait]
impl AuthContext for StaticAuth {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }

    fn access_token(&self) -> Option<String> {
        self.token.clone()
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<User> {
        Err(Error::auth("Static credentials cannot sign in"))
    }

    async fn logout(&self) -> Result<()> {
        Ok(())
    }

    async fn refresh_user(&self) -> Result<Option<User>> {
        Ok(self.user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_json() -> serde_json::Value {
        json!({
            "id": 2,
            "email": "contact@greenearth.org",
            "full_name": "Green Earth Alliance",
            "role": "organization",
            "created_at": "2023-01-15T09:00:00Z",
            "organization_id": 1
        })
    }

    async fn auth_for(server: &MockServer) -> SessionAuth {
        let config = HubConfig::new(&server.uri()).unwrap();
        SessionAuth::new(Arc::new(config), Client::new())
    }

    #[tokio::test]
    async fn login_stores_session_and_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({ "email": "contact@greenearth.org", "password": "pw" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .mount(&server)
            .await;

        let auth = auth_for(&server).await;
        let user = auth.login("contact@greenearth.org", "pw").await.unwrap();

        assert_eq!(user.organization_id, Some(1));
        assert_eq!(auth.access_token().as_deref(), Some("tok"));
        assert_eq!(auth.current_user(), Some(user));
    }

    #[tokio::test]
    async fn rejected_session_is_cleared_on_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "expired" })))
            .mount(&server)
            .await;

        let auth = auth_for(&server).await;
        auth.set_session(Session::new("stale".to_string(), None));

        assert_eq!(auth.refresh_user().await.unwrap(), None);
        assert!(auth.session().is_none());
    }

    #[tokio::test]
    async fn logout_requires_a_session() {
        let server = MockServer::start().await;
        let auth = auth_for(&server).await;
        assert!(matches!(auth.logout().await, Err(Error::Auth(_))));
    }

    #[tokio::test]
    async fn static_auth_cannot_sign_in() {
        let auth = StaticAuth::with_token("fixed", None);
        assert_eq!(auth.access_token().as_deref(), Some("fixed"));
        assert!(auth.login("a@b.c", "pw").await.is_err());
    }
}
