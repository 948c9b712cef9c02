use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::api::client::endpoint;
use crate::api::AccountApi;
use crate::error::{ClientError, SessionError, ValidationError};
use crate::loading::LoadingTracker;
use crate::session::TokenStore;
use crate::types::Credentials;

use super::{ErrorMessage, Route};

/// Gate for protected routes: the stored token, or a redirect to login
pub fn require_session(tokens: &dyn TokenStore) -> Result<String, Route> {
    tokens.token().ok_or(Route::Login)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Github,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Github => "github",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "github" => Ok(OAuthProvider::Github),
            other => Err(format!("Unknown OAuth provider: {}", other)),
        }
    }
}

/// Where the browser goes to start a provider login
pub fn oauth_start_url(api_base: &Url, provider: OAuthProvider) -> Url {
    endpoint(api_base, &["auth", provider.as_str()])
}

/// Handle the OAuth success redirect. `redirect` may be the full URL or just
/// its query string. A non-empty `token` parameter is stored and leads to the
/// dashboard; anything else leads back to login.
pub fn capture_oauth_redirect(
    redirect: &str,
    tokens: &dyn TokenStore,
) -> Result<Route, SessionError> {
    match token_from_redirect(redirect) {
        Some(token) => {
            tokens.save_token(&token)?;
            tracing::info!("Session captured from OAuth redirect");
            Ok(Route::Dashboard)
        }
        None => {
            tracing::debug!("OAuth redirect carried no token");
            Ok(Route::Login)
        }
    }
}

fn token_from_redirect(redirect: &str) -> Option<String> {
    let redirect = redirect.trim();
    let query = match Url::parse(redirect) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => redirect.trim_start_matches('?').to_string(),
    };
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

/// Email and password login form
#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    error: ErrorMessage,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            error: ErrorMessage::default(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.get()
    }

    /// Log in and persist the returned token; success leads to the dashboard
    pub async fn submit<A>(
        &mut self,
        api: &A,
        tokens: &dyn TokenStore,
        loading: &LoadingTracker,
    ) -> Result<Route, ClientError>
    where
        A: AccountApi + ?Sized,
    {
        if self.email.is_empty() || self.password.is_empty() {
            let e = ValidationError::CredentialsRequired;
            self.error.set(&e);
            return Err(e.into());
        }

        let _guard = loading.begin();
        let credentials = Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        };
        let token = match api.login(&credentials).await {
            Ok(token) => token,
            Err(e) => {
                self.error.set(&e);
                return Err(e.into());
            }
        };

        tokens.save_token(&token)?;
        self.error.clear();
        tracing::info!("Logged in as {}", self.email);
        Ok(Route::Dashboard)
    }
}
