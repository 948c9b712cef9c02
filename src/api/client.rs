use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use super::{AccountApi, ProjectApi};
use crate::config::AppConfig;
use crate::error::{ApiOperation, ConfigError, RequestError};
use crate::session::TokenStore;
use crate::types::{
    Credentials, ListScope, Me, Project, ProjectFields, ProjectId, ProjectOwner, ProjectPatch,
    UserProfile,
};

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserProfile,
}

/// `reqwest` client for the Projcart API. The stored session token, when
/// present, is sent verbatim as the `Authorization` header on every request.
#[derive(Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self, ConfigError> {
        Self::with_user_agent(base_url, concat!("projcart/", env!("CARGO_PKG_VERSION")), tokens)
    }

    pub fn from_config(config: &AppConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ConfigError> {
        Self::with_user_agent(&config.api.base_url, &config.api.user_agent, tokens)
    }

    pub fn with_user_agent(
        base_url: &str,
        user_agent: &str,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for `segments` below the API base; segments are percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        endpoint(&self.base_url, segments)
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        tracing::debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match self.tokens.token() {
            Some(token) => builder.header(header::AUTHORIZATION, token),
            None => builder,
        }
    }

    async fn send_raw(
        &self,
        operation: ApiOperation,
        builder: RequestBuilder,
    ) -> Result<reqwest::Response, RequestError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("{:?} request failed: {}", operation, e);
            RequestError::transport(operation)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = RequestError::from_body(operation, Some(status.as_u16()), &body);
        tracing::debug!("{:?} rejected with {}: {}", operation, status, err.message);
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: ApiOperation,
        builder: RequestBuilder,
    ) -> Result<T, RequestError> {
        let response = self.send_raw(operation, builder).await?;
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|e| {
            tracing::error!("{:?} returned an unreadable body: {}", operation, e);
            RequestError::new(Some(status), operation.fallback_message())
        })
    }

    async fn send_empty(
        &self,
        operation: ApiOperation,
        builder: RequestBuilder,
    ) -> Result<(), RequestError> {
        self.send_raw(operation, builder).await.map(|_| ())
    }

    async fn me(&self, operation: ApiOperation) -> Result<Me, RequestError> {
        self.send_json(operation, self.request(Method::GET, &["users", "me"]))
            .await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}

pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Attach the signed-in user's name to each of their projects
fn stamp_owner(me: Me) -> Vec<Project> {
    let owner = me.user.map(|u| ProjectOwner { name: u.name });
    me.projects
        .into_iter()
        .map(|mut project| {
            if let Some(owner) = &owner {
                project.user = Some(owner.clone());
            }
            project
        })
        .collect()
}

#[async_trait]
impl ProjectApi for HttpApiClient {
    async fn list_projects(&self, scope: ListScope) -> Result<Vec<Project>, RequestError> {
        match scope {
            ListScope::All => {
                self.send_json(
                    ApiOperation::ListProjects,
                    self.request(Method::GET, &["projects"]),
                )
                .await
            }
            ListScope::Mine => Ok(stamp_owner(self.me(ApiOperation::ListProjects).await?)),
        }
    }

    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, RequestError> {
        let project: Project = self
            .send_json(
                ApiOperation::CreateProject,
                self.request(Method::POST, &["projects"]).json(fields),
            )
            .await?;
        tracing::info!("Created project {} ({})", project.id, project.title);
        Ok(project)
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        fields: &ProjectFields,
    ) -> Result<ProjectPatch, RequestError> {
        let patch = self
            .send_json(
                ApiOperation::UpdateProject,
                self.request(Method::PATCH, &["projects", &id.0]).json(fields),
            )
            .await?;
        tracing::info!("Updated project {}", id);
        Ok(patch)
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), RequestError> {
        self.send_empty(
            ApiOperation::DeleteProject,
            self.request(Method::DELETE, &["projects", &id.0]),
        )
        .await?;
        tracing::info!("Deleted project {}", id);
        Ok(())
    }
}

#[async_trait]
impl AccountApi for HttpApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<String, RequestError> {
        let response: LoginResponse = self
            .send_json(
                ApiOperation::Login,
                self.request(Method::POST, &["auth", "login"]).json(credentials),
            )
            .await?;
        Ok(response.token)
    }

    async fn current_user(&self) -> Result<Option<UserProfile>, RequestError> {
        Ok(self.me(ApiOperation::LoadProfile).await?.user)
    }

    async fn update_profile(&self, name: &str) -> Result<UserProfile, RequestError> {
        let envelope: UserEnvelope = self
            .send_json(
                ApiOperation::UpdateProfile,
                self.request(Method::PATCH, &["users", "me"])
                    .json(&serde_json::json!({ "name": name })),
            )
            .await?;
        Ok(envelope.user)
    }

    async fn delete_account(&self) -> Result<(), RequestError> {
        self.send_empty(
            ApiOperation::DeleteAccount,
            self.request(Method::DELETE, &["users", "me"]),
        )
        .await
    }
}
