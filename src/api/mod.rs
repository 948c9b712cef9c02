//! Remote API seam. Views depend on these traits; [`HttpApiClient`] is the
//! production implementation.

pub mod client;

use async_trait::async_trait;

use crate::error::RequestError;
use crate::types::{
    Credentials, ListScope, Project, ProjectFields, ProjectId, ProjectPatch, UserProfile,
};

pub use client::HttpApiClient;

#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Projects in server order for `scope`
    async fn list_projects(&self, scope: ListScope) -> Result<Vec<Project>, RequestError>;

    /// Create a project; the returned record carries the server-assigned id
    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, RequestError>;

    /// Partial update; returns the fields the server reports as changed
    async fn update_project(
        &self,
        id: &ProjectId,
        fields: &ProjectFields,
    ) -> Result<ProjectPatch, RequestError>;

    async fn delete_project(&self, id: &ProjectId) -> Result<(), RequestError>;
}

#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Exchange credentials for an opaque session token
    async fn login(&self, credentials: &Credentials) -> Result<String, RequestError>;

    async fn current_user(&self) -> Result<Option<UserProfile>, RequestError>;

    async fn update_profile(&self, name: &str) -> Result<UserProfile, RequestError>;

    async fn delete_account(&self) -> Result<(), RequestError>;
}
