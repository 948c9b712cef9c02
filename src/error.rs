// Client Error Types
use thiserror::Error;

/// Input problems caught before any request is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Project title is required")]
    TitleRequired,

    #[error("At least one link (Website or GitHub) is required")]
    LinkRequired,

    #[error("Email and password are required")]
    CredentialsRequired,

    #[error("Name cannot be empty")]
    NameRequired,
}

/// Remote operations, each with the message shown when the server sends no body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    ListProjects,
    CreateProject,
    UpdateProject,
    DeleteProject,
    Login,
    LoadProfile,
    UpdateProfile,
    DeleteAccount,
}

impl ApiOperation {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            ApiOperation::ListProjects => "Failed to load projects",
            ApiOperation::CreateProject => "Failed to create project",
            ApiOperation::UpdateProject => "Failed to update project",
            ApiOperation::DeleteProject => "Failed to delete project",
            ApiOperation::Login => "Login failed",
            ApiOperation::LoadProfile => "Failed to load profile",
            ApiOperation::UpdateProfile => "Failed to update profile",
            ApiOperation::DeleteAccount => "Failed to delete account",
        }
    }
}

/// Failed API call. `message` is meant for direct display and carries no structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestError {
    pub status: Option<u16>,
    pub message: String,
}

impl RequestError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Error for `operation` using the server-supplied body when it has any text
    pub fn from_body(operation: ApiOperation, status: Option<u16>, body: &str) -> Self {
        let message = extract_message(body)
            .unwrap_or_else(|| operation.fallback_message().to_string());
        Self { status, message }
    }

    /// Transport failure with no response at all
    pub fn transport(operation: ApiOperation) -> Self {
        Self::new(None, operation.fallback_message())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}

/// Pull display text out of an error body: a JSON string, a JSON object's
/// `message`/`error` field, or the raw text itself.
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let text = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => {
            match ["message", "error"]
                .iter()
                .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            {
                Some(s) => s.to_string(),
                None => trimmed.to_string(),
            }
        }
        _ => trimmed.to_string(),
    };
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No configuration directory: {0}")]
    NoConfigDir(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Anything a view action can surface to the user
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ClientError {
    /// Inline message shown by the view
    pub fn display_message(&self) -> String {
        self.to_string()
    }
}
