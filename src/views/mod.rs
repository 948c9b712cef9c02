//! Per-screen state controllers. Each view owns its own copy of the data it
//! shows, records failures as a dismissible inline message, and reports
//! navigation as a [`Route`] for the embedding router to act on.

pub mod auth;
pub mod card;
pub mod create;
pub mod dashboard;
pub mod directory;
pub mod home;
pub mod profile;

use serde::Serialize;

pub use auth::{capture_oauth_redirect, oauth_start_url, require_session, LoginForm, OAuthProvider};
pub use card::ProjectCard;
pub use create::CreateProjectForm;
pub use dashboard::DashboardView;
pub use directory::DirectoryView;
pub use home::HomeView;
pub use profile::{ConfirmAction, ProfileView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Home,
    Projects,
    Login,
    Signup,
    Dashboard,
    Profile,
    Create,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Projects => "/projects",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
            Route::Profile => "/profile",
            Route::Create => "/create",
        }
    }

    /// Routes that need a session token
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Profile | Route::Create)
    }
}

/// Inline error slot shared by the views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMessage(Option<String>);

impl ErrorMessage {
    pub fn set(&mut self, message: impl std::fmt::Display) {
        self.0 = Some(message.to_string());
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }
}
