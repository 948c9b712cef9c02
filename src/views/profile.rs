use std::sync::Arc;

use serde::Serialize;

use crate::api::AccountApi;
use crate::error::{ClientError, ValidationError};
use crate::loading::LoadingTracker;
use crate::session::TokenStore;
use crate::types::UserProfile;

use super::{ErrorMessage, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmAction {
    Logout,
    Delete,
}

impl ConfirmAction {
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmAction::Logout => "Log Out",
            ConfirmAction::Delete => "Delete Account",
        }
    }

    pub fn warning(&self) -> &'static str {
        match self {
            ConfirmAction::Logout => "You will be signed out.",
            ConfirmAction::Delete => "This action cannot be undone.",
        }
    }
}

/// Profile page: display name editing, logout and account deletion
pub struct ProfileView {
    user: Option<UserProfile>,
    loaded: bool,
    name_input: String,
    editing: bool,
    saving: LoadingTracker,
    confirm: Option<ConfirmAction>,
    error: ErrorMessage,
    tokens: Arc<dyn TokenStore>,
    loading: LoadingTracker,
}

impl std::fmt::Debug for ProfileView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileView")
            .field("user", &self.user)
            .field("editing", &self.editing)
            .field("confirm", &self.confirm)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl ProfileView {
    pub fn new(tokens: Arc<dyn TokenStore>, loading: LoadingTracker) -> Self {
        Self {
            user: None,
            loaded: false,
            name_input: String::new(),
            editing: false,
            saving: LoadingTracker::new(),
            confirm: None,
            error: ErrorMessage::default(),
            tokens,
            loading,
        }
    }

    /// Fetch the profile; failure sends the user to login
    pub async fn load<A>(&mut self, api: &A) -> Result<(), Route>
    where
        A: AccountApi + ?Sized,
    {
        let result = api.current_user().await;
        self.loaded = true;
        match result {
            Ok(user) => {
                self.name_input = user.as_ref().map(|u| u.name.clone()).unwrap_or_default();
                self.user = user;
                self.error.clear();
                Ok(())
            }
            Err(e) => {
                self.error.set(&e);
                Err(Route::Login)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.get()
    }

    pub fn dismiss_error(&mut self) {
        self.error.clear();
    }

    // Name editing

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_loading()
    }

    pub fn start_edit(&mut self) {
        if let Some(user) = &self.user {
            self.name_input = user.name.clone();
            self.editing = true;
        }
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn set_name_input(&mut self, name: impl Into<String>) {
        self.name_input = name.into();
    }

    /// Abandon the edit, restoring the saved name and clearing any message
    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.name_input = self.user.as_ref().map(|u| u.name.clone()).unwrap_or_default();
        self.error.clear();
    }

    pub async fn save_name<A>(&mut self, api: &A) -> Result<(), ClientError>
    where
        A: AccountApi + ?Sized,
    {
        let name = self.name_input.trim().to_string();
        if name.is_empty() {
            let e = ValidationError::NameRequired;
            self.error.set(&e);
            return Err(e.into());
        }

        let result = {
            let _saving = self.saving.begin();
            api.update_profile(&name).await
        };

        match result {
            Ok(user) => {
                tracing::info!("Display name changed to {}", user.name);
                self.name_input = user.name.clone();
                self.user = Some(user);
                self.editing = false;
                self.error.clear();
                Ok(())
            }
            Err(e) => {
                self.error.set(&e);
                Err(e.into())
            }
        }
    }

    // Confirmation modal

    pub fn open_confirm(&mut self, action: ConfirmAction) {
        self.confirm = Some(action);
    }

    pub fn close_confirm(&mut self) {
        self.confirm = None;
    }

    pub fn pending_confirm(&self) -> Option<ConfirmAction> {
        self.confirm
    }

    /// Run the confirmed action. `Ok(None)` when no confirmation was open.
    pub async fn confirm<A>(&mut self, api: &A) -> Result<Option<Route>, ClientError>
    where
        A: AccountApi + ?Sized,
    {
        let pending = self.confirm;
        match pending {
            Some(ConfirmAction::Logout) => self.logout().map(Some),
            Some(ConfirmAction::Delete) => self.delete_account(api).await.map(Some),
            None => Ok(None),
        }
    }

    /// Forget the session token and go home
    pub fn logout(&mut self) -> Result<Route, ClientError> {
        let _guard = self.loading.begin();
        self.tokens.clear()?;
        self.confirm = None;
        tracing::info!("Logged out");
        Ok(Route::Home)
    }

    /// Delete the account server-side, then forget the token and go to signup
    pub async fn delete_account<A>(&mut self, api: &A) -> Result<Route, ClientError>
    where
        A: AccountApi + ?Sized,
    {
        let _guard = self.loading.begin();
        if let Err(e) = api.delete_account().await {
            self.error.set(&e);
            return Err(e.into());
        }
        self.tokens.clear()?;
        self.confirm = None;
        self.user = None;
        tracing::info!("Account deleted");
        Ok(Route::Signup)
    }
}
