use crate::api::ProjectApi;
use crate::error::{ClientError, ValidationError};
use crate::loading::LoadingTracker;
use crate::types::{Project, ProjectFields};

use super::{ErrorMessage, Route};

/// Title must be present; an edit keeps whatever links the project has
pub fn validate_edit(fields: &ProjectFields) -> Result<(), ValidationError> {
    if fields.title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(())
}

/// Title plus at least a website or a GitHub link
pub fn validate_create(fields: &ProjectFields) -> Result<(), ValidationError> {
    validate_edit(fields)?;
    if fields.website.trim().is_empty() && fields.github.trim().is_empty() {
        return Err(ValidationError::LinkRequired);
    }
    Ok(())
}

/// "Create project" form state
#[derive(Debug, Default)]
pub struct CreateProjectForm {
    pub fields: ProjectFields,
    submitting: LoadingTracker,
    error: ErrorMessage,
}

impl CreateProjectForm {
    pub fn new(fields: ProjectFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.get()
    }

    pub fn dismiss_error(&mut self) {
        self.error.clear();
    }

    /// Leaving the form always goes back to the dashboard
    pub fn close(&self) -> Route {
        Route::Dashboard
    }

    /// Validate, then create. The created record is handed back so the
    /// dashboard can append it without refetching.
    pub async fn submit<A>(
        &mut self,
        api: &A,
        loading: &LoadingTracker,
    ) -> Result<(Project, Route), ClientError>
    where
        A: ProjectApi + ?Sized,
    {
        if let Err(e) = validate_create(&self.fields) {
            self.error.set(&e);
            return Err(e.into());
        }

        let _guard = loading.begin();
        let result = {
            let _submitting = self.submitting.begin();
            api.create_project(&self.fields.trimmed()).await
        };

        match result {
            Ok(project) => {
                self.error.clear();
                Ok((project, Route::Dashboard))
            }
            Err(e) => {
                self.error.set(&e);
                Err(e.into())
            }
        }
    }
}
