use crate::api::ProjectApi;
use crate::error::{ClientError, RequestError};
use crate::loading::LoadingTracker;
use crate::projects::{ProjectList, SortMode};
use crate::types::{ListScope, Project, ProjectFields, ProjectId};

use super::card::ProjectCard;
use super::create::validate_edit;
use super::{ErrorMessage, Route};

/// Open edit modal
#[derive(Debug, Clone)]
pub struct EditSession {
    pub id: ProjectId,
    pub fields: ProjectFields,
    saving: LoadingTracker,
}

impl EditSession {
    pub fn is_saving(&self) -> bool {
        self.saving.is_loading()
    }
}

/// Owner dashboard: the signed-in user's projects with edit and delete.
///
/// The list only changes after the server confirms a mutation.
#[derive(Debug)]
pub struct DashboardView {
    projects: ProjectList,
    loaded: bool,
    search: String,
    sort_mode: Option<SortMode>,
    edit: Option<EditSession>,
    deleting: Option<ProjectId>,
    error: ErrorMessage,
    loading: LoadingTracker,
}

impl DashboardView {
    pub fn new(loading: LoadingTracker) -> Self {
        Self {
            projects: ProjectList::default(),
            loaded: false,
            search: String::new(),
            sort_mode: None,
            edit: None,
            deleting: None,
            error: ErrorMessage::default(),
            loading,
        }
    }

    /// Fetch the current user's projects. A failure keeps the message and
    /// asks the router to send the user to login.
    pub async fn load<A>(&mut self, api: &A) -> Result<(), Route>
    where
        A: ProjectApi + ?Sized,
    {
        let _guard = self.loading.begin();
        let result = api.list_projects(ListScope::Mine).await;
        self.loaded = true;
        match result {
            Ok(projects) => {
                tracing::debug!("Dashboard loaded {} projects", projects.len());
                self.projects = ProjectList::new(projects);
                self.error.clear();
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Dashboard load failed: {}", e);
                self.error.set(&e);
                Err(Route::Login)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    pub fn projects(&self) -> &ProjectList {
        &self.projects
    }

    pub fn count(&self) -> usize {
        self.projects.len()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// `None` keeps the server's order
    pub fn set_sort(&mut self, mode: Option<SortMode>) {
        self.sort_mode = mode;
    }

    pub fn visible(&self) -> Vec<&Project> {
        match self.sort_mode {
            Some(mode) => self.projects.view(mode, &self.search),
            None => self.projects.search(&self.search),
        }
    }

    pub fn cards(&self, screenshot_service: &str) -> Vec<ProjectCard> {
        self.visible()
            .into_iter()
            .map(|p| ProjectCard::new(p, screenshot_service))
            .collect()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.get()
    }

    pub fn dismiss_error(&mut self) {
        self.error.clear();
    }

    /// Record a project created from the create form
    pub fn apply_created(&mut self, project: Project) {
        self.projects.apply_create(project);
    }

    // Edit modal

    /// Open the edit modal prefilled from the project. Unknown ids open nothing.
    pub fn open_edit(&mut self, id: &ProjectId) -> bool {
        match self.projects.get(id) {
            Some(project) => {
                self.edit = Some(EditSession {
                    id: project.id.clone(),
                    fields: ProjectFields::from(project),
                    saving: LoadingTracker::new(),
                });
                true
            }
            None => false,
        }
    }

    pub fn edit(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn edit_fields_mut(&mut self) -> Option<&mut ProjectFields> {
        self.edit.as_mut().map(|e| &mut e.fields)
    }

    /// Cancel and close both discard the in-progress edit and stay on the dashboard
    pub fn close_edit(&mut self) {
        self.edit = None;
    }

    /// Send the edit and merge the server's response. On failure the modal
    /// stays open and the list is untouched. Returns `Ok(false)` with no modal open.
    pub async fn save_edit<A>(&mut self, api: &A) -> Result<bool, ClientError>
    where
        A: ProjectApi + ?Sized,
    {
        let Some(edit) = self.edit.as_mut() else {
            return Ok(false);
        };
        if let Err(e) = validate_edit(&edit.fields) {
            self.error.set(&e);
            return Err(e.into());
        }

        let id = edit.id.clone();
        let fields = edit.fields.trimmed();
        let saving = edit.saving.clone();

        let result = {
            let _guard = self.loading.begin();
            let _saving = saving.begin();
            api.update_project(&id, &fields).await
        };

        match result {
            Ok(patch) => {
                self.projects.apply_update(&id, patch);
                self.error.clear();
                self.edit = None;
                Ok(true)
            }
            Err(e) => {
                self.error.set(&e);
                Err(e.into())
            }
        }
    }

    // Delete confirmation

    pub fn open_delete(&mut self, id: &ProjectId) {
        self.deleting = Some(id.clone());
    }

    pub fn pending_delete(&self) -> Option<&ProjectId> {
        self.deleting.as_ref()
    }

    pub fn close_delete(&mut self) {
        self.deleting = None;
    }

    /// Delete the project awaiting confirmation. Returns `Ok(false)` when
    /// nothing was awaiting confirmation.
    pub async fn confirm_delete<A>(&mut self, api: &A) -> Result<bool, RequestError>
    where
        A: ProjectApi + ?Sized,
    {
        let Some(id) = self.deleting.clone() else {
            return Ok(false);
        };

        let result = {
            let _guard = self.loading.begin();
            api.delete_project(&id).await
        };

        match result {
            Ok(()) => {
                self.projects.apply_delete(&id);
                self.error.clear();
                self.close_delete();
                Ok(true)
            }
            Err(e) => {
                self.error.set(&e);
                Err(e)
            }
        }
    }
}
