use crate::api::ProjectApi;
use crate::error::RequestError;
use crate::loading::LoadingTracker;
use crate::projects::{ProjectList, SortMode};
use crate::types::{ListScope, Project};

use super::card::ProjectCard;
use super::ErrorMessage;

/// Public project directory: every project, sortable and searchable
#[derive(Debug)]
pub struct DirectoryView {
    projects: ProjectList,
    sort_mode: SortMode,
    search: String,
    error: ErrorMessage,
    loading: LoadingTracker,
}

impl DirectoryView {
    pub fn new(loading: LoadingTracker) -> Self {
        Self {
            projects: ProjectList::default(),
            sort_mode: SortMode::default(),
            search: String::new(),
            error: ErrorMessage::default(),
            loading,
        }
    }

    /// Fetch all public projects. On failure the list is emptied and the message kept.
    pub async fn load<A>(&mut self, api: &A) -> Result<(), RequestError>
    where
        A: ProjectApi + ?Sized,
    {
        let _guard = self.loading.begin();
        match api.list_projects(ListScope::All).await {
            Ok(projects) => {
                tracing::debug!("Directory loaded {} projects", projects.len());
                self.projects = ProjectList::new(projects);
                self.error.clear();
                Ok(())
            }
            Err(e) => {
                self.projects = ProjectList::default();
                self.error.set(&e);
                Err(e)
            }
        }
    }

    pub fn set_sort(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn projects(&self) -> &ProjectList {
        &self.projects
    }

    /// Projects to render, in display order
    pub fn visible(&self) -> Vec<&Project> {
        self.projects.view(self.sort_mode, &self.search)
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
}
