use crate::api::ProjectApi;
use crate::loading::LoadingTracker;
use crate::projects::{sort, ProjectList, SortMode};
use crate::session::TokenStore;
use crate::types::{ListScope, Project};

/// Landing page: project count and the most viewed projects
#[derive(Debug)]
pub struct HomeView {
    projects: ProjectList,
    popular_count: usize,
    loading: LoadingTracker,
}

impl HomeView {
    pub fn new(popular_count: usize, loading: LoadingTracker) -> Self {
        Self {
            projects: ProjectList::default(),
            popular_count,
            loading,
        }
    }

    /// Fetch all projects; a failure just leaves the page empty
    pub async fn load<A>(&mut self, api: &A)
    where
        A: ProjectApi + ?Sized,
    {
        let _guard = self.loading.begin();
        self.projects = match api.list_projects(ListScope::All).await {
            Ok(projects) => ProjectList::new(projects),
            Err(e) => {
                tracing::debug!("Home projects unavailable: {}", e);
                ProjectList::default()
            }
        };
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn popular(&self) -> Vec<&Project> {
        let mut top = sort(&self.projects, SortMode::MostViewed);
        top.truncate(self.popular_count);
        top
    }

    /// Call-to-action buttons only show to visitors without a session
    pub fn show_get_started(tokens: &dyn TokenStore) -> bool {
        !tokens.is_logged_in()
    }
}
