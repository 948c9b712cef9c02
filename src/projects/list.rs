use std::collections::HashSet;

use crate::types::{Project, ProjectId, ProjectPatch};

use super::search::filter;
use super::sort::{sort, SortMode};

/// In-memory project collection owned by a single view.
///
/// Entries are unique by id. Mutations are applied only after the server has
/// acknowledged the matching request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectList {
    projects: Vec<Project>,
}

impl ProjectList {
    /// Build from a fetched collection, keeping the first entry for any repeated id
    pub fn new(projects: Vec<Project>) -> Self {
        let mut seen = HashSet::with_capacity(projects.len());
        let mut unique = Vec::with_capacity(projects.len());
        for project in projects {
            if seen.insert(project.id.clone()) {
                unique.push(project);
            } else {
                tracing::warn!("Dropping duplicate project id {} from fetched list", project.id);
            }
        }
        Self { projects: unique }
    }

    pub fn as_slice(&self) -> &[Project] {
        &self.projects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    fn position(&self, id: &ProjectId) -> Option<usize> {
        self.projects.iter().position(|p| &p.id == id)
    }

    /// Sorted then filtered view for rendering
    pub fn view(&self, mode: SortMode, raw_term: &str) -> Vec<&Project> {
        filter(sort(&self.projects, mode), raw_term)
    }

    /// Filtered view in fetch order
    pub fn search(&self, raw_term: &str) -> Vec<&Project> {
        filter(&self.projects, raw_term)
    }

    /// Append a project the server just created. A record whose id is already
    /// present replaces that entry where it stands.
    pub fn apply_create(&mut self, project: Project) {
        match self.position(&project.id) {
            Some(index) => {
                tracing::warn!("Created project {} already listed, replacing entry", project.id);
                self.projects[index] = project;
            }
            None => self.projects.push(project),
        }
    }

    /// Shallow-merge the server's patch into the entry with `id`.
    /// Returns `false` and leaves the list untouched when `id` is not present.
    pub fn apply_update(&mut self, id: &ProjectId, patch: ProjectPatch) -> bool {
        match self.projects.iter_mut().find(|p| &p.id == id) {
            Some(project) => {
                patch.merge_into(project);
                true
            }
            None => {
                tracing::warn!("Update for unknown project id {} ignored (stale identifier)", id);
                false
            }
        }
    }

    /// Remove the entry with `id`; others keep their order. Unknown ids are a no-op.
    pub fn apply_delete(&mut self, id: &ProjectId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.projects.remove(index);
                true
            }
            None => {
                tracing::warn!("Delete for unknown project id {} ignored", id);
                false
            }
        }
    }
}

impl From<Vec<Project>> for ProjectList {
    fn from(projects: Vec<Project>) -> Self {
        Self::new(projects)
    }
}

impl<'a> IntoIterator for &'a ProjectList {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}
