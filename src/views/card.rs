use serde::Serialize;

use crate::projects::links::{normalize_url, screenshot_url};
use crate::types::{non_empty, Project, ProjectId};

/// Presentation model of one project tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    pub id: ProjectId,
    pub title: String,
    pub creator: String,
    pub website_url: Option<String>,
    pub github_url: Option<String>,
    pub x_url: Option<String>,
    pub image: Option<String>,
    pub image_alt: String,
    pub views: u64,
    #[serde(skip)]
    preview_image: Option<String>,
}

impl ProjectCard {
    pub fn new(project: &Project, screenshot_service: &str) -> Self {
        let website_url = normalize_url(non_empty(project.website.as_deref()));
        let preview_image = non_empty(project.preview_image.as_deref()).map(String::from);
        let image = preview_image
            .clone()
            .or_else(|| screenshot_url(screenshot_service, website_url.as_deref()));

        Self {
            id: project.id.clone(),
            title: project.title.clone(),
            creator: project.creator_display().to_string(),
            website_url,
            github_url: non_empty(project.github.as_deref()).map(String::from),
            x_url: non_empty(project.x_profile.as_deref()).map(String::from),
            image,
            image_alt: non_empty(project.preview_title.as_deref())
                .unwrap_or(project.title.as_str())
                .to_string(),
            views: project.view_count(),
            preview_image,
        }
    }

    /// The image failed to load: stop offering the generated screenshot
    pub fn mark_image_failed(&mut self) {
        self.image = self.preview_image.clone();
    }
}
