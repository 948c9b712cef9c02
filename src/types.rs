/// Shared data shapes exchanged with the Projcart API

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque project identifier assigned by the server (`_id` on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        ProjectId(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        ProjectId(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOwner {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: ProjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ProjectOwner>,
}

/// Fallback creator label when neither the project nor its owner carries a name
pub const UNKNOWN_CREATOR: &str = "Unknown";

impl Project {
    pub fn new(id: impl Into<ProjectId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            website: None,
            github: None,
            x_profile: None,
            creator_name: None,
            views: None,
            created_at: None,
            preview_title: None,
            preview_image: None,
            user: None,
        }
    }

    /// Creator name as shown to users: `creatorName`, then the owning user, then "Unknown"
    pub fn creator_display(&self) -> &str {
        non_empty(self.creator_name.as_deref())
            .or_else(|| non_empty(self.user.as_ref().map(|u| u.name.as_str())))
            .unwrap_or(UNKNOWN_CREATOR)
    }

    /// View count used for ranking; absent counts rank as zero
    pub fn view_count(&self) -> u64 {
        self.views.unwrap_or(0)
    }
}

/// Treats an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Editable fields sent on create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFields {
    pub title: String,
    pub website: String,
    pub github: String,
    pub x_profile: String,
}

impl ProjectFields {
    /// Copy with every field trimmed, as submitted to the server
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            website: self.website.trim().to_string(),
            github: self.github.trim().to_string(),
            x_profile: self.x_profile.trim().to_string(),
        }
    }
}

impl From<&Project> for ProjectFields {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            website: project.website.clone().unwrap_or_default(),
            github: project.github.clone().unwrap_or_default(),
            x_profile: project.x_profile.clone().unwrap_or_default(),
        }
    }
}

/// Partial project returned by an update; present fields overwrite, absent ones are kept.
/// Any `_id` in the response is ignored, the reconciliation key never changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ProjectOwner>,
}

impl ProjectPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Shallow merge onto `project`
    pub fn merge_into(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.title = title;
        }
        merge_optional(&mut project.website, self.website);
        merge_optional(&mut project.github, self.github);
        merge_optional(&mut project.x_profile, self.x_profile);
        merge_optional(&mut project.creator_name, self.creator_name);
        merge_optional(&mut project.views, self.views);
        merge_optional(&mut project.created_at, self.created_at);
        merge_optional(&mut project.preview_title, self.preview_title);
        merge_optional(&mut project.preview_image, self.preview_image);
        merge_optional(&mut project.user, self.user);
    }
}

fn merge_optional<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Which subset of projects a list request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Every public project
    All,
    /// Projects owned by the signed-in user
    Mine,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Avatar placeholder text: the first two characters of the name
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect()
    }
}

/// Payload of `GET /users/me`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Me {
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creator_display_prefers_creator_name_then_user() {
        let mut project = Project::new("p1", "DevTool");
        assert_eq!(project.creator_display(), "Unknown");

        project.user = Some(ProjectOwner { name: "Owner".into() });
        assert_eq!(project.creator_display(), "Owner");

        project.creator_name = Some(String::new());
        assert_eq!(project.creator_display(), "Owner");

        project.creator_name = Some("Creator".into());
        assert_eq!(project.creator_display(), "Creator");
    }

    #[test]
    fn project_uses_wire_field_names() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "_id": "abc",
            "title": "DevTool",
            "xProfile": "https://x.com/dev",
            "createdAt": "2022-01-01T00:00:00Z",
            "views": 7
        }))
        .unwrap();
        assert_eq!(project.id, ProjectId::from("abc"));
        assert_eq!(project.x_profile.as_deref(), Some("https://x.com/dev"));
        assert_eq!(project.view_count(), 7);
        assert!(project.website.is_none());
    }

    #[test]
    fn null_title_reads_as_empty() {
        let projects: Vec<Project> = serde_json::from_value(serde_json::json!([
            { "_id": "a", "title": null },
            { "_id": "b" },
            { "_id": "c", "title": "Kept" }
        ]))
        .unwrap();
        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["", "", "Kept"]);
    }

    #[test]
    fn me_tolerates_null_or_missing_projects() {
        let me: Me = serde_json::from_value(serde_json::json!({
            "user": { "name": "Ada" },
            "projects": null
        }))
        .unwrap();
        assert_eq!(me.user.map(|u| u.name), Some("Ada".to_string()));
        assert!(me.projects.is_empty());

        let me: Me = serde_json::from_value(serde_json::json!({ "user": null })).unwrap();
        assert!(me.user.is_none());
        assert!(me.projects.is_empty());
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let mut project = Project::new("p1", "Old");
        project.website = Some("old.dev".into());
        project.views = Some(3);

        ProjectPatch {
            title: Some("New".into()),
            github: Some("https://github.com/a/b".into()),
            ..ProjectPatch::default()
        }
        .merge_into(&mut project);

        assert_eq!(project.id, ProjectId::from("p1"));
        assert_eq!(project.title, "New");
        assert_eq!(project.website.as_deref(), Some("old.dev"));
        assert_eq!(project.github.as_deref(), Some("https://github.com/a/b"));
        assert_eq!(project.views, Some(3));
    }

    #[test]
    fn fields_are_trimmed_for_submission() {
        let fields = ProjectFields {
            title: "  Title ".into(),
            website: " site.dev".into(),
            github: String::new(),
            x_profile: "\t".into(),
        };
        let trimmed = fields.trimmed();
        assert_eq!(trimmed.title, "Title");
        assert_eq!(trimmed.website, "site.dev");
        assert_eq!(trimmed.x_profile, "");
    }
}
