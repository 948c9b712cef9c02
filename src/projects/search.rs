use crate::types::{non_empty, Project};

/// Trim and lowercase a raw search term. `None` means "no filtering".
pub fn normalize_term(raw: &str) -> Option<String> {
    let term = raw.trim().to_lowercase();
    if term.is_empty() {
        None
    } else {
        Some(term)
    }
}

/// Lowercased haystack: title, creator, website, github, x profile; empty parts skipped
pub fn searchable_text(project: &Project) -> String {
    let parts = [
        Some(project.title.as_str()),
        Some(project.creator_display()),
        project.website.as_deref(),
        project.github.as_deref(),
        project.x_profile.as_deref(),
    ];
    parts
        .into_iter()
        .filter_map(non_empty)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn matches(project: &Project, normalized_term: &str) -> bool {
    searchable_text(project).contains(normalized_term)
}

/// Case-insensitive substring filter. A blank term returns the input as-is.
pub fn filter<'a, I>(projects: I, raw_term: &str) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    match normalize_term(raw_term) {
        None => projects.into_iter().collect(),
        Some(term) => projects
            .into_iter()
            .filter(|p| matches(p, &term))
            .collect(),
    }
}
