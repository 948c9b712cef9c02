use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    MostViewed,
    Latest,
    Past,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::MostViewed => "most-viewed",
            SortMode::Latest => "latest",
            SortMode::Past => "past",
        }
    }

    fn compare(&self, a: &Project, b: &Project) -> Ordering {
        match self {
            SortMode::MostViewed => b.view_count().cmp(&a.view_count()),
            SortMode::Latest => created_at_millis(b).cmp(&created_at_millis(a)),
            SortMode::Past => created_at_millis(a).cmp(&created_at_millis(b)),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown sort mode: {0} (expected most-viewed, latest or past)")]
pub struct ParseSortModeError(String);

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "most-viewed" => Ok(SortMode::MostViewed),
            "latest" => Ok(SortMode::Latest),
            "past" => Ok(SortMode::Past),
            other => Err(ParseSortModeError(other.to_string())),
        }
    }
}

/// Creation time in epoch milliseconds; absent or unreadable timestamps count as the epoch.
pub fn created_at_millis(project: &Project) -> i64 {
    project
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(0)
}

fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Order `projects` by `mode` without touching the input. Equal keys keep input order.
pub fn sort<'a, I>(projects: I, mode: SortMode) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut out: Vec<&Project> = projects.into_iter().collect();
    // sort_by is stable
    out.sort_by(|a, b| mode.compare(a, b));
    out
}
