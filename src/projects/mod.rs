//! Project list engine shared by the directory, dashboard and home views:
//! stable sorting, case-insensitive search and server-acknowledged reconciliation.

pub mod links;
pub mod list;
pub mod search;
pub mod sort;

pub use links::{normalize_url, screenshot_url};
pub use list::ProjectList;
pub use search::filter;
pub use sort::{sort, SortMode};
