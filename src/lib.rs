pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod loading;
pub mod projects;
pub mod session;
pub mod types;
pub mod views;

pub use error::{ClientError, RequestError, ValidationError};
pub use projects::{ProjectList, SortMode};
pub use types::{Project, ProjectFields, ProjectId, ProjectPatch};
