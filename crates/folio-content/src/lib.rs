//! Portfolio content: the resume profile, markdown posts and their search

pub mod posts;
pub mod profile;
pub mod route;
pub mod search;

use std::path::PathBuf;

use thiserror::Error;

// Re-exports
pub use posts::{Post, PostBody, PostLibrary, MISSING_BODY};
pub use profile::{Profile, ProjectEntry, SocialLink};
pub use route::Route;
pub use search::{search, DEFAULT_RESULTS};

/// Errors that can occur while loading content
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Front matter error in {source_name}: {reason}")]
    FrontMatter { source_name: String, reason: String },

    #[error("Content directory not found: {0}")]
    MissingDirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, ContentError>;
