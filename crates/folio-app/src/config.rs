//! Startup configuration from the environment

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_content::{PostLibrary, Profile};
use folio_core::MotionSettings;
use tracing::{info, warn};

pub const SETTINGS_VAR: &str = "FOLIO_SETTINGS";
pub const CONTENT_VAR: &str = "FOLIO_CONTENT";
const DEFAULT_CONTENT_DIR: &str = "content";

/// Where to read settings and content from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub settings_path: Option<PathBuf>,
    pub content_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::var(SETTINGS_VAR).ok(), std::env::var(CONTENT_VAR).ok())
    }

    pub fn from_vars(settings: Option<String>, content: Option<String>) -> Self {
        Self {
            settings_path: settings.filter(|s| !s.is_empty()).map(PathBuf::from),
            content_dir: content
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR)),
        }
    }

    /// Motion settings; an explicitly named file must load
    pub fn load_settings(&self) -> Result<MotionSettings> {
        match &self.settings_path {
            Some(path) => MotionSettings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display())),
            None => {
                info!("Using default motion settings");
                Ok(MotionSettings::default())
            }
        }
    }

    /// Resume and posts; missing content degrades to empty pages
    pub fn load_content(&self) -> (Profile, PostLibrary) {
        let profile = load_or_default("profile", &self.content_dir.join("resume.json"), |p| Profile::load(p));
        let library = load_or_default("posts", &self.content_dir.join("posts"), |p| {
            PostLibrary::from_dir(p)
        });
        (profile, library)
    }
}

fn load_or_default<T: Default>(
    what: &str,
    path: &Path,
    load: impl FnOnce(&Path) -> folio_content::Result<T>,
) -> T {
    match load(path) {
        Ok(value) => value,
        Err(e) => {
            warn!("Could not load {} from {}: {}", what, path.display(), e);
            T::default()
        }
    }
}
