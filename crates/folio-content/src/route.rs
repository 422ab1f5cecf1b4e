//! Site routes

use std::fmt;

/// A page of the site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    Blog,
    Post(String),
}

impl Route {
    /// Parse a path; anything unrecognized lands on the home page
    pub fn parse(path: &str) -> Self {
        let path = path.split(&['?', '#'][..]).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["blog"] => Route::Blog,
            ["blog", id] => Route::Post(id.to_string()),
            _ => {
                tracing::debug!("unknown route '{}', showing home", path);
                Route::Home
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Blog => "/blog".to_string(),
            Route::Post(id) => format!("/blog/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
