//! Markdown blog posts

pub mod front_matter;

use std::path::Path;

use ahash::AHashMap;
use chrono::{DateTime, NaiveDate};

use crate::{ContentError, Result};

/// Shown in place of a post body that could not be found
pub const MISSING_BODY: &str = "Post content failed to load.";

const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Post metadata from front matter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Date as written in the header
    pub date: String,
    pub category: String,
    pub image: Option<String>,
}

impl Post {
    /// Publication date, if the header date parses
    pub fn published(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y/%m/%d"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|d| d.date_naive()))
}

/// Body lookup result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostBody<'a> {
    Markdown(&'a str),
    Missing,
}

impl<'a> PostBody<'a> {
    /// Markdown to render, or the failure placeholder
    pub fn text(&self) -> &'a str {
        match self {
            PostBody::Markdown(body) => body,
            PostBody::Missing => MISSING_BODY,
        }
    }
}

/// All posts, newest first
#[derive(Debug, Clone, Default)]
pub struct PostLibrary {
    posts: Vec<Post>,
    bodies: AHashMap<String, String>,
}

impl PostLibrary {
    /// Build from `(source name, file contents)` pairs. Sources without a
    /// parseable header, an `id` or a `title` are skipped.
    pub fn from_sources<I, N, T>(sources: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let mut library = Self::default();
        for (name, text) in sources {
            let name = name.as_ref();
            let matter = match front_matter::parse(name, text.as_ref()) {
                Ok(matter) => matter,
                Err(e) => {
                    tracing::warn!("Skipping post: {}", e);
                    continue;
                }
            };

            let (Some(id), Some(title)) = (matter.get("id"), matter.get("title")) else {
                tracing::warn!("Skipping post {}: missing id or title", name);
                continue;
            };
            if library.bodies.contains_key(id) {
                tracing::warn!("Skipping post {}: duplicate id '{}'", name, id);
                continue;
            }

            library.posts.push(Post {
                id: id.to_string(),
                title: title.to_string(),
                excerpt: matter.get("excerpt").unwrap_or_default().to_string(),
                date: matter.get("date").unwrap_or_default().to_string(),
                category: matter.get("category").unwrap_or(DEFAULT_CATEGORY).to_string(),
                image: matter.get("image").map(str::to_string),
            });
            library.bodies.insert(id.to_string(), matter.body.to_string());
        }

        // Newest first; undated posts last
        library.posts.sort_by(|a, b| match (a.published(), b.published()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        library
    }

    /// Load every `*.md` file in a directory
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ContentError::MissingDirectory(dir.to_path_buf()));
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let text = std::fs::read_to_string(&path)?;
            sources.push((path.display().to_string(), text));
        }

        let library = Self::from_sources(sources);
        tracing::info!("Loaded {} posts from {}", library.len(), dir.display());
        Ok(library)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// The post with `id`, or the newest post when there is none
    pub fn resolve(&self, id: &str) -> Option<&Post> {
        self.get(id).or_else(|| self.posts.first())
    }

    pub fn body(&self, id: &str) -> PostBody<'_> {
        match self.bodies.get(id) {
            Some(body) => PostBody::Markdown(body),
            None => PostBody::Missing,
        }
    }

    /// Distinct categories in listing order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for post in &self.posts {
            if !categories.contains(&post.category.as_str()) {
                categories.push(&post.category);
            }
        }
        categories
    }

    /// Posts in one category; `None` lists everything
    pub fn in_category(&self, category: Option<&str>) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, date: &str, category: Option<&str>) -> (String, String) {
        let category = category.map(|c| format!("category: {}\n", c)).unwrap_or_default();
        (
            format!("{}.md", id),
            format!("---\nid: {}\ntitle: Post {}\ndate: {}\n{}---\nBody of {}\n", id, id, date, category, id),
        )
    }

    #[test]
    fn test_sorted_newest_first() {
        let library = PostLibrary::from_sources(vec![
            post("old", "2023-01-05", Some("Tech")),
            post("undated", "soon", None),
            post("new", "2024-03-01", Some("Design")),
            post("mid", "2023-06-10T08:00:00Z", Some("Tech")),
        ]);

        let ids: Vec<&str> = library.posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old", "undated"]);
    }

    #[test]
    fn test_incomplete_posts_are_skipped() {
        let library = PostLibrary::from_sources(vec![
            ("a.md".to_string(), "---\ntitle: No id\n---\n".to_string()),
            ("b.md".to_string(), "no header".to_string()),
            post("ok", "2024-01-01", None),
            post("ok", "2024-02-01", None),
        ]);
        assert_eq!(library.len(), 1);
        assert_eq!(library.posts()[0].category, "Uncategorized");
        assert_eq!(library.posts()[0].excerpt, "");
        assert_eq!(library.posts()[0].date, "2024-01-01");
    }

    #[test]
    fn test_resolve_and_body() {
        let library = PostLibrary::from_sources(vec![post("a", "2024-01-01", None), post("b", "2024-02-01", None)]);

        assert_eq!(library.resolve("a").unwrap().id, "a");
        assert_eq!(library.resolve("nope").unwrap().id, "b");
        assert_eq!(library.body("a"), PostBody::Markdown("Body of a\n"));
        assert_eq!(library.body("nope").text(), MISSING_BODY);
        assert!(PostLibrary::default().resolve("a").is_none());
    }

    #[test]
    fn test_category_filter() {
        let library = PostLibrary::from_sources(vec![
            post("a", "2024-01-01", Some("Tech")),
            post("b", "2024-02-01", Some("Design")),
            post("c", "2024-03-01", Some("Tech")),
        ]);
        assert_eq!(library.categories(), vec!["Tech", "Design"]);
        assert_eq!(library.in_category(Some("Tech")).len(), 2);
        assert_eq!(library.in_category(None).len(), 3);
    }

    #[test]
    fn test_from_dir_reads_markdown_only() {
        let dir = tempfile::tempdir().unwrap();
        let (_, text) = post("disk", "2024-05-05", Some("Tech"));
        std::fs::write(dir.path().join("disk.md"), text).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "---\nid: x\ntitle: x\n---\n").unwrap();

        let library = PostLibrary::from_dir(dir.path()).unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.get("disk").unwrap().published(), NaiveDate::from_ymd_opt(2024, 5, 5));
    }

    #[test]
    fn test_from_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        assert!(matches!(PostLibrary::from_dir(&missing), Err(ContentError::MissingDirectory(_))));
    }
}
