//! Fuzzy post search for the Ctrl+K overlay

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::posts::{Post, PostLibrary};

/// Posts listed before anything is typed
pub const DEFAULT_RESULTS: usize = 3;

/// Added to title scores so a title hit outranks an equal excerpt hit
const TITLE_BONUS: i64 = 10;

/// Rank posts against `query`, best first. A blank query lists the newest
/// posts instead.
pub fn search<'a>(library: &'a PostLibrary, query: &str) -> Vec<&'a Post> {
    let query = query.trim();
    if query.is_empty() {
        return library.posts().iter().take(DEFAULT_RESULTS).collect();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut ranked: Vec<(i64, usize, &Post)> = library
        .posts()
        .iter()
        .enumerate()
        .filter_map(|(order, post)| {
            let title = matcher
                .fuzzy_match(&post.title, query)
                .map(|score| score.saturating_add(TITLE_BONUS));
            let best = [
                title,
                matcher.fuzzy_match(&post.excerpt, query),
                matcher.fuzzy_match(&post.category, query),
            ]
            .into_iter()
            .flatten()
            .max()?;
            Some((best, order, post))
        })
        .collect();

    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    tracing::debug!("search '{}' matched {} posts", query, ranked.len());
    ranked.into_iter().map(|(_, _, post)| post).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> PostLibrary {
        let sources = [
            ("rust-async", "Async Rust in practice", "Executors and wakers", "Tech", "2024-04-01"),
            ("color", "Choosing a palette", "Notes on color for Rust tools", "Design", "2024-03-01"),
            ("gsap", "Scroll snapping", "Full page slides", "Tech", "2024-02-01"),
            ("type", "Typography", "Serif or sans", "Design", "2024-01-01"),
        ];
        PostLibrary::from_sources(sources.iter().map(|(id, title, excerpt, category, date)| {
            (
                format!("{}.md", id),
                format!(
                    "---\nid: {}\ntitle: {}\nexcerpt: {}\ncategory: {}\ndate: {}\n---\n",
                    id, title, excerpt, category, date
                ),
            )
        }))
    }

    #[test]
    fn test_blank_query_lists_newest() {
        let library = library();
        let ids: Vec<&str> = search(&library, "   ").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["rust-async", "color", "gsap"]);
    }

    #[test]
    fn test_title_match_ranks_first() {
        let library = library();
        let results = search(&library, "rust");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "rust-async");
        assert_eq!(results[1].id, "color");
    }

    #[test]
    fn test_category_and_misses() {
        let library = library();
        let design: Vec<&str> = search(&library, "design").iter().map(|p| p.id.as_str()).collect();
        assert!(design.contains(&"color"));
        assert!(design.contains(&"type"));

        assert!(search(&library, "zzzqqq").is_empty());
    }
}
