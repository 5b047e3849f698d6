use indexmap::IndexSet;
use log::debug;
use std::collections::HashSet;

use crate::models::content::{
    NormalizedContent, PageMetadata, MAX_ITEMS, NO_DESCRIPTION, UNTITLED,
};

/// Word-overlap above this marks two points as the same point.
const SIMILARITY_THRESHOLD: f64 = 0.7;
/// Only words longer than this take part in the overlap score.
const MIN_WORD_CHARS: usize = 3;

/// Jaccard similarity of the significant words of two strings.
pub fn word_similarity(a: &str, b: &str) -> f64 {
    let words = |text: &str| -> HashSet<String> {
        text.split_whitespace()
            .filter(|w| w.chars().count() > MIN_WORD_CHARS)
            .map(str::to_string)
            .collect()
    };
    let (words_a, words_b) = (words(a), words(b));
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / (words_a.len() + words_b.len() - intersection) as f64
}

/// Whether `candidate` restates one of `existing` (containment or high word overlap).
pub fn is_near_duplicate<'a, I>(candidate: &str, existing: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    let candidate = candidate.to_lowercase();
    existing.into_iter().any(|point| {
        let point = point.to_lowercase();
        candidate.contains(&point)
            || point.contains(&candidate)
            || word_similarity(&candidate, &point) > SIMILARITY_THRESHOLD
    })
}

fn pick_field(
    markdown: Option<&str>,
    html: Option<&str>,
    fallback: Option<&str>,
    placeholder: &str,
) -> String {
    [markdown, html, fallback]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty() && *value != placeholder)
        .unwrap_or(placeholder)
        .to_string()
}

/// Combines the markdown and HTML candidates into one record.
///
/// Title and description come from markdown unless it only holds the placeholder.
/// Main points keep every markdown point and add HTML points that are not near
/// duplicates; images are the ordered union. Both lists are capped at five.
pub fn merge_content(
    markdown: Option<&NormalizedContent>,
    html: Option<&NormalizedContent>,
    metadata: &PageMetadata,
) -> NormalizedContent {
    let title = pick_field(
        markdown.map(|c| c.title.as_str()),
        html.map(|c| c.title.as_str()),
        metadata.title.as_deref(),
        UNTITLED,
    );
    let description = pick_field(
        markdown.map(|c| c.description.as_str()),
        html.map(|c| c.description.as_str()),
        None,
        NO_DESCRIPTION,
    );

    let mut main_points: IndexSet<String> = markdown
        .map(|c| c.main_points.iter().cloned().collect())
        .unwrap_or_default();
    for point in html.iter().flat_map(|c| c.main_points.iter()) {
        if is_near_duplicate(point, main_points.iter()) {
            debug!("Skipping duplicate point '{}'", point);
        } else {
            main_points.insert(point.clone());
        }
    }

    let image_urls: IndexSet<String> = markdown
        .iter()
        .chain(html.iter())
        .flat_map(|c| c.image_urls.iter().cloned())
        .collect();

    NormalizedContent {
        title,
        description,
        main_points: main_points.into_iter().take(MAX_ITEMS).collect(),
        image_urls: image_urls.into_iter().take(MAX_ITEMS).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(title: &str, points: &[&str], images: &[&str]) -> NormalizedContent {
        NormalizedContent {
            title: title.to_string(),
            description: format!("About {title}"),
            main_points: points.iter().map(|s| s.to_string()).collect(),
            image_urls: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn merging_with_itself_is_identity() {
        let a = content(
            "Rust",
            &["Ownership", "Borrowing rules", "Async runtimes"],
            &["https://x/1.png", "https://x/2.png"],
        );
        assert_eq!(merge_content(Some(&a), Some(&a), &PageMetadata::default()), a);
    }

    #[test]
    fn overlapping_points_are_suppressed() {
        let md = content("T", &["Machine learning basics"], &[]);
        let html = content("T", &["Machine learning fundamentals and basics"], &[]);
        let merged = merge_content(Some(&md), Some(&html), &PageMetadata::default());
        assert_eq!(merged.main_points, vec!["Machine learning basics"]);
    }

    #[test]
    fn containment_is_case_insensitive() {
        let existing = vec!["Getting Started".to_string()];
        assert!(is_near_duplicate("getting started with cargo", existing.iter()));
        assert!(!is_near_duplicate("Error handling", existing.iter()));
    }

    #[test]
    fn lists_are_capped_and_ordered_markdown_first() {
        let md = content(
            "T",
            &["Alpha release", "Beta testing"],
            &["https://x/1.png", "https://x/2.png", "https://x/3.png"],
        );
        let html = content(
            "T",
            &["Gamma rays", "Delta deltas", "Epsilon values", "Zeta functions"],
            &["https://x/3.png", "https://x/4.png", "https://x/5.png", "https://x/6.png"],
        );
        let merged = merge_content(Some(&md), Some(&html), &PageMetadata::default());
        assert_eq!(
            merged.main_points,
            vec!["Alpha release", "Beta testing", "Gamma rays", "Delta deltas", "Epsilon values"]
        );
        assert_eq!(
            merged.image_urls,
            vec![
                "https://x/1.png",
                "https://x/2.png",
                "https://x/3.png",
                "https://x/4.png",
                "https://x/5.png",
            ]
        );
    }

    #[test]
    fn placeholders_defer_to_html_then_metadata() {
        let mut md = content(UNTITLED, &[], &[]);
        md.description = NO_DESCRIPTION.to_string();
        let html = content("From HTML", &[], &[]);
        let merged = merge_content(Some(&md), Some(&html), &PageMetadata::default());
        assert_eq!(merged.title, "From HTML");
        assert_eq!(merged.description, "About From HTML");

        let metadata = PageMetadata {
            title: Some("From Metadata".to_string()),
            ..Default::default()
        };
        let merged = merge_content(Some(&md), None, &metadata);
        assert_eq!(merged.title, "From Metadata");
        assert_eq!(merged.description, NO_DESCRIPTION);
    }

    #[test]
    fn similarity_ignores_short_words() {
        assert_eq!(word_similarity("a an the", "the an a"), 0.0);
        assert!((word_similarity("rust async runtime", "rust async runtime") - 1.0).abs() < 1e-9);
    }
}
