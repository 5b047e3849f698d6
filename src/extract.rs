//! Content extraction: turns a scraped page into a [`NormalizedContent`] record.
//!
//! Markdown and HTML are parsed independently and the two candidates are merged,
//! preferring what the markdown pass found.

pub mod html;
pub mod markdown;
pub mod merge;

use crate::errors::{PresenterError, Result};
use crate::models::content::{NormalizedContent, ScrapedPage};
use log::{info, warn};
use reqwest::Url;

/// Extracts and merges content from whichever formats the scrape returned.
///
/// # Errors
///
/// Returns `PresenterError::Extraction` if the page carries neither markdown nor HTML.
pub fn extract_content(page: &ScrapedPage, base_url: &str) -> Result<NormalizedContent> {
    let markdown = page.markdown.as_deref().filter(|s| !s.trim().is_empty());
    let html = page.html.as_deref().filter(|s| !s.trim().is_empty());

    if markdown.is_none() && html.is_none() {
        return Err(PresenterError::Extraction(
            "scrape response contains neither markdown nor HTML data".to_string(),
        ));
    }

    let from_markdown = markdown.map(|md| markdown::parse_markdown(md, base_url, &page.metadata));
    let from_html = html.map(|h| html::parse_html(h, base_url));

    let merged = merge::merge_content(from_markdown.as_ref(), from_html.as_ref(), &page.metadata);
    info!(
        "Extracted '{}' with {} main points and {} images",
        merged.title,
        merged.main_points.len(),
        merged.image_urls.len()
    );
    Ok(merged)
}

/// Makes `link` absolute against `base_url`. Links starting with `http` are kept as is.
///
/// Returns `None` (and logs) when the link cannot be resolved.
pub(crate) fn resolve_url(link: &str, base_url: &str) -> Option<String> {
    let link = link.trim();
    if link.starts_with("http") {
        return Some(link.to_string());
    }
    match Url::parse(base_url).and_then(|base| base.join(link)) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            warn!("Failed to convert relative URL '{}': {}", link, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::PageMetadata;

    #[test]
    fn resolves_relative_links_against_base() {
        assert_eq!(
            resolve_url("/img/a.png", "https://example.com/blog/post").as_deref(),
            Some("https://example.com/img/a.png")
        );
        assert_eq!(
            resolve_url("b.png", "https://example.com/blog/post").as_deref(),
            Some("https://example.com/blog/b.png")
        );
        assert_eq!(
            resolve_url("https://cdn.example.com/c.png", "not a url").as_deref(),
            Some("https://cdn.example.com/c.png")
        );
        assert_eq!(resolve_url("c.png", "not a url"), None);
    }

    #[test]
    fn fails_without_any_format() {
        let page = ScrapedPage {
            markdown: Some("   ".to_string()),
            html: None,
            metadata: PageMetadata::default(),
        };
        assert!(matches!(
            extract_content(&page, "https://example.com"),
            Err(PresenterError::Extraction(_))
        ));
    }

    #[test]
    fn end_to_end_markdown_extraction() {
        let page = ScrapedPage {
            markdown: Some(
                "# Title\n\nThis is a description paragraph that is long enough.\n\n## Point One\n\n## Point Two"
                    .to_string(),
            ),
            html: None,
            metadata: PageMetadata::default(),
        };
        let content = extract_content(&page, "https://example.com").unwrap();
        assert_eq!(content.title, "Title");
        assert_eq!(
            content.description,
            "This is a description paragraph that is long enough."
        );
        assert_eq!(content.main_points, vec!["Point One", "Point Two"]);
        assert!(content.image_urls.is_empty());
    }

    #[test]
    fn html_only_page_is_usable() {
        let page = ScrapedPage {
            markdown: None,
            html: Some(
                "<html><head><title>Docs</title></head><body><h2>Install</h2><img src=\"/logo.svg\"></body></html>"
                    .to_string(),
            ),
            metadata: PageMetadata::default(),
        };
        let content = extract_content(&page, "https://example.com/docs").unwrap();
        assert_eq!(content.title, "Docs");
        assert_eq!(content.main_points, vec!["Install"]);
        assert_eq!(content.image_urls, vec!["https://example.com/logo.svg"]);
    }
}
