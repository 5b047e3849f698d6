use serde::{Deserialize, Serialize};

/// Placeholder title used when no pass found one.
pub const UNTITLED: &str = "Untitled";
/// Placeholder description used when no pass found one.
pub const NO_DESCRIPTION: &str = "No description available";
/// Upper bound for both `main_points` and `image_urls`.
pub const MAX_ITEMS: usize = 5;

/// The structured summary of a webpage that the planner works from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedContent {
    pub title: String,
    pub description: String,
    /// At most five points, no near-duplicates.
    pub main_points: Vec<String>,
    /// At most five absolute image URLs, no exact duplicates.
    pub image_urls: Vec<String>,
}

impl NormalizedContent {
    /// Renders the content as a small markdown document.
    ///
    /// Used as the language-model prompt body when the scrape produced no markdown.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n{}\n", self.title, self.description);
        for point in &self.main_points {
            out.push_str(&format!("\n## {}\n", point));
        }
        for url in &self.image_urls {
            out.push_str(&format!("\n![]({})\n", url));
        }
        out
    }
}

/// Metadata the scrape provider returns alongside the page body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "sourceURL")]
    pub source_url: Option<String>,
}

/// The raw result of scraping a URL.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedPage {
    pub markdown: Option<String>,
    pub html: Option<String>,
    #[serde(default)]
    pub metadata: PageMetadata,
}
