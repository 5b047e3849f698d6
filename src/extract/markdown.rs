use regex::Regex;
use std::sync::LazyLock;

use super::resolve_url;
use crate::models::content::{
    NormalizedContent, PageMetadata, MAX_ITEMS, NO_DESCRIPTION, UNTITLED,
};

static TITLE_HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());
static TITLE_BOLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\*\*(.+?)\*\*$").unwrap());
static LONE_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[.+?\]\(.+?\)$").unwrap());
static SUBHEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{2,4}\s+(.+)$").unwrap());
static BOLD_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static IMAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\((.+?)\)").unwrap());

/// Fallback tiers only kick in while fewer points than this were found.
const MIN_POINTS: usize = 3;
const MIN_DESCRIPTION_CHARS: usize = 30;
const MIN_BOLD_POINT_CHARS: usize = 15;
const MIN_PARAGRAPH_POINT_CHARS: usize = 50;

/// Parses scraped markdown into a candidate content record.
pub fn parse_markdown(markdown: &str, base_url: &str, metadata: &PageMetadata) -> NormalizedContent {
    let title = extract_title(markdown)
        .or_else(|| metadata.title.clone().filter(|t| !t.trim().is_empty()))
        .unwrap_or_else(|| UNTITLED.to_string());
    let description =
        extract_description(markdown).unwrap_or_else(|| NO_DESCRIPTION.to_string());

    NormalizedContent {
        title,
        description,
        main_points: extract_main_points(markdown),
        image_urls: extract_images(markdown, base_url),
    }
}

/// First `# heading`, else the first line that is entirely `**bold**`.
pub fn extract_title(markdown: &str) -> Option<String> {
    TITLE_HEADING_REGEX
        .captures(markdown)
        .or_else(|| TITLE_BOLD_REGEX.captures(markdown))
        .map(|caps| caps[1].trim().to_string())
        .filter(|title| !title.is_empty())
}

/// First substantial line that is not a heading, an image or a lone link.
pub fn extract_description(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .map(str::trim)
        .find(|line| {
            line.chars().count() > MIN_DESCRIPTION_CHARS
                && !line.starts_with('#')
                && !line.starts_with('!')
                && !LONE_LINK_REGEX.is_match(line)
        })
        .map(str::to_string)
}

/// Level 2-4 headings, topped up with long bold spans and then long paragraphs.
///
/// The line picked as the description never doubles as a paragraph point.
pub fn extract_main_points(markdown: &str) -> Vec<String> {
    let mut points: Vec<String> = SUBHEADING_REGEX
        .captures_iter(markdown)
        .take(MAX_ITEMS)
        .map(|caps| caps[1].trim().to_string())
        .collect();

    if points.len() < MIN_POINTS {
        for caps in BOLD_SPAN_REGEX.captures_iter(markdown) {
            if points.len() >= MAX_ITEMS {
                break;
            }
            if caps[1].chars().count() > MIN_BOLD_POINT_CHARS {
                points.push(caps[1].trim().to_string());
            }
        }
    }

    if points.len() < MIN_POINTS {
        let description = extract_description(markdown);
        for line in markdown.lines().map(str::trim) {
            if points.len() >= MAX_ITEMS {
                break;
            }
            if description.as_deref() == Some(line) {
                continue;
            }
            if line.chars().count() > MIN_PARAGRAPH_POINT_CHARS
                && !line.starts_with('#')
                && !line.starts_with('!')
                && !line.contains("](")
            {
                points.push(line.to_string());
            }
        }
    }

    points
}

/// Targets of `![alt](url)` links, made absolute; unresolvable ones are skipped.
pub fn extract_images(markdown: &str, base_url: &str) -> Vec<String> {
    IMAGE_REGEX
        .captures_iter(markdown)
        .filter_map(|caps| resolve_url(&caps[1], base_url))
        .take(MAX_ITEMS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com/articles/rust";

    #[test]
    fn title_prefers_heading_then_bold_then_metadata() {
        assert_eq!(extract_title("intro\n# Real Title\n").as_deref(), Some("Real Title"));
        assert_eq!(extract_title("**Bold Title**\ntext").as_deref(), Some("Bold Title"));
        assert_eq!(extract_title("## Only a subheading"), None);

        let metadata = PageMetadata {
            title: Some("From Metadata".to_string()),
            ..Default::default()
        };
        assert_eq!(parse_markdown("plain", BASE, &metadata).title, "From Metadata");
        assert_eq!(
            parse_markdown("plain", BASE, &PageMetadata::default()).title,
            UNTITLED
        );
    }

    #[test]
    fn description_skips_headings_images_and_links() {
        let md = "# A heading that is quite long, over thirty\n\
                  ![an image alt text that is long enough](x.png)\n\
                  [a lone link that is long enough to count](https://x)\n\
                  short line\n\
                  The first real paragraph of this page is here.";
        assert_eq!(
            extract_description(md).as_deref(),
            Some("The first real paragraph of this page is here.")
        );
        assert_eq!(extract_description("tiny"), None);
    }

    #[test]
    fn main_points_from_headings_capped_at_five() {
        let md = "## One\n### Two\n#### Three\n##### Five hashes\n## Four\n## Five\n## Six";
        assert_eq!(
            extract_main_points(md),
            vec!["One", "Two", "Three", "Four", "Five"]
        );
    }

    #[test]
    fn main_points_fall_back_to_bold_then_paragraphs() {
        let md = "## Only heading\n\
                  Some **short** and **a sufficiently long bold span** text.\n\
                  This paragraph is definitely longer than fifty characters in total.\n\
                  And a second paragraph that also runs past the fifty character mark.";
        assert_eq!(
            extract_main_points(md),
            vec![
                "Only heading",
                "a sufficiently long bold span",
                "This paragraph is definitely longer than fifty characters in total.",
                "And a second paragraph that also runs past the fifty character mark.",
            ]
        );
    }

    #[test]
    fn description_line_is_not_reused_as_a_point() {
        let md = "# Title\n\n\
                  This description line is comfortably longer than fifty chars.\n\n\
                  ## Point One\n\n## Point Two";
        assert_eq!(extract_main_points(md), vec!["Point One", "Point Two"]);
    }

    #[test]
    fn images_are_resolved_and_capped() {
        let md = "![a](/one.png) ![b](two.png) ![c](https://cdn.example.com/3.png)\n\
                  ![d](4.png) ![e](5.png) ![f](6.png)";
        assert_eq!(
            extract_images(md, BASE),
            vec![
                "https://example.com/one.png",
                "https://example.com/articles/two.png",
                "https://cdn.example.com/3.png",
                "https://example.com/articles/4.png",
                "https://example.com/articles/5.png",
            ]
        );
    }

    #[test]
    fn unresolvable_images_are_skipped() {
        assert!(extract_images("![a](rel.png)", "nonsense").is_empty());
    }
}
