use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use super::resolve_url;
use crate::models::content::{NormalizedContent, MAX_ITEMS, NO_DESCRIPTION, UNTITLED};

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static H1_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static META_DESCRIPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static PARAGRAPH_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static SUBHEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, h3").unwrap());
static IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

const MIN_POINTS: usize = 3;
const MIN_PARAGRAPH_POINT_CHARS: usize = 50;

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parses scraped HTML into a candidate content record.
pub fn parse_html(html: &str, base_url: &str) -> NormalizedContent {
    let document = Html::parse_document(html);

    let title = non_empty(
        document
            .select(&TITLE_SELECTOR)
            .map(element_text)
            .collect::<String>(),
    )
    .or_else(|| document.select(&H1_SELECTOR).next().map(element_text).and_then(non_empty))
    .unwrap_or_else(|| UNTITLED.to_string());

    let description = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .and_then(non_empty)
        .or_else(|| {
            document
                .select(&PARAGRAPH_SELECTOR)
                .next()
                .map(element_text)
                .and_then(non_empty)
        })
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let mut main_points: Vec<String> = document
        .select(&SUBHEADING_SELECTOR)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect();

    if main_points.len() < MIN_POINTS {
        for paragraph in document.select(&PARAGRAPH_SELECTOR) {
            if main_points.len() >= MAX_ITEMS {
                break;
            }
            let text = element_text(paragraph);
            if text.chars().count() > MIN_PARAGRAPH_POINT_CHARS {
                main_points.push(text);
            }
        }
    }
    main_points.truncate(MAX_ITEMS);

    let image_urls = document
        .select(&IMAGE_SELECTOR)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| !src.trim().is_empty())
        .filter_map(|src| resolve_url(src, base_url))
        .take(MAX_ITEMS)
        .collect();

    NormalizedContent {
        title,
        description,
        main_points,
        image_urls,
    }
}
