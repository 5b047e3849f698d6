use log::{error, info};
use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{PresenterError, Result};
use crate::gemini::TextGenerator;
use crate::models::slide::SlideDescriptor;

/// First `[ { ... } ]` span in the text, across lines.
static JSON_ARRAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\{[\s\S]*\}\s*\]").unwrap());

/// Builds the generation request for turning `markdown` into a slide plan.
pub fn build_prompt(markdown: &str, base_url: &str) -> String {
    format!(
        r#"You are a presentation designer. Turn the following markdown into the slides of a clear, engaging presentation.

{markdown}

Choose the best layout for every slide from this list:
1. TITLE_AND_BODY_LAYOUT - a title with paragraphs or bullet points
2. IMAGE_ONLY_LAYOUT - a title with one prominent image
3. TEXT_SECTIONS_AND_CONCLUSION_LAYOUT - a title, several headed sections and a conclusion
4. TITLE_AND_TIMELINE_LAYOUT - sequential events or steps of a process
5. TITLE_AND_TABLE_LAYOUT - tabular data

Answer with a JSON array of slide objects. Every object has:
- "layout": one of the five layout names above
- "title": a short, engaging slide title
- "content": shaped by the layout:
  - TITLE_AND_BODY_LAYOUT: {{ "body": "text" }}
  - IMAGE_ONLY_LAYOUT: {{ "imageUrl": "image url", "imageCaption": "caption" }}
  - TEXT_SECTIONS_AND_CONCLUSION_LAYOUT: {{ "sections": [{{ "heading": "...", "content": "..." }}], "conclusion": "..." }}
  - TITLE_AND_TIMELINE_LAYOUT: {{ "events": [{{ "time": "...", "title": "...", "description": "..." }}] }}
  - TITLE_AND_TABLE_LAYOUT: {{ "headers": ["..."], "rows": [["..."]] }}

Guidelines:
- Merge closely related topics into fewer, fuller TITLE_AND_BODY_LAYOUT slides with four or five bullet points each.
- Format body text with markdown bullets (- or *) or numbered lists.
- When a timeline has no explicit times, use 1, 2, 3 and so on as time points.
- Use images from markdown image links like ![text](url) for IMAGE_ONLY_LAYOUT slides.
- Make relative URLs absolute using the base URL: {base_url}
- Keep a logical flow from slide to slide.

Return ONLY the JSON array, with no other text."#
    )
}

/// Reads a slide plan out of raw model output.
///
/// The whole text is tried as JSON first, then the first bracketed array of objects
/// inside it (models like to wrap answers in prose or code fences).
///
/// # Errors
///
/// Returns `PresenterError::Planning` if no JSON array of slides can be read.
pub fn parse_slide_plan(text: &str) -> Result<Vec<SlideDescriptor>> {
    if let Ok(slides) = serde_json::from_str::<Vec<SlideDescriptor>>(text.trim()) {
        return Ok(slides);
    }

    let candidate = JSON_ARRAY_REGEX.find(text).ok_or_else(|| {
        error!("Failed to extract JSON from response. Raw response: {}", text);
        PresenterError::Planning("no JSON array found in language model response".to_string())
    })?;
    serde_json::from_str::<Vec<SlideDescriptor>>(candidate.as_str()).map_err(|e| {
        error!("Extracted text is not valid JSON: {}", candidate.as_str());
        PresenterError::Planning(format!("invalid JSON in language model response: {}", e))
    })
}

/// Asks `generator` to plan slides for `markdown`.
///
/// # Errors
///
/// Propagates generator failures; returns `PresenterError::Planning` when the answer
/// cannot be parsed or holds no slides.
pub async fn plan_with_model<G>(
    generator: &G,
    markdown: &str,
    base_url: &str,
) -> Result<Vec<SlideDescriptor>>
where
    G: TextGenerator + ?Sized,
{
    let response = generator.generate(&build_prompt(markdown, base_url)).await?;
    let slides = parse_slide_plan(&response)?;
    if slides.is_empty() {
        return Err(PresenterError::Planning(
            "language model returned an empty slide list".to_string(),
        ));
    }
    info!("Generated {} slides from markdown", slides.len());
    Ok(slides)
}
