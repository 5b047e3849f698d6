//! Slide planning: turns page content into an ordered list of slide descriptors.
//!
//! The content planner is deterministic; [`llm`] asks a language model instead.

pub mod llm;

use crate::models::content::NormalizedContent;
use crate::models::slide::{ImageContent, SlideContent, SlideDescriptor};

/// Plans slides straight from extracted content.
///
/// A title slide with the description, a slide listing the main points (when there
/// are any) and a slide showing the first image (when there is one).
pub fn plan_from_content(content: &NormalizedContent) -> Vec<SlideDescriptor> {
    let mut slides = vec![SlideDescriptor::title_and_body(
        content.title.clone(),
        content.description.clone(),
    )];

    if !content.main_points.is_empty() {
        let bullets = content
            .main_points
            .iter()
            .map(|point| format!("• {}", point))
            .collect::<Vec<_>>()
            .join("\n");
        slides.push(SlideDescriptor::title_and_body(content.title.clone(), bullets));
    }

    if let Some(url) = content.image_urls.first() {
        slides.push(SlideDescriptor::new(
            content.title.clone(),
            SlideContent::ImageOnly(ImageContent {
                image_url: Some(url.clone()),
                image_caption: None,
            }),
        ));
    }

    slides
}
