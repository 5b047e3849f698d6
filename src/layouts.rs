//! Expands slide descriptors into the element grids the presentation service renders.

pub mod builder;
pub mod image_only;
pub mod sections;
pub mod table;
pub mod timeline;
pub mod title_body;

use log::debug;

use crate::models::element::{Element, ElementSlideVariant};
use crate::models::slide::{SlideContent, SlideDescriptor};

/// The row-major element grid of one slide plus the id of its heading.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutGrid {
    /// Everything below the first row is anchored to this element.
    pub title_id: String,
    pub rows: Vec<Vec<Element>>,
}

/// Builds the variant for `slide`, falling back to a body slide when the
/// descriptor lacks what its layout needs.
pub fn build_variant(slide: &SlideDescriptor) -> ElementSlideVariant {
    let slide = slide.clone().or_fallback();
    let layout = slide.layout();

    let grid = match &slide.content {
        SlideContent::TitleAndBody(c) => {
            title_body::build(&slide.title, c.body.as_deref().unwrap_or_default())
        }
        SlideContent::ImageOnly(c) => image_only::build(&slide.title, c),
        SlideContent::TextSectionsAndConclusion(c) => sections::build(
            &slide.title,
            c.sections.as_deref().unwrap_or_default(),
            c.conclusion.as_deref().unwrap_or_default(),
        ),
        SlideContent::TitleAndTimeline(c) => {
            timeline::build(&slide.title, c.events.as_deref().unwrap_or_default())
        }
        SlideContent::TitleAndTable(c) => table::build(
            &slide.title,
            c.headers.as_deref().unwrap_or_default(),
            c.rows.as_deref().unwrap_or_default(),
        ),
    };
    debug!("Built {} grid with {} rows", layout, grid.rows.len());

    ElementSlideVariant {
        layout,
        elements: grid.rows,
    }
}
