//! Factory functions shared by the layout builders.
//!
//! Every element starts from the same defaults (full 24-column width, automatic
//! padding, no background) and is refined with the chainable setters below.

use uuid::Uuid;

use crate::models::element::{
    Background, Dimensions, Element, ElementSubtype, ElementType, ImageSource, RelativePosition,
};
use crate::sanitize::process_content;

pub const HEADING_HEIGHT: u32 = 56;
pub const BODY_HEIGHT: u32 = 503;
pub const GRID_COLUMNS: u32 = 24;
const PRESET_TEXTBOX: &str = "textbox_basic";
const PRESET_CONTAINER: &str = "container_basic";
const PRESET_IMAGE: &str = "image_basic";
const PRESET_UI: &str = "ui_basic";

/// A fresh client-side element identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn element(element_type: ElementType, subtype: ElementSubtype, preset: &str) -> Element {
    Element {
        id: new_id(),
        element_type,
        subtype,
        parent_id: None,
        array_index: None,
        row_index: None,
        relative_position: RelativePosition::default(),
        dimensions: Dimensions::default(),
        preset_type: preset.to_string(),
        content: None,
        prose_mirror_content: None,
        background: Background::default(),
        image: None,
        row: None,
        column: None,
        elements_in_first_row: None,
        elements: Vec::new(),
    }
}

/// A textbox holding already-sanitized `content`.
pub fn textbox(subtype: ElementSubtype, content: impl Into<String>) -> Element {
    let mut textbox = element(ElementType::Textbox, subtype, PRESET_TEXTBOX);
    textbox.content = Some(content.into());
    textbox
}

/// The slide heading: the sanitized title at a fixed height.
pub fn heading(title: &str) -> Element {
    textbox(ElementSubtype::Heading, process_content(title, false)).with_manual_height(HEADING_HEIGHT)
}

/// A container owning `children`; each child gets its `parent_id` pointed at it.
pub fn container(subtype: ElementSubtype, children: Vec<Element>) -> Element {
    let mut container = element(ElementType::Container, subtype, PRESET_CONTAINER);
    let parent_id = container.id.clone();
    container.elements = children
        .into_iter()
        .map(|mut child| {
            child.parent_id = Some(parent_id.clone());
            child
        })
        .collect();
    container
}

pub fn image(source: ImageSource) -> Element {
    let mut image = element(ElementType::Image, ElementSubtype::Image, PRESET_IMAGE);
    image.image = Some(source);
    image
}

/// A purely decorative element.
pub fn ui_only(subtype: ElementSubtype) -> Element {
    element(ElementType::UiOnly, subtype, PRESET_UI)
}

impl Element {
    /// Anchors the element immediately below `anchor_id` with an automatic gap.
    pub fn below(mut self, anchor_id: &str) -> Self {
        self.relative_position = RelativePosition::below(anchor_id);
        self
    }

    pub fn with_manual_height(mut self, height: u32) -> Self {
        self.dimensions.manual_height = Some(height);
        self
    }

    pub fn with_grid_columns(mut self, columns: u32) -> Self {
        self.dimensions.grid_column_count = columns;
        self.dimensions.min_grid_column_count = self.dimensions.min_grid_column_count.min(columns);
        self
    }

    /// Places the element on a track (`row_index`) at a position (`array_index`).
    pub fn at(mut self, row_index: usize, array_index: usize) -> Self {
        self.row_index = Some(row_index);
        self.array_index = Some(array_index);
        self
    }

    pub fn cell(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }

    pub fn with_first_row_count(mut self, count: usize) -> Self {
        self.elements_in_first_row = Some(count);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_is_sanitized_and_sized() {
        let h = heading("Rust <3 *you*");
        assert_eq!(h.element_type, ElementType::Textbox);
        assert_eq!(h.subtype, ElementSubtype::Heading);
        assert_eq!(h.content.as_deref(), Some(r"Rust &lt;3 \*you\*"));
        assert_eq!(h.dimensions.manual_height, Some(HEADING_HEIGHT));
        assert_eq!(h.relative_position, RelativePosition::default());
    }

    #[test]
    fn container_claims_children() {
        let child = textbox(ElementSubtype::Paragraph, "x");
        let parent = container(ElementSubtype::SectionsContainer, vec![child]);
        assert_eq!(parent.elements.len(), 1);
        assert_eq!(parent.elements[0].parent_id.as_deref(), Some(parent.id.as_str()));
        assert!(parent.parent_id.is_none());
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }

    #[test]
    fn grid_columns_keep_minimum_consistent() {
        let narrow = textbox(ElementSubtype::Paragraph, "x").with_grid_columns(1);
        assert_eq!(narrow.dimensions.grid_column_count, 1);
        assert_eq!(narrow.dimensions.min_grid_column_count, 1);
    }
}
