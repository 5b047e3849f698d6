// src/models/element.rs

use serde::{Deserialize, Serialize};

use crate::models::slide::LayoutKind;

/// Top-level kind of an element in a slide variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Textbox,
    Container,
    Image,
    /// Decorative element with no user content.
    UiOnly,
}

/// Finer-grained role of an element within its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementSubtype {
    Heading,
    Mixed,
    Paragraph,
    ImageContainer,
    Image,
    SectionsContainer,
    Section,
    Conclusion,
    TimelineContainer,
    TimelineEvent,
    TimelineLine,
    TableContainer,
    TableCell,
}

/// Distance to the anchor element. The service only accepts automatic gaps from us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delta {
    Auto,
}

/// A reference to the sibling an element is positioned against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub element_id: String,
    pub delta: Delta,
}

/// Relative placement of an element. `None` on both axes means default flow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelativePosition {
    pub top: Option<Anchor>,
    pub left: Option<Anchor>,
}

impl RelativePosition {
    /// Immediately below `element_id` with an automatic gap.
    pub fn below(element_id: &str) -> Self {
        Self {
            top: Some(Anchor {
                element_id: element_id.to_string(),
                delta: Delta::Auto,
            }),
            left: None,
        }
    }
}

/// Sizing hints on the service's 24-column grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width_fraction: Option<f64>,
    pub min_height: String,
    pub manual_height: Option<u32>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub padding_horizontal: String,
    pub padding_vertical: String,
    pub should_recalculate: bool,
    pub min_grid_column_count: u32,
    pub grid_column_count: u32,
    pub horizontal_alignment: Option<String>,
    pub vertical_alignment: Option<String>,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width_fraction: None,
            min_height: "auto".to_string(),
            manual_height: None,
            height: None,
            width: None,
            padding_horizontal: "auto".to_string(),
            padding_vertical: "auto".to_string(),
            should_recalculate: false,
            min_grid_column_count: 2,
            grid_column_count: 24,
            horizontal_alignment: None,
            vertical_alignment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Background {
    pub fill: Option<String>,
    pub outline: Option<String>,
}

/// Whether an image element shows a real picture or the service's placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSourceKind {
    UserProvided,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub kind: ImageSourceKind,
    pub url: Option<String>,
    pub mime_type: String,
}

/// A node in a slide variant's element tree.
///
/// Containers own their children through `elements`; a child points back at its
/// container through `parent_id` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub subtype: ElementSubtype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub array_index: Option<usize>,
    pub row_index: Option<usize>,
    pub relative_position: RelativePosition,
    pub dimensions: Dimensions,
    pub preset_type: String,
    pub content: Option<String>,
    pub prose_mirror_content: Option<serde_json::Value>,
    pub background: Background,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSource>,
    /// Table cell coordinates; row 0 holds the headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// How many children a container shows side by side before wrapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements_in_first_row: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,
}

/// The element grid submitted to the service as a new variant of a slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSlideVariant {
    #[serde(rename = "type")]
    pub layout: LayoutKind,
    /// Row-major: each inner vector is one visual row.
    pub elements: Vec<Vec<Element>>,
}
