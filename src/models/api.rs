use serde::{Deserialize, Serialize};

use crate::models::element::ElementSlideVariant;

/// Theme applied to every presentation we create.
pub const DEFAULT_THEME_ID: &str = "a6bff6e5-3afc-4336-830b-fbc710081012";
pub const DEFAULT_COLOR_SET_ID: u32 = 0;
pub const PRODUCT_TYPE: &str = "PRESENTATION_CREATOR";

/// Body of `POST /create-new-presentation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePresentationRequest {
    pub presentation_id: String,
    pub presentation_title: String,
    pub create_first_slide: bool,
    pub default_color_set_id: u32,
    pub theme_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlideRef {
    pub id: Option<String>,
}

/// Response of `POST /create-new-presentation`. Only the initial slide matters to us.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CreatedPresentation {
    #[serde(default)]
    pub slides: Vec<SlideRef>,
}

impl CreatedPresentation {
    pub fn first_slide_id(&self) -> Option<&str> {
        self.slides.first().and_then(|s| s.id.as_deref())
    }
}

/// Body of `POST /create-new-slide`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSlideRequest {
    pub slide_id: String,
    pub presentation_id: String,
    pub product_type: String,
    pub slide_order: usize,
    pub color_set_id: u32,
}

/// Body of `POST /create-slide-variant-from-element-slide`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateVariantRequest<'a> {
    pub slide_id: &'a str,
    pub element_slide_variant: &'a ElementSlideVariant,
}

/// Response of the variant creation call; the service assigns the id.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CreatedVariant {
    pub id: Option<String>,
}

/// Body of `POST /set-active-variant`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetActiveVariantRequest<'a> {
    pub slide_id: &'a str,
    pub variant_id: &'a str,
}

/// Body of `POST /upsert-presentation-share`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharePresentationRequest<'a> {
    pub presentation_id: &'a str,
    pub public: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSlide {
    pub slide_id: String,
    pub active_variant_id: String,
}

/// What one run has built on the service so far. Lives only as long as the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSession {
    pub bearer_token: String,
    pub presentation_id: String,
    pub slides: Vec<RemoteSlide>,
}

impl RemoteSession {
    pub fn new(bearer_token: impl Into<String>, presentation_id: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            presentation_id: presentation_id.into(),
            slides: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_slide_id_tolerates_missing_entries() {
        let created: CreatedPresentation = serde_json::from_str(r#"{"slides":[]}"#).unwrap();
        assert_eq!(created.first_slide_id(), None);

        let created: CreatedPresentation =
            serde_json::from_str(r#"{"id":"p","slides":[{"id":"s-1"},{"id":"s-2"}]}"#).unwrap();
        assert_eq!(created.first_slide_id(), Some("s-1"));

        let created: CreatedPresentation = serde_json::from_str("{}").unwrap();
        assert_eq!(created.first_slide_id(), None);
    }
}
