use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;

/// The five slide layouts the presentation service knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LayoutKind {
    #[serde(rename = "TITLE_AND_BODY_LAYOUT")]
    TitleAndBody,
    #[serde(rename = "IMAGE_ONLY_LAYOUT")]
    ImageOnly,
    #[serde(rename = "TEXT_SECTIONS_AND_CONCLUSION_LAYOUT")]
    TextSectionsAndConclusion,
    #[serde(rename = "TITLE_AND_TIMELINE_LAYOUT")]
    TitleAndTimeline,
    #[serde(rename = "TITLE_AND_TABLE_LAYOUT")]
    TitleAndTable,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 5] = [
        LayoutKind::TitleAndBody,
        LayoutKind::ImageOnly,
        LayoutKind::TextSectionsAndConclusion,
        LayoutKind::TitleAndTimeline,
        LayoutKind::TitleAndTable,
    ];

    /// The wire tag, e.g. `TITLE_AND_BODY_LAYOUT`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::TitleAndBody => "TITLE_AND_BODY_LAYOUT",
            LayoutKind::ImageOnly => "IMAGE_ONLY_LAYOUT",
            LayoutKind::TextSectionsAndConclusion => "TEXT_SECTIONS_AND_CONCLUSION_LAYOUT",
            LayoutKind::TitleAndTimeline => "TITLE_AND_TIMELINE_LAYOUT",
            LayoutKind::TitleAndTable => "TITLE_AND_TABLE_LAYOUT",
        }
    }

    /// Parses a layout tag, with or without the `_LAYOUT` suffix.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized = tag.trim().to_ascii_uppercase();
        let bare = normalized.strip_suffix("_LAYOUT").unwrap_or(normalized.as_str());
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().strip_suffix("_LAYOUT") == Some(bare))
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns any JSON value into plain text; the model does not always quote numbers
/// and sometimes sends a list of lines where a single string is expected.
fn plain_text(value: JsonValue) -> String {
    match value {
        JsonValue::String(s) => s,
        JsonValue::Null => String::new(),
        JsonValue::Array(items) => items
            .into_iter()
            .map(plain_text)
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(plain_text)
}

fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<JsonValue>::deserialize(deserializer)?;
    Ok(raw.map(plain_text))
}

fn lenient_cells<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<JsonValue>>::deserialize(deserializer)?;
    Ok(raw.map(|cells| cells.into_iter().map(plain_text).collect()))
}

fn lenient_rows<'de, D>(deserializer: D) -> Result<Option<Vec<Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Vec<JsonValue>>>::deserialize(deserializer)?;
    Ok(raw.map(|rows| {
        rows.into_iter()
            .map(|row| row.into_iter().map(plain_text).collect())
            .collect()
    }))
}

/// Payload of a `TITLE_AND_BODY_LAYOUT` slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyContent {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_text")]
    pub body: Option<String>,
}

/// Payload of an `IMAGE_ONLY_LAYOUT` slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_text")]
    pub image_caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    #[serde(deserialize_with = "lenient_text")]
    pub heading: String,
    #[serde(deserialize_with = "lenient_text")]
    pub content: String,
}

/// Payload of a `TEXT_SECTIONS_AND_CONCLUSION_LAYOUT` slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionsContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_text")]
    pub conclusion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEvent {
    #[serde(deserialize_with = "lenient_text")]
    pub time: String,
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
}

/// Payload of a `TITLE_AND_TIMELINE_LAYOUT` slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<TimelineEvent>>,
}

/// Payload of a `TITLE_AND_TABLE_LAYOUT` slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableContent {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_cells"
    )]
    pub headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_rows")]
    pub rows: Option<Vec<Vec<String>>>,
}

/// Layout-specific content; the variant decides the layout.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideContent {
    TitleAndBody(BodyContent),
    ImageOnly(ImageContent),
    TextSectionsAndConclusion(SectionsContent),
    TitleAndTimeline(TimelineContent),
    TitleAndTable(TableContent),
}

impl SlideContent {
    pub fn layout(&self) -> LayoutKind {
        match self {
            SlideContent::TitleAndBody(_) => LayoutKind::TitleAndBody,
            SlideContent::ImageOnly(_) => LayoutKind::ImageOnly,
            SlideContent::TextSectionsAndConclusion(_) => LayoutKind::TextSectionsAndConclusion,
            SlideContent::TitleAndTimeline(_) => LayoutKind::TitleAndTimeline,
            SlideContent::TitleAndTable(_) => LayoutKind::TitleAndTable,
        }
    }

    fn to_json(&self) -> JsonValue {
        let value = match self {
            SlideContent::TitleAndBody(c) => serde_json::to_value(c),
            SlideContent::ImageOnly(c) => serde_json::to_value(c),
            SlideContent::TextSectionsAndConclusion(c) => serde_json::to_value(c),
            SlideContent::TitleAndTimeline(c) => serde_json::to_value(c),
            SlideContent::TitleAndTable(c) => serde_json::to_value(c),
        };
        value.unwrap_or(JsonValue::Null)
    }
}

/// Raised when a descriptor lacks a field its declared layout cannot do without.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{layout} slide is missing `{field}`")]
pub struct MissingContent {
    pub layout: LayoutKind,
    pub field: &'static str,
}

/// One planned slide: a title plus layout-specific content.
///
/// Deserializes from the model's `{"layout", "title", "content"}` objects. A payload
/// that does not fit its layout's shape is kept as an empty payload, which then fails
/// [`SlideDescriptor::validate`] and falls back to a body slide at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSlide", into = "RawSlide")]
pub struct SlideDescriptor {
    pub title: String,
    pub content: SlideContent,
}

impl SlideDescriptor {
    pub fn new(title: impl Into<String>, content: SlideContent) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }

    /// Shorthand for a `TITLE_AND_BODY_LAYOUT` slide.
    pub fn title_and_body(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(
            title,
            SlideContent::TitleAndBody(BodyContent {
                body: Some(body.into()),
            }),
        )
    }

    pub fn layout(&self) -> LayoutKind {
        self.content.layout()
    }

    /// Checks that the fields required by the declared layout are present and non-empty.
    ///
    /// A missing image URL is not an error: image slides render a placeholder instead.
    pub fn validate(&self) -> Result<(), MissingContent> {
        let layout = self.layout();
        let missing = |field: &'static str| -> Result<(), MissingContent> {
            Err(MissingContent { layout, field })
        };
        match &self.content {
            SlideContent::TitleAndBody(_) | SlideContent::ImageOnly(_) => Ok(()),
            SlideContent::TextSectionsAndConclusion(c) => match &c.sections {
                Some(sections) if !sections.is_empty() => Ok(()),
                _ => missing("sections"),
            },
            SlideContent::TitleAndTimeline(c) => match &c.events {
                Some(events) if !events.is_empty() => Ok(()),
                _ => missing("events"),
            },
            SlideContent::TitleAndTable(c) => {
                if c.headers.as_ref().map_or(true, |h| h.is_empty()) {
                    missing("headers")
                } else if c.rows.as_ref().map_or(true, |r| r.is_empty()) {
                    missing("rows")
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Best-effort body text for rendering this slide as a plain body slide.
    pub fn fallback_body(&self) -> String {
        match &self.content {
            SlideContent::TitleAndBody(c) => c.body.clone().unwrap_or_default(),
            SlideContent::ImageOnly(c) => c.image_caption.clone().unwrap_or_default(),
            SlideContent::TextSectionsAndConclusion(c) => {
                let mut parts: Vec<String> = c
                    .sections
                    .iter()
                    .flatten()
                    .map(|s| format!("{}\n{}", s.heading, s.content).trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if let Some(conclusion) = c.conclusion.as_ref().filter(|s| !s.is_empty()) {
                    parts.push(conclusion.clone());
                }
                parts.join("\n\n")
            }
            SlideContent::TitleAndTimeline(c) => c
                .events
                .iter()
                .flatten()
                .map(|e| format!("{} {}: {}", e.time, e.title, e.description))
                .collect::<Vec<_>>()
                .join("\n"),
            SlideContent::TitleAndTable(c) => c
                .rows
                .iter()
                .flatten()
                .map(|row| row.join(" | "))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Returns this descriptor if it validates, else an equivalent body slide.
    pub fn or_fallback(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(missing) => {
                warn!("{}; rendering as {}", missing, LayoutKind::TitleAndBody);
                let body = self.fallback_body();
                Self::title_and_body(self.title, body)
            }
        }
    }
}

/// The loosely typed wire form used for (de)serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSlide {
    #[serde(default, deserialize_with = "lenient_opt_text")]
    layout: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    title: Option<String>,
    #[serde(default)]
    content: JsonValue,
}

fn parse_payload<T: DeserializeOwned + Default>(layout: LayoutKind, content: JsonValue) -> T {
    serde_json::from_value(content).unwrap_or_else(|e| {
        debug!("Content does not match {} shape: {}", layout, e);
        T::default()
    })
}

impl From<RawSlide> for SlideDescriptor {
    fn from(raw: RawSlide) -> Self {
        let tag = raw.layout.unwrap_or_default();
        let layout = LayoutKind::from_tag(&tag).unwrap_or_else(|| {
            warn!(
                "Unknown layout '{}', treating it as {}",
                tag,
                LayoutKind::TitleAndBody
            );
            LayoutKind::TitleAndBody
        });
        let content = match layout {
            LayoutKind::TitleAndBody => {
                SlideContent::TitleAndBody(parse_payload(layout, raw.content))
            }
            LayoutKind::ImageOnly => SlideContent::ImageOnly(parse_payload(layout, raw.content)),
            LayoutKind::TextSectionsAndConclusion => {
                SlideContent::TextSectionsAndConclusion(parse_payload(layout, raw.content))
            }
            LayoutKind::TitleAndTimeline => {
                SlideContent::TitleAndTimeline(parse_payload(layout, raw.content))
            }
            LayoutKind::TitleAndTable => {
                SlideContent::TitleAndTable(parse_payload(layout, raw.content))
            }
        };
        Self {
            title: raw.title.unwrap_or_default(),
            content,
        }
    }
}

impl From<SlideDescriptor> for RawSlide {
    fn from(slide: SlideDescriptor) -> Self {
        Self {
            layout: Some(slide.layout().as_str().to_string()),
            content: slide.content.to_json(),
            title: Some(slide.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn layout_tags_parse_with_and_without_suffix() {
        assert_eq!(
            LayoutKind::from_tag("TITLE_AND_TABLE_LAYOUT"),
            Some(LayoutKind::TitleAndTable)
        );
        assert_eq!(
            LayoutKind::from_tag("image_only"),
            Some(LayoutKind::ImageOnly)
        );
        assert_eq!(LayoutKind::from_tag("CAROUSEL"), None);
    }

    #[test]
    fn deserializes_each_layout_payload() {
        let slides: Vec<SlideDescriptor> = serde_json::from_value(json!([
            {"layout": "TITLE_AND_BODY_LAYOUT", "title": "Intro", "content": {"body": "- a\n- b"}},
            {"layout": "IMAGE_ONLY_LAYOUT", "title": "Look", "content": {"imageUrl": "https://x/y.png", "imageCaption": "Y"}},
            {"layout": "TEXT_SECTIONS_AND_CONCLUSION_LAYOUT", "title": "S", "content": {"sections": [{"heading": "H", "content": "C"}], "conclusion": "Done"}},
            {"layout": "TITLE_AND_TIMELINE_LAYOUT", "title": "T", "content": {"events": [{"time": "1", "title": "Start", "description": "Began"}]}},
            {"layout": "TITLE_AND_TABLE_LAYOUT", "title": "Tab", "content": {"headers": ["Year", "Count"], "rows": [[2020, 3], ["2021", null]]}}
        ]))
        .unwrap();

        assert_eq!(slides[0], SlideDescriptor::title_and_body("Intro", "- a\n- b"));
        assert_eq!(slides[1].layout(), LayoutKind::ImageOnly);
        assert_eq!(slides[2].layout(), LayoutKind::TextSectionsAndConclusion);
        assert_eq!(slides[3].layout(), LayoutKind::TitleAndTimeline);
        match &slides[4].content {
            SlideContent::TitleAndTable(table) => {
                assert_eq!(
                    table.rows,
                    Some(vec![
                        vec!["2020".to_string(), "3".to_string()],
                        vec!["2021".to_string(), String::new()],
                    ])
                );
            }
            other => panic!("unexpected content: {other:?}"),
        }
        assert!(slides.iter().all(|s| s.validate().is_ok()));
    }

    #[test]
    fn malformed_payload_is_kept_empty_and_fails_validation() {
        let slide: SlideDescriptor = serde_json::from_value(json!({
            "layout": "TITLE_AND_TIMELINE_LAYOUT",
            "title": "History",
            "content": {"events": "not a list"}
        }))
        .unwrap();

        assert_eq!(
            slide.validate(),
            Err(MissingContent {
                layout: LayoutKind::TitleAndTimeline,
                field: "events"
            })
        );
    }

    #[test]
    fn missing_table_rows_are_reported() {
        let slide = SlideDescriptor::new(
            "Numbers",
            SlideContent::TitleAndTable(TableContent {
                headers: Some(vec!["A".to_string()]),
                rows: Some(vec![]),
            }),
        );
        assert_eq!(slide.validate().unwrap_err().field, "rows");
    }

    #[test]
    fn image_slide_without_url_is_valid() {
        let slide = SlideDescriptor::new("Pic", SlideContent::ImageOnly(ImageContent::default()));
        assert!(slide.validate().is_ok());
    }

    #[test]
    fn fallback_keeps_title_and_body_like_text() {
        let slide = SlideDescriptor::new(
            "Plan",
            SlideContent::TextSectionsAndConclusion(SectionsContent {
                sections: None,
                conclusion: Some("Ship it".to_string()),
            }),
        )
        .or_fallback();
        assert_eq!(slide, SlideDescriptor::title_and_body("Plan", "Ship it"));
    }

    #[test]
    fn unknown_layout_becomes_body_slide() {
        let slide: SlideDescriptor = serde_json::from_value(json!({
            "layout": "QUOTE_LAYOUT",
            "title": "Words",
            "content": {"body": "To be"}
        }))
        .unwrap();
        assert_eq!(slide, SlideDescriptor::title_and_body("Words", "To be"));
    }

    #[test]
    fn unquoted_timeline_times_keep_the_timeline() {
        let slide: SlideDescriptor = serde_json::from_value(json!({
            "layout": "TITLE_AND_TIMELINE_LAYOUT",
            "title": "Steps",
            "content": {"events": [
                {"time": 1, "title": "Plan", "description": "Scope it"},
                {"time": 2, "title": "Build", "description": 42}
            ]}
        }))
        .unwrap();

        assert_eq!(slide.layout(), LayoutKind::TitleAndTimeline);
        match &slide.content {
            SlideContent::TitleAndTimeline(timeline) => {
                let events = timeline.events.as_ref().unwrap();
                assert_eq!(events[0].time, "1");
                assert_eq!(events[1].time, "2");
                assert_eq!(events[1].description, "42");
            }
            other => panic!("unexpected content: {other:?}"),
        }
        assert!(slide.validate().is_ok());
    }

    #[test]
    fn list_body_and_sections_are_joined_into_text() {
        let slides: Vec<SlideDescriptor> = serde_json::from_value(json!([
            {"layout": "TITLE_AND_BODY", "title": "Bullets", "content": {"body": ["- one", "- two"]}},
            {"layout": "TEXT_SECTIONS_AND_CONCLUSION", "title": "S", "content": {
                "sections": [{"heading": 2024, "content": ["a", "b"]}],
                "conclusion": null
            }}
        ]))
        .unwrap();

        assert_eq!(slides[0], SlideDescriptor::title_and_body("Bullets", "- one\n- two"));
        match &slides[1].content {
            SlideContent::TextSectionsAndConclusion(c) => {
                assert_eq!(
                    c.sections,
                    Some(vec![Section {
                        heading: "2024".to_string(),
                        content: "a\nb".to_string(),
                    }])
                );
                assert_eq!(c.conclusion, None);
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn slide_without_layout_becomes_body_slide() {
        let slides: Vec<SlideDescriptor> = serde_json::from_value(json!([
            {"title": "Loose", "content": {"body": "No tag"}},
            {"layout": "TITLE_AND_BODY_LAYOUT", "title": "Tagged", "content": {"body": "Fine"}}
        ]))
        .unwrap();

        assert_eq!(slides[0], SlideDescriptor::title_and_body("Loose", "No tag"));
        assert_eq!(slides[1], SlideDescriptor::title_and_body("Tagged", "Fine"));
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let slide = SlideDescriptor::title_and_body("Intro", "Hello");
        assert_eq!(
            serde_json::to_value(&slide).unwrap(),
            json!({"layout": "TITLE_AND_BODY_LAYOUT", "title": "Intro", "content": {"body": "Hello"}})
        );
    }
}
