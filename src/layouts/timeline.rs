use super::builder::{container, heading, textbox, ui_only};
use super::LayoutGrid;
use crate::models::element::{Element, ElementSubtype};
use crate::models::slide::TimelineEvent;
use crate::sanitize::process_content;

/// Tracks inside the timeline container: events alternate between top and bottom,
/// the connecting line runs along the middle.
pub const TOP_TRACK: usize = 0;
pub const LINE_TRACK: usize = 1;
pub const BOTTOM_TRACK: usize = 2;

const TIMELINE_HEIGHT: u32 = 420;

/// Even events sit on the bottom track, odd ones on the top track.
pub fn track_for(index: usize) -> usize {
    if index % 2 == 0 {
        BOTTOM_TRACK
    } else {
        TOP_TRACK
    }
}

/// Position of the decorative line among the events: `floor(n/2) - 1`.
///
/// Fewer than two events leave no room for a line.
pub fn line_position(event_count: usize) -> Option<usize> {
    (event_count / 2).checked_sub(1)
}

fn event_element(index: usize, event: &TimelineEvent) -> Element {
    let title = textbox(
        ElementSubtype::Heading,
        format!("## {}", process_content(&event.title, false)),
    )
    .at(0, 0);
    let description =
        textbox(ElementSubtype::Paragraph, process_content(&event.description, true)).at(1, 0);

    let mut event_container = container(ElementSubtype::TimelineEvent, vec![title, description])
        .at(track_for(index), index);
    if !event.time.is_empty() {
        event_container = event_container.with_content(process_content(&event.time, false));
    }
    event_container
}

/// Title row, then a timeline container zigzagging the events around a centre line.
pub fn build(title: &str, events: &[TimelineEvent]) -> LayoutGrid {
    let title_element = heading(title);
    let title_id = title_element.id.clone();

    let line_at = line_position(events.len());
    let mut children = Vec::with_capacity(events.len() + 1);
    for (index, event) in events.iter().enumerate() {
        if line_at == Some(index) {
            children.push(ui_only(ElementSubtype::TimelineLine).at(LINE_TRACK, index));
        }
        children.push(event_element(index, event));
    }

    let timeline = container(ElementSubtype::TimelineContainer, children)
        .with_manual_height(TIMELINE_HEIGHT)
        .below(&title_id);

    LayoutGrid {
        title_id,
        rows: vec![vec![title_element], vec![timeline]],
    }
}
