use super::builder::{heading, textbox, BODY_HEIGHT};
use super::LayoutGrid;
use crate::models::element::ElementSubtype;
use crate::sanitize::process_content;

/// Title row, then one body textbox. The body keeps its markdown so bullets render.
pub fn build(title: &str, body: &str) -> LayoutGrid {
    let title_element = heading(title);
    let title_id = title_element.id.clone();

    let body_element = textbox(ElementSubtype::Mixed, process_content(body, true))
        .with_manual_height(BODY_HEIGHT)
        .below(&title_id);

    LayoutGrid {
        title_id,
        rows: vec![vec![title_element], vec![body_element]],
    }
}
