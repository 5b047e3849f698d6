use super::builder::{container, heading, textbox, GRID_COLUMNS};
use super::LayoutGrid;
use crate::models::element::ElementSubtype;
use crate::models::slide::Section;
use crate::sanitize::process_content;

/// At most this many sections sit side by side before the container wraps.
const MAX_SECTIONS_PER_ROW: usize = 3;
const CONCLUSION_HEIGHT: u32 = 80;

/// `N. Heading` on the first line, the section body below it.
fn section_text(index: usize, section: &Section) -> String {
    format!(
        "{}. {}\n{}",
        index + 1,
        process_content(&section.heading, false),
        process_content(&section.content, true)
    )
}

/// Title row, a sections container, then the conclusion.
pub fn build(title: &str, sections: &[Section], conclusion: &str) -> LayoutGrid {
    let title_element = heading(title);
    let title_id = title_element.id.clone();

    let per_row = sections.len().clamp(1, MAX_SECTIONS_PER_ROW);
    let columns = GRID_COLUMNS / per_row as u32;

    let section_elements = sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            textbox(ElementSubtype::Section, section_text(index, section))
                .with_grid_columns(columns)
                .at(index / per_row, index % per_row)
        })
        .collect();

    let sections_container = container(ElementSubtype::SectionsContainer, section_elements)
        .with_first_row_count(sections.len().min(MAX_SECTIONS_PER_ROW))
        .below(&title_id);

    let conclusion_element = textbox(ElementSubtype::Conclusion, process_content(conclusion, true))
        .with_manual_height(CONCLUSION_HEIGHT)
        .below(&title_id);

    LayoutGrid {
        title_id,
        rows: vec![
            vec![title_element],
            vec![sections_container],
            vec![conclusion_element],
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(n: usize) -> Vec<Section> {
        (1..=n)
            .map(|i| Section {
                heading: format!("Part_{i}"),
                content: format!("Body **{i}**"),
            })
            .collect()
    }

    #[test]
    fn numbers_sections_and_limits_first_row() {
        let grid = build("Overview", &sections(4), "All done");
        assert_eq!(grid.rows.len(), 3);

        let holder = &grid.rows[1][0];
        assert_eq!(holder.subtype, ElementSubtype::SectionsContainer);
        assert_eq!(holder.elements_in_first_row, Some(3));
        assert_eq!(holder.elements.len(), 4);
        assert_eq!(
            holder.elements[0].content.as_deref(),
            Some("1. Part\\_1\nBody **1**")
        );
        assert_eq!(holder.elements[3].row_index, Some(1));
        assert_eq!(holder.elements[3].array_index, Some(0));
        assert_eq!(holder.elements[0].dimensions.grid_column_count, 8);

        let conclusion = &grid.rows[2][0];
        assert_eq!(conclusion.subtype, ElementSubtype::Conclusion);
        assert_eq!(conclusion.content.as_deref(), Some("All done"));
        assert_eq!(
            conclusion.relative_position.top.as_ref().unwrap().element_id,
            grid.title_id
        );
    }

    #[test]
    fn two_sections_share_the_width() {
        let grid = build("Pair", &sections(2), "");
        let holder = &grid.rows[1][0];
        assert_eq!(holder.elements_in_first_row, Some(2));
        assert_eq!(holder.elements[1].dimensions.grid_column_count, 12);
    }
}
