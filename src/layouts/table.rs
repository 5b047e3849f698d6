use super::builder::{container, heading, textbox, GRID_COLUMNS};
use super::LayoutGrid;
use crate::models::element::{Element, ElementSubtype};
use crate::sanitize::process_content;

/// Pads `row` with empty cells (or cuts it) to exactly `columns` cells.
pub fn normalize_row(row: &[String], columns: usize) -> Vec<String> {
    let mut cells: Vec<String> = row.iter().take(columns).cloned().collect();
    cells.resize(columns, String::new());
    cells
}

fn cell(text: &str, row: usize, column: usize, width: u32) -> Element {
    textbox(ElementSubtype::TableCell, process_content(text, false))
        .with_grid_columns(width)
        .cell(row, column)
}

/// Title row, then a table container: headers on row 0, data from row 1.
pub fn build(title: &str, headers: &[String], rows: &[Vec<String>]) -> LayoutGrid {
    let title_element = heading(title);
    let title_id = title_element.id.clone();

    let columns = headers.len();
    let width = (GRID_COLUMNS / columns.max(1) as u32).max(1);

    let mut cells: Vec<Element> = headers
        .iter()
        .enumerate()
        .map(|(column, header)| cell(header, 0, column, width))
        .collect();
    for (index, row) in rows.iter().enumerate() {
        let padded = normalize_row(row, columns);
        cells.extend(
            padded
                .iter()
                .enumerate()
                .map(|(column, text)| cell(text, index + 1, column, width)),
        );
    }

    let table = container(ElementSubtype::TableContainer, cells)
        .with_first_row_count(columns)
        .below(&title_id);

    LayoutGrid {
        title_id,
        rows: vec![vec![title_element], vec![table]],
    }
}
