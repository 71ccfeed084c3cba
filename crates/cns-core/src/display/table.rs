//! Shared table building blocks
//!
//! Record tables have two columns: a label truncated to [`LABEL_WIDTH`] and a
//! value wrapped at [`VALUE_WIDTH`], which keeps every row inside
//! [`TABLE_WIDTH`] columns.

use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::{ColumnConstraint, ContentArrangement, Table, Width};

pub const LABEL_WIDTH: usize = 16;
pub const VALUE_WIDTH: usize = 57;
pub const TITLE_WIDTH: usize = 76;

/// Cell padding on each side of a bordered column
const PADDING: usize = 1;

/// Borders, padding and both columns of a record table
pub const TABLE_WIDTH: u16 = (LABEL_WIDTH + VALUE_WIDTH + 4 * PADDING + 3) as u16;

/// Cut `text` to at most `width` characters
pub fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Collapse line breaks so a cell stays on one line
pub fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A one-cell bordered table, used for notices and banners
pub fn banner(text: &str) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).add_row(vec![text.to_string()]);
    table.to_string()
}

/// A bordered two-column table titled `<kind> <name>`
pub fn record_table(kind: &str, name: &str, rows: Vec<(String, String)>) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);

    let title_room = TITLE_WIDTH.saturating_sub(kind.chars().count() + 1);
    table.set_header(vec![
        truncate(kind, LABEL_WIDTH),
        truncate(name, title_room),
    ]);

    for (label, value) in rows {
        table.add_row(vec![truncate(&label, LABEL_WIDTH), value]);
    }
    table.set_constraints(vec![fixed(LABEL_WIDTH), fixed(VALUE_WIDTH)]);
    table.to_string()
}

/// Pin a bordered column to `width` characters of content
fn fixed(width: usize) -> ColumnConstraint {
    ColumnConstraint::Absolute(Width::Fixed((width + 2 * PADDING) as u16))
}

/// A borderless table with one line per row, cells cut to `widths`
pub fn borderless(rows: Vec<Vec<String>>, widths: &[usize]) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let cell = single_line(cell);
                match widths.get(i) {
                    Some(width) => truncate(&cell, *width),
                    None => cell,
                }
            })
            .collect();
        table.add_row(cells);
    }
    for column in table.column_iter_mut() {
        column.set_padding((0, 1));
    }

    table
        .to_string()
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
