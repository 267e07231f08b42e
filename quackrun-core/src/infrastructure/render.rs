// quackrun-core/src/infrastructure/render.rs

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::domain::result_set::{CellValue, ResultSet};

/// Render a result set as a text table with a row-count footer.
///
/// No wrapping and no truncation: every value is printed in full.
pub fn render_table(rs: &ResultSet) -> String {
    if rs.column_count() == 0 {
        return "(no columns)".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(rs.columns.iter().map(Cell::new));

    for row in &rs.rows {
        table.add_row(row.iter().map(to_table_cell));
    }

    let noun = if rs.row_count() == 1 { "row" } else { "rows" };
    format!("{}\n({} {})", table, rs.row_count(), noun)
}

/// Render the first cell of a result set, optionally prefixed by a label.
pub fn render_scalar(label: Option<&str>, rs: &ResultSet) -> String {
    let value = rs.scalar().cloned().unwrap_or(CellValue::Null);
    match label {
        Some(label) => format!("{} {}", label, value),
        None => value.to_string(),
    }
}

fn to_table_cell(value: &CellValue) -> Cell {
    let cell = Cell::new(value.to_string());
    if value.is_numeric() {
        cell.set_alignment(CellAlignment::Right)
    } else {
        cell
    }
}
