//! Terminal rendering of cleaning reports.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::trace::{CleanReport, FieldFailure};

/// Per-field summary table: applied-rule counts and failures.
pub fn report_table(report: &CleanReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Rules applied"),
        header_cell("Applications"),
        header_cell("Failures"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for field in &report.fields {
        let rules: Vec<&str> = field.rules.keys().map(String::as_str).collect();
        table.add_row(vec![
            Cell::new(&field.field)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(rules.join(", ")),
            Cell::new(field.applied()),
            count_cell(field.failures, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.total_events).add_attribute(Attribute::Bold),
        count_cell(report.total_failures, Color::Red).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Failure detail table, one row per failed item.
pub fn failure_table(failures: &[FieldFailure]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for failure in failures {
        table.add_row(vec![
            Cell::new(&failure.field)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&failure.kind).fg(Color::Red),
            Cell::new(&failure.message),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrub_clean::{Cleaner, RuleObserver, TextCleaner};
    use scrub_model::CleanError;

    use crate::trace::RuleTrace;

    #[test]
    fn report_table_has_one_row_per_field_plus_total() {
        let cleaner = TextCleaner::default();
        let mut trace = RuleTrace::new();
        cleaner.clean_observed(" A ", "first", &mut trace).unwrap();
        cleaner.clean_observed(" B ", "second", &mut trace).unwrap();

        let table = report_table(&trace.report());
        let rendered = table.to_string();
        assert!(rendered.contains("first"));
        assert!(rendered.contains("second"));
        assert!(rendered.contains("TOTAL"));
    }

    #[test]
    fn failure_table_lists_kind_and_message() {
        let mut trace = RuleTrace::new();
        trace.item_failed(
            "amount",
            &CleanError::NumberParse { value: "nope".to_string() },
        );
        let rendered = failure_table(trace.failures()).to_string();
        assert!(rendered.contains("amount"));
        assert!(rendered.contains("number_parse"));
    }
}
