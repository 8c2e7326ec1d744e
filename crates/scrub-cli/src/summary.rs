//! Terminal summary printed after a `clean` run.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use scrub_report::{failure_table, report_table};

use crate::commands::CleanOutcome;

pub fn print_summary(outcome: &CleanOutcome) {
    println!("Input: {}", outcome.input.display());
    match &outcome.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run)"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Domain"),
        header_cell("Records"),
        header_cell("Cleaned"),
        header_cell("Failed"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    let mut totals = scrub_clean::BatchStats::default();
    for column in &outcome.columns {
        totals.absorb(column.stats);
        table.add_row(vec![
            Cell::new(&column.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(column.domain.as_str()),
            Cell::new(column.stats.total),
            Cell::new(column.stats.cleaned).fg(Color::Green),
            count_cell(column.stats.failed, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(totals.total).add_attribute(Attribute::Bold),
        Cell::new(totals.cleaned)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        count_cell(totals.failed, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if outcome.report.total_events > 0 {
        println!();
        println!("Rules:");
        println!("{}", report_table(&outcome.report));
    }
    if !outcome.failures.is_empty() {
        println!();
        println!("Failures:");
        println!("{}", failure_table(&outcome.failures));
    }
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
