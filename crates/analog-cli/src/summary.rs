//! Run summary printed after a successful cross-reference.

use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use analog_xref::XrefReport;

/// Prints which config file supplied job values.
pub fn print_config_source(path: &Path) {
    println!("{}", config_source_line(path));
}

fn config_source_line(path: &Path) -> String {
    format!("Using config file: {}", path.display())
}

pub fn print_summary(report: &XrefReport) {
    println!("Output: {}", report.output.display());
    println!("{}", summary_table(report));
}

/// Builds the two-column count table.
pub fn summary_table(report: &XrefReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Step"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    let stats = &report.join;
    table.add_row(vec![
        Cell::new("Dump keys indexed"),
        Cell::new(report.indexed_keys),
    ]);
    table.add_row(vec![
        Cell::new("Duplicate keys overwritten"),
        count_cell(report.overwritten_keys, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Assessment rows"), Cell::new(stats.rows)]);
    table.add_row(vec![
        Cell::new("Already populated"),
        dim_cell(stats.already_populated),
    ]);
    table.add_row(vec![
        Cell::new("Filled from dump")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(stats.filled, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("No match in dump"),
        count_cell(stats.unmatched, Color::Yellow),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analog_xref::JoinStats;
    use std::path::PathBuf;

    #[test]
    fn test_summary_table_rows() {
        let report = XrefReport {
            output: PathBuf::from("out.csv"),
            indexed_keys: 2,
            overwritten_keys: 0,
            join: JoinStats {
                rows: 3,
                already_populated: 1,
                filled: 1,
                unmatched: 1,
            },
        };
        let mut table = summary_table(&report);
        table.force_no_tty();
        let rendered = table.to_string();
        assert!(rendered.contains("Dump keys indexed"));
        assert!(rendered.contains("Filled from dump"));
        assert!(rendered.contains("No match in dump"));
    }

    #[test]
    fn test_config_source_line() {
        assert_eq!(
            config_source_line(Path::new("/home/me/.analog.toml")),
            "Using config file: /home/me/.analog.toml"
        );
    }
}
