/// Output formatter for analysis results
///
/// This module handles formatting and exporting frequency tables and section
/// reports, including console output, JSON, and CSV.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::core::analyzer::{Feature, OutputTable, SectionReport};
use crate::core::key_map::KeyMap;
use crate::core::table::{Table, TableValue};

/// Widest column used for the quoted keys
const MAX_KEY_COLUMN: usize = 12;

fn key_column_width(longest_key: usize) -> usize {
    (longest_key + 2).min(MAX_KEY_COLUMN)
}

/// Format a table as `'key': value` lines, keys right-aligned
///
/// # Arguments
///
/// * `table` - Table to format, printed in its current order
/// * `strip` - Skip entries whose value is zero
pub fn format_table<V: TableValue>(table: &Table<V>, strip: bool) -> String {
    let width = key_column_width(table.longest_key());
    let mut output = String::new();

    for (key, value) in table.iter() {
        if strip && value.is_zero() {
            continue;
        }
        let quoted = format!("'{}'", key);
        output.push_str(&format!("{:>width$}: {}\n", quoted, value, width = width));
    }

    output
}

pub fn format_output(table: &OutputTable, strip: bool) -> String {
    match table {
        OutputTable::Counts(table) => format_table(table, strip),
        OutputTable::Scaled(table) => format_table(table, strip),
    }
}

/// Format a key map as `'X': Y` lines in observed-letter order
pub fn format_key_map(key_map: &KeyMap) -> String {
    let width = key_column_width(1);
    key_map
        .iter()
        .map(|(from, to)| format!("{:>width$}: {}\n", format!("'{}'", from), to, width = width))
        .collect()
}

/// Console output for one section
///
/// # Arguments
///
/// * `report` - Section to render
/// * `total_sections` - Number of sections in the run; a header is added when above 1
/// * `show_table` - Include the frequency listing (off when the table was saved instead)
/// * `show_length` - Include the sample length line
pub fn render_section(
    report: &SectionReport,
    total_sections: usize,
    show_table: bool,
    show_length: bool,
) -> String {
    let mut output = String::new();

    if total_sections > 1 {
        output.push_str(&format!(
            "\n{}\n",
            format!("section {}/{}:", report.index + 1, total_sections).bold()
        ));
    }

    if show_table {
        output.push_str(&format_output(&report.output, false));
    }

    if show_length {
        output.push_str(&format!("{}\n", report.sample_length()));
    }

    match &report.correlation {
        Feature::Value(score) => {
            output.push_str(&format!("{} {}\n", "correlation value is:".green(), score));
        }
        Feature::NotApplicable => {
            output.push_str(&format!("{} {}\n", "correlation value is:".green(), "n/a".yellow()));
        }
        Feature::Off => {}
    }

    if let Feature::Value(key_map) = &report.key_map {
        output.push_str(&format!("{}\n", "auto mapping:".cyan()));
        output.push_str(&format_key_map(key_map));
        output.push_str(&format!("{}\n{}\n", "mapping as key:".cyan(), key_map.as_key()));
    }

    output
}

/// Export a table to a JSON object, entries in table order, 4-space indent
///
/// # Arguments
///
/// * `table` - Table to write
/// * `output_path` - Path where the JSON file will be written
pub fn export_table_json<V: TableValue>(table: &Table<V>, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create JSON output file: {}", output_path.display()))?;

    let mut serializer = Serializer::with_formatter(file, PrettyFormatter::with_indent(b"    "));
    table
        .serialize(&mut serializer)
        .context("Failed to write JSON data")?;

    Ok(())
}

/// Export a table to CSV with a `Symbol,Frequency` header
pub fn export_table_csv<V: TableValue>(table: &Table<V>, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create CSV output file: {}", output_path.display()))?;

    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(["Symbol", "Frequency"])
        .context("Failed to write CSV header")?;

    for (key, value) in table.iter() {
        writer
            .write_record([key, value.to_string().as_str()])
            .context("Failed to write CSV record")?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

pub fn export_output_json(table: &OutputTable, output_path: &Path) -> Result<()> {
    match table {
        OutputTable::Counts(table) => export_table_json(table, output_path),
        OutputTable::Scaled(table) => export_table_json(table, output_path),
    }
}

pub fn export_output_csv(table: &OutputTable, output_path: &Path) -> Result<()> {
    match table {
        OutputTable::Counts(table) => export_table_csv(table, output_path),
        OutputTable::Scaled(table) => export_table_csv(table, output_path),
    }
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{}", format!("[ERROR]: {}", message).red());
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    eprintln!("{}", format!("[WARNING]: {}", message).yellow());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extractor::{ExtractorConfig, SymbolMode};
    use crate::core::table::{FrequencyTable, ScaledTable};
    use crate::core::tally::count_symbols;
    use crate::core::transforms::LOG_ZERO_SENTINEL;

    fn sample() -> FrequencyTable {
        let mut table = FrequencyTable::new();
        table.insert("E", 4);
        table.insert("T", 2);
        table.insert("A", 0);
        table
    }

    #[test]
    fn test_format_table_alignment() {
        assert_eq!(format_table(&sample(), false), "'E': 4\n'T': 2\n'A': 0\n");
        assert_eq!(format_table(&sample(), true), "'E': 4\n'T': 2\n");
    }

    #[test]
    fn test_format_table_pads_to_longest_key() {
        let mut table = FrequencyTable::new();
        table.insert("THE", 2);
        table.insert("A", 1);
        assert_eq!(format_table(&table, false), "'THE': 2\n  'A': 1\n");
    }

    #[test]
    fn test_format_table_caps_column_width() {
        let mut table = FrequencyTable::new();
        table.insert("EXTRAORDINARILY", 1);
        table.insert("A", 1);
        let output = format_table(&table, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "'EXTRAORDINARILY': 1");
        assert_eq!(lines[1], format!("{:>12}: 1", "'A'"));
    }

    #[test]
    fn test_scaled_values_print_plainly() {
        let mut table = ScaledTable::new();
        table.insert("E", 0.5);
        table.insert("Q", -1.0);
        assert_eq!(format_table(&table, false), "'E': 0.5\n'Q': -1\n");
    }

    #[test]
    fn test_empty_table_formats_to_nothing() {
        assert_eq!(format_table(&FrequencyTable::new(), false), "");
    }

    #[test]
    fn test_export_json_keeps_order_and_indent() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("freq.json");
        export_table_json(&sample(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n    \"E\": 4,\n    \"T\": 2,\n    \"A\": 0\n}");
    }

    #[test]
    fn test_export_csv() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("freq.csv");
        export_table_csv(&sample(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Symbol,Frequency\nE,4\nT,2\nA,0\n");
    }

    #[test]
    fn test_export_json_writes_log_zero_as_integer() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("log.json");
        let mut table = ScaledTable::new();
        table.insert("E", 2.0);
        table.insert("Q", LOG_ZERO_SENTINEL);
        export_table_json(&table, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n    \"E\": 2.0,\n    \"Q\": -1\n}");
    }

    fn cipher_key_map() -> KeyMap {
        let config = ExtractorConfig {
            ignore_case: true,
            charset: None,
            mode: SymbolMode::Letters,
        };
        KeyMap::from_table(&count_symbols("XXXXQQQJJ", &config)).expect("letter table")
    }

    fn section(index: usize, correlation: Feature<f64>, key_map: Feature<KeyMap>) -> SectionReport {
        SectionReport {
            index,
            frequencies: sample(),
            output: OutputTable::Counts(sample()),
            correlation,
            key_map,
        }
    }

    #[test]
    fn test_render_section_header_and_correlation() {
        colored::control::set_override(false);

        let report = section(0, Feature::Value(0.5), Feature::Off);
        assert_eq!(
            render_section(&report, 2, false, false),
            "\nsection 1/2:\ncorrelation value is: 0.5\n"
        );

        let report = section(1, Feature::NotApplicable, Feature::Off);
        assert_eq!(
            render_section(&report, 2, true, true),
            "\nsection 2/2:\n'E': 4\n'T': 2\n'A': 0\n6\ncorrelation value is: n/a\n"
        );
    }

    #[test]
    fn test_render_section_key_map() {
        colored::control::set_override(false);

        let key_map = cipher_key_map();
        let report = section(0, Feature::Off, Feature::Value(key_map.clone()));
        let rendered = render_section(&report, 1, false, false);

        let expected = format!(
            "auto mapping:\n{}mapping as key:\n{}\n",
            format_key_map(&key_map),
            key_map.as_key()
        );
        assert_eq!(rendered, expected);

        // listing runs in A-Z order of the observed letters
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 1 + 26 + 2);
        assert_eq!(lines[0], "auto mapping:");
        assert!(lines[1].starts_with("'A': "));
        assert!(lines.contains(&"'X': E"));
        assert!(lines.contains(&"'Q': T"));
        assert!(lines.contains(&"'J': A"));
        assert_eq!(lines[27], "mapping as key:");
        assert_eq!(lines[28], key_map.as_key());
        assert_eq!(key_map.as_key().len(), 26);
    }

    #[test]
    fn test_render_section_not_applicable_key_map_prints_nothing() {
        colored::control::set_override(false);

        let report = section(0, Feature::Off, Feature::NotApplicable);
        assert_eq!(render_section(&report, 1, false, false), "");
    }
}
