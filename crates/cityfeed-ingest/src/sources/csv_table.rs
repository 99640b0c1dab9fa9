//! Generic CSV table transformer
//!
//! For custom-URL slides declaring `csv`. The first row is a header;
//! `name` and `value` columns are required (case-insensitive), `unit`,
//! `location`, and `timestamp`/`time` are picked up when present. Rows
//! without a usable name or numeric value are skipped.

use cityfeed_common::types::MeasurementRecord;
use serde_json::Value;
use tracing::debug;

/// Column indices resolved from the header row
struct Columns {
    name: usize,
    value: usize,
    unit: Option<usize>,
    location: Option<usize>,
    timestamp: Option<usize>,
}

fn resolve_columns(header: &[String]) -> Option<Columns> {
    let find = |wanted: &[&str]| {
        header
            .iter()
            .position(|column| wanted.contains(&column.trim().to_lowercase().as_str()))
    };

    Some(Columns {
        name: find(&["name"])?,
        value: find(&["value"])?,
        unit: find(&["unit"]),
        location: find(&["location"]),
        timestamp: find(&["timestamp", "time"]),
    })
}

/// Map CSV rows to measurement records via the header row
pub fn table_records(rows: &[Vec<String>]) -> Vec<MeasurementRecord> {
    let Some((header, data_rows)) = rows.split_first() else {
        return Vec::new();
    };

    let Some(columns) = resolve_columns(header) else {
        debug!("CSV header lacks name/value columns");
        return Vec::new();
    };

    let cell = |row: &[String], index: usize| row.get(index).map(|c| c.trim().to_string());

    let mut output = Vec::new();

    for row in data_rows {
        let Some(name) = cell(row, columns.name).filter(|n| !n.is_empty()) else {
            debug!("CSV row has no name, skipping");
            continue;
        };

        let Some(value) = cell(row, columns.value).and_then(|v| v.parse::<f64>().ok()) else {
            debug!(name = %name, "CSV row has no numeric value, skipping");
            continue;
        };

        let unit = columns
            .unit
            .and_then(|index| cell(row, index))
            .unwrap_or_default();

        let mut measurement = MeasurementRecord::new(name, unit, value);
        measurement.location = columns
            .location
            .and_then(|index| cell(row, index))
            .filter(|l| !l.is_empty());
        measurement.timestamp = columns
            .timestamp
            .and_then(|index| cell(row, index))
            .filter(|t| !t.is_empty())
            .map(Value::String);

        output.push(measurement);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_maps_header_columns() {
        let input = rows(&[
            &["Name", "Unit", "Value", "Timestamp"],
            &["Temperature", "°C", "21.4", "2026-08-07T09:00:00Z"],
        ]);

        let records = table_records(&input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Temperature");
        assert_eq!(records[0].unit, "°C");
        assert_eq!(records[0].value, 21.4);
        assert_eq!(
            records[0].timestamp,
            Some(Value::String("2026-08-07T09:00:00Z".to_string()))
        );
    }

    #[test]
    fn test_skips_unusable_rows() {
        let input = rows(&[
            &["name", "value"],
            &["", "1.0"],
            &["NoValue", "n/a"],
            &["Ok", "2.5"],
        ]);

        let records = table_records(&input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ok");
        assert_eq!(records[0].value, 2.5);
    }

    #[test]
    fn test_missing_unit_column_yields_empty_unit() {
        let input = rows(&[&["name", "value"], &["Visitors", "134"]]);

        let records = table_records(&input);
        assert_eq!(records[0].unit, "");
        assert_eq!(records[0].location, None);
    }

    #[test]
    fn test_header_without_required_columns_yields_empty() {
        let input = rows(&[&["a", "b"], &["1", "2"]]);
        assert!(table_records(&input).is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty() {
        assert!(table_records(&[]).is_empty());
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let input = rows(&[
            &["name", "unit", "value"],
            &["OnlyName"],
            &["Full", "mm", "3"],
        ]);

        let records = table_records(&input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Full");
    }
}
