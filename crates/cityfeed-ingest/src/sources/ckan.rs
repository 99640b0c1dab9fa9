//! CKAN datastore transformers
//!
//! CKAN datastore-search responses wrap tabular records in a
//! `{ success, result: { records: [...] } }` envelope. Two transformers
//! consume that shape: a fixed-table one for the Dokk1 indoor climate
//! feed, and a generic one for slide-configured CKAN URLs.

use super::{as_number, first_field, timestamp_of};
use cityfeed_common::types::MeasurementRecord;
use cityfeed_common::Translate;
use serde_json::Value;
use tracing::debug;

/// Fixed ordered table of semantic field name → source discriminator.
///
/// Emission order follows this table; a discriminator absent from the
/// input is silently skipped.
pub const CLIMATE_FIELDS: &[(&str, &str)] = &[
    ("temperature", "TCA"),
    ("daylight", "LUM"),
    ("sound", "MCP"),
    ("humidity", "HUMA"),
];

/// Records of the `result.records` envelope, or `None` on schema mismatch
fn envelope_records(body: &Value) -> Option<&Vec<Value>> {
    match body.pointer("/result/records").and_then(Value::as_array) {
        Some(records) => Some(records),
        None => {
            debug!("CKAN envelope missing result.records");
            None
        },
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => s == "true" || s == "1",
        _ => false,
    }
}

/// Dokk1 climate transformer.
///
/// Scans the records for each table entry's discriminator (matching the
/// record's `sensor` or `type` field) and emits one rounded record per
/// found field, in table order. With a selector only that field is
/// attempted. The location label names the physical installation.
pub fn climate_records(
    body: &Value,
    selector: Option<&str>,
    translator: &dyn Translate,
) -> Vec<MeasurementRecord> {
    let Some(records) = envelope_records(body) else {
        return Vec::new();
    };

    let mut output = Vec::new();

    for (field, discriminator) in CLIMATE_FIELDS {
        if selector.is_some_and(|wanted| wanted != *field) {
            continue;
        }

        let matched = records.iter().find(|record| {
            first_field(record, &["sensor", "type"])
                .and_then(Value::as_str)
                .is_some_and(|d| d == *discriminator)
        });

        let Some(record) = matched else {
            debug!(field = %field, discriminator = %discriminator, "Discriminator absent, skipping field");
            continue;
        };

        let Some(value) = first_field(record, &["value", "val"]).and_then(as_number) else {
            debug!(field = %field, "Record has no numeric value, skipping field");
            continue;
        };

        let mut measurement = MeasurementRecord::new(
            translator.translate(&format!("field.{}", field)),
            translator.translate(&format!("unit.{}", field)),
            value.round(),
        )
        .with_location(translator.translate("location.dokk1"));
        measurement.timestamp = timestamp_of(record, "time");

        output.push(measurement);
    }

    output
}

/// Generic CKAN-records transformer for custom-URL slides.
///
/// No discriminator table: every record is emitted using its own `type`
/// field, mapped through translation for name and unit. Returns empty
/// unless the envelope carries a truthy `success` flag and
/// `result.records`.
pub fn generic_records(
    body: &Value,
    location_key: Option<&str>,
    translator: &dyn Translate,
) -> Vec<MeasurementRecord> {
    if !body.get("success").map(truthy).unwrap_or(false) {
        debug!("CKAN envelope missing truthy success flag");
        return Vec::new();
    }

    let Some(records) = envelope_records(body) else {
        return Vec::new();
    };

    let location = location_key.map(|key| translator.translate(key));
    let mut output = Vec::new();

    for record in records {
        let Some(kind) = record.get("type").and_then(Value::as_str) else {
            debug!("CKAN record has no type, skipping");
            continue;
        };

        let Some(value) = first_field(record, &["value", "val"]).and_then(as_number) else {
            debug!(kind = %kind, "CKAN record has no numeric value, skipping");
            continue;
        };

        let mut measurement = MeasurementRecord::new(
            translator.translate(&format!("field.{}", kind)),
            translator.translate(&format!("unit.{}", kind)),
            value.round(),
        );
        measurement.location = location.clone();
        measurement.timestamp = timestamp_of(record, "time");

        output.push(measurement);
    }

    output
}
