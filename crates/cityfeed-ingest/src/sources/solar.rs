//! Solar production aggregate transformer
//!
//! The solar feed lists one record per inverter. The slide shows plant
//! totals, so this transformer sums `current` and `daily` across all
//! records and emits the two aggregates scaled from W to kW (floored,
//! not rounded).

use super::as_number;
use cityfeed_common::types::MeasurementRecord;
use cityfeed_common::Translate;
use serde_json::Value;
use tracing::debug;

/// Watts per kilowatt
const AGGREGATE_DIVISOR: f64 = 1000.0;

/// Sum production fields across all records and emit plant totals.
///
/// Accepts either a bare record array or a CKAN `result.records`
/// envelope. A field no record carries produces no aggregate for it;
/// one or two records come out.
pub fn production_records(body: &Value, translator: &dyn Translate) -> Vec<MeasurementRecord> {
    let records = body
        .as_array()
        .or_else(|| body.pointer("/result/records").and_then(Value::as_array));

    let Some(records) = records else {
        debug!("Solar body carries no record array");
        return Vec::new();
    };

    let mut output = Vec::new();

    for (field, name_key, unit_key) in [
        ("current", "field.solar_current", "unit.solar_current"),
        ("daily", "field.solar_today", "unit.solar_today"),
    ] {
        let values: Vec<f64> = records
            .iter()
            .filter_map(|record| record.get(field).and_then(as_number))
            .collect();

        if values.is_empty() {
            debug!(field = %field, "No record carries this field, skipping aggregate");
            continue;
        }

        let total = values.iter().sum::<f64>();

        output.push(
            MeasurementRecord::new(
                translator.translate(name_key),
                translator.translate(unit_key),
                (total / AGGREGATE_DIVISOR).floor(),
            )
            .with_location(translator.translate("location.solar_park")),
        );
    }

    output
}
