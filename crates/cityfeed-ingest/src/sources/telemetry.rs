//! Fixed-sensor telemetry transformer
//!
//! The telemetry endpoint returns one flat JSON object per physical
//! sensor, with readings under `sensor_<field>_value` keys and a shared
//! `sensor_ts` timestamp. Sensors are queried independently, one fetch
//! each; this transformer handles a single response object.

use super::{as_number, timestamp_of};
use cityfeed_common::types::MeasurementRecord;
use cityfeed_common::Translate;
use serde_json::Value;
use tracing::debug;

/// Fields the telemetry endpoint can carry, in emission order
pub const SENSOR_FIELDS: &[&str] = &["water_temperature", "wind_speed", "rain", "pressure"];

/// Pressure arrives in Pascal-hundredths; scale to hPa
const PRESSURE_SCALE: f64 = 0.01;

/// Extract the requested fields from one sensor response object.
///
/// Each emitted record carries the response's own `sensor_ts` when
/// present, else no timestamp. Unknown or missing fields are simply
/// absent from the output.
pub fn sensor_records(
    body: &Value,
    fields: &[String],
    translator: &dyn Translate,
) -> Vec<MeasurementRecord> {
    let timestamp = timestamp_of(body, "sensor_ts");
    let mut output = Vec::new();

    for field in fields {
        let key = format!("sensor_{}_value", field);

        let Some(raw) = body.get(&key).and_then(as_number) else {
            debug!(field = %field, "Telemetry field absent, skipping");
            continue;
        };

        let value = if field == "pressure" {
            raw * PRESSURE_SCALE
        } else {
            raw
        };

        let mut measurement = MeasurementRecord::new(
            translator.translate(&format!("field.{}", field)),
            translator.translate(&format!("unit.{}", field)),
            value,
        )
        .with_location(translator.translate("location.harbor"));
        measurement.timestamp = timestamp.clone();

        output.push(measurement);
    }

    output
}
