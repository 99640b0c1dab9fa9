//! Body parsing for declared content types

use cityfeed_common::types::DataType;
use cityfeed_common::{FeedError, Result};

/// A parsed response body, as stored in the response cache
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    /// Full JSON document
    Json(serde_json::Value),
    /// Ordered rows of fields
    Csv(Vec<Vec<String>>),
}

impl ParsedBody {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ParsedBody::Json(value) => Some(value),
            ParsedBody::Csv(_) => None,
        }
    }

    pub fn as_csv(&self) -> Option<&[Vec<String>]> {
        match self {
            ParsedBody::Json(_) => None,
            ParsedBody::Csv(rows) => Some(rows),
        }
    }
}

/// Parse a raw body according to its declared type.
///
/// Malformed input yields `FeedError::Parse`; an empty body yields an
/// empty value for either type.
pub fn parse_body(body: &str, data_type: DataType) -> Result<ParsedBody> {
    match data_type {
        DataType::Json => parse_json(body),
        DataType::Csv => parse_csv(body),
    }
}

fn parse_json(body: &str) -> Result<ParsedBody> {
    if body.trim().is_empty() {
        return Ok(ParsedBody::Json(serde_json::Value::Null));
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FeedError::Parse(e.to_string()))?;

    Ok(ParsedBody::Json(value))
}

fn parse_csv(body: &str) -> Result<ParsedBody> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| FeedError::Parse(e.to_string()))?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }

    Ok(ParsedBody::Csv(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_document() {
        let body = r#"{"success": true, "result": {"records": []}}"#;
        let parsed = parse_body(body, DataType::Json).unwrap();
        let value = parsed.as_json().unwrap();
        assert_eq!(value["success"], true);
    }

    #[test]
    fn test_malformed_json_is_parse_failure() {
        let result = parse_body("{not json", DataType::Json);
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_empty_body_yields_empty_value() {
        let parsed = parse_body("", DataType::Json).unwrap();
        assert_eq!(parsed.as_json(), Some(&serde_json::Value::Null));

        let parsed = parse_body("", DataType::Csv).unwrap();
        assert_eq!(parsed.as_csv(), Some(&[][..]));
    }

    #[test]
    fn test_parse_csv_rows() {
        let body = "name,value\r\nTemperature,21.4\r\nHumidity,40\r\n";
        let parsed = parse_body(body, DataType::Csv).unwrap();
        let rows = parsed.as_csv().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["name", "value"]);
        assert_eq!(rows[2], vec!["Humidity", "40"]);
    }

    #[test]
    fn test_parse_csv_honors_quoting() {
        let body = "\"name, with comma\",value\r\n\"quoted \"\"inner\"\"\",3\r\n";
        let parsed = parse_body(body, DataType::Csv).unwrap();
        let rows = parsed.as_csv().unwrap();

        assert_eq!(rows[0][0], "name, with comma");
        assert_eq!(rows[1][0], "quoted \"inner\"");
    }

    #[test]
    fn test_parse_csv_uneven_rows() {
        let body = "a,b,c\r\nonly,two\r\n";
        let parsed = parse_body(body, DataType::Csv).unwrap();
        let rows = parsed.as_csv().unwrap();

        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 2);
    }
}
