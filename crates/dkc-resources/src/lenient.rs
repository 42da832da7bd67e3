//! Tolerant deserializers for fields the API is loose about.
//!
//! Identifiers arrive as strings or numbers, attribute maps mix numbers and
//! strings, and timestamps come as RFC 3339, naive `YYYY-MM-DD HH:MM:SS`
//! or unix seconds depending on the endpoint.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    value_to_string(value).ok_or_else(|| D::Error::custom("expected a string or a number"))
}

pub fn string_vec<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .map(|v| value_to_string(v).ok_or_else(|| D::Error::custom("expected a list of strings")))
        .collect()
}

pub fn string_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<HashMap<String, String>, D::Error> {
    HashMap::<String, Value>::deserialize(deserializer)?
        .into_iter()
        .map(|(k, v)| {
            value_to_string(v)
                .map(|v| (k, v))
                .ok_or_else(|| D::Error::custom("expected scalar map values"))
        })
        .collect()
}

pub fn opt_string_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<HashMap<String, String>>, D::Error> {
    match Option::<HashMap<String, Value>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(map) => map
            .into_iter()
            .map(|(k, v)| {
                value_to_string(v)
                    .map(|v| (k, v))
                    .ok_or_else(|| D::Error::custom("expected scalar map values"))
            })
            .collect::<Result<_, _>>()
            .map(Some),
    }
}

fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => DateTime::from_timestamp(n.as_i64()?, 0),
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
                return Some(dt.with_timezone(&Utc));
            }
            ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|naive| naive.and_utc())
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|naive| naive.and_utc())
                })
        }
        _ => None,
    }
}

pub fn datetime<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    parse_datetime(&value).ok_or_else(|| D::Error::custom(format!("unrecognized timestamp: {}", value)))
}

pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if let Value::String(s) = &value {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(d);
        }
    }
    parse_datetime(&value)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| D::Error::custom(format!("unrecognized date: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "string")]
        id: String,
        #[serde(deserialize_with = "datetime")]
        at: DateTime<Utc>,
        #[serde(deserialize_with = "string_map")]
        attrs: HashMap<String, String>,
    }

    #[test]
    fn test_numbers_become_strings() {
        let sample: Sample =
            serde_json::from_value(json!({ "id": 42, "at": 0, "attrs": { "w": 1.5, "c": "red" } })).unwrap();
        assert_eq!(sample.id, "42");
        assert_eq!(sample.attrs["w"], "1.5");
        assert_eq!(sample.attrs["c"], "red");
    }

    #[test]
    fn test_timestamp_formats() {
        for raw in [
            json!("2021-07-19T21:00:00+00:00"),
            json!("2021-07-19T21:00:00Z"),
            json!("2021-07-19 21:00:00"),
            json!("2021-07-20 00:00:00+03:00"),
            json!(1626728400),
        ] {
            let dt = parse_datetime(&raw).unwrap_or_else(|| panic!("failed on {}", raw));
            assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2021, 7, 19, 21), "{}", raw);
        }
        assert!(parse_datetime(&json!("yesterday")).is_none());
        assert!(parse_datetime(&json!([])).is_none());
    }

    #[test]
    fn test_nested_values_are_rejected() {
        let result: Result<Sample, _> =
            serde_json::from_value(json!({ "id": { "nested": true }, "at": 0, "attrs": {} }));
        assert!(result.is_err());
    }
}
