//! Row decoding helpers.
//!
//! `SHOW` and `DESCRIBE` results arrive as loosely typed rows. These helpers
//! apply the normalisations every object decoder needs:
//!
//! - the string `"null"` means absent ([`non_null`])
//! - list columns are comma separated ([`parse_list`])
//! - numeric strings parse to integers, with `""` meaning zero ([`parse_int`])
//! - boolean strings are `"true"`, `"false"` or empty ([`parse_bool`])
//!
//! `DESCRIBE` output is a set of property/value rows; [`decode_properties`]
//! routes each row into a [`DescribeAccumulator`].

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::executor::Row;
use crate::error::{Error, Result};
use crate::sql::IdentifierError;

/// Deserialize one row into a typed row struct.
pub fn from_row<T: DeserializeOwned>(row: &Row) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(row.clone()))?)
}

pub fn from_rows<T: DeserializeOwned>(rows: &[Row]) -> Result<Vec<T>> {
    rows.iter().map(from_row).collect()
}

/// `None` for the `"null"` sentinel.
pub fn non_null(value: &str) -> Option<String> {
    if value == "null" {
        None
    } else {
        Some(value.to_string())
    }
}

/// `None` for the `"null"` sentinel and for empty strings.
pub fn non_empty(value: &str) -> Option<String> {
    non_null(value).filter(|v| !v.is_empty())
}

/// Split a comma-separated column, trimming items and dropping empties.
///
/// Tolerates the bracketed form `[a, b]` some `DESCRIBE` outputs use.
pub fn parse_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    if value == "null" {
        return Vec::new();
    }
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an integer column; empty means zero.
pub fn parse_int(column: &str, value: &str) -> Result<i64> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse().map_err(|_| invalid(column, value))
}

/// Like [`parse_int`], with `"null"` meaning absent.
pub fn parse_opt_int(column: &str, value: &str) -> Result<Option<i64>> {
    match non_null(value) {
        Some(v) => parse_int(column, &v).map(Some),
        None => Ok(None),
    }
}

/// Parse a boolean column; empty means false.
pub fn parse_bool(column: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" | "" => Ok(false),
        _ => Err(invalid(column, value)),
    }
}

/// Parse a `Y`/`N` flag column, falling back to [`parse_bool`].
pub fn parse_flag(column: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "Y" | "y" => Ok(true),
        "N" | "n" => Ok(false),
        other => parse_bool(column, other),
    }
}

/// Parse a closed enum column.
pub fn parse_enum<T: FromStr>(column: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| invalid(column, value))
}

/// Parse a comma-separated list of identifiers.
pub fn parse_identifier_list<I>(value: &str) -> Result<Vec<I>>
where
    I: FromStr<Err = IdentifierError>,
{
    parse_list(value)
        .iter()
        .map(|item| item.parse::<I>().map_err(Error::from))
        .collect()
}

/// Parse a JSON array of strings; empty or `null` is an empty list.
pub fn parse_json_strings(value: &str) -> Result<Vec<String>> {
    let value = value.trim();
    if value.is_empty() || value == "null" {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(value)?)
}

/// Parse a JSON array of fully-qualified names, e.g. task predecessors.
pub fn parse_json_identifiers<I>(value: &str) -> Result<Vec<I>>
where
    I: FromStr<Err = IdentifierError>,
{
    parse_json_strings(value)?
        .iter()
        .map(|name| name.parse::<I>().map_err(Error::from))
        .collect()
}

fn invalid(column: &str, value: &str) -> Error {
    Error::InvalidColumnValue {
        column: column.to_string(),
        value: value.to_string(),
    }
}

// ============================================================================
// Lenient serde adapters
// ============================================================================

/// Serde adapters accepting whatever scalar the driver produced.
pub mod lenient {
    use super::*;

    fn scalar<E: serde::de::Error>(value: Value) -> std::result::Result<Option<String>, E> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            other => Err(E::custom(format!("expected a scalar column, got {}", other))),
        }
    }

    /// String, number or bool as text; SQL `NULL` becomes `""`.
    pub fn string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
        Ok(scalar::<D::Error>(Value::deserialize(d)?)?.unwrap_or_default())
    }

    /// String, number or bool as text; SQL `NULL` becomes `None`.
    pub fn opt_string<'de, D: Deserializer<'de>>(
        d: D,
    ) -> std::result::Result<Option<String>, D::Error> {
        scalar::<D::Error>(Value::deserialize(d)?)
    }
}

// ============================================================================
// DESCRIBE
// ============================================================================

/// One `DESCRIBE` property row (`property`/`value` or `name`/`value`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PropertyRow {
    #[serde(alias = "PROPERTY", alias = "name", alias = "NAME")]
    pub property: String,
    #[serde(alias = "VALUE", default, deserialize_with = "lenient::string")]
    pub value: String,
}

/// A record filled from `DESCRIBE` property rows.
pub trait DescribeAccumulator: Default {
    /// Store one property. Returns `Ok(false)` for properties it does not
    /// know; those are logged and skipped.
    fn accept(&mut self, property: &str, value: &str) -> Result<bool>;
}

/// Route each property row by name into a fresh accumulator.
pub fn decode_properties<T: DescribeAccumulator>(rows: &[Row]) -> Result<T> {
    let mut acc = T::default();
    for row in rows {
        let row: PropertyRow = from_row(row)?;
        let property = row.property.trim().to_ascii_uppercase();
        if !acc.accept(&property, &row.value)? {
            log::warn!("ignoring unknown DESCRIBE property {:?}", row.property);
        }
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{AccountObjectIdentifier, SchemaObjectIdentifier};
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_non_null() {
        assert_eq!(non_null("null"), None);
        assert_eq!(non_null(""), Some(String::new()));
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("x"), Some("x".to_string()));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("1.1.1.1,2.2.2.2"), vec!["1.1.1.1", "2.2.2.2"]);
        assert_eq!(parse_list("[a, b]"), vec!["a", "b"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list("null").is_empty());
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("X", "").unwrap(), 0);
        assert_eq!(parse_int("X", " 42 ").unwrap(), 42);
        assert!(matches!(
            parse_int("X", "abc"),
            Err(Error::InvalidColumnValue { .. })
        ));
        assert_eq!(parse_opt_int("X", "null").unwrap(), None);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(!parse_bool("X", "false").unwrap());
        assert!(!parse_bool("X", "").unwrap());
        assert!(parse_bool("X", "yes").is_err());
    }

    #[test]
    fn test_identifier_lists() {
        let ids: Vec<AccountObjectIdentifier> = parse_identifier_list("DB1,DB2").unwrap();
        assert_eq!(
            ids,
            vec![
                AccountObjectIdentifier::new("DB1"),
                AccountObjectIdentifier::new("DB2")
            ]
        );

        let ids: Vec<SchemaObjectIdentifier> =
            parse_json_identifiers(r#"["DB.S.T1", "\"DB\".\"S\".\"T2\""]"#).unwrap();
        assert_eq!(ids[0], SchemaObjectIdentifier::new("DB", "S", "T1"));
        assert_eq!(ids[1], SchemaObjectIdentifier::new("DB", "S", "T2"));

        let empty: Vec<SchemaObjectIdentifier> = parse_json_identifiers("[]").unwrap();
        assert!(empty.is_empty());
    }

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "lenient::string")]
        name: String,
        #[serde(default, deserialize_with = "lenient::opt_string")]
        comment: Option<String>,
    }

    #[test]
    fn test_lenient_row() {
        let sample: Sample = from_row(&row(json!({ "name": 12, "comment": null }))).unwrap();
        assert_eq!(sample.name, "12");
        assert_eq!(sample.comment, None);

        let sample: Sample = from_row(&row(json!({ "name": "X" }))).unwrap();
        assert_eq!(sample.comment, None);

        assert!(from_row::<Sample>(&row(json!({ "name": [1] }))).is_err());
    }

    #[derive(Default)]
    struct Props {
        size: i64,
        comment: Option<String>,
    }

    impl DescribeAccumulator for Props {
        fn accept(&mut self, property: &str, value: &str) -> Result<bool> {
            match property {
                "SIZE" => self.size = parse_int(property, value)?,
                "COMMENT" => self.comment = non_null(value),
                _ => return Ok(false),
            }
            Ok(true)
        }
    }

    #[test]
    fn test_decode_properties() {
        let rows = vec![
            row(json!({ "property": "size", "value": "3" })),
            row(json!({ "PROPERTY": "COMMENT", "VALUE": "null" })),
            row(json!({ "property": "OTHER", "value": "x" })),
        ];
        let props: Props = decode_properties(&rows).unwrap();
        assert_eq!(props.size, 3);
        assert_eq!(props.comment, None);
    }
}
