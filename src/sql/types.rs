//! Snowflake column data types.
//!
//! Masking and row-access policies declare a signature (`AS ("VAL" VARCHAR)`)
//! and a return type; both are expressed with [`DataType`]. Parsing accepts
//! the synonyms Snowflake reports in `DESCRIBE` output (`TEXT`, `INT`,
//! `TIMESTAMP_NTZ(9)`, ...) and normalises them to one canonical variant.

use std::fmt;

use super::builder::{RenderError, SqlValue};
use super::directive::Quotes;
use super::token::Token;

/// Snowflake data type as used in DDL signatures.
///
/// # Examples
///
/// ```ignore
/// use snowflake_sdk::sql::types::DataType;
///
/// assert_eq!(DataType::parse("number(38,0)"), Some(DataType::Number(38, 0)));
/// assert_eq!(DataType::parse("TEXT"), Some(DataType::Varchar(None)));
/// assert_eq!(DataType::Varchar(Some(16)).to_string(), "VARCHAR(16)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,

    /// Fixed-point number with precision and scale.
    Number(u8, u8),

    /// Double-precision float (`FLOAT`, `DOUBLE`, `REAL`).
    Float,

    /// Variable-length string, optionally bounded.
    Varchar(Option<u32>),

    /// Fixed-length string.
    Char(u32),

    Binary(Option<u32>),

    Date,
    Time,
    TimestampLtz,
    TimestampNtz,
    TimestampTz,

    // Semi-structured
    Variant,
    Object,
    Array,

    // Geospatial
    Geography,
    Geometry,
}

impl DataType {
    /// Parse a Snowflake type name.
    ///
    /// Timestamp precision suffixes (`TIMESTAMP_NTZ(9)`) are accepted and
    /// dropped. Unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();

        if let Some(inner) = extract_parens(&s, "number")
            .or_else(|| extract_parens(&s, "numeric"))
            .or_else(|| extract_parens(&s, "decimal"))
        {
            return parse_number_params(&inner);
        }

        if let Some(inner) = extract_parens(&s, "varchar")
            .or_else(|| extract_parens(&s, "string"))
            .or_else(|| extract_parens(&s, "text"))
        {
            return parse_length_param(&inner).map(|n| DataType::Varchar(Some(n)));
        }

        if let Some(inner) = extract_parens(&s, "char").or_else(|| extract_parens(&s, "character")) {
            return parse_length_param(&inner).map(DataType::Char);
        }

        if let Some(inner) = extract_parens(&s, "binary").or_else(|| extract_parens(&s, "varbinary")) {
            return parse_length_param(&inner).map(|n| DataType::Binary(Some(n)));
        }

        let base = match s.find('(') {
            Some(idx) if s.ends_with(')') => s[..idx].trim().to_string(),
            _ => s,
        };

        match base.as_str() {
            "boolean" | "bool" => Some(DataType::Boolean),

            "number" | "numeric" | "decimal" => Some(DataType::Number(38, 0)),
            "int" | "integer" | "bigint" | "smallint" | "tinyint" | "byteint" => {
                Some(DataType::Number(38, 0))
            }
            "float" | "float4" | "float8" | "double" | "double precision" | "real" => {
                Some(DataType::Float)
            }

            "varchar" | "string" | "text" => Some(DataType::Varchar(None)),
            "char" | "character" => Some(DataType::Char(1)),
            "binary" | "varbinary" => Some(DataType::Binary(None)),

            "date" => Some(DataType::Date),
            "time" => Some(DataType::Time),
            "timestamp_ltz" => Some(DataType::TimestampLtz),
            "timestamp" | "timestamp_ntz" | "datetime" => Some(DataType::TimestampNtz),
            "timestamp_tz" => Some(DataType::TimestampTz),

            "variant" => Some(DataType::Variant),
            "object" => Some(DataType::Object),
            "array" => Some(DataType::Array),

            "geography" => Some(DataType::Geography),
            "geometry" => Some(DataType::Geometry),

            _ => None,
        }
    }

    /// Returns true if this is a numeric type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Number(_, _) | DataType::Float)
    }

    /// Returns true if this is a string type.
    pub fn is_string(&self) -> bool {
        matches!(self, DataType::Varchar(_) | DataType::Char(_))
    }

    /// Returns true if this is a temporal (date/time) type.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            DataType::Date
                | DataType::Time
                | DataType::TimestampLtz
                | DataType::TimestampNtz
                | DataType::TimestampTz
        )
    }

    pub fn is_semi_structured(&self) -> bool {
        matches!(self, DataType::Variant | DataType::Object | DataType::Array)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Number(p, s) => write!(f, "NUMBER({}, {})", p, s),
            DataType::Float => write!(f, "FLOAT"),
            DataType::Varchar(None) => write!(f, "VARCHAR"),
            DataType::Varchar(Some(n)) => write!(f, "VARCHAR({})", n),
            DataType::Char(n) => write!(f, "CHAR({})", n),
            DataType::Binary(None) => write!(f, "BINARY"),
            DataType::Binary(Some(n)) => write!(f, "BINARY({})", n),
            DataType::Date => write!(f, "DATE"),
            DataType::Time => write!(f, "TIME"),
            DataType::TimestampLtz => write!(f, "TIMESTAMP_LTZ"),
            DataType::TimestampNtz => write!(f, "TIMESTAMP_NTZ"),
            DataType::TimestampTz => write!(f, "TIMESTAMP_TZ"),
            DataType::Variant => write!(f, "VARIANT"),
            DataType::Object => write!(f, "OBJECT"),
            DataType::Array => write!(f, "ARRAY"),
            DataType::Geography => write!(f, "GEOGRAPHY"),
            DataType::Geometry => write!(f, "GEOMETRY"),
        }
    }
}

impl SqlValue for DataType {
    fn to_token(&self, quotes: Quotes) -> Result<Token, RenderError> {
        match quotes {
            Quotes::None => Ok(Token::Raw(self.to_string())),
            _ => Err(RenderError::IncompatibleQuotes {
                value: "DataType",
                quotes,
            }),
        }
    }
}

/// Extract content inside parentheses for a given type prefix.
/// e.g., extract_parens("number(10,2)", "number") returns Some("10,2")
fn extract_parens(s: &str, prefix: &str) -> Option<String> {
    let s = s.trim();
    if !s.starts_with(prefix) {
        return None;
    }

    let rest = s[prefix.len()..].trim();
    if !rest.starts_with('(') || !rest.ends_with(')') {
        return None;
    }

    Some(rest[1..rest.len() - 1].to_string())
}

/// Parse "precision,scale" or a lone precision (scale 0).
fn parse_number_params(inner: &str) -> Option<DataType> {
    let parts: Vec<&str> = inner.split(',').map(|s| s.trim()).collect();
    match parts.as_slice() {
        [p] => Some(DataType::Number(p.parse().ok()?, 0)),
        [p, s] => Some(DataType::Number(p.parse().ok()?, s.parse().ok()?)),
        _ => None,
    }
}

fn parse_length_param(inner: &str) -> Option<u32> {
    inner.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_types() {
        assert_eq!(DataType::parse("boolean"), Some(DataType::Boolean));
        assert_eq!(DataType::parse("BOOLEAN"), Some(DataType::Boolean));
        assert_eq!(DataType::parse("int"), Some(DataType::Number(38, 0)));
        assert_eq!(DataType::parse("double"), Some(DataType::Float));
        assert_eq!(DataType::parse("text"), Some(DataType::Varchar(None)));
        assert_eq!(DataType::parse("string"), Some(DataType::Varchar(None)));
        assert_eq!(DataType::parse("date"), Some(DataType::Date));
        assert_eq!(DataType::parse("timestamp"), Some(DataType::TimestampNtz));
        assert_eq!(DataType::parse("variant"), Some(DataType::Variant));
        assert_eq!(DataType::parse("GEOGRAPHY"), Some(DataType::Geography));
    }

    #[test]
    fn test_parse_parameterized_types() {
        assert_eq!(DataType::parse("number(10,2)"), Some(DataType::Number(10, 2)));
        assert_eq!(DataType::parse("NUMBER(38, 0)"), Some(DataType::Number(38, 0)));
        assert_eq!(DataType::parse("decimal(12)"), Some(DataType::Number(12, 0)));
        assert_eq!(DataType::parse("VARCHAR(16777216)"), Some(DataType::Varchar(Some(16777216))));
        assert_eq!(DataType::parse("char(10)"), Some(DataType::Char(10)));
        assert_eq!(DataType::parse("binary(8)"), Some(DataType::Binary(Some(8))));
        assert_eq!(DataType::parse("TIMESTAMP_NTZ(9)"), Some(DataType::TimestampNtz));
        assert_eq!(DataType::parse("timestamp_tz(3)"), Some(DataType::TimestampTz));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(DataType::parse("unknown_type"), None);
        assert_eq!(DataType::parse(""), None);
        assert_eq!(DataType::parse("number(abc)"), None);
        assert_eq!(DataType::parse("varchar()"), None);
    }

    #[test]
    fn test_type_predicates() {
        assert!(DataType::Number(38, 0).is_numeric());
        assert!(DataType::Float.is_numeric());
        assert!(DataType::Varchar(None).is_string());
        assert!(DataType::TimestampLtz.is_temporal());
        assert!(DataType::Object.is_semi_structured());
        assert!(!DataType::Boolean.is_numeric());
    }

    #[test]
    fn test_display() {
        assert_eq!(DataType::Boolean.to_string(), "BOOLEAN");
        assert_eq!(DataType::Number(18, 2).to_string(), "NUMBER(18, 2)");
        assert_eq!(DataType::Varchar(None).to_string(), "VARCHAR");
        assert_eq!(DataType::Varchar(Some(255)).to_string(), "VARCHAR(255)");
        assert_eq!(DataType::TimestampTz.to_string(), "TIMESTAMP_TZ");
    }

    #[test]
    fn test_display_parses_back() {
        for ty in [
            DataType::Number(10, 2),
            DataType::Varchar(Some(3)),
            DataType::Binary(None),
            DataType::TimestampLtz,
            DataType::Array,
        ] {
            assert_eq!(DataType::parse(&ty.to_string()), Some(ty));
        }
    }

    #[test]
    fn test_data_type_is_unquoted_value() {
        assert_eq!(
            DataType::Varchar(None).to_token(Quotes::None),
            Ok(Token::Raw("VARCHAR".into()))
        );
        assert!(DataType::Boolean.to_token(Quotes::Single).is_err());
    }
}
