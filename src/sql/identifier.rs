//! Object identifiers.
//!
//! Snowflake names objects at four scopes plus an account-qualified form:
//!
//! | Type | Components | Used for |
//! |------|------------|----------|
//! | [`AccountIdentifier`] | organization + account, or a locator | accounts |
//! | [`AccountObjectIdentifier`] | name | warehouses, databases, roles, integrations |
//! | [`DatabaseObjectIdentifier`] | database + name | schemas, database roles |
//! | [`SchemaObjectIdentifier`] | database + schema + name | tables, tasks, policies, tags |
//! | [`ExternalObjectIdentifier`] | account + name | replicated objects in another account |
//! | [`ColumnIdentifier`] | database + schema + object + column | column policies |
//!
//! Every component renders double-quoted; components are joined with `.`.
//! Components are stored exactly as supplied - no case folding.
//!
//! # Examples
//!
//! ```ignore
//! use snowflake_sdk::sql::identifier::{Identifier, ObjectIdentifier, SchemaObjectIdentifier};
//!
//! let id = SchemaObjectIdentifier::new("DB", "S", "T");
//! assert_eq!(id.fully_qualified_name(), r#""DB"."S"."T""#);
//!
//! let parsed = Identifier::parse(r#""DB"."S""#).unwrap();
//! assert!(matches!(parsed, Identifier::DatabaseObject(_)));
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::token::quote_identifier;

/// Errors from parsing or constructing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier {input:?} has {count} parts, expected between 1 and 4")]
    UnsupportedPartCount { input: String, count: usize },

    #[error("identifier {input:?} has {actual} parts, expected {expected}")]
    WrongPartCount {
        input: String,
        expected: usize,
        actual: usize,
    },

    #[error("identifier {0:?} mixes quoted and unquoted parts")]
    MixedQuoting(String),

    #[error("identifier {0:?} has an unterminated quote")]
    UnterminatedQuote(String),

    #[error("identifier {0:?} has an empty part")]
    EmptyPart(String),

    #[error("identifier part {0:?} contains a comma")]
    ContainsComma(String),
}

/// Common behaviour of all identifier variants.
pub trait ObjectIdentifier {
    /// The last (most specific) component.
    fn name(&self) -> &str;

    /// All components, outermost first.
    fn parts(&self) -> Vec<&str>;

    /// Components double-quoted and joined with `.`, e.g. `"DB"."SCH"."OBJ"`.
    fn fully_qualified_name(&self) -> String {
        self.parts()
            .into_iter()
            .map(quote_identifier)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// True iff every component is non-empty.
    fn is_valid(&self) -> bool {
        let parts = self.parts();
        !parts.is_empty() && parts.iter().all(|p| !p.is_empty())
    }
}

/// Checks a component for the constructor-level rules.
fn check_component(component: &str, whole: &str) -> Result<(), IdentifierError> {
    if component.is_empty() {
        return Err(IdentifierError::EmptyPart(whole.to_string()));
    }
    if component.contains(',') {
        return Err(IdentifierError::ContainsComma(component.to_string()));
    }
    Ok(())
}

fn check_components(components: &[&str]) -> Result<(), IdentifierError> {
    let whole = components.join(".");
    components
        .iter()
        .try_for_each(|c| check_component(c, &whole))
}

/// Split a textual identifier into its components.
///
/// Accepts either the fully quoted form `"a"."b"."c"` (with `""` as an
/// escaped quote) or the bare form `a.b.c`. Bare components are taken
/// verbatim. Mixing the two forms is rejected, as are empty components and
/// components containing a comma.
pub fn parse_parts(input: &str) -> Result<Vec<String>, IdentifierError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(IdentifierError::Empty);
    }

    let parts = if input.starts_with('"') {
        parse_quoted(input)?
    } else {
        if input.contains('"') {
            return Err(IdentifierError::MixedQuoting(input.to_string()));
        }
        input.split('.').map(str::to_string).collect()
    };

    for part in &parts {
        check_component(part, input)?;
    }

    if parts.len() > 4 {
        return Err(IdentifierError::UnsupportedPartCount {
            input: input.to_string(),
            count: parts.len(),
        });
    }

    Ok(parts)
}

fn parse_quoted(input: &str) -> Result<Vec<String>, IdentifierError> {
    let mut parts = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        match chars.next() {
            Some('"') => {}
            Some(_) => return Err(IdentifierError::MixedQuoting(input.to_string())),
            None => return Err(IdentifierError::EmptyPart(input.to_string())),
        }

        let mut part = String::new();
        loop {
            match chars.next() {
                Some('"') if chars.peek() == Some(&'"') => {
                    chars.next();
                    part.push('"');
                }
                Some('"') => break,
                Some(c) => part.push(c),
                None => return Err(IdentifierError::UnterminatedQuote(input.to_string())),
            }
        }
        parts.push(part);

        match chars.next() {
            None => break,
            Some('.') => continue,
            Some(_) => return Err(IdentifierError::MixedQuoting(input.to_string())),
        }
    }

    Ok(parts)
}

fn parse_exact(input: &str, expected: usize) -> Result<Vec<String>, IdentifierError> {
    let parts = parse_parts(input)?;
    if parts.len() != expected {
        return Err(IdentifierError::WrongPartCount {
            input: input.to_string(),
            expected,
            actual: parts.len(),
        });
    }
    Ok(parts)
}

// ============================================================================
// Account
// ============================================================================

/// An account, named either by organization + account name or by locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AccountIdentifier {
    organization_name: String,
    account_name: String,
    account_locator: String,
}

impl AccountIdentifier {
    pub fn new(organization_name: impl Into<String>, account_name: impl Into<String>) -> Self {
        Self {
            organization_name: organization_name.into(),
            account_name: account_name.into(),
            account_locator: String::new(),
        }
    }

    pub fn from_locator(account_locator: impl Into<String>) -> Self {
        Self {
            account_locator: account_locator.into(),
            ..Default::default()
        }
    }

    pub fn try_new(
        organization_name: impl Into<String>,
        account_name: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let id = Self::new(organization_name, account_name);
        check_components(&id.parts())?;
        Ok(id)
    }

    pub fn organization_name(&self) -> &str {
        &self.organization_name
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn account_locator(&self) -> &str {
        &self.account_locator
    }
}

impl ObjectIdentifier for AccountIdentifier {
    fn name(&self) -> &str {
        if self.account_locator.is_empty() {
            &self.account_name
        } else {
            &self.account_locator
        }
    }

    fn parts(&self) -> Vec<&str> {
        if self.account_locator.is_empty() {
            vec![self.organization_name.as_str(), self.account_name.as_str()]
        } else {
            vec![self.account_locator.as_str()]
        }
    }
}

/// `org.account`, or a bare account locator.
impl FromStr for AccountIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = parse_parts(s)?;
        match parts.as_slice() {
            [locator] => Ok(Self::from_locator(locator)),
            [org, account] => Ok(Self::new(org, account)),
            _ => Err(IdentifierError::WrongPartCount {
                input: s.to_string(),
                expected: 2,
                actual: parts.len(),
            }),
        }
    }
}

// ============================================================================
// Account object
// ============================================================================

/// Single-component name of an account-level object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AccountObjectIdentifier {
    name: String,
}

impl AccountObjectIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn try_new(name: impl Into<String>) -> Result<Self, IdentifierError> {
        let id = Self::new(name);
        check_components(&id.parts())?;
        Ok(id)
    }
}

impl ObjectIdentifier for AccountObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn parts(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl FromStr for AccountObjectIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = parse_exact(s, 1)?;
        Ok(Self::new(parts.remove(0)))
    }
}

// ============================================================================
// Database object
// ============================================================================

/// Name of an object that lives directly in a database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DatabaseObjectIdentifier {
    database_name: String,
    name: String,
}

impl DatabaseObjectIdentifier {
    pub fn new(database_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            name: name.into(),
        }
    }

    pub fn try_new(
        database_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let id = Self::new(database_name, name);
        check_components(&id.parts())?;
        Ok(id)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.database_name)
    }
}

impl ObjectIdentifier for DatabaseObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn parts(&self) -> Vec<&str> {
        vec![self.database_name.as_str(), self.name.as_str()]
    }
}

impl FromStr for DatabaseObjectIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = parse_exact(s, 2)?;
        Ok(Self::new(&parts[0], &parts[1]))
    }
}

// ============================================================================
// Schema object
// ============================================================================

/// Name of an object that lives in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SchemaObjectIdentifier {
    database_name: String,
    schema_name: String,
    name: String,
}

impl SchemaObjectIdentifier {
    pub fn new(
        database_name: impl Into<String>,
        schema_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            schema_name: schema_name.into(),
            name: name.into(),
        }
    }

    pub fn try_new(
        database_name: impl Into<String>,
        schema_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let id = Self::new(database_name, schema_name, name);
        check_components(&id.parts())?;
        Ok(id)
    }

    /// Identifier of an object in the given schema.
    pub fn in_schema(schema: &DatabaseObjectIdentifier, name: impl Into<String>) -> Self {
        Self::new(schema.database_name(), schema.name(), name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.database_name)
    }

    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(&self.database_name, &self.schema_name)
    }
}

impl ObjectIdentifier for SchemaObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn parts(&self) -> Vec<&str> {
        vec![
            self.database_name.as_str(),
            self.schema_name.as_str(),
            self.name.as_str(),
        ]
    }
}

impl FromStr for SchemaObjectIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = parse_exact(s, 3)?;
        Ok(Self::new(&parts[0], &parts[1], &parts[2]))
    }
}

// ============================================================================
// External object
// ============================================================================

/// An account-level object owned by another account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ExternalObjectIdentifier {
    account: AccountIdentifier,
    object: AccountObjectIdentifier,
}

impl ExternalObjectIdentifier {
    pub fn new(account: AccountIdentifier, object: AccountObjectIdentifier) -> Self {
        Self { account, object }
    }

    pub fn account(&self) -> &AccountIdentifier {
        &self.account
    }

    pub fn object(&self) -> &AccountObjectIdentifier {
        &self.object
    }
}

impl ObjectIdentifier for ExternalObjectIdentifier {
    fn name(&self) -> &str {
        self.object.name()
    }

    fn parts(&self) -> Vec<&str> {
        let mut parts = self.account.parts();
        parts.extend(self.object.parts());
        parts
    }
}

/// `org.account.object`
impl FromStr for ExternalObjectIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = parse_exact(s, 3)?;
        Ok(Self::new(
            AccountIdentifier::new(&parts[0], &parts[1]),
            AccountObjectIdentifier::new(&parts[2]),
        ))
    }
}

// ============================================================================
// Column
// ============================================================================

/// A column of a table or view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ColumnIdentifier {
    database_name: String,
    schema_name: String,
    object_name: String,
    column_name: String,
}

impl ColumnIdentifier {
    pub fn new(
        database_name: impl Into<String>,
        schema_name: impl Into<String>,
        object_name: impl Into<String>,
        column_name: impl Into<String>,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            schema_name: schema_name.into(),
            object_name: object_name.into(),
            column_name: column_name.into(),
        }
    }

    pub fn try_new(
        database_name: impl Into<String>,
        schema_name: impl Into<String>,
        object_name: impl Into<String>,
        column_name: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let id = Self::new(database_name, schema_name, object_name, column_name);
        check_components(&id.parts())?;
        Ok(id)
    }

    /// Column of the given table.
    pub fn of(table: &SchemaObjectIdentifier, column_name: impl Into<String>) -> Self {
        Self::new(
            table.database_name(),
            table.schema_name(),
            table.name(),
            column_name,
        )
    }

    /// The table or view owning this column.
    pub fn table_id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.object_name)
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }
}

impl ObjectIdentifier for ColumnIdentifier {
    fn name(&self) -> &str {
        &self.column_name
    }

    fn parts(&self) -> Vec<&str> {
        vec![
            self.database_name.as_str(),
            self.schema_name.as_str(),
            self.object_name.as_str(),
            self.column_name.as_str(),
        ]
    }
}

impl FromStr for ColumnIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = parse_exact(s, 4)?;
        Ok(Self::new(&parts[0], &parts[1], &parts[2], &parts[3]))
    }
}

// ============================================================================
// Closed sum
// ============================================================================

/// Any identifier variant.
///
/// [`Identifier::parse`] picks the variant from the component count:
/// one part is an account object, two a database object, three a schema
/// object and four a column. Account and external identifiers are only
/// built explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Account(AccountIdentifier),
    AccountObject(AccountObjectIdentifier),
    DatabaseObject(DatabaseObjectIdentifier),
    SchemaObject(SchemaObjectIdentifier),
    External(ExternalObjectIdentifier),
    Column(ColumnIdentifier),
}

impl Identifier {
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let parts = parse_parts(input)?;
        let id = match parts.as_slice() {
            [name] => Identifier::AccountObject(AccountObjectIdentifier::new(name)),
            [db, name] => Identifier::DatabaseObject(DatabaseObjectIdentifier::new(db, name)),
            [db, schema, name] => {
                Identifier::SchemaObject(SchemaObjectIdentifier::new(db, schema, name))
            }
            [db, schema, object, column] => {
                Identifier::Column(ColumnIdentifier::new(db, schema, object, column))
            }
            _ => {
                return Err(IdentifierError::UnsupportedPartCount {
                    input: input.to_string(),
                    count: parts.len(),
                })
            }
        };
        Ok(id)
    }

    fn inner(&self) -> &dyn ObjectIdentifier {
        match self {
            Identifier::Account(id) => id,
            Identifier::AccountObject(id) => id,
            Identifier::DatabaseObject(id) => id,
            Identifier::SchemaObject(id) => id,
            Identifier::External(id) => id,
            Identifier::Column(id) => id,
        }
    }
}

impl ObjectIdentifier for Identifier {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn parts(&self) -> Vec<&str> {
        self.inner().parts()
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::parse(s)
    }
}

macro_rules! identifier_conversions {
    ($($ty:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Identifier {
                fn from(id: $ty) -> Self {
                    Identifier::$variant(id)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.fully_qualified_name())
                }
            }
        )+
    };
}

identifier_conversions! {
    AccountIdentifier => Account,
    AccountObjectIdentifier => AccountObject,
    DatabaseObjectIdentifier => DatabaseObject,
    SchemaObjectIdentifier => SchemaObject,
    ExternalObjectIdentifier => External,
    ColumnIdentifier => Column,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_qualified_names() {
        assert_eq!(
            AccountObjectIdentifier::new("WH").fully_qualified_name(),
            "\"WH\""
        );
        assert_eq!(
            DatabaseObjectIdentifier::new("DB", "S").fully_qualified_name(),
            "\"DB\".\"S\""
        );
        assert_eq!(
            SchemaObjectIdentifier::new("DB", "SCH", "OBJ").fully_qualified_name(),
            "\"DB\".\"SCH\".\"OBJ\""
        );
        assert_eq!(
            ColumnIdentifier::new("DB", "S", "T", "C").fully_qualified_name(),
            "\"DB\".\"S\".\"T\".\"C\""
        );
    }

    #[test]
    fn test_account_identifiers() {
        assert_eq!(
            AccountIdentifier::new("ORG", "ACCT").fully_qualified_name(),
            "\"ORG\".\"ACCT\""
        );
        assert_eq!(
            AccountIdentifier::from_locator("XY12345").fully_qualified_name(),
            "\"XY12345\""
        );

        let external = ExternalObjectIdentifier::new(
            AccountIdentifier::new("ORG", "ACCT"),
            AccountObjectIdentifier::new("FG"),
        );
        assert_eq!(external.fully_qualified_name(), "\"ORG\".\"ACCT\".\"FG\"");
        assert_eq!(external.name(), "FG");
    }

    #[test]
    fn test_quoting_preserves_content() {
        let id = SchemaObjectIdentifier::new("my db", "Sch.ema", "a\"b");
        assert_eq!(
            id.fully_qualified_name(),
            "\"my db\".\"Sch.ema\".\"a\"\"b\""
        );
    }

    #[test]
    fn test_validity() {
        assert!(AccountObjectIdentifier::new("X").is_valid());
        assert!(!AccountObjectIdentifier::new("").is_valid());
        assert!(!SchemaObjectIdentifier::new("DB", "", "T").is_valid());
        assert!(!AccountIdentifier::new("", "ACCT").is_valid());
    }

    #[test]
    fn test_parse_by_part_count() {
        assert!(matches!(
            Identifier::parse("\"WH\"").unwrap(),
            Identifier::AccountObject(_)
        ));
        assert!(matches!(
            Identifier::parse("\"DB\".\"S\"").unwrap(),
            Identifier::DatabaseObject(_)
        ));
        assert!(matches!(
            Identifier::parse("\"DB\".\"S\".\"T\"").unwrap(),
            Identifier::SchemaObject(_)
        ));
        assert!(matches!(
            Identifier::parse("\"DB\".\"S\".\"T\".\"C\"").unwrap(),
            Identifier::Column(_)
        ));
    }

    #[test]
    fn test_parse_bare() {
        let id: SchemaObjectIdentifier = "db.Sch.obj".parse().unwrap();
        assert_eq!(id.database_name(), "db");
        assert_eq!(id.schema_name(), "Sch");
        assert_eq!(id.name(), "obj");
    }

    #[test]
    fn test_parse_quoted_with_dots_and_escapes() {
        let id: SchemaObjectIdentifier = "\"a.b\".\"c\"\"d\".\"e f\"".parse().unwrap();
        assert_eq!(id.database_name(), "a.b");
        assert_eq!(id.schema_name(), "c\"d");
        assert_eq!(id.name(), "e f");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Identifier::parse(""), Err(IdentifierError::Empty));
        assert!(matches!(
            Identifier::parse("a.b.c.d.e"),
            Err(IdentifierError::UnsupportedPartCount { count: 5, .. })
        ));
        assert!(matches!(
            Identifier::parse("\"a\".b"),
            Err(IdentifierError::MixedQuoting(_))
        ));
        assert!(matches!(
            Identifier::parse("a.\"b\""),
            Err(IdentifierError::MixedQuoting(_))
        ));
        assert!(matches!(
            Identifier::parse("\"abc"),
            Err(IdentifierError::UnterminatedQuote(_))
        ));
        assert!(matches!(
            Identifier::parse("a..b"),
            Err(IdentifierError::EmptyPart(_))
        ));
        assert!(matches!(
            Identifier::parse("\"a,b\""),
            Err(IdentifierError::ContainsComma(_))
        ));
    }

    #[test]
    fn test_parse_exact_count() {
        let err = "\"DB\".\"S\"".parse::<SchemaObjectIdentifier>().unwrap_err();
        assert!(matches!(
            err,
            IdentifierError::WrongPartCount {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_try_new_rejects_commas_and_empties() {
        assert!(AccountObjectIdentifier::try_new("a,b").is_err());
        assert!(DatabaseObjectIdentifier::try_new("DB", "").is_err());
        assert!(SchemaObjectIdentifier::try_new("DB", "S", "T").is_ok());
    }

    #[test]
    fn test_round_trip_quoting() {
        for s in ["plain", "with space", "Mixed.Case", "quote\"inside", "\"\""] {
            let id = SchemaObjectIdentifier::new("DB", "S", s);
            let parsed = Identifier::parse(&id.fully_qualified_name()).unwrap();
            assert_eq!(parsed.name(), s);
        }
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        assert_ne!(
            AccountObjectIdentifier::new("wh"),
            AccountObjectIdentifier::new("WH")
        );
        assert_eq!(
            SchemaObjectIdentifier::new("DB", "S", "T"),
            SchemaObjectIdentifier::new("DB", "S", "T")
        );
    }

    #[test]
    fn test_column_helpers() {
        let table = SchemaObjectIdentifier::new("DB", "S", "T");
        let column = ColumnIdentifier::of(&table, "EMAIL");
        assert_eq!(column.table_id(), table);
        assert_eq!(column.column_name(), "EMAIL");
    }

    #[test]
    fn test_display_is_fqn() {
        let id: Identifier = DatabaseObjectIdentifier::new("DB", "S").into();
        assert_eq!(id.to_string(), "\"DB\".\"S\"");
    }

    #[test]
    fn test_parse_account_and_external() {
        let account: AccountIdentifier = "MYORG.PROD".parse().unwrap();
        assert_eq!(account, AccountIdentifier::new("MYORG", "PROD"));
        assert_eq!(account.fully_qualified_name(), "\"MYORG\".\"PROD\"");

        let locator: AccountIdentifier = "XY12345".parse().unwrap();
        assert_eq!(locator.account_locator(), "XY12345");

        let external: ExternalObjectIdentifier = "MYORG.PROD.FG".parse().unwrap();
        assert_eq!(external.account().account_name(), "PROD");
        assert_eq!(external.name(), "FG");
        assert!("A.B.C.D".parse::<AccountIdentifier>().is_err());
    }
}
