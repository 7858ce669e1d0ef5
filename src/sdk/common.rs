//! Sub-clauses shared by many statements.
//!
//! `SHOW` statements emit their filters in a fixed order: `LIKE`, `IN`,
//! `STARTS WITH`, `LIMIT`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::sql::{
    sql_enum, AccountObjectIdentifier, DatabaseObjectIdentifier, ParamStyle, Quotes,
    RenderError, SchemaObjectIdentifier, SqlBuilder, SqlValue, ToSql, Token, UnknownVariant,
};
use crate::validation::{Flag, Presence, Validate, ValidationError, Validator};

// ============================================================================
// LIKE
// ============================================================================

/// `LIKE '<pattern>'`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Like {
    pub pattern: String,
}

impl Like {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl ToSql for Like {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.parameter("LIKE", Some(&self.pattern), ParamStyle::single_quoted().no_equals());
    }
}

impl Validate for Like {
    fn validate_into(&self, v: &mut Validator) {
        if self.pattern.is_empty() {
            v.push(ValidationError::PatternRequiredForLike);
        }
    }
}

// ============================================================================
// IN
// ============================================================================

/// `IN ACCOUNT | IN DATABASE <db> | IN SCHEMA <db>.<schema>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct In {
    pub account: Option<bool>,
    pub database: Option<AccountObjectIdentifier>,
    pub schema: Option<DatabaseObjectIdentifier>,
}

impl In {
    pub fn account() -> Self {
        Self {
            account: Some(true),
            ..Default::default()
        }
    }

    pub fn database(id: AccountObjectIdentifier) -> Self {
        Self {
            database: Some(id),
            ..Default::default()
        }
    }

    pub fn schema(id: DatabaseObjectIdentifier) -> Self {
        Self {
            schema: Some(id),
            ..Default::default()
        }
    }
}

impl ToSql for In {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("IN")
            .keyword(self.account, "ACCOUNT")
            .prefixed_identifier("DATABASE", self.database.as_ref())
            .prefixed_identifier("SCHEMA", self.schema.as_ref());
    }
}

impl Validate for In {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "In",
            &[
                ("Account", self.account.is_true()),
                ("Database", self.database.is_set()),
                ("Schema", self.schema.is_set()),
            ],
        )
        .opt_identifier("Database", self.database.as_ref())
        .opt_identifier("Schema", self.schema.as_ref());
    }
}

// ============================================================================
// LIMIT
// ============================================================================

/// `LIMIT <rows> [FROM '<name>']`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LimitFrom {
    pub rows: i32,
    pub from: Option<String>,
}

impl LimitFrom {
    pub fn new(rows: i32) -> Self {
        Self { rows, from: None }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

impl ToSql for LimitFrom {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.parameter("LIMIT", Some(&self.rows), ParamStyle::new().no_equals())
            .parameter("FROM", self.from.as_ref(), ParamStyle::single_quoted().no_equals());
    }
}

impl Validate for LimitFrom {
    fn validate_into(&self, v: &mut Validator) {
        v.range("Limit", Some(self.rows), 1, 10_000);
    }
}

// ============================================================================
// Tags
// ============================================================================

/// `<tag> = '<value>'`, used by `WITH TAG (...)` and `SET TAG ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagAssociation {
    pub name: SchemaObjectIdentifier,
    pub value: String,
}

impl TagAssociation {
    pub fn new(name: SchemaObjectIdentifier, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

impl ToSql for TagAssociation {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.identifier(&self.name)
            .sql("=")
            .value(&self.value, Quotes::Single);
    }
}

impl Validate for TagAssociation {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("TagName", &self.name);
    }
}

/// Emit `WITH TAG (<assoc>, ...)` in a create statement.
pub(crate) fn with_tags(b: &mut SqlBuilder, tags: &[TagAssociation]) {
    b.parameter_list("WITH TAG", tags, ParamStyle::new().no_equals().parentheses());
}

/// Emit `SET TAG <assoc>, ...` in an alter statement.
pub(crate) fn set_tags(b: &mut SqlBuilder, tags: &[TagAssociation]) {
    b.parameter_list("SET TAG", tags, ParamStyle::new().no_equals());
}

/// Emit `UNSET TAG <tag>, ...` in an alter statement.
pub(crate) fn unset_tags(b: &mut SqlBuilder, tags: &[SchemaObjectIdentifier]) {
    b.list(Some("UNSET TAG"), tags, crate::sql::ListStyle::new());
}

pub(crate) fn validate_tags(
    v: &mut Validator,
    set: &[TagAssociation],
    unset: &[SchemaObjectIdentifier],
) {
    for tag in set {
        tag.validate_into(v);
    }
    v.identifiers("UnsetTags", unset);
}

// ============================================================================
// Object types
// ============================================================================

sql_enum! {
    /// Object kinds, as written after `CREATE` / `ALTER` / `ON`.
    pub enum ObjectType {
        Account => "ACCOUNT",
        Alert => "ALERT",
        Database => "DATABASE",
        DatabaseRole => "DATABASE ROLE",
        FailoverGroup => "FAILOVER GROUP",
        Function => "FUNCTION",
        Integration => "INTEGRATION",
        MaskingPolicy => "MASKING POLICY",
        MaterializedView => "MATERIALIZED VIEW",
        NetworkPolicy => "NETWORK POLICY",
        PasswordPolicy => "PASSWORD POLICY",
        Pipe => "PIPE",
        Procedure => "PROCEDURE",
        Role => "ROLE",
        RowAccessPolicy => "ROW ACCESS POLICY",
        Schema => "SCHEMA",
        Sequence => "SEQUENCE",
        SessionPolicy => "SESSION POLICY",
        Share => "SHARE",
        Stage => "STAGE",
        Stream => "STREAM",
        Table => "TABLE",
        Tag => "TAG",
        Task => "TASK",
        User => "USER",
        View => "VIEW",
        Warehouse => "WAREHOUSE",
    }
}

sql_enum! {
    /// Plural object kinds, as written after `ALL` / `FUTURE` and `SHOW`.
    pub enum PluralObjectType {
        Alerts => "ALERTS",
        Databases => "DATABASES",
        DatabaseRoles => "DATABASE ROLES",
        FailoverGroups => "FAILOVER GROUPS",
        Functions => "FUNCTIONS",
        Integrations => "INTEGRATIONS",
        MaskingPolicies => "MASKING POLICIES",
        MaterializedViews => "MATERIALIZED VIEWS",
        NetworkPolicies => "NETWORK POLICIES",
        PasswordPolicies => "PASSWORD POLICIES",
        Pipes => "PIPES",
        Procedures => "PROCEDURES",
        Roles => "ROLES",
        RowAccessPolicies => "ROW ACCESS POLICIES",
        Schemas => "SCHEMAS",
        Sequences => "SEQUENCES",
        SessionPolicies => "SESSION POLICIES",
        Shares => "SHARES",
        Stages => "STAGES",
        Streams => "STREAMS",
        Tables => "TABLES",
        Tags => "TAGS",
        Tasks => "TASKS",
        Users => "USERS",
        Views => "VIEWS",
        Warehouses => "WAREHOUSES",
    }
}

impl ObjectType {
    /// The plural form, where one exists.
    pub fn plural(&self) -> Option<PluralObjectType> {
        let plural = match self {
            ObjectType::Alert => PluralObjectType::Alerts,
            ObjectType::Database => PluralObjectType::Databases,
            ObjectType::DatabaseRole => PluralObjectType::DatabaseRoles,
            ObjectType::FailoverGroup => PluralObjectType::FailoverGroups,
            ObjectType::Function => PluralObjectType::Functions,
            ObjectType::Integration => PluralObjectType::Integrations,
            ObjectType::MaskingPolicy => PluralObjectType::MaskingPolicies,
            ObjectType::MaterializedView => PluralObjectType::MaterializedViews,
            ObjectType::NetworkPolicy => PluralObjectType::NetworkPolicies,
            ObjectType::PasswordPolicy => PluralObjectType::PasswordPolicies,
            ObjectType::Pipe => PluralObjectType::Pipes,
            ObjectType::Procedure => PluralObjectType::Procedures,
            ObjectType::Role => PluralObjectType::Roles,
            ObjectType::RowAccessPolicy => PluralObjectType::RowAccessPolicies,
            ObjectType::Schema => PluralObjectType::Schemas,
            ObjectType::Sequence => PluralObjectType::Sequences,
            ObjectType::SessionPolicy => PluralObjectType::SessionPolicies,
            ObjectType::Share => PluralObjectType::Shares,
            ObjectType::Stage => PluralObjectType::Stages,
            ObjectType::Stream => PluralObjectType::Streams,
            ObjectType::Table => PluralObjectType::Tables,
            ObjectType::Tag => PluralObjectType::Tags,
            ObjectType::Task => PluralObjectType::Tasks,
            ObjectType::User => PluralObjectType::Users,
            ObjectType::View => PluralObjectType::Views,
            ObjectType::Warehouse => PluralObjectType::Warehouses,
            ObjectType::Account => return None,
        };
        Some(plural)
    }

    /// Whether objects of this kind live inside a schema.
    pub fn is_schema_object(&self) -> bool {
        matches!(
            self,
            ObjectType::Alert
                | ObjectType::Function
                | ObjectType::MaskingPolicy
                | ObjectType::MaterializedView
                | ObjectType::PasswordPolicy
                | ObjectType::Pipe
                | ObjectType::Procedure
                | ObjectType::RowAccessPolicy
                | ObjectType::Sequence
                | ObjectType::SessionPolicy
                | ObjectType::Stage
                | ObjectType::Stream
                | ObjectType::Table
                | ObjectType::Tag
                | ObjectType::Task
                | ObjectType::View
        )
    }
}

// ============================================================================
// Schedules
// ============================================================================

static MINUTES_SCHEDULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*MINUTES?$").unwrap());

static CRON_SCHEDULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^USING\s+CRON\s+(.+)$").unwrap());

/// `SCHEDULE` of a task or alert.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Schedule {
    /// `'<n> MINUTE'`
    Minutes(u32),
    /// `'USING CRON <expr> <time zone>'`
    Cron(String),
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Minutes(n) => write!(f, "{} MINUTE", n),
            Schedule::Cron(expr) => write!(f, "USING CRON {}", expr),
        }
    }
}

impl FromStr for Schedule {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(caps) = MINUTES_SCHEDULE.captures(s) {
            if let Ok(n) = caps[1].parse() {
                return Ok(Schedule::Minutes(n));
            }
        }
        if let Some(caps) = CRON_SCHEDULE.captures(s) {
            return Ok(Schedule::Cron(caps[1].trim().to_string()));
        }
        Err(UnknownVariant {
            kind: "Schedule",
            value: s.to_string(),
        })
    }
}

impl SqlValue for Schedule {
    fn to_token(&self, quotes: Quotes) -> Result<Token, RenderError> {
        match quotes {
            Quotes::Single => Ok(Token::LitString(self.to_string())),
            _ => Err(RenderError::IncompatibleQuotes {
                value: "Schedule",
                quotes,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrors;

    #[test]
    fn test_like() {
        assert_eq!(Like::new("A%").to_sql().unwrap(), "LIKE 'A%'");
        assert_eq!(Like::new("it's").to_sql().unwrap(), "LIKE 'it''s'");
    }

    #[test]
    fn test_empty_like_pattern() {
        let err = Like::default().validate().unwrap_err();
        assert_eq!(err, ValidationErrors::from(ValidationError::PatternRequiredForLike));
    }

    #[test]
    fn test_in_variants() {
        assert_eq!(In::account().to_sql().unwrap(), "IN ACCOUNT");
        assert_eq!(
            In::database(AccountObjectIdentifier::new("DB")).to_sql().unwrap(),
            "IN DATABASE \"DB\""
        );
        assert_eq!(
            In::schema(DatabaseObjectIdentifier::new("DB", "S")).to_sql().unwrap(),
            "IN SCHEMA \"DB\".\"S\""
        );
    }

    #[test]
    fn test_in_requires_exactly_one() {
        let err = In::default().validate().unwrap_err();
        assert!(err.contains(&ValidationError::ExactlyOneOf {
            structure: "In",
            fields: vec!["Account", "Database", "Schema"],
        }));

        let both = In {
            account: Some(true),
            database: Some(AccountObjectIdentifier::new("DB")),
            ..Default::default()
        };
        assert!(both.validate().is_err());
        assert!(In::account().validate().is_ok());
    }

    #[test]
    fn test_limit_from() {
        assert_eq!(LimitFrom::new(10).to_sql().unwrap(), "LIMIT 10");
        assert_eq!(
            LimitFrom::new(5).with_from("X").to_sql().unwrap(),
            "LIMIT 5 FROM 'X'"
        );
    }

    #[test]
    fn test_tag_association() {
        let tag = TagAssociation::new(SchemaObjectIdentifier::new("DB", "S", "T"), "v'1");
        assert_eq!(tag.to_sql().unwrap(), "\"DB\".\"S\".\"T\" = 'v''1'");

        let mut b = SqlBuilder::new();
        with_tags(&mut b, &[tag.clone()]);
        assert_eq!(b.finish().unwrap(), "WITH TAG (\"DB\".\"S\".\"T\" = 'v''1')");

        let mut b = SqlBuilder::new();
        set_tags(&mut b, &[tag.clone(), tag]);
        assert_eq!(
            b.finish().unwrap(),
            "SET TAG \"DB\".\"S\".\"T\" = 'v''1', \"DB\".\"S\".\"T\" = 'v''1'"
        );

        let mut b = SqlBuilder::new();
        unset_tags(&mut b, &[SchemaObjectIdentifier::new("DB", "S", "T")]);
        assert_eq!(b.finish().unwrap(), "UNSET TAG \"DB\".\"S\".\"T\"");
    }

    #[test]
    fn test_object_types() {
        assert_eq!(ObjectType::MaskingPolicy.to_string(), "MASKING POLICY");
        assert_eq!("masking policy".parse::<ObjectType>().unwrap(), ObjectType::MaskingPolicy);
        assert_eq!(ObjectType::Table.plural(), Some(PluralObjectType::Tables));
        assert_eq!(ObjectType::Account.plural(), None);
        assert!(ObjectType::Task.is_schema_object());
        assert!(!ObjectType::Warehouse.is_schema_object());
        assert!(!ObjectType::NetworkPolicy.is_schema_object());
    }

    #[test]
    fn test_schedule() {
        assert_eq!("5 MINUTE".parse::<Schedule>().unwrap(), Schedule::Minutes(5));
        assert_eq!("10 minutes".parse::<Schedule>().unwrap(), Schedule::Minutes(10));
        assert_eq!(
            "USING CRON 0 9 * * * UTC".parse::<Schedule>().unwrap(),
            Schedule::Cron("0 9 * * * UTC".into())
        );
        assert!("hourly".parse::<Schedule>().is_err());
        assert_eq!(Schedule::Minutes(5).to_string(), "5 MINUTE");
    }
}
