//! Databases.

use serde::Deserialize;

use super::common::{self, Like, LimitFrom, ObjectType, TagAssociation};
use super::decode::{self, lenient};
use super::{facade, find_by_name};
use crate::error::{Error, Result};
use crate::sql::{
    AccountObjectIdentifier, ObjectIdentifier, ParamStyle, SchemaObjectIdentifier, SqlBuilder,
    ToSql,
};
use crate::validation::{Flag, Presence, Validate, Validator};

pub(crate) const RETENTION_DAYS_MIN: i64 = 0;
pub(crate) const RETENTION_DAYS_MAX: i64 = 90;

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateDatabaseOptions {
    pub or_replace: Option<bool>,
    pub transient: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub clone: Option<AccountObjectIdentifier>,
    pub data_retention_time_in_days: Option<i32>,
    pub max_data_extension_time_in_days: Option<i32>,
    pub default_ddl_collation: Option<String>,
    pub comment: Option<String>,
    pub tags: Vec<TagAssociation>,
}

impl ToSql for CreateDatabaseOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .keyword(self.transient, "TRANSIENT")
            .sql("DATABASE")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .prefixed_identifier("CLONE", self.clone.as_ref())
            .parameter(
                "DATA_RETENTION_TIME_IN_DAYS",
                self.data_retention_time_in_days.as_ref(),
                ParamStyle::new(),
            )
            .parameter(
                "MAX_DATA_EXTENSION_TIME_IN_DAYS",
                self.max_data_extension_time_in_days.as_ref(),
                ParamStyle::new(),
            )
            .parameter(
                "DEFAULT_DDL_COLLATION",
                self.default_ddl_collation.as_ref(),
                ParamStyle::single_quoted(),
            )
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
        common::with_tags(b, &self.tags);
    }
}

impl Validate for CreateDatabaseOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("Clone", self.clone.as_ref())
            .conflicting(
                "CreateDatabaseOptions",
                &[
                    ("OrReplace", self.or_replace.is_true()),
                    ("IfNotExists", self.if_not_exists.is_true()),
                ],
            )
            .range(
                "DataRetentionTimeInDays",
                self.data_retention_time_in_days,
                RETENTION_DAYS_MIN,
                RETENTION_DAYS_MAX,
            )
            .range(
                "MaxDataExtensionTimeInDays",
                self.max_data_extension_time_in_days,
                RETENTION_DAYS_MIN,
                RETENTION_DAYS_MAX,
            );
        common::validate_tags(v, &self.tags, &[]);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatabaseSet {
    pub data_retention_time_in_days: Option<i32>,
    pub max_data_extension_time_in_days: Option<i32>,
    pub default_ddl_collation: Option<String>,
    pub comment: Option<String>,
}

impl ToSql for DatabaseSet {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.parameter(
            "DATA_RETENTION_TIME_IN_DAYS",
            self.data_retention_time_in_days.as_ref(),
            ParamStyle::new(),
        )
        .parameter(
            "MAX_DATA_EXTENSION_TIME_IN_DAYS",
            self.max_data_extension_time_in_days.as_ref(),
            ParamStyle::new(),
        )
        .parameter(
            "DEFAULT_DDL_COLLATION",
            self.default_ddl_collation.as_ref(),
            ParamStyle::single_quoted(),
        )
        .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
    }
}

impl Validate for DatabaseSet {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "DatabaseSet",
            &[
                ("DataRetentionTimeInDays", self.data_retention_time_in_days.is_set()),
                ("MaxDataExtensionTimeInDays", self.max_data_extension_time_in_days.is_set()),
                ("DefaultDdlCollation", self.default_ddl_collation.is_set()),
                ("Comment", self.comment.is_set()),
            ],
        )
        .range(
            "DataRetentionTimeInDays",
            self.data_retention_time_in_days,
            RETENTION_DAYS_MIN,
            RETENTION_DAYS_MAX,
        )
        .range(
            "MaxDataExtensionTimeInDays",
            self.max_data_extension_time_in_days,
            RETENTION_DAYS_MIN,
            RETENTION_DAYS_MAX,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatabaseUnset {
    pub data_retention_time_in_days: bool,
    pub max_data_extension_time_in_days: bool,
    pub default_ddl_collation: bool,
    pub comment: bool,
}

impl ToSql for DatabaseUnset {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.keywords(&[
            (self.data_retention_time_in_days, "DATA_RETENTION_TIME_IN_DAYS"),
            (self.max_data_extension_time_in_days, "MAX_DATA_EXTENSION_TIME_IN_DAYS"),
            (self.default_ddl_collation, "DEFAULT_DDL_COLLATION"),
            (self.comment, "COMMENT"),
        ]);
    }
}

impl Validate for DatabaseUnset {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "DatabaseUnset",
            &[
                ("DataRetentionTimeInDays", self.data_retention_time_in_days),
                ("MaxDataExtensionTimeInDays", self.max_data_extension_time_in_days),
                ("DefaultDdlCollation", self.default_ddl_collation),
                ("Comment", self.comment),
            ],
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterDatabaseOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub rename_to: Option<AccountObjectIdentifier>,
    pub swap_with: Option<AccountObjectIdentifier>,
    pub set: Option<DatabaseSet>,
    pub unset: Option<DatabaseUnset>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl ToSql for AlterDatabaseOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER DATABASE")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .prefixed_identifier("RENAME TO", self.rename_to.as_ref())
            .prefixed_identifier("SWAP WITH", self.swap_with.as_ref())
            .nested(Some("SET"), self.set.as_ref())
            .nested(Some("UNSET"), self.unset.as_ref());
        common::set_tags(b, &self.set_tags);
        common::unset_tags(b, &self.unset_tags);
    }
}

impl Validate for AlterDatabaseOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("RenameTo", self.rename_to.as_ref())
            .opt_identifier("SwapWith", self.swap_with.as_ref())
            .exactly_one(
                "AlterDatabaseOptions",
                &[
                    ("RenameTo", self.rename_to.is_set()),
                    ("SwapWith", self.swap_with.is_set()),
                    ("Set", self.set.is_set()),
                    ("Unset", self.unset.is_set()),
                    ("SetTags", self.set_tags.is_set()),
                    ("UnsetTags", self.unset_tags.is_set()),
                ],
            )
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
        common::validate_tags(v, &self.set_tags, &self.unset_tags);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropDatabaseOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub cascade: Option<bool>,
    pub restrict: Option<bool>,
}

impl ToSql for DropDatabaseOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP DATABASE")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword(self.cascade, "CASCADE")
            .keyword(self.restrict, "RESTRICT");
    }
}

impl Validate for DropDatabaseOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name).conflicting(
            "DropDatabaseOptions",
            &[
                ("Cascade", self.cascade.is_true()),
                ("Restrict", self.restrict.is_true()),
            ],
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UndropDatabaseOptions {
    pub name: AccountObjectIdentifier,
}

impl ToSql for UndropDatabaseOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("UNDROP DATABASE").identifier(&self.name);
    }
}

impl Validate for UndropDatabaseOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

/// `SHOW [TERSE] DATABASES [HISTORY] [LIKE] [STARTS WITH] [LIMIT]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowDatabaseOptions {
    pub terse: Option<bool>,
    pub history: Option<bool>,
    pub like: Option<Like>,
    pub starts_with: Option<String>,
    pub limit: Option<LimitFrom>,
}

impl ToSql for ShowDatabaseOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW")
            .keyword(self.terse, "TERSE")
            .sql("DATABASES")
            .keyword(self.history, "HISTORY")
            .nested(None, self.like.as_ref())
            .parameter(
                "STARTS WITH",
                self.starts_with.as_ref(),
                ParamStyle::single_quoted().no_equals(),
            )
            .nested(None, self.limit.as_ref());
    }
}

impl Validate for ShowDatabaseOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(self.like.as_ref()).nested(self.limit.as_ref());
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct CreateDatabaseRequest {
    pub name: AccountObjectIdentifier,
    pub or_replace: Option<bool>,
    pub transient: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub clone: Option<AccountObjectIdentifier>,
    pub data_retention_time_in_days: Option<i32>,
    pub max_data_extension_time_in_days: Option<i32>,
    pub default_ddl_collation: Option<String>,
    pub comment: Option<String>,
    pub tags: Vec<TagAssociation>,
}

impl CreateDatabaseRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = Some(or_replace);
        self
    }

    pub fn with_transient(mut self, transient: bool) -> Self {
        self.transient = Some(transient);
        self
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = Some(if_not_exists);
        self
    }

    pub fn with_clone(mut self, source: AccountObjectIdentifier) -> Self {
        self.clone = Some(source);
        self
    }

    pub fn with_data_retention_time_in_days(mut self, days: i32) -> Self {
        self.data_retention_time_in_days = Some(days);
        self
    }

    pub fn with_max_data_extension_time_in_days(mut self, days: i32) -> Self {
        self.max_data_extension_time_in_days = Some(days);
        self
    }

    pub fn with_default_ddl_collation(mut self, collation: impl Into<String>) -> Self {
        self.default_ddl_collation = Some(collation.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.tags = tags;
        self
    }

    pub fn into_options(self) -> CreateDatabaseOptions {
        CreateDatabaseOptions {
            or_replace: self.or_replace,
            transient: self.transient,
            if_not_exists: self.if_not_exists,
            name: self.name,
            clone: self.clone,
            data_retention_time_in_days: self.data_retention_time_in_days,
            max_data_extension_time_in_days: self.max_data_extension_time_in_days,
            default_ddl_collation: self.default_ddl_collation,
            comment: self.comment,
            tags: self.tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct AlterDatabaseRequest {
    pub name: AccountObjectIdentifier,
    pub if_exists: Option<bool>,
    pub rename_to: Option<AccountObjectIdentifier>,
    pub swap_with: Option<AccountObjectIdentifier>,
    pub set: Option<DatabaseSet>,
    pub unset: Option<DatabaseUnset>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl AlterDatabaseRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn with_rename_to(mut self, new_name: AccountObjectIdentifier) -> Self {
        self.rename_to = Some(new_name);
        self
    }

    pub fn with_swap_with(mut self, other: AccountObjectIdentifier) -> Self {
        self.swap_with = Some(other);
        self
    }

    pub fn with_set(mut self, set: DatabaseSet) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_unset(mut self, unset: DatabaseUnset) -> Self {
        self.unset = Some(unset);
        self
    }

    pub fn with_set_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.set_tags = tags;
        self
    }

    pub fn with_unset_tags(mut self, tags: Vec<SchemaObjectIdentifier>) -> Self {
        self.unset_tags = tags;
        self
    }

    pub fn into_options(self) -> AlterDatabaseOptions {
        AlterDatabaseOptions {
            if_exists: self.if_exists,
            name: self.name,
            rename_to: self.rename_to,
            swap_with: self.swap_with,
            set: self.set,
            unset: self.unset,
            set_tags: self.set_tags,
            unset_tags: self.unset_tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct ShowDatabaseRequest {
    pub terse: Option<bool>,
    pub history: Option<bool>,
    pub like: Option<Like>,
    pub starts_with: Option<String>,
    pub limit: Option<LimitFrom>,
}

impl ShowDatabaseRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_terse(mut self, terse: bool) -> Self {
        self.terse = Some(terse);
        self
    }

    pub fn with_history(mut self, history: bool) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_like(mut self, like: Like) -> Self {
        self.like = Some(like);
        self
    }

    pub fn with_starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.starts_with = Some(prefix.into());
        self
    }

    pub fn with_limit(mut self, limit: LimitFrom) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn into_options(self) -> ShowDatabaseOptions {
        ShowDatabaseOptions {
            terse: self.terse,
            history: self.history,
            like: self.like,
            starts_with: self.starts_with,
            limit: self.limit,
        }
    }
}

// ============================================================================
// Rows and records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseRow {
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub is_default: String,
    #[serde(deserialize_with = "lenient::string")]
    pub is_current: String,
    #[serde(deserialize_with = "lenient::string")]
    pub origin: String,
    #[serde(deserialize_with = "lenient::string")]
    pub owner: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
    #[serde(deserialize_with = "lenient::string")]
    pub options: String,
    #[serde(deserialize_with = "lenient::string")]
    pub retention_time: String,
    #[serde(deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::string")]
    pub dropped_on: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    pub created_on: String,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub origin: Option<String>,
    pub owner: String,
    pub comment: Option<String>,
    pub transient: bool,
    pub retention_time: i64,
    pub kind: String,
    pub dropped_on: Option<String>,
}

impl Database {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::Database
    }
}

impl TryFrom<DatabaseRow> for Database {
    type Error = Error;

    fn try_from(row: DatabaseRow) -> Result<Self> {
        let transient = row.kind.eq_ignore_ascii_case("TRANSIENT")
            || row.options.to_ascii_uppercase().contains("TRANSIENT");
        Ok(Self {
            is_default: decode::parse_flag("is_default", &row.is_default)?,
            is_current: decode::parse_flag("is_current", &row.is_current)?,
            retention_time: decode::parse_int("retention_time", &row.retention_time)?,
            origin: decode::non_empty(&row.origin),
            comment: decode::non_empty(&row.comment),
            dropped_on: decode::non_empty(&row.dropped_on),
            transient,
            created_on: row.created_on,
            name: row.name,
            owner: row.owner,
            kind: row.kind,
        })
    }
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Database operations.
    Databases
);

impl<E: super::SqlExecutor> Databases<'_, E> {
    pub async fn create(&self, request: CreateDatabaseRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn alter(&self, request: AlterDatabaseRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn drop(&self, id: &AccountObjectIdentifier, if_exists: bool) -> Result<()> {
        let opts = DropDatabaseOptions {
            if_exists: Some(if_exists),
            name: id.clone(),
            ..Default::default()
        };
        self.client.exec(&opts).await
    }

    pub async fn undrop(&self, id: &AccountObjectIdentifier) -> Result<()> {
        self.client.exec(&UndropDatabaseOptions { name: id.clone() }).await
    }

    pub async fn show(&self, request: ShowDatabaseRequest) -> Result<Vec<Database>> {
        let rows = self.client.query(&request.into_options()).await?;
        decode::from_rows::<DatabaseRow>(&rows)?
            .into_iter()
            .map(Database::try_from)
            .collect()
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<Database> {
        let databases = self
            .show(ShowDatabaseRequest::new().with_like(Like::new(id.name())))
            .await?;
        find_by_name(databases, id.name(), id.fully_qualified_name(), |d| d.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use insta::assert_snapshot;
    use serde_json::json;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("ANALYTICS")
    }

    #[test]
    fn test_create() {
        let opts = CreateDatabaseRequest::new(id())
            .with_transient(true)
            .with_if_not_exists(true)
            .with_clone(AccountObjectIdentifier::new("PROD"))
            .with_data_retention_time_in_days(1)
            .with_comment("scratch")
            .with_tags(vec![TagAssociation::new(
                SchemaObjectIdentifier::new("GOV", "TAGS", "COST_CENTER"),
                "bi",
            )])
            .into_options();
        assert!(opts.validate().is_ok());
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @r#"CREATE TRANSIENT DATABASE IF NOT EXISTS "ANALYTICS" CLONE "PROD" DATA_RETENTION_TIME_IN_DAYS = 1 COMMENT = 'scratch' WITH TAG ("GOV"."TAGS"."COST_CENTER" = 'bi')"#
        );
    }

    #[test]
    fn test_create_validation() {
        let opts = CreateDatabaseRequest::new(id())
            .with_or_replace(true)
            .with_if_not_exists(true)
            .with_data_retention_time_in_days(91)
            .into_options();
        let err = opts.validate().unwrap_err();
        assert_eq!(err.len(), 2);
        assert!(err.contains(&ValidationError::OutOfRange {
            field: "DataRetentionTimeInDays",
            min: 0,
            max: 90,
        }));
    }

    #[test]
    fn test_alter() {
        let set = AlterDatabaseRequest::new(id())
            .with_set(DatabaseSet {
                max_data_extension_time_in_days: Some(14),
                comment: Some("it's".into()),
                ..Default::default()
            })
            .into_options();
        assert_eq!(
            set.to_sql().unwrap(),
            "ALTER DATABASE \"ANALYTICS\" SET MAX_DATA_EXTENSION_TIME_IN_DAYS = 14 COMMENT = 'it''s'"
        );

        let swap = AlterDatabaseRequest::new(id())
            .with_if_exists(true)
            .with_swap_with(AccountObjectIdentifier::new("ANALYTICS_V2"))
            .into_options();
        assert_eq!(
            swap.to_sql().unwrap(),
            "ALTER DATABASE IF EXISTS \"ANALYTICS\" SWAP WITH \"ANALYTICS_V2\""
        );

        let unset = AlterDatabaseRequest::new(id())
            .with_unset(DatabaseUnset {
                comment: true,
                default_ddl_collation: true,
                ..Default::default()
            })
            .into_options();
        assert_eq!(
            unset.to_sql().unwrap(),
            "ALTER DATABASE \"ANALYTICS\" UNSET DEFAULT_DDL_COLLATION, COMMENT"
        );

        let both = AlterDatabaseRequest::new(id())
            .with_rename_to(AccountObjectIdentifier::new("A2"))
            .with_unset(DatabaseUnset {
                comment: true,
                ..Default::default()
            })
            .into_options();
        assert!(matches!(
            both.validate().unwrap_err().errors(),
            [ValidationError::ExactlyOneOf { structure: "AlterDatabaseOptions", .. }]
        ));
    }

    #[test]
    fn test_drop_and_undrop() {
        let drop = DropDatabaseOptions {
            if_exists: Some(true),
            name: id(),
            cascade: Some(true),
            ..Default::default()
        };
        assert_eq!(drop.to_sql().unwrap(), "DROP DATABASE IF EXISTS \"ANALYTICS\" CASCADE");

        let conflicting = DropDatabaseOptions {
            restrict: Some(true),
            ..drop
        };
        assert!(conflicting
            .validate()
            .unwrap_err()
            .contains(&ValidationError::ConflictingFields {
                structure: "DropDatabaseOptions",
                fields: vec!["Cascade", "Restrict"],
            }));

        assert_eq!(
            UndropDatabaseOptions { name: id() }.to_sql().unwrap(),
            "UNDROP DATABASE \"ANALYTICS\""
        );
    }

    #[test]
    fn test_show() {
        let opts = ShowDatabaseRequest::new()
            .with_terse(true)
            .with_history(true)
            .with_like(Like::new("AN%"))
            .with_starts_with("ANA")
            .with_limit(LimitFrom::new(5))
            .into_options();
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @"SHOW TERSE DATABASES HISTORY LIKE 'AN%' STARTS WITH 'ANA' LIMIT 5"
        );
    }

    #[test]
    fn test_decode_row() {
        let row = json!({
            "created_on": "2024-01-01 00:00:00",
            "name": "ANALYTICS",
            "is_default": "N",
            "is_current": "Y",
            "origin": "",
            "owner": "SYSADMIN",
            "comment": "scratch",
            "options": "TRANSIENT",
            "retention_time": "1",
            "kind": "STANDARD",
            "dropped_on": "null"
        });
        let db = Database::try_from(decode::from_row::<DatabaseRow>(row.as_object().unwrap()).unwrap())
            .unwrap();
        assert_eq!(db.id(), id());
        assert!(db.transient);
        assert!(db.is_current);
        assert_eq!(db.retention_time, 1);
        assert_eq!(db.origin, None);
        assert_eq!(db.dropped_on, None);
        assert_eq!(db.comment.as_deref(), Some("scratch"));
    }
}
