//! Schemas.

use serde::Deserialize;

use super::common::{self, In, Like, LimitFrom, ObjectType, TagAssociation};
use super::databases::{RETENTION_DAYS_MAX, RETENTION_DAYS_MIN};
use super::decode::{self, lenient};
use super::{facade, find_by_name};
use crate::error::{Error, Result};
use crate::sql::{
    DatabaseObjectIdentifier, ObjectIdentifier, ParamStyle, SchemaObjectIdentifier, SqlBuilder,
    ToSql,
};
use crate::validation::{Flag, Presence, Validate, Validator};

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateSchemaOptions {
    pub or_replace: Option<bool>,
    pub transient: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub name: DatabaseObjectIdentifier,
    pub clone: Option<DatabaseObjectIdentifier>,
    pub with_managed_access: Option<bool>,
    pub data_retention_time_in_days: Option<i32>,
    pub max_data_extension_time_in_days: Option<i32>,
    pub default_ddl_collation: Option<String>,
    pub comment: Option<String>,
    pub tags: Vec<TagAssociation>,
}

impl ToSql for CreateSchemaOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .keyword(self.transient, "TRANSIENT")
            .sql("SCHEMA")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .prefixed_identifier("CLONE", self.clone.as_ref())
            .keyword(self.with_managed_access, "WITH MANAGED ACCESS")
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

impl Validate for CreateSchemaOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("Clone", self.clone.as_ref())
            .conflicting(
                "CreateSchemaOptions",
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
pub struct SchemaSet {
    pub data_retention_time_in_days: Option<i32>,
    pub max_data_extension_time_in_days: Option<i32>,
    pub default_ddl_collation: Option<String>,
    pub comment: Option<String>,
}

impl ToSql for SchemaSet {
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

impl Validate for SchemaSet {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "SchemaSet",
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
pub struct SchemaUnset {
    pub data_retention_time_in_days: bool,
    pub max_data_extension_time_in_days: bool,
    pub default_ddl_collation: bool,
    pub comment: bool,
}

impl ToSql for SchemaUnset {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.keywords(&[
            (self.data_retention_time_in_days, "DATA_RETENTION_TIME_IN_DAYS"),
            (self.max_data_extension_time_in_days, "MAX_DATA_EXTENSION_TIME_IN_DAYS"),
            (self.default_ddl_collation, "DEFAULT_DDL_COLLATION"),
            (self.comment, "COMMENT"),
        ]);
    }
}

impl Validate for SchemaUnset {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "SchemaUnset",
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
pub struct AlterSchemaOptions {
    pub if_exists: Option<bool>,
    pub name: DatabaseObjectIdentifier,
    pub rename_to: Option<DatabaseObjectIdentifier>,
    pub swap_with: Option<DatabaseObjectIdentifier>,
    pub set: Option<SchemaSet>,
    pub unset: Option<SchemaUnset>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
    pub enable_managed_access: Option<bool>,
    pub disable_managed_access: Option<bool>,
}

impl ToSql for AlterSchemaOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER SCHEMA")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .prefixed_identifier("RENAME TO", self.rename_to.as_ref())
            .prefixed_identifier("SWAP WITH", self.swap_with.as_ref())
            .nested(Some("SET"), self.set.as_ref())
            .nested(Some("UNSET"), self.unset.as_ref());
        common::set_tags(b, &self.set_tags);
        common::unset_tags(b, &self.unset_tags);
        b.keyword(self.enable_managed_access, "ENABLE MANAGED ACCESS")
            .keyword(self.disable_managed_access, "DISABLE MANAGED ACCESS");
    }
}

impl Validate for AlterSchemaOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("RenameTo", self.rename_to.as_ref())
            .opt_identifier("SwapWith", self.swap_with.as_ref())
            .exactly_one(
                "AlterSchemaOptions",
                &[
                    ("RenameTo", self.rename_to.is_set()),
                    ("SwapWith", self.swap_with.is_set()),
                    ("Set", self.set.is_set()),
                    ("Unset", self.unset.is_set()),
                    ("SetTags", self.set_tags.is_set()),
                    ("UnsetTags", self.unset_tags.is_set()),
                    ("EnableManagedAccess", self.enable_managed_access.is_true()),
                    ("DisableManagedAccess", self.disable_managed_access.is_true()),
                ],
            )
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
        common::validate_tags(v, &self.set_tags, &self.unset_tags);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropSchemaOptions {
    pub if_exists: Option<bool>,
    pub name: DatabaseObjectIdentifier,
    pub cascade: Option<bool>,
    pub restrict: Option<bool>,
}

impl ToSql for DropSchemaOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP SCHEMA")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword(self.cascade, "CASCADE")
            .keyword(self.restrict, "RESTRICT");
    }
}

impl Validate for DropSchemaOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name).conflicting(
            "DropSchemaOptions",
            &[
                ("Cascade", self.cascade.is_true()),
                ("Restrict", self.restrict.is_true()),
            ],
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UndropSchemaOptions {
    pub name: DatabaseObjectIdentifier,
}

impl ToSql for UndropSchemaOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("UNDROP SCHEMA").identifier(&self.name);
    }
}

impl Validate for UndropSchemaOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowSchemaOptions {
    pub terse: Option<bool>,
    pub history: Option<bool>,
    pub like: Option<Like>,
    pub in_: Option<In>,
    pub starts_with: Option<String>,
    pub limit: Option<LimitFrom>,
}

impl ToSql for ShowSchemaOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW")
            .keyword(self.terse, "TERSE")
            .sql("SCHEMAS")
            .keyword(self.history, "HISTORY")
            .nested(None, self.like.as_ref())
            .nested(None, self.in_.as_ref())
            .parameter(
                "STARTS WITH",
                self.starts_with.as_ref(),
                ParamStyle::single_quoted().no_equals(),
            )
            .nested(None, self.limit.as_ref());
    }
}

impl Validate for ShowSchemaOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(self.like.as_ref())
            .nested(self.in_.as_ref())
            .nested(self.limit.as_ref());
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct CreateSchemaRequest {
    pub name: DatabaseObjectIdentifier,
    pub or_replace: Option<bool>,
    pub transient: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub clone: Option<DatabaseObjectIdentifier>,
    pub with_managed_access: Option<bool>,
    pub data_retention_time_in_days: Option<i32>,
    pub max_data_extension_time_in_days: Option<i32>,
    pub default_ddl_collation: Option<String>,
    pub comment: Option<String>,
    pub tags: Vec<TagAssociation>,
}

impl CreateSchemaRequest {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
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

    pub fn with_clone(mut self, source: DatabaseObjectIdentifier) -> Self {
        self.clone = Some(source);
        self
    }

    pub fn with_managed_access(mut self, managed: bool) -> Self {
        self.with_managed_access = Some(managed);
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

    pub fn into_options(self) -> CreateSchemaOptions {
        CreateSchemaOptions {
            or_replace: self.or_replace,
            transient: self.transient,
            if_not_exists: self.if_not_exists,
            name: self.name,
            clone: self.clone,
            with_managed_access: self.with_managed_access,
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
pub struct AlterSchemaRequest {
    pub name: DatabaseObjectIdentifier,
    pub if_exists: Option<bool>,
    pub rename_to: Option<DatabaseObjectIdentifier>,
    pub swap_with: Option<DatabaseObjectIdentifier>,
    pub set: Option<SchemaSet>,
    pub unset: Option<SchemaUnset>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
    pub enable_managed_access: Option<bool>,
    pub disable_managed_access: Option<bool>,
}

impl AlterSchemaRequest {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn with_rename_to(mut self, new_name: DatabaseObjectIdentifier) -> Self {
        self.rename_to = Some(new_name);
        self
    }

    pub fn with_swap_with(mut self, other: DatabaseObjectIdentifier) -> Self {
        self.swap_with = Some(other);
        self
    }

    pub fn with_set(mut self, set: SchemaSet) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_unset(mut self, unset: SchemaUnset) -> Self {
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

    /// `ENABLE MANAGED ACCESS` when `true`, `DISABLE MANAGED ACCESS` otherwise.
    pub fn with_managed_access(mut self, enabled: bool) -> Self {
        if enabled {
            self.enable_managed_access = Some(true);
        } else {
            self.disable_managed_access = Some(true);
        }
        self
    }

    pub fn into_options(self) -> AlterSchemaOptions {
        AlterSchemaOptions {
            if_exists: self.if_exists,
            name: self.name,
            rename_to: self.rename_to,
            swap_with: self.swap_with,
            set: self.set,
            unset: self.unset,
            set_tags: self.set_tags,
            unset_tags: self.unset_tags,
            enable_managed_access: self.enable_managed_access,
            disable_managed_access: self.disable_managed_access,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct ShowSchemaRequest {
    pub terse: Option<bool>,
    pub history: Option<bool>,
    pub like: Option<Like>,
    pub in_: Option<In>,
    pub starts_with: Option<String>,
    pub limit: Option<LimitFrom>,
}

impl ShowSchemaRequest {
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

    pub fn with_in(mut self, in_: In) -> Self {
        self.in_ = Some(in_);
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

    pub fn into_options(self) -> ShowSchemaOptions {
        ShowSchemaOptions {
            terse: self.terse,
            history: self.history,
            like: self.like,
            in_: self.in_,
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
pub struct SchemaRow {
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub is_default: String,
    #[serde(deserialize_with = "lenient::string")]
    pub is_current: String,
    #[serde(deserialize_with = "lenient::string")]
    pub database_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub owner: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
    #[serde(deserialize_with = "lenient::string")]
    pub options: String,
    #[serde(deserialize_with = "lenient::string")]
    pub retention_time: String,
    #[serde(deserialize_with = "lenient::string")]
    pub dropped_on: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub created_on: String,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub database_name: String,
    pub owner: String,
    pub comment: Option<String>,
    pub transient: bool,
    pub managed_access: bool,
    pub retention_time: i64,
    pub dropped_on: Option<String>,
}

impl Schema {
    pub fn id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(&self.database_name, &self.name)
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::Schema
    }
}

impl TryFrom<SchemaRow> for Schema {
    type Error = Error;

    fn try_from(row: SchemaRow) -> Result<Self> {
        let options = row.options.to_ascii_uppercase();
        Ok(Self {
            is_default: decode::parse_flag("is_default", &row.is_default)?,
            is_current: decode::parse_flag("is_current", &row.is_current)?,
            retention_time: decode::parse_int("retention_time", &row.retention_time)?,
            comment: decode::non_empty(&row.comment),
            dropped_on: decode::non_empty(&row.dropped_on),
            transient: options.contains("TRANSIENT"),
            managed_access: options.contains("MANAGED ACCESS"),
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            owner: row.owner,
        })
    }
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Schema operations.
    Schemas
);

impl<E: super::SqlExecutor> Schemas<'_, E> {
    pub async fn create(&self, request: CreateSchemaRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn alter(&self, request: AlterSchemaRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn drop(&self, id: &DatabaseObjectIdentifier, if_exists: bool) -> Result<()> {
        let opts = DropSchemaOptions {
            if_exists: Some(if_exists),
            name: id.clone(),
            ..Default::default()
        };
        self.client.exec(&opts).await
    }

    pub async fn undrop(&self, id: &DatabaseObjectIdentifier) -> Result<()> {
        self.client.exec(&UndropSchemaOptions { name: id.clone() }).await
    }

    pub async fn show(&self, request: ShowSchemaRequest) -> Result<Vec<Schema>> {
        let rows = self.client.query(&request.into_options()).await?;
        decode::from_rows::<SchemaRow>(&rows)?
            .into_iter()
            .map(Schema::try_from)
            .collect()
    }

    pub async fn show_by_id(&self, id: &DatabaseObjectIdentifier) -> Result<Schema> {
        let request = ShowSchemaRequest::new()
            .with_like(Like::new(id.name()))
            .with_in(In::database(id.database_id()));
        let schemas = self.show(request).await?;
        find_by_name(schemas, id.name(), id.fully_qualified_name(), |s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::test_utils::validate_sql;
    use crate::sql::AccountObjectIdentifier;
    use crate::validation::ValidationError;
    use insta::assert_snapshot;
    use serde_json::json;

    fn id() -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new("DB", "STAGING")
    }

    #[test]
    fn test_create() {
        let plain = CreateSchemaRequest::new(id()).with_if_not_exists(true).into_options();
        assert_eq!(plain.to_sql().unwrap(), "CREATE SCHEMA IF NOT EXISTS \"DB\".\"STAGING\"");
        assert!(validate_sql(&plain.to_sql().unwrap()).is_ok());

        let full = CreateSchemaRequest::new(id())
            .with_or_replace(true)
            .with_transient(true)
            .with_managed_access(true)
            .with_data_retention_time_in_days(0)
            .with_comment("landing")
            .into_options();
        assert!(full.validate().is_ok());
        assert_snapshot!(
            full.to_sql().unwrap(),
            @r#"CREATE OR REPLACE TRANSIENT SCHEMA "DB"."STAGING" WITH MANAGED ACCESS DATA_RETENTION_TIME_IN_DAYS = 0 COMMENT = 'landing'"#
        );
    }

    #[test]
    fn test_alter() {
        let rename = AlterSchemaRequest::new(id())
            .with_if_exists(true)
            .with_rename_to(DatabaseObjectIdentifier::new("DB", "RAW"))
            .into_options();
        assert_eq!(
            rename.to_sql().unwrap(),
            "ALTER SCHEMA IF EXISTS \"DB\".\"STAGING\" RENAME TO \"DB\".\"RAW\""
        );

        let managed = AlterSchemaRequest::new(id()).with_managed_access(false).into_options();
        assert_eq!(
            managed.to_sql().unwrap(),
            "ALTER SCHEMA \"DB\".\"STAGING\" DISABLE MANAGED ACCESS"
        );
        assert!(managed.validate().is_ok());

        let empty = AlterSchemaRequest::new(id()).into_options();
        assert!(matches!(
            empty.validate().unwrap_err().errors(),
            [ValidationError::ExactlyOneOf { structure: "AlterSchemaOptions", .. }]
        ));

        let bad_set = AlterSchemaRequest::new(id())
            .with_set(SchemaSet {
                max_data_extension_time_in_days: Some(-1),
                ..Default::default()
            })
            .into_options();
        assert!(bad_set.validate().unwrap_err().contains(&ValidationError::OutOfRange {
            field: "MaxDataExtensionTimeInDays",
            min: 0,
            max: 90,
        }));
    }

    #[test]
    fn test_drop_and_undrop() {
        let drop = DropSchemaOptions {
            if_exists: Some(true),
            name: id(),
            cascade: Some(true),
            ..Default::default()
        };
        let sql = drop.to_sql().unwrap();
        assert_eq!(sql, "DROP SCHEMA IF EXISTS \"DB\".\"STAGING\" CASCADE");
        assert!(validate_sql(&sql).is_ok());

        assert_eq!(
            UndropSchemaOptions { name: id() }.to_sql().unwrap(),
            "UNDROP SCHEMA \"DB\".\"STAGING\""
        );
    }

    #[test]
    fn test_show() {
        let opts = ShowSchemaRequest::new()
            .with_like(Like::new("ST%"))
            .with_in(In::database(AccountObjectIdentifier::new("DB")))
            .with_limit(LimitFrom::new(10).with_from("S"))
            .into_options();
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @r#"SHOW SCHEMAS LIKE 'ST%' IN DATABASE "DB" LIMIT 10 FROM 'S'"#
        );
    }

    #[test]
    fn test_decode_row() {
        let row = json!({
            "name": "STAGING",
            "database_name": "DB",
            "is_default": "N",
            "is_current": "N",
            "owner": "SYSADMIN",
            "comment": "",
            "options": "TRANSIENT, MANAGED ACCESS",
            "retention_time": 0
        });
        let schema =
            Schema::try_from(decode::from_row::<SchemaRow>(row.as_object().unwrap()).unwrap())
                .unwrap();
        assert_eq!(schema.id(), id());
        assert!(schema.transient);
        assert!(schema.managed_access);
        assert_eq!(schema.comment, None);
        assert_eq!(schema.dropped_on, None);
    }
}
