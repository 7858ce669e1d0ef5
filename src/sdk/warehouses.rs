//! Virtual warehouses.
//!
//! `SHOW WAREHOUSES` reports sizes in display form (`X-Small`, `2X-Large`);
//! [`WarehouseSize::normalize`] maps them back to the DDL keywords.

use serde::Deserialize;

use super::common::{self, Like, ObjectType, TagAssociation};
use super::decode::{self, lenient};
use super::{facade, find_by_name};
use crate::error::{Error, Result};
use crate::sql::{
    sql_enum, AccountObjectIdentifier, ObjectIdentifier, ParamStyle, SchemaObjectIdentifier,
    SqlBuilder, ToSql, UnknownVariant,
};
use crate::validation::{Flag, Presence, Validate, ValidationError, Validator};

sql_enum! {
    pub enum WarehouseType {
        Standard => "STANDARD",
        SnowparkOptimized => "SNOWPARK-OPTIMIZED",
    }
}

sql_enum! {
    pub enum WarehouseSize {
        XSmall => "XSMALL",
        Small => "SMALL",
        Medium => "MEDIUM",
        Large => "LARGE",
        XLarge => "XLARGE",
        XXLarge => "XXLARGE",
        XXXLarge => "XXXLARGE",
        X4Large => "X4LARGE",
        X5Large => "X5LARGE",
        X6Large => "X6LARGE",
    }
}

impl WarehouseSize {
    /// Accept both DDL keywords and the display names `SHOW` reports.
    pub fn normalize(value: &str) -> std::result::Result<Self, UnknownVariant> {
        let compact: String = value
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        let keyword = match compact.as_str() {
            "2XLARGE" => "XXLARGE",
            "3XLARGE" => "XXXLARGE",
            "4XLARGE" | "XXXXLARGE" => "X4LARGE",
            "5XLARGE" => "X5LARGE",
            "6XLARGE" => "X6LARGE",
            other => other,
        };
        keyword.parse().map_err(|_| UnknownVariant {
            kind: "WarehouseSize",
            value: value.to_string(),
        })
    }
}

sql_enum! {
    pub enum ScalingPolicy {
        Standard => "STANDARD",
        Economy => "ECONOMY",
    }
}

const CLUSTER_COUNT_MIN: i64 = 1;
const CLUSTER_COUNT_MAX: i64 = 10;

// ============================================================================
// Parameters
// ============================================================================

/// Properties accepted by both `CREATE WAREHOUSE` and `ALTER WAREHOUSE ... SET`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WarehouseParameters {
    pub warehouse_type: Option<WarehouseType>,
    pub warehouse_size: Option<WarehouseSize>,
    pub max_cluster_count: Option<i32>,
    pub min_cluster_count: Option<i32>,
    pub scaling_policy: Option<ScalingPolicy>,
    pub auto_suspend: Option<i32>,
    pub auto_resume: Option<bool>,
    pub resource_monitor: Option<AccountObjectIdentifier>,
    pub comment: Option<String>,
    pub enable_query_acceleration: Option<bool>,
    pub query_acceleration_max_scale_factor: Option<i32>,
    pub max_concurrency_level: Option<i32>,
    pub statement_queued_timeout_in_seconds: Option<i32>,
    pub statement_timeout_in_seconds: Option<i32>,
}

impl WarehouseParameters {
    fn any_set(&self) -> bool {
        self.warehouse_type.is_set()
            || self.warehouse_size.is_set()
            || self.max_cluster_count.is_set()
            || self.min_cluster_count.is_set()
            || self.scaling_policy.is_set()
            || self.auto_suspend.is_set()
            || self.auto_resume.is_set()
            || self.resource_monitor.is_set()
            || self.comment.is_set()
            || self.enable_query_acceleration.is_set()
            || self.query_acceleration_max_scale_factor.is_set()
            || self.max_concurrency_level.is_set()
            || self.statement_queued_timeout_in_seconds.is_set()
            || self.statement_timeout_in_seconds.is_set()
    }
}

impl ToSql for WarehouseParameters {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.parameter("WAREHOUSE_TYPE", self.warehouse_type.as_ref(), ParamStyle::single_quoted())
            .parameter("WAREHOUSE_SIZE", self.warehouse_size.as_ref(), ParamStyle::new())
            .parameter("MAX_CLUSTER_COUNT", self.max_cluster_count.as_ref(), ParamStyle::new())
            .parameter("MIN_CLUSTER_COUNT", self.min_cluster_count.as_ref(), ParamStyle::new())
            .parameter("SCALING_POLICY", self.scaling_policy.as_ref(), ParamStyle::new())
            .parameter("AUTO_SUSPEND", self.auto_suspend.as_ref(), ParamStyle::new())
            .parameter("AUTO_RESUME", self.auto_resume.as_ref(), ParamStyle::new())
            .parameter("RESOURCE_MONITOR", self.resource_monitor.as_ref(), ParamStyle::new())
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted())
            .parameter(
                "ENABLE_QUERY_ACCELERATION",
                self.enable_query_acceleration.as_ref(),
                ParamStyle::new(),
            )
            .parameter(
                "QUERY_ACCELERATION_MAX_SCALE_FACTOR",
                self.query_acceleration_max_scale_factor.as_ref(),
                ParamStyle::new(),
            )
            .parameter(
                "MAX_CONCURRENCY_LEVEL",
                self.max_concurrency_level.as_ref(),
                ParamStyle::new(),
            )
            .parameter(
                "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS",
                self.statement_queued_timeout_in_seconds.as_ref(),
                ParamStyle::new(),
            )
            .parameter(
                "STATEMENT_TIMEOUT_IN_SECONDS",
                self.statement_timeout_in_seconds.as_ref(),
                ParamStyle::new(),
            );
    }
}

impl Validate for WarehouseParameters {
    fn validate_into(&self, v: &mut Validator) {
        v.range("MaxClusterCount", self.max_cluster_count, CLUSTER_COUNT_MIN, CLUSTER_COUNT_MAX)
            .range("MinClusterCount", self.min_cluster_count, CLUSTER_COUNT_MIN, CLUSTER_COUNT_MAX)
            .range(
                "QueryAccelerationMaxScaleFactor",
                self.query_acceleration_max_scale_factor,
                0,
                100,
            )
            .opt_identifier("ResourceMonitor", self.resource_monitor.as_ref());
        if let (Some(min), Some(max)) = (self.min_cluster_count, self.max_cluster_count) {
            if min > max {
                v.push(ValidationError::InvalidValue {
                    field: "MinClusterCount",
                    value: format!("{} > MaxClusterCount {}", min, max),
                });
            }
        }
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateWarehouseOptions {
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub parameters: WarehouseParameters,
    pub initially_suspended: Option<bool>,
    pub tags: Vec<TagAssociation>,
}

impl ToSql for CreateWarehouseOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .sql("WAREHOUSE")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(None, Some(&self.parameters))
            .parameter(
                "INITIALLY_SUSPENDED",
                self.initially_suspended.as_ref(),
                ParamStyle::new(),
            );
        common::with_tags(b, &self.tags);
    }
}

impl Validate for CreateWarehouseOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .conflicting(
                "CreateWarehouseOptions",
                &[
                    ("OrReplace", self.or_replace.is_true()),
                    ("IfNotExists", self.if_not_exists.is_true()),
                ],
            )
            .nested(Some(&self.parameters));
        common::validate_tags(v, &self.tags, &[]);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WarehouseUnset {
    pub warehouse_type: bool,
    pub warehouse_size: bool,
    pub max_cluster_count: bool,
    pub min_cluster_count: bool,
    pub scaling_policy: bool,
    pub auto_suspend: bool,
    pub auto_resume: bool,
    pub resource_monitor: bool,
    pub comment: bool,
    pub enable_query_acceleration: bool,
    pub query_acceleration_max_scale_factor: bool,
    pub max_concurrency_level: bool,
    pub statement_queued_timeout_in_seconds: bool,
    pub statement_timeout_in_seconds: bool,
}

impl WarehouseUnset {
    fn flags(&self) -> [(bool, &'static str); 14] {
        [
            (self.warehouse_type, "WAREHOUSE_TYPE"),
            (self.warehouse_size, "WAREHOUSE_SIZE"),
            (self.max_cluster_count, "MAX_CLUSTER_COUNT"),
            (self.min_cluster_count, "MIN_CLUSTER_COUNT"),
            (self.scaling_policy, "SCALING_POLICY"),
            (self.auto_suspend, "AUTO_SUSPEND"),
            (self.auto_resume, "AUTO_RESUME"),
            (self.resource_monitor, "RESOURCE_MONITOR"),
            (self.comment, "COMMENT"),
            (self.enable_query_acceleration, "ENABLE_QUERY_ACCELERATION"),
            (
                self.query_acceleration_max_scale_factor,
                "QUERY_ACCELERATION_MAX_SCALE_FACTOR",
            ),
            (self.max_concurrency_level, "MAX_CONCURRENCY_LEVEL"),
            (
                self.statement_queued_timeout_in_seconds,
                "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS",
            ),
            (self.statement_timeout_in_seconds, "STATEMENT_TIMEOUT_IN_SECONDS"),
        ]
    }
}

impl ToSql for WarehouseUnset {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.keywords(&self.flags());
    }
}

impl Validate for WarehouseUnset {
    fn validate_into(&self, v: &mut Validator) {
        let fields: Vec<(&'static str, bool)> =
            self.flags().iter().map(|(set, key)| (*key, *set)).collect();
        v.at_least_one("WarehouseUnset", &fields);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterWarehouseOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub suspend: Option<bool>,
    pub resume: Option<bool>,
    pub if_suspended: Option<bool>,
    pub abort_all_queries: Option<bool>,
    pub rename_to: Option<AccountObjectIdentifier>,
    pub set: Option<WarehouseParameters>,
    pub unset: Option<WarehouseUnset>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl ToSql for AlterWarehouseOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER WAREHOUSE")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword(self.suspend, "SUSPEND")
            .keyword(self.resume, "RESUME")
            .keyword(self.if_suspended, "IF SUSPENDED")
            .keyword(self.abort_all_queries, "ABORT ALL QUERIES")
            .prefixed_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(Some("SET"), self.set.as_ref())
            .nested(Some("UNSET"), self.unset.as_ref());
        common::set_tags(b, &self.set_tags);
        common::unset_tags(b, &self.unset_tags);
    }
}

impl Validate for AlterWarehouseOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("RenameTo", self.rename_to.as_ref())
            .exactly_one(
                "AlterWarehouseOptions",
                &[
                    ("Suspend", self.suspend.is_true()),
                    ("Resume", self.resume.is_true()),
                    ("AbortAllQueries", self.abort_all_queries.is_true()),
                    ("RenameTo", self.rename_to.is_set()),
                    ("Set", self.set.is_set()),
                    ("Unset", self.unset.is_set()),
                    ("SetTags", self.set_tags.is_set()),
                    ("UnsetTags", self.unset_tags.is_set()),
                ],
            )
            .required_when(
                "Resume",
                self.resume.is_true(),
                self.if_suspended.is_true(),
                "IfSuspended is set",
            )
            .nested(self.unset.as_ref());
        if let Some(set) = &self.set {
            v.at_least_one("AlterWarehouseOptions.Set", &[("Parameters", set.any_set())])
                .nested(Some(set));
        }
        common::validate_tags(v, &self.set_tags, &self.unset_tags);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropWarehouseOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
}

impl ToSql for DropWarehouseOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP WAREHOUSE")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name);
    }
}

impl Validate for DropWarehouseOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowWarehouseOptions {
    pub like: Option<Like>,
}

impl ToSql for ShowWarehouseOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW WAREHOUSES").nested(None, self.like.as_ref());
    }
}

impl Validate for ShowWarehouseOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(self.like.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeWarehouseOptions {
    pub name: AccountObjectIdentifier,
}

impl ToSql for DescribeWarehouseOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DESCRIBE WAREHOUSE").identifier(&self.name);
    }
}

impl Validate for DescribeWarehouseOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct CreateWarehouseRequest {
    pub name: AccountObjectIdentifier,
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub parameters: WarehouseParameters,
    pub initially_suspended: Option<bool>,
    pub tags: Vec<TagAssociation>,
}

impl CreateWarehouseRequest {
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

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = Some(if_not_exists);
        self
    }

    pub fn with_parameters(mut self, parameters: WarehouseParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_initially_suspended(mut self, suspended: bool) -> Self {
        self.initially_suspended = Some(suspended);
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.tags = tags;
        self
    }

    pub fn into_options(self) -> CreateWarehouseOptions {
        CreateWarehouseOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name,
            parameters: self.parameters,
            initially_suspended: self.initially_suspended,
            tags: self.tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct AlterWarehouseRequest {
    pub name: AccountObjectIdentifier,
    pub if_exists: Option<bool>,
    pub suspend: Option<bool>,
    pub resume: Option<bool>,
    pub if_suspended: Option<bool>,
    pub abort_all_queries: Option<bool>,
    pub rename_to: Option<AccountObjectIdentifier>,
    pub set: Option<WarehouseParameters>,
    pub unset: Option<WarehouseUnset>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl AlterWarehouseRequest {
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

    pub fn with_suspend(mut self, suspend: bool) -> Self {
        self.suspend = Some(suspend);
        self
    }

    /// `RESUME [IF SUSPENDED]`
    pub fn with_resume(mut self, resume: bool, if_suspended: bool) -> Self {
        self.resume = Some(resume);
        self.if_suspended = Some(if_suspended);
        self
    }

    pub fn with_abort_all_queries(mut self, abort: bool) -> Self {
        self.abort_all_queries = Some(abort);
        self
    }

    pub fn with_rename_to(mut self, new_name: AccountObjectIdentifier) -> Self {
        self.rename_to = Some(new_name);
        self
    }

    pub fn with_set(mut self, set: WarehouseParameters) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_unset(mut self, unset: WarehouseUnset) -> Self {
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

    pub fn into_options(self) -> AlterWarehouseOptions {
        AlterWarehouseOptions {
            if_exists: self.if_exists,
            name: self.name,
            suspend: self.suspend,
            resume: self.resume,
            if_suspended: self.if_suspended,
            abort_all_queries: self.abort_all_queries,
            rename_to: self.rename_to,
            set: self.set,
            unset: self.unset,
            set_tags: self.set_tags,
            unset_tags: self.unset_tags,
        }
    }
}

// ============================================================================
// Rows and records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct WarehouseRow {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub state: String,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub warehouse_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub size: String,
    #[serde(deserialize_with = "lenient::string")]
    pub min_cluster_count: String,
    #[serde(deserialize_with = "lenient::string")]
    pub max_cluster_count: String,
    #[serde(deserialize_with = "lenient::string")]
    pub started_clusters: String,
    #[serde(deserialize_with = "lenient::string")]
    pub running: String,
    #[serde(deserialize_with = "lenient::string")]
    pub queued: String,
    #[serde(deserialize_with = "lenient::string")]
    pub is_default: String,
    #[serde(deserialize_with = "lenient::string")]
    pub is_current: String,
    #[serde(deserialize_with = "lenient::string")]
    pub auto_suspend: String,
    #[serde(deserialize_with = "lenient::string")]
    pub auto_resume: String,
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub owner: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
    #[serde(deserialize_with = "lenient::string")]
    pub enable_query_acceleration: String,
    #[serde(deserialize_with = "lenient::string")]
    pub query_acceleration_max_scale_factor: String,
    #[serde(deserialize_with = "lenient::string")]
    pub resource_monitor: String,
    #[serde(deserialize_with = "lenient::string")]
    pub scaling_policy: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse {
    pub name: String,
    pub state: String,
    pub warehouse_type: WarehouseType,
    pub size: WarehouseSize,
    pub min_cluster_count: i64,
    pub max_cluster_count: i64,
    pub started_clusters: i64,
    pub running: i64,
    pub queued: i64,
    pub is_default: bool,
    pub is_current: bool,
    pub auto_suspend: Option<i64>,
    pub auto_resume: bool,
    pub created_on: String,
    pub owner: String,
    pub comment: Option<String>,
    pub enable_query_acceleration: bool,
    pub query_acceleration_max_scale_factor: i64,
    pub resource_monitor: Option<String>,
    pub scaling_policy: Option<ScalingPolicy>,
}

impl Warehouse {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::Warehouse
    }
}

impl TryFrom<WarehouseRow> for Warehouse {
    type Error = Error;

    fn try_from(row: WarehouseRow) -> Result<Self> {
        let scaling_policy = match decode::non_empty(&row.scaling_policy) {
            Some(s) => Some(decode::parse_enum("scaling_policy", &s)?),
            None => None,
        };
        let resource_monitor =
            decode::non_empty(&row.resource_monitor).filter(|m| !m.eq_ignore_ascii_case("null"));
        Ok(Self {
            warehouse_type: decode::parse_enum("type", &row.warehouse_type)?,
            size: WarehouseSize::normalize(&row.size)?,
            min_cluster_count: decode::parse_int("min_cluster_count", &row.min_cluster_count)?,
            max_cluster_count: decode::parse_int("max_cluster_count", &row.max_cluster_count)?,
            started_clusters: decode::parse_int("started_clusters", &row.started_clusters)?,
            running: decode::parse_int("running", &row.running)?,
            queued: decode::parse_int("queued", &row.queued)?,
            is_default: decode::parse_flag("is_default", &row.is_default)?,
            is_current: decode::parse_flag("is_current", &row.is_current)?,
            auto_suspend: decode::parse_opt_int("auto_suspend", &row.auto_suspend)?,
            auto_resume: decode::parse_bool("auto_resume", &row.auto_resume)?,
            enable_query_acceleration: decode::parse_bool(
                "enable_query_acceleration",
                &row.enable_query_acceleration,
            )?,
            query_acceleration_max_scale_factor: decode::parse_int(
                "query_acceleration_max_scale_factor",
                &row.query_acceleration_max_scale_factor,
            )?,
            comment: decode::non_empty(&row.comment),
            scaling_policy,
            resource_monitor,
            name: row.name,
            state: row.state,
            created_on: row.created_on,
            owner: row.owner,
        })
    }
}

/// Row of `DESCRIBE WAREHOUSE`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct WarehouseDescription {
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub kind: String,
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Warehouse operations.
    Warehouses
);

impl<E: super::SqlExecutor> Warehouses<'_, E> {
    pub async fn create(&self, request: CreateWarehouseRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn alter(&self, request: AlterWarehouseRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn drop(&self, id: &AccountObjectIdentifier, if_exists: bool) -> Result<()> {
        let opts = DropWarehouseOptions {
            if_exists: Some(if_exists),
            name: id.clone(),
        };
        self.client.exec(&opts).await
    }

    pub async fn show(&self, like: Option<Like>) -> Result<Vec<Warehouse>> {
        let rows = self.client.query(&ShowWarehouseOptions { like }).await?;
        decode::from_rows::<WarehouseRow>(&rows)?
            .into_iter()
            .map(Warehouse::try_from)
            .collect()
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<Warehouse> {
        let warehouses = self.show(Some(Like::new(id.name()))).await?;
        find_by_name(warehouses, id.name(), id.fully_qualified_name(), |w| w.name.as_str())
    }

    pub async fn describe(&self, id: &AccountObjectIdentifier) -> Result<WarehouseDescription> {
        let opts = DescribeWarehouseOptions { name: id.clone() };
        let row = self.client.query_one(&opts, &id.fully_qualified_name()).await?;
        decode::from_row(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use serde_json::json;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("WH")
    }

    #[test]
    fn test_size_normalization() {
        assert_eq!(WarehouseSize::normalize("X-Small").unwrap(), WarehouseSize::XSmall);
        assert_eq!(WarehouseSize::normalize("Small").unwrap(), WarehouseSize::Small);
        assert_eq!(WarehouseSize::normalize("2X-Large").unwrap(), WarehouseSize::XXLarge);
        assert_eq!(WarehouseSize::normalize("X4LARGE").unwrap(), WarehouseSize::X4Large);
        assert_eq!(WarehouseSize::normalize("6X-Large").unwrap(), WarehouseSize::X6Large);
        assert!(WarehouseSize::normalize("Gigantic").is_err());
    }

    #[test]
    fn test_create() {
        let opts = CreateWarehouseRequest::new(id())
            .with_if_not_exists(true)
            .with_parameters(WarehouseParameters {
                warehouse_type: Some(WarehouseType::Standard),
                warehouse_size: Some(WarehouseSize::XSmall),
                max_cluster_count: Some(3),
                min_cluster_count: Some(1),
                scaling_policy: Some(ScalingPolicy::Economy),
                auto_suspend: Some(60),
                auto_resume: Some(true),
                comment: Some("etl".into()),
                ..Default::default()
            })
            .with_initially_suspended(true)
            .into_options();
        assert!(opts.validate().is_ok());
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @r#"CREATE WAREHOUSE IF NOT EXISTS "WH" WAREHOUSE_TYPE = 'STANDARD' WAREHOUSE_SIZE = XSMALL MAX_CLUSTER_COUNT = 3 MIN_CLUSTER_COUNT = 1 SCALING_POLICY = ECONOMY AUTO_SUSPEND = 60 AUTO_RESUME = true COMMENT = 'etl' INITIALLY_SUSPENDED = true"#
        );
    }

    #[test]
    fn test_cluster_count_validation() {
        let opts = CreateWarehouseRequest::new(id())
            .with_parameters(WarehouseParameters {
                max_cluster_count: Some(11),
                min_cluster_count: Some(0),
                ..Default::default()
            })
            .into_options();
        let err = opts.validate().unwrap_err();
        assert!(err.contains(&ValidationError::OutOfRange {
            field: "MaxClusterCount",
            min: 1,
            max: 10,
        }));
        assert!(err.contains(&ValidationError::OutOfRange {
            field: "MinClusterCount",
            min: 1,
            max: 10,
        }));

        let inverted = WarehouseParameters {
            max_cluster_count: Some(2),
            min_cluster_count: Some(4),
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate().unwrap_err().errors(),
            [ValidationError::InvalidValue { field: "MinClusterCount", .. }]
        ));
    }

    #[test]
    fn test_alter_variants() {
        let resume = AlterWarehouseRequest::new(id()).with_resume(true, true).into_options();
        assert_eq!(resume.to_sql().unwrap(), "ALTER WAREHOUSE \"WH\" RESUME IF SUSPENDED");
        assert!(resume.validate().is_ok());

        let set = AlterWarehouseRequest::new(id())
            .with_if_exists(true)
            .with_set(WarehouseParameters {
                warehouse_size: Some(WarehouseSize::Large),
                ..Default::default()
            })
            .into_options();
        assert_eq!(
            set.to_sql().unwrap(),
            "ALTER WAREHOUSE IF EXISTS \"WH\" SET WAREHOUSE_SIZE = LARGE"
        );

        let unset = AlterWarehouseRequest::new(id())
            .with_unset(WarehouseUnset {
                auto_suspend: true,
                resource_monitor: true,
                ..Default::default()
            })
            .into_options();
        assert_eq!(
            unset.to_sql().unwrap(),
            "ALTER WAREHOUSE \"WH\" UNSET AUTO_SUSPEND, RESOURCE_MONITOR"
        );

        let abort = AlterWarehouseRequest::new(id())
            .with_abort_all_queries(true)
            .into_options();
        assert_eq!(abort.to_sql().unwrap(), "ALTER WAREHOUSE \"WH\" ABORT ALL QUERIES");
    }

    #[test]
    fn test_alter_validation() {
        let empty_set = AlterWarehouseRequest::new(id())
            .with_set(WarehouseParameters::default())
            .into_options();
        assert!(matches!(
            empty_set.validate().unwrap_err().errors(),
            [ValidationError::AtLeastOneOf { .. }]
        ));

        let dangling = AlterWarehouseOptions {
            name: id(),
            suspend: Some(true),
            if_suspended: Some(true),
            ..Default::default()
        };
        assert!(dangling
            .validate()
            .unwrap_err()
            .contains(&ValidationError::RequiredWhen {
                field: "Resume",
                condition: "IfSuspended is set",
            }));
    }

    #[test]
    fn test_show_and_describe() {
        let show = ShowWarehouseOptions {
            like: Some(Like::new("W%")),
        };
        assert_eq!(show.to_sql().unwrap(), "SHOW WAREHOUSES LIKE 'W%'");
        assert_eq!(
            DescribeWarehouseOptions { name: id() }.to_sql().unwrap(),
            "DESCRIBE WAREHOUSE \"WH\""
        );
    }

    #[test]
    fn test_decode_row() {
        let row = json!({
            "name": "WH",
            "state": "SUSPENDED",
            "type": "STANDARD",
            "size": "X-Small",
            "min_cluster_count": 1,
            "max_cluster_count": 1,
            "started_clusters": 0,
            "running": 0,
            "queued": 0,
            "is_default": "N",
            "is_current": "Y",
            "auto_suspend": 600,
            "auto_resume": "true",
            "owner": "SYSADMIN",
            "comment": "",
            "enable_query_acceleration": "false",
            "query_acceleration_max_scale_factor": 8,
            "resource_monitor": "null",
            "scaling_policy": "STANDARD"
        });
        let warehouse =
            Warehouse::try_from(decode::from_row::<WarehouseRow>(row.as_object().unwrap()).unwrap())
                .unwrap();
        assert_eq!(warehouse.id(), id());
        assert_eq!(warehouse.size, WarehouseSize::XSmall);
        assert_eq!(warehouse.warehouse_type, WarehouseType::Standard);
        assert_eq!(warehouse.auto_suspend, Some(600));
        assert!(warehouse.is_current);
        assert_eq!(warehouse.resource_monitor, None);
        assert_eq!(warehouse.scaling_policy, Some(ScalingPolicy::Standard));
    }
}
