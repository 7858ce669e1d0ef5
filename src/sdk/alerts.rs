//! Alerts.
//!
//! ```sql
//! CREATE [OR REPLACE] ALERT [IF NOT EXISTS] <name>
//!   WAREHOUSE = <warehouse>
//!   SCHEDULE = '<schedule>'
//!   [COMMENT = '<comment>']
//!   IF (EXISTS (<condition>))
//!   THEN <action>
//! ```

use serde::Deserialize;

use super::common::{In, Like, LimitFrom, ObjectType, Schedule};
use super::decode::{self, lenient};
use super::{facade, find_by_name};
use crate::error::{Error, Result};
use crate::sql::{
    sql_enum, AccountObjectIdentifier, ObjectIdentifier, ParamStyle, SchemaObjectIdentifier,
    SqlBuilder, ToSql,
};
use crate::validation::{Flag, Presence, Validate, Validator};

sql_enum! {
    /// `ALTER ALERT ... RESUME | SUSPEND`
    pub enum AlertAction {
        Resume => "RESUME",
        Suspend => "SUSPEND",
    }
}

sql_enum! {
    pub enum AlertState {
        Started => "STARTED",
        Suspended => "SUSPENDED",
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAlertOptions {
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub warehouse: AccountObjectIdentifier,
    pub schedule: Schedule,
    pub comment: Option<String>,
    pub condition: String,
    pub action: String,
}

impl ToSql for CreateAlertOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .sql("ALERT")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter("WAREHOUSE", Some(&self.warehouse), ParamStyle::new())
            .parameter("SCHEDULE", Some(&self.schedule), ParamStyle::single_quoted())
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted())
            .raw(&format!("IF (EXISTS ({}))", self.condition))
            .sql("THEN")
            .raw(&self.action);
    }
}

impl Validate for CreateAlertOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .identifier("Warehouse", &self.warehouse)
            .conflicting(
                "CreateAlertOptions",
                &[
                    ("OrReplace", self.or_replace.is_true()),
                    ("IfNotExists", self.if_not_exists.is_true()),
                ],
            )
            .non_blank("Condition", &self.condition)
            .non_blank("Action", &self.action);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlertSet {
    pub warehouse: Option<AccountObjectIdentifier>,
    pub schedule: Option<Schedule>,
    pub comment: Option<String>,
}

impl ToSql for AlertSet {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.parameter("WAREHOUSE", self.warehouse.as_ref(), ParamStyle::new())
            .parameter("SCHEDULE", self.schedule.as_ref(), ParamStyle::single_quoted())
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
    }
}

impl Validate for AlertSet {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "AlertSet",
            &[
                ("Warehouse", self.warehouse.is_set()),
                ("Schedule", self.schedule.is_set()),
                ("Comment", self.comment.is_set()),
            ],
        )
        .opt_identifier("Warehouse", self.warehouse.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlertUnset {
    pub warehouse: bool,
    pub schedule: bool,
    pub comment: bool,
}

impl ToSql for AlertUnset {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.keywords(&[
            (self.warehouse, "WAREHOUSE"),
            (self.schedule, "SCHEDULE"),
            (self.comment, "COMMENT"),
        ]);
    }
}

impl Validate for AlertUnset {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "AlertUnset",
            &[
                ("Warehouse", self.warehouse),
                ("Schedule", self.schedule),
                ("Comment", self.comment),
            ],
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterAlertOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub action: Option<AlertAction>,
    pub set: Option<AlertSet>,
    pub unset: Option<AlertUnset>,
    pub modify_condition: Option<String>,
    pub modify_action: Option<String>,
}

impl ToSql for AlterAlertOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER ALERT")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(None, self.action.as_ref())
            .nested(Some("SET"), self.set.as_ref())
            .nested(Some("UNSET"), self.unset.as_ref());
        if let Some(condition) = &self.modify_condition {
            b.sql("MODIFY CONDITION").raw(&format!("EXISTS ({})", condition));
        }
        if let Some(action) = &self.modify_action {
            b.sql("MODIFY ACTION").raw(action);
        }
    }
}

impl Validate for AlterAlertOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .exactly_one(
                "AlterAlertOptions",
                &[
                    ("Action", self.action.is_set()),
                    ("Set", self.set.is_set()),
                    ("Unset", self.unset.is_set()),
                    ("ModifyCondition", self.modify_condition.is_set()),
                    ("ModifyAction", self.modify_action.is_set()),
                ],
            )
            .opt_non_blank("ModifyCondition", self.modify_condition.as_deref())
            .opt_non_blank("ModifyAction", self.modify_action.as_deref())
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropAlertOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
}

impl ToSql for DropAlertOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP ALERT")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name);
    }
}

impl Validate for DropAlertOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowAlertOptions {
    pub terse: Option<bool>,
    pub like: Option<Like>,
    pub in_: Option<In>,
    pub starts_with: Option<String>,
    pub limit: Option<LimitFrom>,
}

impl ToSql for ShowAlertOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW")
            .keyword(self.terse, "TERSE")
            .sql("ALERTS")
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

impl Validate for ShowAlertOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(self.like.as_ref())
            .nested(self.in_.as_ref())
            .nested(self.limit.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeAlertOptions {
    pub name: SchemaObjectIdentifier,
}

impl ToSql for DescribeAlertOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DESCRIBE ALERT").identifier(&self.name);
    }
}

impl Validate for DescribeAlertOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct CreateAlertRequest {
    pub name: SchemaObjectIdentifier,
    pub warehouse: AccountObjectIdentifier,
    pub schedule: Schedule,
    pub condition: String,
    pub action: String,
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub comment: Option<String>,
}

impl CreateAlertRequest {
    pub fn new(
        name: SchemaObjectIdentifier,
        warehouse: AccountObjectIdentifier,
        schedule: Schedule,
        condition: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            name,
            warehouse,
            schedule,
            condition: condition.into(),
            action: action.into(),
            or_replace: None,
            if_not_exists: None,
            comment: None,
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

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn into_options(self) -> CreateAlertOptions {
        CreateAlertOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name,
            warehouse: self.warehouse,
            schedule: self.schedule,
            comment: self.comment,
            condition: self.condition,
            action: self.action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct AlterAlertRequest {
    pub name: SchemaObjectIdentifier,
    pub if_exists: Option<bool>,
    pub action: Option<AlertAction>,
    pub set: Option<AlertSet>,
    pub unset: Option<AlertUnset>,
    pub modify_condition: Option<String>,
    pub modify_action: Option<String>,
}

impl AlterAlertRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn with_action(mut self, action: AlertAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_set(mut self, set: AlertSet) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_unset(mut self, unset: AlertUnset) -> Self {
        self.unset = Some(unset);
        self
    }

    pub fn with_modify_condition(mut self, condition: impl Into<String>) -> Self {
        self.modify_condition = Some(condition.into());
        self
    }

    pub fn with_modify_action(mut self, action: impl Into<String>) -> Self {
        self.modify_action = Some(action.into());
        self
    }

    pub fn into_options(self) -> AlterAlertOptions {
        AlterAlertOptions {
            if_exists: self.if_exists,
            name: self.name,
            action: self.action,
            set: self.set,
            unset: self.unset,
            modify_condition: self.modify_condition,
            modify_action: self.modify_action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct ShowAlertRequest {
    pub terse: Option<bool>,
    pub like: Option<Like>,
    pub in_: Option<In>,
    pub starts_with: Option<String>,
    pub limit: Option<LimitFrom>,
}

impl ShowAlertRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_terse(mut self, terse: bool) -> Self {
        self.terse = Some(terse);
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

    pub fn into_options(self) -> ShowAlertOptions {
        ShowAlertOptions {
            terse: self.terse,
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

/// Row of `SHOW ALERTS` and `DESCRIBE ALERT`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AlertRow {
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub database_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub schema_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub owner: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse: String,
    #[serde(deserialize_with = "lenient::string")]
    pub schedule: String,
    #[serde(deserialize_with = "lenient::string")]
    pub state: String,
    #[serde(deserialize_with = "lenient::string")]
    pub condition: String,
    #[serde(deserialize_with = "lenient::string")]
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub created_on: String,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: String,
    pub comment: Option<String>,
    pub warehouse: Option<String>,
    pub schedule: Option<Schedule>,
    pub state: AlertState,
    pub condition: String,
    pub action: String,
}

impl Alert {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::Alert
    }
}

impl TryFrom<AlertRow> for Alert {
    type Error = Error;

    fn try_from(row: AlertRow) -> Result<Self> {
        let schedule = match decode::non_empty(&row.schedule) {
            Some(s) => Some(decode::parse_enum("schedule", &s)?),
            None => None,
        };
        Ok(Self {
            state: decode::parse_enum("state", &row.state)?,
            schedule,
            comment: decode::non_empty(&row.comment),
            warehouse: decode::non_empty(&row.warehouse),
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: row.owner,
            condition: row.condition,
            action: row.action,
        })
    }
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Alert operations.
    Alerts
);

impl<E: super::SqlExecutor> Alerts<'_, E> {
    pub async fn create(&self, request: CreateAlertRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn alter(&self, request: AlterAlertRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn drop(&self, id: &SchemaObjectIdentifier, if_exists: bool) -> Result<()> {
        let opts = DropAlertOptions {
            if_exists: Some(if_exists),
            name: id.clone(),
        };
        self.client.exec(&opts).await
    }

    pub async fn show(&self, request: ShowAlertRequest) -> Result<Vec<Alert>> {
        let rows = self.client.query(&request.into_options()).await?;
        decode::from_rows::<AlertRow>(&rows)?
            .into_iter()
            .map(Alert::try_from)
            .collect()
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Alert> {
        let request = ShowAlertRequest::new()
            .with_like(Like::new(id.name()))
            .with_in(In::schema(id.schema_id()));
        let alerts = self.show(request).await?;
        find_by_name(alerts, id.name(), id.fully_qualified_name(), |a| a.name.as_str())
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Alert> {
        let opts = DescribeAlertOptions { name: id.clone() };
        let row = self.client.query_one(&opts, &id.fully_qualified_name()).await?;
        decode::from_row::<AlertRow>(&row)?.try_into()
    }
}
