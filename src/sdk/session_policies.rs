//! Session policies.

use serde::Deserialize;

use super::common::{self, In, Like, ObjectType, TagAssociation};
use super::decode::{self, lenient};
use super::{facade, find_by_name};
use crate::error::{Error, Result};
use crate::sql::{ObjectIdentifier, ParamStyle, SchemaObjectIdentifier, SqlBuilder, ToSql};
use crate::validation::{Flag, Presence, Validate, Validator};

const IDLE_TIMEOUT_MIN: i64 = 5;
const IDLE_TIMEOUT_MAX: i64 = 240;

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateSessionPolicyOptions {
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub session_idle_timeout_mins: Option<i32>,
    pub session_ui_idle_timeout_mins: Option<i32>,
    pub comment: Option<String>,
}

impl ToSql for CreateSessionPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .sql("SESSION POLICY")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter(
                "SESSION_IDLE_TIMEOUT_MINS",
                self.session_idle_timeout_mins.as_ref(),
                ParamStyle::new(),
            )
            .parameter(
                "SESSION_UI_IDLE_TIMEOUT_MINS",
                self.session_ui_idle_timeout_mins.as_ref(),
                ParamStyle::new(),
            )
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
    }
}

impl Validate for CreateSessionPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .conflicting(
                "CreateSessionPolicyOptions",
                &[
                    ("OrReplace", self.or_replace.is_true()),
                    ("IfNotExists", self.if_not_exists.is_true()),
                ],
            )
            .range(
                "SessionIdleTimeoutMins",
                self.session_idle_timeout_mins,
                IDLE_TIMEOUT_MIN,
                IDLE_TIMEOUT_MAX,
            )
            .range(
                "SessionUiIdleTimeoutMins",
                self.session_ui_idle_timeout_mins,
                IDLE_TIMEOUT_MIN,
                IDLE_TIMEOUT_MAX,
            );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionPolicySet {
    pub session_idle_timeout_mins: Option<i32>,
    pub session_ui_idle_timeout_mins: Option<i32>,
    pub comment: Option<String>,
}

impl ToSql for SessionPolicySet {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.parameter(
            "SESSION_IDLE_TIMEOUT_MINS",
            self.session_idle_timeout_mins.as_ref(),
            ParamStyle::new(),
        )
        .parameter(
            "SESSION_UI_IDLE_TIMEOUT_MINS",
            self.session_ui_idle_timeout_mins.as_ref(),
            ParamStyle::new(),
        )
        .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
    }
}

impl Validate for SessionPolicySet {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "SessionPolicySet",
            &[
                ("SessionIdleTimeoutMins", self.session_idle_timeout_mins.is_set()),
                ("SessionUiIdleTimeoutMins", self.session_ui_idle_timeout_mins.is_set()),
                ("Comment", self.comment.is_set()),
            ],
        )
        .range(
            "SessionIdleTimeoutMins",
            self.session_idle_timeout_mins,
            IDLE_TIMEOUT_MIN,
            IDLE_TIMEOUT_MAX,
        )
        .range(
            "SessionUiIdleTimeoutMins",
            self.session_ui_idle_timeout_mins,
            IDLE_TIMEOUT_MIN,
            IDLE_TIMEOUT_MAX,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionPolicyUnset {
    pub session_idle_timeout_mins: bool,
    pub session_ui_idle_timeout_mins: bool,
    pub comment: bool,
}

impl ToSql for SessionPolicyUnset {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.keywords(&[
            (self.session_idle_timeout_mins, "SESSION_IDLE_TIMEOUT_MINS"),
            (self.session_ui_idle_timeout_mins, "SESSION_UI_IDLE_TIMEOUT_MINS"),
            (self.comment, "COMMENT"),
        ]);
    }
}

impl Validate for SessionPolicyUnset {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "SessionPolicyUnset",
            &[
                ("SessionIdleTimeoutMins", self.session_idle_timeout_mins),
                ("SessionUiIdleTimeoutMins", self.session_ui_idle_timeout_mins),
                ("Comment", self.comment),
            ],
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterSessionPolicyOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<SessionPolicySet>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
    pub unset: Option<SessionPolicyUnset>,
}

impl ToSql for AlterSessionPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER SESSION POLICY")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .prefixed_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(Some("SET"), self.set.as_ref());
        common::set_tags(b, &self.set_tags);
        common::unset_tags(b, &self.unset_tags);
        b.nested(Some("UNSET"), self.unset.as_ref());
    }
}

impl Validate for AlterSessionPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("RenameTo", self.rename_to.as_ref())
            .exactly_one(
                "AlterSessionPolicyOptions",
                &[
                    ("RenameTo", self.rename_to.is_set()),
                    ("Set", self.set.is_set()),
                    ("SetTags", self.set_tags.is_set()),
                    ("UnsetTags", self.unset_tags.is_set()),
                    ("Unset", self.unset.is_set()),
                ],
            )
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
        common::validate_tags(v, &self.set_tags, &self.unset_tags);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropSessionPolicyOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
}

impl ToSql for DropSessionPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP SESSION POLICY")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name);
    }
}

impl Validate for DropSessionPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowSessionPolicyOptions {
    pub like: Option<Like>,
    pub in_: Option<In>,
}

impl ToSql for ShowSessionPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW SESSION POLICIES")
            .nested(None, self.like.as_ref())
            .nested(None, self.in_.as_ref());
    }
}

impl Validate for ShowSessionPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(self.like.as_ref()).nested(self.in_.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeSessionPolicyOptions {
    pub name: SchemaObjectIdentifier,
}

impl ToSql for DescribeSessionPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DESCRIBE SESSION POLICY").identifier(&self.name);
    }
}

impl Validate for DescribeSessionPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct CreateSessionPolicyRequest {
    pub name: SchemaObjectIdentifier,
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub session_idle_timeout_mins: Option<i32>,
    pub session_ui_idle_timeout_mins: Option<i32>,
    pub comment: Option<String>,
}

impl CreateSessionPolicyRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
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

    pub fn with_session_idle_timeout_mins(mut self, mins: i32) -> Self {
        self.session_idle_timeout_mins = Some(mins);
        self
    }

    pub fn with_session_ui_idle_timeout_mins(mut self, mins: i32) -> Self {
        self.session_ui_idle_timeout_mins = Some(mins);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn into_options(self) -> CreateSessionPolicyOptions {
        CreateSessionPolicyOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name,
            session_idle_timeout_mins: self.session_idle_timeout_mins,
            session_ui_idle_timeout_mins: self.session_ui_idle_timeout_mins,
            comment: self.comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct AlterSessionPolicyRequest {
    pub name: SchemaObjectIdentifier,
    pub if_exists: Option<bool>,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<SessionPolicySet>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
    pub unset: Option<SessionPolicyUnset>,
}

impl AlterSessionPolicyRequest {
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

    pub fn with_rename_to(mut self, new_name: SchemaObjectIdentifier) -> Self {
        self.rename_to = Some(new_name);
        self
    }

    pub fn with_set(mut self, set: SessionPolicySet) -> Self {
        self.set = Some(set);
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

    pub fn with_unset(mut self, unset: SessionPolicyUnset) -> Self {
        self.unset = Some(unset);
        self
    }

    pub fn into_options(self) -> AlterSessionPolicyOptions {
        AlterSessionPolicyOptions {
            if_exists: self.if_exists,
            name: self.name,
            rename_to: self.rename_to,
            set: self.set,
            set_tags: self.set_tags,
            unset_tags: self.unset_tags,
            unset: self.unset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct ShowSessionPolicyRequest {
    pub like: Option<Like>,
    pub in_: Option<In>,
}

impl ShowSessionPolicyRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_like(mut self, like: Like) -> Self {
        self.like = Some(like);
        self
    }

    pub fn with_in(mut self, in_: In) -> Self {
        self.in_ = Some(in_);
        self
    }

    pub fn into_options(self) -> ShowSessionPolicyOptions {
        ShowSessionPolicyOptions {
            like: self.like,
            in_: self.in_,
        }
    }
}

// ============================================================================
// Rows and records
// ============================================================================

/// Row of `SHOW SESSION POLICIES`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SessionPolicyRow {
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub database_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub schema_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::string")]
    pub owner: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
    #[serde(deserialize_with = "lenient::string")]
    pub options: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPolicy {
    pub created_on: String,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub kind: String,
    pub owner: String,
    pub comment: Option<String>,
    pub options: String,
}

impl SessionPolicy {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::SessionPolicy
    }
}

impl From<SessionPolicyRow> for SessionPolicy {
    fn from(row: SessionPolicyRow) -> Self {
        Self {
            comment: decode::non_empty(&row.comment),
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            kind: row.kind,
            owner: row.owner,
            options: row.options,
        }
    }
}

/// Row of `DESCRIBE SESSION POLICY`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SessionPolicyDescriptionRow {
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub session_idle_timeout_mins: String,
    #[serde(deserialize_with = "lenient::string")]
    pub session_ui_idle_timeout_mins: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPolicyDescription {
    pub created_on: String,
    pub name: String,
    pub session_idle_timeout_mins: i64,
    pub session_ui_idle_timeout_mins: i64,
    pub comment: Option<String>,
}

impl TryFrom<SessionPolicyDescriptionRow> for SessionPolicyDescription {
    type Error = Error;

    fn try_from(row: SessionPolicyDescriptionRow) -> Result<Self> {
        Ok(Self {
            session_idle_timeout_mins: decode::parse_int(
                "session_idle_timeout_mins",
                &row.session_idle_timeout_mins,
            )?,
            session_ui_idle_timeout_mins: decode::parse_int(
                "session_ui_idle_timeout_mins",
                &row.session_ui_idle_timeout_mins,
            )?,
            comment: decode::non_null(&row.comment),
            created_on: row.created_on,
            name: row.name,
        })
    }
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Session policy operations.
    SessionPolicies
);

impl<E: super::SqlExecutor> SessionPolicies<'_, E> {
    pub async fn create(&self, request: CreateSessionPolicyRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn alter(&self, request: AlterSessionPolicyRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn drop(&self, id: &SchemaObjectIdentifier, if_exists: bool) -> Result<()> {
        let opts = DropSessionPolicyOptions {
            if_exists: Some(if_exists),
            name: id.clone(),
        };
        self.client.exec(&opts).await
    }

    pub async fn show(&self, request: ShowSessionPolicyRequest) -> Result<Vec<SessionPolicy>> {
        let rows = self.client.query(&request.into_options()).await?;
        Ok(decode::from_rows::<SessionPolicyRow>(&rows)?
            .into_iter()
            .map(SessionPolicy::from)
            .collect())
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<SessionPolicy> {
        let request = ShowSessionPolicyRequest::new()
            .with_like(Like::new(id.name()))
            .with_in(In::schema(id.schema_id()));
        let policies = self.show(request).await?;
        find_by_name(policies, id.name(), id.fully_qualified_name(), |p| p.name.as_str())
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<SessionPolicyDescription> {
        let opts = DescribeSessionPolicyOptions { name: id.clone() };
        let row = self.client.query_one(&opts, &id.fully_qualified_name()).await?;
        decode::from_row::<SessionPolicyDescriptionRow>(&row)?.try_into()
    }
}
