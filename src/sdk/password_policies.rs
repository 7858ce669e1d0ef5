//! Password policies.
//!
//! The eleven `PASSWORD_*` parameters are shared between `CREATE` and
//! `ALTER ... SET`, so they live in one [`PasswordPolicyParameters`] record
//! that both statements nest.

use serde::Deserialize;

use super::common::{In, Like, LimitFrom, ObjectType};
use super::decode::{self, lenient, DescribeAccumulator};
use super::{facade, find_by_name};
use crate::error::Result;
use crate::sql::{ObjectIdentifier, ParamStyle, SchemaObjectIdentifier, SqlBuilder, ToSql};
use crate::validation::{Flag, Presence, Validate, Validator};

// ============================================================================
// Parameters
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasswordPolicyParameters {
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub min_upper_case_chars: Option<i32>,
    pub min_lower_case_chars: Option<i32>,
    pub min_numeric_chars: Option<i32>,
    pub min_special_chars: Option<i32>,
    pub min_age_days: Option<i32>,
    pub max_age_days: Option<i32>,
    pub max_retries: Option<i32>,
    pub lockout_time_mins: Option<i32>,
    pub history: Option<i32>,
}

impl PasswordPolicyParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_length(mut self, n: i32) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn with_max_length(mut self, n: i32) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn with_min_upper_case_chars(mut self, n: i32) -> Self {
        self.min_upper_case_chars = Some(n);
        self
    }

    pub fn with_min_lower_case_chars(mut self, n: i32) -> Self {
        self.min_lower_case_chars = Some(n);
        self
    }

    pub fn with_min_numeric_chars(mut self, n: i32) -> Self {
        self.min_numeric_chars = Some(n);
        self
    }

    pub fn with_min_special_chars(mut self, n: i32) -> Self {
        self.min_special_chars = Some(n);
        self
    }

    pub fn with_min_age_days(mut self, n: i32) -> Self {
        self.min_age_days = Some(n);
        self
    }

    pub fn with_max_age_days(mut self, n: i32) -> Self {
        self.max_age_days = Some(n);
        self
    }

    pub fn with_max_retries(mut self, n: i32) -> Self {
        self.max_retries = Some(n);
        self
    }

    pub fn with_lockout_time_mins(mut self, n: i32) -> Self {
        self.lockout_time_mins = Some(n);
        self
    }

    pub fn with_history(mut self, n: i32) -> Self {
        self.history = Some(n);
        self
    }

    /// `(keyword, field name, value, min, max)` in emission order.
    fn entries(&self) -> [(&'static str, &'static str, Option<i32>, i64, i64); 11] {
        [
            ("PASSWORD_MIN_LENGTH", "PasswordMinLength", self.min_length, 8, 256),
            ("PASSWORD_MAX_LENGTH", "PasswordMaxLength", self.max_length, 8, 256),
            (
                "PASSWORD_MIN_UPPER_CASE_CHARS",
                "PasswordMinUpperCaseChars",
                self.min_upper_case_chars,
                0,
                256,
            ),
            (
                "PASSWORD_MIN_LOWER_CASE_CHARS",
                "PasswordMinLowerCaseChars",
                self.min_lower_case_chars,
                0,
                256,
            ),
            (
                "PASSWORD_MIN_NUMERIC_CHARS",
                "PasswordMinNumericChars",
                self.min_numeric_chars,
                0,
                256,
            ),
            (
                "PASSWORD_MIN_SPECIAL_CHARS",
                "PasswordMinSpecialChars",
                self.min_special_chars,
                0,
                256,
            ),
            ("PASSWORD_MIN_AGE_DAYS", "PasswordMinAgeDays", self.min_age_days, 0, 999),
            ("PASSWORD_MAX_AGE_DAYS", "PasswordMaxAgeDays", self.max_age_days, 0, 999),
            ("PASSWORD_MAX_RETRIES", "PasswordMaxRetries", self.max_retries, 1, 10),
            (
                "PASSWORD_LOCKOUT_TIME_MINS",
                "PasswordLockoutTimeMins",
                self.lockout_time_mins,
                1,
                999,
            ),
            ("PASSWORD_HISTORY", "PasswordHistory", self.history, 0, 24),
        ]
    }

    fn any_set(&self) -> bool {
        self.entries().iter().any(|(_, _, value, _, _)| value.is_some())
    }
}

impl ToSql for PasswordPolicyParameters {
    fn write_sql(&self, b: &mut SqlBuilder) {
        for (key, _, value, _, _) in self.entries() {
            b.parameter(key, value.as_ref(), ParamStyle::new());
        }
    }
}

impl Validate for PasswordPolicyParameters {
    fn validate_into(&self, v: &mut Validator) {
        for (_, field, value, min, max) in self.entries() {
            v.range(field, value, min, max);
        }
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreatePasswordPolicyOptions {
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub parameters: PasswordPolicyParameters,
    pub comment: Option<String>,
}

impl ToSql for CreatePasswordPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .sql("PASSWORD POLICY")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .nested(None, Some(&self.parameters))
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
    }
}

impl Validate for CreatePasswordPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .conflicting(
                "CreatePasswordPolicyOptions",
                &[
                    ("OrReplace", self.or_replace.is_true()),
                    ("IfNotExists", self.if_not_exists.is_true()),
                ],
            )
            .nested(Some(&self.parameters));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasswordPolicySet {
    pub parameters: PasswordPolicyParameters,
    pub comment: Option<String>,
}

impl ToSql for PasswordPolicySet {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.nested(None, Some(&self.parameters))
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
    }
}

impl Validate for PasswordPolicySet {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "PasswordPolicySet",
            &[
                ("Parameters", self.parameters.any_set()),
                ("Comment", self.comment.is_set()),
            ],
        )
        .nested(Some(&self.parameters));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasswordPolicyUnset {
    pub min_length: bool,
    pub max_length: bool,
    pub min_upper_case_chars: bool,
    pub min_lower_case_chars: bool,
    pub min_numeric_chars: bool,
    pub min_special_chars: bool,
    pub min_age_days: bool,
    pub max_age_days: bool,
    pub max_retries: bool,
    pub lockout_time_mins: bool,
    pub history: bool,
    pub comment: bool,
}

impl PasswordPolicyUnset {
    fn flags(&self) -> [(bool, &'static str); 12] {
        [
            (self.min_length, "PASSWORD_MIN_LENGTH"),
            (self.max_length, "PASSWORD_MAX_LENGTH"),
            (self.min_upper_case_chars, "PASSWORD_MIN_UPPER_CASE_CHARS"),
            (self.min_lower_case_chars, "PASSWORD_MIN_LOWER_CASE_CHARS"),
            (self.min_numeric_chars, "PASSWORD_MIN_NUMERIC_CHARS"),
            (self.min_special_chars, "PASSWORD_MIN_SPECIAL_CHARS"),
            (self.min_age_days, "PASSWORD_MIN_AGE_DAYS"),
            (self.max_age_days, "PASSWORD_MAX_AGE_DAYS"),
            (self.max_retries, "PASSWORD_MAX_RETRIES"),
            (self.lockout_time_mins, "PASSWORD_LOCKOUT_TIME_MINS"),
            (self.history, "PASSWORD_HISTORY"),
            (self.comment, "COMMENT"),
        ]
    }
}

impl ToSql for PasswordPolicyUnset {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.keywords(&self.flags());
    }
}

impl Validate for PasswordPolicyUnset {
    fn validate_into(&self, v: &mut Validator) {
        let fields: Vec<(&'static str, bool)> =
            self.flags().iter().map(|(set, key)| (*key, *set)).collect();
        v.at_least_one("PasswordPolicyUnset", &fields);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterPasswordPolicyOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<PasswordPolicySet>,
    pub unset: Option<PasswordPolicyUnset>,
}

impl ToSql for AlterPasswordPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER PASSWORD POLICY")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .prefixed_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(Some("SET"), self.set.as_ref())
            .nested(Some("UNSET"), self.unset.as_ref());
    }
}

impl Validate for AlterPasswordPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("RenameTo", self.rename_to.as_ref())
            .exactly_one(
                "AlterPasswordPolicyOptions",
                &[
                    ("RenameTo", self.rename_to.is_set()),
                    ("Set", self.set.is_set()),
                    ("Unset", self.unset.is_set()),
                ],
            )
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropPasswordPolicyOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
}

impl ToSql for DropPasswordPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP PASSWORD POLICY")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name);
    }
}

impl Validate for DropPasswordPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowPasswordPolicyOptions {
    pub like: Option<Like>,
    pub in_: Option<In>,
    pub limit: Option<LimitFrom>,
}

impl ToSql for ShowPasswordPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW PASSWORD POLICIES")
            .nested(None, self.like.as_ref())
            .nested(None, self.in_.as_ref())
            .nested(None, self.limit.as_ref());
    }
}

impl Validate for ShowPasswordPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(self.like.as_ref())
            .nested(self.in_.as_ref())
            .nested(self.limit.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribePasswordPolicyOptions {
    pub name: SchemaObjectIdentifier,
}

impl ToSql for DescribePasswordPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DESCRIBE PASSWORD POLICY").identifier(&self.name);
    }
}

impl Validate for DescribePasswordPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct CreatePasswordPolicyRequest {
    pub name: SchemaObjectIdentifier,
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub parameters: PasswordPolicyParameters,
    pub comment: Option<String>,
}

impl CreatePasswordPolicyRequest {
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

    pub fn with_parameters(mut self, parameters: PasswordPolicyParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn into_options(self) -> CreatePasswordPolicyOptions {
        CreatePasswordPolicyOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name,
            parameters: self.parameters,
            comment: self.comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct AlterPasswordPolicyRequest {
    pub name: SchemaObjectIdentifier,
    pub if_exists: Option<bool>,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<PasswordPolicySet>,
    pub unset: Option<PasswordPolicyUnset>,
}

impl AlterPasswordPolicyRequest {
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

    pub fn with_set(mut self, set: PasswordPolicySet) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_unset(mut self, unset: PasswordPolicyUnset) -> Self {
        self.unset = Some(unset);
        self
    }

    pub fn into_options(self) -> AlterPasswordPolicyOptions {
        AlterPasswordPolicyOptions {
            if_exists: self.if_exists,
            name: self.name,
            rename_to: self.rename_to,
            set: self.set,
            unset: self.unset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct ShowPasswordPolicyRequest {
    pub like: Option<Like>,
    pub in_: Option<In>,
    pub limit: Option<LimitFrom>,
}

impl ShowPasswordPolicyRequest {
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

    pub fn with_limit(mut self, limit: LimitFrom) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn into_options(self) -> ShowPasswordPolicyOptions {
        ShowPasswordPolicyOptions {
            like: self.like,
            in_: self.in_,
            limit: self.limit,
        }
    }
}

// ============================================================================
// Rows and records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct PasswordPolicyRow {
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
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub created_on: String,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub kind: String,
    pub owner: String,
    pub comment: Option<String>,
}

impl PasswordPolicy {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::PasswordPolicy
    }
}

impl From<PasswordPolicyRow> for PasswordPolicy {
    fn from(row: PasswordPolicyRow) -> Self {
        Self {
            comment: decode::non_empty(&row.comment),
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            kind: row.kind,
            owner: row.owner,
        }
    }
}

/// Result of `DESCRIBE PASSWORD POLICY`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasswordPolicyDetails {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub min_upper_case_chars: Option<i64>,
    pub min_lower_case_chars: Option<i64>,
    pub min_numeric_chars: Option<i64>,
    pub min_special_chars: Option<i64>,
    pub min_age_days: Option<i64>,
    pub max_age_days: Option<i64>,
    pub max_retries: Option<i64>,
    pub lockout_time_mins: Option<i64>,
    pub history: Option<i64>,
}

impl DescribeAccumulator for PasswordPolicyDetails {
    fn accept(&mut self, property: &str, value: &str) -> Result<bool> {
        let slot = match property {
            "NAME" => {
                self.name = decode::non_null(value);
                return Ok(true);
            }
            "OWNER" => {
                self.owner = decode::non_null(value);
                return Ok(true);
            }
            "COMMENT" => {
                self.comment = decode::non_null(value);
                return Ok(true);
            }
            "PASSWORD_MIN_LENGTH" => &mut self.min_length,
            "PASSWORD_MAX_LENGTH" => &mut self.max_length,
            "PASSWORD_MIN_UPPER_CASE_CHARS" => &mut self.min_upper_case_chars,
            "PASSWORD_MIN_LOWER_CASE_CHARS" => &mut self.min_lower_case_chars,
            "PASSWORD_MIN_NUMERIC_CHARS" => &mut self.min_numeric_chars,
            "PASSWORD_MIN_SPECIAL_CHARS" => &mut self.min_special_chars,
            "PASSWORD_MIN_AGE_DAYS" => &mut self.min_age_days,
            "PASSWORD_MAX_AGE_DAYS" => &mut self.max_age_days,
            "PASSWORD_MAX_RETRIES" => &mut self.max_retries,
            "PASSWORD_LOCKOUT_TIME_MINS" => &mut self.lockout_time_mins,
            "PASSWORD_HISTORY" => &mut self.history,
            _ => return Ok(false),
        };
        *slot = decode::parse_opt_int(property, value)?;
        Ok(true)
    }
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Password policy operations.
    PasswordPolicies
);

impl<E: super::SqlExecutor> PasswordPolicies<'_, E> {
    pub async fn create(&self, request: CreatePasswordPolicyRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn alter(&self, request: AlterPasswordPolicyRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn drop(&self, id: &SchemaObjectIdentifier, if_exists: bool) -> Result<()> {
        let opts = DropPasswordPolicyOptions {
            if_exists: Some(if_exists),
            name: id.clone(),
        };
        self.client.exec(&opts).await
    }

    pub async fn show(&self, request: ShowPasswordPolicyRequest) -> Result<Vec<PasswordPolicy>> {
        let rows = self.client.query(&request.into_options()).await?;
        Ok(decode::from_rows::<PasswordPolicyRow>(&rows)?
            .into_iter()
            .map(PasswordPolicy::from)
            .collect())
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<PasswordPolicy> {
        let request = ShowPasswordPolicyRequest::new()
            .with_like(Like::new(id.name()))
            .with_in(In::schema(id.schema_id()));
        let policies = self.show(request).await?;
        find_by_name(policies, id.name(), id.fully_qualified_name(), |p| p.name.as_str())
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<PasswordPolicyDetails> {
        let opts = DescribePasswordPolicyOptions { name: id.clone() };
        let rows = self.client.query(&opts).await?;
        decode::decode_properties(&rows)
    }
}
