//! Masking policies and their application to columns.

use serde::Deserialize;

use super::common::{self, In, Like, LimitFrom, ObjectType, TagAssociation};
use super::decode::{self, lenient};
use super::{facade, find_by_name};
use crate::error::{Error, Result};
use crate::sql::{
    ColumnIdentifier, DataType, ListStyle, ObjectIdentifier, ParamStyle, Quotes,
    SchemaObjectIdentifier, SqlBuilder, ToSql,
};
use crate::validation::{Flag, Presence, Validate, ValidationError, Validator};

/// One `"NAME" TYPE` entry of a policy signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskingPolicyArgument {
    pub name: String,
    pub data_type: DataType,
}

impl MaskingPolicyArgument {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

impl ToSql for MaskingPolicyArgument {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.value(&self.name, Quotes::Double)
            .value(&self.data_type, Quotes::None);
    }
}

/// A bare column name inside `USING (...)`.
struct ColumnName<'a>(&'a str);

impl ToSql for ColumnName<'_> {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.value(self.0, Quotes::Double);
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMaskingPolicyOptions {
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub signature: Vec<MaskingPolicyArgument>,
    pub returns: DataType,
    pub body: String,
    pub comment: Option<String>,
    pub exempt_other_policies: Option<bool>,
}

impl ToSql for CreateMaskingPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .sql("MASKING POLICY")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .sql("AS")
            .list(None, &self.signature, ListStyle::new().parentheses())
            .parameter("RETURNS", Some(&self.returns), ParamStyle::new().no_equals())
            .sql("->")
            .raw(&self.body)
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted())
            .parameter(
                "EXEMPT_OTHER_POLICIES",
                self.exempt_other_policies.as_ref(),
                ParamStyle::new(),
            );
    }
}

impl Validate for CreateMaskingPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .conflicting(
                "CreateMaskingPolicyOptions",
                &[
                    ("OrReplace", self.or_replace.is_true()),
                    ("IfNotExists", self.if_not_exists.is_true()),
                ],
            )
            .at_least_one("CreateMaskingPolicyOptions", &[("Signature", self.signature.is_set())])
            .non_blank("Body", &self.body);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaskingPolicySet {
    pub body: Option<String>,
    pub comment: Option<String>,
}

impl ToSql for MaskingPolicySet {
    fn write_sql(&self, b: &mut SqlBuilder) {
        if let Some(body) = &self.body {
            b.sql("BODY ->").raw(body);
        }
        b.parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
    }
}

impl Validate for MaskingPolicySet {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "MaskingPolicySet",
            &[("Body", self.body.is_set()), ("Comment", self.comment.is_set())],
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaskingPolicyUnset {
    pub comment: bool,
}

impl ToSql for MaskingPolicyUnset {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.keywords(&[(self.comment, "COMMENT")]);
    }
}

impl Validate for MaskingPolicyUnset {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one("MaskingPolicyUnset", &[("Comment", self.comment)]);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterMaskingPolicyOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<MaskingPolicySet>,
    pub unset: Option<MaskingPolicyUnset>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl ToSql for AlterMaskingPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER MASKING POLICY")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .prefixed_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(Some("SET"), self.set.as_ref())
            .nested(Some("UNSET"), self.unset.as_ref());
        common::set_tags(b, &self.set_tags);
        common::unset_tags(b, &self.unset_tags);
    }
}

impl Validate for AlterMaskingPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("RenameTo", self.rename_to.as_ref())
            .exactly_one(
                "AlterMaskingPolicyOptions",
                &[
                    ("RenameTo", self.rename_to.is_set()),
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
pub struct DropMaskingPolicyOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
}

impl ToSql for DropMaskingPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP MASKING POLICY")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name);
    }
}

impl Validate for DropMaskingPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowMaskingPolicyOptions {
    pub like: Option<Like>,
    pub in_: Option<In>,
    pub limit: Option<LimitFrom>,
}

impl ToSql for ShowMaskingPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW MASKING POLICIES")
            .nested(None, self.like.as_ref())
            .nested(None, self.in_.as_ref())
            .nested(None, self.limit.as_ref());
    }
}

impl Validate for ShowMaskingPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(self.like.as_ref())
            .nested(self.in_.as_ref())
            .nested(self.limit.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeMaskingPolicyOptions {
    pub name: SchemaObjectIdentifier,
}

impl ToSql for DescribeMaskingPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DESCRIBE MASKING POLICY").identifier(&self.name);
    }
}

impl Validate for DescribeMaskingPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

/// `ALTER TABLE <t> MODIFY COLUMN "<c>" SET MASKING POLICY <p> [USING (...)] [FORCE]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetColumnMaskingPolicyOptions {
    pub column: ColumnIdentifier,
    pub policy: SchemaObjectIdentifier,
    pub using: Vec<String>,
    pub force: Option<bool>,
}

impl ToSql for SetColumnMaskingPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        let using: Vec<ColumnName<'_>> = self.using.iter().map(|c| ColumnName(c.as_str())).collect();
        b.sql("ALTER TABLE")
            .identifier(&self.column.table_id())
            .sql("MODIFY COLUMN")
            .value(self.column.column_name(), Quotes::Double)
            .sql("SET MASKING POLICY")
            .identifier(&self.policy)
            .list(Some("USING"), &using, ListStyle::new().parentheses())
            .keyword(self.force, "FORCE");
    }
}

impl Validate for SetColumnMaskingPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("Column", &self.column)
            .identifier("Policy", &self.policy);
        if self.using.iter().any(|c| c.is_empty()) {
            v.push(ValidationError::InvalidValue {
                field: "Using",
                value: self.using.join(", "),
            });
        }
    }
}

/// `ALTER TABLE <t> MODIFY COLUMN "<c>" UNSET MASKING POLICY`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnsetColumnMaskingPolicyOptions {
    pub column: ColumnIdentifier,
}

impl ToSql for UnsetColumnMaskingPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER TABLE")
            .identifier(&self.column.table_id())
            .sql("MODIFY COLUMN")
            .value(self.column.column_name(), Quotes::Double)
            .sql("UNSET MASKING POLICY");
    }
}

impl Validate for UnsetColumnMaskingPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("Column", &self.column);
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct CreateMaskingPolicyRequest {
    pub name: SchemaObjectIdentifier,
    pub signature: Vec<MaskingPolicyArgument>,
    pub returns: DataType,
    pub body: String,
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub comment: Option<String>,
    pub exempt_other_policies: Option<bool>,
}

impl CreateMaskingPolicyRequest {
    pub fn new(
        name: SchemaObjectIdentifier,
        signature: Vec<MaskingPolicyArgument>,
        returns: DataType,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name,
            signature,
            returns,
            body: body.into(),
            or_replace: None,
            if_not_exists: None,
            comment: None,
            exempt_other_policies: None,
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

    pub fn with_exempt_other_policies(mut self, exempt: bool) -> Self {
        self.exempt_other_policies = Some(exempt);
        self
    }

    pub fn into_options(self) -> CreateMaskingPolicyOptions {
        CreateMaskingPolicyOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name,
            signature: self.signature,
            returns: self.returns,
            body: self.body,
            comment: self.comment,
            exempt_other_policies: self.exempt_other_policies,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct AlterMaskingPolicyRequest {
    pub name: SchemaObjectIdentifier,
    pub if_exists: Option<bool>,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub set: Option<MaskingPolicySet>,
    pub unset: Option<MaskingPolicyUnset>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl AlterMaskingPolicyRequest {
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

    pub fn with_set(mut self, set: MaskingPolicySet) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_unset(mut self, unset: MaskingPolicyUnset) -> Self {
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

    pub fn into_options(self) -> AlterMaskingPolicyOptions {
        AlterMaskingPolicyOptions {
            if_exists: self.if_exists,
            name: self.name,
            rename_to: self.rename_to,
            set: self.set,
            unset: self.unset,
            set_tags: self.set_tags,
            unset_tags: self.unset_tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct ShowMaskingPolicyRequest {
    pub like: Option<Like>,
    pub in_: Option<In>,
    pub limit: Option<LimitFrom>,
}

impl ShowMaskingPolicyRequest {
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

    pub fn into_options(self) -> ShowMaskingPolicyOptions {
        ShowMaskingPolicyOptions {
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
pub struct MaskingPolicyRow {
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
pub struct MaskingPolicy {
    pub created_on: String,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub kind: String,
    pub owner: String,
    pub comment: Option<String>,
    pub exempt_other_policies: bool,
}

impl MaskingPolicy {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::MaskingPolicy
    }
}

/// `options` is a JSON object such as `{"EXEMPT_OTHER_POLICIES": "true"}`.
fn parse_exempt_other_policies(options: &str) -> Result<bool> {
    if decode::non_empty(options).is_none() {
        return Ok(false);
    }
    let value: serde_json::Value = serde_json::from_str(options)?;
    match value.get("EXEMPT_OTHER_POLICIES") {
        Some(serde_json::Value::Bool(b)) => Ok(*b),
        Some(serde_json::Value::String(s)) => decode::parse_bool("options", s),
        _ => Ok(false),
    }
}

impl TryFrom<MaskingPolicyRow> for MaskingPolicy {
    type Error = Error;

    fn try_from(row: MaskingPolicyRow) -> Result<Self> {
        Ok(Self {
            exempt_other_policies: parse_exempt_other_policies(&row.options)?,
            comment: decode::non_empty(&row.comment),
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            kind: row.kind,
            owner: row.owner,
        })
    }
}

/// Row of `DESCRIBE MASKING POLICY`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct MaskingPolicyDescriptionRow {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub signature: String,
    #[serde(deserialize_with = "lenient::string")]
    pub return_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskingPolicyDetails {
    pub name: String,
    pub signature: Vec<MaskingPolicyArgument>,
    pub return_type: DataType,
    pub body: String,
}

/// Split on commas that are not inside parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn parse_data_type(column: &str, value: &str) -> Result<DataType> {
    DataType::parse(value).ok_or_else(|| Error::InvalidColumnValue {
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Parse a reported signature such as `(VAL VARCHAR, N NUMBER(38,0))`.
fn parse_signature(value: &str) -> Result<Vec<MaskingPolicyArgument>> {
    let inner = value
        .trim()
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
        .unwrap_or(value)
        .trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(inner)
        .into_iter()
        .map(|arg| {
            let arg = arg.trim();
            let (name, data_type) = arg.split_once(char::is_whitespace).ok_or_else(|| {
                Error::InvalidColumnValue {
                    column: "signature".to_string(),
                    value: value.to_string(),
                }
            })?;
            Ok(MaskingPolicyArgument::new(
                name.trim_matches('"'),
                parse_data_type("signature", data_type)?,
            ))
        })
        .collect()
}

impl TryFrom<MaskingPolicyDescriptionRow> for MaskingPolicyDetails {
    type Error = Error;

    fn try_from(row: MaskingPolicyDescriptionRow) -> Result<Self> {
        Ok(Self {
            signature: parse_signature(&row.signature)?,
            return_type: parse_data_type("return_type", &row.return_type)?,
            name: row.name,
            body: row.body,
        })
    }
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Masking policy operations.
    MaskingPolicies
);

impl<E: super::SqlExecutor> MaskingPolicies<'_, E> {
    pub async fn create(&self, request: CreateMaskingPolicyRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn alter(&self, request: AlterMaskingPolicyRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn drop(&self, id: &SchemaObjectIdentifier, if_exists: bool) -> Result<()> {
        let opts = DropMaskingPolicyOptions {
            if_exists: Some(if_exists),
            name: id.clone(),
        };
        self.client.exec(&opts).await
    }

    pub async fn show(&self, request: ShowMaskingPolicyRequest) -> Result<Vec<MaskingPolicy>> {
        let rows = self.client.query(&request.into_options()).await?;
        decode::from_rows::<MaskingPolicyRow>(&rows)?
            .into_iter()
            .map(MaskingPolicy::try_from)
            .collect()
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<MaskingPolicy> {
        let request = ShowMaskingPolicyRequest::new()
            .with_like(Like::new(id.name()))
            .with_in(In::schema(id.schema_id()));
        let policies = self.show(request).await?;
        find_by_name(policies, id.name(), id.fully_qualified_name(), |p| p.name.as_str())
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<MaskingPolicyDetails> {
        let opts = DescribeMaskingPolicyOptions { name: id.clone() };
        let row = self.client.query_one(&opts, &id.fully_qualified_name()).await?;
        decode::from_row::<MaskingPolicyDescriptionRow>(&row)?.try_into()
    }

    pub async fn set_on_column(&self, opts: SetColumnMaskingPolicyOptions) -> Result<()> {
        self.client.exec(&opts).await
    }

    pub async fn unset_on_column(&self, column: &ColumnIdentifier) -> Result<()> {
        let opts = UnsetColumnMaskingPolicyOptions {
            column: column.clone(),
        };
        self.client.exec(&opts).await
    }
}
