//! Object tags: the tag objects themselves, and attaching tags to other
//! objects with `ALTER <type> <id> SET TAG` / `UNSET TAG`.

use serde::Deserialize;

use super::common::{self, In, Like, ObjectType, TagAssociation};
use super::decode::{self, lenient};
use super::{facade, find_by_name};
use crate::error::{Error, Result};
use crate::sql::{
    Identifier, ListStyle, ObjectIdentifier, ParamStyle, Quotes, SchemaObjectIdentifier,
    SqlBuilder, ToSql,
};
use crate::validation::{Flag, Presence, Validate, ValidationError, Validator};

/// One entry of `ALLOWED_VALUES`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowedValue {
    pub value: String,
}

impl AllowedValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl ToSql for AllowedValue {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.value(&self.value, Quotes::Single);
    }
}

/// `MASKING POLICY <id>` inside a tag's policy list.
struct MaskingPolicyRef<'a>(&'a SchemaObjectIdentifier);

impl ToSql for MaskingPolicyRef<'_> {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.prefixed_identifier("MASKING POLICY", Some(self.0));
    }
}

fn policy_refs(policies: &[SchemaObjectIdentifier]) -> Vec<MaskingPolicyRef<'_>> {
    policies.iter().map(MaskingPolicyRef).collect()
}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateTagOptions {
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub allowed_values: Vec<AllowedValue>,
    pub comment: Option<String>,
}

impl ToSql for CreateTagOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .sql("TAG")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .list(Some("ALLOWED_VALUES"), &self.allowed_values, ListStyle::new())
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
    }
}

impl Validate for CreateTagOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name).conflicting(
            "CreateTagOptions",
            &[
                ("OrReplace", self.or_replace.is_true()),
                ("IfNotExists", self.if_not_exists.is_true()),
            ],
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSetMaskingPolicies {
    pub masking_policies: Vec<SchemaObjectIdentifier>,
    pub force: Option<bool>,
}

impl ToSql for TagSetMaskingPolicies {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.list(None, &policy_refs(&self.masking_policies), ListStyle::new())
            .keyword(self.force, "FORCE");
    }
}

impl Validate for TagSetMaskingPolicies {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "TagSetMaskingPolicies",
            &[("MaskingPolicies", self.masking_policies.is_set())],
        )
        .identifiers("MaskingPolicies", &self.masking_policies);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterTagOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub add_allowed_values: Vec<AllowedValue>,
    pub drop_allowed_values: Vec<AllowedValue>,
    pub unset_allowed_values: Option<bool>,
    pub set_masking_policies: Option<TagSetMaskingPolicies>,
    pub unset_masking_policies: Vec<SchemaObjectIdentifier>,
    pub set_comment: Option<String>,
    pub unset_comment: Option<bool>,
}

impl ToSql for AlterTagOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER TAG")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .prefixed_identifier("RENAME TO", self.rename_to.as_ref())
            .list(Some("ADD ALLOWED_VALUES"), &self.add_allowed_values, ListStyle::new())
            .list(Some("DROP ALLOWED_VALUES"), &self.drop_allowed_values, ListStyle::new())
            .keyword(self.unset_allowed_values, "UNSET ALLOWED_VALUES")
            .nested(Some("SET"), self.set_masking_policies.as_ref())
            .list(
                Some("UNSET"),
                &policy_refs(&self.unset_masking_policies),
                ListStyle::new(),
            )
            .parameter("SET COMMENT", self.set_comment.as_ref(), ParamStyle::single_quoted())
            .keyword(self.unset_comment, "UNSET COMMENT");
    }
}

impl Validate for AlterTagOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("RenameTo", self.rename_to.as_ref())
            .exactly_one(
                "AlterTagOptions",
                &[
                    ("RenameTo", self.rename_to.is_set()),
                    ("AddAllowedValues", self.add_allowed_values.is_set()),
                    ("DropAllowedValues", self.drop_allowed_values.is_set()),
                    ("UnsetAllowedValues", self.unset_allowed_values.is_true()),
                    ("SetMaskingPolicies", self.set_masking_policies.is_set()),
                    ("UnsetMaskingPolicies", self.unset_masking_policies.is_set()),
                    ("SetComment", self.set_comment.is_set()),
                    ("UnsetComment", self.unset_comment.is_true()),
                ],
            )
            .nested(self.set_masking_policies.as_ref())
            .identifiers("UnsetMaskingPolicies", &self.unset_masking_policies);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropTagOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
}

impl ToSql for DropTagOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP TAG")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name);
    }
}

impl Validate for DropTagOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UndropTagOptions {
    pub name: SchemaObjectIdentifier,
}

impl ToSql for UndropTagOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("UNDROP TAG").identifier(&self.name);
    }
}

impl Validate for UndropTagOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowTagOptions {
    pub like: Option<Like>,
    pub in_: Option<In>,
}

impl ToSql for ShowTagOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW TAGS")
            .nested(None, self.like.as_ref())
            .nested(None, self.in_.as_ref());
    }
}

impl Validate for ShowTagOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(self.like.as_ref()).nested(self.in_.as_ref());
    }
}

// ============================================================================
// SET TAG / UNSET TAG on other objects
// ============================================================================

/// `ALTER <type> [IF EXISTS] <id>`, or for a column
/// `ALTER <type> [IF EXISTS] <table> MODIFY COLUMN "<column>"`.
fn write_alter_target(
    b: &mut SqlBuilder,
    object_type: &ObjectType,
    if_exists: Option<bool>,
    object: &Identifier,
) {
    b.sql("ALTER")
        .nested(None, Some(object_type))
        .keyword(if_exists, "IF EXISTS");
    match object {
        Identifier::Column(column) => {
            b.identifier(&column.table_id())
                .sql("MODIFY COLUMN")
                .value(column.column_name(), Quotes::Double);
        }
        other => {
            b.identifier(other);
        }
    }
}

fn validate_alter_target(v: &mut Validator, object_type: &ObjectType, object: &Identifier) {
    v.identifier("ObjectName", object);
    if matches!(object, Identifier::Column(_))
        && !matches!(
            object_type,
            ObjectType::Table | ObjectType::View | ObjectType::MaterializedView
        )
    {
        v.push(ValidationError::InvalidValue {
            field: "ObjectType",
            value: object_type.to_string(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetTagOptions {
    pub object_type: ObjectType,
    pub if_exists: Option<bool>,
    pub object_name: Identifier,
    pub set_tags: Vec<TagAssociation>,
}

impl ToSql for SetTagOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        write_alter_target(b, &self.object_type, self.if_exists, &self.object_name);
        common::set_tags(b, &self.set_tags);
    }
}

impl Validate for SetTagOptions {
    fn validate_into(&self, v: &mut Validator) {
        validate_alter_target(v, &self.object_type, &self.object_name);
        v.at_least_one("SetTagOptions", &[("SetTags", self.set_tags.is_set())]);
        common::validate_tags(v, &self.set_tags, &[]);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsetTagOptions {
    pub object_type: ObjectType,
    pub if_exists: Option<bool>,
    pub object_name: Identifier,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl ToSql for UnsetTagOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        write_alter_target(b, &self.object_type, self.if_exists, &self.object_name);
        common::unset_tags(b, &self.unset_tags);
    }
}

impl Validate for UnsetTagOptions {
    fn validate_into(&self, v: &mut Validator) {
        validate_alter_target(v, &self.object_type, &self.object_name);
        v.at_least_one("UnsetTagOptions", &[("UnsetTags", self.unset_tags.is_set())]);
        common::validate_tags(v, &[], &self.unset_tags);
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct CreateTagRequest {
    pub name: SchemaObjectIdentifier,
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub allowed_values: Vec<String>,
    pub comment: Option<String>,
}

impl CreateTagRequest {
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

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn into_options(self) -> CreateTagOptions {
        CreateTagOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name,
            allowed_values: self.allowed_values.into_iter().map(AllowedValue::new).collect(),
            comment: self.comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct AlterTagRequest {
    pub name: SchemaObjectIdentifier,
    pub if_exists: Option<bool>,
    pub rename_to: Option<SchemaObjectIdentifier>,
    pub add_allowed_values: Vec<String>,
    pub drop_allowed_values: Vec<String>,
    pub unset_allowed_values: Option<bool>,
    pub set_masking_policies: Option<TagSetMaskingPolicies>,
    pub unset_masking_policies: Vec<SchemaObjectIdentifier>,
    pub set_comment: Option<String>,
    pub unset_comment: Option<bool>,
}

impl AlterTagRequest {
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

    pub fn with_add_allowed_values(mut self, values: Vec<String>) -> Self {
        self.add_allowed_values = values;
        self
    }

    pub fn with_drop_allowed_values(mut self, values: Vec<String>) -> Self {
        self.drop_allowed_values = values;
        self
    }

    pub fn with_unset_allowed_values(mut self, unset: bool) -> Self {
        self.unset_allowed_values = Some(unset);
        self
    }

    pub fn with_set_masking_policies(
        mut self,
        policies: Vec<SchemaObjectIdentifier>,
        force: bool,
    ) -> Self {
        self.set_masking_policies = Some(TagSetMaskingPolicies {
            masking_policies: policies,
            force: Some(force),
        });
        self
    }

    pub fn with_unset_masking_policies(mut self, policies: Vec<SchemaObjectIdentifier>) -> Self {
        self.unset_masking_policies = policies;
        self
    }

    pub fn with_set_comment(mut self, comment: impl Into<String>) -> Self {
        self.set_comment = Some(comment.into());
        self
    }

    pub fn with_unset_comment(mut self, unset: bool) -> Self {
        self.unset_comment = Some(unset);
        self
    }

    pub fn into_options(self) -> AlterTagOptions {
        AlterTagOptions {
            if_exists: self.if_exists,
            name: self.name,
            rename_to: self.rename_to,
            add_allowed_values: self
                .add_allowed_values
                .into_iter()
                .map(AllowedValue::new)
                .collect(),
            drop_allowed_values: self
                .drop_allowed_values
                .into_iter()
                .map(AllowedValue::new)
                .collect(),
            unset_allowed_values: self.unset_allowed_values,
            set_masking_policies: self.set_masking_policies,
            unset_masking_policies: self.unset_masking_policies,
            set_comment: self.set_comment,
            unset_comment: self.unset_comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SetTagRequest {
    pub object_type: ObjectType,
    pub object_name: Identifier,
    pub if_exists: Option<bool>,
    pub set_tags: Vec<TagAssociation>,
}

impl SetTagRequest {
    pub fn new(
        object_type: ObjectType,
        object_name: impl Into<Identifier>,
        set_tags: Vec<TagAssociation>,
    ) -> Self {
        Self {
            object_type,
            object_name: object_name.into(),
            if_exists: None,
            set_tags,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn into_options(self) -> SetTagOptions {
        SetTagOptions {
            object_type: self.object_type,
            if_exists: self.if_exists,
            object_name: self.object_name,
            set_tags: self.set_tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct UnsetTagRequest {
    pub object_type: ObjectType,
    pub object_name: Identifier,
    pub if_exists: Option<bool>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl UnsetTagRequest {
    pub fn new(
        object_type: ObjectType,
        object_name: impl Into<Identifier>,
        unset_tags: Vec<SchemaObjectIdentifier>,
    ) -> Self {
        Self {
            object_type,
            object_name: object_name.into(),
            if_exists: None,
            unset_tags,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn into_options(self) -> UnsetTagOptions {
        UnsetTagOptions {
            object_type: self.object_type,
            if_exists: self.if_exists,
            object_name: self.object_name,
            unset_tags: self.unset_tags,
        }
    }
}

// ============================================================================
// Rows and records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TagRow {
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
    pub allowed_values: String,
    #[serde(deserialize_with = "lenient::string")]
    pub owner_role_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub created_on: String,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: String,
    pub comment: Option<String>,
    /// `None` when any value is allowed.
    pub allowed_values: Option<Vec<String>>,
    pub owner_role_type: String,
}

impl Tag {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::Tag
    }
}

impl TryFrom<TagRow> for Tag {
    type Error = Error;

    fn try_from(row: TagRow) -> Result<Self> {
        let allowed_values = match decode::non_empty(&row.allowed_values) {
            Some(values) => Some(decode::parse_json_strings(&values)?),
            None => None,
        };
        Ok(Self {
            comment: decode::non_empty(&row.comment),
            allowed_values,
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: row.owner,
            owner_role_type: row.owner_role_type,
        })
    }
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Tag operations.
    Tags
);

impl<E: super::SqlExecutor> Tags<'_, E> {
    pub async fn create(&self, request: CreateTagRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn alter(&self, request: AlterTagRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn drop(&self, id: &SchemaObjectIdentifier, if_exists: bool) -> Result<()> {
        let opts = DropTagOptions {
            if_exists: Some(if_exists),
            name: id.clone(),
        };
        self.client.exec(&opts).await
    }

    pub async fn undrop(&self, id: &SchemaObjectIdentifier) -> Result<()> {
        self.client.exec(&UndropTagOptions { name: id.clone() }).await
    }

    pub async fn show(&self, like: Option<Like>, in_: Option<In>) -> Result<Vec<Tag>> {
        let rows = self.client.query(&ShowTagOptions { like, in_ }).await?;
        decode::from_rows::<TagRow>(&rows)?
            .into_iter()
            .map(Tag::try_from)
            .collect()
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Tag> {
        let tags = self
            .show(Some(Like::new(id.name())), Some(In::schema(id.schema_id())))
            .await?;
        find_by_name(tags, id.name(), id.fully_qualified_name(), |t| t.name.as_str())
    }

    /// `ALTER <type> <id> SET TAG ...`
    pub async fn set(&self, request: SetTagRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    /// `ALTER <type> <id> UNSET TAG ...`
    pub async fn unset(&self, request: UnsetTagRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{AccountObjectIdentifier, ColumnIdentifier};
    use insta::assert_snapshot;
    use serde_json::json;

    fn id() -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("GOV", "TAGS", "COST_CENTER")
    }

    #[test]
    fn test_create() {
        let opts = CreateTagRequest::new(id())
            .with_if_not_exists(true)
            .with_allowed_values(["finance", "it's"])
            .with_comment("billing")
            .into_options();
        assert!(opts.validate().is_ok());
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @r#"CREATE TAG IF NOT EXISTS "GOV"."TAGS"."COST_CENTER" ALLOWED_VALUES 'finance', 'it''s' COMMENT = 'billing'"#
        );
    }

    #[test]
    fn test_alter_variants() {
        let add = AlterTagRequest::new(id())
            .with_add_allowed_values(vec!["hr".into(), "ops".into()])
            .into_options();
        assert_eq!(
            add.to_sql().unwrap(),
            "ALTER TAG \"GOV\".\"TAGS\".\"COST_CENTER\" ADD ALLOWED_VALUES 'hr', 'ops'"
        );

        let policies = AlterTagRequest::new(id())
            .with_set_masking_policies(
                vec![
                    SchemaObjectIdentifier::new("GOV", "P", "MASK_STR"),
                    SchemaObjectIdentifier::new("GOV", "P", "MASK_NUM"),
                ],
                true,
            )
            .into_options();
        assert!(policies.validate().is_ok());
        assert_snapshot!(
            policies.to_sql().unwrap(),
            @r#"ALTER TAG "GOV"."TAGS"."COST_CENTER" SET MASKING POLICY "GOV"."P"."MASK_STR", MASKING POLICY "GOV"."P"."MASK_NUM" FORCE"#
        );

        let unset_policy = AlterTagRequest::new(id())
            .with_unset_masking_policies(vec![SchemaObjectIdentifier::new("GOV", "P", "MASK_STR")])
            .into_options();
        assert_eq!(
            unset_policy.to_sql().unwrap(),
            "ALTER TAG \"GOV\".\"TAGS\".\"COST_CENTER\" UNSET MASKING POLICY \"GOV\".\"P\".\"MASK_STR\""
        );

        let comment = AlterTagRequest::new(id())
            .with_if_exists(true)
            .with_set_comment("x")
            .into_options();
        assert_eq!(
            comment.to_sql().unwrap(),
            "ALTER TAG IF EXISTS \"GOV\".\"TAGS\".\"COST_CENTER\" SET COMMENT = 'x'"
        );

        let unset_values = AlterTagRequest::new(id()).with_unset_allowed_values(true).into_options();
        assert_eq!(
            unset_values.to_sql().unwrap(),
            "ALTER TAG \"GOV\".\"TAGS\".\"COST_CENTER\" UNSET ALLOWED_VALUES"
        );
    }

    #[test]
    fn test_alter_requires_exactly_one() {
        let opts = AlterTagRequest::new(id())
            .with_set_comment("x")
            .with_unset_comment(true)
            .into_options();
        assert!(matches!(
            opts.validate().unwrap_err().errors(),
            [ValidationError::ExactlyOneOf { structure: "AlterTagOptions", .. }]
        ));
    }

    #[test]
    fn test_drop_undrop_show() {
        let drop = DropTagOptions {
            if_exists: Some(true),
            name: id(),
        };
        assert_eq!(
            drop.to_sql().unwrap(),
            "DROP TAG IF EXISTS \"GOV\".\"TAGS\".\"COST_CENTER\""
        );
        assert_eq!(
            UndropTagOptions { name: id() }.to_sql().unwrap(),
            "UNDROP TAG \"GOV\".\"TAGS\".\"COST_CENTER\""
        );
        let show = ShowTagOptions {
            like: Some(Like::new("COST%")),
            in_: Some(In::schema(id().schema_id())),
        };
        assert_eq!(
            show.to_sql().unwrap(),
            "SHOW TAGS LIKE 'COST%' IN SCHEMA \"GOV\".\"TAGS\""
        );
    }

    #[test]
    fn test_set_tag_on_objects() {
        let tag = TagAssociation::new(id(), "finance");

        let on_warehouse = SetTagRequest::new(
            ObjectType::Warehouse,
            AccountObjectIdentifier::new("WH"),
            vec![tag.clone()],
        )
        .with_if_exists(true)
        .into_options();
        assert!(on_warehouse.validate().is_ok());
        assert_eq!(
            on_warehouse.to_sql().unwrap(),
            "ALTER WAREHOUSE IF EXISTS \"WH\" SET TAG \"GOV\".\"TAGS\".\"COST_CENTER\" = 'finance'"
        );

        let column = ColumnIdentifier::new("DB", "S", "ORDERS", "AMOUNT");
        let on_column = SetTagRequest::new(ObjectType::Table, column.clone(), vec![tag]).into_options();
        assert!(on_column.validate().is_ok());
        assert_snapshot!(
            on_column.to_sql().unwrap(),
            @r#"ALTER TABLE "DB"."S"."ORDERS" MODIFY COLUMN "AMOUNT" SET TAG "GOV"."TAGS"."COST_CENTER" = 'finance'"#
        );

        let unset = UnsetTagRequest::new(ObjectType::Table, column.clone(), vec![id()]).into_options();
        assert_eq!(
            unset.to_sql().unwrap(),
            "ALTER TABLE \"DB\".\"S\".\"ORDERS\" MODIFY COLUMN \"AMOUNT\" UNSET TAG \"GOV\".\"TAGS\".\"COST_CENTER\""
        );

        let wrong_type = UnsetTagRequest::new(ObjectType::Warehouse, column, vec![id()]).into_options();
        assert_eq!(
            wrong_type.validate().unwrap_err().errors(),
            &[ValidationError::InvalidValue {
                field: "ObjectType",
                value: "WAREHOUSE".to_string(),
            }]
        );

        let empty = UnsetTagRequest::new(
            ObjectType::Database,
            AccountObjectIdentifier::new("DB"),
            vec![],
        )
        .into_options();
        assert!(matches!(
            empty.validate().unwrap_err().errors(),
            [ValidationError::AtLeastOneOf { structure: "UnsetTagOptions", .. }]
        ));
    }

    #[test]
    fn test_decode_row() {
        let row = json!({
            "created_on": "2024-01-01",
            "name": "COST_CENTER",
            "database_name": "GOV",
            "schema_name": "TAGS",
            "owner": "ACCOUNTADMIN",
            "comment": "",
            "allowed_values": "[\"finance\",\"it\"]",
            "owner_role_type": "ROLE"
        });
        let tag = Tag::try_from(decode::from_row::<TagRow>(row.as_object().unwrap()).unwrap()).unwrap();
        assert_eq!(tag.id(), id());
        assert_eq!(
            tag.allowed_values,
            Some(vec!["finance".to_string(), "it".to_string()])
        );
        assert_eq!(tag.comment, None);

        let open = json!({ "name": "T", "allowed_values": null });
        let tag = Tag::try_from(decode::from_row::<TagRow>(open.as_object().unwrap()).unwrap()).unwrap();
        assert_eq!(tag.allowed_values, None);
    }
}
