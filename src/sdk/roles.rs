//! Account roles.

use serde::Deserialize;

use super::common::{self, Like, ObjectType, TagAssociation};
use super::decode::{self, lenient};
use super::{facade, find_by_name};
use crate::error::{Error, Result};
use crate::sql::{
    AccountObjectIdentifier, ObjectIdentifier, ParamStyle, SchemaObjectIdentifier, SqlBuilder,
    ToSql,
};
use crate::validation::{Flag, Presence, Validate, Validator};

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateRoleOptions {
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub comment: Option<String>,
    pub tags: Vec<TagAssociation>,
}

impl ToSql for CreateRoleOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .sql("ROLE")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
        common::with_tags(b, &self.tags);
    }
}

impl Validate for CreateRoleOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name).conflicting(
            "CreateRoleOptions",
            &[
                ("OrReplace", self.or_replace.is_true()),
                ("IfNotExists", self.if_not_exists.is_true()),
            ],
        );
        common::validate_tags(v, &self.tags, &[]);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterRoleOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub rename_to: Option<AccountObjectIdentifier>,
    pub set_comment: Option<String>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_comment: Option<bool>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl ToSql for AlterRoleOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER ROLE")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .prefixed_identifier("RENAME TO", self.rename_to.as_ref())
            .parameter("SET COMMENT", self.set_comment.as_ref(), ParamStyle::single_quoted());
        common::set_tags(b, &self.set_tags);
        b.keyword(self.unset_comment, "UNSET COMMENT");
        common::unset_tags(b, &self.unset_tags);
    }
}

impl Validate for AlterRoleOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("RenameTo", self.rename_to.as_ref())
            .exactly_one(
                "AlterRoleOptions",
                &[
                    ("RenameTo", self.rename_to.is_set()),
                    ("SetComment", self.set_comment.is_set()),
                    ("SetTags", self.set_tags.is_set()),
                    ("UnsetComment", self.unset_comment.is_true()),
                    ("UnsetTags", self.unset_tags.is_set()),
                ],
            );
        common::validate_tags(v, &self.set_tags, &self.unset_tags);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropRoleOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
}

impl ToSql for DropRoleOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP ROLE")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name);
    }
}

impl Validate for DropRoleOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowRoleOptions {
    pub like: Option<Like>,
    pub in_class: Option<SchemaObjectIdentifier>,
}

impl ToSql for ShowRoleOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW ROLES")
            .nested(None, self.like.as_ref())
            .prefixed_identifier("IN CLASS", self.in_class.as_ref());
    }
}

impl Validate for ShowRoleOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(self.like.as_ref())
            .opt_identifier("InClass", self.in_class.as_ref());
    }
}

/// Grantee of a role: another role or a user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleGrantee {
    pub role: Option<AccountObjectIdentifier>,
    pub user: Option<AccountObjectIdentifier>,
}

impl RoleGrantee {
    pub fn role(id: AccountObjectIdentifier) -> Self {
        Self {
            role: Some(id),
            user: None,
        }
    }

    pub fn user(id: AccountObjectIdentifier) -> Self {
        Self {
            role: None,
            user: Some(id),
        }
    }
}

impl ToSql for RoleGrantee {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.prefixed_identifier("ROLE", self.role.as_ref())
            .prefixed_identifier("USER", self.user.as_ref());
    }
}

impl Validate for RoleGrantee {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "RoleGrantee",
            &[("Role", self.role.is_set()), ("User", self.user.is_set())],
        )
        .opt_identifier("Role", self.role.as_ref())
        .opt_identifier("User", self.user.as_ref());
    }
}

/// `GRANT ROLE <name> TO {ROLE | USER} <grantee>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrantRoleOptions {
    pub name: AccountObjectIdentifier,
    pub grant: RoleGrantee,
}

impl ToSql for GrantRoleOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("GRANT ROLE")
            .identifier(&self.name)
            .nested(Some("TO"), Some(&self.grant));
    }
}

impl Validate for GrantRoleOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name).nested(Some(&self.grant));
    }
}

/// `REVOKE ROLE <name> FROM {ROLE | USER} <grantee>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevokeRoleOptions {
    pub name: AccountObjectIdentifier,
    pub revoke: RoleGrantee,
}

impl ToSql for RevokeRoleOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("REVOKE ROLE")
            .identifier(&self.name)
            .nested(Some("FROM"), Some(&self.revoke));
    }
}

impl Validate for RevokeRoleOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name).nested(Some(&self.revoke));
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct CreateRoleRequest {
    pub name: AccountObjectIdentifier,
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub comment: Option<String>,
    pub tags: Vec<TagAssociation>,
}

impl CreateRoleRequest {
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

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.tags = tags;
        self
    }

    pub fn into_options(self) -> CreateRoleOptions {
        CreateRoleOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name,
            comment: self.comment,
            tags: self.tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct AlterRoleRequest {
    pub name: AccountObjectIdentifier,
    pub if_exists: Option<bool>,
    pub rename_to: Option<AccountObjectIdentifier>,
    pub set_comment: Option<String>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_comment: Option<bool>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
}

impl AlterRoleRequest {
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

    pub fn with_set_comment(mut self, comment: impl Into<String>) -> Self {
        self.set_comment = Some(comment.into());
        self
    }

    pub fn with_set_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.set_tags = tags;
        self
    }

    pub fn with_unset_comment(mut self, unset: bool) -> Self {
        self.unset_comment = Some(unset);
        self
    }

    pub fn with_unset_tags(mut self, tags: Vec<SchemaObjectIdentifier>) -> Self {
        self.unset_tags = tags;
        self
    }

    pub fn into_options(self) -> AlterRoleOptions {
        AlterRoleOptions {
            if_exists: self.if_exists,
            name: self.name,
            rename_to: self.rename_to,
            set_comment: self.set_comment,
            set_tags: self.set_tags,
            unset_comment: self.unset_comment,
            unset_tags: self.unset_tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct ShowRoleRequest {
    pub like: Option<Like>,
    pub in_class: Option<SchemaObjectIdentifier>,
}

impl ShowRoleRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_like(mut self, like: Like) -> Self {
        self.like = Some(like);
        self
    }

    pub fn with_in_class(mut self, class: SchemaObjectIdentifier) -> Self {
        self.in_class = Some(class);
        self
    }

    pub fn into_options(self) -> ShowRoleOptions {
        ShowRoleOptions {
            like: self.like,
            in_class: self.in_class,
        }
    }
}

// ============================================================================
// Rows and records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct RoleRow {
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub is_default: String,
    #[serde(deserialize_with = "lenient::string")]
    pub is_current: String,
    #[serde(deserialize_with = "lenient::string")]
    pub is_inherited: String,
    #[serde(deserialize_with = "lenient::string")]
    pub assigned_to_users: String,
    #[serde(deserialize_with = "lenient::string")]
    pub granted_to_roles: String,
    #[serde(deserialize_with = "lenient::string")]
    pub granted_roles: String,
    #[serde(deserialize_with = "lenient::string")]
    pub owner: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub created_on: String,
    pub name: String,
    pub is_default: bool,
    pub is_current: bool,
    pub is_inherited: bool,
    pub assigned_to_users: i64,
    pub granted_to_roles: i64,
    pub granted_roles: i64,
    pub owner: String,
    pub comment: Option<String>,
}

impl Role {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::Role
    }
}

impl TryFrom<RoleRow> for Role {
    type Error = Error;

    fn try_from(row: RoleRow) -> Result<Self> {
        Ok(Self {
            is_default: decode::parse_flag("is_default", &row.is_default)?,
            is_current: decode::parse_flag("is_current", &row.is_current)?,
            is_inherited: decode::parse_flag("is_inherited", &row.is_inherited)?,
            assigned_to_users: decode::parse_int("assigned_to_users", &row.assigned_to_users)?,
            granted_to_roles: decode::parse_int("granted_to_roles", &row.granted_to_roles)?,
            granted_roles: decode::parse_int("granted_roles", &row.granted_roles)?,
            comment: decode::non_empty(&row.comment),
            created_on: row.created_on,
            name: row.name,
            owner: row.owner,
        })
    }
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Role operations.
    Roles
);

impl<E: super::SqlExecutor> Roles<'_, E> {
    pub async fn create(&self, request: CreateRoleRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn alter(&self, request: AlterRoleRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn drop(&self, id: &AccountObjectIdentifier, if_exists: bool) -> Result<()> {
        let opts = DropRoleOptions {
            if_exists: Some(if_exists),
            name: id.clone(),
        };
        self.client.exec(&opts).await
    }

    pub async fn show(&self, request: ShowRoleRequest) -> Result<Vec<Role>> {
        let rows = self.client.query(&request.into_options()).await?;
        decode::from_rows::<RoleRow>(&rows)?
            .into_iter()
            .map(Role::try_from)
            .collect()
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<Role> {
        let roles = self
            .show(ShowRoleRequest::new().with_like(Like::new(id.name())))
            .await?;
        find_by_name(roles, id.name(), id.fully_qualified_name(), |r| r.name.as_str())
    }

    pub async fn grant(&self, id: &AccountObjectIdentifier, to: RoleGrantee) -> Result<()> {
        let opts = GrantRoleOptions {
            name: id.clone(),
            grant: to,
        };
        self.client.exec(&opts).await
    }

    pub async fn revoke(&self, id: &AccountObjectIdentifier, from: RoleGrantee) -> Result<()> {
        let opts = RevokeRoleOptions {
            name: id.clone(),
            revoke: from,
        };
        self.client.exec(&opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::test_utils::validate_sql;
    use crate::validation::ValidationError;
    use insta::assert_snapshot;
    use serde_json::json;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("ANALYST")
    }

    #[test]
    fn test_create() {
        let opts = CreateRoleRequest::new(id())
            .with_if_not_exists(true)
            .with_comment("read only")
            .with_tags(vec![TagAssociation::new(
                SchemaObjectIdentifier::new("DB", "S", "TEAM"),
                "bi",
            )])
            .into_options();
        assert!(opts.validate().is_ok());
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @r#"CREATE ROLE IF NOT EXISTS "ANALYST" COMMENT = 'read only' WITH TAG ("DB"."S"."TEAM" = 'bi')"#
        );
    }

    #[test]
    fn test_alter_variants() {
        let rename = AlterRoleRequest::new(id())
            .with_rename_to(AccountObjectIdentifier::new("READER"))
            .into_options();
        assert_eq!(rename.to_sql().unwrap(), "ALTER ROLE \"ANALYST\" RENAME TO \"READER\"");

        let comment = AlterRoleRequest::new(id())
            .with_if_exists(true)
            .with_set_comment("c")
            .into_options();
        assert_eq!(
            comment.to_sql().unwrap(),
            "ALTER ROLE IF EXISTS \"ANALYST\" SET COMMENT = 'c'"
        );

        let unset = AlterRoleRequest::new(id()).with_unset_comment(true).into_options();
        assert_eq!(unset.to_sql().unwrap(), "ALTER ROLE \"ANALYST\" UNSET COMMENT");

        let none = AlterRoleRequest::new(id()).with_unset_comment(false).into_options();
        assert!(matches!(
            none.validate().unwrap_err().errors(),
            [ValidationError::ExactlyOneOf { .. }]
        ));
    }

    #[test]
    fn test_drop_and_show() {
        let drop = DropRoleOptions {
            if_exists: Some(true),
            name: id(),
        };
        assert_eq!(drop.to_sql().unwrap(), "DROP ROLE IF EXISTS \"ANALYST\"");
        assert!(validate_sql(&drop.to_sql().unwrap()).is_ok());

        let show = ShowRoleRequest::new()
            .with_like(Like::new("AN%"))
            .with_in_class(SchemaObjectIdentifier::new("SNOWFLAKE", "ML", "ANOMALY_DETECTION"))
            .into_options();
        assert_eq!(
            show.to_sql().unwrap(),
            "SHOW ROLES LIKE 'AN%' IN CLASS \"SNOWFLAKE\".\"ML\".\"ANOMALY_DETECTION\""
        );
    }

    #[test]
    fn test_grant_and_revoke() {
        let grant = GrantRoleOptions {
            name: id(),
            grant: RoleGrantee::role(AccountObjectIdentifier::new("SYSADMIN")),
        };
        assert_eq!(grant.to_sql().unwrap(), "GRANT ROLE \"ANALYST\" TO ROLE \"SYSADMIN\"");

        let revoke = RevokeRoleOptions {
            name: id(),
            revoke: RoleGrantee::user(AccountObjectIdentifier::new("JANE")),
        };
        assert_eq!(revoke.to_sql().unwrap(), "REVOKE ROLE \"ANALYST\" FROM USER \"JANE\"");

        let invalid = GrantRoleOptions {
            name: id(),
            grant: RoleGrantee::default(),
        };
        assert!(invalid
            .validate()
            .unwrap_err()
            .contains(&ValidationError::ExactlyOneOf {
                structure: "RoleGrantee",
                fields: vec!["Role", "User"],
            }));
    }

    #[test]
    fn test_decode_row() {
        let row = json!({
            "created_on": "2024-01-01",
            "name": "ANALYST",
            "is_default": "N",
            "is_current": "Y",
            "is_inherited": "N",
            "assigned_to_users": 3,
            "granted_to_roles": "1",
            "granted_roles": "0",
            "owner": "SECURITYADMIN",
            "comment": ""
        });
        let role = Role::try_from(decode::from_row::<RoleRow>(row.as_object().unwrap()).unwrap())
            .unwrap();
        assert_eq!(role.id(), id());
        assert!(role.is_current);
        assert!(!role.is_default);
        assert_eq!(role.assigned_to_users, 3);
        assert_eq!(role.comment, None);
    }
}
