//! Privilege and ownership grants to account roles.
//!
//! ```text
//! GRANT <privileges> ON <target> TO ROLE <role> [WITH GRANT OPTION]
//! REVOKE [GRANT OPTION FOR] <privileges> ON <target> FROM ROLE <role> [RESTRICT | CASCADE]
//! GRANT OWNERSHIP ON <target> TO { ROLE | DATABASE ROLE } <role> [{ REVOKE | COPY } CURRENT GRANTS]
//! SHOW [FUTURE] GRANTS { ON ... | TO ... | OF ... | IN ... }
//! ```

use serde::Deserialize;

use super::common::{In, ObjectType, PluralObjectType};
use super::decode::{self, lenient};
use super::facade;
use crate::error::{Error, Result};
use crate::sql::{
    sql_enum, AccountObjectIdentifier, DatabaseObjectIdentifier, Identifier, ListStyle,
    ObjectIdentifier, SchemaObjectIdentifier, SqlBuilder, ToSql,
};
use crate::validation::{Flag, Presence, Validate, ValidationError, Validator};

// ============================================================================
// Privileges
// ============================================================================

sql_enum! {
    /// Privileges granted `ON ACCOUNT`.
    pub enum GlobalPrivilege {
        ApplyMaskingPolicy => "APPLY MASKING POLICY",
        ApplyPasswordPolicy => "APPLY PASSWORD POLICY",
        ApplySessionPolicy => "APPLY SESSION POLICY",
        ApplyTag => "APPLY TAG",
        CreateAccount => "CREATE ACCOUNT",
        CreateDatabase => "CREATE DATABASE",
        CreateFailoverGroup => "CREATE FAILOVER GROUP",
        CreateIntegration => "CREATE INTEGRATION",
        CreateNetworkPolicy => "CREATE NETWORK POLICY",
        CreateRole => "CREATE ROLE",
        CreateShare => "CREATE SHARE",
        CreateUser => "CREATE USER",
        CreateWarehouse => "CREATE WAREHOUSE",
        ExecuteAlert => "EXECUTE ALERT",
        ExecuteManagedTask => "EXECUTE MANAGED TASK",
        ExecuteTask => "EXECUTE TASK",
        ImportShare => "IMPORT SHARE",
        ManageGrants => "MANAGE GRANTS",
        MonitorExecution => "MONITOR EXECUTION",
        MonitorUsage => "MONITOR USAGE",
    }
}

sql_enum! {
    /// Privileges on databases, warehouses, integrations and failover groups.
    pub enum AccountObjectPrivilege {
        CreateDatabaseRole => "CREATE DATABASE ROLE",
        CreateSchema => "CREATE SCHEMA",
        Failover => "FAILOVER",
        ImportedPrivileges => "IMPORTED PRIVILEGES",
        Modify => "MODIFY",
        Monitor => "MONITOR",
        Operate => "OPERATE",
        Replicate => "REPLICATE",
        Usage => "USAGE",
        UseAnyRole => "USE_ANY_ROLE",
    }
}

sql_enum! {
    pub enum SchemaPrivilege {
        AddSearchOptimization => "ADD SEARCH OPTIMIZATION",
        CreateAlert => "CREATE ALERT",
        CreateFunction => "CREATE FUNCTION",
        CreateMaskingPolicy => "CREATE MASKING POLICY",
        CreateMaterializedView => "CREATE MATERIALIZED VIEW",
        CreatePasswordPolicy => "CREATE PASSWORD POLICY",
        CreatePipe => "CREATE PIPE",
        CreateProcedure => "CREATE PROCEDURE",
        CreateRowAccessPolicy => "CREATE ROW ACCESS POLICY",
        CreateSequence => "CREATE SEQUENCE",
        CreateSessionPolicy => "CREATE SESSION POLICY",
        CreateStage => "CREATE STAGE",
        CreateStream => "CREATE STREAM",
        CreateTable => "CREATE TABLE",
        CreateTag => "CREATE TAG",
        CreateTask => "CREATE TASK",
        CreateView => "CREATE VIEW",
        Modify => "MODIFY",
        Monitor => "MONITOR",
        Usage => "USAGE",
    }
}

sql_enum! {
    pub enum SchemaObjectPrivilege {
        Apply => "APPLY",
        Delete => "DELETE",
        Insert => "INSERT",
        Monitor => "MONITOR",
        Operate => "OPERATE",
        Read => "READ",
        References => "REFERENCES",
        Select => "SELECT",
        Truncate => "TRUNCATE",
        Update => "UPDATE",
        Usage => "USAGE",
        Write => "WRITE",
    }
}

/// Exactly one privilege group per statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountRoleGrantPrivileges {
    pub global_privileges: Vec<GlobalPrivilege>,
    pub account_object_privileges: Vec<AccountObjectPrivilege>,
    pub schema_privileges: Vec<SchemaPrivilege>,
    pub schema_object_privileges: Vec<SchemaObjectPrivilege>,
    pub all_privileges: Option<bool>,
}

impl AccountRoleGrantPrivileges {
    pub fn global(privileges: Vec<GlobalPrivilege>) -> Self {
        Self {
            global_privileges: privileges,
            ..Default::default()
        }
    }

    pub fn account_object(privileges: Vec<AccountObjectPrivilege>) -> Self {
        Self {
            account_object_privileges: privileges,
            ..Default::default()
        }
    }

    pub fn schema(privileges: Vec<SchemaPrivilege>) -> Self {
        Self {
            schema_privileges: privileges,
            ..Default::default()
        }
    }

    pub fn schema_object(privileges: Vec<SchemaObjectPrivilege>) -> Self {
        Self {
            schema_object_privileges: privileges,
            ..Default::default()
        }
    }

    pub fn all() -> Self {
        Self {
            all_privileges: Some(true),
            ..Default::default()
        }
    }
}

impl ToSql for AccountRoleGrantPrivileges {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.list(None, &self.global_privileges, ListStyle::new())
            .list(None, &self.account_object_privileges, ListStyle::new())
            .list(None, &self.schema_privileges, ListStyle::new())
            .list(None, &self.schema_object_privileges, ListStyle::new())
            .keyword(self.all_privileges, "ALL PRIVILEGES");
    }
}

impl Validate for AccountRoleGrantPrivileges {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "AccountRoleGrantPrivileges",
            &[
                ("GlobalPrivileges", self.global_privileges.is_set()),
                ("AccountObjectPrivileges", self.account_object_privileges.is_set()),
                ("SchemaPrivileges", self.schema_privileges.is_set()),
                ("SchemaObjectPrivileges", self.schema_object_privileges.is_set()),
                ("AllPrivileges", self.all_privileges.is_true()),
            ],
        );
    }
}

// ============================================================================
// Targets
// ============================================================================

/// `<OBJECT TYPE> <name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantOnObject<I> {
    pub object_type: ObjectType,
    pub name: I,
}

impl<I> GrantOnObject<I> {
    pub fn new(object_type: ObjectType, name: I) -> Self {
        Self { object_type, name }
    }
}

impl<I: ObjectIdentifier> ToSql for GrantOnObject<I> {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.nested(None, Some(&self.object_type)).identifier(&self.name);
    }
}

impl<I: ObjectIdentifier> Validate for GrantOnObject<I> {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

/// `<PLURAL> IN { DATABASE <db> | SCHEMA <schema> }`, after `ALL` or `FUTURE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantOnAll {
    pub object_type_plural: PluralObjectType,
    pub in_database: Option<AccountObjectIdentifier>,
    pub in_schema: Option<DatabaseObjectIdentifier>,
}

impl GrantOnAll {
    pub fn in_database(plural: PluralObjectType, database: AccountObjectIdentifier) -> Self {
        Self {
            object_type_plural: plural,
            in_database: Some(database),
            in_schema: None,
        }
    }

    pub fn in_schema(plural: PluralObjectType, schema: DatabaseObjectIdentifier) -> Self {
        Self {
            object_type_plural: plural,
            in_database: None,
            in_schema: Some(schema),
        }
    }
}

impl ToSql for GrantOnAll {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.nested(None, Some(&self.object_type_plural))
            .prefixed_identifier("IN DATABASE", self.in_database.as_ref())
            .prefixed_identifier("IN SCHEMA", self.in_schema.as_ref());
    }
}

impl Validate for GrantOnAll {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "GrantOnAll",
            &[
                ("InDatabase", self.in_database.is_set()),
                ("InSchema", self.in_schema.is_set()),
            ],
        )
        .opt_identifier("InDatabase", self.in_database.as_ref())
        .opt_identifier("InSchema", self.in_schema.as_ref());
    }
}

/// `ON ACCOUNT | ON <account object> | ON SCHEMA <schema> | ON <schema object>
/// | ON ALL ... | ON FUTURE ...`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountRoleGrantOn {
    pub account: Option<bool>,
    pub account_object: Option<GrantOnObject<AccountObjectIdentifier>>,
    pub schema: Option<DatabaseObjectIdentifier>,
    pub schema_object: Option<GrantOnObject<SchemaObjectIdentifier>>,
    pub all: Option<GrantOnAll>,
    pub future: Option<GrantOnAll>,
}

impl ToSql for AccountRoleGrantOn {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ON")
            .keyword(self.account, "ACCOUNT")
            .nested(None, self.account_object.as_ref())
            .prefixed_identifier("SCHEMA", self.schema.as_ref())
            .nested(None, self.schema_object.as_ref())
            .nested(Some("ALL"), self.all.as_ref())
            .nested(Some("FUTURE"), self.future.as_ref());
    }
}

impl Validate for AccountRoleGrantOn {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "AccountRoleGrantOn",
            &[
                ("Account", self.account.is_true()),
                ("AccountObject", self.account_object.is_set()),
                ("Schema", self.schema.is_set()),
                ("SchemaObject", self.schema_object.is_set()),
                ("All", self.all.is_set()),
                ("Future", self.future.is_set()),
            ],
        )
        .opt_identifier("Schema", self.schema.as_ref())
        .nested(self.account_object.as_ref())
        .nested(self.schema_object.as_ref())
        .nested(self.all.as_ref())
        .nested(self.future.as_ref());

        if let Some(on) = &self.account_object {
            if on.object_type.is_schema_object() {
                v.push(ValidationError::InvalidValue {
                    field: "AccountObject",
                    value: on.object_type.to_string(),
                });
            }
        }
        if let Some(on) = &self.schema_object {
            if !on.object_type.is_schema_object() {
                v.push(ValidationError::InvalidValue {
                    field: "SchemaObject",
                    value: on.object_type.to_string(),
                });
            }
        }
    }
}

// ============================================================================
// GRANT / REVOKE privileges
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrantPrivilegesToAccountRoleOptions {
    pub privileges: AccountRoleGrantPrivileges,
    pub on: AccountRoleGrantOn,
    pub account_role: AccountObjectIdentifier,
    pub with_grant_option: Option<bool>,
}

impl ToSql for GrantPrivilegesToAccountRoleOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("GRANT")
            .nested(None, Some(&self.privileges))
            .nested(None, Some(&self.on))
            .prefixed_identifier("TO ROLE", Some(&self.account_role))
            .keyword(self.with_grant_option, "WITH GRANT OPTION");
    }
}

fn validate_privileges_on(
    v: &mut Validator,
    privileges: &AccountRoleGrantPrivileges,
    on: &AccountRoleGrantOn,
) {
    v.nested(Some(privileges)).nested(Some(on)).required_when(
        "On.Account",
        on.account.is_true(),
        privileges.global_privileges.is_set(),
        "global privileges are granted",
    );
}

impl Validate for GrantPrivilegesToAccountRoleOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("AccountRole", &self.account_role);
        validate_privileges_on(v, &self.privileges, &self.on);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevokePrivilegesFromAccountRoleOptions {
    pub grant_option_for: Option<bool>,
    pub privileges: AccountRoleGrantPrivileges,
    pub on: AccountRoleGrantOn,
    pub account_role: AccountObjectIdentifier,
    pub restrict: Option<bool>,
    pub cascade: Option<bool>,
}

impl ToSql for RevokePrivilegesFromAccountRoleOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("REVOKE")
            .keyword(self.grant_option_for, "GRANT OPTION FOR")
            .nested(None, Some(&self.privileges))
            .nested(None, Some(&self.on))
            .prefixed_identifier("FROM ROLE", Some(&self.account_role))
            .keyword(self.restrict, "RESTRICT")
            .keyword(self.cascade, "CASCADE");
    }
}

impl Validate for RevokePrivilegesFromAccountRoleOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("AccountRole", &self.account_role).conflicting(
            "RevokePrivilegesFromAccountRoleOptions",
            &[
                ("Restrict", self.restrict.is_true()),
                ("Cascade", self.cascade.is_true()),
            ],
        );
        validate_privileges_on(v, &self.privileges, &self.on);
    }
}

// ============================================================================
// GRANT OWNERSHIP
// ============================================================================

sql_enum! {
    /// What happens to grants held on the object when ownership moves.
    pub enum CurrentGrants {
        Revoke => "REVOKE",
        Copy => "COPY",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OwnershipGrantOn {
    pub object: Option<GrantOnObject<Identifier>>,
    pub all: Option<GrantOnAll>,
    pub future: Option<GrantOnAll>,
}

impl ToSql for OwnershipGrantOn {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ON")
            .nested(None, self.object.as_ref())
            .nested(Some("ALL"), self.all.as_ref())
            .nested(Some("FUTURE"), self.future.as_ref());
    }
}

impl Validate for OwnershipGrantOn {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "OwnershipGrantOn",
            &[
                ("Object", self.object.is_set()),
                ("All", self.all.is_set()),
                ("Future", self.future.is_set()),
            ],
        )
        .nested(self.object.as_ref())
        .nested(self.all.as_ref())
        .nested(self.future.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OwnershipGrantTo {
    pub account_role: Option<AccountObjectIdentifier>,
    pub database_role: Option<DatabaseObjectIdentifier>,
}

impl ToSql for OwnershipGrantTo {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.prefixed_identifier("TO ROLE", self.account_role.as_ref())
            .prefixed_identifier("TO DATABASE ROLE", self.database_role.as_ref());
    }
}

impl Validate for OwnershipGrantTo {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "OwnershipGrantTo",
            &[
                ("AccountRole", self.account_role.is_set()),
                ("DatabaseRole", self.database_role.is_set()),
            ],
        )
        .opt_identifier("AccountRole", self.account_role.as_ref())
        .opt_identifier("DatabaseRole", self.database_role.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrantOwnershipOptions {
    pub on: OwnershipGrantOn,
    pub to: OwnershipGrantTo,
    pub current_grants: Option<CurrentGrants>,
}

impl ToSql for GrantOwnershipOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("GRANT OWNERSHIP")
            .nested(None, Some(&self.on))
            .nested(None, Some(&self.to));
        if let Some(current) = &self.current_grants {
            b.nested(None, Some(current)).sql("CURRENT GRANTS");
        }
    }
}

impl Validate for GrantOwnershipOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(Some(&self.on)).nested(Some(&self.to));
    }
}

// ============================================================================
// SHOW GRANTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowGrantsOn {
    pub account: Option<bool>,
    pub object: Option<GrantOnObject<Identifier>>,
}

impl ToSql for ShowGrantsOn {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.keyword(self.account, "ACCOUNT")
            .nested(None, self.object.as_ref());
    }
}

impl Validate for ShowGrantsOn {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "ShowGrantsOn",
            &[
                ("Account", self.account.is_true()),
                ("Object", self.object.is_set()),
            ],
        )
        .nested(self.object.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowGrantsTo {
    pub role: Option<AccountObjectIdentifier>,
    pub user: Option<AccountObjectIdentifier>,
    pub share: Option<AccountObjectIdentifier>,
}

impl ToSql for ShowGrantsTo {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.prefixed_identifier("ROLE", self.role.as_ref())
            .prefixed_identifier("USER", self.user.as_ref())
            .prefixed_identifier("SHARE", self.share.as_ref());
    }
}

impl Validate for ShowGrantsTo {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "ShowGrantsTo",
            &[
                ("Role", self.role.is_set()),
                ("User", self.user.is_set()),
                ("Share", self.share.is_set()),
            ],
        )
        .opt_identifier("Role", self.role.as_ref())
        .opt_identifier("User", self.user.as_ref())
        .opt_identifier("Share", self.share.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowGrantsOf {
    pub role: Option<AccountObjectIdentifier>,
    pub share: Option<AccountObjectIdentifier>,
}

impl ToSql for ShowGrantsOf {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.prefixed_identifier("ROLE", self.role.as_ref())
            .prefixed_identifier("SHARE", self.share.as_ref());
    }
}

impl Validate for ShowGrantsOf {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "ShowGrantsOf",
            &[("Role", self.role.is_set()), ("Share", self.share.is_set())],
        )
        .opt_identifier("Role", self.role.as_ref())
        .opt_identifier("Share", self.share.as_ref());
    }
}

/// `SHOW GRANTS` with no filter lists the current session's grants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowGrantOptions {
    pub future: Option<bool>,
    pub on: Option<ShowGrantsOn>,
    pub to: Option<ShowGrantsTo>,
    pub of: Option<ShowGrantsOf>,
    pub in_: Option<In>,
}

impl ToSql for ShowGrantOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW")
            .keyword(self.future, "FUTURE")
            .sql("GRANTS")
            .nested(Some("ON"), self.on.as_ref())
            .nested(Some("TO"), self.to.as_ref())
            .nested(Some("OF"), self.of.as_ref())
            .nested(None, self.in_.as_ref());
    }
}

impl Validate for ShowGrantOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.conflicting(
            "ShowGrantOptions",
            &[
                ("On", self.on.is_set()),
                ("To", self.to.is_set()),
                ("Of", self.of.is_set()),
                ("In", self.in_.is_set()),
            ],
        )
        .required_when("In", self.in_.is_set(), self.future.is_true(), "Future is set")
        .required_when("Future", self.future.is_true(), self.in_.is_set(), "In is set")
        .nested(self.on.as_ref())
        .nested(self.to.as_ref())
        .nested(self.of.as_ref())
        .nested(self.in_.as_ref());
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct GrantPrivilegesToAccountRoleRequest {
    pub privileges: AccountRoleGrantPrivileges,
    pub on: AccountRoleGrantOn,
    pub account_role: AccountObjectIdentifier,
    pub with_grant_option: Option<bool>,
}

impl GrantPrivilegesToAccountRoleRequest {
    pub fn new(
        privileges: AccountRoleGrantPrivileges,
        on: AccountRoleGrantOn,
        account_role: AccountObjectIdentifier,
    ) -> Self {
        Self {
            privileges,
            on,
            account_role,
            with_grant_option: None,
        }
    }

    pub fn with_grant_option(mut self, grant_option: bool) -> Self {
        self.with_grant_option = Some(grant_option);
        self
    }

    pub fn into_options(self) -> GrantPrivilegesToAccountRoleOptions {
        GrantPrivilegesToAccountRoleOptions {
            privileges: self.privileges,
            on: self.on,
            account_role: self.account_role,
            with_grant_option: self.with_grant_option,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct RevokePrivilegesFromAccountRoleRequest {
    pub privileges: AccountRoleGrantPrivileges,
    pub on: AccountRoleGrantOn,
    pub account_role: AccountObjectIdentifier,
    pub grant_option_for: Option<bool>,
    pub restrict: Option<bool>,
    pub cascade: Option<bool>,
}

impl RevokePrivilegesFromAccountRoleRequest {
    pub fn new(
        privileges: AccountRoleGrantPrivileges,
        on: AccountRoleGrantOn,
        account_role: AccountObjectIdentifier,
    ) -> Self {
        Self {
            privileges,
            on,
            account_role,
            ..Default::default()
        }
    }

    pub fn with_grant_option_for(mut self, grant_option_for: bool) -> Self {
        self.grant_option_for = Some(grant_option_for);
        self
    }

    pub fn with_restrict(mut self, restrict: bool) -> Self {
        self.restrict = Some(restrict);
        self
    }

    pub fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade = Some(cascade);
        self
    }

    pub fn into_options(self) -> RevokePrivilegesFromAccountRoleOptions {
        RevokePrivilegesFromAccountRoleOptions {
            grant_option_for: self.grant_option_for,
            privileges: self.privileges,
            on: self.on,
            account_role: self.account_role,
            restrict: self.restrict,
            cascade: self.cascade,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct GrantOwnershipRequest {
    pub on: OwnershipGrantOn,
    pub to: OwnershipGrantTo,
    pub current_grants: Option<CurrentGrants>,
}

impl GrantOwnershipRequest {
    pub fn new(on: OwnershipGrantOn, to: OwnershipGrantTo) -> Self {
        Self {
            on,
            to,
            current_grants: None,
        }
    }

    pub fn with_current_grants(mut self, current_grants: CurrentGrants) -> Self {
        self.current_grants = Some(current_grants);
        self
    }

    pub fn into_options(self) -> GrantOwnershipOptions {
        GrantOwnershipOptions {
            on: self.on,
            to: self.to,
            current_grants: self.current_grants,
        }
    }
}

// ============================================================================
// Rows and records
// ============================================================================

/// Row of `SHOW GRANTS`; `SHOW FUTURE GRANTS` names two columns differently.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct GrantRow {
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub privilege: String,
    #[serde(alias = "grant_on", deserialize_with = "lenient::string")]
    pub granted_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(alias = "grant_to", deserialize_with = "lenient::string")]
    pub granted_to: String,
    #[serde(deserialize_with = "lenient::string")]
    pub grantee_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub grant_option: String,
    #[serde(deserialize_with = "lenient::string")]
    pub granted_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub created_on: String,
    pub privilege: String,
    pub granted_on: String,
    pub name: String,
    pub granted_to: String,
    pub grantee_name: String,
    pub grant_option: bool,
    pub granted_by: Option<String>,
}

impl Grant {
    /// The kind of object the grant is on, when it is one this crate models.
    ///
    /// `SHOW GRANTS` spells multi-word kinds with underscores (`MASKING_POLICY`).
    pub fn granted_on_type(&self) -> Option<ObjectType> {
        self.granted_on.replace('_', " ").parse().ok()
    }
}

impl TryFrom<GrantRow> for Grant {
    type Error = Error;

    fn try_from(row: GrantRow) -> Result<Self> {
        Ok(Self {
            grant_option: decode::parse_bool("grant_option", &row.grant_option)?,
            granted_by: decode::non_empty(&row.granted_by),
            created_on: row.created_on,
            privilege: row.privilege,
            granted_on: row.granted_on,
            name: row.name,
            granted_to: row.granted_to,
            grantee_name: row.grantee_name,
        })
    }
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Grant operations.
    Grants
);

impl<E: super::SqlExecutor> Grants<'_, E> {
    pub async fn grant_privileges_to_account_role(
        &self,
        request: GrantPrivilegesToAccountRoleRequest,
    ) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn revoke_privileges_from_account_role(
        &self,
        request: RevokePrivilegesFromAccountRoleRequest,
    ) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn grant_ownership(&self, request: GrantOwnershipRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn show(&self, opts: ShowGrantOptions) -> Result<Vec<Grant>> {
        let rows = self.client.query(&opts).await?;
        decode::from_rows::<GrantRow>(&rows)?
            .into_iter()
            .map(Grant::try_from)
            .collect()
    }
}
