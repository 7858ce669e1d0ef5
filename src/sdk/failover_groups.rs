//! Failover groups: replication of account objects between accounts.
//!
//! A primary group is created with its object types and allowed accounts;
//! secondaries are created `AS REPLICA OF` the primary in another account.
//! Source-side and target-side alterations are separate statements.

use serde::Deserialize;

use super::common::{ObjectType, Schedule};
use super::decode::{self, lenient};
use super::{facade, find_by_name};
use crate::error::{Error, Result};
use crate::sql::{
    sql_enum, AccountIdentifier, AccountObjectIdentifier, ExternalObjectIdentifier, ListStyle,
    ObjectIdentifier, ParamStyle, SqlBuilder, ToSql,
};
use crate::validation::{Flag, Presence, Validate, Validator};

sql_enum! {
    pub enum FailoverGroupObjectType {
        AccountParameters => "ACCOUNT PARAMETERS",
        Databases => "DATABASES",
        Integrations => "INTEGRATIONS",
        NetworkPolicies => "NETWORK POLICIES",
        ResourceMonitors => "RESOURCE MONITORS",
        Roles => "ROLES",
        Shares => "SHARES",
        Users => "USERS",
        Warehouses => "WAREHOUSES",
    }
}

sql_enum! {
    pub enum IntegrationType {
        SecurityIntegrations => "SECURITY INTEGRATIONS",
        ApiIntegrations => "API INTEGRATIONS",
        NotificationIntegrations => "NOTIFICATION INTEGRATIONS",
        StorageIntegrations => "STORAGE INTEGRATIONS",
        ExternalAccessIntegrations => "EXTERNAL ACCESS INTEGRATIONS",
    }
}

const LIST: ParamStyle = ParamStyle::new();

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateFailoverGroupOptions {
    pub if_not_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub object_types: Vec<FailoverGroupObjectType>,
    pub allowed_databases: Vec<AccountObjectIdentifier>,
    pub allowed_shares: Vec<AccountObjectIdentifier>,
    pub allowed_integration_types: Vec<IntegrationType>,
    pub allowed_accounts: Vec<AccountIdentifier>,
    pub ignore_edition_check: Option<bool>,
    pub replication_schedule: Option<Schedule>,
}

impl ToSql for CreateFailoverGroupOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE FAILOVER GROUP")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter_list("OBJECT_TYPES", &self.object_types, LIST)
            .parameter_list("ALLOWED_DATABASES", &self.allowed_databases, LIST)
            .parameter_list("ALLOWED_SHARES", &self.allowed_shares, LIST)
            .parameter_list("ALLOWED_INTEGRATION_TYPES", &self.allowed_integration_types, LIST)
            .parameter_list("ALLOWED_ACCOUNTS", &self.allowed_accounts, LIST)
            .keyword(self.ignore_edition_check, "IGNORE EDITION CHECK")
            .parameter(
                "REPLICATION_SCHEDULE",
                self.replication_schedule.as_ref(),
                ParamStyle::single_quoted(),
            );
    }
}

/// Each `ALLOWED_*` list needs the matching entry in `OBJECT_TYPES`.
fn validate_allowed_lists(
    v: &mut Validator,
    object_types: &[FailoverGroupObjectType],
    allowed_databases: &[AccountObjectIdentifier],
    allowed_shares: &[AccountObjectIdentifier],
    allowed_integration_types: &[IntegrationType],
) {
    v.required_when(
        "ObjectTypes.Databases",
        object_types.contains(&FailoverGroupObjectType::Databases),
        !allowed_databases.is_empty(),
        "AllowedDatabases is set",
    )
    .required_when(
        "ObjectTypes.Shares",
        object_types.contains(&FailoverGroupObjectType::Shares),
        !allowed_shares.is_empty(),
        "AllowedShares is set",
    )
    .required_when(
        "ObjectTypes.Integrations",
        object_types.contains(&FailoverGroupObjectType::Integrations),
        !allowed_integration_types.is_empty(),
        "AllowedIntegrationTypes is set",
    )
    .identifiers("AllowedDatabases", allowed_databases)
    .identifiers("AllowedShares", allowed_shares);
}

impl Validate for CreateFailoverGroupOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .at_least_one(
                "CreateFailoverGroupOptions",
                &[("ObjectTypes", self.object_types.is_set())],
            )
            .at_least_one(
                "CreateFailoverGroupOptions",
                &[("AllowedAccounts", self.allowed_accounts.is_set())],
            )
            .identifiers("AllowedAccounts", &self.allowed_accounts);
        validate_allowed_lists(
            v,
            &self.object_types,
            &self.allowed_databases,
            &self.allowed_shares,
            &self.allowed_integration_types,
        );
    }
}

/// `CREATE FAILOVER GROUP <name> AS REPLICA OF <org>.<account>.<group>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateSecondaryReplicationGroupOptions {
    pub if_not_exists: Option<bool>,
    pub secondary_name: AccountObjectIdentifier,
    pub primary_failover_group: ExternalObjectIdentifier,
}

impl ToSql for CreateSecondaryReplicationGroupOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE FAILOVER GROUP")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.secondary_name)
            .prefixed_identifier("AS REPLICA OF", Some(&self.primary_failover_group));
    }
}

impl Validate for CreateSecondaryReplicationGroupOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("SecondaryName", &self.secondary_name)
            .identifier("PrimaryFailoverGroup", &self.primary_failover_group);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FailoverGroupSet {
    pub object_types: Vec<FailoverGroupObjectType>,
    pub allowed_integration_types: Vec<IntegrationType>,
    pub replication_schedule: Option<Schedule>,
}

impl ToSql for FailoverGroupSet {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.parameter_list("OBJECT_TYPES", &self.object_types, LIST)
            .parameter_list("ALLOWED_INTEGRATION_TYPES", &self.allowed_integration_types, LIST)
            .parameter(
                "REPLICATION_SCHEDULE",
                self.replication_schedule.as_ref(),
                ParamStyle::single_quoted(),
            );
    }
}

impl Validate for FailoverGroupSet {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "FailoverGroupSet",
            &[
                ("ObjectTypes", self.object_types.is_set()),
                ("AllowedIntegrationTypes", self.allowed_integration_types.is_set()),
                ("ReplicationSchedule", self.replication_schedule.is_set()),
            ],
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FailoverGroupUnset {
    pub replication_schedule: bool,
}

impl ToSql for FailoverGroupUnset {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.keywords(&[(self.replication_schedule, "REPLICATION_SCHEDULE")]);
    }
}

impl Validate for FailoverGroupUnset {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "FailoverGroupUnset",
            &[("ReplicationSchedule", self.replication_schedule)],
        );
    }
}

/// Alterations run on the account holding the primary group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterSourceFailoverGroupOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub rename_to: Option<AccountObjectIdentifier>,
    pub set: Option<FailoverGroupSet>,
    pub unset: Option<FailoverGroupUnset>,
    pub add_allowed_databases: Vec<AccountObjectIdentifier>,
    pub remove_allowed_databases: Vec<AccountObjectIdentifier>,
    pub add_allowed_shares: Vec<AccountObjectIdentifier>,
    pub remove_allowed_shares: Vec<AccountObjectIdentifier>,
    pub add_allowed_accounts: Vec<AccountIdentifier>,
    pub ignore_edition_check: Option<bool>,
    pub remove_allowed_accounts: Vec<AccountIdentifier>,
}

impl ToSql for AlterSourceFailoverGroupOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER FAILOVER GROUP")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .prefixed_identifier("RENAME TO", self.rename_to.as_ref())
            .nested(Some("SET"), self.set.as_ref())
            .nested(Some("UNSET"), self.unset.as_ref());

        if self.add_allowed_databases.is_set() {
            b.list(Some("ADD"), &self.add_allowed_databases, ListStyle::new())
                .sql("TO ALLOWED_DATABASES");
        }
        if self.remove_allowed_databases.is_set() {
            b.list(Some("REMOVE"), &self.remove_allowed_databases, ListStyle::new())
                .sql("FROM ALLOWED_DATABASES");
        }
        if self.add_allowed_shares.is_set() {
            b.list(Some("ADD"), &self.add_allowed_shares, ListStyle::new())
                .sql("TO ALLOWED_SHARES");
        }
        if self.remove_allowed_shares.is_set() {
            b.list(Some("REMOVE"), &self.remove_allowed_shares, ListStyle::new())
                .sql("FROM ALLOWED_SHARES");
        }
        if self.add_allowed_accounts.is_set() {
            b.list(Some("ADD"), &self.add_allowed_accounts, ListStyle::new())
                .sql("TO ALLOWED_ACCOUNTS")
                .keyword(self.ignore_edition_check, "IGNORE EDITION CHECK");
        }
        if self.remove_allowed_accounts.is_set() {
            b.list(Some("REMOVE"), &self.remove_allowed_accounts, ListStyle::new())
                .sql("FROM ALLOWED_ACCOUNTS");
        }
    }
}

impl Validate for AlterSourceFailoverGroupOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("RenameTo", self.rename_to.as_ref())
            .exactly_one(
                "AlterSourceFailoverGroupOptions",
                &[
                    ("RenameTo", self.rename_to.is_set()),
                    ("Set", self.set.is_set()),
                    ("Unset", self.unset.is_set()),
                    ("AddAllowedDatabases", self.add_allowed_databases.is_set()),
                    ("RemoveAllowedDatabases", self.remove_allowed_databases.is_set()),
                    ("AddAllowedShares", self.add_allowed_shares.is_set()),
                    ("RemoveAllowedShares", self.remove_allowed_shares.is_set()),
                    ("AddAllowedAccounts", self.add_allowed_accounts.is_set()),
                    ("RemoveAllowedAccounts", self.remove_allowed_accounts.is_set()),
                ],
            )
            .required_when(
                "AddAllowedAccounts",
                self.add_allowed_accounts.is_set(),
                self.ignore_edition_check.is_true(),
                "IgnoreEditionCheck is set",
            )
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .identifiers("AddAllowedDatabases", &self.add_allowed_databases)
            .identifiers("RemoveAllowedDatabases", &self.remove_allowed_databases)
            .identifiers("AddAllowedShares", &self.add_allowed_shares)
            .identifiers("RemoveAllowedShares", &self.remove_allowed_shares)
            .identifiers("AddAllowedAccounts", &self.add_allowed_accounts)
            .identifiers("RemoveAllowedAccounts", &self.remove_allowed_accounts);
    }
}

/// Alterations run on an account holding a secondary group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterTargetFailoverGroupOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub refresh: Option<bool>,
    pub primary: Option<bool>,
    pub suspend: Option<bool>,
    pub resume: Option<bool>,
}

impl ToSql for AlterTargetFailoverGroupOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER FAILOVER GROUP")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword(self.refresh, "REFRESH")
            .keyword(self.primary, "PRIMARY")
            .keyword(self.suspend, "SUSPEND")
            .keyword(self.resume, "RESUME");
    }
}

impl Validate for AlterTargetFailoverGroupOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name).exactly_one(
            "AlterTargetFailoverGroupOptions",
            &[
                ("Refresh", self.refresh.is_true()),
                ("Primary", self.primary.is_true()),
                ("Suspend", self.suspend.is_true()),
                ("Resume", self.resume.is_true()),
            ],
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropFailoverGroupOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
}

impl ToSql for DropFailoverGroupOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP FAILOVER GROUP")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name);
    }
}

impl Validate for DropFailoverGroupOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowFailoverGroupOptions {
    pub in_account: Option<AccountIdentifier>,
}

impl ToSql for ShowFailoverGroupOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW FAILOVER GROUPS")
            .prefixed_identifier("IN ACCOUNT", self.in_account.as_ref());
    }
}

impl Validate for ShowFailoverGroupOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.opt_identifier("InAccount", self.in_account.as_ref());
    }
}

/// `SHOW DATABASES IN FAILOVER GROUP` / `SHOW SHARES IN FAILOVER GROUP`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowFailoverGroupMembersOptions {
    pub databases: Option<bool>,
    pub shares: Option<bool>,
    pub failover_group: AccountObjectIdentifier,
}

impl ToSql for ShowFailoverGroupMembersOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW")
            .keyword(self.databases, "DATABASES")
            .keyword(self.shares, "SHARES")
            .prefixed_identifier("IN FAILOVER GROUP", Some(&self.failover_group));
    }
}

impl Validate for ShowFailoverGroupMembersOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("FailoverGroup", &self.failover_group).exactly_one(
            "ShowFailoverGroupMembersOptions",
            &[
                ("Databases", self.databases.is_true()),
                ("Shares", self.shares.is_true()),
            ],
        );
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct CreateFailoverGroupRequest {
    pub name: AccountObjectIdentifier,
    pub object_types: Vec<FailoverGroupObjectType>,
    pub allowed_accounts: Vec<AccountIdentifier>,
    pub if_not_exists: Option<bool>,
    pub allowed_databases: Vec<AccountObjectIdentifier>,
    pub allowed_shares: Vec<AccountObjectIdentifier>,
    pub allowed_integration_types: Vec<IntegrationType>,
    pub ignore_edition_check: Option<bool>,
    pub replication_schedule: Option<Schedule>,
}

impl CreateFailoverGroupRequest {
    pub fn new(
        name: AccountObjectIdentifier,
        object_types: Vec<FailoverGroupObjectType>,
        allowed_accounts: Vec<AccountIdentifier>,
    ) -> Self {
        Self {
            name,
            object_types,
            allowed_accounts,
            ..Default::default()
        }
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = Some(if_not_exists);
        self
    }

    pub fn with_allowed_databases(mut self, databases: Vec<AccountObjectIdentifier>) -> Self {
        self.allowed_databases = databases;
        self
    }

    pub fn with_allowed_shares(mut self, shares: Vec<AccountObjectIdentifier>) -> Self {
        self.allowed_shares = shares;
        self
    }

    pub fn with_allowed_integration_types(mut self, types: Vec<IntegrationType>) -> Self {
        self.allowed_integration_types = types;
        self
    }

    pub fn with_ignore_edition_check(mut self, ignore: bool) -> Self {
        self.ignore_edition_check = Some(ignore);
        self
    }

    pub fn with_replication_schedule(mut self, schedule: Schedule) -> Self {
        self.replication_schedule = Some(schedule);
        self
    }

    pub fn into_options(self) -> CreateFailoverGroupOptions {
        CreateFailoverGroupOptions {
            if_not_exists: self.if_not_exists,
            name: self.name,
            object_types: self.object_types,
            allowed_databases: self.allowed_databases,
            allowed_shares: self.allowed_shares,
            allowed_integration_types: self.allowed_integration_types,
            allowed_accounts: self.allowed_accounts,
            ignore_edition_check: self.ignore_edition_check,
            replication_schedule: self.replication_schedule,
        }
    }
}

// ============================================================================
// Rows and records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct FailoverGroupRow {
    #[serde(deserialize_with = "lenient::string")]
    pub region_group: String,
    #[serde(deserialize_with = "lenient::string")]
    pub snowflake_region: String,
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub account_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub group_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
    #[serde(deserialize_with = "lenient::string")]
    pub is_primary: String,
    #[serde(deserialize_with = "lenient::string")]
    pub primary: String,
    #[serde(deserialize_with = "lenient::string")]
    pub object_types: String,
    #[serde(deserialize_with = "lenient::string")]
    pub allowed_integration_types: String,
    #[serde(deserialize_with = "lenient::string")]
    pub allowed_accounts: String,
    #[serde(deserialize_with = "lenient::string")]
    pub organization_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub account_locator: String,
    #[serde(deserialize_with = "lenient::string")]
    pub replication_schedule: String,
    #[serde(deserialize_with = "lenient::string")]
    pub secondary_state: String,
    #[serde(deserialize_with = "lenient::string")]
    pub next_scheduled_refresh: String,
    #[serde(deserialize_with = "lenient::string")]
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailoverGroup {
    pub region_group: Option<String>,
    pub snowflake_region: String,
    pub created_on: String,
    pub account_name: String,
    pub name: String,
    pub group_type: String,
    pub comment: Option<String>,
    pub is_primary: bool,
    pub primary: Option<ExternalObjectIdentifier>,
    pub object_types: Vec<FailoverGroupObjectType>,
    pub allowed_integration_types: Vec<IntegrationType>,
    pub allowed_accounts: Vec<AccountIdentifier>,
    pub organization_name: String,
    pub account_locator: String,
    pub replication_schedule: Option<String>,
    pub secondary_state: Option<String>,
    pub next_scheduled_refresh: Option<String>,
    pub owner: String,
}

impl FailoverGroup {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }

    /// The group as seen from other accounts.
    pub fn external_id(&self) -> ExternalObjectIdentifier {
        ExternalObjectIdentifier::new(
            AccountIdentifier::new(&self.organization_name, &self.account_name),
            self.id(),
        )
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::FailoverGroup
    }
}

fn parse_enum_list<T: std::str::FromStr>(column: &str, value: &str) -> Result<Vec<T>> {
    decode::parse_list(value)
        .iter()
        .map(|item| decode::parse_enum(column, item))
        .collect()
}

impl TryFrom<FailoverGroupRow> for FailoverGroup {
    type Error = Error;

    fn try_from(row: FailoverGroupRow) -> Result<Self> {
        let primary = match decode::non_empty(&row.primary) {
            Some(p) => Some(p.parse::<ExternalObjectIdentifier>()?),
            None => None,
        };
        Ok(Self {
            is_primary: decode::parse_bool("is_primary", &row.is_primary)?,
            object_types: parse_enum_list("object_types", &row.object_types)?,
            allowed_integration_types: parse_enum_list(
                "allowed_integration_types",
                &row.allowed_integration_types,
            )?,
            allowed_accounts: decode::parse_identifier_list(&row.allowed_accounts)?,
            primary,
            region_group: decode::non_empty(&row.region_group),
            comment: decode::non_empty(&row.comment),
            replication_schedule: decode::non_empty(&row.replication_schedule),
            secondary_state: decode::non_empty(&row.secondary_state),
            next_scheduled_refresh: decode::non_empty(&row.next_scheduled_refresh),
            snowflake_region: row.snowflake_region,
            created_on: row.created_on,
            account_name: row.account_name,
            name: row.name,
            group_type: row.group_type,
            organization_name: row.organization_name,
            account_locator: row.account_locator,
            owner: row.owner,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
struct MemberRow {
    #[serde(deserialize_with = "lenient::string")]
    name: String,
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Failover group operations.
    FailoverGroups
);

impl<E: super::SqlExecutor> FailoverGroups<'_, E> {
    pub async fn create(&self, request: CreateFailoverGroupRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn create_secondary_replication_group(
        &self,
        secondary_name: &AccountObjectIdentifier,
        primary: &ExternalObjectIdentifier,
        if_not_exists: bool,
    ) -> Result<()> {
        let opts = CreateSecondaryReplicationGroupOptions {
            if_not_exists: Some(if_not_exists),
            secondary_name: secondary_name.clone(),
            primary_failover_group: primary.clone(),
        };
        self.client.exec(&opts).await
    }

    pub async fn alter_source(&self, opts: AlterSourceFailoverGroupOptions) -> Result<()> {
        self.client.exec(&opts).await
    }

    pub async fn alter_target(&self, opts: AlterTargetFailoverGroupOptions) -> Result<()> {
        self.client.exec(&opts).await
    }

    pub async fn drop(&self, id: &AccountObjectIdentifier, if_exists: bool) -> Result<()> {
        let opts = DropFailoverGroupOptions {
            if_exists: Some(if_exists),
            name: id.clone(),
        };
        self.client.exec(&opts).await
    }

    pub async fn show(&self, in_account: Option<AccountIdentifier>) -> Result<Vec<FailoverGroup>> {
        let rows = self.client.query(&ShowFailoverGroupOptions { in_account }).await?;
        decode::from_rows::<FailoverGroupRow>(&rows)?
            .into_iter()
            .map(FailoverGroup::try_from)
            .collect()
    }

    /// `SHOW FAILOVER GROUPS` has no `LIKE`; the match is done here.
    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<FailoverGroup> {
        let groups = self.show(None).await?;
        find_by_name(groups, id.name(), id.fully_qualified_name(), |g| g.name.as_str())
    }

    pub async fn show_databases(
        &self,
        id: &AccountObjectIdentifier,
    ) -> Result<Vec<AccountObjectIdentifier>> {
        self.show_members(id, true).await
    }

    pub async fn show_shares(
        &self,
        id: &AccountObjectIdentifier,
    ) -> Result<Vec<AccountObjectIdentifier>> {
        self.show_members(id, false).await
    }

    async fn show_members(
        &self,
        id: &AccountObjectIdentifier,
        databases: bool,
    ) -> Result<Vec<AccountObjectIdentifier>> {
        let opts = ShowFailoverGroupMembersOptions {
            databases: Some(databases),
            shares: Some(!databases),
            failover_group: id.clone(),
        };
        let rows = self.client.query(&opts).await?;
        Ok(decode::from_rows::<MemberRow>(&rows)?
            .into_iter()
            .map(|row| AccountObjectIdentifier::new(row.name))
            .collect())
    }
}
