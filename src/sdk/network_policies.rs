//! Network policies.
//!
//! ```sql
//! CREATE [OR REPLACE] NETWORK POLICY <name>
//!   [ALLOWED_NETWORK_RULE_LIST = (<rule>, ...)]
//!   [BLOCKED_NETWORK_RULE_LIST = (<rule>, ...)]
//!   [ALLOWED_IP_LIST = ('<ip>', ...)]
//!   [BLOCKED_IP_LIST = ('<ip>', ...)]
//!   [COMMENT = '<comment>']
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::common::{Like, ObjectType};
use super::decode::{self, lenient, DescribeAccumulator};
use super::{facade, find_by_name};
use crate::error::{Error, Result};
use crate::sql::{
    AccountObjectIdentifier, ObjectIdentifier, ParamStyle, Quotes, SchemaObjectIdentifier,
    SqlBuilder, ToSql,
};
use crate::validation::{Presence, Validate, ValidationError, Validator};

/// One entry of an IP list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ip {
    pub ip: String,
}

static IPV4_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})(?:/(\d{1,2}))?$").unwrap()
});

impl Ip {
    pub fn new(ip: impl Into<String>) -> Self {
        Self { ip: ip.into() }
    }

    /// An IPv4 address, optionally with a CIDR prefix (`10.0.0.0/8`).
    pub fn is_valid(&self) -> bool {
        let Some(caps) = IPV4_RANGE.captures(&self.ip) else {
            return false;
        };
        let octets_ok = (1..=4).all(|i| caps[i].parse::<u8>().is_ok());
        let prefix_ok = caps
            .get(5)
            .map_or(true, |m| m.as_str().parse::<u8>().is_ok_and(|n| n <= 32));
        octets_ok && prefix_ok
    }
}

/// One error per malformed entry.
fn validate_ips(v: &mut Validator, field: &'static str, list: &[Ip]) {
    for ip in list.iter().filter(|ip| !ip.is_valid()) {
        v.push(ValidationError::InvalidValue {
            field,
            value: ip.ip.clone(),
        });
    }
}

impl ToSql for Ip {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.value(&self.ip, Quotes::Single);
    }
}

fn ips<I, S>(items: I) -> Vec<Ip>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Ip::new).collect()
}

const LIST: ParamStyle = ParamStyle::new().parentheses();

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateNetworkPolicyOptions {
    pub or_replace: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub allowed_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub blocked_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub allowed_ip_list: Vec<Ip>,
    pub blocked_ip_list: Vec<Ip>,
    pub comment: Option<String>,
}

impl ToSql for CreateNetworkPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .sql("NETWORK POLICY")
            .identifier(&self.name)
            .parameter_list("ALLOWED_NETWORK_RULE_LIST", &self.allowed_network_rule_list, LIST)
            .parameter_list("BLOCKED_NETWORK_RULE_LIST", &self.blocked_network_rule_list, LIST)
            .parameter_list("ALLOWED_IP_LIST", &self.allowed_ip_list, LIST)
            .parameter_list("BLOCKED_IP_LIST", &self.blocked_ip_list, LIST)
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
    }
}

impl Validate for CreateNetworkPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .identifiers("AllowedNetworkRuleList", &self.allowed_network_rule_list)
            .identifiers("BlockedNetworkRuleList", &self.blocked_network_rule_list);
        validate_ips(v, "AllowedIpList", &self.allowed_ip_list);
        validate_ips(v, "BlockedIpList", &self.blocked_ip_list);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkPolicySet {
    pub allowed_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub blocked_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub allowed_ip_list: Vec<Ip>,
    pub blocked_ip_list: Vec<Ip>,
    pub comment: Option<String>,
}

impl ToSql for NetworkPolicySet {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.parameter_list("ALLOWED_NETWORK_RULE_LIST", &self.allowed_network_rule_list, LIST)
            .parameter_list("BLOCKED_NETWORK_RULE_LIST", &self.blocked_network_rule_list, LIST)
            .parameter_list("ALLOWED_IP_LIST", &self.allowed_ip_list, LIST)
            .parameter_list("BLOCKED_IP_LIST", &self.blocked_ip_list, LIST)
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
    }
}

impl Validate for NetworkPolicySet {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "NetworkPolicySet",
            &[
                ("AllowedNetworkRuleList", self.allowed_network_rule_list.is_set()),
                ("BlockedNetworkRuleList", self.blocked_network_rule_list.is_set()),
                ("AllowedIpList", self.allowed_ip_list.is_set()),
                ("BlockedIpList", self.blocked_ip_list.is_set()),
                ("Comment", self.comment.is_set()),
            ],
        )
        .identifiers("AllowedNetworkRuleList", &self.allowed_network_rule_list)
        .identifiers("BlockedNetworkRuleList", &self.blocked_network_rule_list);
        validate_ips(v, "AllowedIpList", &self.allowed_ip_list);
        validate_ips(v, "BlockedIpList", &self.blocked_ip_list);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkPolicyUnset {
    pub allowed_network_rule_list: bool,
    pub blocked_network_rule_list: bool,
    pub allowed_ip_list: bool,
    pub blocked_ip_list: bool,
    pub comment: bool,
}

impl ToSql for NetworkPolicyUnset {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.keywords(&[
            (self.allowed_network_rule_list, "ALLOWED_NETWORK_RULE_LIST"),
            (self.blocked_network_rule_list, "BLOCKED_NETWORK_RULE_LIST"),
            (self.allowed_ip_list, "ALLOWED_IP_LIST"),
            (self.blocked_ip_list, "BLOCKED_IP_LIST"),
            (self.comment, "COMMENT"),
        ]);
    }
}

impl Validate for NetworkPolicyUnset {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "NetworkPolicyUnset",
            &[
                ("AllowedNetworkRuleList", self.allowed_network_rule_list),
                ("BlockedNetworkRuleList", self.blocked_network_rule_list),
                ("AllowedIpList", self.allowed_ip_list),
                ("BlockedIpList", self.blocked_ip_list),
                ("Comment", self.comment),
            ],
        );
    }
}

/// Rule references added to or removed from a policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkRuleChange {
    pub allowed_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub blocked_network_rule_list: Vec<SchemaObjectIdentifier>,
}

impl ToSql for NetworkRuleChange {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.parameter_list("ALLOWED_NETWORK_RULE_LIST", &self.allowed_network_rule_list, LIST)
            .parameter_list("BLOCKED_NETWORK_RULE_LIST", &self.blocked_network_rule_list, LIST);
    }
}

impl Validate for NetworkRuleChange {
    fn validate_into(&self, v: &mut Validator) {
        v.exactly_one(
            "NetworkRuleChange",
            &[
                ("AllowedNetworkRuleList", self.allowed_network_rule_list.is_set()),
                ("BlockedNetworkRuleList", self.blocked_network_rule_list.is_set()),
            ],
        )
        .identifiers("AllowedNetworkRuleList", &self.allowed_network_rule_list)
        .identifiers("BlockedNetworkRuleList", &self.blocked_network_rule_list);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterNetworkPolicyOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
    pub set: Option<NetworkPolicySet>,
    pub unset: Option<NetworkPolicyUnset>,
    pub add: Option<NetworkRuleChange>,
    pub remove: Option<NetworkRuleChange>,
    pub rename_to: Option<AccountObjectIdentifier>,
}

impl ToSql for AlterNetworkPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER NETWORK POLICY")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .nested(Some("SET"), self.set.as_ref())
            .nested(Some("UNSET"), self.unset.as_ref())
            .nested(Some("ADD"), self.add.as_ref())
            .nested(Some("REMOVE"), self.remove.as_ref())
            .prefixed_identifier("RENAME TO", self.rename_to.as_ref());
    }
}

impl Validate for AlterNetworkPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("RenameTo", self.rename_to.as_ref())
            .exactly_one(
                "AlterNetworkPolicyOptions",
                &[
                    ("Set", self.set.is_set()),
                    ("Unset", self.unset.is_set()),
                    ("Add", self.add.is_set()),
                    ("Remove", self.remove.is_set()),
                    ("RenameTo", self.rename_to.is_set()),
                ],
            )
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref())
            .nested(self.add.as_ref())
            .nested(self.remove.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropNetworkPolicyOptions {
    pub if_exists: Option<bool>,
    pub name: AccountObjectIdentifier,
}

impl ToSql for DropNetworkPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP NETWORK POLICY")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name);
    }
}

impl Validate for DropNetworkPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowNetworkPolicyOptions {
    pub like: Option<Like>,
}

impl ToSql for ShowNetworkPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW NETWORK POLICIES").nested(None, self.like.as_ref());
    }
}

impl Validate for ShowNetworkPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(self.like.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeNetworkPolicyOptions {
    pub name: AccountObjectIdentifier,
}

impl ToSql for DescribeNetworkPolicyOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DESCRIBE NETWORK POLICY").identifier(&self.name);
    }
}

impl Validate for DescribeNetworkPolicyOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct CreateNetworkPolicyRequest {
    pub name: AccountObjectIdentifier,
    pub or_replace: Option<bool>,
    pub allowed_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub blocked_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub allowed_ip_list: Vec<String>,
    pub blocked_ip_list: Vec<String>,
    pub comment: Option<String>,
}

impl CreateNetworkPolicyRequest {
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

    pub fn with_allowed_network_rule_list(mut self, rules: Vec<SchemaObjectIdentifier>) -> Self {
        self.allowed_network_rule_list = rules;
        self
    }

    pub fn with_blocked_network_rule_list(mut self, rules: Vec<SchemaObjectIdentifier>) -> Self {
        self.blocked_network_rule_list = rules;
        self
    }

    pub fn with_allowed_ip_list<I, S>(mut self, ips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_ip_list = ips.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_blocked_ip_list<I, S>(mut self, ips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_ip_list = ips.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn into_options(self) -> CreateNetworkPolicyOptions {
        CreateNetworkPolicyOptions {
            or_replace: self.or_replace,
            name: self.name,
            allowed_network_rule_list: self.allowed_network_rule_list,
            blocked_network_rule_list: self.blocked_network_rule_list,
            allowed_ip_list: ips(self.allowed_ip_list),
            blocked_ip_list: ips(self.blocked_ip_list),
            comment: self.comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct NetworkPolicySetRequest {
    pub allowed_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub blocked_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub allowed_ip_list: Vec<String>,
    pub blocked_ip_list: Vec<String>,
    pub comment: Option<String>,
}

impl NetworkPolicySetRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allowed_network_rule_list(mut self, rules: Vec<SchemaObjectIdentifier>) -> Self {
        self.allowed_network_rule_list = rules;
        self
    }

    pub fn with_blocked_network_rule_list(mut self, rules: Vec<SchemaObjectIdentifier>) -> Self {
        self.blocked_network_rule_list = rules;
        self
    }

    pub fn with_allowed_ip_list<I, S>(mut self, ips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_ip_list = ips.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_blocked_ip_list<I, S>(mut self, ips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_ip_list = ips.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    fn into_options(self) -> NetworkPolicySet {
        NetworkPolicySet {
            allowed_network_rule_list: self.allowed_network_rule_list,
            blocked_network_rule_list: self.blocked_network_rule_list,
            allowed_ip_list: ips(self.allowed_ip_list),
            blocked_ip_list: ips(self.blocked_ip_list),
            comment: self.comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct AlterNetworkPolicyRequest {
    pub name: AccountObjectIdentifier,
    pub if_exists: Option<bool>,
    pub set: Option<NetworkPolicySetRequest>,
    pub unset: Option<NetworkPolicyUnset>,
    pub add: Option<NetworkRuleChange>,
    pub remove: Option<NetworkRuleChange>,
    pub rename_to: Option<AccountObjectIdentifier>,
}

impl AlterNetworkPolicyRequest {
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

    pub fn with_set(mut self, set: NetworkPolicySetRequest) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_unset(mut self, unset: NetworkPolicyUnset) -> Self {
        self.unset = Some(unset);
        self
    }

    pub fn with_add(mut self, add: NetworkRuleChange) -> Self {
        self.add = Some(add);
        self
    }

    pub fn with_remove(mut self, remove: NetworkRuleChange) -> Self {
        self.remove = Some(remove);
        self
    }

    pub fn with_rename_to(mut self, new_name: AccountObjectIdentifier) -> Self {
        self.rename_to = Some(new_name);
        self
    }

    pub fn into_options(self) -> AlterNetworkPolicyOptions {
        AlterNetworkPolicyOptions {
            if_exists: self.if_exists,
            name: self.name,
            set: self.set.map(NetworkPolicySetRequest::into_options),
            unset: self.unset,
            add: self.add,
            remove: self.remove,
            rename_to: self.rename_to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct DropNetworkPolicyRequest {
    pub name: AccountObjectIdentifier,
    pub if_exists: Option<bool>,
}

impl DropNetworkPolicyRequest {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        Self {
            name,
            if_exists: None,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = Some(if_exists);
        self
    }

    pub fn into_options(self) -> DropNetworkPolicyOptions {
        DropNetworkPolicyOptions {
            if_exists: self.if_exists,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct ShowNetworkPolicyRequest {
    pub like: Option<Like>,
}

impl ShowNetworkPolicyRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_like(mut self, like: Like) -> Self {
        self.like = Some(like);
        self
    }

    pub fn into_options(self) -> ShowNetworkPolicyOptions {
        ShowNetworkPolicyOptions { like: self.like }
    }
}

// ============================================================================
// Rows and records
// ============================================================================

/// Row of `SHOW NETWORK POLICIES`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct NetworkPolicyRow {
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
    #[serde(deserialize_with = "lenient::string")]
    pub entries_in_allowed_ip_list: String,
    #[serde(deserialize_with = "lenient::string")]
    pub entries_in_blocked_ip_list: String,
    #[serde(deserialize_with = "lenient::string")]
    pub entries_in_allowed_network_rules: String,
    #[serde(deserialize_with = "lenient::string")]
    pub entries_in_blocked_network_rules: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPolicy {
    pub created_on: String,
    pub name: String,
    pub comment: Option<String>,
    pub entries_in_allowed_ip_list: i64,
    pub entries_in_blocked_ip_list: i64,
    pub entries_in_allowed_network_rules: i64,
    pub entries_in_blocked_network_rules: i64,
}

impl NetworkPolicy {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::NetworkPolicy
    }
}

impl TryFrom<NetworkPolicyRow> for NetworkPolicy {
    type Error = Error;

    fn try_from(row: NetworkPolicyRow) -> Result<Self> {
        Ok(Self {
            entries_in_allowed_ip_list: decode::parse_int(
                "entries_in_allowed_ip_list",
                &row.entries_in_allowed_ip_list,
            )?,
            entries_in_blocked_ip_list: decode::parse_int(
                "entries_in_blocked_ip_list",
                &row.entries_in_blocked_ip_list,
            )?,
            entries_in_allowed_network_rules: decode::parse_int(
                "entries_in_allowed_network_rules",
                &row.entries_in_allowed_network_rules,
            )?,
            entries_in_blocked_network_rules: decode::parse_int(
                "entries_in_blocked_network_rules",
                &row.entries_in_blocked_network_rules,
            )?,
            comment: decode::non_empty(&row.comment),
            created_on: row.created_on,
            name: row.name,
        })
    }
}

/// Network rule reference as reported by `DESCRIBE NETWORK POLICY`.
#[derive(Debug, Deserialize)]
struct NetworkRuleRef {
    #[serde(rename = "fullyQualifiedRuleName")]
    fully_qualified_rule_name: String,
}

fn parse_network_rules(value: &str) -> Result<Vec<SchemaObjectIdentifier>> {
    let value = value.trim();
    if value.is_empty() || value == "null" {
        return Ok(Vec::new());
    }
    let refs: Vec<NetworkRuleRef> = serde_json::from_str(value)?;
    refs.iter()
        .map(|r| {
            r.fully_qualified_rule_name
                .parse::<SchemaObjectIdentifier>()
                .map_err(Error::from)
        })
        .collect()
}

/// Result of `DESCRIBE NETWORK POLICY`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkPolicyDetails {
    pub allowed_ip_list: Vec<String>,
    pub blocked_ip_list: Vec<String>,
    pub allowed_network_rule_list: Vec<SchemaObjectIdentifier>,
    pub blocked_network_rule_list: Vec<SchemaObjectIdentifier>,
}

impl DescribeAccumulator for NetworkPolicyDetails {
    fn accept(&mut self, property: &str, value: &str) -> Result<bool> {
        match property {
            "ALLOWED_IP_LIST" => self.allowed_ip_list = decode::parse_list(value),
            "BLOCKED_IP_LIST" => self.blocked_ip_list = decode::parse_list(value),
            "ALLOWED_NETWORK_RULE_LIST" => {
                self.allowed_network_rule_list = parse_network_rules(value)?
            }
            "BLOCKED_NETWORK_RULE_LIST" => {
                self.blocked_network_rule_list = parse_network_rules(value)?
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Network policy operations.
    NetworkPolicies
);

impl<E: super::SqlExecutor> NetworkPolicies<'_, E> {
    pub async fn create(&self, request: CreateNetworkPolicyRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn alter(&self, request: AlterNetworkPolicyRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn drop(&self, id: &AccountObjectIdentifier, if_exists: bool) -> Result<()> {
        let request = DropNetworkPolicyRequest::new(id.clone()).with_if_exists(if_exists);
        self.client.exec(&request.into_options()).await
    }

    pub async fn show(&self, request: ShowNetworkPolicyRequest) -> Result<Vec<NetworkPolicy>> {
        let rows = self.client.query(&request.into_options()).await?;
        decode::from_rows::<NetworkPolicyRow>(&rows)?
            .into_iter()
            .map(NetworkPolicy::try_from)
            .collect()
    }

    pub async fn show_by_id(&self, id: &AccountObjectIdentifier) -> Result<NetworkPolicy> {
        let policies = self
            .show(ShowNetworkPolicyRequest::new().with_like(Like::new(id.name())))
            .await?;
        find_by_name(policies, id.name(), id.fully_qualified_name(), |p| p.name.as_str())
    }

    pub async fn describe(&self, id: &AccountObjectIdentifier) -> Result<NetworkPolicyDetails> {
        let opts = DescribeNetworkPolicyOptions { name: id.clone() };
        let rows = self.client.query(&opts).await?;
        decode::decode_properties(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use serde_json::json;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("P1")
    }

    fn rule(name: &str) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", name)
    }

    #[test]
    fn test_create_with_lists_and_comment() {
        let opts = CreateNetworkPolicyRequest::new(id())
            .with_allowed_ip_list(["1.1.1.1", "2.2.2.2"])
            .with_blocked_ip_list(["9.9.9.9"])
            .with_comment("test")
            .into_options();
        assert!(opts.validate().is_ok());
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @r#"CREATE NETWORK POLICY "P1" ALLOWED_IP_LIST = ('1.1.1.1', '2.2.2.2') BLOCKED_IP_LIST = ('9.9.9.9') COMMENT = 'test'"#
        );
    }

    #[test]
    fn test_create_with_rules() {
        let opts = CreateNetworkPolicyRequest::new(id())
            .with_or_replace(true)
            .with_allowed_network_rule_list(vec![rule("R1"), rule("R2")])
            .into_options();
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @r#"CREATE OR REPLACE NETWORK POLICY "P1" ALLOWED_NETWORK_RULE_LIST = ("DB"."S"."R1", "DB"."S"."R2")"#
        );
    }

    #[test]
    fn test_create_invalid_identifier() {
        let opts = CreateNetworkPolicyRequest::new(AccountObjectIdentifier::new("")).into_options();
        let err = opts.validate().unwrap_err();
        assert!(err.contains(&ValidationError::InvalidObjectIdentifier { field: "name" }));
    }

    #[test]
    fn test_ip_format() {
        for ok in ["10.0.0.1", "0.0.0.0/0", "192.168.1.0/24", "255.255.255.255/32"] {
            assert!(Ip::new(ok).is_valid(), "{ok}");
        }
        for bad in ["", "10.0.0", "256.1.1.1", "10.0.0.1/33", "10.0.0.1/", "host.example", " 10.0.0.1"] {
            assert!(!Ip::new(bad).is_valid(), "{bad}");
        }
    }

    #[test]
    fn test_malformed_ips_are_rejected() {
        let create = CreateNetworkPolicyRequest::new(id())
            .with_allowed_ip_list(["1.1.1.1", "1.1.1.300"])
            .with_blocked_ip_list(["bad"])
            .into_options();
        assert_eq!(
            create.validate().unwrap_err().errors(),
            &[
                ValidationError::InvalidValue {
                    field: "AllowedIpList",
                    value: "1.1.1.300".into(),
                },
                ValidationError::InvalidValue {
                    field: "BlockedIpList",
                    value: "bad".into(),
                },
            ]
        );

        let set = AlterNetworkPolicyRequest::new(id())
            .with_set(NetworkPolicySetRequest::new().with_blocked_ip_list(["10.0.0.0/40"]))
            .into_options();
        assert_eq!(
            set.validate().unwrap_err().errors(),
            &[ValidationError::InvalidValue {
                field: "BlockedIpList",
                value: "10.0.0.0/40".into(),
            }]
        );
    }

    #[test]
    fn test_alter_set() {
        let opts = AlterNetworkPolicyRequest::new(id())
            .with_if_exists(true)
            .with_set(
                NetworkPolicySetRequest::new()
                    .with_allowed_ip_list(["0.0.0.0/0"])
                    .with_comment("c"),
            )
            .into_options();
        assert!(opts.validate().is_ok());
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @r#"ALTER NETWORK POLICY IF EXISTS "P1" SET ALLOWED_IP_LIST = ('0.0.0.0/0') COMMENT = 'c'"#
        );
    }

    #[test]
    fn test_alter_unset_add_remove_rename() {
        let unset = AlterNetworkPolicyRequest::new(id())
            .with_unset(NetworkPolicyUnset {
                blocked_ip_list: true,
                comment: true,
                ..Default::default()
            })
            .into_options();
        assert_eq!(
            unset.to_sql().unwrap(),
            "ALTER NETWORK POLICY \"P1\" UNSET BLOCKED_IP_LIST, COMMENT"
        );

        let add = AlterNetworkPolicyRequest::new(id())
            .with_add(NetworkRuleChange {
                allowed_network_rule_list: vec![rule("R")],
                ..Default::default()
            })
            .into_options();
        assert_eq!(
            add.to_sql().unwrap(),
            "ALTER NETWORK POLICY \"P1\" ADD ALLOWED_NETWORK_RULE_LIST = (\"DB\".\"S\".\"R\")"
        );

        let remove = AlterNetworkPolicyRequest::new(id())
            .with_remove(NetworkRuleChange {
                blocked_network_rule_list: vec![rule("R")],
                ..Default::default()
            })
            .into_options();
        assert_eq!(
            remove.to_sql().unwrap(),
            "ALTER NETWORK POLICY \"P1\" REMOVE BLOCKED_NETWORK_RULE_LIST = (\"DB\".\"S\".\"R\")"
        );

        let rename = AlterNetworkPolicyRequest::new(id())
            .with_rename_to(AccountObjectIdentifier::new("P2"))
            .into_options();
        assert_eq!(
            rename.to_sql().unwrap(),
            "ALTER NETWORK POLICY \"P1\" RENAME TO \"P2\""
        );
    }

    #[test]
    fn test_alter_validation() {
        let none = AlterNetworkPolicyRequest::new(id()).into_options();
        assert!(matches!(
            none.validate().unwrap_err().errors(),
            [ValidationError::ExactlyOneOf { .. }]
        ));

        let empty_set = AlterNetworkPolicyRequest::new(id())
            .with_set(NetworkPolicySetRequest::new())
            .into_options();
        assert!(matches!(
            empty_set.validate().unwrap_err().errors(),
            [ValidationError::AtLeastOneOf { .. }]
        ));

        let both_rules = AlterNetworkPolicyRequest::new(id())
            .with_add(NetworkRuleChange {
                allowed_network_rule_list: vec![rule("A")],
                blocked_network_rule_list: vec![rule("B")],
            })
            .into_options();
        assert!(both_rules.validate().is_err());
    }

    #[test]
    fn test_drop_show_describe() {
        assert_eq!(
            DropNetworkPolicyRequest::new(id())
                .with_if_exists(true)
                .into_options()
                .to_sql()
                .unwrap(),
            "DROP NETWORK POLICY IF EXISTS \"P1\""
        );
        assert_eq!(
            ShowNetworkPolicyRequest::new().into_options().to_sql().unwrap(),
            "SHOW NETWORK POLICIES"
        );
        assert_eq!(
            ShowNetworkPolicyRequest::new()
                .with_like(Like::new("P%"))
                .into_options()
                .to_sql()
                .unwrap(),
            "SHOW NETWORK POLICIES LIKE 'P%'"
        );
        assert_eq!(
            DescribeNetworkPolicyOptions { name: id() }.to_sql().unwrap(),
            "DESCRIBE NETWORK POLICY \"P1\""
        );
    }

    #[test]
    fn test_show_with_empty_like_fails() {
        let opts = ShowNetworkPolicyRequest::new().with_like(Like::default()).into_options();
        assert!(opts
            .validate()
            .unwrap_err()
            .contains(&ValidationError::PatternRequiredForLike));
    }

    #[test]
    fn test_decode_show_row() {
        let row = json!({
            "created_on": "2024-01-01",
            "name": "P1",
            "comment": "",
            "entries_in_allowed_ip_list": 2,
            "entries_in_blocked_ip_list": "1",
            "entries_in_allowed_network_rules": "0",
            "entries_in_blocked_network_rules": ""
        });
        let row: NetworkPolicyRow = decode::from_row(row.as_object().unwrap()).unwrap();
        let policy = NetworkPolicy::try_from(row).unwrap();
        assert_eq!(policy.id(), id());
        assert_eq!(policy.entries_in_allowed_ip_list, 2);
        assert_eq!(policy.entries_in_blocked_ip_list, 1);
        assert_eq!(policy.entries_in_blocked_network_rules, 0);
        assert_eq!(policy.comment, None);
    }

    #[test]
    fn test_decode_describe_rows() {
        let rows: Vec<_> = [
            json!({ "name": "ALLOWED_IP_LIST", "value": "1.1.1.1,2.2.2.2" }),
            json!({ "name": "BLOCKED_IP_LIST", "value": "" }),
            json!({
                "name": "ALLOWED_NETWORK_RULE_LIST",
                "value": r#"[{"fullyQualifiedRuleName":"\"DB\".\"S\".\"R\""}]"#
            }),
        ]
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect();

        let details: NetworkPolicyDetails = decode::decode_properties(&rows).unwrap();
        assert_eq!(details.allowed_ip_list, vec!["1.1.1.1", "2.2.2.2"]);
        assert!(details.blocked_ip_list.is_empty());
        assert_eq!(details.allowed_network_rule_list, vec![rule("R")]);
    }
}
