//! End-to-end statements: request in, SQL (or validation errors) out.

use insta::assert_snapshot;
use serde_json::json;
use snowflake_sdk::sdk::alerts::ShowAlertRequest;
use snowflake_sdk::sdk::common::{In, Like};
use snowflake_sdk::sdk::decode::decode_properties;
use snowflake_sdk::sdk::network_policies::CreateNetworkPolicyRequest;
use snowflake_sdk::sdk::password_policies::{
    CreatePasswordPolicyRequest, PasswordPolicyDetails, PasswordPolicyParameters,
};
use snowflake_sdk::sdk::session_policies::{
    AlterSessionPolicyRequest, SessionPolicySet, SessionPolicyUnset,
};
use snowflake_sdk::sdk::tasks::CloneTaskRequest;
use snowflake_sdk::sdk::Row;
use snowflake_sdk::sql::{
    render, AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier, ToSql,
};
use snowflake_sdk::validation::{Validate, ValidationError};

fn rows(values: serde_json::Value) -> Vec<Row> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

#[test]
fn test_create_network_policy_with_lists_and_comment() {
    let opts = CreateNetworkPolicyRequest::new(AccountObjectIdentifier::new("P1"))
        .with_allowed_ip_list(["1.1.1.1", "2.2.2.2"])
        .with_blocked_ip_list(["9.9.9.9"])
        .with_comment("test")
        .into_options();

    assert!(opts.validate().is_ok());
    assert_snapshot!(
        render(Some(&opts)).unwrap(),
        @r#"CREATE NETWORK POLICY "P1" ALLOWED_IP_LIST = ('1.1.1.1', '2.2.2.2') BLOCKED_IP_LIST = ('9.9.9.9') COMMENT = 'test'"#
    );
}

#[test]
fn test_alter_session_policy_exactly_one_violation() {
    let opts = AlterSessionPolicyRequest::new(SchemaObjectIdentifier::new("DB", "S", "SP"))
        .with_set(SessionPolicySet {
            comment: Some("x".into()),
            ..Default::default()
        })
        .with_unset(SessionPolicyUnset {
            comment: true,
            ..Default::default()
        })
        .into_options();

    let err = opts.validate().unwrap_err();
    assert_eq!(
        err.errors(),
        [ValidationError::ExactlyOneOf {
            structure: "AlterSessionPolicyOptions",
            fields: vec!["RenameTo", "Set", "SetTags", "UnsetTags", "Unset"],
        }]
    );
    assert!(err.to_string().contains("exactly one of"));
}

#[test]
fn test_show_alerts_in_schema_with_like() {
    let opts = ShowAlertRequest::new()
        .with_like(Like::new("A%"))
        .with_in(In::schema(DatabaseObjectIdentifier::new("DB", "S")))
        .into_options();

    assert!(opts.validate().is_ok());
    assert_snapshot!(opts.to_sql().unwrap(), @r#"SHOW ALERTS LIKE 'A%' IN SCHEMA "DB"."S""#);
}

#[test]
fn test_clone_task() {
    let opts = CloneTaskRequest::new(
        SchemaObjectIdentifier::new("DB", "S", "T2"),
        SchemaObjectIdentifier::new("DB", "S", "T1"),
    )
    .with_or_replace(true)
    .with_copy_grants(true)
    .into_options();

    assert!(opts.validate().is_ok());
    assert_snapshot!(
        opts.to_sql().unwrap(),
        @r#"CREATE OR REPLACE TASK "DB"."S"."T2" CLONE "DB"."S"."T1" COPY GRANTS"#
    );
}

#[test]
fn test_create_password_policy_range_violation() {
    let opts = CreatePasswordPolicyRequest::new(SchemaObjectIdentifier::new("DB", "S", "PP"))
        .with_parameters(PasswordPolicyParameters::new().with_min_length(-1))
        .into_options();

    let err = opts.validate().unwrap_err();
    assert_eq!(
        err.errors(),
        [ValidationError::OutOfRange {
            field: "PasswordMinLength",
            min: 8,
            max: 256,
        }]
    );
}

#[test]
fn test_describe_empty_password_policy() {
    let rows = rows(json!([
        { "PROPERTY": "PASSWORD_MIN_LENGTH", "VALUE": "8" },
        { "PROPERTY": "COMMENT", "VALUE": "null" },
    ]));

    let details: PasswordPolicyDetails = decode_properties(&rows).unwrap();
    assert_eq!(details.min_length, Some(8));
    assert_eq!(details.comment, None);
    assert_eq!(details.max_length, None);
}

#[test]
fn test_render_is_pure() {
    let opts = CreateNetworkPolicyRequest::new(AccountObjectIdentifier::new("P1"))
        .with_allowed_ip_list(["1.1.1.1"])
        .into_options();
    assert_eq!(opts.to_sql().unwrap(), opts.clone().to_sql().unwrap());
}
