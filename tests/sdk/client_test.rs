//! `Client` pipeline against an in-memory executor.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use snowflake_sdk::config::Settings;
use snowflake_sdk::sdk::network_policies::CreateNetworkPolicyRequest;
use snowflake_sdk::sdk::roles::{CreateRoleRequest, DropRoleOptions};
use snowflake_sdk::sdk::{Client, ExecError, Row, SqlExecutor};
use snowflake_sdk::sql::AccountObjectIdentifier;
use snowflake_sdk::validation::ValidationError;
use snowflake_sdk::Error;

/// Records every statement and answers queries with canned rows.
#[derive(Default)]
struct Recording {
    statements: Mutex<Vec<String>>,
    rows: Vec<Row>,
    fail_with: Option<String>,
}

impl Recording {
    fn with_rows(rows: serde_json::Value) -> Self {
        Self {
            rows: rows
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_object().cloned().unwrap())
                .collect(),
            ..Default::default()
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    fn record(&self, sql: &str) -> Result<(), ExecError> {
        self.statements.lock().unwrap().push(sql.to_string());
        match &self.fail_with {
            Some(message) => Err(ExecError::Driver(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SqlExecutor for Recording {
    async fn exec(&self, sql: &str) -> Result<u64, ExecError> {
        self.record(sql)?;
        Ok(1)
    }

    async fn query(&self, sql: &str) -> Result<Vec<Row>, ExecError> {
        self.record(sql)?;
        Ok(self.rows.clone())
    }
}

fn id(name: &str) -> AccountObjectIdentifier {
    AccountObjectIdentifier::new(name)
}

#[tokio::test]
async fn test_exec_runs_rendered_sql() {
    let client = Client::new(Recording::default());
    client
        .network_policies()
        .create(CreateNetworkPolicyRequest::new(id("P1")).with_allowed_ip_list(["1.1.1.1"]))
        .await
        .unwrap();

    assert_eq!(
        client.executor().statements(),
        vec!["CREATE NETWORK POLICY \"P1\" ALLOWED_IP_LIST = ('1.1.1.1')"]
    );
}

#[tokio::test]
async fn test_terminate_statements_setting() {
    let settings = Settings::from_toml_str("[render]\nterminate_statements = true\n").unwrap();
    let client = Client::with_settings(Recording::default(), settings);
    client
        .network_policies()
        .drop(&id("P1"), true)
        .await
        .unwrap();

    assert_eq!(
        client.executor().statements(),
        vec!["DROP NETWORK POLICY IF EXISTS \"P1\";"]
    );
}

#[tokio::test]
async fn test_invalid_options_never_reach_executor() {
    let client = Client::new(Recording::default());
    let err = client
        .roles()
        .create(
            CreateRoleRequest::new(id(""))
                .with_or_replace(true)
                .with_if_not_exists(true),
        )
        .await
        .unwrap_err();

    match err {
        Error::Validation(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.contains(&ValidationError::InvalidObjectIdentifier { field: "name" }));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(client.executor().statements().is_empty());
}

#[tokio::test]
async fn test_exec_many_validates_everything_first() {
    let client = Client::new(Recording::default());
    let statements = vec![
        DropRoleOptions {
            if_exists: Some(true),
            name: id("A"),
        },
        DropRoleOptions {
            if_exists: None,
            name: id(""),
        },
    ];
    assert!(client.exec_many(&statements).await.is_err());
    assert!(client.executor().statements().is_empty());

    let statements = vec![
        DropRoleOptions {
            if_exists: Some(true),
            name: id("A"),
        },
        DropRoleOptions {
            if_exists: None,
            name: id("B"),
        },
    ];
    client.exec_many(&statements).await.unwrap();
    assert_eq!(
        client.executor().statements(),
        vec!["DROP ROLE IF EXISTS \"A\"", "DROP ROLE \"B\""]
    );
}

#[tokio::test]
async fn test_exec_many_stops_at_first_failure() {
    let client = Client::new(Recording::failing("role is in use"));
    let statements = vec![
        DropRoleOptions {
            if_exists: None,
            name: id("A"),
        },
        DropRoleOptions {
            if_exists: None,
            name: id("B"),
        },
    ];
    let err = client.exec_many(&statements).await.unwrap_err();
    assert!(matches!(err, Error::Execution(ExecError::Driver(_))));
    assert_eq!(client.executor().statements(), vec!["DROP ROLE \"A\""]);
}

#[tokio::test]
async fn test_exec_concurrent_runs_every_statement() {
    let client = Client::new(Recording::default());
    let statements = vec![
        DropRoleOptions {
            if_exists: None,
            name: id("A"),
        },
        DropRoleOptions {
            if_exists: None,
            name: id("B"),
        },
    ];
    client.exec_concurrent(&statements).await.unwrap();
    let mut executed = client.executor().statements();
    executed.sort();
    assert_eq!(executed, vec!["DROP ROLE \"A\"", "DROP ROLE \"B\""]);
}

#[tokio::test]
async fn test_show_by_id_decodes_match() {
    let executor = Recording::with_rows(json!([
        {
            "created_on": "2024-01-01",
            "name": "ANALYST_X",
            "is_default": "N",
            "is_current": "N",
            "is_inherited": "N",
            "assigned_to_users": 0,
            "granted_to_roles": 0,
            "granted_roles": 0,
            "owner": "SECURITYADMIN",
            "comment": ""
        },
        {
            "created_on": "2024-01-01",
            "name": "ANALYST",
            "is_default": "N",
            "is_current": "Y",
            "is_inherited": "N",
            "assigned_to_users": "3",
            "granted_to_roles": "1",
            "granted_roles": "0",
            "owner": "SECURITYADMIN",
            "comment": "reporting"
        }
    ]));
    let client = Client::new(executor);

    let role = client.roles().show_by_id(&id("ANALYST")).await.unwrap();
    assert!(role.is_current);
    assert_eq!(role.assigned_to_users, 3);
    assert_eq!(role.comment.as_deref(), Some("reporting"));
    assert_eq!(client.executor().statements(), vec!["SHOW ROLES LIKE 'ANALYST'"]);
}

#[tokio::test]
async fn test_show_by_id_not_found() {
    let client = Client::new(Recording::with_rows(json!([])));
    let err = client.roles().show_by_id(&id("GHOST")).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), Error::ObjectNotFound("\"GHOST\"".into()).to_string());
}

#[tokio::test]
async fn test_query_one_no_rows_is_not_found() {
    let client = Client::new(Recording::with_rows(json!([])));
    let err = client.warehouses().describe(&id("WH")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_driver_errors_are_forwarded() {
    let client = Client::new(Recording::failing("connection reset"));
    let err = client.roles().drop(&id("R"), true).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Execution(ExecError::Driver(ref message)) if message == "connection reset"
    ));
    assert!(!err.is_not_found());
}
