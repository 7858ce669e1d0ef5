//! SHOW rows as a driver would hand them over, through to domain records.

use serde_json::{json, Value};
use snowflake_sdk::sdk::decode::{from_row, from_rows};
use snowflake_sdk::sdk::tasks::{Task, TaskRow, TaskState};
use snowflake_sdk::sdk::warehouses::{ScalingPolicy, Warehouse, WarehouseRow, WarehouseSize};
use snowflake_sdk::sdk::Row;
use snowflake_sdk::sql::SchemaObjectIdentifier;
use snowflake_sdk::Error;

fn row(value: Value) -> Row {
    value.as_object().cloned().unwrap()
}

fn warehouse(value: Value) -> snowflake_sdk::Result<Warehouse> {
    Warehouse::try_from(from_row::<WarehouseRow>(&row(value))?)
}

#[test]
fn test_warehouse_row_normalisation() {
    let wh = warehouse(json!({
        "name": "WH",
        "state": "SUSPENDED",
        "type": "STANDARD",
        "size": "X-Small",
        "min_cluster_count": 1,
        "max_cluster_count": "2",
        "started_clusters": "",
        "is_default": "N",
        "is_current": "Y",
        "auto_suspend": "null",
        "auto_resume": "true",
        "enable_query_acceleration": "false",
        "query_acceleration_max_scale_factor": "8",
        "resource_monitor": "null",
        "scaling_policy": "ECONOMY",
        "comment": ""
    }))
    .unwrap();

    assert_eq!(wh.size, WarehouseSize::XSmall);
    assert_eq!(wh.max_cluster_count, 2);
    assert_eq!(wh.started_clusters, 0);
    assert!(wh.is_current);
    assert!(!wh.is_default);
    assert_eq!(wh.auto_suspend, None);
    assert!(wh.auto_resume);
    assert_eq!(wh.resource_monitor, None);
    assert_eq!(wh.scaling_policy, Some(ScalingPolicy::Economy));
    assert_eq!(wh.comment, None);
}

#[test]
fn test_bad_column_value_names_the_column() {
    let err = warehouse(json!({
        "name": "WH",
        "type": "STANDARD",
        "size": "SMALL",
        "running": "many"
    }))
    .unwrap_err();

    match err {
        Error::InvalidColumnValue { column, value } => {
            assert_eq!(column, "running");
            assert_eq!(value, "many");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_task_rows() {
    let rows = vec![
        row(json!({
            "name": "ROOT",
            "database_name": "DB",
            "schema_name": "S",
            "state": "started",
            "predecessors": "[]",
            "allow_overlapping_execution": "false",
            "definition": "SELECT 1"
        })),
        row(json!({
            "name": "CHILD",
            "database_name": "DB",
            "schema_name": "S",
            "state": "suspended",
            "predecessors": "[\"\\\"DB\\\".\\\"S\\\".\\\"ROOT\\\"\"]",
            "allow_overlapping_execution": null,
            "condition": "null",
            "definition": "SELECT 2"
        })),
    ];

    let tasks: Vec<Task> = from_rows::<TaskRow>(&rows)
        .unwrap()
        .into_iter()
        .map(Task::try_from)
        .collect::<snowflake_sdk::Result<_>>()
        .unwrap();

    assert!(tasks[0].is_root());
    assert!(tasks[0].is_started());
    assert_eq!(tasks[1].state, TaskState::Suspended);
    assert_eq!(tasks[1].predecessors, vec![tasks[0].id()]);
    assert_eq!(tasks[1].predecessors[0], SchemaObjectIdentifier::new("DB", "S", "ROOT"));
    assert_eq!(tasks[1].condition, None);
    assert!(!tasks[1].allow_overlapping_execution);
}
