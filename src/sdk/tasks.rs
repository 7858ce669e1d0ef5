//! Tasks.
//!
//! A task runs either on a named warehouse or serverless with a managed
//! initial size; it is triggered either by a `SCHEDULE` or by finishing
//! predecessors (`AFTER`), never both.

use serde::Deserialize;

use super::common::{self, In, Like, LimitFrom, ObjectType, Schedule, TagAssociation};
use super::decode::{self, lenient};
use super::warehouses::WarehouseSize;
use super::{facade, find_by_name};
use crate::error::{Error, Result};
use crate::sql::{
    sql_enum, AccountObjectIdentifier, ListStyle, ObjectIdentifier, ParamStyle,
    SchemaObjectIdentifier, SqlBuilder, ToSql,
};
use crate::validation::{Flag, Presence, Validate, Validator};

const RETRY_ATTEMPTS_MAX: i64 = 30;

sql_enum! {
    pub enum TaskState {
        Started => "STARTED",
        Suspended => "SUSPENDED",
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateTaskOptions {
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub warehouse: Option<AccountObjectIdentifier>,
    pub user_task_managed_initial_warehouse_size: Option<WarehouseSize>,
    pub schedule: Option<Schedule>,
    pub allow_overlapping_execution: Option<bool>,
    pub user_task_timeout_ms: Option<i32>,
    pub suspend_task_after_num_failures: Option<i32>,
    pub task_auto_retry_attempts: Option<i32>,
    pub error_integration: Option<AccountObjectIdentifier>,
    pub comment: Option<String>,
    pub finalize: Option<SchemaObjectIdentifier>,
    pub tags: Vec<TagAssociation>,
    pub after: Vec<SchemaObjectIdentifier>,
    pub when: Option<String>,
    pub sql: String,
}

impl ToSql for CreateTaskOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .sql("TASK")
            .keyword(self.if_not_exists, "IF NOT EXISTS")
            .identifier(&self.name)
            .parameter("WAREHOUSE", self.warehouse.as_ref(), ParamStyle::new())
            .parameter(
                "USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE",
                self.user_task_managed_initial_warehouse_size.as_ref(),
                ParamStyle::single_quoted(),
            )
            .parameter("SCHEDULE", self.schedule.as_ref(), ParamStyle::single_quoted())
            .parameter(
                "ALLOW_OVERLAPPING_EXECUTION",
                self.allow_overlapping_execution.as_ref(),
                ParamStyle::new(),
            )
            .parameter("USER_TASK_TIMEOUT_MS", self.user_task_timeout_ms.as_ref(), ParamStyle::new())
            .parameter(
                "SUSPEND_TASK_AFTER_NUM_FAILURES",
                self.suspend_task_after_num_failures.as_ref(),
                ParamStyle::new(),
            )
            .parameter(
                "TASK_AUTO_RETRY_ATTEMPTS",
                self.task_auto_retry_attempts.as_ref(),
                ParamStyle::new(),
            )
            .parameter("ERROR_INTEGRATION", self.error_integration.as_ref(), ParamStyle::new())
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted())
            .parameter("FINALIZE", self.finalize.as_ref(), ParamStyle::new());
        common::with_tags(b, &self.tags);
        b.list(Some("AFTER"), &self.after, ListStyle::new());
        if let Some(when) = &self.when {
            b.sql("WHEN").raw(when);
        }
        b.sql("AS").raw(&self.sql);
    }
}

impl Validate for CreateTaskOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .opt_identifier("Warehouse", self.warehouse.as_ref())
            .opt_identifier("ErrorIntegration", self.error_integration.as_ref())
            .opt_identifier("Finalize", self.finalize.as_ref())
            .identifiers("After", &self.after)
            .conflicting(
                "CreateTaskOptions",
                &[
                    ("OrReplace", self.or_replace.is_true()),
                    ("IfNotExists", self.if_not_exists.is_true()),
                ],
            )
            .conflicting(
                "CreateTaskOptions",
                &[
                    ("Warehouse", self.warehouse.is_set()),
                    (
                        "UserTaskManagedInitialWarehouseSize",
                        self.user_task_managed_initial_warehouse_size.is_set(),
                    ),
                ],
            )
            .conflicting(
                "CreateTaskOptions",
                &[("Schedule", self.schedule.is_set()), ("After", self.after.is_set())],
            )
            .range(
                "TaskAutoRetryAttempts",
                self.task_auto_retry_attempts,
                0,
                RETRY_ATTEMPTS_MAX,
            )
            .opt_non_blank("When", self.when.as_deref())
            .non_blank("Sql", &self.sql);
        common::validate_tags(v, &self.tags, &[]);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CloneTaskOptions {
    pub or_replace: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub source_task: SchemaObjectIdentifier,
    pub copy_grants: Option<bool>,
}

impl ToSql for CloneTaskOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .sql("TASK")
            .identifier(&self.name)
            .prefixed_identifier("CLONE", Some(&self.source_task))
            .keyword(self.copy_grants, "COPY GRANTS");
    }
}

impl Validate for CloneTaskOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .identifier("SourceTask", &self.source_task);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskSet {
    pub warehouse: Option<AccountObjectIdentifier>,
    pub user_task_managed_initial_warehouse_size: Option<WarehouseSize>,
    pub schedule: Option<Schedule>,
    pub allow_overlapping_execution: Option<bool>,
    pub user_task_timeout_ms: Option<i32>,
    pub suspend_task_after_num_failures: Option<i32>,
    pub task_auto_retry_attempts: Option<i32>,
    pub error_integration: Option<AccountObjectIdentifier>,
    pub comment: Option<String>,
}

impl ToSql for TaskSet {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.parameter("WAREHOUSE", self.warehouse.as_ref(), ParamStyle::new())
            .parameter(
                "USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE",
                self.user_task_managed_initial_warehouse_size.as_ref(),
                ParamStyle::single_quoted(),
            )
            .parameter("SCHEDULE", self.schedule.as_ref(), ParamStyle::single_quoted())
            .parameter(
                "ALLOW_OVERLAPPING_EXECUTION",
                self.allow_overlapping_execution.as_ref(),
                ParamStyle::new(),
            )
            .parameter("USER_TASK_TIMEOUT_MS", self.user_task_timeout_ms.as_ref(), ParamStyle::new())
            .parameter(
                "SUSPEND_TASK_AFTER_NUM_FAILURES",
                self.suspend_task_after_num_failures.as_ref(),
                ParamStyle::new(),
            )
            .parameter(
                "TASK_AUTO_RETRY_ATTEMPTS",
                self.task_auto_retry_attempts.as_ref(),
                ParamStyle::new(),
            )
            .parameter("ERROR_INTEGRATION", self.error_integration.as_ref(), ParamStyle::new())
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted());
    }
}

impl Validate for TaskSet {
    fn validate_into(&self, v: &mut Validator) {
        v.at_least_one(
            "TaskSet",
            &[
                ("Warehouse", self.warehouse.is_set()),
                (
                    "UserTaskManagedInitialWarehouseSize",
                    self.user_task_managed_initial_warehouse_size.is_set(),
                ),
                ("Schedule", self.schedule.is_set()),
                ("AllowOverlappingExecution", self.allow_overlapping_execution.is_set()),
                ("UserTaskTimeoutMs", self.user_task_timeout_ms.is_set()),
                ("SuspendTaskAfterNumFailures", self.suspend_task_after_num_failures.is_set()),
                ("TaskAutoRetryAttempts", self.task_auto_retry_attempts.is_set()),
                ("ErrorIntegration", self.error_integration.is_set()),
                ("Comment", self.comment.is_set()),
            ],
        )
        .conflicting(
            "TaskSet",
            &[
                ("Warehouse", self.warehouse.is_set()),
                (
                    "UserTaskManagedInitialWarehouseSize",
                    self.user_task_managed_initial_warehouse_size.is_set(),
                ),
            ],
        )
        .opt_identifier("Warehouse", self.warehouse.as_ref())
        .opt_identifier("ErrorIntegration", self.error_integration.as_ref())
        .range(
            "TaskAutoRetryAttempts",
            self.task_auto_retry_attempts,
            0,
            RETRY_ATTEMPTS_MAX,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskUnset {
    pub warehouse: bool,
    pub schedule: bool,
    pub allow_overlapping_execution: bool,
    pub user_task_timeout_ms: bool,
    pub suspend_task_after_num_failures: bool,
    pub task_auto_retry_attempts: bool,
    pub error_integration: bool,
    pub comment: bool,
}

impl TaskUnset {
    fn flags(&self) -> [(bool, &'static str); 8] {
        [
            (self.warehouse, "WAREHOUSE"),
            (self.schedule, "SCHEDULE"),
            (self.allow_overlapping_execution, "ALLOW_OVERLAPPING_EXECUTION"),
            (self.user_task_timeout_ms, "USER_TASK_TIMEOUT_MS"),
            (self.suspend_task_after_num_failures, "SUSPEND_TASK_AFTER_NUM_FAILURES"),
            (self.task_auto_retry_attempts, "TASK_AUTO_RETRY_ATTEMPTS"),
            (self.error_integration, "ERROR_INTEGRATION"),
            (self.comment, "COMMENT"),
        ]
    }
}

impl ToSql for TaskUnset {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.keywords(&self.flags());
    }
}

impl Validate for TaskUnset {
    fn validate_into(&self, v: &mut Validator) {
        let fields: Vec<(&'static str, bool)> =
            self.flags().iter().map(|(set, key)| (*key, *set)).collect();
        v.at_least_one("TaskUnset", &fields);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterTaskOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
    pub resume: Option<bool>,
    pub suspend: Option<bool>,
    pub remove_after: Vec<SchemaObjectIdentifier>,
    pub add_after: Vec<SchemaObjectIdentifier>,
    pub set: Option<TaskSet>,
    pub unset: Option<TaskUnset>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
    pub modify_as: Option<String>,
    pub modify_when: Option<String>,
}

impl ToSql for AlterTaskOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("ALTER TASK")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name)
            .keyword(self.resume, "RESUME")
            .keyword(self.suspend, "SUSPEND")
            .list(Some("REMOVE AFTER"), &self.remove_after, ListStyle::new())
            .list(Some("ADD AFTER"), &self.add_after, ListStyle::new())
            .nested(Some("SET"), self.set.as_ref())
            .nested(Some("UNSET"), self.unset.as_ref());
        common::set_tags(b, &self.set_tags);
        common::unset_tags(b, &self.unset_tags);
        if let Some(sql) = &self.modify_as {
            b.sql("MODIFY AS").raw(sql);
        }
        if let Some(when) = &self.modify_when {
            b.sql("MODIFY WHEN").raw(when);
        }
    }
}

impl Validate for AlterTaskOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name)
            .exactly_one(
                "AlterTaskOptions",
                &[
                    ("Resume", self.resume.is_true()),
                    ("Suspend", self.suspend.is_true()),
                    ("RemoveAfter", self.remove_after.is_set()),
                    ("AddAfter", self.add_after.is_set()),
                    ("Set", self.set.is_set()),
                    ("Unset", self.unset.is_set()),
                    ("SetTags", self.set_tags.is_set()),
                    ("UnsetTags", self.unset_tags.is_set()),
                    ("ModifyAs", self.modify_as.is_set()),
                    ("ModifyWhen", self.modify_when.is_set()),
                ],
            )
            .identifiers("RemoveAfter", &self.remove_after)
            .identifiers("AddAfter", &self.add_after)
            .opt_non_blank("ModifyAs", self.modify_as.as_deref())
            .opt_non_blank("ModifyWhen", self.modify_when.as_deref())
            .nested(self.set.as_ref())
            .nested(self.unset.as_ref());
        common::validate_tags(v, &self.set_tags, &self.unset_tags);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropTaskOptions {
    pub if_exists: Option<bool>,
    pub name: SchemaObjectIdentifier,
}

impl ToSql for DropTaskOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DROP TASK")
            .keyword(self.if_exists, "IF EXISTS")
            .identifier(&self.name);
    }
}

impl Validate for DropTaskOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShowTaskOptions {
    pub terse: Option<bool>,
    pub like: Option<Like>,
    pub in_: Option<In>,
    pub starts_with: Option<String>,
    pub root_only: Option<bool>,
    pub limit: Option<LimitFrom>,
}

impl ToSql for ShowTaskOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("SHOW")
            .keyword(self.terse, "TERSE")
            .sql("TASKS")
            .nested(None, self.like.as_ref())
            .nested(None, self.in_.as_ref())
            .parameter(
                "STARTS WITH",
                self.starts_with.as_ref(),
                ParamStyle::single_quoted().no_equals(),
            )
            .keyword(self.root_only, "ROOT ONLY")
            .nested(None, self.limit.as_ref());
    }
}

impl Validate for ShowTaskOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.nested(self.like.as_ref())
            .nested(self.in_.as_ref())
            .nested(self.limit.as_ref());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribeTaskOptions {
    pub name: SchemaObjectIdentifier,
}

impl ToSql for DescribeTaskOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("DESCRIBE TASK").identifier(&self.name);
    }
}

impl Validate for DescribeTaskOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecuteTaskOptions {
    pub name: SchemaObjectIdentifier,
    pub retry_last: Option<bool>,
}

impl ToSql for ExecuteTaskOptions {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("EXECUTE TASK")
            .identifier(&self.name)
            .keyword(self.retry_last, "RETRY LAST");
    }
}

impl Validate for ExecuteTaskOptions {
    fn validate_into(&self, v: &mut Validator) {
        v.identifier("name", &self.name);
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct CreateTaskRequest {
    pub name: SchemaObjectIdentifier,
    pub sql: String,
    pub or_replace: Option<bool>,
    pub if_not_exists: Option<bool>,
    pub warehouse: Option<AccountObjectIdentifier>,
    pub user_task_managed_initial_warehouse_size: Option<WarehouseSize>,
    pub schedule: Option<Schedule>,
    pub allow_overlapping_execution: Option<bool>,
    pub user_task_timeout_ms: Option<i32>,
    pub suspend_task_after_num_failures: Option<i32>,
    pub task_auto_retry_attempts: Option<i32>,
    pub error_integration: Option<AccountObjectIdentifier>,
    pub comment: Option<String>,
    pub finalize: Option<SchemaObjectIdentifier>,
    pub tags: Vec<TagAssociation>,
    pub after: Vec<SchemaObjectIdentifier>,
    pub when: Option<String>,
}

impl CreateTaskRequest {
    pub fn new(name: SchemaObjectIdentifier, sql: impl Into<String>) -> Self {
        Self {
            name,
            sql: sql.into(),
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

    pub fn with_warehouse(mut self, warehouse: AccountObjectIdentifier) -> Self {
        self.warehouse = Some(warehouse);
        self
    }

    pub fn with_user_task_managed_initial_warehouse_size(mut self, size: WarehouseSize) -> Self {
        self.user_task_managed_initial_warehouse_size = Some(size);
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn with_allow_overlapping_execution(mut self, allow: bool) -> Self {
        self.allow_overlapping_execution = Some(allow);
        self
    }

    pub fn with_user_task_timeout_ms(mut self, ms: i32) -> Self {
        self.user_task_timeout_ms = Some(ms);
        self
    }

    pub fn with_suspend_task_after_num_failures(mut self, n: i32) -> Self {
        self.suspend_task_after_num_failures = Some(n);
        self
    }

    pub fn with_task_auto_retry_attempts(mut self, n: i32) -> Self {
        self.task_auto_retry_attempts = Some(n);
        self
    }

    pub fn with_error_integration(mut self, integration: AccountObjectIdentifier) -> Self {
        self.error_integration = Some(integration);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_finalize(mut self, root_task: SchemaObjectIdentifier) -> Self {
        self.finalize = Some(root_task);
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagAssociation>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_after(mut self, predecessors: Vec<SchemaObjectIdentifier>) -> Self {
        self.after = predecessors;
        self
    }

    pub fn with_when(mut self, condition: impl Into<String>) -> Self {
        self.when = Some(condition.into());
        self
    }

    pub fn into_options(self) -> CreateTaskOptions {
        CreateTaskOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name,
            warehouse: self.warehouse,
            user_task_managed_initial_warehouse_size: self.user_task_managed_initial_warehouse_size,
            schedule: self.schedule,
            allow_overlapping_execution: self.allow_overlapping_execution,
            user_task_timeout_ms: self.user_task_timeout_ms,
            suspend_task_after_num_failures: self.suspend_task_after_num_failures,
            task_auto_retry_attempts: self.task_auto_retry_attempts,
            error_integration: self.error_integration,
            comment: self.comment,
            finalize: self.finalize,
            tags: self.tags,
            after: self.after,
            when: self.when,
            sql: self.sql,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct CloneTaskRequest {
    pub name: SchemaObjectIdentifier,
    pub source_task: SchemaObjectIdentifier,
    pub or_replace: Option<bool>,
    pub copy_grants: Option<bool>,
}

impl CloneTaskRequest {
    pub fn new(name: SchemaObjectIdentifier, source_task: SchemaObjectIdentifier) -> Self {
        Self {
            name,
            source_task,
            ..Default::default()
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = Some(or_replace);
        self
    }

    pub fn with_copy_grants(mut self, copy_grants: bool) -> Self {
        self.copy_grants = Some(copy_grants);
        self
    }

    pub fn into_options(self) -> CloneTaskOptions {
        CloneTaskOptions {
            or_replace: self.or_replace,
            name: self.name,
            source_task: self.source_task,
            copy_grants: self.copy_grants,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct AlterTaskRequest {
    pub name: SchemaObjectIdentifier,
    pub if_exists: Option<bool>,
    pub resume: Option<bool>,
    pub suspend: Option<bool>,
    pub remove_after: Vec<SchemaObjectIdentifier>,
    pub add_after: Vec<SchemaObjectIdentifier>,
    pub set: Option<TaskSet>,
    pub unset: Option<TaskUnset>,
    pub set_tags: Vec<TagAssociation>,
    pub unset_tags: Vec<SchemaObjectIdentifier>,
    pub modify_as: Option<String>,
    pub modify_when: Option<String>,
}

impl AlterTaskRequest {
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

    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = Some(resume);
        self
    }

    pub fn with_suspend(mut self, suspend: bool) -> Self {
        self.suspend = Some(suspend);
        self
    }

    pub fn with_remove_after(mut self, predecessors: Vec<SchemaObjectIdentifier>) -> Self {
        self.remove_after = predecessors;
        self
    }

    pub fn with_add_after(mut self, predecessors: Vec<SchemaObjectIdentifier>) -> Self {
        self.add_after = predecessors;
        self
    }

    pub fn with_set(mut self, set: TaskSet) -> Self {
        self.set = Some(set);
        self
    }

    pub fn with_unset(mut self, unset: TaskUnset) -> Self {
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

    pub fn with_modify_as(mut self, sql: impl Into<String>) -> Self {
        self.modify_as = Some(sql.into());
        self
    }

    pub fn with_modify_when(mut self, condition: impl Into<String>) -> Self {
        self.modify_when = Some(condition.into());
        self
    }

    pub fn into_options(self) -> AlterTaskOptions {
        AlterTaskOptions {
            if_exists: self.if_exists,
            name: self.name,
            resume: self.resume,
            suspend: self.suspend,
            remove_after: self.remove_after,
            add_after: self.add_after,
            set: self.set,
            unset: self.unset,
            set_tags: self.set_tags,
            unset_tags: self.unset_tags,
            modify_as: self.modify_as,
            modify_when: self.modify_when,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct ShowTaskRequest {
    pub terse: Option<bool>,
    pub like: Option<Like>,
    pub in_: Option<In>,
    pub starts_with: Option<String>,
    pub root_only: Option<bool>,
    pub limit: Option<LimitFrom>,
}

impl ShowTaskRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_terse(mut self, terse: bool) -> Self {
        self.terse = Some(terse);
        self
    }

    pub fn with_like(mut self, like: Like) -> Self {
        self.like = Some(like);
        self
    }

    pub fn with_in(mut self, in_: In) -> Self {
        self.in_ = Some(in_);
        self
    }

    pub fn with_starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.starts_with = Some(prefix.into());
        self
    }

    pub fn with_root_only(mut self, root_only: bool) -> Self {
        self.root_only = Some(root_only);
        self
    }

    pub fn with_limit(mut self, limit: LimitFrom) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn into_options(self) -> ShowTaskOptions {
        ShowTaskOptions {
            terse: self.terse,
            like: self.like,
            in_: self.in_,
            starts_with: self.starts_with,
            root_only: self.root_only,
            limit: self.limit,
        }
    }
}

// ============================================================================
// Rows and records
// ============================================================================

/// Row of `SHOW TASKS` and `DESCRIBE TASK`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TaskRow {
    #[serde(deserialize_with = "lenient::string")]
    pub created_on: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub database_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub schema_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub owner: String,
    #[serde(deserialize_with = "lenient::string")]
    pub comment: String,
    #[serde(deserialize_with = "lenient::string")]
    pub warehouse: String,
    #[serde(deserialize_with = "lenient::string")]
    pub schedule: String,
    #[serde(deserialize_with = "lenient::string")]
    pub predecessors: String,
    #[serde(deserialize_with = "lenient::string")]
    pub state: String,
    #[serde(deserialize_with = "lenient::string")]
    pub definition: String,
    #[serde(deserialize_with = "lenient::string")]
    pub condition: String,
    #[serde(deserialize_with = "lenient::string")]
    pub allow_overlapping_execution: String,
    #[serde(deserialize_with = "lenient::string")]
    pub error_integration: String,
    #[serde(deserialize_with = "lenient::string")]
    pub owner_role_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub created_on: String,
    pub name: String,
    pub id: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: String,
    pub comment: Option<String>,
    pub warehouse: Option<String>,
    pub schedule: Option<String>,
    pub predecessors: Vec<SchemaObjectIdentifier>,
    pub state: TaskState,
    pub definition: String,
    pub condition: Option<String>,
    pub allow_overlapping_execution: bool,
    pub error_integration: Option<String>,
    pub owner_role_type: String,
}

impl Task {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }

    pub fn object_type(&self) -> ObjectType {
        ObjectType::Task
    }

    /// A root task has no predecessors.
    pub fn is_root(&self) -> bool {
        self.predecessors.is_empty()
    }

    pub fn is_started(&self) -> bool {
        self.state == TaskState::Started
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = Error;

    fn try_from(row: TaskRow) -> Result<Self> {
        Ok(Self {
            predecessors: decode::parse_json_identifiers(&row.predecessors)?,
            state: decode::parse_enum("state", &row.state)?,
            allow_overlapping_execution: decode::parse_bool(
                "allow_overlapping_execution",
                &row.allow_overlapping_execution,
            )?,
            comment: decode::non_empty(&row.comment),
            warehouse: decode::non_empty(&row.warehouse),
            schedule: decode::non_empty(&row.schedule),
            condition: decode::non_empty(&row.condition),
            error_integration: decode::non_empty(&row.error_integration),
            created_on: row.created_on,
            name: row.name,
            id: row.id,
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: row.owner,
            definition: row.definition,
            owner_role_type: row.owner_role_type,
        })
    }
}

// ============================================================================
// Client
// ============================================================================

facade!(
    /// Task operations.
    Tasks
);

impl<E: super::SqlExecutor> Tasks<'_, E> {
    pub async fn create(&self, request: CreateTaskRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn clone_task(&self, request: CloneTaskRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn alter(&self, request: AlterTaskRequest) -> Result<()> {
        self.client.exec(&request.into_options()).await
    }

    pub async fn drop(&self, id: &SchemaObjectIdentifier, if_exists: bool) -> Result<()> {
        let opts = DropTaskOptions {
            if_exists: Some(if_exists),
            name: id.clone(),
        };
        self.client.exec(&opts).await
    }

    pub async fn show(&self, request: ShowTaskRequest) -> Result<Vec<Task>> {
        let rows = self.client.query(&request.into_options()).await?;
        decode::from_rows::<TaskRow>(&rows)?
            .into_iter()
            .map(Task::try_from)
            .collect()
    }

    pub async fn show_by_id(&self, id: &SchemaObjectIdentifier) -> Result<Task> {
        let request = ShowTaskRequest::new()
            .with_like(Like::new(id.name()))
            .with_in(In::schema(id.schema_id()));
        let tasks = self.show(request).await?;
        find_by_name(tasks, id.name(), id.fully_qualified_name(), |t| t.name.as_str())
    }

    pub async fn describe(&self, id: &SchemaObjectIdentifier) -> Result<Task> {
        let opts = DescribeTaskOptions { name: id.clone() };
        let row = self.client.query_one(&opts, &id.fully_qualified_name()).await?;
        decode::from_row::<TaskRow>(&row)?.try_into()
    }

    pub async fn execute(&self, id: &SchemaObjectIdentifier, retry_last: bool) -> Result<()> {
        let opts = ExecuteTaskOptions {
            name: id.clone(),
            retry_last: Some(retry_last),
        };
        self.client.exec(&opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use insta::assert_snapshot;
    use serde_json::json;

    fn task(name: &str) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new("DB", "S", name)
    }

    #[test]
    fn test_create_scheduled() {
        let opts = CreateTaskRequest::new(task("T1"), "INSERT INTO t SELECT 1")
            .with_warehouse(AccountObjectIdentifier::new("WH"))
            .with_schedule(Schedule::Minutes(10))
            .with_allow_overlapping_execution(false)
            .with_task_auto_retry_attempts(3)
            .with_comment("nightly")
            .with_tags(vec![TagAssociation::new(task("TAG"), "etl")])
            .into_options();
        assert!(opts.validate().is_ok());
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @r#"CREATE TASK "DB"."S"."T1" WAREHOUSE = "WH" SCHEDULE = '10 MINUTE' ALLOW_OVERLAPPING_EXECUTION = false TASK_AUTO_RETRY_ATTEMPTS = 3 COMMENT = 'nightly' WITH TAG ("DB"."S"."TAG" = 'etl') AS INSERT INTO t SELECT 1"#
        );
    }

    #[test]
    fn test_create_serverless_child() {
        let opts = CreateTaskRequest::new(task("T2"), "SELECT 1")
            .with_or_replace(true)
            .with_user_task_managed_initial_warehouse_size(WarehouseSize::XSmall)
            .with_after(vec![task("T1"), task("T0")])
            .with_when("SYSTEM$STREAM_HAS_DATA('S1')")
            .into_options();
        assert!(opts.validate().is_ok());
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @r#"CREATE OR REPLACE TASK "DB"."S"."T2" USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE = 'XSMALL' AFTER "DB"."S"."T1", "DB"."S"."T0" WHEN SYSTEM$STREAM_HAS_DATA('S1') AS SELECT 1"#
        );
    }

    #[test]
    fn test_create_validation() {
        let opts = CreateTaskRequest::new(task("T"), "SELECT 1")
            .with_warehouse(AccountObjectIdentifier::new("WH"))
            .with_user_task_managed_initial_warehouse_size(WarehouseSize::Small)
            .with_schedule(Schedule::Minutes(1))
            .with_after(vec![task("P")])
            .with_task_auto_retry_attempts(31)
            .into_options();
        let err = opts.validate().unwrap_err();
        assert_eq!(err.len(), 3);
        assert!(err.contains(&ValidationError::ConflictingFields {
            structure: "CreateTaskOptions",
            fields: vec!["Schedule", "After"],
        }));
        assert!(err.contains(&ValidationError::OutOfRange {
            field: "TaskAutoRetryAttempts",
            min: 0,
            max: 30,
        }));
    }

    #[test]
    fn test_create_rejects_blank_when() {
        let opts = CreateTaskRequest::new(task("T"), "SELECT 1")
            .with_when("")
            .into_options();
        assert_eq!(
            opts.validate().unwrap_err().errors(),
            &[ValidationError::InvalidValue {
                field: "When",
                value: String::new(),
            }]
        );
    }

    #[test]
    fn test_clone() {
        let opts = CloneTaskRequest::new(task("T2"), task("T1"))
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
    fn test_alter_variants() {
        let resume = AlterTaskRequest::new(task("T")).with_resume(true).into_options();
        assert_eq!(resume.to_sql().unwrap(), "ALTER TASK \"DB\".\"S\".\"T\" RESUME");

        let add = AlterTaskRequest::new(task("T"))
            .with_add_after(vec![task("A"), task("B")])
            .into_options();
        assert_eq!(
            add.to_sql().unwrap(),
            "ALTER TASK \"DB\".\"S\".\"T\" ADD AFTER \"DB\".\"S\".\"A\", \"DB\".\"S\".\"B\""
        );

        let set = AlterTaskRequest::new(task("T"))
            .with_set(TaskSet {
                schedule: Some(Schedule::Cron("0 0 * * * UTC".into())),
                user_task_timeout_ms: Some(1000),
                ..Default::default()
            })
            .into_options();
        assert_eq!(
            set.to_sql().unwrap(),
            "ALTER TASK \"DB\".\"S\".\"T\" SET SCHEDULE = 'USING CRON 0 0 * * * UTC' USER_TASK_TIMEOUT_MS = 1000"
        );

        let unset = AlterTaskRequest::new(task("T"))
            .with_unset(TaskUnset {
                warehouse: true,
                comment: true,
                ..Default::default()
            })
            .into_options();
        assert_eq!(
            unset.to_sql().unwrap(),
            "ALTER TASK \"DB\".\"S\".\"T\" UNSET WAREHOUSE, COMMENT"
        );

        let modify = AlterTaskRequest::new(task("T"))
            .with_if_exists(true)
            .with_modify_as("SELECT 2")
            .into_options();
        assert_eq!(
            modify.to_sql().unwrap(),
            "ALTER TASK IF EXISTS \"DB\".\"S\".\"T\" MODIFY AS SELECT 2"
        );
    }

    #[test]
    fn test_alter_exactly_one() {
        let none = AlterTaskRequest::new(task("T")).into_options();
        assert!(none.validate().is_err());

        let explicit_false = AlterTaskRequest::new(task("T"))
            .with_resume(false)
            .with_suspend(true)
            .into_options();
        assert!(explicit_false.validate().is_ok());

        let two = AlterTaskRequest::new(task("T"))
            .with_resume(true)
            .with_modify_when("TRUE")
            .into_options();
        assert!(matches!(
            two.validate().unwrap_err().errors(),
            [ValidationError::ExactlyOneOf { structure: "AlterTaskOptions", .. }]
        ));
    }

    #[test]
    fn test_alter_rejects_blank_modify_text() {
        let modify_as = AlterTaskRequest::new(task("T")).with_modify_as("  ").into_options();
        assert_eq!(
            modify_as.validate().unwrap_err().errors(),
            &[ValidationError::InvalidValue {
                field: "ModifyAs",
                value: "  ".into(),
            }]
        );

        let modify_when = AlterTaskRequest::new(task("T")).with_modify_when("").into_options();
        assert_eq!(
            modify_when.validate().unwrap_err().errors(),
            &[ValidationError::InvalidValue {
                field: "ModifyWhen",
                value: String::new(),
            }]
        );
    }

    #[test]
    fn test_show_and_execute() {
        let show = ShowTaskRequest::new()
            .with_terse(true)
            .with_like(Like::new("T%"))
            .with_in(In::schema(task("X").schema_id()))
            .with_starts_with("T")
            .with_root_only(true)
            .with_limit(LimitFrom::new(5))
            .into_options();
        assert_eq!(
            show.to_sql().unwrap(),
            "SHOW TERSE TASKS LIKE 'T%' IN SCHEMA \"DB\".\"S\" STARTS WITH 'T' ROOT ONLY LIMIT 5"
        );

        let execute = ExecuteTaskOptions {
            name: task("T"),
            retry_last: Some(true),
        };
        assert_eq!(
            execute.to_sql().unwrap(),
            "EXECUTE TASK \"DB\".\"S\".\"T\" RETRY LAST"
        );
    }

    #[test]
    fn test_decode_row() {
        let row = json!({
            "created_on": "2024-01-01",
            "name": "T2",
            "id": "01b2",
            "database_name": "DB",
            "schema_name": "S",
            "owner": "SYSADMIN",
            "comment": "",
            "warehouse": "WH",
            "schedule": null,
            "predecessors": "[\n  \"\\\"DB\\\".\\\"S\\\".\\\"T1\\\"\"\n]",
            "state": "started",
            "definition": "SELECT 1",
            "condition": "",
            "allow_overlapping_execution": "false",
            "error_integration": "null",
            "owner_role_type": "ROLE"
        });
        let task_record =
            Task::try_from(decode::from_row::<TaskRow>(row.as_object().unwrap()).unwrap()).unwrap();
        assert_eq!(task_record.id(), task("T2"));
        assert_eq!(task_record.predecessors, vec![task("T1")]);
        assert!(!task_record.is_root());
        assert!(task_record.is_started());
        assert_eq!(task_record.schedule, None);
        assert_eq!(task_record.error_integration, None);
        assert!(!task_record.allow_overlapping_execution);
    }
}
