//! Snowflake object SDK.
//!
//! Each object module follows the same pipeline:
//!
//! ```text
//! Request ──into_options()──▶ Options ──validate()──▶ render ──▶ SQL
//!                                                                 │
//!                                        SqlExecutor::exec/query ◀┘
//!                                                 │
//!                           DB rows ──decode──▶ domain records
//! ```
//!
//! [`Client`] drives the pipeline over any [`SqlExecutor`].
//!
//! # Example
//!
//! ```ignore
//! use snowflake_sdk::sdk::network_policies::CreateNetworkPolicyRequest;
//! use snowflake_sdk::sdk::Client;
//! use snowflake_sdk::sql::AccountObjectIdentifier;
//!
//! let client = Client::new(executor);
//! let request = CreateNetworkPolicyRequest::new(AccountObjectIdentifier::new("P1"))
//!     .with_allowed_ip_list(["1.1.1.1"]);
//! client.network_policies().create(request).await?;
//! ```

pub mod alerts;
pub mod common;
pub mod databases;
pub mod decode;
pub mod executor;
pub mod failover_groups;
pub mod grants;
pub mod masking_policies;
pub mod network_policies;
pub mod password_policies;
pub mod roles;
pub mod schemas;
pub mod session_policies;
pub mod tags;
pub mod tasks;
pub mod warehouses;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::sql::ToSql;
use crate::validation::{validate, Validate};

pub use executor::{ExecError, Row, SqlExecutor};

/// Anything that can be validated and rendered as one statement.
pub trait Statement: Validate + ToSql {}

impl<T: Validate + ToSql> Statement for T {}

/// Runs option structs against an executor.
pub struct Client<E> {
    executor: E,
    settings: Settings,
}

impl<E: SqlExecutor> Client<E> {
    pub fn new(executor: E) -> Self {
        Self::with_settings(executor, Settings::default())
    }

    pub fn with_settings(executor: E, settings: Settings) -> Self {
        Self { executor, settings }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Validate and render without executing.
    pub fn prepare<S: Statement>(&self, opts: &S) -> Result<String> {
        validate(Some(opts))?;
        let sql = opts.to_sql()?;
        Ok(self.settings.finish_statement(sql))
    }

    fn log_statement(&self, sql: &str) {
        if self.settings.logging.log_statements {
            log::debug!("executing: {}", sql);
        }
    }

    /// Validate, render and execute a statement.
    pub async fn exec<S: Statement>(&self, opts: &S) -> Result<()> {
        let sql = self.prepare(opts)?;
        self.log_statement(&sql);
        self.executor.exec(&sql).await?;
        Ok(())
    }

    fn prepare_all<S: Statement>(&self, statements: &[S]) -> Result<Vec<String>> {
        statements.iter().map(|s| self.prepare(s)).collect()
    }

    /// Validate and render every statement, then execute them in order.
    ///
    /// Nothing runs unless every statement validates. Execution stops at the
    /// first failure; statements before it stay applied.
    pub async fn exec_many<S: Statement>(&self, statements: &[S]) -> Result<()> {
        for sql in self.prepare_all(statements)? {
            self.log_statement(&sql);
            self.executor.exec(&sql).await?;
        }
        Ok(())
    }

    /// Validate and render every statement, then execute them concurrently
    /// through [`SqlExecutor::exec_batch`].
    ///
    /// Only for statements that do not depend on each other. If one fails,
    /// any of the others may already have been applied, in no fixed order.
    pub async fn exec_concurrent<S: Statement>(&self, statements: &[S]) -> Result<()> {
        let sqls = self.prepare_all(statements)?;
        for sql in &sqls {
            self.log_statement(sql);
        }
        self.executor.exec_batch(&sqls).await?;
        Ok(())
    }

    /// Validate, render and run a query.
    pub async fn query<S: Statement>(&self, opts: &S) -> Result<Vec<Row>> {
        let sql = self.prepare(opts)?;
        self.log_statement(&sql);
        Ok(self.executor.query(&sql).await?)
    }

    /// Like [`Client::query`] for a single row; "no rows" becomes
    /// [`Error::ObjectNotFound`] naming `object`.
    pub async fn query_one<S: Statement>(&self, opts: &S, object: &str) -> Result<Row> {
        let sql = self.prepare(opts)?;
        self.log_statement(&sql);
        match self.executor.query_one(&sql).await {
            Ok(row) => Ok(row),
            Err(err) if err.is_no_rows() => Err(Error::ObjectNotFound(object.to_string())),
            Err(err) => Err(err.into()),
        }
    }

    // =========================================================================
    // Objects
    // =========================================================================

    pub fn alerts(&self) -> alerts::Alerts<'_, E> {
        alerts::Alerts::new(self)
    }

    pub fn databases(&self) -> databases::Databases<'_, E> {
        databases::Databases::new(self)
    }

    pub fn failover_groups(&self) -> failover_groups::FailoverGroups<'_, E> {
        failover_groups::FailoverGroups::new(self)
    }

    pub fn grants(&self) -> grants::Grants<'_, E> {
        grants::Grants::new(self)
    }

    pub fn masking_policies(&self) -> masking_policies::MaskingPolicies<'_, E> {
        masking_policies::MaskingPolicies::new(self)
    }

    pub fn network_policies(&self) -> network_policies::NetworkPolicies<'_, E> {
        network_policies::NetworkPolicies::new(self)
    }

    pub fn password_policies(&self) -> password_policies::PasswordPolicies<'_, E> {
        password_policies::PasswordPolicies::new(self)
    }

    pub fn roles(&self) -> roles::Roles<'_, E> {
        roles::Roles::new(self)
    }

    pub fn schemas(&self) -> schemas::Schemas<'_, E> {
        schemas::Schemas::new(self)
    }

    pub fn session_policies(&self) -> session_policies::SessionPolicies<'_, E> {
        session_policies::SessionPolicies::new(self)
    }

    pub fn tags(&self) -> tags::Tags<'_, E> {
        tags::Tags::new(self)
    }

    pub fn tasks(&self) -> tasks::Tasks<'_, E> {
        tasks::Tasks::new(self)
    }

    pub fn warehouses(&self) -> warehouses::Warehouses<'_, E> {
        warehouses::Warehouses::new(self)
    }
}

/// Declares a borrowed per-object façade over a [`Client`].
macro_rules! facade {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<'a, E> {
            client: &'a $crate::sdk::Client<E>,
        }

        impl<'a, E: $crate::sdk::SqlExecutor> $name<'a, E> {
            pub(crate) fn new(client: &'a $crate::sdk::Client<E>) -> Self {
                Self { client }
            }
        }
    };
}

pub(crate) use facade;

/// Pick the single object named `id` out of `SHOW ... LIKE` results.
pub(crate) fn find_by_name<T, F>(items: Vec<T>, id: &str, fqn: String, name_of: F) -> Result<T>
where
    F: Fn(&T) -> &str,
{
    items
        .into_iter()
        .find(|item| name_of(item) == id)
        .ok_or(Error::ObjectNotFound(fqn))
}
