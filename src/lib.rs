//! # snowflake-sdk
//!
//! Typed construction and validation of Snowflake DDL statements.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              Request DTOs (sdk::<object>)                │
//! │      (fluent setters, defaults, no internal flags)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [into_options]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Option structs                          │
//! │        (one per statement, fields in SQL order)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [validation]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Joined ValidationErrors, or ready to render          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [sql::builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │                    SQL text                              │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [SqlExecutor, sdk::decode]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Domain records                           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering and validation are pure; only [`sdk::Client`] talks to an
//! executor or reads [`config::Settings`].

pub mod config;
pub mod error;
pub mod sdk;
pub mod sql;
pub mod validation;

pub use error::{Error, Result};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::error::{Error, Result};
    pub use crate::sdk::common::{In, Like, LimitFrom, ObjectType, Schedule, TagAssociation};
    pub use crate::sdk::{Client, ExecError, Row, SqlExecutor};
    pub use crate::sql::{
        render, AccountIdentifier, AccountObjectIdentifier, ColumnIdentifier,
        DatabaseObjectIdentifier, ExternalObjectIdentifier, Identifier, ObjectIdentifier,
        SchemaObjectIdentifier, ToSql,
    };
    pub use crate::validation::{validate, Validate, ValidationError, ValidationErrors};
}
