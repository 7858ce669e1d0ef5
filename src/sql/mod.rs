//! SQL generation module.
//!
//! This module provides the typed pieces every Snowflake statement is built
//! from:
//!
//! - [`token`] - Token types for SQL output
//! - [`identifier`] - Object identifiers and their fully-qualified names
//! - [`directive`] - Field directive modifiers (quoting, separators, lists)
//! - [`builder`] - The directive-driven renderer
//! - [`types`] - Snowflake column data types

pub mod builder;
pub mod directive;
pub mod identifier;
pub mod token;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub(crate) use builder::sql_enum;
pub use builder::{render, RenderError, SqlBuilder, SqlValue, ToSql, UnknownVariant};
pub use directive::{DirectiveKind, ListStyle, ParamStyle, Quotes, Separator};
pub use identifier::{
    AccountIdentifier, AccountObjectIdentifier, ColumnIdentifier, DatabaseObjectIdentifier,
    ExternalObjectIdentifier, Identifier, IdentifierError, ObjectIdentifier,
    SchemaObjectIdentifier,
};
pub use token::{Token, TokenStream};
pub use types::DataType;
