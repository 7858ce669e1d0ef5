//! Field directives.
//!
//! A directive says how one field of an option struct turns into SQL. The
//! vocabulary is closed:
//!
//! | Directive | Builder call | Effect |
//! |-----------|--------------|--------|
//! | `static` | [`SqlBuilder::sql`] | always emit the fragment |
//! | `keyword` | [`SqlBuilder::keyword`], [`SqlBuilder::nested`] | emit the fragment when the field is set |
//! | `parameter` | [`SqlBuilder::parameter`], [`SqlBuilder::parameter_list`] | `KEY <sep> VALUE` |
//! | `identifier` | [`SqlBuilder::identifier`], [`SqlBuilder::prefixed_identifier`] | fully-qualified name |
//! | `list` | [`SqlBuilder::list`] | delimited sequence of sub-records |
//!
//! Modifiers refine parameters and lists: [`Quotes`] (`single_quotes`,
//! `double_quotes`, `no_quotes`), [`Separator`] (`equals`, `no_equals`,
//! `arrow_equals`) and [`ListStyle`] (`parentheses`, `no_parentheses`,
//! `no_comma`). An identifier assigned with `=` (`WAREHOUSE = "W"`) is a
//! parameter whose value is an identifier.
//!
//! [`SqlBuilder::sql`]: super::builder::SqlBuilder::sql
//! [`SqlBuilder::keyword`]: super::builder::SqlBuilder::keyword
//! [`SqlBuilder::nested`]: super::builder::SqlBuilder::nested
//! [`SqlBuilder::parameter`]: super::builder::SqlBuilder::parameter
//! [`SqlBuilder::parameter_list`]: super::builder::SqlBuilder::parameter_list
//! [`SqlBuilder::identifier`]: super::builder::SqlBuilder::identifier
//! [`SqlBuilder::prefixed_identifier`]: super::builder::SqlBuilder::prefixed_identifier
//! [`SqlBuilder::list`]: super::builder::SqlBuilder::list

use std::fmt;

use super::token::Token;

/// Directive kinds, reported in render errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Static,
    Keyword,
    Parameter,
    Identifier,
    List,
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DirectiveKind::Static => "static",
            DirectiveKind::Keyword => "keyword",
            DirectiveKind::Parameter => "parameter",
            DirectiveKind::Identifier => "identifier",
            DirectiveKind::List => "list",
        };
        f.write_str(name)
    }
}

/// How a scalar value is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quotes {
    /// Emit the value as-is.
    #[default]
    None,
    /// Wrap in `'`, doubling embedded quotes.
    Single,
    /// Wrap in `"`, doubling embedded quotes.
    Double,
}

/// Separator between a parameter key and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// `KEY = VALUE`
    #[default]
    Equals,
    /// `KEY VALUE`
    Space,
    /// `KEY => VALUE`
    Arrow,
}

impl Separator {
    pub(crate) fn tokens(&self) -> Vec<Token> {
        match self {
            Separator::Equals => vec![Token::Space, Token::Eq, Token::Space],
            Separator::Space => vec![Token::Space],
            Separator::Arrow => vec![Token::Space, Token::Arrow, Token::Space],
        }
    }
}

/// Modifiers of a `parameter` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParamStyle {
    pub quotes: Quotes,
    pub separator: Separator,
    pub parentheses: bool,
}

impl ParamStyle {
    /// `KEY = value`, value unquoted.
    pub const fn new() -> Self {
        Self {
            quotes: Quotes::None,
            separator: Separator::Equals,
            parentheses: false,
        }
    }

    /// `KEY = 'value'`
    pub const fn single_quoted() -> Self {
        Self::new().single_quotes()
    }

    pub const fn single_quotes(self) -> Self {
        Self {
            quotes: Quotes::Single,
            ..self
        }
    }

    pub const fn double_quotes(self) -> Self {
        Self {
            quotes: Quotes::Double,
            ..self
        }
    }

    pub const fn no_quotes(self) -> Self {
        Self {
            quotes: Quotes::None,
            ..self
        }
    }

    pub const fn no_equals(self) -> Self {
        Self {
            separator: Separator::Space,
            ..self
        }
    }

    pub const fn arrow_equals(self) -> Self {
        Self {
            separator: Separator::Arrow,
            ..self
        }
    }

    pub const fn parentheses(self) -> Self {
        Self {
            parentheses: true,
            ..self
        }
    }
}

/// Modifiers of a `list` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStyle {
    pub parentheses: bool,
    pub comma: bool,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl ListStyle {
    /// Comma separated, no parentheses.
    pub const fn new() -> Self {
        Self {
            parentheses: false,
            comma: true,
        }
    }

    pub const fn parentheses(self) -> Self {
        Self {
            parentheses: true,
            ..self
        }
    }

    pub const fn no_parentheses(self) -> Self {
        Self {
            parentheses: false,
            ..self
        }
    }

    pub const fn no_comma(self) -> Self {
        Self {
            comma: false,
            ..self
        }
    }

    pub(crate) fn separator(&self) -> Vec<Token> {
        if self.comma {
            vec![Token::Comma, Token::Space]
        } else {
            vec![Token::Space]
        }
    }
}
