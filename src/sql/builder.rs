//! Directive-driven SQL renderer.
//!
//! Option structs implement [`ToSql`] by walking their fields in
//! declaration order and handing each one to a [`SqlBuilder`] method that
//! matches the field's directive. The builder decides presence (absent
//! optionals, empty lists and unset keywords produce nothing), applies the
//! quoting and delimiter modifiers, and joins top-level fragments with a
//! single space.
//!
//! ```ignore
//! impl ToSql for DropRoleOptions {
//!     fn write_sql(&self, b: &mut SqlBuilder) {
//!         b.sql("DROP ROLE")
//!             .keyword(self.if_exists, "IF EXISTS")
//!             .identifier(&self.name);
//!     }
//! }
//! ```
//!
//! Rendering fails only on programmer error: an empty fragment, or a value
//! type that cannot carry the requested quoting (e.g. a double-quoted
//! boolean). Input errors belong to [`crate::validation`].

use thiserror::Error;

use super::directive::{DirectiveKind, ListStyle, ParamStyle, Quotes};
use super::identifier::{
    AccountIdentifier, AccountObjectIdentifier, ColumnIdentifier, DatabaseObjectIdentifier,
    ExternalObjectIdentifier, Identifier, ObjectIdentifier, SchemaObjectIdentifier,
};
use super::token::{Token, TokenStream};

/// Errors raised while rendering. These indicate misuse, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("options cannot be nil")]
    NilOptions,

    #[error("{value} cannot be rendered with {quotes:?} quotes")]
    IncompatibleQuotes { value: &'static str, quotes: Quotes },

    #[error("empty SQL fragment in {0} directive")]
    EmptyFragment(DirectiveKind),
}

/// A string that does not name any variant of a closed SQL enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// A scalar that can be emitted as a parameter value.
pub trait SqlValue {
    fn to_token(&self, quotes: Quotes) -> Result<Token, RenderError>;
}

impl SqlValue for str {
    fn to_token(&self, quotes: Quotes) -> Result<Token, RenderError> {
        Ok(match quotes {
            Quotes::None => Token::Raw(self.to_string()),
            Quotes::Single => Token::LitString(self.to_string()),
            Quotes::Double => Token::Ident(self.to_string()),
        })
    }
}

impl SqlValue for String {
    fn to_token(&self, quotes: Quotes) -> Result<Token, RenderError> {
        self.as_str().to_token(quotes)
    }
}

impl SqlValue for bool {
    fn to_token(&self, quotes: Quotes) -> Result<Token, RenderError> {
        match quotes {
            Quotes::None => Ok(Token::LitBool(*self)),
            _ => Err(RenderError::IncompatibleQuotes {
                value: "bool",
                quotes,
            }),
        }
    }
}

macro_rules! int_sql_value {
    ($($ty:ty),+) => {
        $(
            impl SqlValue for $ty {
                fn to_token(&self, quotes: Quotes) -> Result<Token, RenderError> {
                    match quotes {
                        Quotes::None => Ok(Token::LitInt(i64::from(*self))),
                        Quotes::Single => Ok(Token::LitString(self.to_string())),
                        Quotes::Double => Err(RenderError::IncompatibleQuotes {
                            value: stringify!($ty),
                            quotes,
                        }),
                    }
                }
            }
        )+
    };
}

int_sql_value!(i32, i64);

/// Anything that can write itself into a [`SqlBuilder`].
pub trait ToSql {
    /// Emit this value's fields, in declaration order.
    fn write_sql(&self, b: &mut SqlBuilder);

    /// Convert to token stream.
    fn to_tokens(&self) -> Result<TokenStream, RenderError> {
        let mut b = SqlBuilder::new();
        self.write_sql(&mut b);
        b.into_tokens()
    }

    /// Convert to SQL.
    fn to_sql(&self) -> Result<String, RenderError> {
        self.to_tokens().map(|ts| ts.serialize())
    }
}

/// Render optional options; `None` is a programmer error.
pub fn render<T: ToSql>(opts: Option<&T>) -> Result<String, RenderError> {
    opts.ok_or(RenderError::NilOptions)?.to_sql()
}

macro_rules! identifier_sql {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl SqlValue for $ty {
                fn to_token(&self, quotes: Quotes) -> Result<Token, RenderError> {
                    match quotes {
                        Quotes::None => Ok(Token::ObjectName(self.fully_qualified_name())),
                        Quotes::Single => Ok(Token::LitString(self.fully_qualified_name())),
                        Quotes::Double => Err(RenderError::IncompatibleQuotes {
                            value: stringify!($ty),
                            quotes,
                        }),
                    }
                }
            }

            impl ToSql for $ty {
                fn write_sql(&self, b: &mut SqlBuilder) {
                    b.identifier(self);
                }
            }
        )+
    };
}

identifier_sql!(
    AccountIdentifier,
    AccountObjectIdentifier,
    DatabaseObjectIdentifier,
    SchemaObjectIdentifier,
    ExternalObjectIdentifier,
    ColumnIdentifier,
    Identifier,
);

/// Accumulates the fragments of one statement (or one sub-record).
#[derive(Debug, Default)]
#[must_use = "a builder does nothing until finished"]
pub struct SqlBuilder {
    parts: Vec<TokenStream>,
    error: Option<RenderError>,
}

impl SqlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, err: RenderError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn fragment(&mut self, fragment: &'static str, kind: DirectiveKind) -> Option<Token> {
        if fragment.trim().is_empty() {
            self.fail(RenderError::EmptyFragment(kind));
            None
        } else {
            Some(Token::Keyword(fragment))
        }
    }

    fn push(&mut self, ts: TokenStream) {
        if !ts.is_empty() {
            self.parts.push(ts);
        }
    }

    fn render_child<T: ToSql + ?Sized>(&mut self, value: &T) -> TokenStream {
        let mut child = SqlBuilder::new();
        value.write_sql(&mut child);
        match child.into_tokens() {
            Ok(ts) => ts,
            Err(err) => {
                self.fail(err);
                TokenStream::new()
            }
        }
    }

    fn render_items<T: ToSql>(&mut self, items: &[T]) -> Vec<TokenStream> {
        items.iter().map(|item| self.render_child(item)).collect()
    }

    // =========================================================================
    // static / keyword
    // =========================================================================

    /// `static`: always emit `fragment`.
    pub fn sql(&mut self, fragment: &'static str) -> &mut Self {
        if let Some(token) = self.fragment(fragment, DirectiveKind::Static) {
            let mut ts = TokenStream::new();
            ts.push(token);
            self.push(ts);
        }
        self
    }

    /// `keyword`: emit `fragment` when `flag` is `Some(true)`.
    pub fn keyword(&mut self, flag: Option<bool>, fragment: &'static str) -> &mut Self {
        if flag == Some(true) {
            if let Some(token) = self.fragment(fragment, DirectiveKind::Keyword) {
                let mut ts = TokenStream::new();
                ts.push(token);
                self.push(ts);
            }
        }
        self
    }

    /// Comma-separated keywords whose flag is set (`UNSET COMMENT, TAG`).
    pub fn keywords(&mut self, flags: &[(bool, &'static str)]) -> &mut Self {
        let mut items = Vec::new();
        for (set, fragment) in flags {
            if *set {
                match self.fragment(fragment, DirectiveKind::Keyword) {
                    Some(token) => {
                        let mut ts = TokenStream::new();
                        ts.push(token);
                        items.push(ts);
                    }
                    None => return self,
                }
            }
        }
        self.push(TokenStream::join(&items, &[Token::Comma, Token::Space]));
        self
    }

    /// `keyword` on a sub-record: emit the optional prefix, then recurse.
    pub fn nested<T: ToSql>(&mut self, prefix: Option<&'static str>, value: Option<&T>) -> &mut Self {
        let Some(value) = value else {
            return self;
        };
        let body = self.render_child(value);
        let mut ts = TokenStream::new();
        if let Some(prefix) = prefix {
            let Some(token) = self.fragment(prefix, DirectiveKind::Keyword) else {
                return self;
            };
            ts.push(token);
            if !body.is_empty() {
                ts.space();
            }
        }
        ts.append(&body);
        self.push(ts);
        self
    }

    // =========================================================================
    // values
    // =========================================================================

    /// A bare scalar with the given quoting.
    pub fn value<V: SqlValue + ?Sized>(&mut self, value: &V, quotes: Quotes) -> &mut Self {
        match value.to_token(quotes) {
            Ok(token) => {
                let mut ts = TokenStream::new();
                ts.push(token);
                self.push(ts);
            }
            Err(err) => self.fail(err),
        }
        self
    }

    /// Unescaped SQL text (policy bodies, task definitions, conditions).
    pub fn raw(&mut self, sql: &str) -> &mut Self {
        if !sql.is_empty() {
            let mut ts = TokenStream::new();
            ts.push(Token::Raw(sql.to_string()));
            self.push(ts);
        }
        self
    }

    // =========================================================================
    // parameter
    // =========================================================================

    fn parameter_stream(&mut self, key: &'static str, style: ParamStyle, value: TokenStream) {
        let Some(token) = self.fragment(key, DirectiveKind::Parameter) else {
            return;
        };
        let mut ts = TokenStream::new();
        ts.push(token).extend(style.separator.tokens());
        if style.parentheses {
            ts.lparen().append(&value).rparen();
        } else {
            ts.append(&value);
        }
        self.push(ts);
    }

    /// `parameter`: `KEY <sep> VALUE` when `value` is present.
    pub fn parameter<V: SqlValue + ?Sized>(
        &mut self,
        key: &'static str,
        value: Option<&V>,
        style: ParamStyle,
    ) -> &mut Self {
        let Some(value) = value else {
            return self;
        };
        match value.to_token(style.quotes) {
            Ok(token) => {
                let mut ts = TokenStream::new();
                ts.push(token);
                self.parameter_stream(key, style, ts);
            }
            Err(err) => self.fail(err),
        }
        self
    }

    /// `parameter` whose value is a comma-separated list of sub-records.
    ///
    /// An empty list suppresses the whole parameter.
    pub fn parameter_list<T: ToSql>(
        &mut self,
        key: &'static str,
        items: &[T],
        style: ParamStyle,
    ) -> &mut Self {
        if items.is_empty() {
            return self;
        }
        let rendered = self.render_items(items);
        let value = TokenStream::join(&rendered, &[Token::Comma, Token::Space]);
        self.parameter_stream(key, style, value);
        self
    }

    // =========================================================================
    // identifier
    // =========================================================================

    /// `identifier`: the fully-qualified name.
    pub fn identifier<I: ObjectIdentifier + ?Sized>(&mut self, id: &I) -> &mut Self {
        let mut ts = TokenStream::new();
        ts.push(Token::ObjectName(id.fully_qualified_name()));
        self.push(ts);
        self
    }

    /// `identifier` with a leading fragment (`RENAME TO`, `CLONE`, `TO ROLE`).
    pub fn prefixed_identifier<I: ObjectIdentifier>(
        &mut self,
        prefix: &'static str,
        id: Option<&I>,
    ) -> &mut Self {
        let Some(id) = id else {
            return self;
        };
        if let Some(token) = self.fragment(prefix, DirectiveKind::Identifier) {
            let mut ts = TokenStream::new();
            ts.push(token)
                .space()
                .push(Token::ObjectName(id.fully_qualified_name()));
            self.push(ts);
        }
        self
    }

    // =========================================================================
    // list
    // =========================================================================

    /// `list`: optional prefix, then the delimited items.
    ///
    /// An empty list suppresses the whole field.
    pub fn list<T: ToSql>(
        &mut self,
        prefix: Option<&'static str>,
        items: &[T],
        style: ListStyle,
    ) -> &mut Self {
        if items.is_empty() {
            return self;
        }
        let rendered = self.render_items(items);
        let body = TokenStream::join(&rendered, &style.separator());

        let mut ts = TokenStream::new();
        if let Some(prefix) = prefix {
            let Some(token) = self.fragment(prefix, DirectiveKind::List) else {
                return self;
            };
            ts.push(token).space();
        }
        if style.parentheses {
            ts.lparen().append(&body).rparen();
        } else {
            ts.append(&body);
        }
        self.push(ts);
        self
    }

    // =========================================================================
    // output
    // =========================================================================

    /// Fragments joined with single spaces, or the first render error.
    pub fn into_tokens(self) -> Result<TokenStream, RenderError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(TokenStream::join(&self.parts, &[Token::Space]))
    }

    pub fn finish(self) -> Result<String, RenderError> {
        self.into_tokens().map(|ts| ts.serialize())
    }
}

/// Declares a closed SQL enum: variant ↔ fragment, `Display`, `FromStr`
/// (case-insensitive), and rendering as a parameter value or list item.
macro_rules! sql_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $sql:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $sql, )+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::sql::UnknownVariant;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| $crate::sql::UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    })
            }
        }

        impl $crate::sql::SqlValue for $name {
            fn to_token(
                &self,
                quotes: $crate::sql::Quotes,
            ) -> ::std::result::Result<$crate::sql::Token, $crate::sql::RenderError> {
                match quotes {
                    $crate::sql::Quotes::None => Ok($crate::sql::Token::Keyword(self.as_str())),
                    $crate::sql::Quotes::Single => {
                        Ok($crate::sql::Token::LitString(self.as_str().to_string()))
                    }
                    $crate::sql::Quotes::Double => Err($crate::sql::RenderError::IncompatibleQuotes {
                        value: stringify!($name),
                        quotes,
                    }),
                }
            }
        }

        impl $crate::sql::ToSql for $name {
            fn write_sql(&self, b: &mut $crate::sql::SqlBuilder) {
                b.sql(self.as_str());
            }
        }
    };
}

pub(crate) use sql_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    sql_enum! {
        enum Size {
            Small => "SMALL",
            Large => "LARGE",
        }
    }

    struct Address {
        ip: String,
    }

    impl ToSql for Address {
        fn write_sql(&self, b: &mut SqlBuilder) {
            b.value(&self.ip, Quotes::Single);
        }
    }

    #[derive(Default)]
    struct Inner {
        comment: Option<String>,
        retries: Option<i32>,
    }

    impl ToSql for Inner {
        fn write_sql(&self, b: &mut SqlBuilder) {
            b.parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted())
                .parameter("RETRIES", self.retries.as_ref(), ParamStyle::new());
        }
    }

    #[derive(Default)]
    struct Sample {
        or_replace: Option<bool>,
        name: AccountObjectIdentifier,
        size: Option<Size>,
        enabled: Option<bool>,
        addresses: Vec<Address>,
        rename_to: Option<AccountObjectIdentifier>,
        set: Option<Inner>,
        arg: Option<String>,
    }

    impl ToSql for Sample {
        fn write_sql(&self, b: &mut SqlBuilder) {
            b.sql("CREATE")
                .keyword(self.or_replace, "OR REPLACE")
                .sql("THING")
                .identifier(&self.name)
                .parameter("SIZE", self.size.as_ref(), ParamStyle::single_quoted())
                .parameter("ENABLED", self.enabled.as_ref(), ParamStyle::new())
                .parameter_list("ADDRESSES", &self.addresses, ParamStyle::new().parentheses())
                .prefixed_identifier("RENAME TO", self.rename_to.as_ref())
                .nested(Some("SET"), self.set.as_ref())
                .parameter("ARG", self.arg.as_ref(), ParamStyle::single_quoted().arrow_equals());
        }
    }

    fn sample() -> Sample {
        Sample {
            name: AccountObjectIdentifier::new("T"),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_render() {
        assert_snapshot!(sample().to_sql().unwrap(), @r#"CREATE THING "T""#);
    }

    #[test]
    fn test_all_directives() {
        let opts = Sample {
            or_replace: Some(true),
            size: Some(Size::Large),
            enabled: Some(false),
            addresses: vec![
                Address { ip: "1.1.1.1".into() },
                Address { ip: "2.2.2.2".into() },
            ],
            rename_to: Some(AccountObjectIdentifier::new("U")),
            set: Some(Inner {
                comment: Some("it's".into()),
                retries: Some(3),
            }),
            arg: Some("x".into()),
            ..sample()
        };
        assert_snapshot!(
            opts.to_sql().unwrap(),
            @r#"CREATE OR REPLACE THING "T" SIZE = 'LARGE' ENABLED = false ADDRESSES = ('1.1.1.1', '2.2.2.2') RENAME TO "U" SET COMMENT = 'it''s' RETRIES = 3 ARG => 'x'"#
        );
    }

    #[test]
    fn test_keyword_false_is_omitted() {
        let opts = Sample {
            or_replace: Some(false),
            ..sample()
        };
        assert_eq!(opts.to_sql().unwrap(), "CREATE THING \"T\"");
    }

    #[test]
    fn test_empty_nested_keeps_prefix() {
        let opts = Sample {
            set: Some(Inner::default()),
            ..sample()
        };
        assert_eq!(opts.to_sql().unwrap(), "CREATE THING \"T\" SET");
    }

    #[test]
    fn test_render_nil_options() {
        assert_eq!(render::<Sample>(None), Err(RenderError::NilOptions));
        assert!(render(Some(&sample())).is_ok());
    }

    #[test]
    fn test_incompatible_quotes() {
        let mut b = SqlBuilder::new();
        b.parameter("FLAG", Some(&true), ParamStyle::single_quoted());
        assert_eq!(
            b.finish(),
            Err(RenderError::IncompatibleQuotes {
                value: "bool",
                quotes: Quotes::Single
            })
        );
    }

    #[test]
    fn test_empty_fragment() {
        let mut b = SqlBuilder::new();
        b.sql("DROP").keyword(Some(true), " ");
        assert_eq!(
            b.finish(),
            Err(RenderError::EmptyFragment(DirectiveKind::Keyword))
        );
    }

    #[test]
    fn test_list_styles() {
        let items = vec![
            AccountObjectIdentifier::new("A"),
            AccountObjectIdentifier::new("B"),
        ];

        let mut b = SqlBuilder::new();
        b.list(Some("AFTER"), &items, ListStyle::new());
        assert_eq!(b.finish().unwrap(), "AFTER \"A\", \"B\"");

        let mut b = SqlBuilder::new();
        b.list(None, &items, ListStyle::new().parentheses().no_comma());
        assert_eq!(b.finish().unwrap(), "(\"A\" \"B\")");

        let mut b = SqlBuilder::new();
        b.sql("X").list::<AccountObjectIdentifier>(Some("AFTER"), &[], ListStyle::new());
        assert_eq!(b.finish().unwrap(), "X");
    }

    #[test]
    fn test_keywords_are_comma_joined() {
        let mut b = SqlBuilder::new();
        b.sql("UNSET")
            .keywords(&[(true, "COMMENT"), (false, "SIZE"), (true, "TAG")]);
        assert_eq!(b.finish().unwrap(), "UNSET COMMENT, TAG");

        let mut b = SqlBuilder::new();
        b.sql("UNSET").keywords(&[(false, "COMMENT")]);
        assert_eq!(b.finish().unwrap(), "UNSET");
    }

    #[test]
    fn test_parameter_separators() {
        let value = "v".to_string();
        let mut b = SqlBuilder::new();
        b.parameter("A", Some(&value), ParamStyle::single_quoted())
            .parameter("B", Some(&value), ParamStyle::single_quoted().no_equals())
            .parameter("C", Some(&value), ParamStyle::new().double_quotes())
            .parameter("D", Some(&value), ParamStyle::new().parentheses());
        assert_eq!(b.finish().unwrap(), "A = 'v' B 'v' C = \"v\" D = (v)");
    }

    #[test]
    fn test_identifier_as_parameter() {
        let wh = AccountObjectIdentifier::new("WH");
        let mut b = SqlBuilder::new();
        b.parameter("WAREHOUSE", Some(&wh), ParamStyle::new());
        assert_eq!(b.finish().unwrap(), "WAREHOUSE = \"WH\"");
    }

    #[test]
    fn test_integer_bounds() {
        let mut b = SqlBuilder::new();
        b.parameter("MAX", Some(&i64::MAX), ParamStyle::new())
            .parameter("MIN", Some(&i32::MIN), ParamStyle::new());
        assert_eq!(
            b.finish().unwrap(),
            "MAX = 9223372036854775807 MIN = -2147483648"
        );
    }

    #[test]
    fn test_sql_enum_parse() {
        assert_eq!("small".parse::<Size>().unwrap(), Size::Small);
        assert_eq!(" LARGE ".parse::<Size>().unwrap(), Size::Large);
        let err = "medium".parse::<Size>().unwrap_err();
        assert_eq!(err.kind, "Size");
        assert_eq!(Size::Small.to_string(), "SMALL");
    }

    #[test]
    fn test_render_is_deterministic() {
        let build = || Sample {
            or_replace: Some(true),
            addresses: vec![Address { ip: "10.0.0.1".into() }],
            ..sample()
        };
        assert_eq!(build().to_sql(), build().to_sql());
    }

    mod with_crate_result {
        use crate::error::{Error, Result};

        sql_enum! {
            enum Mode {
                Strict => "STRICT",
                Lax => "LAX",
            }
        }

        fn parse(s: &str) -> Result<Mode> {
            Ok(s.parse()?)
        }

        #[test]
        fn test_sql_enum_beside_result_alias() {
            assert_eq!(parse("lax").unwrap(), Mode::Lax);
            assert!(matches!(parse("loose"), Err(Error::UnknownVariant(_))));
            assert_eq!(Mode::Strict.as_str(), "STRICT");
        }
    }
}
