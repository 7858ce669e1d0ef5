//! SQL Tokens - the atomic units of SQL output.
//!
//! Every statement the renderer emits is a stream of tokens. Quoting of
//! identifiers and string literals happens here and nowhere else, so the
//! rules in [`quote_identifier`] and [`quote_string`] hold for all output.

/// Quote an identifier component with double quotes.
///
/// Embedded double quotes are doubled; whitespace, dots and case are kept
/// verbatim.
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a string literal with single quotes, doubling embedded quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Format a boolean literal.
pub fn format_bool(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

/// SQL Token - every possible element in an emitted statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Fixed fragments ===
    /// Keyword or fixed SQL fragment, emitted as-is (`CREATE`, `OR REPLACE`).
    Keyword(&'static str),

    // === Punctuation ===
    Comma,
    LParen,
    RParen,

    // === Operators ===
    Eq,
    Arrow,

    // === Whitespace ===
    Space,

    // === Dynamic Content ===
    /// Single identifier component, double-quoted on output.
    Ident(String),
    /// Fully-qualified object name, already quoted component-wise.
    ObjectName(String),
    /// Integer literal
    LitInt(i64),
    /// String literal
    LitString(String),
    /// Boolean literal
    LitBool(bool),

    // === Escape Hatch ===
    /// Raw SQL passed directly to output without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input to this variant unless it is meant to be SQL.**
    /// It carries policy bodies, alert conditions and task definitions,
    /// which are SQL by construction. For values, use `Token::LitString`,
    /// `Token::LitInt`, etc. which escape their content.
    Raw(String),
}

impl Token {
    /// Serialize this token to a string.
    pub fn serialize(&self) -> String {
        match self {
            Token::Keyword(kw) => (*kw).into(),

            Token::Comma => ",".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            Token::Eq => "=".into(),
            Token::Arrow => "=>".into(),

            Token::Space => " ".into(),

            Token::Ident(name) => quote_identifier(name),
            Token::ObjectName(fqn) => fqn.clone(),
            Token::LitInt(n) => n.to_string(),
            Token::LitString(s) => quote_string(s),
            Token::LitBool(b) => format_bool(*b).into(),

            Token::Raw(s) => s.clone(),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Extend with multiple tokens.
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        self.tokens.extend(tokens);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Join several streams, placing `separator` between consecutive ones.
    pub fn join(streams: &[TokenStream], separator: &[Token]) -> TokenStream {
        let mut ts = TokenStream::new();
        for (i, stream) in streams.iter().enumerate() {
            if i > 0 {
                ts.extend(separator.iter().cloned());
            }
            ts.append(stream);
        }
        ts
    }

    /// Whether the stream holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens in emission order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self) -> String {
        self.tokens.iter().map(|t| t.serialize()).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_serialize() {
        assert_eq!(Token::Keyword("CREATE").serialize(), "CREATE");
        assert_eq!(Token::Keyword("OR REPLACE").serialize(), "OR REPLACE");
    }

    #[test]
    fn test_ident_serialize() {
        assert_eq!(Token::Ident("users".into()).serialize(), "\"users\"");
        assert_eq!(Token::Ident("My \"Table\"".into()).serialize(), "\"My \"\"Table\"\"\"");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(Token::LitString("it's".into()).serialize(), "'it''s'");
        assert_eq!(Token::LitString(String::new()).serialize(), "''");
    }

    #[test]
    fn test_bool_serialize() {
        assert_eq!(Token::LitBool(true).serialize(), "true");
        assert_eq!(Token::LitBool(false).serialize(), "false");
    }

    #[test]
    fn test_token_stream() {
        let mut ts = TokenStream::new();
        ts.push(Token::Keyword("DROP ROLE"))
            .space()
            .push(Token::Ident("analyst".into()));

        assert_eq!(ts.serialize(), "DROP ROLE \"analyst\"");
    }

    #[test]
    fn test_join_streams() {
        let mut a = TokenStream::new();
        a.push(Token::LitString("1.1.1.1".into()));
        let mut b = TokenStream::new();
        b.push(Token::LitString("2.2.2.2".into()));

        let joined = TokenStream::join(&[a, b], &[Token::Comma, Token::Space]);
        assert_eq!(joined.serialize(), "'1.1.1.1', '2.2.2.2'");
    }

    #[test]
    fn test_join_empty() {
        assert!(TokenStream::join(&[], &[Token::Comma]).is_empty());
    }
}
