//! The directive vocabulary, driven from outside the crate.

use insta::assert_snapshot;
use snowflake_sdk::sql::{
    render, AccountObjectIdentifier, DirectiveKind, ListStyle, ParamStyle, Quotes, RenderError,
    SchemaObjectIdentifier, SqlBuilder, ToSql,
};

struct Arg {
    name: String,
    data_type: &'static str,
}

impl ToSql for Arg {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.value(&self.name, Quotes::Double).value(self.data_type, Quotes::None);
    }
}

#[derive(Default)]
struct Options {
    or_replace: Option<bool>,
    name: SchemaObjectIdentifier,
    args: Vec<Arg>,
    warehouse: Option<AccountObjectIdentifier>,
    enabled: Option<bool>,
    comment: Option<String>,
    handler: Option<String>,
    imports: Vec<Arg>,
}

impl ToSql for Options {
    fn write_sql(&self, b: &mut SqlBuilder) {
        b.sql("CREATE")
            .keyword(self.or_replace, "OR REPLACE")
            .sql("FUNCTION")
            .identifier(&self.name)
            .list(None, &self.args, ListStyle::new().parentheses())
            .parameter("WAREHOUSE", self.warehouse.as_ref(), ParamStyle::new())
            .parameter("ENABLED", self.enabled.as_ref(), ParamStyle::new())
            .parameter("COMMENT", self.comment.as_ref(), ParamStyle::single_quoted())
            .parameter(
                "HANDLER",
                self.handler.as_ref(),
                ParamStyle::single_quoted().arrow_equals(),
            )
            .list(Some("IMPORTS"), &self.imports, ListStyle::new().no_comma());
    }
}

fn name() -> SchemaObjectIdentifier {
    SchemaObjectIdentifier::new("DB", "S", "F")
}

#[test]
fn test_absent_fields_render_nothing() {
    let opts = Options {
        name: name(),
        ..Default::default()
    };
    assert_snapshot!(render(Some(&opts)).unwrap(), @r#"CREATE FUNCTION "DB"."S"."F""#);
}

#[test]
fn test_every_directive() {
    let opts = Options {
        or_replace: Some(true),
        name: name(),
        args: vec![
            Arg {
                name: "A".into(),
                data_type: "NUMBER",
            },
            Arg {
                name: "b\"c".into(),
                data_type: "VARCHAR",
            },
        ],
        warehouse: Some(AccountObjectIdentifier::new("WH")),
        enabled: Some(false),
        comment: Some("it's".into()),
        handler: Some("run".into()),
        imports: vec![Arg {
            name: "X".into(),
            data_type: "BINARY",
        }],
    };
    assert_snapshot!(
        opts.to_sql().unwrap(),
        @r#"CREATE OR REPLACE FUNCTION "DB"."S"."F" ("A" NUMBER, "b""c" VARCHAR) WAREHOUSE = "WH" ENABLED = false COMMENT = 'it''s' HANDLER => 'run' IMPORTS "X" BINARY"#
    );
}

#[test]
fn test_keyword_false_is_absent() {
    let opts = Options {
        or_replace: Some(false),
        name: name(),
        ..Default::default()
    };
    assert_eq!(opts.to_sql().unwrap(), "CREATE FUNCTION \"DB\".\"S\".\"F\"");
}

#[test]
fn test_misuse_is_a_render_error() {
    assert_eq!(render::<Options>(None), Err(RenderError::NilOptions));

    struct QuotedBool;
    impl ToSql for QuotedBool {
        fn write_sql(&self, b: &mut SqlBuilder) {
            b.parameter("ENABLED", Some(&true), ParamStyle::single_quoted());
        }
    }
    assert!(matches!(
        QuotedBool.to_sql(),
        Err(RenderError::IncompatibleQuotes { value: "bool", .. })
    ));

    struct Blank;
    impl ToSql for Blank {
        fn write_sql(&self, b: &mut SqlBuilder) {
            b.sql("DROP").sql(" ");
        }
    }
    assert_eq!(
        Blank.to_sql(),
        Err(RenderError::EmptyFragment(DirectiveKind::Static))
    );
}
