use snowflake_sdk::sql::{
    AccountIdentifier, AccountObjectIdentifier, ColumnIdentifier, DatabaseObjectIdentifier,
    ExternalObjectIdentifier, Identifier, IdentifierError, ObjectIdentifier,
    SchemaObjectIdentifier,
};

const SAMPLES: &[&str] = &[
    "SIMPLE",
    "lower_case",
    "MiXeD",
    "with space",
    "with.dot",
    "with\"quote",
    "\"\"",
    "trailing ",
    "ünïcödé",
    "1_starts_with_digit",
];

#[test]
fn test_quoting_round_trips_every_scope() {
    for sample in SAMPLES {
        let account_object = AccountObjectIdentifier::new(*sample);
        let parsed: AccountObjectIdentifier =
            account_object.fully_qualified_name().parse().unwrap();
        assert_eq!(parsed.name(), *sample);

        let schema_object = SchemaObjectIdentifier::new("DB", *sample, *sample);
        let parsed = Identifier::parse(&schema_object.fully_qualified_name()).unwrap();
        assert_eq!(parsed, Identifier::SchemaObject(schema_object.clone()));
        assert_eq!(parsed.name(), *sample);
    }
}

#[test]
fn test_parse_dispatches_by_part_count() {
    let cases = [
        ("\"A\"", Identifier::from(AccountObjectIdentifier::new("A"))),
        ("\"A\".\"B\"", Identifier::from(DatabaseObjectIdentifier::new("A", "B"))),
        (
            "\"A\".\"B\".\"C\"",
            Identifier::from(SchemaObjectIdentifier::new("A", "B", "C")),
        ),
        (
            "\"A\".\"B\".\"C\".\"D\"",
            Identifier::from(ColumnIdentifier::new("A", "B", "C", "D")),
        ),
    ];
    for (input, expected) in cases {
        assert_eq!(Identifier::parse(input).unwrap(), expected, "{input}");
    }

    assert_eq!(Identifier::parse("   "), Err(IdentifierError::Empty));
    assert!(matches!(
        Identifier::parse("a.b.c.d.e"),
        Err(IdentifierError::UnsupportedPartCount { count: 5, .. })
    ));
}

#[test]
fn test_typed_parse_checks_part_count() {
    assert!(matches!(
        "\"DB\".\"S\"".parse::<SchemaObjectIdentifier>(),
        Err(IdentifierError::WrongPartCount {
            expected: 3,
            actual: 2,
            ..
        })
    ));
    assert_eq!(
        "DB.S".parse::<DatabaseObjectIdentifier>().unwrap(),
        DatabaseObjectIdentifier::new("DB", "S")
    );
}

#[test]
fn test_comma_components_are_rejected() {
    assert_eq!(
        Identifier::parse("\"a,b\""),
        Err(IdentifierError::ContainsComma("a,b".into()))
    );
    assert!(SchemaObjectIdentifier::try_new("DB", "S", "a,b").is_err());
    assert!(AccountObjectIdentifier::try_new("").is_err());
}

#[test]
fn test_external_identifier_names_the_account() {
    let id = ExternalObjectIdentifier::new(
        AccountIdentifier::new("ORG", "ACCT"),
        AccountObjectIdentifier::new("FG"),
    );
    assert_eq!(id.fully_qualified_name(), "\"ORG\".\"ACCT\".\"FG\"");
    assert_eq!(id.name(), "FG");
    assert_eq!(id.fully_qualified_name().parse::<ExternalObjectIdentifier>(), Ok(id));
}

#[test]
fn test_validity_requires_non_empty_components() {
    assert!(SchemaObjectIdentifier::new("DB", "S", "T").is_valid());
    assert!(!SchemaObjectIdentifier::new("DB", "", "T").is_valid());
    assert!(!AccountIdentifier::default().is_valid());
    assert!(AccountIdentifier::from_locator("XY12345").is_valid());
}
