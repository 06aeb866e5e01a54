use glimsel_parser::ast::*;
use glimsel_parser::{parse_query, ParseError};

fn parse_one_clause(input: &str) -> AttributeConstraint {
    let query = parse_query(input).expect("failed to parse query");
    assert_eq!(query.constraints.len(), 1, "expected one clause in {input}");
    query.constraints.into_iter().next().unwrap()
}

#[test]
fn test_name_only() {
    let query = parse_query("ReadingList").unwrap();
    assert_eq!(query.name.as_deref(), Some("ReadingList"));
    assert!(query.constraints.is_empty());
}

#[test]
fn test_wildcard_name() {
    let query = parse_query(r#"[name *= "Gatsby"]"#).unwrap();
    assert_eq!(query.name, None);
    assert_eq!(query.constraints.len(), 1);
}

#[test]
fn test_empty_payload_is_full_wildcard() {
    let query = parse_query("").unwrap();
    assert_eq!(query.name, None);
    assert!(query.constraints.is_empty());
}

#[test]
fn test_nested_component_name() {
    let query = parse_query("Ui::Button").unwrap();
    assert_eq!(query.name.as_deref(), Some("Ui::Button"));
}

#[test]
fn test_bare_clause_is_truthy() {
    let clause = parse_one_clause("ColorButton[disabled]");
    assert_eq!(clause.path.segments, vec!["disabled"]);
    assert_eq!(clause.test, AttributeTest::Truthy);
}

#[test]
fn test_dotted_path() {
    let clause = parse_one_clause("[nested.index = 0]");
    assert_eq!(clause.path.segments, vec!["nested", "index"]);
}

#[test]
fn test_all_operators() {
    let cases = [
        ("=", CompareOp::Equals),
        ("*=", CompareOp::Contains),
        ("^=", CompareOp::StartsWith),
        ("$=", CompareOp::EndsWith),
        ("|=", CompareOp::DashMatch),
        ("~=", CompareOp::TokenMatch),
    ];
    for (symbol, expected_op) in cases {
        let clause = parse_one_clause(&format!(r#"[color {symbol} "red"]"#));
        match clause.test {
            AttributeTest::Compare { op, .. } => assert_eq!(op, expected_op, "operator {symbol}"),
            other => panic!("expected comparison for {symbol}, got {other:?}"),
        }
    }
}

#[test]
fn test_case_flags() {
    let cases = [
        ("i", CaseMode::Insensitive),
        ("I", CaseMode::Insensitive),
        ("s", CaseMode::Sensitive),
        ("S", CaseMode::Sensitive),
    ];
    for (flag, expected_case) in cases {
        let clause = parse_one_clause(&format!(r#"[name = "gatsby" {flag}]"#));
        match clause.test {
            AttributeTest::Compare { case, .. } => assert_eq!(case, expected_case, "flag {flag}"),
            other => panic!("expected comparison for flag {flag}, got {other:?}"),
        }
    }

    // No flag defaults to case-sensitive.
    let clause = parse_one_clause(r#"[name = "gatsby"]"#);
    assert!(matches!(
        clause.test,
        AttributeTest::Compare {
            case: CaseMode::Sensitive,
            ..
        }
    ));
}

#[test]
fn test_string_literal_preserves_inner_whitespace() {
    let clause = parse_one_clause(r#"[name = "  The Great Gatsby  "]"#);
    match clause.test {
        AttributeTest::Compare { expected, .. } => {
            assert_eq!(expected, Literal::Str("  The Great Gatsby  ".to_string()));
        }
        other => panic!("expected comparison, got {other:?}"),
    }
}

#[test]
fn test_boolean_literals() {
    let clause = parse_one_clause("[disabled = true]");
    assert!(matches!(
        clause.test,
        AttributeTest::Compare {
            expected: Literal::Bool(true),
            ..
        }
    ));
    let clause = parse_one_clause("[disabled = false]");
    assert!(matches!(
        clause.test,
        AttributeTest::Compare {
            expected: Literal::Bool(false),
            ..
        }
    ));
}

#[test]
fn test_number_literals() {
    for (text, value) in [("6", 6.0), ("4.1", 4.1), ("-2.5", -2.5), ("0", 0.0)] {
        let clause = parse_one_clause(&format!("[nested.value = {text}]"));
        match clause.test {
            AttributeTest::Compare { expected, .. } => {
                assert_eq!(expected, Literal::Num(value), "literal {text}");
            }
            other => panic!("expected comparison for {text}, got {other:?}"),
        }
    }
}

#[test]
fn test_multiple_clauses() {
    let query = parse_query(r#"ColorButton[disabled = true][color = "red" i][nested.index =  6]"#)
        .unwrap();
    assert_eq!(query.name.as_deref(), Some("ColorButton"));
    assert_eq!(query.constraints.len(), 3);
}

#[test]
fn test_whitespace_is_insignificant_outside_quotes() {
    let padded = parse_query(r#"  ColorButton [disabled = true]  [color = "red"]  "#).unwrap();
    let tight = parse_query(r#"ColorButton[disabled=true][color="red"]"#).unwrap();
    assert_eq!(padded, tight);
}

#[test]
fn test_compact_clause_with_flag() {
    let clause = parse_one_clause(r#"[name~="gatsby"i]"#);
    assert!(matches!(
        clause.test,
        AttributeTest::Compare {
            op: CompareOp::TokenMatch,
            case: CaseMode::Insensitive,
            ..
        }
    ));
}

#[test]
fn test_rejects_unknown_operator() {
    assert!(matches!(
        parse_query(r#"[name != "x"]"#),
        Err(ParseError::Syntax(_))
    ));
}

#[test]
fn test_rejects_unknown_flag() {
    assert!(matches!(
        parse_query(r#"[name = "x" z]"#),
        Err(ParseError::Syntax(_))
    ));
}

#[test]
fn test_rejects_unclosed_bracket() {
    assert!(matches!(parse_query("[name"), Err(ParseError::Syntax(_))));
    assert!(matches!(
        parse_query(r#"[name = "x""#),
        Err(ParseError::Syntax(_))
    ));
}

#[test]
fn test_rejects_trailing_garbage_after_number() {
    assert!(matches!(
        parse_query("[nested.value = 4.1oops]"),
        Err(ParseError::Syntax(_))
    ));
}

#[test]
fn test_rejects_bare_word_value() {
    assert!(matches!(
        parse_query("[color = red]"),
        Err(ParseError::Syntax(_))
    ));
}

#[test]
fn test_rejects_missing_value() {
    assert!(matches!(parse_query("[color = ]"), Err(ParseError::Syntax(_))));
}

#[test]
fn test_rejects_empty_path_segment() {
    assert!(matches!(
        parse_query("[nested..index = 0]"),
        Err(ParseError::Syntax(_))
    ));
}

#[test]
fn test_rejects_trailing_garbage_after_query() {
    assert!(matches!(
        parse_query("ListItem extra"),
        Err(ParseError::Syntax(_))
    ));
}
