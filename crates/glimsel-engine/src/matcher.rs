//! Evaluation of parsed attribute constraints against component state.

use crate::component::ComponentNode;
use crate::resolve::{is_truthy, resolve_path, stringify};
use glimsel_parser::ast::{
    AttributeConstraint, AttributeTest, CaseMode, CompareOp, ComponentQuery, Literal,
};
use serde_json::Value;

/// Whether a component satisfies the whole query: the name filter plus every
/// attribute constraint.
pub fn query_matches(node: &ComponentNode, query: &ComponentQuery) -> bool {
    if let Some(name) = &query.name {
        if node.name != *name {
            return false;
        }
    }
    query
        .constraints
        .iter()
        .all(|constraint| constraint_matches(&node.args, constraint))
}

/// Whether one constraint holds against an argument bag. An unresolved path
/// fails the constraint, it never errors.
pub fn constraint_matches(bag: &Value, constraint: &AttributeConstraint) -> bool {
    let resolved = resolve_path(bag, &constraint.path);
    match &constraint.test {
        AttributeTest::Truthy => resolved.map(is_truthy).unwrap_or(false),
        AttributeTest::Compare { op, expected, case } => match resolved {
            Some(value) => compare(value, *op, expected, *case),
            None => false,
        },
    }
}

fn compare(value: &Value, op: CompareOp, expected: &Literal, case: CaseMode) -> bool {
    // Numbers and booleans compare by value and identity; everything else is
    // a text comparison on the stringified scalar.
    if op == CompareOp::Equals {
        match expected {
            Literal::Num(n) => return value.as_f64() == Some(*n),
            Literal::Bool(b) => return value.as_bool() == Some(*b),
            Literal::Str(_) => {}
        }
    }

    let Some(actual) = stringify(value) else {
        return false;
    };
    let (actual, expected) = fold_case(actual, expected_text(expected), case);

    match op {
        CompareOp::Equals => actual == expected,
        CompareOp::Contains => actual.contains(&expected),
        CompareOp::StartsWith => actual.starts_with(&expected),
        CompareOp::EndsWith => actual.ends_with(&expected),
        CompareOp::DashMatch => actual == expected || actual.starts_with(&format!("{expected}-")),
        CompareOp::TokenMatch => actual.split_whitespace().any(|token| token == expected),
    }
}

fn expected_text(expected: &Literal) -> String {
    match expected {
        Literal::Str(s) => s.clone(),
        Literal::Bool(b) => b.to_string(),
        Literal::Num(n) => {
            if n.fract() == 0.0 && n.is_finite() {
                format!("{}", *n as i64)
            } else {
                n.to_string()
            }
        }
    }
}

fn fold_case(actual: String, expected: String, case: CaseMode) -> (String, String) {
    match case {
        CaseMode::Sensitive => (actual, expected),
        CaseMode::Insensitive => (actual.to_lowercase(), expected.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimsel_parser::parse_query;
    use serde_json::json;

    fn holds(bag: &Value, payload: &str) -> bool {
        let query = parse_query(payload).expect("failed to parse payload");
        query
            .constraints
            .iter()
            .all(|constraint| constraint_matches(bag, constraint))
    }

    #[test]
    fn test_numeric_equality_is_exact() {
        let bag = json!({ "nested": { "value": 4.1 } });
        assert!(holds(&bag, "[nested.value = 4.1]"));
        assert!(!holds(&bag, "[nested.value = 4]"));
        assert!(!holds(&bag, "[nested.value = 4.10001]"));

        let bag = json!({ "nested": { "index": 6 } });
        assert!(holds(&bag, "[nested.index = 6]"));
        assert!(holds(&bag, "[nested.index = 6.0]"));
    }

    #[test]
    fn test_boolean_identity() {
        let bag = json!({ "disabled": true });
        assert!(holds(&bag, "[disabled = true]"));
        assert!(!holds(&bag, "[disabled = false]"));
        // A string "true" is not the boolean true.
        assert!(!holds(&json!({ "disabled": "true" }), "[disabled = true]"));
    }

    #[test]
    fn test_string_equality_and_case_flags() {
        let bag = json!({ "name": "The Great Gatsby" });
        assert!(holds(&bag, r#"[name = "The Great Gatsby"]"#));
        assert!(!holds(&bag, r#"[name = "the great gatsby"]"#));
        assert!(!holds(&bag, r#"[name = "the great gatsby" s]"#));
        assert!(holds(&bag, r#"[name = "the great gatsby" i]"#));
        assert!(holds(&bag, r#"[name = "THE GREAT GATSBY" I]"#));
    }

    #[test]
    fn test_whitespace_in_values_is_significant() {
        let bag = json!({ "name": "The Great Gatsby" });
        assert!(!holds(&bag, r#"[name = "  The Great Gatsby  "]"#));
    }

    #[test]
    fn test_substring_prefix_suffix() {
        let bag = json!({ "name": "The Great Gatsby" });
        assert!(holds(&bag, r#"[name *= "Gatsby"]"#));
        assert!(holds(&bag, r#"[name *= " gatsby" i]"#));
        assert!(!holds(&bag, r#"[name *= "gatsby"]"#));
        assert!(holds(&bag, r#"[name ^= "The"]"#));
        assert!(!holds(&bag, r#"[name ^= "Great"]"#));
        assert!(holds(&bag, r#"[name $= "Gatsby"]"#));
        assert!(!holds(&bag, r#"[name $= "Great"]"#));
    }

    #[test]
    fn test_dash_match() {
        assert!(holds(&json!({ "color": "red" }), r#"[color |= "red"]"#));
        assert!(holds(&json!({ "color": "red-dark" }), r#"[color |= "red"]"#));
        assert!(!holds(&json!({ "color": "redish" }), r#"[color |= "red"]"#));
        assert!(!holds(&json!({ "color": "dark-red" }), r#"[color |= "red"]"#));
    }

    #[test]
    fn test_token_match_is_not_substring() {
        let bag = json!({ "name": "The Great Gatsby" });
        // Token-list membership only: no substring fallback.
        assert!(!holds(&bag, r#"[name ~= "gatsby"]"#));
        assert!(holds(&bag, r#"[name ~= "gatsby" i]"#));
        assert!(holds(&bag, r#"[name ~= "Gatsby"]"#));
        assert!(!holds(&json!({ "color": "red" }), r#"[color ~= "e"]"#));
    }

    #[test]
    fn test_string_operators_stringify_scalars() {
        assert!(holds(&json!({ "disabled": true }), r#"[disabled = "true"]"#));
        assert!(holds(&json!({ "count": 6 }), r#"[count = "6"]"#));
        assert!(holds(&json!({ "count": 6 }), r#"[count ^= "6"]"#));
        // Containers have no text form.
        assert!(!holds(&json!({ "nested": { "a": 1 } }), r#"[nested = "a"]"#));
        assert!(!holds(&json!({ "items": [1, 2] }), r#"[items *= "1"]"#));
    }

    #[test]
    fn test_absent_paths_never_match() {
        let bag = json!({ "nested": { "index": 0 } });
        assert!(!holds(&bag, "[nested.nonexisting.index = 0]"));
        assert!(!holds(&bag, "[nested.index.nonexisting = 0]"));
        assert!(!holds(&bag, "[missing]"));
        assert!(!holds(&bag, r#"[missing *= ""]"#));
    }

    #[test]
    fn test_truthy_constraints() {
        assert!(holds(&json!({ "disabled": true }), "[disabled]"));
        assert!(!holds(&json!({ "disabled": false }), "[disabled]"));
        assert!(!holds(&json!({ "disabled": 0 }), "[disabled]"));
        assert!(!holds(&json!({ "disabled": "" }), "[disabled]"));
        assert!(!holds(&json!({ "disabled": null }), "[disabled]"));
        assert!(holds(&json!({ "disabled": "yes" }), "[disabled]"));
    }

    #[test]
    fn test_name_filter_is_exact_and_case_sensitive() {
        let node = ComponentNode::new("ListItem").with_args(json!({}));
        let matches_name = |payload: &str| {
            let query = parse_query(payload).expect("failed to parse payload");
            query_matches(&node, &query)
        };
        assert!(matches_name("ListItem"));
        assert!(!matches_name("listitem"));
        assert!(!matches_name("ListIte"));
        assert!(!matches_name("ListItems"));
        assert!(matches_name(""));
    }
}
