use super::ast::*;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "selector.pest"]
pub struct QueryParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("selector syntax error: {0}")]
    Syntax(#[from] pest::error::Error<Rule>),
    #[error("invalid number `{literal}`: {source}")]
    InvalidNumber {
        literal: String,
        source: std::num::ParseFloatError,
    },
    #[error("unexpected rule: {0:?}")]
    UnexpectedRule(Rule),
}

/// Parse one engine payload into a [`ComponentQuery`].
///
/// The empty payload is the fully wildcard query: no name filter and no
/// constraints.
pub fn parse_query(input: &str) -> Result<ComponentQuery, ParseError> {
    let mut pairs = QueryParser::parse(Rule::component_query, input)?;
    let mut query = ComponentQuery {
        name: None,
        constraints: Vec::new(),
    };

    if let Some(pair) = pairs.next() {
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::component_name => query.name = Some(inner.as_str().to_string()),
                Rule::clause => query.constraints.push(parse_clause(inner)?),
                Rule::EOI => {}
                rule => return Err(ParseError::UnexpectedRule(rule)),
            }
        }
    }

    Ok(query)
}

fn parse_clause(pair: Pair<Rule>) -> Result<AttributeConstraint, ParseError> {
    let mut path = AttributePath {
        segments: Vec::new(),
    };
    let mut test = AttributeTest::Truthy;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::attr_path => {
                path.segments = inner
                    .into_inner()
                    .map(|segment| segment.as_str().to_string())
                    .collect();
            }
            Rule::comparison => test = parse_comparison(inner)?,
            rule => return Err(ParseError::UnexpectedRule(rule)),
        }
    }

    Ok(AttributeConstraint { path, test })
}

fn parse_comparison(pair: Pair<Rule>) -> Result<AttributeTest, ParseError> {
    let mut op = None;
    let mut expected = None;
    let mut case = CaseMode::Sensitive;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::op => op = Some(parse_op(inner.as_str())?),
            Rule::literal => expected = Some(parse_literal(inner)?),
            Rule::case_flag => {
                case = match inner.as_str() {
                    "i" | "I" => CaseMode::Insensitive,
                    _ => CaseMode::Sensitive,
                };
            }
            rule => return Err(ParseError::UnexpectedRule(rule)),
        }
    }

    match (op, expected) {
        (Some(op), Some(expected)) => Ok(AttributeTest::Compare { op, expected, case }),
        _ => Err(ParseError::UnexpectedRule(Rule::comparison)),
    }
}

fn parse_op(text: &str) -> Result<CompareOp, ParseError> {
    match text {
        "=" => Ok(CompareOp::Equals),
        "*=" => Ok(CompareOp::Contains),
        "^=" => Ok(CompareOp::StartsWith),
        "$=" => Ok(CompareOp::EndsWith),
        "|=" => Ok(CompareOp::DashMatch),
        "~=" => Ok(CompareOp::TokenMatch),
        _ => Err(ParseError::UnexpectedRule(Rule::op)),
    }
}

fn parse_literal(pair: Pair<Rule>) -> Result<Literal, ParseError> {
    let Some(inner) = pair.into_inner().next() else {
        return Err(ParseError::UnexpectedRule(Rule::literal));
    };

    match inner.as_rule() {
        Rule::string => Ok(Literal::Str(
            inner
                .into_inner()
                .next()
                .map(|content| content.as_str().to_string())
                .unwrap_or_default(),
        )),
        Rule::boolean => Ok(Literal::Bool(inner.as_str() == "true")),
        Rule::number => {
            let text = inner.as_str();
            text.parse::<f64>()
                .map(Literal::Num)
                .map_err(|source| ParseError::InvalidNumber {
                    literal: text.to_string(),
                    source,
                })
        }
        rule => Err(ParseError::UnexpectedRule(rule)),
    }
}
