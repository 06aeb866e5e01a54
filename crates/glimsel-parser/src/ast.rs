use serde::{Deserialize, Serialize};

/// A parsed component query: an optional component name plus the attribute
/// clauses that must all hold for a component to match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentQuery {
    /// `None` matches any component name (wildcard payloads like `[disabled]`).
    pub name: Option<String>,
    pub constraints: Vec<AttributeConstraint>,
}

/// One bracketed clause of a component query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeConstraint {
    pub path: AttributePath,
    pub test: AttributeTest,
}

/// Dot-separated path into a component's argument bag (`nested.index`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributePath {
    pub segments: Vec<String>,
}

/// What a clause checks once its path is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeTest {
    /// Bare clause (`[disabled]`): the value is present and truthy.
    Truthy,
    /// Operator clause (`[color = "red" i]`).
    Compare {
        op: CompareOp,
        expected: Literal,
        case: CaseMode,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    /// `=`
    Equals,
    /// `*=`
    Contains,
    /// `^=`
    StartsWith,
    /// `$=`
    EndsWith,
    /// `|=`: exact match or a `value-` hyphenated prefix.
    DashMatch,
    /// `~=`: exact membership in a whitespace-delimited token list.
    TokenMatch,
}

/// Case handling for text comparisons. Sensitive unless the `i` flag is given;
/// the `s` flag restates the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseMode {
    #[default]
    Sensitive,
    Insensitive,
}

/// Expected value of an operator clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Str(String),
    Num(f64),
    Bool(bool),
}

/// One engine-tagged stage of a chained selector (`tag=payload`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSegment {
    pub engine: String,
    pub body: String,
}

/// A selector split on the `>>` piercing combinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorChain {
    pub segments: Vec<ChainSegment>,
}
