use crate::ast::{ChainSegment, SelectorChain};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("empty selector segment")]
    Empty,
    #[error("selector segment `{0}` has no engine tag")]
    MissingEngineTag(String),
    #[error("invalid engine tag `{0}`")]
    InvalidEngineTag(String),
}

/// Split a chained selector on the `>>` piercing combinator and tag each
/// segment with its engine. A `>>` inside a double-quoted value does not
/// split. Segment payloads are passed through verbatim, trimmed.
pub fn parse_chain(selector: &str) -> Result<SelectorChain, ChainError> {
    let mut segments = Vec::new();
    for raw in split_on_combinator(selector) {
        segments.push(parse_segment(raw.trim())?);
    }
    Ok(SelectorChain { segments })
}

fn parse_segment(raw: &str) -> Result<ChainSegment, ChainError> {
    if raw.is_empty() {
        return Err(ChainError::Empty);
    }
    let Some(eq) = raw.find('=') else {
        return Err(ChainError::MissingEngineTag(raw.to_string()));
    };
    let tag = raw[..eq].trim();
    if !is_valid_tag(tag) {
        return Err(ChainError::InvalidEngineTag(tag.to_string()));
    }
    Ok(ChainSegment {
        engine: tag.to_string(),
        body: raw[eq + 1..].trim().to_string(),
    })
}

fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn split_on_combinator(selector: &str) -> Vec<&str> {
    let bytes = selector.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quote = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        if escaped {
            escaped = false;
            i += 1;
            continue;
        }
        match bytes[i] {
            b'\\' if in_quote => escaped = true,
            b'"' => in_quote = !in_quote,
            b'>' if !in_quote && bytes.get(i + 1) == Some(&b'>') => {
                parts.push(&selector[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&selector[start..]);
    parts
}
