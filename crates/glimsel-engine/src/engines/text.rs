//! Text-content partner engine. `text=needle` matches the innermost elements
//! whose text contains the needle, case-insensitively with whitespace
//! normalized; `text="needle"` requires the exact trimmed text,
//! case-sensitively.

use super::{QueryScope, SelectorEngine};
use crate::dom::{DomTree, NodeId};
use crate::page::Page;
use crate::selectors::QueryError;

pub struct TextEngine;

enum TextPredicate {
    Substring(String),
    Exact(String),
}

impl SelectorEngine for TextEngine {
    fn tag(&self) -> &'static str {
        "text"
    }

    fn validate(&self, body: &str) -> Result<(), QueryError> {
        parse_predicate(body).map(|_| ())
    }

    fn query_all(
        &self,
        page: &Page,
        scope: QueryScope,
        body: &str,
    ) -> Result<Vec<NodeId>, QueryError> {
        let predicate = parse_predicate(body)?;
        let start = match scope {
            QueryScope::Document => page.dom().root(),
            QueryScope::Within(node) => node,
        };
        let dom = page.dom();
        // The scope element itself is a candidate: a scoped stage may land on
        // the very element that carries the text.
        let mut candidates = vec![start];
        candidates.extend(dom.descendants(start));
        Ok(candidates
            .into_iter()
            .filter(|&id| matches_text(dom, id, &predicate) && is_innermost(dom, id, &predicate))
            .collect())
    }
}

fn parse_predicate(body: &str) -> Result<TextPredicate, QueryError> {
    let body = body.trim();
    let predicate = if body.len() >= 2 && body.starts_with('"') && body.ends_with('"') {
        TextPredicate::Exact(body[1..body.len() - 1].to_string())
    } else {
        TextPredicate::Substring(normalize_text(body))
    };
    let empty = match &predicate {
        TextPredicate::Exact(needle) | TextPredicate::Substring(needle) => needle.is_empty(),
    };
    if empty {
        return Err(QueryError::InvalidSelector {
            engine: "text".to_string(),
            body: body.to_string(),
            reason: "empty text needle".to_string(),
        });
    }
    Ok(predicate)
}

fn matches_text(dom: &DomTree, id: NodeId, predicate: &TextPredicate) -> bool {
    let content = dom.text_content(id);
    match predicate {
        TextPredicate::Exact(needle) => content.trim() == needle,
        TextPredicate::Substring(needle) => normalize_text(&content).contains(needle),
    }
}

/// Innermost match: no child subtree matches on its own.
fn is_innermost(dom: &DomTree, id: NodeId, predicate: &TextPredicate) -> bool {
    match dom.get(id) {
        Some(el) => !el
            .children
            .iter()
            .any(|&child| matches_text(dom, child, predicate)),
        None => false,
    }
}

fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
