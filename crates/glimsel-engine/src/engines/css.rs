//! Minimal structural partner engine: one compound simple-selector (`tag`,
//! `#id`, `.class`, `[attr]`, `[attr=value]`, concatenated). No combinators
//! and no pseudo-classes; enough to scope a chained query to a mount point.

use super::{QueryScope, SelectorEngine};
use crate::dom::{DomElement, NodeId};
use crate::page::Page;
use crate::selectors::QueryError;

pub struct CssEngine;

impl SelectorEngine for CssEngine {
    fn tag(&self) -> &'static str {
        "css"
    }

    fn validate(&self, body: &str) -> Result<(), QueryError> {
        parse_compound(body).map(|_| ()).map_err(|reason| invalid(body, reason))
    }

    fn query_all(
        &self,
        page: &Page,
        scope: QueryScope,
        body: &str,
    ) -> Result<Vec<NodeId>, QueryError> {
        let compound = parse_compound(body).map_err(|reason| invalid(body, reason))?;
        let start = match scope {
            QueryScope::Document => page.dom().root(),
            QueryScope::Within(node) => node,
        };
        // querySelectorAll convention: the scope element itself is excluded.
        Ok(page
            .dom()
            .descendants(start)
            .into_iter()
            .filter(|&id| {
                page.dom()
                    .get(id)
                    .map(|el| compound.matches(el))
                    .unwrap_or(false)
            })
            .collect())
    }
}

fn invalid(body: &str, reason: String) -> QueryError {
    QueryError::InvalidSelector {
        engine: "css".to_string(),
        body: body.to_string(),
        reason,
    }
}

#[derive(Debug, Default)]
struct CompoundSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl CompoundSelector {
    fn matches(&self, el: &DomElement) -> bool {
        if let Some(tag) = &self.tag {
            if !el.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attributes.get("id") != Some(id) {
                return false;
            }
        }
        for class in &self.classes {
            let has_class = el
                .attributes
                .get("class")
                .map(|classes| classes.split_whitespace().any(|token| token == class))
                .unwrap_or(false);
            if !has_class {
                return false;
            }
        }
        for (name, expected) in &self.attrs {
            match (el.attributes.get(name), expected) {
                (Some(actual), Some(expected)) if actual == expected => {}
                (Some(_), None) => {}
                _ => return false,
            }
        }
        true
    }
}

fn parse_compound(body: &str) -> Result<CompoundSelector, String> {
    let body = body.trim();
    if body.is_empty() {
        return Err("empty selector".to_string());
    }

    let mut selector = CompoundSelector::default();
    let bytes = body.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'#' => {
                let (name, next) = read_ident(body, i + 1)?;
                selector.id = Some(name);
                i = next;
            }
            b'.' => {
                let (name, next) = read_ident(body, i + 1)?;
                selector.classes.push(name);
                i = next;
            }
            b'[' => {
                let close = body[i..]
                    .find(']')
                    .map(|offset| i + offset)
                    .ok_or_else(|| "unclosed attribute selector".to_string())?;
                let inner = &body[i + 1..close];
                let (name, value) = match inner.split_once('=') {
                    Some((n, v)) => (n.trim(), Some(v.trim().trim_matches('"').to_string())),
                    None => (inner.trim(), None),
                };
                if name.is_empty() {
                    return Err("empty attribute name".to_string());
                }
                selector.attrs.push((name.to_string(), value));
                i = close + 1;
            }
            b'*' if i == 0 => i += 1,
            _ if i == 0 => {
                let (name, next) = read_ident(body, 0)?;
                selector.tag = Some(name);
                i = next;
            }
            _ => return Err(format!("unsupported selector syntax at `{}`", &body[i..])),
        }
    }

    Ok(selector)
}

fn read_ident(body: &str, start: usize) -> Result<(String, usize), String> {
    let rest = &body[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(rest.len());
    if end == 0 {
        return Err(format!("expected identifier at offset {start}"));
    }
    Ok((rest[..end].to_string(), start + end))
}
