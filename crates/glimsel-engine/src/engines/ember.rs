//! The component selector engine: matches framework components by name and
//! argument constraints, yielding the DOM elements they render into.

use std::collections::HashSet;

use glimsel_parser::ast::ComponentQuery;
use glimsel_parser::parse_query;

use super::{QueryScope, SelectorEngine};
use crate::component::ComponentNode;
use crate::dom::NodeId;
use crate::matcher::query_matches;
use crate::page::Page;
use crate::selectors::QueryError;

pub struct EmberEngine;

impl SelectorEngine for EmberEngine {
    fn tag(&self) -> &'static str {
        "_ember"
    }

    fn validate(&self, body: &str) -> Result<(), QueryError> {
        parse_query(body)?;
        Ok(())
    }

    fn query_all(
        &self,
        page: &Page,
        scope: QueryScope,
        body: &str,
    ) -> Result<Vec<NodeId>, QueryError> {
        let query = parse_query(body)?;
        let mut matched = Vec::new();
        let mut seen = HashSet::new();
        for root in page.roots().iter() {
            collect(page, &root.tree, &query, scope, &mut matched, &mut seen);
        }
        tracing::debug!("component query `{}` matched {} elements", body, matched.len());
        Ok(matched)
    }
}

/// Depth-first pre-order walk of one component tree. A node failing the query
/// does not prune its children; each is tested independently.
fn collect(
    page: &Page,
    node: &ComponentNode,
    query: &ComponentQuery,
    scope: QueryScope,
    matched: &mut Vec<NodeId>,
    seen: &mut HashSet<NodeId>,
) {
    if query_matches(node, query) {
        if let Some(element) = node.element {
            if in_scope(page, scope, element) && seen.insert(element) {
                matched.push(element);
            }
        }
    }
    for child in &node.children {
        collect(page, child, query, scope, matched, seen);
    }
}

fn in_scope(page: &Page, scope: QueryScope, element: NodeId) -> bool {
    match scope {
        QueryScope::Document => true,
        // The component-tree region anchored at the scope element belongs to
        // that scope, so containment is subtree-or-self.
        QueryScope::Within(root) => page.dom().is_within(element, root),
    }
}
