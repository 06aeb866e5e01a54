//! Selector engines and the scope they evaluate in.

pub mod css;
pub mod ember;
pub mod text;

pub use css::CssEngine;
pub use ember::EmberEngine;
pub use text::TextEngine;

use crate::dom::NodeId;
use crate::page::Page;
use crate::selectors::QueryError;

/// Where an engine evaluation looks for matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryScope {
    /// The whole document, every mounted root included.
    Document,
    /// The subtree of one element, as produced by a piercing-combinator stage.
    Within(NodeId),
}

/// A selector engine addressable by tag in a chained selector.
pub trait SelectorEngine {
    /// Tag identifying this engine in `tag=payload` segments.
    fn tag(&self) -> &'static str;

    /// Check a payload without evaluating it. Called for every segment of a
    /// chain before the first stage runs, so a malformed later stage fails
    /// before any tree walk.
    fn validate(&self, _body: &str) -> Result<(), QueryError> {
        Ok(())
    }

    /// Every element matching `body` inside `scope`, in first-encounter order
    /// with duplicates removed.
    fn query_all(
        &self,
        page: &Page,
        scope: QueryScope,
        body: &str,
    ) -> Result<Vec<NodeId>, QueryError>;
}
