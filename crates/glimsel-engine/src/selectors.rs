//! Engine registry, chained-selector evaluation, and the host-facing API.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use glimsel_parser::chain::{parse_chain, ChainError};
use glimsel_parser::ParseError;

use crate::dom::NodeId;
use crate::engines::{CssEngine, EmberEngine, QueryScope, SelectorEngine, TextEngine};
use crate::page::Page;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("selector parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("selector chain error: {0}")]
    Chain(#[from] ChainError),
    #[error("unknown selector engine `{0}`")]
    UnknownEngine(String),
    #[error("invalid `{engine}` selector `{body}`: {reason}")]
    InvalidSelector {
        engine: String,
        body: String,
        reason: String,
    },
    #[error("no element matches `{0}`")]
    NoMatch(String),
    #[error("`{query}` is ambiguous: {count} elements match")]
    AmbiguousMatch { query: String, count: usize },
}

/// Registry of selector engines, dispatching chained queries by engine tag.
///
/// Every evaluation parses the selector afresh and reads the page's current
/// root registry; nothing is cached between calls.
pub struct Selectors {
    engines: HashMap<String, Box<dyn SelectorEngine>>,
}

impl Selectors {
    /// A registry with the built-in engines (`_ember`, `css`, `text`).
    pub fn new() -> Self {
        let mut selectors = Self::empty();
        selectors.register(Box::new(EmberEngine));
        selectors.register(Box::new(CssEngine));
        selectors.register(Box::new(TextEngine));
        selectors
    }

    /// A registry with no engines, for hosts wiring a custom set.
    pub fn empty() -> Self {
        Self {
            engines: HashMap::new(),
        }
    }

    /// Add an engine, replacing any previous engine with the same tag.
    pub fn register(&mut self, engine: Box<dyn SelectorEngine>) {
        self.engines.insert(engine.tag().to_string(), engine);
    }

    /// All elements matching a chained selector, in first-encounter order.
    pub fn find_all(&self, page: &Page, selector: &str) -> Result<Vec<NodeId>, QueryError> {
        self.find_all_within(page, QueryScope::Document, selector)
    }

    /// Like [`Selectors::find_all`] with the first stage confined to `scope`.
    pub fn find_all_within(
        &self,
        page: &Page,
        scope: QueryScope,
        selector: &str,
    ) -> Result<Vec<NodeId>, QueryError> {
        tracing::debug!("evaluating selector `{}`", selector);
        let chain = parse_chain(selector)?;

        // Resolve engines and check every payload up front, so a malformed
        // later stage aborts before any tree walk.
        let mut stages = Vec::with_capacity(chain.segments.len());
        for segment in &chain.segments {
            let engine = self
                .engines
                .get(&segment.engine)
                .ok_or_else(|| QueryError::UnknownEngine(segment.engine.clone()))?;
            engine.validate(&segment.body)?;
            stages.push((engine, segment));
        }

        let mut scopes = vec![scope];
        let mut matched: Vec<NodeId> = Vec::new();
        for (engine, segment) in stages {
            matched.clear();
            let mut seen = HashSet::new();
            for &stage_scope in &scopes {
                for element in engine.query_all(page, stage_scope, &segment.body)? {
                    if seen.insert(element) {
                        matched.push(element);
                    }
                }
            }
            if matched.is_empty() {
                // An empty stage short-circuits the whole chain.
                return Ok(Vec::new());
            }
            scopes = matched.iter().map(|&el| QueryScope::Within(el)).collect();
        }
        Ok(matched)
    }

    /// The first match in traversal order, or `None`.
    pub fn find_first(&self, page: &Page, selector: &str) -> Result<Option<NodeId>, QueryError> {
        Ok(self.find_all(page, selector)?.into_iter().next())
    }

    /// Exactly-one semantics: zero matches and multiple matches are both
    /// errors.
    pub fn find_one(&self, page: &Page, selector: &str) -> Result<NodeId, QueryError> {
        let matched = self.find_all(page, selector)?;
        match matched.len() {
            0 => Err(QueryError::NoMatch(selector.to_string())),
            1 => Ok(matched[0]),
            count => Err(QueryError::AmbiguousMatch {
                query: selector.to_string(),
                count,
            }),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self::new()
    }
}
