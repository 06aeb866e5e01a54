//! Component selector evaluation over page snapshots.
//!
//! A [`Selectors`] registry dispatches chained selectors (`A >> B`) to
//! engines by tag. The `_ember` engine matches components of mounted
//! application roots by name and argument constraints and yields the DOM
//! elements they render into; the minimal `css` and `text` engines exist as
//! composition partners for scoping and text lookup.

pub mod component;
pub mod dom;
pub mod engines;
pub mod matcher;
pub mod page;
pub mod resolve;
pub mod selectors;

pub use component::{AppRoot, ComponentNode, RootRegistry};
pub use dom::{DomElement, DomTree, NodeId};
pub use engines::{CssEngine, EmberEngine, QueryScope, SelectorEngine, TextEngine};
pub use page::Page;
pub use selectors::{QueryError, Selectors};

pub use glimsel_parser as parser;
