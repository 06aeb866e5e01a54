//! Component trees and the registry of mounted application roots.

use crate::dom::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node in a mounted application's component tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Framework-assigned component name, independent of any DOM tag.
    pub name: String,
    /// Bound arguments and properties, arbitrarily nested.
    #[serde(default)]
    pub args: Value,
    /// The DOM element this component renders into. Logical-only components
    /// carry `None` and contribute no element to query results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<NodeId>,
    #[serde(default)]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Value::Null,
            element: None,
            children: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Value) -> Self {
        self.args = args;
        self
    }

    pub fn with_element(mut self, element: NodeId) -> Self {
        self.element = Some(element);
        self
    }

    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }
}

/// One mounted application: a component tree anchored at a DOM mount point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRoot {
    pub mount: NodeId,
    pub tree: ComponentNode,
}

/// The set of currently mounted application roots, in registration order.
///
/// Queries enumerate whatever the registry holds at evaluation time; there is
/// no process-wide registry anywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootRegistry {
    roots: Vec<AppRoot>,
}

impl RootRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fully built root. The tree is attached in one step, so a
    /// concurrent query sees it whole or not at all.
    pub fn register(&mut self, root: AppRoot) {
        tracing::debug!("registering application root at element {}", root.mount);
        self.roots.push(root);
    }

    pub fn unregister(&mut self, mount: NodeId) -> Option<AppRoot> {
        let idx = self.roots.iter().position(|root| root.mount == mount)?;
        tracing::debug!("unregistering application root at element {}", mount);
        Some(self.roots.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppRoot> {
        self.roots.iter()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
