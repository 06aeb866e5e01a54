use crate::component::{AppRoot, ComponentNode, RootRegistry};
use crate::dom::{DomTree, NodeId};
use serde::{Deserialize, Serialize};

/// A page snapshot: one DOM tree plus every mounted application root.
///
/// Queries borrow the page immutably and read the registry as it stands at
/// evaluation time. Mounting takes `&mut self`, so an evaluation observes a
/// root fully attached or not at all; the host is expected to hand the engine
/// a consistent snapshot for the duration of one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    dom: DomTree,
    registry: RootRegistry,
}

impl Page {
    pub fn new(dom: DomTree) -> Self {
        Self {
            dom,
            registry: RootRegistry::new(),
        }
    }

    pub fn dom(&self) -> &DomTree {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut DomTree {
        &mut self.dom
    }

    /// Mount an application: attach a fully built component tree at a DOM
    /// mount point and make it visible to subsequent queries.
    pub fn mount(&mut self, mount: NodeId, tree: ComponentNode) {
        self.registry.register(AppRoot { mount, tree });
    }

    pub fn unmount(&mut self, mount: NodeId) -> Option<ComponentNode> {
        self.registry.unregister(mount).map(|root| root.tree)
    }

    pub fn roots(&self) -> &RootRegistry {
        &self.registry
    }
}
