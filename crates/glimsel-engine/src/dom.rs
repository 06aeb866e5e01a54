//! Arena-backed DOM snapshot consumed by the selector engines.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Handle to an element inside a [`DomTree`].
pub type NodeId = usize;

/// One element of a rendered page snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomElement {
    pub tag: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Text carried directly by this element, not by its descendants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
}

/// A DOM snapshot with a single document root. Element handles are only
/// meaningful for the tree that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomTree {
    nodes: Vec<DomElement>,
}

impl DomTree {
    /// A snapshot containing only the document root (`body`).
    pub fn new() -> Self {
        Self {
            nodes: vec![DomElement {
                tag: "body".to_string(),
                attributes: HashMap::new(),
                text: None,
                children: Vec::new(),
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, node: NodeId) -> Option<&DomElement> {
        self.nodes.get(node)
    }

    /// Append a new element under `parent` and return its handle.
    pub fn append_child(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        debug_assert!(parent < self.nodes.len(), "parent must belong to this tree");
        let id = self.nodes.len();
        self.nodes.push(DomElement {
            tag: tag.into(),
            attributes: HashMap::new(),
            text: None,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.nodes[node].attributes.insert(name.into(), value.into());
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.nodes[node].text = Some(text.into());
    }

    /// Whether `node` lies in the subtree rooted at `ancestor`, the root
    /// itself included.
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|el| el.parent);
        }
        false
    }

    /// All elements below `node` in depth-first pre-order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.get(node) {
            Some(el) => el.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(el) = self.get(id) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    /// Concatenated text of `node` and its descendants in document order.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let Some(el) = self.get(node) {
            if let Some(text) = &el.text {
                out.push_str(text);
            }
            for &child in &el.children {
                self.collect_text(child, out);
            }
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
