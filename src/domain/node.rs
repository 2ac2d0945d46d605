//! Tree nodes: the parsed shape of a wizard definition
//!
//! A wizard file is held as a tree of maps, sequences and scalar leaves.
//! Map children are kept in a `BTreeMap`, so every walk over the tree
//! visits keys in ascending order and is reproducible for identical input.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Number, Value};

/// Leaf value of a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl Scalar {
    /// Text to embed in generated output.
    ///
    /// Strings are returned verbatim, other scalars as their JSON text.
    pub fn as_text(&self) -> String {
        match self {
            Scalar::String(s) => s.clone(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Null => "null".to_string(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// One node of hierarchical data.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Map(BTreeMap<String, TreeNode>),
    Sequence(Vec<TreeNode>),
    Scalar(Scalar),
}

impl From<Value> for TreeNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => TreeNode::Map(
                map.into_iter()
                    .map(|(k, v)| (k, TreeNode::from(v)))
                    .collect(),
            ),
            Value::Array(items) => TreeNode::Sequence(items.into_iter().map(TreeNode::from).collect()),
            Value::String(s) => TreeNode::Scalar(Scalar::String(s)),
            Value::Number(n) => TreeNode::Scalar(Scalar::Number(n)),
            Value::Bool(b) => TreeNode::Scalar(Scalar::Bool(b)),
            Value::Null => TreeNode::Scalar(Scalar::Null),
        }
    }
}

impl From<&str> for TreeNode {
    fn from(s: &str) -> Self {
        TreeNode::Scalar(Scalar::String(s.to_string()))
    }
}

impl TreeNode {
    /// Parse JSON text into a tree.
    ///
    /// Any JSON value is accepted at the top level.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(content)?;
        Ok(TreeNode::from(value))
    }

    /// Walk every leaf, starting from the root with the empty key.
    pub fn traverse(&self) -> Traverse<'_> {
        self.traverse_from("")
    }

    /// Walk every leaf, starting with `key` as the key this node was reached by.
    ///
    /// Maps pass each child's key down in ascending order, sequences pass the
    /// empty key to every element in original order, and each scalar yields
    /// exactly one `(key, scalar)` pair.
    pub fn traverse_from<'a>(&'a self, key: &'a str) -> Traverse<'a> {
        Traverse {
            stack: vec![(key, self)],
        }
    }

    /// Leaves whose key satisfies `predicate`, in traversal order.
    pub fn extract_matching<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = (&'a str, &'a Scalar)>
    where
        P: Fn(&str) -> bool + 'a,
    {
        self.traverse().filter(move |&(key, _)| predicate(key))
    }

    /// Number of scalar leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.traverse().count()
    }
}

/// Lazy depth-first iterator over the leaves of a [`TreeNode`].
///
/// Children are pushed in reverse so that popping restores their natural
/// order: sorted keys for maps, original order for sequences.
#[derive(Debug)]
pub struct Traverse<'a> {
    stack: Vec<(&'a str, &'a TreeNode)>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = (&'a str, &'a Scalar);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((key, node)) = self.stack.pop() {
            match node {
                TreeNode::Scalar(scalar) => return Some((key, scalar)),
                TreeNode::Map(children) => {
                    for (child_key, child) in children.iter().rev() {
                        self.stack.push((child_key.as_str(), child));
                    }
                }
                TreeNode::Sequence(items) => {
                    for item in items.iter().rev() {
                        self.stack.push(("", item));
                    }
                }
            }
        }
        None
    }
}
