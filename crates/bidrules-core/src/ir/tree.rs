//! Decision tree nodes

use crate::function::{ResultFunction, SchemaFunction};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Condition value matching any outcome that has no exact edge
pub const WILDCARD: &str = "*";

/// A decision tree node
///
/// Internal nodes carry exactly one schema function and at least one child;
/// leaves carry the result functions of the rule that ends there. Children
/// are kept ordered so two compilations of the same config compare equal.
#[derive(Debug, Default)]
pub struct Node {
    schema_function: Option<Arc<dyn SchemaFunction>>,
    children: BTreeMap<String, Node>,
    result_functions: Vec<Arc<dyn ResultFunction>>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn schema_function(&self) -> Option<&Arc<dyn SchemaFunction>> {
        self.schema_function.as_ref()
    }

    pub fn set_schema_function(&mut self, function: Arc<dyn SchemaFunction>) {
        self.schema_function = Some(function);
    }

    pub fn children(&self) -> &BTreeMap<String, Node> {
        &self.children
    }

    pub fn result_functions(&self) -> &[Arc<dyn ResultFunction>] {
        &self.result_functions
    }

    pub fn set_result_functions(&mut self, functions: Vec<Arc<dyn ResultFunction>>) {
        self.result_functions = functions;
    }

    /// Child for `condition`, created empty if absent
    pub fn child_or_insert(&mut self, condition: &str) -> &mut Node {
        self.children.entry(condition.to_string()).or_default()
    }

    /// Edge to follow for `outcome`: the exact child first, then the wildcard.
    /// Returns the matched edge label together with the child.
    pub fn child(&self, outcome: &str) -> Option<(&str, &Node)> {
        self.children
            .get_key_value(outcome)
            .or_else(|| self.children.get_key_value(WILDCARD))
            .map(|(label, node)| (label.as_str(), node))
    }
}

/// A compiled decision tree
#[derive(Debug, Default)]
pub struct Tree {
    root: Node,
}

impl Tree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Edge labels from root to every leaf, in key order
    pub fn leaf_paths(&self) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        collect_paths(&self.root, &mut current, &mut paths);
        paths
    }
}

fn collect_paths(node: &Node, current: &mut Vec<String>, paths: &mut Vec<Vec<String>>) {
    if node.is_leaf() {
        paths.push(current.clone());
        return;
    }
    for (label, child) in &node.children {
        current.push(label.clone());
        collect_paths(child, current, paths);
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_prefers_exact_match() {
        let mut root = Node::new();
        root.child_or_insert("amp");
        root.child_or_insert(WILDCARD);

        let (label, _) = root.child("amp").unwrap();
        assert_eq!(label, "amp");

        let (label, _) = root.child("web").unwrap();
        assert_eq!(label, WILDCARD);
    }

    #[test]
    fn test_child_without_wildcard() {
        let mut root = Node::new();
        root.child_or_insert("true");

        assert!(root.child("true").is_some());
        assert!(root.child("false").is_none());
    }

    #[test]
    fn test_leaf_paths() {
        let mut root = Node::new();
        root.child_or_insert("true").child_or_insert("web");
        root.child_or_insert("true").child_or_insert("amp");
        root.child_or_insert("false").child_or_insert(WILDCARD);

        let tree = Tree::new(root);
        assert_eq!(
            tree.leaf_paths(),
            vec![
                vec!["false".to_string(), "*".to_string()],
                vec!["true".to_string(), "amp".to_string()],
                vec!["true".to_string(), "web".to_string()],
            ]
        );
    }

    #[test]
    fn test_empty_tree_has_single_empty_path() {
        let tree = Tree::default();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.leaf_paths(), vec![Vec::<String>::new()]);
    }
}
