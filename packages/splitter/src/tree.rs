use crate::component::ComponentDefinition;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTreeNode {
    pub child_ids: Vec<String>,
    /// Other components sharing this component's parent
    pub siblings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEdge {
    pub from: String,
    pub to: String,
}

/// Parent/child relation between extracted components. Always acyclic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTree {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    pub nodes: IndexMap<String, ComponentTreeNode>,
    pub edges: Vec<ComponentEdge>,
}

impl ComponentTree {
    /// Build the tree from each definition's declared children. Edges that
    /// would close a cycle, give a component a second parent or point at an
    /// unknown id are skipped and reported in the returned warnings.
    pub fn build(components: &[ComponentDefinition]) -> (Self, Vec<String>) {
        let mut tree = ComponentTree::default();
        let mut warnings = Vec::new();

        for component in components {
            tree.nodes
                .insert(component.id.clone(), ComponentTreeNode::default());
        }

        for component in components {
            for child in &component.children {
                let Some(child_node) = tree.nodes.get(child) else {
                    warnings.push(format!(
                        "Component {} declares unknown child {}",
                        component.id, child
                    ));
                    continue;
                };
                if child_node.parent_id.is_some() {
                    warnings.push(format!(
                        "Component {} already has a parent, skipping edge from {}",
                        child, component.id
                    ));
                    continue;
                }
                if child == &component.id || tree.is_ancestor(child, &component.id) {
                    tracing::warn!(from = %component.id, to = %child, "skipping cyclic component edge");
                    warnings.push(format!(
                        "Skipping cyclic edge {} -> {}",
                        component.id, child
                    ));
                    continue;
                }

                tree.edges.push(ComponentEdge {
                    from: component.id.clone(),
                    to: child.clone(),
                });
                if let Some(parent) = tree.nodes.get_mut(&component.id) {
                    parent.child_ids.push(child.clone());
                }
                if let Some(child_node) = tree.nodes.get_mut(child) {
                    child_node.parent_id = Some(component.id.clone());
                }
            }
        }

        tree.fill_siblings();
        tree.root = Self::pick_root(components, &tree);
        (tree, warnings)
    }

    /// Shallowest definition without a parent, else the first definition
    fn pick_root(components: &[ComponentDefinition], tree: &ComponentTree) -> Option<String> {
        components
            .iter()
            .filter(|c| {
                tree.nodes
                    .get(&c.id)
                    .is_some_and(|node| node.parent_id.is_none())
            })
            .min_by_key(|c| c.depth)
            .or_else(|| components.first())
            .map(|c| c.id.clone())
    }

    fn fill_siblings(&mut self) {
        let ids: Vec<String> = self.nodes.keys().cloned().collect();
        for id in &ids {
            let parent = self.nodes.get(id).and_then(|node| node.parent_id.clone());
            let siblings: Vec<String> = ids
                .iter()
                .filter(|other| *other != id)
                .filter(|other| {
                    self.nodes
                        .get(*other)
                        .is_some_and(|node| node.parent_id == parent)
                })
                .cloned()
                .collect();
            if let Some(node) = self.nodes.get_mut(id) {
                node.siblings = siblings;
            }
        }
    }

    /// Whether `ancestor` is reachable from `id` by following parent links
    pub fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        let mut current = self.nodes.get(id).and_then(|node| node.parent_id.as_deref());
        let mut steps = 0;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                break;
            }
            current = self.nodes.get(parent).and_then(|node| node.parent_id.as_deref());
        }
        false
    }

    pub fn children_of(&self, id: &str) -> &[String] {
        self.nodes
            .get(id)
            .map(|node| node.child_ids.as_slice())
            .unwrap_or_default()
    }

    /// Component ids from the root down, parents before children
    pub fn walk(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack: Vec<String> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.parent_id.is_none())
            .map(|(id, _)| id.clone())
            .rev()
            .collect();
        while let Some(id) = stack.pop() {
            for child in self.children_of(&id).iter().rev() {
                stack.push(child.clone());
            }
            out.push(id);
        }
        out
    }
}
