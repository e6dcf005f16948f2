//! Index over a set of already-fetched nodes.
//!
//! All traversals are iterative and carry a visited flag per slot, so a
//! parent cycle in persisted data can neither loop forever nor exhaust the
//! stack.

use std::collections::HashMap;

use crate::error::{TreeError, TreeResult};
use crate::tree::node::Node;
use crate::types::NodeView;

/// Adds sizes without wrapping; `owner` names the folder in the error.
fn checked_total<I: IntoIterator<Item = i64>>(sizes: I, owner: &str) -> TreeResult<i64> {
    sizes
        .into_iter()
        .try_fold(0i64, |acc, size| acc.checked_add(size))
        .ok_or_else(|| TreeError::Corrupt(format!("size of folder '{}' exceeds {}", owner, i64::MAX)))
}

pub struct NodeArena {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    children: Vec<Vec<usize>>,
}

impl NodeArena {
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let index: HashMap<String, usize> = nodes.iter().enumerate().map(|(i, n)| (n.id.clone(), i)).collect();
        let mut children = vec![Vec::new(); nodes.len()];
        for (i, node) in nodes.iter().enumerate() {
            if let Some(parent) = node.parent_id.as_deref().and_then(|p| index.get(p)) {
                children[*parent].push(i);
            }
        }
        Self { nodes, index, children }
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn children_of(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    /// Nodes without a parent, in fetch order.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.nodes.len()).filter(|&i| self.nodes[i].parent_id.is_none()).collect()
    }

    /// Descendants of `root` (inclusive) with every node after all of its
    /// children. Only folders are descended into.
    pub fn post_order(&self, root: usize) -> Vec<usize> {
        let mut visited = vec![false; self.nodes.len()];
        let mut out = Vec::new();
        self.post_order_into(root, &mut visited, &mut out);
        out
    }

    fn post_order_into(&self, root: usize, visited: &mut [bool], out: &mut Vec<usize>) {
        if visited[root] {
            return;
        }
        visited[root] = true;
        // (slot, children already pushed)
        let mut stack = vec![(root, false)];
        while let Some((idx, expanded)) = stack.pop() {
            if expanded {
                out.push(idx);
                continue;
            }
            stack.push((idx, true));
            if !self.nodes[idx].is_folder() {
                continue;
            }
            for &child in self.children[idx].iter().rev() {
                if visited[child] {
                    tracing::warn!(
                        "Traversal revisits '{}' below '{}', skipping",
                        self.nodes[child].id,
                        self.nodes[idx].id
                    );
                    continue;
                }
                visited[child] = true;
                stack.push((child, false));
            }
        }
    }

    /// Derived size of every slot: a file's own size, or the sum of all
    /// file sizes nested below a folder.
    pub fn aggregate_sizes(&self) -> TreeResult<Vec<i64>> {
        let mut visited = vec![false; self.nodes.len()];
        let mut order = Vec::with_capacity(self.nodes.len());
        for root in self.roots() {
            self.post_order_into(root, &mut visited, &mut order);
        }
        // Orphans and members of a corrupt cycle are not reachable from a root
        for idx in 0..self.nodes.len() {
            self.post_order_into(idx, &mut visited, &mut order);
        }
        let mut sizes = vec![0i64; self.nodes.len()];
        let mut done = vec![false; self.nodes.len()];
        for idx in order {
            let node = &self.nodes[idx];
            sizes[idx] = if node.is_folder() {
                checked_total(self.children[idx].iter().filter(|&&c| done[c]).map(|&c| sizes[c]), &node.id)?
            } else {
                node.own_size()
            };
            done[idx] = true;
        }
        Ok(sizes)
    }

    /// Builds the nested view rooted at `root`, bottom-up.
    pub fn build_view(&self, root: usize) -> TreeResult<NodeView> {
        let order = self.post_order(root);
        let mut built: HashMap<usize, NodeView> = HashMap::with_capacity(order.len());
        for idx in order {
            let node = &self.nodes[idx];
            let view = if node.is_folder() {
                let children: Vec<NodeView> =
                    self.children[idx].iter().filter_map(|c| built.remove(c)).collect();
                let size = checked_total(children.iter().map(|c| c.size.unwrap_or(0)), &node.id)?;
                NodeView {
                    id: node.id.clone(),
                    url: node.url.clone(),
                    node_type: node.node_type,
                    parent_id: node.parent_id.clone(),
                    date: node.update_date.clone(),
                    size: Some(size),
                    children: Some(children),
                }
            } else {
                NodeView {
                    id: node.id.clone(),
                    url: node.url.clone(),
                    node_type: node.node_type,
                    parent_id: node.parent_id.clone(),
                    date: node.update_date.clone(),
                    size: Some(node.own_size()),
                    children: None,
                }
            };
            built.insert(idx, view);
        }
        // post_order always ends with the root itself
        let view = built.remove(&root).unwrap_or_else(|| unreachable!("root is part of its own post-order"));
        Ok(view)
    }
}
