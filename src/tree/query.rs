//! Read side of the tree: node lookup, change feed, path listing.

use std::collections::HashSet;

use crate::error::{TreeError, TreeResult};
use crate::middleware::validation::sanitize_for_logging;
use crate::tree::arena::NodeArena;
use crate::tree::date::{parse_timestamp, window_ending_at};
use crate::tree::node::{normalize_parent, Node};
use crate::tree::repository::NodeStore;
use crate::types::{ItemSummary, NodeView};

/// First segment of every listing path.
pub const PATH_ROOT: &str = "home";

/// Looks up `id`; folders come back with their nested children and the
/// aggregated size of every file below them.
pub async fn get_node<S: NodeStore>(store: &mut S, id: &str) -> TreeResult<NodeView> {
    let root = store
        .get(id)
        .await?
        .ok_or_else(|| TreeError::NotFound(format!("item '{}' not found", id)))?;
    let arena = NodeArena::from_nodes(fetch_subtree(store, root).await?);
    arena.build_view(0)
}

/// `root` first, then its descendants breadth-first.
async fn fetch_subtree<S: NodeStore>(store: &mut S, root: Node) -> TreeResult<Vec<Node>> {
    let mut visited: HashSet<String> = HashSet::from([root.id.clone()]);
    let mut nodes = vec![root];
    let mut cursor = 0;

    while cursor < nodes.len() {
        if nodes[cursor].is_folder() {
            let parent_id = nodes[cursor].id.clone();
            for child in store.list_children(Some(parent_id.as_str())).await? {
                if visited.insert(child.id.clone()) {
                    nodes.push(child);
                } else {
                    tracing::warn!(
                        "Subtree below '{}' revisits '{}', skipping",
                        sanitize_for_logging(&parent_id),
                        sanitize_for_logging(&child.id)
                    );
                }
            }
        }
        cursor += 1;
    }

    Ok(nodes)
}

/// Every node, file or folder, whose `updateDate` lies in `[date - 24h, date]`.
pub async fn get_updates_in_window<S: NodeStore>(store: &mut S, date: &str) -> TreeResult<Vec<ItemSummary>> {
    let (start, end) = window_ending_at(parse_timestamp(date)?)?;
    let arena = NodeArena::from_nodes(store.list_all().await?);
    let sizes = arena.aggregate_sizes()?;

    let mut items = Vec::new();
    for (idx, size) in sizes.into_iter().enumerate() {
        let node = arena.node(idx);
        match parse_timestamp(&node.update_date) {
            Ok(ts) if start <= ts && ts <= end => items.push(ItemSummary::from_node(node, size)),
            Ok(_) => {}
            Err(_) => tracing::warn!(
                "Item '{}' has unparseable update date '{}'",
                sanitize_for_logging(&node.id),
                sanitize_for_logging(&node.update_date)
            ),
        }
    }
    Ok(items)
}

/// Splits `home/a/b/` into `["a", "b"]`.
pub fn parse_path(path: &str) -> TreeResult<Vec<&str>> {
    let mut segments: Vec<&str> = path.trim().split('/').collect();
    if segments.len() > 1 && segments.last() == Some(&"") {
        segments.pop();
    }
    let first = segments.first().copied().unwrap_or_default();
    if !first.eq_ignore_ascii_case(PATH_ROOT) {
        return Err(TreeError::InvalidPath(format!("path must start with '{}'", PATH_ROOT)));
    }
    let rest: Vec<&str> = segments.into_iter().skip(1).collect();
    if rest.iter().any(|s| s.is_empty()) {
        return Err(TreeError::InvalidPath("path contains an empty segment".into()));
    }
    Ok(rest)
}

/// Direct children of the folder named by `path`; `home` alone lists the roots.
pub async fn list_path_children<S: NodeStore>(store: &mut S, path: &str) -> TreeResult<Vec<ItemSummary>> {
    let segments = parse_path(path)?;

    let mut parent: Option<String> = None;
    for segment in segments {
        let node = store
            .get(segment)
            .await?
            .ok_or_else(|| TreeError::NotFound(format!("path segment '{}' not found", segment)))?;
        if normalize_parent(node.parent_id.as_deref()) != parent.as_deref() {
            return Err(TreeError::NotFound(format!(
                "'{}' is not a child of '{}'",
                segment,
                parent.as_deref().unwrap_or(PATH_ROOT)
            )));
        }
        if !node.is_folder() {
            return Err(TreeError::InvalidPath(format!("'{}' is not a folder", segment)));
        }
        parent = Some(node.id);
    }

    let arena = NodeArena::from_nodes(store.list_all().await?);
    let sizes = arena.aggregate_sizes()?;
    let children = match parent.as_deref() {
        None => arena.roots(),
        Some(id) => arena.index_of(id).map(|i| arena.children_of(i).to_vec()).unwrap_or_default(),
    };
    Ok(children.into_iter().map(|i| ItemSummary::from_node(arena.node(i), sizes[i])).collect())
}
