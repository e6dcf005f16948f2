//! Writes against a validated batch: upserts, cascading deletion and
//! ancestor date propagation.

use std::collections::HashSet;

use crate::error::{TreeError, TreeResult};
use crate::middleware::validation::sanitize_for_logging;
use crate::tree::node::Node;
use crate::tree::repository::NodeStore;
use crate::types::NodeInput;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub created: usize,
    pub updated: usize,
    pub ancestors_touched: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub removed: usize,
    pub ancestors_touched: usize,
}

/// Upserts every item with `batch_date` and stamps the same date on each
/// ancestor chain. The batch must have passed `validate_batch`.
pub async fn apply_import<S: NodeStore>(
    store: &mut S,
    items: &[NodeInput],
    batch_date: &str,
) -> TreeResult<ImportOutcome> {
    let mut outcome = ImportOutcome::default();

    for item in items {
        let previous = store.get(&item.id).await?;
        let node = item.to_node(batch_date);
        store.upsert(&node).await?;

        if previous.is_some() {
            outcome.updated += 1;
        } else {
            outcome.created += 1;
        }

        outcome.ancestors_touched +=
            propagate_update_date(store, &node.id, node.parent_id.as_deref(), batch_date).await?;

        // A moved node also changes the aggregate of its former ancestors
        if let Some(old_parent) = previous.and_then(|p| p.parent_id) {
            if node.parent_id.as_deref() != Some(old_parent.as_str()) {
                outcome.ancestors_touched +=
                    propagate_update_date(store, &node.id, Some(old_parent.as_str()), batch_date).await?;
            }
        }
    }

    tracing::info!(
        "Import applied at {}: {} created, {} updated, {} ancestor updates",
        sanitize_for_logging(batch_date),
        outcome.created,
        outcome.updated,
        outcome.ancestors_touched
    );
    Ok(outcome)
}

/// Sets `date` on `parent_id` and every node above it.
///
/// Stops at the root, at a parent that no longer exists, or when the chain
/// comes back to a node already stamped. Returns the number of nodes updated.
pub async fn propagate_update_date<S: NodeStore>(
    store: &mut S,
    origin: &str,
    parent_id: Option<&str>,
    date: &str,
) -> TreeResult<usize> {
    let mut visited: HashSet<String> = HashSet::from([origin.to_string()]);
    let mut current = parent_id.map(str::to_string);
    let mut touched = 0;

    while let Some(id) = current.take() {
        if !visited.insert(id.clone()) {
            tracing::warn!(
                "Ancestor chain of '{}' revisits '{}', stopping propagation",
                sanitize_for_logging(origin),
                sanitize_for_logging(&id)
            );
            break;
        }
        let Some(mut ancestor) = store.get(&id).await? else {
            break;
        };
        ancestor.update_date = date.to_string();
        store.upsert(&ancestor).await?;
        touched += 1;
        tracing::debug!("Propagated {} to ancestor '{}'", date, sanitize_for_logging(&id));
        current = ancestor.parent_id;
    }

    Ok(touched)
}

/// Removes `id` and, for a folder, everything below it; then stamps
/// `deletion_date` on the former parent's ancestor chain.
pub async fn delete_subtree<S: NodeStore>(store: &mut S, id: &str, deletion_date: &str) -> TreeResult<DeleteOutcome> {
    let root = store
        .get(id)
        .await?
        .ok_or_else(|| TreeError::NotFound(format!("item '{}' not found", id)))?;

    let doomed = collect_subtree(store, &root).await?;
    // Pre-order reversed: every child goes before its parent
    for node_id in doomed.iter().rev() {
        store.delete(node_id).await?;
    }

    let ancestors_touched =
        propagate_update_date(store, &root.id, root.parent_id.as_deref(), deletion_date).await?;

    tracing::info!(
        "Deleted '{}' at {}: {} nodes removed",
        sanitize_for_logging(id),
        sanitize_for_logging(deletion_date),
        doomed.len()
    );
    Ok(DeleteOutcome { removed: doomed.len(), ancestors_touched })
}

/// Ids of `root` and all its descendants in pre-order.
async fn collect_subtree<S: NodeStore>(store: &mut S, root: &Node) -> TreeResult<Vec<String>> {
    let mut visited: HashSet<String> = HashSet::from([root.id.clone()]);
    let mut order = Vec::new();
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if node.is_folder() {
            for child in store.list_children(Some(node.id.as_str())).await? {
                if visited.insert(child.id.clone()) {
                    stack.push(child);
                } else {
                    tracing::warn!("Subtree of '{}' revisits '{}', skipping", root.id, child.id);
                }
            }
        }
        order.push(node.id);
    }

    Ok(order)
}
