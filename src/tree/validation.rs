//! Structural checks run on an import batch before anything is written.
//!
//! The first violation rejects the whole batch.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::error::{TreeError, TreeResult};
use crate::tree::arena::NodeArena;
use crate::tree::date::parse_timestamp;
use crate::tree::node::{normalize_parent, Node, NodeType};
use crate::tree::repository::NodeStore;
use crate::types::NodeInput;

pub const MAX_URL_LEN: usize = 255;

pub fn validate_batch_date(date: &str) -> TreeResult<DateTime<Utc>> {
    parse_timestamp(date)
}

/// Memoizes repository lookups for the duration of one validation pass.
struct PersistedLookup {
    seen: HashMap<String, Option<Node>>,
}

impl PersistedLookup {
    fn new() -> Self {
        Self { seen: HashMap::new() }
    }

    async fn get<S: NodeStore>(&mut self, store: &mut S, id: &str) -> TreeResult<Option<Node>> {
        if let Some(hit) = self.seen.get(id) {
            return Ok(hit.clone());
        }
        let node = store.get(id).await?;
        self.seen.insert(id.to_string(), node.clone());
        Ok(node)
    }
}

pub async fn validate_batch<S: NodeStore>(items: &[NodeInput], store: &mut S) -> TreeResult<()> {
    let ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
    if ids.len() != items.len() {
        return Err(TreeError::InvalidItem("batch contains duplicate ids".into()));
    }

    let batch: HashMap<&str, &NodeInput> = items.iter().map(|i| (i.id.as_str(), i)).collect();
    let mut persisted = PersistedLookup::new();

    for item in items {
        if item.id.is_empty() {
            return Err(TreeError::InvalidItem("item id must not be empty".into()));
        }
        check_fields(item)?;
        if let Some(existing) = persisted.get(store, &item.id).await? {
            if existing.node_type != item.node_type {
                return Err(TreeError::InvalidItem(format!(
                    "item '{}' cannot change type from {} to {}",
                    item.id, existing.node_type, item.node_type
                )));
            }
        }
        check_parent(item, &batch, &mut persisted, store).await?;
    }

    for item in items {
        check_acyclic(item, &batch, &mut persisted, store).await?;
    }

    check_size_totals(items, store).await
}

fn check_fields(item: &NodeInput) -> TreeResult<()> {
    match item.node_type {
        NodeType::File => {
            match item.url.as_deref() {
                Some(url) if url.chars().count() <= MAX_URL_LEN => {}
                Some(_) => {
                    return Err(TreeError::InvalidItem(format!(
                        "file '{}' url exceeds {} characters",
                        item.id, MAX_URL_LEN
                    )))
                }
                None => return Err(TreeError::InvalidItem(format!("file '{}' requires a url", item.id))),
            }
            match item.size {
                Some(size) if size > 0 => Ok(()),
                _ => Err(TreeError::InvalidItem(format!("file '{}' requires a positive size", item.id))),
            }
        }
        NodeType::Folder => {
            if item.url.is_some() {
                return Err(TreeError::InvalidItem(format!("folder '{}' must not carry a url", item.id)));
            }
            if item.size.is_some() {
                return Err(TreeError::InvalidItem(format!("folder '{}' must not carry a size", item.id)));
            }
            Ok(())
        }
    }
}

async fn check_parent<S: NodeStore>(
    item: &NodeInput,
    batch: &HashMap<&str, &NodeInput>,
    persisted: &mut PersistedLookup,
    store: &mut S,
) -> TreeResult<()> {
    let Some(parent_id) = normalize_parent(item.parent_id.as_deref()) else {
        return Ok(());
    };
    // An entry in the batch wins over the persisted row it replaces
    let parent_type = match batch.get(parent_id) {
        Some(in_batch) => Some(in_batch.node_type),
        None => persisted.get(store, parent_id).await?.map(|n| n.node_type),
    };
    match parent_type {
        Some(NodeType::Folder) => Ok(()),
        Some(NodeType::File) => Err(TreeError::InvalidItem(format!(
            "parent '{}' of item '{}' is not a folder",
            parent_id, item.id
        ))),
        None => Err(TreeError::InvalidItem(format!(
            "parent '{}' of item '{}' does not exist",
            parent_id, item.id
        ))),
    }
}

/// Walks the ancestor chain the item would have after the batch is applied.
async fn check_acyclic<S: NodeStore>(
    item: &NodeInput,
    batch: &HashMap<&str, &NodeInput>,
    persisted: &mut PersistedLookup,
    store: &mut S,
) -> TreeResult<()> {
    let mut visited: HashSet<String> = HashSet::from([item.id.clone()]);
    let mut current = normalize_parent(item.parent_id.as_deref()).map(str::to_string);

    while let Some(id) = current {
        if !visited.insert(id.clone()) {
            return Err(TreeError::InvalidItem(format!(
                "item '{}' would become its own ancestor via '{}'",
                item.id, id
            )));
        }
        current = match batch.get(id.as_str()) {
            Some(in_batch) => normalize_parent(in_batch.parent_id.as_deref()).map(str::to_string),
            None => persisted
                .get(store, &id)
                .await?
                .and_then(|n| normalize_parent(n.parent_id.as_deref()).map(str::to_string)),
        };
    }
    Ok(())
}

/// Rejects a batch after which some folder's total size would not fit in an `i64`.
async fn check_size_totals<S: NodeStore>(items: &[NodeInput], store: &mut S) -> TreeResult<()> {
    let batch_ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
    let mut nodes: Vec<Node> =
        store.list_all().await?.into_iter().filter(|n| !batch_ids.contains(n.id.as_str())).collect();
    nodes.extend(items.iter().map(|item| item.to_node("")));

    match NodeArena::from_nodes(nodes).aggregate_sizes() {
        Ok(_) => Ok(()),
        Err(TreeError::Corrupt(msg)) => Err(TreeError::InvalidItem(msg)),
        Err(e) => Err(e),
    }
}
