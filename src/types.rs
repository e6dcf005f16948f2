use serde::{Deserialize, Serialize};

use crate::tree::node::{normalize_parent, Node, NodeType};

// Request bodies and query strings

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInput {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

impl NodeInput {
    /// The row this item becomes when written with `update_date`.
    pub fn to_node(&self, update_date: &str) -> Node {
        Node {
            id: self.id.clone(),
            parent_id: normalize_parent(self.parent_id.as_deref()).map(str::to_string),
            url: self.url.clone(),
            size: self.size,
            node_type: self.node_type,
            update_date: update_date.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub items: Vec<NodeInput>,
    pub update_date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteQuery {
    pub date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatesQuery {
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChildrenQuery {
    pub path: String,
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub status: String,
    pub imported: usize,
    pub created: usize,
    pub updated: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
    pub removed: usize,
}

/// A node together with its nested children, as returned by `GET /nodes/{id}`.
///
/// `children` serializes as `null` for files and as an array for folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: String,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub parent_id: Option<String>,
    pub date: String,
    pub size: Option<i64>,
    pub children: Option<Vec<NodeView>>,
}

/// Flat node description used by the change feed and path listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub id: String,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub parent_id: Option<String>,
    pub date: String,
    pub size: Option<i64>,
}

impl ItemSummary {
    /// `size` is the file's own size or the folder's aggregate.
    pub fn from_node(node: &Node, size: i64) -> Self {
        Self {
            id: node.id.clone(),
            url: node.url.clone(),
            node_type: node.node_type,
            parent_id: node.parent_id.clone(),
            date: node.update_date.clone(),
            size: Some(size),
        }
    }
}

/// Body of `GET /nodes/{id}`: a file is returned flat without a
/// `children` key, a folder as its full nested view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeLookup {
    File(ItemSummary),
    Folder(NodeView),
}

impl From<NodeView> for NodeLookup {
    fn from(view: NodeView) -> Self {
        if view.children.is_some() {
            return NodeLookup::Folder(view);
        }
        NodeLookup::File(ItemSummary {
            id: view.id,
            url: view.url,
            node_type: view.node_type,
            parent_id: view.parent_id,
            date: view.date,
            size: view.size,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<ItemSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(node_type: NodeType, children: Option<Vec<NodeView>>) -> NodeView {
        NodeView {
            id: "n".into(),
            url: None,
            node_type,
            parent_id: None,
            date: "2022-01-01T00:00:00Z".into(),
            size: Some(0),
            children,
        }
    }

    #[test]
    fn test_file_lookup_has_no_children_key() {
        let json = serde_json::to_value(NodeLookup::from(view(NodeType::File, None))).unwrap();
        assert!(json.get("children").is_none());
        assert_eq!(json["type"], "FILE");
    }

    #[test]
    fn test_folder_lookup_keeps_nested_file_children_null() {
        let folder = view(NodeType::Folder, Some(vec![view(NodeType::File, None)]));
        let json = serde_json::to_value(NodeLookup::from(folder)).unwrap();
        assert_eq!(json["children"][0]["children"], serde_json::Value::Null);
        assert!(json["children"][0].get("children").is_some());
    }
}
