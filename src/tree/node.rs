use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TreeError;

/// Sentinel parent id that marks an item as a root.
pub const ROOT_SENTINEL: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeType {
    File,
    Folder,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::File => "FILE",
            NodeType::Folder => "FOLDER",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FILE" => Ok(NodeType::File),
            "FOLDER" => Ok(NodeType::Folder),
            other => Err(TreeError::Corrupt(format!("unknown node type '{}'", other))),
        }
    }
}

/// A persisted file or folder.
///
/// `size` is only authoritative for files; a folder's size is always derived
/// from its descendants on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub parent_id: Option<String>,
    pub url: Option<String>,
    pub size: Option<i64>,
    pub node_type: NodeType,
    pub update_date: String,
}

impl Node {
    pub fn is_folder(&self) -> bool {
        self.node_type == NodeType::Folder
    }

    /// Size this node contributes to its ancestors.
    pub fn own_size(&self) -> i64 {
        match self.node_type {
            NodeType::File => self.size.unwrap_or(0),
            NodeType::Folder => 0,
        }
    }
}

/// Maps the wire representation of "no parent" (absent, empty, or `"0"`) to `None`.
pub fn normalize_parent(parent_id: Option<&str>) -> Option<&str> {
    match parent_id {
        None | Some("") | Some(ROOT_SENTINEL) => None,
        Some(p) => Some(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_round_trips_through_str() {
        assert_eq!("FILE".parse::<NodeType>().unwrap(), NodeType::File);
        assert_eq!("FOLDER".parse::<NodeType>().unwrap(), NodeType::Folder);
        assert!("folder".parse::<NodeType>().is_err());
        assert_eq!(NodeType::Folder.to_string(), "FOLDER");
    }

    #[test]
    fn test_normalize_parent() {
        assert_eq!(normalize_parent(None), None);
        assert_eq!(normalize_parent(Some("")), None);
        assert_eq!(normalize_parent(Some("0")), None);
        assert_eq!(normalize_parent(Some("f1")), Some("f1"));
    }
}
