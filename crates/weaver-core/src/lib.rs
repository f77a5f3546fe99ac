use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod galaxy;
pub mod normalize;
pub mod search;
pub mod selection;

pub use galaxy::{FlyTarget, Galaxy};
pub use normalize::{normalize, Bounds, TARGET_SPAN};
pub use search::{SearchError, SearchIndex};
pub use selection::Selection;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawNode {
    pub id: NodeId,
    pub position: [f64; 3],
    pub label: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub neighbors: Vec<NodeId>,
}

/// Node with its position moved into the shared viewing volume.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NormalizedNode {
    pub id: NodeId,
    pub position: [f32; 3],
    pub label: String,
    pub summary: String,
    pub neighbors: Vec<NodeId>,
}

// Only `nodes` is consumed; anything else in the document is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub nodes: Vec<RawNode>,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid galaxy document: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_document(bytes: &[u8]) -> Result<Vec<RawNode>, DocumentError> {
    let doc: Document = serde_json::from_slice(bytes)?;
    Ok(doc.nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_document_reads_nodes_and_ignores_extra_fields() {
        let json = br#"{
            "version": 3,
            "nodes": [
                {"id": "a", "position": [1, 2, 3], "label": "Alpha", "summary": "first", "neighbors": ["b"]},
                {"id": "b", "position": [0.5, -1, 2], "label": "Beta"}
            ]
        }"#;

        let nodes = parse_document(json).expect("parse");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, NodeId::new("a"));
        assert_eq!(nodes[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(nodes[0].neighbors, vec![NodeId::new("b")]);
        assert_eq!(nodes[1].summary, "");
        assert!(nodes[1].neighbors.is_empty());
    }

    #[test]
    fn parse_document_rejects_missing_nodes() {
        assert!(parse_document(br#"{"points": []}"#).is_err());
        assert!(parse_document(br#"{"nodes": [{"id": "a", "label": "no position"}]}"#).is_err());
        assert!(parse_document(b"not json").is_err());
    }
}
