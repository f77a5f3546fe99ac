use weaver_core::RawNode;

/// Completion message sent from the loader thread to the UI thread.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub source: String,
    pub generation: u64,
    pub kind: LoadedKind,
}

#[derive(Debug, Clone)]
pub enum LoadedKind {
    Nodes(Vec<RawNode>),
    Failed(String),
}

impl Loaded {
    pub fn nodes(source: String, generation: u64, nodes: Vec<RawNode>) -> Self {
        Self {
            source,
            generation,
            kind: LoadedKind::Nodes(nodes),
        }
    }

    pub fn failed(source: String, generation: u64, reason: String) -> Self {
        Self {
            source,
            generation,
            kind: LoadedKind::Failed(reason),
        }
    }
}
