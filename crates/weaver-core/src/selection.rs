use crate::NodeId;

/// Single-node selection. At most one node is selected at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(Option<NodeId>);

impl Selection {
    pub fn current(&self) -> Option<&NodeId> {
        self.0.as_ref()
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.0.as_ref() == Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Point click: re-clicking the selected node deselects it.
    pub fn toggle(&mut self, id: NodeId) {
        if self.is_selected(&id) {
            self.0 = None;
        } else {
            self.0 = Some(id);
        }
    }

    /// Search/fly-to selection, unconditional.
    pub fn select(&mut self, id: NodeId) {
        self.0 = Some(id);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}
