use std::collections::HashMap;

use crate::normalize::normalize;
use crate::{NodeId, NormalizedNode, RawNode};

/// Eye and look-at target for framing one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTarget {
    pub target: [f32; 3],
    pub eye: [f32; 3],
}

/// Normalized dataset with id lookup. Rebuilt wholesale from each raw set.
#[derive(Debug, Clone, Default)]
pub struct Galaxy {
    nodes: Vec<NormalizedNode>,
    by_id: HashMap<NodeId, usize>,
}

impl Galaxy {
    pub fn from_raw(raw: &[RawNode]) -> Self {
        Self::from_normalized(normalize(raw))
    }

    pub fn from_normalized(nodes: Vec<NormalizedNode>) -> Self {
        let mut by_id = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            // first occurrence wins for duplicate ids
            by_id.entry(node.id.clone()).or_insert(i);
        }
        Self { nodes, by_id }
    }

    pub fn nodes(&self) -> &[NormalizedNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn get(&self, id: &NodeId) -> Option<&NormalizedNode> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Neighbors of `id` that exist in the dataset, in listed order.
    pub fn neighbors_of<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a NormalizedNode> + 'a {
        self.get(id)
            .into_iter()
            .flat_map(|node| node.neighbors.iter())
            .filter_map(|n| self.get(n))
    }

    /// Line segments from the selected node to each resolvable neighbor.
    pub fn connection_segments(&self, selected: Option<&NodeId>) -> Vec<([f32; 3], [f32; 3])> {
        let Some(node) = selected.and_then(|id| self.get(id)) else {
            return Vec::new();
        };
        self.neighbors_of(&node.id)
            .map(|neighbor| (node.position, neighbor.position))
            .collect()
    }

    /// Camera placement looking at `id` from `standoff` units along +Z.
    pub fn fly_target(&self, id: &NodeId, standoff: f32) -> Option<FlyTarget> {
        let p = self.get(id)?.position;
        Some(FlyTarget {
            target: p,
            eye: [p[0], p[1], p[2] + standoff],
        })
    }

    /// Resolves ranked ids to nodes, dropping ids that are not in the dataset.
    pub fn resolve<'a, I>(&'a self, ids: I) -> Vec<&'a NormalizedNode>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        ids.into_iter().filter_map(|id| self.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, position: [f64; 3], neighbors: &[&str]) -> RawNode {
        RawNode {
            id: NodeId::new(id),
            position,
            label: format!("Label {id}"),
            summary: format!("Summary of {id}"),
            neighbors: neighbors.iter().map(|n| NodeId::new(*n)).collect(),
        }
    }

    #[test]
    fn selected_node_draws_one_line_per_existing_neighbor() {
        let g = Galaxy::from_raw(&[
            raw("a", [0.0, 0.0, 0.0], &["b", "c"]),
            raw("b", [10.0, 0.0, 0.0], &[]),
        ]);

        let segs = g.connection_segments(Some(&NodeId::new("a")));
        assert_eq!(segs, vec![([-5.0, 0.0, 0.0], [5.0, 0.0, 0.0])]);
    }

    #[test]
    fn no_segments_without_selection_or_for_unknown_id() {
        let g = Galaxy::from_raw(&[raw("a", [0.0, 0.0, 0.0], &["b"]), raw("b", [1.0, 1.0, 1.0], &[])]);
        assert!(g.connection_segments(None).is_empty());
        assert!(g.connection_segments(Some(&NodeId::new("zzz"))).is_empty());
    }

    #[test]
    fn two_node_scenario_connects_b_to_a() {
        let g = Galaxy::from_raw(&[
            raw("A", [0.0, 0.0, 0.0], &[]),
            raw("B", [10.0, 0.0, 0.0], &["A"]),
        ]);
        let segs = g.connection_segments(Some(&NodeId::new("B")));
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0], ([5.0, 0.0, 0.0], [-5.0, 0.0, 0.0]));
    }

    #[test]
    fn fly_target_offsets_eye_along_z() {
        let g = Galaxy::from_raw(&[raw("a", [0.0, 0.0, 0.0], &[]), raw("b", [10.0, 0.0, 0.0], &[])]);
        let t = g.fly_target(&NodeId::new("b"), 5.0).expect("known id");
        assert_eq!(t.target, [5.0, 0.0, 0.0]);
        assert_eq!(t.eye, [5.0, 0.0, 5.0]);
        assert!(g.fly_target(&NodeId::new("missing"), 5.0).is_none());
    }

    #[test]
    fn duplicate_ids_resolve_to_first_occurrence() {
        let mut second = raw("dup", [10.0, 0.0, 0.0], &[]);
        second.label = "second".to_string();
        let g = Galaxy::from_raw(&[raw("dup", [0.0, 0.0, 0.0], &[]), second]);
        assert_eq!(g.len(), 2);
        assert_eq!(g.index_of(&NodeId::new("dup")), Some(0));
    }

    #[test]
    fn resolve_drops_unknown_ids() {
        let g = Galaxy::from_raw(&[raw("a", [0.0, 0.0, 0.0], &[]), raw("b", [1.0, 0.0, 0.0], &[])]);
        let ids = [NodeId::new("b"), NodeId::new("ghost"), NodeId::new("a")];
        let labels: Vec<_> = g.resolve(ids.iter()).iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Label b", "Label a"]);
    }
}
