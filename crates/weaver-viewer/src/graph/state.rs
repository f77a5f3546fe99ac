use bevy::prelude::Resource;
use std::sync::atomic::{AtomicBool, Ordering};
use weaver_core::{Galaxy, NodeId, NormalizedNode, RawNode, SearchIndex, Selection};

use crate::load::{Loaded, LoadedKind};
use crate::util::config::ViewerConfig;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No source configured.
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointTint {
    Selected,
    Hovered,
    Default,
}

#[derive(Default)]
pub struct UiState {
    pub query: String,
    pub results: Vec<NodeId>,
    pub hovered: Option<usize>,
    pub help_open: bool,
    pub reload_requested: bool,
}

#[derive(Resource)]
pub struct GalaxyState {
    pub source: String,
    pub generation: u64,
    pub load: LoadState,
    pub galaxy: Option<Galaxy>,
    pub index: Option<SearchIndex>,
    /// Bumped whenever a new dataset replaces the old one.
    pub dataset_version: u64,
    pub selection: Selection,
    pub ui: UiState,
    pub cfg: ViewerConfig,

    pub needs_redraw: AtomicBool,
}

impl GalaxyState {
    pub fn new(cfg: ViewerConfig) -> Self {
        Self {
            source: cfg.data_source.clone(),
            generation: 0,
            load: LoadState::Idle,
            galaxy: None,
            index: None,
            dataset_version: 0,
            selection: Selection::default(),
            ui: UiState::default(),
            cfg,
            needs_redraw: AtomicBool::new(true),
        }
    }

    // ----- Loading -----

    /// Starts a new load generation; completions of earlier ones are dropped.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.load = if self.source.trim().is_empty() {
            LoadState::Idle
        } else {
            LoadState::Loading
        };
        self.generation
    }

    pub fn apply(&mut self, msg: Loaded) {
        if msg.generation != self.generation {
            tracing::debug!(
                source = %msg.source,
                generation = msg.generation,
                current = self.generation,
                "ignoring stale load"
            );
            return;
        }
        match msg.kind {
            LoadedKind::Nodes(nodes) => {
                tracing::info!(source = %msg.source, nodes = nodes.len(), "galaxy loaded");
                self.set_dataset(&nodes);
            }
            LoadedKind::Failed(reason) => {
                tracing::warn!(source = %msg.source, %reason, "galaxy load failed");
                self.load = LoadState::Failed(reason);
            }
        }
    }

    pub fn set_dataset(&mut self, raw: &[RawNode]) {
        let galaxy = Galaxy::from_raw(raw);
        self.index = match SearchIndex::build(galaxy.nodes()) {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!(error = %e, "search index unavailable");
                None
            }
        };

        if let Some(id) = self.selection.current() {
            if !galaxy.contains(id) {
                self.selection.clear();
            }
        }
        self.galaxy = Some(galaxy);
        self.dataset_version += 1;
        self.ui.hovered = None;
        self.load = LoadState::Ready;
        self.recompute_search_results();
        self.mark_redraw();
    }

    pub fn is_ready(&self) -> bool {
        self.load == LoadState::Ready && self.galaxy.is_some()
    }

    pub fn node_count(&self) -> usize {
        self.galaxy.as_ref().map(Galaxy::len).unwrap_or(0)
    }

    // ----- Selection -----

    pub fn click_node(&mut self, id: NodeId) {
        self.selection.toggle(id);
        self.mark_redraw();
    }

    pub fn pointer_miss(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.mark_redraw();
        }
    }

    pub fn selected_node(&self) -> Option<&NormalizedNode> {
        let id = self.selection.current()?;
        self.galaxy.as_ref()?.get(id)
    }

    pub fn set_hovered(&mut self, hovered: Option<usize>) {
        if self.ui.hovered != hovered {
            self.ui.hovered = hovered;
            self.mark_redraw();
        }
    }

    pub fn hovered_node(&self) -> Option<&NormalizedNode> {
        let i = self.ui.hovered?;
        self.galaxy.as_ref()?.nodes().get(i)
    }

    /// Selected beats hovered beats default.
    pub fn tint(&self, index: usize) -> PointTint {
        let Some(node) = self.galaxy.as_ref().and_then(|g| g.nodes().get(index)) else {
            return PointTint::Default;
        };
        if self.selection.is_selected(&node.id) {
            PointTint::Selected
        } else if self.ui.hovered == Some(index) {
            PointTint::Hovered
        } else {
            PointTint::Default
        }
    }

    pub fn mark_redraw(&self) {
        self.needs_redraw.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn raw(id: &str, position: [f64; 3], label: &str, neighbors: &[&str]) -> RawNode {
        RawNode {
            id: NodeId::new(id),
            position,
            label: label.to_string(),
            summary: format!("About {label}"),
            neighbors: neighbors.iter().map(|n| NodeId::new(*n)).collect(),
        }
    }

    pub(crate) fn ready_state() -> GalaxyState {
        let mut st = GalaxyState::new(ViewerConfig::default());
        st.begin_load();
        st.set_dataset(&[
            raw("A", [0.0, 0.0, 0.0], "Andromeda", &[]),
            raw("B", [10.0, 0.0, 0.0], "Betelgeuse", &["A", "ghost"]),
        ]);
        st
    }

    #[test]
    fn stale_loads_are_ignored() {
        let mut st = GalaxyState::new(ViewerConfig::default());
        let first = st.begin_load();
        let second = st.begin_load();

        st.apply(Loaded::nodes(
            "old".into(),
            first,
            vec![raw("old", [0.0, 0.0, 0.0], "Old", &[])],
        ));
        assert_eq!(st.load, LoadState::Loading);
        assert!(st.galaxy.is_none());

        st.apply(Loaded::nodes(
            "new".into(),
            second,
            vec![raw("new", [1.0, 2.0, 3.0], "New", &[])],
        ));
        assert!(st.is_ready());
        assert!(st.galaxy.as_ref().expect("galaxy").contains(&NodeId::new("new")));
    }

    #[test]
    fn failed_load_is_explicit() {
        let mut st = GalaxyState::new(ViewerConfig::default());
        let g = st.begin_load();
        st.apply(Loaded::failed("x".into(), g, "timed out".into()));
        assert_eq!(st.load, LoadState::Failed("timed out".into()));
        assert!(!st.is_ready());
    }

    #[test]
    fn blank_source_stays_idle() {
        let mut st = GalaxyState::new(ViewerConfig {
            data_source: " ".into(),
            ..ViewerConfig::default()
        });
        st.begin_load();
        assert_eq!(st.load, LoadState::Idle);
    }

    #[test]
    fn click_toggles_and_miss_clears() {
        let mut st = ready_state();
        st.click_node(NodeId::new("A"));
        assert_eq!(st.selected_node().map(|n| n.label.as_str()), Some("Andromeda"));

        st.click_node(NodeId::new("B"));
        assert!(st.selection.is_selected(&NodeId::new("B")));
        assert!(!st.selection.is_selected(&NodeId::new("A")));

        st.click_node(NodeId::new("B"));
        assert!(st.selection.is_empty());

        st.click_node(NodeId::new("A"));
        st.pointer_miss();
        assert!(st.selection.is_empty());
        st.pointer_miss();
        assert!(st.selection.is_empty());
    }

    #[test]
    fn tint_prefers_selection_over_hover() {
        let mut st = ready_state();
        st.set_hovered(Some(0));
        assert_eq!(st.tint(0), PointTint::Hovered);
        assert_eq!(st.tint(1), PointTint::Default);

        st.click_node(NodeId::new("A"));
        assert_eq!(st.tint(0), PointTint::Selected);

        st.set_hovered(None);
        assert_eq!(st.tint(0), PointTint::Selected);
        assert_eq!(st.tint(99), PointTint::Default);
    }

    #[test]
    fn selected_b_connects_only_to_existing_a() {
        let mut st = ready_state();
        st.click_node(NodeId::new("B"));
        let galaxy = st.galaxy.as_ref().expect("galaxy");
        let segs = galaxy.connection_segments(st.selection.current());
        assert_eq!(segs, vec![([5.0, 0.0, 0.0], [-5.0, 0.0, 0.0])]);
    }

    #[test]
    fn reload_drops_selection_missing_from_new_dataset() {
        let mut st = ready_state();
        st.click_node(NodeId::new("B"));
        st.set_hovered(Some(1));
        let version = st.dataset_version;

        st.begin_load();
        st.set_dataset(&[raw("A", [0.0, 0.0, 0.0], "Andromeda", &[])]);
        assert!(st.selection.is_empty());
        assert_eq!(st.ui.hovered, None);
        assert_eq!(st.dataset_version, version + 1);

        st.click_node(NodeId::new("A"));
        st.begin_load();
        st.set_dataset(&[raw("A", [3.0, 0.0, 0.0], "Andromeda", &[])]);
        assert!(st.selection.is_selected(&NodeId::new("A")));
    }
}
