use weaver_core::NodeId;

use crate::graph::state::GalaxyState;

impl GalaxyState {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.ui.query = query.into();
        self.recompute_search_results();
    }

    pub fn clear_search(&mut self) {
        self.ui.query.clear();
        self.ui.results.clear();
    }

    /// Rebuilds the visible result list from the current query. Results stay
    /// empty until both the dataset and the index are ready.
    pub fn recompute_search_results(&mut self) {
        self.ui.results.clear();
        if self.ui.query.trim().is_empty() {
            return;
        }
        let (Some(galaxy), Some(index)) = (self.galaxy.as_ref(), self.index.as_ref()) else {
            return;
        };

        let hits = match index.search(&self.ui.query) {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(query = %self.ui.query, error = %e, "search failed");
                return;
            }
        };

        let limit = self.cfg.search_display_limit.max(1);
        self.ui.results = galaxy
            .resolve(hits.iter().map(|(id, _)| id))
            .into_iter()
            .take(limit)
            .map(|node| node.id.clone())
            .collect();
    }

    /// `(id, label)` pairs for the results dropdown.
    pub fn result_labels(&self) -> Vec<(NodeId, String)> {
        let Some(galaxy) = self.galaxy.as_ref() else {
            return Vec::new();
        };
        galaxy
            .resolve(self.ui.results.iter())
            .into_iter()
            .map(|n| (n.id.clone(), n.label.clone()))
            .collect()
    }
}
