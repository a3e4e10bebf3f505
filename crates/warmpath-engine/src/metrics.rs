//! Metrics collection for engine operations

use std::collections::HashMap;
use warmpath_domain::RelationshipKind;

/// Metrics collected during engine operations
///
/// Tracks path searches, reconciliation sweeps, and edge churn per kind.
#[derive(Debug, Clone, Default)]
pub struct EngineMetrics {
    /// Path searches executed
    pub searches: usize,

    /// Ranked paths returned across all searches
    pub paths_returned: usize,

    /// Target candidates considered across all searches
    pub targets_considered: usize,

    /// Reconciliation runs completed
    pub reconcile_runs: usize,

    /// Edges added per kind by reconciliation
    pub edges_added: HashMap<RelationshipKind, usize>,

    /// Edges removed per kind by reconciliation
    pub edges_removed: HashMap<RelationshipKind, usize>,
}

impl EngineMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed path search
    pub fn record_search(&mut self, paths_returned: usize, targets_considered: usize) {
        self.searches += 1;
        self.paths_returned += paths_returned;
        self.targets_considered += targets_considered;
    }

    /// Record an edge added by reconciliation
    pub fn record_edge_added(&mut self, kind: RelationshipKind) {
        *self.edges_added.entry(kind).or_insert(0) += 1;
    }

    /// Record an edge removed by reconciliation
    pub fn record_edge_removed(&mut self, kind: RelationshipKind) {
        *self.edges_removed.entry(kind).or_insert(0) += 1;
    }

    /// Record a reconciliation run completion
    pub fn record_reconcile(&mut self) {
        self.reconcile_runs += 1;
    }

    /// Get total edges added across all kinds
    pub fn total_edges_added(&self) -> usize {
        self.edges_added.values().sum()
    }

    /// Get total edges removed across all kinds
    pub fn total_edges_removed(&self) -> usize {
        self.edges_removed.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        self.searches = 0;
        self.paths_returned = 0;
        self.targets_considered = 0;
        self.reconcile_runs = 0;
        self.edges_added.clear();
        self.edges_removed.clear();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Engine Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Searches: {}", self.searches),
            format!("Paths returned: {}", self.paths_returned),
            format!("Targets considered: {}", self.targets_considered),
            format!("Reconcile runs: {}", self.reconcile_runs),
        ];

        if !self.edges_added.is_empty() {
            lines.push("Edges added by kind:".to_string());
            let mut kinds: Vec<_> = self.edges_added.iter().collect();
            kinds.sort_by_key(|(kind, _)| **kind);
            for (kind, count) in kinds {
                lines.push(format!("  {}: {}", kind.as_str(), count));
            }
            lines.push(format!("  Total: {}", self.total_edges_added()));
        }

        if !self.edges_removed.is_empty() {
            lines.push("Edges removed by kind:".to_string());
            let mut kinds: Vec<_> = self.edges_removed.iter().collect();
            kinds.sort_by_key(|(kind, _)| **kind);
            for (kind, count) in kinds {
                lines.push(format!("  {}: {}", kind.as_str(), count));
            }
            lines.push(format!("  Total: {}", self.total_edges_removed()));
        }

        lines.join("\n")
    }
}
