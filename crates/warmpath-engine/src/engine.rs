//! Engine facade
//!
//! Single entry point tying resolution, path search, scoring, and
//! reconciliation together over a caller-supplied store.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::metrics::EngineMetrics;
use crate::pathfinder::{find_paths, IntroductionPath, PathOutcome, SearchOptions};
use crate::reconciler::{reconcile_facts, reconcile_person, PersonFacts, ReconcileOutcome};
use crate::resolver::{resolve_targets, Candidate, TargetQuery};
use crate::scorer;
use std::fmt::Display;
use tracing::info;
use warmpath_domain::person::{Person, PersonId};
use warmpath_domain::traits::{GraphStore, InteractionSource, NoInteractionData};

fn store_err<E: Display>(e: E) -> EngineError {
    EngineError::Store(e.to_string())
}

/// Result of an introduction search against a free-text target
#[derive(Debug, Clone)]
pub struct IntroSearchResult {
    /// Ranked paths merged across all resolved candidates
    pub paths: Vec<IntroductionPath>,

    /// Paths found across all candidates before top-K truncation, so
    /// callers can tell a short result from a truncated one
    pub total_found: usize,

    /// Candidates the resolver produced for the query
    pub targets_considered: usize,

    /// Whether anything useful was found (a path, or the self-target
    /// case)
    pub found: bool,

    /// Whether a resolved candidate was the source person themself
    pub self_target: bool,

    /// Whether any per-candidate search stopped early on its deadline
    pub truncated: bool,
}

/// The warm-path engine
///
/// Owns configuration, the interaction source, and operation metrics. The
/// graph store is passed per call so one engine can serve multiple
/// stores and tests can hand in throwaway in-memory databases.
pub struct Engine<I: InteractionSource = NoInteractionData> {
    config: EngineConfig,
    interactions: I,
    metrics: EngineMetrics,
}

impl Engine<NoInteractionData> {
    /// Create an engine without interaction data; the scorer substitutes
    /// its configured constant for the interaction factor
    pub fn new(config: EngineConfig) -> Self {
        Self::with_interactions(config, NoInteractionData)
    }

    /// Create an engine with the default configuration
    pub fn default_config() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<I: InteractionSource> Engine<I> {
    /// Create an engine backed by the given interaction source
    pub fn with_interactions(config: EngineConfig, interactions: I) -> Self {
        Self {
            config,
            interactions,
            metrics: EngineMetrics::new(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Metrics accumulated since creation or the last reset
    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// Reset accumulated metrics
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Insert or fully replace a person record
    ///
    /// A person with an empty id gets a fresh generated one. Returns the
    /// record as persisted. Attribute changes do not touch edges until
    /// the next reconciliation.
    pub fn upsert_person<S>(&mut self, store: &mut S, mut person: Person) -> Result<Person, EngineError>
    where
        S: GraphStore,
        S::Error: Display,
    {
        if person.id.as_str().is_empty() {
            person.id = PersonId::generate();
        }
        store.upsert_person(person.clone()).map_err(store_err)?;
        info!(id = %person.id, name = %person.name, "person upserted");
        Ok(person)
    }

    /// Soft-delete a person
    ///
    /// The record survives for id lookups; scans, neighbor expansion, and
    /// target resolution skip it. Reconciling the person afterwards
    /// retracts its derived edges.
    pub fn tombstone_person<S>(&mut self, store: &mut S, id: &PersonId) -> Result<(), EngineError>
    where
        S: GraphStore,
        S::Error: Display,
    {
        store.tombstone_person(id).map_err(store_err)
    }

    /// Recompute all edges incident to `id` from current attributes
    pub fn reconcile_relationships<S>(
        &mut self,
        store: &mut S,
        id: &PersonId,
    ) -> Result<ReconcileOutcome, EngineError>
    where
        S: GraphStore,
        S::Error: Display,
    {
        let outcome = reconcile_person(store, id)?;
        self.record_reconcile(&outcome);
        Ok(outcome)
    }

    /// Merge externally supplied facts into the person, then reconcile
    pub fn reconcile_with_facts<S>(
        &mut self,
        store: &mut S,
        id: &PersonId,
        facts: &PersonFacts,
    ) -> Result<ReconcileOutcome, EngineError>
    where
        S: GraphStore,
        S::Error: Display,
    {
        let outcome = reconcile_facts(store, id, facts)?;
        self.record_reconcile(&outcome);
        Ok(outcome)
    }

    /// Connection strength between two persons, [0, 100]
    pub fn connection_strength<S>(
        &self,
        store: &S,
        a: &PersonId,
        b: &PersonId,
    ) -> Result<u8, EngineError>
    where
        S: GraphStore,
        S::Error: Display,
    {
        scorer::connection_strength(store, &self.interactions, &self.config, a, b)
    }

    /// Resolve a free-text query into ranked target candidates
    pub fn resolve_targets<S>(
        &self,
        store: &S,
        query: &TargetQuery,
    ) -> Result<Vec<Candidate>, EngineError>
    where
        S: GraphStore,
        S::Error: Display,
    {
        resolve_targets(store, &self.config, query)
    }

    /// Find ranked paths from `source` to an already-resolved target id
    pub fn find_paths_to<S>(
        &mut self,
        store: &S,
        source: &PersonId,
        target: &PersonId,
        options: &SearchOptions,
    ) -> Result<PathOutcome, EngineError>
    where
        S: GraphStore,
        S::Error: Display,
    {
        let outcome = find_paths(store, &self.interactions, &self.config, source, target, options)?;
        if let PathOutcome::Paths { paths, .. } = &outcome {
            self.metrics.record_search(paths.len(), 1);
        } else {
            self.metrics.record_search(0, 1);
        }
        Ok(outcome)
    }

    /// Find ranked introduction paths from `source` to a free-text target
    ///
    /// Resolves the query into candidates, searches paths to each, and
    /// merges the results under the global ranking. No candidates, or no
    /// candidate reachable within the hop cap, yields `found: false` with
    /// an empty path list.
    pub fn find_introduction_paths<S>(
        &mut self,
        store: &S,
        source: &PersonId,
        query: &TargetQuery,
        options: &SearchOptions,
    ) -> Result<IntroSearchResult, EngineError>
    where
        S: GraphStore,
        S::Error: Display,
    {
        if store.get_person(source).map_err(store_err)?.is_none() {
            return Err(EngineError::UnknownPerson(source.to_string()));
        }

        let candidates = resolve_targets(store, &self.config, query)?;
        let targets_considered = candidates.len();

        let mut merged: Vec<IntroductionPath> = Vec::new();
        let mut total_found = 0;
        let mut self_target = false;
        let mut truncated = false;

        for candidate in &candidates {
            match find_paths(
                store,
                &self.interactions,
                &self.config,
                source,
                &candidate.person.id,
                options,
            )? {
                PathOutcome::SelfTarget => self_target = true,
                PathOutcome::Paths {
                    paths,
                    total_found: found,
                    truncated: t,
                } => {
                    merged.extend(paths);
                    total_found += found;
                    truncated |= t;
                }
            }
        }

        // Candidates were searched independently; re-rank the union under
        // the same ordering and re-apply the top-K.
        merged.sort_by(|x, y| {
            x.hops
                .cmp(&y.hops)
                .then(y.total_strength.cmp(&x.total_strength))
                .then_with(|| x.persons.cmp(&y.persons))
        });
        let top_k = options.top_k.unwrap_or(self.config.top_k);
        merged.truncate(top_k);

        let found = !merged.is_empty() || self_target;
        self.metrics.record_search(merged.len(), targets_considered);

        info!(
            source = %source,
            target_name = %query.name,
            candidates = targets_considered,
            paths = merged.len(),
            found,
            "introduction search complete"
        );

        Ok(IntroSearchResult {
            paths: merged,
            total_found,
            targets_considered,
            found,
            self_target,
            truncated,
        })
    }

    fn record_reconcile(&mut self, outcome: &ReconcileOutcome) {
        self.metrics.record_reconcile();
        for edge in &outcome.added {
            self.metrics.record_edge_added(edge.kind);
        }
        for edge in &outcome.removed {
            self.metrics.record_edge_removed(edge.kind);
        }
    }
}
