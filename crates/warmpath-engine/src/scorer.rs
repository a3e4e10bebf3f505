//! Connection-strength scoring over the live graph
//!
//! Gathers the five sub-scores for a pair of persons from the store and
//! the configured interaction source, then hands them to the pure formula
//! in warmpath-domain. Symmetry in the pair is enforced by querying every
//! collaborator with the canonical unordered pair.

use crate::config::EngineConfig;
use crate::error::EngineError;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};
use warmpath_domain::person::PersonId;
use warmpath_domain::relationship::Relationship;
use warmpath_domain::strength::{
    age_score, compute_strength, overlap_score, shared_history_score, StrengthFactors,
};
use warmpath_domain::traits::{GraphStore, InteractionSource};

fn store_err<E: Display>(e: E) -> EngineError {
    EngineError::Store(e.to_string())
}

/// Compute the connection strength between two persons
///
/// Both ids must exist (tombstoned records still score). The result is an
/// integer in [0, 100]; pairs with no direct edge still score through the
/// interaction and mutual-overlap factors.
pub fn connection_strength<S, I>(
    store: &S,
    interactions: &I,
    config: &EngineConfig,
    a: &PersonId,
    b: &PersonId,
) -> Result<u8, EngineError>
where
    S: GraphStore,
    S::Error: Display,
    I: InteractionSource,
{
    for id in [a, b] {
        if store.get_person(id).map_err(store_err)?.is_none() {
            return Err(EngineError::UnknownPerson(id.to_string()));
        }
    }
    strength_unchecked(store, interactions, config, a, b)
}

/// Strength computation without the existence checks
///
/// Used by the path finder, which only ever scores ids it has already
/// pulled out of the store.
pub(crate) fn strength_unchecked<S, I>(
    store: &S,
    interactions: &I,
    config: &EngineConfig,
    a: &PersonId,
    b: &PersonId,
) -> Result<u8, EngineError>
where
    S: GraphStore,
    S::Error: Display,
    I: InteractionSource,
{
    let neighbors_a = neighbor_ids(store, a)?;
    let neighbors_b = neighbor_ids(store, b)?;
    let shared = neighbors_a
        .intersection(&neighbors_b)
        .filter(|id| *id != a && *id != b)
        .count();
    let mutual_overlap = overlap_score(shared, neighbors_a.len(), neighbors_b.len());

    let edges = store.relationships_between(a, b).map_err(store_err)?;
    let (shared_history, connection_age, kind_base_weight) = direct_edge_factors(
        &edges,
        config.age_saturation().as_secs(),
    );

    let (lo, hi) = Relationship::canonical_pair(a.clone(), b.clone());
    let interaction = interactions
        .interaction_score(&lo, &hi)
        .unwrap_or(config.default_interaction_score);

    Ok(compute_strength(&StrengthFactors {
        interaction,
        mutual_overlap,
        shared_history,
        connection_age,
        kind_base_weight,
    }))
}

fn neighbor_ids<S>(store: &S, id: &PersonId) -> Result<BTreeSet<PersonId>, EngineError>
where
    S: GraphStore,
    S::Error: Display,
{
    Ok(store
        .neighbors(id, None)
        .map_err(store_err)?
        .into_iter()
        .map(|n| n.person.id)
        .collect())
}

/// Sub-scores that depend on the direct edges between the pair
///
/// A pair with no direct edge gets zero for all three; an adjacent pair
/// gets shared-history from the distinct kind count, age from the
/// earliest creation timestamp, and the base weight of its strongest kind.
fn direct_edge_factors(edges: &[Relationship], saturation_secs: u64) -> (f64, f64, f64) {
    if edges.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let distinct_kinds: BTreeSet<_> = edges.iter().map(|e| e.kind).collect();
    let shared_history = shared_history_score(distinct_kinds.len());

    let earliest = edges.iter().map(|e| e.created_at).min().unwrap_or(0);
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let connection_age = age_score(now, earliest, saturation_secs);

    let kind_base_weight = edges
        .iter()
        .map(|e| e.kind.base_weight())
        .fold(0.0f64, f64::max);

    (shared_history, connection_age, kind_base_weight)
}
