//! Bounded breadth-first path discovery
//!
//! Enumerates simple paths from a source person to a target within a hop
//! cap, scores each hop with the connection-strength formula, and ranks
//! the results. Exhaustive within the cap: BFS explores hop counts in
//! nondecreasing order, so when the cap is reached nothing shorter was
//! missed.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::scorer::strength_unchecked;
use std::collections::{HashSet, VecDeque};
use std::fmt::Display;
use std::time::Instant;
use tracing::debug;
use warmpath_domain::person::PersonId;
use warmpath_domain::relationship::RelationshipKind;
use warmpath_domain::traits::{GraphStore, InteractionSource};

fn store_err<E: Display>(e: E) -> EngineError {
    EngineError::Store(e.to_string())
}

/// One ranked introduction chain from source to target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroductionPath {
    /// Person ids along the chain, source first, target last
    pub persons: Vec<PersonId>,

    /// Strongest relationship kind for each consecutive hop
    /// (`persons.len() - 1` entries)
    pub kinds: Vec<RelationshipKind>,

    /// Number of hops (edges) in the chain
    pub hops: usize,

    /// Sum of per-hop connection strengths
    pub total_strength: u32,
}

/// Outcome of a path search for a single resolved target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// Source and target are the same person; there is no path to find
    /// and the condition is not an error
    SelfTarget,

    /// Ranked paths (possibly empty when the target is unreachable
    /// within the hop cap)
    Paths {
        /// Top-K paths, shortest first, strongest first within a hop count
        paths: Vec<IntroductionPath>,
        /// Paths found before truncation to the top-K
        total_found: usize,
        /// Whether the search stopped early on its deadline
        truncated: bool,
    },
}

/// Per-search overrides for the configured bounds
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Override the configured hop cap for this search
    pub max_hops: Option<usize>,

    /// Override the configured top-K for this search
    pub top_k: Option<usize>,

    /// Restrict traversal to these relationship kinds; `None` searches
    /// over every kind
    pub kinds: Option<Vec<RelationshipKind>>,

    /// Abandon expansion past this instant; results found so far are
    /// still ranked and returned, flagged as truncated
    pub deadline: Option<Instant>,
}

impl SearchOptions {
    /// Parse kind names (their stable string form) into a traversal
    /// filter
    ///
    /// Names outside the fixed enumeration are rejected with
    /// [`EngineError::InvalidKind`], never coerced.
    pub fn parse_kind_filter<S: AsRef<str>>(
        names: &[S],
    ) -> Result<Vec<RelationshipKind>, EngineError> {
        names
            .iter()
            .map(|name| {
                RelationshipKind::parse(name.as_ref()).map_err(EngineError::InvalidKind)
            })
            .collect()
    }
}

/// Find ranked introduction paths from `source` to `target`
///
/// Paths are simple (no repeated person), at most `max_hops` edges long,
/// and ranked by hop count ascending, then total strength descending.
/// An unreachable target yields an empty path list, not an error.
pub fn find_paths<S, I>(
    store: &S,
    interactions: &I,
    config: &EngineConfig,
    source: &PersonId,
    target: &PersonId,
    options: &SearchOptions,
) -> Result<PathOutcome, EngineError>
where
    S: GraphStore,
    S::Error: Display,
    I: InteractionSource,
{
    for id in [source, target] {
        if store.get_person(id).map_err(store_err)?.is_none() {
            return Err(EngineError::UnknownPerson(id.to_string()));
        }
    }

    if source == target {
        return Ok(PathOutcome::SelfTarget);
    }

    let max_hops = options.max_hops.unwrap_or(config.max_hops);
    let top_k = options.top_k.unwrap_or(config.top_k);
    let kinds = options.kinds.as_deref();

    let (raw_paths, truncated) =
        enumerate_paths(store, source, target, max_hops, kinds, options.deadline)?;

    let mut scored = Vec::with_capacity(raw_paths.len());
    for persons in raw_paths {
        if let Some(path) = score_path(store, interactions, config, kinds, persons)? {
            scored.push(path);
        }
    }

    // Shortest chains first; ties broken by strength, then by the person
    // sequence so equal-strength orderings stay deterministic.
    scored.sort_by(|x, y| {
        x.hops
            .cmp(&y.hops)
            .then(y.total_strength.cmp(&x.total_strength))
            .then_with(|| x.persons.cmp(&y.persons))
    });

    let total_found = scored.len();
    scored.truncate(top_k);

    debug!(
        source = %source,
        target = %target,
        found = total_found,
        returned = scored.len(),
        truncated,
        "path search complete"
    );

    Ok(PathOutcome::Paths {
        paths: scored,
        total_found,
        truncated,
    })
}

/// BFS enumeration of all simple paths from source to target within the
/// hop cap
///
/// Returns the person sequences and whether the deadline cut the search
/// short.
fn enumerate_paths<S>(
    store: &S,
    source: &PersonId,
    target: &PersonId,
    max_hops: usize,
    kinds: Option<&[RelationshipKind]>,
    deadline: Option<Instant>,
) -> Result<(Vec<Vec<PersonId>>, bool), EngineError>
where
    S: GraphStore,
    S::Error: Display,
{
    let mut found: Vec<Vec<PersonId>> = Vec::new();
    let mut seen: HashSet<Vec<PersonId>> = HashSet::new();
    let mut queue: VecDeque<Vec<PersonId>> = VecDeque::new();
    queue.push_back(vec![source.clone()]);

    let mut truncated = false;

    while let Some(path) = queue.pop_front() {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                truncated = true;
                break;
            }
        }

        let hops_so_far = path.len() - 1;
        if hops_so_far >= max_hops {
            continue;
        }
        let last = path.last().cloned().unwrap_or_else(|| source.clone());

        for neighbor in store.neighbors(&last, kinds).map_err(store_err)? {
            let next_id = neighbor.person.id;

            // Simple paths only
            if path.contains(&next_id) {
                continue;
            }

            let mut extended = path.clone();
            extended.push(next_id.clone());

            if next_id == *target {
                if seen.insert(extended.clone()) {
                    found.push(extended);
                }
            } else {
                queue.push_back(extended);
            }
        }
    }

    Ok((found, truncated))
}

/// Score a person sequence into a ranked path
///
/// Each hop contributes its pairwise connection strength to the total and
/// the base-weight-strongest of its edges to the kind annotation. Returns
/// `None` when an edge vanished between enumeration and scoring.
fn score_path<S, I>(
    store: &S,
    interactions: &I,
    config: &EngineConfig,
    kind_filter: Option<&[RelationshipKind]>,
    persons: Vec<PersonId>,
) -> Result<Option<IntroductionPath>, EngineError>
where
    S: GraphStore,
    S::Error: Display,
    I: InteractionSource,
{
    let mut kinds = Vec::with_capacity(persons.len().saturating_sub(1));
    let mut total_strength: u32 = 0;

    for pair in persons.windows(2) {
        let edges = store
            .relationships_between(&pair[0], &pair[1])
            .map_err(store_err)?;

        // The hop annotation only considers kinds the traversal was
        // allowed to use.
        let strongest = edges
            .iter()
            .filter(|e| kind_filter.is_none_or(|ks| ks.contains(&e.kind)))
            .max_by(|x, y| {
                x.kind
                    .base_weight()
                    .partial_cmp(&y.kind.base_weight())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        let Some(edge) = strongest else {
            return Ok(None);
        };
        kinds.push(edge.kind);

        let strength = strength_unchecked(store, interactions, config, &pair[0], &pair[1])?;
        total_strength += u32::from(strength);
    }

    let hops = persons.len() - 1;
    Ok(Some(IntroductionPath {
        persons,
        kinds,
        hops,
        total_strength,
    }))
}
