//! Edge reconciliation
//!
//! Derives typed relationship edges from the current attributes of a pair
//! of persons. Reconciliation is a pure function of current attributes:
//! it is re-run in full (never incrementally diffed) whenever a person's
//! attributes change, and any edge kind whose supporting condition no
//! longer holds is retracted.

use crate::error::EngineError;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use warmpath_domain::person::{normalize, Education, GreekLife, Hometown, Person, PersonId, SocialHandle};
use warmpath_domain::relationship::{EdgeMetadata, Relationship, RelationshipKind};
use warmpath_domain::traits::{GraphStore, PersonQuery};

/// Current timestamp in seconds since Unix epoch
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn store_err<E: Display>(e: E) -> EngineError {
    EngineError::Store(e.to_string())
}

/// Result of a reconciliation run
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    /// Edges created because their supporting condition now holds
    pub added: Vec<Relationship>,
    /// Edges retracted because their supporting condition no longer holds
    pub removed: Vec<Relationship>,
}

impl ReconcileOutcome {
    /// Whether the run changed nothing (the second of two consecutive
    /// runs with no intervening attribute change always is)
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Externally supplied candidate facts about a person
///
/// Upstream producers (contact ingestion, AI-derived extraction) supply
/// attribute facts, never edges: every fact passes through the same
/// derivation rules before any edge exists. Merging persists the facts
/// onto the profile so derived edges keep their supporting evidence.
#[derive(Debug, Clone, Default)]
pub struct PersonFacts {
    /// Replaces the current employer when present
    pub employer: Option<String>,
    /// Education records to append
    pub education: Vec<Education>,
    /// Social handles to append
    pub social_handles: Vec<SocialHandle>,
    /// Family references to append
    pub family_refs: Vec<PersonId>,
    /// Replaces the greek-life affiliation when present
    pub greek_life: Option<GreekLife>,
    /// Hometown records to append
    pub hometowns: Vec<Hometown>,
}

impl PersonFacts {
    /// Merge these facts into a copy of `person`
    ///
    /// List attributes are appended (skipping exact duplicates); scalar
    /// attributes are replaced only when the fact supplies a value.
    pub fn apply_to(&self, person: &Person) -> Person {
        let mut merged = person.clone();

        if let Some(employer) = &self.employer {
            merged.employer = Some(employer.clone());
        }
        if let Some(greek) = &self.greek_life {
            merged.greek_life = Some(greek.clone());
        }
        for record in &self.education {
            if !merged.education.contains(record) {
                merged.education.push(record.clone());
            }
        }
        for handle in &self.social_handles {
            if !merged.social_handles.contains(handle) {
                merged.social_handles.push(handle.clone());
            }
        }
        for id in &self.family_refs {
            if !merged.family_refs.contains(id) {
                merged.family_refs.push(id.clone());
            }
        }
        for hometown in &self.hometowns {
            if !merged.hometowns.contains(hometown) {
                merged.hometowns.push(hometown.clone());
            }
        }

        merged
    }
}

/// Decide which relationship kinds should exist between two persons
///
/// Deterministic and order-independent on the pair: all comparisons go
/// through trim/lowercase normalization, and intersections are emitted in
/// sorted order. A rule whose required attribute is missing on either side
/// yields nothing for that kind (partial reconciliation, never an error).
pub fn derive_kinds(a: &Person, b: &Person) -> Vec<(RelationshipKind, EdgeMetadata)> {
    let mut derived = Vec::new();

    if let Some(metadata) = derive_coworker(a, b) {
        derived.push((RelationshipKind::Coworker, metadata));
    }
    if let Some(metadata) = derive_education(a, b) {
        derived.push((RelationshipKind::Education, metadata));
    }
    if let Some(metadata) = derive_family(a, b) {
        derived.push((RelationshipKind::Family, metadata));
    }
    if let Some(metadata) = derive_greek_life(a, b) {
        derived.push((RelationshipKind::GreekLife, metadata));
    }
    if let Some(metadata) = derive_hometown(a, b) {
        derived.push((RelationshipKind::Hometown, metadata));
    }
    if let Some(metadata) = derive_social(a, b) {
        derived.push((RelationshipKind::Social, metadata));
    }

    derived
}

fn single(key: &str, value: String) -> EdgeMetadata {
    let mut metadata = EdgeMetadata::new();
    metadata.insert(key.to_string(), value);
    metadata
}

fn derive_coworker(a: &Person, b: &Person) -> Option<EdgeMetadata> {
    // One party missing an employer yields no edge, not an edge with
    // empty metadata.
    let employer_a = a.normalized_employer()?;
    let employer_b = b.normalized_employer()?;
    if employer_a != employer_b {
        return None;
    }
    Some(single("shared_employer", employer_a))
}

fn derive_education(a: &Person, b: &Person) -> Option<EdgeMetadata> {
    let schools = |p: &Person| -> BTreeSet<String> {
        p.education
            .iter()
            .map(Education::normalized_school)
            .filter(|s| !s.is_empty())
            .collect()
    };

    let shared: Vec<String> = schools(a).intersection(&schools(b)).cloned().collect();
    if shared.is_empty() {
        return None;
    }
    Some(single("shared_school", shared.join("; ")))
}

fn derive_family(a: &Person, b: &Person) -> Option<EdgeMetadata> {
    if a.family_refs.contains(&b.id) || b.family_refs.contains(&a.id) {
        Some(EdgeMetadata::new())
    } else {
        None
    }
}

fn derive_greek_life(a: &Person, b: &Person) -> Option<EdgeMetadata> {
    let greek_a = a.greek_life.as_ref()?;
    let greek_b = b.greek_life.as_ref()?;

    let org_a = normalize(&greek_a.organization);
    let org_b = normalize(&greek_b.organization);
    let chapter_a = normalize(&greek_a.chapter);
    let chapter_b = normalize(&greek_b.chapter);

    if org_a.is_empty() || chapter_a.is_empty() {
        return None;
    }
    if org_a != org_b || chapter_a != chapter_b {
        return None;
    }

    let mut metadata = EdgeMetadata::new();
    metadata.insert("shared_organization".to_string(), org_a);
    metadata.insert("shared_chapter".to_string(), chapter_a);
    Some(metadata)
}

fn derive_hometown(a: &Person, b: &Person) -> Option<EdgeMetadata> {
    let tuples = |p: &Person| -> BTreeSet<(String, String, String)> {
        p.hometowns.iter().map(Hometown::normalized_tuple).collect()
    };

    let shared: Vec<String> = tuples(a)
        .intersection(&tuples(b))
        .map(|(city, state, country)| format!("{}, {}, {}", city, state, country))
        .collect();
    if shared.is_empty() {
        return None;
    }
    Some(single("shared_hometown", shared.join("; ")))
}

fn derive_social(a: &Person, b: &Person) -> Option<EdgeMetadata> {
    let pairs = |p: &Person| -> BTreeSet<(String, String)> {
        p.social_handles
            .iter()
            .map(SocialHandle::normalized_pair)
            .filter(|(platform, handle)| !platform.is_empty() && !handle.is_empty())
            .collect()
    };

    let shared: Vec<String> = pairs(a)
        .intersection(&pairs(b))
        .map(|(platform, handle)| format!("{}:{}", platform, handle))
        .collect();
    if shared.is_empty() {
        return None;
    }
    Some(single("shared_handles", shared.join("; ")))
}

/// Recompute all edges incident to `id` from current attributes
///
/// Adds missing supported kinds, retracts kinds whose evidence is gone,
/// and leaves supported unchanged edges untouched (so their creation
/// timestamp, and hence the connection-age factor, is stable). Running
/// twice with no intervening attribute change makes the second run a
/// no-op.
///
/// Tombstoned persons derive no edges, so reconciling one retracts every
/// edge that references it.
pub fn reconcile_person<S: GraphStore>(
    store: &mut S,
    id: &PersonId,
) -> Result<ReconcileOutcome, EngineError>
where
    S::Error: Display,
{
    let person = store
        .get_person(id)
        .map_err(store_err)?
        .ok_or_else(|| EngineError::UnknownPerson(id.to_string()))?;

    reconcile_against_all(store, &person)
}

/// Merge externally supplied facts into the person, persist the merged
/// profile, and reconcile
///
/// Candidate facts never become edges directly; they only ever widen the
/// attribute set the usual rules run over.
pub fn reconcile_facts<S: GraphStore>(
    store: &mut S,
    id: &PersonId,
    facts: &PersonFacts,
) -> Result<ReconcileOutcome, EngineError>
where
    S::Error: Display,
{
    let person = store
        .get_person(id)
        .map_err(store_err)?
        .ok_or_else(|| EngineError::UnknownPerson(id.to_string()))?;

    let merged = facts.apply_to(&person);
    store.upsert_person(merged.clone()).map_err(store_err)?;

    reconcile_against_all(store, &merged)
}

fn reconcile_against_all<S: GraphStore>(
    store: &mut S,
    person: &Person,
) -> Result<ReconcileOutcome, EngineError>
where
    S::Error: Display,
{
    let others = store
        .find_persons(&PersonQuery {
            include_deleted: true,
            ..Default::default()
        })
        .map_err(store_err)?;

    let now = current_timestamp();
    let mut outcome = ReconcileOutcome::default();

    for other in &others {
        if other.id == person.id {
            continue;
        }

        let desired = if person.deleted || other.deleted {
            Vec::new()
        } else {
            derive_kinds(person, other)
        };

        let existing = store
            .relationships_between(&person.id, &other.id)
            .map_err(store_err)?;

        for (kind, metadata) in &desired {
            match existing.iter().find(|e| e.kind == *kind) {
                None => {
                    store
                        .upsert_relationship(&person.id, &other.id, *kind, metadata.clone())
                        .map_err(store_err)?;
                    debug!(
                        from = %person.id,
                        to = %other.id,
                        kind = kind.as_str(),
                        "edge added"
                    );
                    outcome.added.push(Relationship::new(
                        person.id.clone(),
                        other.id.clone(),
                        *kind,
                        metadata.clone(),
                        now,
                    ));
                }
                Some(edge) if edge.metadata != *metadata => {
                    // Evidence changed but the kind still holds: refresh
                    // metadata in place, creation timestamp survives.
                    store
                        .upsert_relationship(&person.id, &other.id, *kind, metadata.clone())
                        .map_err(store_err)?;
                }
                Some(_) => {}
            }
        }

        for edge in &existing {
            if !desired.iter().any(|(kind, _)| *kind == edge.kind) {
                store
                    .remove_relationship(&person.id, &other.id, edge.kind)
                    .map_err(store_err)?;
                debug!(
                    from = %person.id,
                    to = %other.id,
                    kind = edge.kind.as_str(),
                    "edge retracted"
                );
                outcome.removed.push(edge.clone());
            }
        }
    }

    info!(
        person = %person.id,
        added = outcome.added.len(),
        removed = outcome.removed.len(),
        "reconciliation complete"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, name: &str) -> Person {
        Person::new(PersonId::new(id), name)
    }

    #[test]
    fn test_coworker_requires_equal_nonempty_employers() {
        let mut a = person("a", "Alice");
        let mut b = person("b", "Bob");

        assert!(derive_kinds(&a, &b).is_empty());

        a.employer = Some("Acme Corp".to_string());
        assert!(derive_kinds(&a, &b).is_empty());

        b.employer = Some("  acme corp ".to_string());
        let derived = derive_kinds(&a, &b);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].0, RelationshipKind::Coworker);
        assert_eq!(derived[0].1.get("shared_employer").unwrap(), "acme corp");

        b.employer = Some("Other".to_string());
        assert!(derive_kinds(&a, &b).is_empty());
    }

    #[test]
    fn test_education_intersects_school_names() {
        let mut a = person("a", "Alice");
        let mut b = person("b", "Bob");

        a.education = vec![
            Education {
                school: "State University".to_string(),
                degree: Some("BS".to_string()),
                year: Some(2012),
            },
            Education {
                school: "Trade School".to_string(),
                degree: None,
                year: None,
            },
        ];
        b.education = vec![Education {
            school: "state university".to_string(),
            degree: Some("MBA".to_string()),
            year: Some(2015),
        }];

        let derived = derive_kinds(&a, &b);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].0, RelationshipKind::Education);
        assert_eq!(derived[0].1.get("shared_school").unwrap(), "state university");
    }

    #[test]
    fn test_family_from_either_side() {
        let mut a = person("a", "Alice");
        let b = person("b", "Bob");

        a.family_refs = vec![PersonId::new("b")];
        let derived = derive_kinds(&a, &b);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].0, RelationshipKind::Family);

        // Reference on the other side works the same
        let mut a2 = person("a", "Alice");
        let mut b2 = person("b", "Bob");
        b2.family_refs = vec![PersonId::new("a")];
        a2.family_refs.clear();
        let derived = derive_kinds(&a2, &b2);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].0, RelationshipKind::Family);
    }

    #[test]
    fn test_greek_life_requires_org_and_chapter() {
        let mut a = person("a", "Alice");
        let mut b = person("b", "Bob");

        a.greek_life = Some(GreekLife {
            organization: "Alpha Beta".to_string(),
            chapter: "Gamma".to_string(),
            role: Some("President".to_string()),
        });
        b.greek_life = Some(GreekLife {
            organization: "alpha beta".to_string(),
            chapter: "Delta".to_string(),
            role: None,
        });

        // Same organization, different chapter: no edge
        assert!(derive_kinds(&a, &b).is_empty());

        b.greek_life.as_mut().unwrap().chapter = "GAMMA".to_string();
        let derived = derive_kinds(&a, &b);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].0, RelationshipKind::GreekLife);
        assert_eq!(derived[0].1.get("shared_organization").unwrap(), "alpha beta");
        assert_eq!(derived[0].1.get("shared_chapter").unwrap(), "gamma");
    }

    #[test]
    fn test_hometown_matches_full_tuple() {
        let mut a = person("a", "Alice");
        let mut b = person("b", "Bob");

        a.hometowns = vec![Hometown {
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            country: "USA".to_string(),
        }];
        b.hometowns = vec![Hometown {
            city: "Springfield".to_string(),
            state: "MO".to_string(),
            country: "USA".to_string(),
        }];

        // Same city, different state: no edge
        assert!(derive_kinds(&a, &b).is_empty());

        b.hometowns.push(Hometown {
            city: "springfield".to_string(),
            state: "il".to_string(),
            country: "usa".to_string(),
        });
        let derived = derive_kinds(&a, &b);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].0, RelationshipKind::Hometown);
        assert_eq!(
            derived[0].1.get("shared_hometown").unwrap(),
            "springfield, il, usa"
        );
    }

    #[test]
    fn test_social_matches_platform_and_handle() {
        let mut a = person("a", "Alice");
        let mut b = person("b", "Bob");

        a.social_handles = vec![SocialHandle {
            platform: "GitHub".to_string(),
            handle: "Shared".to_string(),
        }];
        b.social_handles = vec![
            SocialHandle {
                platform: "github".to_string(),
                handle: "other".to_string(),
            },
            SocialHandle {
                platform: "github".to_string(),
                handle: "shared".to_string(),
            },
        ];

        let derived = derive_kinds(&a, &b);
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].0, RelationshipKind::Social);
        assert_eq!(derived[0].1.get("shared_handles").unwrap(), "github:shared");
    }

    #[test]
    fn test_multiple_kinds_for_one_pair() {
        let mut a = person("a", "Alice");
        let mut b = person("b", "Bob");

        a.employer = Some("Acme".to_string());
        b.employer = Some("Acme".to_string());
        a.family_refs = vec![PersonId::new("b")];

        let derived = derive_kinds(&a, &b);
        let kinds: Vec<_> = derived.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            kinds,
            vec![RelationshipKind::Coworker, RelationshipKind::Family]
        );
    }

    #[test]
    fn test_derivation_is_order_independent() {
        let mut a = person("a", "Alice");
        let mut b = person("b", "Bob");
        a.employer = Some("Acme".to_string());
        b.employer = Some("acme".to_string());
        a.hometowns = vec![Hometown {
            city: "X".to_string(),
            state: "Y".to_string(),
            country: "Z".to_string(),
        }];
        b.hometowns = a.hometowns.clone();

        let forward = derive_kinds(&a, &b);
        let backward = derive_kinds(&b, &a);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_facts_merge() {
        let mut p = person("a", "Alice");
        p.employer = Some("Acme".to_string());
        p.social_handles = vec![SocialHandle {
            platform: "github".to_string(),
            handle: "alice".to_string(),
        }];

        let facts = PersonFacts {
            employer: Some("Initech".to_string()),
            social_handles: vec![
                // Duplicate is skipped, new handle appended
                SocialHandle {
                    platform: "github".to_string(),
                    handle: "alice".to_string(),
                },
                SocialHandle {
                    platform: "mastodon".to_string(),
                    handle: "alice".to_string(),
                },
            ],
            ..Default::default()
        };

        let merged = facts.apply_to(&p);
        assert_eq!(merged.employer.as_deref(), Some("Initech"));
        assert_eq!(merged.social_handles.len(), 2);
    }
}
