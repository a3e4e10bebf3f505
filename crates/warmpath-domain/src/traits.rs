//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates
//! (warmpath-store for the graph store; interaction tracking is an
//! external collaborator).

use crate::person::{Person, PersonId};
use crate::relationship::{EdgeMetadata, Relationship, RelationshipKind};

/// Trait for storing and retrieving the relationship graph
///
/// Implemented by the infrastructure layer (warmpath-store). The store is
/// the only shared mutable resource of the engine; implementations must
/// serialize writes per affected node/edge (the SQLite implementation does
/// this transactionally, one connection per thread).
pub trait GraphStore {
    /// Error type for store operations
    type Error;

    /// Insert or fully replace a person record by id. Idempotent.
    fn upsert_person(&mut self, person: Person) -> Result<(), Self::Error>;

    /// Get a person by id (including tombstoned records)
    fn get_person(&self, id: &PersonId) -> Result<Option<Person>, Self::Error>;

    /// Scan persons matching the query
    fn find_persons(&self, query: &PersonQuery) -> Result<Vec<Person>, Self::Error>;

    /// Soft-delete a person; the record survives while edges reference it
    fn tombstone_person(&mut self, id: &PersonId) -> Result<(), Self::Error>;

    /// Create the bidirectional typed edge if absent; if present, replace
    /// its metadata and refresh the update timestamp while preserving the
    /// creation timestamp. Fails when either id is unknown.
    fn upsert_relationship(
        &mut self,
        from: &PersonId,
        to: &PersonId,
        kind: RelationshipKind,
        metadata: EdgeMetadata,
    ) -> Result<(), Self::Error>;

    /// Delete the specific typed edge in both directions; no-op if absent
    fn remove_relationship(
        &mut self,
        from: &PersonId,
        to: &PersonId,
        kind: RelationshipKind,
    ) -> Result<(), Self::Error>;

    /// All persons directly connected to `id`, each paired with the
    /// edge(s) connecting them. Tombstoned neighbors are excluded.
    fn neighbors(
        &self,
        id: &PersonId,
        kind_filter: Option<&[RelationshipKind]>,
    ) -> Result<Vec<Neighbor>, Self::Error>;

    /// All typed edges between the unordered pair `(a, b)`
    fn relationships_between(
        &self,
        a: &PersonId,
        b: &PersonId,
    ) -> Result<Vec<Relationship>, Self::Error>;
}

/// A directly connected person together with the connecting edges
#[derive(Debug, Clone)]
pub struct Neighbor {
    /// The connected person
    pub person: Person,
    /// Every typed edge between the queried person and this neighbor
    pub edges: Vec<Relationship>,
}

/// Query criteria for scanning persons
#[derive(Debug, Clone, Default)]
pub struct PersonQuery {
    /// Case-insensitive substring match on the display name
    pub name_contains: Option<String>,

    /// Case-insensitive match on the current employer
    pub employer: Option<String>,

    /// Include tombstoned records
    pub include_deleted: bool,

    /// Maximum results to return
    pub limit: Option<usize>,
}

/// Trait for supplying raw interaction signals between two persons
///
/// Interaction tracking (emails, meetings, messages) is an external
/// collaborator; the engine only applies the weighting. Implementations
/// must be symmetric in the pair; the scorer queries with the canonical
/// unordered pair to enforce this.
pub trait InteractionSource {
    /// Recent-interaction score for the pair on a [0, 100] scale, or
    /// `None` when no interaction data exists for the pair
    fn interaction_score(&self, a: &PersonId, b: &PersonId) -> Option<f64>;
}

/// Interaction source for deployments without interaction data
///
/// Always reports `None`; the scorer substitutes its configured constant.
/// Missing interaction data is never an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInteractionData;

impl InteractionSource for NoInteractionData {
    fn interaction_score(&self, _a: &PersonId, _b: &PersonId) -> Option<f64> {
        None
    }
}
