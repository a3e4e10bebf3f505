//! Relationship module - typed, weighted edges between persons

use crate::person::PersonId;
use std::collections::BTreeMap;

/// The fixed enumeration of relationship categories
///
/// Each kind carries a base weight in (0, 1] that feeds the connection
/// strength formula. Kinds outside this enumeration are rejected at the
/// boundary, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationshipKind {
    /// Shared current employer
    Coworker,
    /// Shared school
    Education,
    /// Family reference between the two persons
    Family,
    /// Same greek-life organization and chapter
    GreekLife,
    /// Shared hometown
    Hometown,
    /// Shared social-profile handle
    Social,
}

impl RelationshipKind {
    /// All kinds, in a fixed order
    pub const ALL: [RelationshipKind; 6] = [
        RelationshipKind::Coworker,
        RelationshipKind::Education,
        RelationshipKind::Family,
        RelationshipKind::GreekLife,
        RelationshipKind::Hometown,
        RelationshipKind::Social,
    ];

    /// Base weight of this kind, fixed per kind
    pub fn base_weight(&self) -> f64 {
        match self {
            RelationshipKind::Coworker => 0.7,
            RelationshipKind::Education => 0.5,
            RelationshipKind::Family => 0.9,
            RelationshipKind::GreekLife => 0.8,
            RelationshipKind::Hometown => 0.4,
            RelationshipKind::Social => 0.3,
        }
    }

    /// Stable string form used for storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::Coworker => "coworker",
            RelationshipKind::Education => "education",
            RelationshipKind::Family => "family",
            RelationshipKind::GreekLife => "greek_life",
            RelationshipKind::Hometown => "hometown",
            RelationshipKind::Social => "social",
        }
    }

    /// Parse the stable string form back into a kind
    ///
    /// # Examples
    ///
    /// ```
    /// use warmpath_domain::RelationshipKind;
    ///
    /// let kind = RelationshipKind::parse("coworker").unwrap();
    /// assert_eq!(kind, RelationshipKind::Coworker);
    /// assert!(RelationshipKind::parse("frenemy").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "coworker" => Ok(RelationshipKind::Coworker),
            "education" => Ok(RelationshipKind::Education),
            "family" => Ok(RelationshipKind::Family),
            "greek_life" => Ok(RelationshipKind::GreekLife),
            "hometown" => Ok(RelationshipKind::Hometown),
            "social" => Ok(RelationshipKind::Social),
            _ => Err(format!("Unknown relationship kind: {}", s)),
        }
    }
}

/// Free-form metadata on an edge, e.g. the shared employer or school name
pub type EdgeMetadata = BTreeMap<String, String>;

/// A typed connection between two persons
///
/// Relationships are symmetric in effect: one record covers both
/// directions, stored under the canonically ordered pair. Multiple distinct
/// kinds may exist between the same pair; each is a separate edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// First endpoint (lexicographically smaller id)
    pub from: PersonId,

    /// Second endpoint (lexicographically larger id)
    pub to: PersonId,

    /// Relationship kind
    pub kind: RelationshipKind,

    /// Evidence metadata, e.g. the shared employer name
    pub metadata: EdgeMetadata,

    /// When this edge was first created (unix seconds)
    ///
    /// Preserved across metadata updates; the connection-age factor of the
    /// strength score depends on it.
    pub created_at: u64,

    /// When this edge was last updated (unix seconds)
    pub updated_at: u64,
}

impl Relationship {
    /// Create a new relationship between `a` and `b`
    ///
    /// Endpoint order is canonicalized so the edge is identical no matter
    /// which direction it was derived from.
    pub fn new(
        a: PersonId,
        b: PersonId,
        kind: RelationshipKind,
        metadata: EdgeMetadata,
        created_at: u64,
    ) -> Self {
        let (from, to) = Self::canonical_pair(a, b);
        Self {
            from,
            to,
            kind,
            metadata,
            created_at,
            updated_at: created_at,
        }
    }

    /// Order a pair of ids canonically (lexicographic)
    pub fn canonical_pair(a: PersonId, b: PersonId) -> (PersonId, PersonId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Whether this edge touches the given person
    pub fn involves(&self, id: &PersonId) -> bool {
        &self.from == id || &self.to == id
    }

    /// The endpoint opposite to `id`, or `None` when `id` is not an endpoint
    pub fn other(&self, id: &PersonId) -> Option<&PersonId> {
        if &self.from == id {
            Some(&self.to)
        } else if &self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_weights() {
        assert_eq!(RelationshipKind::Coworker.base_weight(), 0.7);
        assert_eq!(RelationshipKind::Education.base_weight(), 0.5);
        assert_eq!(RelationshipKind::Family.base_weight(), 0.9);
        assert_eq!(RelationshipKind::GreekLife.base_weight(), 0.8);
        assert_eq!(RelationshipKind::Hometown.base_weight(), 0.4);
        assert_eq!(RelationshipKind::Social.base_weight(), 0.3);
    }

    #[test]
    fn test_base_weights_in_unit_interval() {
        for kind in RelationshipKind::ALL {
            let w = kind.base_weight();
            assert!(w > 0.0 && w <= 1.0, "{:?} weight {} out of (0, 1]", kind, w);
        }
    }

    #[test]
    fn test_kind_string_roundtrip() {
        for kind in RelationshipKind::ALL {
            assert_eq!(RelationshipKind::parse(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_parse_rejects_unknown() {
        assert!(RelationshipKind::parse("COWORKER").is_err());
        assert!(RelationshipKind::parse("").is_err());
    }

    #[test]
    fn test_canonical_pair_is_order_independent() {
        let a = PersonId::new("alice");
        let b = PersonId::new("bob");

        let r1 = Relationship::new(
            a.clone(),
            b.clone(),
            RelationshipKind::Coworker,
            EdgeMetadata::new(),
            1000,
        );
        let r2 = Relationship::new(
            b,
            a,
            RelationshipKind::Coworker,
            EdgeMetadata::new(),
            1000,
        );

        assert_eq!(r1, r2);
        assert_eq!(r1.from.as_str(), "alice");
        assert_eq!(r1.to.as_str(), "bob");
    }

    #[test]
    fn test_other_endpoint() {
        let r = Relationship::new(
            PersonId::new("a"),
            PersonId::new("b"),
            RelationshipKind::Family,
            EdgeMetadata::new(),
            0,
        );

        assert_eq!(r.other(&PersonId::new("a")), Some(&PersonId::new("b")));
        assert_eq!(r.other(&PersonId::new("b")), Some(&PersonId::new("a")));
        assert_eq!(r.other(&PersonId::new("c")), None);
        assert!(r.involves(&PersonId::new("a")));
        assert!(!r.involves(&PersonId::new("c")));
    }
}
