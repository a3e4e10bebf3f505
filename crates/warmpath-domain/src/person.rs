//! Person module - the nodes of the relationship graph

use std::fmt;

/// Opaque, stable identifier for a person
///
/// Identifiers supplied by upstream systems (profile onboarding, contact
/// ingestion) pass through unchanged; [`PersonId::generate`] mints a
/// UUIDv7-based identifier when the caller has none.
///
/// The identifier is unique and immutable once assigned. All other person
/// attributes are mutable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(String);

impl PersonId {
    /// Wrap an externally assigned identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use warmpath_domain::PersonId;
    ///
    /// let id = PersonId::new("crm:4711");
    /// assert_eq!(id.as_str(), "crm:4711");
    /// ```
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh UUIDv7-based identifier
    ///
    /// UUIDv7 provides chronological sortability and needs no coordination
    /// for distributed generation.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PersonId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Normalize an attribute string for comparison: trim and lowercase
///
/// All edge-derivation rules compare attributes through this function so
/// that "Acme Corp" and "acme corp " reconcile to the same value.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// One education record on a person's profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Education {
    /// School name (free text)
    pub school: String,
    /// Degree earned, if recorded
    pub degree: Option<String>,
    /// Graduation year, if recorded
    pub year: Option<i32>,
}

impl Education {
    /// Normalized school name used for reconciliation
    pub fn normalized_school(&self) -> String {
        normalize(&self.school)
    }
}

/// A social-profile handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialHandle {
    /// Platform name, e.g. "linkedin"
    pub platform: String,
    /// Handle on that platform
    pub handle: String,
}

impl SocialHandle {
    /// Normalized `(platform, handle)` pair used for reconciliation
    pub fn normalized_pair(&self) -> (String, String) {
        (normalize(&self.platform), normalize(&self.handle))
    }
}

/// Greek-life affiliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreekLife {
    /// Organization name
    pub organization: String,
    /// Chapter name
    pub chapter: String,
    /// Role held, if recorded
    pub role: Option<String>,
}

/// A hometown record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hometown {
    /// City name
    pub city: String,
    /// State or region
    pub state: String,
    /// Country
    pub country: String,
}

impl Hometown {
    /// Normalized `(city, state, country)` tuple used for reconciliation
    pub fn normalized_tuple(&self) -> (String, String, String) {
        (
            normalize(&self.city),
            normalize(&self.state),
            normalize(&self.country),
        )
    }
}

/// A person - one node of the relationship graph
///
/// Created when a profile is onboarded or discovered via ingestion, updated
/// on profile edits or re-ingestion. Persons are never hard-deleted while
/// relationships reference them; `deleted` is a tombstone flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    /// Stable identifier (unique, immutable once assigned)
    pub id: PersonId,

    /// Display name
    pub name: String,

    /// Current employer, if any
    pub employer: Option<String>,

    /// Current job title, if any
    pub title: Option<String>,

    /// Prior employers, most recent first
    pub prior_employers: Vec<String>,

    /// Education records
    pub education: Vec<Education>,

    /// Social-profile handles
    pub social_handles: Vec<SocialHandle>,

    /// Identifiers of family relations (spouse, children, siblings)
    pub family_refs: Vec<PersonId>,

    /// Greek-life affiliation, if any
    pub greek_life: Option<GreekLife>,

    /// Hometown records
    pub hometowns: Vec<Hometown>,

    /// Tombstone flag (soft delete)
    pub deleted: bool,
}

impl Person {
    /// Create a new person with the given id and display name
    ///
    /// All other attributes start empty and can be filled in directly.
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            employer: None,
            title: None,
            prior_employers: Vec::new(),
            education: Vec::new(),
            social_handles: Vec::new(),
            family_refs: Vec::new(),
            greek_life: None,
            hometowns: Vec::new(),
            deleted: false,
        }
    }

    /// Normalized current employer, `None` when empty or missing
    pub fn normalized_employer(&self) -> Option<String> {
        self.employer
            .as_deref()
            .map(normalize)
            .filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_id_passthrough() {
        let id = PersonId::new("ext:42");
        assert_eq!(id.as_str(), "ext:42");
        assert_eq!(id.to_string(), "ext:42");
    }

    #[test]
    fn test_person_id_generate_unique() {
        let a = PersonId::generate();
        let b = PersonId::generate();
        assert_ne!(a, b);
        // UUIDv7 strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Acme Corp "), "acme corp");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalized_employer_empty_is_none() {
        let mut p = Person::new(PersonId::new("p1"), "Alice");
        assert_eq!(p.normalized_employer(), None);

        p.employer = Some("   ".to_string());
        assert_eq!(p.normalized_employer(), None);

        p.employer = Some("Acme".to_string());
        assert_eq!(p.normalized_employer(), Some("acme".to_string()));
    }

    #[test]
    fn test_hometown_tuple_normalization() {
        let h = Hometown {
            city: " Springfield".to_string(),
            state: "IL".to_string(),
            country: "USA ".to_string(),
        };
        assert_eq!(
            h.normalized_tuple(),
            ("springfield".to_string(), "il".to_string(), "usa".to_string())
        );
    }
}
