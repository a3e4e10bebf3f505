//! Serializable person records for import files and JSON output.
//!
//! The domain model carries no serialization concerns; these DTOs mirror
//! it for the CLI's JSON surface.

use serde::{Deserialize, Serialize};
use warmpath_domain::{Education, GreekLife, Hometown, Person, PersonId, SocialHandle};

/// A person as read from an import file or written as JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Person id; generated when absent
    #[serde(default)]
    pub id: Option<String>,

    /// Display name
    pub name: String,

    /// Current employer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer: Option<String>,

    /// Job title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Previous employers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prior_employers: Vec<String>,

    /// Education history
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<EducationRecord>,

    /// Social-profile handles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub social_handles: Vec<SocialHandleRecord>,

    /// Ids of family members
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family_refs: Vec<String>,

    /// Greek-life affiliation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greek_life: Option<GreekLifeRecord>,

    /// Hometowns
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hometowns: Vec<HometownRecord>,

    /// Soft-delete marker
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,
}

/// Education history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationRecord {
    /// School name
    pub school: String,
    /// Degree earned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    /// Graduation year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Social-profile handle entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialHandleRecord {
    /// Platform name
    pub platform: String,
    /// Handle on the platform
    pub handle: String,
}

/// Greek-life affiliation entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreekLifeRecord {
    /// Organization name
    pub organization: String,
    /// Chapter name
    pub chapter: String,
    /// Role held
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Hometown entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HometownRecord {
    /// City
    pub city: String,
    /// State or province
    pub state: String,
    /// Country
    pub country: String,
}

impl PersonRecord {
    /// Convert into a domain person; a missing id becomes the empty id,
    /// which the engine replaces with a generated one
    pub fn into_person(self) -> Person {
        Person {
            id: PersonId::new(self.id.unwrap_or_default()),
            name: self.name,
            employer: self.employer,
            title: self.title,
            prior_employers: self.prior_employers,
            education: self
                .education
                .into_iter()
                .map(|e| Education {
                    school: e.school,
                    degree: e.degree,
                    year: e.year,
                })
                .collect(),
            social_handles: self
                .social_handles
                .into_iter()
                .map(|s| SocialHandle {
                    platform: s.platform,
                    handle: s.handle,
                })
                .collect(),
            family_refs: self.family_refs.into_iter().map(PersonId::new).collect(),
            greek_life: self.greek_life.map(|g| GreekLife {
                organization: g.organization,
                chapter: g.chapter,
                role: g.role,
            }),
            hometowns: self
                .hometowns
                .into_iter()
                .map(|h| Hometown {
                    city: h.city,
                    state: h.state,
                    country: h.country,
                })
                .collect(),
            deleted: self.deleted,
        }
    }

    /// Build a record from a domain person
    pub fn from_person(person: &Person) -> Self {
        Self {
            id: Some(person.id.to_string()),
            name: person.name.clone(),
            employer: person.employer.clone(),
            title: person.title.clone(),
            prior_employers: person.prior_employers.clone(),
            education: person
                .education
                .iter()
                .map(|e| EducationRecord {
                    school: e.school.clone(),
                    degree: e.degree.clone(),
                    year: e.year,
                })
                .collect(),
            social_handles: person
                .social_handles
                .iter()
                .map(|s| SocialHandleRecord {
                    platform: s.platform.clone(),
                    handle: s.handle.clone(),
                })
                .collect(),
            family_refs: person.family_refs.iter().map(|id| id.to_string()).collect(),
            greek_life: person.greek_life.as_ref().map(|g| GreekLifeRecord {
                organization: g.organization.clone(),
                chapter: g.chapter.clone(),
                role: g.role.clone(),
            }),
            hometowns: person
                .hometowns
                .iter()
                .map(|h| HometownRecord {
                    city: h.city.clone(),
                    state: h.state.clone(),
                    country: h.country.clone(),
                })
                .collect(),
            deleted: person.deleted,
        }
    }
}
