//! Fuzzy target resolution
//!
//! Turns a free-text name (optionally qualified by a company) into a
//! short, confidence-ranked candidate list. Zero matches is an empty
//! list, never an error.

use crate::config::EngineConfig;
use crate::error::EngineError;
use std::fmt::Display;
use tracing::debug;
use warmpath_domain::person::{normalize, Person};
use warmpath_domain::traits::{GraphStore, PersonQuery};

/// Confidence when the query name equals the candidate name exactly
/// (after trim/lowercase normalization)
const EXACT_NAME_SCORE: f64 = 1.0;

/// Confidence when the query name is only a substring of the candidate
const SUBSTRING_NAME_SCORE: f64 = 0.6;

/// Boost applied when the query company matches the candidate's employer
const COMPANY_BOOST: f64 = 0.2;

/// Penalty applied when the candidate has an employer that differs from
/// the query company
const COMPANY_MISMATCH_PENALTY: f64 = 0.3;

/// A free-text description of the person to reach
#[derive(Debug, Clone, Default)]
pub struct TargetQuery {
    /// Full or partial display name
    pub name: String,

    /// Current employer qualifier, used to boost or penalize candidates
    pub company: Option<String>,
}

impl TargetQuery {
    /// Query by name alone
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: None,
        }
    }

    /// Query by name qualified with a company
    pub fn at_company(name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: Some(company.into()),
        }
    }
}

/// A resolved target candidate with its match confidence
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The matched person
    pub person: Person,

    /// Match confidence in [0, 1]
    pub confidence: f64,
}

/// Resolve a free-text query into ranked target candidates
///
/// Matching is case-insensitive; tombstoned persons never match. At most
/// `config.max_candidates` are returned, all at or above
/// `config.min_match_confidence`, strongest first.
pub fn resolve_targets<S>(
    store: &S,
    config: &EngineConfig,
    query: &TargetQuery,
) -> Result<Vec<Candidate>, EngineError>
where
    S: GraphStore,
    S::Error: Display,
{
    let wanted_name = normalize(&query.name);
    if wanted_name.is_empty() {
        return Ok(Vec::new());
    }
    let wanted_company = query.company.as_deref().map(normalize);

    let matches = store
        .find_persons(&PersonQuery {
            name_contains: Some(wanted_name.clone()),
            ..Default::default()
        })
        .map_err(|e| EngineError::Store(e.to_string()))?;

    let mut candidates: Vec<Candidate> = matches
        .into_iter()
        .map(|person| {
            let confidence = score_candidate(&person, &wanted_name, wanted_company.as_deref());
            Candidate { person, confidence }
        })
        .filter(|c| c.confidence >= config.min_match_confidence)
        .collect();

    candidates.sort_by(|x, y| {
        y.confidence
            .partial_cmp(&x.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| x.person.id.cmp(&y.person.id))
    });
    candidates.truncate(config.max_candidates);

    debug!(
        name = %query.name,
        company = query.company.as_deref().unwrap_or(""),
        candidates = candidates.len(),
        "target resolution complete"
    );

    Ok(candidates)
}

fn score_candidate(person: &Person, wanted_name: &str, wanted_company: Option<&str>) -> f64 {
    let mut confidence = if normalize(&person.name) == wanted_name {
        EXACT_NAME_SCORE
    } else {
        SUBSTRING_NAME_SCORE
    };

    if let Some(company) = wanted_company {
        match person.normalized_employer() {
            Some(employer) if employer == company => confidence += COMPANY_BOOST,
            Some(_) => confidence -= COMPANY_MISMATCH_PENALTY,
            // No recorded employer: neither confirms nor contradicts
            None => {}
        }
    }

    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warmpath_domain::person::PersonId;

    fn person(id: &str, name: &str, employer: Option<&str>) -> Person {
        let mut p = Person::new(PersonId::new(id), name);
        p.employer = employer.map(str::to_string);
        p
    }

    #[test]
    fn test_exact_name_scores_full_confidence() {
        let p = person("a", "Jane Doe", None);
        assert_eq!(score_candidate(&p, "jane doe", None), 1.0);
    }

    #[test]
    fn test_substring_name_scores_lower() {
        let p = person("a", "Jane Doe", None);
        assert_eq!(score_candidate(&p, "jane", None), 0.6);
    }

    #[test]
    fn test_company_match_boosts() {
        let p = person("a", "Jane Doe", Some("Acme"));
        assert!((score_candidate(&p, "jane", Some("acme")) - 0.8).abs() < 1e-9);
        // Exact name plus company match clamps at 1.0
        assert_eq!(score_candidate(&p, "jane doe", Some("acme")), 1.0);
    }

    #[test]
    fn test_company_mismatch_penalizes() {
        let p = person("a", "Jane Doe", Some("Initech"));
        assert!((score_candidate(&p, "jane", Some("acme")) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_missing_employer_is_neutral() {
        let p = person("a", "Jane Doe", None);
        assert_eq!(score_candidate(&p, "jane", Some("acme")), 0.6);
    }
}
