//! Connection-strength computation
//!
//! Implements the deterministic weighted-sum formula that turns five
//! sub-scores into a single [0, 100] connection strength. The formula is
//! pure: identical inputs always produce the identical integer output,
//! which the test suite relies on.

/// Weight of the interaction recency/frequency factor
pub const INTERACTION_WEIGHT: f64 = 0.30;

/// Weight of the mutual-network-overlap factor
pub const MUTUAL_OVERLAP_WEIGHT: f64 = 0.25;

/// Weight of the shared-history factor
pub const SHARED_HISTORY_WEIGHT: f64 = 0.20;

/// Weight of the connection-age factor
pub const CONNECTION_AGE_WEIGHT: f64 = 0.15;

/// Weight of the relationship-kind base-weight factor
pub const KIND_WEIGHT: f64 = 0.10;

/// Points contributed per distinct relationship kind to the
/// shared-history sub-score (saturates at 100, i.e. four kinds)
pub const SHARED_HISTORY_POINTS_PER_KIND: f64 = 25.0;

/// The five sub-scores feeding the strength formula
///
/// `interaction`, `mutual_overlap`, `shared_history` and `connection_age`
/// are expected on a [0, 100] scale; `kind_base_weight` on (0, 1]. Every
/// factor is clamped before weighting, so out-of-range inputs degrade
/// gracefully instead of corrupting the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthFactors {
    /// Recent-interaction score, supplied by an external collaborator
    pub interaction: f64,
    /// Mutual-network-overlap score
    pub mutual_overlap: f64,
    /// Shared-history score (distinct direct relationship kinds)
    pub shared_history: f64,
    /// Connection-age score (elapsed time since the earliest edge)
    pub connection_age: f64,
    /// Base weight of the strongest direct relationship kind, 0 when the
    /// pair is not directly connected
    pub kind_base_weight: f64,
}

/// Compute the connection strength for a pair of persons
///
/// `score = 0.30·interaction + 0.25·overlap + 0.20·shared_history
/// + 0.15·age + 0.10·(base_weight·100)`, clamped to [0, 100] and rounded
/// to the nearest integer.
///
/// # Examples
///
/// ```
/// use warmpath_domain::strength::{compute_strength, StrengthFactors};
///
/// let factors = StrengthFactors {
///     interaction: 50.0,
///     mutual_overlap: 100.0,
///     shared_history: 25.0,
///     connection_age: 0.0,
///     kind_base_weight: 0.7,
/// };
/// assert_eq!(compute_strength(&factors), 52);
/// ```
pub fn compute_strength(factors: &StrengthFactors) -> u8 {
    let interaction = clamp_score(factors.interaction);
    let overlap = clamp_score(factors.mutual_overlap);
    let shared = clamp_score(factors.shared_history);
    let age = clamp_score(factors.connection_age);
    let kind = clamp_score(factors.kind_base_weight.clamp(0.0, 1.0) * 100.0);

    let score = INTERACTION_WEIGHT * interaction
        + MUTUAL_OVERLAP_WEIGHT * overlap
        + SHARED_HISTORY_WEIGHT * shared
        + CONNECTION_AGE_WEIGHT * age
        + KIND_WEIGHT * kind;

    score.clamp(0.0, 100.0).round() as u8
}

/// Mutual-network-overlap sub-score
///
/// `100 · |N(A) ∩ N(B)| / min(|N(A)|, |N(B)|)`; zero when either person
/// has no neighbors.
pub fn overlap_score(shared_neighbors: usize, degree_a: usize, degree_b: usize) -> f64 {
    let min_degree = degree_a.min(degree_b);
    if min_degree == 0 {
        return 0.0;
    }
    100.0 * shared_neighbors as f64 / min_degree as f64
}

/// Shared-history sub-score from the number of distinct direct kinds
pub fn shared_history_score(distinct_kinds: usize) -> f64 {
    (distinct_kinds as f64 * SHARED_HISTORY_POINTS_PER_KIND).min(100.0)
}

/// Connection-age sub-score
///
/// Proportional to elapsed time since the earliest surviving edge,
/// saturating at `saturation_secs` (100 points).
pub fn age_score(now: u64, earliest_created_at: u64, saturation_secs: u64) -> f64 {
    if saturation_secs == 0 || now <= earliest_created_at {
        return 0.0;
    }
    let elapsed = (now - earliest_created_at) as f64;
    (100.0 * elapsed / saturation_secs as f64).min(100.0)
}

fn clamp_score(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let total = INTERACTION_WEIGHT
            + MUTUAL_OVERLAP_WEIGHT
            + SHARED_HISTORY_WEIGHT
            + CONNECTION_AGE_WEIGHT
            + KIND_WEIGHT;
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_factors_maxed() {
        let factors = StrengthFactors {
            interaction: 100.0,
            mutual_overlap: 100.0,
            shared_history: 100.0,
            connection_age: 100.0,
            kind_base_weight: 1.0,
        };
        assert_eq!(compute_strength(&factors), 100);
    }

    #[test]
    fn test_all_factors_zero() {
        let factors = StrengthFactors {
            interaction: 0.0,
            mutual_overlap: 0.0,
            shared_history: 0.0,
            connection_age: 0.0,
            kind_base_weight: 0.0,
        };
        assert_eq!(compute_strength(&factors), 0);
    }

    #[test]
    fn test_kind_factor_alone() {
        // Only the kind base weight contributes: 0.10 * (0.7 * 100) = 7
        let factors = StrengthFactors {
            interaction: 0.0,
            mutual_overlap: 0.0,
            shared_history: 0.0,
            connection_age: 0.0,
            kind_base_weight: 0.7,
        };
        assert_eq!(compute_strength(&factors), 7);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let factors = StrengthFactors {
            interaction: 250.0,
            mutual_overlap: -40.0,
            shared_history: 100.0,
            connection_age: 100.0,
            kind_base_weight: 3.0,
        };
        // 0.30*100 + 0.25*0 + 0.20*100 + 0.15*100 + 0.10*100 = 75
        assert_eq!(compute_strength(&factors), 75);
    }

    #[test]
    fn test_overlap_score() {
        assert_eq!(overlap_score(2, 4, 8), 50.0);
        assert_eq!(overlap_score(3, 3, 10), 100.0);
        assert_eq!(overlap_score(0, 5, 5), 0.0);
        // Zero neighbors on either side means zero overlap
        assert_eq!(overlap_score(0, 0, 5), 0.0);
        assert_eq!(overlap_score(0, 5, 0), 0.0);
    }

    #[test]
    fn test_shared_history_score() {
        assert_eq!(shared_history_score(0), 0.0);
        assert_eq!(shared_history_score(1), 25.0);
        assert_eq!(shared_history_score(2), 50.0);
        assert_eq!(shared_history_score(4), 100.0);
        // Capped at 100 even with all six kinds
        assert_eq!(shared_history_score(6), 100.0);
    }

    #[test]
    fn test_age_score_saturates() {
        let five_years = 5 * 365 * 86400;
        assert_eq!(age_score(1000, 1000, five_years), 0.0);
        assert_eq!(age_score(1000 + five_years, 1000, five_years), 100.0);
        assert_eq!(age_score(1000 + 10 * five_years, 1000, five_years), 100.0);

        let half = age_score(1000 + five_years / 2, 1000, five_years);
        assert!((half - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_age_score_zero_saturation() {
        assert_eq!(age_score(5000, 1000, 0), 0.0);
    }
}
