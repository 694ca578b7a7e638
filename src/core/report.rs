//! core/report.rs — One-sided p-value bound for an initial plan's score
//! against the ensemble seen in a random walk.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors from p-value report computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A p-value was requested over zero sampled scores.
    #[error("ensemble contains no scores")]
    EmptyEnsemble,
}

/// How extreme one plan's score is relative to a sampled ensemble.
///
/// A pure value: no identity, nothing mutates it after construction.
/// Serializes to a JSON object with exactly these five fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PValueReport {
    pub name: String,
    pub initial_plan_score: f64,
    pub fraction_higher: f64,
    pub p_value: f64,
    pub opposite_p_value: f64,
}

/// Compare `initial_plan_score` against the scores sampled in one random
/// walk.
///
/// By Chikina–Frieze–Pegden, if the initial plan scores in the highest
/// `fraction_higher` of all plans seen in the walk, the probability that a
/// plan this extreme arose from the walk's own sampling process is bounded by
/// `sqrt(2 * fraction_higher)`. `opposite_p_value` is the same bound computed
/// from the complementary fraction (scores `<=` the initial score); the two
/// bounds are independent and are never normalized against each other. A
/// fraction above 0.5 gives a bound above 1 — vacuous but mathematically
/// valid, reported as-is.
///
/// `ensemble_scores` is consumed exactly once; an empty ensemble fails with
/// [`ReportError::EmptyEnsemble`] rather than dividing by zero.
pub fn p_value_report<I>(
    score_name: &str,
    ensemble_scores: I,
    initial_plan_score: f64,
) -> Result<PValueReport, ReportError>
where
    I: IntoIterator<Item = f64>,
{
    let mut count_higher = 0u64;
    let mut total = 0u64;
    for score in ensemble_scores {
        total += 1;
        if score > initial_plan_score {
            count_higher += 1;
        }
    }
    if total == 0 {
        return Err(ReportError::EmptyEnsemble);
    }

    let fraction_higher = count_higher as f64 / total as f64;
    let fraction_lower = (total - count_higher) as f64 / total as f64;
    debug!(
        name = score_name,
        total, count_higher, "computed ensemble partition"
    );

    Ok(PValueReport {
        name: score_name.to_owned(),
        initial_plan_score,
        fraction_higher,
        p_value: (2.0 * fraction_higher).sqrt(),
        opposite_p_value: (2.0 * fraction_lower).sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn worked_example_one_to_five_against_three() {
        let report = p_value_report("splits", [1.0, 2.0, 3.0, 4.0, 5.0], 3.0).unwrap();
        assert_eq!(report.name, "splits");
        assert_eq!(report.initial_plan_score, 3.0);
        assert_relative_eq!(report.fraction_higher, 0.4);
        assert_relative_eq!(report.p_value, 0.8f64.sqrt());
        assert_relative_eq!(report.opposite_p_value, 1.2f64.sqrt());
    }

    #[test]
    fn ties_count_as_lower_or_equal() {
        let report = p_value_report("ties", [3.0, 3.0, 3.0, 4.0], 3.0).unwrap();
        assert_relative_eq!(report.fraction_higher, 0.25);
    }

    #[test]
    fn empty_ensemble_is_an_error() {
        assert_eq!(
            p_value_report("empty", std::iter::empty(), 1.0),
            Err(ReportError::EmptyEnsemble)
        );
    }
}
