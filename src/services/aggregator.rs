//! Token-weighted score aggregation.
//!
//! Combines per-chunk scores into one document-level record. Each of the
//! seven criteria is averaged independently, weighted by the chunk's token
//! count. Chunks that failed scoring never reach this module: the
//! orchestrator excludes them entirely, so a failure contributes neither a
//! zero to the numerator nor weight to the denominator.

use crate::domain::error::EvaluationError;
use crate::domain::models::{ScoreRecord, WeightedScore};

/// Compute the token-weighted mean of a non-empty score sequence.
///
/// Every output field stays in `[0.0, 5.0]` because it is a convex
/// combination of inputs already in that range.
///
/// # Errors
/// Returns [`EvaluationError::NoScorableContent`] on an empty sequence.
/// Aggregating nothing is a contract violation and must fail loudly
/// rather than return a fabricated zero record.
pub fn aggregate(weighted_scores: &[WeightedScore]) -> Result<ScoreRecord, EvaluationError> {
    if weighted_scores.is_empty() {
        return Err(EvaluationError::NoScorableContent);
    }

    let total_weight: f64 = weighted_scores
        .iter()
        .map(|ws| ws.weight as f64)
        .sum();
    debug_assert!(total_weight > 0.0, "chunk weights are token counts > 0");

    let mut sums = [0.0f64; 7];
    for ws in weighted_scores {
        let weight = ws.weight as f64;
        for (sum, value) in sums.iter_mut().zip(ws.score.values()) {
            *sum += value * weight;
        }
    }

    for sum in &mut sums {
        *sum /= total_weight;
    }

    Ok(ScoreRecord::from_values(sums))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: f64) -> ScoreRecord {
        ScoreRecord::from_values([value; 7])
    }

    #[test]
    fn empty_sequence_fails_loudly() {
        let result = aggregate(&[]);
        assert!(matches!(result, Err(EvaluationError::NoScorableContent)));
    }

    #[test]
    fn single_score_is_returned_exactly_regardless_of_weight() {
        let score = ScoreRecord::from_values([4.0, 3.5, 5.0, 1.0, 0.0, 2.5, 3.0]);
        for weight in [1, 100, 4000] {
            let result = aggregate(&[WeightedScore::new(score, weight)]).unwrap();
            assert_eq!(result, score);
        }
    }

    #[test]
    fn weights_are_token_counts() {
        // (2*100 + 4*300) / 400 = 3.5 for every field
        let result = aggregate(&[
            WeightedScore::new(record(2.0), 100),
            WeightedScore::new(record(4.0), 300),
        ])
        .unwrap();
        for value in result.values() {
            assert!((value - 3.5).abs() < 1e-9);
        }
    }

    #[test]
    fn fields_average_independently() {
        let a = ScoreRecord::from_values([5.0, 0.0, 4.0, 2.0, 1.0, 3.0, 5.0]);
        let b = ScoreRecord::from_values([1.0, 4.0, 2.0, 2.0, 5.0, 0.0, 3.0]);
        let result = aggregate(&[
            WeightedScore::new(a, 50),
            WeightedScore::new(b, 150),
        ])
        .unwrap();

        // field-wise: (a*50 + b*150) / 200
        assert!((result.relevance - 2.0).abs() < 1e-9);
        assert!((result.factual_accuracy - 3.0).abs() < 1e-9);
        assert!((result.clarity - 2.5).abs() < 1e-9);
        assert!((result.hallucination - 2.0).abs() < 1e-9);
        assert!((result.style_match - 4.0).abs() < 1e-9);
        assert!((result.rag_usability - 0.75).abs() < 1e-9);
        assert!((result.citation_quality - 3.5).abs() < 1e-9);
    }

    #[test]
    fn output_stays_in_range() {
        let result = aggregate(&[
            WeightedScore::new(record(0.0), 7),
            WeightedScore::new(record(5.0), 13),
            WeightedScore::new(record(2.7), 1),
        ])
        .unwrap();
        assert!(result.in_range());
    }
}
