//! Score domain models.
//!
//! A [`ScoreRecord`] holds the seven evaluation criteria, each constrained
//! to `[0.0, 5.0]`. The same type is produced per chunk by the scorer and
//! per document by the aggregator.

use serde::{Deserialize, Serialize};

/// Maximum value any criterion may take.
pub const SCORE_MAX: f64 = 5.0;

/// Criterion names in canonical (output-column) order.
pub const CRITERIA: [&str; 7] = [
    "relevance",
    "factual_accuracy",
    "clarity",
    "hallucination",
    "style_match",
    "rag_usability",
    "citation_quality",
];

/// Seven-dimension quality score, each field in `[0.0, 5.0]`.
///
/// Values need not be integers; the aggregator produces fractional means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// How relevant and focused the content is
    pub relevance: f64,

    /// Whether the content appears factually accurate
    pub factual_accuracy: f64,

    /// Clarity and structure of the writing
    pub clarity: f64,

    /// Resistance to causing hallucinations (5 = very unlikely)
    pub hallucination: f64,

    /// Consistency and professionalism of style
    pub style_match: f64,

    /// Usefulness as RAG retrieval context
    pub rag_usability: f64,

    /// Presence and formatting of sources and citations
    pub citation_quality: f64,
}

impl ScoreRecord {
    /// Field values in canonical order, parallel to [`CRITERIA`].
    pub fn values(&self) -> [f64; 7] {
        [
            self.relevance,
            self.factual_accuracy,
            self.clarity,
            self.hallucination,
            self.style_match,
            self.rag_usability,
            self.citation_quality,
        ]
    }

    /// Build a record from values in canonical order.
    pub fn from_values(values: [f64; 7]) -> Self {
        Self {
            relevance: values[0],
            factual_accuracy: values[1],
            clarity: values[2],
            hallucination: values[3],
            style_match: values[4],
            rag_usability: values[5],
            citation_quality: values[6],
        }
    }

    /// Returns true if every field lies in `[0.0, 5.0]`.
    pub fn in_range(&self) -> bool {
        self.values()
            .iter()
            .all(|v| v.is_finite() && (0.0..=SCORE_MAX).contains(v))
    }
}

/// A chunk's score paired with its aggregation weight (the chunk's token
/// count). Exists only on the way into the aggregator.
#[derive(Debug, Clone, Copy)]
pub struct WeightedScore {
    pub score: ScoreRecord,
    pub weight: usize,
}

impl WeightedScore {
    pub fn new(score: ScoreRecord, weight: usize) -> Self {
        Self { score, weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_round_trip_in_canonical_order() {
        let record = ScoreRecord::from_values([1.0, 2.0, 3.0, 4.0, 5.0, 0.0, 2.5]);
        assert_eq!(record.relevance, 1.0);
        assert_eq!(record.citation_quality, 2.5);
        assert_eq!(ScoreRecord::from_values(record.values()), record);
    }

    #[test]
    fn in_range_rejects_out_of_bounds_fields() {
        let mut record = ScoreRecord::from_values([2.0; 7]);
        assert!(record.in_range());
        record.clarity = 5.1;
        assert!(!record.in_range());
        record.clarity = -0.1;
        assert!(!record.in_range());
        record.clarity = f64::NAN;
        assert!(!record.in_range());
    }
}
