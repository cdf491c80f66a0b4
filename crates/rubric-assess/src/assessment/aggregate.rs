use super::domain::{DimensionScore, EvaluationTier};
use super::rubric::RubricDefinition;
use tracing::warn;

pub fn aggregate(dimension_scores: &[DimensionScore]) -> u32 {
    dimension_scores.iter().map(|score| score.raw_score).sum()
}

/// Band whose inclusive range holds `total_score`, or the out-of-range sentinel.
pub fn select_tier(rubric: &RubricDefinition, total_score: u32) -> EvaluationTier {
    match rubric
        .evaluation_bands
        .iter()
        .find(|band| band.contains(total_score))
    {
        Some(band) => EvaluationTier::Band(band.clone()),
        None => {
            warn!(
                subcomponent = %rubric.subcomponent_id,
                total_score,
                "total score matched no evaluation band"
            );
            EvaluationTier::OutOfRange { total_score }
        }
    }
}
