use super::domain::{DimensionScore, Priority, Recommendation};
use super::rubric::RubricDefinition;

/// How many of the weakest dimensions are considered for improvement guidance.
const IMPROVEMENT_CANDIDATES: usize = 2;
const HIGH_PRIORITY_BELOW: f32 = 0.50;
const MEDIUM_PRIORITY_BELOW: f32 = 0.75;
const STRENGTH_ABOVE: f32 = 0.75;

/// At most two improvement items for the weakest dimensions plus one strength item.
pub fn generate(rubric: &RubricDefinition, dimension_scores: &[DimensionScore]) -> Vec<Recommendation> {
    let mut ranked: Vec<&DimensionScore> = dimension_scores.iter().collect();
    ranked.sort_by(|left, right| left.percentage.total_cmp(&right.percentage));

    let mut recommendations: Vec<Recommendation> = ranked
        .iter()
        .take(IMPROVEMENT_CANDIDATES)
        .filter_map(|score| improvement(score))
        .collect();

    if let Some(strongest) = ranked.last() {
        if strongest.percentage > STRENGTH_ABOVE {
            recommendations.push(Recommendation {
                dimension: strongest.name.clone(),
                priority: Priority::Low,
                text: format!(
                    "{} is a strength of this {} worksheet ({}/{}). Keep it current and reuse \
                     its approach when reworking weaker sections.",
                    strongest.name, rubric.display_name, strongest.raw_score, strongest.weight
                ),
                estimated_impact_points: None,
            });
        }
    }

    recommendations
}

fn improvement(score: &DimensionScore) -> Option<Recommendation> {
    let priority = if score.percentage < HIGH_PRIORITY_BELOW {
        Priority::High
    } else if score.percentage < MEDIUM_PRIORITY_BELOW {
        Priority::Medium
    } else {
        return None;
    };

    let text = match priority {
        Priority::High => format!(
            "{} needs significant work ({}/{}). Revisit your answers and address: {}.",
            score.name,
            score.raw_score,
            score.weight,
            score.description.trim_end_matches('.')
        ),
        _ => format!(
            "Strengthen {} ({}/{}) with more specific detail. Aim to cover: {}.",
            score.name,
            score.raw_score,
            score.weight,
            score.description.trim_end_matches('.')
        ),
    };

    Some(Recommendation {
        dimension: score.name.clone(),
        priority,
        text,
        estimated_impact_points: Some(score.shortfall()),
    })
}
