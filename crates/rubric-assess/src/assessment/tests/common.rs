use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::assessment::{
    AssessmentEngine, Band, Dimension, DimensionScore, NoiseMode, RubricDefinition,
    RubricRegistry, Submission,
};
use crate::config::EngineConfig;

pub(super) fn standard_bands() -> Vec<Band> {
    [
        (0, 25, "Critical"),
        (26, 50, "Developing"),
        (51, 75, "Solid"),
        (76, 90, "Strong"),
        (91, 100, "Exceptional"),
    ]
    .into_iter()
    .map(|(min_score, max_score, label)| Band {
        min_score,
        max_score,
        label: label.to_string(),
        narrative: format!("{label} narrative"),
    })
    .collect()
}

pub(super) fn dimension(name: &str, weight: u32, description: &str) -> Dimension {
    Dimension {
        name: name.to_string(),
        weight,
        description: description.to_string(),
    }
}

pub(super) fn rubric(id: &str, dimensions: Vec<Dimension>) -> RubricDefinition {
    RubricDefinition {
        subcomponent_id: id.to_string(),
        display_name: format!("{id} worksheet"),
        dimensions,
        evaluation_bands: standard_bands(),
    }
}

pub(super) fn five_by_twenty(id: &str) -> RubricDefinition {
    rubric(
        id,
        vec![
            dimension("Clarity", 20, "Explains the idea plainly"),
            dimension("Evidence", 20, "Backs claims with research data"),
            dimension("Feasibility", 20, "Shows delivery is realistic"),
            dimension("Impact", 20, "Quantifies expected outcomes"),
            dimension("Alignment", 20, "Connects to strategic priorities"),
        ],
    )
}

pub(super) fn registry() -> Arc<RubricRegistry> {
    Arc::new(RubricRegistry::builtin().expect("builtin rubrics are valid"))
}

pub(super) fn engine(noise: NoiseMode) -> AssessmentEngine {
    AssessmentEngine::new(
        registry(),
        EngineConfig {
            noise,
            ..EngineConfig::default()
        },
    )
}

pub(super) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 24, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn score(name: &str, raw_score: u32, weight: u32) -> DimensionScore {
    DimensionScore::new(name, &format!("{name} description"), raw_score, weight)
}

/// Over 1600 characters and 220 words, naming every dimension of `rubric` once.
pub(super) fn substantive_submission(rubric: &RubricDefinition) -> Submission {
    let filler = "lorem ipsum dolor sit amet ".repeat(70);
    let names = rubric
        .dimensions
        .iter()
        .map(|dimension| dimension.name.as_str())
        .collect::<Vec<_>>()
        .join(" and ");

    Submission::new(&rubric.subcomponent_id)
        .with_field("answer_1", format!("Our worksheet covers {names}."))
        .with_field("answer_2", filler)
}
