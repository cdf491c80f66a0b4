use super::rubric::Band;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Free-text worksheet answers for one subcomponent, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub subcomponent_id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Submission {
    pub fn new(subcomponent_id: impl Into<String>) -> Self {
        Self {
            subcomponent_id: subcomponent_id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields.insert(name.into(), text.into());
        self
    }
}

/// Score awarded to a single rubric dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub name: String,
    pub raw_score: u32,
    pub weight: u32,
    pub percentage: f32,
    pub description: String,
}

impl DimensionScore {
    pub fn new(name: &str, description: &str, raw_score: u32, weight: u32) -> Self {
        let raw_score = raw_score.min(weight);
        let percentage = if weight == 0 {
            0.0
        } else {
            raw_score as f32 / weight as f32
        };

        Self {
            name: name.to_string(),
            raw_score,
            weight,
            percentage,
            description: description.to_string(),
        }
    }

    pub fn shortfall(&self) -> u32 {
        self.weight.saturating_sub(self.raw_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Templated guidance tied to one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub dimension: String,
    pub priority: Priority,
    pub text: String,
    pub estimated_impact_points: Option<u32>,
}

/// Qualitative tier resolved from the total score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluationTier {
    Band(Band),
    /// No band contains the score; the rubric bands are misconfigured.
    OutOfRange { total_score: u32 },
}

impl EvaluationTier {
    pub fn label(&self) -> &str {
        match self {
            EvaluationTier::Band(band) => &band.label,
            EvaluationTier::OutOfRange { .. } => "Out of range",
        }
    }

    pub fn narrative(&self) -> &str {
        match self {
            EvaluationTier::Band(band) => &band.narrative,
            EvaluationTier::OutOfRange { .. } => {
                "The score could not be matched to an evaluation band for this worksheet."
            }
        }
    }

    pub fn band(&self) -> Option<&Band> {
        match self {
            EvaluationTier::Band(band) => Some(band),
            EvaluationTier::OutOfRange { .. } => None,
        }
    }
}

/// Non-fatal conditions noticed while analysing a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    ScoreOutsideBands { total_score: u32 },
    CorpusTruncated { original_chars: usize, kept_chars: usize },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::ScoreOutsideBands { total_score } => {
                write!(f, "total score {total_score} falls outside every evaluation band")
            }
            AnalysisWarning::CorpusTruncated {
                original_chars,
                kept_chars,
            } => write!(
                f,
                "submission text truncated from {original_chars} to {kept_chars} characters"
            ),
        }
    }
}

/// Scored worksheet with tier and prioritized guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub subcomponent_id: String,
    pub display_name: String,
    pub total_score: u32,
    pub max_score: u32,
    pub dimension_scores: Vec<DimensionScore>,
    pub evaluation_tier: EvaluationTier,
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AnalysisWarning>,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{}: {}/{} ({})",
            self.display_name,
            self.total_score,
            self.max_score,
            self.evaluation_tier.label()
        );
        if let Some(first) = self
            .recommendations
            .iter()
            .find(|recommendation| recommendation.priority != Priority::Low)
        {
            summary.push_str(&format!(", focus on {}", first.dimension));
        }
        summary
    }
}
