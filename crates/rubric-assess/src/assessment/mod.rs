//! Worksheet scoring pipeline: features, per-dimension scores, tier, and guidance.

pub mod aggregate;
pub mod domain;
pub mod features;
mod noise;
pub mod recommendations;
pub mod rubric;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use domain::{
    AnalysisResult, AnalysisWarning, DimensionScore, EvaluationTier, Priority, Recommendation,
    Submission,
};
pub use features::{TextFeatureExtractor, TextFeatures};
pub use noise::{derive_seed, Noise, NoiseMode};
pub use rubric::{
    Band, Dimension, RegistryError, RubricDefinition, RubricRegistry, SubcomponentSummary,
    TOTAL_WEIGHT,
};
pub use scoring::{DimensionScorer, HeuristicScorer};

use crate::config::EngineConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Raised when a request cannot be served for the given worksheet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("assessment '{id}' is not available")]
    UnknownSubcomponent { id: String },
    #[error("score {score} is outside 0-{max}")]
    ScoreOutOfRange { score: u32, max: u32 },
}

/// Stateless evaluator applying the injected rubric registry to submissions.
pub struct AssessmentEngine {
    registry: Arc<RubricRegistry>,
    config: EngineConfig,
    extractor: TextFeatureExtractor,
    scorer: Box<dyn DimensionScorer>,
}

impl AssessmentEngine {
    pub fn new(registry: Arc<RubricRegistry>, config: EngineConfig) -> Self {
        Self::with_scorer(registry, config, HeuristicScorer)
    }

    pub fn with_scorer(
        registry: Arc<RubricRegistry>,
        config: EngineConfig,
        scorer: impl DimensionScorer + 'static,
    ) -> Self {
        Self {
            registry,
            extractor: TextFeatureExtractor::new(config.max_corpus_chars),
            config,
            scorer: Box::new(scorer),
        }
    }

    pub fn registry(&self) -> &RubricRegistry {
        &self.registry
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn analyze(&self, submission: &Submission) -> Result<AnalysisResult, AssessmentError> {
        self.analyze_at(submission, Utc::now())
    }

    /// Score with the configured noise mode and an explicit timestamp.
    pub fn analyze_at(
        &self,
        submission: &Submission,
        timestamp: DateTime<Utc>,
    ) -> Result<AnalysisResult, AssessmentError> {
        let mut noise = self.config.noise.for_submission(submission);
        self.analyze_with(submission, &mut noise, timestamp)
    }

    /// Score drawing every random term from `noise`.
    pub fn analyze_with(
        &self,
        submission: &Submission,
        noise: &mut Noise,
        timestamp: DateTime<Utc>,
    ) -> Result<AnalysisResult, AssessmentError> {
        let rubric = self.registry.lookup(&submission.subcomponent_id)?;
        let features = self.extractor.extract(submission);

        let dimension_scores: Vec<DimensionScore> = rubric
            .dimensions
            .iter()
            .map(|dimension| self.scorer.score(dimension, &features, noise))
            .collect();

        let total_score = aggregate::aggregate(&dimension_scores);
        let evaluation_tier = aggregate::select_tier(rubric, total_score);
        let recommendations = recommendations::generate(rubric, &dimension_scores);

        let mut warnings = Vec::new();
        if let Some(original_chars) = features.truncated_from {
            warnings.push(AnalysisWarning::CorpusTruncated {
                original_chars,
                kept_chars: features.char_length,
            });
        }
        if let EvaluationTier::OutOfRange { total_score } = evaluation_tier {
            warnings.push(AnalysisWarning::ScoreOutsideBands { total_score });
        }

        debug!(
            subcomponent = %rubric.subcomponent_id,
            total_score,
            tier = evaluation_tier.label(),
            recommendations = recommendations.len(),
            "analysed submission"
        );

        Ok(AnalysisResult {
            subcomponent_id: rubric.subcomponent_id.clone(),
            display_name: rubric.display_name.clone(),
            total_score,
            max_score: TOTAL_WEIGHT,
            dimension_scores,
            evaluation_tier,
            recommendations,
            warnings,
            timestamp,
        })
    }
}
