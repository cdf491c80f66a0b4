use crate::analytics::{
    BenchmarkResult, BenchmarkSource, HistoryPoint, HistorySource, SyntheticBenchmarks,
    SyntheticHistory,
};
use crate::assessment::{
    AnalysisResult, AssessmentEngine, AssessmentError, RubricRegistry, SubcomponentSummary,
    Submission, TOTAL_WEIGHT,
};
use crate::config::EngineConfig;
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Host-facing contract composing the scoring engine with analytics sources.
pub struct AssessmentService<B = SyntheticBenchmarks, H = SyntheticHistory> {
    engine: Arc<AssessmentEngine>,
    benchmarks: B,
    history: H,
}

impl AssessmentService {
    /// Engine plus the synthetic benchmark and history placeholders.
    pub fn new(registry: Arc<RubricRegistry>, config: EngineConfig) -> Self {
        Self::with_sources(
            Arc::new(AssessmentEngine::new(registry, config)),
            SyntheticBenchmarks::new(config.noise),
            SyntheticHistory::new(config.noise),
        )
    }
}

impl<B, H> AssessmentService<B, H>
where
    B: BenchmarkSource,
    H: HistorySource,
{
    pub fn with_sources(engine: Arc<AssessmentEngine>, benchmarks: B, history: H) -> Self {
        Self {
            engine,
            benchmarks,
            history,
        }
    }

    pub fn engine(&self) -> &AssessmentEngine {
        &self.engine
    }

    pub fn rubrics(&self) -> Vec<SubcomponentSummary> {
        self.engine.registry().subcomponents()
    }

    /// Score worksheet answers against the subcomponent's rubric.
    pub fn compute_analysis(
        &self,
        subcomponent_id: &str,
        fields: BTreeMap<String, String>,
    ) -> Result<AnalysisResult, AssessmentError> {
        let submission = Submission {
            subcomponent_id: subcomponent_id.to_string(),
            fields,
        };
        self.engine.analyze(&submission)
    }

    pub fn estimate_benchmark(
        &self,
        subcomponent_id: &str,
        score: u32,
    ) -> Result<BenchmarkResult, AssessmentError> {
        self.engine.registry().lookup(subcomponent_id)?;
        if score > TOTAL_WEIGHT {
            return Err(AssessmentError::ScoreOutOfRange {
                score,
                max: TOTAL_WEIGHT,
            });
        }
        Ok(self.benchmarks.estimate(subcomponent_id, score))
    }

    pub fn simulate_history(
        &self,
        subcomponent_id: &str,
        days: u32,
    ) -> Result<Vec<HistoryPoint>, AssessmentError> {
        self.simulate_history_until(subcomponent_id, days, Local::now().date_naive())
    }

    pub fn simulate_history_until(
        &self,
        subcomponent_id: &str,
        days: u32,
        today: NaiveDate,
    ) -> Result<Vec<HistoryPoint>, AssessmentError> {
        self.engine.registry().lookup(subcomponent_id)?;
        Ok(self.history.history(subcomponent_id, days, today))
    }
}
