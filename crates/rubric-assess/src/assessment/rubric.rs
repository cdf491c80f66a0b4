use super::AssessmentError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Points every rubric distributes across its dimensions.
pub const TOTAL_WEIGHT: u32 = 100;

const BUILTIN_CATALOGUE: &str = include_str!("../../rubrics/default.json");

/// One weighted axis of a rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    pub weight: u32,
    pub description: String,
}

/// Inclusive score range mapped to a qualitative tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub min_score: u32,
    pub max_score: u32,
    pub label: String,
    pub narrative: String,
}

impl Band {
    pub fn contains(&self, score: u32) -> bool {
        (self.min_score..=self.max_score).contains(&score)
    }
}

/// Ordered dimensions and evaluation bands for one assessable subcomponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricDefinition {
    pub subcomponent_id: String,
    pub display_name: String,
    pub dimensions: Vec<Dimension>,
    pub evaluation_bands: Vec<Band>,
}

impl RubricDefinition {
    pub fn total_weight(&self) -> u32 {
        self.dimensions
            .iter()
            .fold(0u32, |total, dimension| total.saturating_add(dimension.weight))
    }

    /// Reject definitions that would break the score/tier invariants downstream.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let id = &self.subcomponent_id;
        if id.trim().is_empty() {
            return Err(RegistryError::EmptyId);
        }
        if self.dimensions.is_empty() {
            return Err(RegistryError::NoDimensions { id: id.clone() });
        }
        if let Some(dimension) = self.dimensions.iter().find(|d| d.weight == 0) {
            return Err(RegistryError::ZeroWeight {
                id: id.clone(),
                dimension: dimension.name.clone(),
            });
        }
        let total = self.total_weight();
        if total != TOTAL_WEIGHT {
            return Err(RegistryError::WeightSum {
                id: id.clone(),
                total,
            });
        }

        if self.evaluation_bands.is_empty() {
            return Err(RegistryError::NoBands { id: id.clone() });
        }
        let mut expected = 0;
        for band in &self.evaluation_bands {
            if band.min_score > band.max_score {
                return Err(RegistryError::InvertedBand {
                    id: id.clone(),
                    label: band.label.clone(),
                });
            }
            if band.min_score != expected {
                return Err(RegistryError::BandDiscontinuity {
                    id: id.clone(),
                    label: band.label.clone(),
                    expected,
                });
            }
            expected = band.max_score.saturating_add(1);
        }
        let end = expected - 1;
        if end != TOTAL_WEIGHT {
            return Err(RegistryError::BandCoverage { id: id.clone(), end });
        }

        Ok(())
    }
}

/// Defects found while loading rubric definitions.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("rubric subcomponent id must not be empty")]
    EmptyId,
    #[error("rubric '{id}' defines no dimensions")]
    NoDimensions { id: String },
    #[error("rubric '{id}' dimension '{dimension}' must carry a positive weight")]
    ZeroWeight { id: String, dimension: String },
    #[error("rubric '{id}' dimension weights sum to {total}, expected 100")]
    WeightSum { id: String, total: u32 },
    #[error("rubric '{id}' defines no evaluation bands")]
    NoBands { id: String },
    #[error("rubric '{id}' band '{label}' has min above max")]
    InvertedBand { id: String, label: String },
    #[error("rubric '{id}' band '{label}' should start at {expected} (gap or overlap)")]
    BandDiscontinuity {
        id: String,
        label: String,
        expected: u32,
    },
    #[error("rubric '{id}' bands end at {end}, expected 100")]
    BandCoverage { id: String, end: u32 },
    #[error("rubric '{id}' is defined more than once")]
    Duplicate { id: String },
    #[error("failed to parse rubric catalogue: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read rubric catalogue {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Deserialize)]
struct RubricCatalogue {
    rubrics: Vec<RubricDefinition>,
}

/// Catalogue entry exposed to hosts listing available worksheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcomponentSummary {
    pub subcomponent_id: String,
    pub display_name: String,
    pub dimension_count: usize,
}

/// Read-only table of validated rubrics keyed by subcomponent id.
#[derive(Debug, Clone)]
pub struct RubricRegistry {
    rubrics: Vec<RubricDefinition>,
    index: HashMap<String, usize>,
}

impl RubricRegistry {
    pub fn new(rubrics: Vec<RubricDefinition>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(rubrics.len());
        for (position, rubric) in rubrics.iter().enumerate() {
            rubric.validate()?;
            if index
                .insert(rubric.subcomponent_id.clone(), position)
                .is_some()
            {
                return Err(RegistryError::Duplicate {
                    id: rubric.subcomponent_id.clone(),
                });
            }
        }

        Ok(Self { rubrics, index })
    }

    /// Rubrics shipped with the crate.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json_str(BUILTIN_CATALOGUE)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RegistryError> {
        let catalogue: RubricCatalogue = serde_json::from_str(raw)?;
        Self::new(catalogue.rubrics)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_json_str(&raw)?;
        info!(path = %path.display(), rubrics = registry.len(), "loaded rubric catalogue");
        Ok(registry)
    }

    pub fn lookup(&self, subcomponent_id: &str) -> Result<&RubricDefinition, AssessmentError> {
        self.index
            .get(subcomponent_id)
            .map(|position| &self.rubrics[*position])
            .ok_or_else(|| AssessmentError::UnknownSubcomponent {
                id: subcomponent_id.to_string(),
            })
    }

    pub fn contains(&self, subcomponent_id: &str) -> bool {
        self.index.contains_key(subcomponent_id)
    }

    pub fn subcomponents(&self) -> Vec<SubcomponentSummary> {
        self.rubrics
            .iter()
            .map(|rubric| SubcomponentSummary {
                subcomponent_id: rubric.subcomponent_id.clone(),
                display_name: rubric.display_name.clone(),
                dimension_count: rubric.dimensions.len(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rubrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rubrics.is_empty()
    }
}
