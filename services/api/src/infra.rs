use metrics_exporter_prometheus::PrometheusHandle;
use rubric_assess::assessment::RubricRegistry;
use rubric_assess::config::AppConfig;
use rubric_assess::error::AppError;
use rubric_assess::AssessmentService;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Registry from `ASSESS_RUBRICS_PATH` when configured, else the built-in catalogue.
pub(crate) fn load_registry(config: &AppConfig) -> Result<Arc<RubricRegistry>, AppError> {
    let registry = match &config.rubrics_path {
        Some(path) => RubricRegistry::from_path(path)?,
        None => {
            let registry = RubricRegistry::builtin()?;
            info!(rubrics = registry.len(), "using built-in rubric catalogue");
            registry
        }
    };
    Ok(Arc::new(registry))
}

pub(crate) fn build_service(config: &AppConfig) -> Result<Arc<AssessmentService>, AppError> {
    let registry = load_registry(config)?;
    Ok(Arc::new(AssessmentService::new(registry, config.engine)))
}

/// Worksheet answers stored as a flat JSON object of field name to text.
pub(crate) fn read_answers(path: &Path) -> Result<BTreeMap<String, String>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    parse_answers(&raw)
}

pub(crate) fn parse_answers(raw: &str) -> Result<BTreeMap<String, String>, AppError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|err| AppError::InvalidInput(format!("answers must be JSON: {err}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| AppError::InvalidInput("answers must be a JSON object".to_string()))?;

    Ok(object
        .iter()
        .filter_map(|(field, value)| match value {
            serde_json::Value::String(text) => Some((field.clone(), text.clone())),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_string_fields() {
        let answers =
            parse_answers(r#"{"problem": "Slow invoicing", "rating": 4, "notes": null}"#)
                .expect("answers parse");

        assert_eq!(answers.len(), 1);
        assert_eq!(answers["problem"], "Slow invoicing");
    }

    #[test]
    fn rejects_non_object_answers() {
        assert!(matches!(
            parse_answers("[\"a\"]"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_answers("not json"),
            Err(AppError::InvalidInput(_))
        ));
    }
}
