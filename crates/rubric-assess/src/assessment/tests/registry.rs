use super::common::*;
use crate::assessment::{AssessmentError, RegistryError, RubricRegistry, TOTAL_WEIGHT};

#[test]
fn builtin_rubrics_distribute_all_points() {
    let registry = registry();

    assert!(!registry.is_empty());
    for summary in registry.subcomponents() {
        let rubric = registry
            .lookup(&summary.subcomponent_id)
            .expect("listed rubric resolves");
        assert_eq!(rubric.total_weight(), TOTAL_WEIGHT);
        assert_eq!(summary.dimension_count, rubric.dimensions.len());
    }
}

#[test]
fn builtin_bands_partition_the_score_range() {
    let registry = registry();

    for summary in registry.subcomponents() {
        let rubric = registry
            .lookup(&summary.subcomponent_id)
            .expect("listed rubric resolves");
        for score in 0..=TOTAL_WEIGHT {
            let matching = rubric
                .evaluation_bands
                .iter()
                .filter(|band| band.contains(score))
                .count();
            assert_eq!(matching, 1, "score {score} in {}", rubric.subcomponent_id);
        }
    }
}

#[test]
fn lookup_of_unknown_id_is_typed_not_found() {
    let registry = registry();

    match registry.lookup("does-not-exist") {
        Err(AssessmentError::UnknownSubcomponent { id }) => assert_eq!(id, "does-not-exist"),
        other => panic!("expected unknown subcomponent, got {other:?}"),
    }
    assert!(!registry.contains("does-not-exist"));
}

#[test]
fn rejects_weights_not_summing_to_hundred() {
    let mut definition = five_by_twenty("short");
    definition.dimensions[0].weight = 10;

    match RubricRegistry::new(vec![definition]) {
        Err(RegistryError::WeightSum { id, total }) => {
            assert_eq!(id, "short");
            assert_eq!(total, 90);
        }
        other => panic!("expected weight sum error, got {other:?}"),
    }
}

#[test]
fn rejects_zero_weight_dimension() {
    let mut definition = five_by_twenty("zero");
    definition.dimensions[0].weight = 0;
    definition.dimensions[1].weight = 40;

    assert!(matches!(
        RubricRegistry::new(vec![definition]),
        Err(RegistryError::ZeroWeight { .. })
    ));
}

#[test]
fn rejects_band_gaps_and_overlaps() {
    let mut gap = five_by_twenty("gap");
    gap.evaluation_bands[1].min_score = 27;
    assert!(matches!(
        RubricRegistry::new(vec![gap]),
        Err(RegistryError::BandDiscontinuity { expected: 26, .. })
    ));

    let mut overlap = five_by_twenty("overlap");
    overlap.evaluation_bands[2].min_score = 50;
    assert!(matches!(
        RubricRegistry::new(vec![overlap]),
        Err(RegistryError::BandDiscontinuity { expected: 51, .. })
    ));

    let mut short = five_by_twenty("short-bands");
    short.evaluation_bands.pop();
    assert!(matches!(
        RubricRegistry::new(vec![short]),
        Err(RegistryError::BandCoverage { end: 90, .. })
    ));
}

#[test]
fn rejects_duplicate_ids() {
    let result = RubricRegistry::new(vec![five_by_twenty("dup"), five_by_twenty("dup")]);
    assert!(matches!(result, Err(RegistryError::Duplicate { id }) if id == "dup"));
}

#[test]
fn loads_catalogue_from_json() {
    let raw = serde_json::json!({ "rubrics": [five_by_twenty("custom")] }).to_string();

    let registry = RubricRegistry::from_json_str(&raw).expect("catalogue parses");

    assert_eq!(registry.len(), 1);
    let rubric = registry.lookup("custom").expect("custom rubric present");
    assert_eq!(rubric.dimensions[1].name, "Evidence");
}

#[test]
fn reports_malformed_catalogue() {
    assert!(matches!(
        RubricRegistry::from_json_str("{ \"rubrics\": 3 }"),
        Err(RegistryError::Parse(_))
    ));
    assert!(matches!(
        RubricRegistry::from_path("/nonexistent/rubrics.json"),
        Err(RegistryError::Io { .. })
    ));
}
