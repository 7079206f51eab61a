//! Unit tests for config validation and decoding

use bidrules_core::Stage;
use bidrules_parser::{ConfigValidator, ParseError};
use serde_json::json;

fn sample_config() -> serde_json::Value {
    json!({
        "enabled": true,
        "timestamp": "20250131 00:00:00",
        "ruleSets": [{
            "stage": "processed-auction-request",
            "name": "exclude-by-channel",
            "version": "1234",
            "modelGroups": [{
                "weight": 100,
                "analyticsKey": "channel-test",
                "version": "4567",
                "schema": [
                    {"function": "deviceCountryIn", "args": {"countries": ["USA"]}},
                    {"function": "eidAvailable"},
                    {"function": "channel"}
                ],
                "default": [],
                "rules": [
                    {"conditions": ["true", "true", "amp"], "results": [{"function": "excludeBidders", "args": {"bidders": ["bidderA"]}}]},
                    {"conditions": ["true", "true", "web"], "results": [{"function": "excludeBidders", "args": {"bidders": ["bidderB"]}}]},
                    {"conditions": ["true", "true", "*"], "results": [{"function": "includeBidders", "args": {"bidders": ["bidderC"]}}]}
                ]
            }]
        }]
    })
}

fn to_bytes(value: &serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap()
}

fn assert_violation(value: serde_json::Value) {
    let validator = ConfigValidator::new().unwrap();
    match validator.parse(&to_bytes(&value)) {
        Err(ParseError::SchemaViolation(violations)) => assert!(!violations.is_empty()),
        other => panic!("expected schema violation, got {:?}", other),
    }
}

#[test]
fn test_parse_sample_config() {
    let validator = ConfigValidator::new().unwrap();
    let config = validator.parse(&to_bytes(&sample_config())).unwrap();

    assert!(config.enabled);
    assert_eq!(config.rule_sets.len(), 1);

    let rule_set = &config.rule_sets[0];
    assert_eq!(rule_set.stage, Stage::ProcessedAuctionRequest);
    assert_eq!(rule_set.name, "exclude-by-channel");

    let group = &rule_set.model_groups[0];
    assert_eq!(group.schema.len(), 3);
    assert_eq!(group.rules.len(), 3);
    assert_eq!(group.rules[2].conditions, vec!["true", "true", "*"]);
}

#[test]
fn test_validate_accepts_sample_config() {
    let validator = ConfigValidator::new().unwrap();
    assert!(validator.validate(&to_bytes(&sample_config())).is_ok());
}

#[test]
fn test_unknown_function_name_passes_schema() {
    // Function names are resolved by the compiler, not the schema
    let mut config = sample_config();
    config["ruleSets"][0]["modelGroups"][0]["schema"][0]["function"] = json!("doesNotExist");

    let validator = ConfigValidator::new().unwrap();
    assert!(validator.parse(&to_bytes(&config)).is_ok());
}

#[test]
fn test_unknown_stage_rejected() {
    let mut config = sample_config();
    config["ruleSets"][0]["stage"] = json!("post-auction");
    assert_violation(config);
}

#[test]
fn test_weight_out_of_range_rejected() {
    let mut config = sample_config();
    config["ruleSets"][0]["modelGroups"][0]["weight"] = json!(0);
    assert_violation(config.clone());

    config["ruleSets"][0]["modelGroups"][0]["weight"] = json!(101);
    assert_violation(config);
}

#[test]
fn test_empty_schema_rejected() {
    let mut config = sample_config();
    config["ruleSets"][0]["modelGroups"][0]["schema"] = json!([]);
    assert_violation(config);
}

#[test]
fn test_rule_without_results_rejected() {
    let mut config = sample_config();
    config["ruleSets"][0]["modelGroups"][0]["rules"][0] = json!({"conditions": ["true", "true", "amp"]});
    assert_violation(config);
}

#[test]
fn test_non_string_condition_rejected() {
    let mut config = sample_config();
    config["ruleSets"][0]["modelGroups"][0]["rules"][0]["conditions"] = json!([true, "true", "amp"]);
    assert_violation(config);
}

#[test]
fn test_enabled_must_be_boolean() {
    let mut config = sample_config();
    config["enabled"] = json!("yes");
    assert_violation(config);
}

#[test]
fn test_disabled_config_still_parses() {
    let mut config = sample_config();
    config["enabled"] = json!(false);

    let validator = ConfigValidator::new().unwrap();
    let parsed = validator.parse(&to_bytes(&config)).unwrap();
    assert!(!parsed.enabled);
}

#[test]
fn test_not_json() {
    let validator = ConfigValidator::new().unwrap();
    assert!(matches!(
        validator.parse(b"not json at all"),
        Err(ParseError::Json(_))
    ));
}
