//! Execution tests for compiled decision trees

use bidrules_compiler::RulesCompiler;
use bidrules_core::{
    AuctionRequest, ChangeSet, CompiledModelGroup, ModelGroup, Mutation, RequestPayload,
};
use bidrules_runtime::{RuntimeError, TreeExecutor};
use serde_json::json;

fn compile(group: serde_json::Value) -> CompiledModelGroup {
    let group: ModelGroup = serde_json::from_value(group).unwrap();
    RulesCompiler::new().compile_model_group(&group).unwrap()
}

fn run(group: &CompiledModelGroup, request: &AuctionRequest) -> ChangeSet {
    TreeExecutor::new()
        .execute(group, &RequestPayload::new(request))
        .unwrap()
}

fn country_group() -> CompiledModelGroup {
    compile(json!({
        "analyticsKey": "country",
        "version": "1",
        "schema": [{"function": "deviceCountry", "args": {"countries": ["USA"]}}],
        "rules": [{
            "conditions": ["true"],
            "results": [{"function": "includeBidders", "args": {"bidders": ["bidderC"]}}]
        }]
    }))
}

fn channel_group() -> CompiledModelGroup {
    compile(json!({
        "analyticsKey": "channel",
        "version": "2",
        "schema": [
            {"function": "deviceCountryIn", "args": {"countries": ["USA"]}},
            {"function": "eidAvailable"},
            {"function": "channel"}
        ],
        "default": [{"function": "logATag", "args": {"analyticsValue": "fallback"}}],
        "rules": [
            {"conditions": ["true", "true", "amp"], "results": [{"function": "excludeBidders", "args": {"bidders": ["bidderA"]}}]},
            {"conditions": ["true", "true", "web"], "results": [{"function": "excludeBidders", "args": {"bidders": ["bidderB"]}}]},
            {"conditions": ["true", "true", "*"], "results": [{"function": "includeBidders", "args": {"bidders": ["bidderC"], "analyticsValue": "wildcard"}}]}
        ]
    }))
}

fn usa_with_eid(channel: &str) -> AuctionRequest {
    AuctionRequest::new("req")
        .with_country("USA")
        .with_eid("liveramp.com")
        .with_channel(channel)
}

// =============================================================================
// Matching paths
// =============================================================================

#[test]
fn test_country_match_includes_bidder() {
    let cs = run(&country_group(), &AuctionRequest::new("req").with_country("USA"));

    assert_eq!(cs.len(), 1);
    assert_eq!(cs.included_bidders(), vec!["bidderC"]);
}

#[test]
fn test_country_miss_applies_empty_defaults() {
    let cs = run(&country_group(), &AuctionRequest::new("req").with_country("FRA"));
    assert!(cs.is_empty());
}

#[test]
fn test_amp_channel_selects_first_rule() {
    let cs = run(&channel_group(), &usa_with_eid("amp"));

    assert_eq!(cs.excluded_bidders(), vec!["bidderA"]);
    assert!(cs.included_bidders().is_empty());
}

#[test]
fn test_pbjs_channel_is_web() {
    let cs = run(&channel_group(), &usa_with_eid("pbjs"));
    assert_eq!(cs.excluded_bidders(), vec!["bidderB"]);
}

#[test]
fn test_wildcard_catches_other_channels() {
    let cs = run(&channel_group(), &usa_with_eid("app"));

    assert_eq!(cs.included_bidders(), vec!["bidderC"]);
    let tags = cs.analytics_tags();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].analytics_key, "channel");
    assert_eq!(tags[0].model_version, "2");
    assert_eq!(tags[0].rule_fired, "true|true|*");
}

#[test]
fn test_no_branch_applies_configured_defaults() {
    // No EIDs: the second level yields "false", which has no edge
    let request = AuctionRequest::new("req").with_country("USA").with_channel("amp");
    let cs = run(&channel_group(), &request);

    assert_eq!(cs.len(), 1);
    let tags = cs.analytics_tags();
    assert_eq!(tags[0].analytics_value, "fallback");
    assert_eq!(tags[0].rule_fired, "default");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_schema_function_error_surfaces() {
    // Missing channel makes the third level fail
    let request = AuctionRequest::new("req").with_country("USA").with_eid("x");
    let result = TreeExecutor::new().execute(&channel_group(), &RequestPayload::new(&request));

    match result {
        Err(RuntimeError::SchemaFunction { function, .. }) => assert_eq!(function, "channel"),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_execute_or_default_falls_back() {
    let request = AuctionRequest::new("req").with_country("USA").with_eid("x");
    let (cs, error) =
        TreeExecutor::new().execute_or_default(&channel_group(), &RequestPayload::new(&request));

    assert!(error.is_some());
    assert_eq!(cs.analytics_tags()[0].analytics_value, "fallback");
}

#[test]
fn test_execute_or_default_without_error() {
    let (cs, error) = TreeExecutor::new()
        .execute_or_default(&channel_group(), &RequestPayload::new(&usa_with_eid("amp")));

    assert!(error.is_none());
    assert_eq!(cs.excluded_bidders(), vec!["bidderA"]);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_recompiled_tree_produces_same_output() {
    let first = channel_group();
    let second = channel_group();

    for channel in ["amp", "web", "pbjs", "app", "dooh"] {
        let request = usa_with_eid(channel);
        assert_eq!(run(&first, &request), run(&second, &request));
    }
}

#[test]
fn test_execution_does_not_mutate_request() {
    let request = usa_with_eid("amp");
    let before = request.clone();
    let group = channel_group();

    let a = run(&group, &request);
    let b = run(&group, &request);

    assert_eq!(request, before);
    assert_eq!(a, b);
}

#[test]
fn test_result_functions_run_in_order() {
    let group = compile(json!({
        "analyticsKey": "order",
        "schema": [{"function": "channel"}],
        "rules": [{
            "conditions": ["web"],
            "results": [
                {"function": "logATag", "args": {"analyticsValue": "first"}},
                {"function": "excludeBidders", "args": {"bidders": ["b1"]}},
                {"function": "logATag", "args": {"analyticsValue": "last"}}
            ]
        }]
    }));

    let cs = run(&group, &AuctionRequest::new("r").with_channel("web"));
    let kinds: Vec<_> = cs
        .iter()
        .map(|m| match m {
            Mutation::AnalyticsTag(t) => t.analytics_value.clone(),
            Mutation::ExcludeBidders(_) => "exclude".to_string(),
            Mutation::IncludeBidders(_) => "include".to_string(),
        })
        .collect();

    assert_eq!(kinds, vec!["first", "exclude", "last"]);
}
