//! Integration tests for the reconciliation algorithm.
//!
//! Uses the recording mock to assert the exact call sequence: zero calls
//! under dry-run, create-xor-update, and link exactly once on every
//! successful run.

use ghostwriter_deploy::{
    client::mock::{MockAssistantApi, RecordedCall},
    reconcile, AssistantConfig, DeployError, ReconcileOutcome,
};

fn desired() -> AssistantConfig {
    AssistantConfig::build("https://cb.example/")
}

#[tokio::test]
async fn dry_run_is_observably_side_effect_free() {
    let api = MockAssistantApi::new();
    api.seed_assistant("asst_1", "Ghostwriter").await;

    let outcome = reconcile(&api, &desired(), "phn_1", true).await.unwrap();

    assert_eq!(outcome, ReconcileOutcome::DryRun);
    // Zero invocations, not merely fewer.
    assert_eq!(api.call_count().await, 0);
}

#[tokio::test]
async fn empty_remote_creates_exactly_once_and_never_updates() {
    let api = MockAssistantApi::new();

    let outcome = reconcile(&api, &desired(), "phn_1", false).await.unwrap();

    let calls = api.recorded_calls().await;
    let creates = calls.iter().filter(|c| matches!(c, RecordedCall::Create { .. })).count();
    let updates = calls.iter().filter(|c| matches!(c, RecordedCall::Update { .. })).count();

    assert_eq!(creates, 1);
    assert_eq!(updates, 0);
    assert!(outcome.assistant_id().is_some());
}

#[tokio::test]
async fn existing_name_updates_exactly_once_and_never_creates() {
    let api = MockAssistantApi::new();
    api.seed_assistant("asst_existing", "Ghostwriter").await;
    api.seed_assistant("asst_other", "Receptionist").await;

    let outcome = reconcile(&api, &desired(), "phn_1", false).await.unwrap();

    assert_eq!(outcome.assistant_id(), Some("asst_existing"));

    let calls = api.recorded_calls().await;
    let creates = calls.iter().filter(|c| matches!(c, RecordedCall::Create { .. })).count();
    assert_eq!(creates, 0);

    let updates: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            RecordedCall::Update { assistant_id, .. } => Some(assistant_id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(updates, vec!["asst_existing"]);
}

#[tokio::test]
async fn link_happens_exactly_once_on_both_branches() {
    for seed_existing in [false, true] {
        let api = MockAssistantApi::new();
        if seed_existing {
            api.seed_assistant("asst_seeded", "Ghostwriter").await;
        }

        let outcome = reconcile(&api, &desired(), "phn_1", false).await.unwrap();
        let canonical = outcome.assistant_id().unwrap().to_string();

        let links: Vec<_> = api
            .recorded_calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::Link { phone_number_id, assistant_id } => {
                    Some((phone_number_id, assistant_id))
                },
                _ => None,
            })
            .collect();

        assert_eq!(links, vec![("phn_1".to_string(), canonical)]);
    }
}

/// Scenario: build then reconcile against an empty remote.
///
/// Exactly one create carrying the verbatim callback URL, followed by
/// exactly one link of the created id, returning that id.
#[tokio::test]
async fn fresh_deployment_creates_links_and_returns_the_new_id() {
    let api = MockAssistantApi::new();
    let config = AssistantConfig::build("https://cb.example/");

    let outcome = reconcile(&api, &config, "phn_1", false).await.unwrap();
    let created_id = outcome.assistant_id().unwrap().to_string();

    let calls = api.recorded_calls().await;
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], RecordedCall::List);

    match &calls[1] {
        RecordedCall::Create { config } => {
            assert_eq!(config.name, "Ghostwriter");
            assert_eq!(config.server_url, "https://cb.example/");
        },
        other => panic!("expected create, got {other:?}"),
    }

    assert_eq!(
        calls[2],
        RecordedCall::Link { phone_number_id: "phn_1".to_string(), assistant_id: created_id }
    );
}

#[tokio::test]
async fn list_failure_aborts_before_any_mutation() {
    let api = MockAssistantApi::new();
    api.fail_list(DeployError::api(500, "backend down")).await;

    let error = reconcile(&api, &desired(), "phn_1", false).await.unwrap_err();
    assert!(matches!(error, DeployError::Api { status: 500, .. }));

    let calls = api.recorded_calls().await;
    assert_eq!(calls, vec![RecordedCall::List]);
}

#[tokio::test]
async fn create_failure_aborts_without_linking() {
    let api = MockAssistantApi::new();
    api.fail_create(DeployError::api(422, "unknown voice")).await;

    let error = reconcile(&api, &desired(), "phn_1", false).await.unwrap_err();
    assert!(matches!(error, DeployError::Api { status: 422, .. }));

    let calls = api.recorded_calls().await;
    assert!(!calls.iter().any(|c| matches!(c, RecordedCall::Link { .. })));
}

#[tokio::test]
async fn update_failure_aborts_without_linking() {
    let api = MockAssistantApi::new();
    api.seed_assistant("asst_1", "Ghostwriter").await;
    api.fail_update(DeployError::api(401, "revoked key")).await;

    let error = reconcile(&api, &desired(), "phn_1", false).await.unwrap_err();
    assert!(error.is_auth_error());

    let calls = api.recorded_calls().await;
    assert!(!calls.iter().any(|c| matches!(c, RecordedCall::Link { .. })));
}

#[tokio::test]
async fn link_failure_propagates_with_no_retry() {
    let api = MockAssistantApi::new();
    api.fail_link(DeployError::network("connection reset")).await;

    let error = reconcile(&api, &desired(), "phn_1", false).await.unwrap_err();
    assert!(matches!(error, DeployError::Network { .. }));

    let links = api
        .recorded_calls()
        .await
        .into_iter()
        .filter(|c| matches!(c, RecordedCall::Link { .. }))
        .count();
    assert_eq!(links, 1);
}
