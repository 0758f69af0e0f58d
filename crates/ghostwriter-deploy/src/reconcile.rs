//! The reconciliation algorithm: converge remote state to the desired
//! configuration.
//!
//! Resolve by display name, create or update, then link the phone number.
//! Dry-run computes the intended action with zero remote calls. Any client
//! failure aborts the run; there is no partial retry and no rollback of a
//! just-created or just-updated assistant.

use tracing::info;

use crate::{
    assistant::AssistantConfig,
    client::AssistantApi,
    error::Result,
};

/// Result of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Remote state was converged; carries the canonical assistant id.
    Applied {
        /// Identifier of the created or updated assistant.
        assistant_id: String,
    },
    /// Dry-run sentinel: nothing was touched.
    DryRun,
}

impl ReconcileOutcome {
    /// The canonical assistant id, when one was produced.
    pub fn assistant_id(&self) -> Option<&str> {
        match self {
            Self::Applied { assistant_id } => Some(assistant_id),
            Self::DryRun => None,
        }
    }

    /// Whether this run was a dry-run no-op.
    pub fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun)
    }
}

/// Converges the remote assistant to `config` and links the phone number.
///
/// Steps:
/// 1. Dry-run: return [`ReconcileOutcome::DryRun`] without invoking the API.
/// 2. List assistants; the first whose name equals `config.name` wins.
///    Under duplicate names this is first-match-wins in list order, a
///    documented limitation rather than a guarantee.
/// 3. Update the match in place, or create when none exists. The resulting
///    id is canonical for this run.
/// 4. Link `phone_number_id` to the canonical id, replacing any prior link.
///
/// Concurrent runs for the same name are not synchronized; two racing
/// list-then-create sequences can produce duplicate names.
///
/// # Errors
///
/// Propagates the first [`crate::DeployError`] from the client verbatim,
/// aborting the remaining steps.
pub async fn reconcile(
    api: &dyn AssistantApi,
    config: &AssistantConfig,
    phone_number_id: &str,
    dry_run: bool,
) -> Result<ReconcileOutcome> {
    if dry_run {
        info!(assistant = %config.name, "Dry run: would create or update assistant and link phone number");
        return Ok(ReconcileOutcome::DryRun);
    }

    let assistants = api.list_assistants().await?;
    let existing = assistants.into_iter().find(|a| a.name == config.name);

    let assistant_id = match existing {
        Some(found) => {
            info!(assistant_id = %found.id, "Updating existing assistant");
            api.update_assistant(found.id.clone(), config.clone()).await?;
            found.id
        },
        None => {
            info!(assistant = %config.name, "Creating new assistant");
            api.create_assistant(config.clone()).await?.id
        },
    };

    info!(
        phone_number_id = %phone_number_id,
        assistant_id = %assistant_id,
        "Linking phone number to assistant"
    );
    api.link_phone_number(phone_number_id.to_string(), assistant_id.clone()).await?;

    Ok(ReconcileOutcome::Applied { assistant_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockAssistantApi, RecordedCall};

    fn desired() -> AssistantConfig {
        AssistantConfig::build("https://cb.example/")
    }

    #[tokio::test]
    async fn dry_run_makes_zero_api_calls() {
        let api = MockAssistantApi::new();

        let outcome = reconcile(&api, &desired(), "phn_1", true).await.unwrap();

        assert_eq!(outcome, ReconcileOutcome::DryRun);
        assert!(outcome.is_dry_run());
        assert_eq!(outcome.assistant_id(), None);
        assert_eq!(api.call_count().await, 0);
    }

    #[tokio::test]
    async fn duplicate_names_resolve_to_first_in_list_order() {
        let api = MockAssistantApi::new();
        api.seed_assistant("asst_first", "Ghostwriter").await;
        api.seed_assistant("asst_second", "Ghostwriter").await;

        let outcome = reconcile(&api, &desired(), "phn_1", false).await.unwrap();

        assert_eq!(outcome.assistant_id(), Some("asst_first"));
        let calls = api.recorded_calls().await;
        assert!(calls
            .iter()
            .any(|c| matches!(c, RecordedCall::Update { assistant_id, .. } if assistant_id == "asst_first")));
    }

    #[tokio::test]
    async fn name_match_is_exact() {
        let api = MockAssistantApi::new();
        api.seed_assistant("asst_lower", "ghostwriter").await;

        reconcile(&api, &desired(), "phn_1", false).await.unwrap();

        // Case differs, so the reconciler creates rather than updates.
        let calls = api.recorded_calls().await;
        assert!(calls.iter().any(|c| matches!(c, RecordedCall::Create { .. })));
        assert!(!calls.iter().any(|c| matches!(c, RecordedCall::Update { .. })));
    }
}
