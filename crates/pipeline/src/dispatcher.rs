//! Trigger dispatch: builds the kind-specific payload, submits it and
//! classifies the response into a [`RunOutcome`].

use tracing::{debug, info, warn};

use crate::definitions::web_href;
use crate::diagnostics::to_log_json;
use crate::{
    ArtifactLink, BuildDefinition, BuildQueueRequest, BuildReason, DefinitionHandle,
    DevOpsClient, ProjectHandle, ProjectName, QueuedBuild, ReleaseDefinition, ReleaseReason,
    ReleaseStartRequest, RunOutcome, SourceLinkage, TriggerError, ValidationResult,
};

/// Builds the queue payload for a YAML pipeline.
pub fn build_queue_request(
    definition: &BuildDefinition,
    linkage: SourceLinkage,
) -> BuildQueueRequest {
    BuildQueueRequest {
        definition: DefinitionHandle { id: definition.id },
        project: ProjectHandle {
            id: definition.project.id.clone(),
        },
        source_branch: linkage.branch,
        source_version: linkage.commit,
        reason: BuildReason::Triggered,
    }
}

/// Builds the create payload for a designer pipeline.
pub fn release_start_request(
    definition: &ReleaseDefinition,
    artifacts: Vec<ArtifactLink>,
) -> ReleaseStartRequest {
    ReleaseStartRequest {
        definition_id: definition.id,
        reason: ReleaseReason::ContinuousIntegration,
        artifacts,
    }
}

/// Queues a build and classifies the result.
///
/// # Errors
///
/// [`TriggerError::Remote`] when the client fails. A rejected request is an
/// outcome ([`RunOutcome::ValidationFailed`]), not an error.
pub async fn dispatch_build<C>(
    client: &C,
    definition: &BuildDefinition,
    linkage: SourceLinkage,
) -> Result<RunOutcome, TriggerError>
where
    C: DevOpsClient + ?Sized,
{
    let request = build_queue_request(definition, linkage);
    debug!(payload = %to_log_json(&request), "Queueing build");

    let Some(build) = client.queue_build(&request.project.id, &request).await? else {
        warn!(definition = %definition.id, "Queue call returned no build");
        return Ok(RunOutcome::NotFound);
    };
    debug!(result = %to_log_json(&build), "Queue call returned");

    Ok(classify_build(build))
}

/// Creates a release and classifies the result.
///
/// # Errors
///
/// [`TriggerError::Remote`] when the client fails.
pub async fn dispatch_release<C>(
    client: &C,
    project: &ProjectName,
    definition: &ReleaseDefinition,
    artifacts: Vec<ArtifactLink>,
) -> Result<RunOutcome, TriggerError>
where
    C: DevOpsClient + ?Sized,
{
    let request = release_start_request(definition, artifacts);
    debug!(payload = %to_log_json(&request), "Creating release");

    // TODO: decide with product whether a missing release body should fail the
    // invocation; it is reported as NotFound (success) for now.
    let Some(release) = client.create_release(project, &request).await? else {
        warn!(definition = %definition.id, "Create call returned no release");
        return Ok(RunOutcome::NotFound);
    };
    debug!(result = %to_log_json(&release), "Create call returned");

    Ok(RunOutcome::Queued {
        run_id: release.id,
        web_url: web_href(release.links.as_ref()),
    })
}

fn classify_build(build: QueuedBuild) -> RunOutcome {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for entry in build.validation_results {
        match entry.result {
            ValidationResult::Error => errors.push(entry.message),
            ValidationResult::Warning => warnings.push(entry.message),
            ValidationResult::Ok | ValidationResult::Unknown => {}
        }
    }

    if !errors.is_empty() || !warnings.is_empty() {
        return RunOutcome::ValidationFailed { errors, warnings };
    }

    if let Some(number) = &build.build_number {
        info!(build_number = %number, "Build queued");
    }
    RunOutcome::Queued {
        run_id: build.id,
        web_url: web_href(build.links.as_ref()),
    }
}
