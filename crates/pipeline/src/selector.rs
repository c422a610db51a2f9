//! Run-type selection: the two-tier YAML-then-designer attempt.
//!
//! ```text
//! AttemptYaml ──success──────────────▶ Done
//!      │──PipelineNotFound──▶ AttemptDesigner ──success──▶ Done
//!      │                              └──any error──▶ Failed
//!      └──any other error──────────────────────────▶ Failed
//! ```
//!
//! There is no third tier and nothing is retried.

use serde::Serialize;
use tracing::{debug, info_span, Instrument};

use crate::diagnostics::to_log_json;
use crate::{
    build_source_linkage, dispatch_build, dispatch_release, release_artifact_links,
    resolve_build_definition, resolve_release_definition, DefinitionId, DevOpsClient,
    InvocationContext, PipelineKind, PipelineName, ProjectName, RunOutcome, TriggerError,
    TriggerRequest,
};

/// What a completed trigger attempt produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerReport {
    /// Kind of pipeline that was triggered.
    pub kind: PipelineKind,
    /// Project the pipeline lives in.
    pub project: ProjectName,
    /// Id of the resolved definition.
    pub definition_id: DefinitionId,
    /// Name of the resolved definition.
    pub definition_name: PipelineName,
    /// Classified result of the trigger call.
    pub outcome: RunOutcome,
}

/// Triggers a pipeline on behalf of one invocation.
///
/// Holds no mutable state; one instance serves one sequential invocation.
pub struct PipelineTrigger<'a, C: ?Sized> {
    client: &'a C,
    context: &'a InvocationContext,
}

impl<'a, C> PipelineTrigger<'a, C>
where
    C: DevOpsClient + ?Sized,
{
    /// Creates a trigger over `client` for the event described by `context`.
    pub fn new(client: &'a C, context: &'a InvocationContext) -> Self {
        Self { client, context }
    }

    /// Resolves and triggers the requested pipeline.
    ///
    /// The YAML pipeline path is attempted first. Only
    /// [`TriggerError::PipelineNotFound`] from that attempt leads to the
    /// designer pipeline path; its result is final.
    ///
    /// # Errors
    ///
    /// The first error from the final attempt, unchanged.
    pub async fn trigger(&self, request: &TriggerRequest) -> Result<TriggerReport, TriggerError> {
        debug!(pipeline = %request.pipeline, "Triggering YAML pipeline");
        let report = match self.attempt(PipelineKind::Yaml, request).await {
            Err(err) if err.is_pipeline_not_found() => {
                debug!(reason = %err, pipeline = %request.pipeline, "Triggering designer pipeline");
                self.attempt(PipelineKind::Designer, request).await
            }
            result => result,
        }?;
        debug!(report = %to_log_json(&report), "Trigger finished");
        Ok(report)
    }

    /// Runs resolve, link and dispatch for one pipeline kind.
    pub async fn attempt(
        &self,
        kind: PipelineKind,
        request: &TriggerRequest,
    ) -> Result<TriggerReport, TriggerError> {
        let project = request.project_url.project();
        let span = info_span!("attempt", %kind, %project);
        match kind {
            PipelineKind::Yaml => self.run_yaml(project, request).instrument(span).await,
            PipelineKind::Designer => self.run_designer(project, request).instrument(span).await,
        }
    }

    async fn run_yaml(
        &self,
        project: &ProjectName,
        request: &TriggerRequest,
    ) -> Result<TriggerReport, TriggerError> {
        let definition = resolve_build_definition(self.client, project, &request.pipeline).await?;
        let linkage = build_source_linkage(&definition, self.context, request);
        let outcome = dispatch_build(self.client, &definition, linkage).await?;

        Ok(TriggerReport {
            kind: PipelineKind::Yaml,
            project: project.clone(),
            definition_id: definition.id,
            definition_name: definition.name,
            outcome,
        })
    }

    async fn run_designer(
        &self,
        project: &ProjectName,
        request: &TriggerRequest,
    ) -> Result<TriggerReport, TriggerError> {
        let definition =
            resolve_release_definition(self.client, project, &request.pipeline).await?;
        let artifacts = release_artifact_links(&definition, self.context);
        let outcome = dispatch_release(self.client, project, &definition, artifacts).await?;

        Ok(TriggerReport {
            kind: PipelineKind::Designer,
            project: project.clone(),
            definition_id: definition.id,
            definition_name: definition.name,
            outcome,
        })
    }
}
