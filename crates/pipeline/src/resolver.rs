//! Pipeline resolution: turns a [`PipelineRef`] into a concrete definition.
//!
//! An id is fetched directly and never searched for. A name is searched with
//! the kind-specific query and must match exactly one definition: zero matches
//! is [`TriggerError::PipelineNotFound`] (the selector's fallback signal) and
//! several matches is [`TriggerError::PipelineResolutionAmbiguous`].

use tracing::{debug, instrument};

use crate::diagnostics::to_log_json;
use crate::{
    BuildDefinition, DevOpsClient, PipelineKind, PipelineRef, ProjectName, ReleaseDefinition,
    TriggerError,
};

/// Resolves a YAML pipeline to its full build definition.
///
/// # Errors
///
/// [`TriggerError::PipelineNotFound`] when nothing matches,
/// [`TriggerError::PipelineResolutionAmbiguous`] when a name matches several
/// definitions, and [`TriggerError::Remote`] when the client fails.
#[instrument(skip(client), fields(kind = "yaml"))]
pub async fn resolve_build_definition<C>(
    client: &C,
    project: &ProjectName,
    pipeline: &PipelineRef,
) -> Result<BuildDefinition, TriggerError>
where
    C: DevOpsClient + ?Sized,
{
    let kind = PipelineKind::Yaml;
    let id = match pipeline {
        PipelineRef::Id(id) => *id,
        PipelineRef::Name(name) => {
            let candidates = client.get_definitions(project, name).await?;
            let reference = single_candidate(candidates, kind, project, pipeline)?;
            debug!(id = %reference.id, name = %reference.name, "Matched build definition by name");
            reference.id
        }
    };

    let definition = client
        .get_definition(project, id)
        .await?
        .ok_or_else(|| not_found(kind, project, pipeline))?;
    debug!(definition = %to_log_json(&definition), "Resolved build definition");
    Ok(definition)
}

/// Resolves a designer pipeline to its release definition (artifacts included).
///
/// The name search already returns full definitions, so no second fetch is made.
///
/// # Errors
///
/// Same as [`resolve_build_definition`].
#[instrument(skip(client), fields(kind = "designer"))]
pub async fn resolve_release_definition<C>(
    client: &C,
    project: &ProjectName,
    pipeline: &PipelineRef,
) -> Result<ReleaseDefinition, TriggerError>
where
    C: DevOpsClient + ?Sized,
{
    let kind = PipelineKind::Designer;
    let definition = match pipeline {
        PipelineRef::Id(id) => client
            .get_release_definition(project, *id)
            .await?
            .ok_or_else(|| not_found(kind, project, pipeline))?,
        PipelineRef::Name(name) => {
            let candidates = client.get_release_definitions(project, name).await?;
            single_candidate(candidates, kind, project, pipeline)?
        }
    };
    debug!(definition = %to_log_json(&definition), "Resolved release definition");
    Ok(definition)
}

/// Enforces the exactly-one-candidate rule.
fn single_candidate<T>(
    mut candidates: Vec<T>,
    kind: PipelineKind,
    project: &ProjectName,
    pipeline: &PipelineRef,
) -> Result<T, TriggerError> {
    match candidates.len() {
        0 => Err(not_found(kind, project, pipeline)),
        1 => Ok(candidates.remove(0)),
        count => Err(TriggerError::PipelineResolutionAmbiguous {
            kind,
            project: project.clone(),
            pipeline: pipeline.to_string(),
            count,
        }),
    }
}

fn not_found(kind: PipelineKind, project: &ProjectName, pipeline: &PipelineRef) -> TriggerError {
    TriggerError::PipelineNotFound {
        kind,
        project: project.clone(),
        pipeline: pipeline.to_string(),
    }
}
