//! The remote platform port.
//!
//! The domain reaches Azure DevOps only through [`DevOpsClient`]. The
//! `azure-devops` crate implements it over REST; tests implement it in memory.

use async_trait::async_trait;

use crate::{
    BuildDefinition, BuildQueueRequest, DefinitionId, DefinitionReference, PipelineName,
    ProjectName, QueuedBuild, Release, ReleaseDefinition, ReleaseStartRequest, RemoteError,
    RemoteProjectId,
};

/// Operations the trigger needs from the remote platform.
///
/// Lookups by id return `Ok(None)` when the server does not know the id;
/// create/queue calls return `Ok(None)` when the server answers without a body.
#[async_trait]
pub trait DevOpsClient: Send + Sync {
    /// Lists build definitions in `project` whose name matches `name`.
    async fn get_definitions(
        &self,
        project: &ProjectName,
        name: &PipelineName,
    ) -> Result<Vec<DefinitionReference>, RemoteError>;

    /// Fetches one build definition.
    async fn get_definition(
        &self,
        project: &ProjectName,
        id: DefinitionId,
    ) -> Result<Option<BuildDefinition>, RemoteError>;

    /// Queues a build in the project identified by `project_id`.
    async fn queue_build(
        &self,
        project_id: &RemoteProjectId,
        request: &BuildQueueRequest,
    ) -> Result<Option<QueuedBuild>, RemoteError>;

    /// Lists release definitions in `project` named exactly `name`, with
    /// artifacts expanded.
    async fn get_release_definitions(
        &self,
        project: &ProjectName,
        name: &PipelineName,
    ) -> Result<Vec<ReleaseDefinition>, RemoteError>;

    /// Fetches one release definition, with artifacts.
    async fn get_release_definition(
        &self,
        project: &ProjectName,
        id: DefinitionId,
    ) -> Result<Option<ReleaseDefinition>, RemoteError>;

    /// Creates a release.
    async fn create_release(
        &self,
        project: &ProjectName,
        request: &ReleaseStartRequest,
    ) -> Result<Option<Release>, RemoteError>;
}
