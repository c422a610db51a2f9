//! Inputs to a trigger: who is invoking it, and what they asked for.

use crate::{AccessToken, BranchRef, CommitSha, PipelineRef, ProjectUrl, RepositoryId, SourceProvider};

/// Identity of the source-control event that invoked the trigger.
///
/// Captured once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    repository: RepositoryId,
    branch: BranchRef,
    commit: CommitSha,
    repository_type: SourceProvider,
}

impl InvocationContext {
    /// Context for an event raised by a GitHub repository.
    pub fn github(repository: RepositoryId, branch: BranchRef, commit: CommitSha) -> Self {
        Self {
            repository,
            branch,
            commit,
            repository_type: SourceProvider::GitHub,
        }
    }

    /// The invoking repository, `"owner/repo"`.
    pub fn repository(&self) -> &RepositoryId {
        &self.repository
    }

    /// The ref the event was raised for.
    pub fn branch(&self) -> &BranchRef {
        &self.branch
    }

    /// The commit the event was raised for.
    pub fn commit(&self) -> &CommitSha {
        &self.commit
    }

    /// The kind of host the invoking repository lives on.
    pub fn repository_type(&self) -> &SourceProvider {
        &self.repository_type
    }
}

/// The caller's trigger parameters.
///
/// `explicit_ref` and `explicit_sha`, when present, replace whatever branch and
/// commit source linkage derives for a YAML pipeline.
#[derive(Debug, Clone)]
pub struct TriggerRequest {
    /// Project that owns the pipeline.
    pub project_url: ProjectUrl,
    /// Pipeline name or definition id.
    pub pipeline: PipelineRef,
    /// Ref to build instead of the derived branch.
    pub explicit_ref: Option<BranchRef>,
    /// Commit to build instead of the derived commit.
    pub explicit_sha: Option<CommitSha>,
    /// Token used to authenticate against the project's organization.
    pub credential: AccessToken,
}
