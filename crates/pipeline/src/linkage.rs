//! Source linkage: decides which commit, if any, a triggered run is pinned to.
//!
//! A run is only pinned to the invoking commit when the pipeline's own source
//! is the invoking repository. Otherwise the remote pipeline uses its default
//! source. Identity comparisons use [`identity_eq`] throughout.

use tracing::debug;

use crate::{
    identity_eq, ArtifactInstance, ArtifactLink, BranchRef, BuildDefinition, CommitSha,
    InvocationContext, ReleaseDefinition, TriggerRequest,
};

/// Branch and commit to queue a YAML pipeline build with.
///
/// Both unset means the definition's default branch at its tip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLinkage {
    /// Ref to build.
    pub branch: Option<BranchRef>,
    /// Commit to build.
    pub commit: Option<CommitSha>,
}

/// Derives the build source for a YAML pipeline.
///
/// The invoking branch and commit are used when the definition's repository id
/// and type both match the invocation context. An explicit ref or sha on the
/// request then replaces the corresponding derived value unconditionally.
pub fn build_source_linkage(
    definition: &BuildDefinition,
    context: &InvocationContext,
    request: &TriggerRequest,
) -> SourceLinkage {
    let linked = definition.repository.as_ref().is_some_and(|repo| {
        identity_eq(&repo.id, context.repository().as_str())
            && identity_eq(repo.repository_type.as_str(), context.repository_type().as_str())
    });

    let mut linkage = if linked {
        debug!(repository = %context.repository(), "Pipeline is linked to the invoking repository");
        SourceLinkage {
            branch: Some(context.branch().clone()),
            commit: Some(context.commit().clone()),
        }
    } else {
        debug!(repository = %context.repository(), "Pipeline is not linked to the invoking repository");
        SourceLinkage::default()
    };

    if let Some(branch) = &request.explicit_ref {
        debug!(%branch, "Using explicit ref");
        linkage.branch = Some(branch.clone());
    }
    if let Some(commit) = &request.explicit_sha {
        debug!(%commit, "Using explicit sha");
        linkage.commit = Some(commit.clone());
    }

    linkage
}

/// Derives artifact version overrides for a designer pipeline.
///
/// Only GitHub artifacts whose upstream repository is the invoking repository
/// get an entry; every other artifact keeps the release's default version.
/// Entries keep the definition's artifact order.
pub fn release_artifact_links(
    definition: &ReleaseDefinition,
    context: &InvocationContext,
) -> Vec<ArtifactLink> {
    let github_artifacts: Vec<_> = definition
        .artifacts
        .iter()
        .filter(|artifact| artifact.artifact_type.is_github())
        .collect();

    if github_artifacts.is_empty() {
        debug!("Pipeline is not linked to any GitHub artifact");
        return Vec::new();
    }

    github_artifacts
        .into_iter()
        .filter(|artifact| {
            artifact
                .upstream_name()
                .is_some_and(|name| identity_eq(name, context.repository().as_str()))
        })
        .map(|artifact| {
            debug!(alias = %artifact.alias, "Artifact is linked to the invoking repository");
            ArtifactLink {
                alias: artifact.alias.clone(),
                instance_reference: ArtifactInstance {
                    id: context.commit().clone(),
                    source_branch: context.branch().clone(),
                    source_repository_type: context.repository_type().clone(),
                    source_repository_id: context.repository().clone(),
                    source_version: context.commit().clone(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AccessToken, ArtifactAlias, ArtifactDefinition, ArtifactDefinitionReference,
        ArtifactSourceReference, BuildRepository, DefinitionId, PipelineName, PipelineRef,
        ProjectUrl, RemoteProjectId, RepositoryId, SourceProvider, TeamProjectReference,
    };

    fn context() -> InvocationContext {
        InvocationContext::github(
            RepositoryId::new("Org/Repo").unwrap(),
            BranchRef::new("refs/heads/main").unwrap(),
            CommitSha::new("abc123").unwrap(),
        )
    }

    fn request(explicit_ref: Option<&str>, explicit_sha: Option<&str>) -> TriggerRequest {
        TriggerRequest {
            project_url: ProjectUrl::parse("https://dev.azure.com/org/proj").unwrap(),
            pipeline: PipelineRef::Id(DefinitionId::new(1)),
            explicit_ref: explicit_ref.and_then(|r| BranchRef::new(r)),
            explicit_sha: explicit_sha.and_then(|s| CommitSha::new(s)),
            credential: AccessToken::new("pat").unwrap(),
        }
    }

    fn build_definition(repo: Option<(&str, &str)>) -> BuildDefinition {
        BuildDefinition {
            id: DefinitionId::new(1),
            name: PipelineName::new("CI").unwrap(),
            project: TeamProjectReference {
                id: RemoteProjectId::new("p-guid").unwrap(),
                name: None,
            },
            repository: repo.map(|(id, ty)| BuildRepository {
                id: id.to_string(),
                repository_type: SourceProvider::parse(ty),
                name: None,
            }),
        }
    }

    fn artifact(alias: &str, provider: &str, repo: Option<&str>) -> ArtifactDefinition {
        ArtifactDefinition {
            alias: ArtifactAlias::new(alias).unwrap(),
            artifact_type: SourceProvider::parse(provider),
            definition_reference: repo.map(|name| ArtifactDefinitionReference {
                definition: Some(ArtifactSourceReference {
                    id: Some(name.to_string()),
                    name: Some(name.to_string()),
                }),
            }),
        }
    }

    fn release_definition(artifacts: Vec<ArtifactDefinition>) -> ReleaseDefinition {
        ReleaseDefinition {
            id: DefinitionId::new(9),
            name: PipelineName::new("Deploy").unwrap(),
            artifacts,
        }
    }

    #[test]
    fn linked_repository_uses_invoking_branch_and_commit() {
        let def = build_definition(Some((" org/repo ", "github")));
        let linkage = build_source_linkage(&def, &context(), &request(None, None));

        assert_eq!(linkage.branch.unwrap().as_str(), "refs/heads/main");
        assert_eq!(linkage.commit.unwrap().as_str(), "abc123");
    }

    #[test]
    fn unlinked_repository_leaves_source_unset() {
        let other_repo = build_definition(Some(("org/other", "GitHub")));
        assert_eq!(
            build_source_linkage(&other_repo, &context(), &request(None, None)),
            SourceLinkage::default()
        );

        let azure_repo = build_definition(Some(("Org/Repo", "TfsGit")));
        assert_eq!(
            build_source_linkage(&azure_repo, &context(), &request(None, None)),
            SourceLinkage::default()
        );

        let no_repo = build_definition(None);
        assert_eq!(
            build_source_linkage(&no_repo, &context(), &request(None, None)),
            SourceLinkage::default()
        );
    }

    #[test]
    fn explicit_ref_and_sha_override_regardless_of_linkage() {
        for def in [
            build_definition(Some(("Org/Repo", "GitHub"))),
            build_definition(Some(("org/other", "GitHub"))),
        ] {
            let linkage = build_source_linkage(
                &def,
                &context(),
                &request(Some("refs/heads/release"), Some("def456")),
            );
            assert_eq!(linkage.branch.unwrap().as_str(), "refs/heads/release");
            assert_eq!(linkage.commit.unwrap().as_str(), "def456");
        }
    }

    #[test]
    fn explicit_ref_alone_keeps_derived_commit() {
        let def = build_definition(Some(("Org/Repo", "GitHub")));
        let linkage =
            build_source_linkage(&def, &context(), &request(Some("refs/heads/hotfix"), None));
        assert_eq!(linkage.branch.unwrap().as_str(), "refs/heads/hotfix");
        assert_eq!(linkage.commit.unwrap().as_str(), "abc123");
    }

    #[test]
    fn only_matching_github_artifacts_are_linked() {
        let def = release_definition(vec![
            artifact("a", "GitHub", Some("org/repo")),
            artifact("b", "Other", Some("org/repo")),
            artifact("c", "GitHub", Some("org/elsewhere")),
            artifact("d", "GitHub", None),
        ]);

        let links = release_artifact_links(&def, &context());

        assert_eq!(links.len(), 1);
        let link = &links[0];
        assert_eq!(link.alias.as_str(), "a");
        assert_eq!(link.instance_reference.id.as_str(), "abc123");
        assert_eq!(link.instance_reference.source_version.as_str(), "abc123");
        assert_eq!(link.instance_reference.source_branch.as_str(), "refs/heads/main");
        assert_eq!(link.instance_reference.source_repository_id.as_str(), "Org/Repo");
        assert!(link.instance_reference.source_repository_type.is_github());
    }

    #[test]
    fn release_without_github_artifacts_gets_no_links() {
        let def = release_definition(vec![artifact("drop", "Build", None)]);
        assert!(release_artifact_links(&def, &context()).is_empty());
    }
}
