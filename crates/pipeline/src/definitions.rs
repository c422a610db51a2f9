//! Definition, payload and result shapes exchanged with the remote platform.
//!
//! Field names follow the Azure DevOps REST wire format (camelCase) so that
//! adapters can decode responses straight into these types and so that the
//! verbatim JSON logged before each call matches what is sent. Unknown fields
//! are ignored on decode.

use serde::{Deserialize, Serialize};

use crate::{
    ArtifactAlias, BranchRef, CommitSha, DefinitionId, PipelineName, RemoteProjectId,
    RepositoryId, RunId, SourceProvider,
};

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

/// A single `{ "href": ... }` link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL.
    pub href: String,
}

/// The `_links` collection attached to builds and releases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLinks {
    /// Link to the run in the web portal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<Link>,
}

// ---------------------------------------------------------------------------
// YAML pipelines (build definitions)
// ---------------------------------------------------------------------------

/// One entry of a build definition name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionReference {
    /// Definition id.
    pub id: DefinitionId,
    /// Definition name.
    pub name: PipelineName,
}

/// The project a definition belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProjectReference {
    /// Project GUID.
    pub id: RemoteProjectId,
    /// Project display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The source repository a build definition is linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRepository {
    /// Repository id; `"owner/repo"` for GitHub repositories.
    pub id: String,
    /// Repository provider tag.
    #[serde(rename = "type")]
    pub repository_type: SourceProvider,
    /// Repository display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A fully fetched build definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDefinition {
    /// Definition id.
    pub id: DefinitionId,
    /// Definition name.
    pub name: PipelineName,
    /// Owning project.
    pub project: TeamProjectReference,
    /// Linked source repository; absent for definitions without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<BuildRepository>,
}

/// `{ "id": ... }` reference to a definition in a queue request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionHandle {
    /// Definition id.
    pub id: DefinitionId,
}

/// `{ "id": ... }` reference to a project in a queue request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectHandle {
    /// Project GUID.
    pub id: RemoteProjectId,
}

/// Why a build was queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildReason {
    /// Queued by an external trigger.
    Triggered,
}

/// Payload submitted to queue a build of a YAML pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildQueueRequest {
    /// Definition to run.
    pub definition: DefinitionHandle,
    /// Project owning the definition.
    pub project: ProjectHandle,
    /// Ref to build; unset means the definition's default branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_branch: Option<BranchRef>,
    /// Commit to build; unset means the tip of `source_branch`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_version: Option<CommitSha>,
    /// Queue reason.
    pub reason: BuildReason,
}

/// Result category of a build request validation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationResult {
    /// Passed.
    Ok,
    /// Passed with a warning.
    Warning,
    /// Failed.
    Error,
    /// Any category this client does not know.
    #[serde(other)]
    Unknown,
}

/// One validation entry returned alongside a queued build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequestValidationResult {
    /// Category.
    pub result: ValidationResult,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

/// The build returned by a queue call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedBuild {
    /// Build id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RunId>,
    /// Build number, e.g. `"20240101.1"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
    /// Validation entries; non-empty when the request was (partly) rejected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_results: Vec<BuildRequestValidationResult>,
    /// Links, including the web portal link.
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ReferenceLinks>,
}

// ---------------------------------------------------------------------------
// Designer pipelines (release definitions)
// ---------------------------------------------------------------------------

/// A named reference inside an artifact's `definitionReference` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSourceReference {
    /// Reference id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Reference name; `"owner/repo"` for the `definition` entry of a GitHub
    /// artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The `definitionReference` map of a release artifact.
///
/// Only the `definition` entry matters for source linkage; the other entries
/// (`connection`, `branch`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDefinitionReference {
    /// The upstream source (repository for GitHub artifacts).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<ArtifactSourceReference>,
}

/// An upstream input configured on a release definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDefinition {
    /// Alias the release refers to the artifact by.
    pub alias: ArtifactAlias,
    /// Artifact provider tag.
    #[serde(rename = "type")]
    pub artifact_type: SourceProvider,
    /// Where the artifact comes from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_reference: Option<ArtifactDefinitionReference>,
}

impl ArtifactDefinition {
    /// The upstream repository name, when the artifact declares one.
    pub fn upstream_name(&self) -> Option<&str> {
        self.definition_reference
            .as_ref()?
            .definition
            .as_ref()?
            .name
            .as_deref()
    }
}

/// A release definition, with artifacts expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDefinition {
    /// Definition id.
    pub id: DefinitionId,
    /// Definition name.
    pub name: PipelineName,
    /// Configured artifacts, in definition order.
    #[serde(default)]
    pub artifacts: Vec<ArtifactDefinition>,
}

/// Why a release was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReleaseReason {
    /// Created by continuous integration.
    ContinuousIntegration,
}

/// The commit an artifact should be pinned to for a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactInstance {
    /// Version id; the commit SHA.
    pub id: CommitSha,
    /// Ref the commit was built from.
    pub source_branch: BranchRef,
    /// Source provider tag.
    pub source_repository_type: SourceProvider,
    /// Source repository, `"owner/repo"`.
    pub source_repository_id: RepositoryId,
    /// Commit SHA again, as the release API expects it.
    pub source_version: CommitSha,
}

/// Version override for one artifact of a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactLink {
    /// Alias of the artifact being pinned.
    pub alias: ArtifactAlias,
    /// The version to pin it to.
    pub instance_reference: ArtifactInstance,
}

/// Payload submitted to create a release of a designer pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseStartRequest {
    /// Definition to release.
    pub definition_id: DefinitionId,
    /// Creation reason.
    pub reason: ReleaseReason,
    /// Artifact version overrides, in definition order.
    pub artifacts: Vec<ArtifactLink>,
}

/// The release returned by a create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Release id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RunId>,
    /// Release name, e.g. `"Release-12"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Links, including the web portal link.
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ReferenceLinks>,
}

/// Returns the web link from an optional `_links` collection.
pub(crate) fn web_href(links: Option<&ReferenceLinks>) -> Option<String> {
    links?.web.as_ref().map(|l| l.href.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_definition_decodes_from_rest_shape() {
        let def: BuildDefinition = serde_json::from_value(json!({
            "id": 42,
            "name": "CI",
            "revision": 7,
            "project": { "id": "9f1a", "name": "proj", "state": "wellFormed" },
            "repository": { "id": "org/repo", "type": "GitHub", "name": "org/repo" }
        }))
        .unwrap();

        assert_eq!(def.id, DefinitionId::new(42));
        assert_eq!(def.project.id.as_str(), "9f1a");
        let repo = def.repository.unwrap();
        assert_eq!(repo.id, "org/repo");
        assert!(repo.repository_type.is_github());
    }

    #[test]
    fn build_queue_request_omits_unset_source_fields() {
        let request = BuildQueueRequest {
            definition: DefinitionHandle {
                id: DefinitionId::new(3),
            },
            project: ProjectHandle {
                id: RemoteProjectId::new("p-guid").unwrap(),
            },
            source_branch: None,
            source_version: None,
            reason: BuildReason::Triggered,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "definition": { "id": 3 },
                "project": { "id": "p-guid" },
                "reason": "triggered"
            })
        );
    }

    #[test]
    fn release_artifact_exposes_upstream_name() {
        let def: ReleaseDefinition = serde_json::from_value(json!({
            "id": 5,
            "name": "Deploy",
            "artifacts": [{
                "alias": "_repo",
                "type": "GitHub",
                "definitionReference": {
                    "definition": { "id": "org/repo", "name": "org/repo" },
                    "connection": { "id": "c1", "name": "svc" }
                }
            }, {
                "alias": "drop",
                "type": "Build"
            }]
        }))
        .unwrap();

        assert_eq!(def.artifacts[0].upstream_name(), Some("org/repo"));
        assert_eq!(def.artifacts[1].upstream_name(), None);
    }

    #[test]
    fn unknown_validation_categories_decode() {
        let entry: BuildRequestValidationResult =
            serde_json::from_value(json!({ "result": "somethingNew", "message": "?" })).unwrap();
        assert_eq!(entry.result, ValidationResult::Unknown);
    }

    #[test]
    fn release_start_request_uses_release_wire_names() {
        let request = ReleaseStartRequest {
            definition_id: DefinitionId::new(5),
            reason: ReleaseReason::ContinuousIntegration,
            artifacts: vec![],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "definitionId": 5, "reason": "continuousIntegration", "artifacts": [] })
        );
    }
}
