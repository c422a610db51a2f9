//! Pipeline trigger domain.
//!
//! Decides which Azure DevOps pipeline a source-control event should trigger,
//! whether the event's commit belongs on the run, and what to submit. The
//! remote platform is reached only through the [`DevOpsClient`] port;
//! infrastructure crates implement it and never add rules of their own.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`DefinitionId`, `RepositoryId`, etc.) |
//! | [`types`] | Pipeline kind, provider tags, project URLs, run outcomes |
//! | [`context`] | Invocation context and trigger request |
//! | [`definitions`] | Definition, payload and result wire shapes |
//! | [`client`] | The `DevOpsClient` port |
//! | [`resolver`] | Name-or-id resolution with the exactly-one rule |
//! | [`linkage`] | Branch/commit and artifact source linkage |
//! | [`dispatcher`] | Payload construction and outcome classification |
//! | [`selector`] | YAML-then-designer fallback |
//! | [`errors`] | Trigger and port error types |

pub mod client;
pub mod context;
pub mod definitions;
mod diagnostics;
pub mod dispatcher;
pub mod errors;
pub mod identifiers;
pub mod linkage;
pub mod resolver;
pub mod selector;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use client::DevOpsClient;
pub use context::{InvocationContext, TriggerRequest};
pub use definitions::{
    ArtifactDefinition, ArtifactDefinitionReference, ArtifactInstance, ArtifactLink,
    ArtifactSourceReference, BuildDefinition, BuildQueueRequest, BuildReason, BuildRepository,
    BuildRequestValidationResult, DefinitionHandle, DefinitionReference, Link, ProjectHandle,
    QueuedBuild, ReferenceLinks, Release, ReleaseDefinition, ReleaseReason, ReleaseStartRequest,
    TeamProjectReference, ValidationResult,
};
pub use dispatcher::{build_queue_request, dispatch_build, dispatch_release, release_start_request};
pub use errors::{RemoteError, TriggerError};
pub use identifiers::{
    ArtifactAlias, BranchRef, CommitSha, DefinitionId, InvocationId, PipelineName, ProjectName,
    RemoteProjectId, RepositoryId, RunId,
};
pub use linkage::{build_source_linkage, release_artifact_links, SourceLinkage};
pub use resolver::{resolve_build_definition, resolve_release_definition};
pub use selector::{PipelineTrigger, TriggerReport};
pub use types::{
    identity_eq, AccessToken, PipelineKind, PipelineRef, ProjectUrl, RunOutcome, SourceProvider,
};
