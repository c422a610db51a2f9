//! Error types for the pipeline trigger domain.
//!
//! [`TriggerError`] covers every condition that ends a trigger attempt. Only
//! [`TriggerError::PipelineNotFound`] is ever recovered from, and only by the
//! run-type selector when the YAML attempt finds nothing (it then tries the
//! designer pipeline). Everything else propagates to the top-level boundary.
//!
//! [`RemoteError`] is the error half of the [`crate::DevOpsClient`] port:
//! adapters translate transport, HTTP status and decoding failures into it.

use thiserror::Error;

use crate::{PipelineKind, ProjectName};

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// A failure reported by the remote platform client.
///
/// No variant is retried; each one ends the invocation with its message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    #[error("Failed to reach Azure DevOps: {message}")]
    Transport {
        /// Description of the underlying transport failure.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("Azure DevOps returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or the canonical reason phrase.
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Unexpected response from Azure DevOps: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Trigger errors
// ---------------------------------------------------------------------------

/// Errors that end a trigger attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    /// The kind-specific lookup matched no definition.
    ///
    /// Produced by: the resolver, for a name search with zero results or a
    /// direct id fetch the server does not know.
    #[error("{kind} '{pipeline}' not found in project '{project}'")]
    PipelineNotFound {
        /// Which definition API was searched.
        kind: PipelineKind,
        /// Project that was searched.
        project: ProjectName,
        /// The name or id that was looked up.
        pipeline: String,
    },

    /// A name search matched more than one definition.
    ///
    /// There is no disambiguation heuristic; the caller must supply an id.
    #[error(
        "{count} {kind}s named '{pipeline}' found in project '{project}'; \
         specify the pipeline id instead"
    )]
    PipelineResolutionAmbiguous {
        /// Which definition API was searched.
        kind: PipelineKind,
        /// Project that was searched.
        project: ProjectName,
        /// The name that was looked up.
        pipeline: String,
        /// Number of matching definitions.
        count: usize,
    },

    /// A trigger parameter is missing or malformed.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The remote client failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl TriggerError {
    /// Shorthand for [`TriggerError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` for the one error the run-type selector recovers from.
    pub fn is_pipeline_not_found(&self) -> bool {
        matches!(self, Self::PipelineNotFound { .. })
    }
}
