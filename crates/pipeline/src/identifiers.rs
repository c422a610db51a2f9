//! Newtype domain identifiers.
//!
//! Every concept that has an identity on either side of a trigger (the invoking
//! GitHub repository or the remote Azure DevOps project) is a distinct newtype
//! wrapping a primitive. This keeps a [`DefinitionId`] from being passed where a
//! [`RunId`] is expected, and a [`RepositoryId`] from standing in for a
//! [`PipelineName`], even though both pairs share a representation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is blank.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (server-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — Azure DevOps integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// Identifies a build definition (YAML pipeline) or release definition
    /// (designer pipeline) within an Azure DevOps project.
    DefinitionId
}

u64_id! {
    /// Identifies a queued build or a created release.
    RunId
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies one invocation of the trigger.
///
/// Generated fresh for every process run and recorded on the root tracing span
/// so all diagnostics from a single invocation can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Generates a new random invocation identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// The project segment of an Azure DevOps project URL, as it appears in
    /// REST paths (e.g. `"proj"` or `"My%20Project"`).
    ProjectName
}

string_id! {
    /// The GUID Azure DevOps assigns to a team project.
    RemoteProjectId
}

string_id! {
    /// The display name of a build or release definition.
    PipelineName
}

string_id! {
    /// Identifies a GitHub repository in `"owner/repo"` format.
    RepositoryId
}

string_id! {
    /// A Git ref (e.g. `"refs/heads/main"`, `"refs/pull/7/merge"`).
    BranchRef
}

string_id! {
    /// A Git commit SHA.
    CommitSha
}

string_id! {
    /// The alias under which an artifact is attached to a release definition.
    ArtifactAlias
}
