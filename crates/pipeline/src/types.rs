//! Shared value types: pipeline kind, source provider tags, project URLs,
//! pipeline references, credentials and run outcomes.

use serde::{Deserialize, Serialize};

use crate::{DefinitionId, PipelineName, ProjectName, RunId, TriggerError};

// ---------------------------------------------------------------------------
// Pipeline kind
// ---------------------------------------------------------------------------

/// The two kinds of Azure DevOps pipeline a trigger can target.
///
/// The run-type selector always attempts [`PipelineKind::Yaml`] first and falls
/// back to [`PipelineKind::Designer`] only when no YAML pipeline matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineKind {
    /// Declarative pipeline backed by a build definition.
    Yaml,
    /// Legacy release pipeline built in the graphical designer.
    Designer,
}

impl std::fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "YAML pipeline"),
            Self::Designer => write!(f, "designer pipeline"),
        }
    }
}

// ---------------------------------------------------------------------------
// Source provider tags
// ---------------------------------------------------------------------------

/// Compares two identity strings the way Azure DevOps and GitHub treat them:
/// surrounding whitespace is ignored and ASCII case does not matter.
pub fn identity_eq(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// The provider tag carried by a build repository (`repository.type`) or a
/// release artifact (`artifact.type`).
///
/// Parsing uses [`identity_eq`], so `" github "` is [`SourceProvider::GitHub`].
/// Every other tag is kept verbatim in [`SourceProvider::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceProvider {
    /// A GitHub repository.
    GitHub,
    /// Any other provider (`TfsGit`, `Build`, `Bitbucket`, ...).
    Other(String),
}

impl SourceProvider {
    const GITHUB: &'static str = "GitHub";

    /// Parses a provider tag.
    pub fn parse(tag: &str) -> Self {
        if identity_eq(tag, Self::GITHUB) {
            Self::GitHub
        } else {
            Self::Other(tag.to_string())
        }
    }

    /// Returns the tag as Azure DevOps spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::GitHub => Self::GITHUB,
            Self::Other(tag) => tag,
        }
    }

    /// Returns `true` for [`SourceProvider::GitHub`].
    pub fn is_github(&self) -> bool {
        matches!(self, Self::GitHub)
    }
}

impl From<String> for SourceProvider {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<SourceProvider> for String {
    fn from(provider: SourceProvider) -> Self {
        provider.as_str().to_string()
    }
}

impl std::fmt::Display for SourceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Project URL
// ---------------------------------------------------------------------------

/// A parsed Azure DevOps project URL.
///
/// `https://dev.azure.com/org/proj` splits into the collection base
/// `https://dev.azure.com/org` and the project `proj`. Hosted
/// `https://org.visualstudio.com/proj` and on-premises
/// `https://server/tfs/Collection/proj` URLs split the same way: the last path
/// segment is the project, everything before it is the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectUrl {
    collection: String,
    project: ProjectName,
}

impl ProjectUrl {
    const HOSTED_DOMAIN: &'static str = "dev.azure.com";

    /// Parses a project URL.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Configuration`] when the URL has no `http(s)`
    /// scheme, no host, or is missing the project (and, for `dev.azure.com`,
    /// the organization) segment.
    pub fn parse(raw: &str) -> Result<Self, TriggerError> {
        let invalid = |reason: &str| {
            TriggerError::configuration(format!("invalid project URL '{raw}': {reason}"))
        };

        let trimmed = raw
            .trim()
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| invalid("expected an http or https URL"))?;

        let mut segments = rest.split('/');
        let host = segments.next().unwrap_or_default();
        if host.is_empty() {
            return Err(invalid("missing host"));
        }

        let path: Vec<&str> = segments.collect();
        if path.iter().any(|s| s.is_empty()) {
            return Err(invalid("empty path segment"));
        }
        let required = if host.eq_ignore_ascii_case(Self::HOSTED_DOMAIN) { 2 } else { 1 };
        if path.len() < required {
            return Err(invalid("missing project segment"));
        }

        let (collection, project) = trimmed
            .rsplit_once('/')
            .ok_or_else(|| invalid("missing project segment"))?;
        let project = ProjectName::new(project).ok_or_else(|| invalid("empty project"))?;

        Ok(Self {
            collection: collection.to_string(),
            project,
        })
    }

    /// The collection (organization) base URL, without a trailing slash.
    pub fn collection_url(&self) -> &str {
        &self.collection
    }

    /// The project segment.
    pub fn project(&self) -> &ProjectName {
        &self.project
    }
}

impl std::fmt::Display for ProjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.collection, self.project)
    }
}

// ---------------------------------------------------------------------------
// Pipeline reference
// ---------------------------------------------------------------------------

/// What the caller asked to trigger: a definition id or a definition name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineRef {
    /// A positive integer; the definition is fetched directly.
    Id(DefinitionId),
    /// Anything else; the definition is found by name search.
    Name(PipelineName),
}

impl PipelineRef {
    /// Parses a name-or-id value. Returns `None` for a blank value.
    ///
    /// `"0"` is not a valid definition id and is treated as a name.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        match trimmed.parse::<u64>() {
            Ok(id) if id > 0 => Some(Self::Id(DefinitionId::new(id))),
            _ => PipelineName::new(trimmed).map(Self::Name),
        }
    }
}

impl std::fmt::Display for PipelineRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// A personal access token for the Azure DevOps organization.
///
/// The `Debug` impl never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token, returning `None` if it is blank.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let t = token.into();
        if t.trim().is_empty() {
            None
        } else {
            Some(Self(t))
        }
    }

    /// Returns the secret for use in an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// The classified result of a trigger call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// A build was queued or a release was created.
    Queued {
        /// Id of the build or release, when the server returned one.
        run_id: Option<RunId>,
        /// Web link to the run, when the server returned one.
        web_url: Option<String>,
    },

    /// The server accepted the request shape but rejected the run parameters.
    ValidationFailed {
        /// Messages of `error` validation results, in server order.
        errors: Vec<String>,
        /// Messages of `warning` validation results, in server order.
        warnings: Vec<String>,
    },

    /// The server answered without a run object; nothing to report.
    NotFound,
}

impl RunOutcome {
    /// Returns the combined failure message for a
    /// [`RunOutcome::ValidationFailed`] outcome, or `None` otherwise.
    ///
    /// Format: `"Errors: <e1>, <e2> Warnings: <w1>, <w2>"`.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            Self::ValidationFailed { errors, warnings } => Some(format!(
                "Errors: {} Warnings: {}",
                errors.join(", "),
                warnings.join(", ")
            )),
            Self::Queued { .. } | Self::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_url_splits_hosted_url() {
        let url = ProjectUrl::parse("https://dev.azure.com/org/proj").unwrap();
        assert_eq!(url.collection_url(), "https://dev.azure.com/org");
        assert_eq!(url.project().as_str(), "proj");
    }

    #[test]
    fn project_url_ignores_trailing_slash_and_whitespace() {
        let url = ProjectUrl::parse("  https://org.visualstudio.com/My%20Project/ ").unwrap();
        assert_eq!(url.collection_url(), "https://org.visualstudio.com");
        assert_eq!(url.project().as_str(), "My%20Project");
    }

    #[test]
    fn project_url_accepts_on_premises_collection() {
        let url = ProjectUrl::parse("http://tfs.local/tfs/DefaultCollection/proj").unwrap();
        assert_eq!(url.collection_url(), "http://tfs.local/tfs/DefaultCollection");
        assert_eq!(url.project().as_str(), "proj");
    }

    #[test]
    fn project_url_rejects_missing_project() {
        assert!(ProjectUrl::parse("https://dev.azure.com/org").is_err());
        assert!(ProjectUrl::parse("https://org.visualstudio.com").is_err());
        assert!(ProjectUrl::parse("dev.azure.com/org/proj").is_err());
        assert!(ProjectUrl::parse("https:///proj").is_err());
    }

    #[test]
    fn pipeline_ref_distinguishes_ids_from_names() {
        assert_eq!(
            PipelineRef::parse(" 42 "),
            Some(PipelineRef::Id(DefinitionId::new(42)))
        );
        assert!(matches!(PipelineRef::parse("0"), Some(PipelineRef::Name(_))));
        assert!(matches!(PipelineRef::parse("-3"), Some(PipelineRef::Name(_))));
        assert!(matches!(
            PipelineRef::parse("MyPipeline"),
            Some(PipelineRef::Name(n)) if n.as_str() == "MyPipeline"
        ));
        assert_eq!(PipelineRef::parse("  "), None);
    }

    #[test]
    fn source_provider_comparison_is_trimmed_and_case_insensitive() {
        assert_eq!(SourceProvider::parse(" github "), SourceProvider::GitHub);
        assert_eq!(
            SourceProvider::parse("TfsGit"),
            SourceProvider::Other("TfsGit".to_string())
        );

        let json = serde_json::to_string(&SourceProvider::GitHub).unwrap();
        assert_eq!(json, "\"GitHub\"");
    }

    #[test]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("s3cret").unwrap();
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
        assert!(AccessToken::new(" ").is_none());
    }

    #[test]
    fn validation_failure_message_lists_errors_then_warnings() {
        let outcome = RunOutcome::ValidationFailed {
            errors: vec!["boom".into(), "bang".into()],
            warnings: vec!["careful".into()],
        };
        assert_eq!(
            outcome.failure_message().as_deref(),
            Some("Errors: boom, bang Warnings: careful")
        );
        assert_eq!(RunOutcome::NotFound.failure_message(), None);
    }
}
