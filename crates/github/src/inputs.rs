//! Action inputs.
//!
//! The runner exposes each `with:` input as `INPUT_<NAME>`, with the name
//! upper-cased and spaces replaced by underscores. Values are trimmed and an
//! empty value counts as not supplied.

use pipeline::{
    AccessToken, BranchRef, CommitSha, DefinitionId, PipelineRef, ProjectUrl, TriggerRequest,
};

use crate::ActionError;

/// Input: URL of the Azure DevOps project owning the pipeline.
pub const PROJECT_URL_INPUT: &str = "azure-devops-project-url";
/// Input: pipeline name, or definition id.
pub const PIPELINE_NAME_INPUT: &str = "azure-pipeline-name";
/// Input: definition id; wins over the name when both are given.
pub const PIPELINE_ID_INPUT: &str = "azure-pipeline-id";
/// Input: personal access token.
pub const TOKEN_INPUT: &str = "azure-devops-token";
/// Input: ref to build instead of the triggering ref.
pub const REF_INPUT: &str = "ref";
/// Input: commit to build instead of the triggering commit.
pub const SHA_INPUT: &str = "sha";

/// Reads one input. Returns `None` when unset or blank.
pub fn get_input(name: &str) -> Option<String> {
    let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required_input(name: &'static str) -> Result<String, ActionError> {
    get_input(name).ok_or(ActionError::MissingInput { name })
}

/// Builds the [`TriggerRequest`] from the action inputs.
///
/// # Errors
///
/// [`ActionError::MissingInput`] for an absent project URL, token or pipeline,
/// and [`ActionError::InvalidInput`] for an unparseable project URL or a
/// pipeline id that is not a positive integer.
pub fn trigger_request_from_env() -> Result<TriggerRequest, ActionError> {
    let raw_url = required_input(PROJECT_URL_INPUT)?;
    let project_url = ProjectUrl::parse(&raw_url).map_err(|e| ActionError::InvalidInput {
        name: PROJECT_URL_INPUT,
        reason: e.to_string(),
    })?;

    let pipeline = match get_input(PIPELINE_ID_INPUT) {
        Some(raw) => PipelineRef::Id(parse_pipeline_id(&raw)?),
        None => get_input(PIPELINE_NAME_INPUT)
            .and_then(|raw| PipelineRef::parse(&raw))
            .ok_or(ActionError::MissingInput {
                name: PIPELINE_NAME_INPUT,
            })?,
    };

    let credential = AccessToken::new(required_input(TOKEN_INPUT)?)
        .ok_or(ActionError::MissingInput { name: TOKEN_INPUT })?;

    Ok(TriggerRequest {
        project_url,
        pipeline,
        explicit_ref: get_input(REF_INPUT).and_then(|r| BranchRef::new(r)),
        explicit_sha: get_input(SHA_INPUT).and_then(|s| CommitSha::new(s)),
        credential,
    })
}

fn parse_pipeline_id(raw: &str) -> Result<DefinitionId, ActionError> {
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(DefinitionId::new(id)),
        _ => Err(ActionError::InvalidInput {
            name: PIPELINE_ID_INPUT,
            reason: format!("'{raw}' is not a positive integer"),
        }),
    }
}
