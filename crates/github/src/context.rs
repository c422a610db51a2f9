//! The invoking event, as described by the runner's default environment.

use pipeline::{BranchRef, CommitSha, InvocationContext, RepositoryId};

use crate::ActionError;

const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
const REF_VAR: &str = "GITHUB_REF";
const SHA_VAR: &str = "GITHUB_SHA";

/// Builds the [`InvocationContext`] from `GITHUB_REPOSITORY`, `GITHUB_REF` and
/// `GITHUB_SHA`.
///
/// # Errors
///
/// [`ActionError::MissingVariable`] when any of the three is unset or blank.
pub fn invocation_context_from_env() -> Result<InvocationContext, ActionError> {
    let repository = RepositoryId::new(required_var(REPOSITORY_VAR)?)
        .ok_or(ActionError::MissingVariable { name: REPOSITORY_VAR })?;
    let branch = BranchRef::new(required_var(REF_VAR)?)
        .ok_or(ActionError::MissingVariable { name: REF_VAR })?;
    let commit = CommitSha::new(required_var(SHA_VAR)?)
        .ok_or(ActionError::MissingVariable { name: SHA_VAR })?;

    Ok(InvocationContext::github(repository, branch, commit))
}

fn required_var(name: &'static str) -> Result<String, ActionError> {
    std::env::var(name).map_err(|_| ActionError::MissingVariable { name })
}
