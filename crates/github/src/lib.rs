//! GitHub Actions infrastructure adapter.
//!
//! Supplies the [`pipeline`] crate with its inputs and carries its result back
//! to the runner:
//!
//! - [`invocation_context_from_env`] — the triggering repository, ref and
//!   commit from the runner's default environment variables.
//! - [`trigger_request_from_env`] — the action's `with:` inputs.
//! - [`WorkflowCommands`] — `::error::` / `::add-mask::` commands and step
//!   outputs written to `$GITHUB_OUTPUT`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain trigger rules; it only
//! translates between the runner's conventions and the domain types.

mod context;
mod error;
mod inputs;
mod workflow;

pub use context::invocation_context_from_env;
pub use error::ActionError;
pub use inputs::{
    get_input, trigger_request_from_env, PIPELINE_ID_INPUT, PIPELINE_NAME_INPUT,
    PROJECT_URL_INPUT, REF_INPUT, SHA_INPUT, TOKEN_INPUT,
};
pub use workflow::{WorkflowCommands, RUN_ID_OUTPUT, RUN_URL_OUTPUT};
