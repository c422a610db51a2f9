//! Azure Pipelines trigger entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Wire observability** — see [`telemetry`].
//! 2. **Read configuration** — the invoking event from the runner environment
//!    and the trigger parameters from the action inputs.
//! 3. **Construct infrastructure** — an [`AzureDevOpsClient`] for the
//!    project's organization, injected into [`PipelineTrigger`].
//! 4. **Report** — exactly one terminal result: step outputs on success, or a
//!    single `::error::` command and exit code 1 on failure.

mod telemetry;

use std::process::ExitCode;

use anyhow::{bail, Context};
use azure_devops::AzureDevOpsClient;
use github::{WorkflowCommands, RUN_ID_OUTPUT, RUN_URL_OUTPUT};
use pipeline::{InvocationId, PipelineTrigger, RunOutcome, TriggerReport};
use tracing::{error, info, info_span, warn, Instrument};

#[tokio::main]
async fn main() -> ExitCode {
    let telemetry = match telemetry::init() {
        Ok(t) => Some(t),
        Err(e) => {
            eprintln!("Logging disabled: {e:#}");
            None
        }
    };

    let mut commands = WorkflowCommands::from_env();
    let invocation = InvocationId::new_random();
    let result = run(&mut commands)
        .instrument(info_span!("trigger", invocation_id = %invocation))
        .await;

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "Trigger failed");
            if let Err(write_err) = commands.set_failed(&message) {
                eprintln!("{message} ({write_err})");
            }
            ExitCode::FAILURE
        }
    };

    if let Some(telemetry) = telemetry {
        telemetry.shutdown();
    }
    code
}

async fn run(commands: &mut WorkflowCommands<std::io::Stdout>) -> anyhow::Result<()> {
    let context =
        github::invocation_context_from_env().context("failed to read the invoking event")?;
    let request = github::trigger_request_from_env().context("failed to read action inputs")?;
    commands.add_mask(request.credential.expose())?;

    let client = AzureDevOpsClient::new(&request.project_url, request.credential.clone())?;
    info!(
        collection = client.endpoints().collection(),
        "Creating connection with Azure DevOps service"
    );

    let report = PipelineTrigger::new(&client, &context)
        .trigger(&request)
        .await?;

    report_outcome(commands, &report)
}

fn report_outcome(
    commands: &mut WorkflowCommands<std::io::Stdout>,
    report: &TriggerReport,
) -> anyhow::Result<()> {
    match &report.outcome {
        RunOutcome::Queued { run_id, web_url } => {
            info!(
                kind = %report.kind,
                pipeline = %report.definition_name,
                project = %report.project,
                "Pipeline triggered"
            );
            if let Some(id) = run_id {
                commands.set_output(RUN_ID_OUTPUT, &id.to_string())?;
            }
            if let Some(url) = web_url {
                info!(url = %url, "Pipeline run url");
                commands.set_output(RUN_URL_OUTPUT, url)?;
            }
            Ok(())
        }
        RunOutcome::ValidationFailed { .. } => {
            let message = report.outcome.failure_message().unwrap_or_default();
            bail!(message)
        }
        RunOutcome::NotFound => {
            warn!(
                kind = %report.kind,
                pipeline = %report.definition_name,
                "Azure DevOps accepted the request but returned no run"
            );
            Ok(())
        }
    }
}
