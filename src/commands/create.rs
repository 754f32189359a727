use crate::orchestrator::Orchestrator;
use subflow_common::{Error, Result};
use subflow_jobs::{build_run_input, JobOptions, LanguageCatalog, RunInput};

/// Where and whether to submit a run input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub state_machine_arn: Option<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The run input that would have been submitted.
    DryRun(RunInput),
    Started { run_id: String, run_input: RunInput },
}

/// Build the run input and, unless this is a dry run, start a run with it.
pub async fn build_and_submit(
    options: &JobOptions,
    submission: &Submission,
    catalog: &dyn LanguageCatalog,
    orchestrator: &dyn Orchestrator,
) -> Result<CreateOutcome> {
    let run_input = build_run_input(options, catalog).await?;
    tracing::debug!(
        "Built run input for job {} with {} translation(s)",
        run_input.transcribe.transcription_job_name,
        run_input.translate.inputs.len()
    );

    if submission.dry_run {
        return Ok(CreateOutcome::DryRun(run_input));
    }

    let state_machine_arn = submission
        .state_machine_arn
        .as_deref()
        .filter(|arn| !arn.is_empty())
        .ok_or_else(|| Error::configuration("state machine ARN is required unless dry run"))?;

    let run_id = orchestrator
        .start(state_machine_arn, &run_input.to_json()?)
        .await?;
    tracing::info!("Started run {}", run_id);

    Ok(CreateOutcome::Started { run_id, run_input })
}
