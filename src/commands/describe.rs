use crate::orchestrator::{Orchestrator, RunDescription};
use subflow_common::Result;

/// Fetch a run and render it as indented JSON, optionally reduced to the
/// files it produced.
pub async fn describe_run(
    orchestrator: &dyn Orchestrator,
    run_id: &str,
    uris_only: bool,
) -> Result<String> {
    let raw = orchestrator.describe(run_id).await?;
    let description = RunDescription::decode(raw)?;
    tracing::debug!("Run {} is {}", run_id, description.status);

    let rendered = if uris_only {
        serde_json::to_string_pretty(&description.transcription_uris())?
    } else {
        serde_json::to_string_pretty(&description)?
    };
    Ok(rendered)
}
