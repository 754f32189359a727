use super::{sdk_error, AwsContext};
use crate::orchestrator::{Orchestrator, RawRunDescription};
use async_trait::async_trait;
use aws_sdk_sfn::primitives::{DateTime, DateTimeFormat};
use std::sync::Arc;
use subflow_common::Result;

/// Runs on AWS Step Functions; run identifiers are execution ARNs.
pub struct StepFunctionsOrchestrator {
    aws: Arc<AwsContext>,
}

impl StepFunctionsOrchestrator {
    pub fn new(aws: Arc<AwsContext>) -> Self {
        Self { aws }
    }
}

fn format_date(date: &DateTime) -> Option<String> {
    date.fmt(DateTimeFormat::DateTime).ok()
}

#[async_trait]
impl Orchestrator for StepFunctionsOrchestrator {
    async fn start(&self, state_machine_arn: &str, input: &str) -> Result<String> {
        let client = self.aws.sfn().await;
        let output = client
            .start_execution()
            .state_machine_arn(state_machine_arn)
            .input(input)
            .send()
            .await
            .map_err(|e| sdk_error("stepfunctions", e))?;

        Ok(output.execution_arn().to_string())
    }

    async fn describe(&self, run_id: &str) -> Result<RawRunDescription> {
        let client = self.aws.sfn().await;
        let output = client
            .describe_execution()
            .execution_arn(run_id)
            .send()
            .await
            .map_err(|e| sdk_error("stepfunctions", e))?;

        Ok(RawRunDescription {
            run_id: output.execution_arn().to_string(),
            state_machine_arn: output.state_machine_arn().to_string(),
            name: output.name().map(str::to_string),
            status: output.status().as_str().to_string(),
            start_date: format_date(output.start_date()),
            stop_date: output.stop_date().and_then(format_date),
            input: output.input().map(str::to_string),
            output: output.output().map(str::to_string),
        })
    }
}
