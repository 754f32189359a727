mod cli;

use subflow::{
    aws::{AwsContext, S3BlobStore, StepFunctionsOrchestrator, TranslateLanguageCatalog},
    catalog::CatalogClient,
    commands::{self, CreateOutcome, Submission, SyncRequest},
    config::{self, Config},
    event::{self, EventContext, StorageEvent},
    storage::DocumentReader,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CreateArgs};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use --verbose or --log-level
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "subflow=debug,subflow_jobs=debug,subflow_common=debug,warn".to_string()
        } else {
            cli.log_level.as_filter().to_string()
        }
    });

    // stdout carries JSON output
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        command => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(dispatch(command, config))
        }
    }
}

async fn dispatch(command: Commands, config: Config) -> Result<()> {
    let aws = Arc::new(AwsContext::new());

    match command {
        Commands::Create(args) => create(&args, &config, aws).await,
        Commands::Describe {
            execution_arn,
            uris_only,
        } => {
            let orchestrator = StepFunctionsOrchestrator::new(aws);
            let rendered = commands::describe_run(&orchestrator, &execution_arn, uris_only)
                .await
                .with_context(|| format!("Failed to describe {}", execution_arn))?;
            println!("{}", rendered);
            Ok(())
        }
        Commands::Event {
            event,
            config_file_uri,
        } => handle_event(&event, config_file_uri, &config, aws).await,
        Commands::Sync {
            execution_arn,
            asset_id,
            storage_id,
            language,
            closed_captions,
        } => {
            let catalog_config = config
                .catalog
                .as_ref()
                .filter(|c| c.enabled)
                .context("sync requires an enabled [catalog] section in the config file")?;
            let catalog = CatalogClient::new(catalog_config);
            let orchestrator = StepFunctionsOrchestrator::new(aws);

            let request = SyncRequest {
                run_id: execution_arn,
                asset_id,
                storage_id,
                language,
                closed_captions,
            };
            let added = commands::sync_subtitles(&orchestrator, &catalog, &request).await?;
            println!("{}", serde_json::to_string_pretty(&added)?);
            Ok(())
        }
        Commands::Validate { .. } => unreachable!("validate runs without a runtime"),
    }
}

async fn create(args: &CreateArgs, config: &Config, aws: Arc<AwsContext>) -> Result<()> {
    let options = config.defaults.clone().layered(args.job_options());
    let submission = Submission {
        state_machine_arn: args
            .state_machine_arn
            .clone()
            .or_else(|| config.orchestrator.state_machine_arn.clone()),
        dry_run: args.dry_run,
    };

    let catalog = TranslateLanguageCatalog::new(aws.clone());
    let orchestrator = StepFunctionsOrchestrator::new(aws);

    match commands::build_and_submit(&options, &submission, &catalog, &orchestrator).await? {
        CreateOutcome::DryRun(run_input) => println!("{}", run_input.to_json_pretty()?),
        CreateOutcome::Started { run_id, .. } => println!("{}", run_id),
    }
    Ok(())
}

async fn handle_event(
    path: &Path,
    config_file_uri: Option<String>,
    config: &Config,
    aws: Arc<AwsContext>,
) -> Result<()> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file: {:?}", path))?
    };
    let storage_event: StorageEvent =
        serde_json::from_str(&content).context("Failed to parse event")?;

    let documents = DocumentReader::new(Arc::new(S3BlobStore::new(aws.clone())));
    let catalog = TranslateLanguageCatalog::new(aws.clone());
    let orchestrator = StepFunctionsOrchestrator::new(aws);

    let ctx = EventContext {
        documents: &documents,
        config_file_uri,
        defaults: config.defaults.clone(),
        state_machine_arn: config.orchestrator.state_machine_arn.clone(),
        catalog: &catalog,
        orchestrator: &orchestrator,
    };
    let response = event::handle_event(&storage_event, &ctx).await?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Configuration is valid.");
    match &config.orchestrator.state_machine_arn {
        Some(arn) => println!("  State machine: {}", arn),
        None => println!("  State machine: (not set, dry runs only)"),
    }
    match config.catalog.as_ref().filter(|c| c.enabled) {
        Some(catalog) => println!("  Catalog: {}", catalog.base_url),
        None => println!("  Catalog: disabled"),
    }
    if let Some(bucket) = &config.defaults.output_bucket_name {
        println!("  Default output bucket: {}", bucket);
    }
    Ok(())
}
