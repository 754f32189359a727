mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to load config file: {:?}", path))?;

    tracing::debug!("Loaded configuration from {:?}", path);
    Ok(config)
}

/// Parse and validate configuration text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse configuration")?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./subflow.toml",
        "~/.config/subflow/config.toml",
        "/etc/subflow/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(arn) = &config.orchestrator.state_machine_arn {
        if arn.trim().is_empty() {
            anyhow::bail!("orchestrator.state_machine_arn is set but empty");
        }
    }

    if let Some(catalog) = &config.catalog {
        if catalog.enabled && (catalog.app_id.is_empty() || catalog.auth_token.is_empty()) {
            anyhow::bail!("Catalog is enabled but app_id or auth_token is missing");
        }
        if !catalog.base_url.starts_with("http://") && !catalog.base_url.starts_with("https://") {
            anyhow::bail!("Catalog base_url must be an http(s) URL: {}", catalog.base_url);
        }
    }

    // Catch malformed destinations at load time rather than at submission.
    for (name, uri) in [
        ("transcription_output_s3_uri", &config.defaults.transcription_output_s3_uri),
        ("translation_output_s3_uri", &config.defaults.translation_output_s3_uri),
        ("output_s3_uri", &config.defaults.output_s3_uri),
    ] {
        if let Some(uri) = uri.as_deref().filter(|u| !u.is_empty()) {
            subflow_common::StorageUri::parse(uri)
                .with_context(|| format!("Invalid defaults.{}", name))?;
        }
    }

    Ok(())
}
