use serde::{Deserialize, Serialize};
use subflow_jobs::JobOptions;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,

    /// Job options applied beneath command-line and event options
    #[serde(default)]
    pub defaults: JobOptions,

    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrchestratorConfig {
    /// State machine started by `create` and the event handler
    #[serde(default)]
    pub state_machine_arn: Option<String>,
}

/// Media asset catalog credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub app_id: String,

    #[serde(default)]
    pub auth_token: String,

    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            app_id: String::new(),
            auth_token: String::new(),
            base_url: default_catalog_base_url(),
        }
    }
}

fn default_true() -> bool {
    true
}

pub fn default_catalog_base_url() -> String {
    "https://app.iconik.io/API".to_string()
}
