use crate::domain::assessment::Location;
use crate::domain::policy::{CHOKEPOINT_TRANSIT, PolicyRegistry, ScoringPolicy};
use crate::domain::summary::AggregationStrategy;
use crate::domain::weather::ASSESSMENT_WINDOW;
use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "config/maritime-risk";
pub const CONFIG_PATH_ENV: &str = "MARITIME_RISK_CONFIG";
pub const ENV_PREFIX: &str = "MARITIME_RISK";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Assess once, write the JSON report and HTML dashboard, exit.
    Report,
    /// Serve assessments over HTTP.
    Serve,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub mode: RunMode,
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub scoring: ScoringSettings,
    pub output: OutputSettings,
    #[serde(default)]
    pub locations: Vec<LocationConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_concurrency: usize,
    pub forecast_hours: usize,
    pub timezone: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScoringSettings {
    pub policy: String,
    pub aggregation: AggregationStrategy,
    #[serde(default)]
    pub custom_policies: Vec<ScoringPolicy>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSettings {
    pub directory: String,
    pub file_prefix: String,
    pub html_file: String,
    pub title: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl AppConfig {
    pub fn locations(&self) -> Vec<Location> {
        self.locations
            .iter()
            .map(|l| Location::new(l.name.clone(), l.lat, l.lon))
            .collect()
    }

    /// Preset policies plus any custom ones from the config file.
    pub fn policy_registry(&self) -> anyhow::Result<PolicyRegistry> {
        let mut registry = PolicyRegistry::with_presets();
        for policy in &self.scoring.custom_policies {
            registry
                .register(policy.clone())
                .with_context(|| format!("Invalid custom policy {}", policy.name))?;
        }
        Ok(registry)
    }

    /// Rejects settings that would make every location fail.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.provider.forecast_hours < ASSESSMENT_WINDOW {
            anyhow::bail!(
                "provider.forecast_hours is {} but assessments need at least {} hours",
                self.provider.forecast_hours,
                ASSESSMENT_WINDOW
            );
        }
        Ok(())
    }

    pub fn selected_policy(&self) -> anyhow::Result<ScoringPolicy> {
        let registry = self.policy_registry()?;
        let policy = registry.get(&self.scoring.policy).with_context(|| {
            format!(
                "Available policies: {}",
                registry.names().collect::<Vec<_>>().join(", ")
            )
        })?;
        Ok(policy.clone())
    }
}

fn builder_with_defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("mode", "report")?
        .set_default("server.addr", "0.0.0.0:8080")?
        .set_default("provider.base_url", "https://api.open-meteo.com")?
        .set_default("provider.timeout_secs", 20)?
        .set_default("provider.max_concurrency", 4)?
        .set_default("provider.forecast_hours", 24)?
        .set_default("provider.timezone", "GMT")?
        .set_default("scoring.policy", CHOKEPOINT_TRANSIT)?
        .set_default("scoring.aggregation", "worst_case")?
        .set_default("output.directory", ".")?
        .set_default("output.file_prefix", "maritime_risk")?
        .set_default("output.html_file", "dashboard.html")?
        .set_default("output.title", "Global Maritime Chokepoint Risk Dashboard")?)
}

/// Defaults, then the config file (optional), then `MARITIME_RISK__*` env vars.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let settings = builder_with_defaults()?
        .add_source(config::File::with_name(&path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to load configuration from {}", path))?;

    let app_config: AppConfig = settings.try_deserialize().context("Invalid configuration")?;
    app_config.validate().with_context(|| format!("Invalid configuration in {}", path))?;
    if app_config.locations.is_empty() {
        tracing::warn!("No locations configured; runs will produce an empty summary");
    }
    Ok(app_config)
}
