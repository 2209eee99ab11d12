use serde::Deserialize;

use crate::error::{CreatorError, CreatorResult};

/// Root application configuration. Loaded from environment variables
/// with the prefix `CREATOR_STUDIO__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub ads: AdsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default functions
fn default_node_id() -> String {
    "node-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            planner: PlannerConfig::default(),
            ads: AdsConfig::default(),
        }
    }
}

// ─── Planner Config ─────────────────────────────────────────────────────────

/// Upstream chat-completion gateway used by the campaign planner.
///
/// `api_key` is read as a plain string here and wrapped in a secret type by
/// the gateway client; it must never be logged.
#[derive(Clone, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_planner_base_url")]
    pub base_url: String,
    #[serde(default = "default_planner_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// No timeout unless set.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_planner_base_url() -> String {
    "https://ai.gateway.lovable.dev/v1".to_string()
}
fn default_planner_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: default_planner_base_url(),
            model: default_planner_model(),
            api_key: None,
            request_timeout_secs: None,
        }
    }
}

impl std::fmt::Debug for PlannerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

// ─── Ads Config ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AdsConfig {
    /// Smallest total budget the ad wizard lets through the budget step.
    #[serde(default = "default_min_budget")]
    pub min_budget: u32,
    /// Budget a freshly opened wizard starts with.
    #[serde(default = "default_budget")]
    pub default_budget: u32,
}

fn default_min_budget() -> u32 { 100 }
fn default_budget() -> u32 { 500 }

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            min_budget: default_min_budget(),
            default_budget: default_budget(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> CreatorResult<Self> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CREATOR_STUDIO")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        tracing::debug!(node_id = %config.node_id, "configuration loaded from environment");
        Ok(config)
    }

    /// Reject combinations the services cannot run with.
    pub fn validate(&self) -> CreatorResult<()> {
        if self.ads.default_budget < self.ads.min_budget {
            return Err(CreatorError::Config(format!(
                "ads.default_budget ({}) is below ads.min_budget ({})",
                self.ads.default_budget, self.ads.min_budget
            )));
        }
        if self.planner.base_url.trim().is_empty() {
            return Err(CreatorError::Config(
                "planner.base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.http_port, 8080);
        assert_eq!(config.ads.min_budget, 100);
        assert!(config.planner.api_key.is_none());
        assert!(config.planner.request_timeout_secs.is_none());
    }

    #[test]
    fn test_default_budget_below_minimum_rejected() {
        let mut config = AppConfig::default();
        config.ads.default_budget = 50;
        assert!(matches!(config.validate(), Err(CreatorError::Config(_))));
    }

    #[test]
    fn test_planner_debug_redacts_key() {
        let planner = PlannerConfig {
            api_key: Some("sk-very-secret".to_string()),
            ..PlannerConfig::default()
        };
        let rendered = format!("{planner:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
