//! Results page configuration.
//!
//! Every field has a default so a partial (or missing) config file still
//! yields a usable [`ReportConfig`].

use serde::{Deserialize, Serialize};

use crate::combatant::Role;

pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_VIEW_LOAD_ATTEMPTS: u32 = 3;
pub const DEFAULT_VIEW_RETRY_DELAY_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Passed to the analysis engine when generating results
    pub locale: String,
    /// Treat an unknown tab id as an error instead of showing the overview
    pub strict_tab_resolution: bool,
    /// Role that gets the extra resource widget on the statistics tab
    pub gated_widget_role: Role,
    pub european_number_format: bool,
    pub view_loading: ViewLoadingConfig,
    pub contribute: ContributeLinks,
    pub about: AboutConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            strict_tab_resolution: false,
            gated_widget_role: Role::Healer,
            european_number_format: false,
            view_loading: ViewLoadingConfig::default(),
            contribute: ContributeLinks::default(),
            about: AboutConfig::default(),
        }
    }
}

/// Retry budget for lazily loaded views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewLoadingConfig {
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    /// Multiplier applied to the delay after every failed attempt
    pub backoff: u32,
}

impl Default for ViewLoadingConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_VIEW_LOAD_ATTEMPTS,
            retry_delay_ms: DEFAULT_VIEW_RETRY_DELAY_MS,
            backoff: 1,
        }
    }
}

/// Where to send people when a spec is missing a feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributeLinks {
    pub github_url: String,
    pub discord_url: String,
}

impl Default for ContributeLinks {
    fn default() -> Self {
        Self {
            github_url: "https://github.com/WoWAnalyzer/WoWAnalyzer".to_string(),
            discord_url: "https://discord.gg/AxphPxU".to_string(),
        }
    }
}

/// Static "About" tab metadata for the analyzed spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    pub spec_name: String,
    pub maintainers: Vec<String>,
    pub patch_compatibility: Option<String>,
    pub description: Vec<String>,
}
