//! Configuration loading and management

use crate::core::donation::Campaign;
use crate::core::error::ConfigError;
use crate::core::query::{MAX_LIMIT, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind (e.g., "127.0.0.1:3000")
    pub bind: String,

    /// Allow cross-origin requests from any origin
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            cors: true,
        }
    }
}

/// Alumni directory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Roster file (.json, .yaml or .yml); relative paths resolve against the config file
    pub roster_path: Option<PathBuf>,

    /// Sort applied when a request does not name one (e.g., "name-asc")
    pub default_sort: String,

    /// Largest page size a client may request
    pub max_page_size: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            roster_path: None,
            default_sort: SortSpec::default().to_string(),
            max_page_size: MAX_LIMIT,
        }
    }
}

impl DirectoryConfig {
    /// Parsed default sort
    pub fn default_sort(&self) -> Result<SortSpec, ConfigError> {
        self.default_sort
            .parse()
            .map_err(|e: crate::core::error::QueryError| ConfigError::InvalidValue {
                field: "directory.default_sort".to_string(),
                value: self.default_sort.clone(),
                message: e.to_string(),
            })
    }
}

/// Donation ledger settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DonationConfig {
    pub campaigns: Vec<Campaign>,

    /// Largest single pledge accepted, if limited
    pub max_pledge: Option<u64>,
}

/// Complete portal configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub server: ServerConfig,
    pub directory: DirectoryConfig,
    pub donations: DonationConfig,
}

impl PortalConfig {
    /// Load configuration from a YAML file
    ///
    /// A relative `directory.roster_path` is resolved against the file's directory.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("{}: {}", path.display(), e),
        })?;

        let mut config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;

        if let (Some(roster), Some(base)) = (&config.directory.roster_path, path.parent()) {
            if roster.is_relative() {
                config.directory.roster_path = Some(base.join(roster));
            }
        }

        config.validate()?;
        tracing::info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.directory.default_sort()?;

        if self.directory.max_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "directory.max_page_size".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let mut slugs = HashSet::new();
        for campaign in &self.donations.campaigns {
            if !slugs.insert(campaign.slug.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "donations.campaigns.slug".to_string(),
                    value: campaign.slug.clone(),
                    message: "duplicate campaign slug".to_string(),
                });
            }
            if campaign.target == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("donations.campaigns.{}.target", campaign.slug),
                    value: "0".to_string(),
                    message: "target must be greater than zero".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Create a default configuration with the standard donation campaigns
    pub fn default_config() -> Self {
        let campaign = |slug: &str, title: &str, description: &str, raised: u64, target: u64| Campaign {
            slug: slug.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            raised,
            target,
        };

        Self {
            donations: DonationConfig {
                campaigns: vec![
                    campaign(
                        "scholarships",
                        "Scholarships",
                        "Empower deserving students to achieve their academic dreams without financial burden.",
                        75_000,
                        100_000,
                    ),
                    campaign(
                        "infrastructure",
                        "Infrastructure",
                        "Help us build and maintain state-of-the-art facilities for learning and research.",
                        120_000,
                        250_000,
                    ),
                    campaign(
                        "community-fund",
                        "Community Fund",
                        "Support alumni events, mentorship programs, and networking opportunities.",
                        30_000,
                        50_000,
                    ),
                    campaign(
                        "research-grants",
                        "Research Grants",
                        "Fuel groundbreaking research that solves real-world problems and pushes boundaries.",
                        90_000,
                        150_000,
                    ),
                ],
                max_pledge: None,
            },
            ..Default::default()
        }
    }
}
