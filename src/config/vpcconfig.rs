// SPDX-License-Identifier: MIT OR Apache-2.0

//! VPC client configuration file parser
//!
//! The file (typically `~/.vpc/config`) holds one or more named profiles,
//! each pointing at a regional service endpoint.
//!
//! # Example
//!
//! ```no_run
//! use vpc_api_rs::config::VpcConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VpcConfig::load_default()?;
//!
//! if let Some(profile) = config.active_profile() {
//!     println!("Service URL: {:?}", profile.service_url);
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, VpcError};

/// Path to the config file (default: `~/.vpc/config`).
pub const ENV_VPC_CONFIG: &str = "VPC_CONFIG";
/// Override the active profile.
pub const ENV_VPC_PROFILE: &str = "VPC_PROFILE";
/// Override the service URL of the active profile.
pub const ENV_VPC_URL: &str = "VPC_URL";
/// Override the API version date of the active profile.
pub const ENV_VPC_API_VERSION: &str = "VPC_API_VERSION";

/// Profile created by environment overrides when no profile is active.
const DEFAULT_PROFILE: &str = "default";

/// Represents the entire configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VpcConfig {
    /// The currently active profile name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Map of profile names to their settings
    #[serde(default)]
    pub profiles: HashMap<String, VpcProfile>,
}

/// Settings for one regional endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VpcProfile {
    /// Base URL, e.g. `https://us-south.iaas.cloud.ibm.com/v1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,

    /// API version date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Infrastructure generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<u32>,
}

impl VpcConfig {
    /// Load configuration from the default location (~/.vpc/config)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The home directory cannot be determined
    /// - The config file cannot be read
    /// - The config file is malformed
    #[allow(clippy::result_large_err)]
    pub fn load_default() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed YAML
    #[allow(clippy::result_large_err)]
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            VpcError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| VpcError::Config(format!("Failed to parse config YAML: {}", e)))
    }

    /// Get the default config file path (~/.vpc/config)
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined
    #[allow(clippy::result_large_err)]
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VpcError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(".vpc").join("config"))
    }

    /// Get the path to the config file, respecting `VPC_CONFIG`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined when
    /// `VPC_CONFIG` is not set
    #[allow(clippy::result_large_err)]
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(env_path) = std::env::var(ENV_VPC_CONFIG) {
            Ok(PathBuf::from(env_path))
        } else {
            Self::default_path()
        }
    }

    /// Load the config file (if any) and apply environment overrides.
    ///
    /// A missing file is not an error: the result then holds only what the
    /// environment provides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn load_with_env() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            Self::load_from_path(&path)?
        } else {
            debug!(path = %path.display(), "config file not found, using environment only");
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `VPC_PROFILE`, `VPC_URL` and `VPC_API_VERSION` as resolved by
    /// `lookup`. URL and version overrides land on the active profile, which
    /// is created if it does not exist yet.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(profile) = lookup(ENV_VPC_PROFILE).filter(|p| !p.is_empty()) {
            self.profile = Some(profile);
        }

        let url = lookup(ENV_VPC_URL).filter(|u| !u.is_empty());
        let version = lookup(ENV_VPC_API_VERSION).filter(|v| !v.is_empty());
        if url.is_none() && version.is_none() {
            return;
        }

        let name = self
            .profile
            .get_or_insert_with(|| DEFAULT_PROFILE.to_string())
            .clone();
        let profile = self.profiles.entry(name).or_default();
        if let Some(url) = url {
            profile.service_url = Some(url);
        }
        if let Some(version) = version {
            profile.version = Some(version);
        }
    }

    /// Get the currently active profile
    ///
    /// Returns `None` if no profile is active or if it doesn't exist
    pub fn active_profile(&self) -> Option<&VpcProfile> {
        self.profile
            .as_ref()
            .and_then(|name| self.profiles.get(name))
    }

    /// Get a profile by name
    pub fn get_profile(&self, name: &str) -> Option<&VpcProfile> {
        self.profiles.get(name)
    }

    /// List all available profile names
    pub fn profile_names(&self) -> Vec<&String> {
        self.profiles.keys().collect()
    }
}
