// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management for VPC clients
//!
//! This module reads the profile file that tells a client which regional
//! endpoint and API version to use.
//!
//! # Environment Variables
//!
//! The following environment variables are supported:
//!
//! - `VPC_CONFIG` - Path to the config file (default: `~/.vpc/config`)
//! - `VPC_PROFILE` - Override the active profile
//! - `VPC_URL` - Override the service URL
//! - `VPC_API_VERSION` - Override the API version date
//!
//! # Example
//!
//! ```no_run
//! use vpc_api_rs::config::VpcConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load with environment variable overrides
//! let config = VpcConfig::load_with_env()?;
//!
//! if let Some(profile) = config.active_profile() {
//!     println!("Using version: {:?}", profile.version);
//! }
//! # Ok(())
//! # }
//! ```

mod vpcconfig;

pub use vpcconfig::{
    VpcConfig, VpcProfile, ENV_VPC_API_VERSION, ENV_VPC_CONFIG, ENV_VPC_PROFILE, ENV_VPC_URL,
};
