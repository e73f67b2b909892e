// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service handle for the VPC API.
//!
//! [`VpcV1`] carries what every request needs (base URL, API version date and
//! generation) and turns typed values into ready-to-send requests. It does no
//! network I/O; the HTTP layer sends a [`PreparedRequest`] and hands response
//! bodies back to [`VpcV1::decode`].

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::codec::{self, Encode, Family};
use crate::config::VpcProfile;
use crate::error::{Result, VpcError};
use crate::resources::{InstancePrototype, NetworkAclRulePrototype};

/// Endpoint used when no service URL is configured.
pub const DEFAULT_SERVICE_URL: &str = "https://us-south.iaas.cloud.ibm.com/v1";

/// API version date sent when the caller does not pick one.
pub const DEFAULT_VERSION: &str = "2025-04-08";

/// Infrastructure generation sent when the caller does not pick one.
pub const DEFAULT_GENERATION: u32 = 2;

#[derive(Clone, Debug)]
pub struct VpcV1Options {
    pub service_url: String,
    /// API version date (`YYYY-MM-DD`). Optional: [`DEFAULT_VERSION`] is used
    /// when unset.
    pub version: Option<String>,
    pub generation: Option<u32>,
}

impl Default for VpcV1Options {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            version: None,
            generation: None,
        }
    }
}

impl VpcV1Options {
    /// Options taken from a config profile. Unset profile fields keep their
    /// defaults.
    #[must_use]
    pub fn from_profile(profile: &VpcProfile) -> Self {
        let defaults = Self::default();
        Self {
            service_url: profile
                .service_url
                .clone()
                .unwrap_or(defaults.service_url),
            version: profile.version.clone(),
            generation: profile.generation,
        }
    }
}

/// HTTP method of a [`PreparedRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Patch => write!(f, "PATCH"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request ready for the transport layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    /// JSON body, if the call has one.
    pub body: Option<String>,
}

#[derive(Clone, Debug)]
pub struct VpcV1 {
    service_url: Url,
    version: String,
    generation: u32,
}

impl VpcV1 {
    /// Build a service handle.
    ///
    /// # Errors
    ///
    /// Returns [`VpcError::Config`] for an unparsable or non-HTTP service URL
    /// and [`VpcError::Validation`] for a version that is not `YYYY-MM-DD`.
    #[allow(clippy::result_large_err)]
    pub fn new(options: VpcV1Options) -> Result<Self> {
        let service_url = Url::parse(&options.service_url).map_err(|e| {
            VpcError::Config(format!(
                "Invalid service URL {}: {e}",
                options.service_url
            ))
        })?;
        if !matches!(service_url.scheme(), "http" | "https") {
            return Err(VpcError::Config(format!(
                "Unsupported service URL scheme: {}",
                service_url.scheme()
            )));
        }

        let version = match options.version {
            Some(version) => {
                validate_version(&version)?;
                version
            }
            None => DEFAULT_VERSION.to_string(),
        };
        let generation = options.generation.unwrap_or(DEFAULT_GENERATION);

        debug!(
            service_url = %service_url,
            version = %version,
            generation,
            "created VPC service handle"
        );

        Ok(Self {
            service_url,
            version,
            generation,
        })
    }

    /// Build a service handle from the active profile of the config file,
    /// after environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`VpcError::Config`] if the config cannot be loaded, plus the
    /// errors of [`VpcV1::new`].
    #[allow(clippy::result_large_err)]
    pub fn from_config() -> Result<Self> {
        let config = crate::config::VpcConfig::load_with_env()?;
        let options = config
            .active_profile()
            .map(VpcV1Options::from_profile)
            .unwrap_or_default();
        Self::new(options)
    }

    /// The API version date sent with every request.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    /// Full URL for `path` below the service URL, with the `version` and
    /// `generation` query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`VpcError::Config`] if `path` does not form a valid URL.
    #[allow(clippy::result_large_err)]
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        let mut base = self.service_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        let mut url = base
            .join(path.trim_start_matches('/'))
            .map_err(|e| VpcError::Config(format!("Invalid request path {path}: {e}")))?;
        url.query_pairs_mut()
            .append_pair("version", &self.version)
            .append_pair("generation", &self.generation.to_string());
        Ok(url)
    }

    /// Prepare a request whose body is the full encoding of `body`.
    ///
    /// # Errors
    ///
    /// Propagates URL and encode errors.
    #[allow(clippy::result_large_err)]
    pub fn prepare<T: Encode + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> Result<PreparedRequest> {
        let url = self.endpoint_url(path)?;
        let body = body.map(codec::marshal).transpose()?;
        Ok(PreparedRequest { method, url, body })
    }

    /// Decode a response body into a family value.
    ///
    /// # Errors
    ///
    /// See [`codec::unmarshal_slice`].
    #[allow(clippy::result_large_err)]
    pub fn decode<F: Family>(&self, body: &[u8]) -> Result<F> {
        codec::unmarshal_slice(body)
    }

    /// Decode the array under `key` of a collection response, e.g. the
    /// `rules` of a rule listing.
    ///
    /// # Errors
    ///
    /// [`VpcError::MalformedInput`] if the body is not an object holding an
    /// array under `key`, otherwise the first element's decode error.
    #[allow(clippy::result_large_err)]
    pub fn decode_collection<F: Family>(&self, body: &[u8], key: &str) -> Result<Vec<F>> {
        let raw = codec::RawObject::from_slice(F::NAME, body)?;
        match raw.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .cloned()
                .map(codec::unmarshal_value::<F>)
                .collect(),
            Some(_) | None => Err(VpcError::MalformedInput {
                family: F::NAME,
                reason: format!("expected an array under `{key}`"),
            }),
        }
    }

    /// `POST /instances`
    ///
    /// # Errors
    ///
    /// See [`VpcV1::prepare`].
    #[allow(clippy::result_large_err)]
    pub fn create_instance(&self, prototype: &InstancePrototype) -> Result<PreparedRequest> {
        self.prepare(Method::Post, "instances", Some(prototype))
    }

    /// `POST /network_acls/{id}/rules`
    ///
    /// # Errors
    ///
    /// See [`VpcV1::prepare`].
    #[allow(clippy::result_large_err)]
    pub fn create_network_acl_rule(
        &self,
        network_acl_id: &str,
        prototype: &NetworkAclRulePrototype,
    ) -> Result<PreparedRequest> {
        let path = format!("network_acls/{network_acl_id}/rules");
        self.prepare(Method::Post, &path, Some(prototype))
    }

    /// `GET /instance/templates/{id}`
    ///
    /// # Errors
    ///
    /// See [`VpcV1::endpoint_url`].
    #[allow(clippy::result_large_err)]
    pub fn get_instance_template(&self, id: &str) -> Result<PreparedRequest> {
        Ok(PreparedRequest {
            method: Method::Get,
            url: self.endpoint_url(&format!("instance/templates/{id}"))?,
            body: None,
        })
    }
}

/// Check that `version` is a calendar-shaped `YYYY-MM-DD` date.
#[allow(clippy::result_large_err)]
fn validate_version(version: &str) -> Result<()> {
    let invalid = || {
        VpcError::Validation(format!(
            "version must be a date in YYYY-MM-DD format, got {version:?}"
        ))
    };

    let bytes = version.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(invalid());
    }
    let number = |range: std::ops::Range<usize>| -> Result<u32> {
        let part = &version[range];
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse().map_err(|_| invalid())
    };
    let month = number(5..7)?;
    let day = number(8..10)?;
    number(0..4)?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(invalid());
    }
    Ok(())
}
