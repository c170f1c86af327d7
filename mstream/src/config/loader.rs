// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use url::Url;

use super::error::ConfigError;
use super::interpolation::resolve_variables;
use super::raw;
use super::source::ConfigSource;
use super::types::*;

/// The only config format version understood by this build.
pub const CONFIG_VERSION: &str = "v1";

/// Load and validate an mstream config from the given source.
///
/// Steps:
/// 1. Read raw YAML from source
/// 2. Parse YAML into raw deserialization types
/// 3. Validate the format version
/// 4. Resolve variable interpolation in string fields
/// 5. Parse the server URL and check the token
/// 6. Join filter file names onto the filter directory
pub fn load_config(source: &dyn ConfigSource) -> Result<Config, ConfigError> {
    let raw_yaml = source.load()?;
    let raw: raw::RawConfig = serde_yaml::from_str(&raw_yaml)?;

    if raw.mstream != CONFIG_VERSION {
        return Err(ConfigError::Validation(format!(
            "unsupported config version \"{}\", expected \"{CONFIG_VERSION}\"",
            raw.mstream
        )));
    }

    let network = build_network_config(&raw.network)?;
    let auth = build_auth_config(&raw.authentication)?;
    let filters = build_filter_paths(&raw.filters)?;

    Ok(Config {
        version: raw.mstream,
        network,
        auth,
        filters,
    })
}

fn build_network_config(raw: &raw::RawNetwork) -> Result<NetworkConfig, ConfigError> {
    let host = resolve_variables(raw.host.trim())?;
    let url = Url::parse(&host).map_err(|source| ConfigError::InvalidUrl {
        url: host.clone(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::Validation(format!(
                "unsupported scheme \"{other}\" in network.host, expected \"http\" or \"https\""
            )));
        }
    }

    Ok(NetworkConfig { host: url })
}

fn build_auth_config(raw: &raw::RawAuthentication) -> Result<AuthConfig, ConfigError> {
    let bearer_token = resolve_variables(raw.bearer_token.trim())?;
    if bearer_token.is_empty() {
        return Err(ConfigError::Validation(
            "authentication.bearer_token must not be empty".to_string(),
        ));
    }
    Ok(AuthConfig { bearer_token })
}

fn build_filter_paths(raw: &raw::RawFilters) -> Result<FilterPaths, ConfigError> {
    let dir = raw
        .dir
        .as_deref()
        .map(resolve_variables)
        .transpose()?
        .map(PathBuf::from);

    let resolve = |name: &Option<String>| -> Result<Option<PathBuf>, ConfigError> {
        match name.as_deref() {
            Some(name) => {
                let name = resolve_variables(name)?;
                Ok(Some(join_filter_path(dir.as_deref(), &name)))
            }
            None => Ok(None),
        }
    };

    Ok(FilterPaths {
        content: resolve(&raw.content)?,
        account: resolve(&raw.account)?,
        client: resolve(&raw.client)?,
        highlight: resolve(&raw.highlight)?,
    })
}

/// Relative names live under the filter directory; absolute ones stand alone.
fn join_filter_path(dir: Option<&Path>, name: &str) -> PathBuf {
    match dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
