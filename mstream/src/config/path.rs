// Copyright 2026 The mstream Project
// SPDX-License-Identifier: Apache-2.0

// Config file path resolution.
//
// Resolution order:
//   1. `--config` on the command line
//   2. `$MSTREAM_CONFIG` environment variable
//   3. `./config/config.yaml`, if it exists
//   4. `<platform config dir>/mstream/config.yaml`

use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "MSTREAM_CONFIG";

/// Resolve the config file to load.
///
/// Returns `None` only if nothing was given explicitly, there is no local
/// `config/config.yaml` and no platform config directory can be determined.
pub fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    let local = Path::new("config").join("config.yaml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir().map(|dir| dir.join("mstream").join("config.yaml"))
}
