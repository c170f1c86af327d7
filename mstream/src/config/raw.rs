// Raw YAML deserialization types (internal)
// These are separate from the public Config structs because:
// 1. Strings still carry `${VAR}` references that are resolved afterwards
// 2. The server URL is parsed and file names are joined onto the filter dir
//    between raw and public
// 3. Keeps the public API clean

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RawConfig {
    pub mstream: String,
    pub network: RawNetwork,
    pub authentication: RawAuthentication,
    #[serde(default)]
    pub filters: RawFilters,
}

#[derive(Debug, Deserialize)]
pub struct RawNetwork {
    pub host: String,
}

#[derive(Deserialize)]
pub struct RawAuthentication {
    pub bearer_token: String,
}

impl std::fmt::Debug for RawAuthentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawAuthentication")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFilters {
    /// Directory the file names below are relative to.
    pub dir: Option<String>,
    pub content: Option<String>,
    pub account: Option<String>,
    pub client: Option<String>,
    pub highlight: Option<String>,
}
