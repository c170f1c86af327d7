// Config loader and validator
//
// Loads the mstream YAML config, validates structure, resolves variable
// interpolation and parses the server URL. Also home to the filter word
// list reader and config path resolution.

mod error;
mod interpolation;
mod loader;
mod path;
mod raw;
mod source;
mod types;
mod wordlist;

pub use error::ConfigError;
pub use interpolation::resolve_variables;
pub use loader::{load_config, CONFIG_VERSION};
pub use path::{resolve_config_path, CONFIG_ENV};
pub use source::{ConfigSource, FileSource, StringSource};
pub use types::{AuthConfig, Config, FilterPaths, NetworkConfig};
pub use wordlist::{load_word_list, load_word_list_or_empty, parse_word_list};
