mod config;
mod error;
mod loader;

pub use config::{
    NormalizationConfig, PluginOptions, PluginOptionsBuilder, TagConfig, Transform,
    TransformPreset, DEFAULT_TAG,
};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
