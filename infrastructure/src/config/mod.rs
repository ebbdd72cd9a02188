//! Configuration file loading for realtalk
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `REALTALK_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./realtalk.toml` or `./.realtalk.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/realtalk/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig, FileRealtimeConfig,
    FileServerConfig, FileTalkConfig, FileWhisperConfig,
};
pub use loader::ConfigLoader;
