//! Infrastructure layer for realtalk
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod connection;
pub mod logging;
pub mod viewer;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileRealtimeConfig, FileServerConfig, FileTalkConfig, FileWhisperConfig,
};
pub use connection::{LineConnection, accept_agents};
pub use logging::FileGameLogger;
pub use viewer::{ChannelViewerBroadcaster, record_viewer_events};
