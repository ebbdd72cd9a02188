//! Application-level configuration.
//!
//! - [`SessionConfig`]: days, per-stream quotas, timing, whisper group

pub mod session_config;

pub use session_config::SessionConfig;
