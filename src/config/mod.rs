//! Configuration management for FieldTuner
//!
//! Application settings (log level, export directory, custom presets)
//! persisted as JSON under the platform config directory.

pub mod app;

pub use app::AppConfig;
