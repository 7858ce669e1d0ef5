//! Configuration module.
//!
//! Settings only affect the [`Client`](crate::sdk::Client); `render` and
//! `validate` never read them.

mod settings;

pub use settings::{LoggingSettings, RenderSettings, Settings, SettingsError};
