mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, ExportConfig, UiConfig, DEFAULT_BASE_URL};
