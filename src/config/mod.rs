mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LoggingConfig, RegistryConfig, MAX_PAGE_SIZE};
