// Infrastructure layer modules
pub mod algolia;
pub mod config;
pub mod index_gateway;
pub mod logging;

// Re-exports
pub use algolia::{AlgoliaClient, AlgoliaConfig};
pub use config::{require_settings, setting, ConfigError, SyncConfig, REQUIRED_SETTINGS};
pub use index_gateway::{IndexGateway, IndexGatewayError};
pub use logging::init_logging;
