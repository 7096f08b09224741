pub mod config;
pub mod extract;
pub mod provider;
pub mod query;
pub mod settings;

pub use config::ConfigError;
pub use extract::ExtractError;
pub use provider::ProviderError;
pub use query::QueryError;
pub use settings::SettingsError;
