use crate::error::AppError;

use models::Locale;
use search_core::{
    FileSettingsStore, GeminiClient, ServiceConfig, ServiceContext, SettingsStore,
    load_ambient_default,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

/// Directory under the config dir that receives the log file.
pub const LOG_DIR_NAME: &str = "logs";

/// `{config_dir}/logs`.
pub fn log_dir(config_dir: &Path) -> PathBuf {
    config_dir.join(LOG_DIR_NAME)
}

/// Wiring for one invocation: config, settings store and service context.
pub struct App {
    config_dir: PathBuf,
    store: Arc<FileSettingsStore>,
    context: ServiceContext,
}

impl App {
    /// Build the app with the ambient default read from `.env` files and the
    /// environment.
    pub fn load(config_dir: &Path, locale: Option<Locale>) -> Result<Self, AppError> {
        Self::with_ambient_default(config_dir, locale, load_ambient_default())
    }

    /// Build the app with an explicit ambient default.
    pub fn with_ambient_default(
        config_dir: &Path,
        locale: Option<Locale>,
        ambient_default: Option<String>,
    ) -> Result<Self, AppError> {
        let mut config = ServiceConfig::load(config_dir)?;
        if let Some(locale) = locale {
            config.locale = locale;
        }
        debug!("Service config: {:?}", config);

        let client = GeminiClient::new(&config.base_url, config.request_timeout())?;
        let store = Arc::new(FileSettingsStore::new(config_dir));

        info!(
            "Using config directory {} (ambient default available: {})",
            config_dir.display(),
            ambient_default.is_some()
        );

        let context = ServiceContext::new(
            Arc::new(client),
            store.clone() as Arc<dyn SettingsStore>,
            ambient_default,
            config,
        );

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            store,
            context,
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn store(&self) -> &FileSettingsStore {
        &self.store
    }

    pub fn context(&self) -> &ServiceContext {
        &self.context
    }
}
