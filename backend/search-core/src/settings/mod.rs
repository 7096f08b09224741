//! Persisted, collaborator-owned state.
//!
//! Holds the credential override slot, the theme preference and an optional
//! cached weather report. The core only writes it on the probe-success path
//! ([`crate::services::CredentialProbe::probe_and_store`]), the explicit clear
//! path, and the weather cache path.

pub mod cache;

pub use cache::CachedWeather;

use crate::SETTINGS_FILE_NAME;
use crate::error::SettingsError;

use common::ErrorLocation;
use models::Theme;

use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, RwLock};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const SETTINGS_VERSION: u32 = 1;

// ============================================
// SETTINGS STRUCTS
// ============================================

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSettings {
    /// Validated user override. Written only after a successful probe.
    #[serde(default)]
    pub user_override: Option<String>,
}

impl fmt::Debug for CredentialSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSettings")
            .field("user_override", &self.user_override.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub credential: CredentialSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub weather_cache: Option<CachedWeather>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            credential: CredentialSettings::default(),
            ui: UiSettings::default(),
            weather_cache: None,
        }
    }
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Settings {
    /// Validate settings values.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.version == 0 || self.version > SETTINGS_VERSION {
            return Err(SettingsError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, SETTINGS_VERSION
                ),
            });
        }

        if let Some(cached) = &self.weather_cache
            && (!cached.latitude.is_finite() || !cached.longitude.is_finite())
        {
            return Err(SettingsError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Cached weather coordinates must be finite".to_string(),
            });
        }

        Ok(())
    }
}

// ============================================
// STORE TRAIT
// ============================================

/// Where [`Settings`] live. Implementations must be safe to share across tasks.
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<Settings, SettingsError>;

    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;

    /// Load, apply `mutate`, save. Returns the saved settings.
    fn update(
        &self,
        mutate: &mut dyn FnMut(&mut Settings),
    ) -> Result<Settings, SettingsError> {
        let mut settings = self.load()?;
        mutate(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }

    /// Like [`SettingsStore::update`], but a corrupt store is replaced by
    /// defaults with `mutate` applied instead of failing.
    ///
    /// For user-initiated writes (clearing the override, choosing a theme) that
    /// must be able to recover a damaged file.
    fn update_or_reset(
        &self,
        mutate: &mut dyn FnMut(&mut Settings),
    ) -> Result<Settings, SettingsError> {
        match self.update(&mut *mutate) {
            Err(e) if e.is_corrupt() => {
                warn!("Settings unreadable, replacing with defaults: {}", e);
                let mut settings = Settings::default();
                mutate(&mut settings);
                self.save(&settings)?;
                Ok(settings)
            }
            result => result,
        }
    }

    fn user_override(&self) -> Result<Option<String>, SettingsError> {
        Ok(self.load()?.credential.user_override)
    }
}

// ============================================
// FILE STORE
// ============================================

/// `{dir}/settings.json`, written atomically.
#[derive(Debug)]
pub struct FileSettingsStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE_NAME)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SettingsStore for FileSettingsStore {
    /// A missing file yields defaults. A corrupt or invalid file is an error.
    fn load(&self) -> Result<Settings, SettingsError> {
        let settings_path = self.path();

        if !settings_path.exists() {
            debug!(
                "Settings file not found at {}, using defaults",
                settings_path.display()
            );
            return Ok(Settings::default());
        }

        let contents =
            std::fs::read_to_string(&settings_path).map_err(|e| SettingsError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: settings_path.clone(),
                source: e,
            })?;

        let settings: Settings =
            serde_json::from_str(&contents).map_err(|e| SettingsError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: settings_path.clone(),
                reason: e.to_string(),
            })?;

        settings.validate()?;

        debug!("Settings loaded from {}", settings_path.display());
        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let _guard = self.lock()?;
        self.write_atomic(settings)
    }

    /// Holds the write lock across load-mutate-save.
    fn update(
        &self,
        mutate: &mut dyn FnMut(&mut Settings),
    ) -> Result<Settings, SettingsError> {
        let _guard = self.lock()?;
        let mut settings = self.load()?;
        mutate(&mut settings);
        self.write_atomic(&settings)?;
        Ok(settings)
    }
}

impl FileSettingsStore {
    fn lock(&self) -> Result<MutexGuard<'_, ()>, SettingsError> {
        self.write_lock.lock().map_err(|e| SettingsError::LockError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })
    }

    /// Temp file + rename, so a crash never leaves a half-written file.
    fn write_atomic(&self, settings: &Settings) -> Result<(), SettingsError> {
        settings.validate()?;

        std::fs::create_dir_all(&self.dir).map_err(|e| SettingsError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: self.dir.clone(),
            source: e,
        })?;

        let settings_path = self.path();
        let temp_path = self.dir.join(format!("{}.tmp", SETTINGS_FILE_NAME));

        let json =
            serde_json::to_string_pretty(settings).map_err(|e| SettingsError::SerializeError {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })?;

        std::fs::write(&temp_path, json).map_err(|e| SettingsError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &settings_path).map_err(|e| SettingsError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: settings_path.clone(),
            source: e,
        })?;

        info!("Settings saved to {}", settings_path.display());
        Ok(())
    }
}

// ============================================
// MEMORY STORE
// ============================================

/// In-process store for tests and embedding callers that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    inner: RwLock<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }

    pub fn with_override(user_override: impl Into<String>) -> Self {
        let mut settings = Settings::default();
        settings.credential.user_override = Some(user_override.into());
        Self::new(settings)
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        self.inner
            .read()
            .map(|settings| settings.clone())
            .map_err(|e| SettingsError::LockError {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        settings.validate()?;

        let mut guard = self.inner.write().map_err(|e| SettingsError::LockError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;
        *guard = settings.clone();
        Ok(())
    }

    /// Holds the write lock across load-mutate-save.
    fn update(
        &self,
        mutate: &mut dyn FnMut(&mut Settings),
    ) -> Result<Settings, SettingsError> {
        let mut guard = self.inner.write().map_err(|e| SettingsError::LockError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        let mut next = guard.clone();
        mutate(&mut next);
        next.validate()?;
        *guard = next.clone();
        Ok(next)
    }
}
