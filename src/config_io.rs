//! Runtime configuration I/O operations.
//!
//! System directory detection and layered settings loading. These need the
//! `dirs` crate and live apart from config.rs so schema-only builds stay small.

use crate::config::{merge_data, ConfigError, JsonFileStore, MoodnoteConfig, SettingsStore};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Name of the settings file in both layers.
pub const SETTINGS_FILENAME: &str = "data.json";

/// Per-vault folder holding plugin data.
pub const VAULT_DATA_DIR: &str = ".moodnote";

/// A settings layer, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayer {
    /// Hardcoded defaults
    System,
    /// User-global settings (~/.config/moodnote/data.json)
    User,
    /// Vault-local settings (<vault>/.moodnote/data.json)
    Vault,
}

/// Standard directories used by moodnote.
#[derive(Debug, Clone)]
pub struct DirectoryContext {
    /// e.g. ~/.config/moodnote on Linux
    pub config_dir: PathBuf,
    /// e.g. ~/.local/state/moodnote on Linux; logs live under it
    pub state_dir: PathBuf,
}

impl DirectoryContext {
    /// Create a DirectoryContext from the system directories
    /// This should ONLY be called from main()
    pub fn from_system() -> std::io::Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine config directory",
                )
            })?
            .join("moodnote");

        // state_dir is Linux-only; elsewhere keep state next to local data.
        let state_dir = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join("moodnote");

        Ok(Self {
            config_dir,
            state_dir,
        })
    }

    /// Create a DirectoryContext for testing with a temp directory
    pub fn for_testing(temp_dir: &Path) -> Self {
        Self {
            config_dir: temp_dir.join("config"),
            state_dir: temp_dir.join("state"),
        }
    }

    /// Get the user settings file path
    pub fn user_settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILENAME)
    }

    /// Get the log directory path
    pub fn log_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }
}

/// Settings file inside a vault.
pub fn vault_settings_path(vault_root: &Path) -> PathBuf {
    vault_root.join(VAULT_DATA_DIR).join(SETTINGS_FILENAME)
}

/// Loads settings from the user and vault layers and saves to the vault layer.
///
/// Resolution order: System → User → Vault. Keys present in a higher layer
/// override the same keys below it.
pub struct ConfigResolver {
    user: JsonFileStore,
    vault: JsonFileStore,
}

impl ConfigResolver {
    pub fn new(dir_context: &DirectoryContext, vault_root: &Path) -> Self {
        Self::with_vault_path(dir_context, vault_settings_path(vault_root))
    }

    /// Use an explicit file for the vault layer.
    pub fn with_vault_path(dir_context: &DirectoryContext, vault_settings: PathBuf) -> Self {
        Self {
            user: JsonFileStore::new(dir_context.user_settings_path()),
            vault: JsonFileStore::new(vault_settings),
        }
    }

    pub fn layer_path(&self, layer: ConfigLayer) -> Option<&Path> {
        match layer {
            ConfigLayer::System => None,
            ConfigLayer::User => Some(self.user.path()),
            ConfigLayer::Vault => Some(self.vault.path()),
        }
    }

    /// Load all layers and resolve them into settings.
    pub fn resolve(&self) -> Result<MoodnoteConfig, ConfigError> {
        MoodnoteConfig::from_data(self.load_data()?)
    }
}

impl SettingsStore for ConfigResolver {
    fn load_data(&self) -> Result<Option<Value>, ConfigError> {
        let user = self.user.load_data()?;
        let vault = self.vault.load_data()?;
        if user.is_some() {
            tracing::debug!("Loaded user settings layer");
        }
        if vault.is_some() {
            tracing::debug!("Loaded vault settings layer");
        }
        Ok(match (user, vault) {
            (Some(mut merged), Some(top)) => {
                merge_data(&mut merged, &top);
                Some(merged)
            }
            (one, None) | (None, one) => one,
        })
    }

    fn save_data(&mut self, data: &Value) -> Result<(), ConfigError> {
        self.vault.save_data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_resolver() -> (TempDir, DirectoryContext, ConfigResolver) {
        let temp_dir = TempDir::new().unwrap();
        let dir_context = DirectoryContext::for_testing(temp_dir.path());
        let vault_root = temp_dir.path().join("vault");
        std::fs::create_dir_all(&vault_root).unwrap();
        let resolver = ConfigResolver::new(&dir_context, &vault_root);
        (temp_dir, dir_context, resolver)
    }

    fn write_json(path: &Path, value: Value) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, serde_json::to_string(&value).unwrap()).unwrap();
    }

    #[test]
    fn test_resolve_without_files_gives_defaults() {
        let (_tmp, _ctx, resolver) = create_test_resolver();
        assert_eq!(resolver.resolve().unwrap(), MoodnoteConfig::default());
    }

    #[test]
    fn test_vault_layer_overrides_user_layer() {
        let (_tmp, ctx, resolver) = create_test_resolver();
        write_json(
            &ctx.user_settings_path(),
            json!({"folderPath": "user/", "locale": "en"}),
        );
        write_json(
            resolver.layer_path(ConfigLayer::Vault).unwrap(),
            json!({"folderPath": "vault/"}),
        );

        let config = resolver.resolve().unwrap();
        assert_eq!(config.folder_path, "vault/");
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn test_save_writes_vault_layer_only() {
        let (_tmp, ctx, mut resolver) = create_test_resolver();
        resolver.save_data(&json!({"folderPath": "saved/"})).unwrap();

        assert!(!ctx.user_settings_path().exists());
        let vault_path = resolver.layer_path(ConfigLayer::Vault).unwrap();
        assert!(vault_path.ends_with(".moodnote/data.json"));
        assert_eq!(resolver.resolve().unwrap().folder_path, "saved/");
    }

    #[test]
    fn test_system_layer_has_no_file() {
        let (_tmp, _ctx, resolver) = create_test_resolver();
        assert!(resolver.layer_path(ConfigLayer::System).is_none());
    }

    #[test]
    fn test_log_dir_under_state_dir() {
        let ctx = DirectoryContext::for_testing(Path::new("/tmp/x"));
        assert_eq!(ctx.log_dir(), PathBuf::from("/tmp/x/state/logs"));
    }
}
