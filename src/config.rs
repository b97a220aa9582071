use crate::note::path::DEFAULT_FOLDER_PATH;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Locale used for weekday labels when none is configured.
pub const DEFAULT_LOCALE: &str = "ko";

/// Plugin settings
///
/// Stored as a JSON object. Missing keys take their defaults, so a document
/// written by an older version (or by hand) loads over the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodnoteConfig {
    /// Folder that holds the monthly notes, relative to the vault root
    #[serde(default = "default_folder_path")]
    pub folder_path: String,

    /// Locale of the weekday label written into new day headings
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_folder_path() -> String {
    DEFAULT_FOLDER_PATH.to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Default for MoodnoteConfig {
    fn default() -> Self {
        Self {
            folder_path: default_folder_path(),
            locale: default_locale(),
        }
    }
}

impl MoodnoteConfig {
    /// Build settings from stored data, filling in defaults.
    ///
    /// `None` and `null` (nothing saved yet) give the defaults.
    pub fn from_data(data: Option<Value>) -> Result<Self, ConfigError> {
        match data {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value @ Value::Object(_)) => serde_json::from_value(value)
                .map_err(|e| ConfigError::ParseError(e.to_string())),
            Some(other) => Err(ConfigError::ParseError(format!(
                "expected a settings object, found {other}"
            ))),
        }
    }

    pub fn to_data(&self) -> Result<Value, ConfigError> {
        serde_json::to_value(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }
}

/// Overlay `top` onto `base` key by key. Non-object values replace wholesale.
pub fn merge_data(base: &mut Value, top: &Value) {
    match (base, top) {
        (Value::Object(base_map), Value::Object(top_map)) => {
            for (key, top_value) in top_map {
                match base_map.get_mut(key) {
                    Some(base_value) => merge_data(base_value, top_value),
                    None => {
                        base_map.insert(key.clone(), top_value.clone());
                    }
                }
            }
        }
        (base, top) => *base = top.clone(),
    }
}

/// Opaque key-value persistence for plugin data.
pub trait SettingsStore {
    /// Previously saved data, or `None` if nothing was saved yet.
    fn load_data(&self) -> Result<Option<Value>, ConfigError>;

    fn save_data(&mut self, data: &Value) -> Result<(), ConfigError>;
}

/// Settings stored as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load_data(&self) -> Result<Option<Value>, ConfigError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", self.path.display(), e)))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", self.path.display(), e)))
    }

    fn save_data(&mut self, data: &Value) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::IoError(format!("{}: {}", parent.display(), e))
                })?;
            }
        }
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", self.path.display(), e)))
    }
}

/// Settings kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    data: Option<Value>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Value) -> Self {
        Self { data: Some(data) }
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load_data(&self) -> Result<Option<Value>, ConfigError> {
        Ok(self.data.clone())
    }

    fn save_data(&mut self, data: &Value) -> Result<(), ConfigError> {
        self.data = Some(data.clone());
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
