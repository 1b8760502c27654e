// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Location of the plugin resources relative to the user's home directory.
const DEFAULT_RESOURCES_SUBDIR: &str =
    "Library/Application Support/Developer/Shared/Xcode/Plug-ins/InjectorPlugin.xcplugin/Contents/Resources";

/// Configuration exactly as read from a TOML file, before validation.
///
/// ```toml
/// [plugin]
/// resources_path = "/opt/injector/Resources"
/// executable = "injectorUtil"
/// dialog_title = "Injector Plugin"
///
/// [selection]
/// extensions = ["m", "mm", "swift"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub plugin: PluginSection,

    #[serde(default)]
    pub selection: SelectionSection,
}

/// `[plugin]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginSection {
    /// Directory holding `injectorUtil`.
    ///
    /// If `None`, the Xcode plug-in resources directory under `$HOME` is used.
    #[serde(default)]
    pub resources_path: Option<PathBuf>,

    /// File name of the helper executable inside `resources_path`.
    #[serde(default = "default_executable")]
    pub executable: String,

    /// Title shown on every notification.
    #[serde(default = "default_dialog_title")]
    pub dialog_title: String,
}

fn default_executable() -> String {
    "injectorUtil".to_string()
}

fn default_dialog_title() -> String {
    "Injector Plugin".to_string()
}

impl Default for PluginSection {
    fn default() -> Self {
        Self {
            resources_path: None,
            executable: default_executable(),
            dialog_title: default_dialog_title(),
        }
    }
}

/// `[selection]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionSection {
    /// File extensions (without the dot) accepted as an injectable selection.
    /// Matching is case-sensitive.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["m".to_string(), "mm".to_string(), "swift".to_string()]
}

impl Default for SelectionSection {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// `Default`, so the rest of the crate can rely on its invariants.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub plugin: PluginSection,
    pub selection: SelectionSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(plugin: PluginSection, selection: SelectionSection) -> Self {
        Self { plugin, selection }
    }

    /// Effective resources directory.
    pub fn resources_dir(&self) -> PathBuf {
        self.plugin
            .resources_path
            .clone()
            .unwrap_or_else(default_resources_dir)
    }

    /// Full path of the helper executable.
    pub fn executable_path(&self) -> PathBuf {
        self.resources_dir().join(&self.plugin.executable)
    }

    /// Override the resources directory (e.g. from `--resources`).
    pub fn with_resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plugin.resources_path = Some(dir.into());
        self
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let raw = RawConfigFile::default();
        Self::new_unchecked(raw.plugin, raw.selection)
    }
}

fn default_resources_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_RESOURCES_SUBDIR)
}
