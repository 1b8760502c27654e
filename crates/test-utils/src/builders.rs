#![allow(dead_code)]

use std::path::PathBuf;

use injector::config::{ConfigFile, RawConfigFile};
use injector::host::ActionEvent;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn resources_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.plugin.resources_path = Some(dir.into());
        self
    }

    pub fn executable(mut self, name: &str) -> Self {
        self.config.plugin.executable = name.to_string();
        self
    }

    pub fn dialog_title(mut self, title: &str) -> Self {
        self.config.plugin.dialog_title = title.to_string();
        self
    }

    pub fn extensions(mut self, exts: &[&str]) -> Self {
        self.config.selection.extensions = exts.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ActionEvent`.
pub struct ActionEventBuilder {
    event: ActionEvent,
}

impl ActionEventBuilder {
    /// Event with a project open and nothing selected.
    pub fn new() -> Self {
        Self {
            event: ActionEvent::new(Some(PathBuf::from("/work/App/App.xcodeproj")), None),
        }
    }

    pub fn project(mut self, path: &str) -> Self {
        self.event.project_file_path = Some(PathBuf::from(path));
        self
    }

    pub fn no_project(mut self) -> Self {
        self.event.project_file_path = None;
        self
    }

    pub fn selected(mut self, path: &str) -> Self {
        self.event.selected_file = Some(PathBuf::from(path));
        self
    }

    pub fn build(self) -> ActionEvent {
        self.event
    }
}

impl Default for ActionEventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
