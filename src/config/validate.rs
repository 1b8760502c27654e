// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{InjectorError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = InjectorError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.plugin, raw.selection))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_executable(cfg)?;
    validate_extensions(cfg)?;
    Ok(())
}

fn validate_executable(cfg: &RawConfigFile) -> Result<()> {
    let exe = cfg.plugin.executable.trim();
    if exe.is_empty() {
        return Err(InjectorError::ConfigError(
            "[plugin].executable must not be empty".to_string(),
        ));
    }
    if exe.contains('/') || exe.contains('\\') {
        return Err(InjectorError::ConfigError(format!(
            "[plugin].executable must be a file name inside resources_path, got '{}'",
            exe
        )));
    }
    Ok(())
}

fn validate_extensions(cfg: &RawConfigFile) -> Result<()> {
    if cfg.selection.extensions.is_empty() {
        return Err(InjectorError::ConfigError(
            "[selection].extensions must list at least one extension".to_string(),
        ));
    }
    for ext in cfg.selection.extensions.iter() {
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(InjectorError::ConfigError(format!(
                "invalid extension '{}' in [selection].extensions (expected letters/digits, no dot)",
                ext
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ConfigFile::try_from(RawConfigFile::default()).is_ok());
    }

    #[test]
    fn dotted_extension_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.selection.extensions = vec![".m".to_string()];

        match ConfigFile::try_from(raw) {
            Err(InjectorError::ConfigError(msg)) => assert!(msg.contains(".m")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn executable_with_path_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.plugin.executable = "bin/injectorUtil".to_string();
        assert!(ConfigFile::try_from(raw).is_err());
    }
}
