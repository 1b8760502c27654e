// src/exec/invocation.rs

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::types::ScriptAction;

/// A fully resolved command line: program followed by positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Name used in the `"<label> returned failure."` notification.
    pub label: String,
}

impl CommandInvocation {
    pub fn new<I, A>(program: impl Into<PathBuf>, args: I, label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            label: label.into(),
        }
    }

    /// `<executable> <scriptName> <projectFilePath> <selectedFilePath>`
    pub fn for_script(
        executable: &Path,
        script: ScriptAction,
        project_file: &Path,
        selected_file: &Path,
    ) -> Self {
        Self::new(
            executable,
            [
                OsString::from(script.script_name()),
                project_file.as_os_str().to_os_string(),
                selected_file.as_os_str().to_os_string(),
            ],
            script.script_name(),
        )
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {:?}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_arguments_are_positional() {
        let inv = CommandInvocation::for_script(
            Path::new("/res/injectorUtil"),
            ScriptAction::Patch,
            Path::new("/work/App.xcodeproj"),
            Path::new("/work/App/View.swift"),
        );

        assert_eq!(inv.program, PathBuf::from("/res/injectorUtil"));
        assert_eq!(
            inv.args,
            vec![
                OsString::from("patchProject"),
                OsString::from("/work/App.xcodeproj"),
                OsString::from("/work/App/View.swift"),
            ]
        );
        assert_eq!(inv.label, "patchProject");
    }

    #[test]
    fn display_quotes_arguments() {
        let inv = CommandInvocation::new("/res/injectorUtil", ["injectSources", "/a b/c.m"], "x");
        assert_eq!(inv.to_string(), r#"/res/injectorUtil "injectSources" "/a b/c.m""#);
    }
}
