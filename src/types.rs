use std::fmt;

/// Which script `injectorUtil` should run.
///
/// The three menu entries of the plugin share a single handler and differ
/// only in this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptAction {
    /// Inject the selected source file into the running app.
    Inject,
    /// Patch the project so the app can load injected bundles.
    Patch,
    /// Revert the project patch.
    Unpatch,
}

impl ScriptAction {
    /// Name of the script as passed to `injectorUtil`.
    pub fn script_name(self) -> &'static str {
        match self {
            ScriptAction::Inject => "injectSources",
            ScriptAction::Patch => "patchProject",
            ScriptAction::Unpatch => "unpatchProject",
        }
    }

    pub fn all() -> [ScriptAction; 3] {
        [ScriptAction::Inject, ScriptAction::Patch, ScriptAction::Unpatch]
    }
}

impl fmt::Display for ScriptAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.script_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_names_match_injector_util() {
        let names: Vec<_> = ScriptAction::all().iter().map(|a| a.script_name()).collect();
        assert_eq!(names, vec!["injectSources", "patchProject", "unpatchProject"]);
    }

    #[test]
    fn display_uses_script_name() {
        assert_eq!(ScriptAction::Unpatch.to_string(), "unpatchProject");
    }
}
