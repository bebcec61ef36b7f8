use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

/// Source of the dark-mode preference, asked again on every render so that
/// changes written by other processes show up without a restart.
pub trait ThemeProvider: Send + Sync {
    fn dark_mode(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTheme {
    pub dark: bool,
}

impl ThemeProvider for StaticTheme {
    fn dark_mode(&self) -> bool {
        self.dark
    }
}

/// Reads the preference from a state file holding either a bare JSON boolean
/// or `{"darkMode": bool}`. A missing or unreadable file means light mode.
#[derive(Debug, Clone)]
pub struct FileThemeProvider {
    path: PathBuf,
}

impl FileThemeProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ThemeState {
    Flag(bool),
    Object {
        #[serde(rename = "darkMode")]
        dark_mode: bool,
    },
}

impl ThemeProvider for FileThemeProvider {
    fn dark_mode(&self) -> bool {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return false;
        };
        match serde_json::from_str::<ThemeState>(contents.trim()) {
            Ok(ThemeState::Flag(dark)) => dark,
            Ok(ThemeState::Object { dark_mode }) => dark_mode,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_state_file_is_light() {
        let temp = tempdir().unwrap();
        let provider = FileThemeProvider::new(temp.path().join("theme.json"));
        assert!(!provider.dark_mode());
    }

    #[test]
    fn state_file_changes_are_picked_up() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("theme.json");
        let provider = FileThemeProvider::new(&path);

        fs::write(&path, "true").unwrap();
        assert!(provider.dark_mode());

        fs::write(&path, r#"{"darkMode": false}"#).unwrap();
        assert!(!provider.dark_mode());

        fs::write(&path, "{\"darkMode\": true}\n").unwrap();
        assert!(provider.dark_mode());
    }

    #[test]
    fn garbage_state_is_light() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("theme.json");
        fs::write(&path, "not json").unwrap();
        assert!(!FileThemeProvider::new(&path).dark_mode());
    }
}
