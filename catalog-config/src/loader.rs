//! Startup loading of [`GeminiSettings`].

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::GeminiSettings;

/// Environment variables consulted for the credential, in priority order.
pub const API_KEY_ENV_VARS: [&str; 3] = ["GEMINI_API_KEY", "VITE_GEMINI_API_KEY", "API_KEY"];

/// Builds settings from an optional JSON file and the environment.
///
/// The credential found in the environment overrides one from the file. A
/// missing credential is not an error: the loader logs a warning and the
/// completion client reports itself as unconfigured.
#[derive(Debug, Default, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader that uses defaults plus the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads settings from a JSON file before applying the environment.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Loads settings using the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or decoded, or the
    /// resulting settings fail validation.
    pub fn load(&self) -> ConfigResult<GeminiSettings> {
        self.load_with(|name| env::var(name).ok())
    }

    /// Loads settings using a custom environment lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLoader::load`].
    pub fn load_with<F>(&self, lookup: F) -> ConfigResult<GeminiSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match &self.file {
            Some(path) => read_file(path)?,
            None => GeminiSettings::default(),
        };

        let from_env = API_KEY_ENV_VARS
            .iter()
            .find_map(|name| lookup(name).filter(|value| !value.is_empty()).map(|value| (*name, value)));
        if let Some((source, key)) = from_env {
            debug!(source, "credential read from environment");
            settings.set_api_key(key);
        }

        let settings = settings.validate()?;
        if !settings.is_credential_configured() {
            warn!(
                variables = ?API_KEY_ENV_VARS,
                "no Gemini API key configured; AI completions are disabled"
            );
        }
        Ok(settings)
    }
}

fn read_file(path: &Path) -> ConfigResult<GeminiSettings> {
    let text = fs::read_to_string(path).map_err(|err| ConfigError::Io {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    let settings = serde_json::from_str(&text).map_err(|err| ConfigError::Decode {
        reason: err.to_string(),
    })?;
    debug!(path = %path.display(), "settings file loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_credential_is_not_fatal() {
        let settings = ConfigLoader::new().load_with(lookup(&[])).expect("loads");
        assert!(!settings.is_credential_configured());
    }

    #[test]
    fn first_non_empty_variable_wins() {
        let settings = ConfigLoader::new()
            .load_with(lookup(&[("GEMINI_API_KEY", ""), ("VITE_GEMINI_API_KEY", "vite"), ("API_KEY", "plain")]))
            .expect("loads");
        assert_eq!(settings.api_key(), "vite");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ConfigLoader::new()
            .with_file("/nonexistent/catalog-settings.json")
            .load_with(lookup(&[]))
            .expect_err("no such file");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn file_values_are_overlaid_by_environment() {
        let path = env::temp_dir().join(format!("catalog-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"apiKey":"from-file","generation":{"temperature":0.2}}"#).unwrap();

        let from_file = ConfigLoader::new().with_file(&path).load_with(lookup(&[])).unwrap();
        assert_eq!(from_file.api_key(), "from-file");
        assert!((from_file.generation().temperature() - 0.2).abs() < f32::EPSILON);

        let overlaid = ConfigLoader::new()
            .with_file(&path)
            .load_with(lookup(&[("GEMINI_API_KEY", "from-env")]))
            .unwrap();
        assert_eq!(overlaid.api_key(), "from-env");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn invalid_file_is_a_decode_error() {
        let path = env::temp_dir().join(format!("catalog-config-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let err = ConfigLoader::new().with_file(&path).load_with(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Decode { .. }));
        fs::remove_file(&path).ok();
    }
}
