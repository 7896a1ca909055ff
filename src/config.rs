//! Configuration constants and profile loading for caseline
//!
//! Settings live in an INI file with one section per profile:
//!
//! ```ini
//! [default]
//! transcript_log = ~/.caseline/transcript.jsonl
//! log_file = ~/.caseline/caseline.log
//! history_limit = 500
//! ```

use anyhow::{Context, Result};
use ini::Ini;
use std::path::{Path, PathBuf};

use crate::repl::services::DEFAULT_HISTORY_LIMIT;

/// Default profile file path for caseline
pub const DEFAULT_PROFILE_PATH: &str = "~/.caseline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "CASELINE_PROFILE_PATH";

/// Environment variable holding the tracing filter
pub const LOG_LEVEL_ENV_VAR: &str = "CASELINE_LOG_LEVEL";

pub const DEFAULT_TRANSCRIPT_LOG_PATH: &str = "~/.caseline/transcript.jsonl";
pub const DEFAULT_LOG_FILE_PATH: &str = "~/.caseline/caseline.log";

const TRANSCRIPT_LOG_KEY: &str = "transcript_log";
const LOG_FILE_KEY: &str = "log_file";
const HISTORY_LIMIT_KEY: &str = "history_limit";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            tracing::warn!("Could not expand path '{}': {}", path, e);
            PathBuf::from(path)
        }
    }
}

/// Settings of one console profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleProfile {
    name: String,
    transcript_log: PathBuf,
    log_file: PathBuf,
    history_limit: usize,
}

impl ConsoleProfile {
    /// Profile with built-in defaults
    pub fn defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transcript_log: expand_path(DEFAULT_TRANSCRIPT_LOG_PATH),
            log_file: expand_path(DEFAULT_LOG_FILE_PATH),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Load profile `name` from the INI file at `path`.
    ///
    /// A missing file or section yields the defaults; a file that exists
    /// but cannot be parsed is an error.
    pub fn load(path: impl AsRef<Path>, name: &str) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Profile file '{}' not found, using defaults", path.display());
            return Ok(Self::defaults(name));
        }

        let ini = Ini::load_from_file(path)
            .with_context(|| format!("Failed to read profile file '{}'", path.display()))?;
        Self::from_ini(&ini, name)
    }

    fn from_ini(ini: &Ini, name: &str) -> Result<Self> {
        let mut profile = Self::defaults(name);
        let Some(section) = ini.section(Some(name)) else {
            tracing::debug!("Profile '{}' not found, using defaults", name);
            return Ok(profile);
        };

        if let Some(value) = section.get(TRANSCRIPT_LOG_KEY) {
            profile.transcript_log = expand_path(value);
        }
        if let Some(value) = section.get(LOG_FILE_KEY) {
            profile.log_file = expand_path(value);
        }
        if let Some(value) = section.get(HISTORY_LIMIT_KEY) {
            profile.history_limit = value.trim().parse().with_context(|| {
                format!("Invalid {HISTORY_LIMIT_KEY} '{value}' in profile '{name}'")
            })?;
        }

        Ok(profile)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transcript_log(&self) -> &Path {
        &self.transcript_log
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn profile_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.caseline/profile");
    }

    #[test]
    fn test_get_profile_path_env_override() {
        // Save current env var state
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        // Restore original state
        if let Some(val) = original {
            std::env::set_var(PROFILE_PATH_ENV_VAR, val);
        }
    }

    #[test]
    fn load_should_read_profile_section() {
        let file = profile_file(
            "[default]\nhistory_limit = 10\n\n[audit]\ntranscript_log = /var/log/caseline/audit.jsonl\nlog_file = /tmp/audit.log\nhistory_limit = 42\n",
        );

        let profile = ConsoleProfile::load(file.path(), "audit").unwrap();

        assert_eq!(profile.name(), "audit");
        assert_eq!(
            profile.transcript_log(),
            Path::new("/var/log/caseline/audit.jsonl")
        );
        assert_eq!(profile.log_file(), Path::new("/tmp/audit.log"));
        assert_eq!(profile.history_limit(), 42);
    }

    #[test]
    fn load_should_fall_back_to_defaults_for_missing_keys() {
        let file = profile_file("[default]\nhistory_limit = 10\n");

        let profile = ConsoleProfile::load(file.path(), "default").unwrap();

        assert_eq!(profile.history_limit(), 10);
        assert_eq!(
            profile.transcript_log(),
            expand_path(DEFAULT_TRANSCRIPT_LOG_PATH)
        );
    }

    #[test]
    fn load_should_use_defaults_for_missing_section() {
        let file = profile_file("[other]\nhistory_limit = 3\n");

        let profile = ConsoleProfile::load(file.path(), "default").unwrap();

        assert_eq!(profile, ConsoleProfile::defaults("default"));
    }

    #[test]
    fn load_should_use_defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let profile = ConsoleProfile::load(dir.path().join("nope"), "default").unwrap();

        assert_eq!(profile.history_limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn load_should_reject_invalid_history_limit() {
        let file = profile_file("[default]\nhistory_limit = lots\n");

        let err = ConsoleProfile::load(file.path(), "default").unwrap_err();

        assert!(err.to_string().contains("Invalid history_limit"));
    }

    #[test]
    fn expand_path_should_keep_absolute_paths() {
        assert_eq!(expand_path("/etc/caseline/profile"), PathBuf::from("/etc/caseline/profile"));
    }
}
