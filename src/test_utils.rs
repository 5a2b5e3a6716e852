//! Test utilities for castllm
//!
//! Temporary directories, session settings rooted in them, and error
//! assertion helpers.

use crate::config::ChatConfig;
use crate::session::SessionRecord;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Chat settings whose sessions directory lives inside `dir`
///
/// The sessions directory itself is not created.
pub fn test_chat_config(dir: &TempDir) -> ChatConfig {
    ChatConfig {
        sessions_dir: dir.path().join("sessions"),
        ..ChatConfig::default()
    }
}

/// Write `record` as `name` inside `dir` and return its path
///
/// # Panics
///
/// Panics if the file cannot be written
pub fn write_session_file(dir: &TempDir, name: &str, record: &SessionRecord) -> PathBuf {
    let path = dir.path().join(name);
    record.save(&path).expect("Failed to write session file");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: crate::error::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CastLlmError;

    #[test]
    fn test_test_chat_config_points_into_temp_dir() {
        let dir = temp_dir();
        let config = test_chat_config(&dir);
        assert!(config.sessions_dir.starts_with(dir.path()));
        assert!(!config.sessions_dir.exists());
    }

    #[test]
    fn test_write_session_file() {
        let dir = temp_dir();
        let path = write_session_file(&dir, "s.json", &SessionRecord::new("gpt-4"));
        assert!(path.exists());
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: crate::error::Result<()> =
            Err(CastLlmError::Config("invalid".to_string()).into());
        assert_error_contains(result, "invalid");
    }

    #[test]
    #[should_panic(expected = "Expected error")]
    fn test_assert_error_contains_panics_on_ok() {
        assert_error_contains(Ok(()), "anything");
    }
}
