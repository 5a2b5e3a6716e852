use std::fs;
use std::path::{Path, PathBuf};

use castllm::config::ChatConfig;
use castllm::providers::fake::ScriptedProvider;
use castllm::session::{ChatSession, SessionRecord};
use tempfile::TempDir;

/// Chat settings writing sessions under `<tmp>/sessions`
#[allow(dead_code)]
pub fn chat_config_in(tmp: &TempDir) -> ChatConfig {
    ChatConfig {
        sessions_dir: tmp.path().join("sessions"),
        ..ChatConfig::default()
    }
}

/// A fresh session backed by a scripted provider
///
/// Returns the provider handle so tests can queue replies and inspect requests.
#[allow(dead_code)]
pub fn scripted_session(tmp: &TempDir) -> (ChatSession, ScriptedProvider) {
    let provider = ScriptedProvider::new();
    let session = ChatSession::new(Box::new(provider.clone()), chat_config_in(tmp));
    (session, provider)
}

#[allow(dead_code)]
pub fn write_session(tmp: &TempDir, name: &str, record: &SessionRecord) -> PathBuf {
    let path = tmp.path().join(name);
    record.save(&path).expect("failed to write session file");
    path
}

/// Every `.json` file in `dir`, sorted
#[allow(dead_code)]
pub fn session_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
        .collect();
    files.sort();
    files
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
