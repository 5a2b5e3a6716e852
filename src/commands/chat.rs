//! Interactive chat mode handler.
//!
//! Opens (or resumes) a session, replays it, and runs a readline-based loop:
//! read a line, send it, print the reply, save the session. Ctrl-C at the
//! prompt, Ctrl-C while waiting for the model, and Ctrl-D all end the loop
//! cleanly. The last completed turn is already on disk at that point.

use std::path::{Path, PathBuf};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::config::{ChatConfig, Config};
use crate::error::{CastLlmError, Result};
use crate::providers::{Provider, Role};
use crate::session::display::{self, INPUT_PROMPT};
use crate::session::{ChatSession, Persisted};

/// Start interactive chat mode
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `provider` - Chat-completion provider
/// * `load_session` - Session file to resume, if any
/// * `requested_model` - Model named with `--use`, if any
///
/// # Errors
///
/// Returns error if the session file cannot be loaded, or if a turn or a
/// save fails
pub async fn run_chat(
    config: Config,
    provider: Box<dyn Provider>,
    load_session: Option<PathBuf>,
    requested_model: Option<String>,
) -> Result<()> {
    let mut session = open_session(
        provider,
        config.chat,
        load_session.as_deref(),
        requested_model.as_deref(),
    )?;

    if session.path().is_some() {
        display::print_transcript(session.topic(), session.messages());
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline(INPUT_PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;

                tokio::select! {
                    result = run_turn(&mut session, &line) => result?,
                    _ = tokio::signal::ctrl_c() => {
                        print_exit(&session);
                        return Ok(());
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                print_exit(&session);
                return Ok(());
            }
            Err(e) => return Err(CastLlmError::Readline(e).into()),
        }
    }
}

/// Build the session for this run
///
/// With `load_session` the file's model wins; a different `--use` model is
/// reported and ignored.
///
/// # Errors
///
/// Returns error if `load_session` names a missing or malformed file
pub fn open_session(
    provider: Box<dyn Provider>,
    settings: ChatConfig,
    load_session: Option<&Path>,
    requested_model: Option<&str>,
) -> Result<ChatSession> {
    let Some(path) = load_session else {
        return Ok(ChatSession::new(provider, settings));
    };

    let session = ChatSession::resume(provider, settings, path)?;

    if let Some(model) = requested_model {
        if model != session.model() {
            tracing::warn!(
                "Ignoring --use {}: {} was recorded with model {}",
                model,
                path.display(),
                session.model()
            );
        }
    }

    tracing::info!(
        "Resumed session {} ({} user turns)",
        path.display(),
        display::count_role(session.messages(), Role::User)
    );

    Ok(session)
}

/// Run one turn: send, print the reply, save, and announce a new topic
///
/// # Errors
///
/// Returns error if the model call, the summarization call or the save fails
pub async fn run_turn(session: &mut ChatSession, input: &str) -> Result<()> {
    let reply = session.send(input).await?;
    display::print_reply(&reply);

    if let Persisted::Saved { path, named_topic } = session.persist().await? {
        if let Some(topic) = named_topic {
            display::print_topic_banner(&topic);
        }
        tracing::debug!("Session saved to {}", path.display());
    }

    Ok(())
}

/// Farewell line; names the session file only if it holds the whole conversation
fn exit_message(session: &ChatSession) -> String {
    match session.path() {
        Some(path) if session.is_saved() => {
            format!("Exiting. Session saved to {}.", path.display())
        }
        _ => "Exiting.".to_string(),
    }
}

fn print_exit(session: &ChatSession) {
    println!("\n{}", exit_message(session));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::fake::ScriptedProvider;
    use crate::providers::Message;
    use crate::session::SessionRecord;
    use crate::test_utils::{
        assert_error_contains, test_chat_config as settings, write_session_file,
    };
    use tempfile::TempDir;

    #[test]
    fn test_open_session_new() {
        let dir = TempDir::new().unwrap();
        let session =
            open_session(Box::new(ScriptedProvider::new()), settings(&dir), None, None).unwrap();
        assert_eq!(session.messages().len(), 1);
        assert!(session.path().is_none());
    }

    #[test]
    fn test_open_session_keeps_recorded_model() {
        let dir = TempDir::new().unwrap();
        let mut record = SessionRecord::new("gpt-4");
        record.messages.push(Message::system("ctx"));
        let path = write_session_file(&dir, "foo.json", &record);

        let session = open_session(
            Box::new(ScriptedProvider::new()),
            settings(&dir),
            Some(&path),
            Some("gpt-3.5-turbo"),
        )
        .unwrap();

        assert_eq!(session.model(), "gpt-4");
        assert_eq!(session.path(), Some(path.as_path()));
    }

    #[test]
    fn test_open_session_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        let result = open_session(
            Box::new(ScriptedProvider::new()),
            settings(&dir),
            Some(&path),
            None,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_turn_saves_after_first_exchange() {
        let dir = TempDir::new().unwrap();
        let provider = ScriptedProvider::new();
        provider.push_reply("Hi there");
        provider.push_reply("Greeting");
        let mut session = ChatSession::new(Box::new(provider.clone()), settings(&dir));

        run_turn(&mut session, "Hello").await.unwrap();

        let path = session.path().expect("session should be named").to_path_buf();
        assert!(path.exists());
        assert_eq!(session.topic(), Some("Greeting"));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_exit_message_names_file_once_saved() {
        let dir = TempDir::new().unwrap();
        let provider = ScriptedProvider::new();
        provider.push_reply("Hi there");
        provider.push_reply("Greeting");
        let mut session = ChatSession::new(Box::new(provider), settings(&dir));
        assert_eq!(exit_message(&session), "Exiting.");

        run_turn(&mut session, "Hello").await.unwrap();

        let path = session.path().unwrap().to_path_buf();
        assert_eq!(
            exit_message(&session),
            format!("Exiting. Session saved to {}.", path.display())
        );
    }

    #[tokio::test]
    async fn test_exit_message_when_reply_not_yet_saved() {
        let dir = TempDir::new().unwrap();
        let mut record = SessionRecord::new("gpt-4");
        record.messages.push(Message::system("ctx"));
        let path = write_session_file(&dir, "foo.json", &record);

        let provider = ScriptedProvider::new();
        provider.push_reply("Hi there");
        let mut session =
            ChatSession::resume(Box::new(provider), settings(&dir), &path).unwrap();
        assert!(exit_message(&session).contains("foo.json"));

        // Interrupted after the reply arrived but before persist ran
        session.send("Hello").await.unwrap();
        assert_eq!(exit_message(&session), "Exiting.");
    }

    #[tokio::test]
    async fn test_run_turn_propagates_transport_error() {
        let dir = TempDir::new().unwrap();
        let provider = ScriptedProvider::new();
        provider.push_error("connection refused");
        let mut session = ChatSession::new(Box::new(provider), settings(&dir));

        assert_error_contains(run_turn(&mut session, "Hello").await, "connection refused");
        assert!(session.path().is_none());
        assert!(!dir.path().join("sessions").exists());
    }
}
