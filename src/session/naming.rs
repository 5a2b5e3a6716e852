//! Topic naming for new sessions
//!
//! After the first exchange the model is asked to summarize the
//! conversation in a few words. The summary becomes the session topic and,
//! once sanitized and timestamped, the session file name.

use crate::providers::Message;
use chrono::NaiveDateTime;

/// strftime format of the file name suffix
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Build the fixed four-message summarization request
///
/// The request is the system message, the first user message, the first
/// assistant reply, and the summarization instruction as a user message.
///
/// # Examples
///
/// ```
/// use castllm::providers::{Message, Role};
/// use castllm::session::naming::summary_request;
///
/// let request = summary_request(
///     "You are now chatting with ChatGPT.",
///     &Message::user("Hello"),
///     &Message::assistant("Hi there"),
///     "Summarize our conversation in 1 to 5 words.",
/// );
/// assert_eq!(request.len(), 4);
/// assert_eq!(request[3].role, Role::User);
/// ```
pub fn summary_request(
    system_prompt: &str,
    first_user: &Message,
    first_reply: &Message,
    instruction: &str,
) -> Vec<Message> {
    vec![
        Message::system(system_prompt),
        first_user.clone(),
        first_reply.clone(),
        Message::user(instruction),
    ]
}

/// Turn a model summary into a file name stem
///
/// Spaces and path separators become `_`; periods and commas are dropped.
///
/// # Examples
///
/// ```
/// use castllm::session::naming::file_stem;
///
/// assert_eq!(file_stem("Greetings, small talk."), "Greetings_small_talk");
/// ```
pub fn file_stem(summary: &str) -> String {
    summary
        .trim()
        .chars()
        .filter(|c| *c != '.' && *c != ',')
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}

/// Full session file name: `<stem>-<YYYYmmdd-HHMMSS>.json`
///
/// An empty stem falls back to `session`.
///
/// # Examples
///
/// ```
/// use castllm::session::naming::session_file_name;
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2024, 1, 2)
///     .unwrap()
///     .and_hms_opt(3, 4, 5)
///     .unwrap();
/// assert_eq!(session_file_name("Rust help", at), "Rust_help-20240102-030405.json");
/// ```
pub fn session_file_name(summary: &str, at: NaiveDateTime) -> String {
    let mut stem = file_stem(summary);
    if stem.is_empty() {
        stem.push_str("session");
    }
    format!("{}-{}.json", stem, at.format(TIMESTAMP_FORMAT))
}
