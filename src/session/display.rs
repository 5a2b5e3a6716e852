//! Terminal presentation of sessions
//!
//! The `format_*` functions build colored strings; the `print_*` wrappers
//! write them to stdout.

use crate::providers::{Message, Role};
use colored::Colorize;

/// Prompt shown while waiting for user input
pub const INPUT_PROMPT: &str = "You: ";

/// Label printed in front of each new model reply
pub const REPLY_LABEL: &str = "Assistant";

/// Bordered banner announcing the session topic
///
/// # Examples
///
/// ```
/// use castllm::session::display::format_topic_banner;
///
/// let banner = format_topic_banner("Greeting");
/// assert!(banner.contains("Chat Topic: Greeting"));
/// assert_eq!(banner.lines().count(), 3);
/// ```
pub fn format_topic_banner(topic: &str) -> String {
    let text = format!("Chat Topic: {}", topic);
    let width = text.chars().count() + 2;
    let rule = "─".repeat(width);

    format!(
        "{}\n{} {} {}\n{}",
        format!("╭{}╮", rule).green(),
        "│".green(),
        text.cyan().bold(),
        "│".green(),
        format!("╰{}╯", rule).green()
    )
}

/// One replayed message as `role: content`
pub fn format_message(message: &Message) -> String {
    format!("{}: {}", message.role.to_string().green(), message.content)
}

/// A fresh model reply with the reply label
pub fn format_reply(content: &str) -> String {
    format!("{}: {}", REPLY_LABEL.red(), content)
}

/// Print the topic banner
pub fn print_topic_banner(topic: &str) {
    println!("{}", format_topic_banner(topic));
}

/// The banner (when a topic is known) followed by every message, one per line
pub fn format_transcript(topic: Option<&str>, messages: &[Message]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(messages.len() + 1);
    if let Some(topic) = topic {
        lines.push(format_topic_banner(topic));
    }
    lines.extend(messages.iter().map(format_message));
    lines.join("\n")
}

/// Print a resumed session
pub fn print_transcript(topic: Option<&str>, messages: &[Message]) {
    let transcript = format_transcript(topic, messages);
    if !transcript.is_empty() {
        println!("{}", transcript);
    }
}

/// Print a fresh model reply
pub fn print_reply(content: &str) {
    println!("{}", format_reply(content));
}

/// Number of messages of the given role, used in status lines
pub fn count_role(messages: &[Message], role: Role) -> usize {
    messages.iter().filter(|m| m.role == role).count()
}
