//! CLI command handlers
//!
//! The command line stands in for the chat transport: one-shot commands for
//! scripting, and an interactive session that feeds stdin lines to the bot.

pub mod chat;
pub mod report;

pub use chat::run_chat_session;
pub use report::{handle_report_command, ReportArgs};
