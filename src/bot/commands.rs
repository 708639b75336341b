//! Chat command parsing
//!
//! Text starting with `/` is a command; anything else is an expense or
//! income message to record.

/// A parsed chat line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Start,
    Balance,
    CategoryReport,
    MonthlyReport { args: Vec<String> },
    YearlyReport { args: Vec<String> },
    Unknown(String),
    /// Free text to classify and record, kept verbatim
    Message(String),
}

impl ChatCommand {
    pub fn parse(text: &str) -> Self {
        let Some(command_line) = text.trim_start().strip_prefix('/') else {
            return ChatCommand::Message(text.to_string());
        };

        let mut parts = command_line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        // Group chats address commands as /name@botname
        let name = name.split('@').next().unwrap_or_default().to_lowercase();
        let args: Vec<String> = parts.map(str::to_string).collect();

        match name.as_str() {
            "start" | "help" => ChatCommand::Start,
            "saldo" | "balance" => ChatCommand::Balance,
            "relatorio" | "report" => ChatCommand::CategoryReport,
            "relatorio_mes" | "month" => ChatCommand::MonthlyReport { args },
            "relatorio_ano" | "year" => ChatCommand::YearlyReport { args },
            _ => ChatCommand::Unknown(name),
        }
    }
}
