//! Replies sent back through the chat transport

use std::fmt;

use crate::reports::ReportWindow;

pub const MONTH_USAGE: &str = "Use the command like this: /relatorio_mes 06/2025";
pub const MONTH_FORMAT_HINT: &str = "Wrong format. Use: /relatorio_mes 06/2025";
pub const YEAR_USAGE: &str = "Use the command like this: /relatorio_ano 2025";
pub const YEAR_FORMAT_HINT: &str = "Wrong format. Use: /relatorio_ano 2025";

/// Outcome of handling one chat line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Greeting,
    /// The message was classified and stored
    Recorded,
    /// A formatted report
    Report(String),
    /// The user has nothing recorded
    NoData,
    /// Records exist, but none with a value in the requested window
    NoValues(ReportWindow),
    /// Malformed command arguments, with the hint to show
    Usage(&'static str),
    /// The ledger could not be written or read
    Failure(String),
    UnknownCommand(String),
}

impl Reply {
    /// Whether the reply reports a problem rather than a result
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Reply::Usage(_) | Reply::Failure(_) | Reply::UnknownCommand(_)
        )
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Greeting => write!(f, "Hello! I'm your finance bot. Send me your expenses!"),
            Reply::Recorded => write!(f, "Expense received and saved!"),
            Reply::Report(text) => write!(f, "{}", text),
            Reply::NoData => write!(f, "No expenses recorded yet."),
            Reply::NoValues(ReportWindow::AllTime) => {
                write!(f, "No numeric values found in your messages.")
            }
            Reply::NoValues(ReportWindow::Month(_)) => write!(f, "No values found for that month."),
            Reply::NoValues(ReportWindow::Year(_)) => write!(f, "No values found for that year."),
            Reply::Usage(hint) => write!(f, "{}", hint),
            Reply::Failure(text) => write!(f, "{}", text),
            Reply::UnknownCommand(name) => write!(
                f,
                "Unknown command /{}. Available: /start, /saldo, /relatorio, \
                 /relatorio_mes MM/YYYY, /relatorio_ano YYYY",
                name
            ),
        }
    }
}
