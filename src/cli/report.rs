//! CLI command for category reports
//!
//! Prints a breakdown over all time, one month or one year, or exports it
//! to CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use crate::bot::{FinanceBot, Reply};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{MonthPeriod, YearPeriod};
use crate::reports::{ReportEngine, ReportOutcome, ReportWindow};
use crate::storage::LedgerStore;

/// Arguments of the `report` command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Chat handle of the user
    #[arg(short, long, env = "CHAT_LEDGER_USER")]
    pub user: String,

    /// Restrict to one month (e.g., "06/2025")
    #[arg(short, long, conflicts_with = "year")]
    pub month: Option<String>,

    /// Restrict to one year (e.g., "2025")
    #[arg(short, long)]
    pub year: Option<String>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    fn window(&self) -> LedgerResult<ReportWindow> {
        if let Some(month) = &self.month {
            let period = MonthPeriod::parse(month).map_err(|e| {
                LedgerError::usage(format!("{}. Use MM/YYYY (e.g., 06/2025)", e))
            })?;
            return Ok(ReportWindow::Month(period));
        }
        if let Some(year) = &self.year {
            let period = YearPeriod::parse(year)
                .map_err(|e| LedgerError::usage(format!("{}. Use YYYY (e.g., 2025)", e)))?;
            return Ok(ReportWindow::Year(period));
        }
        Ok(ReportWindow::AllTime)
    }
}

/// Handle the report command
pub fn handle_report_command<S: LedgerStore>(
    bot: &FinanceBot<S>,
    args: ReportArgs,
) -> LedgerResult<Reply> {
    let window = args.window()?;

    let Some(path) = args.output else {
        return Ok(match window {
            ReportWindow::AllTime => bot.on_category_report_query(&args.user),
            ReportWindow::Month(period) => {
                bot.on_monthly_report_query(&args.user, period.month(), i64::from(period.year()))
            }
            ReportWindow::Year(period) => {
                bot.on_yearly_report_query(&args.user, i64::from(period.year()))
            }
        });
    };

    let engine = ReportEngine::new(bot.store());
    let outcome = match window {
        ReportWindow::AllTime => engine.category_breakdown(&args.user)?,
        ReportWindow::Month(period) => engine.monthly_breakdown(&args.user, period)?,
        ReportWindow::Year(period) => engine.yearly_breakdown(&args.user, period)?,
    };

    match outcome {
        ReportOutcome::Ready(report) => {
            let file = File::create(&path).map_err(|e| {
                LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            report.export_csv(BufWriter::new(file))?;
            Ok(Reply::Report(format!("Report exported to: {}", path.display())))
        }
        ReportOutcome::NoData => Ok(Reply::NoData),
        ReportOutcome::NoValues(window) => Ok(Reply::NoValues(window)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CategoryClassifier;
    use crate::storage::MemoryLedgerStore;
    use tempfile::TempDir;

    fn args(month: Option<&str>, year: Option<&str>, output: Option<PathBuf>) -> ReportArgs {
        ReportArgs {
            user: "ana".to_string(),
            month: month.map(str::to_string),
            year: year.map(str::to_string),
            output,
        }
    }

    fn bot() -> FinanceBot<MemoryLedgerStore> {
        FinanceBot::new(MemoryLedgerStore::new(), CategoryClassifier::default(), "R$")
    }

    #[test]
    fn test_invalid_month_is_usage_error() {
        let err = handle_report_command(&bot(), args(Some("13/2025"), None, None)).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_prints_through_bot() {
        let bot = bot();
        bot.on_message("ana", "mercado 300");

        let reply = handle_report_command(&bot, args(None, None, None)).unwrap();
        assert_eq!(
            reply.to_string(),
            "Summary by category:\n\nMarket: R$ 300.00"
        );
    }

    #[test]
    fn test_export_to_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.csv");
        let bot = bot();
        bot.on_message("ana", "almoço 25");

        let reply = handle_report_command(&bot, args(None, None, Some(path.clone()))).unwrap();
        assert!(matches!(reply, Reply::Report(_)));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Period,Category,Amount\nall,Food,25.00\n");
    }

    #[test]
    fn test_export_without_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.csv");

        let reply = handle_report_command(&bot(), args(None, Some("2025"), Some(path.clone()))).unwrap();
        assert_eq!(reply, Reply::NoData);
        assert!(!path.exists());
    }
}
