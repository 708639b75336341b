//! Finance bot: the operations exposed to the chat transport
//!
//! Every operation returns a [`Reply`]. Storage and argument errors are
//! rendered here and never escape to the transport.

use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{MonthPeriod, YearPeriod};
use crate::reports::{CategoryBreakdown, ReportEngine, ReportOutcome};
use crate::services::{CategoryClassifier, LedgerService};
use crate::storage::LedgerStore;

use super::commands::ChatCommand;
use super::reply::{Reply, MONTH_FORMAT_HINT, MONTH_USAGE, YEAR_FORMAT_HINT, YEAR_USAGE};

const RECORD_FAILURE: &str = "Could not record your message. Please try again later.";
const RETRIEVE_FAILURE: &str = "Could not retrieve your data. Please try again later.";

pub struct FinanceBot<S: LedgerStore> {
    store: S,
    classifier: CategoryClassifier,
    currency_symbol: String,
}

impl<S: LedgerStore> FinanceBot<S> {
    pub fn new(store: S, classifier: CategoryClassifier, currency_symbol: impl Into<String>) -> Self {
        Self {
            store,
            classifier,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Route one chat line from `user`
    pub fn dispatch(&self, user: &str, text: &str) -> Reply {
        match ChatCommand::parse(text) {
            ChatCommand::Start => self.on_start(),
            ChatCommand::Balance => self.on_balance_query(user),
            ChatCommand::CategoryReport => self.on_category_report_query(user),
            ChatCommand::MonthlyReport { args } => self.on_monthly_report_args(user, &args),
            ChatCommand::YearlyReport { args } => self.on_yearly_report_args(user, &args),
            ChatCommand::Unknown(name) => Reply::UnknownCommand(name),
            ChatCommand::Message(message) => self.on_message(user, &message),
        }
    }

    pub fn on_start(&self) -> Reply {
        Reply::Greeting
    }

    /// Classify and record a free-text message
    pub fn on_message(&self, user: &str, text: &str) -> Reply {
        let service = LedgerService::new(&self.store, &self.classifier);
        match service.record(user, text) {
            Ok(_) => Reply::Recorded,
            Err(e) => failure(user, e, RECORD_FAILURE),
        }
    }

    pub fn on_balance_query(&self, user: &str) -> Reply {
        match ReportEngine::new(&self.store).balance(user) {
            Ok(ReportOutcome::Ready(report)) => {
                Reply::Report(report.format_terminal(&self.currency_symbol))
            }
            Ok(ReportOutcome::NoData) => Reply::NoData,
            Ok(ReportOutcome::NoValues(window)) => Reply::NoValues(window),
            Err(e) => failure(user, e, RETRIEVE_FAILURE),
        }
    }

    pub fn on_category_report_query(&self, user: &str) -> Reply {
        self.breakdown_reply(user, ReportEngine::new(&self.store).category_breakdown(user))
    }

    /// Monthly breakdown; the period is validated before the store is touched
    pub fn on_monthly_report_query(&self, user: &str, month: u32, year: i64) -> Reply {
        match MonthPeriod::new(month, year) {
            Ok(period) => self.monthly_report(user, period),
            Err(e) => {
                info!(user, error = %e, "rejected monthly report period");
                Reply::Usage(MONTH_FORMAT_HINT)
            }
        }
    }

    /// Yearly breakdown; the year is validated before the store is touched
    pub fn on_yearly_report_query(&self, user: &str, year: i64) -> Reply {
        match YearPeriod::new(year) {
            Ok(period) => self.yearly_report(user, period),
            Err(e) => {
                info!(user, error = %e, "rejected yearly report period");
                Reply::Usage(YEAR_FORMAT_HINT)
            }
        }
    }

    fn on_monthly_report_args(&self, user: &str, args: &[String]) -> Reply {
        let [arg] = args else {
            return Reply::Usage(MONTH_USAGE);
        };
        match MonthPeriod::parse(arg) {
            Ok(period) => self.monthly_report(user, period),
            Err(e) => {
                info!(user, error = %e, "rejected monthly report period");
                Reply::Usage(MONTH_FORMAT_HINT)
            }
        }
    }

    fn on_yearly_report_args(&self, user: &str, args: &[String]) -> Reply {
        let [arg] = args else {
            return Reply::Usage(YEAR_USAGE);
        };
        match YearPeriod::parse(arg) {
            Ok(period) => self.yearly_report(user, period),
            Err(e) => {
                info!(user, error = %e, "rejected yearly report period");
                Reply::Usage(YEAR_FORMAT_HINT)
            }
        }
    }

    fn monthly_report(&self, user: &str, period: MonthPeriod) -> Reply {
        self.breakdown_reply(user, ReportEngine::new(&self.store).monthly_breakdown(user, period))
    }

    fn yearly_report(&self, user: &str, period: YearPeriod) -> Reply {
        self.breakdown_reply(user, ReportEngine::new(&self.store).yearly_breakdown(user, period))
    }

    fn breakdown_reply(
        &self,
        user: &str,
        outcome: LedgerResult<ReportOutcome<CategoryBreakdown>>,
    ) -> Reply {
        match outcome {
            Ok(ReportOutcome::Ready(report)) => {
                Reply::Report(report.format_terminal(&self.currency_symbol))
            }
            Ok(ReportOutcome::NoData) => Reply::NoData,
            Ok(ReportOutcome::NoValues(window)) => Reply::NoValues(window),
            Err(e) => failure(user, e, RETRIEVE_FAILURE),
        }
    }
}

fn failure(user: &str, err: LedgerError, storage_text: &str) -> Reply {
    warn!(user, error = %err, "request failed");
    match err {
        LedgerError::Validation(reason) => Reply::Failure(reason),
        _ => Reply::Failure(storage_text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TimeRange, Transaction};
    use crate::reports::ReportWindow;
    use crate::storage::{CsvLedgerStore, MemoryLedgerStore};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn bot() -> FinanceBot<MemoryLedgerStore> {
        FinanceBot::new(MemoryLedgerStore::new(), CategoryClassifier::default(), "R$")
    }

    /// Counts queries so tests can assert the store was never touched
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryLedgerStore,
        queries: AtomicUsize,
    }

    impl LedgerStore for CountingStore {
        fn append(&self, transaction: &Transaction) -> LedgerResult<()> {
            self.inner.append(transaction)
        }

        fn query(&self, user: &str, range: Option<&TimeRange>) -> LedgerResult<Vec<Transaction>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.inner.query(user, range)
        }
    }

    struct BrokenStore;

    impl LedgerStore for BrokenStore {
        fn append(&self, _: &Transaction) -> LedgerResult<()> {
            Err(LedgerError::StorageUnavailable("disk full".into()))
        }

        fn query(&self, _: &str, _: Option<&TimeRange>) -> LedgerResult<Vec<Transaction>> {
            Err(LedgerError::StorageUnavailable("disk full".into()))
        }
    }

    #[test]
    fn test_food_message_then_balance() {
        let bot = bot();
        assert_eq!(bot.dispatch("ana", "almoço 25"), Reply::Recorded);

        let stored = bot.store().query("ana", None).unwrap();
        assert_eq!(stored[0].category, Category::Food);

        assert_eq!(
            bot.dispatch("ana", "/saldo").to_string(),
            "Your approximate balance:\n\n\
             Total income: R$ 0.00\n\
             Total expenses: R$ 25.00\n\
             Final balance: R$ -25.00"
        );
    }

    #[test]
    fn test_income_and_market_balance() {
        let bot = bot();
        bot.on_message("ana", "recebi 1000 salário");
        bot.on_message("ana", "mercado 300");

        let reply = bot.on_balance_query("ana").to_string();
        assert!(reply.contains("Total income: R$ 1000.00"));
        assert!(reply.contains("Total expenses: R$ 300.00"));
        assert!(reply.contains("Final balance: R$ 700.00"));
    }

    #[test]
    fn test_greeting_only_message() {
        let bot = bot();
        bot.on_message("ana", "oi");

        assert_eq!(
            bot.on_category_report_query("ana"),
            Reply::NoValues(ReportWindow::AllTime)
        );
        assert_eq!(
            bot.on_category_report_query("ana").to_string(),
            "No numeric values found in your messages."
        );
    }

    #[test]
    fn test_invalid_month_skips_store() {
        let bot = FinanceBot::new(CountingStore::default(), CategoryClassifier::default(), "R$");

        assert_eq!(bot.on_monthly_report_query("ana", 13, 2025), Reply::Usage(MONTH_FORMAT_HINT));
        assert_eq!(bot.on_yearly_report_query("ana", 25), Reply::Usage(YEAR_FORMAT_HINT));
        assert_eq!(bot.dispatch("ana", "/relatorio_mes"), Reply::Usage(MONTH_USAGE));
        assert_eq!(bot.dispatch("ana", "/relatorio_mes 06 2025"), Reply::Usage(MONTH_USAGE));
        assert_eq!(bot.dispatch("ana", "/relatorio_mes junho"), Reply::Usage(MONTH_FORMAT_HINT));
        assert_eq!(bot.dispatch("ana", "/relatorio_ano dois"), Reply::Usage(YEAR_FORMAT_HINT));
        assert_eq!(bot.dispatch("ana", "/relatorio_ano"), Reply::Usage(YEAR_USAGE));

        assert_eq!(bot.store().queries.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_user_gets_no_data() {
        let bot = bot();
        bot.on_message("bia", "mercado 50");

        for reply in [
            bot.on_balance_query("ana"),
            bot.on_category_report_query("ana"),
            bot.on_monthly_report_query("ana", 6, 2025),
            bot.on_yearly_report_query("ana", 2025),
        ] {
            assert_eq!(reply, Reply::NoData);
            assert_eq!(reply.to_string(), "No expenses recorded yet.");
        }
    }

    #[test]
    fn test_monthly_report_through_dispatch() {
        let bot = bot();
        let service = LedgerService::new(bot.store(), &bot.classifier);
        let june = chrono::NaiveDate::from_ymd_opt(2025, 6, 12)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        service.record_at("ana", "jantar 80", june).unwrap();
        service.record_at("ana", "uber 20", june).unwrap();

        assert_eq!(
            bot.dispatch("ana", "/relatorio_mes 06/2025").to_string(),
            "Summary for 06/2025:\n\nFood: R$ 80.00\nTransport: R$ 20.00"
        );
        assert_eq!(
            bot.dispatch("ana", "/relatorio_mes 07/2025").to_string(),
            "No values found for that month."
        );
        assert_eq!(
            bot.dispatch("ana", "/relatorio_ano 2025").to_string(),
            "Yearly summary 2025:\n\nFood: R$ 80.00\nTransport: R$ 20.00"
        );
        assert_eq!(
            bot.dispatch("ana", "/relatorio_ano 2024").to_string(),
            "No values found for that year."
        );
    }

    #[test]
    fn test_storage_failures_become_replies() {
        let bot = FinanceBot::new(BrokenStore, CategoryClassifier::default(), "R$");

        assert_eq!(bot.on_message("ana", "almoço 25"), Reply::Failure(RECORD_FAILURE.into()));
        assert_eq!(bot.on_balance_query("ana"), Reply::Failure(RETRIEVE_FAILURE.into()));
        assert_eq!(
            bot.on_monthly_report_query("ana", 6, 2025),
            Reply::Failure(RETRIEVE_FAILURE.into())
        );
        assert!(bot.on_category_report_query("ana").is_error());
    }

    #[test]
    fn test_empty_user_is_rejected() {
        let bot = bot();
        let reply = bot.on_message("", "almoço 25");
        assert!(matches!(reply, Reply::Failure(_)));
        assert!(bot.store().is_empty().unwrap());
    }

    #[test]
    fn test_start_and_unknown_commands() {
        let bot = bot();
        assert_eq!(bot.dispatch("ana", "/start"), Reply::Greeting);

        let reply = bot.dispatch("ana", "/gastos");
        assert!(reply.is_error());
        assert!(reply.to_string().starts_with("Unknown command /gastos."));
        assert!(bot.store().is_empty().unwrap());
    }

    #[test]
    fn test_csv_backed_bot() {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvLedgerStore::new(temp_dir.path().join("gastos.csv"));
        let bot = FinanceBot::new(store, CategoryClassifier::default(), "R$");

        assert_eq!(bot.on_balance_query("ana"), Reply::NoData);
        assert_eq!(bot.on_message("ana", "supermercado 120,90"), Reply::Recorded);
        assert_eq!(
            bot.on_category_report_query("ana").to_string(),
            "Summary by category:\n\nMarket: R$ 120.90"
        );
    }
}
