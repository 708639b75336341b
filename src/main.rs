use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chat_ledger::bot::{FinanceBot, Reply};
use chat_ledger::cli::{handle_report_command, run_chat_session, ReportArgs};
use chat_ledger::config::{paths::LedgerPaths, settings::Settings};
use chat_ledger::services::CategoryClassifier;
use chat_ledger::storage::CsvLedgerStore;

const LOG_ENV: &str = "CHAT_LEDGER_LOG";

#[derive(Parser)]
#[command(
    name = "chatledger",
    author = "Kaylee Beyene",
    version,
    about = "Chat-driven personal expense ledger",
    long_about = "chatledger records free-text expense messages such as \
                  \"almoço 25\", files each one under a spending category and \
                  answers balance and category report queries per user."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one message as if it had been sent to the bot
    #[command(alias = "msg")]
    Record {
        /// Chat handle of the user
        #[arg(short, long, env = "CHAT_LEDGER_USER")]
        user: String,
        /// Message text, e.g. "almoço 25"
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Show the approximate balance
    Balance {
        /// Chat handle of the user
        #[arg(short, long, env = "CHAT_LEDGER_USER")]
        user: String,
    },

    /// Show or export totals per category
    Report(ReportArgs),

    /// Chat with the bot on stdin, one message per line
    Chat {
        /// Chat handle of the user
        #[arg(short, long, env = "CHAT_LEDGER_USER")]
        user: String,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    init_tracing(&settings);

    let store = CsvLedgerStore::new(settings.ledger_path(&paths));
    let bot = FinanceBot::new(
        store,
        CategoryClassifier::default(),
        settings.currency_symbol.clone(),
    );

    let reply = match cli.command {
        Some(Commands::Record { user, text }) => bot.on_message(&user, &text),
        Some(Commands::Balance { user }) => bot.on_balance_query(&user),
        Some(Commands::Report(args)) => match handle_report_command(&bot, args) {
            Ok(reply) => reply,
            Err(e) if e.is_usage() => {
                eprintln!("{}", e);
                return Ok(ExitCode::from(2));
            }
            Err(e) => return Err(e.into()),
        },
        Some(Commands::Chat { user }) => {
            let stdin = io::stdin();
            run_chat_session(&bot, &user, stdin.lock(), io::stdout().lock())?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Init) => {
            println!("Initializing chatledger at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!("Ledger file: {}", settings.ledger_path(&paths).display());
            return Ok(ExitCode::SUCCESS);
        }
        Some(Commands::Config) => {
            print_config(&paths, &settings);
            return Ok(ExitCode::SUCCESS);
        }
        None => {
            println!("chatledger - chat-driven expense ledger");
            println!();
            println!("Run 'chatledger --help' for usage information.");
            println!("Run 'chatledger chat --user <name>' to start a session.");
            return Ok(ExitCode::SUCCESS);
        }
    };

    Ok(print_reply(&reply))
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_reply(reply: &Reply) -> ExitCode {
    println!("{}", reply);
    if reply.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_config(paths: &LedgerPaths, settings: &Settings) {
    println!("chatledger Configuration");
    println!("========================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Ledger file:    {}", settings.ledger_path(paths).display());
    println!("Initialized:    {}", paths.is_initialized());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Log level:       {}", settings.log_level);
}
