//! Chat boundary for chat-ledger
//!
//! Turns incoming chat text into ledger operations and renders every outcome,
//! failures included, as a reply for the transport to send back.

pub mod commands;
pub mod handler;
pub mod reply;

pub use commands::ChatCommand;
pub use handler::FinanceBot;
pub use reply::Reply;
