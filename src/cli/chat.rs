//! Interactive chat session
//!
//! Each input line is handled as one chat message from the session user.
//! Failures are printed as replies and bytes that are not UTF-8 are
//! replaced, so the session only ends at end of input.

use std::borrow::Cow;
use std::io::{BufRead, Write};

use crate::bot::FinanceBot;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::LedgerStore;

/// Run a session until `input` is exhausted, returning the number of lines handled
pub fn run_chat_session<S, R, W>(
    bot: &FinanceBot<S>,
    user: &str,
    mut input: R,
    mut output: W,
) -> LedgerResult<usize>
where
    S: LedgerStore,
    R: BufRead,
    W: Write,
{
    let mut buffer = Vec::new();
    let mut handled = 0;

    loop {
        buffer.clear();
        let read = input
            .read_until(b'\n', &mut buffer)
            .map_err(|e| LedgerError::Io(format!("Failed to read input: {}", e)))?;
        if read == 0 {
            break;
        }

        let line = decode_line(&buffer);
        if line.is_empty() {
            continue;
        }

        let reply = bot.dispatch(user, &line);
        writeln!(output, "{}", reply)
            .map_err(|e| LedgerError::Io(format!("Failed to write reply: {}", e)))?;
        handled += 1;
    }

    output
        .flush()
        .map_err(|e| LedgerError::Io(format!("Failed to flush output: {}", e)))?;

    Ok(handled)
}

/// Strip the line ending; invalid UTF-8 is replaced rather than rejected
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}
