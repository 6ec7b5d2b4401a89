//! Session command for an interactive task view
//!
//! Implements `tb session`: keeps one store alive while commands are read from
//! stdin, one per line. The bulk load runs in the background, so early
//! commands may see a partial store unless `--wait` is given.

use super::{AddCommand, ListCommand};
use clap::{Args, Parser, Subcommand};
use taskboard_store::{LoadState, StoreError, TaskStore};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

/// Run an interactive session over a live store
#[derive(Debug, Args)]
pub struct SessionCommand {
    /// Wait for the task directory to finish loading before reading commands
    #[arg(long)]
    pub wait: bool,
}

/// One line of session input
#[derive(Debug, Parser)]
#[command(no_binary_name = true)]
struct SessionLine {
    #[command(subcommand)]
    action: SessionAction,
}

/// Commands accepted inside a session
#[derive(Debug, Subcommand)]
enum SessionAction {
    /// List tasks with optional filters and sorting
    List(ListCommand),
    /// Create a new task
    Add(AddCommand),
    /// Show whether the task directory has finished loading
    Status,
    /// End the session
    Quit,
}

impl SessionCommand {
    /// Execute the session command against stdin and stdout.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if stdin cannot be read or stdout written.
    pub async fn execute(&self, store: &TaskStore) -> Result<String, StoreError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.run(store, stdin, &mut stdout).await
    }

    /// Read commands from `reader` until end of input or `quit`.
    ///
    /// Command errors are written to `writer` and do not end the session.
    /// Returns a one-line summary of the session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` on read or write failure.
    pub async fn run<R, W>(
        &self,
        store: &TaskStore,
        reader: R,
        writer: &mut W,
    ) -> Result<String, StoreError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if self.wait {
            store.wait_until_loaded().await;
            respond(writer, &status_line(store).await).await?;
        }

        let mut lines = reader.lines();
        let mut handled = 0usize;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            debug!(line, "session command");
            handled += 1;

            let words = match split_words(line) {
                Ok(words) => words,
                Err(message) => {
                    respond(writer, &format!("error: {}", message)).await?;
                    continue;
                }
            };

            let action = match SessionLine::try_parse_from(words) {
                Ok(parsed) => parsed.action,
                Err(e) => {
                    respond(writer, e.to_string().trim_end()).await?;
                    continue;
                }
            };

            let response = match action {
                SessionAction::Quit => break,
                SessionAction::Status => status_line(store).await,
                SessionAction::List(cmd) => cmd
                    .execute(store)
                    .await
                    .unwrap_or_else(|e| format!("error: {}", e)),
                SessionAction::Add(cmd) => cmd
                    .execute(store)
                    .await
                    .unwrap_or_else(|e| format!("error: {}", e)),
            };
            respond(writer, &response).await?;
        }

        Ok(format!("Session ended after {} command(s).", handled))
    }
}

/// Write one response followed by a newline, then flush.
async fn respond<W>(writer: &mut W, response: &str) -> Result<(), StoreError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(response.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Describe the store's load state.
async fn status_line(store: &TaskStore) -> String {
    let held = store.len().await;
    match store.load_state() {
        LoadState::Loading => format!("loading: {} task(s) so far", held),
        LoadState::Loaded(report) => format!(
            "loaded: {} task(s) from disk, {} skipped, {} held",
            report.loaded, report.skipped, held
        ),
    }
}

/// Split a command line into words.
///
/// Whitespace separates words; single or double quotes group text, so
/// `add --title "Buy milk"` yields four words.
fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}
