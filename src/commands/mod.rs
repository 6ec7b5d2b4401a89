//! CLI commands for taskboard
//!
//! This module contains all subcommand implementations for the tb CLI.

pub mod add;
pub mod list;
pub mod session;

pub use add::AddCommand;
pub use list::{ListCommand, QueryArgs};
pub use session::SessionCommand;

use clap::Subcommand;
use taskboard_store::{StoreError, TaskStore};

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List tasks with optional filters and sorting
    List(ListCommand),
    /// Create a new task and show the updated list
    Add(AddCommand),
    /// Read commands from stdin against a live store
    Session(SessionCommand),
}

impl Command {
    /// Execute the command against the given store.
    ///
    /// One-shot commands wait for the bulk load to finish first. A session
    /// starts serving immediately and decides for itself whether to wait.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the command execution fails.
    pub async fn execute(&self, store: &TaskStore) -> Result<String, StoreError> {
        match self {
            Command::List(cmd) => {
                store.wait_until_loaded().await;
                cmd.execute(store).await
            }
            Command::Add(cmd) => {
                store.wait_until_loaded().await;
                cmd.execute(store).await
            }
            Command::Session(cmd) => cmd.execute(store).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use clap::Parser;
    use std::sync::Arc;
    use taskboard_store::{LoadReport, Task};

    /// Test struct to parse commands
    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_command_list_parses() {
        let cli = TestCli::try_parse_from(["test", "list"]);
        assert!(cli.is_ok());
        match cli.unwrap().command {
            Command::List(cmd) => {
                assert!(cmd.query.tag.is_none());
                assert!(cmd.query.sort_by.is_none());
                assert_eq!(cmd.format, OutputFormat::Table);
            }
            other => panic!("Expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_command_list_with_all_options() {
        let cli = TestCli::try_parse_from([
            "test",
            "list",
            "--tag",
            "home",
            "--title",
            "rent",
            "--sort-by",
            "due-date",
            "--sort-order",
            "desc",
            "--format",
            "json",
        ]);
        match cli.unwrap().command {
            Command::List(cmd) => {
                assert_eq!(cmd.query.tag.as_deref(), Some("home"));
                assert_eq!(cmd.query.title.as_deref(), Some("rent"));
                assert_eq!(cmd.query.sort_by.as_deref(), Some("due-date"));
                assert_eq!(cmd.query.sort_order.as_deref(), Some("desc"));
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("Expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_command_list_accepts_unknown_sort_values() {
        let cli = TestCli::try_parse_from(["test", "list", "--sort-by", "colour", "--sort-order", "up"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_command_list_rejects_unknown_format() {
        let cli = TestCli::try_parse_from(["test", "list", "--format", "xml"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_command_add_parses() {
        let cli = TestCli::try_parse_from([
            "test",
            "add",
            "--title",
            "Pay rent",
            "-p",
            "2",
            "--due-date",
            "2024-03-01",
            "--pinned",
            "on",
            "-t",
            "home, money",
        ]);
        match cli.unwrap().command {
            Command::Add(cmd) => {
                assert_eq!(cmd.title, "Pay rent");
                assert_eq!(cmd.priority.as_deref(), Some("2"));
                assert_eq!(cmd.due_date.as_deref(), Some("2024-03-01"));
                assert_eq!(cmd.pinned.as_deref(), Some("on"));
                assert_eq!(cmd.tags.as_deref(), Some("home, money"));
            }
            other => panic!("Expected add, got {:?}", other),
        }
    }

    #[test]
    fn test_command_add_negative_priority() {
        let cli = TestCli::try_parse_from(["test", "add", "--title", "x", "--priority", "-3"]);
        match cli.unwrap().command {
            Command::Add(cmd) => assert_eq!(cmd.priority.as_deref(), Some("-3")),
            other => panic!("Expected add, got {:?}", other),
        }
    }

    #[test]
    fn test_command_add_requires_title() {
        let cli = TestCli::try_parse_from(["test", "add"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_command_session_parses() {
        match TestCli::try_parse_from(["test", "session", "--wait"]).unwrap().command {
            Command::Session(cmd) => assert!(cmd.wait),
            other => panic!("Expected session, got {:?}", other),
        }
        match TestCli::try_parse_from(["test", "session"]).unwrap().command {
            Command::Session(cmd) => assert!(!cmd.wait),
            other => panic!("Expected session, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_waits_for_load() {
        let store = Arc::new(TaskStore::new());
        let cli = TestCli::try_parse_from(["test", "list", "--format", "json"]).unwrap();

        let loader = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                tokio::task::yield_now().await;
                store.append(Task::new("late arrival")).await;
                store.mark_loaded(LoadReport {
                    loaded: 1,
                    skipped: 0,
                });
            })
        };

        let output = cli.command.execute(&store).await.unwrap();
        let view: Vec<Task> = serde_json::from_str(&output).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].title, "late arrival");

        loader.await.unwrap();
    }
}
