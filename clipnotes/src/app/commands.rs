use super::App;
use crate::cli::Command;
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use clipnotes_core::{Action, ClipboardEntry, HistoryError, StoreError};
use std::io::Write;
use uuid::Uuid;

/// Tell the user about a failed operation
///
/// Errors with a notice print only the notice; details go to the debug log.
pub(super) fn report(err: &HistoryError) {
    if let Err(e) = write_report(err, &mut std::io::stderr().lock()) {
        log::warn!("Failed to show notice: {}", e);
    }
}

fn write_report(err: &HistoryError, out: &mut impl Write) -> std::io::Result<()> {
    match err.user_notice() {
        Some(notice) => {
            log::debug!("{:?}", err);
            writeln!(out, "{}", notice)
        }
        None => {
            log::warn!("{}", err);
            Ok(())
        }
    }
}

/// Format a timestamp the way the history list shows it
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%b %-d, %Y at %-I:%M %p")
        .to_string()
}

/// Store failures are shown and swallowed; a missing entry is an error for the caller
fn settle<T>(result: Result<T, HistoryError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(HistoryError::NotFound(id)) => Err(anyhow::anyhow!("No clipboard item with id {}", id)),
        Err(e) => {
            report(&e);
            Ok(None)
        }
    }
}

fn settle_store<T>(result: Result<T, StoreError>) -> Result<Option<T>> {
    settle(result.map_err(HistoryError::from))
}

impl App {
    /// Run one non-watching command, writing its output to `out`
    pub fn run_command(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Watch => anyhow::bail!("watch runs through App::watch"),
            Command::List { limit } => {
                let entries: Vec<&ClipboardEntry> = self.history.search("");
                let shown = limit.unwrap_or(entries.len());
                self.print_entries(&entries[..shown.min(entries.len())], out)?;
                writeln!(out, "Items: {}", self.history.len())?;
            }
            Command::Search { query } => {
                let entries = self.history.search(&query);
                self.print_entries(&entries, out)?;
                writeln!(out, "Matches: {}", entries.len())?;
            }
            Command::Show { id } => {
                let entry = self.find(id)?;
                writeln!(out, "{}", entry.content())?;
            }
            Command::Copy { id } => {
                if settle(self.history.copy_to_clipboard(id))?.is_some() {
                    writeln!(out, "Copied to clipboard")?;
                }
            }
            Command::Edit { id, content } => {
                if settle(self.history.update(id, &content))?.is_some() {
                    writeln!(out, "Saved")?;
                }
            }
            Command::Delete { id, yes } => {
                self.find(id)?;
                if !self.confirmed(Action::Delete, yes, out)? {
                    return Ok(());
                }
                if settle_store(self.history.delete(id))?.is_some() {
                    writeln!(out, "Deleted")?;
                }
            }
            Command::Clear { yes } => {
                if !self.confirmed(Action::Clear, yes, out)? {
                    return Ok(());
                }
                if settle_store(self.history.clear())?.is_some() {
                    writeln!(out, "Cleared")?;
                }
            }
        }
        Ok(())
    }

    fn find(&self, id: Uuid) -> Result<&ClipboardEntry> {
        self.history
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("No clipboard item with id {}", id))
    }

    /// Print the confirmation prompt unless `yes` was given
    fn confirmed(&self, action: Action, yes: bool, out: &mut impl Write) -> Result<bool> {
        match action.confirmation() {
            Some(prompt) if !yes => {
                writeln!(out, "{}", prompt.title)?;
                writeln!(out, "{}", prompt.message)?;
                writeln!(out, "Re-run with --yes to {}.", prompt.confirm_label.to_lowercase())?;
                Ok(false)
            }
            _ => Ok(true),
        }
    }

    fn print_entries(&self, entries: &[&ClipboardEntry], out: &mut impl Write) -> Result<()> {
        let summary_length = self.config.history.summary_length;
        for entry in entries {
            writeln!(out, "{}  {}", entry.id(), format_timestamp(entry.timestamp()))?;
            for line in entry.display_summary(summary_length).lines() {
                writeln!(out, "    {}", line)?;
            }
        }
        Ok(())
    }
}
