use super::App;
use anyhow::Result;
use clipnotes_core::ClipboardWatcher;
use log::{info, warn};
use tokio::sync::mpsc;

impl App {
    /// Watch the clipboard until Ctrl-C
    ///
    /// The watcher only sends text; every history mutation happens here, on
    /// this task.
    pub async fn watch(mut self) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let mut watcher = ClipboardWatcher::new(self.clipboard.clone(), self.config.poll_interval());
        watcher.start(tx)?;

        info!("Watching clipboard, press Ctrl-C to stop");

        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(content) => self.handle_new_content(&content),
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Stop requested");
                    break;
                }
            }
        }

        watcher.stop();
        info!("History holds {} entries", self.history.len());
        Ok(())
    }

    /// Record text reported by the watcher
    ///
    /// The saved history is reloaded first so edits made by other `clipnotes`
    /// commands since the last capture are not overwritten.
    pub(super) fn handle_new_content(&mut self, content: &str) {
        if let Err(e) = self.history.reload() {
            warn!("Keeping in-memory history, reload failed: {:?}", e);
        }

        match self.history.ingest(content) {
            Ok(true) => info!("Captured {} chars", content.len()),
            Ok(false) => {}
            Err(e) => super::commands::report(&e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Command;
    use clipnotes_core::{Config, FileSlot, MemoryClipboard};
    use std::sync::Arc;

    #[test]
    fn test_new_content_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = Arc::new(MemoryClipboard::new());
        let mut app = App::with_parts(Config::default(), FileSlot::new(dir.path()), clipboard.clone());

        app.handle_new_content("first");
        app.handle_new_content("first");
        app.handle_new_content("second");
        assert_eq!(app.history().len(), 2);

        let reopened = App::with_parts(Config::default(), FileSlot::new(dir.path()), clipboard);
        assert_eq!(reopened.history().entries(), app.history().entries());
    }

    #[test]
    fn test_delete_from_other_process_survives_next_capture() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = Arc::new(MemoryClipboard::new());
        let mut daemon = App::with_parts(Config::default(), FileSlot::new(dir.path()), clipboard.clone());
        daemon.handle_new_content("password123");
        daemon.handle_new_content("notes");

        let mut cli = App::with_parts(Config::default(), FileSlot::new(dir.path()), clipboard.clone());
        let id = cli.history().entries()[1].id();
        cli.run_command(Command::Delete { id, yes: true }, &mut Vec::<u8>::new()).unwrap();

        daemon.handle_new_content("next copy");
        let disk = std::fs::read_to_string(dir.path().join("clipboardItems.json")).unwrap();
        assert!(disk.contains("next copy"));
        assert!(disk.contains("notes"));
        assert!(!disk.contains("password123"));
    }

    #[test]
    fn test_edit_and_clear_from_other_process_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = Arc::new(MemoryClipboard::new());
        let mut daemon = App::with_parts(Config::default(), FileSlot::new(dir.path()), clipboard.clone());
        daemon.handle_new_content("draft");

        let mut cli = App::with_parts(Config::default(), FileSlot::new(dir.path()), clipboard.clone());
        let id = cli.history().entries()[0].id();
        cli.run_command(Command::Edit { id, content: "final".into() }, &mut Vec::<u8>::new())
            .unwrap();

        daemon.handle_new_content("other");
        let contents: Vec<&str> = daemon.history().entries().iter().map(|e| e.content()).collect();
        assert_eq!(contents, vec!["other", "final"]);

        cli.run_command(Command::Clear { yes: true }, &mut Vec::<u8>::new()).unwrap();
        daemon.handle_new_content("other");
        let contents: Vec<&str> = daemon.history().entries().iter().map(|e| e.content()).collect();
        assert_eq!(contents, vec!["other"]);
    }
}
