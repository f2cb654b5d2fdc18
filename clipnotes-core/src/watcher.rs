/// Clipboard change detection by polling a change token
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::clipboard::ClipboardPort;
use crate::error::WatchError;

#[derive(Debug)]
struct WatchState {
    last_token: u64,
    running: bool,
    generation: u64,
}

/// Polls a [`ClipboardPort`] and forwards each new text value exactly once
///
/// Detected text is sent over a channel to whoever owns the history, so the
/// polling task never mutates history itself. The change token is captured at
/// construction: whatever is on the clipboard at startup is not reported.
pub struct ClipboardWatcher {
    port: Arc<dyn ClipboardPort>,
    interval: Duration,
    state: Arc<Mutex<WatchState>>,
    task: Option<JoinHandle<()>>,
}

/// One poll step. The token is consumed even when the new content is not text.
fn poll(port: &dyn ClipboardPort, state: &mut WatchState) -> Option<String> {
    let token = port.change_token();
    if token == state.last_token {
        return None;
    }
    state.last_token = token;
    port.read()
}

impl ClipboardWatcher {
    pub fn new(port: Arc<dyn ClipboardPort>, interval: Duration) -> Self {
        let last_token = port.change_token();
        Self {
            port,
            interval,
            state: Arc::new(Mutex::new(WatchState {
                last_token,
                running: false,
                generation: 0,
            })),
            task: None,
        }
    }

    /// Run a single poll synchronously
    pub fn poll_once(&self) -> Option<String> {
        let mut state = self.state.lock();
        poll(self.port.as_ref(), &mut state)
    }

    /// Start polling in the background, sending new text to `tx`
    ///
    /// Restarting replaces the previous poller, so there is never more than one.
    pub fn start(&mut self, tx: mpsc::UnboundedSender<String>) -> Result<(), WatchError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| WatchError::NoRuntime)?;
        self.stop();

        let generation = {
            let mut state = self.state.lock();
            state.running = true;
            state.generation += 1;
            state.generation
        };

        let port = Arc::clone(&self.port);
        let state = Arc::clone(&self.state);
        let interval = self.interval;

        self.task = Some(runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let keep_going = {
                    let mut state = state.lock();
                    if !state.running || state.generation != generation {
                        false
                    } else {
                        // Send while holding the lock so stop() never races an emission
                        match poll(port.as_ref(), &mut state) {
                            Some(text) => {
                                log::debug!("Clipboard changed ({} chars)", text.len());
                                if tx.send(text).is_err() {
                                    log::warn!("Clipboard consumer went away, stopping watcher");
                                    state.running = false;
                                    false
                                } else {
                                    true
                                }
                            }
                            None => true,
                        }
                    }
                };

                if !keep_going {
                    break;
                }
            }
        }));

        log::info!("Clipboard watcher started ({:?} interval)", self.interval);
        Ok(())
    }

    /// Stop polling. No text is sent after this returns.
    pub fn stop(&mut self) {
        {
            let mut state = self.state.lock();
            state.running = false;
            state.generation += 1;
        }

        if let Some(task) = self.task.take() {
            task.abort();
            log::info!("Clipboard watcher stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some() && self.state.lock().running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for ClipboardWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
