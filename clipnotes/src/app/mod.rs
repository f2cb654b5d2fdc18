mod clipboard;
pub(crate) mod commands;
mod event_loop;
mod init;
mod state;

pub use state::App;
