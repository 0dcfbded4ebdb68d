// Library root: re-exports all modules so integration tests and the binary
// can reach the session, the app loop and the TUI.

pub mod app;
pub mod protocol;
pub mod session;
pub mod tui;
