//! Terminal notice sink.

use tracing::debug;

use crate::domain::ports::{Notice, NoticeLevel, Notifier};

/// Prints notices to stderr so they never mix with tabular stdout output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let prefix = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        debug!(level = prefix, message = %notice.message, "notice");
        eprintln!("[{prefix}] {}", notice.message);
    }
}
