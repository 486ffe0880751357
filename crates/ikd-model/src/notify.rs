//! Synchronous observer seams between the core and whatever renders it.
//!
//! Both traits are direct-call: no queueing, no buffering. At most one
//! notification is in flight at a time because every core operation runs to
//! completion on the calling thread.

/// Message severity for the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// Receives user-facing diagnostics. The core never logs or displays
/// directly; validation failures and recoverable errors land here.
pub trait NotificationSink {
    fn notify(&self, message: &str, severity: Severity);
}

/// Observes table mutations, consumed by whatever renders the table.
pub trait TableObserver {
    fn table_replaced(&self) {}
    fn column_relabeled(&self, _column: usize, _label: &str) {}
}

/// Sink that drops everything. Default collaborator for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _message: &str, _severity: Severity) {}
}

impl TableObserver for NullSink {}
