pub mod kit;
pub mod metadata;
pub mod notify;
pub mod table;

pub use kit::{IndexSet, KitType, SEQUENCE_FIELD_I5, SEQUENCE_FIELD_I7};
pub use metadata::{CycleSlot, IndexKitInfo, OverrideCycles, ResourceSettings, SessionInfo};
pub use notify::{NotificationSink, NullSink, Severity, TableObserver};
pub use table::{Table, TableError, is_blank};
