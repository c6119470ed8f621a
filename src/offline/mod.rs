//! Offline progress: catching a snapshot up after time away

pub mod events;
pub mod notifications;
pub mod progress;

pub use events::{OfflineEvent, OfflineEventKind};
pub use notifications::{build_notifications, format_elapsed, Notification, Severity};
pub use progress::{NeedsDecay, OfflineProgress, OfflineSimulator};
