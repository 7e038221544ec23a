pub mod merge;
pub mod notifications;

pub use merge::{merge, MergeOutcome};
pub use notifications::NotificationDispatcher;
