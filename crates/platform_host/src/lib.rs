//! Host-service ports consumed by the terminal shell, with in-memory and no-op adapters.
//!
//! This crate is the API boundary between the shell engine and its environment. Browser
//! adapters live in `platform_host_web`; the recording/manual adapters here back unit tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod ids;
pub mod navigation;
pub mod notifications;
pub mod storage;
pub mod time;

pub use ids::{IdGenerator, SequentialIdGenerator, TimestampIdGenerator};
pub use navigation::{
    NavigationRequest, NavigationService, NoopNavigationService, RecordingNavigationService,
};
pub use notifications::{
    NoopNotificationService, NotificationFuture, NotificationService, RecordedNotification,
    RecordingNotificationService,
};
pub use storage::{FailingPrefsStore, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture};
pub use time::{unix_time_ms_now, Clock, ManualClock, SystemClock};
