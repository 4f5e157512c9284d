//! Notification service contracts and test adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use terminal_shell_contract::NotifyStyle;

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for transient user-visible messages.
pub trait NotificationService {
    /// Dispatches a message. Callers treat this as fire-and-forget.
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
        style: NotifyStyle,
    ) -> NotificationFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Notification service that drops every message.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify<'a>(
        &'a self,
        _title: &'a str,
        _body: &'a str,
        _style: NotifyStyle,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

/// One message captured by [`RecordingNotificationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedNotification {
    /// Message title.
    pub title: String,
    /// Message body.
    pub body: String,
    /// Style hint.
    pub style: NotifyStyle,
}

#[derive(Debug, Clone, Default)]
/// Notification service that records messages. Clones share the log.
pub struct RecordingNotificationService {
    sent: Rc<RefCell<Vec<RecordedNotification>>>,
}

impl RecordingNotificationService {
    /// Returns the recorded messages in dispatch order.
    pub fn sent(&self) -> Vec<RecordedNotification> {
        self.sent.borrow().clone()
    }
}

impl NotificationService for RecordingNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
        style: NotifyStyle,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.sent.borrow_mut().push(RecordedNotification {
                title: title.to_string(),
                body: body.to_string(),
                style,
            });
            Ok(())
        })
    }
}
