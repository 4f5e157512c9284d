//! Transient toast notifications for shell events such as achievement unlocks.

use leptos::*;
use platform_host::{NotificationFuture, NotificationService};
use terminal_shell::contract::NotifyStyle;

const DEFAULT_TOAST_TTL_MS: u64 = 4_000;

/// One visible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Unique id within one notifier.
    pub id: u64,
    /// Heading.
    pub title: String,
    /// Message text.
    pub body: String,
    /// Style hint.
    pub style: NotifyStyle,
}

/// Signal-backed [`NotificationService`] feeding a [`ToastStack`].
///
/// Copies share the same toast list. Create it inside a reactive owner.
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
    ttl_ms: u64,
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL_MS)
    }
}

impl ToastNotifier {
    /// Creates a notifier whose toasts expire after `ttl_ms` in the browser.
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            toasts: create_rw_signal(Vec::new()),
            next_id: store_value(0),
            ttl_ms,
        }
    }

    /// Shows a toast and returns its id.
    pub fn push(&self, title: &str, body: &str, style: NotifyStyle) -> u64 {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);
        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                title: title.to_string(),
                body: body.to_string(),
                style,
            })
        });
        self.schedule_expiry(id);
        id
    }

    /// Removes a toast. Unknown ids are ignored.
    pub fn dismiss(&self, id: u64) {
        self.toasts
            .update(|toasts| toasts.retain(|toast| toast.id != id));
    }

    /// Visible toasts, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_expiry(&self, id: u64) {
        let notifier = *self;
        set_timeout(
            move || notifier.dismiss(id),
            std::time::Duration::from_millis(self.ttl_ms),
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_expiry(&self, _id: u64) {
        let _ = self.ttl_ms;
    }
}

impl NotificationService for ToastNotifier {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
        style: NotifyStyle,
    ) -> NotificationFuture<'a, Result<(), String>> {
        self.push(title, body, style);
        Box::pin(async { Ok(()) })
    }
}

#[component]
/// Renders the toasts of `notifier`; clicking a toast dismisses it.
pub fn ToastStack(notifier: ToastNotifier) -> impl IntoView {
    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For each=move || notifier.toasts() key=|toast| toast.id let:toast>
                <button
                    type="button"
                    class=format!("toast toast-{}", toast.style.id())
                    on:click=move |_| notifier.dismiss(toast.id)
                >
                    <strong class="toast-title">{toast.title.clone()}</strong>
                    <span class="toast-body">{toast.body.clone()}</span>
                </button>
            </For>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn notify_pushes_and_dismiss_removes() {
        let runtime = create_runtime();
        let notifier = ToastNotifier::default();

        block_on(notifier.notify("Achievement unlocked", "explorer", NotifyStyle::Success))
            .expect("notify");
        let second = notifier.push("Heads up", "offline", NotifyStyle::Info);

        let bodies = notifier
            .toasts()
            .into_iter()
            .map(|toast| toast.body)
            .collect::<Vec<_>>();
        assert_eq!(bodies, vec!["explorer".to_string(), "offline".to_string()]);

        notifier.dismiss(second);
        notifier.dismiss(99);
        assert_eq!(notifier.toasts().len(), 1);
        assert_eq!(notifier.toasts()[0].style, NotifyStyle::Success);

        runtime.dispose();
    }
}
