//! Signal-backed toast notifications.
//!
//! [`Toasts`] is a copyable handle to a [`ToastQueue`] stored in a
//! Dioxus signal and shared through context. Any component can show or
//! dismiss toasts; the [`Toaster`](crate::components::Toaster)
//! component renders them.

use diagrama_export::{Notifier, ToastKind, ToastQueue};
use dioxus::prelude::*;
use web_time::Instant;

/// Handle to the app-wide toast queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Toasts {
    queue: Signal<ToastQueue>,
}

impl Toasts {
    /// The queue signal, for rendering.
    #[must_use]
    pub const fn queue(self) -> Signal<ToastQueue> {
        self.queue
    }

    fn show(self, kind: ToastKind, message: &str, id: Option<&str>) {
        let mut queue = self.queue;
        queue.write().show(kind, message, id, Instant::now());
    }

    /// Remove a toast by its render key (close button).
    pub fn dismiss_key(self, key: u64) {
        let mut queue = self.queue;
        queue.write().dismiss_key(key);
    }

    /// Drop expired toasts, writing the signal only when something
    /// expired.
    pub fn prune(self) {
        let now = Instant::now();
        let expired = self.queue.peek().iter().any(|t| t.is_expired(now));
        if expired {
            let mut queue = self.queue;
            queue.write().prune(now);
        }
    }
}

impl Notifier for Toasts {
    fn loading(&self, id: &str, message: &str) {
        self.show(ToastKind::Loading, message, Some(id));
    }

    fn success(&self, message: &str) {
        self.show(ToastKind::Success, message, None);
    }

    fn error(&self, message: &str) {
        self.show(ToastKind::Error, message, None);
    }

    fn dismiss(&self, id: &str) {
        let mut queue = self.queue;
        queue.write().dismiss(id);
    }
}

/// Create the toast queue and provide it to descendants.
///
/// Call once, near the root.
pub fn use_toasts_provider() -> Toasts {
    use_context_provider(|| Toasts {
        queue: Signal::new(ToastQueue::new()),
    })
}

/// The toast handle provided by [`use_toasts_provider`].
#[must_use]
pub fn use_toasts() -> Toasts {
    use_context()
}
