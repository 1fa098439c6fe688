//! Toast notification queue.
//!
//! A pure model of the transient notifications shown while exporting.
//! Toasts may carry a caller-chosen id: showing another toast with the
//! same id replaces the first one in place, and [`ToastQueue::dismiss`]
//! removes it. Loading toasts stay until dismissed; success and error
//! toasts expire on their own.
//!
//! Time is passed in explicitly so the queue can be driven by a UI timer
//! and by tests alike.

use std::time::Duration;

use web_time::Instant;

/// Visual kind of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Loading,
    Success,
    Error,
}

impl ToastKind {
    /// How long a toast of this kind stays visible. `None` means until
    /// dismissed.
    #[must_use]
    pub const fn lifetime(self) -> Option<Duration> {
        match self {
            Self::Loading => None,
            Self::Success => Some(Duration::from_secs(2)),
            Self::Error => Some(Duration::from_secs(4)),
        }
    }
}

/// One visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Unique per queue, stable across replacement. Usable as a render key.
    pub key: u64,
    pub id: Option<String>,
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.kind
            .lifetime()
            .is_some_and(|life| now.saturating_duration_since(self.shown_at) >= life)
    }
}

/// Ordered set of visible toasts, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_key: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast and return its key.
    ///
    /// With an `id` that is already visible, the existing toast is
    /// updated in place and keeps its key and position.
    pub fn show(
        &mut self,
        kind: ToastKind,
        message: impl Into<String>,
        id: Option<&str>,
        now: Instant,
    ) -> u64 {
        let message = message.into();
        if let Some(id) = id
            && let Some(existing) = self
                .toasts
                .iter_mut()
                .find(|t| t.id.as_deref() == Some(id))
        {
            existing.kind = kind;
            existing.message = message;
            existing.shown_at = now;
            return existing.key;
        }

        let key = self.next_key;
        self.next_key += 1;
        self.toasts.push(Toast {
            key,
            id: id.map(str::to_owned),
            kind,
            message,
            shown_at: now,
        });
        key
    }

    /// Remove the toast with this id. Returns whether one was removed.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id.as_deref() != Some(id));
        self.toasts.len() != before
    }

    /// Remove the toast with this key. Returns whether one was removed.
    pub fn dismiss_key(&mut self, key: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.key != key);
        self.toasts.len() != before
    }

    /// Drop expired toasts. Returns whether anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id.as_deref() == Some(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_replaces_in_place() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        let first = q.show(ToastKind::Loading, "Baixando...", Some("toastDownload"), now);
        q.show(ToastKind::Success, "other", None, now);
        let again = q.show(ToastKind::Error, "falhou", Some("toastDownload"), now);

        assert_eq!(first, again);
        assert_eq!(q.len(), 2);
        let t = q.iter().next();
        assert_eq!(t.map(|t| t.kind), Some(ToastKind::Error));
        assert_eq!(t.map(|t| t.message.as_str()), Some("falhou"));
    }

    #[test]
    fn dismiss_by_id() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        q.show(ToastKind::Loading, "a", Some("toastClipboard"), now);
        assert!(q.dismiss("toastClipboard"));
        assert!(!q.dismiss("toastClipboard"));
        assert!(q.is_empty());
    }

    #[test]
    fn dismiss_by_key() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        let key = q.show(ToastKind::Success, "ok", None, now);
        assert!(q.dismiss_key(key));
        assert!(q.is_empty());
    }

    #[test]
    fn loading_never_expires() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        q.show(ToastKind::Loading, "a", Some("x"), now);
        assert!(!q.prune(now + Duration::from_secs(3600)));
        assert!(q.get("x").is_some());
    }

    #[test]
    fn success_and_error_expire_at_their_lifetimes() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        q.show(ToastKind::Success, "ok", None, now);
        q.show(ToastKind::Error, "err", None, now);

        assert!(!q.prune(now + Duration::from_millis(1999)));
        assert!(q.prune(now + Duration::from_secs(2)));
        assert_eq!(q.len(), 1);
        assert!(q.prune(now + Duration::from_secs(4)));
        assert!(q.is_empty());
    }

    #[test]
    fn keys_are_unique() {
        let now = Instant::now();
        let mut q = ToastQueue::new();
        let a = q.show(ToastKind::Success, "a", None, now);
        q.dismiss_key(a);
        let b = q.show(ToastKind::Success, "b", None, now);
        assert_ne!(a, b);
    }
}
