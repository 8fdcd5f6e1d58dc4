//! Timed notifications shown after mutations

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Fire-and-forget notifications; each one dismisses itself when its
/// duration has elapsed.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    success_duration: Duration,
    error_duration: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_secs(3), Duration::from_secs(5))
    }
}

impl ToastQueue {
    pub fn new(success_duration: Duration, error_duration: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 1,
            success_duration,
            error_duration,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message, self.success_duration)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message, self.error_duration)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Info, message, self.success_duration)
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, duration: Duration) -> u64 {
        self.prune();
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
            expires_at: Instant::now() + duration,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Drop expired toasts
    pub fn prune(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Toasts still on screen, oldest first
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        let now = Instant::now();
        self.toasts.iter().filter(move |t| t.expires_at > now)
    }

    /// Most recent toast still on screen
    pub fn latest(&self) -> Option<&Toast> {
        self.visible().last()
    }

    pub fn is_empty(&self) -> bool {
        self.visible().next().is_none()
    }
}
