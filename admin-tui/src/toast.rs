//! Short-lived notifications.

use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub description: Option<String>,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl Toast {
    pub fn text(&self) -> String {
        let icon = match self.kind {
            ToastKind::Info => '●',
            ToastKind::Error => '✖',
        };
        match &self.description {
            Some(description) => format!("{} {} · {}", icon, self.message, description),
            None => format!("{} {}", icon, self.message),
        }
    }
}

/// Toasts in arrival order.
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    pub fn info(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message.into(), None, ToastKind::Info, now);
    }

    /// Info toast with a second line of detail.
    pub fn info_with(
        &mut self,
        message: impl Into<String>,
        description: impl Into<String>,
        now: Instant,
    ) {
        self.push(message.into(), Some(description.into()), ToastKind::Info, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message.into(), None, ToastKind::Error, now);
    }

    fn push(
        &mut self,
        message: String,
        description: Option<String>,
        kind: ToastKind,
        now: Instant,
    ) {
        log::debug!("toast ({:?}): {}", kind, message);
        self.items.push(Toast {
            message,
            description,
            kind,
            expires_at: now + TOAST_DURATION,
        });
    }

    /// Drop expired toasts. Returns `true` if any were removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.expires_at > now);
        self.items.len() != before
    }

    /// When the next toast expires.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.items.iter().map(|t| t.expires_at).min()
    }

    pub fn visible(&self) -> &[Toast] {
        &self.items
    }
}
