//! # Notifications
//!
//! User-facing notices (toasts). Commands describe what happened; the shell
//! decides how to show it.

use std::sync::Mutex;

use serde::Serialize;
use tracing::{info, warn};

/// Visual style of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Info,
    Success,
    Destructive,
}

/// A single toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            description: None,
            variant: NoticeVariant::Info,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Notice {
            variant: NoticeVariant::Success,
            ..Notice::info(title)
        }
    }

    pub fn destructive(title: impl Into<String>) -> Self {
        Notice {
            variant: NoticeVariant::Destructive,
            ..Notice::info(title)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Toast surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log. Used by the CLI.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        match notice.variant {
            NoticeVariant::Destructive => warn!(title = %notice.title, %description, "notice"),
            _ => info!(title = %notice.title, %description, "notice"),
        }
    }
}

/// Keeps every notice in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notices().into_iter().map(|n| n.title).collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }

    pub fn clear(&self) {
        if let Ok(mut n) = self.notices.lock() {
            n.clear();
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut n) = self.notices.lock() {
            n.push(notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::info("Sincronizando dados..."));
        notifier.notify(
            Notice::success("Dados sincronizados com sucesso")
                .with_description("2 operações sincronizadas"),
        );

        assert_eq!(
            notifier.titles(),
            vec!["Sincronizando dados...", "Dados sincronizados com sucesso"]
        );
        let last = notifier.last().unwrap();
        assert_eq!(last.variant, NoticeVariant::Success);
        assert_eq!(last.description.as_deref(), Some("2 operações sincronizadas"));

        notifier.clear();
        assert!(notifier.notices().is_empty());
    }
}
