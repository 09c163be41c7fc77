//! Transient user-facing notices.
//!
//! Store operations report outcomes through a [`NoticeSink`] rather than
//! rendering anything themselves; the embedding surface decides how to
//! show them. [`TracingNotices`] logs them, [`BufferNotices`] queues them
//! for a UI (or a test) to drain.

use std::sync::Mutex;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One transient user-facing message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Destination for user-facing notices.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);

    fn info(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        });
    }

    fn success(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        });
    }

    fn warning(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notice {
            level: NoticeLevel::Warning,
            message: message.into(),
        });
    }

    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        });
    }
}

/// Logs every notice through `tracing`. The default sink for headless use.
#[derive(Debug, Default)]
pub struct TracingNotices;

impl NoticeSink for TracingNotices {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success => {
                tracing::info!(message = %notice.message, "notice")
            }
            NoticeLevel::Warning => tracing::warn!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::error!(message = %notice.message, "notice"),
        }
    }
}

/// Queues notices for the embedding surface to drain and display.
#[derive(Debug, Default)]
pub struct BufferNotices {
    queue: Mutex<Vec<Notice>>,
}

impl BufferNotices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all queued notices, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.queue.lock().unwrap())
    }

    /// Snapshot the queue without draining it.
    pub fn snapshot(&self) -> Vec<Notice> {
        self.queue.lock().unwrap().clone()
    }
}

impl NoticeSink for BufferNotices {
    fn notify(&self, notice: Notice) {
        self.queue.lock().unwrap().push(notice);
    }
}

// Forwarding impl so `Arc<dyn NoticeSink>` is itself a sink and the
// provided helper methods stay usable behind shared pointers.
impl<T: NoticeSink + ?Sized> NoticeSink for std::sync::Arc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_queues_and_drains_in_order() {
        let sink = BufferNotices::new();
        sink.info("first");
        sink.error("second");

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NoticeLevel::Info);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].level, NoticeLevel::Error);

        assert!(sink.drain().is_empty());
    }
}
