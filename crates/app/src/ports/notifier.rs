//! Notifier port: transient user-facing notifications (toasts).

/// Severity of a notice, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Shows transient notifications to the user.
pub trait Notifier {
    /// Display `notice`. Must not block.
    fn notify(&self, notice: Notice);

    fn info(&self, text: impl Into<String>) {
        self.notify(Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        });
    }

    fn success(&self, text: impl Into<String>) {
        self.notify(Notice {
            level: NoticeLevel::Success,
            text: text.into(),
        });
    }

    fn error(&self, text: impl Into<String>) {
        self.notify(Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        });
    }
}

impl<T: Notifier> Notifier for &T {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

impl<T: Notifier> Notifier for std::rc::Rc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}
