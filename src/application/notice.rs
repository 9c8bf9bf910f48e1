//! User-facing notifications produced by service operations.

pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed: Invalid API key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_variant(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Result of a mutating operation: a success flag the caller can branch on,
/// plus the notice to show. Failures never surface as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    succeeded: bool,
    notice: Notice,
}

impl ActionOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            notice: Notice::success(text),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            notice: Notice::error(text),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn into_notice(self) -> Notice {
        self.notice
    }
}
