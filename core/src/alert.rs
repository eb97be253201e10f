//! Transient notification state owned by the editor.
//!
//! The editor decides what to show; rendering and the dismiss control belong
//! to the page shell.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    /// The empty alert. Nothing is rendered.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.message.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_alert_is_hidden() {
        assert!(!Alert::none().is_visible());
        assert!(Alert::error("boom").is_visible());
        assert_eq!(Alert::success("ok").severity, Severity::Success);
    }
}
