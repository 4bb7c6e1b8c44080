//! Notification entries and the types used to create and patch them.

use std::fmt;
use std::time::Instant;

/// Queue-assigned notification identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub(crate) u64);

impl NotificationId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    #[default]
    Default,
    Success,
    Warning,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Default => "default",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }

    /// Short glyph for terminal rendering
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Default => "•",
            Severity::Success => "✅",
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
            Severity::Info => "ℹ️",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional call to action attached to a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub label: String,
    /// Identifies the action to the consumer that handles it
    pub key: String,
}

impl NotificationAction {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }
}

/// Content of a new notification
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationSpec {
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Severity,
    pub action: Option<NotificationAction>,
}

impl NotificationSpec {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            ..Self::default()
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Severity::Success).with_title(title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(Severity::Warning).with_title(title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Severity::Error).with_title(title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Severity::Info).with_title(title)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Partial update; only the present fields are applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub action: Option<NotificationAction>,
}

/// Lifecycle position of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Open { close_at: Instant },
    Closing { remove_at: Instant },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Severity,
    pub action: Option<NotificationAction>,
    pub phase: Phase,
}

impl Notification {
    pub(crate) fn new(id: NotificationId, spec: NotificationSpec, close_at: Instant) -> Self {
        Self {
            id,
            title: spec.title,
            description: spec.description,
            severity: spec.severity,
            action: spec.action,
            phase: Phase::Open { close_at },
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open { .. })
    }

    /// Pending deadline for the next transition
    pub fn deadline(&self) -> Instant {
        match self.phase {
            Phase::Open { close_at } => close_at,
            Phase::Closing { remove_at } => remove_at,
        }
    }

    pub(crate) fn apply(&mut self, patch: NotificationPatch) {
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(action) = patch.action {
            self.action = Some(action);
        }
    }

    /// One-line terminal rendering
    pub fn render(&self) -> String {
        let mut line = format!("{} ", self.severity.icon());
        match (&self.title, &self.description) {
            (Some(title), Some(description)) => line.push_str(&format!("{}: {}", title, description)),
            (Some(text), None) | (None, Some(text)) => line.push_str(text),
            (None, None) => line.push_str(self.severity.as_str()),
        }
        if let Some(action) = &self.action {
            line.push_str(&format!(" [{}]", action.label));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_merges_present_fields() {
        let spec = NotificationSpec::info("Loading").with_description("Fetching brands");
        let mut notification = Notification::new(NotificationId(1), spec, Instant::now());

        notification.apply(NotificationPatch {
            severity: Some(Severity::Success),
            title: Some("Loaded".to_string()),
            ..NotificationPatch::default()
        });

        assert_eq!(notification.title.as_deref(), Some("Loaded"));
        assert_eq!(notification.description.as_deref(), Some("Fetching brands"));
        assert_eq!(notification.severity, Severity::Success);
        assert!(notification.is_open());
    }

    #[test]
    fn test_render() {
        let spec = NotificationSpec::error("Failed to send inquiry").with_description("Car not found");
        let notification = Notification::new(NotificationId(7), spec, Instant::now());
        assert_eq!(notification.render(), "❌ Failed to send inquiry: Car not found");

        let spec = NotificationSpec::new(Severity::Default)
            .with_action(NotificationAction::new("Undo", "undo"));
        let notification = Notification::new(NotificationId(8), spec, Instant::now());
        assert_eq!(notification.render(), "• default [Undo]");
    }
}
