//! Opaque reminder handle.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of one scheduled reminder, issued by a notification service.
///
/// Core never interprets the value; it only stores it and hands it back
/// for cancellation. Blank values are not valid handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationHandle(String);

impl NotificationHandle {
    /// Wraps a raw service handle.
    ///
    /// Returns `None` for blank input, which services use to signal
    /// "nothing was scheduled".
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NotificationHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NotificationHandle {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("notification handle cannot be blank")
    }
}

impl From<NotificationHandle> for String {
    fn from(value: NotificationHandle) -> Self {
        value.0
    }
}
