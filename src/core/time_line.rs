use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Vertical marker drawn across the grid at one instant.
///
/// With no fixed `date_time` the marker follows the `now` passed to
/// [`crate::core::DateTimeGrid::time_line_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeLine {
    pub enabled: bool,
    #[serde(default)]
    pub date_time: Option<NaiveDateTime>,
}

impl TimeLine {
    #[must_use]
    pub fn following_now() -> Self {
        Self {
            enabled: true,
            date_time: None,
        }
    }

    #[must_use]
    pub fn fixed(date_time: NaiveDateTime) -> Self {
        Self {
            enabled: true,
            date_time: Some(date_time),
        }
    }

    /// Instant the marker points at, or `None` when disabled.
    #[must_use]
    pub fn resolve(self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        self.enabled.then(|| self.date_time.unwrap_or(now))
    }
}
