use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::{Alignment, Range};
use crate::error::{GanttError, GanttResult};

/// Placeholder replaced by the formatted value inside a display template.
pub const TEMPLATE_PLACEHOLDER: &str = "{}";

/// Header formatter for one calendar granularity.
///
/// `format` is a chrono `strftime` pattern. The optional `template` wraps the
/// formatted value, e.g. `"Week {}"`. Neither string is validated: a pattern
/// chrono cannot render is emitted as literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeScaleFormatter {
    range: Range,
    format: String,
    #[serde(default)]
    template: Option<String>,
    #[serde(default)]
    alignment: Alignment,
    #[serde(default = "default_week_start")]
    week_start: Weekday,
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

impl DateTimeScaleFormatter {
    #[must_use]
    pub fn new(range: Range, format: impl Into<String>) -> Self {
        Self {
            range,
            format: format.into(),
            template: None,
            alignment: Alignment::default(),
            week_start: default_week_start(),
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    #[must_use]
    pub fn format_string(&self) -> &str {
        &self.format
    }

    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[must_use]
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// First instant of the range containing `datetime`.
    #[must_use]
    pub fn current_range_begin(&self, datetime: NaiveDateTime) -> NaiveDateTime {
        self.range.truncate(datetime, self.week_start)
    }

    /// First instant of the range following the one containing `datetime`.
    pub fn next_range_begin(&self, datetime: NaiveDateTime) -> GanttResult<NaiveDateTime> {
        let begin = self.current_range_begin(datetime);
        self.range.advance(begin).ok_or_else(|| {
            GanttError::OutOfRange(format!("no {:?} range after {begin}", self.range))
        })
    }

    /// Renders `format` for `datetime`.
    #[must_use]
    pub fn format(&self, datetime: NaiveDateTime) -> String {
        let items: Vec<Item<'_>> = StrftimeItems::new(&self.format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return self.format.clone();
        }

        // Zone fields such as `%z` fail at write time on a naive timestamp.
        let mut rendered = String::new();
        if write!(rendered, "{}", datetime.format_with_items(items.iter())).is_err() {
            return self.format.clone();
        }
        rendered
    }

    /// Header label: `format` wrapped in the display template, if any.
    #[must_use]
    pub fn text(&self, datetime: NaiveDateTime) -> String {
        let formatted = self.format(datetime);
        match &self.template {
            None => formatted,
            Some(template) => template.replace(TEMPLATE_PLACEHOLDER, &formatted),
        }
    }
}
