use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::core::{DateTimeScaleFormatter, Range};

/// Header scale mode of a [`crate::core::DateTimeGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scale {
    /// Resolved from day width and label width on every query.
    #[default]
    Auto,
    Hour,
    Day,
    Week,
    Month,
    /// Uses the grid's user-defined lower/upper formatters.
    UserDefined,
}

/// Which of the two header rows a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRow {
    Upper,
    Lower,
}

/// Picks the finest fixed scale whose lower-row cells stay wider than
/// `label_width_px`.
#[must_use]
pub fn resolve_auto_scale(day_width_px: f64, label_width_px: f64) -> Scale {
    if !label_width_px.is_finite() || label_width_px <= 0.0 {
        return Scale::Day;
    }

    if day_width_px > 24.0 * label_width_px {
        Scale::Hour
    } else if day_width_px > label_width_px {
        Scale::Day
    } else if day_width_px > label_width_px / 7.0 {
        Scale::Week
    } else {
        Scale::Month
    }
}

/// Lower/upper header formatters used by a fixed scale.
///
/// `Auto` and `UserDefined` have no built-in pair and fall back to `Day`.
/// Week labels use ISO `%V`, so with a non-Monday `week_start` a cell shows
/// the ISO week of its first day.
#[must_use]
pub fn default_formatters(
    scale: Scale,
    week_start: Weekday,
) -> (DateTimeScaleFormatter, DateTimeScaleFormatter) {
    let (lower, upper) = match scale {
        Scale::Hour => (
            DateTimeScaleFormatter::new(Range::Hour, "%H"),
            DateTimeScaleFormatter::new(Range::Day, "%a %d %B %Y"),
        ),
        Scale::Week => (
            DateTimeScaleFormatter::new(Range::Week, "%V"),
            DateTimeScaleFormatter::new(Range::Month, "%B %Y"),
        ),
        Scale::Month => (
            DateTimeScaleFormatter::new(Range::Month, "%b"),
            DateTimeScaleFormatter::new(Range::Year, "%Y"),
        ),
        Scale::Day | Scale::Auto | Scale::UserDefined => (
            DateTimeScaleFormatter::new(Range::Day, "%a"),
            DateTimeScaleFormatter::new(Range::Week, "%V").with_template("Week {}"),
        ),
    };
    (
        lower.with_week_start(week_start),
        upper.with_week_start(week_start),
    )
}
