use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use tracing::{debug, trace, warn};

use crate::core::{
    Alignment, DateTimeScaleFormatter, FreeDays, HeaderRow, Scale, Span, TimeLine,
    default_formatters, resolve_auto_scale,
};
use crate::error::{GanttError, GanttResult};

/// Smallest accepted day width; smaller or non-finite requests clamp to it.
pub const MIN_DAY_WIDTH: f64 = 0.01;
pub const DEFAULT_DAY_WIDTH: f64 = 100.0;
/// Approximate width of a five-character header label.
pub const DEFAULT_LABEL_WIDTH_PX: f64 = 40.0;
pub const MIN_LABEL_WIDTH_PX: f64 = 1.0;
/// Upper bound on cells produced by one `visible_days`/`header_cells` call.
pub const MAX_CELLS_PER_QUERY: usize = 10_000;
/// Offsets from the grid start (in ms) that survive a pixel round trip exactly.
///
/// Beyond it the round trip drifts by at most `1 + |offset_ms| * 8 * f64::EPSILON` ms.
pub const EXACT_ROUND_TRIP_SPAN_MS: i64 = 1 << 48;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Grid property touched by a setter, reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridChange {
    StartDateTime,
    DayWidth,
    WeekStart,
    FreeDays,
    Scale,
    UserDefinedScales,
    RowSeparators,
    LabelWidth,
    TimeLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type GridObserver = Box<dyn Fn(GridChange)>;

/// One calendar day overlapping a queried pixel interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub x: f64,
    pub width: f64,
    pub is_free: bool,
}

/// One header cell: a formatter range laid out in scene pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub begin: NaiveDateTime,
    pub x: f64,
    pub width: f64,
    pub text: String,
    pub alignment: Alignment,
}

/// Maps calendar time onto the horizontal axis of a Gantt scene.
///
/// `x = (t - start) / 1 day * day_width`, evaluated at millisecond resolution.
/// Pixels are `f64`, so the round trip is exact only within
/// [`EXACT_ROUND_TRIP_SPAN_MS`] of the start.
/// Everything else (scales, free days, header cells) is derived from that
/// mapping on demand, so changing a property never leaves cached layout stale.
/// Observers registered with [`DateTimeGrid::subscribe`] run synchronously
/// after each effective change.
pub struct DateTimeGrid {
    start_date_time: NaiveDateTime,
    day_width: f64,
    week_start: Weekday,
    free_days: FreeDays,
    scale: Scale,
    user_defined_lower: Option<DateTimeScaleFormatter>,
    user_defined_upper: Option<DateTimeScaleFormatter>,
    row_separators: bool,
    label_width_px: f64,
    time_line: TimeLine,
    generation: u64,
    next_observer_id: u64,
    observers: Vec<(ObserverId, GridObserver)>,
}

impl fmt::Debug for DateTimeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimeGrid")
            .field("start_date_time", &self.start_date_time)
            .field("day_width", &self.day_width)
            .field("week_start", &self.week_start)
            .field("free_days", &self.free_days)
            .field("scale", &self.scale)
            .field("user_defined_lower", &self.user_defined_lower)
            .field("user_defined_upper", &self.user_defined_upper)
            .field("row_separators", &self.row_separators)
            .field("label_width_px", &self.label_width_px)
            .field("time_line", &self.time_line)
            .field("generation", &self.generation)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl DateTimeGrid {
    #[must_use]
    pub fn new(start_date_time: NaiveDateTime) -> Self {
        Self {
            start_date_time,
            day_width: DEFAULT_DAY_WIDTH,
            week_start: Weekday::Mon,
            free_days: FreeDays::default(),
            scale: Scale::Auto,
            user_defined_lower: None,
            user_defined_upper: None,
            row_separators: false,
            label_width_px: DEFAULT_LABEL_WIDTH_PX,
            time_line: TimeLine::default(),
            generation: 0,
            next_observer_id: 0,
            observers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_day_width(mut self, day_width: f64) -> Self {
        self.day_width = clamp_day_width(day_width);
        self
    }

    #[must_use]
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    #[must_use]
    pub fn with_free_days(mut self, free_days: FreeDays) -> Self {
        self.free_days = free_days;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_user_defined_scales(
        mut self,
        lower: Option<DateTimeScaleFormatter>,
        upper: Option<DateTimeScaleFormatter>,
    ) -> Self {
        self.user_defined_lower = lower;
        self.user_defined_upper = upper;
        self
    }

    #[must_use]
    pub fn with_row_separators(mut self, enabled: bool) -> Self {
        self.row_separators = enabled;
        self
    }

    #[must_use]
    pub fn with_label_width_px(mut self, label_width_px: f64) -> Self {
        self.label_width_px = clamp_label_width(label_width_px);
        self
    }

    #[must_use]
    pub fn with_time_line(mut self, time_line: TimeLine) -> Self {
        self.time_line = time_line;
        self
    }

    #[must_use]
    pub fn start_date_time(&self) -> NaiveDateTime {
        self.start_date_time
    }

    pub fn set_start_date_time(&mut self, start_date_time: NaiveDateTime) {
        if self.start_date_time == start_date_time {
            return;
        }
        self.start_date_time = start_date_time;
        self.notify(GridChange::StartDateTime);
    }

    #[must_use]
    pub fn day_width(&self) -> f64 {
        self.day_width
    }

    /// Sets pixels per day, clamping degenerate values to [`MIN_DAY_WIDTH`].
    pub fn set_day_width(&mut self, day_width: f64) {
        let day_width = clamp_day_width(day_width);
        if self.day_width == day_width {
            return;
        }
        self.day_width = day_width;
        self.notify(GridChange::DayWidth);
    }

    #[must_use]
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn set_week_start(&mut self, week_start: Weekday) {
        if self.week_start == week_start {
            return;
        }
        self.week_start = week_start;
        self.notify(GridChange::WeekStart);
    }

    #[must_use]
    pub fn free_days(&self) -> FreeDays {
        self.free_days
    }

    pub fn set_free_days(&mut self, free_days: FreeDays) {
        if self.free_days == free_days {
            return;
        }
        self.free_days = free_days;
        self.notify(GridChange::FreeDays);
    }

    #[must_use]
    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Scale) {
        if self.scale == scale {
            return;
        }
        self.scale = scale;
        self.notify(GridChange::Scale);
    }

    #[must_use]
    pub fn user_defined_lower_scale(&self) -> Option<&DateTimeScaleFormatter> {
        self.user_defined_lower.as_ref()
    }

    #[must_use]
    pub fn user_defined_upper_scale(&self) -> Option<&DateTimeScaleFormatter> {
        self.user_defined_upper.as_ref()
    }

    pub fn set_user_defined_lower_scale(&mut self, formatter: Option<DateTimeScaleFormatter>) {
        if self.user_defined_lower == formatter {
            return;
        }
        self.user_defined_lower = formatter;
        self.notify(GridChange::UserDefinedScales);
    }

    pub fn set_user_defined_upper_scale(&mut self, formatter: Option<DateTimeScaleFormatter>) {
        if self.user_defined_upper == formatter {
            return;
        }
        self.user_defined_upper = formatter;
        self.notify(GridChange::UserDefinedScales);
    }

    #[must_use]
    pub fn row_separators(&self) -> bool {
        self.row_separators
    }

    pub fn set_row_separators(&mut self, enabled: bool) {
        if self.row_separators == enabled {
            return;
        }
        self.row_separators = enabled;
        self.notify(GridChange::RowSeparators);
    }

    #[must_use]
    pub fn label_width_px(&self) -> f64 {
        self.label_width_px
    }

    /// Sets the label width driving [`Scale::Auto`] resolution.
    pub fn set_label_width_px(&mut self, label_width_px: f64) {
        let label_width_px = clamp_label_width(label_width_px);
        if self.label_width_px == label_width_px {
            return;
        }
        self.label_width_px = label_width_px;
        self.notify(GridChange::LabelWidth);
    }

    #[must_use]
    pub fn time_line(&self) -> TimeLine {
        self.time_line
    }

    pub fn set_time_line(&mut self, time_line: TimeLine) {
        if self.time_line == time_line {
            return;
        }
        self.time_line = time_line;
        self.notify(GridChange::TimeLine);
    }

    /// Counter bumped on every effective change; cheap staleness check for
    /// hosts that cache derived layout.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: Fn(GridChange) + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    fn notify(&mut self, change: GridChange) {
        self.generation = self.generation.wrapping_add(1);
        trace!(?change, generation = self.generation, "date time grid changed");
        for (_, observer) in &self.observers {
            observer(change);
        }
    }

    #[must_use]
    pub fn map_from_date_time(&self, date_time: NaiveDateTime) -> f64 {
        let elapsed = date_time.signed_duration_since(self.start_date_time);
        elapsed.num_milliseconds() as f64 / MILLIS_PER_DAY * self.day_width
    }

    /// Inverse of [`Self::map_from_date_time`], rounded to the nearest millisecond.
    ///
    /// Exact for timestamps within [`EXACT_ROUND_TRIP_SPAN_MS`] of the start.
    pub fn map_to_date_time(&self, x: f64) -> GanttResult<NaiveDateTime> {
        if !x.is_finite() {
            return Err(GanttError::InvalidData(
                "pixel coordinate must be finite".to_owned(),
            ));
        }

        let millis = (x / self.day_width * MILLIS_PER_DAY).round();
        if millis.abs() >= i64::MAX as f64 {
            return Err(GanttError::OutOfRange(format!(
                "pixel {x} is too far from the grid start"
            )));
        }
        TimeDelta::try_milliseconds(millis as i64)
            .and_then(|delta| self.start_date_time.checked_add_signed(delta))
            .ok_or_else(|| {
                GanttError::OutOfRange(format!(
                    "pixel {x} maps outside the representable calendar"
                ))
            })
    }

    /// Horizontal span of an item running from `start` to `end`.
    ///
    /// An `end` before `start` yields a zero-length span at `start`.
    #[must_use]
    pub fn map_to_chart(&self, start: NaiveDateTime, end: NaiveDateTime) -> Span {
        let x_start = self.map_from_date_time(start);
        let x_end = self.map_from_date_time(end).max(x_start);
        Span::new(x_start, x_end - x_start)
    }

    /// Start/end timestamps of an item drawn over `span`.
    pub fn map_from_chart(&self, span: Span) -> GanttResult<(NaiveDateTime, NaiveDateTime)> {
        if !span.is_valid() {
            return Err(GanttError::InvalidData(
                "item span must be finite with length >= 0".to_owned(),
            ));
        }
        Ok((
            self.map_to_date_time(span.start)?,
            self.map_to_date_time(span.end())?,
        ))
    }

    #[must_use]
    pub fn compute_span(&self, from: NaiveDateTime, to: NaiveDateTime) -> Span {
        self.map_to_chart(from, to)
    }

    /// Timestamps covered by the pixel interval, ordered earliest first.
    pub fn date_time_range(
        &self,
        x_from: f64,
        x_to: f64,
    ) -> GanttResult<(NaiveDateTime, NaiveDateTime)> {
        let from = self.map_to_date_time(x_from)?;
        let to = self.map_to_date_time(x_to)?;
        Ok((from.min(to), from.max(to)))
    }

    #[must_use]
    pub fn is_free_day(&self, date: NaiveDate) -> bool {
        self.free_days.contains(date.weekday())
    }

    /// Scale used for headers after resolving [`Scale::Auto`].
    #[must_use]
    pub fn effective_scale(&self) -> Scale {
        match self.scale {
            Scale::Auto => resolve_auto_scale(self.day_width, self.label_width_px),
            scale => scale,
        }
    }

    /// Lower and upper header formatters for the effective scale.
    ///
    /// A missing user-defined formatter falls back to the `Day` scale default
    /// for that row. Both formatters always use the grid's week start.
    #[must_use]
    pub fn formatters(&self) -> (DateTimeScaleFormatter, DateTimeScaleFormatter) {
        let scale = self.effective_scale();
        let (default_lower, default_upper) = default_formatters(scale, self.week_start);
        if scale != Scale::UserDefined {
            return (default_lower, default_upper);
        }

        let lower = self.user_defined_lower.clone().map_or_else(
            || {
                debug!("user-defined lower scale missing, using day scale");
                default_lower
            },
            |formatter| formatter.with_week_start(self.week_start),
        );
        let upper = self.user_defined_upper.clone().map_or_else(
            || {
                debug!("user-defined upper scale missing, using day scale");
                default_upper
            },
            |formatter| formatter.with_week_start(self.week_start),
        );
        (lower, upper)
    }

    #[must_use]
    pub fn formatter_for(&self, row: HeaderRow) -> DateTimeScaleFormatter {
        let (lower, upper) = self.formatters();
        match row {
            HeaderRow::Lower => lower,
            HeaderRow::Upper => upper,
        }
    }

    /// Calendar days overlapping `[x_from, x_to]`, with free-day flags.
    pub fn visible_days(&self, x_from: f64, x_to: f64) -> GanttResult<Vec<DayCell>> {
        let (from, to) = self.date_time_range(x_from, x_to)?;
        let mut cells = Vec::new();
        let mut day = from.date();

        loop {
            let begin = day.and_time(NaiveTime::MIN);
            if !cells.is_empty() && begin >= to {
                break;
            }
            if cells.len() >= MAX_CELLS_PER_QUERY {
                warn!(limit = MAX_CELLS_PER_QUERY, "visible day query truncated");
                break;
            }

            let next = day.succ_opt();
            let x = self.map_from_date_time(begin);
            let x_end = next
                .map(|next| self.map_from_date_time(next.and_time(NaiveTime::MIN)))
                .unwrap_or(x + self.day_width);
            cells.push(DayCell {
                date: day,
                x,
                width: x_end - x,
                is_free: self.is_free_day(day),
            });

            match next {
                Some(next) => day = next,
                None => break,
            }
        }

        Ok(cells)
    }

    /// Header cells of `row` overlapping `[x_from, x_to]`.
    ///
    /// Cells are contiguous: each one starts where the previous one ends.
    pub fn header_cells(
        &self,
        row: HeaderRow,
        x_from: f64,
        x_to: f64,
    ) -> GanttResult<Vec<HeaderCell>> {
        let formatter = self.formatter_for(row);
        let (from, to) = self.date_time_range(x_from, x_to)?;
        let mut cells = Vec::new();
        let mut begin = formatter.current_range_begin(from);

        loop {
            if !cells.is_empty() && begin >= to {
                break;
            }
            if cells.len() >= MAX_CELLS_PER_QUERY {
                warn!(
                    ?row,
                    range = ?formatter.range(),
                    limit = MAX_CELLS_PER_QUERY,
                    "header cell query truncated"
                );
                break;
            }

            let next = formatter.next_range_begin(begin).ok();
            let x = self.map_from_date_time(begin);
            let x_end = next
                .map(|next| self.map_from_date_time(next))
                .unwrap_or(x + formatter.range().approximate_days() * self.day_width);
            cells.push(HeaderCell {
                begin,
                x,
                width: x_end - x,
                text: formatter.text(begin),
                alignment: formatter.alignment(),
            });

            match next {
                Some(next) => begin = next,
                None => break,
            }
        }

        Ok(cells)
    }

    /// Scene x of the time line, or `None` when it is disabled.
    #[must_use]
    pub fn time_line_position(&self, now: NaiveDateTime) -> Option<f64> {
        self.time_line
            .resolve(now)
            .map(|date_time| self.map_from_date_time(date_time))
    }
}

fn clamp_day_width(day_width: f64) -> f64 {
    if day_width.is_finite() && day_width >= MIN_DAY_WIDTH {
        return day_width;
    }
    debug!(requested = day_width, min = MIN_DAY_WIDTH, "clamping day width");
    MIN_DAY_WIDTH
}

fn clamp_label_width(label_width_px: f64) -> f64 {
    if label_width_px.is_finite() && label_width_px >= MIN_LABEL_WIDTH_PX {
        return label_width_px;
    }
    debug!(
        requested = label_width_px,
        min = MIN_LABEL_WIDTH_PX,
        "clamping auto-scale label width"
    );
    MIN_LABEL_WIDTH_PX
}
