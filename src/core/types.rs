use chrono::Weekday;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One-dimensional pixel interval.
///
/// Used for horizontal item spans on the grid and for vertical row geometry
/// supplied by a [`crate::core::RowController`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: f64,
    pub length: f64,
}

impl Span {
    #[must_use]
    pub const fn new(start: f64, length: f64) -> Self {
        Self { start, length }
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.start + self.length
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.start.is_finite() && self.length.is_finite() && self.length >= 0.0
    }
}

/// Axis-aligned rectangle in scene pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Integer viewport covering this rect, used to size render frames.
    #[must_use]
    pub fn viewport(self) -> Viewport {
        let width = if self.width.is_finite() && self.width > 0.0 {
            self.width.ceil().min(f64::from(u32::MAX)) as u32
        } else {
            0
        };
        let height = if self.height.is_finite() && self.height > 0.0 {
            self.height.ceil().min(f64::from(u32::MAX)) as u32
        } else {
            0
        };
        Viewport::new(width, height)
    }
}

/// Horizontal placement of header text inside its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Set of weekdays rendered as free days (weekends, holidays).
///
/// Stored as a 7-bit mask indexed by days from Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct FreeDays {
    mask: u8,
}

impl FreeDays {
    #[must_use]
    pub const fn none() -> Self {
        Self { mask: 0 }
    }

    /// Saturday and Sunday.
    #[must_use]
    pub fn weekend() -> Self {
        Self::from_days([Weekday::Sat, Weekday::Sun])
    }

    #[must_use]
    pub fn from_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut set = Self::none();
        for day in days {
            set.insert(day);
        }
        set
    }

    pub fn insert(&mut self, day: Weekday) {
        self.mask |= Self::bit(day);
    }

    pub fn remove(&mut self, day: Weekday) {
        self.mask &= !Self::bit(day);
    }

    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.mask & Self::bit(day) != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.mask == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Members in Monday-first order.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        let mut day = Weekday::Mon;
        (0..7).filter_map(move |_| {
            let current = day;
            day = day.succ();
            self.contains(current).then_some(current)
        })
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }
}

impl Default for FreeDays {
    fn default() -> Self {
        Self::weekend()
    }
}

impl From<Vec<Weekday>> for FreeDays {
    fn from(days: Vec<Weekday>) -> Self {
        Self::from_days(days)
    }
}

impl From<FreeDays> for Vec<Weekday> {
    fn from(days: FreeDays) -> Self {
        days.iter().collect()
    }
}
