pub mod date_time_grid;
pub mod range;
pub mod row_controller;
pub mod scale;
pub mod scale_formatter;
pub mod time_line;
pub mod types;

pub use date_time_grid::{
    DEFAULT_DAY_WIDTH, DEFAULT_LABEL_WIDTH_PX, DateTimeGrid, DayCell, EXACT_ROUND_TRIP_SPAN_MS,
    GridChange, HeaderCell, MAX_CELLS_PER_QUERY, MIN_DAY_WIDTH, MIN_LABEL_WIDTH_PX, ObserverId,
};
pub use range::Range;
pub use row_controller::RowController;
pub use scale::{HeaderRow, Scale, default_formatters, resolve_auto_scale};
pub use scale_formatter::DateTimeScaleFormatter;
pub use time_line::TimeLine;
pub use types::{Alignment, FreeDays, Rect, Span, Viewport};
