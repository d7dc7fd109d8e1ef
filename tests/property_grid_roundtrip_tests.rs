use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use gantt_grid::core::DateTimeGrid;
use proptest::prelude::*;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

fn offset(ms: i64) -> NaiveDateTime {
    base() + TimeDelta::try_milliseconds(ms).expect("offset within TimeDelta range")
}

// About 95 years either side of the base.
const SPAN_MS: i64 = 3_000_000_000_000;
// Just inside chrono's calendar, roughly 253,000 years either side of 1970.
const CALENDAR_EDGE_MS: i64 = 8_000_000_000_000_000;

fn from_unix_ms(ms: i64) -> NaiveDateTime {
    DateTime::from_timestamp_millis(ms)
        .expect("timestamp within chrono range")
        .naive_utc()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn map_round_trip_is_exact_at_millisecond_resolution(
        start_ms in -SPAN_MS..SPAN_MS,
        delta_ms in -SPAN_MS..SPAN_MS,
        day_width in 0.01f64..5_000.0,
    ) {
        let grid = DateTimeGrid::new(offset(start_ms)).with_day_width(day_width);
        let t = offset(start_ms) + TimeDelta::try_milliseconds(delta_ms).expect("delta");

        let x = grid.map_from_date_time(t);
        prop_assert!(x.is_finite());
        let back = grid.map_to_date_time(x).expect("pixel back to date time");
        prop_assert_eq!(back, t);
    }

    #[test]
    fn map_round_trip_error_is_bounded_across_the_calendar(
        start_ms in -CALENDAR_EDGE_MS..CALENDAR_EDGE_MS,
        t_ms in -CALENDAR_EDGE_MS..CALENDAR_EDGE_MS,
        day_width in 0.01f64..5_000.0,
    ) {
        let start = from_unix_ms(start_ms);
        let t = from_unix_ms(t_ms);
        let grid = DateTimeGrid::new(start).with_day_width(day_width);

        let back = grid
            .map_to_date_time(grid.map_from_date_time(t))
            .expect("pixel back to date time");
        let offset_ms = (t - start).num_milliseconds() as f64;
        let drift_ms = (back - t).num_milliseconds().abs() as f64;
        prop_assert!(drift_ms <= 1.0 + offset_ms.abs() * 8.0 * f64::EPSILON);
    }

    #[test]
    fn pixel_round_trip_stays_within_one_millisecond(
        start_ms in -SPAN_MS..SPAN_MS,
        x in -1.0e6f64..1.0e6,
        day_width in 1.0f64..2_000.0,
    ) {
        let grid = DateTimeGrid::new(offset(start_ms)).with_day_width(day_width);

        let t = grid.map_to_date_time(x).expect("pixel to date time");
        let x_back = grid.map_from_date_time(t);
        let one_ms_px = day_width / 86_400_000.0;
        prop_assert!((x_back - x).abs() <= one_ms_px * 0.5 + 1e-9);
    }

    #[test]
    fn mapping_is_strictly_monotonic(
        start_ms in -SPAN_MS..SPAN_MS,
        first_ms in -SPAN_MS..SPAN_MS,
        gap_ms in 60_000i64..10_000_000_000,
        day_width in 1.0f64..5_000.0,
    ) {
        let grid = DateTimeGrid::new(offset(start_ms)).with_day_width(day_width);
        let earlier = offset(first_ms);
        let later = earlier + TimeDelta::try_milliseconds(gap_ms).expect("gap");

        prop_assert!(grid.map_from_date_time(earlier) < grid.map_from_date_time(later));
    }
}
