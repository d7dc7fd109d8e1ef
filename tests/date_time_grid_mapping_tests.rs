use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use gantt_grid::GanttError;
use gantt_grid::core::{DateTimeGrid, EXACT_ROUND_TRIP_SPAN_MS, MIN_DAY_WIDTH, Span};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, s)
        .expect("valid time")
}

fn grid_2010(day_width: f64) -> DateTimeGrid {
    DateTimeGrid::new(at(2010, 1, 1, 0, 0, 0)).with_day_width(day_width)
}

#[test]
fn ten_days_at_ten_pixels_maps_to_one_hundred() {
    let grid = grid_2010(10.0);

    let x = grid.map_from_date_time(at(2010, 1, 11, 0, 0, 0));
    assert_relative_eq!(x, 100.0);

    let back = grid.map_to_date_time(100.0).expect("pixel to date time");
    assert_eq!(back, at(2010, 1, 11, 0, 0, 0));
}

#[test]
fn fractional_days_map_proportionally() {
    let grid = grid_2010(10.0);

    assert_relative_eq!(grid.map_from_date_time(at(2010, 1, 1, 12, 0, 0)), 5.0);
    assert_relative_eq!(grid.map_from_date_time(at(2010, 1, 1, 6, 0, 0)), 2.5);
    assert_eq!(
        grid.map_to_date_time(2.5).expect("quarter day"),
        at(2010, 1, 1, 6, 0, 0)
    );
}

#[test]
fn timestamps_before_start_map_to_negative_pixels() {
    let grid = grid_2010(10.0);

    assert_relative_eq!(grid.map_from_date_time(at(2009, 12, 31, 0, 0, 0)), -10.0);
    assert_eq!(
        grid.map_to_date_time(-10.0).expect("negative pixel"),
        at(2009, 12, 31, 0, 0, 0)
    );
}

#[test]
fn moving_start_shifts_the_mapping() {
    let mut grid = grid_2010(10.0);
    grid.set_start_date_time(at(2010, 1, 6, 0, 0, 0));

    assert_relative_eq!(grid.map_from_date_time(at(2010, 1, 11, 0, 0, 0)), 50.0);
    assert_relative_eq!(grid.map_from_date_time(at(2010, 1, 6, 0, 0, 0)), 0.0);
}

#[test]
fn non_finite_pixel_is_rejected() {
    let grid = grid_2010(10.0);

    for pixel in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = grid
            .map_to_date_time(pixel)
            .expect_err("non-finite pixel must fail");
        assert!(matches!(err, GanttError::InvalidData(_)));
    }
}

#[test]
fn pixels_beyond_the_calendar_are_out_of_range() {
    let grid = grid_2010(10.0);
    let err = grid
        .map_to_date_time(1.0e9)
        .expect_err("1e8 days past 2010 is beyond chrono's calendar");
    assert!(matches!(err, GanttError::OutOfRange(_)));

    let narrow = grid_2010(MIN_DAY_WIDTH);
    let err = narrow
        .map_to_date_time(1.0e12)
        .expect_err("millisecond count overflows i64");
    assert!(matches!(err, GanttError::OutOfRange(_)));
}

#[test]
fn degenerate_day_widths_clamp_to_minimum() {
    let mut grid = grid_2010(10.0);

    for width in [0.0, -4.0, f64::NAN, f64::INFINITY, MIN_DAY_WIDTH / 2.0] {
        grid.set_day_width(width);
        assert_eq!(grid.day_width(), MIN_DAY_WIDTH, "width {width}");
    }

    let early = grid.map_from_date_time(at(2010, 1, 2, 0, 0, 0));
    let late = grid.map_from_date_time(at(2010, 1, 3, 0, 0, 0));
    assert!(late > early);
    assert_relative_eq!(early, MIN_DAY_WIDTH);
}

#[test]
fn item_span_covers_start_to_end() {
    let grid = grid_2010(10.0);

    let span = grid.map_to_chart(at(2010, 1, 2, 0, 0, 0), at(2010, 1, 4, 0, 0, 0));
    assert_relative_eq!(span.start, 10.0);
    assert_relative_eq!(span.length, 20.0);
    assert_relative_eq!(span.end(), 30.0);

    let (start, end) = grid.map_from_chart(span).expect("span to date times");
    assert_eq!(start, at(2010, 1, 2, 0, 0, 0));
    assert_eq!(end, at(2010, 1, 4, 0, 0, 0));
}

#[test]
fn reversed_item_collapses_to_zero_length() {
    let grid = grid_2010(10.0);

    let span = grid.map_to_chart(at(2010, 1, 5, 0, 0, 0), at(2010, 1, 3, 0, 0, 0));
    assert_relative_eq!(span.start, 40.0);
    assert_eq!(span.length, 0.0);
    assert_eq!(
        grid.compute_span(at(2010, 1, 5, 0, 0, 0), at(2010, 1, 3, 0, 0, 0)),
        span
    );
}

#[test]
fn invalid_item_span_is_rejected() {
    let grid = grid_2010(10.0);

    let err = grid
        .map_from_chart(Span::new(10.0, -1.0))
        .expect_err("negative length must fail");
    assert!(matches!(err, GanttError::InvalidData(_)));
}

#[test]
fn date_time_range_is_ordered() {
    let grid = grid_2010(10.0);

    let (from, to) = grid.date_time_range(50.0, 0.0).expect("range");
    assert_eq!(from, at(2010, 1, 1, 0, 0, 0));
    assert_eq!(to, at(2010, 1, 6, 0, 0, 0));
}

#[test]
fn round_trip_is_exact_within_the_exact_span() {
    let start = at(2010, 1, 1, 0, 0, 0);
    let offset = TimeDelta::try_milliseconds(EXACT_ROUND_TRIP_SPAN_MS - 1).expect("offset");

    for day_width in [1.0, 3.7, 100.0] {
        let grid = DateTimeGrid::new(start).with_day_width(day_width);
        for t in [start + offset, start - offset] {
            let back = grid
                .map_to_date_time(grid.map_from_date_time(t))
                .expect("round trip");
            assert_eq!(back, t, "width {day_width}");
        }
    }
}

#[test]
fn round_trip_drift_between_calendar_extremes_stays_bounded() {
    let start = at(-200_000, 1, 1, 0, 0, 0);
    let t = NaiveDate::from_ymd_opt(200_000, 6, 1)
        .expect("valid date")
        .and_hms_milli_opt(13, 7, 9, 123)
        .expect("valid time");
    let offset_ms = (t - start).num_milliseconds() as f64;
    assert!(offset_ms > EXACT_ROUND_TRIP_SPAN_MS as f64);

    for day_width in [1.0, 3.7, 100.0] {
        let grid = DateTimeGrid::new(start).with_day_width(day_width);
        let back = grid
            .map_to_date_time(grid.map_from_date_time(t))
            .expect("round trip");
        let drift_ms = (back - t).num_milliseconds().abs() as f64;
        assert!(
            drift_ms <= 1.0 + offset_ms * 8.0 * f64::EPSILON,
            "width {day_width}: drift {drift_ms} ms"
        );
    }
}
