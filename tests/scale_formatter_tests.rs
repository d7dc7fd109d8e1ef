use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use gantt_grid::GanttError;
use gantt_grid::core::{Alignment, DateTimeScaleFormatter, Range};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, s)
        .expect("valid time")
}

fn formatter(range: Range) -> DateTimeScaleFormatter {
    DateTimeScaleFormatter::new(range, "%Y-%m-%d %H:%M:%S")
}

#[test]
fn sub_day_ranges_truncate_and_advance() {
    let t = NaiveDate::from_ymd_opt(2010, 1, 13)
        .expect("date")
        .and_hms_milli_opt(15, 30, 45, 500)
        .expect("time");

    let second = formatter(Range::Second);
    assert_eq!(second.current_range_begin(t), at(2010, 1, 13, 15, 30, 45));
    assert_eq!(
        second.next_range_begin(t).expect("next second"),
        at(2010, 1, 13, 15, 30, 46)
    );

    let minute = formatter(Range::Minute);
    assert_eq!(minute.current_range_begin(t), at(2010, 1, 13, 15, 30, 0));
    assert_eq!(
        minute.next_range_begin(t).expect("next minute"),
        at(2010, 1, 13, 15, 31, 0)
    );

    let hour = formatter(Range::Hour);
    assert_eq!(hour.current_range_begin(t), at(2010, 1, 13, 15, 0, 0));
    assert_eq!(
        hour.next_range_begin(t).expect("next hour"),
        at(2010, 1, 13, 16, 0, 0)
    );
}

#[test]
fn day_range_crosses_year_end() {
    let day = formatter(Range::Day);
    let t = at(2009, 12, 31, 23, 59, 59);

    assert_eq!(day.current_range_begin(t), at(2009, 12, 31, 0, 0, 0));
    assert_eq!(
        day.next_range_begin(t).expect("next day"),
        at(2010, 1, 1, 0, 0, 0)
    );
}

#[test]
fn week_range_starts_on_configured_weekday() {
    // 2010-01-13 is a Wednesday.
    let t = at(2010, 1, 13, 9, 0, 0);

    let monday = formatter(Range::Week);
    assert_eq!(monday.current_range_begin(t), at(2010, 1, 11, 0, 0, 0));
    assert_eq!(
        monday.next_range_begin(t).expect("next week"),
        at(2010, 1, 18, 0, 0, 0)
    );

    let sunday = formatter(Range::Week).with_week_start(Weekday::Sun);
    assert_eq!(sunday.current_range_begin(t), at(2010, 1, 10, 0, 0, 0));
    assert_eq!(
        sunday.next_range_begin(t).expect("next week"),
        at(2010, 1, 17, 0, 0, 0)
    );
}

#[test]
fn month_and_year_ranges_are_calendar_aware() {
    let month = formatter(Range::Month);
    assert_eq!(
        month.current_range_begin(at(2010, 2, 17, 8, 0, 0)),
        at(2010, 2, 1, 0, 0, 0)
    );
    assert_eq!(
        month
            .next_range_begin(at(2010, 2, 17, 8, 0, 0))
            .expect("next month"),
        at(2010, 3, 1, 0, 0, 0)
    );
    assert_eq!(
        month
            .next_range_begin(at(2010, 1, 31, 0, 0, 0))
            .expect("next month"),
        at(2010, 2, 1, 0, 0, 0)
    );

    let year = formatter(Range::Year);
    assert_eq!(
        year.current_range_begin(at(2012, 7, 4, 0, 0, 0)),
        at(2012, 1, 1, 0, 0, 0)
    );
    assert_eq!(
        year.next_range_begin(at(2012, 7, 4, 0, 0, 0))
            .expect("next year"),
        at(2013, 1, 1, 0, 0, 0)
    );
}

#[test]
fn next_range_after_calendar_end_is_out_of_range() {
    let day = formatter(Range::Day);
    let err = day
        .next_range_begin(NaiveDate::MAX.and_time(NaiveTime::MIN))
        .expect_err("no day after the last representable day");
    assert!(matches!(err, GanttError::OutOfRange(_)));
}

#[test]
fn format_uses_strftime_placeholders() {
    let t = at(2010, 1, 13, 15, 30, 0);

    assert_eq!(
        DateTimeScaleFormatter::new(Range::Day, "%Y-%m-%d").format(t),
        "2010-01-13"
    );
    assert_eq!(DateTimeScaleFormatter::new(Range::Day, "%a").format(t), "Wed");
    assert_eq!(
        DateTimeScaleFormatter::new(Range::Month, "%B %Y").format(t),
        "January 2010"
    );
    assert_eq!(DateTimeScaleFormatter::new(Range::Hour, "%H:%M").format(t), "15:30");
    assert_eq!(DateTimeScaleFormatter::new(Range::Week, "%V").format(t), "02");
}

#[test]
fn text_wraps_formatted_value_in_template() {
    let t = at(2010, 1, 13, 0, 0, 0);
    let week = DateTimeScaleFormatter::new(Range::Week, "%V").with_template("Week {}");
    assert_eq!(week.text(t), "Week 02");

    let repeated = DateTimeScaleFormatter::new(Range::Day, "%d").with_template("{}/{}");
    assert_eq!(repeated.text(t), "13/13");

    let plain = DateTimeScaleFormatter::new(Range::Day, "%d");
    assert_eq!(plain.text(t), plain.format(t));
}

#[test]
fn malformed_templates_render_literally() {
    let t = at(2010, 1, 13, 0, 0, 0);

    let unknown = DateTimeScaleFormatter::new(Range::Day, "%J-%d");
    assert_eq!(unknown.text(t), "%J-%d");

    let zone_on_naive = DateTimeScaleFormatter::new(Range::Day, "%d %z");
    assert_eq!(zone_on_naive.text(t), "%d %z");

    let no_placeholder = DateTimeScaleFormatter::new(Range::Day, "%d").with_template("Header");
    assert_eq!(no_placeholder.text(t), "Header");
}

#[test]
fn accessors_report_construction_values() {
    let formatter = DateTimeScaleFormatter::new(Range::Month, "%b")
        .with_template("[{}]")
        .with_alignment(Alignment::Right)
        .with_week_start(Weekday::Sat);

    assert_eq!(formatter.range(), Range::Month);
    assert_eq!(formatter.format_string(), "%b");
    assert_eq!(formatter.template(), Some("[{}]"));
    assert_eq!(formatter.alignment(), Alignment::Right);
    assert_eq!(formatter.week_start(), Weekday::Sat);

    let defaults = DateTimeScaleFormatter::new(Range::Day, "%d");
    assert_eq!(defaults.alignment(), Alignment::Center);
    assert_eq!(defaults.week_start(), Weekday::Mon);
    assert_eq!(defaults.template(), None);
}
