use gantt_rs::api::{GanttChart, GanttChartConfig};
use gantt_rs::core::{PeriodTable, TimeWindow, compute_window};

const JAN_10_2022: i64 = 1_641_772_800;
const JAN_15_2022: i64 = 1_642_204_800;
const JAN_20_2022: i64 = 1_642_636_800;
const DAY: i64 = 86_400;

#[test]
fn days_window_rounds_to_midnight_on_both_sides() {
    let table = PeriodTable::default();
    let days = table.require("days").expect("days period");

    let window = compute_window(JAN_15_2022, days).expect("window");
    assert_eq!(window, TimeWindow::new(JAN_10_2022, JAN_20_2022));

    // Mid-day anchors round outward.
    let window = compute_window(JAN_15_2022 + 10 * 3_600, days).expect("window");
    assert_eq!(window, TimeWindow::new(JAN_10_2022, JAN_20_2022 + DAY));
}

#[test]
fn weeks_window_snaps_to_sundays() {
    let table = PeriodTable::default();
    let weeks = table.require("weeks").expect("weeks period");

    let window = compute_window(JAN_15_2022, weeks).expect("window");
    assert_eq!(window.start, 1_639_267_200); // Sun 2021-12-12
    assert_eq!(window.end, 1_645_315_200); // Sun 2022-02-20
}

#[test]
fn anchor_stays_inside_every_default_window() {
    let table = PeriodTable::default();
    for name in table.names() {
        let period = table.require(name).expect("period");
        for anchor in [0, JAN_15_2022 + 12_345, -3 * 365 * DAY + 17] {
            let window = compute_window(anchor, period).expect("window");
            assert!(window.start <= anchor, "{name}: start after anchor");
            assert!(anchor <= window.end, "{name}: end before anchor");
            assert!(window.is_valid(), "{name}: empty window");
        }
    }
}

#[test]
fn period_offsets_stop_at_table_ends() {
    let table = PeriodTable::default();
    assert_eq!(
        table.offset_from("days", -1).map(|period| period.name.as_str()),
        Some("hours")
    );
    assert!(table.offset_from("hours", -1).is_none());
    assert!(table.offset_from("years", 1).is_none());
    assert!(table.offset_from("fortnights", 1).is_none());
}

#[test]
fn chart_zoom_walks_the_period_table() {
    let mut chart = GanttChart::new(GanttChartConfig::new(JAN_15_2022)).expect("chart init");
    assert_eq!(chart.period_name(), "days");

    assert!(chart.zoom_in());
    assert_eq!(chart.period_name(), "hours");
    assert!(!chart.zoom_in());
    assert_eq!(chart.period_name(), "hours");

    for _ in 0..5 {
        assert!(chart.zoom_out());
    }
    assert_eq!(chart.period_name(), "years");
    assert!(!chart.zoom_out());
    assert!(!chart.step_period(3));
    assert_eq!(chart.period_name(), "years");
}

#[test]
fn unknown_period_name_leaves_timeline_untouched() {
    let mut chart = GanttChart::new(GanttChartConfig::new(JAN_15_2022)).expect("chart init");
    let before = chart.timeline().clone();

    assert!(!chart.set_period("fortnights"));
    assert_eq!(chart.timeline(), &before);
}

#[test]
fn unknown_initial_period_is_rejected() {
    let config = GanttChartConfig::new(JAN_15_2022).with_period("fortnights");
    assert!(GanttChart::new(config).is_err());
}

#[test]
fn moving_the_anchor_recomputes_the_window() {
    let mut chart = GanttChart::new(GanttChartConfig::new(JAN_15_2022)).expect("chart init");
    assert_eq!(chart.anchor_scroll_offset(), 800.0);

    chart.set_anchor(JAN_15_2022 + 3 * DAY).expect("set anchor");
    assert_eq!(
        chart.timeline().window(),
        TimeWindow::new(JAN_10_2022 + 3 * DAY, JAN_20_2022 + 3 * DAY)
    );
    assert_eq!(chart.anchor_scroll_offset(), 800.0);
}
