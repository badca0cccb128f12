use gantt_rs::core::{Axis, PeriodTable, build_axis, compute_window};

const JAN_15_2022: i64 = 1_642_204_800;

fn axis_for(period_name: &str, anchor: i64) -> Axis {
    let table = PeriodTable::default();
    let period = table.require(period_name).expect("period");
    let window = compute_window(anchor, period).expect("window");
    build_axis(window, period, 40.0)
}

fn assert_contiguous(axis: &Axis) {
    let sum: f64 = axis.primary.iter().map(|tick| tick.pixel_width).sum();
    assert!((sum - axis.total_width_px).abs() <= 1e-9);
    for pair in axis.primary.windows(2) {
        assert!((pair[1].pixel_offset - (pair[0].pixel_offset + pair[0].pixel_width)).abs() <= 1e-9);
    }
}

#[test]
fn days_axis_has_one_primary_tick_per_day() {
    let axis = axis_for("days", JAN_15_2022);

    assert_eq!(axis.primary.len(), 10);
    assert_eq!(axis.primary_unit_width_px, 160.0);
    assert_eq!(axis.total_width_px, 1_600.0);
    assert_eq!(axis.primary[0].label, "Mon 10 Jan 2022");
    assert_eq!(axis.primary[9].label, "Wed 19 Jan 2022");
    assert_contiguous(&axis);

    assert_eq!(axis.secondary.len(), 40);
    assert_eq!(axis.secondary[0].label, "00:00");
    assert_eq!(axis.secondary[1].label, "06:00");
    assert_eq!(axis.secondary[39].pixel_offset, 39.0 * 40.0);
}

#[test]
fn hours_axis_uses_ten_minute_secondary_cells() {
    let axis = axis_for("hours", JAN_15_2022 + 10 * 3_600);

    assert_eq!(axis.primary.len(), 24);
    assert_eq!(axis.total_width_px, 24.0 * 240.0);
    assert_eq!(axis.secondary.len(), 144);
    assert_eq!(axis.secondary[1].label, "00:10");
    assert_contiguous(&axis);
}

#[test]
fn quarter_labels_expand_the_quarter_token() {
    let axis = axis_for("quarters", 1_652_140_800); // 2022-05-10

    assert_eq!(axis.primary.len(), 20);
    assert_eq!(axis.primary[0].label, "Q1 2020");
    assert_eq!(axis.primary[5].label, "Q2 2021");
    assert_eq!(axis.secondary.len(), 60);
    assert_eq!(axis.secondary[0].label, "Jan");
}

#[test]
fn secondary_ticks_are_clipped_to_the_primary_row() {
    let axis = axis_for("months", JAN_15_2022);

    assert_eq!(axis.primary.len(), 36);
    // 156 whole weeks fit in the window, but only 4 per month are laid out.
    assert_eq!(axis.secondary.len(), 36 * 4);
    let last = axis.secondary.last().expect("secondary tick");
    assert!(last.pixel_offset + last.pixel_width <= axis.total_width_px);
}

#[test]
fn axis_is_deterministic() {
    assert_eq!(axis_for("weeks", JAN_15_2022), axis_for("weeks", JAN_15_2022));
}

#[test]
fn vertical_dividers_sit_inside_the_axis() {
    let axis = axis_for("days", JAN_15_2022);
    let dividers = axis.vertical_dividers();

    assert_eq!(dividers.len(), 39);
    assert_eq!(dividers.iter().filter(|divider| divider.emphasized).count(), 9);
    assert!(dividers
        .iter()
        .all(|divider| divider.pixel_offset > 0.0 && divider.pixel_offset < axis.total_width_px));
}
