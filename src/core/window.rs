use crate::core::calendar::{add_units, round_down, round_up};
use crate::core::period::Period;
use crate::core::types::{TimeWindow, Timestamp};
use crate::error::GanttResult;

/// Computes the visible window around `anchor` for `period`.
///
/// `start = round_down(anchor - before)`, `end = round_up(anchor + after)`.
/// The result may be degenerate (`end <= start`); callers check
/// [`TimeWindow::is_valid`] before deriving geometry from it.
pub fn compute_window(anchor: Timestamp, period: &Period) -> GanttResult<TimeWindow> {
    let before = add_units(
        anchor,
        period.window_before.unit,
        period.window_before.amount.saturating_neg(),
    )?;
    let after = add_units(anchor, period.window_after.unit, period.window_after.amount)?;

    let start = round_down(before, period.rounding_boundary)?;
    let end = round_up(after, period.rounding_boundary)?;
    Ok(TimeWindow::new(start, end))
}
