use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::calendar::{add_units, format_timestamp, units_between};
use crate::core::period::Period;
use crate::core::types::{TimeWindow, Timestamp};

/// Upper bound on base cells per axis; larger windows build no axis.
pub const MAX_AXIS_CELLS: i64 = 100_000;

/// Coarse axis cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryTick {
    pub instant: Timestamp,
    pub label: String,
    pub pixel_width: f64,
    pub pixel_offset: f64,
}

/// Fine axis cell; always one base unit wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryTick {
    pub instant: Timestamp,
    pub label: String,
    pub pixel_width: f64,
    pub pixel_offset: f64,
}

/// Vertical grid line; emphasized lines sit on primary boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalDivider {
    pub pixel_offset: f64,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub primary: Vec<PrimaryTick>,
    pub secondary: Vec<SecondaryTick>,
    pub total_width_px: f64,
    pub primary_unit_width_px: f64,
    pub base_unit_width_px: f64,
    secondary_per_unit: u32,
}

impl Axis {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Interior grid lines, left to right. Offset 0 is never included.
    #[must_use]
    pub fn vertical_dividers(&self) -> Vec<VerticalDivider> {
        if self.is_empty() || self.base_unit_width_px <= 0.0 {
            return Vec::new();
        }
        let per_unit = self.secondary_per_unit.max(1) as usize;
        let cells = (self.total_width_px / self.base_unit_width_px).floor() as usize;

        (1..cells)
            .map(|index| VerticalDivider {
                pixel_offset: index as f64 * self.base_unit_width_px,
                emphasized: index % per_unit == 0,
            })
            .collect()
    }
}

/// Builds the two-tier axis for `window`.
///
/// Primary ticks enumerate `window.start + k * primary.unit` for
/// `k in 0..N`, where `N` is the count of whole primary units in the window;
/// the closing boundary is excluded. Secondary ticks follow the same scheme
/// with `step` spacing and are clipped to `N * secondary_per_unit` so they
/// never run past the primary row. Degenerate windows yield an empty axis.
#[must_use]
pub fn build_axis(window: TimeWindow, period: &Period, base_unit_width_px: f64) -> Axis {
    if !window.is_valid() || !base_unit_width_px.is_finite() || base_unit_width_px <= 0.0 {
        return Axis::empty();
    }

    let primary_count = match units_between(window.start, window.end, period.primary.unit) {
        Ok(count) if count > 0 => count,
        Ok(_) => return Axis::empty(),
        Err(err) => {
            warn!(error = %err, period = %period.name, "skipping axis for unrepresentable window");
            return Axis::empty();
        }
    };

    let secondary_per_unit = period.primary.secondary_per_unit.max(1);
    let cells = primary_count.saturating_mul(i64::from(secondary_per_unit));
    if cells > MAX_AXIS_CELLS {
        warn!(cells, period = %period.name, "skipping axis with too many cells");
        return Axis::empty();
    }
    let primary_unit_width_px = base_unit_width_px * f64::from(secondary_per_unit);

    let mut primary = Vec::with_capacity(usize::try_from(primary_count).unwrap_or(0));
    let mut offset = 0.0;
    for index in 0..primary_count {
        let Ok(instant) = add_units(window.start, period.primary.unit, index) else {
            break;
        };
        primary.push(PrimaryTick {
            instant,
            label: format_timestamp(instant, &period.primary.label_format),
            pixel_width: primary_unit_width_px,
            pixel_offset: offset,
        });
        offset += primary_unit_width_px;
    }

    let secondary = build_secondary(
        window,
        period,
        primary.len() as i64 * i64::from(secondary_per_unit),
        base_unit_width_px,
    );

    Axis {
        total_width_px: primary.len() as f64 * primary_unit_width_px,
        primary,
        secondary,
        primary_unit_width_px,
        base_unit_width_px,
        secondary_per_unit,
    }
}

fn build_secondary(
    window: TimeWindow,
    period: &Period,
    max_ticks: i64,
    base_unit_width_px: f64,
) -> Vec<SecondaryTick> {
    let step = i64::from(period.secondary.step.max(1));
    let Ok(span) = units_between(window.start, window.end, period.secondary.unit) else {
        return Vec::new();
    };
    if span <= 0 || max_ticks <= 0 {
        return Vec::new();
    }

    let available = (span + step - 1) / step;
    let count = available.min(max_ticks);
    let mut ticks = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
    for index in 0..count {
        let Ok(instant) = add_units(window.start, period.secondary.unit, index * step) else {
            break;
        };
        ticks.push(SecondaryTick {
            instant,
            label: format_timestamp(instant, &period.secondary.label_format),
            pixel_width: base_unit_width_px,
            pixel_offset: index as f64 * base_unit_width_px,
        });
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::build_axis;
    use crate::core::calendar::TimeUnit;
    use crate::core::period::PeriodTable;
    use crate::core::types::TimeWindow;

    #[test]
    fn degenerate_window_builds_empty_axis() {
        let table = PeriodTable::default();
        let days = table.get("days").expect("days");
        let axis = build_axis(TimeWindow::new(100, 100), days, 40.0);
        assert!(axis.is_empty());
        assert!(axis.secondary.is_empty());
        assert_eq!(axis.total_width_px, 0.0);
        assert!(axis.vertical_dividers().is_empty());
    }

    #[test]
    fn dividers_emphasize_primary_boundaries() {
        let table = PeriodTable::default();
        let days = table.get("days").expect("days");
        // Two whole days starting at the epoch.
        let axis = build_axis(TimeWindow::new(0, 2 * 86_400), days, 40.0);
        let dividers = axis.vertical_dividers();
        assert_eq!(dividers.len(), 7);
        let emphasized: Vec<f64> = dividers
            .iter()
            .filter(|divider| divider.emphasized)
            .map(|divider| divider.pixel_offset)
            .collect();
        assert_eq!(emphasized, vec![160.0]);
    }

    #[test]
    fn window_over_cell_cap_builds_empty_axis() {
        let table = PeriodTable::default();
        let mut hours = table.get("hours").expect("hours").clone();
        hours.primary.unit = TimeUnit::Minutes;
        // Ten years of minutes.
        let axis = build_axis(TimeWindow::new(0, 10 * 365 * 86_400), &hours, 40.0);
        assert!(axis.is_empty());
        assert!(axis.secondary.is_empty());
    }
}
