use serde::Serialize;

use crate::core::axis::{Axis, build_axis};
use crate::core::coordinate::CoordinateMapper;
use crate::core::period::Period;
use crate::core::types::{TimeWindow, Timestamp};
use crate::core::window::compute_window;
use crate::error::GanttResult;

/// Calendar axis state derived from an anchor instant and a period.
///
/// Every field other than `anchor`, `period` and `base_unit_width_px` is a
/// pure function of those three and is recomputed whenever one changes.
/// Setters leave the previous state intact when the recompute fails. Only
/// serialization is offered; rebuild from the inputs with [`Timeline::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    anchor: Timestamp,
    period: Period,
    base_unit_width_px: f64,
    window: TimeWindow,
    axis: Axis,
    mapper: CoordinateMapper,
}

impl Timeline {
    pub fn new(anchor: Timestamp, period: Period, base_unit_width_px: f64) -> GanttResult<Self> {
        let window = compute_window(anchor, &period)?;
        let axis = build_axis(window, &period, base_unit_width_px);
        let mapper = CoordinateMapper::new(window, axis.total_width_px);
        Ok(Self {
            anchor,
            period,
            base_unit_width_px,
            window,
            axis,
            mapper,
        })
    }

    pub fn set_anchor(&mut self, anchor: Timestamp) -> GanttResult<()> {
        *self = Self::new(anchor, self.period.clone(), self.base_unit_width_px)?;
        Ok(())
    }

    pub fn set_period(&mut self, period: Period) -> GanttResult<()> {
        *self = Self::new(self.anchor, period, self.base_unit_width_px)?;
        Ok(())
    }

    pub fn set_base_unit_width_px(&mut self, base_unit_width_px: f64) -> GanttResult<()> {
        *self = Self::new(self.anchor, self.period.clone(), base_unit_width_px)?;
        Ok(())
    }

    #[must_use]
    pub fn anchor(&self) -> Timestamp {
        self.anchor
    }

    #[must_use]
    pub fn period(&self) -> &Period {
        &self.period
    }

    #[must_use]
    pub fn base_unit_width_px(&self) -> f64 {
        self.base_unit_width_px
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    #[must_use]
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        self.mapper
    }

    #[must_use]
    pub fn total_width_px(&self) -> f64 {
        self.axis.total_width_px
    }

    #[must_use]
    pub fn pixels_per_second(&self) -> f64 {
        self.mapper.pixels_per_second()
    }

    /// Horizontal scroll position that brings the anchor to the container's left edge.
    #[must_use]
    pub fn anchor_scroll_offset(&self) -> f64 {
        self.mapper.timestamp_to_pixel(self.anchor)
    }
}
