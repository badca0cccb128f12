use tracing::debug;

use crate::core::{CoordinateMapper, Timestamp, VerticalDivider};
use crate::error::{GanttError, GanttResult};

use super::validation::validate_settings;
use super::{GanttChart, Settings, SettingsPatch};

impl GanttChart {
    #[must_use]
    pub fn period_name(&self) -> &str {
        &self.timeline.period().name
    }

    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        self.timeline.mapper()
    }

    #[must_use]
    pub fn vertical_dividers(&self) -> Vec<VerticalDivider> {
        self.timeline.axis().vertical_dividers()
    }

    /// Scroll offset that brings the anchor instant to the left edge.
    #[must_use]
    pub fn anchor_scroll_offset(&self) -> f64 {
        self.timeline.anchor_scroll_offset()
    }

    pub fn set_anchor(&mut self, anchor: Timestamp) -> GanttResult<()> {
        self.timeline.set_anchor(anchor)?;
        debug!(anchor, window = ?self.timeline.window(), "set anchor");
        self.emit_timeline_changed();
        Ok(())
    }

    /// Switches to a named period. Unknown names leave the timeline untouched.
    pub fn set_period(&mut self, name: &str) -> bool {
        let Some(period) = self.periods.get(name).cloned() else {
            self.report_ignored("set period", &name, "unknown period");
            return false;
        };
        if self.timeline.set_period(period).is_err() {
            self.report_ignored("set period", &name, "window out of calendar range");
            return false;
        }
        debug!(period = name, window = ?self.timeline.window(), "set period");
        self.emit_timeline_changed();
        true
    }

    /// Moves `delta` entries through the period table; no-op past either end.
    pub fn step_period(&mut self, delta: isize) -> bool {
        let current = self.period_name().to_owned();
        let Some(next) = self
            .periods
            .offset_from(&current, delta)
            .map(|period| period.name.clone())
        else {
            self.report_ignored("step period", &current, "no period in that direction");
            return false;
        };
        self.set_period(&next)
    }

    /// Finer granularity.
    pub fn zoom_in(&mut self) -> bool {
        self.step_period(-1)
    }

    /// Coarser granularity.
    pub fn zoom_out(&mut self) -> bool {
        self.step_period(1)
    }

    /// Applies recognized keys; the chart is unchanged when validation fails.
    pub fn set_settings(&mut self, patch: SettingsPatch) -> GanttResult<()> {
        self.replace_settings(self.settings.patched(patch))
    }

    /// Parses a patch from arbitrary JSON, ignoring unrecognized keys.
    pub fn set_settings_json(&mut self, value: &serde_json::Value) -> GanttResult<()> {
        let patch: SettingsPatch = serde_json::from_value(value.clone())
            .map_err(|e| GanttError::InvalidData(format!("failed to parse settings patch: {e}")))?;
        self.set_settings(patch)
    }

    pub fn replace_settings(&mut self, settings: Settings) -> GanttResult<()> {
        validate_settings(&settings)?;
        if settings.time_unit_width_px != self.settings.time_unit_width_px {
            self.timeline.set_base_unit_width_px(settings.time_unit_width_px)?;
            self.settings = settings;
            self.emit_timeline_changed();
        } else {
            self.settings = settings;
        }
        debug!(settings = ?self.settings, "settings updated");
        Ok(())
    }
}
