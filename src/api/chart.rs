use std::fmt;

use tracing::{debug, warn};

use crate::core::{PeriodTable, Timeline};
use crate::error::GanttResult;
use crate::extensions::GanttPlugin;

use super::validation::validate_settings;
use super::{GanttChartConfig, Resource, Settings, Task};

const DEFAULT_CHART_ID: &str = "gantt-chart";

/// Main orchestration facade consumed by host applications.
///
/// `GanttChart` owns the timeline, the resource rows, the tasks and the
/// per-task gesture state. Hosts read derived geometry back out and render
/// it however they like.
pub struct GanttChart {
    pub(super) id: String,
    pub(super) settings: Settings,
    pub(super) periods: PeriodTable,
    pub(super) timeline: Timeline,
    pub(super) resources: Vec<Resource>,
    pub(super) tasks: Vec<Task>,
    pub(super) plugins: Vec<Box<dyn GanttPlugin>>,
    pub(super) next_entity_seq: u64,
    pub(super) next_gesture_seq: u64,
}

impl GanttChart {
    pub fn new(config: GanttChartConfig) -> GanttResult<Self> {
        validate_settings(&config.settings)?;
        let period = config.periods.require(&config.period)?.clone();
        let timeline = Timeline::new(config.anchor, period, config.settings.time_unit_width_px)?;

        debug!(
            anchor = config.anchor,
            period = %config.period,
            total_width_px = timeline.total_width_px(),
            "chart initialized"
        );

        Ok(Self {
            id: config.id.unwrap_or_else(|| DEFAULT_CHART_ID.to_owned()),
            settings: config.settings,
            periods: config.periods,
            timeline,
            resources: Vec::new(),
            tasks: Vec::new(),
            plugins: Vec::new(),
            next_entity_seq: 1,
            next_gesture_seq: 1,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn periods(&self) -> &PeriodTable {
        &self.periods
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub(super) fn next_generated_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_entity_seq);
        self.next_entity_seq += 1;
        id
    }

    /// Reports an operation that was ignored.
    ///
    /// Always visible at `debug`; promoted to `warn` when `settings.verbose`
    /// is enabled.
    pub(super) fn report_ignored(
        &self,
        operation: &'static str,
        subject: &dyn fmt::Display,
        reason: &'static str,
    ) {
        if self.settings.verbose {
            warn!(operation, subject = %subject, reason, "chart operation ignored");
        } else {
            debug!(operation, subject = %subject, reason, "chart operation ignored");
        }
    }
}

impl fmt::Debug for GanttChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GanttChart")
            .field("id", &self.id)
            .field("period", &self.timeline.period().name)
            .field("window", &self.timeline.window())
            .field("resources", &self.resources.len())
            .field("tasks", &self.tasks.len())
            .field("plugins", &self.plugins.len())
            .finish()
    }
}
