use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::calendar::timestamp_bounds;
use crate::core::{ResourceId, TaskId, Timestamp};
use crate::error::{GanttError, GanttResult};
use crate::interaction::{InteractionState, LiveSpan};

/// Horizontal row that owns tasks.
///
/// `lane_height_slots` is derived by the lane resolver and never authored.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    id: ResourceId,
    name: String,
    style: IndexMap<String, String>,
    lane_height_slots: u32,
}

impl Resource {
    #[must_use]
    pub fn new(id: impl Into<ResourceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            style: IndexMap::new(),
            lane_height_slots: 1,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: IndexMap<String, String>) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn style(&self) -> &IndexMap<String, String> {
        &self.style
    }

    #[must_use]
    pub fn lane_height_slots(&self) -> u32 {
        self.lane_height_slots
    }

    pub(crate) fn set_lane_height_slots(&mut self, slots: u32) {
        self.lane_height_slots = slots.max(1);
    }
}

/// Input for creating a task; the chart generates an id when none is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    #[serde(default)]
    pub id: Option<TaskId>,
    pub name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

impl TaskDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        Self {
            id: None,
            name: name.into(),
            start,
            end,
            resource_id: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_resource(mut self, resource_id: impl Into<ResourceId>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }
}

/// Time-bounded bar owned by at most one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    name: String,
    start: Timestamp,
    end: Timestamp,
    resource_id: Option<ResourceId>,
    vertical_slot: u32,
    pub(crate) interaction: InteractionState,
}

impl Task {
    /// Builds a task, rejecting spans with `start > end` or instants outside
    /// the calendar's representable range.
    pub fn new(
        id: impl Into<TaskId>,
        name: impl Into<String>,
        start: Timestamp,
        end: Timestamp,
        resource_id: Option<ResourceId>,
    ) -> GanttResult<Self> {
        if start > end {
            return Err(GanttError::InvalidSpan { start, end });
        }
        let (min, max) = timestamp_bounds();
        if start < min || end > max {
            return Err(GanttError::InvalidData(format!(
                "task span {start}..{end} is outside the supported calendar range"
            )));
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            start,
            end,
            resource_id,
            vertical_slot: 0,
            interaction: InteractionState::Idle,
        })
    }

    #[must_use]
    pub fn id(&self) -> &TaskId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    #[must_use]
    pub fn resource_id(&self) -> Option<&ResourceId> {
        self.resource_id.as_ref()
    }

    #[must_use]
    pub fn vertical_slot(&self) -> u32 {
        self.vertical_slot
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn is_interacted(&self) -> bool {
        !self.interaction.is_idle()
    }

    #[must_use]
    pub fn duration(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    /// Preview span while a gesture is active, committed span otherwise.
    #[must_use]
    pub fn live_span(&self) -> LiveSpan {
        self.interaction
            .live_span()
            .unwrap_or_else(|| LiveSpan::from_committed(self.start, self.end))
    }

    /// Largest non-zero unit of the duration: `"1y"`, `"2mo"`, `"3d"`, `"4h"`, `"15m"`.
    #[must_use]
    pub fn duration_label(&self) -> String {
        const MINUTE: i64 = 60;
        const HOUR: i64 = 60 * MINUTE;
        const DAY: i64 = 24 * HOUR;

        let seconds = self.duration();
        let units = [(365 * DAY, "y"), (30 * DAY, "mo"), (DAY, "d"), (HOUR, "h")];
        units
            .iter()
            .find_map(|&(size, suffix)| {
                let count = seconds / size;
                (count > 0).then(|| format!("{count}{suffix}"))
            })
            .unwrap_or_else(|| format!("{}m", seconds / MINUTE))
    }

    pub(crate) fn set_span(&mut self, start: Timestamp, end: Timestamp) {
        debug_assert!(start <= end);
        self.start = start;
        self.end = end;
    }

    pub(crate) fn set_resource_id(&mut self, resource_id: Option<ResourceId>) {
        self.resource_id = resource_id;
    }

    pub(crate) fn set_vertical_slot(&mut self, slot: u32) {
        self.vertical_slot = slot;
    }
}
