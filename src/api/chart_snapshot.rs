use serde::{Deserialize, Serialize};

use crate::core::{ResourceId, TaskId, TimeWindow, Timestamp};
use crate::error::{GanttError, GanttResult};
use crate::interaction::InteractionMode;

use super::{GanttChart, HorizontalDivider, TaskGeometry};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttSnapshot {
    pub period: String,
    pub window: TimeWindow,
    pub total_width_px: f64,
    pub total_height_px: f64,
    pub primary_tick_count: usize,
    pub secondary_tick_count: usize,
    pub horizontal_dividers: Vec<HorizontalDivider>,
    pub resources: Vec<ResourceRowSnapshot>,
    pub tasks: Vec<TaskSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRowSnapshot {
    pub id: ResourceId,
    pub top_px: f64,
    pub height_px: f64,
    pub lane_height_slots: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
    pub id: TaskId,
    pub start: Timestamp,
    pub end: Timestamp,
    pub resource_id: Option<ResourceId>,
    pub vertical_slot: u32,
    pub mode: InteractionMode,
    pub geometry: TaskGeometry,
}

impl GanttChart {
    #[must_use]
    pub fn snapshot(&self) -> GanttSnapshot {
        let axis = self.timeline.axis();
        let resources = self
            .resources
            .iter()
            .map(|resource| ResourceRowSnapshot {
                id: resource.id().clone(),
                top_px: self.resource_top_px(resource.id()).unwrap_or(0.0),
                height_px: self.resource_height_px(resource.id()).unwrap_or(0.0),
                lane_height_slots: resource.lane_height_slots(),
            })
            .collect();
        let tasks = self
            .tasks
            .iter()
            .filter_map(|task| {
                Some(TaskSnapshot {
                    id: task.id().clone(),
                    start: task.start(),
                    end: task.end(),
                    resource_id: task.resource_id().cloned(),
                    vertical_slot: task.vertical_slot(),
                    mode: task.interaction().mode(),
                    geometry: self.task_geometry(task.id())?,
                })
            })
            .collect();

        GanttSnapshot {
            period: self.period_name().to_owned(),
            window: self.timeline.window(),
            total_width_px: axis.total_width_px,
            total_height_px: self.total_height_px(),
            primary_tick_count: axis.primary.len(),
            secondary_tick_count: axis.secondary.len(),
            horizontal_dividers: self.horizontal_dividers(),
            resources,
            tasks,
        }
    }

    pub fn snapshot_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(|e| {
            GanttError::Serialization(format!("failed to serialize snapshot json: {e}"))
        })
    }
}
