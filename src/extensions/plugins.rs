use serde::{Deserialize, Serialize};

use crate::core::{ResourceId, TaskId, TimeWindow, Timestamp};
use crate::interaction::GestureKind;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub window: TimeWindow,
    pub period: String,
    pub total_width_px: f64,
    pub pixels_per_second: f64,
    pub tasks_len: usize,
    pub resources_len: usize,
    pub active_gestures: usize,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GanttEvent {
    TaskAdded {
        task_id: TaskId,
    },
    TaskRemoved {
        task_id: TaskId,
    },
    ResourceAdded {
        resource_id: ResourceId,
    },
    ResourceRemoved {
        resource_id: ResourceId,
    },
    ResourceResolved {
        resource_id: ResourceId,
        lane_height_slots: u32,
        contested_count: usize,
    },
    GestureStarted {
        task_id: TaskId,
        kind: GestureKind,
    },
    GestureCommitted {
        task_id: TaskId,
        kind: GestureKind,
        start: Timestamp,
        end: Timestamp,
        resource_id: Option<ResourceId>,
    },
    GestureCancelled {
        task_id: TaskId,
        kind: GestureKind,
    },
    TimelineChanged {
        window: TimeWindow,
        period: String,
    },
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read chart context without mutating
/// chart internals directly.
pub trait GanttPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &GanttEvent, context: &PluginContext);
}
