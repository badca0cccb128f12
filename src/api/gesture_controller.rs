use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{PointerPosition, ResourceId, TaskId, Timestamp};
use crate::extensions::GanttEvent;
use crate::interaction::{
    GestureId, GestureKind, GestureMetrics, GestureSnapshot, InteractionState, LiveSpan,
    MovePreview, ResizeSide, resolve_move, resolve_resize,
};

use super::GanttChart;

type SettledCallback = Box<dyn FnOnce(&GestureOutcome)>;

/// What a committed gesture settled.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureOutcome {
    pub task_id: TaskId,
    pub kind: GestureKind,
    pub start: Timestamp,
    pub end: Timestamp,
    pub previous_resource: Option<ResourceId>,
    pub resource: Option<ResourceId>,
    /// Resources re-resolved by the commit, in resolution order.
    pub resolved_resources: SmallVec<[ResourceId; 2]>,
}

impl GestureOutcome {
    #[must_use]
    pub fn changed_resource(&self) -> bool {
        self.previous_resource != self.resource
    }
}

/// Handle for one in-flight gesture.
///
/// Every call is validated against the task's current gesture id, so a
/// handle whose gesture already ended or was cancelled elsewhere is inert.
pub struct GestureSubscription {
    task_id: TaskId,
    gesture_id: GestureId,
    kind: GestureKind,
    on_settled: Option<SettledCallback>,
}

impl GestureSubscription {
    #[must_use]
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    #[must_use]
    pub fn gesture_id(&self) -> GestureId {
        self.gesture_id
    }

    #[must_use]
    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Runs once after a successful commit, after lane resolution.
    #[must_use]
    pub fn on_settled(mut self, callback: impl FnOnce(&GestureOutcome) + 'static) -> Self {
        self.on_settled = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn is_active(&self, chart: &GanttChart) -> bool {
        chart
            .task(&self.task_id)
            .and_then(|task| task.interaction().gesture_id())
            == Some(self.gesture_id)
    }

    pub fn update(&self, chart: &mut GanttChart, pointer: PointerPosition) -> bool {
        chart.update_gesture(&self.task_id, self.gesture_id, pointer)
    }

    pub fn end(self, chart: &mut GanttChart, pointer: PointerPosition) -> Option<GestureOutcome> {
        chart.end_gesture(self, pointer)
    }

    pub fn cancel(&self, chart: &mut GanttChart) -> bool {
        match chart.active_task_index(&self.task_id, self.gesture_id, "gesture cancel") {
            Some(index) => chart.discard_gesture(index),
            None => false,
        }
    }
}

impl fmt::Debug for GestureSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureSubscription")
            .field("task_id", &self.task_id)
            .field("gesture_id", &self.gesture_id)
            .field("kind", &self.kind)
            .field("has_on_settled", &self.on_settled.is_some())
            .finish()
    }
}

impl GanttChart {
    /// Starts dragging a task. `None` when the task is unknown or busy.
    pub fn move_start(
        &mut self,
        task_id: &TaskId,
        pointer: PointerPosition,
    ) -> Option<GestureSubscription> {
        self.begin_gesture(task_id, GestureKind::Move, pointer)
    }

    /// Starts dragging one edge of a task. `None` when the task is unknown or busy.
    pub fn resize_start(
        &mut self,
        task_id: &TaskId,
        side: ResizeSide,
        pointer: PointerPosition,
    ) -> Option<GestureSubscription> {
        self.begin_gesture(task_id, GestureKind::Resize(side), pointer)
    }

    /// Cancels whatever gesture the task is in, without needing its handle.
    pub fn cancel_gesture(&mut self, task_id: &TaskId) -> bool {
        let Some(index) = self.task_index(task_id) else {
            self.report_ignored("gesture cancel", task_id, "unknown task");
            return false;
        };
        if self.tasks[index].interaction.is_idle() {
            self.report_ignored("gesture cancel", task_id, "no active gesture");
            return false;
        }
        self.discard_gesture(index)
    }

    /// Cancels every in-flight gesture; returns how many were cancelled.
    pub fn cancel_all_gestures(&mut self) -> usize {
        let active: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.is_interacted())
            .map(|(index, _)| index)
            .collect();
        active
            .into_iter()
            .filter(|&index| self.discard_gesture(index))
            .count()
    }

    #[must_use]
    pub fn active_gesture_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_interacted()).count()
    }

    fn gesture_metrics(&self) -> GestureMetrics {
        GestureMetrics {
            pixels_per_second: self.timeline.pixels_per_second(),
            time_unit_width_px: self.settings.time_unit_width_px,
            row_height_px: self.settings.resource_row_height_px,
        }
    }

    fn begin_gesture(
        &mut self,
        task_id: &TaskId,
        kind: GestureKind,
        pointer: PointerPosition,
    ) -> Option<GestureSubscription> {
        let Some(index) = self.task_index(task_id) else {
            self.report_ignored("gesture start", task_id, "unknown task");
            return None;
        };
        if !self.tasks[index].interaction.is_idle() {
            self.report_ignored("gesture start", task_id, "gesture already active");
            return None;
        }

        let gesture_id = GestureId(self.next_gesture_seq);
        self.next_gesture_seq += 1;

        let task = &self.tasks[index];
        let top_px = self.committed_top_px(task).unwrap_or(0.0);
        let snapshot = GestureSnapshot {
            gesture_id,
            pointer_origin: pointer,
            start: task.start(),
            end: task.end(),
            top_px,
            snap_to_grid: self.settings.snap_to_grid,
            metrics: self.gesture_metrics(),
        };
        let committed = LiveSpan::from_committed(task.start(), task.end());
        let state = match kind {
            GestureKind::Move => InteractionState::Moving {
                snapshot,
                preview: MovePreview {
                    span: committed,
                    top_px,
                    lane_delta: 0,
                    tentative_resource: task.resource_id().cloned(),
                },
            },
            GestureKind::Resize(side) => InteractionState::Resizing {
                side,
                snapshot,
                preview: committed,
            },
        };
        self.tasks[index].interaction = state;

        debug!(task = %task_id, gesture = gesture_id.0, ?kind, "gesture started");
        self.emit_plugin_event(GanttEvent::GestureStarted {
            task_id: task_id.clone(),
            kind,
        });
        Some(GestureSubscription {
            task_id: task_id.clone(),
            gesture_id,
            kind,
            on_settled: None,
        })
    }

    fn active_task_index(
        &self,
        task_id: &TaskId,
        gesture_id: GestureId,
        operation: &'static str,
    ) -> Option<usize> {
        let Some(index) = self.task_index(task_id) else {
            self.report_ignored(operation, task_id, "unknown task");
            return None;
        };
        if self.tasks[index].interaction.gesture_id() != Some(gesture_id) {
            self.report_ignored(operation, task_id, "stale gesture handle");
            return None;
        }
        Some(index)
    }

    fn update_gesture(
        &mut self,
        task_id: &TaskId,
        gesture_id: GestureId,
        pointer: PointerPosition,
    ) -> bool {
        let Some(index) = self.active_task_index(task_id, gesture_id, "gesture update") else {
            return false;
        };
        let task = &self.tasks[index];
        let next = match &task.interaction {
            InteractionState::Moving { snapshot, .. } => {
                let (span, top_px, lane_delta) = resolve_move(snapshot, pointer);
                // Unassigned tasks move in time only.
                let tentative_resource = if self.is_assigned(task) {
                    let row_height_px = snapshot.metrics.row_height_px;
                    let target_y = snapshot.top_px + lane_delta as f64 * row_height_px;
                    self.resource_at_y(target_y)
                        .map(|resource| resource.id().clone())
                } else {
                    task.resource_id().cloned()
                };
                InteractionState::Moving {
                    snapshot: *snapshot,
                    preview: MovePreview {
                        span,
                        top_px,
                        lane_delta,
                        tentative_resource,
                    },
                }
            }
            InteractionState::Resizing { side, snapshot, .. } => InteractionState::Resizing {
                side: *side,
                snapshot: *snapshot,
                preview: resolve_resize(snapshot, *side, pointer),
            },
            InteractionState::Idle => return false,
        };
        trace!(
            task = %task_id,
            gesture = gesture_id.0,
            preview = ?next.live_span(),
            "gesture update"
        );
        self.tasks[index].interaction = next;
        true
    }

    fn end_gesture(
        &mut self,
        subscription: GestureSubscription,
        pointer: PointerPosition,
    ) -> Option<GestureOutcome> {
        let GestureSubscription {
            task_id,
            gesture_id,
            kind,
            on_settled,
        } = subscription;
        if !self.update_gesture(&task_id, gesture_id, pointer) {
            return None;
        }
        let index = self.task_index(&task_id)?;

        let (span, tentative_resource) = match std::mem::take(&mut self.tasks[index].interaction) {
            InteractionState::Moving { preview, .. } => {
                (preview.span, Some(preview.tentative_resource))
            }
            InteractionState::Resizing { preview, .. } => (preview, None),
            InteractionState::Idle => return None,
        };
        let (start, end) = span.commit(self.settings.commit_resolution_seconds());

        let task = &mut self.tasks[index];
        let previous_resource = task.resource_id().cloned();
        task.set_span(start, end);
        let resource = match tentative_resource {
            Some(next) => {
                task.set_resource_id(next.clone());
                next
            }
            None => previous_resource.clone(),
        };

        let mut resolved_resources = SmallVec::<[ResourceId; 2]>::new();
        if previous_resource != resource {
            if let Some(previous) = &previous_resource {
                if self.resource_index(previous).is_some() && self.resolve(previous) {
                    resolved_resources.push(previous.clone());
                }
            }
        }
        if let Some(current) = &resource {
            if self.resource_index(current).is_some() && self.resolve(current) {
                resolved_resources.push(current.clone());
            }
        }
        if !self.is_assigned(&self.tasks[index]) {
            self.tasks[index].set_vertical_slot(0);
        }

        let outcome = GestureOutcome {
            task_id,
            kind,
            start,
            end,
            previous_resource,
            resource,
            resolved_resources,
        };
        debug!(
            task = %outcome.task_id,
            gesture = gesture_id.0,
            start,
            end,
            resource = ?outcome.resource,
            "gesture committed"
        );
        self.emit_plugin_event(GanttEvent::GestureCommitted {
            task_id: outcome.task_id.clone(),
            kind,
            start,
            end,
            resource_id: outcome.resource.clone(),
        });
        if let Some(callback) = on_settled {
            callback(&outcome);
        }
        Some(outcome)
    }

    fn discard_gesture(&mut self, index: usize) -> bool {
        let Some(kind) = std::mem::take(&mut self.tasks[index].interaction).kind() else {
            return false;
        };
        let task_id = self.tasks[index].id().clone();
        debug!(task = %task_id, ?kind, "gesture cancelled");
        self.emit_plugin_event(GanttEvent::GestureCancelled { task_id, kind });
        true
    }
}
