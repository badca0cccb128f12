use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{TaskId, Viewport};
use crate::error::{GanttError, GanttResult};
use crate::extensions::GanttEvent;
use crate::interaction::InteractionState;

use super::{GanttChart, Task, TaskDraft};

/// Bar placement in chart pixels.
///
/// `top_px` is `None` for tasks without a live resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGeometry {
    pub left_px: f64,
    pub width_px: f64,
    pub top_px: Option<f64>,
    pub height_px: f64,
}

impl GanttChart {
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    pub(super) fn task_index(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    /// Validates and inserts a task, generating an id when the draft has none.
    pub fn create_task(&mut self, draft: TaskDraft) -> GanttResult<TaskId> {
        let task_id = match draft.id {
            Some(task_id) => task_id,
            None => loop {
                let candidate = TaskId::new(self.next_generated_id("task"));
                if self.task_index(&candidate).is_none() {
                    break candidate;
                }
            },
        };
        let task = Task::new(
            task_id.clone(),
            draft.name,
            draft.start,
            draft.end,
            draft.resource_id,
        )?;
        self.add_task(task)?;
        Ok(task_id)
    }

    pub fn add_task(&mut self, mut task: Task) -> GanttResult<()> {
        if self.task_index(task.id()).is_some() {
            return Err(GanttError::DuplicateId(task.id().to_string()));
        }
        task.interaction = InteractionState::Idle;
        task.set_vertical_slot(0);

        let task_id = task.id().clone();
        let resource_id = task.resource_id().cloned();
        debug!(
            task = %task_id,
            start = task.start(),
            end = task.end(),
            count = self.tasks.len() + 1,
            "add task"
        );
        self.tasks.push(task);
        self.emit_plugin_event(GanttEvent::TaskAdded {
            task_id: task_id.clone(),
        });

        if let Some(resource_id) = resource_id {
            if self.resource_index(&resource_id).is_some() {
                self.resolve(&resource_id);
            } else {
                self.report_ignored("assign task", &resource_id, "unknown resource");
            }
        }
        Ok(())
    }

    /// Removes a task and re-resolves its resource. An in-flight gesture on
    /// the task is dropped with it.
    pub fn remove_task(&mut self, task_id: &TaskId) -> Option<Task> {
        let Some(index) = self.task_index(task_id) else {
            self.report_ignored("remove task", task_id, "unknown task");
            return None;
        };
        let removed = self.tasks.remove(index);
        debug!(task = %task_id, count = self.tasks.len(), "remove task");
        self.emit_plugin_event(GanttEvent::TaskRemoved {
            task_id: task_id.clone(),
        });
        if let Some(resource_id) = removed.resource_id() {
            if self.resource_index(resource_id).is_some() {
                self.resolve(resource_id);
            }
        }
        Some(removed)
    }

    /// Committed top edge: resource top plus the task's slot offset.
    pub(super) fn committed_top_px(&self, task: &Task) -> Option<f64> {
        let resource_top = self.resource_top_px(task.resource_id()?)?;
        Some(resource_top + f64::from(task.vertical_slot()) * self.settings.resource_row_height_px)
    }

    /// Geometry of the task as currently displayed, preview included.
    #[must_use]
    pub fn task_geometry(&self, task_id: &TaskId) -> Option<TaskGeometry> {
        let task = self.task(task_id)?;
        let span = task.live_span();
        let pixels = self.timeline.mapper().span_to_pixels(span.start, span.end);
        let top_px = match &task.interaction {
            InteractionState::Moving { preview, .. } => Some(preview.top_px),
            _ => self.committed_top_px(task),
        };
        Some(TaskGeometry {
            left_px: pixels.left,
            width_px: pixels.width,
            top_px,
            height_px: self.settings.resource_row_height_px,
        })
    }

    #[must_use]
    pub fn is_task_visible(&self, task_id: &TaskId, viewport: Viewport) -> bool {
        let Some(task) = self.task(task_id) else {
            return false;
        };
        let span = task.live_span();
        let mapper = self.timeline.mapper();
        mapper.is_span_visible(mapper.span_to_pixels(span.start, span.end), viewport)
    }
}
