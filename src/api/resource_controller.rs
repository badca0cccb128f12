use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{LaneSpan, ResourceId, assign_lanes};
use crate::error::{GanttError, GanttResult};
use crate::extensions::GanttEvent;

use super::{GanttChart, Resource, Task};

/// Row separator at the cumulative bottom edge of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalDivider {
    pub top_px: f64,
}

impl GanttChart {
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    #[must_use]
    pub fn resource(&self, resource_id: &ResourceId) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|resource| resource.id() == resource_id)
    }

    pub(super) fn resource_index(&self, resource_id: &ResourceId) -> Option<usize> {
        self.resources
            .iter()
            .position(|resource| resource.id() == resource_id)
    }

    /// Resource at `index`, clamped into the valid range.
    #[must_use]
    pub fn resource_by_index(&self, index: usize) -> Option<&Resource> {
        let last = self.resources.len().checked_sub(1)?;
        self.resources.get(index.min(last))
    }

    /// Appends a resource with a generated id.
    pub fn create_resource(&mut self, name: impl Into<String>) -> ResourceId {
        let resource_id = loop {
            let candidate = ResourceId::new(self.next_generated_id("resource"));
            if self.resource_index(&candidate).is_none() {
                break candidate;
            }
        };
        self.push_resource(Resource::new(resource_id.clone(), name));
        resource_id
    }

    pub fn add_resource(&mut self, resource: Resource) -> GanttResult<()> {
        if self.resource_index(resource.id()).is_some() {
            return Err(GanttError::DuplicateId(resource.id().to_string()));
        }
        self.push_resource(resource);
        Ok(())
    }

    fn push_resource(&mut self, resource: Resource) {
        let resource_id = resource.id().clone();
        debug!(resource = %resource_id, count = self.resources.len() + 1, "add resource");
        self.resources.push(resource);
        self.emit_plugin_event(GanttEvent::ResourceAdded {
            resource_id: resource_id.clone(),
        });
        // Tasks may already reference this id.
        self.resolve(&resource_id);
    }

    /// Removes a resource. Tasks keep their now-stale reference and are laid
    /// out as unassigned until moved onto a live resource.
    pub fn remove_resource(&mut self, resource_id: &ResourceId) -> Option<Resource> {
        let Some(index) = self.resource_index(resource_id) else {
            self.report_ignored("remove resource", resource_id, "unknown resource");
            return None;
        };
        let removed = self.resources.remove(index);
        for task in &mut self.tasks {
            if task.resource_id() == Some(resource_id) {
                task.set_vertical_slot(0);
            }
        }
        debug!(resource = %resource_id, count = self.resources.len(), "remove resource");
        self.emit_plugin_event(GanttEvent::ResourceRemoved {
            resource_id: resource_id.clone(),
        });
        Some(removed)
    }

    pub fn tasks_of<'a>(&'a self, resource_id: &'a ResourceId) -> impl Iterator<Item = &'a Task> {
        self.tasks
            .iter()
            .filter(move |task| task.resource_id() == Some(resource_id))
    }

    /// Whether the task's resource exists in this chart.
    pub(super) fn is_assigned(&self, task: &Task) -> bool {
        task.resource_id()
            .is_some_and(|resource_id| self.resource_index(resource_id).is_some())
    }

    /// Recomputes vertical slots for the resource's tasks and its lane height.
    ///
    /// Uses committed spans only. Returns `false` for an unknown resource.
    pub fn resolve(&mut self, resource_id: &ResourceId) -> bool {
        let Some(resource_index) = self.resource_index(resource_id) else {
            self.report_ignored("resolve", resource_id, "unknown resource");
            return false;
        };

        let members: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.resource_id() == Some(resource_id))
            .map(|(index, _)| index)
            .collect();
        let spans: Vec<LaneSpan> = members
            .iter()
            .map(|&index| LaneSpan::new(self.tasks[index].start(), self.tasks[index].end()))
            .collect();
        let assignment = assign_lanes(&spans);

        for (&task_index, &slot) in members.iter().zip(&assignment.slots) {
            self.tasks[task_index].set_vertical_slot(slot);
        }
        self.resources[resource_index].set_lane_height_slots(assignment.lane_height_slots);

        trace!(
            resource = %resource_id,
            tasks = members.len(),
            contested = assignment.contested_count,
            lane_height_slots = assignment.lane_height_slots,
            "resolve resource lanes"
        );
        self.emit_plugin_event(GanttEvent::ResourceResolved {
            resource_id: resource_id.clone(),
            lane_height_slots: assignment.lane_height_slots,
            contested_count: assignment.contested_count,
        });
        true
    }

    /// Resolves every resource in order and resets unassigned tasks to slot 0.
    pub fn resolve_all(&mut self) {
        let resource_ids: Vec<ResourceId> = self
            .resources
            .iter()
            .map(|resource| resource.id().clone())
            .collect();
        for resource_id in &resource_ids {
            self.resolve(resource_id);
        }
        let orphaned: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| !self.is_assigned(task))
            .map(|(index, _)| index)
            .collect();
        for index in orphaned {
            self.tasks[index].set_vertical_slot(0);
        }
    }

    /// Sum of lane heights of every resource above this one.
    #[must_use]
    pub fn resource_top_slots(&self, resource_id: &ResourceId) -> Option<u32> {
        let index = self.resource_index(resource_id)?;
        Some(
            self.resources[..index]
                .iter()
                .map(Resource::lane_height_slots)
                .sum(),
        )
    }

    #[must_use]
    pub fn resource_top_px(&self, resource_id: &ResourceId) -> Option<f64> {
        self.resource_top_slots(resource_id)
            .map(|slots| f64::from(slots) * self.settings.resource_row_height_px)
    }

    #[must_use]
    pub fn resource_height_px(&self, resource_id: &ResourceId) -> Option<f64> {
        self.resource(resource_id).map(|resource| {
            f64::from(resource.lane_height_slots()) * self.settings.resource_row_height_px
        })
    }

    #[must_use]
    pub fn total_height_px(&self) -> f64 {
        let slots: u32 = self.resources.iter().map(Resource::lane_height_slots).sum();
        f64::from(slots) * self.settings.resource_row_height_px
    }

    /// Resource row containing `y`, clamped to the first/last row outside the
    /// laid-out area. `None` only when there are no resources.
    #[must_use]
    pub fn resource_at_y(&self, y: f64) -> Option<&Resource> {
        let first = self.resources.first()?;
        if y.is_nan() || y < 0.0 {
            return Some(first);
        }
        let row_height = self.settings.resource_row_height_px;
        let mut bottom = 0.0;
        for resource in &self.resources {
            bottom += f64::from(resource.lane_height_slots()) * row_height;
            if y < bottom {
                return Some(resource);
            }
        }
        self.resources.last()
    }

    #[must_use]
    pub fn horizontal_dividers(&self) -> Vec<HorizontalDivider> {
        let row_height = self.settings.resource_row_height_px;
        self.resources
            .iter()
            .scan(0_u32, |slots, resource| {
                *slots += resource.lane_height_slots();
                Some(HorizontalDivider {
                    top_px: f64::from(*slots) * row_height,
                })
            })
            .collect()
    }
}
