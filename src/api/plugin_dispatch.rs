use crate::extensions::{GanttEvent, PluginContext};

use super::GanttChart;

impl GanttChart {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            window: self.timeline.window(),
            period: self.timeline.period().name.clone(),
            total_width_px: self.timeline.total_width_px(),
            pixels_per_second: self.timeline.pixels_per_second(),
            tasks_len: self.tasks.len(),
            resources_len: self.resources.len(),
            active_gestures: self.active_gesture_count(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: GanttEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(&event, &context);
        }
    }

    pub(super) fn emit_timeline_changed(&mut self) {
        let window = self.timeline.window();
        let period = self.timeline.period().name.clone();
        self.emit_plugin_event(GanttEvent::TimelineChanged { window, period });
    }
}
