mod chart;
mod chart_config;
mod chart_snapshot;
mod entities;
mod gesture_controller;
mod json_contract;
mod plugin_dispatch;
mod plugin_registry;
mod resource_controller;
mod task_controller;
mod timeline_controller;
mod validation;

pub use chart::GanttChart;
pub use chart_config::{
    DEFAULT_DATE_PATTERN, DEFAULT_PERIOD, DEFAULT_RESOURCE_ROW_HEIGHT_PX,
    DEFAULT_TIME_UNIT_WIDTH_PX, DateRepresentation, GanttChartConfig, Settings, SettingsPatch,
};
pub use chart_snapshot::{GanttSnapshot, ResourceRowSnapshot, TaskSnapshot};
pub use entities::{Resource, Task, TaskDraft};
pub use gesture_controller::{GestureOutcome, GestureSubscription};
pub use json_contract::{
    CHART_JSON_SCHEMA_V1, ChartJsonContractV1, ChartRecord, InstantRecord, ResourceRecord,
    TaskRecord,
};
pub use resource_controller::HorizontalDivider;
pub use task_controller::TaskGeometry;
