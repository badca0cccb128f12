//! gantt-rs: Gantt scheduling core.
//!
//! The crate owns the time and layout model of a Gantt chart: calendar
//! windows per zoom period, the two-level time axis, time/pixel mapping,
//! lane packing of overlapping tasks and move/resize gesture state.
//! Rendering is left to the host, which reads geometry back from
//! [`GanttChart`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{GanttChart, GanttChartConfig, Settings};
pub use error::{GanttError, GanttResult};
