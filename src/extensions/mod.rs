//! Optional extension points live here.
//!
//! Extensions observe chart state; they never mutate core internals directly.

pub mod plugins;

pub use plugins::{GanttEvent, GanttPlugin, PluginContext};
