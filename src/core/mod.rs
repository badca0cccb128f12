pub mod axis;
pub mod calendar;
pub mod coordinate;
pub mod lanes;
pub mod period;
pub mod timeline;
pub mod types;
pub mod window;

pub use axis::{Axis, PrimaryTick, SecondaryTick, VerticalDivider, build_axis};
pub use calendar::{RoundingBoundary, TimeUnit};
pub use coordinate::{CoordinateMapper, PixelSpan, pixels_per_second};
pub use lanes::{LaneAssignment, LaneSpan, assign_lanes, spans_collide};
pub use period::{Period, PeriodTable, PrimaryTickSpec, SecondaryTickSpec, WindowOffset};
pub use timeline::Timeline;
pub use types::{PointerPosition, ResourceId, TaskId, TimeWindow, Timestamp, Viewport};
pub use window::compute_window;
