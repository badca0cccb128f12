use serde::{Deserialize, Serialize};

use crate::core::calendar::{clamp_fractional, round_to_resolution};
use crate::core::{PointerPosition, ResourceId, Timestamp};

/// Coarse gesture mode, as reported to plugins and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Moving,
    Resizing,
}

/// Task edge grabbed by a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    Move,
    Resize(ResizeSide),
}

/// Identifies one gesture from start to commit/cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GestureId(pub u64);

/// Values captured when a gesture starts; deltas are always measured from here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSnapshot {
    pub gesture_id: GestureId,
    pub pointer_origin: PointerPosition,
    pub start: Timestamp,
    pub end: Timestamp,
    /// Task top edge in chart pixels at gesture start.
    pub top_px: f64,
    pub snap_to_grid: bool,
    /// Scale and grid in effect at gesture start; later timeline or
    /// settings changes do not re-scale an in-flight gesture.
    pub metrics: GestureMetrics,
}

/// Fractional span shown while a gesture is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveSpan {
    pub start: f64,
    pub end: f64,
}

impl LiveSpan {
    #[must_use]
    pub fn from_committed(start: Timestamp, end: Timestamp) -> Self {
        Self {
            start: start as f64,
            end: end as f64,
        }
    }

    /// Rounds to whole multiples of `resolution_seconds`, clamps into the
    /// calendar range and orders the edges.
    #[must_use]
    pub fn commit(self, resolution_seconds: i64) -> (Timestamp, Timestamp) {
        let start = clamp_fractional(self.start.round(), 0.0) as Timestamp;
        let end = clamp_fractional(self.end.round(), start as f64) as Timestamp;
        let start = round_to_resolution(start, resolution_seconds);
        let end = round_to_resolution(end, resolution_seconds);
        if start <= end { (start, end) } else { (end, start) }
    }
}

/// Tentative move state; resource reassignment is decided on commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovePreview {
    pub span: LiveSpan,
    pub top_px: f64,
    pub lane_delta: i64,
    pub tentative_resource: Option<ResourceId>,
}

/// Per-task interaction state. Only `Idle` accepts a new gesture.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum InteractionState {
    #[default]
    Idle,
    Moving {
        snapshot: GestureSnapshot,
        preview: MovePreview,
    },
    Resizing {
        side: ResizeSide,
        snapshot: GestureSnapshot,
        preview: LiveSpan,
    },
}

impl InteractionState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self {
            Self::Idle => InteractionMode::Idle,
            Self::Moving { .. } => InteractionMode::Moving,
            Self::Resizing { .. } => InteractionMode::Resizing,
        }
    }

    #[must_use]
    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Self::Idle => None,
            Self::Moving { .. } => Some(GestureKind::Move),
            Self::Resizing { side, .. } => Some(GestureKind::Resize(*side)),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&GestureSnapshot> {
        match self {
            Self::Idle => None,
            Self::Moving { snapshot, .. } | Self::Resizing { snapshot, .. } => Some(snapshot),
        }
    }

    #[must_use]
    pub fn gesture_id(&self) -> Option<GestureId> {
        self.snapshot().map(|snapshot| snapshot.gesture_id)
    }

    #[must_use]
    pub fn live_span(&self) -> Option<LiveSpan> {
        match self {
            Self::Idle => None,
            Self::Moving { preview, .. } => Some(preview.span),
            Self::Resizing { preview, .. } => Some(*preview),
        }
    }
}

/// Grid and scale inputs for turning pointer deltas into edits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureMetrics {
    pub pixels_per_second: f64,
    pub time_unit_width_px: f64,
    pub row_height_px: f64,
}

impl GestureMetrics {
    fn seconds_for(self, delta_px: f64) -> f64 {
        if !self.pixels_per_second.is_finite() || self.pixels_per_second <= 0.0 {
            return 0.0;
        }
        delta_px / self.pixels_per_second
    }
}

#[must_use]
pub fn round_to_nearest(value: f64, factor: f64) -> f64 {
    if !factor.is_finite() || factor <= 0.0 {
        return value;
    }
    (value / factor).round() * factor
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

fn horizontal_delta_px(snapshot: &GestureSnapshot, pointer: PointerPosition) -> f64 {
    let delta = finite_or_zero(pointer.x - snapshot.pointer_origin.x);
    if snapshot.snap_to_grid {
        round_to_nearest(delta, snapshot.metrics.time_unit_width_px)
    } else {
        delta
    }
}

/// Shifts both edges by the same time delta and tracks the vertical offset.
///
/// With snapping, pixel deltas are rounded to whole grid cells before being
/// converted; otherwise the preview follows the pointer continuously.
#[must_use]
pub fn resolve_move(snapshot: &GestureSnapshot, pointer: PointerPosition) -> (LiveSpan, f64, i64) {
    let metrics = snapshot.metrics;
    let delta_x = horizontal_delta_px(snapshot, pointer);
    let raw_delta_y = finite_or_zero(pointer.y - snapshot.pointer_origin.y);
    let delta_y = if snapshot.snap_to_grid {
        round_to_nearest(raw_delta_y, metrics.row_height_px)
    } else {
        raw_delta_y
    };

    let delta_seconds = metrics.seconds_for(delta_x);
    let span = LiveSpan {
        start: clamp_fractional(snapshot.start as f64 + delta_seconds, snapshot.start as f64),
        end: clamp_fractional(snapshot.end as f64 + delta_seconds, snapshot.end as f64),
    };
    let lane_delta = if metrics.row_height_px.is_finite() && metrics.row_height_px > 0.0 {
        (delta_y / metrics.row_height_px).round() as i64
    } else {
        0
    };

    (span, snapshot.top_px + delta_y, lane_delta)
}

/// Moves the grabbed edge; dragging it past the opposite edge flips roles so
/// the result always satisfies `start <= end`.
#[must_use]
pub fn resolve_resize(
    snapshot: &GestureSnapshot,
    side: ResizeSide,
    pointer: PointerPosition,
) -> LiveSpan {
    let delta_seconds = snapshot
        .metrics
        .seconds_for(horizontal_delta_px(snapshot, pointer));
    let start = snapshot.start as f64;
    let end = snapshot.end as f64;

    match side {
        ResizeSide::Left => {
            let candidate = clamp_fractional(start + delta_seconds, start);
            if candidate >= end {
                LiveSpan {
                    start: end,
                    end: candidate,
                }
            } else {
                LiveSpan {
                    start: candidate,
                    end,
                }
            }
        }
        ResizeSide::Right => {
            let candidate = clamp_fractional(end + delta_seconds, end);
            if candidate <= start {
                LiveSpan {
                    start: candidate,
                    end: start,
                }
            } else {
                LiveSpan {
                    start,
                    end: candidate,
                }
            }
        }
    }
}
