//! Vertical slot packing for the tasks of a single resource.
//!
//! Every task that collides with at least one other task joins the contested
//! set. Contested tasks are ranked by descending duration (ties keep input
//! order) and take their rank as slot; everything else sits on slot 0. This
//! is a greedy packing and does not minimize the lane count: the lane height
//! equals the contested-set size, so a single edit only re-ranks its own
//! neighbourhood.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::core::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSpan {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl LaneSpan {
    #[must_use]
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn duration(self) -> i64 {
        self.end.saturating_sub(self.start)
    }
}

/// Half-open overlap test on `[start, end)`.
#[must_use]
pub fn spans_collide(a: LaneSpan, b: LaneSpan) -> bool {
    !(a.end <= b.start || b.end <= a.start)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneAssignment {
    /// Slot per input span, in input order.
    pub slots: Vec<u32>,
    pub lane_height_slots: u32,
    pub contested_count: usize,
}

#[must_use]
pub fn assign_lanes(spans: &[LaneSpan]) -> LaneAssignment {
    let mut contested = vec![false; spans.len()];
    for (i, left) in spans.iter().enumerate() {
        for (offset, right) in spans[i + 1..].iter().enumerate() {
            if spans_collide(*left, *right) {
                contested[i] = true;
                contested[i + 1 + offset] = true;
            }
        }
    }

    let mut ranked: Vec<usize> = contested
        .iter()
        .enumerate()
        .filter_map(|(index, is_contested)| is_contested.then_some(index))
        .collect();
    ranked.sort_by_key(|&index| Reverse(spans[index].duration()));

    let mut slots = vec![0_u32; spans.len()];
    for (rank, &index) in ranked.iter().enumerate() {
        slots[index] = u32::try_from(rank).unwrap_or(u32::MAX);
    }

    LaneAssignment {
        slots,
        lane_height_slots: u32::try_from(ranked.len()).unwrap_or(u32::MAX).max(1),
        contested_count: ranked.len(),
    }
}
