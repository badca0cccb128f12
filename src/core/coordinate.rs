use serde::{Deserialize, Serialize};

use crate::core::types::{TimeWindow, Timestamp, Viewport};

/// Horizontal pixel extent of a time span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelSpan {
    pub left: f64,
    pub width: f64,
}

/// Linear instant <-> pixel transform over the timeline window.
///
/// `x = (t - window.start) * pixels_per_second`. A degenerate window or a
/// zero total width yields a rate of `0.0`; both directions then collapse to
/// the window start instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinateMapper {
    window: TimeWindow,
    total_width_px: f64,
    pixels_per_second: f64,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(window: TimeWindow, total_width_px: f64) -> Self {
        Self {
            window,
            total_width_px,
            pixels_per_second: pixels_per_second(total_width_px, window),
        }
    }

    #[must_use]
    pub fn window(self) -> TimeWindow {
        self.window
    }

    #[must_use]
    pub fn total_width_px(self) -> f64 {
        self.total_width_px
    }

    #[must_use]
    pub fn pixels_per_second(self) -> f64 {
        self.pixels_per_second
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.pixels_per_second == 0.0
    }

    #[must_use]
    pub fn instant_to_pixel(self, instant: f64) -> f64 {
        if self.is_degenerate() || !instant.is_finite() {
            return 0.0;
        }
        (instant - self.window.start as f64) * self.pixels_per_second
    }

    #[must_use]
    pub fn pixel_to_instant(self, pixel: f64) -> f64 {
        if self.is_degenerate() || !pixel.is_finite() {
            return self.window.start as f64;
        }
        self.window.start as f64 + pixel / self.pixels_per_second
    }

    #[must_use]
    pub fn timestamp_to_pixel(self, instant: Timestamp) -> f64 {
        self.instant_to_pixel(instant as f64)
    }

    /// Maps a container-relative x (before scrolling) to an instant.
    #[must_use]
    pub fn viewport_pixel_to_instant(self, x: f64, viewport: Viewport) -> f64 {
        self.pixel_to_instant(x + viewport.scroll_left)
    }

    /// Converts a pixel distance into a signed duration in seconds.
    #[must_use]
    pub fn pixels_to_seconds(self, delta_px: f64) -> f64 {
        if self.is_degenerate() || !delta_px.is_finite() {
            return 0.0;
        }
        delta_px / self.pixels_per_second
    }

    /// Pixel extent of `[start, end)`, clipped so it never runs past the axis end.
    #[must_use]
    pub fn span_to_pixels(self, start: f64, end: f64) -> PixelSpan {
        let left = self.instant_to_pixel(start);
        let width = ((end - start) * self.pixels_per_second).max(0.0);
        let width = if left + width > self.total_width_px {
            (self.total_width_px - left).max(0.0)
        } else {
            width
        };
        PixelSpan { left, width }
    }

    /// Whether any part of `span` intersects the visible part of the container.
    #[must_use]
    pub fn is_span_visible(self, span: PixelSpan, viewport: Viewport) -> bool {
        if !viewport.is_valid() {
            return false;
        }
        let visible_start = viewport.scroll_left;
        let visible_end = viewport.scroll_left + viewport.width;
        span.left + span.width >= visible_start && span.left <= visible_end
    }
}

/// `total_width_px / window seconds`, or `0.0` for a degenerate input.
#[must_use]
pub fn pixels_per_second(total_width_px: f64, window: TimeWindow) -> f64 {
    if !window.is_valid() || !total_width_px.is_finite() || total_width_px <= 0.0 {
        return 0.0;
    }
    total_width_px / window.duration_seconds() as f64
}
