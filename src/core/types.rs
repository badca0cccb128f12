use serde::{Deserialize, Serialize};

/// Calendar instant as whole UTC epoch seconds.
pub type Timestamp = i64;

/// Pointer position in the scrollable timeline container's coordinate space.
///
/// Callers add their own scroll offset before handing positions to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Externally supplied visible region of the timeline container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub scroll_left: f64,
    pub width: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(scroll_left: f64, width: f64) -> Self {
        Self { scroll_left, width }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.scroll_left.is_finite() && self.width.is_finite() && self.width > 0.0
    }
}

/// Half-open calendar window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    #[must_use]
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// A window is usable only when it has positive length.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.end > self.start
    }

    #[must_use]
    pub fn duration_seconds(self) -> i64 {
        self.end.saturating_sub(self.start).max(0)
    }

    #[must_use]
    pub fn contains(self, instant: Timestamp) -> bool {
        instant >= self.start && instant < self.end
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Stable task identifier.
    TaskId
);
string_id!(
    /// Stable resource identifier.
    ResourceId
);
