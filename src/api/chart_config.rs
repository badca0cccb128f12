use serde::{Deserialize, Serialize};

use crate::core::calendar::pattern_resolution_seconds;
use crate::core::{PeriodTable, Timestamp};

pub const DEFAULT_TIME_UNIT_WIDTH_PX: f64 = 40.0;
pub const DEFAULT_RESOURCE_ROW_HEIGHT_PX: f64 = 40.0;
pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_PERIOD: &str = "days";

/// How `start`/`end` instants are written by the serialization contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateRepresentation {
    #[default]
    EpochSeconds,
    /// Formatted with [`Settings::date_pattern`].
    Formatted,
}

/// Host-tunable chart behavior. Unknown keys are ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub snap_to_grid: bool,
    pub verbose: bool,
    /// Width of one secondary axis cell; also the horizontal snap grid.
    pub time_unit_width_px: f64,
    /// Height of one lane slot; also the vertical snap grid.
    pub resource_row_height_px: f64,
    pub date_pattern: String,
    pub date_representation: DateRepresentation,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snap_to_grid: false,
            verbose: false,
            time_unit_width_px: DEFAULT_TIME_UNIT_WIDTH_PX,
            resource_row_height_px: DEFAULT_RESOURCE_ROW_HEIGHT_PX,
            date_pattern: DEFAULT_DATE_PATTERN.to_owned(),
            date_representation: DateRepresentation::EpochSeconds,
        }
    }
}

/// Partial settings update; only recognized keys are applied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub snap_to_grid: Option<bool>,
    pub verbose: Option<bool>,
    pub time_unit_width_px: Option<f64>,
    pub resource_row_height_px: Option<f64>,
    pub date_pattern: Option<String>,
    pub date_representation: Option<DateRepresentation>,
}

impl Settings {
    #[must_use]
    pub fn patched(&self, patch: SettingsPatch) -> Self {
        let mut next = self.clone();
        if let Some(value) = patch.snap_to_grid {
            next.snap_to_grid = value;
        }
        if let Some(value) = patch.verbose {
            next.verbose = value;
        }
        if let Some(value) = patch.time_unit_width_px {
            next.time_unit_width_px = value;
        }
        if let Some(value) = patch.resource_row_height_px {
            next.resource_row_height_px = value;
        }
        if let Some(value) = patch.date_pattern {
            next.date_pattern = value;
        }
        if let Some(value) = patch.date_representation {
            next.date_representation = value;
        }
        next
    }

    /// Step committed instants snap to so they survive the configured wire form.
    #[must_use]
    pub fn commit_resolution_seconds(&self) -> i64 {
        match self.date_representation {
            DateRepresentation::EpochSeconds => 1,
            DateRepresentation::Formatted => pattern_resolution_seconds(&self.date_pattern),
        }
    }
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_owned()
}

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can persist chart setup alongside their data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttChartConfig {
    #[serde(default)]
    pub id: Option<String>,
    /// Instant the visible window is built around.
    pub anchor: Timestamp,
    #[serde(default = "default_period")]
    pub period: String,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub periods: PeriodTable,
}

impl GanttChartConfig {
    #[must_use]
    pub fn new(anchor: Timestamp) -> Self {
        Self {
            id: None,
            anchor,
            period: default_period(),
            settings: Settings::default(),
            periods: PeriodTable::default(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = period.into();
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_snap_to_grid(mut self, snap_to_grid: bool) -> Self {
        self.settings.snap_to_grid = snap_to_grid;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.settings.verbose = verbose;
        self
    }

    /// Replaces the built-in period table.
    #[must_use]
    pub fn with_periods(mut self, periods: PeriodTable) -> Self {
        self.periods = periods;
        self
    }
}
