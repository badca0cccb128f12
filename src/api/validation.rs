use crate::core::calendar::validate_label_pattern;
use crate::error::{GanttError, GanttResult};

use super::Settings;

pub(super) fn validate_settings(settings: &Settings) -> GanttResult<()> {
    if !settings.time_unit_width_px.is_finite() || settings.time_unit_width_px <= 0.0 {
        return Err(GanttError::InvalidData(
            "time unit width must be finite and > 0".to_owned(),
        ));
    }
    if !settings.resource_row_height_px.is_finite() || settings.resource_row_height_px <= 0.0 {
        return Err(GanttError::InvalidData(
            "resource row height must be finite and > 0".to_owned(),
        ));
    }
    if settings.date_pattern.trim().is_empty() {
        return Err(GanttError::InvalidData(
            "date pattern must not be empty".to_owned(),
        ));
    }
    validate_label_pattern(&settings.date_pattern)
}
