use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::axis::MAX_AXIS_CELLS;
use crate::core::calendar::{RoundingBoundary, TimeUnit, units_between, validate_label_pattern};
use crate::core::window::compute_window;
use crate::error::{GanttError, GanttResult};

/// Calendar offset sizing the window on one side of the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowOffset {
    pub unit: TimeUnit,
    pub amount: i64,
}

impl WindowOffset {
    #[must_use]
    pub fn new(unit: TimeUnit, amount: i64) -> Self {
        Self { unit, amount }
    }
}

/// Coarse axis row: one tick per `unit`, `secondary_per_unit` base cells wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryTickSpec {
    pub unit: TimeUnit,
    pub label_format: String,
    pub secondary_per_unit: u32,
}

/// Fine axis row: one base cell every `step` units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryTickSpec {
    pub unit: TimeUnit,
    pub label_format: String,
    #[serde(default = "default_step")]
    pub step: u32,
}

fn default_step() -> u32 {
    1
}

/// Named zoom granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub name: String,
    pub rounding_boundary: RoundingBoundary,
    pub window_before: WindowOffset,
    pub window_after: WindowOffset,
    pub primary: PrimaryTickSpec,
    pub secondary: SecondaryTickSpec,
}

impl Period {
    fn validate(&self) -> GanttResult<()> {
        if self.name.trim().is_empty() {
            return Err(GanttError::InvalidData(
                "period name must not be empty".to_owned(),
            ));
        }
        if self.window_before.amount < 0 || self.window_after.amount < 0 {
            return Err(GanttError::InvalidData(format!(
                "period `{}` window offsets must be >= 0",
                self.name
            )));
        }
        if self.primary.secondary_per_unit == 0 {
            return Err(GanttError::InvalidData(format!(
                "period `{}` secondary_per_unit must be > 0",
                self.name
            )));
        }
        if self.secondary.step == 0 {
            return Err(GanttError::InvalidData(format!(
                "period `{}` secondary step must be > 0",
                self.name
            )));
        }
        validate_label_pattern(&self.primary.label_format)?;
        validate_label_pattern(&self.secondary.label_format)?;
        self.validate_axis_size()
    }

    /// Rejects periods whose window holds more axis cells than [`MAX_AXIS_CELLS`],
    /// measured around the epoch.
    fn validate_axis_size(&self) -> GanttResult<()> {
        let window = compute_window(0, self)?;
        let primary_count = units_between(window.start, window.end, self.primary.unit)?;
        let cells = primary_count.saturating_mul(i64::from(self.primary.secondary_per_unit));
        if cells > MAX_AXIS_CELLS {
            return Err(GanttError::InvalidData(format!(
                "period `{}` spans {cells} axis cells, more than {MAX_AXIS_CELLS}",
                self.name
            )));
        }
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn period(
    name: &str,
    rounding_boundary: RoundingBoundary,
    window: WindowOffset,
    primary_unit: TimeUnit,
    primary_format: &str,
    secondary_per_unit: u32,
    secondary_unit: TimeUnit,
    secondary_format: &str,
    step: u32,
) -> Period {
    Period {
        name: name.to_owned(),
        rounding_boundary,
        window_before: window,
        window_after: window,
        primary: PrimaryTickSpec {
            unit: primary_unit,
            label_format: primary_format.to_owned(),
            secondary_per_unit,
        },
        secondary: SecondaryTickSpec {
            unit: secondary_unit,
            label_format: secondary_format.to_owned(),
            step,
        },
    }
}

/// Ordered period lookup; order defines zoom adjacency (first = finest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Period>", into = "Vec<Period>")]
pub struct PeriodTable {
    periods: IndexMap<String, Period>,
}

impl Default for PeriodTable {
    fn default() -> Self {
        use RoundingBoundary as B;
        use TimeUnit as U;

        let defaults = [
            period(
                "hours",
                B::Day,
                WindowOffset::new(U::Hours, 2),
                U::Hours,
                "%H:%M %b %d %Y",
                6,
                U::Minutes,
                "%H:%M",
                10,
            ),
            period(
                "days",
                B::Day,
                WindowOffset::new(U::Days, 5),
                U::Days,
                "%a %d %b %Y",
                4,
                U::Hours,
                "%H:%M",
                6,
            ),
            period(
                "weeks",
                B::Week,
                WindowOffset::new(U::Months, 1),
                U::Weeks,
                "%a %d %b %Y",
                7,
                U::Days,
                "%d",
                1,
            ),
            period(
                "months",
                B::Year,
                WindowOffset::new(U::Years, 1),
                U::Months,
                "%b %Y",
                4,
                U::Weeks,
                "%U",
                1,
            ),
            period(
                "quarters",
                B::Year,
                WindowOffset::new(U::Years, 2),
                U::Quarters,
                "Q%Q %Y",
                3,
                U::Months,
                "%b",
                1,
            ),
            period(
                "years",
                B::Year,
                WindowOffset::new(U::Years, 5),
                U::Years,
                "%Y",
                4,
                U::Quarters,
                "Q%Q",
                1,
            ),
        ];

        Self {
            periods: defaults
                .into_iter()
                .map(|period| (period.name.clone(), period))
                .collect(),
        }
    }
}

impl PeriodTable {
    /// Builds a validated table; names must be unique.
    pub fn new(periods: Vec<Period>) -> GanttResult<Self> {
        if periods.is_empty() {
            return Err(GanttError::InvalidData(
                "period table must contain at least one period".to_owned(),
            ));
        }
        let mut table = IndexMap::with_capacity(periods.len());
        for period in periods {
            period.validate()?;
            if table.contains_key(&period.name) {
                return Err(GanttError::DuplicateId(period.name));
            }
            table.insert(period.name.clone(), period);
        }
        Ok(Self { periods: table })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Period> {
        self.periods.get(name)
    }

    pub fn require(&self, name: &str) -> GanttResult<&Period> {
        self.get(name)
            .ok_or_else(|| GanttError::UnknownPeriod(name.to_owned()))
    }

    /// Adjacent period `delta` steps away from `name`; `None` past either end.
    #[must_use]
    pub fn offset_from(&self, name: &str, delta: isize) -> Option<&Period> {
        let index = self.periods.get_index_of(name)?;
        let target = index.checked_add_signed(delta)?;
        self.periods.get_index(target).map(|(_, period)| period)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.periods.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

impl TryFrom<Vec<Period>> for PeriodTable {
    type Error = GanttError;

    fn try_from(periods: Vec<Period>) -> GanttResult<Self> {
        Self::new(periods)
    }
}

impl From<PeriodTable> for Vec<Period> {
    fn from(table: PeriodTable) -> Self {
        table.periods.into_values().collect()
    }
}
