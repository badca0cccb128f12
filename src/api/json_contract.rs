use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::calendar::{format_timestamp, parse_timestamp};
use crate::core::{ResourceId, TaskId, Timestamp};
use crate::error::{GanttError, GanttResult};

use super::validation::validate_settings;
use super::{DateRepresentation, GanttChart, GanttChartConfig, Resource, Settings, Task};

pub const CHART_JSON_SCHEMA_V1: u32 = 1;

/// Instant on the wire: epoch seconds or a string in `Settings::date_pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstantRecord {
    EpochSeconds(Timestamp),
    Formatted(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: TaskId,
    pub name: String,
    pub start: InstantRecord,
    pub end: InstantRecord,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub style: IndexMap<String, String>,
}

/// Serializable chart state. Previews of in-flight gestures are not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecord {
    pub id: String,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub resources: Vec<ResourceRecord>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartJsonContractV1 {
    pub schema_version: u32,
    pub chart: ChartRecord,
}

impl Settings {
    #[must_use]
    pub fn encode_instant(&self, instant: Timestamp) -> InstantRecord {
        match self.date_representation {
            DateRepresentation::EpochSeconds => InstantRecord::EpochSeconds(instant),
            DateRepresentation::Formatted => {
                InstantRecord::Formatted(format_timestamp(instant, &self.date_pattern))
            }
        }
    }

    /// Accepts either wire form regardless of `date_representation`.
    pub fn decode_instant(&self, record: &InstantRecord) -> GanttResult<Timestamp> {
        match record {
            InstantRecord::EpochSeconds(instant) => Ok(*instant),
            InstantRecord::Formatted(text) => parse_timestamp(text, &self.date_pattern)
                .or_else(|err| text.trim().parse::<Timestamp>().map_err(|_| err)),
        }
    }
}

impl ChartRecord {
    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GanttError::Serialization(format!("failed to serialize chart json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> GanttResult<String> {
        let payload = ChartJsonContractV1 {
            schema_version: CHART_JSON_SCHEMA_V1,
            chart: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GanttError::Serialization(format!("failed to serialize chart contract v1: {e}"))
        })
    }

    /// Parses either a bare chart record or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> GanttResult<Self> {
        if let Ok(record) = serde_json::from_str::<ChartRecord>(input) {
            return Ok(record);
        }
        let payload: ChartJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            GanttError::Serialization(format!("failed to parse chart json payload: {e}"))
        })?;
        if payload.schema_version != CHART_JSON_SCHEMA_V1 {
            return Err(GanttError::Serialization(format!(
                "unsupported chart schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.chart)
    }
}

impl GanttChart {
    #[must_use]
    pub fn to_record(&self) -> ChartRecord {
        ChartRecord {
            id: self.id.clone(),
            tasks: self
                .tasks
                .iter()
                .map(|task| TaskRecord {
                    id: task.id().clone(),
                    name: task.name().to_owned(),
                    start: self.settings.encode_instant(task.start()),
                    end: self.settings.encode_instant(task.end()),
                    resource_id: task.resource_id().cloned(),
                })
                .collect(),
            resources: self
                .resources
                .iter()
                .map(|resource| ResourceRecord {
                    id: resource.id().clone(),
                    name: resource.name().to_owned(),
                    style: resource.style().clone(),
                })
                .collect(),
            settings: self.settings.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> GanttResult<String> {
        self.to_record().to_json_pretty()
    }

    pub fn to_json_contract_v1_pretty(&self) -> GanttResult<String> {
        self.to_record().to_json_contract_v1_pretty()
    }

    /// Replaces settings, resources and tasks with the record's content and
    /// re-resolves every resource. The chart is unchanged on error.
    pub fn import_record(&mut self, record: ChartRecord) -> GanttResult<()> {
        validate_settings(&record.settings)?;

        let mut resources: Vec<Resource> = Vec::with_capacity(record.resources.len());
        for entry in record.resources {
            if resources.iter().any(|resource| resource.id() == &entry.id) {
                return Err(GanttError::DuplicateId(entry.id.to_string()));
            }
            resources.push(Resource::new(entry.id, entry.name).with_style(entry.style));
        }

        let mut tasks: Vec<Task> = Vec::with_capacity(record.tasks.len());
        for entry in record.tasks {
            if tasks.iter().any(|task| task.id() == &entry.id) {
                return Err(GanttError::DuplicateId(entry.id.to_string()));
            }
            let start = record.settings.decode_instant(&entry.start)?;
            let end = record.settings.decode_instant(&entry.end)?;
            tasks.push(Task::new(
                entry.id,
                entry.name,
                start,
                end,
                entry.resource_id,
            )?);
        }

        self.replace_settings(record.settings)?;
        self.id = record.id;
        self.resources = resources;
        self.tasks = tasks;
        self.resolve_all();

        debug!(
            chart = %self.id,
            resources = self.resources.len(),
            tasks = self.tasks.len(),
            "chart record imported"
        );
        Ok(())
    }

    /// Builds a chart from `config`, then imports `record` into it.
    pub fn from_record(record: ChartRecord, config: GanttChartConfig) -> GanttResult<Self> {
        let mut chart = Self::new(config.with_settings(record.settings.clone()))?;
        chart.import_record(record)?;
        Ok(chart)
    }

    pub fn from_json_compat_str(input: &str, config: GanttChartConfig) -> GanttResult<Self> {
        Self::from_record(ChartRecord::from_json_compat_str(input)?, config)
    }
}
