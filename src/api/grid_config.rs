use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::{
    DEFAULT_DAY_WIDTH, DEFAULT_LABEL_WIDTH_PX, DateTimeGrid, DateTimeScaleFormatter, FreeDays,
    Scale, TimeLine,
};
use crate::error::{GanttError, GanttResult};

pub const GRID_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Serializable grid setup.
///
/// Hosts persist this instead of a live [`DateTimeGrid`], which also carries
/// observers and change counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub start_date_time: NaiveDateTime,
    #[serde(default = "default_day_width")]
    pub day_width: f64,
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
    #[serde(default)]
    pub free_days: FreeDays,
    #[serde(default)]
    pub scale: Scale,
    #[serde(default)]
    pub user_defined_lower_scale: Option<DateTimeScaleFormatter>,
    #[serde(default)]
    pub user_defined_upper_scale: Option<DateTimeScaleFormatter>,
    #[serde(default)]
    pub row_separators: bool,
    #[serde(default = "default_label_width_px")]
    pub label_width_px: f64,
    #[serde(default)]
    pub time_line: TimeLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: GridConfig,
}

fn default_day_width() -> f64 {
    DEFAULT_DAY_WIDTH
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

fn default_label_width_px() -> f64 {
    DEFAULT_LABEL_WIDTH_PX
}

impl GridConfig {
    #[must_use]
    pub fn new(start_date_time: NaiveDateTime) -> Self {
        Self {
            start_date_time,
            day_width: default_day_width(),
            week_start: default_week_start(),
            free_days: FreeDays::default(),
            scale: Scale::default(),
            user_defined_lower_scale: None,
            user_defined_upper_scale: None,
            row_separators: false,
            label_width_px: default_label_width_px(),
            time_line: TimeLine::default(),
        }
    }

    #[must_use]
    pub fn with_day_width(mut self, day_width: f64) -> Self {
        self.day_width = day_width;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    #[must_use]
    pub fn with_free_days(mut self, free_days: FreeDays) -> Self {
        self.free_days = free_days;
        self
    }

    /// Rejects values that cannot come from a sane host.
    ///
    /// Small positive day widths are accepted here and clamped by the grid.
    pub fn validate(&self) -> GanttResult<()> {
        if !self.day_width.is_finite() || self.day_width <= 0.0 {
            return Err(GanttError::InvalidData(
                "grid day width must be finite and > 0".to_owned(),
            ));
        }
        if !self.label_width_px.is_finite() || self.label_width_px <= 0.0 {
            return Err(GanttError::InvalidData(
                "grid label width must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GanttError::InvalidData(format!("failed to serialize grid config: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> GanttResult<String> {
        let payload = GridConfigJsonContractV1 {
            schema_version: GRID_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GanttError::InvalidData(format!("failed to serialize grid config contract v1: {e}"))
        })
    }

    /// Parses either a bare config or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> GanttResult<Self> {
        let config = if let Ok(config) = serde_json::from_str::<GridConfig>(input) {
            config
        } else {
            let payload: GridConfigJsonContractV1 = serde_json::from_str(input).map_err(|e| {
                GanttError::InvalidData(format!("failed to parse grid config json payload: {e}"))
            })?;
            if payload.schema_version != GRID_CONFIG_JSON_SCHEMA_V1 {
                return Err(GanttError::InvalidData(format!(
                    "unsupported grid config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        };
        config.validate()?;
        Ok(config)
    }
}

impl DateTimeGrid {
    pub fn from_config(config: &GridConfig) -> GanttResult<Self> {
        config.validate()?;
        Ok(Self::new(config.start_date_time)
            .with_day_width(config.day_width)
            .with_week_start(config.week_start)
            .with_free_days(config.free_days)
            .with_scale(config.scale)
            .with_user_defined_scales(
                config.user_defined_lower_scale.clone(),
                config.user_defined_upper_scale.clone(),
            )
            .with_row_separators(config.row_separators)
            .with_label_width_px(config.label_width_px)
            .with_time_line(config.time_line))
    }

    /// Snapshot of the persistent settings, without observers.
    #[must_use]
    pub fn to_config(&self) -> GridConfig {
        GridConfig {
            start_date_time: self.start_date_time(),
            day_width: self.day_width(),
            week_start: self.week_start(),
            free_days: self.free_days(),
            scale: self.scale(),
            user_defined_lower_scale: self.user_defined_lower_scale().cloned(),
            user_defined_upper_scale: self.user_defined_upper_scale().cloned(),
            row_separators: self.row_separators(),
            label_width_px: self.label_width_px(),
            time_line: self.time_line(),
        }
    }
}
