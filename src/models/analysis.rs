use serde::{Deserialize, Serialize};

use crate::engine::coefficient::{CoefficientStatus, CoefficientStrategy, HistoryMode};

/// One raw temperature reading from the boiler circuit logger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSample {
    /// ISO-like date/time string, e.g. "2024-01-15T06:30:00".
    pub timestamp: String,
    pub supply_temp: f64,
    pub return_temp: f64,
}

/// One day's batch of sensor readings plus the context needed to turn
/// them into an energy estimate and a new ghost-meter value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAnalysisRequest {
    #[serde(default)]
    pub samples: Vec<SensorSample>,
    /// Circulation flow rate in l/min, constant for the batch.
    pub flow_rate: f64,
    #[serde(default)]
    pub indoor_temperature: Option<f64>,
    /// Average solar irradiance over the day in W/m2.
    #[serde(default)]
    pub solar_avg: Option<f64>,
    #[serde(default)]
    pub previous_meter_value: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub current_coefficient: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAnalysisResponse {
    pub kwh: f64,
    pub run_minutes: u32,
    pub off_minutes: u32,
    pub new_meter_value: f64,
    /// Estimated passive solar gain, reported for downstream consumers.
    /// Not part of the meter accumulation.
    pub solar_gain: f64,
    pub used_coefficient: f64,
    /// Set when the analysis degraded (e.g. unparseable samples were
    /// dropped); the numeric fields are still well-formed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One day of learning history. In `delta` mode `electricity_usage`
/// carries the cumulative meter reading for that day; in `direct` mode
/// it is the day's usage itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryDayRecord {
    pub date: String,
    pub water_energy: f64,
    pub electricity_usage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoefficientRequest {
    #[serde(default)]
    pub history: Vec<HistoryDayRecord>,
    #[serde(default)]
    pub mode: HistoryMode,
    #[serde(default)]
    pub strategy: CoefficientStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoefficientResponse {
    pub coefficient: f64,
    pub status: CoefficientStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<usize>,
    /// Human-readable account of how the value was obtained.
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyWaterLog {
    pub date: String,
    pub water_energy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionRequest {
    pub total_electricity_delta: f64,
    #[serde(default)]
    pub daily_water_logs: Vec<DailyWaterLog>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAllocation {
    pub date: String,
    pub allocated_electricity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionResponse {
    pub results: Vec<DayAllocation>,
}
