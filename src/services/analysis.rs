use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::config::EngineConfig;
use crate::engine::coefficient::{learn_coefficient, DayObservation};
use crate::engine::distribution::{distribute, DayWeight};
use crate::engine::meter;
use crate::engine::power::integrate_power;
use crate::engine::resample::{resample_minutely, ParsedSample};
use crate::engine::solar::solar_gain_kwh;
use crate::error::{AppError, Result};
use crate::models::{
    CoefficientRequest, CoefficientResponse, DayAllocation, DayAnalysisRequest,
    DayAnalysisResponse, DistributionRequest, DistributionResponse,
};

/// Orchestrates the pure engine components. Stateless per call: all
/// prior state (previous meter value, current coefficient) arrives in
/// the request, so clones of the service can serve requests concurrently
/// with no coordination.
#[derive(Clone)]
pub struct EnergyService {
    engine: EngineConfig,
}

impl EnergyService {
    pub fn new(engine: EngineConfig) -> Self {
        Self { engine }
    }

    /// Analyzes one day's sensor batch: resample, classify, integrate,
    /// model solar gain and advance the ghost meter.
    ///
    /// Unparseable or non-finite samples are dropped, not fatal; if
    /// nothing usable remains the result degrades to the defined empty
    /// day (zero energy, full off minutes) with an `error` annotation.
    pub fn analyze_day(&self, req: DayAnalysisRequest) -> Result<DayAnalysisResponse> {
        validate_finite("flow_rate", req.flow_rate)?;
        if req.flow_rate < 0.0 {
            return Err(AppError::Validation(
                "flow_rate must be non-negative".to_string(),
            ));
        }
        for (name, value) in [
            ("indoor_temperature", req.indoor_temperature),
            ("solar_avg", req.solar_avg),
            ("previous_meter_value", req.previous_meter_value),
            ("current_coefficient", req.current_coefficient),
        ] {
            if let Some(v) = value {
                validate_finite(name, v)?;
            }
        }

        let mut parsed = Vec::with_capacity(req.samples.len());
        for sample in &req.samples {
            if !sample.supply_temp.is_finite() || !sample.return_temp.is_finite() {
                continue;
            }
            if let Some(ts) = parse_timestamp(&sample.timestamp) {
                parsed.push(ParsedSample {
                    ts,
                    supply_temp: sample.supply_temp,
                    return_temp: sample.return_temp,
                });
            }
        }
        let dropped = req.samples.len() - parsed.len();
        let error = if !req.samples.is_empty() && parsed.is_empty() {
            warn!("no parseable samples in batch, returning empty result");
            Some("no parseable samples; returning empty result".to_string())
        } else if dropped > 0 {
            warn!(dropped, "dropped unparseable samples from batch");
            Some(format!("dropped {dropped} unparseable samples"))
        } else {
            None
        };

        let grid = resample_minutely(&parsed);
        let energy = integrate_power(&grid, req.flow_rate, &self.engine);

        let solar_gain = solar_gain_kwh(
            req.date.as_deref(),
            req.solar_avg.unwrap_or(0.0),
            req.indoor_temperature.unwrap_or(0.0),
            &self.engine,
        );

        let used_coefficient = req
            .current_coefficient
            .unwrap_or(self.engine.default_coefficient);
        let new_meter_value = meter::advance(
            req.previous_meter_value.unwrap_or(0.0),
            energy.kwh,
            used_coefficient,
        );

        Ok(DayAnalysisResponse {
            kwh: energy.kwh,
            run_minutes: energy.run_minutes,
            off_minutes: energy.off_minutes,
            new_meter_value,
            solar_gain,
            used_coefficient,
            error,
        })
    }

    /// Learns the water-to-electricity coefficient from day history.
    /// Records with unparseable dates are dropped before estimation;
    /// degenerate histories come back as the safe default with an
    /// explanatory status, never as an error.
    pub fn learn_coefficient(&self, req: CoefficientRequest) -> Result<CoefficientResponse> {
        let mut observations = Vec::with_capacity(req.history.len());
        for record in &req.history {
            match parse_date(&record.date) {
                Some(date) => observations.push(DayObservation {
                    date,
                    water_kwh: record.water_energy,
                    electricity: record.electricity_usage,
                }),
                None => warn!(date = %record.date, "dropping history record with unparseable date"),
            }
        }

        let estimate = learn_coefficient(&observations, req.mode, req.strategy, &self.engine);
        Ok(CoefficientResponse {
            coefficient: round3(estimate.value),
            status: estimate.status,
            sample_size: estimate.sample_size,
            detail: estimate.detail,
        })
    }

    /// Splits one aggregate electricity delta across days, weighted by
    /// each day's estimated water energy.
    pub fn distribute(&self, req: DistributionRequest) -> Result<DistributionResponse> {
        validate_finite("total_electricity_delta", req.total_electricity_delta)?;
        for log in &req.daily_water_logs {
            validate_finite("water_energy", log.water_energy)?;
        }

        let weights: Vec<DayWeight> = req
            .daily_water_logs
            .iter()
            .map(|log| DayWeight {
                date: log.date.clone(),
                water_kwh: log.water_energy,
            })
            .collect();

        let results = distribute(req.total_electricity_delta, &weights)
            .into_iter()
            .map(|share| DayAllocation {
                date: share.date,
                allocated_electricity: share.allocated_kwh,
            })
            .collect();

        Ok(DistributionResponse { results })
    }
}

fn validate_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AppError::Validation(format!("{name} must be finite")));
    }
    Ok(())
}

/// Accepts the logger's timestamp shapes: RFC 3339 with offset, or a
/// naive "YYYY-MM-DDTHH:MM:SS" / "YYYY-MM-DD HH:MM:SS" string.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let candidate = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(candidate, "%Y-%m-%d").ok()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
