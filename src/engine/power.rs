// Run classifier and power integrator: turns the resampled temperature
// grid into a daily energy figure plus run/off minute counts.
use crate::config::EngineConfig;
use crate::engine::resample::GridPoint;

/// kW of heat carried per (l/min of flow x degC of delta-T). Derived from
/// the specific heat capacity of water and the l/min -> kg/s conversion.
pub const WATER_HEAT_KW_PER_LPM_DEGC: f64 = 0.0697;

/// Minutes in the day-scoped analysis window.
pub const DAY_MINUTES: u32 = 1440;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyResult {
    pub kwh: f64,
    pub run_minutes: u32,
    pub off_minutes: u32,
}

impl EnergyResult {
    /// The defined result for a batch with no usable samples: zero energy
    /// and a full "off" day.
    pub fn empty() -> Self {
        Self {
            kwh: 0.0,
            run_minutes: 0,
            off_minutes: DAY_MINUTES,
        }
    }
}

/// Classifies each grid minute as running or off and integrates the
/// instantaneous-power series into kWh.
///
/// A minute is running when the delta-T exceeds the run threshold and the
/// supply temperature exceeds the minimum operating temperature; both
/// gates are needed to reject noise from a cooling residual loop.
/// Negative delta-T readings (return warmer than supply) are floored to
/// zero rather than treated as negative power.
///
/// Integration uses the trapezoidal rule over elapsed hours. The source
/// samples are irregular, so the area under the interpolated power curve
/// is a materially better estimate than a rectangular sum. Fewer than two
/// grid points define no area and yield zero energy.
pub fn integrate_power(grid: &[GridPoint], flow_rate: f64, cfg: &EngineConfig) -> EnergyResult {
    if grid.is_empty() {
        return EnergyResult::empty();
    }

    let mut run_minutes = 0u32;
    let mut powers = Vec::with_capacity(grid.len());
    for point in grid {
        let delta_t = (point.supply_temp - point.return_temp).max(0.0);
        let is_running = delta_t > cfg.delta_t_run_threshold_c
            && point.supply_temp > cfg.supply_min_temp_c;
        if is_running {
            run_minutes += 1;
        }
        let power_kw = if is_running {
            flow_rate * delta_t * WATER_HEAT_KW_PER_LPM_DEGC
        } else {
            0.0
        };
        powers.push((point.minute as f64 / 60.0, power_kw));
    }

    let mut kwh = 0.0;
    for pair in powers.windows(2) {
        let (t0, p0) = pair[0];
        let (t1, p1) = pair[1];
        kwh += (p0 + p1) / 2.0 * (t1 - t0);
    }

    EnergyResult {
        kwh: kwh.max(0.0),
        run_minutes,
        off_minutes: DAY_MINUTES.saturating_sub(run_minutes),
    }
}
