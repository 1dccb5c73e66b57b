// Passive solar gain model: a smooth annual cycle of window gain driven
// by average irradiance. The result is reported alongside the energy
// estimate for downstream consumers; it is deliberately not folded into
// the ghost-meter accumulation.
use crate::config::EngineConfig;
use chrono::{Datelike, NaiveDate};
use std::f64::consts::PI;

/// Seasonal shading/efficiency factor for the given day of year.
///
/// A cosine with a 10-day offset peaks near the winter solstice (around
/// Dec 21, when a low sun shines deep into the windows) and bottoms out
/// in summer. The 0.15 floor keeps a residual diffuse-light gain
/// year-round. Bounded in [0.15, 1.0] and periodic with period 365.
pub fn shading_factor(day_of_year: u32) -> f64 {
    let phase = 2.0 * PI * (day_of_year as f64 + 10.0) / 365.0;
    0.15 + 0.85 * (phase.cos() + 1.0) / 2.0
}

/// Day of year for an ISO-like date string, or 1 when the date is missing
/// or unparseable. Never fails: a bad date degrades the seasonal factor,
/// it does not abort the analysis.
pub fn day_of_year(date: Option<&str>) -> u32 {
    date.and_then(parse_day_of_year).unwrap_or(1)
}

fn parse_day_of_year(date: &str) -> Option<u32> {
    let date = date.trim();
    // Accept bare dates and datetime strings with a date prefix.
    let candidate = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(candidate, "%Y-%m-%d")
        .ok()
        .map(|d| d.ordinal())
}

/// Estimated passive solar heat gain (kWh) for one day.
///
/// Gated on a positive indoor temperature and a supplied date: without
/// either there is no evidence the building envelope is in play, and the
/// gain is reported as zero.
pub fn solar_gain_kwh(
    date: Option<&str>,
    avg_irradiance_w_m2: f64,
    indoor_temp: f64,
    cfg: &EngineConfig,
) -> f64 {
    if indoor_temp <= 0.0 || date.is_none() {
        return 0.0;
    }
    let factor = shading_factor(day_of_year(date));
    avg_irradiance_w_m2 * 24.0 * cfg.window_area_m2 * cfg.glazing_g_value * factor / 1000.0
}
