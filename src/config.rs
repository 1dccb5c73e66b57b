use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Named engine constants. The historical corpus drifted on several of
/// these (the supply-run threshold varied between 20 and 25 degC across
/// snapshots); the values here are the canonical set, overridable per
/// deployment through `ENGINE_*` environment variables.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EngineConfig {
    /// Minimum supply-minus-return difference (degC) to count a minute as
    /// a running minute. Rejects sensor noise around zero.
    pub delta_t_run_threshold_c: f64,
    /// Minimum supply temperature (degC) for the run classification.
    /// Rejects residual standing heat in a cooling loop.
    pub supply_min_temp_c: f64,
    /// Days with less water energy or electricity than this (kWh) are
    /// dropped from coefficient learning as unreliable signal.
    pub min_activity_kwh: f64,
    /// Coefficient returned whenever learning cannot produce a value.
    pub default_coefficient: f64,
    /// Clamp bounds for the recency-weighted coefficient estimate.
    pub coefficient_floor: f64,
    pub coefficient_ceiling: f64,
    /// Per-day electricity/water ratios outside this band are discarded
    /// as outliers by the weighted-ratio estimator.
    pub ratio_outlier_low: f64,
    pub ratio_outlier_high: f64,
    /// Number of most recent valid days the recency estimator sums over.
    pub recency_window_days: usize,
    /// Minimum valid history days before any estimation is attempted.
    pub min_valid_days: usize,
    /// Effective glazed window area (m2) for the solar gain model.
    pub window_area_m2: f64,
    /// Glazing transmittance (g-value) for the solar gain model.
    pub glazing_g_value: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delta_t_run_threshold_c: 0.4,
            supply_min_temp_c: 25.0,
            min_activity_kwh: 0.5,
            default_coefficient: 1.157,
            coefficient_floor: 0.7,
            coefficient_ceiling: 1.5,
            ratio_outlier_low: 0.8,
            ratio_outlier_high: 2.5,
            recency_window_days: 7,
            min_valid_days: 3,
            window_area_m2: 12.0,
            glazing_g_value: 0.6,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let mut engine = EngineConfig::default();
        if let Some(v) = env_f64("ENGINE_DELTA_T_THRESHOLD") {
            engine.delta_t_run_threshold_c = v;
        }
        if let Some(v) = env_f64("ENGINE_SUPPLY_MIN_TEMP") {
            engine.supply_min_temp_c = v;
        }
        if let Some(v) = env_f64("ENGINE_MIN_ACTIVITY_KWH") {
            engine.min_activity_kwh = v;
        }
        if let Some(v) = env_f64("ENGINE_DEFAULT_COEFFICIENT") {
            engine.default_coefficient = v;
        }

        Ok(Config {
            server: ServerConfig { host, port },
            engine,
        })
    }
}

fn env_f64(name: &str) -> Option<f64> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_config_matches_documented_constants() {
        let engine = EngineConfig::default();
        assert_eq!(engine.delta_t_run_threshold_c, 0.4);
        assert_eq!(engine.supply_min_temp_c, 25.0);
        assert_eq!(engine.default_coefficient, 1.157);
        assert_eq!(engine.recency_window_days, 7);
        assert_eq!(engine.min_valid_days, 3);
    }
}
