// Coefficient learner: turns a history of (estimated water energy,
// metered electricity) day pairs into a robust scaling factor. Total by
// construction: every degenerate input degrades to the safe default.
use crate::config::EngineConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the history's electricity column is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    /// Cumulative meter readings; daily usage is the difference between
    /// consecutive days. The first day has no predecessor and counts as
    /// zero usage.
    #[default]
    Delta,
    /// Already-daily usage figures; no differencing.
    Direct,
}

/// Which estimation formula to run. The two answer slightly different
/// questions (short-term recency vs. long-term robust average) and are
/// deliberately not unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientStrategy {
    /// Sum of the most recent valid days, clamped to a safe band.
    #[default]
    Recency,
    /// Water-weighted average of per-day ratios after outlier removal.
    /// The outlier filter substitutes for clamping; no clamp afterwards.
    WeightedRatio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientStatus {
    Computed,
    InsufficientData,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientEstimate {
    pub value: f64,
    pub status: CoefficientStatus,
    pub sample_size: Option<usize>,
    pub detail: String,
}

impl CoefficientEstimate {
    fn default_with(cfg: &EngineConfig, status: CoefficientStatus, detail: String) -> Self {
        Self {
            value: cfg.default_coefficient,
            status,
            sample_size: None,
            detail,
        }
    }
}

/// One history day with an already-parsed date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayObservation {
    pub date: NaiveDate,
    pub water_kwh: f64,
    pub electricity: f64,
}

/// Learns the water-to-electricity coefficient from day history.
///
/// The history is sorted by date, differenced if the electricity column
/// carries cumulative readings, and filtered down to days with real
/// heating activity on both channels. Fewer than `min_valid_days` of
/// signal, a zero water sum, or a fully outlier-filtered history all
/// return the safe default rather than an unstable estimate.
pub fn learn_coefficient(
    history: &[DayObservation],
    mode: HistoryMode,
    strategy: CoefficientStrategy,
    cfg: &EngineConfig,
) -> CoefficientEstimate {
    let valid = valid_days(history, mode, cfg);

    if valid.len() < cfg.min_valid_days {
        return CoefficientEstimate::default_with(
            cfg,
            CoefficientStatus::InsufficientData,
            format!(
                "only {} valid days, need {}",
                valid.len(),
                cfg.min_valid_days
            ),
        );
    }

    match strategy {
        CoefficientStrategy::Recency => estimate_recency(&valid, cfg),
        CoefficientStrategy::WeightedRatio => estimate_weighted_ratio(&valid, cfg),
    }
}

/// Days carrying usable signal: (water kWh, daily electricity kWh) pairs
/// where both channels exceed the activity floor. Non-finite values are
/// treated as no signal.
fn valid_days(history: &[DayObservation], mode: HistoryMode, cfg: &EngineConfig) -> Vec<(f64, f64)> {
    let mut sorted: Vec<DayObservation> = history
        .iter()
        .copied()
        .filter(|d| d.water_kwh.is_finite() && d.electricity.is_finite())
        .collect();
    sorted.sort_by_key(|d| d.date);

    let mut days = Vec::with_capacity(sorted.len());
    for (i, day) in sorted.iter().enumerate() {
        let usage = match mode {
            HistoryMode::Delta => {
                if i == 0 {
                    0.0
                } else {
                    day.electricity - sorted[i - 1].electricity
                }
            }
            HistoryMode::Direct => day.electricity,
        };
        if day.water_kwh > cfg.min_activity_kwh && usage > cfg.min_activity_kwh {
            days.push((day.water_kwh, usage));
        }
    }
    days
}

/// Estimation A: sum electricity and water over the most recent valid
/// days and take the ratio of the sums, clamped to the safe band. The
/// rolling sum smooths out single-day swings from solar gain and the
/// building's thermal inertia.
fn estimate_recency(valid: &[(f64, f64)], cfg: &EngineConfig) -> CoefficientEstimate {
    let window = &valid[valid.len().saturating_sub(cfg.recency_window_days)..];
    let sum_water: f64 = window.iter().map(|(w, _)| w).sum();
    let sum_ele: f64 = window.iter().map(|(_, e)| e).sum();

    if sum_water == 0.0 {
        return CoefficientEstimate::default_with(
            cfg,
            CoefficientStatus::Fallback,
            "zero water energy over the recency window".to_string(),
        );
    }

    let raw = sum_ele / sum_water;
    CoefficientEstimate {
        value: raw.clamp(cfg.coefficient_floor, cfg.coefficient_ceiling),
        status: CoefficientStatus::Computed,
        sample_size: Some(window.len()),
        detail: format!("computed from {} days (raw {:.3})", window.len(), raw),
    }
}

/// Estimation B: per-day electricity/water ratios, outliers discarded,
/// then a water-weighted average of the survivors. Days with more water
/// energy get proportionally more influence since fixed measurement
/// error matters less for them.
fn estimate_weighted_ratio(valid: &[(f64, f64)], cfg: &EngineConfig) -> CoefficientEstimate {
    let mut weighted_sum = 0.0;
    let mut weight = 0.0;
    let mut kept = 0usize;
    for &(water, ele) in valid {
        if water == 0.0 {
            continue;
        }
        let ratio = ele / water;
        if ratio < cfg.ratio_outlier_low || ratio > cfg.ratio_outlier_high {
            continue;
        }
        weighted_sum += ratio * water;
        weight += water;
        kept += 1;
    }

    if kept == 0 || weight == 0.0 {
        return CoefficientEstimate::default_with(
            cfg,
            CoefficientStatus::Fallback,
            "all day ratios filtered as outliers".to_string(),
        );
    }

    let value = weighted_sum / weight;
    CoefficientEstimate {
        value,
        status: CoefficientStatus::Computed,
        sample_size: Some(kept),
        detail: format!("weighted average of {kept} day ratios"),
    }
}
