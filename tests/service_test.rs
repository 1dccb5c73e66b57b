// End-to-end scenarios driven through the service layer, the same way a
// transport caller would use it.

use boiler_energy_api::config::EngineConfig;
use boiler_energy_api::engine::coefficient::{CoefficientStatus, CoefficientStrategy, HistoryMode};
use boiler_energy_api::models::{
    CoefficientRequest, DailyWaterLog, DayAnalysisRequest, DistributionRequest, HistoryDayRecord,
    SensorSample,
};
use boiler_energy_api::EnergyService;

fn service() -> EnergyService {
    EnergyService::new(EngineConfig::default())
}

fn day_request(samples: Vec<SensorSample>) -> DayAnalysisRequest {
    DayAnalysisRequest {
        samples,
        flow_rate: 10.0,
        indoor_temperature: None,
        solar_avg: None,
        previous_meter_value: None,
        date: None,
        current_coefficient: None,
    }
}

fn sample(timestamp: &str, supply: f64, ret: f64) -> SensorSample {
    SensorSample {
        timestamp: timestamp.to_string(),
        supply_temp: supply,
        return_temp: ret,
    }
}

fn history(records: &[(&str, f64, f64)]) -> Vec<HistoryDayRecord> {
    records
        .iter()
        .map(|&(date, water, ele)| HistoryDayRecord {
            date: date.to_string(),
            water_energy: water,
            electricity_usage: ele,
        })
        .collect()
}

#[test]
fn empty_sample_batch_is_a_zero_energy_full_off_day() {
    let resp = service().analyze_day(day_request(vec![])).unwrap();
    assert_eq!(resp.kwh, 0.0);
    assert_eq!(resp.run_minutes, 0);
    assert_eq!(resp.off_minutes, 1440);
}

#[test]
fn noisy_reversed_temperatures_never_produce_negative_energy() {
    let samples = vec![
        sample("2024-01-15T06:00:00", 30.0, 45.0),
        sample("2024-01-15T06:30:00", 28.0, 44.0),
        sample("2024-01-15T07:00:00", 31.0, 46.0),
    ];
    let resp = service().analyze_day(day_request(samples)).unwrap();
    assert!(resp.kwh >= 0.0);
    assert_eq!(resp.run_minutes + resp.off_minutes, 1440);
}

#[test]
fn morning_burn_integrates_and_advances_the_meter() {
    // Burner running 06:00-08:00 at a steady 10 degC delta-T, then off.
    let samples = vec![
        sample("2024-01-15T06:00:00", 55.0, 45.0),
        sample("2024-01-15T07:00:00", 55.0, 45.0),
        sample("2024-01-15T08:00:00", 55.0, 45.0),
        sample("2024-01-15T08:05:00", 22.0, 21.9),
    ];
    let mut req = day_request(samples);
    req.previous_meter_value = Some(1000.0);
    req.current_coefficient = Some(1.1);
    let resp = service().analyze_day(req).unwrap();

    assert!(resp.kwh > 13.0 && resp.kwh < 15.0);
    assert!(resp.run_minutes >= 120);
    assert_eq!(resp.run_minutes + resp.off_minutes, 1440);
    assert!((resp.new_meter_value - (1000.0 + resp.kwh * 1.1)).abs() < 1e-9);
}

#[test]
fn three_cumulative_readings_leave_too_few_valid_days() {
    // Cumulative meter 0, 1, 2: differencing gives usage 0, 1, 1 and the
    // first day drops out, leaving 2 valid days. The documented rule is
    // strict: fewer than 3 valid days means the safe default.
    let resp = service()
        .learn_coefficient(CoefficientRequest {
            history: history(&[
                ("2024-01-01", 1.0, 0.0),
                ("2024-01-02", 1.0, 1.0),
                ("2024-01-03", 1.0, 2.0),
            ]),
            mode: HistoryMode::Delta,
            strategy: CoefficientStrategy::Recency,
        })
        .unwrap();
    assert_eq!(resp.coefficient, 1.157);
    assert_eq!(resp.status, CoefficientStatus::InsufficientData);
}

#[test]
fn four_cumulative_readings_compute_the_sum_ratio() {
    // Cumulative 0, 1, 2, 3 -> three valid days of usage 1 against water
    // 1 each: raw coefficient 1.0, inside the clamp band.
    let resp = service()
        .learn_coefficient(CoefficientRequest {
            history: history(&[
                ("2024-01-01", 1.0, 0.0),
                ("2024-01-02", 1.0, 1.0),
                ("2024-01-03", 1.0, 2.0),
                ("2024-01-04", 1.0, 3.0),
            ]),
            mode: HistoryMode::Delta,
            strategy: CoefficientStrategy::Recency,
        })
        .unwrap();
    assert_eq!(resp.coefficient, 1.0);
    assert_eq!(resp.status, CoefficientStatus::Computed);
    assert_eq!(resp.sample_size, Some(3));
}

#[test]
fn strategies_answer_differently_on_the_same_history() {
    // Every day's ratio is 2.0: recency clamps to 1.5, the weighted
    // average keeps 2.0 because the outlier band allows it.
    let records = history(&[
        ("2024-01-01", 10.0, 20.0),
        ("2024-01-02", 10.0, 20.0),
        ("2024-01-03", 10.0, 20.0),
    ]);
    let recency = service()
        .learn_coefficient(CoefficientRequest {
            history: records.clone(),
            mode: HistoryMode::Direct,
            strategy: CoefficientStrategy::Recency,
        })
        .unwrap();
    let weighted = service()
        .learn_coefficient(CoefficientRequest {
            history: records,
            mode: HistoryMode::Direct,
            strategy: CoefficientStrategy::WeightedRatio,
        })
        .unwrap();
    assert_eq!(recency.coefficient, 1.5);
    assert_eq!(weighted.coefficient, 2.0);
}

#[test]
fn aggregate_delta_splits_proportionally() {
    let resp = service()
        .distribute(DistributionRequest {
            total_electricity_delta: 10.0,
            daily_water_logs: vec![
                DailyWaterLog {
                    date: "A".to_string(),
                    water_energy: 5.0,
                },
                DailyWaterLog {
                    date: "B".to_string(),
                    water_energy: 5.0,
                },
            ],
        })
        .unwrap();
    assert_eq!(resp.results[0].allocated_electricity, 5.0);
    assert_eq!(resp.results[1].allocated_electricity, 5.0);
}

#[test]
fn aggregate_delta_splits_evenly_without_heating() {
    let resp = service()
        .distribute(DistributionRequest {
            total_electricity_delta: 10.0,
            daily_water_logs: vec![
                DailyWaterLog {
                    date: "A".to_string(),
                    water_energy: 0.0,
                },
                DailyWaterLog {
                    date: "B".to_string(),
                    water_energy: 0.0,
                },
            ],
        })
        .unwrap();
    assert_eq!(resp.results[0].allocated_electricity, 5.0);
    assert_eq!(resp.results[1].allocated_electricity, 5.0);
}
