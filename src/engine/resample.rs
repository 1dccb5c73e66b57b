// Time-series normalizer: reconstructs a uniform per-minute temperature
// grid from sparse, unevenly spaced sensor samples.
use chrono::{Duration, NaiveDateTime};

/// A raw sensor sample with an already-parsed timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedSample {
    pub ts: NaiveDateTime,
    pub supply_temp: f64,
    pub return_temp: f64,
}

/// One point on the uniform 1-minute grid. `minute` is the offset from
/// the first observed timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub minute: i64,
    pub supply_temp: f64,
    pub return_temp: f64,
}

/// Resamples irregular sensor readings onto a 1-minute grid spanning the
/// observed time range.
///
/// Samples are sorted by timestamp and duplicates at the same instant are
/// averaged. Grid values are linearly interpolated between the bracketing
/// real observations; a grid minute that coincides with a sample takes the
/// sample value. With a single sample the grid degenerates to that one
/// point. The grid never extends past the observed range, and an empty
/// input yields an empty grid.
pub fn resample_minutely(samples: &[ParsedSample]) -> Vec<GridPoint> {
    let samples = sort_and_collapse(samples);
    if samples.is_empty() {
        return Vec::new();
    }
    if samples.len() == 1 {
        let s = samples[0];
        return vec![GridPoint {
            minute: 0,
            supply_temp: s.supply_temp,
            return_temp: s.return_temp,
        }];
    }

    let first = samples[0].ts;
    let last = samples[samples.len() - 1].ts;
    let span_minutes = (last - first).num_minutes();

    let mut grid = Vec::with_capacity(span_minutes as usize + 1);
    let mut idx = 0usize;
    for minute in 0..=span_minutes {
        let at = first + Duration::minutes(minute);
        while idx + 1 < samples.len() - 1 && samples[idx + 1].ts <= at {
            idx += 1;
        }
        let (lo, hi) = (samples[idx], samples[idx + 1]);
        let (supply_temp, return_temp) = interpolate(lo, hi, at);
        grid.push(GridPoint {
            minute,
            supply_temp,
            return_temp,
        });
    }
    grid
}

fn interpolate(lo: ParsedSample, hi: ParsedSample, at: NaiveDateTime) -> (f64, f64) {
    if at <= lo.ts {
        return (lo.supply_temp, lo.return_temp);
    }
    if at >= hi.ts {
        return (hi.supply_temp, hi.return_temp);
    }
    let span = (hi.ts - lo.ts).num_seconds() as f64;
    let offset = (at - lo.ts).num_seconds() as f64;
    let frac = offset / span;
    (
        lo.supply_temp + (hi.supply_temp - lo.supply_temp) * frac,
        lo.return_temp + (hi.return_temp - lo.return_temp) * frac,
    )
}

/// Sorts by timestamp and averages samples that share the same instant.
fn sort_and_collapse(samples: &[ParsedSample]) -> Vec<ParsedSample> {
    let mut sorted: Vec<ParsedSample> = samples.to_vec();
    sorted.sort_by_key(|s| s.ts);

    let mut collapsed: Vec<ParsedSample> = Vec::with_capacity(sorted.len());
    for s in sorted {
        match collapsed.last_mut() {
            Some(prev) if prev.ts == s.ts => {
                prev.supply_temp = (prev.supply_temp + s.supply_temp) / 2.0;
                prev.return_temp = (prev.return_temp + s.return_temp) / 2.0;
            }
            _ => collapsed.push(s),
        }
    }
    collapsed
}
