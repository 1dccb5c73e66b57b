// Energy distributor: splits one aggregate electricity delta across
// multiple days in proportion to each day's estimated water energy.

/// Water-energy weight for one day of the distribution window.
#[derive(Debug, Clone, PartialEq)]
pub struct DayWeight {
    pub date: String,
    pub water_kwh: f64,
}

/// One day's allocated share of the aggregate delta.
#[derive(Debug, Clone, PartialEq)]
pub struct DayShare {
    pub date: String,
    pub allocated_kwh: f64,
}

/// Allocates `total_delta` across the given days.
///
/// Each day receives a share proportional to its water-energy fraction;
/// a day with zero water energy receives exactly zero. When no heating
/// occurred anywhere in the window (zero total water energy) the delta is
/// split evenly instead, since the proportional rule is undefined there.
/// Input ordering is preserved and the shares sum to the total up to
/// floating-point rounding.
pub fn distribute(total_delta: f64, days: &[DayWeight]) -> Vec<DayShare> {
    if days.is_empty() {
        return Vec::new();
    }

    let total_water: f64 = days.iter().map(|d| d.water_kwh).sum();
    if total_water == 0.0 {
        let even = total_delta / days.len() as f64;
        return days
            .iter()
            .map(|d| DayShare {
                date: d.date.clone(),
                allocated_kwh: even,
            })
            .collect();
    }

    days.iter()
        .map(|d| DayShare {
            date: d.date.clone(),
            allocated_kwh: total_delta * (d.water_kwh / total_water),
        })
        .collect()
}
