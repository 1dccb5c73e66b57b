// Ghost meter: there is no physical electricity meter on the boiler
// circuit, so the estimated water energy, scaled by the learned
// coefficient, is accumulated into a simulated cumulative reading.

/// Advances the simulated meter by one day's estimated consumption.
///
/// Plain arithmetic with no clamping: the caller owns the previous value
/// and a negative previous reading passes through unchanged.
pub fn advance(previous_value: f64, water_kwh: f64, coefficient: f64) -> f64 {
    previous_value + water_kwh * coefficient
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_scaled_water_energy() {
        let next = advance(100.0, 10.0, 1.157);
        assert!((next - 111.57).abs() < 1e-12);
    }

    #[test]
    fn zero_energy_leaves_the_meter_unchanged() {
        assert_eq!(advance(42.5, 0.0, 1.157), 42.5);
    }

    #[test]
    fn negative_previous_value_passes_through() {
        let next = advance(-5.0, 2.0, 1.0);
        assert_eq!(next, -3.0);
    }
}
