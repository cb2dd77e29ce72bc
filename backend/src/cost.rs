use crate::error::TripError;

/// Fuel cost of driving `distance_km` at `mileage` (km per unit) and `unit_price`.
///
/// Mileage and price must be strictly positive and the distance non-negative;
/// anything else is rejected rather than clamped.
pub fn estimate_cost(distance_km: f64, mileage: f64, unit_price: f64) -> Result<f64, TripError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(TripError::invalid(
            "distance",
            format!("expected a non-negative distance, got {distance_km}"),
        ));
    }
    check_positive("mileage", mileage)?;
    check_positive("unit price", unit_price)?;

    Ok(distance_km / mileage * unit_price)
}

pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), TripError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TripError::invalid(
            field,
            format!("expected a positive number, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_formula() {
        let cost = estimate_cost(150.0, 15.0, 100.0).expect("cost");
        assert!((cost - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_distance_is_free() {
        assert_eq!(estimate_cost(0.0, 12.0, 95.0).expect("cost"), 0.0);
    }

    #[test]
    fn test_rejects_zero_mileage() {
        let err = estimate_cost(10.0, 0.0, 100.0).unwrap_err();
        assert!(matches!(err, TripError::InvalidInput { field: "mileage", .. }));
    }

    #[test]
    fn test_rejects_negative_mileage() {
        let err = estimate_cost(10.0, -1.0, 100.0).unwrap_err();
        assert!(matches!(err, TripError::InvalidInput { field: "mileage", .. }));
    }

    #[test]
    fn test_rejects_non_positive_price() {
        assert!(matches!(
            estimate_cost(10.0, 12.0, 0.0),
            Err(TripError::InvalidInput { field: "unit price", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_distance() {
        assert!(estimate_cost(-5.0, 12.0, 100.0).is_err());
        assert!(estimate_cost(f64::NAN, 12.0, 100.0).is_err());
        assert!(estimate_cost(10.0, f64::INFINITY, 100.0).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_matches_formula(d in 0.0..5_000.0f64, m in 0.1..50.0f64, p in 0.1..500.0f64) {
                let cost = estimate_cost(d, m, p).unwrap();
                prop_assert!((cost - d / m * p).abs() < 1e-9);
            }

            #[test]
            fn prop_non_decreasing_in_distance(d in 0.0..5_000.0f64, extra in 0.0..500.0f64, m in 0.1..50.0f64, p in 0.1..500.0f64) {
                prop_assert!(estimate_cost(d + extra, m, p).unwrap() >= estimate_cost(d, m, p).unwrap());
            }

            #[test]
            fn prop_non_decreasing_in_price(d in 0.0..5_000.0f64, m in 0.1..50.0f64, p in 0.1..500.0f64, extra in 0.0..100.0f64) {
                prop_assert!(estimate_cost(d, m, p + extra).unwrap() >= estimate_cost(d, m, p).unwrap());
            }

            #[test]
            fn prop_non_increasing_in_mileage(d in 0.0..5_000.0f64, m in 0.1..50.0f64, extra in 0.0..20.0f64, p in 0.1..500.0f64) {
                prop_assert!(estimate_cost(d, m + extra, p).unwrap() <= estimate_cost(d, m, p).unwrap());
            }

            #[test]
            fn prop_rejects_non_positive_mileage(d in 0.0..5_000.0f64, m in -50.0..=0.0f64, p in 0.1..500.0f64) {
                prop_assert!(estimate_cost(d, m, p).is_err());
            }
        }
    }
}
