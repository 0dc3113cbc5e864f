//! Risk classification integration tests
//!
//! Tests for the activity ladders including:
//! - Monotonicity: more rain or wind never lowers spraying/harvest risk
//! - Boundaries: thresholds are exclusive
//! - Provenance: fallback data is always medium

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{assess_risk, classify_risk, ActivityType, DataSource, RiskLevel};
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test spraying thresholds are strict inequalities
    #[test]
    fn test_spraying_boundaries() {
        let a = ActivityType::Spraying;
        assert_eq!(classify_risk(dec("0"), dec("20"), dec("60"), a), RiskLevel::Medium);
        assert_eq!(classify_risk(dec("0"), dec("20.1"), dec("60"), a), RiskLevel::High);
        assert_eq!(classify_risk(dec("5"), dec("0"), dec("60"), a), RiskLevel::Medium);
        assert_eq!(classify_risk(dec("2"), dec("15"), dec("60"), a), RiskLevel::Low);
    }

    /// Test harvest example: 6 mm rain is medium regardless of wind below 18
    #[test]
    fn test_harvest_example() {
        assert_eq!(
            classify_risk(dec("6"), dec("10"), dec("60"), ActivityType::Harvest),
            RiskLevel::Medium
        );
        assert_eq!(
            classify_risk(dec("10"), dec("25"), dec("60"), ActivityType::Harvest),
            RiskLevel::Medium
        );
    }

    /// Test planting prioritises soil moisture over rain and wind
    #[test]
    fn test_planting_moisture_first() {
        let a = ActivityType::Planting;
        assert_eq!(classify_risk(dec("10"), dec("5"), dec("39"), a), RiskLevel::High);
        assert_eq!(classify_risk(dec("10"), dec("5"), dec("95"), a), RiskLevel::High);
        assert_eq!(classify_risk(dec("10"), dec("5"), dec("45"), a), RiskLevel::Medium);
        assert_eq!(classify_risk(dec("4"), dec("5"), dec("60"), a), RiskLevel::Medium);
        assert_eq!(classify_risk(dec("10"), dec("21"), dec("60"), a), RiskLevel::Medium);
        assert_eq!(classify_risk(dec("5"), dec("20"), dec("50"), a), RiskLevel::Low);
        assert_eq!(classify_risk(dec("20"), dec("0"), dec("85"), a), RiskLevel::Low);
    }

    /// Test out-of-range inputs still classify
    #[test]
    fn test_total_over_odd_inputs() {
        for activity in ActivityType::ALL {
            let _ = classify_risk(dec("-3"), dec("-1"), dec("150"), activity);
        }
        assert_eq!(
            classify_risk(dec("-1"), dec("0"), dec("60"), ActivityType::Planting),
            RiskLevel::Medium
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating rainfall amounts
    fn rain_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=400i64).prop_map(|n| Decimal::new(n, 1)) // 0.0 to 40.0 mm
    }

    /// Strategy for generating wind speeds
    fn wind_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=500i64).prop_map(|n| Decimal::new(n, 1)) // 0.0 to 50.0 km/h
    }

    /// Strategy for generating soil moisture percentages
    fn moisture_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=1000i64).prop_map(|n| Decimal::new(n, 1)) // 0.0 to 100.0 %
    }

    fn activity_strategy() -> impl Strategy<Value = ActivityType> {
        prop::sample::select(ActivityType::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Spraying and harvest risk never decrease as rain or wind grow
        #[test]
        fn prop_rain_and_wind_monotonic(
            rain in rain_strategy(),
            wind in wind_strategy(),
            moisture in moisture_strategy(),
            extra_rain in rain_strategy(),
            extra_wind in wind_strategy(),
        ) {
            for activity in [ActivityType::Spraying, ActivityType::Harvest] {
                let base = classify_risk(rain, wind, moisture, activity);
                let wetter = classify_risk(rain + extra_rain, wind, moisture, activity);
                let windier = classify_risk(rain, wind + extra_wind, moisture, activity);
                prop_assert!(wetter >= base);
                prop_assert!(windier >= base);
            }
        }

        /// Spraying and harvest ignore soil moisture
        #[test]
        fn prop_moisture_irrelevant_outside_planting(
            rain in rain_strategy(),
            wind in wind_strategy(),
            m1 in moisture_strategy(),
            m2 in moisture_strategy(),
        ) {
            for activity in [ActivityType::Spraying, ActivityType::Harvest] {
                prop_assert_eq!(
                    classify_risk(rain, wind, m1, activity),
                    classify_risk(rain, wind, m2, activity)
                );
            }
        }

        /// Planting outside 40..=90 % moisture is always high
        #[test]
        fn prop_planting_extreme_moisture_high(
            rain in rain_strategy(),
            wind in wind_strategy(),
            low in 0i64..400i64,
            high in 901i64..=1000i64,
        ) {
            let a = ActivityType::Planting;
            prop_assert_eq!(classify_risk(rain, wind, Decimal::new(low, 1), a), RiskLevel::High);
            prop_assert_eq!(classify_risk(rain, wind, Decimal::new(high, 1), a), RiskLevel::High);
        }

        /// Classification is a pure function of its inputs
        #[test]
        fn prop_classification_deterministic(
            rain in rain_strategy(),
            wind in wind_strategy(),
            moisture in moisture_strategy(),
            activity in activity_strategy(),
        ) {
            prop_assert_eq!(
                classify_risk(rain, wind, moisture, activity),
                classify_risk(rain, wind, moisture, activity)
            );
        }

        /// Fallback provenance pins every reading to medium
        #[test]
        fn prop_fallback_always_medium(
            rain in rain_strategy(),
            wind in wind_strategy(),
            moisture in moisture_strategy(),
            activity in activity_strategy(),
        ) {
            prop_assert_eq!(
                assess_risk(rain, wind, moisture, DataSource::Fallback, activity),
                RiskLevel::Medium
            );
            prop_assert_eq!(
                assess_risk(rain, wind, moisture, DataSource::Live, activity),
                classify_risk(rain, wind, moisture, activity)
            );
        }
    }
}
