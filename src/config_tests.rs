//! Tests for configuration

#[cfg(test)]
mod tests {
    use super::super::config::*;
    use crate::error::EngineError;
    use chrono::Weekday;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_engine_config_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config.matcher.max_edit_distance, 3);
        assert_eq!(config.matcher.min_fuzzy_key_len, 0);
        assert_eq!(config.momentum.weights, SignalWeights::default());
        assert!(config.momentum.use_track_record);
        assert_eq!(config.momentum.max_track_record_boost, 15.0);
        assert_eq!(config.forecast.rank_floor, 1);
        assert_eq!(config.forecast.rank_ceiling, 10);
        assert_eq!(config.forecast.horizon_weekday, Weekday::Sun);
        assert_eq!(config.edge.strong_threshold, dec!(20));
        assert_eq!(config.edge.moderate_threshold, dec!(10));
        assert_eq!(config.edge.hold_threshold, dec!(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_signal_weights_default_sum() {
        let weights = SignalWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_partial_sections() {
        let toml_str = r#"
[matcher]
max_edit_distance = 2

[momentum.weights]
trends = 0.5
wiki_views = 0.25
rank_delta = 0.25

[edge]
strong_threshold = "25"
"#;
        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.matcher.max_edit_distance, 2);
        assert_eq!(config.matcher.min_fuzzy_key_len, 0);
        assert_eq!(config.momentum.weights, SignalWeights::new(0.5, 0.25, 0.25));
        assert!(config.momentum.use_track_record);
        assert_eq!(config.edge.strong_threshold, dec!(25));
        assert_eq!(config.edge.moderate_threshold, dec!(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let weights = SignalWeights::new(0.5, 0.5, 0.5);
        match weights.validate() {
            Err(EngineError::InvalidWeights { sum }) => assert!((sum - 1.5).abs() < 1e-9),
            other => panic!("expected InvalidWeights, got {:?}", other),
        }

        assert!(SignalWeights::new(0.33, 0.33, 0.33).validate().is_ok());
        assert!(SignalWeights::new(0.3, 0.3, 0.3).validate().is_err());
    }

    #[test]
    fn test_weights_on_tolerance_edge_accepted() {
        // 0.99 and 1.01 land a hair outside 0.01 in binary arithmetic
        assert!(SignalWeights::new(0.33, 0.33, 0.33).validate().is_ok());
        assert!(SignalWeights::new(0.34, 0.34, 0.33).validate().is_ok());
        assert!(SignalWeights::default().validate().is_ok());

        assert!(SignalWeights::new(0.33, 0.33, 0.32).validate().is_err());
        assert!(SignalWeights::new(0.34, 0.34, 0.34).validate().is_err());
    }

    #[test]
    fn test_weights_reject_negative_and_nan() {
        assert!(SignalWeights::new(1.5, -0.5, 0.0).validate().is_err());
        assert!(SignalWeights::new(f64::NAN, 0.5, 0.5).validate().is_err());
    }

    #[test]
    fn test_momentum_config_rejects_negative_boost_cap() {
        let config = MomentumConfig {
            max_track_record_boost: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_forecast_config_validation() {
        let bad_bounds = ForecastConfig {
            rank_floor: 5,
            rank_ceiling: 3,
            ..Default::default()
        };
        assert!(bad_bounds.validate().is_err());

        let zero_floor = ForecastConfig {
            rank_floor: 0,
            ..Default::default()
        };
        assert!(zero_floor.validate().is_err());

        let no_uncertainty = ForecastConfig {
            min_rank_uncertainty: 0.0,
            ..Default::default()
        };
        assert!(no_uncertainty.validate().is_err());

        let no_horizon = ForecastConfig {
            horizon_periods: 0,
            ..Default::default()
        };
        assert!(no_horizon.validate().is_err());
    }

    #[test]
    fn test_edge_config_validation() {
        let unordered = EdgeConfig {
            hold_threshold: dec!(12),
            ..Default::default()
        };
        assert!(unordered.validate().is_err());

        let inverted = EdgeConfig {
            moderate_threshold: dec!(30),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let no_target = EdgeConfig {
            target_rank: 0,
            ..Default::default()
        };
        assert!(no_target.validate().is_err());

        let equal_tiers = EdgeConfig {
            moderate_threshold: dec!(20),
            ..Default::default()
        };
        assert!(equal_tiers.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = EngineConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.matcher.max_edit_distance, 3);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[forecast]
rank_ceiling = 20
horizon_periods = 2

[momentum]
use_track_record = false
"#
        )
        .unwrap();

        let config = EngineConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.forecast.rank_ceiling, 20);
        assert_eq!(config.forecast.horizon_periods, 2);
        assert!(!config.momentum.use_track_record);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[momentum.weights]
trends = 0.9
wiki_views = 0.9
rank_delta = 0.9
"#
        )
        .unwrap();

        let err = EngineConfig::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidWeights { .. }));
    }
}
