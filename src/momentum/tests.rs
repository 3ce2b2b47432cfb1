//! Tests for momentum scoring

use super::*;
use chrono::NaiveDate;

fn inputs(trends: Option<f64>, views: Option<f64>, delta: Option<f64>) -> MomentumInputs {
    MomentumInputs {
        trends,
        wiki_views: views,
        rank_delta: delta,
    }
}

#[test]
fn test_no_signals_scores_zero() {
    let result = compute_momentum(&MomentumInputs::default(), SignalWeights::default()).unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.acceleration_score, 0.0);
    assert!(result.breakdown.signals.is_empty());
    assert!(!result.has_live_signal());
}

#[test]
fn test_full_trends_weight_scores_hundred() {
    let weights = SignalWeights::new(1.0, 0.0, 0.0);
    let result = compute_momentum(&inputs(Some(100.0), None, None), weights).unwrap();
    assert_eq!(result.score, 100);
}

#[test]
fn test_weighted_average_over_present_signals_only() {
    // views 1e6 -> 60, delta +5 -> 75; trends absent
    let result = compute_momentum(
        &inputs(None, Some(1_000_000.0), Some(5.0)),
        SignalWeights::default(),
    )
    .unwrap();

    let expected: f64 = (60.0 * 0.33 + 75.0 * 0.34) / (0.33 + 0.34);
    assert_eq!(result.score, expected.round() as u32);
    assert!((result.breakdown.total_weight - 0.67).abs() < 1e-9);
    assert_eq!(result.breakdown.signals.len(), 2);

    let total: f64 = result.breakdown.signals.iter().map(|s| s.contribution).sum();
    assert!((total - result.breakdown.weighted_average).abs() < 1e-9);
}

#[test]
fn test_page_view_normalization() {
    assert_eq!(normalize_signal(SignalKind::PageViews, 1_000.0), Some(30.0));
    assert_eq!(normalize_signal(SignalKind::PageViews, 1e12), Some(100.0));
    assert_eq!(normalize_signal(SignalKind::PageViews, 0.0), None);
    assert_eq!(normalize_signal(SignalKind::PageViews, -5.0), None);
}

#[test]
fn test_rank_delta_normalization() {
    assert_eq!(normalize_signal(SignalKind::RankDelta, -10.0), Some(0.0));
    assert_eq!(normalize_signal(SignalKind::RankDelta, 0.0), Some(50.0));
    assert_eq!(normalize_signal(SignalKind::RankDelta, 10.0), Some(100.0));
    assert_eq!(normalize_signal(SignalKind::RankDelta, 25.0), Some(100.0));
    assert_eq!(normalize_signal(SignalKind::RankDelta, -25.0), Some(0.0));
}

#[test]
fn test_search_interest_used_as_is() {
    assert_eq!(normalize_signal(SignalKind::SearchInterest, 42.0), Some(42.0));
    assert_eq!(normalize_signal(SignalKind::SearchInterest, f64::NAN), None);
}

#[test]
fn test_malformed_signals_treated_as_absent() {
    let weights = SignalWeights::default();
    let clean = compute_momentum(&inputs(Some(80.0), None, None), weights).unwrap();
    let noisy = compute_momentum(&inputs(Some(80.0), Some(0.0), Some(f64::NAN)), weights).unwrap();

    assert_eq!(clean.score, noisy.score);
    assert_eq!(noisy.score, 80);
    assert_eq!(
        noisy.breakdown.dropped,
        vec![SignalKind::PageViews, SignalKind::RankDelta]
    );
}

#[test]
fn test_invalid_weights_rejected() {
    let err = compute_momentum(&MomentumInputs::default(), SignalWeights::new(0.5, 0.5, 0.5));
    assert!(matches!(err, Err(crate::error::EngineError::InvalidWeights { .. })));

    let err = MomentumScorer::with_weights(SignalWeights::new(1.2, -0.2, 0.0));
    assert!(err.is_err());

    // within tolerance
    assert!(MomentumScorer::with_weights(SignalWeights::new(0.335, 0.335, 0.335)).is_ok());
}

#[test]
fn test_score_always_in_bounds() {
    let weights = SignalWeights::default();
    let values = [f64::MIN, -1e9, -10.0, 0.0, 0.5, 50.0, 1e9, f64::MAX, f64::INFINITY];
    for t in values {
        for v in values {
            for d in values {
                let r = compute_momentum(&inputs(Some(t), Some(v), Some(d)), weights).unwrap();
                assert!(r.score <= 100, "score {} for {:?}", r.score, (t, v, d));
            }
        }
    }
}

#[test]
fn test_acceleration() {
    assert_eq!(compute_acceleration(60.0, None), 0.0);
    assert_eq!(compute_acceleration(60.0, Some(50.0)), 20.0);
    assert_eq!(compute_acceleration(40.0, Some(50.0)), -20.0);
    assert_eq!(compute_acceleration(100.0, Some(0.0)), 100.0);
    assert_eq!(compute_acceleration(0.0, Some(100.0)), -100.0);
    assert_eq!(compute_acceleration(50.0, Some(f64::NAN)), 0.0);
}

#[test]
fn test_acceleration_always_in_bounds() {
    for current in [0.0, 25.0, 50.0, 100.0, 1e6, -1e6] {
        for previous in [0.0, 25.0, 50.0, 100.0, 1e6, -1e6] {
            let a = compute_acceleration(current, Some(previous));
            assert!((-100.0..=100.0).contains(&a));
        }
    }
}

#[test]
fn test_score_title_reports_track_record_separately() {
    let scorer = MomentumScorer::new(&MomentumConfig::default()).unwrap();
    let base = scorer.score(&inputs(Some(50.0), None, None));
    let boosted = scorer.score_title(&inputs(Some(50.0), None, None), &["Fool Me Once"], None);

    let boost = boosted.breakdown.track_record.as_ref().unwrap();
    assert_eq!(boost.creator, "Harlan Coben");
    assert_eq!(boost.matched_name, "Fool Me Once");
    assert_eq!(boosted.score, base.score + 12);
    assert_eq!(boosted.breakdown.weighted_average, base.breakdown.weighted_average);
}

#[test]
fn test_track_record_boost_is_capped() {
    let config = MomentumConfig {
        max_track_record_boost: 5.0,
        ..Default::default()
    };
    let scorer = MomentumScorer::new(&config).unwrap();
    let r = scorer.score_title(&inputs(Some(50.0), None, None), &["Stranger Things"], None);

    let boost = r.breakdown.track_record.unwrap();
    assert_eq!(boost.table_boost, 12.0);
    assert_eq!(boost.applied_boost, 5.0);
    assert_eq!(r.score, 55);
}

#[test]
fn test_track_record_boost_never_escapes_bounds() {
    let scorer = MomentumScorer::new(&MomentumConfig::default()).unwrap();
    let r = scorer.score_title(&inputs(Some(98.0), None, None), &["Bridgerton"], None);
    assert_eq!(r.score, 100);
}

#[test]
fn test_track_record_disabled() {
    let config = MomentumConfig {
        use_track_record: false,
        ..Default::default()
    };
    let scorer = MomentumScorer::new(&config).unwrap();
    let r = scorer.score_title(&inputs(Some(50.0), None, None), &["Bridgerton"], None);
    assert!(r.breakdown.track_record.is_none());
    assert_eq!(r.score, 50);
}

#[test]
fn test_track_record_matches_creator_in_title_or_alias() {
    let table = TrackRecordTable::new(15.0);

    let by_name = table.lookup(&["Harlan Coben's Shelter"]).unwrap();
    assert_eq!(by_name.creator, "Harlan Coben");

    let by_alias = table.lookup(&["Untitled Netflix Drama", "Missing You: Season 1"]).unwrap();
    assert_eq!(by_alias.creator, "Harlan Coben");
    assert_eq!(by_alias.matched_name, "Missing You: Season 1");

    assert!(table.lookup(&["Unsafe Spaces"]).is_none());
    assert!(table.lookup::<&str>(&[]).is_none());
}

#[test]
fn test_score_title_acceleration_from_previous() {
    let scorer = MomentumScorer::with_weights(SignalWeights::new(1.0, 0.0, 0.0)).unwrap();
    let r = scorer.score_title(&inputs(Some(70.0), None, None), &["Dark"], Some(60.0));
    assert_eq!(r.score, 70);
    assert_eq!(r.acceleration_score, 20.0);
}

#[test]
fn test_signal_set_inputs() {
    let period = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
    let set = SignalSet::new("t1", period)
        .with(ObservationKind::SearchInterest, 40.0)
        .with(ObservationKind::SearchInterest, 55.0)
        .with(ObservationKind::PageViews, 250_000.0)
        .with(ObservationKind::PreviousRank, 7.0)
        .with(ObservationKind::Rank, 3.0);

    let i = set.inputs();
    assert_eq!(i.trends, Some(55.0));
    assert_eq!(i.wiki_views, Some(250_000.0));
    assert_eq!(i.rank_delta, Some(4.0));
}

#[test]
fn test_signal_set_without_previous_rank_has_no_delta() {
    let period = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
    let set = SignalSet::new("t1", period).with(ObservationKind::Rank, 3.0);
    assert_eq!(set.inputs().rank_delta, None);
}
