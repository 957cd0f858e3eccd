use poisonmap::{
    InterfaceObservations, MetricAggregator, MetricWeights, ProjectContext, RiskLevel,
    RiskThresholds,
};

fn observations(name: &str) -> InterfaceObservations {
    InterfaceObservations {
        name: name.to_string(),
        implementer_count: 1,
        usage_count: 0,
        methods_total: 0,
        methods_unused: 0,
        call_depth: 1,
    }
}

#[test]
fn formula_matches_documented_weights() {
    // IC=1, UUR=0.021, UMR=0.5, NCD=1.0:
    // 0.25*1 + 0.15*0.979 + 0.25*0.5 + 0.35*1 = 0.87185
    let aggregator = MetricAggregator::default();
    let record = aggregator.aggregate(
        InterfaceObservations {
            name: "TypeHandler".into(),
            implementer_count: 1,
            usage_count: 21,
            methods_total: 2,
            methods_unused: 1,
            call_depth: 3,
        },
        &ProjectContext {
            total_classes: 1000,
            max_call_depth: 3,
        },
    );
    assert!((record.sir - 1.0).abs() < 1e-12);
    assert!((record.uur - 0.021).abs() < 1e-12);
    assert!((record.umr - 0.5).abs() < 1e-12);
    assert!((record.ncd - 1.0).abs() < 1e-12);
    assert!((record.ipi - 0.87185).abs() < 1e-9);
    assert_eq!(record.risk, RiskLevel::High);
}

#[test]
fn many_implementers_trend_low() {
    let aggregator = MetricAggregator::default();
    let record = aggregator.aggregate(
        InterfaceObservations {
            name: "Repository".into(),
            implementer_count: 6,
            usage_count: 25,
            methods_total: 4,
            methods_unused: 0,
            call_depth: 1,
        },
        &ProjectContext {
            total_classes: 30,
            max_call_depth: 1,
        },
    );
    assert_eq!(record.risk, RiskLevel::Low);
    assert!(record.ipi < 0.1);
}

#[test]
fn component_metrics_stay_in_range() {
    let aggregator = MetricAggregator::default();
    let context = ProjectContext {
        total_classes: 7,
        max_call_depth: 4,
    };
    for implementer_count in [0, 1, 3, 12] {
        for usage_count in [0, 3, 7, 50] {
            for (methods_total, methods_unused) in [(0, 0), (5, 0), (5, 5), (8, 3)] {
                for call_depth in [1, 2, 4] {
                    let record = aggregator.aggregate(
                        InterfaceObservations {
                            name: "Probe".into(),
                            implementer_count,
                            usage_count,
                            methods_total,
                            methods_unused,
                            call_depth,
                        },
                        &context,
                    );
                    assert!(record.sir > 0.0 && record.sir <= 1.0);
                    assert!((0.0..=1.0).contains(&record.uur));
                    assert!((0.0..=1.0).contains(&record.umr));
                    assert!((0.0..=1.0).contains(&record.ncd));
                    assert!((0.0..=1.0).contains(&record.ipi));
                }
            }
        }
    }
}

#[test]
fn zero_implementers_is_maximal_risk_exactly() {
    let aggregator = MetricAggregator::default();
    let mut obs = observations("Orphan");
    obs.implementer_count = 0;
    let record = aggregator.aggregate(
        obs,
        &ProjectContext {
            total_classes: 4,
            max_call_depth: 2,
        },
    );
    assert_eq!(record.sir, 1.0);
}

#[test]
fn usage_rate_is_clamped_to_one() {
    let aggregator = MetricAggregator::default();
    let mut obs = observations("Everywhere");
    obs.usage_count = 50;
    let record = aggregator.aggregate(
        obs,
        &ProjectContext {
            total_classes: 10,
            max_call_depth: 1,
        },
    );
    assert_eq!(record.uur, 1.0);
}

#[test]
fn risk_bands_partition_the_index() {
    let aggregator = MetricAggregator::default();
    for step in 0..=100 {
        let ipi = step as f64 / 100.0;
        let label = aggregator.classify(ipi);
        let expected = if ipi > 0.7 {
            RiskLevel::High
        } else if ipi >= 0.4 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };
        assert_eq!(label, expected, "ipi = {ipi}");
    }
}

#[test]
fn custom_weights_shift_the_score() {
    let weights = MetricWeights {
        alpha: 1.0,
        beta: 0.0,
        gamma: 0.0,
        delta: 0.0,
    };
    assert!(weights.validate().is_ok());
    let aggregator = MetricAggregator::new(weights, RiskThresholds::default());
    let mut obs = observations("Single");
    obs.implementer_count = 2;
    let record = aggregator.aggregate(
        obs,
        &ProjectContext {
            total_classes: 4,
            max_call_depth: 3,
        },
    );
    assert!((record.ipi - 0.5).abs() < 1e-12);
}

#[test]
fn custom_thresholds_move_the_bands() {
    let thresholds = RiskThresholds {
        medium: 0.1,
        high: 0.2,
    };
    let aggregator = MetricAggregator::new(MetricWeights::default(), thresholds);
    assert_eq!(aggregator.classify(0.15), RiskLevel::Medium);
    assert_eq!(aggregator.classify(0.25), RiskLevel::High);
}
