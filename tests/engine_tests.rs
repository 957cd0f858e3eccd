use pretty_assertions::assert_eq;
use poisonmap::{
    analyze_model, MethodSignature, MetricAggregator, ModelError, Reference, ReferenceKind,
    RiskLevel, TypeDeclaration, TypeModel,
};

fn handle() -> MethodSignature {
    MethodSignature::new("Handler", "handle", vec!["Request".into()], "void")
}

fn sample_model() -> TypeModel {
    TypeModel::build(
        vec![
            TypeDeclaration::interface("Handler")
                .with_methods(vec![handle()])
                .with_extends(vec!["Lifecycle".into()]),
            TypeDeclaration::interface("Lifecycle"),
            TypeDeclaration::class("WebHandler")
                .with_implements(vec!["Handler".into()])
                .with_methods(vec![MethodSignature::new(
                    "WebHandler",
                    "handle",
                    vec!["Request".into()],
                    "void",
                )]),
            TypeDeclaration::class("Dispatcher"),
            TypeDeclaration::class("Request"),
        ],
        vec![
            Reference::typed(ReferenceKind::Field, "Dispatcher", "Handler"),
            Reference::call("Dispatcher", Some("Handler"), handle()),
        ],
    )
    .unwrap()
}

#[test]
fn report_covers_every_interface() {
    let report = analyze_model(&sample_model(), &MetricAggregator::default(), false).unwrap();
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.summary.total_classes, 3);
    assert_eq!(report.summary.total_interfaces, 2);
    assert_eq!(report.summary.max_call_depth, 2);
}

#[test]
fn records_are_ranked_worst_first_with_name_tiebreak() {
    let model = TypeModel::build(
        vec![
            TypeDeclaration::interface("Zeta"),
            TypeDeclaration::interface("Alpha"),
            TypeDeclaration::class("Worker"),
        ],
        vec![],
    )
    .unwrap();
    let report = analyze_model(&model, &MetricAggregator::default(), false).unwrap();
    // Identical metrics for both; order falls back to the name.
    assert_eq!(report.records[0].name, "Alpha");
    assert_eq!(report.records[1].name, "Zeta");
    assert!(report.records[0].ipi >= report.records[1].ipi);
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let aggregator = MetricAggregator::default();
    let model = sample_model();
    let sequential = analyze_model(&model, &aggregator, false).unwrap();
    let parallel = analyze_model(&model, &aggregator, true).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn identical_models_produce_byte_identical_reports() {
    let aggregator = MetricAggregator::default();
    let model = sample_model();
    let first = serde_json::to_string(&analyze_model(&model, &aggregator, true).unwrap()).unwrap();
    let second = serde_json::to_string(&analyze_model(&model, &aggregator, true).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn project_without_classes_is_rejected() {
    let model = TypeModel::build(vec![TypeDeclaration::interface("Lonely")], vec![]).unwrap();
    let result = analyze_model(&model, &MetricAggregator::default(), false);
    assert!(matches!(result, Err(ModelError::EmptyProject { .. })));
}

#[test]
fn project_without_interfaces_is_rejected() {
    let model = TypeModel::build(vec![TypeDeclaration::class("Plain")], vec![]).unwrap();
    let result = analyze_model(&model, &MetricAggregator::default(), false);
    assert!(matches!(result, Err(ModelError::EmptyProject { .. })));
}

#[test]
fn extends_cycle_fails_the_whole_run() {
    let model = TypeModel::build(
        vec![
            TypeDeclaration::interface("Ping").with_extends(vec!["Pong".into()]),
            TypeDeclaration::interface("Pong").with_extends(vec!["Ping".into()]),
            TypeDeclaration::class("Player"),
        ],
        vec![],
    )
    .unwrap();
    let result = analyze_model(&model, &MetricAggregator::default(), false);
    assert!(matches!(result, Err(ModelError::ExtendsCycle { .. })));
}

#[test]
fn flat_project_zeroes_normalized_depth_everywhere() {
    let model = TypeModel::build(
        vec![
            TypeDeclaration::interface("One"),
            TypeDeclaration::interface("Two"),
            TypeDeclaration::class("Worker"),
        ],
        vec![],
    )
    .unwrap();
    let report = analyze_model(&model, &MetricAggregator::default(), false).unwrap();
    for record in &report.records {
        assert_eq!(record.call_depth, 1);
        assert_eq!(record.ncd, 0.0);
        assert!(record.flat_hierarchy);
    }
}

#[test]
fn distribution_counts_match_records() {
    let report = analyze_model(&sample_model(), &MetricAggregator::default(), false).unwrap();
    let by_label = |level: RiskLevel| report.records.iter().filter(|r| r.risk == level).count();
    assert_eq!(report.distribution.high_count, by_label(RiskLevel::High));
    assert_eq!(report.distribution.medium_count, by_label(RiskLevel::Medium));
    assert_eq!(report.distribution.low_count, by_label(RiskLevel::Low));
    let percent_sum = report.distribution.high_percent
        + report.distribution.medium_percent
        + report.distribution.low_percent;
    assert!((percent_sum - 100.0).abs() < 1e-9);
}

#[test]
fn summary_aggregates_are_consistent() {
    let report = analyze_model(&sample_model(), &MetricAggregator::default(), false).unwrap();
    let max = report.records.iter().map(|r| r.ipi).fold(0.0, f64::max);
    let min = report
        .records
        .iter()
        .map(|r| r.ipi)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(report.summary.max_ipi, max);
    assert_eq!(report.summary.min_ipi, min);
    assert!(report.summary.average_ipi >= min && report.summary.average_ipi <= max);
}
