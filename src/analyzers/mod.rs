//! The metric-computation engine: three independent read-only passes
//! over the immutable type model, combined per interface into a scored
//! record.

pub mod hierarchy;
pub mod implementations;
pub mod usage;

use rayon::prelude::*;

use crate::core::{ModelError, TypeDeclaration, TypeModel};
use crate::risk::{
    AnalysisReport, InterfaceMetrics, InterfaceObservations, MetricAggregator, ProjectContext,
    ProjectSummary, RiskDistribution,
};

pub use hierarchy::{analyze_hierarchy, HierarchyAnalysis};
pub use implementations::direct_implementers;
pub use usage::{analyze_usage, UsageAnalysis};

/// Run the full engine over a model.
///
/// Fails fast on an empty project or a malformed extends-graph; there is
/// no partial analysis. The per-interface passes share no mutable state,
/// so `parallel` only changes scheduling, never the result.
pub fn analyze_model(
    model: &TypeModel,
    aggregator: &MetricAggregator,
    parallel: bool,
) -> Result<AnalysisReport, ModelError> {
    let interfaces: Vec<&TypeDeclaration> = model.interfaces().collect();
    if model.total_classes() == 0 || interfaces.is_empty() {
        return Err(ModelError::EmptyProject {
            classes: model.total_classes(),
            interfaces: interfaces.len(),
        });
    }

    let hierarchy = hierarchy::analyze_hierarchy(model)?;
    let context = ProjectContext {
        total_classes: model.total_classes(),
        max_call_depth: hierarchy.max_depth(),
    };
    log::debug!(
        "analyzing {} interfaces against {} classes (max depth {})",
        interfaces.len(),
        context.total_classes,
        context.max_call_depth
    );

    let score = |interface: &&TypeDeclaration| -> InterfaceMetrics {
        let observations = observe_interface(model, interface, &hierarchy);
        aggregator.aggregate(observations, &context)
    };

    let mut records: Vec<InterfaceMetrics> = if parallel {
        interfaces.par_iter().map(score).collect()
    } else {
        interfaces.iter().map(score).collect()
    };
    rank_records(&mut records);

    let summary = summarize(model, &hierarchy, &records);
    let distribution = RiskDistribution::from_records(&records);

    Ok(AnalysisReport {
        summary,
        weights: aggregator.weights(),
        thresholds: aggregator.thresholds(),
        distribution,
        records: records.into_iter().collect(),
    })
}

/// Gather the raw facts for one interface from the three resolvers.
pub fn observe_interface(
    model: &TypeModel,
    interface: &TypeDeclaration,
    hierarchy: &HierarchyAnalysis,
) -> InterfaceObservations {
    let implementers = implementations::direct_implementers(model, &interface.name);
    let usage = usage::analyze_usage(model, interface, &implementers);
    InterfaceObservations {
        name: interface.name.clone(),
        implementer_count: implementers.len(),
        usage_count: usage.usage_count,
        methods_total: usage.methods_total,
        methods_unused: usage.methods_unused,
        call_depth: hierarchy.depth_of(&interface.name),
    }
}

/// Worst offenders first; name breaks ties so repeated runs produce
/// byte-identical result sets regardless of scheduling.
fn rank_records(records: &mut [InterfaceMetrics]) {
    records.sort_by(|a, b| {
        b.ipi
            .total_cmp(&a.ipi)
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn summarize(
    model: &TypeModel,
    hierarchy: &HierarchyAnalysis,
    records: &[InterfaceMetrics],
) -> ProjectSummary {
    let total = records.len();
    let sum_ipi: f64 = records.iter().map(|r| r.ipi).sum();
    let max_ipi = records.iter().map(|r| r.ipi).fold(0.0, f64::max);
    let min_ipi = records
        .iter()
        .map(|r| r.ipi)
        .fold(f64::INFINITY, f64::min)
        .min(max_ipi);

    ProjectSummary {
        total_classes: model.total_classes(),
        total_interfaces: model.total_interfaces(),
        max_call_depth: hierarchy.max_depth(),
        average_ipi: if total > 0 { sum_ipi / total as f64 } else { 0.0 },
        max_ipi,
        min_ipi,
        single_implementation_count: records
            .iter()
            .filter(|r| r.implementer_count == 1)
            .count(),
        zero_usage_count: records.iter().filter(|r| r.usage_count == 0).count(),
    }
}
