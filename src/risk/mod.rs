//! Metric aggregation: combines the resolver outputs for one interface
//! into the composite poisoning index and a risk label.

use crate::config::{MetricWeights, RiskThresholds};
use im::Vector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn display_name(&self) -> &str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

/// Raw per-interface facts gathered by the resolver passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceObservations {
    pub name: String,
    pub implementer_count: usize,
    pub usage_count: usize,
    pub methods_total: usize,
    pub methods_unused: usize,
    pub call_depth: u32,
}

/// Project-wide aggregate state shared by every normalization. Computed
/// once per run so all interfaces are normalized against the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectContext {
    pub total_classes: usize,
    pub max_call_depth: u32,
}

/// One scored interface: raw counts, component metrics, composite index,
/// and risk label. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceMetrics {
    pub name: String,
    pub implementer_count: usize,
    pub sir: f64,
    pub usage_count: usize,
    pub uur: f64,
    pub methods_total: usize,
    pub methods_unused: usize,
    pub umr: f64,
    pub call_depth: u32,
    pub ncd: f64,
    pub ipi: f64,
    pub risk: RiskLevel,
    /// Interface declares no methods; UMR forced to zero.
    pub no_methods: bool,
    /// No interface in the project extends another; NCD forced to zero.
    pub flat_hierarchy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    pub high_percent: f64,
    pub medium_percent: f64,
    pub low_percent: f64,
}

impl RiskDistribution {
    pub fn from_records(records: &[InterfaceMetrics]) -> Self {
        let high_count = records.iter().filter(|r| r.risk == RiskLevel::High).count();
        let medium_count = records
            .iter()
            .filter(|r| r.risk == RiskLevel::Medium)
            .count();
        let low_count = records.iter().filter(|r| r.risk == RiskLevel::Low).count();
        let total = records.len();
        Self {
            high_count,
            medium_count,
            low_count,
            high_percent: percent(high_count, total),
            medium_percent: percent(medium_count, total),
            low_percent: percent(low_count, total),
        }
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub total_classes: usize,
    pub total_interfaces: usize,
    pub max_call_depth: u32,
    pub average_ipi: f64,
    pub max_ipi: f64,
    pub min_ipi: f64,
    pub single_implementation_count: usize,
    pub zero_usage_count: usize,
}

/// Complete, ordered result set for one analysis run. Records are sorted
/// by descending index with name as tie-break, so identical models yield
/// byte-identical reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: ProjectSummary,
    pub weights: MetricWeights,
    pub thresholds: RiskThresholds,
    pub distribution: RiskDistribution,
    pub records: Vector<InterfaceMetrics>,
}

impl AnalysisReport {
    pub fn high_risk(&self) -> impl Iterator<Item = &InterfaceMetrics> {
        self.records.iter().filter(|r| r.risk == RiskLevel::High)
    }
}

/// Combines resolver outputs into the documented formula. Weights and
/// thresholds are injected, never hard-coded, so the index can be
/// recalibrated without touching the formula.
pub struct MetricAggregator {
    weights: MetricWeights,
    thresholds: RiskThresholds,
}

impl Default for MetricAggregator {
    fn default() -> Self {
        Self::new(MetricWeights::default(), RiskThresholds::default())
    }
}

impl MetricAggregator {
    pub fn new(weights: MetricWeights, thresholds: RiskThresholds) -> Self {
        Self {
            weights,
            thresholds,
        }
    }

    pub fn weights(&self) -> MetricWeights {
        self.weights
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    /// Score one interface against the shared project context.
    ///
    /// Zero implementers score maximal single-implementation risk; zero
    /// declared methods force the unused-method rate to zero; a project
    /// with no depth variation forces normalized depth to zero.
    pub fn aggregate(
        &self,
        observations: InterfaceObservations,
        context: &ProjectContext,
    ) -> InterfaceMetrics {
        let InterfaceObservations {
            name,
            implementer_count,
            usage_count,
            methods_total,
            methods_unused,
            call_depth,
        } = observations;

        let sir = if implementer_count > 0 {
            1.0 / implementer_count as f64
        } else {
            1.0
        };

        let uur = if context.total_classes > 0 {
            (usage_count as f64 / context.total_classes as f64).min(1.0)
        } else {
            0.0
        };

        let no_methods = methods_total == 0;
        let umr = if no_methods {
            0.0
        } else {
            methods_unused as f64 / methods_total as f64
        };

        let flat_hierarchy = context.max_call_depth <= 1;
        let ncd = if flat_hierarchy {
            0.0
        } else {
            (call_depth as f64 - 1.0) / (context.max_call_depth as f64 - 1.0)
        };

        let ipi = self.weights.alpha * sir
            + self.weights.beta * (1.0 - uur)
            + self.weights.gamma * umr
            + self.weights.delta * ncd;

        InterfaceMetrics {
            name,
            implementer_count,
            sir,
            usage_count,
            uur,
            methods_total,
            methods_unused,
            umr,
            call_depth,
            ncd,
            ipi,
            risk: self.classify(ipi),
            no_methods,
            flat_hierarchy,
        }
    }

    /// Risk label as a pure function of the index. Both band boundaries
    /// are inclusive toward MEDIUM.
    pub fn classify(&self, ipi: f64) -> RiskLevel {
        if ipi > self.thresholds.high {
            RiskLevel::High
        } else if ipi >= self.thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}
