// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod parsers;
pub mod risk;

// Re-export commonly used types
pub use crate::core::{
    MethodSignature, ModelError, Reference, ReferenceKind, TypeDeclaration, TypeKind, TypeModel,
};

pub use crate::analyzers::{
    analyze_hierarchy, analyze_model, analyze_usage, direct_implementers, HierarchyAnalysis,
    UsageAnalysis,
};

pub use crate::risk::{
    AnalysisReport, InterfaceMetrics, InterfaceObservations, MetricAggregator, ProjectContext,
    ProjectSummary, RiskDistribution, RiskLevel,
};

pub use crate::config::{load_config, MetricWeights, PoisonmapConfig, RiskThresholds};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::parsers::{build_model, JavaParser, ParsedFile};
