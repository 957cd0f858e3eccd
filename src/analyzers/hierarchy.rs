//! Hierarchy depth: longest interface-extends-interface chain reachable
//! from each interface, plus the project-wide maximum used for
//! normalization.

use std::collections::{HashMap, HashSet};

use crate::core::{ModelError, TypeModel};

/// Depths for every declared interface, computed in one pass.
#[derive(Debug, Clone)]
pub struct HierarchyAnalysis {
    depths: HashMap<String, u32>,
    max_depth: u32,
}

impl HierarchyAnalysis {
    /// Depth of a declared interface. An interface extending nothing has
    /// depth 1; an undeclared name counts as an external leaf.
    pub fn depth_of(&self, name: &str) -> u32 {
        self.depths.get(name).copied().unwrap_or(1)
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}

/// Walk the extends-graph of every declared interface. The graph must be
/// a DAG; a declared extension cycle makes depth ill-defined and fails
/// the whole run.
pub fn analyze_hierarchy(model: &TypeModel) -> Result<HierarchyAnalysis, ModelError> {
    let mut depths = HashMap::new();
    let mut max_depth = 1;

    for interface in model.interfaces() {
        let mut visiting = HashSet::new();
        let depth = resolve_depth(model, &interface.name, &mut depths, &mut visiting)?;
        max_depth = max_depth.max(depth);
    }

    Ok(HierarchyAnalysis { depths, max_depth })
}

fn resolve_depth(
    model: &TypeModel,
    name: &str,
    memo: &mut HashMap<String, u32>,
    visiting: &mut HashSet<String>,
) -> Result<u32, ModelError> {
    if let Some(depth) = memo.get(name) {
        return Ok(*depth);
    }

    // Extending an interface outside the model contributes a single
    // external level; only declared interfaces are traversed.
    let Some(declaration) = model.interface(name) else {
        return Ok(1);
    };

    if !visiting.insert(name.to_string()) {
        return Err(ModelError::ExtendsCycle {
            name: name.to_string(),
        });
    }

    let mut deepest_parent = 0;
    for parent in &declaration.extends {
        deepest_parent = deepest_parent.max(resolve_depth(model, parent, memo, visiting)?);
    }
    visiting.remove(name);

    let depth = if declaration.extends.is_empty() {
        1
    } else {
        deepest_parent + 1
    };
    memo.insert(name.to_string(), depth);
    Ok(depth)
}
