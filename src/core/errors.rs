use thiserror::Error;

/// Conditions under which the engine refuses to measure a project.
///
/// Malformed input (duplicate names, extension cycles) is fatal: a model
/// that cannot be measured consistently is not measured at all. An empty
/// project is a precondition failure rather than a degenerate result.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate type declaration: {name}")]
    DuplicateDeclaration { name: String },

    #[error("cycle in interface extension involving {name}")]
    ExtendsCycle { name: String },

    #[error("project has {classes} classes and {interfaces} interfaces; nothing to measure")]
    EmptyProject { classes: usize, interfaces: usize },
}
