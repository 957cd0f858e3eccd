//! The type model: declarations, references, and the immutable project
//! snapshot every resolver reads from.

pub mod errors;

pub use errors::ModelError;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Interface,
    Class,
}

/// A declared method, owned by the type that declares it.
///
/// Two signatures on different types describe the same member when they
/// agree structurally; the owner is identity, not structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    pub owner: String,
    pub name: String,
    pub parameters: Vec<String>,
    pub return_type: String,
}

impl MethodSignature {
    pub fn new(owner: &str, name: &str, parameters: Vec<String>, return_type: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            parameters,
            return_type: return_type.to_string(),
        }
    }

    /// Structural equality: name, parameter-type sequence, and return type.
    /// An implementing class's method is a distinct declaration from the
    /// interface's, so member identity can never rely on pointer or owner
    /// comparison.
    pub fn same_member(&self, other: &MethodSignature) -> bool {
        self.name == other.name
            && self.parameters == other.parameters
            && self.return_type == other.return_type
    }
}

/// One declared interface or class.
///
/// `extends` is populated for interfaces, `implements` for classes; the
/// parser never fills both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub kind: TypeKind,
    pub methods: Vec<MethodSignature>,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
}

impl TypeDeclaration {
    pub fn interface(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: TypeKind::Interface,
            methods: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
        }
    }

    pub fn class(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: TypeKind::Class,
            methods: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
        }
    }

    pub fn with_methods(mut self, methods: Vec<MethodSignature>) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_extends(mut self, extends: Vec<String>) -> Self {
        self.extends = extends;
        self
    }

    pub fn with_implements(mut self, implements: Vec<String>) -> Self {
        self.implements = implements;
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
    Field,
    LocalVariable,
    Parameter,
    ReturnType,
    Call,
}

/// A use site found anywhere in the project: a typed declaration or a
/// method call. Produced once during model construction; resolvers only
/// filter and group these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub kind: ReferenceKind,
    /// Type declaring the site where the reference occurs.
    pub site: String,
    /// Static type the reference refers to. `None` only for calls whose
    /// receiver type could not be resolved.
    pub referent: Option<String>,
    /// Resolved target signature, present on calls only.
    pub call_target: Option<MethodSignature>,
}

impl Reference {
    pub fn typed(kind: ReferenceKind, site: &str, referent: &str) -> Self {
        Self {
            kind,
            site: site.to_string(),
            referent: Some(referent.to_string()),
            call_target: None,
        }
    }

    pub fn call(site: &str, receiver: Option<&str>, target: MethodSignature) -> Self {
        Self {
            kind: ReferenceKind::Call,
            site: site.to_string(),
            referent: receiver.map(str::to_string),
            call_target: Some(target),
        }
    }

    pub fn is_call(&self) -> bool {
        self.kind == ReferenceKind::Call
    }
}

/// Immutable snapshot of every declaration and reference in the analyzed
/// project. Built once from parser output; read-only afterward, which is
/// what makes the resolver passes safe to run in parallel.
#[derive(Debug, Clone)]
pub struct TypeModel {
    types: Vec<TypeDeclaration>,
    references: Vec<Reference>,
    index: HashMap<String, usize>,
    total_classes: usize,
}

impl TypeModel {
    /// Assemble the model, rejecting duplicate qualified names.
    pub fn build(
        types: Vec<TypeDeclaration>,
        references: Vec<Reference>,
    ) -> Result<Self, ModelError> {
        let mut index = HashMap::with_capacity(types.len());
        for (position, decl) in types.iter().enumerate() {
            if index.insert(decl.name.clone(), position).is_some() {
                return Err(ModelError::DuplicateDeclaration {
                    name: decl.name.clone(),
                });
            }
        }
        let total_classes = types.iter().filter(|t| !t.is_interface()).count();
        Ok(Self {
            types,
            references,
            index,
            total_classes,
        })
    }

    pub fn declaration(&self, name: &str) -> Option<&TypeDeclaration> {
        self.index.get(name).map(|&position| &self.types[position])
    }

    /// Look up a declared interface; classes and unknown names yield `None`.
    pub fn interface(&self, name: &str) -> Option<&TypeDeclaration> {
        self.declaration(name).filter(|d| d.is_interface())
    }

    pub fn declarations(&self) -> &[TypeDeclaration] {
        &self.types
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.types.iter().filter(|t| t.is_interface())
    }

    pub fn classes(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.types.iter().filter(|t| !t.is_interface())
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn total_classes(&self) -> usize {
        self.total_classes
    }

    pub fn total_interfaces(&self) -> usize {
        self.types.len() - self.total_classes
    }
}
