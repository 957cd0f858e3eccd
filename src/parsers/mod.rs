//! Parsing boundary: per-file extraction records and the two-pass
//! construction of the immutable type model.
//!
//! Pass 1 indexes every declaration in the project by name; pass 2
//! resolves raw reference records against that index. Nothing downstream
//! ever walks a syntax tree again.

pub mod java;

pub use java::JavaParser;

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::core::{
    MethodSignature, ModelError, Reference, ReferenceKind, TypeDeclaration, TypeKind, TypeModel,
};

/// Everything extracted from a single source file.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub declarations: Vec<RawDeclaration>,
    pub type_refs: Vec<RawTypeRef>,
    pub calls: Vec<RawCall>,
}

#[derive(Debug, Clone)]
pub struct RawDeclaration {
    pub name: String,
    pub kind: TypeKind,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub methods: Vec<RawMethod>,
}

#[derive(Debug, Clone)]
pub struct RawMethod {
    pub name: String,
    pub parameters: Vec<String>,
    pub return_type: String,
}

/// A typed declaration site: field, local, parameter, or return type.
#[derive(Debug, Clone)]
pub struct RawTypeRef {
    pub site: String,
    pub kind: ReferenceKind,
    pub type_name: String,
}

/// A method invocation as seen in source, before resolution.
#[derive(Debug, Clone)]
pub struct RawCall {
    pub site: String,
    pub callee: String,
    pub arg_count: usize,
    /// Receiver type resolved from the local scope at parse time.
    pub receiver_type: Option<String>,
    /// Raw receiver identifier, for static-call resolution against the
    /// project-wide index.
    pub receiver_name: Option<String>,
}

/// Build the immutable model from parsed files.
pub fn build_model(files: &[ParsedFile]) -> Result<TypeModel, ModelError> {
    let types = index_declarations(files)?;
    let references = resolve_references(files, &types);
    TypeModel::build(types, references)
}

/// Pass 1: one declaration per qualified name, project-wide.
fn index_declarations(files: &[ParsedFile]) -> Result<Vec<TypeDeclaration>, ModelError> {
    let mut seen = HashSet::new();
    let mut types = Vec::new();

    for file in files {
        for raw in &file.declarations {
            if !seen.insert(raw.name.clone()) {
                return Err(ModelError::DuplicateDeclaration {
                    name: raw.name.clone(),
                });
            }
            let methods = raw
                .methods
                .iter()
                .map(|m| MethodSignature {
                    owner: raw.name.clone(),
                    name: m.name.clone(),
                    parameters: m.parameters.clone(),
                    return_type: m.return_type.clone(),
                })
                .collect();
            types.push(TypeDeclaration {
                name: raw.name.clone(),
                kind: raw.kind,
                methods,
                extends: raw.extends.clone(),
                implements: raw.implements.clone(),
            });
        }
    }

    Ok(types)
}

/// Pass 2: resolve raw records into immutable references. Typed sites
/// that do not name a declared interface are dropped here, as are calls
/// that cannot be resolved to a single declared member.
fn resolve_references(files: &[ParsedFile], types: &[TypeDeclaration]) -> Vec<Reference> {
    let index: HashMap<&str, &TypeDeclaration> =
        types.iter().map(|t| (t.name.as_str(), t)).collect();

    let mut references = Vec::new();
    for file in files {
        for type_ref in &file.type_refs {
            let declared_interface = index
                .get(type_ref.type_name.as_str())
                .is_some_and(|t| t.is_interface());
            if declared_interface {
                references.push(Reference::typed(
                    type_ref.kind,
                    &type_ref.site,
                    &type_ref.type_name,
                ));
            }
        }
        for call in &file.calls {
            if let Some(reference) = resolve_call(call, &index, types) {
                references.push(reference);
            }
        }
    }
    references
}

fn resolve_call(
    call: &RawCall,
    index: &HashMap<&str, &TypeDeclaration>,
    types: &[TypeDeclaration],
) -> Option<Reference> {
    let receiver = call.receiver_type.clone().or_else(|| {
        call.receiver_name
            .clone()
            .filter(|name| index.contains_key(name.as_str()))
    });

    match receiver {
        Some(receiver) if index.contains_key(receiver.as_str()) => {
            let mut visited = HashSet::new();
            let target =
                resolve_member(index, &receiver, &call.callee, call.arg_count, &mut visited)?;
            Some(Reference::call(&call.site, Some(&receiver), target))
        }
        // Receiver typed as something outside the model, or no receiver
        // type at all: fall back to a project-wide signature match, kept
        // only when unambiguous.
        _ => {
            let target = unique_structural_match(types, &call.callee, call.arg_count)?;
            Some(Reference::call(&call.site, None, target))
        }
    }
}

/// Find the declared member a call on `type_name` resolves to, searching
/// the type itself and then its declared supertypes.
fn resolve_member(
    index: &HashMap<&str, &TypeDeclaration>,
    type_name: &str,
    callee: &str,
    arity: usize,
    visited: &mut HashSet<String>,
) -> Option<MethodSignature> {
    if !visited.insert(type_name.to_string()) {
        return None;
    }
    let declaration = index.get(type_name)?;

    if let Some(method) = declaration
        .methods
        .iter()
        .find(|m| m.name == callee && m.parameters.len() == arity)
    {
        return Some(method.clone());
    }

    declaration
        .extends
        .iter()
        .chain(declaration.implements.iter())
        .find_map(|parent| resolve_member(index, parent, callee, arity, visited))
}

/// Project-wide match by name and arity. Returns a target only when all
/// candidates agree structurally; ambiguous partial matches are dropped
/// rather than guessed at.
fn unique_structural_match(
    types: &[TypeDeclaration],
    callee: &str,
    arity: usize,
) -> Option<MethodSignature> {
    let mut found: Option<&MethodSignature> = None;
    for declaration in types {
        for method in &declaration.methods {
            if method.name != callee || method.parameters.len() != arity {
                continue;
            }
            match found {
                None => found = Some(method),
                Some(previous) if previous.same_member(method) => {}
                Some(_) => return None,
            }
        }
    }
    found.cloned()
}
