//! Usage resolution: how many distinct places depend on an interface as
//! a type, and which of its declared methods are ever called.

use std::collections::{BTreeSet, HashSet};

use crate::core::{MethodSignature, Reference, TypeDeclaration, TypeModel};

/// Usage facts for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageAnalysis {
    /// Distinct referencing sites typed as the interface, deduplicated by
    /// the declaring class of the site.
    pub usage_count: usize,
    pub methods_total: usize,
    pub methods_unused: usize,
}

pub fn analyze_usage(
    model: &TypeModel,
    interface: &TypeDeclaration,
    implementers: &[&TypeDeclaration],
) -> UsageAnalysis {
    let sites: BTreeSet<&str> = model
        .references()
        .iter()
        .filter(|reference| reference.referent.as_deref() == Some(interface.name.as_str()))
        .map(|reference| reference.site.as_str())
        .collect();

    let implementer_names: HashSet<&str> =
        implementers.iter().map(|decl| decl.name.as_str()).collect();

    let methods_unused = interface
        .methods
        .iter()
        .filter(|method| !is_called(model, method, &interface.name, &implementer_names))
        .count();

    UsageAnalysis {
        usage_count: sites.len(),
        methods_total: interface.methods.len(),
        methods_unused,
    }
}

/// A call reaches a declared method when its resolved target is the same
/// member structurally and the receiver, where known, is the interface or
/// one of its direct implementers. Unknown receivers match on signature
/// alone; textual matching accepts that imprecision.
fn is_called(
    model: &TypeModel,
    method: &MethodSignature,
    interface: &str,
    implementers: &HashSet<&str>,
) -> bool {
    model
        .references()
        .iter()
        .any(|reference| call_matches(reference, method, interface, implementers))
}

fn call_matches(
    reference: &Reference,
    method: &MethodSignature,
    interface: &str,
    implementers: &HashSet<&str>,
) -> bool {
    let Some(target) = &reference.call_target else {
        return false;
    };
    if !target.same_member(method) {
        return false;
    }
    match &reference.referent {
        Some(receiver) => receiver == interface || implementers.contains(receiver.as_str()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Reference, ReferenceKind, TypeDeclaration, TypeModel};

    fn handle() -> MethodSignature {
        MethodSignature::new("Handler", "handle", vec!["Request".into()], "void")
    }

    fn render() -> MethodSignature {
        MethodSignature::new("Handler", "render", vec![], "String")
    }

    fn fixture(references: Vec<Reference>) -> TypeModel {
        TypeModel::build(
            vec![
                TypeDeclaration::interface("Handler").with_methods(vec![handle(), render()]),
                TypeDeclaration::class("WebHandler")
                    .with_implements(vec!["Handler".into()])
                    .with_methods(vec![
                        MethodSignature::new("WebHandler", "handle", vec!["Request".into()], "void"),
                        MethodSignature::new("WebHandler", "render", vec![], "String"),
                    ]),
                TypeDeclaration::class("Dispatcher"),
                TypeDeclaration::class("Router"),
            ],
            references,
        )
        .unwrap()
    }

    fn usage_of(model: &TypeModel) -> UsageAnalysis {
        let interface = model.interface("Handler").unwrap();
        let implementers = crate::analyzers::implementations::direct_implementers(model, "Handler");
        analyze_usage(model, interface, &implementers)
    }

    #[test]
    fn repeated_uses_in_one_class_count_once() {
        let model = fixture(vec![
            Reference::typed(ReferenceKind::Field, "Dispatcher", "Handler"),
            Reference::typed(ReferenceKind::Parameter, "Dispatcher", "Handler"),
            Reference::typed(ReferenceKind::LocalVariable, "Router", "Handler"),
        ]);
        assert_eq!(usage_of(&model).usage_count, 2);
    }

    #[test]
    fn calls_typed_as_the_interface_count_toward_usage() {
        let model = fixture(vec![Reference::call(
            "Dispatcher",
            Some("Handler"),
            handle(),
        )]);
        assert_eq!(usage_of(&model).usage_count, 1);
    }

    #[test]
    fn call_through_interface_marks_method_used() {
        let model = fixture(vec![Reference::call(
            "Dispatcher",
            Some("Handler"),
            handle(),
        )]);
        let usage = usage_of(&model);
        assert_eq!(usage.methods_total, 2);
        assert_eq!(usage.methods_unused, 1);
    }

    #[test]
    fn call_through_implementer_marks_method_used() {
        let target = MethodSignature::new("WebHandler", "render", vec![], "String");
        let model = fixture(vec![Reference::call("Router", Some("WebHandler"), target)]);
        let usage = usage_of(&model);
        assert_eq!(usage.methods_unused, 1);
    }

    #[test]
    fn call_on_unrelated_receiver_does_not_count() {
        let target = MethodSignature::new("Router", "handle", vec!["Request".into()], "void");
        let model = fixture(vec![Reference::call("Dispatcher", Some("Router"), target)]);
        let usage = usage_of(&model);
        assert_eq!(usage.methods_unused, 2);
    }

    #[test]
    fn unresolved_receiver_matches_on_signature_alone() {
        let model = fixture(vec![Reference::call("Dispatcher", None, handle())]);
        let usage = usage_of(&model);
        assert_eq!(usage.methods_unused, 1);
    }

    #[test]
    fn no_references_leaves_every_method_unused() {
        let usage = usage_of(&fixture(vec![]));
        assert_eq!(usage.usage_count, 0);
        assert_eq!(usage.methods_unused, 2);
    }
}
