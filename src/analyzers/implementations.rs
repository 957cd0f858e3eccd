//! Implementation resolution: which classes directly implement an
//! interface.

use crate::core::{TypeDeclaration, TypeModel};

/// Classes whose declared implements-set names the interface. Transitive
/// implementation through a sub-interface is deliberately not counted;
/// the metric measures direct declaration-level commitment.
pub fn direct_implementers<'a>(model: &'a TypeModel, interface: &str) -> Vec<&'a TypeDeclaration> {
    model
        .classes()
        .filter(|class| class.implements.iter().any(|name| name == interface))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TypeDeclaration;

    #[test]
    fn finds_direct_implementers_only() {
        let model = TypeModel::build(
            vec![
                TypeDeclaration::interface("Shape"),
                TypeDeclaration::interface("Polygon").with_extends(vec!["Shape".into()]),
                TypeDeclaration::class("Circle").with_implements(vec!["Shape".into()]),
                TypeDeclaration::class("Square").with_implements(vec!["Polygon".into()]),
                TypeDeclaration::class("Point"),
            ],
            vec![],
        )
        .unwrap();

        let implementers = direct_implementers(&model, "Shape");
        assert_eq!(implementers.len(), 1);
        assert_eq!(implementers[0].name, "Circle");

        // Square implements Polygon, a sub-interface of Shape; that is
        // not a direct implementation of Shape.
        assert_eq!(direct_implementers(&model, "Polygon").len(), 1);
    }

    #[test]
    fn zero_implementers_is_valid() {
        let model = TypeModel::build(
            vec![
                TypeDeclaration::interface("Unused"),
                TypeDeclaration::class("Worker"),
            ],
            vec![],
        )
        .unwrap();
        assert!(direct_implementers(&model, "Unused").is_empty());
    }
}
