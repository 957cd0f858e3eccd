//! Java source extraction using tree-sitter.
//!
//! Walks declarations, typed use sites, and method invocations out of a
//! parse tree. Receiver types are resolved against locally declared
//! fields, parameters, and variables only; anything requiring type
//! inference is left unresolved for the model builder to handle.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tree_sitter::{Node, Parser};

use super::{ParsedFile, RawCall, RawDeclaration, RawMethod, RawTypeRef};
use crate::core::{ReferenceKind, TypeKind};

pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_java::LANGUAGE;
        parser
            .set_language(&language.into())
            .context("failed to load the Java grammar")?;
        Ok(Self { parser })
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<ParsedFile> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        self.parse_source(path, &source)
    }

    pub fn parse_source(&mut self, path: &Path, source: &str) -> Result<ParsedFile> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| anyhow!("tree-sitter could not parse {}", path.display()))?;
        let mut file = ParsedFile {
            path: path.to_path_buf(),
            ..Default::default()
        };
        collect_types(tree.root_node(), source.as_bytes(), &mut file);
        Ok(file)
    }
}

fn collect_types(node: Node, src: &[u8], out: &mut ParsedFile) {
    match node.kind() {
        "class_declaration" => extract_class(node, src, out),
        "interface_declaration" => extract_interface(node, src, out),
        _ => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_types(child, src, out);
            }
        }
    }
}

fn extract_interface(node: Node, src: &[u8], out: &mut ParsedFile) {
    let Some(name) = field_text(node, "name", src) else {
        return;
    };

    let mut extends = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "extends_interfaces" {
            collect_listed_bases(child, src, &mut extends);
        }
    }

    let mut methods = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "method_declaration" => {
                    if let Some(method) = method_signature(member, src) {
                        methods.push(method);
                    }
                }
                "class_declaration" | "interface_declaration" => collect_types(member, src, out),
                _ => {}
            }
        }
    }

    out.declarations.push(RawDeclaration {
        name,
        kind: TypeKind::Interface,
        extends,
        implements: Vec::new(),
        methods,
    });
}

fn extract_class(node: Node, src: &[u8], out: &mut ParsedFile) {
    let Some(name) = field_text(node, "name", src) else {
        return;
    };

    let mut implements = Vec::new();
    if let Some(interfaces) = node.child_by_field_name("interfaces") {
        collect_listed_bases(interfaces, src, &mut implements);
    }

    let mut methods = Vec::new();
    let mut fields: HashMap<String, String> = HashMap::new();

    if let Some(body) = node.child_by_field_name("body") {
        // First sweep: field types and method signatures, so every body
        // walked later can resolve receivers against any field of the
        // class regardless of declaration order.
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "field_declaration" => extract_field(member, src, &name, &mut fields, out),
                "method_declaration" => {
                    if let Some(method) = method_signature(member, src) {
                        methods.push(method);
                    }
                }
                "class_declaration" | "interface_declaration" => collect_types(member, src, out),
                _ => {}
            }
        }

        // Second sweep: signatures emit typed references, bodies emit
        // locals and invocations.
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "method_declaration" | "constructor_declaration" => {
                    extract_executable(member, src, &name, &fields, out);
                }
                "field_declaration" => {
                    let mut scope = fields.clone();
                    walk_body(member, src, &name, &mut scope, out);
                }
                _ => {}
            }
        }
    }

    out.declarations.push(RawDeclaration {
        name,
        kind: TypeKind::Class,
        extends: Vec::new(),
        implements,
        methods,
    });
}

fn extract_field(
    node: Node,
    src: &[u8],
    site: &str,
    fields: &mut HashMap<String, String>,
    out: &mut ParsedFile,
) {
    let Some(type_node) = node.child_by_field_name("type") else {
        return;
    };
    emit_type_refs(type_node, src, site, ReferenceKind::Field, out);

    let base = base_name(type_node, src);
    let mut cursor = node.walk();
    for declarator in node.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        if let (Some(field_name), Some(base)) = (field_text(declarator, "name", src), base.clone())
        {
            fields.insert(field_name, base);
        }
    }
}

fn extract_executable(
    node: Node,
    src: &[u8],
    site: &str,
    fields: &HashMap<String, String>,
    out: &mut ParsedFile,
) {
    let mut scope = fields.clone();

    if node.kind() == "method_declaration" {
        if let Some(return_type) = node.child_by_field_name("type") {
            emit_type_refs(return_type, src, site, ReferenceKind::ReturnType, out);
        }
    }

    if let Some(parameters) = node.child_by_field_name("parameters") {
        let mut cursor = parameters.walk();
        for parameter in parameters.named_children(&mut cursor) {
            if !matches!(parameter.kind(), "formal_parameter" | "spread_parameter") {
                continue;
            }
            let Some(type_node) = parameter_type(parameter) else {
                continue;
            };
            emit_type_refs(type_node, src, site, ReferenceKind::Parameter, out);
            if let (Some(param), Some(base)) =
                (parameter_name(parameter, src), base_name(type_node, src))
            {
                scope.insert(param, base);
            }
        }
    }

    if let Some(body) = node.child_by_field_name("body") {
        walk_body(body, src, site, &mut scope, out);
    }
}

fn walk_body(
    node: Node,
    src: &[u8],
    site: &str,
    scope: &mut HashMap<String, String>,
    out: &mut ParsedFile,
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "local_variable_declaration" => {
                if let Some(type_node) = child.child_by_field_name("type") {
                    emit_type_refs(type_node, src, site, ReferenceKind::LocalVariable, out);
                    let base = base_name(type_node, src);
                    let mut declarators = child.walk();
                    for declarator in child.named_children(&mut declarators) {
                        if declarator.kind() != "variable_declarator" {
                            continue;
                        }
                        if let (Some(local), Some(base)) =
                            (field_text(declarator, "name", src), base.clone())
                        {
                            scope.insert(local, base);
                        }
                    }
                }
                // Initializers may contain further invocations.
                walk_body(child, src, site, scope, out);
            }
            "enhanced_for_statement" => {
                if let Some(type_node) = child.child_by_field_name("type") {
                    emit_type_refs(type_node, src, site, ReferenceKind::LocalVariable, out);
                    if let (Some(var), Some(base)) =
                        (field_text(child, "name", src), base_name(type_node, src))
                    {
                        scope.insert(var, base);
                    }
                }
                walk_body(child, src, site, scope, out);
            }
            "method_invocation" => {
                extract_call(child, src, site, scope, out);
                walk_body(child, src, site, scope, out);
            }
            "class_declaration" | "interface_declaration" => collect_types(child, src, out),
            _ => walk_body(child, src, site, scope, out),
        }
    }
}

fn extract_call(
    node: Node,
    src: &[u8],
    site: &str,
    scope: &HashMap<String, String>,
    out: &mut ParsedFile,
) {
    let Some(callee) = field_text(node, "name", src) else {
        return;
    };
    let arg_count = node
        .child_by_field_name("arguments")
        .map(|args| args.named_child_count())
        .unwrap_or(0);

    let (receiver_type, receiver_name) = match node.child_by_field_name("object") {
        None => (Some(site.to_string()), None),
        Some(object) => receiver_of(object, src, site, scope),
    };

    out.calls.push(RawCall {
        site: site.to_string(),
        callee,
        arg_count,
        receiver_type,
        receiver_name,
    });
}

fn receiver_of(
    object: Node,
    src: &[u8],
    site: &str,
    scope: &HashMap<String, String>,
) -> (Option<String>, Option<String>) {
    match object.kind() {
        "this" => (Some(site.to_string()), None),
        "identifier" => match node_text(object, src) {
            Some(name) => (scope.get(&name).cloned(), Some(name)),
            None => (None, None),
        },
        "field_access" => {
            let through_this = object
                .child_by_field_name("object")
                .map(|inner| inner.kind() == "this")
                .unwrap_or(false);
            if through_this {
                if let Some(field) = field_text(object, "field", src) {
                    return (scope.get(&field).cloned(), None);
                }
            }
            (None, None)
        }
        "parenthesized_expression" => match object.named_child(0) {
            Some(inner) => receiver_of(inner, src, site, scope),
            None => (None, None),
        },
        _ => (None, None),
    }
}

fn method_signature(node: Node, src: &[u8]) -> Option<RawMethod> {
    let name = field_text(node, "name", src)?;
    let return_type = node
        .child_by_field_name("type")
        .map(|t| type_text(t, src))
        .unwrap_or_else(|| "void".to_string());

    let mut parameters = Vec::new();
    if let Some(params) = node.child_by_field_name("parameters") {
        let mut cursor = params.walk();
        for parameter in params.named_children(&mut cursor) {
            if !matches!(parameter.kind(), "formal_parameter" | "spread_parameter") {
                continue;
            }
            if let Some(type_node) = parameter_type(parameter) {
                parameters.push(type_text(type_node, src));
            }
        }
    }

    Some(RawMethod {
        name,
        parameters,
        return_type,
    })
}

fn parameter_type(parameter: Node) -> Option<Node> {
    if let Some(type_node) = parameter.child_by_field_name("type") {
        return Some(type_node);
    }
    // spread_parameter carries no field names; the type is the first
    // named child that is not a modifier or declarator.
    let mut cursor = parameter.walk();
    let result = parameter
        .named_children(&mut cursor)
        .find(|child| !matches!(child.kind(), "modifiers" | "variable_declarator" | "identifier"));
    result
}

fn parameter_name(parameter: Node, src: &[u8]) -> Option<String> {
    if let Some(name) = field_text(parameter, "name", src) {
        return Some(name);
    }
    let mut cursor = parameter.walk();
    let declarator = parameter
        .named_children(&mut cursor)
        .find(|child| child.kind() == "variable_declarator")?;
    field_text(declarator, "name", src)
}

fn emit_type_refs(type_node: Node, src: &[u8], site: &str, kind: ReferenceKind, out: &mut ParsedFile) {
    let mut names = Vec::new();
    collect_type_names(type_node, src, &mut names);
    for type_name in names {
        out.type_refs.push(RawTypeRef {
            site: site.to_string(),
            kind,
            type_name,
        });
    }
}

/// Collect every named type mentioned by a type node, including generic
/// arguments: `Map<String, Handler>` yields Map, String, and Handler.
fn collect_type_names(node: Node, src: &[u8], out: &mut Vec<String>) {
    match node.kind() {
        "type_identifier" => {
            if let Some(name) = node_text(node, src) {
                out.push(name);
            }
        }
        "scoped_type_identifier" => {
            if let Some(name) = node_text(node, src) {
                out.push(simple_name(&name));
            }
        }
        "generic_type" | "type_arguments" | "array_type" | "wildcard" | "annotated_type" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_type_names(child, src, out);
            }
        }
        _ => {}
    }
}

/// The erased base of a type: `List<Handler>[]` resolves to List.
fn base_name(node: Node, src: &[u8]) -> Option<String> {
    match node.kind() {
        "type_identifier" => node_text(node, src),
        "scoped_type_identifier" => node_text(node, src).map(|name| simple_name(&name)),
        "generic_type" => node.named_child(0).and_then(|inner| base_name(inner, src)),
        "array_type" => node
            .child_by_field_name("element")
            .and_then(|element| base_name(element, src)),
        _ => None,
    }
}

fn collect_listed_bases(node: Node, src: &[u8], out: &mut Vec<String>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "type_list" {
            collect_listed_bases(child, src, out);
        } else if let Some(base) = base_name(child, src) {
            out.push(base);
        }
    }
}

fn simple_name(qualified: &str) -> String {
    qualified.rsplit('.').next().unwrap_or(qualified).to_string()
}

fn type_text(node: Node, src: &[u8]) -> String {
    node.utf8_text(src)
        .map(|text| text.split_whitespace().collect::<String>())
        .unwrap_or_default()
}

fn field_text(node: Node, field: &str, src: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|child| node_text(child, src))
}

fn node_text(node: Node, src: &[u8]) -> Option<String> {
    node.utf8_text(src).ok().map(str::to_string)
}
