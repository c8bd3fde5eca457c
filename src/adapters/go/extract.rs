//! Per-file symbol extraction with tree-sitter-go.

use super::lower::lower;
use super::render::{render_type, text};
use crate::domain::convention;
use crate::domain::symbol::{
    FieldSymbol, FileSymbols, FunctionSymbol, InterfaceSymbol, MethodSymbol, TypeSymbol,
    is_exported, receiver_base,
};
use crate::error::ParseError;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Parse one Go file. A tree containing syntax errors is rejected as a whole.
pub fn parse_file(path: &Path, source: &str) -> Result<FileSymbols, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::language())?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::NoTree(path.to_path_buf()))?;
    let root = tree.root_node();

    if root.has_error() {
        return Err(ParseError::Syntax {
            path: path.to_path_buf(),
            line: first_error_line(root).unwrap_or(0),
        });
    }

    let mut out = FileSymbols {
        path: path.to_path_buf(),
        ..Default::default()
    };

    let mut cursor = root.walk();
    let top_level: Vec<Node> = root.named_children(&mut cursor).collect();

    // Package clause first: every symbol carries it.
    for node in &top_level {
        if node.kind() == "package_clause" {
            let mut inner = node.walk();
            if let Some(name) = node
                .named_children(&mut inner)
                .find(|c| c.kind() == "package_identifier")
            {
                out.package = text(name, source).to_string();
            }
        }
    }

    for node in top_level {
        match node.kind() {
            "type_declaration" => extract_type_declaration(node, source, path, &mut out),
            "method_declaration" => {
                if let Some(method) = extract_method(node, source) {
                    out.methods.push(method);
                }
            }
            "function_declaration" => {
                if let Some(function) = extract_constructor(node, source, &out.package) {
                    out.functions.push(function);
                }
            }
            _ => {}
        }
    }

    Ok(out)
}

fn first_error_line(node: Node<'_>) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error_line)
}

fn extract_type_declaration(decl: Node<'_>, source: &str, path: &Path, out: &mut FileSymbols) {
    let mut cursor = decl.walk();
    let specs: Vec<Node> = decl
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "type_spec")
        .collect();
    let grouped = specs.len() > 1;

    for spec in specs {
        let (Some(name), Some(body)) = (spec.child_by_field_name("name"), spec.child_by_field_name("type"))
        else {
            continue;
        };
        let name = text(name, source).to_string();

        match body.kind() {
            "struct_type" => {
                let declaration = if grouped {
                    format!("type {}", text(spec, source))
                } else {
                    text(decl, source).to_string()
                };
                out.types.push(TypeSymbol {
                    name,
                    package: out.package.clone(),
                    file_path: path.to_path_buf(),
                    source: declaration,
                    fields: extract_fields(body, source),
                    methods: Vec::new(),
                });
            }
            "interface_type" => out.interfaces.push(InterfaceSymbol {
                name,
                package: out.package.clone(),
                methods: extract_interface_methods(body, source),
            }),
            _ => {}
        }
    }
}

fn extract_fields(struct_type: Node<'_>, source: &str) -> Vec<FieldSymbol> {
    let mut fields = Vec::new();
    let mut cursor = struct_type.walk();
    let Some(list) = struct_type
        .named_children(&mut cursor)
        .find(|c| c.kind() == "field_declaration_list")
    else {
        return fields;
    };

    let mut list_cursor = list.walk();
    for decl in list
        .named_children(&mut list_cursor)
        .filter(|c| c.kind() == "field_declaration")
    {
        let Some(ty) = decl.child_by_field_name("type") else {
            continue;
        };
        let tag = decl
            .child_by_field_name("tag")
            .map(|t| text(t, source).to_string());

        let mut name_cursor = decl.walk();
        let names: Vec<String> = decl
            .children_by_field_name("name", &mut name_cursor)
            .map(|n| text(n, source).to_string())
            .collect();

        if names.is_empty() {
            // Embedded: the field is named after the unqualified type.
            let mut child_cursor = decl.walk();
            let is_pointer = decl
                .children(&mut child_cursor)
                .any(|c| !c.is_named() && c.kind() == "*");
            let rendered = render_type(ty, source);
            let type_ref = if is_pointer && !rendered.starts_with('*') {
                format!("*{}", rendered)
            } else {
                rendered
            };
            let short = type_ref
                .trim_start_matches('*')
                .rsplit('.')
                .next()
                .unwrap_or_default()
                .to_string();
            fields.push(FieldSymbol {
                exported: is_exported(&short),
                name: short,
                type_ref,
                tag,
                embedded: true,
            });
            continue;
        }

        let type_ref = render_type(ty, source);
        for name in names {
            fields.push(FieldSymbol {
                exported: is_exported(&name),
                name,
                type_ref: type_ref.clone(),
                tag: tag.clone(),
                embedded: false,
            });
        }
    }
    fields
}

fn extract_interface_methods(iface: Node<'_>, source: &str) -> Vec<(String, String)> {
    let mut methods = Vec::new();
    collect_interface_methods(iface, source, &mut methods);
    methods
}

fn collect_interface_methods(node: Node<'_>, source: &str, out: &mut Vec<(String, String)>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "method_elem" | "method_spec" => {
                if let Some(name) = child.child_by_field_name("name") {
                    out.push((text(name, source).to_string(), signature(child, source)));
                }
            }
            // older grammars wrap the elements in a list node
            "method_spec_list" => collect_interface_methods(child, source, out),
            _ => {}
        }
    }
}

/// `(a int, b string) (T, error)` from the `parameters` and `result` fields.
fn signature(node: Node<'_>, source: &str) -> String {
    let params = node
        .child_by_field_name("parameters")
        .map(|p| text(p, source))
        .unwrap_or("()");
    match node.child_by_field_name("result") {
        Some(result) => format!("{} {}", params, text(result, source)),
        None => params.to_string(),
    }
}

fn extract_method(node: Node<'_>, source: &str) -> Option<MethodSymbol> {
    let name = text(node.child_by_field_name("name")?, source).to_string();
    let receiver_list = node.child_by_field_name("receiver")?;
    let mut cursor = receiver_list.walk();
    let receiver_param = receiver_list
        .named_children(&mut cursor)
        .find(|c| c.kind() == "parameter_declaration")?;
    let receiver = render_type(receiver_param.child_by_field_name("type")?, source);
    if receiver_base(&receiver).is_empty() {
        return None;
    }

    Some(MethodSymbol {
        exported: is_exported(&name),
        signature: signature(node, source),
        receiver,
        source: text(node, source).to_string(),
        body: node.child_by_field_name("body").map(|b| lower(b, source)),
        name,
    })
}

/// Free functions following the constructor convention with at least one result.
fn extract_constructor(node: Node<'_>, source: &str, package: &str) -> Option<FunctionSymbol> {
    let name = text(node.child_by_field_name("name")?, source);
    if !convention::is_constructor_name(name) {
        return None;
    }
    let result = node.child_by_field_name("result")?;
    let return_type = if result.kind() == "parameter_list" {
        let mut cursor = result.walk();
        let first = result
            .named_children(&mut cursor)
            .find(|c| c.kind() == "parameter_declaration")?;
        render_type(first.child_by_field_name("type")?, source)
    } else {
        render_type(result, source)
    };
    if return_type.is_empty() {
        return None;
    }

    Some(FunctionSymbol {
        name: name.to_string(),
        package: package.to_string(),
        return_type,
        signature: signature(node, source),
    })
}
