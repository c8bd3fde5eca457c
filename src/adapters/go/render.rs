//! Rendering of tree-sitter Go type nodes into reference strings.
//!
//! Output follows the forms `TypeRef` understands: `*T`, `[]T`, `[...]T`,
//! `map[K]V`, `chan T`, `pkg.T`. Generic arguments are dropped (`Box[T]` -> `Box`).

use tree_sitter::Node;

/// Source text of a node; empty when the range is not valid UTF-8.
pub fn text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or("")
}

pub fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let child = node.named_children(&mut cursor).find(|c| c.kind() != "comment");
    child
}

pub fn is_type_kind(kind: &str) -> bool {
    matches!(
        kind,
        "type_identifier"
            | "pointer_type"
            | "qualified_type"
            | "slice_type"
            | "array_type"
            | "implicit_length_array_type"
            | "map_type"
            | "channel_type"
            | "function_type"
            | "interface_type"
            | "struct_type"
            | "generic_type"
            | "parenthesized_type"
    )
}

/// Render a type node. Unknown shapes render as an empty string.
pub fn render_type(node: Node<'_>, source: &str) -> String {
    let field = |name: &str| node.child_by_field_name(name);
    let render_field = |name: &str| {
        field(name)
            .map(|n| render_type(n, source))
            .unwrap_or_default()
    };

    match node.kind() {
        "type_identifier" | "identifier" | "field_identifier" | "package_identifier" => {
            text(node, source).to_string()
        }
        "pointer_type" => first_named_child(node)
            .map(|n| format!("*{}", render_type(n, source)))
            .unwrap_or_default(),
        "qualified_type" => match (field("package"), field("name")) {
            (Some(package), Some(name)) => {
                format!("{}.{}", text(package, source), text(name, source))
            }
            _ => text(node, source).to_string(),
        },
        "selector_expression" => match (field("operand"), field("field")) {
            (Some(operand), Some(name)) => {
                format!("{}.{}", render_type(operand, source), text(name, source))
            }
            _ => String::new(),
        },
        "slice_type" => format!("[]{}", render_field("element")),
        "array_type" | "implicit_length_array_type" => format!("[...]{}", render_field("element")),
        "map_type" => format!("map[{}]{}", render_field("key"), render_field("value")),
        "channel_type" => format!("chan {}", render_field("value")),
        "function_type" => "func".to_string(),
        "interface_type" => "interface{}".to_string(),
        "struct_type" => "struct{}".to_string(),
        "generic_type" => render_field("type"),
        "parenthesized_type" => first_named_child(node)
            .map(|n| render_type(n, source))
            .unwrap_or_default(),
        "unary_expression" => match (field("operator"), field("operand")) {
            (Some(op), Some(operand)) if text(op, source) == "*" => {
                format!("*{}", render_type(operand, source))
            }
            _ => String::new(),
        },
        _ => String::new(),
    }
}
