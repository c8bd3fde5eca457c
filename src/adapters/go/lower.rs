//! Lowering of tree-sitter Go bodies into [`Syntax`].

use super::render::{is_type_kind, render_type, text};
use crate::domain::syntax::Syntax;
use tree_sitter::Node;

pub fn lower(node: Node<'_>, source: &str) -> Syntax {
    let field = |name: &str| node.child_by_field_name(name);

    match node.kind() {
        "identifier" => Syntax::Ident(text(node, source).to_string()),

        "selector_expression" => match (field("operand"), field("field")) {
            (Some(operand), Some(name)) => Syntax::Selector {
                operand: Box::new(lower(operand, source)),
                field: text(name, source).to_string(),
            },
            _ => lower_children(node, source),
        },

        "composite_literal" => {
            let ty = field("type")
                .map(|t| render_type(t, source))
                .filter(|t| !t.is_empty());
            let elements = field("body")
                .map(|body| named_children(body, source))
                .unwrap_or_default();
            Syntax::CompositeLit { ty, elements }
        }

        "call_expression" => {
            let Some(function) = field("function") else {
                return lower_children(node, source);
            };
            let args = field("arguments")
                .map(|args| named_children(args, source))
                .unwrap_or_default();
            Syntax::Call {
                function: Box::new(lower(function, source)),
                args,
            }
        }

        "unary_expression" => {
            let Some(operand) = field("operand") else {
                return lower_children(node, source);
            };
            let inner = Box::new(lower(operand, source));
            match field("operator").map(|op| text(op, source)) {
                Some("&") => Syntax::AddressOf(inner),
                Some("*") => Syntax::Deref(inner),
                _ => Syntax::Block(vec![*inner]),
            }
        }

        "type_assertion_expression" => match (field("operand"), field("type")) {
            (Some(operand), Some(ty)) => Syntax::TypeAssert {
                operand: Box::new(lower(operand, source)),
                ty: render_type(ty, source),
            },
            _ => lower_children(node, source),
        },

        "parenthesized_expression" => match super::render::first_named_child(node) {
            Some(inner) => lower(inner, source),
            None => Syntax::empty(),
        },

        "short_var_declaration" => {
            let names = field("left")
                .map(|left| declared_names(left, source))
                .unwrap_or_default();
            let values = field("right")
                .map(|right| named_children(right, source))
                .unwrap_or_default();
            Syntax::ShortVarDecl { names, values }
        }

        "var_spec" => {
            let mut cursor = node.walk();
            let names = node
                .children_by_field_name("name", &mut cursor)
                .map(|n| text(n, source).to_string())
                .collect();
            let ty = field("type")
                .map(|t| render_type(t, source))
                .filter(|t| !t.is_empty());
            let values = field("value")
                .map(|v| named_children(v, source))
                .unwrap_or_default();
            Syntax::VarDecl { names, ty, values }
        }

        "comment" => Syntax::empty(),

        kind if is_type_kind(kind) => Syntax::Type(render_type(node, source)),

        _ => lower_children(node, source),
    }
}

fn lower_children(node: Node<'_>, source: &str) -> Syntax {
    Syntax::Block(named_children(node, source))
}

fn named_children(node: Node<'_>, source: &str) -> Vec<Syntax> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .map(|c| lower(c, source))
        .collect()
}

/// Left side of `:=`; non-identifiers keep their slot as `_`.
fn declared_names(list: Node<'_>, source: &str) -> Vec<String> {
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .map(|c| match c.kind() {
            "identifier" => text(c, source).to_string(),
            _ => "_".to_string(),
        })
        .collect()
}
