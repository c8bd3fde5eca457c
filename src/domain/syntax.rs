//! Lowered Go syntax for method bodies.
//!
//! The parser adapter lowers tree-sitter nodes into this small tree so the body
//! heuristics ([`crate::domain::resolver`], [`crate::domain::dependency`]) can walk
//! code without depending on the parser library. Children keep source order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Syntax {
    Ident(String),
    Selector {
        operand: Box<Syntax>,
        field: String,
    },
    /// `T{...}`; `ty` is the rendered type text, absent for elided element types.
    CompositeLit {
        ty: Option<String>,
        elements: Vec<Syntax>,
    },
    Call {
        function: Box<Syntax>,
        args: Vec<Syntax>,
    },
    /// `&expr`
    AddressOf(Box<Syntax>),
    /// `*expr` in expression position.
    Deref(Box<Syntax>),
    TypeAssert {
        operand: Box<Syntax>,
        ty: String,
    },
    /// A type written in expression position, e.g. the argument of `new`/`make`.
    Type(String),
    /// `a, b := x, y`. Non-identifier targets are recorded as `_`.
    ShortVarDecl {
        names: Vec<String>,
        values: Vec<Syntax>,
    },
    /// One `var` spec.
    VarDecl {
        names: Vec<String>,
        ty: Option<String>,
        values: Vec<Syntax>,
    },
    /// Any other node; only its children matter.
    Block(Vec<Syntax>),
}

impl Syntax {
    pub fn empty() -> Self {
        Syntax::Block(Vec::new())
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Syntax> {
        match self {
            Syntax::Ident(_) | Syntax::Type(_) => Vec::new(),
            Syntax::Selector { operand, .. } => vec![operand.as_ref()],
            Syntax::CompositeLit { elements, .. } => elements.iter().collect(),
            Syntax::Call { function, args } => {
                let mut out = vec![function.as_ref()];
                out.extend(args.iter());
                out
            }
            Syntax::AddressOf(inner) | Syntax::Deref(inner) => vec![inner.as_ref()],
            Syntax::TypeAssert { operand, .. } => vec![operand.as_ref()],
            Syntax::ShortVarDecl { values, .. } | Syntax::VarDecl { values, .. } => {
                values.iter().collect()
            }
            Syntax::Block(children) => children.iter().collect(),
        }
    }

    /// Pre-order visit. The visitor sees a node before its children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Syntax)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Dotted name of identifiers, selectors and types (`s.repo`, `pkg.Type`).
    pub fn structural_name(&self) -> Option<String> {
        match self {
            Syntax::Ident(name) | Syntax::Type(name) if !name.is_empty() => Some(name.clone()),
            Syntax::Selector { operand, field } => operand
                .structural_name()
                .map(|prefix| format!("{}.{}", prefix, field)),
            Syntax::Deref(inner) => inner.structural_name().map(|name| format!("*{}", name)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Syntax {
        Syntax::Ident(name.to_string())
    }

    #[test]
    fn test_walk_is_pre_order() {
        let tree = Syntax::Block(vec![
            Syntax::Call {
                function: Box::new(ident("f")),
                args: vec![Syntax::CompositeLit {
                    ty: Some("User".to_string()),
                    elements: vec![ident("x")],
                }],
            },
            ident("y"),
        ]);

        let mut seen = Vec::new();
        tree.walk(&mut |node| match node {
            Syntax::Ident(name) => seen.push(name.clone()),
            Syntax::Call { .. } => seen.push("call".to_string()),
            Syntax::CompositeLit { .. } => seen.push("lit".to_string()),
            _ => {}
        });
        assert_eq!(seen, vec!["call", "f", "lit", "x", "y"]);
    }

    #[test]
    fn test_structural_name_of_selector_chain() {
        let expr = Syntax::Selector {
            operand: Box::new(Syntax::Selector {
                operand: Box::new(ident("s")),
                field: "repo".to_string(),
            }),
            field: "db".to_string(),
        };
        assert_eq!(expr.structural_name().as_deref(), Some("s.repo.db"));
        assert_eq!(Syntax::empty().structural_name(), None);
    }
}
