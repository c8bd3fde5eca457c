//! Heuristic type inference over method bodies.
//!
//! This is not a type checker. It recognizes a fixed set of syntactic shapes and
//! otherwise answers "unknown" (`None`), which downstream code treats as "no edge".

use crate::domain::convention;
use crate::domain::syntax::Syntax;
use crate::domain::type_ref::TypeRef;
use std::collections::HashMap;

/// Local variable name -> inferred type, collected from one method body.
///
/// Flat and scope-insensitive: a later declaration of the same name overwrites
/// an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeContext {
    vars: HashMap<String, TypeRef>,
}

impl TypeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&TypeRef> {
        self.vars.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: TypeRef) {
        self.vars.insert(name.into(), ty);
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeResolver;

impl TypeResolver {
    pub fn new() -> Self {
        Self
    }

    /// Infer a type from the expression's shape alone. Bare identifiers never resolve.
    pub fn infer_from_expression(&self, expr: &Syntax) -> Option<TypeRef> {
        match expr {
            Syntax::CompositeLit { ty: Some(ty), .. } => non_empty(ty),

            Syntax::Call { function, args } => match function.as_ref() {
                Syntax::Ident(name) if name == "new" => args
                    .first()
                    .and_then(Syntax::structural_name)
                    .and_then(|t| non_empty(&t))
                    .map(TypeRef::pointer_to),
                Syntax::Ident(name) if name == "make" => args
                    .first()
                    .and_then(Syntax::structural_name)
                    .and_then(|t| non_empty(&t)),
                Syntax::Ident(name) => {
                    convention::constructed_type(name).map(|t| TypeRef::parse(t).pointer_to())
                }
                Syntax::Selector { operand, field } => {
                    let target = convention::constructed_type(field)?;
                    let Syntax::Ident(package) = operand.as_ref() else {
                        return None;
                    };
                    Some(TypeRef::parse(&format!("{}.{}", package, target)).pointer_to())
                }
                _ => None,
            },

            Syntax::AddressOf(inner) => self.infer_from_expression(inner).map(TypeRef::pointer_to),

            Syntax::TypeAssert { ty, .. } => non_empty(ty),

            _ => None,
        }
    }

    /// Direct inference, then context lookup for identifiers, then structural naming.
    pub fn infer_with_context(&self, expr: &Syntax, context: &TypeContext) -> Option<TypeRef> {
        if let Some(ty) = self.infer_from_expression(expr) {
            return Some(ty);
        }
        if let Syntax::Ident(name) = expr {
            return context.get(name).cloned();
        }
        expr.structural_name().and_then(|name| non_empty(&name))
    }

    /// Record `:=` and `var` declarations found anywhere in the body.
    pub fn build_context(&self, body: &Syntax) -> TypeContext {
        let mut context = TypeContext::new();
        body.walk(&mut |node| match node {
            Syntax::ShortVarDecl { names, values } => {
                for (name, value) in names.iter().zip(values.iter()) {
                    if name == "_" {
                        continue;
                    }
                    if let Some(ty) = self.infer_from_expression(value) {
                        context.insert(name.clone(), ty);
                    }
                }
            }
            Syntax::VarDecl { names, ty, values } => {
                let declared = ty.as_deref().and_then(non_empty);
                for (idx, name) in names.iter().enumerate() {
                    if name == "_" {
                        continue;
                    }
                    let inferred = declared
                        .clone()
                        .or_else(|| values.get(idx).and_then(|v| self.infer_from_expression(v)));
                    if let Some(ty) = inferred {
                        context.insert(name.clone(), ty);
                    }
                }
            }
            _ => {}
        });
        context
    }
}

fn non_empty(text: &str) -> Option<TypeRef> {
    let parsed = TypeRef::parse(text);
    (!parsed.is_empty()).then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Syntax {
        Syntax::Ident(name.to_string())
    }

    fn call(function: Syntax, args: Vec<Syntax>) -> Syntax {
        Syntax::Call {
            function: Box::new(function),
            args,
        }
    }

    fn selector(operand: Syntax, field: &str) -> Syntax {
        Syntax::Selector {
            operand: Box::new(operand),
            field: field.to_string(),
        }
    }

    fn lit(ty: &str) -> Syntax {
        Syntax::CompositeLit {
            ty: Some(ty.to_string()),
            elements: Vec::new(),
        }
    }

    fn infer(expr: &Syntax) -> Option<String> {
        TypeResolver::new().infer_from_expression(expr).map(|t| t.to_string())
    }

    #[test]
    fn test_composite_literal() {
        assert_eq!(infer(&lit("model.User")).as_deref(), Some("model.User"));
        let elided = Syntax::CompositeLit {
            ty: None,
            elements: Vec::new(),
        };
        assert_eq!(infer(&elided), None);
    }

    #[test]
    fn test_new_and_make() {
        let new_call = call(ident("new"), vec![Syntax::Type("Buffer".to_string())]);
        assert_eq!(infer(&new_call).as_deref(), Some("*Buffer"));

        let make_call = call(
            ident("make"),
            vec![Syntax::Type("[]Item".to_string()), Syntax::empty()],
        );
        assert_eq!(infer(&make_call).as_deref(), Some("[]Item"));

        assert_eq!(infer(&call(ident("new"), Vec::new())), None);
    }

    #[test]
    fn test_address_of() {
        assert_eq!(
            infer(&Syntax::AddressOf(Box::new(lit("Config")))).as_deref(),
            Some("*Config")
        );
        assert_eq!(infer(&Syntax::AddressOf(Box::new(ident("cfg")))), None);
    }

    #[test]
    fn test_type_assertion() {
        let expr = Syntax::TypeAssert {
            operand: Box::new(ident("v")),
            ty: "*Handler".to_string(),
        };
        assert_eq!(infer(&expr).as_deref(), Some("*Handler"));
    }

    #[test]
    fn test_constructor_calls() {
        assert_eq!(
            infer(&call(ident("NewCache"), Vec::new())).as_deref(),
            Some("*Cache")
        );
        assert_eq!(
            infer(&call(selector(ident("cache"), "NewCache"), Vec::new())).as_deref(),
            Some("*cache.Cache")
        );
        assert_eq!(infer(&call(ident("New"), Vec::new())), None);
        assert_eq!(infer(&call(ident("build"), Vec::new())), None);
    }

    #[test]
    fn test_bare_identifier_does_not_resolve() {
        assert_eq!(infer(&ident("User")), None);
    }

    #[test]
    fn test_context_from_short_and_var_declarations() {
        let body = Syntax::Block(vec![
            Syntax::ShortVarDecl {
                names: vec!["user".to_string(), "err".to_string()],
                values: vec![lit("model.User"), ident("nil")],
            },
            Syntax::VarDecl {
                names: vec!["repo".to_string()],
                ty: Some("*repository.UserRepository".to_string()),
                values: Vec::new(),
            },
            Syntax::VarDecl {
                names: vec!["c".to_string()],
                ty: None,
                values: vec![call(ident("NewCache"), Vec::new())],
            },
            Syntax::ShortVarDecl {
                names: vec!["_".to_string()],
                values: vec![lit("Ignored")],
            },
        ]);

        let ctx = TypeResolver::new().build_context(&body);
        assert_eq!(ctx.get("user").map(|t| t.to_string()).as_deref(), Some("model.User"));
        assert_eq!(
            ctx.get("repo").map(|t| t.to_string()).as_deref(),
            Some("*repository.UserRepository")
        );
        assert_eq!(ctx.get("c").map(|t| t.to_string()).as_deref(), Some("*Cache"));
        assert!(ctx.get("err").is_none());
        assert_eq!(ctx.len(), 3);
    }

    #[test]
    fn test_nested_declarations_are_found() {
        let body = Syntax::Block(vec![Syntax::Block(vec![Syntax::ShortVarDecl {
            names: vec!["u".to_string()],
            values: vec![Syntax::AddressOf(Box::new(lit("User")))],
        }])]);
        let ctx = TypeResolver::new().build_context(&body);
        assert_eq!(ctx.get("u").map(|t| t.to_string()).as_deref(), Some("*User"));
    }

    #[test]
    fn test_infer_with_context_fallbacks() {
        let resolver = TypeResolver::new();
        let mut ctx = TypeContext::new();
        ctx.insert("u", TypeRef::parse("*User"));

        assert_eq!(
            resolver.infer_with_context(&ident("u"), &ctx).map(|t| t.to_string()).as_deref(),
            Some("*User")
        );
        assert_eq!(resolver.infer_with_context(&ident("missing"), &ctx), None);
        assert_eq!(
            resolver
                .infer_with_context(&selector(ident("s"), "repo"), &ctx)
                .map(|t| t.to_string())
                .as_deref(),
            Some("s.repo")
        );
    }
}
