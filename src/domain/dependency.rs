//! Dependency classification for a single struct.
//!
//! Three additive passes run in a fixed order so edge emission is deterministic:
//! fields as declared, method bodies in pre-order, interfaces by (package, name).

use crate::domain::convention;
use crate::domain::edge::{DependencyEdge, DependencyKind};
use crate::domain::model::SourceModel;
use crate::domain::resolver::{TypeContext, TypeResolver};
use crate::domain::scope::ScopeFilter;
use crate::domain::symbol::{MethodSymbol, TypeSymbol};
use crate::domain::syntax::Syntax;
use crate::domain::type_ref::TypeRef;
use std::collections::HashSet;

/// Insertion-ordered edge list deduplicated by (from, to, kind).
#[derive(Debug, Default)]
struct EdgeSet {
    seen: HashSet<(String, String, DependencyKind)>,
    edges: Vec<DependencyEdge>,
}

impl EdgeSet {
    fn push(&mut self, edge: DependencyEdge) {
        let key = (edge.from.clone(), edge.to.clone(), edge.kind);
        if self.seen.insert(key) {
            self.edges.push(edge);
        }
    }
}

pub struct DependencyAnalyzer<'m> {
    model: &'m SourceModel,
    filter: &'m ScopeFilter<'m>,
    resolver: TypeResolver,
}

impl<'m> DependencyAnalyzer<'m> {
    pub fn new(model: &'m SourceModel, filter: &'m ScopeFilter<'m>) -> Self {
        Self {
            model,
            filter,
            resolver: TypeResolver::new(),
        }
    }

    /// Edges out of `symbol`, each stamped with `edge_depth`. Never fails; a symbol
    /// without usable bodies simply yields fewer edges.
    pub fn analyze(&self, symbol: &TypeSymbol, edge_depth: usize) -> Vec<DependencyEdge> {
        let mut edges = EdgeSet::default();
        self.field_pass(symbol, edge_depth, &mut edges);
        self.method_pass(symbol, edge_depth, &mut edges);
        self.interface_pass(symbol, edge_depth, &mut edges);
        edges.edges
    }

    fn field_pass(&self, symbol: &TypeSymbol, depth: usize, edges: &mut EdgeSet) {
        for field in &symbol.fields {
            let ty = field.parsed_type();
            if !self.filter.is_analyzable_ref(&ty) {
                continue;
            }
            let kind = if field.embedded {
                DependencyKind::Embed
            } else {
                DependencyKind::Field
            };
            edges.push(DependencyEdge::new(
                &symbol.name,
                ty.short_name(),
                kind,
                &field.name,
                depth,
            ));
        }
    }

    fn method_pass(&self, symbol: &TypeSymbol, depth: usize, edges: &mut EdgeSet) {
        for method in &symbol.methods {
            let Some(body) = &method.body else {
                continue;
            };
            let context = self.resolver.build_context(body);
            body.walk(&mut |node| self.visit(symbol, method, node, &context, depth, edges));
        }
    }

    fn visit(
        &self,
        symbol: &TypeSymbol,
        method: &MethodSymbol,
        node: &Syntax,
        context: &TypeContext,
        depth: usize,
        edges: &mut EdgeSet,
    ) {
        match node {
            Syntax::CompositeLit { ty: Some(ty), .. } => {
                let ty = TypeRef::parse(ty);
                if self.filter.is_analyzable_ref(&ty) {
                    edges.push(DependencyEdge::new(
                        &symbol.name,
                        ty.short_name(),
                        DependencyKind::Init,
                        &method.name,
                        depth,
                    ));
                }
            }
            Syntax::Call { function, args } => match function.as_ref() {
                Syntax::Ident(name) if name == "new" => {
                    let Some(arg) = args.first().and_then(Syntax::structural_name) else {
                        return;
                    };
                    if let Some(target) = self.model.lookup_type(&arg)
                        && self.filter.is_analyzable(&arg)
                    {
                        edges.push(DependencyEdge::new(
                            &symbol.name,
                            &target.name,
                            DependencyKind::Init,
                            &method.name,
                            depth,
                        ));
                    }
                }
                Syntax::Ident(name) if convention::is_constructor_name(name) => {
                    if let Some(target) = self.constructor_target(name, None) {
                        edges.push(DependencyEdge::new(
                            &symbol.name,
                            target,
                            DependencyKind::Constructor,
                            format!("{} -> {}", method.name, name),
                            depth,
                        ));
                    }
                }
                Syntax::Selector { operand, field } => {
                    if convention::is_constructor_name(field)
                        && let Syntax::Ident(package) = operand.as_ref()
                        && let Some(target) = self.constructor_target(field, Some(package))
                    {
                        edges.push(DependencyEdge::new(
                            &symbol.name,
                            target,
                            DependencyKind::Constructor,
                            format!("{} -> {}", method.name, field),
                            depth,
                        ));
                        return;
                    }

                    let Some(receiver) = self.resolver.infer_with_context(operand, context) else {
                        return;
                    };
                    // Structural names can denote package-level values, not only types.
                    if self.filter.is_analyzable_ref(&receiver)
                        && self.model.knows(receiver.short_name())
                    {
                        edges.push(DependencyEdge::new(
                            &symbol.name,
                            receiver.short_name(),
                            DependencyKind::MethodCall,
                            format!("{} -> {}", method.name, field),
                            depth,
                        ));
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Resolve the struct built by a `New*` call.
    ///
    /// A package-qualified call first consults the constructor table (exact package,
    /// then any package in order) for the declared return type. Otherwise the name
    /// with the prefix stripped is used if such a struct exists.
    fn constructor_target(&self, function: &str, package: Option<&str>) -> Option<String> {
        let inferred = convention::constructed_type(function)?;

        if let Some(package) = package {
            let declared = self
                .model
                .constructor(package, function)
                .into_iter()
                .chain(self.model.constructors_named(function));
            for candidate in declared {
                let ty = TypeRef::parse(&candidate.return_type);
                if self.filter.is_analyzable_ref(&ty) {
                    return Some(ty.short_name().to_string());
                }
            }
        }

        (self.filter.is_analyzable(inferred) && self.model.contains_type(inferred))
            .then(|| inferred.to_string())
    }

    fn interface_pass(&self, symbol: &TypeSymbol, depth: usize, edges: &mut EdgeSet) {
        for iface in self.model.interfaces() {
            if iface.methods.is_empty() {
                continue;
            }
            if !self
                .filter
                .is_analyzable(&format!("{}.{}", iface.package, iface.name))
            {
                continue;
            }
            if iface.method_names().all(|name| symbol.has_method(name)) {
                edges.push(DependencyEdge::new(
                    &symbol.name,
                    &iface.name,
                    DependencyKind::Interface,
                    format!("implements {}", iface.name),
                    depth,
                ));
            }
        }
    }
}
