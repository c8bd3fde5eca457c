use crate::domain::edge::DependencyEdge;
use crate::domain::symbol::{FieldSymbol, MethodSymbol, TypeSymbol};
use serde::{Deserialize, Serialize};

/// Description carried by nodes, fields and methods until enrichment replaces it.
pub const PLACEHOLDER_DESCRIPTION: &str = "(not analyzed)";

/// Field projection with its own description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub exported: bool,
    pub embedded: bool,
    pub description: String,
}

impl From<&FieldSymbol> for FieldView {
    fn from(field: &FieldSymbol) -> Self {
        Self {
            name: field.name.clone(),
            type_ref: field.type_ref.clone(),
            tag: field.tag.clone(),
            exported: field.exported,
            embedded: field.embedded,
            description: PLACEHOLDER_DESCRIPTION.to_string(),
        }
    }
}

/// Method projection with its own description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodView {
    pub name: String,
    pub signature: String,
    pub receiver: String,
    pub exported: bool,
    pub description: String,
}

impl From<&MethodSymbol> for MethodView {
    fn from(method: &MethodSymbol) -> Self {
        Self {
            name: method.name.clone(),
            signature: method.signature.clone(),
            receiver: method.receiver.clone(),
            exported: method.exported,
            description: PLACEHOLDER_DESCRIPTION.to_string(),
        }
    }
}

/// One visited struct in the result graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisNode {
    pub name: String,
    pub package: String,
    pub description: String,
    /// BFS discovery depth, fixed at first visit.
    pub depth: usize,
    pub fields: Vec<FieldView>,
    pub methods: Vec<MethodView>,
    pub edges: Vec<DependencyEdge>,
}

impl AnalysisNode {
    pub fn new(symbol: &TypeSymbol, depth: usize, edges: Vec<DependencyEdge>) -> Self {
        Self {
            name: symbol.name.clone(),
            package: symbol.package.clone(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            depth,
            fields: symbol.fields.iter().map(FieldView::from).collect(),
            methods: symbol.methods.iter().map(MethodView::from).collect(),
            edges,
        }
    }

    pub fn is_enriched(&self) -> bool {
        self.description != PLACEHOLDER_DESCRIPTION
    }
}
