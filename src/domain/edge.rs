use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency kind - how one struct comes to depend on another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    // ============ Declarations ============
    Field, // named field of the target type
    Embed, // anonymous (embedded) field

    // ============ Method bodies ============
    Init,        // composite literal or new(T)
    Constructor, // NewT() call
    MethodCall,  // recv.M() where recv resolves to the target

    // ============ Method sets ============
    Interface, // method names cover the target interface
}

impl DependencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Field => "field",
            DependencyKind::Embed => "embed",
            DependencyKind::Init => "init",
            DependencyKind::Constructor => "constructor",
            DependencyKind::MethodCall => "method_call",
            DependencyKind::Interface => "interface",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified, directed relationship between two structs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub kind: DependencyKind,
    /// Where the relationship was found (field name, `method -> Called`).
    pub context: String,
    /// Source node depth + 1.
    pub depth: usize,
}

impl DependencyEdge {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        kind: DependencyKind,
        context: impl Into<String>,
        depth: usize,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            context: context.into(),
            depth,
        }
    }

    /// Deduplication key.
    pub fn key(&self) -> (&str, &str, DependencyKind) {
        (&self.from, &self.to, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&DependencyKind::MethodCall).unwrap();
        assert_eq!(json, "\"method_call\"");
        assert_eq!(DependencyKind::MethodCall.to_string(), "method_call");
    }

    #[test]
    fn test_key_ignores_context_and_depth() {
        let a = DependencyEdge::new("A", "B", DependencyKind::Init, "Run", 1);
        let b = DependencyEdge::new("A", "B", DependencyKind::Init, "Stop", 1);
        assert_eq!(a.key(), b.key());
        assert_ne!(a, b);
    }
}
