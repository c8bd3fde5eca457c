use crate::domain::syntax::Syntax;
use crate::domain::type_ref::TypeRef;
use std::path::PathBuf;

/// Struct declaration with its fields and attached methods.
#[derive(Debug, Clone)]
pub struct TypeSymbol {
    pub name: String,
    pub package: String,
    pub file_path: PathBuf,
    /// Declaration text as written.
    pub source: String,
    pub fields: Vec<FieldSymbol>,
    /// Attached after the merge phase, possibly from sibling files.
    pub methods: Vec<MethodSymbol>,
}

impl TypeSymbol {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

    /// Source text of all attached methods, blank-line separated.
    pub fn methods_source(&self) -> String {
        self.methods
            .iter()
            .map(|m| m.source.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Declaration plus method sources; the content-hash material for enrichment caching.
    pub fn combined_source(&self) -> String {
        if self.methods.is_empty() {
            return self.source.clone();
        }
        format!("{}\n\n{}", self.source, self.methods_source())
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSymbol {
    pub name: String,
    /// Type text as written (`*repository.UserRepository`).
    pub type_ref: String,
    pub tag: Option<String>,
    pub exported: bool,
    pub embedded: bool,
}

impl FieldSymbol {
    pub fn parsed_type(&self) -> TypeRef {
        TypeRef::parse(&self.type_ref)
    }
}

#[derive(Debug, Clone)]
pub struct MethodSymbol {
    pub name: String,
    /// Parameters and results as written, e.g. `(id string) (*User, error)`.
    pub signature: String,
    /// Receiver type as written (`*UserService`).
    pub receiver: String,
    pub exported: bool,
    pub source: String,
    pub body: Option<Syntax>,
}

impl MethodSymbol {
    /// Receiver type name without pointer or type parameters.
    pub fn receiver_base(&self) -> &str {
        receiver_base(&self.receiver)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSymbol {
    pub name: String,
    pub package: String,
    /// (method name, signature) in declaration order.
    pub methods: Vec<(String, String)>,
}

impl InterfaceSymbol {
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|(name, _)| name.as_str())
    }
}

/// Free function matching the constructor naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSymbol {
    pub name: String,
    pub package: String,
    /// First declared result.
    pub return_type: String,
    pub signature: String,
}

/// Everything extracted from one source file, before the merge.
#[derive(Debug, Clone, Default)]
pub struct FileSymbols {
    pub path: PathBuf,
    pub package: String,
    pub types: Vec<TypeSymbol>,
    pub methods: Vec<MethodSymbol>,
    pub interfaces: Vec<InterfaceSymbol>,
    pub functions: Vec<FunctionSymbol>,
}

/// Go exports identifiers whose first character is an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// `*Stack[T]` -> `Stack`
pub fn receiver_base(receiver: &str) -> &str {
    let trimmed = receiver.trim().trim_start_matches('*').trim();
    let trimmed = trimmed.split('[').next().unwrap_or(trimmed);
    trimmed.trim_start_matches('(').trim_end_matches(')').trim()
}
