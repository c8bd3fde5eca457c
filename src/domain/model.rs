//! SourceModel - the immutable symbol table.
//!
//! Built in two passes from per-file extraction results:
//! 1. Merge: fold every [`FileSymbols`] into the shared tables (first declaration wins).
//! 2. Attach: hand each method to the struct named by its receiver in the same package.
//!
//! After [`SourceModel::from_files`] returns, nothing mutates the model; analysis
//! borrows it by shared reference.

use crate::domain::symbol::{FileSymbols, FunctionSymbol, InterfaceSymbol, MethodSymbol, TypeSymbol};
use crate::domain::type_ref::TypeRef;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Build statistics, reported once after extraction.
#[derive(Debug, Clone, Default)]
pub struct ModelStats {
    pub files_parsed: usize,
    pub skipped_files: Vec<PathBuf>,
    pub orphan_methods: usize,
}

#[derive(Debug, Default)]
pub struct SourceModel {
    root: PathBuf,
    root_id: String,
    types: Vec<TypeSymbol>,
    type_index: HashMap<String, Vec<usize>>,
    interfaces: Vec<InterfaceSymbol>,
    interface_index: HashMap<String, Vec<usize>>,
    functions: BTreeMap<(String, String), FunctionSymbol>,
    packages: BTreeSet<String>,
    stats: ModelStats,
}

impl SourceModel {
    /// Merge per-file results. `files` must already be in a deterministic order.
    pub fn from_files(
        root: impl Into<PathBuf>,
        root_id: impl Into<String>,
        files: Vec<FileSymbols>,
        skipped_files: Vec<PathBuf>,
    ) -> Self {
        let mut model = SourceModel {
            root: root.into(),
            root_id: root_id.into(),
            stats: ModelStats {
                files_parsed: files.len(),
                skipped_files,
                orphan_methods: 0,
            },
            ..Default::default()
        };

        let mut type_keys: HashMap<(String, String), usize> = HashMap::new();
        let mut interface_keys: BTreeMap<(String, String), InterfaceSymbol> = BTreeMap::new();
        let mut pending_methods: Vec<(String, MethodSymbol)> = Vec::new();

        // Pass 1: merge
        for file in files {
            model.packages.insert(file.package.clone());

            for symbol in file.types {
                let key = (symbol.package.clone(), symbol.name.clone());
                if type_keys.contains_key(&key) {
                    debug!(
                        "Duplicate struct {} in {}, keeping first declaration",
                        symbol.qualified_name(),
                        file.path.display()
                    );
                    continue;
                }
                type_keys.insert(key, model.types.len());
                model.types.push(symbol);
            }

            for iface in file.interfaces {
                interface_keys
                    .entry((iface.package.clone(), iface.name.clone()))
                    .or_insert(iface);
            }

            for function in file.functions {
                model
                    .functions
                    .entry((function.package.clone(), function.name.clone()))
                    .or_insert(function);
            }

            for method in file.methods {
                pending_methods.push((file.package.clone(), method));
            }
        }

        // Pass 2: attach methods to their receiver struct
        for (package, method) in pending_methods {
            let key = (package, method.receiver_base().to_string());
            match type_keys.get(&key) {
                Some(&idx) => model.types[idx].methods.push(method),
                None => {
                    trace!("Method {} has no struct receiver {}.{}", method.name, key.0, key.1);
                    model.stats.orphan_methods += 1;
                }
            }
        }

        for (idx, symbol) in model.types.iter().enumerate() {
            model
                .type_index
                .entry(symbol.name.clone())
                .or_default()
                .push(idx);
        }

        model.interfaces = interface_keys.into_values().collect();
        for (idx, iface) in model.interfaces.iter().enumerate() {
            model
                .interface_index
                .entry(iface.name.clone())
                .or_default()
                .push(idx);
        }

        model
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Module path from `go.mod`, or the root directory name.
    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn stats(&self) -> &ModelStats {
        &self.stats
    }

    pub fn types(&self) -> &[TypeSymbol] {
        &self.types
    }

    /// Interfaces ordered by (package, name).
    pub fn interfaces(&self) -> &[InterfaceSymbol] {
        &self.interfaces
    }

    pub fn packages(&self) -> &BTreeSet<String> {
        &self.packages
    }

    pub fn is_project_package(&self, name: &str) -> bool {
        self.packages.contains(name)
    }

    /// Resolve a struct by reference text. Accepts `Name`, `pkg.Name` and pointer/slice forms.
    ///
    /// A qualified reference prefers the struct in the matching package; otherwise the
    /// first declaration in file order wins.
    pub fn lookup_type(&self, reference: &str) -> Option<&TypeSymbol> {
        let parsed = TypeRef::parse(reference);
        if !parsed.is_named() {
            return None;
        }
        let candidates = self.type_index.get(parsed.short_name())?;
        if let Some(qualifier) = parsed.qualifier() {
            let package = qualifier.rsplit('/').next().unwrap_or(qualifier);
            if let Some(&idx) = candidates
                .iter()
                .find(|&&idx| self.types[idx].package == package)
            {
                return Some(&self.types[idx]);
            }
        }
        candidates.first().map(|&idx| &self.types[idx])
    }

    pub fn type_in_package(&self, package: &str, name: &str) -> Option<&TypeSymbol> {
        self.type_index
            .get(name)?
            .iter()
            .map(|&idx| &self.types[idx])
            .find(|t| t.package == package)
    }

    pub fn contains_type(&self, name: &str) -> bool {
        self.type_index.contains_key(name)
    }

    pub fn contains_interface(&self, name: &str) -> bool {
        self.interface_index.contains_key(name)
    }

    /// True for any struct or interface with this short name.
    pub fn knows(&self, name: &str) -> bool {
        self.contains_type(name) || self.contains_interface(name)
    }

    pub fn constructor(&self, package: &str, name: &str) -> Option<&FunctionSymbol> {
        self.functions.get(&(package.to_string(), name.to_string()))
    }

    /// Every constructor with this name, ordered by package.
    pub fn constructors_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FunctionSymbol> {
        self.functions.values().filter(move |f| f.name == name)
    }

    /// Sorted, deduplicated struct names.
    pub fn struct_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self.types.iter().map(|t| t.name.as_str()).collect();
        names.into_iter().map(String::from).collect()
    }
}
