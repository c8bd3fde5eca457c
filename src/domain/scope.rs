//! Scope filter - decides which type references name analyzable project structs.

use crate::domain::blacklist::Blacklist;
use crate::domain::model::SourceModel;
use crate::domain::type_ref::TypeRef;

const BUILTIN_TYPES: &[&str] = &[
    "bool", "string", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16",
    "uint32", "uint64", "uintptr", "byte", "rune", "float32", "float64", "complex64",
    "complex128", "error", "any", "interface{}",
];

/// Root packages of the Go standard library and runtime.
const STDLIB_ROOTS: &[&str] = &[
    "context", "net", "io", "os", "fmt", "time", "sync", "errors", "strings", "bytes", "http",
    "json", "xml", "sql", "crypto", "encoding", "bufio", "log", "path", "filepath", "regexp",
    "sort", "strconv", "testing", "reflect", "runtime", "unsafe", "math", "flag", "html",
    "image", "mime", "template", "text", "unicode", "archive", "compress", "container",
    "database", "debug", "embed", "expvar", "go", "hash", "index", "plugin", "syscall",
];

pub struct ScopeFilter<'m> {
    model: &'m SourceModel,
    blacklist: Blacklist,
}

impl<'m> ScopeFilter<'m> {
    pub fn new(model: &'m SourceModel, blacklist: Blacklist) -> Self {
        Self { model, blacklist }
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub fn is_analyzable(&self, type_ref: &str) -> bool {
        self.is_analyzable_ref(&TypeRef::parse(type_ref))
    }

    pub fn is_analyzable_ref(&self, type_ref: &TypeRef) -> bool {
        if type_ref.is_empty() || type_ref.is_map() {
            return false;
        }
        if is_builtin(&type_ref.base) || !type_ref.is_named() {
            return false;
        }
        if is_stdlib(type_ref) {
            return false;
        }
        if self.blacklist.is_blocked(type_ref) {
            return false;
        }
        if !type_ref
            .short_name()
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase())
        {
            return false;
        }
        self.is_internal(type_ref)
    }

    fn is_internal(&self, type_ref: &TypeRef) -> bool {
        match type_ref.qualifier() {
            None => {
                let name = type_ref.base.as_str();
                self.model.knows(name) || self.model.is_project_package(name)
            }
            Some(qualifier) => {
                self.model.is_project_package(qualifier)
                    || (!self.model.root_id().is_empty()
                        && qualifier.starts_with(self.model.root_id()))
            }
        }
    }
}

fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

fn is_stdlib(type_ref: &TypeRef) -> bool {
    let Some(qualifier) = type_ref.qualifier() else {
        return false;
    };
    let root = qualifier.split(['/', '.']).next().unwrap_or(qualifier);
    STDLIB_ROOTS.contains(&root)
}
