//! Normalized type references.
//!
//! Go type expressions arrive as rendered strings (`*pkg.Foo`, `[]Foo`, `map[string]*Bar`).
//! [`TypeRef`] peels the modifiers once so every consumer compares the same canonical form.

use std::fmt;

/// A parsed type reference.
///
/// Pointer and slice/array modifiers are counted, not ordered: `[]*Foo` and `*[]Foo`
/// normalize to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypeRef {
    /// Remaining type text after modifiers, possibly package-qualified (`pkg.Foo`).
    pub base: String,
    pub pointer_depth: u8,
    pub slice_depth: u8,
    /// Key and value types when the reference is map-shaped.
    pub map_of: Option<Box<(TypeRef, TypeRef)>>,
}

impl TypeRef {
    pub fn parse(raw: &str) -> Self {
        let mut rest = raw.trim();
        let mut pointer_depth: u8 = 0;
        let mut slice_depth: u8 = 0;

        loop {
            if let Some(stripped) = rest.strip_prefix('*') {
                pointer_depth = pointer_depth.saturating_add(1);
                rest = stripped.trim_start();
            } else if rest.starts_with('[') {
                match rest.find(']') {
                    Some(close) => {
                        slice_depth = slice_depth.saturating_add(1);
                        rest = rest[close + 1..].trim_start();
                    }
                    None => break,
                }
            } else {
                break;
            }
        }

        if let Some(inner) = rest.strip_prefix("map[")
            && let Some(close) = closing_bracket(inner)
        {
            let key = TypeRef::parse(&inner[..close]);
            let value = TypeRef::parse(&inner[close + 1..]);
            return Self {
                base: String::new(),
                pointer_depth,
                slice_depth,
                map_of: Some(Box::new((key, value))),
            };
        }

        Self {
            base: rest.to_string(),
            pointer_depth,
            slice_depth,
            map_of: None,
        }
    }

    /// Adds one level of indirection.
    pub fn pointer_to(mut self) -> Self {
        self.pointer_depth = self.pointer_depth.saturating_add(1);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.map_of.is_none()
    }

    pub fn is_map(&self) -> bool {
        self.map_of.is_some()
    }

    /// True when the base is a plain identifier, optionally qualified by a package or
    /// import path, rather than a
    /// type literal such as `chan T`, `func`, `interface{}` or `struct{}`.
    pub fn is_named(&self) -> bool {
        !self.base.is_empty()
            && !self.is_map()
            && self
                .base
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '/' | '-'))
    }

    /// Package qualifier of the base, if any (`pkg` for `pkg.Foo`).
    pub fn qualifier(&self) -> Option<&str> {
        self.base.rsplit_once('.').map(|(qualifier, _)| qualifier)
    }

    /// Unqualified base name (`Foo` for `*pkg.Foo`).
    pub fn short_name(&self) -> &str {
        self.base
            .rsplit_once('.')
            .map(|(_, name)| name)
            .unwrap_or(&self.base)
    }

    /// Canonical comparison key: the base without modifiers, or the rendered map type.
    pub fn canonical_key(&self) -> String {
        match &self.map_of {
            Some(_) => self.to_string(),
            None => self.base.clone(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.pointer_depth {
            f.write_str("*")?;
        }
        for _ in 0..self.slice_depth {
            f.write_str("[]")?;
        }
        match &self.map_of {
            Some(pair) => write!(f, "map[{}]{}", pair.0, pair.1),
            None => f.write_str(&self.base),
        }
    }
}

impl From<&str> for TypeRef {
    fn from(raw: &str) -> Self {
        TypeRef::parse(raw)
    }
}

/// Index of the `]` closing a `map[` key, accounting for nested brackets.
fn closing_bracket(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_peels_all_modifiers() {
        let r = TypeRef::parse("*[]*repository.UserRepository");
        assert_eq!(r.pointer_depth, 2);
        assert_eq!(r.slice_depth, 1);
        assert_eq!(r.base, "repository.UserRepository");
        assert_eq!(r.short_name(), "UserRepository");
        assert_eq!(r.qualifier(), Some("repository"));
    }

    #[test]
    fn test_arrays_count_as_slices() {
        let r = TypeRef::parse("[4]Point");
        assert_eq!(r.slice_depth, 1);
        assert_eq!(r.base, "Point");
        assert_eq!(TypeRef::parse("[...]Point").base, "Point");
    }

    #[test]
    fn test_modifier_order_does_not_change_key() {
        assert_eq!(
            TypeRef::parse("[]*Foo").canonical_key(),
            TypeRef::parse("*[]Foo").canonical_key()
        );
        assert_eq!(TypeRef::parse("**[]pkg.Foo").canonical_key(), "pkg.Foo");
        assert_eq!(
            TypeRef::parse("map[string]*User").canonical_key(),
            "map[string]*User"
        );
    }

    #[test]
    fn test_map_with_nested_brackets() {
        let r = TypeRef::parse("map[string][]*model.User");
        assert!(r.is_map());
        let (key, value) = r.map_of.as_deref().unwrap();
        assert_eq!(key.base, "string");
        assert_eq!(value.slice_depth, 1);
        assert_eq!(value.pointer_depth, 1);
        assert_eq!(value.short_name(), "User");
        assert_eq!(r.to_string(), "map[string]*[]model.User");
    }

    #[test]
    fn test_type_literals_are_not_named() {
        assert!(!TypeRef::parse("chan Event").is_named());
        assert!(!TypeRef::parse("interface{}").is_named());
        assert!(!TypeRef::parse("func").is_named());
        assert!(TypeRef::parse("*Event").is_named());
    }

    #[test]
    fn test_empty_and_pointer_to() {
        assert!(TypeRef::parse("  ").is_empty());
        let r = TypeRef::parse("Cache").pointer_to();
        assert_eq!(r.to_string(), "*Cache");
        assert!(!r.is_empty());
    }
}
