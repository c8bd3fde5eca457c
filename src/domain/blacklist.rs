use crate::domain::type_ref::TypeRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// On-disk shape of the blacklist document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlacklistConfig {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub packages: Vec<String>,
}

/// Names excluded from analysis regardless of project membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    types: BTreeSet<String>,
    packages: BTreeSet<String>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: BlacklistConfig) -> Self {
        let mut blacklist = Self::new();
        blacklist.extend(config.types, config.packages);
        blacklist
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let config: BlacklistConfig = serde_yaml::from_str(text)?;
        Ok(Self::from_config(config))
    }

    pub fn add_type(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.trim().is_empty() {
            self.types.insert(name.trim().to_string());
        }
    }

    pub fn add_package(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.trim().is_empty() {
            self.packages.insert(name.trim().to_string());
        }
    }

    pub fn extend(
        &mut self,
        types: impl IntoIterator<Item = String>,
        packages: impl IntoIterator<Item = String>,
    ) {
        for t in types {
            self.add_type(t);
        }
        for p in packages {
            self.add_package(p);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.packages.is_empty()
    }

    /// Listing for reports: types first, then packages suffixed with `/*`.
    pub fn entries(&self) -> Vec<String> {
        self.types
            .iter()
            .cloned()
            .chain(self.packages.iter().map(|p| format!("{}/*", p)))
            .collect()
    }

    /// Exact name, short name of a qualified name, or a listed package that prefixes it.
    pub fn is_blocked(&self, type_ref: &TypeRef) -> bool {
        let key = type_ref.canonical_key();
        let full = key.as_str();
        if full.is_empty() || type_ref.is_map() {
            return false;
        }
        if self.types.contains(full) {
            return true;
        }
        match type_ref.qualifier() {
            Some(qualifier) => {
                if self.packages.contains(qualifier) || self.types.contains(type_ref.short_name()) {
                    return true;
                }
                self.packages.iter().any(|p| full.starts_with(p.as_str()))
            }
            None => self.packages.iter().any(|p| full.starts_with(p.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked(bl: &Blacklist, raw: &str) -> bool {
        bl.is_blocked(&TypeRef::parse(raw))
    }

    #[test]
    fn test_yaml_lists() {
        let bl = Blacklist::from_yaml_str("types:\n  - Logger\npackages:\n  - metrics\n").unwrap();
        assert!(blocked(&bl, "Logger"));
        assert!(blocked(&bl, "*log.Logger"));
        assert!(blocked(&bl, "metrics.Counter"));
        assert!(blocked(&bl, "[]*metrics.Counter"));
        assert!(!blocked(&bl, "User"));
    }

    #[test]
    fn test_package_prefix_of_qualifier() {
        let mut bl = Blacklist::new();
        bl.add_package("internal");
        assert!(blocked(&bl, "internalmetrics.Gauge"));
        assert!(!blocked(&bl, "model.Internal"));
    }

    #[test]
    fn test_missing_sections_and_empty_doc() {
        let bl = Blacklist::from_yaml_str("types: [A]\n").unwrap();
        assert!(blocked(&bl, "A"));
        assert!(Blacklist::from_yaml_str("").unwrap().is_empty());
        assert!(Blacklist::from_yaml_str("types: {not: a list}").is_err());
    }

    #[test]
    fn test_maps_are_never_matched() {
        let mut bl = Blacklist::new();
        bl.add_package("m");
        bl.add_type("User");
        assert!(!blocked(&bl, "map[string]*User"));
        assert!(blocked(&bl, "**[]User"));
    }

    #[test]
    fn test_entries_listing() {
        let mut bl = Blacklist::new();
        bl.extend(vec!["Logger".to_string()], vec!["metrics".to_string(), " ".to_string()]);
        assert_eq!(bl.entries(), vec!["Logger".to_string(), "metrics/*".to_string()]);
    }
}
