//! The closed set of variables the backend can filter and return
//!
//! A [`Registry`] is built once per index when the program starts and then
//! only read. The compiler and URL builder borrow it, so there is no global
//! table to initialise.

use std::collections::BTreeMap;
use std::fmt;

use super::suggest::did_you_mean;
use super::types::{Function, TypeOf};
use super::variable_data::{ASSEMBLY_VARIABLES, TAXON_VARIABLES};

/// The two query domains exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum IndexType {
    Taxon,
    Assembly,
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexType::Taxon => write!(f, "taxon"),
            IndexType::Assembly => write!(f, "assembly"),
        }
    }
}

/// A queryable variable and its declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Variable {
    pub name: &'static str,
    pub display_name: &'static str,
    pub kind: TypeOf,
    /// Allowed values for enumerated keywords; empty for free text and non-keywords
    pub values: &'static [&'static str],
    /// Accepts `min(name)` / `max(name)`
    pub summary: bool,
}

impl Variable {
    pub const fn new(name: &'static str, display_name: &'static str, kind: TypeOf) -> Self {
        Variable {
            name,
            display_name,
            kind,
            values: &[],
            summary: false,
        }
    }

    pub const fn keyword(
        name: &'static str,
        display_name: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Variable {
            name,
            display_name,
            kind: TypeOf::Keyword,
            values,
            summary: false,
        }
    }

    pub const fn with_summary(self) -> Self {
        Variable {
            summary: true,
            ..self
        }
    }

    pub fn is_enum(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn function(&self) -> Function {
        self.kind.function()
    }
}

/// Name-indexed variables for one [`IndexType`]
#[derive(Debug, Clone)]
pub struct Registry {
    index: IndexType,
    variables: BTreeMap<&'static str, Variable>,
}

impl Registry {
    /// Build the registry for an index from the embedded table
    pub fn new(index: IndexType) -> Self {
        let table = match index {
            IndexType::Taxon => TAXON_VARIABLES,
            IndexType::Assembly => ASSEMBLY_VARIABLES,
        };
        Self::from_variables(index, table.iter().copied())
    }

    /// Build a registry from an arbitrary variable list. Later duplicates win.
    pub fn from_variables(index: IndexType, variables: impl IntoIterator<Item = Variable>) -> Self {
        Registry {
            index,
            variables: variables.into_iter().map(|v| (v.name, v)).collect(),
        }
    }

    pub fn index(&self) -> IndexType {
        self.index
    }

    /// Case-sensitive exact lookup
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Variables in name order
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variables.keys().copied()
    }

    /// Nearest registry name to `name` by edit distance
    pub fn suggest(&self, name: &str) -> Option<&'static str> {
        did_you_mean(name, self.names())
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        let registry = Registry::new(IndexType::Taxon);
        assert!(registry.lookup("assembly_span").is_some());
        assert!(registry.lookup("Assembly_span").is_none());
        assert!(registry.lookup("assembly_spa").is_none());
    }

    #[test]
    fn test_indexes_differ() {
        let taxon = Registry::new(IndexType::Taxon);
        let assembly = Registry::new(IndexType::Assembly);
        assert!(taxon.contains("c_value"));
        assert!(!assembly.contains("c_value"));
        assert!(assembly.contains("contig_count"));
        assert!(!taxon.contains("contig_count"));
    }

    #[test]
    fn test_names_are_sorted_and_unique() {
        for index in [IndexType::Taxon, IndexType::Assembly] {
            let registry = Registry::new(index);
            let names: Vec<_> = registry.names().collect();
            let mut sorted = names.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(names, sorted);
        }
    }

    #[test]
    fn test_enum_flag() {
        let registry = Registry::new(IndexType::Taxon);
        let level = registry.lookup("assembly_level").unwrap();
        assert!(level.is_enum());
        assert_eq!(level.function(), Function::Keyword);

        let biosample = registry.lookup("biosample").unwrap();
        assert_eq!(biosample.kind, TypeOf::Keyword);
        assert!(!biosample.is_enum());

        let span = registry.lookup("assembly_span").unwrap();
        assert_eq!(span.function(), Function::None);
        assert!(span.summary);
    }

    #[test]
    fn test_suggest() {
        let registry = Registry::new(IndexType::Assembly);
        assert_eq!(registry.suggest("contig_n5"), Some("contig_n50"));
    }
}
