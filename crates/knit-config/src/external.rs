//! External specifier set: module references left unresolved in the bundle.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::manifest::Manifest;

/// Deduplicated, insertion-ordered set of module specifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalSet {
    specifiers: IndexSet<String>,
}

impl ExternalSet {
    /// Union of both manifests' dependency names and the static extras.
    ///
    /// Order is `library` keys, then `tool` keys, then `extras`; a specifier
    /// keeps the position of its first occurrence.
    pub fn build<S: AsRef<str>>(library: &Manifest, tool: &Manifest, extras: &[S]) -> Self {
        let set: Self = library
            .dependency_names()
            .chain(tool.dependency_names())
            .chain(extras.iter().map(|s| s.as_ref()))
            .collect();

        tracing::debug!(
            "External set: {} specifiers ({} library, {} tool, {} extras)",
            set.len(),
            library.dependencies.len(),
            tool.dependencies.len(),
            extras.len()
        );
        set
    }

    pub fn contains(&self, specifier: &str) -> bool {
        self.specifiers.contains(specifier)
    }

    pub fn len(&self) -> usize {
        self.specifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.specifiers.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExternalSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            specifiers: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ExternalSet {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.specifiers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(names: &[&str]) -> Manifest {
        Manifest {
            name: None,
            dependencies: names
                .iter()
                .map(|n| ((*n).to_string(), "1".to_string()))
                .collect(),
        }
    }

    #[test]
    fn unions_in_declaration_order() {
        let set = ExternalSet::build(&manifest(&["x"]), &manifest(&["y"]), &["z/deep"]);
        let all: Vec<_> = set.iter().collect();
        assert_eq!(all, vec!["x", "y", "z/deep"]);
    }

    #[test]
    fn later_duplicates_are_dropped() {
        let set = ExternalSet::build(
            &manifest(&["graphql", "iterall"]),
            &manifest(&["rxjs", "graphql"]),
            &["rxjs/Observable", "graphql/type/schema", "graphql/type/schema"],
        );
        let all: Vec<_> = set.iter().collect();
        assert_eq!(
            all,
            vec![
                "graphql",
                "iterall",
                "rxjs",
                "rxjs/Observable",
                "graphql/type/schema"
            ]
        );
    }

    #[test]
    fn empty_inputs_give_empty_set() {
        let extras: [&str; 0] = [];
        let set = ExternalSet::build(&Manifest::default(), &Manifest::default(), &extras);
        assert!(set.is_empty());
    }

    #[test]
    fn serializes_as_plain_list() {
        let set: ExternalSet = ["a", "b"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a","b"]"#);
    }
}
