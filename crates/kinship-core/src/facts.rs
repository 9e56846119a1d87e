//! The facts-file format: the loader-side input boundary.
//!
//! A facts file carries exactly what the reasoner consumes: male and female
//! name sets, symmetric spouse pairs, and a parent → children mapping.
//!
//! ```json
//! {
//!   "males": ["Jack", "John"],
//!   "females": ["Nancy", "Linda"],
//!   "spouses": [["John", "Nancy"]],
//!   "parent_of": { "Jack": ["Nancy", "Linda"] }
//! }
//! ```
//!
//! The file is just data; all indexing and validation happens when it is
//! turned into a [`FactSnapshot`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::snapshot::{FactSnapshot, Sex, SnapshotBuilder, SnapshotError};

/// Serde-facing fact set, convertible into an indexed snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactsFile {
    #[serde(default)]
    pub males: Vec<String>,
    #[serde(default)]
    pub females: Vec<String>,
    #[serde(default)]
    pub spouses: Vec<(String, String)>,
    /// BTreeMap keeps edge iteration deterministic across loads.
    #[serde(default)]
    pub parent_of: BTreeMap<String, Vec<String>>,
}

impl FactsFile {
    /// Parse a facts file from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Index the facts into an immutable snapshot.
    pub fn to_snapshot(&self) -> Result<FactSnapshot, SnapshotError> {
        let mut builder = SnapshotBuilder::new();
        for name in &self.males {
            builder.person(name, Sex::Male);
        }
        for name in &self.females {
            builder.person(name, Sex::Female);
        }
        for (a, b) in &self.spouses {
            builder.spouses(a, b);
        }
        for (parent, kids) in &self.parent_of {
            builder.children(parent, kids.iter().map(String::as_str));
        }
        builder.build()
    }

    /// The canonical example family used by the demo driver and tests.
    pub fn canonical() -> Self {
        Self {
            males: ["Jack", "John", "Joe", "Mark", "Fred"]
                .map(String::from)
                .to_vec(),
            females: ["Nancy", "Mary", "Linda", "Liz"]
                .map(String::from)
                .to_vec(),
            spouses: vec![
                ("Joe".into(), "Mary".into()),
                ("John".into(), "Nancy".into()),
            ],
            parent_of: BTreeMap::from([
                ("Jack".to_string(), vec!["Nancy".into(), "Linda".into()]),
                ("John".to_string(), vec!["Mark".into()]),
                ("Nancy".to_string(), vec!["Mark".into()]),
                ("Joe".to_string(), vec!["Fred".into()]),
                ("Linda".to_string(), vec!["Liz".into()]),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_facts_index_cleanly() {
        let snap = FactsFile::canonical().to_snapshot().unwrap();
        assert_eq!(snap.person_count(), 9);
        assert_eq!(snap.spouse_pair_count(), 2);
        assert_eq!(snap.parent_edge_count(), 6);
        assert!(snap.validate_acyclic().is_ok());
    }

    #[test]
    fn test_from_json() {
        let text = r#"
            {
              "males": ["Jack"],
              "females": ["Nancy"],
              "spouses": [],
              "parent_of": { "Jack": ["Nancy"] }
            }
        "#;
        let facts = FactsFile::from_json(text).unwrap();
        let snap = facts.to_snapshot().unwrap();
        assert!(snap.is_father("Jack", "Nancy"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let facts = FactsFile::from_json(r#"{ "males": ["Jack"] }"#).unwrap();
        let snap = facts.to_snapshot().unwrap();
        assert!(snap.is_male("Jack"));
        assert_eq!(snap.parent_edge_count(), 0);
    }
}
