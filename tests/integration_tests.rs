//! Integration tests for the complete Kinship pipeline:
//! facts JSON → snapshot indexing → reasoner queries.
//!
//! Run with: cargo test --test integration_tests

use kinship_core::facts::FactsFile;

#[test]
fn test_facts_json_to_queries() {
    let text = r#"
        {
          "males": ["Jack", "John", "Joe", "Mark", "Fred"],
          "females": ["Nancy", "Mary", "Linda", "Liz"],
          "spouses": [["Joe", "Mary"], ["John", "Nancy"]],
          "parent_of": {
            "Jack": ["Nancy", "Linda"],
            "John": ["Mark"],
            "Nancy": ["Mark"],
            "Joe": ["Fred"],
            "Linda": ["Liz"]
          }
        }
    "#;

    let facts = FactsFile::from_json(text).expect("should parse");
    let snap = facts.to_snapshot().expect("should index");
    snap.validate_acyclic().expect("canonical data is acyclic");

    assert_eq!(snap.person_count(), 9);

    assert!(snap.is_ancestor("Jack", "Liz"));
    assert!(!snap.is_ancestor("Jack", "Fred"));
    assert!(snap.are_relatives("Mark", "Liz"));
    assert!(snap.are_relatives("Joe", "Mary"));
    assert!(snap.is_father("Jack", "Nancy"));
    assert!(snap.is_daughter("Liz", "Linda"));
}

#[test]
fn test_facts_round_trip_matches_builtin() {
    let canonical = FactsFile::canonical();
    let text = serde_json::to_string(&canonical).expect("should serialize");
    let reloaded = FactsFile::from_json(&text).expect("should parse back");

    let a = canonical.to_snapshot().unwrap();
    let b = reloaded.to_snapshot().unwrap();

    for p in ["Jack", "Nancy", "Liz", "Fred"] {
        for q in ["Jack", "Nancy", "Liz", "Fred"] {
            assert_eq!(a.is_ancestor(p, q), b.is_ancestor(p, q));
            assert_eq!(a.are_relatives(p, q), b.are_relatives(p, q));
        }
    }
}

#[test]
fn test_sex_conflict_rejected_at_load() {
    let text = r#"{ "males": ["Pat"], "females": ["Pat"] }"#;
    let facts = FactsFile::from_json(text).unwrap();
    assert!(facts.to_snapshot().is_err());
}
