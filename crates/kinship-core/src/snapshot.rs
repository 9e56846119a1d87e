//! Fact ingestion and the indexed, immutable snapshot.
//!
//! Facts go in through [`SnapshotBuilder`] (add people, spouse pairs, and
//! parent→children edges, then `build()`); queries run against the resulting
//! [`FactSnapshot`]. Nothing mutates a snapshot after `build()`, which is what
//! makes every query predicate a pure function and the snapshot freely
//! shareable across threads.
//!
//! Indexes built at construction time:
//! - `males` / `females`: bitmap membership per sex
//! - `spouses`: forward index, **structurally symmetric** — inserting (a, b)
//!   also inserts (b, a), so a one-directional lookup answers both orderings
//! - `children`: parent → children bitmap (the authoritative edge table)
//! - `parents`: child → parents bitmap, derived from `children` so that
//!   ancestor-set queries walk upward instead of scanning all edges

use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::{NameInterner, PersonId};

/// Sex attribute. Every person carries at most one; role predicates
/// (father/mother/son/daughter/husband/wife) qualify on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("conflicting sex declarations for '{name}'")]
    ConflictingSex { name: String },

    #[error("cycle detected in parent edges involving '{name}'")]
    Cycle { name: String },
}

// ============================================================================
// Builder
// ============================================================================

/// Accumulates facts, then indexes them into a [`FactSnapshot`].
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    interner: NameInterner,
    declared: HashMap<PersonId, Sex>,
    /// First conflicting redeclaration seen, reported by `build()`.
    conflict: Option<String>,
    spouses: HashMap<PersonId, RoaringBitmap>,
    children: HashMap<PersonId, RoaringBitmap>,
    people: RoaringBitmap,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a person with a sex attribute.
    ///
    /// Redeclaring with the same sex is a no-op; redeclaring with the other
    /// sex makes `build()` fail.
    pub fn person(&mut self, name: &str, sex: Sex) -> &mut Self {
        let id = self.touch(name);
        if let Some(prev) = self.declared.insert(id, sex) {
            if prev != sex && self.conflict.is_none() {
                self.conflict = Some(name.to_string());
            }
        }
        self
    }

    /// Record a spouse pair. Stored symmetrically: both orderings answer true.
    pub fn spouses(&mut self, a: &str, b: &str) -> &mut Self {
        let a = self.touch(a);
        let b = self.touch(b);
        self.spouses.entry(a).or_default().insert(b.raw());
        self.spouses.entry(b).or_default().insert(a.raw());
        self
    }

    /// Record a single parent → child edge.
    pub fn child(&mut self, parent: &str, child: &str) -> &mut Self {
        let parent = self.touch(parent);
        let child = self.touch(child);
        self.children.entry(parent).or_default().insert(child.raw());
        self
    }

    /// Record all children of one parent.
    pub fn children<'a, I>(&mut self, parent: &str, kids: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for kid in kids {
            self.child(parent, kid);
        }
        self
    }

    /// Index the accumulated facts into an immutable snapshot.
    pub fn build(self) -> Result<FactSnapshot, SnapshotError> {
        if let Some(name) = self.conflict {
            return Err(SnapshotError::ConflictingSex { name });
        }

        let mut males = RoaringBitmap::new();
        let mut females = RoaringBitmap::new();
        for (id, sex) in &self.declared {
            match sex {
                Sex::Male => males.insert(id.raw()),
                Sex::Female => females.insert(id.raw()),
            };
        }

        // Reverse index: child -> parents.
        let mut parents: HashMap<PersonId, RoaringBitmap> = HashMap::new();
        for (parent, kids) in &self.children {
            for kid in kids.iter() {
                parents
                    .entry(PersonId::new(kid))
                    .or_default()
                    .insert(parent.raw());
            }
        }

        Ok(FactSnapshot {
            interner: self.interner,
            males,
            females,
            spouses: self.spouses,
            children: self.children,
            parents,
            people: self.people,
        })
    }

    fn touch(&mut self, name: &str) -> PersonId {
        let id = self.interner.intern(name);
        self.people.insert(id.raw());
        id
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// The immutable, indexed fact set the reasoner queries.
///
/// Constructed once via [`SnapshotBuilder`] and never mutated afterwards; all
/// query methods take `&self` and hold no interior mutability, so a snapshot
/// is `Send + Sync` and safe to share without locking.
#[derive(Debug)]
pub struct FactSnapshot {
    pub(crate) interner: NameInterner,
    pub(crate) males: RoaringBitmap,
    pub(crate) females: RoaringBitmap,
    pub(crate) spouses: HashMap<PersonId, RoaringBitmap>,
    pub(crate) children: HashMap<PersonId, RoaringBitmap>,
    pub(crate) parents: HashMap<PersonId, RoaringBitmap>,
    pub(crate) people: RoaringBitmap,
}

impl FactSnapshot {
    /// Number of distinct people mentioned by any fact.
    pub fn person_count(&self) -> usize {
        self.people.len() as usize
    }

    /// Number of unordered spouse pairs.
    pub fn spouse_pair_count(&self) -> usize {
        let directed: u64 = self.spouses.values().map(|s| s.len()).sum();
        (directed / 2) as usize
    }

    /// Number of parent → child edges.
    pub fn parent_edge_count(&self) -> usize {
        self.children.values().map(|s| s.len() as usize).sum()
    }

    /// All known names, in id (insertion) order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.interner.names()
    }

    /// Check that no person is reachable from itself through parent → child
    /// edges.
    ///
    /// The reasoner itself tolerates cycles (every traversal carries a visited
    /// set), so this is a loader-side lint for rejecting malformed fact sets
    /// up front rather than a query precondition.
    pub fn validate_acyclic(&self) -> Result<(), SnapshotError> {
        for &start in self.children.keys() {
            let mut visited = RoaringBitmap::new();
            let mut stack = vec![start];

            while let Some(current) = stack.pop() {
                let Some(kids) = self.children.get(&current) else {
                    continue;
                };
                if kids.contains(start.raw()) {
                    let name = self
                        .interner
                        .lookup(start)
                        .unwrap_or_default()
                        .to_string();
                    return Err(SnapshotError::Cycle { name });
                }
                for kid in kids.iter() {
                    if visited.insert(kid) {
                        stack.push(PersonId::new(kid));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_indexes_facts() {
        let mut b = SnapshotBuilder::new();
        b.person("Jack", Sex::Male)
            .person("Linda", Sex::Female)
            .spouses("Joe", "Mary")
            .children("Jack", ["Nancy", "Linda"]);
        let snap = b.build().unwrap();

        assert_eq!(snap.person_count(), 6);
        assert_eq!(snap.spouse_pair_count(), 1);
        assert_eq!(snap.parent_edge_count(), 2);
    }

    #[test]
    fn test_conflicting_sex_is_a_build_error() {
        let mut b = SnapshotBuilder::new();
        b.person("Pat", Sex::Male).person("Pat", Sex::Female);
        let err = b.build().unwrap_err();
        assert!(matches!(err, SnapshotError::ConflictingSex { name } if name == "Pat"));
    }

    #[test]
    fn test_redeclaring_same_sex_is_fine() {
        let mut b = SnapshotBuilder::new();
        b.person("Pat", Sex::Male).person("Pat", Sex::Male);
        assert!(b.build().is_ok());
    }

    #[test]
    fn test_validate_acyclic() {
        let mut b = SnapshotBuilder::new();
        b.child("Jack", "Nancy").child("Nancy", "Mark");
        assert!(b.build().unwrap().validate_acyclic().is_ok());

        let mut b = SnapshotBuilder::new();
        b.child("a", "b").child("b", "c").child("c", "a");
        let err = b.build().unwrap().validate_acyclic().unwrap_err();
        assert!(matches!(err, SnapshotError::Cycle { .. }));
    }

    #[test]
    fn test_reverse_index_built_on_build() {
        let mut b = SnapshotBuilder::new();
        b.children("Jack", ["Nancy", "Linda"]).child("John", "Mark");
        let snap = b.build().unwrap();

        let nancy = snap.interner.id_of("Nancy").unwrap();
        let jack = snap.interner.id_of("Jack").unwrap();
        assert!(snap.parents[&nancy].contains(jack.raw()));
    }
}
