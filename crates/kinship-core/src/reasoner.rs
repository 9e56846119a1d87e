//! The query predicates.
//!
//! Every operation is a total, pure function over the snapshot: it returns a
//! boolean, never fails, and never blocks. Unknown names resolve to `None`
//! and therefore fail every predicate — absence from the fact set *is* the
//! "false" case, not an error.
//!
//! Traversal discipline: both directions (downward `is_ancestor`, upward
//! `ancestor_ids`) use an explicit worklist plus a fresh visited bitmap per
//! call, so malformed cyclic edge data terminates instead of recursing
//! forever.

use roaring::RoaringBitmap;

use crate::snapshot::FactSnapshot;
use crate::PersonId;

impl FactSnapshot {
    fn resolve(&self, name: &str) -> Option<PersonId> {
        self.interner.id_of(name)
    }

    // ------------------------------------------------------------------
    // Base predicates
    // ------------------------------------------------------------------

    pub fn is_male(&self, p: &str) -> bool {
        self.resolve(p)
            .is_some_and(|id| self.males.contains(id.raw()))
    }

    pub fn is_female(&self, p: &str) -> bool {
        self.resolve(p)
            .is_some_and(|id| self.females.contains(id.raw()))
    }

    /// True iff (a, b) is a recorded spouse pair.
    ///
    /// The spouse index is symmetric by construction, so this single forward
    /// lookup answers both orderings.
    pub fn is_spouse(&self, a: &str, b: &str) -> bool {
        let (Some(a), Some(b)) = (self.resolve(a), self.resolve(b)) else {
            return false;
        };
        self.spouses
            .get(&a)
            .is_some_and(|partners| partners.contains(b.raw()))
    }

    pub fn is_parent(&self, p: &str, c: &str) -> bool {
        let (Some(p), Some(c)) = (self.resolve(p), self.resolve(c)) else {
            return false;
        };
        self.children
            .get(&p)
            .is_some_and(|kids| kids.contains(c.raw()))
    }

    /// Alias: `is_child(c, p)` is `is_parent(p, c)` over the same edge table.
    pub fn is_child(&self, c: &str, p: &str) -> bool {
        self.is_parent(p, c)
    }

    // ------------------------------------------------------------------
    // Role predicates: base relation + correctly-sexed participant
    // ------------------------------------------------------------------

    pub fn is_father(&self, f: &str, c: &str) -> bool {
        self.is_parent(f, c) && self.is_male(f)
    }

    pub fn is_mother(&self, m: &str, c: &str) -> bool {
        self.is_parent(m, c) && self.is_female(m)
    }

    pub fn is_son(&self, s: &str, p: &str) -> bool {
        self.is_child(s, p) && self.is_male(s)
    }

    pub fn is_daughter(&self, d: &str, p: &str) -> bool {
        self.is_child(d, p) && self.is_female(d)
    }

    pub fn is_husband(&self, h: &str, w: &str) -> bool {
        self.is_spouse(h, w) && self.is_male(h)
    }

    pub fn is_wife(&self, w: &str, h: &str) -> bool {
        self.is_spouse(w, h) && self.is_female(w)
    }

    // ------------------------------------------------------------------
    // Recursive relations
    // ------------------------------------------------------------------

    /// True iff a non-empty directed path of parent → child edges leads from
    /// `anc` to `desc`.
    ///
    /// Direct children count (path length 1). A person is never its own
    /// ancestor, even through a cycle back to itself.
    pub fn is_ancestor(&self, anc: &str, desc: &str) -> bool {
        let (Some(anc), Some(desc)) = (self.resolve(anc), self.resolve(desc)) else {
            return false;
        };
        if anc == desc {
            return false;
        }

        let mut visited = RoaringBitmap::new();
        visited.insert(anc.raw());
        let mut stack = vec![anc];

        while let Some(current) = stack.pop() {
            let Some(kids) = self.children.get(&current) else {
                continue;
            };
            if kids.contains(desc.raw()) {
                return true;
            }
            for kid in kids.iter() {
                if visited.insert(kid) {
                    stack.push(PersonId::new(kid));
                }
            }
        }

        false
    }

    /// Alias: `is_descendant(desc, anc)` is `is_ancestor(anc, desc)`.
    pub fn is_descendant(&self, desc: &str, anc: &str) -> bool {
        self.is_ancestor(anc, desc)
    }

    /// Everyone with a directed path down to `p`, walking the reverse
    /// child → parents index. Never contains `p` itself.
    pub(crate) fn ancestor_ids(&self, p: PersonId) -> RoaringBitmap {
        let mut out = RoaringBitmap::new();
        let mut visited = RoaringBitmap::new();
        visited.insert(p.raw());
        let mut stack = vec![p];

        while let Some(current) = stack.pop() {
            let Some(folks) = self.parents.get(&current) else {
                continue;
            };
            for parent in folks.iter() {
                if visited.insert(parent) {
                    out.insert(parent);
                    stack.push(PersonId::new(parent));
                }
            }
        }

        out
    }

    /// Names of all ancestors of `p`, in id order. Empty for unknown names.
    pub fn ancestors_of(&self, p: &str) -> Vec<String> {
        let Some(p) = self.resolve(p) else {
            return Vec::new();
        };
        self.ancestor_ids(p)
            .iter()
            .filter_map(|id| self.interner.lookup(PersonId::new(id)))
            .map(str::to_string)
            .collect()
    }

    /// True iff `a` and `b` are relatives:
    /// - the same person is *not* its own relative
    /// - spouses are relatives
    /// - otherwise, relatives iff their ancestor sets intersect
    pub fn are_relatives(&self, a: &str, b: &str) -> bool {
        let (Some(a_id), Some(b_id)) = (self.resolve(a), self.resolve(b)) else {
            return false;
        };
        if a_id == b_id {
            return false;
        }
        if self.is_spouse(a, b) {
            return true;
        }

        let shared = self.ancestor_ids(a_id) & self.ancestor_ids(b_id);
        !shared.is_empty()
    }
}
