//! Predicate names accepted by `kinship query` and their dispatch.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use kinship_core::FactSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Predicate {
    Male,
    Female,
    Spouse,
    Husband,
    Wife,
    Parent,
    Child,
    Father,
    Mother,
    Son,
    Daughter,
    Ancestor,
    Descendant,
    Relative,
}

impl Predicate {
    pub(crate) fn arity(self) -> usize {
        match self {
            Predicate::Male | Predicate::Female => 1,
            _ => 2,
        }
    }

    /// Evaluate against a snapshot. `names.len()` must equal `arity()`.
    pub(crate) fn eval(self, snap: &FactSnapshot, names: &[String]) -> bool {
        let a = names[0].as_str();
        match self {
            Predicate::Male => snap.is_male(a),
            Predicate::Female => snap.is_female(a),
            Predicate::Spouse => snap.is_spouse(a, &names[1]),
            Predicate::Husband => snap.is_husband(a, &names[1]),
            Predicate::Wife => snap.is_wife(a, &names[1]),
            Predicate::Parent => snap.is_parent(a, &names[1]),
            Predicate::Child => snap.is_child(a, &names[1]),
            Predicate::Father => snap.is_father(a, &names[1]),
            Predicate::Mother => snap.is_mother(a, &names[1]),
            Predicate::Son => snap.is_son(a, &names[1]),
            Predicate::Daughter => snap.is_daughter(a, &names[1]),
            Predicate::Ancestor => snap.is_ancestor(a, &names[1]),
            Predicate::Descendant => snap.is_descendant(a, &names[1]),
            Predicate::Relative => snap.are_relatives(a, &names[1]),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Predicate::Male => "male",
            Predicate::Female => "female",
            Predicate::Spouse => "spouse",
            Predicate::Husband => "husband",
            Predicate::Wife => "wife",
            Predicate::Parent => "parent",
            Predicate::Child => "child",
            Predicate::Father => "father",
            Predicate::Mother => "mother",
            Predicate::Son => "son",
            Predicate::Daughter => "daughter",
            Predicate::Ancestor => "ancestor",
            Predicate::Descendant => "descendant",
            Predicate::Relative => "relative",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Predicate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Predicate::Male),
            "female" => Ok(Predicate::Female),
            "spouse" => Ok(Predicate::Spouse),
            "husband" => Ok(Predicate::Husband),
            "wife" => Ok(Predicate::Wife),
            "parent" => Ok(Predicate::Parent),
            "child" => Ok(Predicate::Child),
            "father" => Ok(Predicate::Father),
            "mother" => Ok(Predicate::Mother),
            "son" => Ok(Predicate::Son),
            "daughter" => Ok(Predicate::Daughter),
            "ancestor" => Ok(Predicate::Ancestor),
            "descendant" => Ok(Predicate::Descendant),
            "relative" => Ok(Predicate::Relative),
            other => Err(anyhow!(
                "unknown predicate '{other}' (try: male, female, spouse, husband, \
                 wife, parent, child, father, mother, son, daughter, ancestor, \
                 descendant, relative)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_core::facts::FactsFile;

    #[test]
    fn test_parse_and_eval() {
        let snap = FactsFile::canonical().to_snapshot().unwrap();

        let p: Predicate = "ancestor".parse().unwrap();
        assert_eq!(p.arity(), 2);
        assert!(p.eval(&snap, &["Jack".into(), "Liz".into()]));
        assert!(!p.eval(&snap, &["Jack".into(), "Fred".into()]));

        let p: Predicate = "male".parse().unwrap();
        assert_eq!(p.arity(), 1);
        assert!(p.eval(&snap, &["Jack".into()]));
    }

    #[test]
    fn test_unknown_predicate_is_an_error() {
        assert!("cousin".parse::<Predicate>().is_err());
    }
}
