//! Kinship CLI
//!
//! Unified command-line interface for:
//! - Running the canonical example queries (`demo`)
//! - Evaluating a single predicate against a fact set (`query`)
//! - Checking a facts file before use (`check`)
//!
//! The reasoner itself never fails a query: unknown people simply answer
//! `false`. CLI errors are reserved for bad invocations — unknown predicate
//! names, wrong arity, unreadable or malformed facts files.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use kinship_core::facts::FactsFile;
use kinship_core::FactSnapshot;

mod predicate;

use predicate::Predicate;

#[derive(Parser)]
#[command(name = "kinship")]
#[command(
    author,
    version,
    about = "Kinship: genealogy queries over a static fact set"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the canonical example queries against the built-in fact set.
    Demo,

    /// Evaluate a single predicate.
    ///
    /// Binary predicates take two names (`kinship query ancestor Jack Liz`);
    /// `male`/`female` take one. A `false` answer is still exit code 0 —
    /// false is an answer, not an error.
    Query {
        /// Predicate name: male, female, spouse, husband, wife, parent,
        /// child, father, mother, son, daughter, ancestor, descendant,
        /// relative
        predicate: String,
        /// Person name(s), in predicate argument order
        names: Vec<String>,
        /// Facts file (JSON); defaults to the built-in canonical family
        #[arg(long)]
        facts: Option<PathBuf>,
    },

    /// Load a facts file, build a snapshot, and lint it.
    ///
    /// Reports sex conflicts and parent-edge cycles; prints fact counts on
    /// success.
    Check {
        /// Input facts JSON
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::Query {
            predicate,
            names,
            facts,
        } => run_query(&predicate, &names, facts.as_deref()),
        Commands::Check { input } => run_check(&input),
    }
}

fn load_snapshot(facts: Option<&Path>) -> Result<FactSnapshot> {
    let facts = match facts {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            FactsFile::from_json(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => FactsFile::canonical(),
    };
    facts.to_snapshot().context("indexing facts")
}

fn render(result: bool) -> colored::ColoredString {
    if result {
        "true".green().bold()
    } else {
        "false".red().bold()
    }
}

fn show(query: &str, result: bool) {
    println!("{query:<45} -> {}", render(result));
}

fn run_query(predicate: &str, names: &[String], facts: Option<&Path>) -> Result<()> {
    let predicate: Predicate = predicate.parse()?;
    let snap = load_snapshot(facts)?;

    let expected = predicate.arity();
    if names.len() != expected {
        return Err(anyhow!(
            "'{predicate}' takes {expected} name(s), got {}",
            names.len()
        ));
    }

    let result = predicate.eval(&snap, names);
    println!("{}", render(result));
    Ok(())
}

fn run_check(input: &Path) -> Result<()> {
    let snap = load_snapshot(Some(input))?;
    snap.validate_acyclic()
        .with_context(|| format!("linting {}", input.display()))?;

    eprintln!(
        "{} {} ({} people, {} spouse pairs, {} parent edges)",
        "ok".green().bold(),
        input.display().to_string().bold(),
        snap.person_count(),
        snap.spouse_pair_count(),
        snap.parent_edge_count(),
    );
    Ok(())
}

fn run_demo() -> Result<()> {
    let snap = load_snapshot(None)?;

    println!("Family Tree Queries");
    println!("--------------------------------------------------");

    show("ancestor(Jack, Fred)", snap.is_ancestor("Jack", "Fred"));
    show("ancestor(Jack, Liz)", snap.is_ancestor("Jack", "Liz"));
    show("ancestor(Jack, Mark)", snap.is_ancestor("Jack", "Mark"));
    show("ancestor(Joe, Fred)", snap.is_ancestor("Joe", "Fred"));
    show("ancestor(Linda, Liz)", snap.is_ancestor("Linda", "Liz"));
    show("ancestor(Nancy, Fred)", snap.is_ancestor("Nancy", "Fred"));

    println!();
    show("relative(Liz, Joe)", snap.are_relatives("Liz", "Joe"));
    show("relative(Nancy, Fred)", snap.are_relatives("Nancy", "Fred"));
    show("relative(Mark, Liz)", snap.are_relatives("Mark", "Liz"));
    show("relative(John, Nancy)", snap.are_relatives("John", "Nancy"));
    show("relative(Joe, Mary)", snap.are_relatives("Joe", "Mary"));

    println!();
    show("father(Jack, Nancy)", snap.is_father("Jack", "Nancy"));
    show("mother(Nancy, Mark)", snap.is_mother("Nancy", "Mark"));
    show("daughter(Liz, Linda)", snap.is_daughter("Liz", "Linda"));
    show("son(Fred, Joe)", snap.is_son("Fred", "Joe"));
    show("husband(John, Nancy)", snap.is_husband("John", "Nancy"));

    Ok(())
}
