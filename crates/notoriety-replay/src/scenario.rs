//! Scenario files: a config, a world fixture and queries with the outcomes
//! they must produce.
//!
//! Scenarios pin down observable behaviour so a rules change that alters any
//! outcome shows up as a replay mismatch.

use std::path::Path;

use notoriety_core::{NotorietyConfig, Resolver};
use notoriety_types::{CorpseId, MobileId, Notoriety};
use notoriety_world::{WorldFixture, WorldMap};
use serde::Deserialize;
use tracing::debug;

use crate::error::ReplayError;

/// A replayable scenario.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Scenario name, used in logs.
    #[serde(default)]
    pub name: String,
    /// Resolver policy.
    #[serde(default)]
    pub config: NotorietyConfig,
    /// World state the queries run against.
    #[serde(default)]
    pub world: WorldFixture,
    /// Queries and their expected outcomes.
    #[serde(default)]
    pub queries: Vec<Query>,
}

/// One query with its expected outcome.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Query {
    /// Mobile-to-mobile notoriety.
    Notoriety {
        /// Observer.
        source: MobileId,
        /// Observed.
        target: MobileId,
        /// Expected notoriety.
        expect: Notoriety,
        /// Expected deciding rule, when the scenario pins it.
        #[serde(default)]
        rule: Option<String>,
    },
    /// Beneficial action gate.
    Beneficial {
        /// Actor.
        from: MobileId,
        /// Recipient.
        to: MobileId,
        /// Expected answer.
        expect: bool,
    },
    /// Harmful action gate.
    Harmful {
        /// Actor.
        from: MobileId,
        /// Victim.
        to: MobileId,
        /// Expected answer.
        expect: bool,
    },
    /// Corpse notoriety.
    Corpse {
        /// Would-be looter.
        source: MobileId,
        /// The corpse.
        corpse: CorpseId,
        /// Expected notoriety.
        expect: Notoriety,
    },
}

/// A query whose outcome differed from the expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Position of the query in the scenario.
    pub index: usize,
    /// What the scenario expected.
    pub expected: String,
    /// What the resolver produced.
    pub actual: String,
}

/// Outcome of replaying one scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Number of queries that matched.
    pub passed: usize,
    /// Queries that did not.
    pub mismatches: Vec<Mismatch>,
}

impl Scenario {
    /// Load a scenario from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ReplayError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse a scenario from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ReplayError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Build the world and evaluate every query.
    pub fn run(self) -> Result<Report, ReplayError> {
        let world = self.world.into_world()?;
        let resolver = Resolver::new(self.config);
        let mut report = Report::default();
        for (index, query) in self.queries.iter().enumerate() {
            match evaluate(&resolver, &world, query) {
                None => report.passed = report.passed.saturating_add(1),
                Some((expected, actual)) => report.mismatches.push(Mismatch {
                    index,
                    expected,
                    actual,
                }),
            }
        }
        Ok(report)
    }
}

/// Evaluate a query, returning the expected and actual outcomes on mismatch.
fn evaluate(resolver: &Resolver, world: &WorldMap, query: &Query) -> Option<(String, String)> {
    match query {
        Query::Notoriety {
            source,
            target,
            expect,
            rule,
        } => {
            let got = resolver.explain(world, *source, *target);
            debug!(%source, %target, notoriety = %got.notoriety, rule = got.rule, "Notoriety query");
            let rule_matches = rule.as_deref().is_none_or(|r| r == got.rule);
            if got.notoriety == *expect && rule_matches {
                None
            } else {
                let expected = rule
                    .as_deref()
                    .map_or_else(|| expect.to_string(), |r| format!("{expect} via {r}"));
                Some((expected, format!("{} via {}", got.notoriety, got.rule)))
            }
        }
        Query::Beneficial { from, to, expect } => {
            compare(*expect, resolver.allow_beneficial(world, *from, *to))
        }
        Query::Harmful { from, to, expect } => {
            compare(*expect, resolver.allow_harmful(world, *from, *to))
        }
        Query::Corpse {
            source,
            corpse,
            expect,
        } => compare(*expect, resolver.corpse_notoriety(world, *source, *corpse)),
    }
}

fn compare<T: PartialEq + ToString>(expected: T, actual: T) -> Option<(String, String)> {
    (expected != actual).then(|| (expected.to_string(), actual.to_string()))
}
