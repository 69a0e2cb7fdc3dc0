//! The notoriety resolver.
//!
//! A [`Resolver`] holds only policy. Every query receives the world as a
//! [`WorldView`] and reads it without side effects, so the same resolver can
//! serve any number of worlds and the result for a pair is a pure function of
//! the world snapshot and the config.

use notoriety_types::{Mobile, MobileId, Notoriety};
use notoriety_world::WorldView;
use tracing::{trace, warn};

use crate::config::NotorietyConfig;
use crate::rules::{FALLBACK, MOBILE_RULES, RuleContext};

/// Name reported when a participant could not be found.
pub const ABSENT: &str = "absent";

/// A resolved notoriety together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The outcome.
    pub notoriety: Notoriety,
    /// Name of the deciding rule, [`FALLBACK`] or [`ABSENT`].
    pub rule: &'static str,
}

impl Resolution {
    const fn absent() -> Self {
        Self {
            notoriety: Notoriety::Innocent,
            rule: ABSENT,
        }
    }
}

/// Resolves notoriety and action permissions between mobiles.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: NotorietyConfig,
}

impl Resolver {
    /// Create a resolver with the given policy.
    pub const fn new(config: NotorietyConfig) -> Self {
        Self { config }
    }

    /// The active policy.
    pub const fn config(&self) -> &NotorietyConfig {
        &self.config
    }

    /// How `source` perceives `target`.
    ///
    /// Unknown serials resolve to [`Notoriety::Innocent`] with a warning.
    pub fn compute(&self, world: &dyn WorldView, source: MobileId, target: MobileId) -> Notoriety {
        self.explain(world, source, target).notoriety
    }

    /// Like [`compute`](Self::compute) but also names the deciding rule.
    pub fn explain(&self, world: &dyn WorldView, source: MobileId, target: MobileId) -> Resolution {
        match lookup_pair(world, source, target, "compute") {
            Some((source, target)) => self.explain_mobiles(world, source, target),
            None => Resolution::absent(),
        }
    }

    /// How `source` perceives `target`, for callers that already hold the
    /// snapshots.
    pub fn compute_mobiles(
        &self,
        world: &dyn WorldView,
        source: &Mobile,
        target: &Mobile,
    ) -> Notoriety {
        self.explain_mobiles(world, source, target).notoriety
    }

    /// Like [`compute_mobiles`](Self::compute_mobiles) but also names the
    /// deciding rule.
    pub fn explain_mobiles(
        &self,
        world: &dyn WorldView,
        source: &Mobile,
        target: &Mobile,
    ) -> Resolution {
        let ctx = RuleContext {
            world,
            config: &self.config,
            source,
            target,
        };
        let resolution = MOBILE_RULES
            .iter()
            .find_map(|rule| {
                (rule.eval)(&ctx).map(|notoriety| Resolution {
                    notoriety,
                    rule: rule.name,
                })
            })
            .unwrap_or(Resolution {
                notoriety: Notoriety::Innocent,
                rule: FALLBACK,
            });
        trace!(
            source = %source.id,
            target = %target.id,
            rule = resolution.rule,
            notoriety = %resolution.notoriety,
            "Notoriety resolved"
        );
        resolution
    }
}

/// Fetch both participants, warning once when either is missing.
pub(crate) fn lookup_pair<'w>(
    world: &'w dyn WorldView,
    source: MobileId,
    target: MobileId,
    operation: &'static str,
) -> Option<(&'w Mobile, &'w Mobile)> {
    match (world.mobile(source), world.mobile(target)) {
        (Some(s), Some(t)) => Some((s, t)),
        (s, t) => {
            warn!(
                operation,
                source = %source,
                target = %target,
                source_found = s.is_some(),
                target_found = t.is_some(),
                "Participant not found, failing safe"
            );
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Utc};
    use notoriety_types::BodyKind;
    use notoriety_world::WorldMap;

    use super::*;

    fn world() -> WorldMap {
        let mut world = WorldMap::new(DateTime::<Utc>::UNIX_EPOCH);
        world.add_mobile(Mobile::player(MobileId::new(1), "alice")).unwrap();
        world.add_mobile(Mobile::player(MobileId::new(2), "bob")).unwrap();
        world
            .add_mobile(Mobile::creature(MobileId::new(3), "rabbit", BodyKind::Animal))
            .unwrap();
        world
    }

    #[test]
    fn plain_players_are_innocent_by_fallback() {
        let world = world();
        let r = Resolver::default().explain(&world, MobileId::new(1), MobileId::new(2));
        assert_eq!(r.notoriety, Notoriety::Innocent);
        assert_eq!(r.rule, FALLBACK);
    }

    #[test]
    fn explain_names_rule() {
        let world = world();
        let r = Resolver::default().explain(&world, MobileId::new(1), MobileId::new(3));
        assert_eq!(r.notoriety, Notoriety::CanBeAttacked);
        assert_eq!(r.rule, "default_creature");
    }

    #[test]
    fn missing_participant_fails_safe() {
        let world = world();
        let r = Resolver::default().explain(&world, MobileId::new(1), MobileId::new(99));
        assert_eq!(r, Resolution::absent());
    }

    #[test]
    fn compute_is_deterministic() {
        let world = world();
        let resolver = Resolver::default();
        let first = resolver.compute(&world, MobileId::new(2), MobileId::new(3));
        let second = resolver.compute(&world, MobileId::new(2), MobileId::new(3));
        assert_eq!(first, second);
    }
}
