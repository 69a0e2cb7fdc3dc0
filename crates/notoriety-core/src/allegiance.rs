//! Membership systems that declare two mobiles allied or hostile.
//!
//! Ethics, factions, alignments and the legacy IOB kinship are independent
//! opt-in systems. Each answers the same question for a pair of mobiles, so
//! they share the [`AllegianceProvider`] trait and the resolver treats them
//! uniformly. A disabled system always answers [`Allegiance::None`].

use notoriety_types::{AlignmentId, Allegiance, Ethic, FactionId, IobAlignment, Mobile};
use notoriety_world::WorldView;
use tracing::trace;

use crate::config::NotorietyConfig;

/// A membership system that can relate two mobiles.
pub trait AllegianceProvider {
    /// Short system name for logs.
    fn name(&self) -> &'static str;

    /// Whether the system is switched on.
    fn enabled(&self, config: &NotorietyConfig) -> bool;

    /// How `source` regards `target` under this system, ignoring whether
    /// the system is enabled.
    fn relation(&self, world: &dyn WorldView, source: &Mobile, target: &Mobile) -> Allegiance;

    /// How `source` regards `target`, or `None` when the system is off.
    fn allegiance(
        &self,
        config: &NotorietyConfig,
        world: &dyn WorldView,
        source: &Mobile,
        target: &Mobile,
    ) -> Allegiance {
        if !self.enabled(config) {
            return Allegiance::None;
        }
        let allegiance = self.relation(world, source, target);
        if allegiance != Allegiance::None {
            trace!(
                system = self.name(),
                source = %source.id,
                target = %target.id,
                ?allegiance,
                "Allegiance found"
            );
        }
        allegiance
    }
}

fn compare<T: Eq>(a: Option<T>, b: Option<T>) -> Allegiance {
    match (a, b) {
        (Some(a), Some(b)) => {
            if a == b {
                Allegiance::Ally
            } else {
                Allegiance::Enemy
            }
        }
        _ => Allegiance::None,
    }
}

/// Hero versus Evil player ethics.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthicsSystem;

impl EthicsSystem {
    /// Ethic of a player. Creatures never carry one.
    pub const fn ethic_of(mobile: &Mobile) -> Option<Ethic> {
        if mobile.player { mobile.ethic } else { None }
    }
}

impl AllegianceProvider for EthicsSystem {
    fn name(&self) -> &'static str {
        "ethics"
    }

    fn enabled(&self, config: &NotorietyConfig) -> bool {
        config.ethics.enabled
    }

    fn relation(&self, _world: &dyn WorldView, source: &Mobile, target: &Mobile) -> Allegiance {
        compare(Self::ethic_of(source), Self::ethic_of(target))
    }
}

/// Faction membership. Pets and summons fight for their master's faction.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactionSystem;

impl FactionSystem {
    /// Faction that speaks for the mobile.
    pub fn faction_of(world: &dyn WorldView, mobile: &Mobile) -> Option<FactionId> {
        mobile
            .faction
            .or_else(|| world.master_of(mobile).and_then(|m| m.faction))
    }
}

impl AllegianceProvider for FactionSystem {
    fn name(&self) -> &'static str {
        "factions"
    }

    fn enabled(&self, config: &NotorietyConfig) -> bool {
        config.factions.enabled
    }

    fn relation(&self, world: &dyn WorldView, source: &Mobile, target: &Mobile) -> Allegiance {
        compare(
            Self::faction_of(world, source),
            Self::faction_of(world, target),
        )
    }
}

/// Alignment membership, with traitors and strongholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignmentSystem;

impl AlignmentSystem {
    /// Alignment that speaks for the mobile.
    pub fn alignment_of(world: &dyn WorldView, mobile: &Mobile) -> Option<AlignmentId> {
        mobile
            .alignment
            .or_else(|| world.master_of(mobile).and_then(|m| m.alignment))
    }

    /// Whether the mobile stands in any alignment stronghold.
    pub fn in_stronghold(world: &dyn WorldView, mobile: &Mobile) -> bool {
        world.stronghold_at(mobile).is_some()
    }

    /// Whether the alignment system permits `source` to help `target`.
    pub fn allow_beneficial(
        &self,
        config: &NotorietyConfig,
        world: &dyn WorldView,
        source: &Mobile,
        target: &Mobile,
    ) -> bool {
        !matches!(
            self.allegiance(config, world, source, target),
            Allegiance::Enemy | Allegiance::Traitor
        )
    }
}

impl AllegianceProvider for AlignmentSystem {
    fn name(&self) -> &'static str {
        "alignment"
    }

    fn enabled(&self, config: &NotorietyConfig) -> bool {
        config.alignment.enabled
    }

    fn relation(&self, world: &dyn WorldView, source: &Mobile, target: &Mobile) -> Allegiance {
        match compare(
            Self::alignment_of(world, source),
            Self::alignment_of(world, target),
        ) {
            Allegiance::Ally if target.alignment_traitor && source.id != target.id => {
                Allegiance::Traitor
            }
            other => other,
        }
    }
}

/// Legacy IOB kinship.
///
/// IOB has no global switch; whether it applies depends on where the source
/// stands, which the resolver checks separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct IobSystem;

impl IobSystem {
    /// Whether either side is a healer kin, which softens hostility.
    pub fn involves_healer(source: &Mobile, target: &Mobile) -> bool {
        source.iob_alignment == IobAlignment::Healer || target.iob_alignment == IobAlignment::Healer
    }

    /// Whether IOB rules are in force for the source.
    pub fn in_force(config: &NotorietyConfig, world: &dyn WorldView, source: &Mobile) -> bool {
        config.iob.shard_wide || world.in_iob_zone(source)
    }
}

impl AllegianceProvider for IobSystem {
    fn name(&self) -> &'static str {
        "iob"
    }

    fn enabled(&self, _config: &NotorietyConfig) -> bool {
        true
    }

    fn relation(&self, _world: &dyn WorldView, source: &Mobile, target: &Mobile) -> Allegiance {
        let aligned = |m: &Mobile| {
            if m.iob_alignment.is_aligned() {
                Some(m.iob_alignment)
            } else {
                None
            }
        };
        compare(aligned(source), aligned(target))
    }
}
