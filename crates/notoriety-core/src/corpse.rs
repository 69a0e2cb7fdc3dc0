//! Notoriety of corpses, which decides who may loot them.
//!
//! A corpse carries the owner's state at the moment of death. A creature
//! corpse is protected for a short grace window so that only those who
//! fought the creature, or their party, can loot it early; after the window
//! anyone may.

use chrono::TimeDelta;
use notoriety_types::{Allegiance, Corpse, CorpseId, Mobile, MobileId, Notoriety};
use notoriety_world::WorldView;
use tracing::{trace, warn};

use crate::allegiance::{AlignmentSystem, AllegianceProvider, EthicsSystem, FactionSystem};
use crate::resolver::Resolver;
use crate::{guild, house};

impl Resolver {
    /// How `source` perceives the corpse, which governs looting rights.
    ///
    /// Unknown serials resolve to [`Notoriety::Innocent`] with a warning.
    pub fn corpse_notoriety(
        &self,
        world: &dyn WorldView,
        source: MobileId,
        corpse: CorpseId,
    ) -> Notoriety {
        match (world.mobile(source), world.corpse(corpse)) {
            (Some(source), Some(corpse)) => self.corpse_notoriety_for(world, source, corpse),
            (s, c) => {
                warn!(
                    operation = "corpse_notoriety",
                    source = %source,
                    corpse = %corpse,
                    source_found = s.is_some(),
                    corpse_found = c.is_some(),
                    "Participant not found, failing safe"
                );
                Notoriety::Innocent
            }
        }
    }

    /// [`corpse_notoriety`](Self::corpse_notoriety) on snapshots.
    pub fn corpse_notoriety_for(
        &self,
        world: &dyn WorldView,
        source: &Mobile,
        corpse: &Corpse,
    ) -> Notoriety {
        // The owner may have been deleted since death.
        let owner = world.mobile(corpse.owner);
        let notoriety = if corpse.owner_player {
            self.player_corpse(world, source, corpse, owner)
        } else {
            self.creature_corpse(world, source, corpse, owner)
        };
        trace!(source = %source.id, corpse = %corpse.id, %notoriety, "Corpse notoriety resolved");
        notoriety
    }

    fn creature_corpse(
        &self,
        world: &dyn WorldView,
        source: &Mobile,
        corpse: &Corpse,
        owner: Option<&Mobile>,
    ) -> Notoriety {
        if let Some(n) = self.membership(world, source, corpse, owner) {
            return n;
        }
        if self.house_flag(world, source, corpse, owner) {
            return Notoriety::CanBeAttacked;
        }

        let actual = if self.corpse_is_murderous(corpse, owner) {
            Notoriety::Murderer
        } else {
            Notoriety::CanBeAttacked
        };
        let always_attackable = owner.is_some_and(|o| o.always_attackable);
        if always_attackable
            || self.grace_expired(world, corpse)
            || looter_fought_owner(world, source, corpse)
        {
            actual
        } else {
            Notoriety::Innocent
        }
    }

    fn player_corpse(
        &self,
        world: &dyn WorldView,
        source: &Mobile,
        corpse: &Corpse,
        owner: Option<&Mobile>,
    ) -> Notoriety {
        if self.corpse_is_murderous(corpse, owner) {
            return Notoriety::Murderer;
        }
        if corpse.criminal {
            return Notoriety::Criminal;
        }
        if let Some(n) = self.membership(world, source, corpse, owner) {
            return n;
        }
        if owner.is_some_and(|o| o.always_attackable) {
            return Notoriety::CanBeAttacked;
        }
        if self.house_flag(world, source, corpse, owner) {
            return Notoriety::CanBeAttacked;
        }
        let owner_is_pet = owner.is_some_and(Mobile::is_controlled);
        let livestock = owner.is_some_and(|o| o.traits().livestock);
        if !corpse.body.is_human() && !corpse.body.is_ghost() && !owner_is_pet && !livestock {
            return Notoriety::CanBeAttacked;
        }
        if corpse.aggressors.contains(&source.id) {
            return Notoriety::CanBeAttacked;
        }
        Notoriety::Innocent
    }

    /// Guild, faction, ethics and alignment comparisons against the owner.
    fn membership(
        &self,
        world: &dyn WorldView,
        source: &Mobile,
        corpse: &Corpse,
        owner: Option<&Mobile>,
    ) -> Option<Notoriety> {
        let config = self.config();
        let owner_guild = corpse
            .guild
            .or_else(|| owner.and_then(|o| world.master_of(o)).and_then(|m| m.guild))
            .and_then(|id| world.guild(id));
        if let Some(n) = guild::guild_notoriety(guild::guild_for(world, source), owner_guild) {
            return Some(n);
        }

        let owner = owner?;
        if FactionSystem.allegiance(config, world, source, owner) == Allegiance::Enemy
            && source.facet == config.factions.facet
        {
            return Some(Notoriety::Enemy);
        }
        if EthicsSystem.allegiance(config, world, source, owner) == Allegiance::Enemy {
            return Some(Notoriety::Enemy);
        }
        match AlignmentSystem.allegiance(config, world, source, owner) {
            Allegiance::Ally => Some(Notoriety::Ally),
            Allegiance::Enemy | Allegiance::Traitor => Some(Notoriety::Enemy),
            Allegiance::None => None,
        }
    }

    fn house_flag(
        &self,
        world: &dyn WorldView,
        source: &Mobile,
        corpse: &Corpse,
        owner: Option<&Mobile>,
    ) -> bool {
        house::check_house_flag(
            world,
            source,
            owner,
            corpse.location,
            corpse.facet,
            self.config().house.search_radius,
        )
    }

    fn corpse_is_murderous(&self, corpse: &Corpse, owner: Option<&Mobile>) -> bool {
        let threshold = self.config().murderer.kill_threshold;
        corpse.kills >= threshold
            || owner.is_some_and(|o| {
                let traits = o.traits();
                traits.always_murderer
                    || traits.animated_dead
                    || (corpse.body.is_monster()
                        && o.is_summoned()
                        && !traits.familiar
                        && !traits.golem)
            })
    }

    fn grace_expired(&self, world: &dyn WorldView, corpse: &Corpse) -> bool {
        let grace = TimeDelta::seconds(i64::from(self.config().corpse.loot_right_grace_secs));
        corpse
            .time_of_death
            .checked_add_signed(grace)
            .is_none_or(|deadline| world.now() >= deadline)
    }
}

/// Whether the looter, or anyone in the looter's party, fought the owner.
fn looter_fought_owner(world: &dyn WorldView, source: &Mobile, corpse: &Corpse) -> bool {
    let party = world.party_of(source.id);
    corpse
        .aggressors
        .iter()
        .any(|&a| a == source.id || (party.is_some() && world.party_of(a) == party))
}
