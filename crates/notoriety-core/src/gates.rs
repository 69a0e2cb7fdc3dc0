//! Beneficial and harmful action gates.
//!
//! These decide whether an action may even be attempted, before any
//! notoriety side effects apply. A refused action is logged at debug level
//! with the reason.

use notoriety_types::{Mobile, MobileId};
use notoriety_world::WorldView;
use tracing::debug;

use crate::allegiance::{AlignmentSystem, FactionSystem};
use crate::resolver::{Resolver, lookup_pair};
use crate::{duel, guild};

fn deny(operation: &'static str, from: &Mobile, to: &Mobile, reason: &'static str) -> bool {
    debug!(operation, from = %from.id, to = %to.id, reason, "Action refused");
    false
}

impl Resolver {
    /// Whether `from` may heal, cure or buff `to`.
    pub fn allow_beneficial(&self, world: &dyn WorldView, from: MobileId, to: MobileId) -> bool {
        lookup_pair(world, from, to, "allow_beneficial")
            .is_some_and(|(from, to)| self.allow_beneficial_mobiles(world, from, to))
    }

    /// [`allow_beneficial`](Self::allow_beneficial) on snapshots.
    pub fn allow_beneficial_mobiles(
        &self,
        world: &dyn WorldView,
        from: &Mobile,
        to: &Mobile,
    ) -> bool {
        const OP: &str = "allow_beneficial";
        let config = self.config();

        if let Some(block) = duel::beneficial_block(world, from, to) {
            return deny(OP, from, to, block.as_str());
        }
        if world.in_safe_zone(from) || world.in_safe_zone(to) {
            return deny(OP, from, to, "safe_zone");
        }
        if config.factions.enabled
            && let Some(theirs) = FactionSystem::faction_of(world, to)
            && FactionSystem::faction_of(world, from) != Some(theirs)
        {
            return deny(OP, from, to, "faction");
        }
        if !AlignmentSystem.allow_beneficial(config, world, from, to) {
            return deny(OP, from, to, "alignment");
        }

        if !world.map_rules(from.facet).beneficial_restrictions || !from.player {
            return true;
        }
        if to.is_creature() && !to.is_controlled() {
            return deny(OP, from, to, "uncontrolled_creature");
        }

        let from_guild = guild::guild_for(world, from);
        let to_guild = guild::guild_for(world, to);
        if let (Some(a), Some(b)) = (from_guild, to_guild)
            && guild::is_same_or_allied(a, b)
        {
            return true;
        }
        let allowed = guild::check_beneficial_status(
            guild::guild_status(&config.guilds, from_guild),
            guild::guild_status(&config.guilds, to_guild),
        );
        allowed || deny(OP, from, to, "guild_status")
    }

    /// Whether `from` may attack or cast a harmful spell on `to`.
    pub fn allow_harmful(&self, world: &dyn WorldView, from: MobileId, to: MobileId) -> bool {
        lookup_pair(world, from, to, "allow_harmful")
            .is_some_and(|(from, to)| self.allow_harmful_mobiles(world, from, to))
    }

    /// [`allow_harmful`](Self::allow_harmful) on snapshots.
    pub fn allow_harmful_mobiles(
        &self,
        world: &dyn WorldView,
        from: &Mobile,
        to: &Mobile,
    ) -> bool {
        const OP: &str = "allow_harmful";

        if let Some(block) = duel::harmful_block(world, from, to) {
            return deny(OP, from, to, block.as_str());
        }
        if world.in_safe_zone(from) || world.in_safe_zone(to) {
            return deny(OP, from, to, "safe_zone");
        }

        let uncontrolled_npc = !from.player && from.master().is_none();
        if !world.map_rules(from.facet).harmful_restrictions || uncontrolled_npc {
            return true;
        }

        if let (Some(a), Some(b)) = (guild::guild_for(world, from), guild::guild_for(world, to))
            && !a.peaceful
            && !b.peaceful
            && guild::is_related(a, b)
        {
            return true;
        }

        if to.is_controlled() || (to.is_summoned() && to.master() != Some(from.id)) {
            return deny(OP, from, to, "controlled_target");
        }
        if to.player {
            return deny(OP, from, to, "player_target");
        }
        if to.traits().initial_innocent {
            return true;
        }

        let notoriety = self.compute_mobiles(world, from, to);
        notoriety.is_attackable() || deny(OP, from, to, "innocent_target")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Utc};
    use notoriety_types::{
        BodyKind, Control, ControlOrder, Facet, FactionId, Guild, GuildId, Rect2D, Region,
        RegionId,
    };
    use notoriety_world::WorldMap;

    use super::*;
    use crate::config::NotorietyConfig;

    fn trammel_player(id: u32) -> Mobile {
        let mut m = Mobile::player(MobileId::new(id), "p");
        m.facet = Facet::Trammel;
        m
    }

    fn world(mobiles: Vec<Mobile>) -> WorldMap {
        let mut world = WorldMap::new(DateTime::<Utc>::UNIX_EPOCH);
        world.add_guild(Guild::new(GuildId::new(1), "red")).unwrap();
        world.add_guild(Guild::new(GuildId::new(2), "blue")).unwrap();
        for m in mobiles {
            world.add_mobile(m).unwrap();
        }
        world
    }

    fn id(n: u32) -> MobileId {
        MobileId::new(n)
    }

    #[test]
    fn self_help_is_always_allowed() {
        let mut a = trammel_player(1);
        a.guild = Some(GuildId::new(1));
        let world = world(vec![a]);
        assert!(Resolver::default().allow_beneficial(&world, id(1), id(1)));
    }

    #[test]
    fn trammel_legacy_guild_status_blocks_outsiders() {
        let mut a = trammel_player(1);
        a.guild = Some(GuildId::new(1));
        let b = trammel_player(2);
        let mut c = trammel_player(3);
        c.guild = Some(GuildId::new(1));
        let world = world(vec![a, b, c]);
        let resolver = Resolver::default();
        assert!(!resolver.allow_beneficial(&world, id(1), id(2)));
        assert!(!resolver.allow_beneficial(&world, id(2), id(1)));
        assert!(resolver.allow_beneficial(&world, id(1), id(3)));

        let mut config = NotorietyConfig::default();
        config.guilds.legacy_always_warring = false;
        assert!(Resolver::new(config).allow_beneficial(&world, id(1), id(2)));
    }

    #[test]
    fn felucca_is_unrestricted() {
        let world = world(vec![
            Mobile::player(id(1), "a"),
            Mobile::creature(id(2), "rabbit", BodyKind::Animal),
        ]);
        let resolver = Resolver::default();
        assert!(resolver.allow_beneficial(&world, id(1), id(2)));
        assert!(resolver.allow_harmful(&world, id(1), id(2)));
    }

    #[test]
    fn trammel_protects_players_and_pets() {
        let mut pet = Mobile::creature(id(3), "horse", BodyKind::Animal);
        pet.facet = Facet::Trammel;
        pet.control = Control::Controlled {
            master: id(2),
            order: ControlOrder::Follow,
            order_target: None,
        };
        let mut rabbit = Mobile::creature(id(4), "rabbit", BodyKind::Animal);
        rabbit.facet = Facet::Trammel;
        let world = world(vec![trammel_player(1), trammel_player(2), pet, rabbit]);
        let resolver = Resolver::default();
        assert!(!resolver.allow_harmful(&world, id(1), id(2)));
        assert!(!resolver.allow_harmful(&world, id(1), id(3)));
        assert!(resolver.allow_harmful(&world, id(1), id(4)));
        assert!(!resolver.allow_beneficial(&world, id(1), id(4)));
    }

    #[test]
    fn warring_guilds_may_fight_in_trammel() {
        let mut a = trammel_player(1);
        a.guild = Some(GuildId::new(1));
        let mut b = trammel_player(2);
        b.guild = Some(GuildId::new(2));
        let mut world = world(vec![a, b]);
        let resolver = Resolver::default();
        assert!(!resolver.allow_harmful(&world, id(1), id(2)));
        world.declare_war(GuildId::new(1), GuildId::new(2)).unwrap();
        assert!(resolver.allow_harmful(&world, id(1), id(2)));
        world.guild_mut(GuildId::new(2)).unwrap().peaceful = true;
        assert!(!resolver.allow_harmful(&world, id(1), id(2)));
    }

    #[test]
    fn caster_may_harm_own_summon_only() {
        let mut daemon = Mobile::creature(id(3), "daemon", BodyKind::Monster);
        daemon.facet = Facet::Trammel;
        daemon.control = Control::Summoned { master: id(1) };
        let world = world(vec![trammel_player(1), trammel_player(2), daemon]);
        let resolver = Resolver::default();
        assert!(resolver.allow_harmful(&world, id(1), id(3)));
        assert!(!resolver.allow_harmful(&world, id(2), id(3)));
    }

    fn with_safe_zone(mut world: WorldMap) -> WorldMap {
        world
            .add_region(Region {
                id: RegionId::new(1),
                bounds: Rect2D {
                    x1: 0,
                    y1: 0,
                    x2: 10,
                    y2: 10,
                },
                safe_zone: true,
                ..Region::default()
            })
            .unwrap();
        world
    }

    #[test]
    fn safe_zone_blocks_actions_across_boundary() {
        let mut world = with_safe_zone(world(vec![
            Mobile::player(id(1), "a"),
            Mobile::player(id(2), "b"),
        ]));
        world.mobile_mut(id(2)).unwrap().location.x = 50;
        let resolver = Resolver::default();
        assert!(!resolver.allow_harmful(&world, id(2), id(1)));
        assert!(!resolver.allow_beneficial(&world, id(2), id(1)));
        assert!(!resolver.allow_beneficial(&world, id(1), id(2)));
        assert!(resolver.allow_beneficial(&world, id(2), id(2)));
    }

    #[test]
    fn safe_zone_blocks_help_between_occupants() {
        let world = with_safe_zone(world(vec![
            Mobile::player(id(1), "a"),
            Mobile::player(id(2), "b"),
        ]));
        let resolver = Resolver::default();
        assert!(!resolver.allow_beneficial(&world, id(1), id(2)));
        assert!(!resolver.allow_beneficial(&world, id(2), id(1)));
        assert!(!resolver.allow_harmful(&world, id(1), id(2)));
    }

    #[test]
    fn faction_outsiders_cannot_help() {
        let mut a = Mobile::player(id(1), "a");
        a.faction = Some(FactionId::new(1));
        let mut b = Mobile::player(id(2), "b");
        b.faction = Some(FactionId::new(2));
        let world = world(vec![a, b]);
        let mut config = NotorietyConfig::default();
        config.factions.enabled = true;
        let resolver = Resolver::new(config);
        assert!(!resolver.allow_beneficial(&world, id(1), id(2)));
        assert!(resolver.allow_beneficial(&world, id(2), id(2)));
    }

    #[test]
    fn unknown_ids_are_refused() {
        let world = world(vec![Mobile::player(id(1), "a")]);
        let resolver = Resolver::default();
        assert!(!resolver.allow_beneficial(&world, id(1), id(9)));
        assert!(!resolver.allow_harmful(&world, id(9), id(1)));
    }
}
