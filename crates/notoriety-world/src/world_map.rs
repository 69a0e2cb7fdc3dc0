//! In-memory world: the fixture implementation of [`WorldView`].
//!
//! The [`WorldMap`] stores snapshots keyed by serial. It is what the test
//! suites and the scenario replay tool hand to the resolver. A [`WorldFixture`]
//! is the serde form of the same data, loaded from YAML and validated into a
//! `WorldMap` by [`WorldFixture::into_world`].

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use notoriety_types::{
    Corpse, CorpseId, DuelContext, DuelId, Facet, Guild, GuildId, House, HouseId, MapRules,
    Mobile, MobileId, PartyId, Point3D, Region, RegionId,
};

use crate::error::WorldError;
use crate::view::WorldView;

/// All entity snapshots the resolver can see.
#[derive(Debug, Clone)]
pub struct WorldMap {
    mobiles: BTreeMap<MobileId, Mobile>,
    guilds: BTreeMap<GuildId, Guild>,
    houses: BTreeMap<HouseId, House>,
    duels: BTreeMap<DuelId, DuelContext>,
    corpses: BTreeMap<CorpseId, Corpse>,
    regions: BTreeMap<RegionId, Region>,
    parties: BTreeMap<MobileId, PartyId>,
    fight_registered: BTreeSet<MobileId>,
    healer_interferers: BTreeSet<MobileId>,
    map_rules: BTreeMap<Facet, MapRules>,
    now: DateTime<Utc>,
}

impl WorldMap {
    /// Create an empty world frozen at `now`.
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            mobiles: BTreeMap::new(),
            guilds: BTreeMap::new(),
            houses: BTreeMap::new(),
            duels: BTreeMap::new(),
            corpses: BTreeMap::new(),
            regions: BTreeMap::new(),
            parties: BTreeMap::new(),
            fight_registered: BTreeSet::new(),
            healer_interferers: BTreeSet::new(),
            map_rules: BTreeMap::new(),
            now,
        }
    }

    // -------------------------------------------------------------------
    // Mobiles
    // -------------------------------------------------------------------

    /// Add a mobile.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateMobile`] if the serial is taken, or
    /// [`WorldError::UnknownGuild`] if the mobile's guild was not added first.
    pub fn add_mobile(&mut self, mobile: Mobile) -> Result<(), WorldError> {
        if self.mobiles.contains_key(&mobile.id) {
            return Err(WorldError::DuplicateMobile(mobile.id));
        }
        if let Some(guild) = mobile.guild
            && !self.guilds.contains_key(&guild)
        {
            return Err(WorldError::UnknownGuild(guild));
        }
        self.mobiles.insert(mobile.id, mobile);
        Ok(())
    }

    /// Mutable access to a mobile, for tests that evolve state between calls.
    pub fn mobile_mut(&mut self, id: MobileId) -> Option<&mut Mobile> {
        self.mobiles.get_mut(&id)
    }

    /// Number of mobiles.
    pub fn mobile_count(&self) -> usize {
        self.mobiles.len()
    }

    // -------------------------------------------------------------------
    // Guilds
    // -------------------------------------------------------------------

    /// Add a guild.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateGuild`] if the serial is taken.
    pub fn add_guild(&mut self, guild: Guild) -> Result<(), WorldError> {
        if self.guilds.contains_key(&guild.id) {
            return Err(WorldError::DuplicateGuild(guild.id));
        }
        self.guilds.insert(guild.id, guild);
        Ok(())
    }

    /// Mutable access to a guild.
    pub fn guild_mut(&mut self, id: GuildId) -> Option<&mut Guild> {
        self.guilds.get_mut(&id)
    }

    /// Put two guilds at war with each other.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownGuild`] if either guild is missing.
    pub fn declare_war(&mut self, a: GuildId, b: GuildId) -> Result<(), WorldError> {
        self.relate(a, b, |g, other| {
            g.allies.remove(&other);
            g.enemies.insert(other);
        })
    }

    /// Ally two guilds with each other.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownGuild`] if either guild is missing.
    pub fn declare_alliance(&mut self, a: GuildId, b: GuildId) -> Result<(), WorldError> {
        self.relate(a, b, |g, other| {
            g.enemies.remove(&other);
            g.allies.insert(other);
        })
    }

    fn relate(
        &mut self,
        a: GuildId,
        b: GuildId,
        apply: impl Fn(&mut Guild, GuildId),
    ) -> Result<(), WorldError> {
        if !self.guilds.contains_key(&b) {
            return Err(WorldError::UnknownGuild(b));
        }
        let first = self.guilds.get_mut(&a).ok_or(WorldError::UnknownGuild(a))?;
        apply(first, b);
        if let Some(second) = self.guilds.get_mut(&b) {
            apply(second, a);
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Houses, duels, corpses, regions
    // -------------------------------------------------------------------

    /// Add a house.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateHouse`] if the serial is taken.
    pub fn add_house(&mut self, house: House) -> Result<(), WorldError> {
        if self.houses.contains_key(&house.id) {
            return Err(WorldError::DuplicateHouse(house.id));
        }
        self.houses.insert(house.id, house);
        Ok(())
    }

    /// Add a duel session.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateDuel`] if the identifier is taken.
    pub fn add_duel(&mut self, duel: DuelContext) -> Result<(), WorldError> {
        if self.duels.contains_key(&duel.id) {
            return Err(WorldError::DuplicateDuel(duel.id));
        }
        self.duels.insert(duel.id, duel);
        Ok(())
    }

    /// Mutable access to a duel.
    pub fn duel_mut(&mut self, id: DuelId) -> Option<&mut DuelContext> {
        self.duels.get_mut(&id)
    }

    /// Add a corpse.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateCorpse`] if the serial is taken.
    pub fn add_corpse(&mut self, corpse: Corpse) -> Result<(), WorldError> {
        if self.corpses.contains_key(&corpse.id) {
            return Err(WorldError::DuplicateCorpse(corpse.id));
        }
        self.corpses.insert(corpse.id, corpse);
        Ok(())
    }

    /// Add a region.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateRegion`] if the identifier is taken.
    pub fn add_region(&mut self, region: Region) -> Result<(), WorldError> {
        if self.regions.contains_key(&region.id) {
            return Err(WorldError::DuplicateRegion(region.id));
        }
        self.regions.insert(region.id, region);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Services
    // -------------------------------------------------------------------

    /// Put a mobile into a party, leaving any previous one.
    pub fn join_party(&mut self, party: PartyId, member: MobileId) {
        self.parties.insert(member, party);
    }

    /// Register a mobile with the fight broker.
    pub fn register_fighter(&mut self, mobile: MobileId) {
        self.fight_registered.insert(mobile);
    }

    /// Mark a mobile as having healed a fight-broker combatant.
    pub fn mark_healer_interferer(&mut self, mobile: MobileId) {
        self.healer_interferers.insert(mobile);
    }

    /// Override the stock rules for a facet.
    pub fn set_map_rules(&mut self, facet: Facet, rules: MapRules) {
        self.map_rules.insert(facet, rules);
    }

    /// Move the world clock.
    pub const fn set_now(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    /// Check that every cross-reference resolves.
    ///
    /// # Errors
    ///
    /// Returns the first dangling guild, master or duel reference found, or
    /// [`WorldError::ConflictingRelationship`] for a guild that lists another
    /// as both ally and enemy.
    pub fn validate(&self) -> Result<(), WorldError> {
        for guild in self.guilds.values() {
            for other in guild.allies.iter().chain(guild.enemies.iter()) {
                if !self.guilds.contains_key(other) {
                    return Err(WorldError::UnknownGuild(*other));
                }
            }
            if let Some(other) = guild.allies.intersection(&guild.enemies).next() {
                return Err(WorldError::ConflictingRelationship {
                    guild: guild.id,
                    other: *other,
                });
            }
        }
        for mobile in self.mobiles.values() {
            if let Some(master) = mobile.master()
                && !self.mobiles.contains_key(&master)
            {
                return Err(WorldError::UnknownMobile(master));
            }
            if let Some(duel) = mobile.duel
                && !self.duels.contains_key(&duel)
            {
                return Err(WorldError::UnknownDuel {
                    mobile: mobile.id,
                    duel,
                });
            }
        }
        Ok(())
    }
}

impl WorldView for WorldMap {
    fn mobile(&self, id: MobileId) -> Option<&Mobile> {
        self.mobiles.get(&id)
    }

    fn guild(&self, id: GuildId) -> Option<&Guild> {
        self.guilds.get(&id)
    }

    fn duel(&self, id: DuelId) -> Option<&DuelContext> {
        self.duels.get(&id)
    }

    fn corpse(&self, id: CorpseId) -> Option<&Corpse> {
        self.corpses.get(&id)
    }

    fn house_at(&self, location: Point3D, facet: Facet, radius: u32) -> Option<&House> {
        self.houses
            .values()
            .find(|h| h.facet == facet && h.location.in_range(location, radius))
    }

    fn regions_at(&self, location: Point3D, facet: Facet) -> Vec<&Region> {
        self.regions
            .values()
            .filter(|r| r.contains(location, facet))
            .collect()
    }

    fn party_of(&self, id: MobileId) -> Option<PartyId> {
        self.parties.get(&id).copied()
    }

    fn is_fight_registered(&self, id: MobileId) -> bool {
        self.fight_registered.contains(&id)
    }

    fn is_healer_interferer(&self, id: MobileId) -> bool {
        self.healer_interferers.contains(&id)
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn map_rules(&self, facet: Facet) -> MapRules {
        self.map_rules
            .get(&facet)
            .copied()
            .unwrap_or_else(|| MapRules::for_facet(facet))
    }
}

// ---------------------------------------------------------------------------
// Fixture form
// ---------------------------------------------------------------------------

/// Party membership as written in a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PartyFixture {
    /// Party identifier.
    pub id: PartyId,
    /// Members.
    pub members: Vec<MobileId>,
}

/// Serde form of a [`WorldMap`], as written in scenario YAML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorldFixture {
    /// Game time the world is frozen at. Defaults to the Unix epoch.
    pub now: DateTime<Utc>,
    /// Guilds.
    pub guilds: Vec<Guild>,
    /// Mobiles.
    pub mobiles: Vec<Mobile>,
    /// Houses.
    pub houses: Vec<House>,
    /// Duel sessions.
    pub duels: Vec<DuelContext>,
    /// Corpses.
    pub corpses: Vec<Corpse>,
    /// Regions.
    pub regions: Vec<Region>,
    /// Parties.
    pub parties: Vec<PartyFixture>,
    /// Fight-broker registrations.
    pub fight_broker: Vec<MobileId>,
    /// Fight-broker healer interferers.
    pub healer_interferers: Vec<MobileId>,
    /// Facet rule overrides.
    pub map_rules: BTreeMap<Facet, MapRules>,
}

impl WorldFixture {
    /// Build and validate a [`WorldMap`] from the fixture.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] on duplicate serials or dangling references.
    pub fn into_world(self) -> Result<WorldMap, WorldError> {
        let mut world = WorldMap::new(self.now);
        for guild in self.guilds {
            world.add_guild(guild)?;
        }
        for duel in self.duels {
            world.add_duel(duel)?;
        }
        for mobile in self.mobiles {
            world.add_mobile(mobile)?;
        }
        for house in self.houses {
            world.add_house(house)?;
        }
        for corpse in self.corpses {
            world.add_corpse(corpse)?;
        }
        for region in self.regions {
            world.add_region(region)?;
        }
        for party in self.parties {
            for member in party.members {
                world.join_party(party.id, member);
            }
        }
        for mobile in self.fight_broker {
            world.register_fighter(mobile);
        }
        for mobile in self.healer_interferers {
            world.mark_healer_interferer(mobile);
        }
        for (facet, rules) in self.map_rules {
            world.set_map_rules(facet, rules);
        }
        world.validate()?;
        tracing::debug!(mobiles = world.mobile_count(), "world fixture loaded");
        Ok(world)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use notoriety_types::{BodyKind, Control, ControlOrder, Rect2D};

    use super::*;

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    #[test]
    fn duplicate_mobile_is_rejected() {
        let mut world = WorldMap::new(epoch());
        world
            .add_mobile(Mobile::player(MobileId::new(1), "Ana"))
            .unwrap();
        let again = world.add_mobile(Mobile::player(MobileId::new(1), "Ana"));
        assert!(matches!(again, Err(WorldError::DuplicateMobile(_))));
    }

    #[test]
    fn mobile_guild_must_exist() {
        let mut world = WorldMap::new(epoch());
        let mut ana = Mobile::player(MobileId::new(1), "Ana");
        ana.guild = Some(GuildId::new(5));
        assert!(matches!(
            world.add_mobile(ana),
            Err(WorldError::UnknownGuild(_))
        ));
    }

    #[test]
    fn war_and_alliance_are_symmetric() {
        let mut world = WorldMap::new(epoch());
        world.add_guild(Guild::new(GuildId::new(1), "A")).unwrap();
        world.add_guild(Guild::new(GuildId::new(2), "B")).unwrap();
        world.declare_war(GuildId::new(1), GuildId::new(2)).unwrap();
        assert!(world.guild(GuildId::new(2)).unwrap().is_enemy(GuildId::new(1)));

        world
            .declare_alliance(GuildId::new(2), GuildId::new(1))
            .unwrap();
        let a = world.guild(GuildId::new(1)).unwrap();
        assert!(a.is_ally(GuildId::new(2)));
        assert!(!a.is_enemy(GuildId::new(2)));
    }

    #[test]
    fn dangling_master_fails_validation() {
        let mut world = WorldMap::new(epoch());
        let mut pet = Mobile::creature(MobileId::new(2), "dog", BodyKind::Animal);
        pet.control = Control::Controlled {
            master: MobileId::new(1),
            order: ControlOrder::Follow,
            order_target: None,
        };
        world.add_mobile(pet).unwrap();
        assert!(matches!(
            world.validate(),
            Err(WorldError::UnknownMobile(_))
        ));
    }

    #[test]
    fn house_lookup_respects_radius_and_facet() {
        let mut world = WorldMap::new(epoch());
        world
            .add_house(House {
                id: HouseId::new(1),
                location: Point3D::new(1000, 1000, 0),
                owner: MobileId::new(1),
                ..House::default()
            })
            .unwrap();
        let near = Point3D::new(1010, 995, 0);
        assert!(world.house_at(near, Facet::Felucca, 16).is_some());
        assert!(world.house_at(near, Facet::Trammel, 16).is_none());
        assert!(world.house_at(near, Facet::Felucca, 5).is_none());
    }

    #[test]
    fn region_flags_are_visible_through_the_view() {
        let mut world = WorldMap::new(epoch());
        world
            .add_region(Region {
                id: RegionId::new(1),
                name: "Sanctuary".to_owned(),
                bounds: Rect2D {
                    x1: 0,
                    y1: 0,
                    x2: 100,
                    y2: 100,
                },
                safe_zone: true,
                ..Region::default()
            })
            .unwrap();
        let mut inside = Mobile::player(MobileId::new(1), "Ana");
        inside.location = Point3D::new(50, 50, 0);
        let outside = Mobile::player(MobileId::new(2), "Bo");
        let mut far = outside.clone();
        far.location = Point3D::new(500, 500, 0);
        assert!(world.in_safe_zone(&inside));
        assert!(!world.in_safe_zone(&far));
    }

    #[test]
    fn map_rule_overrides_win_over_stock_rules() {
        let mut world = WorldMap::new(epoch());
        assert_eq!(world.map_rules(Facet::Trammel), MapRules::RESTRICTED);
        world.set_map_rules(Facet::Trammel, MapRules::UNRESTRICTED);
        assert_eq!(world.map_rules(Facet::Trammel), MapRules::UNRESTRICTED);
    }

    #[test]
    fn fixture_yaml_builds_a_world() {
        let yaml = r"
now: 2024-05-01T12:00:00Z
guilds:
  - id: 10
    name: Knights
    allies: [11]
  - id: 11
    name: Squires
    allies: [10]
mobiles:
  - id: 1
    name: Ana
    player: true
    guild: 10
  - id: 2
    name: rabbit
    body: animal
    creature:
      kind: rabbit
parties:
  - id: 3
    members: [1]
fight_broker: [1]
";
        let fixture: WorldFixture = serde_yml::from_str(yaml).unwrap();
        let world = fixture.into_world().unwrap();
        assert_eq!(world.mobile_count(), 2);
        assert_eq!(world.party_of(MobileId::new(1)), Some(PartyId::new(3)));
        assert!(world.is_fight_registered(MobileId::new(1)));
        assert!(!world.is_healer_interferer(MobileId::new(1)));
    }

    #[test]
    fn fixture_rejects_conflicting_guild_relationship() {
        let yaml = r"
guilds:
  - id: 1
    allies: [2]
    enemies: [2]
  - id: 2
";
        let fixture: WorldFixture = serde_yml::from_str(yaml).unwrap();
        assert!(matches!(
            fixture.into_world(),
            Err(WorldError::ConflictingRelationship { .. })
        ));
    }
}
