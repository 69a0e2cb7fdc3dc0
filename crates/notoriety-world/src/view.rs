//! The read-only world-state port consulted by the resolver.
//!
//! The engine owns every mobile, guild, house and duel. The resolver receives
//! a `&dyn WorldView` at call time and only reads through it, so unit tests can
//! hand it a constructed [`WorldMap`](crate::WorldMap) instead of live engine
//! state.

use chrono::{DateTime, Utc};

use notoriety_types::{
    AlignmentId, Corpse, CorpseId, DuelContext, DuelId, Facet, Guild, GuildId, House, MapRules,
    Mobile, MobileId, PartyId, Point3D, Region,
};

/// Read accessors for the engine-owned state the resolver depends on.
pub trait WorldView {
    /// Look up a mobile by serial.
    fn mobile(&self, id: MobileId) -> Option<&Mobile>;

    /// Look up a guild by serial.
    fn guild(&self, id: GuildId) -> Option<&Guild>;

    /// Look up a duel session.
    fn duel(&self, id: DuelId) -> Option<&DuelContext>;

    /// Look up a corpse by serial.
    fn corpse(&self, id: CorpseId) -> Option<&Corpse>;

    /// Find a house whose sign lies within `radius` tiles of `location`.
    fn house_at(&self, location: Point3D, facet: Facet, radius: u32) -> Option<&House>;

    /// All regions covering the point.
    fn regions_at(&self, location: Point3D, facet: Facet) -> Vec<&Region>;

    /// The party the mobile belongs to.
    fn party_of(&self, id: MobileId) -> Option<PartyId>;

    /// Whether the mobile is registered with the fight broker.
    fn is_fight_registered(&self, id: MobileId) -> bool;

    /// Whether the mobile healed a fight-broker combatant.
    fn is_healer_interferer(&self, id: MobileId) -> bool;

    /// The current game time.
    fn now(&self) -> DateTime<Utc>;

    /// Action restrictions in force on a facet.
    fn map_rules(&self, facet: Facet) -> MapRules {
        MapRules::for_facet(facet)
    }

    /// The mobile's duel session, if it has one that still exists.
    fn active_duel(&self, mobile: &Mobile) -> Option<&DuelContext> {
        mobile.duel.and_then(|id| self.duel(id))
    }

    /// The master of a pet or the caster of a summon.
    fn master_of(&self, mobile: &Mobile) -> Option<&Mobile> {
        mobile.master().and_then(|id| self.mobile(id))
    }

    /// Whether the mobile stands inside a safe zone.
    fn in_safe_zone(&self, mobile: &Mobile) -> bool {
        self.regions_at(mobile.location, mobile.facet)
            .iter()
            .any(|r| r.safe_zone)
    }

    /// Whether the mobile stands inside a region with IOB rules.
    fn in_iob_zone(&self, mobile: &Mobile) -> bool {
        self.regions_at(mobile.location, mobile.facet)
            .iter()
            .any(|r| r.iob_zone)
    }

    /// The alignment whose stronghold the mobile stands in.
    fn stronghold_at(&self, mobile: &Mobile) -> Option<AlignmentId> {
        self.regions_at(mobile.location, mobile.facet)
            .iter()
            .find_map(|r| r.stronghold)
    }
}
