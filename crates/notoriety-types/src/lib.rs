//! Shared type definitions for the notoriety rules engine.
//!
//! This crate holds the plain data the resolver reads: serial wrappers, the
//! [`Notoriety`] outcome enumeration, and snapshots of the engine-owned
//! entities (mobiles, guilds, houses, duels, regions, corpses).
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe serial wrappers for every entity kind
//! - [`enums`] -- Outcome, body, alignment, facet and guild enumerations
//! - [`structs`] -- Entity snapshots and their small query helpers

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Allegiance, BodyKind, ControlOrder, Ethic, Facet, GuildStatus, GuildType, IobAlignment,
    Notoriety, NpcRole,
};
pub use ids::{
    AlignmentId, CorpseId, DuelId, FactionId, GuildId, HouseId, MobileId, PartyId, RegionId,
};
pub use structs::{
    AggressorEntry, Control, Corpse, CreatureTraits, DuelContext, DuelTeam, Guild, House,
    MapRules, Mobile, Point3D, Rect2D, Region, TournamentRules,
};
