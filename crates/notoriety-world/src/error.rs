//! Error types for the `notoriety-world` crate.
//!
//! Lookups through [`WorldView`](crate::WorldView) never fail; they return
//! `Option`. These errors only come from building a [`WorldMap`](crate::WorldMap)
//! out of inconsistent fixture data.

use notoriety_types::{CorpseId, DuelId, GuildId, HouseId, MobileId, RegionId};

/// Errors that can occur while assembling a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A mobile with this serial was already inserted.
    #[error("duplicate mobile serial: {0}")]
    DuplicateMobile(MobileId),

    /// A guild with this serial was already inserted.
    #[error("duplicate guild serial: {0}")]
    DuplicateGuild(GuildId),

    /// A house with this serial was already inserted.
    #[error("duplicate house serial: {0}")]
    DuplicateHouse(HouseId),

    /// A duel with this identifier was already inserted.
    #[error("duplicate duel id: {0}")]
    DuplicateDuel(DuelId),

    /// A corpse with this serial was already inserted.
    #[error("duplicate corpse serial: {0}")]
    DuplicateCorpse(CorpseId),

    /// A region with this identifier was already inserted.
    #[error("duplicate region id: {0}")]
    DuplicateRegion(RegionId),

    /// A reference points at a guild that does not exist.
    #[error("unknown guild: {0}")]
    UnknownGuild(GuildId),

    /// A reference points at a mobile that does not exist.
    #[error("unknown mobile: {0}")]
    UnknownMobile(MobileId),

    /// A mobile references a duel that does not exist.
    #[error("mobile {mobile} references unknown duel {duel}")]
    UnknownDuel {
        /// The referencing mobile.
        mobile: MobileId,
        /// The missing duel.
        duel: DuelId,
    },

    /// A guild was declared both ally and enemy of another.
    #[error("guild {guild} is both allied with and at war with {other}")]
    ConflictingRelationship {
        /// The guild holding the relationship.
        guild: GuildId,
        /// The other guild.
        other: GuildId,
    },
}
