//! Type-safe serial wrappers.
//!
//! Every persistent object in the shard carries a 32-bit serial assigned by
//! the engine. Each kind of object gets its own newtype so a guild serial can
//! never be passed where a mobile serial is expected.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around a `u32` serial with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Wrap a raw serial.
            pub const fn new(serial: u32) -> Self {
                Self(serial)
            }

            /// Return the raw serial value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "0x{:08X}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(serial: u32) -> Self {
                Self(serial)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Serial of a mobile (player character or creature).
    MobileId
}

define_id! {
    /// Serial of a player guild.
    GuildId
}

define_id! {
    /// Identifier of a faction in the faction system.
    FactionId
}

define_id! {
    /// Identifier of an alignment in the alignment system.
    AlignmentId
}

define_id! {
    /// Serial of a house multi.
    HouseId
}

define_id! {
    /// Identifier of a structured duel session.
    DuelId
}

define_id! {
    /// Serial of a corpse container.
    CorpseId
}

define_id! {
    /// Identifier of an adventuring party.
    PartyId
}

define_id! {
    /// Identifier of a world region.
    RegionId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_hex_serial() {
        assert_eq!(MobileId::new(0x2A).to_string(), "0x0000002A");
        assert_eq!(GuildId::from(0xFFFF_FFFF).to_string(), "0xFFFFFFFF");
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&CorpseId::new(77)).unwrap_or_default();
        assert_eq!(json, "77");
        let back: Result<CorpseId, _> = serde_json::from_str("77");
        assert_eq!(back.ok(), Some(CorpseId::new(77)));
    }
}
