//! Enumeration types for the notoriety rules engine.
//!
//! The central type is [`Notoriety`], the single classification produced for
//! every (source, target) pair. The remaining enums describe the entity state
//! the resolver reads: body class, legacy IOB tagging, ethics, facets, guild
//! kinds and the pet control orders.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Notoriety
// ---------------------------------------------------------------------------

/// How one entity relates to another for combat, looting and name display.
///
/// Variants are declared in severity order, which is the order used for hue
/// selection. The resolver evaluates them by rule priority, not by this
/// ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Notoriety {
    /// Blue: attacking is a criminal act.
    #[default]
    Innocent,
    /// Green: same or allied guild, or duel teammate.
    Ally,
    /// Grey: may be attacked without penalty.
    CanBeAttacked,
    /// Grey: flagged criminal, attackable by anyone.
    Criminal,
    /// Orange: a declared enemy.
    Enemy,
    /// Red: a murderer or murderous creature.
    Murderer,
    /// Yellow: cannot be harmed.
    Invulnerable,
}

impl Notoriety {
    /// All outcomes in severity order.
    pub const ALL: [Self; 7] = [
        Self::Innocent,
        Self::Ally,
        Self::CanBeAttacked,
        Self::Criminal,
        Self::Enemy,
        Self::Murderer,
        Self::Invulnerable,
    ];

    /// The client name hue for this outcome.
    pub const fn hue(self) -> u16 {
        match self {
            Self::Innocent => 0x59,
            Self::Ally => 0x3F,
            Self::CanBeAttacked | Self::Criminal => 0x3B2,
            Self::Enemy => 0x90,
            Self::Murderer => 0x22,
            Self::Invulnerable => 0x35,
        }
    }

    /// Whether a harmful action against a target with this outcome is
    /// free of criminal consequence.
    pub const fn is_attackable(self) -> bool {
        matches!(
            self,
            Self::CanBeAttacked | Self::Criminal | Self::Enemy | Self::Murderer
        )
    }

    /// Lowercase label for logs and reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Innocent => "innocent",
            Self::Ally => "ally",
            Self::CanBeAttacked => "can_be_attacked",
            Self::Criminal => "criminal",
            Self::Enemy => "enemy",
            Self::Murderer => "murderer",
            Self::Invulnerable => "invulnerable",
        }
    }
}

impl core::fmt::Display for Notoriety {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Bodies and roles
// ---------------------------------------------------------------------------

/// Coarse classification of a mobile's body graphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Human or elf body.
    #[default]
    Human,
    /// A dead player's ghost.
    Ghost,
    /// Monster body (daemons, dragons, undead...).
    Monster,
    /// Animal body (rabbits, horses, wolves...).
    Animal,
}

impl BodyKind {
    /// Whether this is a human body.
    pub const fn is_human(self) -> bool {
        matches!(self, Self::Human)
    }

    /// Whether this is a ghost body.
    pub const fn is_ghost(self) -> bool {
        matches!(self, Self::Ghost)
    }

    /// Whether this is a monster body.
    pub const fn is_monster(self) -> bool {
        matches!(self, Self::Monster)
    }
}

/// Special NPC roles that change how the resolver treats a mobile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcRole {
    /// No special role.
    #[default]
    None,
    /// A shopkeeper flagged invulnerable.
    InvulnerableVendor,
    /// A vendor placed by a player inside a house.
    PlayerVendor,
    /// A town crier.
    TownCrier,
}

impl NpcRole {
    /// Whether the role always resolves to [`Notoriety::Invulnerable`].
    pub const fn is_invulnerable(self) -> bool {
        matches!(
            self,
            Self::InvulnerableVendor | Self::PlayerVendor | Self::TownCrier
        )
    }
}

/// Standing order given to a controlled pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlOrder {
    /// No order.
    #[default]
    None,
    /// Come to the master.
    Come,
    /// Follow a mobile.
    Follow,
    /// Guard the master against a specific mobile.
    Guard,
    /// Attack a specific mobile.
    Attack,
    /// Stay in place.
    Stay,
    /// Stop whatever it is doing.
    Stop,
}

// ---------------------------------------------------------------------------
// Allegiance systems
// ---------------------------------------------------------------------------

/// Legacy tribal alignment tagging (Iron Orc Brigade style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IobAlignment {
    /// Not aligned.
    #[default]
    None,
    /// Good kin.
    Good,
    /// Undead kin.
    Undead,
    /// Orcish kin.
    Orcish,
    /// Savage kin.
    Savage,
    /// Pirate kin.
    Pirate,
    /// Brigand kin.
    Brigand,
    /// Council kin.
    Council,
    /// Outcast kin.
    OutCast,
    /// Healer kin, neutral to everyone.
    Healer,
}

impl IobAlignment {
    /// Whether the mobile carries any alignment.
    pub const fn is_aligned(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Legacy ethics membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ethic {
    /// Heroes.
    Hero,
    /// Evil.
    Evil,
}

/// Result of comparing two entities in an allegiance system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Allegiance {
    /// No relationship.
    #[default]
    None,
    /// Same side.
    Ally,
    /// Opposing sides.
    Enemy,
    /// The target betrayed the source's side.
    Traitor,
}

// ---------------------------------------------------------------------------
// Guilds
// ---------------------------------------------------------------------------

/// The kind of a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuildType {
    /// Ordinary guild.
    #[default]
    Regular,
    /// Order virtue guild.
    Order,
    /// Chaos virtue guild.
    Chaos,
}

/// Derived war status of a mobile's guild, used by beneficial gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuildStatus {
    /// Not in a guild.
    None,
    /// In a guild that has opted out of guild warfare.
    Peaceful,
    /// In a guild that can be at war.
    Warring,
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

/// A world facet (map).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    /// The unrestricted PvP facet.
    #[default]
    Felucca,
    /// The restricted facet.
    Trammel,
    /// Ilshenar.
    Ilshenar,
    /// Malas.
    Malas,
    /// Tokuno.
    Tokuno,
    /// Staff-only internal map.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order_matches_declaration() {
        let mut sorted = Notoriety::ALL;
        sorted.sort();
        assert_eq!(sorted, Notoriety::ALL);
        assert!(Notoriety::Murderer > Notoriety::Criminal);
    }

    #[test]
    fn hues_follow_client_table() {
        assert_eq!(Notoriety::Innocent.hue(), 0x59);
        assert_eq!(Notoriety::Murderer.hue(), 0x22);
        assert_eq!(Notoriety::CanBeAttacked.hue(), Notoriety::Criminal.hue());
    }

    #[test]
    fn attackable_excludes_blue_green_and_yellow() {
        assert!(!Notoriety::Innocent.is_attackable());
        assert!(!Notoriety::Ally.is_attackable());
        assert!(!Notoriety::Invulnerable.is_attackable());
        assert!(Notoriety::CanBeAttacked.is_attackable());
        assert!(Notoriety::Enemy.is_attackable());
    }

    #[test]
    fn facet_names_are_snake_case() {
        let parsed: Result<Facet, _> = serde_yml::from_str("trammel");
        assert_eq!(parsed.ok(), Some(Facet::Trammel));
        let role: Result<NpcRole, _> = serde_yml::from_str("player_vendor");
        assert_eq!(role.ok(), Some(NpcRole::PlayerVendor));
    }
}
