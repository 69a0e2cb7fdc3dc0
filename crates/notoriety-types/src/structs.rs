//! Entity snapshots consumed by the notoriety resolver.
//!
//! These structs are read-only views of engine-owned state. The resolver
//! never creates, mutates or destroys any of them; the engine refreshes the
//! snapshots (aggressor lists, criminal timers, duel state) between calls.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{
    BodyKind, ControlOrder, Ethic, Facet, GuildType, IobAlignment, Notoriety, NpcRole,
};
use crate::ids::{AlignmentId, CorpseId, DuelId, FactionId, GuildId, HouseId, MobileId, RegionId};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A point on a facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point3D {
    /// West-east coordinate.
    pub x: i32,
    /// North-south coordinate.
    pub y: i32,
    /// Altitude.
    #[serde(default)]
    pub z: i32,
}

impl Point3D {
    /// Create a point.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Whether `other` lies within `radius` tiles on both axes.
    pub const fn in_range(self, other: Self, radius: u32) -> bool {
        self.x.abs_diff(other.x) <= radius && self.y.abs_diff(other.y) <= radius
    }
}

/// An axis-aligned rectangle, inclusive start and exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect2D {
    /// Western edge.
    pub x1: i32,
    /// Northern edge.
    pub y1: i32,
    /// Eastern edge (exclusive).
    pub x2: i32,
    /// Southern edge (exclusive).
    pub y2: i32,
}

impl Rect2D {
    /// Whether the point lies inside the rectangle.
    pub const fn contains(self, p: Point3D) -> bool {
        p.x >= self.x1 && p.x < self.x2 && p.y >= self.y1 && p.y < self.y2
    }
}

// ---------------------------------------------------------------------------
// Mobiles
// ---------------------------------------------------------------------------

/// One entry of an aggressor or aggressed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggressorEntry {
    /// The other party of the aggression.
    pub mobile: MobileId,
    /// Whether the aggression was a criminal act.
    #[serde(default)]
    pub criminal: bool,
    /// When the two last exchanged blows.
    #[serde(default)]
    pub last_combat: Option<DateTime<Utc>>,
}

impl AggressorEntry {
    /// A lawful aggression entry with no timestamp.
    pub const fn lawful(mobile: MobileId) -> Self {
        Self {
            mobile,
            criminal: false,
            last_combat: None,
        }
    }

    /// A criminal aggression entry with no timestamp.
    pub const fn criminal(mobile: MobileId) -> Self {
        Self {
            mobile,
            criminal: true,
            last_combat: None,
        }
    }
}

/// Who, if anyone, controls a creature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Control {
    /// Wild: nobody controls it.
    #[default]
    Wild,
    /// A tamed or bonded pet.
    Controlled {
        /// The owning player.
        master: MobileId,
        /// The pet's standing order.
        #[serde(default)]
        order: ControlOrder,
        /// The mobile the order is aimed at, if any.
        #[serde(default)]
        order_target: Option<MobileId>,
    },
    /// A temporary conjured creature.
    Summoned {
        /// The caster.
        master: MobileId,
    },
}

/// Creature-only attributes. Absent for player characters.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureTraits {
    /// Creature type name, matched by enemy-of-one designations.
    pub kind: String,
    /// Always displays as a murderer.
    pub always_murderer: bool,
    /// Raised by animate dead.
    pub animated_dead: bool,
    /// Starts out innocent and skips the default creature rule.
    pub initial_innocent: bool,
    /// A necromancer familiar; exempt from the summoned-monster rule.
    pub familiar: bool,
    /// A golem; exempt from the summoned-monster rule.
    pub golem: bool,
    /// Farm livestock; skips the default creature rule.
    pub livestock: bool,
    /// Follows an IOB kin and is attackable inside IOB zones.
    pub iob_follower: bool,
    /// Custom rule result that overrides the whole rule chain.
    pub notoriety_override: Option<Notoriety>,
}

/// Snapshot of a mobile as seen by the resolver.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mobile {
    /// Serial.
    pub id: MobileId,
    /// Display name, used in logs only.
    pub name: String,
    /// Whether a player controls this mobile directly.
    pub player: bool,
    /// Body classification.
    pub body: BodyKind,
    /// Current position.
    pub location: Point3D,
    /// Current facet.
    pub facet: Facet,
    /// Blessed mobiles cannot be harmed.
    pub blessed: bool,
    /// Special NPC role.
    pub role: NpcRole,
    /// Guild membership.
    pub guild: Option<GuildId>,
    /// Faction membership.
    pub faction: Option<FactionId>,
    /// Ethics membership.
    pub ethic: Option<Ethic>,
    /// Transient ethics flag: a Hero who fell from grace.
    pub fallen_hero: bool,
    /// Transient ethics flag: an Evil player showing as attackable.
    pub evil_noto: bool,
    /// Alignment membership.
    pub alignment: Option<AlignmentId>,
    /// Whether the mobile betrayed its alignment.
    pub alignment_traitor: bool,
    /// Legacy IOB alignment.
    pub iob_alignment: IobAlignment,
    /// Transient criminal flag.
    pub criminal: bool,
    /// Explicit murderer flag.
    pub red: bool,
    /// Murder count.
    pub kills: u32,
    /// Always attackable regardless of other state.
    pub always_attackable: bool,
    /// Under a transformation or animal form spell.
    pub transformed: bool,
    /// Creature type designated by an enemy-of-one spell.
    pub enemy_of_one: Option<String>,
    /// Mobiles this one stole from while classic stealing was active.
    pub perma_flags: Vec<MobileId>,
    /// Mobiles that attacked this one.
    pub aggressors: Vec<AggressorEntry>,
    /// Mobiles this one attacked.
    pub aggressed: Vec<AggressorEntry>,
    /// Active duel session.
    pub duel: Option<DuelId>,
    /// Control relationship (creatures only).
    pub control: Control,
    /// Creature attributes; `None` for players.
    pub creature: Option<CreatureTraits>,
}

impl Mobile {
    /// A player character with default state.
    pub fn player(id: MobileId, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            player: true,
            ..Self::default()
        }
    }

    /// A wild creature of the given type and body.
    pub fn creature(id: MobileId, kind: &str, body: BodyKind) -> Self {
        Self {
            id,
            name: kind.to_owned(),
            body,
            creature: Some(CreatureTraits {
                kind: kind.to_owned(),
                ..CreatureTraits::default()
            }),
            ..Self::default()
        }
    }

    /// Whether this mobile is an autonomous creature.
    pub const fn is_creature(&self) -> bool {
        !self.player && self.creature.is_some()
    }

    /// The controlling player of a pet or the caster of a summon.
    pub const fn master(&self) -> Option<MobileId> {
        match self.control {
            Control::Wild => None,
            Control::Controlled { master, .. } | Control::Summoned { master } => Some(master),
        }
    }

    /// Whether this is a controlled pet.
    pub const fn is_controlled(&self) -> bool {
        matches!(self.control, Control::Controlled { .. })
    }

    /// Whether this is a summoned creature.
    pub const fn is_summoned(&self) -> bool {
        matches!(self.control, Control::Summoned { .. })
    }

    /// Whether this is a creature that nobody controls.
    pub const fn is_wild_creature(&self) -> bool {
        self.is_creature() && matches!(self.control, Control::Wild)
    }

    /// The mobile whose registrations and memberships speak for this one:
    /// the master for pets and summons, itself otherwise.
    pub fn effective_owner(&self) -> MobileId {
        self.master().unwrap_or(self.id)
    }

    /// Whether the mobile counts as a murderer at the given kill threshold.
    pub const fn is_murderer(&self, kill_threshold: u32) -> bool {
        self.red || self.kills >= kill_threshold
    }

    /// Creature traits, or the defaults for players.
    pub fn traits(&self) -> &CreatureTraits {
        static PLAYER: CreatureTraits = CreatureTraits {
            kind: String::new(),
            always_murderer: false,
            animated_dead: false,
            initial_innocent: false,
            familiar: false,
            golem: false,
            livestock: false,
            iob_follower: false,
            notoriety_override: None,
        };
        self.creature.as_ref().unwrap_or(&PLAYER)
    }
}

// ---------------------------------------------------------------------------
// Guilds, houses, regions
// ---------------------------------------------------------------------------

/// A player guild and its diplomatic relationships.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Guild {
    /// Serial.
    pub id: GuildId,
    /// Guild name.
    #[serde(default)]
    pub name: String,
    /// Guild kind.
    #[serde(default)]
    pub kind: GuildType,
    /// Opted out of guild warfare.
    #[serde(default)]
    pub peaceful: bool,
    /// Allied guilds.
    #[serde(default)]
    pub allies: BTreeSet<GuildId>,
    /// Guilds at war with this one.
    #[serde(default)]
    pub enemies: BTreeSet<GuildId>,
}

impl Guild {
    /// A regular, non-peaceful guild with no relationships.
    pub fn new(id: GuildId, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Whether `other` is allied with this guild.
    pub fn is_ally(&self, other: GuildId) -> bool {
        self.allies.contains(&other)
    }

    /// Whether `other` is at war with this guild.
    pub fn is_enemy(&self, other: GuildId) -> bool {
        self.enemies.contains(&other)
    }
}

/// A player house.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct House {
    /// Serial.
    pub id: HouseId,
    /// Position of the house sign.
    pub location: Point3D,
    /// Facet the house stands on.
    #[serde(default)]
    pub facet: Facet,
    /// Public houses never grant the friend flag.
    #[serde(default)]
    pub public: bool,
    /// Owner.
    pub owner: MobileId,
    /// Co-owners.
    #[serde(default)]
    pub co_owners: BTreeSet<MobileId>,
    /// Friends.
    #[serde(default)]
    pub friends: BTreeSet<MobileId>,
}

impl House {
    /// Whether the mobile is the owner, a co-owner or a friend.
    pub fn is_friend(&self, mobile: MobileId) -> bool {
        self.owner == mobile || self.co_owners.contains(&mobile) || self.friends.contains(&mobile)
    }
}

/// A world region with rule flags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    /// Identifier.
    pub id: RegionId,
    /// Name, used in logs only.
    #[serde(default)]
    pub name: String,
    /// Facet.
    #[serde(default)]
    pub facet: Facet,
    /// Area covered.
    pub bounds: Rect2D,
    /// Safe zone: no beneficial or harmful actions involving anyone inside.
    #[serde(default)]
    pub safe_zone: bool,
    /// IOB alignment rules apply here.
    #[serde(default)]
    pub iob_zone: bool,
    /// Stronghold of an alignment.
    #[serde(default)]
    pub stronghold: Option<AlignmentId>,
}

impl Region {
    /// Whether the point on the facet lies inside the region.
    pub fn contains(&self, point: Point3D, facet: Facet) -> bool {
        self.facet == facet && self.bounds.contains(point)
    }
}

/// Per-facet action restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapRules {
    /// Beneficial actions are gated by guild and control rules.
    #[serde(default)]
    pub beneficial_restrictions: bool,
    /// Harmful actions are gated by guild, control and notoriety rules.
    #[serde(default)]
    pub harmful_restrictions: bool,
}

impl MapRules {
    /// No restrictions.
    pub const UNRESTRICTED: Self = Self {
        beneficial_restrictions: false,
        harmful_restrictions: false,
    };

    /// Both restrictions.
    pub const RESTRICTED: Self = Self {
        beneficial_restrictions: true,
        harmful_restrictions: true,
    };

    /// The stock rules for a facet.
    pub const fn for_facet(facet: Facet) -> Self {
        match facet {
            Facet::Felucca => Self::UNRESTRICTED,
            Facet::Trammel | Facet::Ilshenar | Facet::Malas | Facet::Tokuno | Facet::Internal => {
                Self::RESTRICTED
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Duels
// ---------------------------------------------------------------------------

/// One side of a duel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DuelTeam {
    /// Participants on this side.
    pub members: Vec<MobileId>,
    /// Participants already knocked out.
    #[serde(default)]
    pub eliminated: BTreeSet<MobileId>,
}

/// Tournament metadata attached to a duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TournamentRules {
    /// Teams may not help each other.
    #[serde(default)]
    pub restrict_notoriety: bool,
}

/// A structured, consensual PvP session.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DuelContext {
    /// Identifier.
    pub id: DuelId,
    /// The duel has begun.
    #[serde(default)]
    pub started: bool,
    /// The duel has ended.
    #[serde(default)]
    pub finished: bool,
    /// The duel ended in a tie.
    #[serde(default)]
    pub tied: bool,
    /// Participants are in the ready countdown.
    #[serde(default)]
    pub ready_countdown: bool,
    /// Sides.
    #[serde(default)]
    pub teams: Vec<DuelTeam>,
    /// Tournament metadata.
    #[serde(default)]
    pub tournament: Option<TournamentRules>,
}

impl DuelContext {
    /// Started and not yet finished.
    pub const fn is_active(&self) -> bool {
        self.started && !self.finished
    }

    /// Index of the side the mobile fights on.
    pub fn team_of(&self, mobile: MobileId) -> Option<usize> {
        self.teams.iter().position(|t| t.members.contains(&mobile))
    }

    /// Whether both mobiles fight on the same side.
    pub fn is_ally(&self, a: MobileId, b: MobileId) -> bool {
        match (self.team_of(a), self.team_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Whether the mobile has been knocked out.
    pub fn is_eliminated(&self, mobile: MobileId) -> bool {
        self.teams.iter().any(|t| t.eliminated.contains(&mobile))
    }

    /// Whether the duel forbids helping across teams.
    pub fn restricts_notoriety(&self) -> bool {
        self.tournament.is_some_and(|t| t.restrict_notoriety)
    }
}

// ---------------------------------------------------------------------------
// Corpses
// ---------------------------------------------------------------------------

/// A corpse and the owner context recorded at the moment of death.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpse {
    /// Serial.
    pub id: CorpseId,
    /// The mobile that died.
    pub owner: MobileId,
    /// Whether the owner was a player character.
    #[serde(default)]
    pub owner_player: bool,
    /// Body the owner had.
    #[serde(default)]
    pub body: BodyKind,
    /// Owner's guild at death.
    #[serde(default)]
    pub guild: Option<GuildId>,
    /// Owner's murder count at death.
    #[serde(default)]
    pub kills: u32,
    /// Owner was flagged criminal at death.
    #[serde(default)]
    pub criminal: bool,
    /// Where the corpse lies.
    #[serde(default)]
    pub location: Point3D,
    /// Facet the corpse lies on.
    #[serde(default)]
    pub facet: Facet,
    /// Time of death.
    pub time_of_death: DateTime<Utc>,
    /// Mobiles that fought the owner before it died.
    #[serde(default)]
    pub aggressors: Vec<MobileId>,
}
