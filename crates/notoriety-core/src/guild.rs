//! Guild relationship queries shared by the resolver, the gates and the
//! corpse variant.

use notoriety_types::{Guild, GuildStatus, GuildType, Mobile, Notoriety};
use notoriety_world::WorldView;

use crate::config::GuildConfig;

/// The guild that speaks for a mobile.
///
/// Pets and summons without a guild of their own use their master's.
pub fn guild_for<'w>(world: &'w dyn WorldView, mobile: &Mobile) -> Option<&'w Guild> {
    let id = mobile
        .guild
        .or_else(|| world.master_of(mobile).and_then(|m| m.guild))?;
    world.guild(id)
}

/// Whether two guilds are the same guild or allied.
pub fn is_same_or_allied(a: &Guild, b: &Guild) -> bool {
    a.id == b.id || a.is_ally(b.id)
}

/// Whether two guilds have any relationship at all: same, allied or at war.
pub fn is_related(a: &Guild, b: &Guild) -> bool {
    is_same_or_allied(a, b) || a.is_enemy(b.id)
}

/// Notoriety implied by two guilds, ignoring pairs where either is peaceful.
pub fn guild_notoriety(source: Option<&Guild>, target: Option<&Guild>) -> Option<Notoriety> {
    let (source, target) = (source?, target?);
    if source.peaceful || target.peaceful {
        return None;
    }
    if is_same_or_allied(source, target) {
        Some(Notoriety::Ally)
    } else if source.is_enemy(target.id) {
        Some(Notoriety::Enemy)
    } else {
        None
    }
}

/// Derived war status of a guild.
///
/// With `legacy_always_warring` set, any guild reports `Warring`, which makes
/// beneficial actions between guilded players on restricted facets depend
/// solely on guild membership.
pub fn guild_status(config: &GuildConfig, guild: Option<&Guild>) -> GuildStatus {
    let Some(guild) = guild else {
        return GuildStatus::None;
    };
    if config.legacy_always_warring {
        return GuildStatus::Warring;
    }
    if guild.peaceful {
        GuildStatus::Peaceful
    } else if !guild.enemies.is_empty() || guild.kind != GuildType::Regular {
        GuildStatus::Warring
    } else {
        GuildStatus::Peaceful
    }
}

/// Beneficial actions are refused when either side is at war.
pub const fn check_beneficial_status(from: GuildStatus, target: GuildStatus) -> bool {
    !matches!(from, GuildStatus::Warring) && !matches!(target, GuildStatus::Warring)
}

#[cfg(test)]
mod tests {
    use notoriety_types::GuildId;

    use super::*;

    fn guild(id: u32) -> Guild {
        Guild::new(GuildId::new(id), "g")
    }

    #[test]
    fn same_guild_is_ally() {
        let a = guild(1);
        assert_eq!(guild_notoriety(Some(&a), Some(&a)), Some(Notoriety::Ally));
    }

    #[test]
    fn peaceful_guild_suppresses_relationships() {
        let mut a = guild(1);
        let b = guild(2);
        a.enemies.insert(b.id);
        assert_eq!(guild_notoriety(Some(&a), Some(&b)), Some(Notoriety::Enemy));
        a.peaceful = true;
        assert_eq!(guild_notoriety(Some(&a), Some(&b)), None);
    }

    #[test]
    fn unrelated_or_missing_guilds_have_no_opinion() {
        let a = guild(1);
        let b = guild(2);
        assert_eq!(guild_notoriety(Some(&a), Some(&b)), None);
        assert_eq!(guild_notoriety(Some(&a), None), None);
        assert!(!is_related(&a, &b));
    }

    #[test]
    fn legacy_status_is_always_warring() {
        let mut a = guild(1);
        a.peaceful = true;
        let legacy = GuildConfig {
            legacy_always_warring: true,
        };
        assert_eq!(guild_status(&legacy, Some(&a)), GuildStatus::Warring);
        assert_eq!(guild_status(&legacy, None), GuildStatus::None);
    }

    #[test]
    fn corrected_status_reads_flags() {
        let corrected = GuildConfig {
            legacy_always_warring: false,
        };
        let mut a = guild(1);
        assert_eq!(guild_status(&corrected, Some(&a)), GuildStatus::Peaceful);
        a.kind = GuildType::Chaos;
        assert_eq!(guild_status(&corrected, Some(&a)), GuildStatus::Warring);
        a.peaceful = true;
        assert_eq!(guild_status(&corrected, Some(&a)), GuildStatus::Peaceful);
    }

    #[test]
    fn beneficial_status_refuses_war() {
        assert!(check_beneficial_status(GuildStatus::None, GuildStatus::Peaceful));
        assert!(!check_beneficial_status(GuildStatus::Warring, GuildStatus::None));
        assert!(!check_beneficial_status(GuildStatus::None, GuildStatus::Warring));
    }
}
