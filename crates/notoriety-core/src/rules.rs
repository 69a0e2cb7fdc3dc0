//! The ordered notoriety rule chain.
//!
//! Each [`Rule`] inspects the pair and either claims it with a notoriety or
//! passes. [`MOBILE_RULES`] is evaluated top to bottom and the first claim
//! wins; a pair no rule claims is [`Notoriety::Innocent`]. Order is the whole
//! contract here: a guild ally who is also a faction enemy is an ally because
//! the guild rule comes first.

use notoriety_types::{Allegiance, Control, ControlOrder, Ethic, Mobile, Notoriety};
use notoriety_world::WorldView;

use crate::allegiance::{
    AlignmentSystem, AllegianceProvider, EthicsSystem, FactionSystem, IobSystem,
};
use crate::config::NotorietyConfig;
use crate::{duel, guild, house};

/// Everything a rule may consult.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    /// World state.
    pub world: &'a dyn WorldView,
    /// Policy switches.
    pub config: &'a NotorietyConfig,
    /// The observer.
    pub source: &'a Mobile,
    /// The observed.
    pub target: &'a Mobile,
}

/// A named step of the chain.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Stable name reported by [`Resolver::explain`](crate::Resolver::explain).
    pub name: &'static str,
    /// Returns `Some` to claim the pair.
    pub eval: fn(&RuleContext<'_>) -> Option<Notoriety>,
}

/// Name reported when no rule claims the pair.
pub const FALLBACK: &str = "fallback";

/// The mobile-to-mobile chain, highest priority first.
pub const MOBILE_RULES: [Rule; 18] = [
    Rule {
        name: "creature_override",
        eval: creature_override,
    },
    Rule {
        name: "invulnerable",
        eval: invulnerable,
    },
    Rule {
        name: "duel",
        eval: duel_teams,
    },
    Rule {
        name: "enemy_of_one",
        eval: enemy_of_one,
    },
    Rule {
        name: "ethics",
        eval: ethics,
    },
    Rule {
        name: "murderer",
        eval: murderer,
    },
    Rule {
        name: "criminal",
        eval: criminal,
    },
    Rule {
        name: "alignment_traitor",
        eval: alignment_traitor,
    },
    Rule {
        name: "guild",
        eval: guild_relation,
    },
    Rule {
        name: "fight_broker",
        eval: fight_broker,
    },
    Rule {
        name: "iob",
        eval: iob,
    },
    Rule {
        name: "faction",
        eval: faction,
    },
    Rule {
        name: "alignment",
        eval: alignment,
    },
    Rule {
        name: "perma_flag",
        eval: perma_flag,
    },
    Rule {
        name: "always_attackable",
        eval: always_attackable,
    },
    Rule {
        name: "house",
        eval: house_friend,
    },
    Rule {
        name: "default_creature",
        eval: default_creature,
    },
    Rule {
        name: "aggression",
        eval: aggression,
    },
];

/// A creature's scripted notoriety.
///
/// A creature observer always sees its own override. A player observer also
/// sees the override of a creature target; a creature observing a creature
/// does not.
fn creature_override(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    if ctx.source.is_creature()
        && let Some(n) = ctx.source.traits().notoriety_override
    {
        return Some(n);
    }
    if ctx.source.player && ctx.target.is_creature() {
        return ctx.target.traits().notoriety_override;
    }
    None
}

fn invulnerable(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    (ctx.target.blessed || ctx.target.role.is_invulnerable()).then_some(Notoriety::Invulnerable)
}

fn duel_teams(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    let session = duel::shared_duel(ctx.world, ctx.source, ctx.target)?;
    Some(if session.is_ally(ctx.source.id, ctx.target.id) {
        Notoriety::Ally
    } else {
        Notoriety::Enemy
    })
}

fn enemy_of_one(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    let designated = ctx.source.enemy_of_one.as_deref()?;
    let hit = ctx.source.player
        && ctx.target.is_wild_creature()
        && ctx.target.traits().kind.eq_ignore_ascii_case(designated);
    hit.then_some(Notoriety::Enemy)
}

fn ethics(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    if !ctx.config.ethics.enabled {
        return None;
    }
    if EthicsSystem.relation(ctx.world, ctx.source, ctx.target) == Allegiance::Enemy {
        return Some(Notoriety::Enemy);
    }
    let source_ethic = EthicsSystem::ethic_of(ctx.source);
    let fallen = ctx.target.fallen_hero && source_ethic == Some(Ethic::Hero);
    let evil = ctx.target.evil_noto && source_ethic.is_some();
    (fallen || evil).then_some(Notoriety::CanBeAttacked)
}

/// Whether the mobile shows as a murderer: by kills, by flag, or by being a
/// conjured monster other than a familiar or golem.
pub fn is_murderous(mobile: &Mobile, kill_threshold: u32) -> bool {
    let traits = mobile.traits();
    mobile.is_murderer(kill_threshold)
        || (mobile.body.is_monster() && mobile.is_summoned() && !traits.familiar && !traits.golem)
        || traits.always_murderer
        || traits.animated_dead
}

fn murderer(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    is_murderous(ctx.target, ctx.config.murderer.kill_threshold).then_some(Notoriety::Murderer)
}

fn criminal(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    ctx.target.criminal.then_some(Notoriety::Criminal)
}

fn alignment_traitor(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    (AlignmentSystem.allegiance(ctx.config, ctx.world, ctx.source, ctx.target)
        == Allegiance::Traitor)
        .then_some(Notoriety::Enemy)
}

fn guild_relation(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    guild::guild_notoriety(
        guild::guild_for(ctx.world, ctx.source),
        guild::guild_for(ctx.world, ctx.target),
    )
}

fn fight_broker(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    let source = ctx.source.effective_owner();
    let target = ctx.target.effective_owner();
    if source == target || !ctx.world.is_fight_registered(source) {
        return None;
    }
    if ctx.world.is_fight_registered(target) {
        Some(Notoriety::Enemy)
    } else if ctx.world.is_healer_interferer(target) {
        Some(Notoriety::CanBeAttacked)
    } else {
        None
    }
}

fn iob(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    if !IobSystem::in_force(ctx.config, ctx.world, ctx.source) {
        return None;
    }
    match IobSystem.relation(ctx.world, ctx.source, ctx.target) {
        Allegiance::Enemy if IobSystem::involves_healer(ctx.source, ctx.target) => {
            return Some(Notoriety::CanBeAttacked);
        }
        Allegiance::Enemy => return Some(Notoriety::Enemy),
        Allegiance::Ally if ctx.source.player && ctx.target.is_creature() => {
            return Some(Notoriety::Ally);
        }
        Allegiance::Ally | Allegiance::None | Allegiance::Traitor => {}
    }
    ctx.target
        .traits()
        .iob_follower
        .then_some(Notoriety::CanBeAttacked)
}

fn faction(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    let hostile = FactionSystem.allegiance(ctx.config, ctx.world, ctx.source, ctx.target)
        == Allegiance::Enemy;
    (hostile && ctx.source.facet == ctx.config.factions.facet).then_some(Notoriety::Enemy)
}

fn alignment(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    match AlignmentSystem.allegiance(ctx.config, ctx.world, ctx.source, ctx.target) {
        Allegiance::Ally => Some(Notoriety::Ally),
        Allegiance::Enemy
            if ctx.config.alignment.enemies_attackable_anywhere
                || AlignmentSystem::in_stronghold(ctx.world, ctx.source)
                || AlignmentSystem::in_stronghold(ctx.world, ctx.target) =>
        {
            Some(Notoriety::Enemy)
        }
        Allegiance::Enemy | Allegiance::None | Allegiance::Traitor => None,
    }
}

fn perma_flag(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    (ctx.config.stealing.classic_mode
        && ctx.target.player
        && ctx.target.perma_flags.contains(&ctx.source.id))
    .then_some(Notoriety::CanBeAttacked)
}

fn always_attackable(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    ctx.target
        .always_attackable
        .then_some(Notoriety::CanBeAttacked)
}

fn house_friend(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    house::check_house_flag(
        ctx.world,
        ctx.source,
        Some(ctx.target),
        ctx.target.location,
        ctx.target.facet,
        ctx.config.house.search_radius,
    )
    .then_some(Notoriety::CanBeAttacked)
}

fn default_creature(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    let target = ctx.target;
    let traits = target.traits();
    let attackable = !traits.initial_innocent
        && !target.body.is_human()
        && !target.body.is_ghost()
        && !target.is_controlled()
        && !traits.livestock
        && !target.transformed;
    attackable.then_some(Notoriety::CanBeAttacked)
}

fn aggression(ctx: &RuleContext<'_>) -> Option<Notoriety> {
    let (source, target) = (ctx.source, ctx.target);

    let attacked_source = source.aggressors.iter().any(|e| e.mobile == target.id)
        || target.aggressed.iter().any(|e| e.mobile == source.id);
    let lawfully_attacked = source
        .aggressed
        .iter()
        .any(|e| e.mobile == target.id && !e.criminal)
        || target
            .aggressors
            .iter()
            .any(|e| e.mobile == source.id && !e.criminal);
    let guarding_against_source = matches!(
        target.control,
        Control::Controlled {
            order: ControlOrder::Guard,
            order_target: Some(t),
            ..
        } if t == source.id
    );
    let attacked_master = ctx
        .world
        .master_of(source)
        .is_some_and(|m| m.aggressors.iter().any(|e| e.mobile == target.id));

    (attacked_source || lawfully_attacked || guarding_against_source || attacked_master)
        .then_some(Notoriety::CanBeAttacked)
}
