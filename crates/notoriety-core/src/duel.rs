//! Duel session predicates.
//!
//! Players in the same running duel see each other by team, and a duel
//! isolates its participants from everyone outside it.

use notoriety_types::{DuelContext, Mobile};
use notoriety_world::WorldView;

/// The running duel both players take part in.
pub fn shared_duel<'w>(
    world: &'w dyn WorldView,
    a: &Mobile,
    b: &Mobile,
) -> Option<&'w DuelContext> {
    if !a.player || !b.player || a.duel.is_none() || a.duel != b.duel {
        return None;
    }
    world.active_duel(a).filter(|ctx| ctx.is_active())
}

/// Why a duel blocks an interaction between two mobiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelBlock {
    /// Only one side is in a running duel, or they are in different ones.
    Isolated,
    /// A participant is counting down, tied or knocked out.
    Inactive,
    /// Tournament rules forbid helping the other team.
    TournamentTeams,
    /// Tournament rules forbid harming a teammate.
    Teammate,
}

impl DuelBlock {
    /// Short label for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Isolated => "duel_isolated",
            Self::Inactive => "duel_inactive",
            Self::TournamentTeams => "tournament_teams",
            Self::Teammate => "tournament_teammate",
        }
    }
}

fn common_block(world: &dyn WorldView, from: &Mobile, to: &Mobile) -> Option<DuelBlock> {
    let from_duel = world.active_duel(from);
    let to_duel = world.active_duel(to);

    let running = |ctx: Option<&DuelContext>| ctx.is_some_and(DuelContext::is_active);
    if (running(from_duel) || running(to_duel)) && from.duel != to.duel {
        return Some(DuelBlock::Isolated);
    }

    for (mobile, ctx) in [(from, from_duel), (to, to_duel)] {
        if let Some(ctx) = ctx
            && !ctx.finished
            && (ctx.ready_countdown || ctx.tied || ctx.is_eliminated(mobile.id))
        {
            return Some(DuelBlock::Inactive);
        }
    }
    None
}

/// Duel restrictions on `from` helping `to`.
pub fn beneficial_block(world: &dyn WorldView, from: &Mobile, to: &Mobile) -> Option<DuelBlock> {
    if let Some(block) = common_block(world, from, to) {
        return Some(block);
    }
    match shared_duel(world, from, to) {
        Some(ctx) if ctx.restricts_notoriety() && !ctx.is_ally(from.id, to.id) => {
            Some(DuelBlock::TournamentTeams)
        }
        _ => None,
    }
}

/// Duel restrictions on `from` harming `to`.
pub fn harmful_block(world: &dyn WorldView, from: &Mobile, to: &Mobile) -> Option<DuelBlock> {
    if let Some(block) = common_block(world, from, to) {
        return Some(block);
    }
    match shared_duel(world, from, to) {
        Some(ctx) if ctx.restricts_notoriety() && from.id != to.id && ctx.is_ally(from.id, to.id) => {
            Some(DuelBlock::Teammate)
        }
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Utc};
    use notoriety_types::{DuelId, DuelTeam, MobileId, TournamentRules};
    use notoriety_world::WorldMap;

    use super::*;

    fn duelist(id: u32, duel: Option<DuelId>) -> Mobile {
        let mut m = Mobile::player(MobileId::new(id), "duelist");
        m.duel = duel;
        m
    }

    fn world_with(ctx: DuelContext) -> WorldMap {
        let mut world = WorldMap::new(DateTime::<Utc>::UNIX_EPOCH);
        world.add_duel(ctx).unwrap();
        world
    }

    fn running(tournament: bool) -> DuelContext {
        DuelContext {
            id: DuelId::new(1),
            started: true,
            teams: vec![
                DuelTeam {
                    members: vec![MobileId::new(1), MobileId::new(2)],
                    ..DuelTeam::default()
                },
                DuelTeam {
                    members: vec![MobileId::new(3)],
                    ..DuelTeam::default()
                },
            ],
            tournament: tournament.then_some(TournamentRules {
                restrict_notoriety: true,
            }),
            ..DuelContext::default()
        }
    }

    #[test]
    fn shared_duel_requires_same_running_session() {
        let world = world_with(running(false));
        let a = duelist(1, Some(DuelId::new(1)));
        let c = duelist(3, Some(DuelId::new(1)));
        let outsider = duelist(9, None);
        assert!(shared_duel(&world, &a, &c).is_some());
        assert!(shared_duel(&world, &a, &outsider).is_none());
    }

    #[test]
    fn outsiders_are_isolated() {
        let world = world_with(running(false));
        let a = duelist(1, Some(DuelId::new(1)));
        let outsider = duelist(9, None);
        assert_eq!(beneficial_block(&world, &outsider, &a), Some(DuelBlock::Isolated));
        assert_eq!(harmful_block(&world, &a, &outsider), Some(DuelBlock::Isolated));
    }

    #[test]
    fn countdown_blocks_everything() {
        let mut ctx = running(false);
        ctx.ready_countdown = true;
        let world = world_with(ctx);
        let a = duelist(1, Some(DuelId::new(1)));
        let b = duelist(2, Some(DuelId::new(1)));
        assert_eq!(beneficial_block(&world, &a, &b), Some(DuelBlock::Inactive));
    }

    #[test]
    fn tie_and_elimination_block_participants() {
        let mut world = world_with(running(false));
        let a = duelist(1, Some(DuelId::new(1)));
        let b = duelist(2, Some(DuelId::new(1)));
        let c = duelist(3, Some(DuelId::new(1)));
        assert_eq!(harmful_block(&world, &a, &c), None);

        let duel = world.duel_mut(DuelId::new(1)).unwrap();
        duel.teams
            .first_mut()
            .unwrap()
            .eliminated
            .insert(MobileId::new(1));
        assert_eq!(harmful_block(&world, &a, &c), Some(DuelBlock::Inactive));
        assert_eq!(beneficial_block(&world, &b, &a), Some(DuelBlock::Inactive));
        assert_eq!(harmful_block(&world, &c, &b), None);

        let duel = world.duel_mut(DuelId::new(1)).unwrap();
        duel.teams.first_mut().unwrap().eliminated.clear();
        duel.tied = true;
        assert_eq!(harmful_block(&world, &c, &b), Some(DuelBlock::Inactive));
        assert_eq!(beneficial_block(&world, &a, &b), Some(DuelBlock::Inactive));
    }

    #[test]
    fn tournament_teams() {
        let world = world_with(running(true));
        let a = duelist(1, Some(DuelId::new(1)));
        let b = duelist(2, Some(DuelId::new(1)));
        let c = duelist(3, Some(DuelId::new(1)));
        assert_eq!(beneficial_block(&world, &a, &b), None);
        assert_eq!(beneficial_block(&world, &a, &c), Some(DuelBlock::TournamentTeams));
        assert_eq!(harmful_block(&world, &a, &c), None);
        assert_eq!(harmful_block(&world, &a, &b), Some(DuelBlock::Teammate));
        assert_eq!(beneficial_block(&world, &a, &a), None);
    }
}
