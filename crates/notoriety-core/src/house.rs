//! House friend flag.
//!
//! Inside a private house, the owner and friends may attack anyone who is
//! not themselves a friend of the house.

use notoriety_types::{Facet, Mobile, NpcRole, Point3D};
use notoriety_world::WorldView;

/// Whether `from` may treat `target` as an intruder in the house near
/// `location`.
///
/// `target` is `None` when checking a corpse whose owner no longer exists;
/// such a corpse is fair game for a house friend.
pub fn check_house_flag(
    world: &dyn WorldView,
    from: &Mobile,
    target: Option<&Mobile>,
    location: Point3D,
    facet: Facet,
    radius: u32,
) -> bool {
    let Some(house) = world.house_at(location, facet, radius) else {
        return false;
    };
    if house.public || !house.is_friend(from.id) {
        return false;
    }
    let Some(target) = target else {
        return true;
    };
    if target.role == NpcRole::PlayerVendor || house.is_friend(target.id) {
        return false;
    }
    if target.is_controlled()
        && let Some(master) = target.master()
    {
        return !house.is_friend(master);
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{DateTime, Utc};
    use notoriety_types::{BodyKind, Control, ControlOrder, House, HouseId, MobileId};
    use notoriety_world::WorldMap;

    use super::*;

    fn world() -> WorldMap {
        let mut world = WorldMap::new(DateTime::<Utc>::UNIX_EPOCH);
        world
            .add_house(House {
                id: HouseId::new(1),
                location: Point3D::new(100, 100, 0),
                owner: MobileId::new(1),
                friends: BTreeSet::from([MobileId::new(2)]),
                ..House::default()
            })
            .unwrap();
        world
    }

    fn at_house(id: u32) -> Mobile {
        let mut m = Mobile::player(MobileId::new(id), "m");
        m.location = Point3D::new(101, 99, 0);
        m
    }

    fn check(world: &WorldMap, from: &Mobile, target: Option<&Mobile>) -> bool {
        check_house_flag(world, from, target, Point3D::new(101, 99, 0), Facet::Felucca, 16)
    }

    #[test]
    fn owner_may_attack_intruder() {
        let world = world();
        assert!(check(&world, &at_house(1), Some(&at_house(9))));
    }

    #[test]
    fn friends_are_protected_and_strangers_have_no_flag() {
        let world = world();
        assert!(!check(&world, &at_house(1), Some(&at_house(2))));
        assert!(!check(&world, &at_house(9), Some(&at_house(2))));
    }

    #[test]
    fn vendors_are_protected() {
        let world = world();
        let mut vendor = at_house(9);
        vendor.role = NpcRole::PlayerVendor;
        assert!(!check(&world, &at_house(1), Some(&vendor)));
    }

    #[test]
    fn pets_follow_their_master() {
        let world = world();
        let mut pet = Mobile::creature(MobileId::new(5), "dog", BodyKind::Animal);
        pet.control = Control::Controlled {
            master: MobileId::new(2),
            order: ControlOrder::Follow,
            order_target: None,
        };
        assert!(!check(&world, &at_house(1), Some(&pet)));
        pet.control = Control::Controlled {
            master: MobileId::new(9),
            order: ControlOrder::Follow,
            order_target: None,
        };
        assert!(check(&world, &at_house(1), Some(&pet)));
    }

    #[test]
    fn missing_owner_is_fair_game() {
        let world = world();
        assert!(check(&world, &at_house(1), None));
    }

    #[test]
    fn public_house_grants_nothing() {
        let mut world = WorldMap::new(DateTime::<Utc>::UNIX_EPOCH);
        world
            .add_house(House {
                id: HouseId::new(2),
                location: Point3D::new(100, 100, 0),
                owner: MobileId::new(1),
                public: true,
                ..House::default()
            })
            .unwrap();
        assert!(!check(&world, &at_house(1), Some(&at_house(9))));
    }
}
