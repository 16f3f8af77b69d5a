//! Synthetic three-lane motorway: `A → M → Z`, two 1 km links.

use lg_core::{Direction, GtuTypeId, LinkId};
use lg_network::{GtuTypes, LaneNetwork, LaneNetworkBuilder, NetworkResult};

pub const LANES:       usize = 3;
pub const LINK_LENGTH: f64   = 1_000.0;
pub const SPEED_LIMIT: f64   = 33.3; // 120 km/h
pub const TRUCK_LIMIT: f64   = 22.2; // 80 km/h

pub struct Types {
    pub car:   GtuTypeId,
    pub truck: GtuTypeId,
}

pub fn build_network() -> NetworkResult<(LaneNetwork, Types, LinkId)> {
    let mut types = GtuTypes::new();
    let vehicle = types.add("VEHICLE", None)?;
    let car = types.add("CAR", Some(vehicle))?;
    let truck = types.add("TRUCK", Some(vehicle))?;

    let mut b = LaneNetworkBuilder::new(types);
    let a = b.add_node("A");
    let m = b.add_node("M");
    let z = b.add_node("Z");
    let entry = b.add_link(a, m, LANES, LINK_LENGTH);
    let exit = b.add_link(m, z, LANES, LINK_LENGTH);
    for link in [entry, exit] {
        b.set_speed_limit(link, SPEED_LIMIT);
        for n in 1..=LANES {
            let lane = b.lane(link, n)?;
            b.set_type_speed_limit(lane, truck, TRUCK_LIMIT);
        }
    }
    // Trucks may not use the left lane.
    for link in [entry, exit] {
        let left = b.lane(link, LANES)?;
        b.restrict_lane(left, &[car]);
    }
    b.connect_links(entry, exit, Direction::Plus);
    Ok((b.build()?, Types { car, truck }, entry))
}
