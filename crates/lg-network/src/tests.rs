//! Unit tests for lg-network.
//!
//! All tests use a hand-built network.

#[cfg(test)]
mod helpers {
    use lg_core::{Direction, GtuTypeId, LinkId, NodeId};
    use crate::{GtuTypes, LaneNetwork, LaneNetworkBuilder};

    pub struct Types {
        pub vehicle: GtuTypeId,
        pub car:     GtuTypeId,
        pub truck:   GtuTypeId,
    }

    pub fn types() -> (GtuTypes, Types) {
        let mut t = GtuTypes::new();
        let vehicle = t.add("VEHICLE", None).unwrap();
        let car = t.add("CAR", Some(vehicle)).unwrap();
        let truck = t.add("TRUCK", Some(vehicle)).unwrap();
        (t, Types { vehicle, car, truck })
    }

    /// A ─(3 lanes, 400 m)→ B ─(2 lanes, 300 m)→ C
    ///
    /// Lane 3 of the first link is car-only.  Trucks are limited to 22.2 m/s
    /// on lane 1 of the first link.
    pub fn motorway() -> (LaneNetwork, Types, [NodeId; 3], [LinkId; 2]) {
        let (gtu_types, ty) = types();
        let mut b = LaneNetworkBuilder::new(gtu_types);
        let a = b.add_node("A");
        let m = b.add_node("B");
        let c = b.add_node("C");
        let l0 = b.add_link(a, m, 3, 400.0);
        let l1 = b.add_link(m, c, 2, 300.0);
        b.set_speed_limit(l0, 33.3);
        b.set_speed_limit(l1, 27.8);
        b.set_type_speed_limit(b.lane(l0, 1).unwrap(), ty.truck, 22.2);
        b.restrict_lane(b.lane(l0, 3).unwrap(), &[ty.car]);
        b.connect_links(l0, l1, Direction::Plus);
        (b.build().unwrap(), ty, [a, m, c], [l0, l1])
    }
}

// ── GTU types ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod gtu_types {
    use super::helpers::types;
    use crate::{GtuTypes, NetworkError};
    use lg_core::GtuTypeId;

    #[test]
    fn ancestors_start_with_self() {
        let (t, ty) = types();
        let chain: Vec<_> = t.ancestors(ty.car).collect();
        assert_eq!(chain, vec![ty.car, ty.vehicle]);
        assert!(t.is_of(ty.truck, ty.vehicle));
        assert!(!t.is_of(ty.vehicle, ty.truck));
        assert!(!t.is_of(ty.car, ty.truck));
    }

    #[test]
    fn unknown_parent_rejected() {
        let mut t = GtuTypes::new();
        assert!(matches!(t.add("X", Some(GtuTypeId(3))), Err(NetworkError::UnknownGtuType(_))));
    }

    #[test]
    fn duplicate_name_rejected() {
        let (mut t, _) = types();
        assert!(matches!(t.add("CAR", None), Err(NetworkError::DuplicateGtuType(_))));
        assert_eq!(t.by_name("TRUCK").map(|id| id.0), Some(2));
    }
}

// ── Network structure ─────────────────────────────────────────────────────────

#[cfg(test)]
mod structure {
    use super::helpers::motorway;
    use lg_core::{Direction, LaneId};
    use crate::{LaneTopology, NetworkError};

    #[test]
    fn lanes_numbered_from_right() {
        let (net, _, _, [l0, l1]) = motorway();
        assert_eq!(net.lane_count(), 5);
        assert_eq!(net.link_lanes(l0).collect::<Vec<_>>(), vec![LaneId(0), LaneId(1), LaneId(2)]);
        assert_eq!(net.lane(l1, 2).unwrap(), LaneId(4));
        assert_eq!(net.lane_number(LaneId(4)), 2);
        assert!(matches!(net.lane(l1, 3), Err(NetworkError::LaneNumberOutOfRange { .. })));
    }

    #[test]
    fn successors_by_lane_number() {
        let (net, ty, _, _) = motorway();
        assert_eq!(net.successors(LaneId(0), Direction::Plus), &[(LaneId(3), Direction::Plus)]);
        assert_eq!(net.successors(LaneId(1), Direction::Plus), &[(LaneId(4), Direction::Plus)]);
        // Lane 3 drops at the end of the first link.
        assert!(net.successors(LaneId(2), Direction::Plus).is_empty());
        assert!(net.successors(LaneId(0), Direction::Minus).is_empty());
        assert_eq!(net.downstream(LaneId(0), Direction::Plus, ty.truck).len(), 1);
    }

    #[test]
    fn repeated_connection_listed_once() {
        let (gtu_types, _) = super::helpers::types();
        let mut b = crate::LaneNetworkBuilder::new(gtu_types);
        let a = b.add_node("A");
        let m = b.add_node("B");
        let l0 = b.add_link(a, m, 1, 100.0);
        let l1 = b.add_link(m, a, 2, 100.0);
        let (from, left, right) = (b.lane(l0, 1).unwrap(), b.lane(l1, 2).unwrap(), b.lane(l1, 1).unwrap());
        b.connect(from, Direction::Plus, left, Direction::Plus);
        b.connect(from, Direction::Plus, right, Direction::Plus);
        b.connect(from, Direction::Plus, left, Direction::Plus);
        let net = b.build().unwrap();
        assert_eq!(
            net.successors(from, Direction::Plus),
            &[(left, Direction::Plus), (right, Direction::Plus)]
        );
    }

    #[test]
    fn speed_limit_resolves_through_hierarchy() {
        let (net, ty, _, _) = motorway();
        assert_eq!(net.speed_limit(LaneId(0), ty.truck), Some(22.2));
        assert_eq!(net.speed_limit(LaneId(0), ty.car), Some(33.3));
        assert_eq!(net.speed_limit(LaneId(3), ty.truck), Some(27.8));
    }

    #[test]
    fn restricted_lane_admits_descendants_only() {
        let (net, ty, _, _) = motorway();
        assert!(net.accessible(LaneId(2), ty.car));
        assert!(!net.accessible(LaneId(2), ty.truck));
        assert!(!net.accessible(LaneId(2), ty.vehicle));
        assert!(net.accessible(LaneId(1), ty.truck));
    }

    #[test]
    fn link_nodes_follow_design_line() {
        let (net, _, [a, b, _], [l0, _]) = motorway();
        assert_eq!(net.link_nodes(l0), (a, b));
        assert_eq!(net.link_of(LaneId(1)), l0);
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use super::helpers::motorway;
    use lg_core::{Direction, GtuId, LaneId};
    use crate::{GtuOnLane, NetworkError};

    fn gtu(id: u32, front: f64) -> GtuOnLane {
        GtuOnLane {
            id:        GtuId(id),
            gtu_type:  lg_core::GtuTypeId(1),
            front,
            length:    4.0,
            speed:     20.0,
            direction: Direction::Plus,
        }
    }

    #[test]
    fn kept_sorted_by_front() {
        let (mut net, _, _, _) = motorway();
        net.insert_gtu(LaneId(0), gtu(1, 200.0)).unwrap();
        net.insert_gtu(LaneId(0), gtu(2, 50.0)).unwrap();
        net.insert_gtu(LaneId(0), gtu(3, 120.0)).unwrap();
        let fronts: Vec<f64> = net.gtus_on(LaneId(0)).iter().map(|g| g.front).collect();
        assert_eq!(fronts, vec![50.0, 120.0, 200.0]);
        assert_eq!(net.gtu_count(), 3);
    }

    #[test]
    fn remove_and_update() {
        let (mut net, _, _, _) = motorway();
        net.insert_gtu(LaneId(0), gtu(1, 390.0)).unwrap();
        net.update_gtu(GtuId(1), LaneId(3), 5.0, 21.0).unwrap();
        assert!(net.gtus_on(LaneId(0)).is_empty());
        assert_eq!(net.lane_of(GtuId(1)), Some(LaneId(3)));
        let g = net.remove_gtu(GtuId(1)).unwrap();
        assert_eq!(g.speed, 21.0);
        assert!(matches!(net.remove_gtu(GtuId(1)), Err(NetworkError::GtuNotFound(_))));
    }

    #[test]
    fn rejects_bad_inserts() {
        let (mut net, _, _, _) = motorway();
        assert!(matches!(
            net.insert_gtu(LaneId(0), gtu(1, 401.0)),
            Err(NetworkError::OffsetOutOfRange { .. })
        ));
        net.insert_gtu(LaneId(0), gtu(1, 10.0)).unwrap();
        assert!(matches!(net.insert_gtu(LaneId(1), gtu(1, 10.0)), Err(NetworkError::DuplicateGtu(_))));
    }

    #[test]
    fn fresh_ids_skip_inserted() {
        let (mut net, _, _, _) = motorway();
        net.insert_gtu(LaneId(0), gtu(4, 10.0)).unwrap();
        assert_eq!(net.next_gtu_id(), GtuId(5));
        assert_eq!(net.next_gtu_id(), GtuId(6));
    }

    #[test]
    fn minus_direction_travel_coordinates() {
        let g = GtuOnLane { direction: Direction::Minus, ..gtu(1, 100.0) };
        assert_eq!(g.front_travelled(400.0), 300.0);
        assert_eq!(g.rear_travelled(400.0), 296.0);
    }
}

// ── Routes ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use lg_core::NodeId;
    use crate::Route;

    #[test]
    fn hop_requires_adjacent_indices_in_order() {
        let r = Route::new(vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert!(r.follows_hop(NodeId(0), NodeId(1)));
        assert!(!r.follows_hop(NodeId(1), NodeId(0)));
        assert!(!r.follows_hop(NodeId(0), NodeId(2)));
        assert!(!r.follows_hop(NodeId(0), NodeId(9)));
        assert_eq!(r.index_of(NodeId(2)), Some(2));
        assert_eq!(r.destination(), Some(NodeId(2)));
    }
}
