//! Unit tests for lg-placement.
//!
//! Network used throughout:
//!
//! ```text
//!            l1: B → C, 2 lanes (lane 2 car-only)
//! A ──l0──▶ B
//!  2 lanes   l2: B → D, 1 lane
//! ```
//!
//! Lane 1 of `l0` continues onto both `l1` lane 1 and `l2`; lane 2 of `l0`
//! continues onto `l1` lane 2 only.  Every lane is 200 m at 30 m/s.

use std::sync::Arc;

use lg_behavior::FixedBehavior;
use lg_core::{Direction, GtuId, GtuTypeId, LaneId, LinkId, NodeId, SimDuration};
use lg_demand::VehicleDescriptor;
use lg_network::{GtuOnLane, GtuTypes, LaneNetwork, LaneNetworkBuilder};

use crate::{GenerationPosition, LanePosition, Leader};

// ── Helpers ───────────────────────────────────────────────────────────────────

const CAR: GtuTypeId = GtuTypeId(1);
const TRUCK: GtuTypeId = GtuTypeId(2);

struct Fixture {
    net:   LaneNetwork,
    nodes: [NodeId; 4],
    links: [LinkId; 3],
}

fn fixture() -> Fixture {
    let mut types = GtuTypes::new();
    let vehicle = types.add("VEHICLE", None).unwrap();
    types.add("CAR", Some(vehicle)).unwrap();
    types.add("TRUCK", Some(vehicle)).unwrap();

    let mut b = LaneNetworkBuilder::new(types);
    let a = b.add_node("A");
    let m = b.add_node("B");
    let c = b.add_node("C");
    let d = b.add_node("D");
    let l0 = b.add_link(a, m, 2, 200.0);
    let l1 = b.add_link(m, c, 2, 200.0);
    let l2 = b.add_link(m, d, 1, 200.0);
    for l in [l0, l1, l2] {
        b.set_speed_limit(l, 30.0);
    }
    b.restrict_lane(b.lane(l1, 2).unwrap(), &[CAR]);
    b.connect_links(l0, l1, Direction::Plus);
    b.connect(b.lane(l0, 1).unwrap(), Direction::Plus, b.lane(l2, 1).unwrap(), Direction::Plus);
    Fixture { net: b.build().unwrap(), nodes: [a, m, c, d], links: [l0, l1, l2] }
}

fn lane(f: &Fixture, link: usize, number: usize) -> LaneId {
    f.net.lane(f.links[link], number).unwrap()
}

fn pos(f: &Fixture, link: usize, number: usize, offset: f64) -> GenerationPosition {
    GenerationPosition::on_lane(lane(f, link, number), offset, Direction::Plus, &f.net)
}

fn put(f: &mut Fixture, id: u32, link: usize, number: usize, front: f64, speed: f64) {
    let l = lane(f, link, number);
    f.net
        .insert_gtu(l, GtuOnLane {
            id: GtuId(id),
            gtu_type: CAR,
            front,
            length: 4.0,
            speed,
            direction: Direction::Plus,
        })
        .unwrap();
}

fn descriptor(gtu_type: GtuTypeId, max_speed: f64) -> VehicleDescriptor {
    VehicleDescriptor {
        gtu_type,
        length:      4.0,
        width:       1.8,
        max_speed,
        behavior:    Arc::new(FixedBehavior::new(1.0, SimDuration(1.0))),
        route:       None,
        origin:      None,
        destination: None,
    }
}

fn leader(distance: f64, speed: f64) -> Leader {
    Leader::new(GtuId(99), distance, speed, 4.0)
}

// ── Bias ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bias {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::{LaneBias, LaneBiases, LateralPreference, PlacementError};

    #[test]
    fn validation() {
        let c = LateralPreference::Constant(0.5);
        assert!(matches!(LaneBias::new(c, -0.1, 1.0), Err(PlacementError::InvalidBiasStrength(_))));
        assert!(matches!(LaneBias::new(c, 1.0, 0.5), Err(PlacementError::InvalidStickyLanes(_))));
        assert!(matches!(LaneBias::new(LateralPreference::Constant(1.5), 1.0, 1.0), Err(PlacementError::InvalidPreference(_))));
        assert!(LaneBias::new(c, 0.0, f64::INFINITY).is_ok());
    }

    #[test]
    fn right_bias_against_backlog() {
        let b = LaneBias::new(LateralPreference::Constant(0.0), 2.0, f64::INFINITY).unwrap();
        assert_approx_eq!(b.weight(1, 2, 25.0, 0), 1.0);
        assert_approx_eq!(b.weight(2, 2, 25.0, 3), 1.0 / 16.0);
    }

    #[test]
    fn distance_and_backlog_ratio() {
        // Preferred lane 3 of 3: lane 1 is 2 away, lane 2 is 1 away with 3 queued.
        let b = LaneBias::new(LateralPreference::Constant(1.0), 2.0, f64::INFINITY).unwrap();
        let w1 = b.weight(1, 3, 25.0, 0);
        let w2 = b.weight(2, 3, 25.0, 3);
        assert_approx_eq!(w2 / w1, 9.0 / 16.0);
    }

    #[test]
    fn weight_decreases_to_sticky_cutoff() {
        let b = LaneBias::new(LateralPreference::Constant(0.0), 1.5, 3.0).unwrap();
        let w: Vec<f64> = (1..=5).map(|k| b.weight(k, 5, 20.0, 0)).collect();
        assert!(w[0] > w[1] && w[1] > w[2] && w[2] > 0.0);
        assert_eq!(w[3], 0.0);
        assert_eq!(w[4], 0.0);
    }

    #[test]
    fn backlog_never_zeroes_weight() {
        let b = LaneBias::STRONG_LEFT;
        assert!(b.weight(1, 4, 30.0, 10_000) > 0.0);
    }

    #[test]
    fn preference_by_speed() {
        let p = LateralPreference::BySpeed { right_speed: 20.0, left_speed: 40.0 };
        assert_eq!(p.fraction(10.0), 0.0);
        assert_eq!(p.fraction(30.0), 0.5);
        assert_eq!(p.fraction(50.0), 1.0);
    }

    #[test]
    fn parent_bias_is_inherited() {
        let f = fixture();
        let vehicle = GtuTypeId(0);
        let biases = LaneBiases::new().with(vehicle, LaneBias::TRUCK_RIGHT).with(CAR, LaneBias::WEAK_LEFT);
        assert_eq!(biases.resolve(TRUCK, &f.net.gtu_types), LaneBias::TRUCK_RIGHT);
        assert_eq!(biases.resolve(CAR, &f.net.gtu_types), LaneBias::WEAK_LEFT);
        assert_eq!(LaneBiases::new().resolve(CAR, &f.net.gtu_types), LaneBias::NONE);
    }
}

// ── Position draw ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod position {
    use lg_core::{ScriptedSource, StreamRng};
    use lg_network::Route;

    use super::*;
    use crate::{DrawRequest, LaneBias, LaneBiases, NetworkPosition, PlacementError};

    fn request<'a>(gtu_type: GtuTypeId, backlog: &'a [usize], blocked: &'a [bool]) -> DrawRequest<'a> {
        DrawRequest { gtu_type, desired_speed: 25.0, route: None, backlog, blocked }
    }

    #[test]
    fn grouped_by_link_then_lane() {
        let f = fixture();
        let np = NetworkPosition::new(vec![pos(&f, 1, 2, 0.0), pos(&f, 0, 2, 0.0), pos(&f, 0, 1, 0.0)]).unwrap();
        let order: Vec<(LinkId, usize)> = np.positions().iter().map(|p| (p.link, p.lane_number)).collect();
        assert_eq!(order, vec![(f.links[0], 1), (f.links[0], 2), (f.links[1], 2)]);
        assert_eq!(np.links().count(), 2);
        assert!(matches!(NetworkPosition::new(vec![]), Err(PlacementError::NoPositions)));
    }

    #[test]
    fn lane_weights_use_backlog() {
        let f = fixture();
        let lanes = [lane(&f, 0, 1), lane(&f, 0, 2)];
        let np = NetworkPosition::on_lanes(&lanes, 0.0, Direction::Plus, &f.net).unwrap();
        let biases = LaneBiases::new().with(CAR, LaneBias::new(crate::LateralPreference::Constant(0.0), 2.0, f64::INFINITY).unwrap());
        let w = np.lane_weights(0, &request(CAR, &[0, 3], &[]), &biases, &f.net);
        assert_eq!(w.len(), 2);
        assert_eq!(w[0], (0, 1.0));
        assert_eq!(w[1], (1, 1.0 / 16.0));
    }

    #[test]
    fn scripted_draw_follows_cumulative_weight() {
        let f = fixture();
        let lanes = [lane(&f, 0, 1), lane(&f, 0, 2)];
        let np = NetworkPosition::on_lanes(&lanes, 0.0, Direction::Plus, &f.net).unwrap();
        let biases = LaneBiases::new();
        // Uniform lanes: [0, 0.5] → lane 1, (0.5, 1) → lane 2.
        let mut rng = ScriptedSource::new(vec![0.3, 0.5, 0.3, 0.51]);
        assert_eq!(np.draw(&request(CAR, &[], &[]), &biases, &mut rng, &f.net).unwrap(), 0);
        assert_eq!(np.draw(&request(CAR, &[], &[]), &biases, &mut rng, &f.net).unwrap(), 1);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn truck_never_beyond_sticky_lanes() {
        let mut types = GtuTypes::new();
        types.add("CAR", None).unwrap();
        let truck = types.add("TRUCK", None).unwrap();
        let mut b = LaneNetworkBuilder::new(types);
        let a = b.add_node("A");
        let z = b.add_node("Z");
        let link = b.add_link(a, z, 3, 500.0);
        b.set_speed_limit(link, 30.0);
        let net = b.build().unwrap();

        let lanes: Vec<LaneId> = net.link_lanes(link).collect();
        let np = NetworkPosition::on_lanes(&lanes, 0.0, Direction::Plus, &net).unwrap();
        let biases = LaneBiases::new().with(truck, LaneBias::TRUCK_RIGHT);
        let mut rng = StreamRng::new(1, 0);
        let mut counts = [0usize; 3];
        for _ in 0..2_000 {
            counts[np.draw(&request(truck, &[], &[]), &biases, &mut rng, &net).unwrap()] += 1;
        }
        assert_eq!(counts[2], 0);
        assert!(counts[0] > counts[1] && counts[1] > 0);
    }

    #[test]
    fn route_restricts_links() {
        let f = fixture();
        let np = NetworkPosition::new(vec![pos(&f, 1, 1, 0.0), pos(&f, 2, 1, 0.0)]).unwrap();
        let [a, b, _, d] = f.nodes;
        let route = Route::new(vec![a, b, d]);
        let biases = LaneBiases::new();
        let mut rng = StreamRng::new(4, 0);
        for _ in 0..50 {
            let req = DrawRequest { route: Some(&route), ..request(CAR, &[], &[]) };
            let i = np.draw(&req, &biases, &mut rng, &f.net).unwrap();
            assert_eq!(np.positions()[i].link, f.links[2]);
        }
    }

    #[test]
    fn inaccessible_lane_skipped() {
        let f = fixture();
        let lanes = [lane(&f, 1, 1), lane(&f, 1, 2)];
        let np = NetworkPosition::on_lanes(&lanes, 0.0, Direction::Plus, &f.net).unwrap();
        let biases = LaneBiases::new();
        let mut rng = ScriptedSource::new(vec![0.99]);
        for _ in 0..5 {
            assert_eq!(np.draw(&request(TRUCK, &[], &[]), &biases, &mut rng, &f.net).unwrap(), 0);
        }
        assert_eq!(np.lane_weights(0, &request(TRUCK, &[], &[]), &biases, &f.net).len(), 1);
    }

    #[test]
    fn fixed_link_weight_zero_excludes_link() {
        let f = fixture();
        let np = NetworkPosition::new(vec![pos(&f, 1, 1, 0.0), pos(&f, 2, 1, 0.0)])
            .unwrap()
            .with_link_weight(f.links[1], 0.0)
            .unwrap();
        let mut rng = ScriptedSource::new(vec![0.0, 0.0]);
        let i = np.draw(&request(CAR, &[], &[]), &LaneBiases::new(), &mut rng, &f.net).unwrap();
        assert_eq!(np.positions()[i].link, f.links[2]);
        assert!(matches!(
            np.clone().with_link_weight(f.links[0], 1.0),
            Err(PlacementError::LinkNotInPositions(_))
        ));
    }

    #[test]
    fn all_blocked_is_fatal() {
        let f = fixture();
        let lanes = [lane(&f, 0, 1), lane(&f, 0, 2)];
        let np = NetworkPosition::on_lanes(&lanes, 0.0, Direction::Plus, &f.net).unwrap();
        let mut rng = ScriptedSource::new(vec![0.5]);
        let r = np.draw(&request(CAR, &[], &[true, true]), &LaneBiases::new(), &mut rng, &f.net);
        assert!(matches!(r, Err(PlacementError::NoCandidate(CAR))));
        let r = np.draw(&request(CAR, &[1], &[]), &LaneBiases::new(), &mut rng, &f.net);
        assert!(matches!(r, Err(PlacementError::SnapshotSize { what: "backlog", .. })));
    }

    #[test]
    fn candidate_check_matches_draw() {
        let f = fixture();
        let lanes = [lane(&f, 0, 1), lane(&f, 0, 2)];
        let np = NetworkPosition::on_lanes(&lanes, 0.0, Direction::Plus, &f.net).unwrap();
        let biases = LaneBiases::new();
        assert!(np.has_candidate(&request(CAR, &[], &[]), &biases, &f.net));
        assert!(np.has_candidate(&request(CAR, &[], &[false, true]), &biases, &f.net));
        assert!(!np.has_candidate(&request(CAR, &[], &[true, true]), &biases, &f.net));

        // Off-route is not cured by lifting the mask.
        let [a, m, _, _] = f.nodes;
        let back = Route::new(vec![m, a]);
        let off_route = DrawRequest { route: Some(&back), ..request(CAR, &[], &[]) };
        assert!(!np.has_candidate(&off_route, &biases, &f.net));
    }

    #[test]
    fn speed_limit_over_accessible_positions() {
        let f = fixture();
        let np = NetworkPosition::on_lanes(&[lane(&f, 1, 2)], 0.0, Direction::Plus, &f.net).unwrap();
        assert_eq!(np.min_speed_limit(CAR, &f.net).unwrap(), 30.0);
        assert!(matches!(np.min_speed_limit(TRUCK, &f.net), Err(PlacementError::NoSpeedLimit(TRUCK))));
    }

    #[test]
    fn minus_direction_travel_nodes() {
        let f = fixture();
        let p = GenerationPosition::on_lane(lane(&f, 0, 1), 200.0, Direction::Minus, &f.net);
        assert_eq!(p.travel_nodes(&f.net), (f.nodes[1], f.nodes[0]));
    }
}

// ── Leaders ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod leaders {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::{body_clear, find_leaders};

    #[test]
    fn same_lane_net_distance() {
        let mut f = fixture();
        put(&mut f, 1, 0, 1, 100.0, 20.0);
        put(&mut f, 2, 0, 1, 150.0, 20.0);
        let l = find_leaders(&pos(&f, 0, 1, 50.0), CAR, 250.0, &f.net);
        assert_eq!(l.len(), 1);
        assert_eq!(l[0].gtu, GtuId(1));
        assert_approx_eq!(l[0].distance, 46.0);
    }

    #[test]
    fn continues_over_lane_boundary() {
        let mut f = fixture();
        put(&mut f, 1, 1, 2, 30.0, 15.0);
        let l = find_leaders(&pos(&f, 0, 2, 150.0), CAR, 250.0, &f.net);
        assert_eq!(l.len(), 1);
        assert_approx_eq!(l[0].distance, 76.0);
        assert_eq!(l[0].speed, 15.0);
    }

    #[test]
    fn one_leader_per_branch_sorted() {
        let mut f = fixture();
        put(&mut f, 1, 2, 1, 60.0, 10.0);
        put(&mut f, 2, 1, 1, 20.0, 10.0);
        let l = find_leaders(&pos(&f, 0, 1, 150.0), CAR, 250.0, &f.net);
        let ids: Vec<GtuId> = l.iter().map(|x| x.gtu).collect();
        assert_eq!(ids, vec![GtuId(2), GtuId(1)]);
        assert_approx_eq!(l[0].distance, 66.0);
        assert_approx_eq!(l[1].distance, 106.0);
    }

    #[test]
    fn range_limits_search() {
        let mut f = fixture();
        put(&mut f, 1, 1, 2, 30.0, 15.0);
        assert!(find_leaders(&pos(&f, 0, 2, 150.0), CAR, 40.0, &f.net).is_empty());
    }

    #[test]
    fn body_overlap_detected() {
        let mut f = fixture();
        put(&mut f, 1, 0, 1, 48.0, 0.0);
        assert!(!body_clear(&pos(&f, 0, 1, 50.0), 5.0, &f.net));
        assert!(body_clear(&pos(&f, 0, 1, 60.0), 5.0, &f.net));
        assert!(body_clear(&pos(&f, 0, 2, 50.0), 5.0, &f.net));
    }

    #[test]
    fn multi_lane_position_searches_every_lane() {
        let mut f = fixture();
        put(&mut f, 1, 0, 2, 120.0, 12.0);
        let p = GenerationPosition {
            lanes: vec![
                LanePosition::new(lane(&f, 0, 1), 100.0, Direction::Plus),
                LanePosition::new(lane(&f, 0, 2), 100.0, Direction::Plus),
            ],
            lane_number: 1,
            link: f.links[0],
        };
        let l = find_leaders(&p, CAR, 250.0, &f.net);
        assert_eq!(l.len(), 1);
        assert_approx_eq!(l[0].distance, 16.0);
    }
}

// ── Room checks ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod room {
    use assert_approx_eq::assert_approx_eq;
    use lg_core::StreamRng;

    use super::*;
    use crate::{
        one_shot_speed, required_gap, CarFollowingRoomChecker, CongestionHeadwayFactor, NoAdjustment,
        Placement, RoomChecker, RoomRequest, SingleLeaderRoomChecker,
    };

    const EPS: f64 = 1e-6;

    #[test]
    fn no_leader_admits_at_desired() {
        let d = descriptor(CAR, 36.0);
        assert_eq!(one_shot_speed(None, 30.0, &d), Some(30.0));
        assert_eq!(one_shot_speed(None, 40.0, &d), Some(36.0));
    }

    #[test]
    fn boundary_at_required_gap() {
        let d = descriptor(CAR, 36.0);
        let required = required_gap(&d, 20.0);
        assert_approx_eq!(required, 22.0);
        assert_eq!(one_shot_speed(Some(&leader(required - EPS, 25.0)), 20.0, &d), None);
        assert_eq!(one_shot_speed(Some(&leader(required, 25.0)), 20.0, &d), None);
        assert_eq!(one_shot_speed(Some(&leader(required + EPS, 25.0)), 20.0, &d), Some(20.0));
    }

    #[test]
    fn slower_leader_caps_speed() {
        let d = descriptor(CAR, 8.0);
        assert_eq!(one_shot_speed(Some(&leader(30.0, 10.0)), 20.0, &d), Some(8.0));
        let d = descriptor(CAR, 36.0);
        assert_eq!(one_shot_speed(Some(&leader(30.0, 10.0)), 20.0, &d), Some(10.0));
    }

    #[test]
    fn admitted_gap_always_exceeds_required() {
        use lg_core::RandomSource;
        let d = descriptor(CAR, 33.0);
        let mut rng = StreamRng::new(8, 0);
        for _ in 0..1_000 {
            let distance = rng.next_uniform() * 60.0;
            let lead_speed = rng.next_uniform() * 40.0;
            if let Some(v) = one_shot_speed(Some(&leader(distance, lead_speed)), 30.0, &d) {
                assert!(distance > required_gap(&d, v));
            }
        }
    }

    #[test]
    fn single_leader_checker_keeps_position() {
        let f = fixture();
        let d = descriptor(CAR, 36.0);
        let p = pos(&f, 0, 1, 10.0);
        let leaders = [leader(100.0, 30.0)];
        let req = RoomRequest {
            descriptor:    &d,
            desired_speed: 30.0,
            leaders:       &leaders,
            since_arrival: SimDuration(5.0),
            position:      &p,
        };
        assert_eq!(SingleLeaderRoomChecker.can_place(&req, &f.net), Placement::Admit { speed: 30.0, position: p.clone() });
    }

    #[test]
    fn any_leader_too_close_fails() {
        let f = fixture();
        let d = descriptor(CAR, 36.0);
        let p = pos(&f, 0, 1, 10.0);
        let leaders = [leader(15.0, 10.0), leader(11.0, 30.0)];
        let req = RoomRequest {
            descriptor:    &d,
            desired_speed: 30.0,
            leaders:       &leaders,
            since_arrival: SimDuration::ZERO,
            position:      &p,
        };
        // Speed 10 → required 12; the second leader at 11 m blocks.
        assert_eq!(CarFollowingRoomChecker::new(NoAdjustment).can_place(&req, &f.net), Placement::NotNow);
    }

    #[test]
    fn late_vehicle_advanced_within_lane() {
        let f = fixture();
        let d = descriptor(CAR, 36.0);
        let p = pos(&f, 0, 1, 10.0);
        let leaders = [leader(100.0, 20.0)];
        let req = RoomRequest {
            descriptor:    &d,
            desired_speed: 25.0,
            leaders:       &leaders,
            since_arrival: SimDuration(2.0),
            position:      &p,
        };
        let Placement::Admit { speed, position } = CarFollowingRoomChecker::new(NoAdjustment).can_place(&req, &f.net) else {
            panic!("expected admission");
        };
        assert_eq!(speed, 20.0);
        assert_approx_eq!(position.primary().offset, 50.0);
        assert_eq!(position.link, f.links[0]);
    }

    #[test]
    fn advance_limited_by_slack() {
        let f = fixture();
        let d = descriptor(CAR, 36.0);
        let p = pos(&f, 0, 1, 10.0);
        let leaders = [leader(30.0, 20.0)];
        let req = RoomRequest {
            descriptor:    &d,
            desired_speed: 20.0,
            leaders:       &leaders,
            since_arrival: SimDuration(10.0),
            position:      &p,
        };
        let placement = CarFollowingRoomChecker::new(NoAdjustment).can_place(&req, &f.net);
        let Placement::Admit { position, .. } = placement else { panic!("expected admission") };
        // Slack = 30 - 22 = 8, minus the 0.1 m margin.
        assert_approx_eq!(position.primary().offset, 17.9);
    }

    #[test]
    fn advance_crosses_single_successor() {
        let f = fixture();
        let d = descriptor(CAR, 36.0);
        let p = pos(&f, 0, 2, 190.0);
        let leaders = [leader(200.0, 20.0)];
        let req = RoomRequest {
            descriptor:    &d,
            desired_speed: 20.0,
            leaders:       &leaders,
            since_arrival: SimDuration(2.0),
            position:      &p,
        };
        let Placement::Admit { position, .. } = CarFollowingRoomChecker::new(NoAdjustment).can_place(&req, &f.net) else {
            panic!("expected admission");
        };
        assert_eq!(position.primary().lane, lane(&f, 1, 2));
        assert_approx_eq!(position.primary().offset, 30.0);
        assert_eq!(position.link, f.links[1]);
        assert_eq!(position.lane_number, 2);
    }

    #[test]
    fn branch_falls_back_to_unmoved() {
        let f = fixture();
        let d = descriptor(CAR, 36.0);
        let p = pos(&f, 0, 1, 190.0);
        let leaders = [leader(200.0, 20.0)];
        let req = RoomRequest {
            descriptor:    &d,
            desired_speed: 20.0,
            leaders:       &leaders,
            since_arrival: SimDuration(2.0),
            position:      &p,
        };
        let placement = CarFollowingRoomChecker::new(NoAdjustment).can_place(&req, &f.net);
        assert_eq!(placement, Placement::Admit { speed: 20.0, position: p.clone() });
    }

    #[test]
    fn congestion_factor_shortens_headway() {
        let f = fixture();
        let d = descriptor(CAR, 36.0);
        let p = pos(&f, 0, 1, 10.0);
        // Leader at 5 m/s: plain requirement 2 + 5 = 7 m; with factor 2/3 it is 5.33 m.
        let leaders = [leader(6.0, 5.0)];
        let req = RoomRequest {
            descriptor:    &d,
            desired_speed: 30.0,
            leaders:       &leaders,
            since_arrival: SimDuration::ZERO,
            position:      &p,
        };
        assert_eq!(CarFollowingRoomChecker::new(NoAdjustment).can_place(&req, &f.net), Placement::NotNow);
        let congested = CarFollowingRoomChecker::new(CongestionHeadwayFactor::default());
        assert_eq!(congested.can_place(&req, &f.net).speed(), Some(5.0));
    }
}
