//! motorway: one generator feeding a three-lane motorway for one hour.
//!
//! Demand ramps up and back down through an embedded CSV profile; cars
//! prefer the left lanes the faster they want to drive, trucks keep right.
//! Two truck platoons take over the right lane for a minute each.  Motion is
//! a plain constant-speed drift so the generator sees real leaders without
//! pulling in a car-following model.

mod network;

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use env_logger::{Builder, Env};
use log::info;

use lg_behavior::FixedBehavior;
use lg_core::{CategoryId, Direction, LaneId, NodeId, RunConfig, SimDuration, SimTime};
use lg_demand::{
    ArrivalProcess, CharacteristicsGenerator, ContinuousDist, DistSpec, Interpolation, VehicleTemplate,
    load_profile_reader,
};
use lg_generator::{CategoryCharacteristics, GeneratorBuilder, Scenario, load_platoons_reader};
use lg_network::{GtuOnLane, LaneNetwork, LaneTopology, NetworkResult};
use lg_output::{CsvWriter, GenerationRecorder};
use lg_placement::{
    CarFollowingRoomChecker, CongestionHeadwayFactor, GenerationPosition, LaneBias, LaneBiases, NetworkPosition,
};

use network::{Types, build_network};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64         = 42;
const END_SECS:    f64         = 3_600.0;
const MOTION_STEP: SimDuration = SimDuration(0.5);
const OUTPUT_DIR:  &str        = "output/motorway";

// time in s, rate in veh/h
const PROFILE_CSV: &str = "\
time,rate
0,1800
1200,4800
2400,4800
3600,1200
";

const PLATOONS_CSV: &str = "\
start,end,time,origin,destination,category,speed
900,960,900.0,A,Z,0,22.0
900,960,902.5,A,Z,0,22.0
900,960,905.0,A,Z,0,22.0
2700,2760,2700.0,A,Z,0,20.0
2700,2760,2703.0,A,Z,0,20.0
";

// ── Vehicle mix ───────────────────────────────────────────────────────────────

fn car(types: &Types) -> Result<VehicleTemplate> {
    Ok(VehicleTemplate::new(
        types.car,
        ContinuousDist::new(DistSpec::Normal { mean: 4.5, std_dev: 0.4 })?,
        ContinuousDist::constant(1.8),
        ContinuousDist::new(DistSpec::Uniform { min: 33.0, max: 45.0 })?,
        0.85,
        Arc::new(FixedBehavior::new(1.05, SimDuration(1.2))),
    ))
}

fn truck(types: &Types) -> Result<VehicleTemplate> {
    Ok(VehicleTemplate::new(
        types.truck,
        ContinuousDist::new(DistSpec::Uniform { min: 12.0, max: 18.0 })?,
        ContinuousDist::constant(2.55),
        ContinuousDist::constant(25.0),
        0.15,
        Arc::new(FixedBehavior::new(1.0, SimDuration(1.6))),
    ))
}

// ── Motion ────────────────────────────────────────────────────────────────────

/// Move every GTU `dt` seconds at its current speed.  GTUs that leave the
/// network are removed; returns how many.
fn drift(net: &mut LaneNetwork, dt: f64) -> NetworkResult<usize> {
    let view: &LaneNetwork = net;
    let snapshot: Vec<(LaneId, GtuOnLane)> = (0..view.lane_count())
        .map(|i| LaneId(i as u32))
        .flat_map(|lane| view.gtus_on(lane).iter().map(move |g| (lane, *g)))
        .collect();

    let mut left = 0;
    for (lane, gtu) in snapshot {
        let mut lane = lane;
        let mut front = gtu.front + gtu.speed * dt;
        loop {
            let length = LaneTopology::lane_length(&*net, lane);
            if front <= length {
                net.update_gtu(gtu.id, lane, front, gtu.speed)?;
                break;
            }
            match LaneTopology::downstream(&*net, lane, Direction::Plus, gtu.gtu_type).first() {
                Some(&(next, _)) => {
                    front -= length;
                    lane = next;
                }
                None => {
                    net.remove_gtu(gtu.id)?;
                    left += 1;
                    break;
                }
            }
        }
    }
    Ok(left)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    println!("=== motorway: lanegen vehicle generator ===");
    println!("Seed: {SEED}  |  Horizon: {END_SECS} s  |  Motion step: {} s", MOTION_STEP.secs());
    println!();

    // 1. Network.
    let (network, types, entry) = build_network()?;
    let lanes: Vec<LaneId> = network.link_lanes(entry).collect();
    println!("Network: {} links, {} lanes", network.link_count(), network.lane_count());

    // 2. Demand and vehicle mix.
    let profile = load_profile_reader(Cursor::new(PROFILE_CSV), Interpolation::Linear)?;
    let arrivals = ArrivalProcess::new(profile, SimTime::ZERO)?;
    let characteristics = CharacteristicsGenerator::new(vec![car(&types)?, truck(&types)?])?;
    let biases = LaneBiases::new()
        .with(types.car, LaneBias::by_speed(30.0, 40.0, 2.0, f64::INFINITY)?)
        .with(types.truck, LaneBias::TRUCK_RIGHT);
    let positions = NetworkPosition::on_lanes(&lanes, 0.0, Direction::Plus, &network)?;

    // 3. Scenario.
    let run = RunConfig { seed: SEED, start_time: SimTime::ZERO, end_time: SimTime(END_SECS) };
    let end = run.end_time;
    let node_names = network.node_names.clone();
    let mut scenario = Scenario::new(run, network)?;
    let g = scenario.add_generator(
        GeneratorBuilder::new(positions, Box::new(arrivals), Box::new(characteristics))
            .biases(biases)
            .room_checker(CarFollowingRoomChecker::new(CongestionHeadwayFactor::default())),
    )?;

    // 4. Platoons on the right lane.
    let right = GenerationPosition::on_lane(lanes[0], 0.0, Direction::Plus, scenario.network());
    let p = scenario.add_platoons(g, right, CategoryCharacteristics::new().with(CategoryId(0), truck(&types)?))?;
    let declared = load_platoons_reader(Cursor::new(PLATOONS_CSV), scenario.platoons_mut(p)?, |name: &str| {
        node_names.iter().position(|n| n == name).map(|i| NodeId(i as u32))
    })?;
    println!("Loaded {declared} platoon GTUs");
    println!();

    // 5. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut recorder = GenerationRecorder::new(CsvWriter::new(Path::new(OUTPUT_DIR))?).without_blocked();

    // 6. Run, alternating event dispatch and motion.
    let t0 = Instant::now();
    let mut exited = 0;
    let mut t = SimTime::ZERO;
    while t < end {
        t = (t + MOTION_STEP).min(end);
        scenario.run_until(t, &mut recorder)?;
        exited += drift(scenario.network_mut(), MOTION_STEP.secs())?;
    }
    scenario.run(&mut recorder)?;
    let elapsed = t0.elapsed();
    info!("run finished in {:.3} s", elapsed.as_secs_f64());

    if let Some(e) = recorder.take_error() {
        eprintln!("output error: {e}");
    }

    // 7. Summary.
    let generator = scenario.generator(g)?;
    let (placements, queue_events) = recorder.counts();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  placements.csv   : {placements} rows");
    println!("  queue_events.csv : {queue_events} rows");
    println!();
    println!("{:<24} {:>8}", "Generator", generator.id());
    println!("{}", "-".repeat(33));
    println!("{:<24} {:>8}", "placed (all sources)", generator.placed());
    println!("{:<24} {:>8}", "placed by platoons", scenario.platoons(p)?.placed());
    println!("{:<24} {:>8}", "still queued", generator.backlog().len());
    println!("{:<24} {:>8}", "left the network", exited);
    println!("{:<24} {:>8}", "on the network", scenario.network().gtu_count());

    Ok(())
}
