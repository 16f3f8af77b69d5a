//! Fluent builder for constructing a [`LaneBasedGenerator`].

use lg_core::{GeneratorId, RandomSource, StreamRng};
use lg_demand::{ArrivalSource, DescriptorSource};
use lg_placement::{CarFollowingRoomChecker, LaneBiases, NetworkPosition, NoAdjustment, RoomChecker};

use crate::{GeneratorConfig, GeneratorResult, LaneBasedGenerator};

/// Fluent builder for [`LaneBasedGenerator`].
///
/// # Required inputs
///
/// - [`NetworkPosition`]: where GTUs may appear
/// - `ArrivalSource`: when they arrive (e.g. [`lg_demand::ArrivalProcess`])
/// - `DescriptorSource`: what arrives (e.g. [`lg_demand::CharacteristicsGenerator`])
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                      |
/// |------------------------|----------------------------------------------|
/// | `.room_checker(c)`     | `CarFollowingRoomChecker::new(NoAdjustment)` |
/// | `.biases(b)`           | Empty table: every type gets `LaneBias::NONE` |
/// | `.config(c)`           | `GeneratorConfig::default()`                 |
/// | `.random_source(r)`    | `StreamRng` from the run seed and the id     |
///
/// # Example
///
/// ```rust,ignore
/// let id = scenario.add_generator(
///     GeneratorBuilder::new(positions, Box::new(arrivals), Box::new(characteristics))
///         .biases(LaneBiases::new().with(truck, LaneBias::TRUCK_RIGHT)),
/// )?;
/// ```
pub struct GeneratorBuilder {
    positions:   NetworkPosition,
    arrivals:    Box<dyn ArrivalSource>,
    descriptors: Box<dyn DescriptorSource>,
    room:        Option<Box<dyn RoomChecker>>,
    biases:      LaneBiases,
    config:      GeneratorConfig,
    rng:         Option<Box<dyn RandomSource>>,
}

impl GeneratorBuilder {
    pub fn new(
        positions:   NetworkPosition,
        arrivals:    Box<dyn ArrivalSource>,
        descriptors: Box<dyn DescriptorSource>,
    ) -> Self {
        Self {
            positions,
            arrivals,
            descriptors,
            room:   None,
            biases: LaneBiases::new(),
            config: GeneratorConfig::default(),
            rng:    None,
        }
    }

    pub fn room_checker(mut self, room: impl RoomChecker + 'static) -> Self {
        self.room = Some(Box::new(room));
        self
    }

    pub fn biases(mut self, biases: LaneBiases) -> Self {
        self.biases = biases;
        self
    }

    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the per-generator random stream, e.g. with a scripted source.
    pub fn random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Validate the configuration and assemble the generator.
    pub fn build(self, id: GeneratorId, seed: u64) -> GeneratorResult<LaneBasedGenerator> {
        self.config.validate()?;
        let rng: Box<dyn RandomSource> = match self.rng {
            Some(rng) => rng,
            None => Box::new(StreamRng::new(seed, id.index() as u64)),
        };
        let room: Box<dyn RoomChecker> = match self.room {
            Some(room) => room,
            None => Box::new(CarFollowingRoomChecker::new(NoAdjustment)),
        };
        Ok(LaneBasedGenerator::from_parts(
            id,
            self.arrivals,
            self.descriptors,
            room,
            self.positions,
            self.biases,
            rng,
            self.config,
        ))
    }
}
