//! The placement primitive: turn a descriptor into a GTU on the network.

use lg_core::GtuId;
use lg_demand::VehicleDescriptor;
use lg_network::{GtuOnLane, LaneNetwork};
use lg_placement::GenerationPosition;

use crate::GeneratorResult;

/// Instantiates a GTU.  What happens to it afterwards belongs to the caller.
pub trait GtuPlacer {
    fn place(
        &mut self,
        descriptor: &VehicleDescriptor,
        position:   &GenerationPosition,
        speed:      f64,
    ) -> GeneratorResult<GtuId>;
}

/// Registers the GTU on the reference lane of the position.
impl GtuPlacer for LaneNetwork {
    fn place(
        &mut self,
        descriptor: &VehicleDescriptor,
        position:   &GenerationPosition,
        speed:      f64,
    ) -> GeneratorResult<GtuId> {
        let at = position.primary();
        let id = self.next_gtu_id();
        self.insert_gtu(at.lane, GtuOnLane {
            id,
            gtu_type:  descriptor.gtu_type,
            front:     at.offset,
            length:    descriptor.length,
            speed,
            direction: at.dir,
        })?;
        Ok(id)
    }
}
