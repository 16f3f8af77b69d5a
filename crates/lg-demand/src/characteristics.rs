//! Vehicle descriptors and the template-based characteristics generator.

use std::fmt;
use std::sync::Arc;

use log::warn;

use lg_behavior::DrivingBehavior;
use lg_core::{GtuTypeId, NodeId, RandomSource};
use lg_network::Route;

use crate::{ContinuousDist, DemandError, DemandResult};

/// Smallest length, width or speed a draw may produce.
const MIN_PHYSICAL: f64 = 0.01;

// ── VehicleDescriptor ─────────────────────────────────────────────────────────

/// Everything needed to instantiate one GTU.  Never mutated after creation.
#[derive(Clone)]
pub struct VehicleDescriptor {
    pub gtu_type:    GtuTypeId,
    /// Body length in metres.
    pub length:      f64,
    /// Body width in metres.
    pub width:       f64,
    /// Maximum speed in m/s.
    pub max_speed:   f64,
    pub behavior:    Arc<dyn DrivingBehavior>,
    pub route:       Option<Arc<Route>>,
    pub origin:      Option<NodeId>,
    pub destination: Option<NodeId>,
}

impl fmt::Debug for VehicleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VehicleDescriptor")
            .field("gtu_type", &self.gtu_type)
            .field("length", &self.length)
            .field("width", &self.width)
            .field("max_speed", &self.max_speed)
            .field("behavior", &self.behavior.name())
            .field("route", &self.route)
            .field("origin", &self.origin)
            .field("destination", &self.destination)
            .finish()
    }
}

// ── DescriptorSource ──────────────────────────────────────────────────────────

/// Anything that can hand the generator its next descriptor: the template
/// generator below, or an external OD-based source.
pub trait DescriptorSource {
    fn next_descriptor(&mut self, rng: &mut dyn RandomSource) -> DemandResult<VehicleDescriptor>;
}

// ── VehicleTemplate ───────────────────────────────────────────────────────────

/// One weighted entry of a characteristics table.
#[derive(Clone)]
pub struct VehicleTemplate {
    pub gtu_type:    GtuTypeId,
    pub length:      ContinuousDist,
    pub width:       ContinuousDist,
    pub max_speed:   ContinuousDist,
    pub probability: f64,
    pub behavior:    Arc<dyn DrivingBehavior>,
    pub route:       Option<Arc<Route>>,
}

impl VehicleTemplate {
    pub fn new(
        gtu_type:    GtuTypeId,
        length:      ContinuousDist,
        width:       ContinuousDist,
        max_speed:   ContinuousDist,
        probability: f64,
        behavior:    Arc<dyn DrivingBehavior>,
    ) -> Self {
        Self { gtu_type, length, width, max_speed, probability, behavior, route: None }
    }

    pub fn with_route(mut self, route: Arc<Route>) -> Self {
        self.route = Some(route);
        self
    }

    /// Draw length, width and max speed independently, in that order.
    pub fn instantiate(&self, rng: &mut dyn RandomSource) -> VehicleDescriptor {
        let length = self.length.sample_at_least(rng, MIN_PHYSICAL);
        let width = self.width.sample_at_least(rng, MIN_PHYSICAL);
        let max_speed = self.max_speed.sample_at_least(rng, MIN_PHYSICAL);
        VehicleDescriptor {
            gtu_type: self.gtu_type,
            length,
            width,
            max_speed,
            behavior: Arc::clone(&self.behavior),
            route: self.route.clone(),
            origin: self.route.as_ref().and_then(|r| r.origin()),
            destination: self.route.as_ref().and_then(|r| r.destination()),
        }
    }
}

// ── CharacteristicsGenerator ──────────────────────────────────────────────────

/// Picks a template by probability and instantiates it.
#[derive(Clone)]
pub struct CharacteristicsGenerator {
    templates: Vec<VehicleTemplate>,
}

impl CharacteristicsGenerator {
    /// At least one template is required; probabilities must be finite and
    /// non-negative.  They are not renormalised.
    pub fn new(templates: Vec<VehicleTemplate>) -> DemandResult<Self> {
        if templates.is_empty() {
            return Err(DemandError::EmptyTemplates);
        }
        for (index, t) in templates.iter().enumerate() {
            if !(t.probability.is_finite() && t.probability >= 0.0) {
                return Err(DemandError::InvalidProbability { index, probability: t.probability });
            }
        }
        let total: f64 = templates.iter().map(|t| t.probability).sum();
        if (total - 1.0).abs() > 1e-6 {
            warn!("vehicle template probabilities sum to {total:.6}, not 1");
        }
        Ok(Self { templates })
    }

    pub fn templates(&self) -> &[VehicleTemplate] {
        &self.templates
    }

    /// Index of the template chosen by uniform `u`: the first positive
    /// entry whose cumulative probability reaches `u`, else the last one.
    pub fn select(&self, u: f64) -> usize {
        let mut cumulative = 0.0;
        for (i, t) in self.templates.iter().enumerate() {
            cumulative += t.probability;
            if t.probability > 0.0 && u <= cumulative {
                return i;
            }
        }
        self.templates.len() - 1
    }

    /// Draw one descriptor.
    pub fn draw_characteristics(&self, rng: &mut dyn RandomSource) -> VehicleDescriptor {
        let i = self.select(rng.next_uniform());
        self.templates[i].instantiate(rng)
    }
}

impl DescriptorSource for CharacteristicsGenerator {
    fn next_descriptor(&mut self, rng: &mut dyn RandomSource) -> DemandResult<VehicleDescriptor> {
        Ok(self.draw_characteristics(rng))
    }
}
