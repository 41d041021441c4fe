//! Physical line of sight: terrain sampled along the ray.
//!
//! Every interior cell of the source → observer line contributes the weight
//! of its [`TerrainClass`].  The sum is clamped to `[0, 1]`.  A single
//! mountain cell takes 0.8 on its own; two of them block outright.

use sense_core::{SectorType, SpatialResult, StimulusSet, StimulusType};
use sense_strategy::{GridWalk, LineOfSight, Obstacle, SpatialContext};
use tracing::trace;

// ── TerrainClass ──────────────────────────────────────────────────────────────

/// How much a sector gets in the way of light.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TerrainClass {
    Open,
    LightForest,
    DenseForest,
    Hills,
    Mountains,
    /// Swamp, underground and anything else not listed above.
    Other,
}

impl TerrainClass {
    pub fn of(sector: SectorType) -> Self {
        match sector {
            SectorType::Inside
            | SectorType::City
            | SectorType::Field
            | SectorType::Road
            | SectorType::Desert
            | SectorType::Planes
            | SectorType::WaterSwim
            | SectorType::WaterNoSwim
            | SectorType::Ocean
            | SectorType::Flying => TerrainClass::Open,
            SectorType::Forest => TerrainClass::LightForest,
            SectorType::Jungle => TerrainClass::DenseForest,
            SectorType::Hills => TerrainClass::Hills,
            SectorType::Mountain | SectorType::HighMountain => TerrainClass::Mountains,
            SectorType::Marshland
            | SectorType::Underwater
            | SectorType::UnderdarkWild
            | SectorType::UnderdarkNoGround => TerrainClass::Other,
        }
    }

    /// Obstruction contributed by one cell of this class.
    pub fn weight(self) -> f32 {
        match self {
            TerrainClass::Open        => 0.0,
            TerrainClass::LightForest => 0.1,
            TerrainClass::DenseForest => 0.3,
            TerrainClass::Hills       => 0.2,
            TerrainClass::Mountains   => 0.8,
            TerrainClass::Other       => 0.1,
        }
    }
}

// ── PhysicalLos ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default)]
pub struct PhysicalLos;

impl LineOfSight for PhysicalLos {
    fn name(&self) -> &str {
        "physical"
    }

    fn supported(&self) -> StimulusSet {
        StimulusSet::of(&[StimulusType::Visual])
    }

    fn calculate_obstruction(&self, ctx: &SpatialContext<'_>) -> SpatialResult<f32> {
        let host = ctx.host();
        let walk = GridWalk::new(
            (ctx.source.x, ctx.source.y),
            (ctx.observer_position.x, ctx.observer_position.y),
        );
        let steps = walk.steps();
        let total: f32 = walk
            .map(|s| TerrainClass::of(host.terrain_at(s.x, s.y)).weight())
            .sum();
        let obstruction = total.min(1.0);
        trace!(steps, total, obstruction, "physical obstruction");
        Ok(obstruction)
    }

    /// Only solid rock stops light entirely.  Other stimulus types are not
    /// this strategy's business and always pass.
    fn can_transmit_through(&self, terrain: SectorType, stimulus: StimulusType) -> bool {
        match stimulus {
            StimulusType::Visual => !terrain.is_mountainous(),
            _ => true,
        }
    }

    /// Records every weighted cell on the ray, stopping at the obstacle
    /// list's capacity.
    fn blocking_elements(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<usize> {
        ctx.obstacles.clear();
        let host = ctx.host();
        let walk = GridWalk::new(
            (ctx.source.x, ctx.source.y),
            (ctx.observer_position.x, ctx.observer_position.y),
        );
        for s in walk {
            if ctx.obstacles.is_full() {
                break;
            }
            let sector = host.terrain_at(s.x, s.y);
            let weight = TerrainClass::of(sector).weight();
            if weight > 0.0 {
                ctx.obstacles.push(Obstacle { x: s.x, y: s.y, sector, weight })?;
            }
        }
        Ok(ctx.obstacles.len())
    }
}
