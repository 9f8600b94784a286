//! Standard construction-scaffold geometry.
//!
//! # Layout
//!
//! Seen from above, each level is a ring of four platforms around the
//! building footprint, offset outward by `clearance`:
//!
//! ```text
//!   +---------------- front (+z) ----------------+
//!   | left |                              | right|
//!   |      |        building footprint    |      |
//!   |      |                              |      |
//!   +---------------- back  (-z) ----------------+
//! ```
//!
//! Front and back span the full width including the corners, so the side
//! platforms abut them and agents can walk around the ring without stairs.
//!
//! Stairs all land on the front platforms: one flight from the ground up to
//! level 1, then one flight per level above.  Successive flights alternate
//! between the left and right half of the front so climbing and descending
//! traffic does not share a flight.  Every height is `base_y + offset`, so
//! scaffolding sits correctly on sloped or raised terrain.

use tn_core::{ScaffoldConfig, StructureId, SurfaceId, Vec3};

use crate::{Bounds, ElevatedSurface, ElevationConnection, StairEndpoint};

/// Rectangular building footprint on the ground plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Footprint {
    pub center_x: f32,
    pub center_z: f32,
    /// Extent along x.
    pub width: f32,
    /// Extent along z.
    pub depth: f32,
}

impl Footprint {
    pub fn new(center_x: f32, center_z: f32, width: f32, depth: f32) -> Self {
        Self { center_x, center_z, width, depth }
    }
}

/// Platform side relative to the footprint.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Side {
    Front,
    Back,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Front, Side::Back, Side::Left, Side::Right];

    fn as_str(self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back  => "back",
            Side::Left  => "left",
            Side::Right => "right",
        }
    }
}

/// Surfaces and stairs for one structure's scaffolding, ready for
/// [`SurfaceRegistry::register_layout`](crate::SurfaceRegistry::register_layout).
#[derive(Clone, Debug, PartialEq)]
pub struct ScaffoldLayout {
    pub parent: StructureId,
    pub surfaces: Vec<ElevatedSurface>,
    pub connections: Vec<ElevationConnection>,
}

impl ScaffoldLayout {
    /// Generate the layout with the dimensions and levels in `config`.
    pub fn build(parent: StructureId, footprint: Footprint, base_y: f32, config: &ScaffoldConfig) -> Self {
        let mut surfaces = Vec::with_capacity(config.level_offsets.len() * 4);
        let mut connections = Vec::with_capacity(config.level_offsets.len());

        let (cx, cz) = (footprint.center_x, footprint.center_z);
        let hw = footprint.width * 0.5;
        let d = config.platform_depth;
        let inner_min_x = cx - hw - config.clearance;
        let inner_max_x = cx + hw + config.clearance;
        let inner_min_z = cz - footprint.depth * 0.5 - config.clearance;
        let inner_max_z = cz + footprint.depth * 0.5 + config.clearance;

        let front = Bounds::new(inner_min_x - d, inner_max_x + d, inner_max_z, inner_max_z + d);
        let front_z = inner_max_z + d * 0.5;
        let half_run = config.stair_run * 0.5;

        for (i, &offset) in config.level_offsets.iter().enumerate() {
            let level = i + 1;
            let y = base_y + offset;

            for side in Side::ALL {
                let bounds = match side {
                    Side::Front => front,
                    Side::Back  => Bounds::new(inner_min_x - d, inner_max_x + d, inner_min_z - d, inner_min_z),
                    Side::Left  => Bounds::new(inner_min_x - d, inner_min_x, inner_min_z, inner_max_z),
                    Side::Right => Bounds::new(inner_max_x, inner_max_x + d, inner_min_z, inner_max_z),
                };
                surfaces.push(
                    ElevatedSurface::new(surface_id(parent, level, side), y, bounds).with_parent(parent),
                );
            }

            // Alternate flights between the left and right half of the front.
            let lateral = if i % 2 == 0 { -1.0 } else { 1.0 };
            let sx = flight_x(cx + lateral * hw * 0.5, &front, half_run);
            let upper_id = surface_id(parent, level, Side::Front);
            let id = format!("scaffold-{}-stair-{level}", parent.0);

            let connection = if i == 0 {
                // Ground flight runs straight out from the front platform.
                let lower = StairEndpoint::ground(Vec3::new(sx, base_y, front.max_z + config.stair_run));
                ElevationConnection::new(id, lower, Vec3::new(sx, y, front_z), upper_id, config.stair_width)
            } else {
                let below_y = base_y + config.level_offsets[i - 1];
                let lower = StairEndpoint::on(
                    Vec3::new(sx - lateral * half_run, below_y, front_z),
                    surface_id(parent, level - 1, Side::Front),
                );
                let upper = Vec3::new(sx + lateral * half_run, y, front_z);
                ElevationConnection::new(id, lower, upper, upper_id, config.stair_width)
            };
            connections.push(connection);
        }

        Self { parent, surfaces, connections }
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// The platform on `side` of `level` (1-based).
    pub fn surface(&self, level: usize, side: Side) -> Option<&ElevatedSurface> {
        let id = surface_id(self.parent, level, side);
        self.surfaces.iter().find(|s| s.id == id)
    }
}

/// Standard scaffolding for `footprint` with one level per entry of
/// `level_offsets` (heights above `base_y`), using default dimensions.
pub fn build_scaffold(
    parent: StructureId,
    footprint: Footprint,
    level_offsets: &[f32],
    base_y: f32,
) -> ScaffoldLayout {
    let config = ScaffoldConfig { level_offsets: level_offsets.to_vec(), ..ScaffoldConfig::default() };
    ScaffoldLayout::build(parent, footprint, base_y, &config)
}

/// Keep a flight of half-length `half_run` centred at `x` inside `front`.
/// A front narrower than the flight gets it centred.
fn flight_x(x: f32, front: &Bounds, half_run: f32) -> f32 {
    let (lo, hi) = (front.min_x + half_run, front.max_x - half_run);
    if lo <= hi {
        x.clamp(lo, hi)
    } else {
        (front.min_x + front.max_x) * 0.5
    }
}

fn surface_id(parent: StructureId, level: usize, side: Side) -> SurfaceId {
    SurfaceId(format!("scaffold-{}-L{level}-{}", parent.0, side.as_str()))
}
