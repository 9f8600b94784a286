//! Elevated geometry value types.

use tn_core::{ConnectionId, StructureId, SurfaceId, Vec3};

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle on the x/z plane.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Bounds {
    #[inline]
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self { min_x, max_x, min_z, max_z }
    }

    #[inline]
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    /// `(x, z)` of the rectangle's center.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        ((self.min_x + self.max_x) * 0.5, (self.min_z + self.max_z) * 0.5)
    }

    /// `true` if the rectangles intersect once each is grown by `tolerance`.
    #[inline]
    pub fn overlaps(&self, other: &Bounds, tolerance: f32) -> bool {
        self.min_x <= other.max_x + tolerance
            && other.min_x <= self.max_x + tolerance
            && self.min_z <= other.max_z + tolerance
            && other.min_z <= self.max_z + tolerance
    }

    /// Closest point of the rectangle to `(x, z)`.  Inverted bounds clamp
    /// to their `max` edge rather than panicking.
    #[inline]
    pub fn clamp(&self, x: f32, z: f32) -> (f32, f32) {
        (x.max(self.min_x).min(self.max_x), z.max(self.min_z).min(self.max_z))
    }
}

// ── ElevatedSurface ───────────────────────────────────────────────────────────

/// A rectangular walkable plane at a fixed height (a scaffold platform).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevatedSurface {
    pub id: SurfaceId,
    pub y: f32,
    pub bounds: Bounds,
    /// Structure whose lifecycle owns this surface.
    pub parent: Option<StructureId>,
    /// Movement cost multiplier; `None` means `1.0`.
    pub cost: Option<f32>,
}

impl ElevatedSurface {
    pub fn new(id: impl Into<SurfaceId>, y: f32, bounds: Bounds) -> Self {
        Self { id: id.into(), y, bounds, parent: None, cost: None }
    }

    pub fn with_parent(mut self, parent: StructureId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_cost(mut self, cost: f32) -> Self {
        self.cost = Some(cost);
        self
    }

    /// World-space center of the platform.
    #[inline]
    pub fn center(&self) -> Vec3 {
        let (x, z) = self.bounds.center();
        Vec3::new(x, self.y, z)
    }

    /// Effective cost multiplier (never below 1.0).
    #[inline]
    pub fn cost_multiplier(&self) -> f32 {
        self.cost.unwrap_or(1.0).max(1.0)
    }
}

// ── ElevationConnection ───────────────────────────────────────────────────────

/// One end of a stair: a world position and the surface it stands on
/// (`None` = ground).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StairEndpoint {
    pub pos: Vec3,
    pub surface: Option<SurfaceId>,
}

impl StairEndpoint {
    pub fn ground(pos: Vec3) -> Self {
        Self { pos, surface: None }
    }

    pub fn on(pos: Vec3, surface: impl Into<SurfaceId>) -> Self {
        Self { pos, surface: Some(surface.into()) }
    }

    /// The endpoint as a non-stair navigation point.
    pub fn nav_point(&self) -> ElevatedNavPoint {
        match &self.surface {
            Some(s) => ElevatedNavPoint::OnSurface { pos: self.pos, surface: s.clone() },
            None => ElevatedNavPoint::Ground { pos: self.pos },
        }
    }
}

/// A stair or ramp joining `lower` to `upper`.
///
/// `upper.surface` is always set; the registry refuses connections whose
/// surfaces are not registered.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevationConnection {
    pub id: ConnectionId,
    pub lower: StairEndpoint,
    pub upper: StairEndpoint,
    pub width: f32,
    pub cost: f32,
}

impl ElevationConnection {
    /// A stair from `lower` up to a point on `upper_surface`.
    pub fn new(
        id: impl Into<ConnectionId>,
        lower: StairEndpoint,
        upper_pos: Vec3,
        upper_surface: impl Into<SurfaceId>,
        width: f32,
    ) -> Self {
        Self {
            id: id.into(),
            lower,
            upper: StairEndpoint::on(upper_pos, upper_surface),
            width,
            cost: 1.0,
        }
    }

    pub fn with_cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }

    /// `true` if the lower end sits on the ground.
    #[inline]
    pub fn starts_on_ground(&self) -> bool {
        self.lower.surface.is_none()
    }

    /// `true` if either end stands on `surface`.
    #[inline]
    pub fn touches(&self, surface: &SurfaceId) -> bool {
        self.upper.surface.as_ref() == Some(surface) || self.lower.surface.as_ref() == Some(surface)
    }

    /// The endpoint standing on `surface`, if any (upper wins if both do).
    pub fn endpoint_on(&self, surface: &SurfaceId) -> Option<&StairEndpoint> {
        if self.upper.surface.as_ref() == Some(surface) {
            Some(&self.upper)
        } else if self.lower.surface.as_ref() == Some(surface) {
            Some(&self.lower)
        } else {
            None
        }
    }

    /// Effective cost multiplier (never below 1.0).
    #[inline]
    pub fn cost_multiplier(&self) -> f32 {
        self.cost.max(1.0)
    }
}

// ── ElevatedNavPoint ──────────────────────────────────────────────────────────

/// Where an agent stands for elevated routing purposes.
///
/// A tagged variant rather than a bag of optional fields: a stair point
/// always knows its connection, a surface point always knows its surface.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElevatedNavPoint {
    Ground { pos: Vec3 },
    OnSurface { pos: Vec3, surface: SurfaceId },
    OnStair { pos: Vec3, connection: ConnectionId },
}

impl ElevatedNavPoint {
    pub fn ground(x: f32, y: f32, z: f32) -> Self {
        Self::Ground { pos: Vec3::new(x, y, z) }
    }

    pub fn on_surface(x: f32, y: f32, z: f32, surface: impl Into<SurfaceId>) -> Self {
        Self::OnSurface { pos: Vec3::new(x, y, z), surface: surface.into() }
    }

    #[inline]
    pub fn pos(&self) -> Vec3 {
        match self {
            Self::Ground { pos } | Self::OnSurface { pos, .. } | Self::OnStair { pos, .. } => *pos,
        }
    }

    #[inline]
    pub fn is_stair(&self) -> bool {
        matches!(self, Self::OnStair { .. })
    }

    #[inline]
    pub fn surface_id(&self) -> Option<&SurfaceId> {
        match self {
            Self::OnSurface { surface, .. } => Some(surface),
            _ => None,
        }
    }

    #[inline]
    pub fn connection_id(&self) -> Option<&ConnectionId> {
        match self {
            Self::OnStair { connection, .. } => Some(connection),
            _ => None,
        }
    }
}

// ── ElevatedPath ──────────────────────────────────────────────────────────────

/// Result of an elevated routing query.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevatedPath {
    pub points: Vec<ElevatedNavPoint>,
    pub total_cost: f32,
}

impl ElevatedPath {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// World-space waypoints, for handing to a path follower.
    pub fn positions(&self) -> Vec<Vec3> {
        self.points.iter().map(ElevatedNavPoint::pos).collect()
    }

    /// Straight-line sum of segment lengths (ignores cost penalties).
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].pos().distance(w[1].pos())).sum()
    }
}
