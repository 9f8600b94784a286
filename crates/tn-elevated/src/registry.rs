//! The elevated-surface registry: an owned, in-memory index of platforms and
//! the stairs between them.
//!
//! # Data layout
//!
//! Surfaces and connections live in `BTreeMap`s keyed by id so every query
//! iterates in a stable order (the pathfinder's tie-breaks depend on it).
//! Two secondary indexes are kept in step with the surface map:
//!
//! - `by_parent`: owning structure → surface ids, for bulk removal.
//! - `centers`: an R-tree (via `rstar`) of platform centers, for
//!   nearest-surface lookups.
//!
//! The registry holds no pathfinding logic.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;
use tn_core::{ConnectionId, NavError, NavRng, NavResult, StructureId, SurfaceId};

use crate::{ElevatedNavPoint, ElevatedSurface, ElevationConnection, ScaffoldLayout};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a platform's 3D center and its id.
#[derive(Clone, PartialEq, Debug)]
struct SurfaceCenter {
    point: [f32; 3],
    id:    SurfaceId,
}

impl SurfaceCenter {
    fn of(surface: &ElevatedSurface) -> Self {
        let c = surface.center();
        Self { point: [c.x, c.y, c.z], id: surface.id.clone() }
    }
}

impl RTreeObject for SurfaceCenter {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SurfaceCenter {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── SurfaceRegistry ───────────────────────────────────────────────────────────

/// Owned store of elevated surfaces and their stair connections.
///
/// Pass it by reference to the pathfinder; mutate it from whatever owns the
/// structure lifecycle.
#[derive(Default)]
pub struct SurfaceRegistry {
    surfaces:    BTreeMap<SurfaceId, ElevatedSurface>,
    connections: BTreeMap<ConnectionId, ElevationConnection>,
    by_parent:   FxHashMap<StructureId, Vec<SurfaceId>>,
    centers:     RTree<SurfaceCenter>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Insert `surface`, replacing any surface with the same id.
    ///
    /// Connections that reference the id are kept: they now attach to the
    /// replacement.
    pub fn register_surface(&mut self, surface: ElevatedSurface) {
        self.detach_index(&surface.id);
        if let Some(parent) = surface.parent {
            self.by_parent.entry(parent).or_default().push(surface.id.clone());
        }
        self.centers.insert(SurfaceCenter::of(&surface));
        self.surfaces.insert(surface.id.clone(), surface);
    }

    /// Insert `connection`, replacing any connection with the same id.
    ///
    /// # Errors
    ///
    /// [`NavError::UnknownSurface`] if either end names a surface that is not
    /// registered, [`NavError::Config`] if the upper end has no surface.
    pub fn register_connection(&mut self, connection: ElevationConnection) -> NavResult<()> {
        self.check_connection(&connection, |id| self.surfaces.contains_key(id))?;
        self.connections.insert(connection.id.clone(), connection);
        Ok(())
    }

    /// Register every surface of `layout`, then every connection.
    ///
    /// All connections are checked before anything is inserted, so a bad
    /// layout leaves the registry untouched.
    pub fn register_layout(&mut self, layout: ScaffoldLayout) -> NavResult<()> {
        let incoming: BTreeSet<&SurfaceId> = layout.surfaces.iter().map(|s| &s.id).collect();
        for c in &layout.connections {
            self.check_connection(c, |id| incoming.contains(id) || self.surfaces.contains_key(id))?;
        }

        let (surfaces, connections) = (layout.surfaces.len(), layout.connections.len());
        for s in layout.surfaces {
            self.register_surface(s);
        }
        for c in layout.connections {
            self.connections.insert(c.id.clone(), c);
        }
        debug!("registered layout: {surfaces} surfaces, {connections} connections");
        Ok(())
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Remove every surface owned by `parent` and every connection touching
    /// one of them.  Returns the number of surfaces removed.
    pub fn unregister_by_parent(&mut self, parent: StructureId) -> usize {
        let Some(ids) = self.by_parent.remove(&parent) else {
            return 0;
        };
        let removed: BTreeSet<SurfaceId> = ids
            .into_iter()
            .filter(|id| self.remove_surface_only(id).is_some())
            .collect();
        let dropped = self.cascade(&removed);
        debug!(
            "unregistered {parent}: {} surfaces, {dropped} connections",
            removed.len()
        );
        removed.len()
    }

    /// Remove one surface and cascade to its connections.
    pub fn unregister_surface(&mut self, id: &SurfaceId) -> Option<ElevatedSurface> {
        self.detach_index(id);
        let surface = self.surfaces.remove(id)?;
        self.cascade(&BTreeSet::from([id.clone()]));
        Some(surface)
    }

    pub fn unregister_connection(&mut self, id: &ConnectionId) -> Option<ElevationConnection> {
        self.connections.remove(id)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn surface(&self, id: &SurfaceId) -> Option<&ElevatedSurface> {
        self.surfaces.get(id)
    }

    #[inline]
    pub fn connection(&self, id: &ConnectionId) -> Option<&ElevationConnection> {
        self.connections.get(id)
    }

    pub fn all_surfaces(&self) -> impl Iterator<Item = &ElevatedSurface> + '_ {
        self.surfaces.values()
    }

    pub fn all_connections(&self) -> impl Iterator<Item = &ElevationConnection> + '_ {
        self.connections.values()
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty() && self.connections.is_empty()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Surface whose bounds contain `(x, z)` and whose height is within
    /// `tolerance` of `y`.  The closest height wins when several match.
    pub fn surface_at(&self, x: f32, z: f32, y: f32, tolerance: f32) -> Option<&ElevatedSurface> {
        self.surfaces
            .values()
            .filter(|s| s.bounds.contains(x, z) && (s.y - y).abs() <= tolerance)
            .min_by(|a, b| (a.y - y).abs().total_cmp(&(b.y - y).abs()))
    }

    /// Every surface above or below `(x, z)`, lowest first.
    pub fn surfaces_at_xz(&self, x: f32, z: f32) -> Vec<&ElevatedSurface> {
        let mut hits: Vec<&ElevatedSurface> =
            self.surfaces.values().filter(|s| s.bounds.contains(x, z)).collect();
        hits.sort_by(|a, b| a.y.total_cmp(&b.y));
        hits
    }

    /// Stair under the point `(x, z, y)`.
    ///
    /// The stair is parametrised by height: `t = (y - lower.y) / (upper.y -
    /// lower.y)` picks the expected `(x, z)` on the flight, and the point is
    /// accepted within `width / 2 + tolerance` of it.  The nearest match wins.
    pub fn connection_at(&self, x: f32, z: f32, y: f32, tolerance: f32) -> Option<&ElevationConnection> {
        self.connections
            .values()
            .filter_map(|c| {
                let (lo, hi) = (c.lower.pos, c.upper.pos);
                if y < lo.y.min(hi.y) - tolerance || y > lo.y.max(hi.y) + tolerance {
                    return None;
                }
                let dy = hi.y - lo.y;
                let t = if dy.abs() > f32::EPSILON {
                    ((y - lo.y) / dy).clamp(0.0, 1.0)
                } else {
                    project_xz(lo, hi, x, z)
                };
                let expected = lo.lerp(hi, t);
                let d = ((expected.x - x).powi(2) + (expected.z - z).powi(2)).sqrt();
                (d <= c.width * 0.5 + tolerance).then_some((c, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c)
    }

    /// Connections with either end on `surface`.
    pub fn connections_for_surface(&self, surface: &SurfaceId) -> Vec<&ElevationConnection> {
        self.connections.values().filter(|c| c.touches(surface)).collect()
    }

    /// Connections whose lower end is on the ground.
    pub fn ground_connections(&self) -> Vec<&ElevationConnection> {
        self.connections.values().filter(|c| c.starts_on_ground()).collect()
    }

    /// Surfaces owned by `parent`, in registration order.
    pub fn surfaces_for_parent(&self, parent: StructureId) -> Vec<&ElevatedSurface> {
        self.by_parent
            .get(&parent)
            .map(|ids| ids.iter().filter_map(|id| self.surfaces.get(id)).collect())
            .unwrap_or_default()
    }

    /// Surface whose center is nearest to `(x, y, z)` in 3D.
    pub fn find_nearest_surface(&self, x: f32, y: f32, z: f32) -> Option<&ElevatedSurface> {
        self.centers
            .nearest_neighbor(&[x, y, z])
            .and_then(|e| self.surfaces.get(&e.id))
    }

    /// Uniformly random point on the surface's rectangle.
    pub fn random_point_on_surface(&self, id: &SurfaceId, rng: &mut NavRng) -> Option<ElevatedNavPoint> {
        let s = self.surfaces.get(id)?;
        let x = rng.span(s.bounds.min_x, s.bounds.max_x);
        let z = rng.span(s.bounds.min_z, s.bounds.max_z);
        Some(ElevatedNavPoint::on_surface(x, s.y, z, s.id.clone()))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn check_connection(
        &self,
        c: &ElevationConnection,
        live: impl Fn(&SurfaceId) -> bool,
    ) -> NavResult<()> {
        let Some(upper) = &c.upper.surface else {
            warn!("rejected connection {}: upper end has no surface", c.id);
            return Err(NavError::Config(format!("connection {} has no upper surface", c.id)));
        };
        for surface in std::iter::once(upper).chain(c.lower.surface.as_ref()) {
            if !live(surface) {
                warn!("rejected connection {}: unknown surface {surface}", c.id);
                return Err(NavError::UnknownSurface {
                    connection: c.id.clone(),
                    surface:    surface.clone(),
                });
            }
        }
        Ok(())
    }

    /// Drop `id` from the parent and spatial indexes (the map entry stays).
    fn detach_index(&mut self, id: &SurfaceId) {
        let Some(old) = self.surfaces.get(id) else { return };
        self.centers.remove(&SurfaceCenter::of(old));
        if let Some(parent) = old.parent {
            if let Some(ids) = self.by_parent.get_mut(&parent) {
                ids.retain(|i| i != id);
                if ids.is_empty() {
                    self.by_parent.remove(&parent);
                }
            }
        }
    }

    /// Remove a surface from the map and the R-tree, leaving `by_parent` to
    /// the caller.
    fn remove_surface_only(&mut self, id: &SurfaceId) -> Option<ElevatedSurface> {
        let surface = self.surfaces.remove(id)?;
        self.centers.remove(&SurfaceCenter::of(&surface));
        Some(surface)
    }

    /// Delete every connection that references a surface in `removed`.
    fn cascade(&mut self, removed: &BTreeSet<SurfaceId>) -> usize {
        let before = self.connections.len();
        self.connections.retain(|_, c| {
            let upper = c.upper.surface.as_ref().is_some_and(|s| removed.contains(s));
            let lower = c.lower.surface.as_ref().is_some_and(|s| removed.contains(s));
            !(upper || lower)
        });
        before - self.connections.len()
    }
}

/// Fraction along the x/z segment `a → b` closest to `(x, z)`, in `[0, 1]`.
fn project_xz(a: tn_core::Vec3, b: tn_core::Vec3, x: f32, z: f32) -> f32 {
    let (sx, sz) = (b.x - a.x, b.z - a.z);
    let len2 = sx * sx + sz * sz;
    if len2 <= f32::EPSILON {
        return 0.0;
    }
    (((x - a.x) * sx + (z - a.z) * sz) / len2).clamp(0.0, 1.0)
}
