//! Unit tests for tn-elevated.
//!
//! Geometry is hand-built in world units; the only generated layouts come
//! from `build_scaffold`.

#[cfg(test)]
mod helpers {
    use tn_core::{StructureId, Vec3};

    use crate::{Bounds, ElevatedSurface, ElevationConnection, StairEndpoint, SurfaceRegistry};

    pub fn square(half: f32) -> Bounds {
        Bounds::new(-half, half, -half, half)
    }

    /// One deck at y = 2.5 over `[-2, 2]²`, reached by a ramp that starts on
    /// the ground at (0, 0, 4) and lands at (0, 2.5, 1.5).
    pub fn single_deck() -> SurfaceRegistry {
        let mut reg = SurfaceRegistry::new();
        reg.register_surface(ElevatedSurface::new("deck", 2.5, square(2.0)).with_parent(StructureId(1)));
        reg.register_connection(ramp()).unwrap();
        reg
    }

    pub fn ramp() -> ElevationConnection {
        ElevationConnection::new(
            "ramp",
            StairEndpoint::ground(Vec3::new(0.0, 0.0, 4.0)),
            Vec3::new(0.0, 2.5, 1.5),
            "deck",
            0.8,
        )
    }
}

// ── Surface types ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod surface {
    use tn_core::Vec3;

    use crate::{Bounds, ElevatedNavPoint, ElevatedPath, ElevatedSurface};

    #[test]
    fn bounds_overlap_honours_tolerance() {
        let a = Bounds::new(0.0, 2.0, 0.0, 2.0);
        let touching = Bounds::new(2.0, 4.0, 0.0, 2.0);
        let near = Bounds::new(2.05, 4.0, 0.0, 2.0);
        let far = Bounds::new(2.5, 4.0, 0.0, 2.0);
        assert!(a.overlaps(&touching, 0.0));
        assert!(!a.overlaps(&near, 0.0));
        assert!(a.overlaps(&near, 0.1));
        assert!(!a.overlaps(&far, 0.1));
    }

    #[test]
    fn cost_multiplier_is_floored_at_one() {
        let s = ElevatedSurface::new("s", 1.0, Bounds::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(s.cost_multiplier(), 1.0);
        assert_eq!(s.clone().with_cost(0.2).cost_multiplier(), 1.0);
        assert_eq!(s.with_cost(3.0).cost_multiplier(), 3.0);
    }

    #[test]
    fn path_length_ignores_cost() {
        let path = ElevatedPath {
            points: vec![
                ElevatedNavPoint::ground(0.0, 0.0, 0.0),
                ElevatedNavPoint::ground(3.0, 0.0, 0.0),
                ElevatedNavPoint::ground(3.0, 4.0, 0.0),
            ],
            total_cost: 99.0,
        };
        assert!((path.length() - 7.0).abs() < 1e-5);
        assert_eq!(path.positions()[2], Vec3::new(3.0, 4.0, 0.0));
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use tn_core::{ConnectionId, NavError, NavRng, StructureId, SurfaceId, Vec3};

    use super::helpers::{ramp, single_deck, square};
    use crate::{
        Bounds, ElevatedNavPoint, ElevatedPathfinder, ElevatedSurface, ElevationConnection,
        ScaffoldLayout, StairEndpoint, SurfaceRegistry,
    };

    #[test]
    fn connection_to_unknown_surface_is_rejected() {
        let mut reg = SurfaceRegistry::new();
        let err = reg.register_connection(ramp()).unwrap_err();
        assert_eq!(
            err,
            NavError::UnknownSurface {
                connection: ConnectionId::new("ramp"),
                surface:    SurfaceId::new("deck"),
            }
        );
        assert_eq!(reg.connection_count(), 0);
    }

    #[test]
    fn connections_can_be_dropped_alone() {
        let mut reg = single_deck();
        let ramp_id = ConnectionId::new("ramp");
        assert!(reg.unregister_connection(&ramp_id).is_some());
        assert!(reg.unregister_connection(&ramp_id).is_none());
        assert_eq!(reg.surface_count(), 1);
        assert!(reg.ground_connections().is_empty());

        reg.clear();
        assert!(reg.is_empty());
        assert!(reg.surface(&SurfaceId::new("deck")).is_none());
    }

    #[test]
    fn bad_layout_leaves_registry_untouched() {
        let mut reg = SurfaceRegistry::new();
        let layout = ScaffoldLayout {
            parent:      StructureId(3),
            surfaces:    vec![ElevatedSurface::new("a", 2.0, square(1.0)).with_parent(StructureId(3))],
            connections: vec![ElevationConnection::new(
                "bad",
                StairEndpoint::on(Vec3::new(0.0, 2.0, 0.0), "a"),
                Vec3::new(0.0, 4.0, 0.0),
                "missing",
                0.8,
            )],
        };
        assert!(reg.register_layout(layout).is_err());
        assert!(reg.is_empty());
        assert!(reg.surfaces_for_parent(StructureId(3)).is_empty());
    }

    #[test]
    fn removing_a_parent_cascades_to_its_stairs() {
        let mut reg = single_deck();
        reg.register_surface(ElevatedSurface::new("shed", 1.0, Bounds::new(10.0, 12.0, 0.0, 2.0)).with_parent(StructureId(2)));
        reg.register_connection(ElevationConnection::new(
            "shed-steps",
            StairEndpoint::ground(Vec3::new(11.0, 0.0, 3.0)),
            Vec3::new(11.0, 1.0, 1.5),
            "shed",
            0.8,
        ))
        .unwrap();

        assert_eq!(reg.unregister_by_parent(StructureId(1)), 1);
        assert!(reg.surface(&SurfaceId::new("deck")).is_none());
        assert!(reg.connection(&ConnectionId::new("ramp")).is_none());
        assert_eq!(reg.surface_count(), 1);
        assert_eq!(reg.connection_count(), 1);
        assert_eq!(reg.unregister_by_parent(StructureId(1)), 0);
    }

    #[test]
    fn unregister_surface_cascades() {
        let mut reg = single_deck();
        assert!(reg.unregister_surface(&SurfaceId::new("deck")).is_some());
        assert_eq!(reg.connection_count(), 0);
        assert!(reg.find_nearest_surface(0.0, 2.5, 0.0).is_none());
    }

    #[test]
    fn re_registering_moves_parent_ownership() {
        let mut reg = single_deck();
        reg.register_surface(ElevatedSurface::new("deck", 2.5, square(2.0)).with_parent(StructureId(9)));
        assert!(reg.surfaces_for_parent(StructureId(1)).is_empty());
        assert_eq!(reg.surfaces_for_parent(StructureId(9)).len(), 1);
        // The ramp now lands on the replacement.
        assert_eq!(reg.connection_count(), 1);
    }

    #[test]
    fn surface_at_prefers_closest_height() {
        let mut reg = SurfaceRegistry::new();
        reg.register_surface(ElevatedSurface::new("low", 2.5, square(2.0)));
        reg.register_surface(ElevatedSurface::new("high", 5.0, square(2.0)));

        assert_eq!(reg.surface_at(0.0, 0.0, 4.8, 1.0).unwrap().id.as_str(), "high");
        assert_eq!(reg.surface_at(0.0, 0.0, 2.0, 1.0).unwrap().id.as_str(), "low");
        assert!(reg.surface_at(0.0, 0.0, 3.75, 0.5).is_none());
        assert!(reg.surface_at(5.0, 0.0, 2.5, 1.0).is_none());

        let stack: Vec<&str> = reg.surfaces_at_xz(1.0, 1.0).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(stack, ["low", "high"]);
    }

    #[test]
    fn connection_at_follows_the_slope() {
        let reg = single_deck();
        // Halfway up the ramp (y = 1.25) the flight is at z = 2.75.
        assert_eq!(reg.connection_at(0.0, 2.75, 1.25, 0.1).unwrap().id.as_str(), "ramp");
        assert!(reg.connection_at(0.0, 3.9, 1.25, 0.1).is_none());
        assert!(reg.connection_at(3.0, 2.75, 1.25, 0.1).is_none());
        assert!(reg.connection_at(0.0, 2.75, 4.0, 0.1).is_none());
    }

    #[test]
    fn nearest_surface_by_center() {
        let mut reg = single_deck();
        reg.register_surface(ElevatedSurface::new("far", 2.5, Bounds::new(20.0, 22.0, 0.0, 2.0)));
        assert_eq!(reg.find_nearest_surface(1.0, 2.0, 1.0).unwrap().id.as_str(), "deck");
        assert_eq!(reg.find_nearest_surface(18.0, 2.0, 1.0).unwrap().id.as_str(), "far");
    }

    #[test]
    fn random_points_stay_on_the_parent() {
        let reg = single_deck();
        let finder = ElevatedPathfinder::default();
        let mut rng = NavRng::new(42);
        for _ in 0..20 {
            let p = finder.find_random_point_for_parent(&reg, StructureId(1), &mut rng).unwrap();
            let ElevatedNavPoint::OnSurface { pos, surface } = p else {
                panic!("expected a surface point");
            };
            assert_eq!(surface.as_str(), "deck");
            assert!(square(2.0).contains(pos.x, pos.z));
            assert_eq!(pos.y, 2.5);
        }
        assert!(finder.find_random_point_for_parent(&reg, StructureId(5), &mut rng).is_none());
    }
}

// ── Scaffold layout ───────────────────────────────────────────────────────────

#[cfg(test)]
mod scaffold {
    use tn_core::{ScaffoldConfig, StructureId};

    use crate::{build_scaffold, Footprint, ScaffoldLayout, Side};

    fn layout() -> ScaffoldLayout {
        build_scaffold(StructureId(7), Footprint::new(0.0, 0.0, 4.0, 6.0), &[2.5, 5.0], 1.0)
    }

    #[test]
    fn four_platforms_per_level_and_one_stair_each() {
        let l = layout();
        assert_eq!(l.surfaces.len(), 8);
        assert_eq!(l.connections.len(), 2);
        assert!(l.surfaces.iter().all(|s| s.parent == Some(StructureId(7))));
        assert_eq!(l.surface(1, Side::Front).unwrap().id.as_str(), "scaffold-7-L1-front");
        assert_eq!(l.connections[1].id.as_str(), "scaffold-7-stair-2");
    }

    #[test]
    fn heights_follow_terrain() {
        let l = layout();
        assert_eq!(l.surface(1, Side::Back).unwrap().y, 3.5);
        assert_eq!(l.surface(2, Side::Left).unwrap().y, 6.0);
        assert_eq!(l.connections[0].lower.pos.y, 1.0);
    }

    #[test]
    fn platforms_clear_the_footprint_and_abut() {
        let l = layout();
        let front = l.surface(1, Side::Front).unwrap().bounds;
        let left = l.surface(1, Side::Left).unwrap().bounds;
        let right = l.surface(1, Side::Right).unwrap().bounds;
        let back = l.surface(1, Side::Back).unwrap().bounds;

        // Footprint spans x ±2, z ±3; clearance is 0.3.
        assert!((front.min_z - 3.3).abs() < 1e-5);
        assert!((left.max_x + 2.3).abs() < 1e-5);
        assert_eq!(left.max_z, front.min_z);
        assert_eq!(right.min_z, back.max_z);
        assert_eq!(front.min_x, left.min_x);
        assert_eq!(front.max_x, right.max_x);
    }

    #[test]
    fn flights_longer_than_the_front_are_centred() {
        let config = ScaffoldConfig { stair_run: 6.0, ..Default::default() };
        config.validate().unwrap();
        let l = ScaffoldLayout::build(StructureId(2), Footprint::new(5.0, 0.0, 1.0, 1.0), 0.0, &config);

        // Front spans 1 + 2 * (0.3 + 1.2) = 4 units, narrower than the run.
        let front = l.surface(1, Side::Front).unwrap().bounds;
        assert!(front.max_x - front.min_x < config.stair_run);
        assert_eq!(l.connections.len(), 2);
        let mid = (front.min_x + front.max_x) * 0.5;
        for c in &l.connections {
            let flight_mid = (c.lower.pos.x + c.upper.pos.x) * 0.5;
            assert!((flight_mid - mid).abs() < 1e-4, "{} centred at {flight_mid}", c.id.as_str());
        }
    }

    #[test]
    fn stairs_land_on_their_platforms() {
        let l = layout();
        let ground = &l.connections[0];
        assert!(ground.starts_on_ground());
        let l1 = l.surface(1, Side::Front).unwrap();
        assert!(!l1.bounds.contains(ground.lower.pos.x, ground.lower.pos.z));
        assert!(l1.bounds.contains(ground.upper.pos.x, ground.upper.pos.z));

        let upper = &l.connections[1];
        assert_eq!(upper.lower.surface.as_ref(), Some(&l1.id));
        let l2 = l.surface(2, Side::Front).unwrap();
        assert!(l1.bounds.contains(upper.lower.pos.x, upper.lower.pos.z));
        assert!(l2.bounds.contains(upper.upper.pos.x, upper.upper.pos.z));
        // Successive flights alternate sides.
        assert!(ground.upper.pos.x < 0.0);
        assert!(upper.upper.pos.x > 0.0);
    }

    #[test]
    fn config_dimensions_are_used() {
        let config = ScaffoldConfig { platform_depth: 2.0, level_offsets: vec![3.0], ..Default::default() };
        let l = ScaffoldLayout::build(StructureId(1), Footprint::new(10.0, 10.0, 2.0, 2.0), 0.0, &config);
        let front = l.surface(1, Side::Front).unwrap().bounds;
        assert!((front.max_z - front.min_z - 2.0).abs() < 1e-5);
        assert!(l.surface(2, Side::Front).is_none());
    }

    #[test]
    fn no_levels_no_layout() {
        let l = build_scaffold(StructureId(1), Footprint::new(0.0, 0.0, 2.0, 2.0), &[], 0.0);
        assert!(l.is_empty());
        assert!(l.connections.is_empty());
    }
}

// ── Pathfinding ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod pathfinding {
    use tn_core::{StructureId, SurfaceId, Vec3};

    use super::helpers::single_deck;
    use crate::{
        build_scaffold, Bounds, ElevatedNavPoint, ElevatedPathfinder, ElevatedSurface,
        ElevationConnection, Footprint, Side, StairEndpoint, SurfaceRegistry,
    };

    #[test]
    fn climbs_the_ramp_onto_the_deck() {
        let reg = single_deck();
        let start = ElevatedNavPoint::ground(0.0, 0.0, 4.3);
        let goal = ElevatedNavPoint::on_surface(0.0, 2.5, 0.0, "deck");

        let path = ElevatedPathfinder::default().find_path(&reg, &start, &goal).unwrap();
        assert_eq!(path.points.first(), Some(&start));
        assert_eq!(path.points.last(), Some(&goal));
        assert!(path.points.iter().any(|p| p.is_stair()));
        // Straight-line distance is a lower bound on cost.
        assert!(path.total_cost >= start.pos().distance(goal.pos()) - 1e-4);
        assert!(path.total_cost >= path.length() - 1e-4);
    }

    #[test]
    fn ground_start_too_far_from_any_stair() {
        let reg = single_deck();
        let start = ElevatedNavPoint::ground(0.0, 0.0, 9.0);
        let goal = ElevatedNavPoint::on_surface(0.0, 2.5, 0.0, "deck");
        assert!(ElevatedPathfinder::default().find_path(&reg, &start, &goal).is_none());
    }

    #[test]
    fn empty_registry_is_unreachable() {
        let reg = SurfaceRegistry::new();
        let start = ElevatedNavPoint::ground(0.0, 0.0, 0.0);
        let goal = ElevatedNavPoint::on_surface(0.0, 2.5, 0.0, "deck");
        assert!(ElevatedPathfinder::default().find_path(&reg, &start, &goal).is_none());
        assert!(ElevatedPathfinder::default()
            .find_path_from_ground(&reg, 0.0, 0.0, 0.0, &SurfaceId::new("deck"))
            .is_none());
    }

    #[test]
    fn from_ground_targets_the_surface_center() {
        let reg = single_deck();
        let path = ElevatedPathfinder::default()
            .find_path_from_ground(&reg, 0.2, 4.2, 0.0, &SurfaceId::new("deck"))
            .unwrap();
        assert_eq!(path.points.last().unwrap().pos(), Vec3::new(0.0, 2.5, 0.0));
    }

    /// Deck over `[-2, 2]²` at y = 2.5 whose stair climbs from the origin
    /// and lands past the deck's far edge at z = 4.
    fn deck_with_overhanging_landing() -> SurfaceRegistry {
        let mut reg = SurfaceRegistry::new();
        reg.register_surface(ElevatedSurface::new("s", 2.5, Bounds::new(-2.0, 2.0, -2.0, 2.0)));
        reg.register_connection(ElevationConnection::new(
            "up",
            StairEndpoint::ground(Vec3::ZERO),
            Vec3::new(0.0, 2.5, 4.0),
            "s",
            0.8,
        ))
        .unwrap();
        reg
    }

    #[test]
    fn landing_past_the_edge_steps_onto_the_platform() {
        let reg = deck_with_overhanging_landing();
        let finder = ElevatedPathfinder::default();

        let up = finder.find_path_from_ground(&reg, 0.0, 0.0, 0.0, &SurfaceId::new("s")).unwrap();
        assert_eq!(up.points.last().unwrap().pos(), Vec3::new(0.0, 2.5, 0.0));
        assert!(up.points.iter().any(|p| p.is_stair()));
        assert!(up.points.iter().any(|p| p.pos() == Vec3::new(0.0, 2.5, 2.0)));

        let start = ElevatedNavPoint::on_surface(0.0, 2.5, 0.0, "s");
        let down = finder.find_path(&reg, &start, &ElevatedNavPoint::ground(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(down.points.last().unwrap().pos(), Vec3::ZERO);
    }

    #[test]
    fn inverted_bounds_clamp_without_panicking() {
        let b = Bounds::new(1.0, -1.0, 0.0, 2.0);
        assert_eq!(b.clamp(5.0, 5.0), (-1.0, 2.0));
    }

    #[test]
    fn descends_back_to_the_ground() {
        let reg = single_deck();
        let start = ElevatedNavPoint::on_surface(1.0, 2.5, -1.0, "deck");
        let goal = ElevatedNavPoint::ground(0.0, 0.0, 4.0);
        let path = ElevatedPathfinder::default().find_path(&reg, &start, &goal).unwrap();
        assert_eq!(path.points.last(), Some(&goal));
    }

    #[test]
    fn walks_across_abutting_platforms() {
        let mut reg = SurfaceRegistry::new();
        reg.register_surface(ElevatedSurface::new("a", 3.0, Bounds::new(0.0, 2.0, 0.0, 2.0)));
        reg.register_surface(ElevatedSurface::new("b", 3.0, Bounds::new(2.0, 4.0, 0.0, 2.0)));
        let start = ElevatedNavPoint::on_surface(0.5, 3.0, 1.0, "a");
        let goal = ElevatedNavPoint::on_surface(3.5, 3.0, 1.0, "b");

        let path = ElevatedPathfinder::default().find_path(&reg, &start, &goal).unwrap();
        assert!(!path.points.iter().any(|p| p.is_stair()));
        assert!(path.points.iter().any(|p| p.surface_id().is_some_and(|s| s.as_str() == "b")));
        assert!((path.total_cost - 3.0).abs() < 1e-3);
    }

    #[test]
    fn gaps_and_steps_are_not_walkable() {
        let mut reg = SurfaceRegistry::new();
        reg.register_surface(ElevatedSurface::new("a", 3.0, Bounds::new(0.0, 2.0, 0.0, 2.0)));
        reg.register_surface(ElevatedSurface::new("gap", 3.0, Bounds::new(2.5, 4.0, 0.0, 2.0)));
        reg.register_surface(ElevatedSurface::new("step", 4.0, Bounds::new(-2.0, 0.0, 0.0, 2.0)));
        let finder = ElevatedPathfinder::default();
        let start = ElevatedNavPoint::on_surface(1.0, 3.0, 1.0, "a");

        let across = ElevatedNavPoint::on_surface(3.5, 3.0, 1.0, "gap");
        assert!(finder.find_path(&reg, &start, &across).is_none());
        let up = ElevatedNavPoint::on_surface(-1.0, 4.0, 1.0, "step");
        assert!(finder.find_path(&reg, &start, &up).is_none());
    }

    #[test]
    fn costly_surfaces_raise_path_cost() {
        let mut reg = SurfaceRegistry::new();
        reg.register_surface(ElevatedSurface::new("mud", 1.0, Bounds::new(0.0, 4.0, 0.0, 1.0)).with_cost(2.0));
        let start = ElevatedNavPoint::on_surface(0.0, 1.0, 0.5, "mud");
        let goal = ElevatedNavPoint::on_surface(4.0, 1.0, 0.5, "mud");
        let path = ElevatedPathfinder::default().find_path(&reg, &start, &goal).unwrap();
        assert!((path.total_cost - 8.0).abs() < 1e-3);
    }

    #[test]
    fn scaffold_reaches_every_level_and_side() {
        let mut reg = SurfaceRegistry::new();
        let layout = build_scaffold(StructureId(4), Footprint::new(0.0, 0.0, 4.0, 6.0), &[2.5, 5.0], 0.0);
        let top_front = layout.surface(2, Side::Front).unwrap().id.clone();
        let low_back = layout.surface(1, Side::Back).unwrap().id.clone();
        reg.register_layout(layout).unwrap();

        let finder = ElevatedPathfinder::default();
        // The ground flight starts at (-1, 0, 6.5).
        let up = finder.find_path_from_ground(&reg, -1.0, 7.0, 0.0, &top_front).unwrap();
        assert_eq!(up.points.iter().filter(|p| p.is_stair()).count(), 2);
        assert!(finder.find_path_from_ground(&reg, -1.0, 7.0, 0.0, &low_back).is_some());
    }

    #[test]
    fn removed_scaffold_is_unreachable() {
        let mut reg = SurfaceRegistry::new();
        let layout = build_scaffold(StructureId(4), Footprint::new(0.0, 0.0, 4.0, 6.0), &[2.5], 0.0);
        let front = layout.surface(1, Side::Front).unwrap().id.clone();
        reg.register_layout(layout).unwrap();
        let finder = ElevatedPathfinder::default();
        assert!(finder.find_path_from_ground(&reg, -1.0, 7.0, 0.0, &front).is_some());

        assert_eq!(reg.unregister_by_parent(StructureId(4)), 4);
        assert!(reg.is_empty());
        let goal = ElevatedNavPoint::on_surface(0.0, 2.5, 3.9, front);
        assert!(finder.find_path(&reg, &ElevatedNavPoint::ground(-1.0, 0.0, 7.0), &goal).is_none());
    }
}
