//! Unit tests for tn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, StructureId, SurfaceId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(StructureId::default(), StructureId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(StructureId(7).to_string(), "StructureId(7)");
        assert_eq!(SurfaceId::from("deck-a").to_string(), "deck-a");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GridPos, Vec3};

    #[test]
    fn distances() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 12.0, 4.0);
        assert!((a.distance(b) - 13.0).abs() < 1e-5);
        assert!((a.distance_xz(b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn lerp_midpoint() {
        let m = Vec3::new(0.0, 0.0, 0.0).lerp(Vec3::new(2.0, 4.0, -2.0), 0.5);
        assert_eq!(m, Vec3::new(1.0, 2.0, -1.0));
    }

    #[test]
    fn grid_pos_ordering_is_floor_major() {
        assert!(GridPos::new(9, 9, 0) < GridPos::new(0, 0, 1));
        assert!(GridPos::new(0, 1, 0) < GridPos::new(1, 0, 0));
    }

    #[test]
    fn chebyshev_ignores_floor() {
        assert_eq!(GridPos::new(0, 0, 0).chebyshev(GridPos::new(2, -1, 3)), 2);
    }
}

#[cfg(test)]
mod config {
    use crate::{
        ElevatedPathConfig, EntranceDef, NavError, NavGridConfig, ScaffoldConfig, StairDef,
        StairDirection, TowerNavConfig, WorldConfig,
    };

    #[test]
    fn defaults_are_valid() {
        NavGridConfig::default().validate().unwrap();
        TowerNavConfig::default().validate().unwrap();
        ElevatedPathConfig::default().validate().unwrap();
        ScaffoldConfig::default().validate().unwrap();
    }

    #[test]
    fn inverted_annulus_rejected() {
        let cfg = NavGridConfig { inner_radius: 5.0, outer_radius: 2.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(NavError::Config(_))));
    }

    #[test]
    fn stair_landing_outside_interior_rejected() {
        let cfg = TowerNavConfig {
            stairs: vec![StairDef { x: 3, z: 0, floor: 1, direction: StairDirection::East }],
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(NavError::StairOutsideInterior { .. })));
    }

    #[test]
    fn top_floor_stair_rejected() {
        let cfg = TowerNavConfig {
            stairs: vec![StairDef { x: 0, z: 0, floor: 3, direction: StairDirection::North }],
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn landing_doubling_as_base_is_a_conflict() {
        let cfg = TowerNavConfig {
            stairs: vec![
                StairDef { x: 0, z: 0, floor: 1, direction: StairDirection::North },
                StairDef { x: 0, z: 1, floor: 2, direction: StairDirection::North },
            ],
            entrance: None,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(NavError::StairConflict(_))));
    }

    #[test]
    fn entrance_on_stair_cell_is_a_conflict() {
        let cfg = TowerNavConfig {
            entrance: Some(EntranceDef { ground: (0, -4), interior: (-2, -2) }),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(NavError::StairConflict(_))));
    }

    #[test]
    fn world_config_checks_every_section() {
        WorldConfig::default().validate().unwrap();

        let slow = WorldConfig { default_speed: -1.0, ..Default::default() };
        assert!(matches!(slow.validate(), Err(NavError::Config(_))));

        let mut bad_grid = WorldConfig::default();
        bad_grid.grid.cell_size = 0.0;
        assert!(bad_grid.validate().is_err());
    }

    #[test]
    fn scaffold_levels_must_ascend() {
        let cfg = ScaffoldConfig { level_offsets: vec![3.0, 2.0], ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::NavRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = NavRng::new(7);
        let mut b = NavRng::new(7);
        for _ in 0..8 {
            assert_eq!(a.unit().to_bits(), b.unit().to_bits());
        }
    }

    #[test]
    fn span_stays_in_range() {
        let mut rng = NavRng::new(1);
        for _ in 0..100 {
            let v = rng.span(-2.0, 3.0);
            assert!((-2.0..=3.0).contains(&v));
        }
        assert_eq!(rng.span(4.0, 4.0), 4.0);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn clock_counts_steps_and_seconds() {
        let mut clock = SimClock::new();
        assert_eq!(clock.advance(0.5), Tick(1));
        assert_eq!(clock.advance(0.25), Tick(2));
        assert!((clock.elapsed - 0.75).abs() < 1e-9);
    }

    #[test]
    fn negative_dt_adds_no_time() {
        let mut clock = SimClock::new();
        clock.advance(-1.0);
        assert_eq!(clock.now, Tick(1));
        assert_eq!(clock.elapsed, 0.0);
        assert_eq!(Tick(4).to_string(), "T4");
    }
}
