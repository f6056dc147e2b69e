#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::constants::*;
    use super::super::particle::*;
    use super::super::resources::*;
    use crate::sim_rng::SimRng;

    const BASIN: Vec2 = Vec2::new(280.0, 160.0);

    fn run_until_settled(system: &mut SedimentationSystem, rng: &mut SimRng, speed: f32) -> usize {
        let handle = system.handle().expect("active ensemble");
        let mut frames = 0;
        while system.settled_count() < system.particles().len() && frames < 10_000 {
            system.step(handle, 1.0 / 60.0, speed, &mut rng.0);
            frames += 1;
        }
        frames
    }

    #[test]
    fn test_count_monotonic_in_efficiency() {
        let mut previous = 0;
        for step in 0..=40 {
            let eff = step as f64 * 0.05;
            let count = particle_count(eff);
            assert!(count >= previous, "count dropped at efficiency {eff}");
            assert!(count >= MIN_PARTICLES);
            assert!(count <= MAX_PARTICLES);
            previous = count;
        }
    }

    #[test]
    fn test_count_has_floor_for_poor_efficiency() {
        assert_eq!(particle_count(0.0), MIN_PARTICLES);
        assert_eq!(particle_count(-3.0), MIN_PARTICLES);
        assert!(particle_count(1.3) > particle_count(0.4));
    }

    #[test]
    fn test_radius_range_grows_with_efficiency() {
        let (lo_a, hi_a) = radius_range(0.4);
        let (lo_b, hi_b) = radius_range(1.3);
        assert!(lo_a < hi_a);
        assert!(lo_b > lo_a);
        assert!(hi_b > hi_a);
    }

    #[test]
    fn test_enter_spawns_inside_basin() {
        let mut rng = SimRng::from_seed_u64(7);
        let mut system = SedimentationSystem::default();
        system.enter(1.0, BASIN, &mut rng.0, 0.0);
        assert!(system.is_active());
        assert_eq!(system.particles().len(), particle_count(1.0));
        let (lo, hi) = radius_range(1.0);
        for p in system.particles() {
            assert!(p.radius >= lo && p.radius <= hi);
            assert!(p.position.x >= p.radius && p.position.x <= BASIN.x - p.radius);
            assert!(p.position.y >= 0.0 && p.position.y <= BASIN.y);
            assert!(!p.settled);
        }
    }

    #[test]
    fn test_reentry_same_count_fresh_positions() {
        let mut rng = SimRng::from_seed_u64(11);
        let mut system = SedimentationSystem::default();
        system.enter(0.9, BASIN, &mut rng.0, 0.0);
        let first = system.particles().to_vec();
        system.teardown();
        system.enter(0.9, BASIN, &mut rng.0, 1000.0);
        let second = system.particles().to_vec();
        assert_eq!(first.len(), second.len());
        assert_ne!(first, second);
        assert_eq!(system.visits(), 2);
    }

    #[test]
    fn test_seeded_ensembles_are_reproducible() {
        let mut a = SedimentationSystem::default();
        let mut b = SedimentationSystem::default();
        a.enter(1.1, BASIN, &mut SimRng::from_seed_u64(99).0, 0.0);
        b.enter(1.1, BASIN, &mut SimRng::from_seed_u64(99).0, 0.0);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_teardown_clears_and_is_idempotent() {
        let mut rng = SimRng::from_seed_u64(1);
        let mut system = SedimentationSystem::default();
        system.enter(1.0, BASIN, &mut rng.0, 0.0);
        let handle = system.handle().unwrap();
        assert!(system.teardown());
        assert!(!system.teardown());
        assert!(system.particles().is_empty());
        assert!(!system.step(handle, 0.016, 1.0, &mut rng.0));
    }

    #[test]
    fn test_stale_handle_after_reentry() {
        let mut rng = SimRng::from_seed_u64(3);
        let mut system = SedimentationSystem::default();
        system.enter(1.0, BASIN, &mut rng.0, 0.0);
        let stale = system.handle().unwrap();
        system.enter(1.0, BASIN, &mut rng.0, 10.0);
        let before = system.particles().to_vec();
        assert!(!system.step(stale, 0.5, 1.0, &mut rng.0));
        assert_eq!(system.particles(), before.as_slice());
    }

    #[test]
    fn test_all_particles_eventually_settle_on_floor() {
        let mut rng = SimRng::from_seed_u64(5);
        let mut system = SedimentationSystem::default();
        system.enter(1.2, BASIN, &mut rng.0, 0.0);
        let frames = run_until_settled(&mut system, &mut rng, 1.0);
        assert!(frames < 10_000);
        for p in system.particles() {
            assert!(p.settled);
            assert!((p.position.y - (BASIN.y - p.radius)).abs() < 1e-3);
            assert_eq!(p.opacity(), SETTLED_OPACITY);
        }
    }

    #[test]
    fn test_no_bounce_at_floor() {
        let mut rng = SimRng::from_seed_u64(5);
        let mut p = Particle {
            position: Vec2::new(100.0, BASIN.y - 5.0),
            radius: 4.0,
            velocity: Vec2::new(0.0, 80.0),
            settled: false,
            settle_delay_remaining: None,
            wobble_phase: 0.0,
        };
        p.step(0.1, 1.0, BASIN, &mut rng.0);
        assert!(p.on_floor());
        assert_eq!(p.velocity, Vec2::ZERO);
        let floor = p.position.y;
        for _ in 0..20 {
            p.step(0.01, 1.0, BASIN, &mut rng.0);
            assert_eq!(p.position.y, floor);
        }
    }

    #[test]
    fn test_faster_speed_sinks_faster() {
        let spawn = Particle {
            position: Vec2::new(100.0, 0.0),
            radius: 4.0,
            velocity: Vec2::ZERO,
            settled: false,
            settle_delay_remaining: None,
            wobble_phase: 0.0,
        };
        let mut rng = SimRng::from_seed_u64(0);
        let mut slow = spawn;
        let mut fast = spawn;
        for _ in 0..30 {
            slow.step(1.0 / 60.0, 1.0, BASIN, &mut rng.0);
            fast.step(1.0 / 60.0, 2.0, BASIN, &mut rng.0);
        }
        assert!(fast.position.y > slow.position.y);
    }

    #[test]
    fn test_falling_particle_opacity_lower_than_settled() {
        assert!(FALLING_OPACITY < SETTLED_OPACITY);
    }

    #[test]
    fn test_sludge_rect_is_static_floor_band() {
        let mut rng = SimRng::from_seed_u64(2);
        let mut system = SedimentationSystem::default();
        system.enter(1.0, BASIN, &mut rng.0, 0.0);
        let before = system.sludge_rect();
        run_until_settled(&mut system, &mut rng, 2.0);
        assert_eq!(system.sludge_rect(), before);
        assert_eq!(before.max.y, BASIN.y);
        assert!((before.height() - SLUDGE_DEPTH).abs() < 1e-6);
    }
}
