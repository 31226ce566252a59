//! Pool exhaustion contracts: fixed capacity, silent drop, slot reuse.

use campfire_sim_core::sim::TuningProfile;
use campfire_sim_core::{Campfire, FuelKind, ParticlePool, Pipeline, SmokePool, SpritePool, Vec2};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_sprite_pool_overflow_is_capped_without_panicking() {
    let mut rng = SmallRng::seed_from_u64(401);
    let mut pool = SpritePool::new(64, 24);
    let mut profile = TuningProfile::hearth();
    profile.flame_spawn_rate = 1000.0;

    // One short tick demanding hundreds of sprites; dt stays below the
    // shortest possible life so every granted spawn survives the tick.
    pool.update(0.2, 1.0, &[], 4.0, &profile, &mut rng);

    assert_eq!(pool.visible_flame_count(), pool.flame_capacity());
    assert_eq!(pool.visible_spark_count(), pool.spark_capacity());
}

#[test]
fn test_particle_pool_overflow_is_capped_without_panicking() {
    let mut rng = SmallRng::seed_from_u64(402);
    let mut pool = ParticlePool::new(32);
    let profile = TuningProfile::classic();

    pool.emit(Vec2::zeros(), 1.0, 2.0, 30.0, &profile, &mut rng);
    assert_eq!(pool.active_count(), pool.capacity());
}

#[test]
fn test_smoke_pool_overflow_is_capped_without_panicking() {
    let mut rng = SmallRng::seed_from_u64(403);
    let mut pool = SmokePool::new(8);
    for _ in 0..100 {
        pool.puff(Vec2::zeros(), &mut rng);
    }
    assert_eq!(pool.active_count(), 8);
}

#[test]
fn test_saturated_pool_drains_and_refills() {
    let mut rng = SmallRng::seed_from_u64(404);
    let mut pool = SpritePool::new(16, 8);
    let mut profile = TuningProfile::hearth();
    profile.flame_spawn_rate = 400.0;

    pool.update(0.2, 1.0, &[], 1.0, &profile, &mut rng);
    assert_eq!(pool.visible_flame_count(), 16);

    // Everything expires within the longest sprite life (1.8s).
    pool.update(2.0, 0.0, &[], 1.0, &profile, &mut rng);
    assert_eq!(pool.visible_flame_count(), 0);

    pool.update(0.2, 1.0, &[], 1.0, &profile, &mut rng);
    assert_eq!(pool.visible_flame_count(), 16);
}

#[test]
fn test_session_sprite_counts_never_exceed_capacity() {
    let mut fire = Campfire::with_seed(Pipeline::Scene, 405);
    for _ in 0..10 {
        fire.deposit_fuel(FuelKind::Log);
    }
    fire.start().unwrap();

    for _ in 0..2000 {
        fire.advance_physics(0.016);
        fire.tick(0.016);

        assert!(fire.sprites().visible_flame_count() <= fire.sprites().flame_capacity());
        assert!(fire.sprites().visible_spark_count() <= fire.sprites().spark_capacity());
    }
}

#[test]
fn test_session_particle_counts_never_exceed_capacity() {
    let mut fire = Campfire::with_seed(Pipeline::Planar, 406);
    for _ in 0..10 {
        fire.deposit_fuel(FuelKind::Log);
    }
    fire.start().unwrap();

    for _ in 0..2000 {
        fire.tick(0.016);
        assert!(fire.particles().active_count() <= fire.particles().capacity());
    }
}
