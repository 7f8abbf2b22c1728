//! Procedural level layout
//!
//! A level is built in one pass from the level number and the current world
//! size: ground, evenly slotted ledges, flowers, clouds and bees.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Bee, Cloud, Flower, Platform};
use crate::WorldSize;
use crate::consts::*;
use crate::tuning::Tuning;

/// Everything a level start replaces
#[derive(Debug, Clone)]
pub struct Level {
    /// Ground is always first
    pub platforms: Vec<Platform>,
    pub flowers: Vec<Flower>,
    pub clouds: Vec<Cloud>,
    pub bees: Vec<Bee>,
}

/// Generate the layout for `level`
pub fn generate_level(level: u32, world: WorldSize, tuning: &Tuning, rng: &mut Pcg32) -> Level {
    let width = world.width.max(0.0);
    let height = world.height.max(0.0);
    let target = tuning.target_score(level) as usize;

    // Ground plus ledges centred on evenly spaced slots (neighbours may overlap)
    let ledge_count = tuning.platform_count(level);
    let mut platforms = Vec::with_capacity(ledge_count as usize + 1);
    platforms.push(Platform::new(0.0, world.ground_y(), width));

    let slot = width / (ledge_count as f32 + 1.0);
    let vertical_span = (height - 300.0).max(0.0);
    for i in 0..ledge_count {
        let center = (i as f32 + 1.0) * slot;
        let y = height - 150.0 - rng.random::<f32>() * vertical_span;
        let ledge_width = 80.0 + rng.random::<f32>() * 100.0;
        platforms.push(Platform::new(center - ledge_width / 2.0, y, ledge_width));
    }

    // Chance pass first, then top up so the target is always reachable.
    // Excess from the chance pass is kept.
    let chance = tuning.flower_chance.clamp(0.0, 1.0);
    let mut flowers = Vec::with_capacity(target.max(platforms.len()));
    for platform in &platforms {
        if rng.random_bool(chance) {
            flowers.push(flower_on(platform, rng));
        }
    }
    while flowers.len() < target {
        let platform = &platforms[rng.random_range(0..platforms.len())];
        flowers.push(flower_on(platform, rng));
    }

    let clouds = (0..CLOUD_COUNT)
        .map(|_| {
            let x = rng.random::<f32>() * width;
            let y = 50.0 + rng.random::<f32>() * 100.0;
            let speed = 0.2 + rng.random::<f32>() * 0.5;
            Cloud {
                pos: Vec2::new(x, y),
                speed,
                size: CLOUD_SIZE + rng.random::<f32>() * 20.0,
            }
        })
        .collect();

    let bees = (0..tuning.bee_count(level))
        .map(|_| {
            let platform = &platforms[rng.random_range(0..platforms.len())];
            Bee {
                pos: Vec2::new(platform.pos.x, platform.pos.y - BEE_LIFT),
                patrol_start: platform.pos.x - BEE_PATROL_OVERHANG,
                patrol_end: platform.pos.x + platform.width + BEE_PATROL_OVERHANG,
                direction: 1.0,
                speed: tuning.bee_speed,
            }
        })
        .collect();

    log::debug!(
        "Generated level {}: {} platforms, {} flowers (target {})",
        level,
        platforms.len(),
        flowers.len(),
        target
    );

    Level {
        platforms,
        flowers,
        clouds,
        bees,
    }
}

/// A flower resting just above `platform` at a random spot along it
fn flower_on(platform: &Platform, rng: &mut Pcg32) -> Flower {
    let x = platform.pos.x + rng.random::<f32>() * (platform.width - FLOWER_SIZE);
    Flower::new(Vec2::new(x, platform.pos.y - FLOWER_LIFT), rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn world() -> WorldSize {
        WorldSize::new(1024.0, 640.0)
    }

    #[test]
    fn test_ground_first_and_full_width() {
        let mut rng = Pcg32::seed_from_u64(1);
        let level = generate_level(1, world(), &Tuning::default(), &mut rng);
        let ground = &level.platforms[0];
        assert_eq!(ground.pos, Vec2::new(0.0, 590.0));
        assert_eq!(ground.width, 1024.0);
        assert_eq!(level.platforms.len(), 1 + 7);
    }

    #[test]
    fn test_ledge_layout() {
        let mut rng = Pcg32::seed_from_u64(2);
        let level = generate_level(2, world(), &Tuning::default(), &mut rng);
        let ledges = &level.platforms[1..];
        assert_eq!(ledges.len(), 9);

        let slot = 1024.0 / 10.0;
        for (i, ledge) in ledges.iter().enumerate() {
            assert!(ledge.width >= 80.0 && ledge.width < 180.0);
            let center = ledge.pos.x + ledge.width / 2.0;
            assert!((center - (i as f32 + 1.0) * slot).abs() < 0.01);
            // Between 150 above the bottom and 150 below the top
            assert!(ledge.pos.y <= 490.0 && ledge.pos.y > 150.0);
        }
    }

    #[test]
    fn test_clouds_and_bees() {
        let mut rng = Pcg32::seed_from_u64(3);
        let level = generate_level(4, world(), &Tuning::default(), &mut rng);
        assert_eq!(level.clouds.len(), 5);
        for cloud in &level.clouds {
            assert!(cloud.speed >= 0.2 && cloud.speed < 0.7);
            assert!(cloud.pos.y >= 50.0 && cloud.pos.y < 150.0);
        }

        assert_eq!(level.bees.len(), 3);
        for bee in &level.bees {
            assert!(bee.patrol_start < bee.patrol_end);
            assert!((bee.pos.x - (bee.patrol_start + 50.0)).abs() < 1e-3);
            assert_eq!(bee.direction, 1.0);
            assert_eq!(bee.speed, 2.0);
        }
    }

    #[test]
    fn test_first_level_has_no_bees() {
        let mut rng = Pcg32::seed_from_u64(4);
        let level = generate_level(1, world(), &Tuning::default(), &mut rng);
        assert!(level.bees.is_empty());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let tuning = Tuning::default();
        let a = generate_level(5, world(), &tuning, &mut Pcg32::seed_from_u64(42));
        let b = generate_level(5, world(), &tuning, &mut Pcg32::seed_from_u64(42));
        let pa: Vec<_> = a.platforms.iter().map(|p| (p.pos, p.width)).collect();
        let pb: Vec<_> = b.platforms.iter().map(|p| (p.pos, p.width)).collect();
        assert_eq!(pa, pb);
        assert_eq!(a.flowers.len(), b.flowers.len());
    }

    #[test]
    fn test_degenerate_tuning() {
        let tuning = Tuning {
            base_target: 0,
            target_per_level: 0,
            base_platforms: 0,
            platforms_per_level: 0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let level = generate_level(1, world(), &tuning, &mut rng);
        assert_eq!(level.platforms.len(), 1);
        assert!(level.flowers.len() <= 1);
        assert!(level.bees.is_empty());
    }

    #[test]
    fn test_tiny_world_does_not_panic() {
        let mut rng = Pcg32::seed_from_u64(6);
        let level = generate_level(3, WorldSize::new(10.0, 10.0), &Tuning::default(), &mut rng);
        assert!(level.flowers.len() >= 20);
    }

    proptest! {
        #[test]
        fn flowers_always_cover_target(seed in 0u64..500, level in 1u32..=50) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let generated = generate_level(level, world(), &tuning, &mut rng);
            prop_assert!(generated.flowers.len() >= tuning.target_score(level) as usize);
            prop_assert!(generated.flowers.iter().all(|f| !f.collected));
        }
    }
}
