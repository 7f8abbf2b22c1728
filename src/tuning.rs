//! Data-driven game balance
//!
//! Every number here is in pixels per tick or whole seconds. Defaults are the
//! shipped balance; a JSON override may replace any subset of fields.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_strength: f32,
    pub move_speed: f32,
    /// Horizontal velocity multiplier when no direction is held
    pub friction: f32,
    /// Minimum drag distance before a drag steers the butterfly
    pub drag_threshold: f32,

    // === Hazards ===
    pub bee_speed: f32,
    /// Seconds removed from the clock per bee hit
    pub hit_penalty_secs: u32,

    // === Particles ===
    pub particle_gravity: f32,
    pub particle_decay: f32,

    // === Level progression ===
    pub base_target: u32,
    pub target_per_level: u32,
    pub base_time_secs: u32,
    pub time_step_per_level: u32,
    pub min_time_secs: u32,
    pub base_platforms: u32,
    pub platforms_per_level: u32,
    /// Chance that a platform gets a flower in the first seeding pass
    pub flower_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_strength: -12.0,
            move_speed: 5.0,
            friction: 0.8,
            drag_threshold: 5.0,

            bee_speed: 2.0,
            hit_penalty_secs: 5,

            particle_gravity: 0.2,
            particle_decay: 0.02,

            base_target: 10,
            target_per_level: 5,
            base_time_secs: 60,
            time_step_per_level: 5,
            min_time_secs: 30,
            base_platforms: 5,
            platforms_per_level: 2,
            flower_chance: 0.7,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Flowers needed to clear a level
    pub fn target_score(&self, level: u32) -> u32 {
        let steps = level.saturating_sub(1);
        self.base_target
            .saturating_add(steps.saturating_mul(self.target_per_level))
    }

    /// Starting clock for a level, never below the floor
    pub fn time_budget(&self, level: u32) -> u32 {
        let steps = level.saturating_sub(1);
        self.base_time_secs
            .saturating_sub(steps.saturating_mul(self.time_step_per_level))
            .max(self.min_time_secs)
    }

    /// Raised platforms generated on top of the ground
    pub fn platform_count(&self, level: u32) -> u32 {
        self.base_platforms
            .saturating_add(level.saturating_mul(self.platforms_per_level))
    }

    /// Bees patrolling a level
    pub fn bee_count(&self, level: u32) -> u32 {
        level.saturating_sub(1).min(crate::consts::MAX_BEES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_progression() {
        let t = Tuning::default();
        assert_eq!((t.target_score(1), t.time_budget(1)), (10, 60));
        assert_eq!((t.target_score(3), t.time_budget(3)), (20, 50));
        // Raw budget would be 15, the floor wins
        assert_eq!((t.target_score(10), t.time_budget(10)), (55, 30));
    }

    #[test]
    fn test_counts() {
        let t = Tuning::default();
        assert_eq!(t.platform_count(1), 7);
        assert_eq!(t.platform_count(4), 13);
        assert_eq!(t.bee_count(1), 0);
        assert_eq!(t.bee_count(3), 2);
        assert_eq!(t.bee_count(40), 5);
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{ "gravity": 0.4, "hit_penalty_secs": 2 }"#).unwrap();
        assert_eq!(t.gravity, 0.4);
        assert_eq!(t.hit_penalty_secs, 2);
        assert_eq!(t.jump_strength, -12.0);
    }

    #[test]
    fn test_bad_override_is_an_error() {
        assert!(Tuning::from_json("{ gravity: }").is_err());
    }
}
