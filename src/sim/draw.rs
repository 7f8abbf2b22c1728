//! Read-only view of the session for renderers and the HUD

use super::state::{Bee, Cloud, Flower, GamePhase, GameState, Particle, Platform, Player};

/// One thing to paint, in back-to-front order
#[derive(Debug, Clone, Copy)]
pub enum DrawItem<'a> {
    Cloud(&'a Cloud),
    Platform(&'a Platform),
    Flower(&'a Flower),
    Bee(&'a Bee),
    Player(&'a Player),
    Particle(&'a Particle),
}

/// Values shown in the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub level: u32,
    pub score: u32,
    pub target_score: u32,
    pub time_left: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Everything visible this frame. Collected flowers are left out.
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        let mut items = Vec::with_capacity(
            self.clouds.len()
                + self.platforms.len()
                + self.flowers.len()
                + self.bees.len()
                + 1
                + self.particles.len(),
        );
        items.extend(self.clouds.iter().map(DrawItem::Cloud));
        items.extend(self.platforms.iter().map(DrawItem::Platform));
        items.extend(
            self.flowers
                .iter()
                .filter(|f| !f.collected)
                .map(DrawItem::Flower),
        );
        items.extend(self.bees.iter().map(DrawItem::Bee));
        items.push(DrawItem::Player(&self.player));
        items.extend(self.particles.iter().map(DrawItem::Particle));
        items
    }

    pub fn hud(&self) -> Hud {
        Hud {
            level: self.level,
            score: self.score,
            target_score: self.target_score,
            time_left: self.time_left,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WorldSize;
    use crate::settings::Settings;
    use crate::tuning::Tuning;

    #[test]
    fn test_paint_order() {
        let mut state = GameState::new(
            3,
            WorldSize::new(800.0, 600.0),
            Tuning::default(),
            Settings::default(),
        );
        state.level = 3;
        state.start_level();

        let items = state.draw_list();
        let rank = |item: &DrawItem| match item {
            DrawItem::Cloud(_) => 0,
            DrawItem::Platform(_) => 1,
            DrawItem::Flower(_) => 2,
            DrawItem::Bee(_) => 3,
            DrawItem::Player(_) => 4,
            DrawItem::Particle(_) => 5,
        };
        assert!(items.windows(2).all(|w| rank(&w[0]) <= rank(&w[1])));
        assert_eq!(items.iter().filter(|i| matches!(i, DrawItem::Player(_))).count(), 1);
        assert_eq!(items.iter().filter(|i| matches!(i, DrawItem::Bee(_))).count(), 2);
    }

    #[test]
    fn test_collected_flowers_hidden() {
        let mut state = GameState::new(
            4,
            WorldSize::new(800.0, 600.0),
            Tuning::default(),
            Settings::default(),
        );
        state.start_level();
        let visible = |s: &GameState| {
            s.draw_list()
                .iter()
                .filter(|i| matches!(i, DrawItem::Flower(_)))
                .count()
        };
        let before = visible(&state);
        state.collect_flower(0);
        assert_eq!(visible(&state), before - 1);
        assert_eq!(state.flowers_remaining(), before - 1);
    }

    #[test]
    fn test_hud() {
        let mut state = GameState::new(
            4,
            WorldSize::new(800.0, 600.0),
            Tuning::default(),
            Settings::default(),
        );
        state.start_level();
        assert_eq!(
            state.hud(),
            Hud {
                level: 1,
                score: 0,
                target_score: 10,
                time_left: 60,
                phase: GamePhase::Playing,
            }
        );
    }
}
