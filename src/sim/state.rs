//! Game state and core simulation types
//!
//! `GameState` is the authoritative session. It owns the butterfly and every
//! per-level collection; a level start swaps all of them out at once.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect, lands_on};
use super::countdown::Countdown;
use super::level::generate_level;
use super::tick::TickInput;
use crate::consts::*;
use crate::settings::{Settings, WingColor};
use crate::tuning::Tuning;
use crate::WorldSize;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start menu, nothing simulated
    Idle,
    /// Active gameplay
    Playing,
    /// Target reached, waiting for "next level"
    LevelComplete,
    /// Clock ran out, waiting for retry/restart/menu
    GameOver,
}

/// Screens the UI layer can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Start,
    Game,
    Win,
    GameOver,
}

impl Screen {
    /// DOM identifier prefix (`<id>-screen`)
    pub fn id(&self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::Game => "game",
            Screen::Win => "win",
            Screen::GameOver => "gameover",
        }
    }

    pub const ALL: [Screen; 4] = [Screen::Start, Screen::Game, Screen::Win, Screen::GameOver];
}

/// Things that happened during a tick or transition, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Screen(Screen),
    FlowerCollected { score: u32 },
    BeeHit { time_left: u32 },
    LevelComplete {
        level: u32,
        score: u32,
        time_left: u32,
        bonus: u32,
    },
    GameOver {
        level: u32,
        score: u32,
        target_score: u32,
    },
}

/// Facing direction of the butterfly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The player's butterfly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    /// Recomputed every update from ground/platform contact
    pub on_ground: bool,
    pub color: WingColor,
}

impl Player {
    pub fn new(pos: Vec2, color: WingColor) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            facing: Facing::Right,
            on_ground: false,
            color,
        }
    }

    /// Where the butterfly appears at level start and after a bee hit
    pub fn spawn_point(world: WorldSize) -> Vec2 {
        Vec2::new(PLAYER_SPAWN_X, world.height - PLAYER_SPAWN_FROM_BOTTOM)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Back to spawn with all momentum removed
    pub fn respawn(&mut self, world: WorldSize) {
        self.pos = Self::spawn_point(world);
        self.vel = Vec2::ZERO;
    }

    /// Jump if standing on something. Returns whether the jump happened.
    pub fn try_jump(&mut self, tuning: &Tuning) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel.y = tuning.jump_strength;
        self.on_ground = false;
        true
    }

    /// Advance one tick: steering, jump, gravity, integration, then contacts
    pub fn update(
        &mut self,
        input: &TickInput,
        tuning: &Tuning,
        world: WorldSize,
        platforms: &[Platform],
    ) {
        // Drag takes over steering entirely, even below the threshold
        if let Some(delta) = input.drag {
            if delta.abs() > tuning.drag_threshold {
                self.steer(if delta < 0.0 { Facing::Left } else { Facing::Right }, tuning);
            }
        } else if input.move_left {
            self.steer(Facing::Left, tuning);
        } else if input.move_right {
            self.steer(Facing::Right, tuning);
        } else {
            self.vel.x *= tuning.friction;
        }

        // Held jump repeats on every grounded tick
        if input.jump || input.tap_jump {
            self.try_jump(tuning);
        }

        self.vel.y += tuning.gravity;
        self.pos += self.vel;

        self.on_ground = false;

        let ground_y = world.ground_y();
        if self.pos.y + self.size.y >= ground_y {
            self.pos.y = ground_y - self.size.y;
            self.vel.y = 0.0;
            self.on_ground = true;
        }

        for platform in platforms {
            if lands_on(&self.bounds(), self.vel.y, &platform.bounds()) {
                self.pos.y = platform.pos.y - self.size.y;
                self.vel.y = 0.0;
                self.on_ground = true;
            }
        }

        let max_x = (world.width - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    fn steer(&mut self, facing: Facing, tuning: &Tuning) {
        self.vel.x = match facing {
            Facing::Left => -tuning.move_speed,
            Facing::Right => tuning.move_speed,
        };
        self.facing = facing;
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A grassy ledge. Never changes after generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub width: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width,
        }
    }
}

impl Bounds for Platform {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, PLATFORM_HEIGHT)
    }
}

/// A collectible flower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flower {
    pub pos: Vec2,
    /// One-way: once set, the flower is out of play
    pub collected: bool,
    /// Visual only
    pub rotation: f32,
    pub bob_offset: f32,
}

impl Flower {
    pub fn new(pos: Vec2, rng: &mut Pcg32) -> Self {
        Self {
            pos,
            collected: false,
            rotation: rng.random::<f32>() * std::f32::consts::TAU,
            bob_offset: rng.random::<f32>() * std::f32::consts::TAU,
        }
    }

    /// Index into the renderer's petal palette (5 colours)
    pub fn petal_index(&self) -> usize {
        ((self.pos.x / 100.0).floor().max(0.0) as usize) % 5
    }
}

impl Bounds for Flower {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, FLOWER_SIZE, FLOWER_SIZE)
    }
}

/// Decorative cloud drifting right and wrapping around
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
}

impl Cloud {
    pub fn update(&mut self, world: WorldSize) {
        self.pos.x += self.speed;
        if self.pos.x > world.width + self.size {
            self.pos.x = -self.size;
        }
    }
}

/// A bee patrolling back and forth over a platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bee {
    pub pos: Vec2,
    pub patrol_start: f32,
    pub patrol_end: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub speed: f32,
}

impl Bee {
    /// Step along the patrol. Direction flips on the tick the bee crosses a
    /// bound; the bee is not pulled back, so it overshoots by at most one step.
    pub fn update(&mut self) {
        self.pos.x += self.speed * self.direction;
        if self.pos.x > self.patrol_end || self.pos.x < self.patrol_start {
            self.direction = -self.direction;
        }
    }
}

impl Bounds for Bee {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BEE_SIZE, BEE_SIZE)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, rng: &mut Pcg32) -> Self {
        let vx = (rng.random::<f32>() - 0.5) * 8.0;
        let vy = (rng.random::<f32>() - 0.5) * 8.0 - 2.0;
        Self {
            pos,
            vel: Vec2::new(vx, vy),
            life: 1.0,
            size: rng.random::<f32>() * 6.0 + 2.0,
        }
    }

    pub fn update(&mut self, tuning: &Tuning) {
        self.pos += self.vel;
        self.vel.y += tuning.particle_gravity;
        self.life -= tuning.particle_decay;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducible levels
    pub seed: u64,
    pub world: WorldSize,
    pub tuning: Tuning,
    pub settings: Settings,

    /// Current level (1-based)
    pub level: u32,
    pub score: u32,
    pub target_score: u32,
    /// Whole seconds left on the clock
    pub time_left: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Red flash intensity after a bee hit (0-1)
    pub hit_flash: f32,

    pub player: Player,
    pub platforms: Vec<Platform>,
    pub flowers: Vec<Flower>,
    pub clouds: Vec<Cloud>,
    pub bees: Vec<Bee>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,

    pub countdown: Countdown,
    /// Per bee: whether it overlapped the butterfly on its last check
    pub(crate) bee_contact: Vec<bool>,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session sitting on the start menu
    pub fn new(seed: u64, world: WorldSize, tuning: Tuning, settings: Settings) -> Self {
        let player = Player::new(Player::spawn_point(world), settings.wing_color);
        Self {
            seed,
            world,
            target_score: tuning.target_score(1),
            time_left: tuning.time_budget(1),
            tuning,
            settings,
            level: 1,
            score: 0,
            phase: GamePhase::Idle,
            time_ticks: 0,
            hit_flash: 0.0,
            player,
            platforms: Vec::new(),
            flowers: Vec::new(),
            clouds: Vec::new(),
            bees: Vec::new(),
            particles: Vec::new(),
            countdown: Countdown::default(),
            bee_contact: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Begin (or begin again) the current level
    pub fn start_level(&mut self) {
        self.score = 0;
        self.target_score = self.tuning.target_score(self.level);
        self.time_left = self.tuning.time_budget(self.level);
        self.time_ticks = 0;
        self.hit_flash = 0.0;
        self.bee_contact.clear();

        self.player = Player::new(Player::spawn_point(self.world), self.settings.wing_color);

        let level = generate_level(self.level, self.world, &self.tuning, &mut self.rng);
        self.platforms = level.platforms;
        self.flowers = level.flowers;
        self.clouds = level.clouds;
        self.bees = level.bees;
        self.particles = Vec::new();

        self.countdown.start();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Screen(Screen::Game));

        log::info!(
            "Level {} started: {} flowers needed, {}s on the clock, {} bees",
            self.level,
            self.target_score,
            self.time_left,
            self.bees.len()
        );
    }

    /// Advance to the following level
    pub fn next_level(&mut self) {
        self.level += 1;
        self.start_level();
    }

    /// Replay the current level
    pub fn retry(&mut self) {
        self.start_level();
    }

    /// Start over from level 1
    pub fn restart(&mut self) {
        self.level = 1;
        self.start_level();
    }

    /// Back to the start menu
    pub fn menu(&mut self) {
        self.countdown.stop();
        self.level = 1;
        self.phase = GamePhase::Idle;
        self.events.push(GameEvent::Screen(Screen::Start));
    }

    /// Viewport changed. Existing entities keep their positions.
    pub fn resize(&mut self, world: WorldSize) {
        log::debug!(
            "World resized {}x{} -> {}x{}",
            self.world.width,
            self.world.height,
            world.width,
            world.height
        );
        self.world = world;
    }

    /// Replace preferences; wing colour applies from the next level start
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// One fire of the host's 1 Hz interval. Returns false for stale fires.
    pub fn countdown_fired(&mut self, token: u64) -> bool {
        if self.phase != GamePhase::Playing || !self.countdown.accepts(token) {
            return false;
        }
        self.tick_second();
        true
    }

    /// Drive the clock from elapsed wall time (headless hosts)
    pub fn advance_clock(&mut self, dt: f32) {
        let seconds = self.countdown.accumulate(dt);
        for _ in 0..seconds {
            if self.phase != GamePhase::Playing {
                break;
            }
            self.tick_second();
        }
    }

    fn tick_second(&mut self) {
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end_game();
        }
    }

    /// Bee contact: lose time and go back to spawn
    pub(crate) fn bee_hit(&mut self) {
        self.time_left = self.time_left.saturating_sub(self.tuning.hit_penalty_secs);
        self.player.respawn(self.world);
        if self.settings.effective_hit_flash() {
            self.hit_flash = 1.0;
        }
        self.events.push(GameEvent::BeeHit {
            time_left: self.time_left,
        });
        if self.time_left == 0 {
            self.end_game();
        }
    }

    /// Collect the flower at `index` if it is still in play
    pub(crate) fn collect_flower(&mut self, index: usize) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(flower) = self.flowers.get_mut(index) else {
            return;
        };
        if flower.collected {
            return;
        }
        flower.collected = true;
        let at = flower.pos;

        self.score += 1;
        self.spawn_burst(at);
        self.events.push(GameEvent::FlowerCollected { score: self.score });

        if self.score >= self.target_score {
            self.complete_level();
        }
    }

    fn complete_level(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::LevelComplete;
        self.countdown.stop();
        self.events.push(GameEvent::LevelComplete {
            level: self.level,
            score: self.score,
            time_left: self.time_left,
            bonus: self.time_left.saturating_mul(10),
        });
        self.events.push(GameEvent::Screen(Screen::Win));
        log::info!(
            "Level {} complete with {}s to spare",
            self.level,
            self.time_left
        );
    }

    fn end_game(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.countdown.stop();
        self.events.push(GameEvent::GameOver {
            level: self.level,
            score: self.score,
            target_score: self.target_score,
        });
        self.events.push(GameEvent::Screen(Screen::GameOver));
        log::info!(
            "Game over on level {}: {}/{} flowers",
            self.level,
            self.score,
            self.target_score
        );
    }

    /// Burst of sparkles, bounded by the particle cap
    pub fn spawn_burst(&mut self, at: Vec2) {
        let cap = self.settings.max_particles();
        for _ in 0..PARTICLE_BURST {
            if self.particles.len() >= cap {
                break;
            }
            self.particles.push(Particle::new(at, &mut self.rng));
        }
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Flowers still waiting to be picked
    #[cfg(test)]
    pub fn flowers_remaining(&self) -> usize {
        self.flowers.iter().filter(|f| !f.collected).count()
    }
}
