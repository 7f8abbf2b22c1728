//! Canvas2D painter
//!
//! Draws every `DrawItem` with plain paths. Purely cosmetic: nothing here
//! feeds back into the simulation.

use std::f64::consts::{PI, TAU};

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::sim::{Bee, Cloud, DrawItem, Facing, Flower, GameState, Particle, Platform, Player};

const SKY_TOP: &str = "#87CEEB";
const SKY_BOTTOM: &str = "#E0F6FF";
const PETAL_COLORS: [&str; 5] = ["#FF69B4", "#FFD700", "#FF6347", "#9370DB", "#00CED1"];
const SPARKLE: &str = "#FFD700";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Paint one frame. `time_ms` only drives idle animation (flower bob).
    pub fn render(&self, state: &GameState, time_ms: f64) -> Result<(), JsValue> {
        let settings = &state.settings;
        let w = state.world.width as f64;
        let h = state.world.height as f64;
        let ctx = &self.ctx;

        ctx.clear_rect(0.0, 0.0, w, h);
        let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        sky.add_color_stop(0.0, SKY_TOP)?;
        sky.add_color_stop(1.0, SKY_BOTTOM)?;
        ctx.set_fill_style_canvas_gradient(&sky);
        ctx.fill_rect(0.0, 0.0, w, h);

        let bob = !settings.reduced_motion;
        for item in state.draw_list() {
            match item {
                DrawItem::Cloud(cloud) => self.cloud(cloud)?,
                DrawItem::Platform(platform) => self.platform(platform),
                DrawItem::Flower(flower) => self.flower(flower, if bob { time_ms } else { 0.0 })?,
                DrawItem::Bee(bee) => self.bee(bee)?,
                DrawItem::Player(player) => self.player(player)?,
                DrawItem::Particle(particle) => self.particle(particle)?,
            }
        }

        if state.hit_flash > 0.0 && settings.effective_hit_flash() {
            ctx.set_fill_style_str(&format!("rgba(255, 0, 0, {:.3})", 0.3 * state.hit_flash));
            ctx.fill_rect(0.0, 0.0, w, h);
        }
        Ok(())
    }

    fn cloud(&self, cloud: &Cloud) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (x, y, s) = (cloud.pos.x as f64, cloud.pos.y as f64, cloud.size as f64);
        ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
        ctx.begin_path();
        ctx.arc(x, y, s / 2.0, 0.0, TAU)?;
        ctx.arc(x + s / 2.0, y, s / 2.5, 0.0, TAU)?;
        ctx.arc(x + s, y, s / 2.0, 0.0, TAU)?;
        ctx.fill();
        Ok(())
    }

    fn platform(&self, platform: &Platform) {
        let ctx = &self.ctx;
        let (x, y, w) = (platform.pos.x as f64, platform.pos.y as f64, platform.width as f64);
        let h = PLATFORM_HEIGHT as f64;
        ctx.set_fill_style_str("#8BC34A");
        ctx.fill_rect(x, y, w, h);
        ctx.set_fill_style_str("#795548");
        ctx.fill_rect(x, y + h, w, 5.0);
        ctx.set_fill_style_str("#689F38");
        let mut blade = 0.0;
        while blade < w {
            ctx.fill_rect(x + blade, y - 5.0, 3.0, 5.0);
            blade += 10.0;
        }
    }

    fn flower(&self, flower: &Flower, time_ms: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let bob = (time_ms / 500.0 + flower.bob_offset as f64).sin() * 3.0;
        let half = FLOWER_SIZE as f64 / 2.0;

        ctx.save();
        ctx.translate(flower.pos.x as f64 + half, flower.pos.y as f64 + half + bob)?;
        ctx.rotate(flower.rotation as f64)?;

        ctx.set_stroke_style_str("#4CAF50");
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(0.0, 10.0);
        ctx.line_to(0.0, half);
        ctx.stroke();

        ctx.set_fill_style_str(PETAL_COLORS[flower.petal_index()]);
        for i in 0..5 {
            ctx.save();
            ctx.rotate(TAU / 5.0 * i as f64)?;
            ctx.begin_path();
            ctx.ellipse(0.0, -8.0, 6.0, 10.0, 0.0, 0.0, TAU)?;
            ctx.fill();
            ctx.restore();
        }

        ctx.set_fill_style_str("#FFD700");
        ctx.begin_path();
        ctx.arc(0.0, 0.0, 5.0, 0.0, TAU)?;
        ctx.fill();
        ctx.restore();
        Ok(())
    }

    fn bee(&self, bee: &Bee) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let half = BEE_SIZE as f64 / 2.0;
        ctx.save();
        ctx.translate(bee.pos.x as f64 + half, bee.pos.y as f64 + half)?;
        if bee.direction < 0.0 {
            ctx.scale(-1.0, 1.0)?;
        }

        ctx.set_fill_style_str("#FFD700");
        ctx.fill_rect(-10.0, -10.0, 20.0, 15.0);
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(-5.0, -10.0, 3.0, 15.0);
        ctx.fill_rect(2.0, -10.0, 3.0, 15.0);

        ctx.set_fill_style_str("rgba(255, 255, 255, 0.6)");
        ctx.begin_path();
        ctx.ellipse(-5.0, -8.0, 8.0, 12.0, -0.3, 0.0, TAU)?;
        ctx.ellipse(5.0, -8.0, 8.0, 12.0, 0.3, 0.0, TAU)?;
        ctx.fill();
        ctx.restore();
        Ok(())
    }

    fn player(&self, player: &Player) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let center = player.center();
        ctx.save();
        ctx.translate(center.x as f64, center.y as f64)?;
        if player.facing == Facing::Left {
            ctx.scale(-1.0, 1.0)?;
        }

        ctx.set_fill_style_str("#333");
        ctx.fill_rect(-3.0, -15.0, 6.0, 30.0);

        let (left, right) = player.color.wing_fills();
        ctx.set_fill_style_str(left);
        ctx.begin_path();
        ctx.ellipse(-10.0, -5.0, 15.0, 20.0, 0.0, 0.0, TAU)?;
        ctx.fill();
        ctx.set_fill_style_str(right);
        ctx.begin_path();
        ctx.ellipse(10.0, -5.0, 15.0, 20.0, 0.0, 0.0, TAU)?;
        ctx.fill();

        ctx.set_stroke_style_str("#333");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(0.0, -15.0);
        ctx.line_to(-5.0, -25.0);
        ctx.move_to(0.0, -15.0);
        ctx.line_to(5.0, -25.0);
        ctx.stroke();
        ctx.restore();
        Ok(())
    }

    fn particle(&self, particle: &Particle) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(SPARKLE);
        ctx.set_global_alpha(particle.life.clamp(0.0, 1.0) as f64);
        ctx.begin_path();
        ctx.arc(particle.pos.x as f64, particle.pos.y as f64, particle.size as f64, 0.0, PI * 2.0)?;
        ctx.fill();
        ctx.set_global_alpha(1.0);
        Ok(())
    }
}
