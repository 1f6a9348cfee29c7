//! Draw pipeline
//!
//! Pure function of session state: reads the session, writes pixels, mutates
//! nothing. The game lives on a fixed logical canvas (see `config`) that is
//! scaled and centered into the current window every frame.

use macroquad::prelude::*;

use crate::config::{CANVAS_SIZE, GRID_HEIGHT, GRID_SIZE, GRID_WIDTH};
use crate::game::{Cell, Direction, GameSession};
use crate::theme::Palette;

/// Mapping from logical canvas pixels to window pixels
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl Viewport {
    /// Fit the logical canvas into the window, centered, with a small margin
    pub fn fit_screen() -> Self {
        let sw = screen_width();
        let sh = screen_height();
        let scale = (sw.min(sh) * 0.88) / CANVAS_SIZE as f32;
        let side = CANVAS_SIZE as f32 * scale;
        Self {
            offset_x: (sw - side) * 0.5,
            offset_y: (sh - side) * 0.5,
            scale,
        }
    }

    pub fn x(&self, v: f32) -> f32 {
        self.offset_x + v * self.scale
    }

    pub fn y(&self, v: f32) -> f32 {
        self.offset_y + v * self.scale
    }

    /// A logical length scaled to window pixels
    pub fn scaled(&self, v: f32) -> f32 {
        v * self.scale
    }
}

/// Draw the whole play field for one frame
pub fn draw_session(session: &GameSession, palette: &Palette, show_grid: bool, vp: Viewport) {
    let side = vp.scaled(CANVAS_SIZE as f32);
    draw_rectangle(vp.x(0.0), vp.y(0.0), side, side, palette.background);
    if show_grid {
        draw_grid(palette, vp);
    }
    draw_obstacles(session.obstacles(), palette, vp);
    draw_particles(session, vp);
    draw_food(session.food(), palette, vp);
    draw_snake(session, palette, vp);
}

fn draw_grid(palette: &Palette, vp: Viewport) {
    for gx in 0..=GRID_WIDTH {
        let x = vp.x((gx * GRID_SIZE) as f32);
        draw_line(x, vp.y(0.0), x, vp.y(CANVAS_SIZE as f32), 1.0, palette.grid_line);
    }
    for gy in 0..=GRID_HEIGHT {
        let y = vp.y((gy * GRID_SIZE) as f32);
        draw_line(vp.x(0.0), y, vp.x(CANVAS_SIZE as f32), y, 1.0, palette.grid_line);
    }
}

fn draw_obstacles(obstacles: &[Cell], palette: &Palette, vp: Viewport) {
    let pad = 1.0;
    let size = GRID_SIZE as f32 - pad * 2.0;
    for obs in obstacles {
        let x = (obs.x * GRID_SIZE) as f32 + pad;
        let y = (obs.y * GRID_SIZE) as f32 + pad;
        draw_rectangle(vp.x(x), vp.y(y), vp.scaled(size), vp.scaled(size), palette.obstacle);
        // Mortar line for a brick look
        let my = (obs.y * GRID_SIZE) as f32 + GRID_SIZE as f32 / 2.0;
        draw_line(
            vp.x(x),
            vp.y(my),
            vp.x(x + size),
            vp.y(my),
            1.0,
            Color::new(0.0, 0.0, 0.0, 0.3),
        );
    }
}

fn draw_particles(session: &GameSession, vp: Viewport) {
    for p in session.particles() {
        let mut color = p.color;
        color.a = p.life;
        draw_circle(vp.x(p.x), vp.y(p.y), vp.scaled(4.0 * p.life), color);
    }
}

fn draw_food(food: Cell, palette: &Palette, vp: Viewport) {
    let (cx, cy) = food.pixel_center();
    let r = GRID_SIZE as f32 / 2.0 - 2.0;
    draw_circle(vp.x(cx), vp.y(cy), vp.scaled(r * 2.0), palette.food_glow);
    draw_circle(vp.x(cx), vp.y(cy), vp.scaled(r), palette.food);
    // Highlight
    draw_circle(
        vp.x(cx - r / 3.0),
        vp.y(cy - r / 3.0),
        vp.scaled(r / 3.0),
        Color::new(1.0, 1.0, 1.0, 0.3),
    );
}

fn draw_snake(session: &GameSession, palette: &Palette, vp: Viewport) {
    let pad = 1.0;
    let size = GRID_SIZE as f32 - pad * 2.0;
    let len = session.length().max(1);
    for (i, seg) in session.snake().iter().enumerate() {
        let t = i as f32 / len as f32;
        let color = lerp_color(palette.snake_head, palette.snake_tail, t);
        let x = (seg.x * GRID_SIZE) as f32 + pad;
        let y = (seg.y * GRID_SIZE) as f32 + pad;
        draw_rectangle(vp.x(x), vp.y(y), vp.scaled(size), vp.scaled(size), color);
    }
    if let Some(head) = session.snake().front() {
        draw_eyes(*head, session.direction(), palette, vp);
    }
}

fn draw_eyes(head: Cell, dir: Direction, palette: &Palette, vp: Viewport) {
    let x = (head.x * GRID_SIZE) as f32;
    let y = (head.y * GRID_SIZE) as f32;
    let s = GRID_SIZE as f32 - 2.0;
    let (lx, ly, rx, ry) = match dir {
        Direction::Right => (x + s - 4.0, y + 7.0, x + s - 4.0, y + s - 5.0),
        Direction::Left => (x + 6.0, y + 7.0, x + 6.0, y + s - 5.0),
        Direction::Up => (x + 7.0, y + 6.0, x + s - 5.0, y + 6.0),
        Direction::Down => (x + 7.0, y + s - 4.0, x + s - 5.0, y + s - 4.0),
    };
    draw_circle(vp.x(lx), vp.y(ly), vp.scaled(2.5), palette.background);
    draw_circle(vp.x(rx), vp.y(ry), vp.scaled(2.5), palette.background);
}

pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}
