//! Color themes
//!
//! The simulation never reads colors; screens and the renderer take a
//! `Palette` resolved from the persisted theme setting.

use macroquad::prelude::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Neon,
}

pub struct Palette {
    pub background: Color,
    pub grid_line: Color,
    pub snake_head: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub food_glow: Color,
    pub obstacle: Color,
    pub text: Color,
    pub text_dim: Color,
    pub warning: Color,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Dark, Theme::Light, Theme::Neon];

    pub fn next(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Neon,
            Theme::Neon => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::Neon => "Neon",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Color::new(0.08, 0.09, 0.12, 1.0),
                grid_line: Color::new(0.16, 0.17, 0.21, 1.0),
                snake_head: Color::new(0.30, 0.85, 0.45, 1.0),
                snake_tail: Color::new(0.10, 0.42, 0.25, 1.0),
                food: Color::new(0.95, 0.35, 0.30, 1.0),
                food_glow: Color::new(0.95, 0.45, 0.30, 0.35),
                obstacle: Color::new(0.45, 0.46, 0.52, 1.0),
                text: Color::new(0.92, 0.93, 0.95, 1.0),
                text_dim: Color::new(0.55, 0.57, 0.62, 1.0),
                warning: Color::new(0.95, 0.30, 0.25, 1.0),
            },
            Theme::Light => Palette {
                background: Color::new(0.94, 0.95, 0.96, 1.0),
                grid_line: Color::new(0.85, 0.86, 0.88, 1.0),
                snake_head: Color::new(0.14, 0.55, 0.27, 1.0),
                snake_tail: Color::new(0.45, 0.78, 0.55, 1.0),
                food: Color::new(0.85, 0.22, 0.18, 1.0),
                food_glow: Color::new(0.90, 0.40, 0.30, 0.30),
                obstacle: Color::new(0.55, 0.56, 0.60, 1.0),
                text: Color::new(0.12, 0.13, 0.15, 1.0),
                text_dim: Color::new(0.45, 0.46, 0.50, 1.0),
                warning: Color::new(0.80, 0.15, 0.10, 1.0),
            },
            Theme::Neon => Palette {
                background: Color::new(0.02, 0.02, 0.06, 1.0),
                grid_line: Color::new(0.09, 0.09, 0.18, 1.0),
                snake_head: Color::new(0.20, 1.00, 0.95, 1.0),
                snake_tail: Color::new(0.55, 0.20, 0.90, 1.0),
                food: Color::new(1.00, 0.20, 0.60, 1.0),
                food_glow: Color::new(1.00, 0.30, 0.65, 0.40),
                obstacle: Color::new(0.30, 0.35, 0.55, 1.0),
                text: Color::new(0.80, 0.95, 1.00, 1.0),
                text_dim: Color::new(0.40, 0.50, 0.65, 1.0),
                warning: Color::new(1.00, 0.30, 0.20, 1.0),
            },
        }
    }
}
