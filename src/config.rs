//! Game configuration constants and rule tables

/// Cell size in logical pixels
pub const GRID_SIZE: i32 = 20;

/// Logical canvas edge in pixels; the renderer scales this to the window
pub const CANVAS_SIZE: i32 = 480;

/// Grid width in cells
pub const GRID_WIDTH: i32 = CANVAS_SIZE / GRID_SIZE;

/// Grid height in cells
pub const GRID_HEIGHT: i32 = CANVAS_SIZE / GRID_SIZE;

/// Snake length at spawn
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points per food
pub const FOOD_SCORE: u32 = 10;

/// Extra points per food in maze mode
pub const MAZE_BONUS_SCORE: u32 = 5;

/// Speed-run countdown at run start, in seconds
pub const SPEED_RUN_START_SECS: i32 = 60;

/// Seconds added to the speed-run countdown per food
pub const SPEED_RUN_BONUS_SECS: i32 = 5;

/// Countdown threshold for the low-time warning
pub const SPEED_RUN_WARNING_SECS: i32 = 10;

/// Particles spawned per food burst
pub const PARTICLES_PER_BURST: usize = 8;

/// Particle velocity components are uniform in +/- this, logical px per tick
pub const PARTICLE_SPREAD: f32 = 4.0;

/// Particle life lost per tick
pub const PARTICLE_DECAY: f32 = 0.05;

/// Random food samples before falling back to a full free-cell scan
pub const FOOD_SAMPLE_ATTEMPTS: u32 = 200;

/// Step timing for one difficulty tier, all in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedSettings {
    /// Step interval at run start
    pub initial_ms: u32,
    /// Interval shaved off per food
    pub decrement_ms: u32,
    /// Interval floor
    pub min_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn speed(self) -> SpeedSettings {
        match self {
            Difficulty::Easy => SpeedSettings { initial_ms: 180, decrement_ms: 1, min_ms: 100 },
            Difficulty::Normal => SpeedSettings { initial_ms: 140, decrement_ms: 2, min_ms: 60 },
            Difficulty::Hard => SpeedSettings { initial_ms: 100, decrement_ms: 3, min_ms: 40 },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Classic,
    NoWalls,
    Maze,
    SpeedRun,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Classic, Mode::NoWalls, Mode::Maze, Mode::SpeedRun];

    /// Leaving the grid ends the run; only no-walls mode wraps instead
    pub fn walls_are_fatal(self) -> bool {
        !matches!(self, Mode::NoWalls)
    }

    pub fn has_obstacles(self) -> bool {
        matches!(self, Mode::Maze)
    }

    pub fn is_timed(self) -> bool {
        matches!(self, Mode::SpeedRun)
    }

    /// Flat score bonus on top of [`FOOD_SCORE`]
    pub fn eat_bonus(self) -> u32 {
        match self {
            Mode::Maze => MAZE_BONUS_SCORE,
            _ => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Classic => "Classic",
            Mode::NoWalls => "No Walls",
            Mode::Maze => "Maze",
            Mode::SpeedRun => "Speed Run",
        }
    }
}
