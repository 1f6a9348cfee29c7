//! Arcade snake with four rule variants, difficulty tiers, particles and a
//! persisted high score. The simulation lives in `game::session`; this file
//! owns the window, the screens, input plumbing and the two step timers.

use macroquad::prelude::*;

mod audio;
mod config;
mod game;
mod render;
mod save;
mod theme;

use audio::{SoundBank, SoundKind};
use config::{Difficulty, Mode};
use game::{Direction, GameSession, RunState, StepOutcome};
use render::Viewport;
use save::SaveData;
use theme::Palette;

struct MenuState {
    mode: Mode,
    difficulty: Difficulty,
}

struct PlayState {
    session: GameSession,
    mode: Mode,
    difficulty: Difficulty,
    /// Frame-loop throttle: last time a simulation step ran
    last_step: f64,
    /// Whole-second accumulator feeding the speed-run countdown
    countdown_accum: f64,
}

struct EndState {
    session: GameSession,
    mode: Mode,
    difficulty: Difficulty,
    new_high: bool,
    won: bool,
}

enum Screen {
    Menu(MenuState),
    /// Settings with the screen to return to; opening from a running game
    /// pauses it first
    Settings(Box<Screen>),
    Playing(PlayState),
    GameOver(EndState),
    Quit,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake Arcade".to_owned(),
        window_width: 640,
        window_height: 640,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    macroquad::rand::srand((macroquad::miniquad::date::now() * 1_000_000.0) as u64);

    let mut save = save::load();
    let mut sounds = SoundBank::load(save.sound).await;
    let mut screen = Screen::Menu(MenuState {
        mode: Mode::Classic,
        difficulty: Difficulty::Normal,
    });

    loop {
        let palette = save.theme.palette();
        let bg = palette.background;
        clear_background(Color::new(bg.r * 0.55, bg.g * 0.55, bg.b * 0.55, 1.0));

        screen = match screen {
            Screen::Menu(menu) => menu_frame(menu, &save, &palette),
            Screen::Settings(back) => settings_frame(back, &mut save, &mut sounds, &palette),
            Screen::Playing(play) => playing_frame(play, &mut save, &sounds, &palette),
            Screen::GameOver(end) => end_frame(end, &save, &palette),
            Screen::Quit => break,
        };
        if matches!(screen, Screen::Quit) {
            break;
        }

        next_frame().await;
    }
}

fn menu_frame(mut menu: MenuState, save: &SaveData, palette: &Palette) -> Screen {
    let sh = screen_height();
    let mut y = sh * 0.22;

    draw_centered("SNAKE ARCADE", y, 48, palette.snake_head);
    y += 64.0;

    draw_centered(&format!("< Mode: {} >", menu.mode.label()), y, 26, palette.text);
    y += 24.0;
    draw_centered(mode_blurb(menu.mode), y, 18, palette.text_dim);
    y += 40.0;
    draw_centered(
        &format!("^ Difficulty: {} v", menu.difficulty.label()),
        y,
        26,
        palette.text,
    );
    y += 56.0;

    draw_centered(&format!("Best: {}", save.high_score), y, 22, palette.food);
    y += 48.0;
    draw_centered("Enter: Play    S: Settings    Q: Quit", y, 20, palette.text_dim);

    if is_key_pressed(KeyCode::Right) {
        menu.mode = cycle(&Mode::ALL, menu.mode, 1);
    }
    if is_key_pressed(KeyCode::Left) {
        menu.mode = cycle(&Mode::ALL, menu.mode, -1);
    }
    if is_key_pressed(KeyCode::Down) {
        menu.difficulty = cycle(&Difficulty::ALL, menu.difficulty, 1);
    }
    if is_key_pressed(KeyCode::Up) {
        menu.difficulty = cycle(&Difficulty::ALL, menu.difficulty, -1);
    }
    if is_key_pressed(KeyCode::S) {
        return Screen::Settings(Box::new(Screen::Menu(menu)));
    }
    if is_key_pressed(KeyCode::Q) {
        return Screen::Quit;
    }
    if is_key_pressed(KeyCode::Enter) {
        return start_run(menu.mode, menu.difficulty, save, palette);
    }
    Screen::Menu(menu)
}

fn start_run(mode: Mode, difficulty: Difficulty, save: &SaveData, palette: &Palette) -> Screen {
    let mut session =
        GameSession::new(mode, difficulty, save.high_score, save.particles, palette.food);
    session.start();
    Screen::Playing(PlayState {
        session,
        mode,
        difficulty,
        last_step: get_time(),
        countdown_accum: 0.0,
    })
}

fn playing_frame(
    mut play: PlayState,
    save: &mut SaveData,
    sounds: &SoundBank,
    palette: &Palette,
) -> Screen {
    // The theme can change from the settings screen mid-run
    play.session.set_food_color(palette.food);

    if let Some(dir) = direction_intent() {
        play.session.steer(dir);
    }
    if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::P) {
        play.session.toggle_pause();
        if play.session.state() == RunState::Running {
            // Resume without a burst of catch-up steps
            play.last_step = get_time();
        }
    }
    if is_key_pressed(KeyCode::Escape) {
        if play.session.state() == RunState::Running {
            play.session.toggle_pause();
        }
        return Screen::Settings(Box::new(Screen::Playing(play)));
    }

    let dt = get_frame_time() as f64;
    play.session.accumulate_time(dt);

    let mut won = false;
    let now = get_time();
    let interval = play.session.step_interval_ms() as f64 / 1000.0;
    if play.session.state() == RunState::Running && now - play.last_step >= interval {
        play.last_step = now;
        match play.session.tick() {
            StepOutcome::Ate => {
                sounds.play(SoundKind::Eat);
                persist_high_score(play.session.high_score(), save);
            }
            StepOutcome::Won => {
                won = true;
                sounds.play(SoundKind::Eat);
                persist_high_score(play.session.high_score(), save);
            }
            StepOutcome::Died => sounds.play(SoundKind::Die),
            _ => {}
        }
    }

    if play.session.mode().is_timed() && play.session.state() == RunState::Running {
        play.countdown_accum += dt;
        while play.countdown_accum >= 1.0 {
            play.countdown_accum -= 1.0;
            if play.session.countdown_tick() {
                sounds.play(SoundKind::Die);
            }
        }
    }

    let vp = Viewport::fit_screen();
    render::draw_session(&play.session, palette, save.show_grid, vp);
    draw_hud(&play.session, save, palette);

    if play.session.state() == RunState::Paused {
        draw_centered("PAUSED", screen_height() * 0.5, 48, palette.text);
        draw_centered(
            "Space/P: resume    Esc: settings",
            screen_height() * 0.5 + 34.0,
            20,
            palette.text_dim,
        );
    }

    if play.session.state() == RunState::GameOver {
        let new_high = play.session.score() == save.high_score && play.session.score() > 0;
        return Screen::GameOver(EndState {
            session: play.session,
            mode: play.mode,
            difficulty: play.difficulty,
            new_high,
            won,
        });
    }
    Screen::Playing(play)
}

fn end_frame(end: EndState, save: &SaveData, palette: &Palette) -> Screen {
    let vp = Viewport::fit_screen();
    render::draw_session(&end.session, palette, save.show_grid, vp);
    draw_rectangle(
        0.0,
        0.0,
        screen_width(),
        screen_height(),
        Color::new(0.0, 0.0, 0.0, 0.55),
    );

    let sh = screen_height();
    let mut y = sh * 0.32;
    let title = if end.won { "BOARD CLEARED!" } else { "GAME OVER" };
    draw_centered(title, y, 44, palette.food);
    y += 44.0;
    if end.new_high {
        draw_centered("NEW HIGH SCORE!", y, 26, palette.warning);
        y += 34.0;
    }
    draw_centered(&format!("Score: {}", end.session.score()), y, 26, WHITE);
    y += 30.0;
    draw_centered(&format!("Length: {}", end.session.length()), y, 22, LIGHTGRAY);
    y += 26.0;
    draw_centered(
        &format!("Time: {}", time_label(end.session.elapsed_secs())),
        y,
        22,
        LIGHTGRAY,
    );
    y += 48.0;
    draw_centered("R: Restart    Enter: Menu    Q: Quit", y, 20, LIGHTGRAY);

    if is_key_pressed(KeyCode::R) {
        return start_run(end.mode, end.difficulty, save, palette);
    }
    if is_key_pressed(KeyCode::Enter) {
        return Screen::Menu(MenuState {
            mode: end.mode,
            difficulty: end.difficulty,
        });
    }
    if is_key_pressed(KeyCode::Q) {
        return Screen::Quit;
    }
    Screen::GameOver(end)
}

fn settings_frame(
    back: Box<Screen>,
    save: &mut SaveData,
    sounds: &mut SoundBank,
    palette: &Palette,
) -> Screen {
    let sh = screen_height();
    let mut y = sh * 0.25;

    draw_centered("SETTINGS", y, 40, palette.snake_head);
    y += 56.0;
    draw_centered(&format!("[S] Sound: {}", on_off(save.sound)), y, 24, palette.text);
    y += 30.0;
    draw_centered(&format!("[G] Grid overlay: {}", on_off(save.show_grid)), y, 24, palette.text);
    y += 30.0;
    draw_centered(&format!("[F] Particles: {}", on_off(save.particles)), y, 24, palette.text);
    y += 30.0;
    draw_centered(&format!("[T] Theme: {}", save.theme.label()), y, 24, palette.text);
    y += 30.0;
    draw_centered("[R] Reset high score", y, 24, palette.text);
    y += 44.0;
    draw_centered("Enter/Esc: Back", y, 20, palette.text_dim);

    let mut changed = false;
    if is_key_pressed(KeyCode::S) {
        save.sound = !save.sound;
        sounds.enabled = save.sound;
        changed = true;
    }
    if is_key_pressed(KeyCode::G) {
        save.show_grid = !save.show_grid;
        changed = true;
    }
    if is_key_pressed(KeyCode::F) {
        save.particles = !save.particles;
        changed = true;
    }
    if is_key_pressed(KeyCode::T) {
        save.theme = save.theme.next();
        changed = true;
    }
    if is_key_pressed(KeyCode::R) {
        save.high_score = 0;
        changed = true;
    }
    if changed {
        save::store(save);
    }

    if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Escape) {
        return *back;
    }
    Screen::Settings(back)
}

fn draw_hud(session: &GameSession, save: &SaveData, palette: &Palette) {
    draw_text(
        &format!("Score: {}   Best: {}", session.score(), save.high_score),
        16.0,
        28.0,
        24.0,
        palette.text,
    );
    draw_text(
        &format!(
            "Speed: {}   Length: {}   Time: {}",
            session.speed_level(),
            session.length(),
            time_label(session.elapsed_secs()),
        ),
        16.0,
        52.0,
        20.0,
        palette.text_dim,
    );

    if session.mode().is_timed() {
        let color = if session.low_time() { palette.warning } else { palette.text };
        let label = format!("{}", session.countdown_secs());
        let dims = measure_text(&label, None, 40, 1.0);
        draw_text(&label, (screen_width() - dims.width) * 0.5, 44.0, 40.0, color);
    }
}

fn persist_high_score(high: u32, save: &mut SaveData) {
    if high > save.high_score {
        save.high_score = high;
        save::store(save);
    }
}

fn direction_intent() -> Option<Direction> {
    if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
        Some(Direction::Up)
    } else if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
        Some(Direction::Down)
    } else if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
        Some(Direction::Left)
    } else if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
        Some(Direction::Right)
    } else {
        None
    }
}

fn mode_blurb(mode: Mode) -> &'static str {
    match mode {
        Mode::Classic => "Walls kill. The old school.",
        Mode::NoWalls => "Wrap around the edges.",
        Mode::Maze => "Brick obstacles, +5 per food.",
        Mode::SpeedRun => "60 seconds. Food adds time.",
    }
}

fn cycle<T: Copy + PartialEq>(items: &[T], current: T, step: i32) -> T {
    let idx = items.iter().position(|&v| v == current).unwrap_or(0) as i32;
    items[(idx + step).rem_euclid(items.len() as i32) as usize]
}

fn time_label(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn on_off(v: bool) -> &'static str {
    if v { "On" } else { "Off" }
}

fn draw_centered(text: &str, y: f32, size: u16, color: Color) {
    let dims = measure_text(text, None, size, 1.0);
    draw_text(text, (screen_width() - dims.width) * 0.5, y, size as f32, color);
}
