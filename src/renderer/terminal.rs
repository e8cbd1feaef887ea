//! Terminal render surface
//!
//! World coordinates are scaled down onto a character grid. Each frame is
//! drawn into an off-screen canvas first and then written out row by row, so
//! the terminal never shows a half-drawn frame.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
};
use glam::Vec2;

use super::RenderSurface;
use super::frame::{Frame, SpriteKind};
use crate::consts::CLOUD_SIZE;
use crate::settings::Layout;
use crate::sim::{Hitbox, RunnerState};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Reset;
const C_LAND: Color = Color::DarkYellow;
const C_CLOUD: Color = Color::Grey;
const C_RUNNER: Color = Color::White;
const C_RUNNER_SHIELDED: Color = Color::Cyan;
const C_CACTUS: Color = Color::Green;
const C_BIRD: Color = Color::Magenta;
const C_PICKUP: Color = Color::Blue;
const C_SCORE: Color = Color::Yellow;
const C_SHIELD_TEXT: Color = Color::Cyan;
const C_NEXT_SHIELD_TEXT: Color = Color::DarkGreen;
const C_DEBUG: Color = Color::Red;
const C_TITLE: Color = Color::White;
const C_TITLE_FADED: Color = Color::DarkGrey;
const C_BANNER: Color = Color::Red;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: C_BACKGROUND,
};

/// Character grid covering the whole world
#[derive(Debug, Clone)]
struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    /// Added to every write (screen shake)
    offset: (i32, i32),
}

impl Canvas {
    fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
            offset: (0, 0),
        }
    }

    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        let (col, row) = (col + self.offset.0, row + self.offset.1);
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = Cell { ch, color };
    }

    fn text(&mut self, col: i32, row: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }

    fn centered(&mut self, row: i32, text: &str, color: Color) {
        let col = (self.cols as i32 - text.chars().count() as i32) / 2;
        self.text(col, row, text, color);
    }

    fn fill(&mut self, min: (i32, i32), max: (i32, i32), ch: char, color: Color) {
        for row in min.1..=max.1 {
            for col in min.0..=max.0 {
                self.put(col, row, ch, color);
            }
        }
    }

    fn outline(&mut self, min: (i32, i32), max: (i32, i32), color: Color) {
        for col in min.0..=max.0 {
            self.put(col, min.1, '-', color);
            self.put(col, max.1, '-', color);
        }
        for row in min.1..=max.1 {
            self.put(min.0, row, '|', color);
            self.put(max.0, row, '|', color);
        }
    }

    /// Queue the whole grid, switching colour only between runs
    fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            let line = &self.cells[start..start + self.cols as usize];

            let mut run = String::new();
            let mut run_color = None;
            for cell in line {
                if run_color != Some(cell.color) {
                    if let Some(color) = run_color {
                        out.queue(style::SetForegroundColor(color))?;
                        out.queue(Print(&run))?;
                    }
                    run.clear();
                    run_color = Some(cell.color);
                }
                run.push(cell.ch);
            }
            if let Some(color) = run_color {
                out.queue(style::SetForegroundColor(color))?;
                out.queue(Print(&run))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()
    }
}

/// Draws frames as coloured characters
pub struct TerminalSurface<W: Write> {
    out: W,
    layout: Layout,
    canvas: Canvas,
}

impl<W: Write> TerminalSurface<W> {
    /// Surface filling `cols` × `rows` cells
    pub fn new(out: W, layout: Layout, cols: u16, rows: u16) -> Self {
        Self {
            out,
            layout,
            canvas: Canvas::new(cols.max(1), rows.max(1)),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn col(&self, x: f32) -> i32 {
        (x / self.layout.screen_width * self.canvas.cols as f32).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y / self.layout.screen_height * self.canvas.rows as f32).floor() as i32
    }

    /// Cell range covered by a box. Never empty, so small sprites stay visible.
    fn cells(&self, b: &Hitbox) -> ((i32, i32), (i32, i32)) {
        let min = (self.col(b.left()), self.row(b.top()));
        let max = (
            (self.col(b.right()) - 1).max(min.0),
            (self.row(b.bottom()) - 1).max(min.1),
        );
        (min, max)
    }

    /// Clear the canvas and shift everything drawn this frame by the shake
    fn begin(&mut self, frame: &Frame) {
        self.canvas.clear();
        let cols = frame.shake.x / self.layout.screen_width * self.canvas.cols as f32;
        let rows = frame.shake.y / self.layout.screen_height * self.canvas.rows as f32;
        self.canvas.offset = (cols.round() as i32, rows.round() as i32);
    }

    fn ground_row(&self) -> i32 {
        self.row(self.layout.ground_y)
    }

    // ── Layers ────────────────────────────────────────────────────────────────

    fn draw_land(&mut self, frame: &Frame) {
        let row = self.ground_row();
        let cols = self.canvas.cols as i32;
        let shift = self.col(frame.land_offset);
        for col in 0..cols {
            let textured = (col + shift).rem_euclid(7) == 0;
            self.canvas.put(col, row, if textured { '.' } else { '_' }, C_LAND);
        }
    }

    fn draw_clouds(&mut self, clouds: &[Vec2]) {
        for cloud in clouds {
            let bounds = Hitbox::new(cloud.x, cloud.y, CLOUD_SIZE.0, CLOUD_SIZE.1);
            let (min, max) = self.cells(&bounds);
            self.canvas.fill(min, (max.0, min.1), '~', C_CLOUD);
        }
    }

    fn draw_runner(&mut self, frame: &Frame) {
        let (min, max) = self.cells(&frame.runner_bounds);
        let color = if frame.shield_secs.is_some() {
            C_RUNNER_SHIELDED
        } else {
            C_RUNNER
        };
        let ch = match frame.runner_state {
            RunnerState::Dead => 'X',
            RunnerState::DownRun => '=',
            RunnerState::Run | RunnerState::Jump => '#',
        };
        if frame.shield_secs.is_some() {
            self.canvas.put(min.0 - 1, max.1, '(', C_RUNNER_SHIELDED);
            self.canvas.put(max.0 + 1, max.1, ')', C_RUNNER_SHIELDED);
        }
        self.canvas.fill(min, max, ch, color);
    }

    fn draw_sprites(&mut self, frame: &Frame) {
        for sprite in &frame.sprites {
            let (ch, color) = match sprite.kind {
                SpriteKind::SmallCactus => ('i', C_CACTUS),
                SpriteKind::LargeCactus => ('I', C_CACTUS),
                SpriteKind::Bird => ('v', C_BIRD),
                SpriteKind::ShieldPickup => ('O', C_PICKUP),
            };
            let (min, max) = self.cells(&sprite.bounds);
            self.canvas.fill(min, max, ch, color);
        }
    }

    fn draw_score(&mut self, frame: &Frame) {
        let row = self.row(self.layout.score_y());
        if frame.show_high_score {
            let label = self.col(self.layout.high_label_x());
            self.canvas.text(label, row, "HI", C_SCORE);
            let high = self.col(self.layout.high_score_x());
            self.canvas.text(high, row, &frame.high_score_digits, C_SCORE);
        }
        if frame.score_visible {
            let col = self.col(self.layout.score_x());
            self.canvas.text(col, row, &frame.score_digits, C_SCORE);
        }
    }

    fn draw_shield_status(&mut self, frame: &Frame) {
        let col = self.col(self.layout.screen_width - 150.0);
        if let Some(secs) = frame.shield_secs {
            let row = self.row(40.0) + 1;
            self.canvas.text(col, row, &format!("Shield: {secs}s"), C_SHIELD_TEXT);
        }
        let row = self.row(60.0) + 2;
        let text = format!("Next Shield: {}s", frame.next_shield_secs);
        self.canvas.text(col, row, &text, C_NEXT_SHIELD_TEXT);
    }

    fn draw_debug(&mut self, frame: &Frame) {
        let Some(debug) = &frame.debug else { return };
        for hitbox in &debug.hitboxes {
            let (min, max) = self.cells(hitbox);
            self.canvas.outline(min, max, C_DEBUG);
        }
        let col = self.col(self.layout.screen_width / 100.0);
        let row = self.row(self.layout.score_y());
        self.canvas.text(col, row, &debug.speed_text, C_DEBUG);
    }

    fn draw_title(&mut self, frame: &Frame) {
        let color = if frame.intro_alpha > 0.5 {
            C_TITLE
        } else {
            C_TITLE_FADED
        };
        if frame.intro_alpha > 0.0 {
            let row = self.canvas.rows as i32 / 2 - 2;
            self.canvas.centered(row, "DINO RUNNER", color);
            self.canvas.centered(row + 1, "press SPACE to start", color);
        }
    }

    fn compose_title_scene(&mut self, frame: &Frame) {
        self.draw_land(frame);
        self.draw_runner(frame);
        self.draw_title(frame);
    }

    fn compose_run_scene(&mut self, frame: &Frame) {
        self.draw_clouds(&frame.clouds);
        self.draw_land(frame);
        self.draw_sprites(frame);
        self.draw_runner(frame);
        self.draw_score(frame);
        self.draw_shield_status(frame);
        self.draw_debug(frame);
    }

    fn banner(&mut self, lines: &[&str]) {
        let row = self.canvas.rows as i32 / 2 - lines.len() as i32;
        for (i, line) in lines.iter().enumerate() {
            self.canvas.centered(row + i as i32, line, C_BANNER);
        }
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.canvas.present(&mut self.out)
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn draw_start(&mut self, frame: &Frame) -> std::io::Result<()> {
        self.begin(frame);
        self.compose_title_scene(frame);
        self.present()
    }

    fn draw_intro(&mut self, frame: &Frame) -> std::io::Result<()> {
        self.begin(frame);
        self.draw_clouds(&frame.clouds);
        self.compose_title_scene(frame);
        self.present()
    }

    fn draw_in_progress(&mut self, frame: &Frame) -> std::io::Result<()> {
        self.begin(frame);
        self.compose_run_scene(frame);
        self.present()
    }

    fn draw_over(&mut self, frame: &Frame) -> std::io::Result<()> {
        self.begin(frame);
        self.compose_run_scene(frame);
        self.banner(&["G A M E   O V E R", "", "press SPACE to replay"]);
        self.present()
    }

    fn draw_paused(&mut self, frame: &Frame) -> std::io::Result<()> {
        self.begin(frame);
        self.compose_run_scene(frame);
        self.banner(&["PAUSED", "press P to resume"]);
        self.present()
    }
}
