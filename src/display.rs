//! Rendering layer — all terminal I/O lives here.
//!
//! `TerminalRenderer` keeps the primitives the world asked for and
//! translates them into terminal commands each frame. No game logic is
//! performed here.

use std::collections::HashMap;
use std::io::Write;

use arcade_shooter::assets::AssetResolver;
use arcade_shooter::entities::{EntityId, SpriteKind, Vec2};
use arcade_shooter::render::{Primitive, Renderer};
use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::DarkBlue;
const C_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_EXPLOSION: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Background glyph spacing, in cells.
const STAR_STEP_X: u16 = 11;
const STAR_STEP_Y: u16 = 5;

fn colour_of(sprite: SpriteKind) -> Color {
    match sprite {
        SpriteKind::Background => C_BACKGROUND,
        SpriteKind::Player => C_PLAYER,
        SpriteKind::Enemy => C_ENEMY,
        SpriteKind::Bullet => C_BULLET,
        SpriteKind::Explosion => C_EXPLOSION,
    }
}

pub struct TerminalRenderer {
    assets: AssetResolver,
    world_width: f64,
    world_height: f64,
    primitives: HashMap<EntityId, Primitive>,
    score: Option<(String, Vec2)>,
}

impl TerminalRenderer {
    pub fn new(assets: AssetResolver, world_width: f64, world_height: f64) -> Self {
        Self {
            assets,
            world_width,
            world_height,
            primitives: HashMap::new(),
            score: None,
        }
    }

    /// World point → terminal cell. `y` is flipped: the world grows upward.
    fn to_cell(&self, pos: Vec2, cols: u16, rows: u16) -> (i32, i32) {
        let col = pos.x / self.world_width * cols as f64;
        let row = (self.world_height - pos.y) / self.world_height * rows as f64;
        (col.floor() as i32, row.floor() as i32)
    }

    /// Render one complete frame.
    pub fn draw<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_background(out, cols, rows)?;

        let mut ids: Vec<&EntityId> = self.primitives.keys().collect();
        ids.sort();
        for id in ids {
            self.draw_primitive(out, &self.primitives[id], cols, rows)?;
        }

        if let Some((text, pos)) = &self.score {
            let (col, row) = self.to_cell(*pos, cols, rows);
            put(out, col, row, cols, rows, text, C_SCORE)?;
        }

        draw_controls_hint(out, rows)?;

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    fn draw_background<W: Write>(&self, out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
        let glyph = self.assets.glyph(SpriteKind::Background);
        for row in (0..rows.saturating_sub(1)).step_by(STAR_STEP_Y as usize) {
            // Stagger alternate rows so the field does not look like a grid.
            let shift = (row / STAR_STEP_Y % 2) * (STAR_STEP_X / 2);
            for col in (shift..cols).step_by(STAR_STEP_X as usize) {
                for (i, line) in glyph.lines.iter().enumerate() {
                    put(out, col as i32, (row as usize + i) as i32, cols, rows, line, C_BACKGROUND)?;
                }
            }
        }
        Ok(())
    }

    fn draw_primitive<W: Write>(
        &self,
        out: &mut W,
        primitive: &Primitive,
        cols: u16,
        rows: u16,
    ) -> std::io::Result<()> {
        // Anchor the glyph on the box's top-left corner.
        let top_left = primitive.pos.offset(0.0, primitive.size.height);
        let (col, row) = self.to_cell(top_left, cols, rows);
        let colour = colour_of(primitive.sprite);
        for (i, line) in self.assets.glyph(primitive.sprite).lines.iter().enumerate() {
            put(out, col, row + i as i32, cols, rows, line, colour)?;
        }
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn add(&mut self, id: EntityId, primitive: Primitive) {
        self.primitives.insert(id, primitive);
    }

    fn update(&mut self, id: EntityId, pos: Vec2) {
        if let Some(primitive) = self.primitives.get_mut(&id) {
            primitive.pos = pos;
        }
    }

    fn remove(&mut self, id: EntityId) {
        self.primitives.remove(&id);
    }

    fn set_text(&mut self, text: &str, pos: Vec2) {
        self.score = Some((text.to_string(), pos));
    }
}

/// Print `text` at a cell, clipped to the screen. The last row is the hint.
fn put<W: Write>(
    out: &mut W,
    col: i32,
    row: i32,
    cols: u16,
    rows: u16,
    text: &str,
    colour: Color,
) -> std::io::Result<()> {
    if row < 0 || row >= rows.saturating_sub(1) as i32 || col >= cols as i32 {
        return Ok(());
    }
    let skip = (-col).max(0) as usize;
    let room = (cols as i32 - col.max(0)) as usize;
    let visible: String = text.chars().skip(skip).take(room).collect();
    if visible.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col.max(0) as u16, row as u16))?;
    out.queue(style::SetForegroundColor(colour))?;
    out.queue(Print(visible))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   ↑ / SPACE : Shoot   Q : Quit"))?;
    Ok(())
}
