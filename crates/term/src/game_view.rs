//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, SnakeSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Direction, Point, SnakePalette};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::new(24, 26, 36);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal renderer for the snake board and its side panel.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen placement of the board frame for one render.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    frame_w: u16,
    frame_h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = snap.width.saturating_mul(self.cell_w);
        let board_h = snap.height.saturating_mul(self.cell_h);
        let frame_w = board_w.saturating_add(2);
        let frame_h = board_h.saturating_add(2);
        let layout = Layout {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            frame_w,
            frame_h,
        };

        let empty = CellStyle::new(Rgb::new(70, 72, 86), BOARD_BG).dim();
        for y in 0..snap.height {
            for x in 0..snap.width {
                self.fill_cell(fb, layout, Point::new(x as i32, y as i32), '·', empty);
            }
        }

        self.draw_border(fb, layout, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        let block = CellStyle::new(Rgb::new(150, 130, 110), BOARD_BG);
        for &pos in &snap.blocks {
            self.fill_cell(fb, layout, pos, '▓', block);
        }

        let apple = CellStyle::new(Rgb::new(230, 60, 60), BOARD_BG).bold();
        for &pos in &snap.apples {
            self.fill_cell(fb, layout, pos, '●', apple);
        }

        for snake in &snap.snakes {
            self.draw_snake(fb, layout, snake);
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.cleared {
            self.draw_overlay(fb, layout, "VICTORY", Some("n next  r retry"));
        } else if !snap.running {
            self.draw_overlay(fb, layout, "PAUSED", Some("p resume"));
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: Layout, style: CellStyle) {
        let Layout {
            x,
            y,
            frame_w: w,
            frame_h: h,
        } = layout;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        // Open sides mark the wrapping edges.
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '┆', style);
            fb.put_char(x + w - 1, y + dy, '┆', style);
        }
    }

    fn draw_snake(&self, fb: &mut FrameBuffer, layout: Layout, snake: &SnakeSnapshot) {
        let (body_fg, head_fg) = palette_colors(snake.palette);
        let body = CellStyle::new(body_fg, BOARD_BG);
        // Tail first so the head wins if anything overlaps.
        for &pos in snake.segments.iter().skip(1).rev() {
            self.fill_cell(fb, layout, pos, '█', body);
        }
        if let Some(head) = snake.head() {
            let style = CellStyle::new(head_fg, BOARD_BG).bold();
            self.fill_cell(fb, layout, head, head_glyph(snake.direction), style);
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: Layout, pos: Point, ch: char, style: CellStyle) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        let (cx, cy) = (pos.x as u16, pos.y as u16);
        let px = (layout.x + 1).saturating_add(cx.saturating_mul(self.cell_w));
        let py = (layout.y + 1).saturating_add(cy.saturating_mul(self.cell_h));
        if px >= layout.x + layout.frame_w - 1 || py >= layout.y + layout.frame_h - 1 {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: Layout) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = layout.y;
        fb.put_str(panel_x, y, &snap.level_name, label);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "APPLES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.apples.len() as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TICK", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.tick.min(u64::from(u32::MAX)) as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SNAKES", label);
        y = y.saturating_add(1);
        for snake in &snap.snakes {
            if y >= viewport.height {
                return;
            }
            let (_, head_fg) = palette_colors(snake.palette);
            let name = CellStyle::new(head_fg, PANEL_BG).bold();
            let mut x = fb.put_str(panel_x, y, "S", name);
            x = fb.put_u32(x, y, u32::from(snake.id.get()), name);
            x = fb.put_str(x.saturating_add(1), y, "len ", dim);
            x = fb.put_u32(x, y, snake.segments.len() as u32, value);
            x = fb.put_str(x, y, "/", dim);
            fb.put_u32(x, y, snake.target_len as u32, value);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: Layout, title: &str, hint: Option<&str>) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = layout.y.saturating_add(layout.frame_h / 2);
        put_centered(fb, layout, mid_y, title, style);
        if let Some(hint) = hint {
            let hint_style = CellStyle::new(Rgb::new(180, 180, 180), PANEL_BG);
            put_centered(fb, layout, mid_y.saturating_add(1), hint, hint_style);
        }
    }
}

fn put_centered(fb: &mut FrameBuffer, layout: Layout, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    let x = layout.x.saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
    fb.put_str(x, y, text, style);
}

/// (body, head) colors.
fn palette_colors(palette: SnakePalette) -> (Rgb, Rgb) {
    match palette {
        SnakePalette::Green => (Rgb::new(60, 170, 80), Rgb::new(120, 240, 140)),
        SnakePalette::Magenta => (Rgb::new(170, 60, 170), Rgb::new(240, 120, 240)),
        SnakePalette::Cyan => (Rgb::new(50, 160, 180), Rgb::new(120, 230, 250)),
    }
}

fn head_glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => '▲',
        Direction::Down => '▼',
        Direction::Left => '◀',
        Direction::Right => '▶',
    }
}
