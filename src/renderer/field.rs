//! Rasterizes the scene's draw list onto a character grid
//!
//! The play-field (800 x 600 px) is scaled to whatever cell grid the
//! terminal gives us. Each sprite covers at least one cell.

use ratatui::prelude::*;

use super::palette::{Palette, Rgb, blend};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::scene::{DrawItem, Rgba, Sprite};
use crate::sim::{CloudLayer, EnemyKind, Rect};

/// Tilt (degrees) past which sprites draw a sloped nose
const TILT_GLYPH_DEG: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// A `width` x `height` grid of cells covering the whole play-field
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize, palette: &Palette) -> Self {
        Self {
            width,
            height,
            cells: vec![
                Cell {
                    ch: ' ',
                    fg: palette.sky,
                    bg: palette.sky,
                };
                width * height
            ],
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        (x < self.width && y < self.height).then(|| &self.cells[y * self.width + x])
    }

    /// Cell-space column/row range covered by a field rectangle
    fn span(&self, rect: &Rect) -> Option<(usize, usize, usize, usize)> {
        let sx = self.width as f32 / FIELD_WIDTH;
        let sy = self.height as f32 / FIELD_HEIGHT;
        let c0 = (rect.left() * sx).floor() as i64;
        let c1 = ((rect.right() * sx).ceil() as i64).max(c0 + 1);
        let r0 = (rect.top() * sy).floor() as i64;
        let r1 = ((rect.bottom() * sy).ceil() as i64).max(r0 + 1);

        let c0 = c0.clamp(0, self.width as i64) as usize;
        let c1 = c1.clamp(0, self.width as i64) as usize;
        let r0 = r0.clamp(0, self.height as i64) as usize;
        let r1 = r1.clamp(0, self.height as i64) as usize;
        (c0 < c1 && r0 < r1).then_some((c0, c1, r0, r1))
    }

    /// Fill a rectangle; `glyph` gets the column offset and the span width
    fn paint(&mut self, rect: &Rect, mut glyph: impl FnMut(usize, usize) -> Option<(char, Rgb)>) {
        let Some((c0, c1, r0, r1)) = self.span(rect) else {
            return;
        };
        for y in r0..r1 {
            for x in c0..c1 {
                if let Some((ch, fg)) = glyph(x - c0, c1 - c0) {
                    let cell = &mut self.cells[y * self.width + x];
                    cell.ch = ch;
                    cell.fg = fg;
                }
            }
        }
    }

    /// Recolour the background of a rectangle
    fn tint(&mut self, rect: &Rect, color: Rgb, amount: f32) {
        let Some((c0, c1, r0, r1)) = self.span(rect) else {
            return;
        };
        for y in r0..r1 {
            for x in c0..c1 {
                let cell = &mut self.cells[y * self.width + x];
                cell.bg = blend(cell.bg, color, amount);
            }
        }
    }

    pub fn draw(&mut self, item: &DrawItem, palette: &Palette, frame_count: u64) {
        let rect = &item.rect;
        match item.sprite {
            Sprite::Cloud(CloudLayer::Back) => {
                self.tint(rect, palette.back_cloud, 1.0);
            }
            // Translucent: keeps whatever glyphs are underneath
            Sprite::Cloud(CloudLayer::Front) => {
                self.tint(rect, palette.front_cloud, 0.5);
            }
            Sprite::Player { angle, shielded } => {
                let body = if shielded {
                    palette.shield
                } else {
                    palette.player
                };
                let nose = if angle > TILT_GLYPH_DEG {
                    '/'
                } else if angle < -TILT_GLYPH_DEG {
                    '\\'
                } else {
                    '>'
                };
                self.paint(rect, |dx, w| {
                    Some(if dx + 1 == w { (nose, body) } else { ('=', body) })
                });
            }
            Sprite::Explosion => {
                let flicker = frame_count % 4 < 2;
                self.paint(rect, |dx, _| {
                    let hot = (dx % 2 == 0) == flicker;
                    Some(if hot {
                        ('*', palette.explosion_hot)
                    } else {
                        ('#', palette.explosion_cool)
                    })
                });
            }
            Sprite::Balloon => {
                self.paint(rect, |_, _| Some(('O', palette.balloon)));
            }
            Sprite::Missile { kind, tilt } => {
                let color = match kind {
                    EnemyKind::Linear => palette.missile,
                    EnemyKind::Sinusoidal => palette.missile_sine,
                    EnemyKind::Boosted => palette.missile_boost,
                };
                // Screen y grows downward: positive tilt means descending
                let nose = if tilt > TILT_GLYPH_DEG {
                    '/'
                } else if tilt < -TILT_GLYPH_DEG {
                    '\\'
                } else {
                    '<'
                };
                self.paint(rect, |dx, _| {
                    Some(if dx == 0 { (nose, color) } else { ('-', color) })
                });
            }
        }
    }

    /// Full-field colour wash
    pub fn wash(&mut self, color: Rgba) {
        let tint = Rgb(color.r, color.g, color.b);
        let amount = color.a as f32 / 255.0;
        for cell in &mut self.cells {
            cell.bg = blend(cell.bg, tint, amount);
        }
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|c| {
                            Span::styled(
                                c.ch.to_string(),
                                Style::default().fg(c.fg.into()).bg(c.bg.into()),
                            )
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}
