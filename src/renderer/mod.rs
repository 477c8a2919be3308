//! Terminal renderer
//!
//! Draws a `Scene` with ratatui: a status line (cooldown bars, score,
//! level), the play-field grid, a help line, and the modal panels for
//! pause, name entry and the final high-score table.

pub mod field;
pub mod palette;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::consts::MAX_NAME_LEN;
use crate::highscores::HighScores;
use crate::scene::{Bar, Hud, Scene};
use crate::sim::{EndStage, GamePhase};
use field::Grid;
use palette::Palette;

/// Cells used for a full cooldown bar
const BAR_CELLS: usize = 10;

/// Everything drawn in one frame
pub struct View<'a> {
    pub scene: &'a Scene,
    pub name_entry: &'a str,
    pub high_scores: &'a HighScores,
    /// Measured frame rate, when the HUD should show it
    pub fps: Option<f32>,
    pub palette: &'a Palette,
    pub frame_count: u64,
}

pub fn render(frame: &mut Frame, view: &View) {
    let palette = view.palette;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(fg(palette.dim))
        .title(" Sky Dodge ")
        .title_style(fg(palette.accent).add_modifier(Modifier::BOLD));
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(4),    // Play-field
            Constraint::Length(1), // Help
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(status_line(&view.scene.hud, view.fps, palette)),
        chunks[0],
    );

    let field_area = chunks[1];
    let mut grid = Grid::new(
        field_area.width as usize,
        field_area.height as usize,
        palette,
    );
    for item in &view.scene.items {
        grid.draw(item, palette, view.frame_count);
    }
    if let Some(color) = view.scene.overlay {
        grid.wash(color);
    }
    frame.render_widget(Paragraph::new(grid.into_lines()), field_area);

    frame.render_widget(
        Paragraph::new(help_line(view.scene.phase, palette)),
        chunks[2],
    );

    match view.scene.phase {
        GamePhase::Paused => render_banner(frame, field_area, " PAUSED ", palette),
        GamePhase::Ended(EndStage::EnteringName) => {
            render_name_entry(frame, field_area, view.name_entry, view.scene.hud.score, palette)
        }
        GamePhase::Ended(EndStage::Summary) => render_summary(
            frame,
            field_area,
            view.high_scores,
            view.scene.hud.score,
            palette,
        ),
        _ => {}
    }
}

fn fg(c: palette::Rgb) -> Style {
    Style::default().fg(c.into())
}

fn bar_spans(bar: &Bar, palette: &Palette) -> Vec<Span<'static>> {
    let filled = (bar.fraction() * BAR_CELLS as f32).ceil() as usize;
    let filled = filled.min(BAR_CELLS);
    vec![
        Span::styled(format!(" {} ", bar.label), fg(palette.text)),
        Span::styled("█".repeat(filled), fg(palette.shield)),
        Span::styled("░".repeat(BAR_CELLS - filled), fg(palette.dim)),
    ]
}

fn status_line(hud: &Hud, fps: Option<f32>, palette: &Palette) -> Line<'static> {
    let sep = || Span::styled(" │ ", fg(palette.dim));
    let mut spans = bar_spans(&hud.flash, palette);
    spans.push(sep());
    spans.extend(bar_spans(&hud.defend, palette));
    spans.push(sep());
    spans.push(Span::styled(
        format!("Score: {}", hud.score),
        fg(palette.accent).add_modifier(Modifier::BOLD),
    ));
    spans.push(sep());
    spans.push(Span::styled(format!("Level: {}", hud.level), fg(palette.text)));
    if let Some(fps) = fps {
        spans.push(sep());
        spans.push(Span::styled(format!("{:.0} fps", fps), fg(palette.dim)));
    }
    Line::from(spans)
}

fn help_line(phase: GamePhase, palette: &Palette) -> Line<'static> {
    let text = match phase {
        GamePhase::Ended(EndStage::EnteringName) => " Type your name │ Enter confirm │ Esc quit",
        GamePhase::Ended(EndStage::Summary) => " Enter/R play again │ Esc quit",
        GamePhase::Paused => " P/Enter resume │ R restart │ Esc quit",
        _ => " ←↑↓→ move │ Space/F flash │ D defend │ P pause │ R restart │ Esc quit",
    };
    Line::from(Span::styled(text, fg(palette.dim)))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

fn panel(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(fg(palette.accent))
        .title(title.to_string())
        .title_style(fg(palette.accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(palette.panel.into()))
}

fn render_banner(frame: &mut Frame, area: Rect, title: &str, palette: &Palette) {
    let area = centered(area, 30, 3);
    frame.render_widget(Clear, area);
    let text = Paragraph::new(Line::from(Span::styled(
        "P or Enter to resume",
        fg(palette.text),
    )))
    .alignment(Alignment::Center)
    .block(panel(title, palette));
    frame.render_widget(text, area);
}

fn render_name_entry(frame: &mut Frame, area: Rect, name: &str, score: u64, palette: &Palette) {
    let area = centered(area, 40, 9);
    frame.render_widget(Clear, area);

    let typed = name.chars().count();
    let display_name = format!("{}{}", name, "_".repeat(MAX_NAME_LEN.saturating_sub(typed)));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Score: {}", score),
            fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("  Enter your name:", fg(palette.dim))),
        Line::from(vec![
            Span::styled("    [ ", fg(palette.dim)),
            Span::styled(display_name, fg(palette.text).add_modifier(Modifier::BOLD)),
            Span::styled(" ]", fg(palette.dim)),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Leave empty to skip", fg(palette.dim))),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(panel(" GAME OVER ", palette)),
        area,
    );
}

/// Rows of the final table, rank first
pub fn summary_rows(high_scores: &HighScores) -> Vec<String> {
    if high_scores.is_empty() {
        return vec!["No high scores yet".to_string()];
    }
    high_scores
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {:<width$} {:>6}", i + 1, e.name, e.score, width = MAX_NAME_LEN))
        .collect()
}

fn render_summary(
    frame: &mut Frame,
    area: Rect,
    high_scores: &HighScores,
    score: u64,
    palette: &Palette,
) {
    let rows = summary_rows(high_scores);
    let area = centered(area, 36, rows.len() as u16 + 6);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Your score: {}", score),
            fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        rows.into_iter()
            .map(|row| Line::from(Span::styled(row, fg(palette.text)))),
    );

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel(" HIGH SCORES ", palette)),
        area,
    );
}
