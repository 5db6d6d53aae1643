//! Terminal UI rendering with ratatui

use crate::canvas::TileCanvas;
use blockfall::{Cell, Game, PieceRole, Point, Settings, TetrominoType};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Total width needed: hold(12) + board(22) + next/stats(16) = 50
const GAME_WIDTH: u16 = 50;
/// Total height needed: board(20) + 2 for borders
const GAME_HEIGHT: u16 = 22;

/// Spawn offsets span x in -1..=2 and y in 0..=1
const PREVIEW_COLS: std::ops::RangeInclusive<i32> = -1..=2;
const PREVIEW_ROWS: [i32; 2] = [1, 0];

/// Render the game screen
pub fn render_game(frame: &mut Frame, game: &Game<TileCanvas>, settings: &Settings) {
    let area = frame.area();
    let (block_char, _) = settings.visual.block_chars();
    let canvas = game.sink();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // Create main layout: hold | board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Hold box
            Constraint::Length(22), // Board (10*2 + 2 for borders)
            Constraint::Length(16), // Next queue + stats
        ])
        .split(game_area);

    render_hold(frame, main_layout[0], canvas, block_char);
    render_board(frame, main_layout[1], game, settings);

    // Right side: next queue and stats
    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(11), // Next queue
            Constraint::Min(6),     // Stats
        ])
        .split(main_layout[2]);

    // The canvas holds the next piece; later queue entries come from the session
    let later: Vec<TetrominoType> = if canvas.game_over() {
        Vec::new()
    } else {
        game.preview().skip(1).collect()
    };
    render_next_queue(frame, right_layout[0], canvas, &later, block_char);
    render_stats(frame, right_layout[1], game);

    if canvas.game_over() {
        let subtitle = if game.restart_ready() {
            "Press space to restart"
        } else {
            ""
        };
        render_overlay(frame, area, "GAME OVER", subtitle);
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the hold piece box
fn render_hold(frame: &mut Frame, area: Rect, canvas: &TileCanvas, block_char: &str) {
    let block = Block::default()
        .title(" HOLD ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    render_mini_piece(frame, inner, &canvas.tiles(PieceRole::Hold), block_char);
}

/// Render the next piece followed by the rest of the queue
fn render_next_queue(
    frame: &mut Frame,
    area: Rect,
    canvas: &TileCanvas,
    later: &[TetrominoType],
    block_char: &str,
) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let next = canvas.tiles(PieceRole::Next);
    if next.is_empty() {
        return;
    }

    let slots = 1 + later.len();
    let piece_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); slots])
        .split(inner);

    render_mini_piece(frame, piece_areas[0], &next, block_char);
    for (slot, &piece_type) in piece_areas.iter().skip(1).zip(later) {
        let tiles: Vec<(Point, TetrominoType)> = piece_type
            .cells()
            .into_iter()
            .map(|cell| (cell, piece_type))
            .collect();
        render_mini_piece(frame, *slot, &tiles, block_char);
    }
}

/// Render a small piece preview from spawn-offset tiles
fn render_mini_piece(
    frame: &mut Frame,
    area: Rect,
    tiles: &[(Point, TetrominoType)],
    block_char: &str,
) {
    if tiles.is_empty() || area.height < 1 || area.width < 8 {
        return;
    }

    let lines: Vec<Line> = PREVIEW_ROWS
        .iter()
        .map(|&y| {
            let spans: Vec<Span> = PREVIEW_COLS
                .map(|x| match tiles.iter().find(|(cell, _)| *cell == (x, y)) {
                    Some((_, piece)) => Span::styled(block_char, Style::default().fg(piece.color())),
                    None => Span::raw(EMPTY),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, game: &Game<TileCanvas>, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();
    let canvas = game.sink();
    let bounds = game.field().bounds();

    let ghost = if settings.visual.show_ghost {
        game.ghost_cells()
    } else {
        None
    };
    let ghost_color = game.current_piece().map(|piece| piece.piece_type.color());

    let block = Block::default()
        .title(" BLOCKFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Top row first; y grows upward on the field
    let lines: Vec<Line> = (bounds.y_min..bounds.y_max)
        .rev()
        .map(|y| {
            let spans: Vec<Span> = (bounds.x_min..bounds.x_max)
                .map(|x| {
                    let cell = (x, y);
                    if let Some(piece) = canvas.tile(PieceRole::Active, cell) {
                        return Span::styled(block_char, Style::default().fg(piece.color()));
                    }
                    if let Some(Cell::Filled(piece)) = game.field().get(cell) {
                        return Span::styled(block_char, Style::default().fg(piece.color()));
                    }
                    match (ghost, ghost_color) {
                        (Some(ghost), Some(color)) if ghost.contains(&cell) => {
                            Span::styled(ghost_char, Style::default().fg(color).dim())
                        }
                        _ => Span::raw(EMPTY),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, game: &Game<TileCanvas>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = game.score();
    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", game.sink().score()),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", score.lines),
            Style::default().fg(Color::Green),
        )),
        Line::raw(""),
        Line::from(Span::styled("PIECES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", score.pieces),
            Style::default().fg(Color::Cyan),
        )),
    ];

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render an overlay (for game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 28u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
