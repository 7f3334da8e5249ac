use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Direction, GameState, Position, SegmentShape};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Splash banner shown briefly at startup
    pub fn render_splash(&self, frame: &mut Frame) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Mixbit Studios©",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        let banner = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(banner, Self::centered(frame.area(), 4));
    }

    /// Main menu with the persistent high score
    pub fn render_menu(&self, frame: &mut Frame, items: &[&str], selected: usize, high_score: u32) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "S N A K O R N",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Highscore: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    high_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        lines.extend(Self::item_lines(items, selected, None));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "↑↓ to navigate | Enter to select",
            Style::default().fg(Color::Gray),
        )));

        let menu = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(menu, Self::centered(frame.area(), (items.len() + 10) as u16));
    }

    /// Difficulty selection screen
    ///
    /// `active` marks the preset future sessions will use.
    pub fn render_options(&self, frame: &mut Frame, items: &[&str], selected: usize, active: usize) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Difficulty",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        lines.extend(Self::item_lines(items, selected, Some(active)));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter to select | ESC to return",
            Style::default().fg(Color::Gray),
        )));

        let options = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(options, Self::centered(frame.area(), (items.len() + 8) as u16));
    }

    /// The playing screen: header, grid (or pause panel), footer
    pub fn render_game(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        paused: bool,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if paused {
            let pause = self.render_pause();
            frame.render_widget(pause, game_area);
        } else {
            let grid = self.render_grid(state);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Terminal screen after a session ends
    pub fn render_game_over(&self, frame: &mut Frame, state: &GameState, high_score: u32) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Points: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Highscore: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    high_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart / ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "ESC",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" returns to menu", Style::default().fg(Color::Gray)),
            ]),
        ];

        let panel = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
        frame.render_widget(panel, Self::centered(frame.area(), 10));
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        // Head first, so on the fatal self-collision frame the head wins
        // the overlapping cell
        let mut shapes: HashMap<Position, SegmentShape> = HashMap::new();
        for (i, pos) in state.snake.body.iter().enumerate() {
            shapes.entry(*pos).or_insert_with(|| state.snake.shape_at(i));
        }

        let mut lines = Vec::new();
        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if let Some(shape) = shapes.get(&pos) {
                    let style = if matches!(shape, SegmentShape::Head(_)) {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Green)
                    };
                    Span::styled(Self::segment_glyph(*shape), style)
                } else if pos == state.fruit {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if (x + y) % 2 == 0 {
                    // Checkerboard ground
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                } else {
                    Span::raw("  ")
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snakorn "),
            )
            .alignment(Alignment::Center)
    }

    fn segment_glyph(shape: SegmentShape) -> &'static str {
        match shape {
            SegmentShape::Head(Direction::Up) => "▲ ",
            SegmentShape::Head(Direction::Down) => "▼ ",
            SegmentShape::Head(Direction::Left) => "◀ ",
            SegmentShape::Head(Direction::Right) => "▶ ",
            // The tail glyph joins the body, opposite the taper
            SegmentShape::Tail(Direction::Up) => "╻ ",
            SegmentShape::Tail(Direction::Down) => "╹ ",
            SegmentShape::Tail(Direction::Left) => "╺ ",
            SegmentShape::Tail(Direction::Right) => "╸ ",
            SegmentShape::BodyVertical => "┃ ",
            SegmentShape::BodyHorizontal => "━ ",
            SegmentShape::CornerUpLeft => "┛ ",
            SegmentShape::CornerUpRight => "┗ ",
            SegmentShape::CornerDownLeft => "┓ ",
            SegmentShape::CornerDownRight => "┏ ",
        }
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Level: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.level.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_pause(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Game paused",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press ESC to continue the game.",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("ESC", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    /// Menu item lines with the cursor highlighted and the active preset
    /// marked
    fn item_lines(items: &[&str], selected: usize, active: Option<usize>) -> Vec<Line<'static>> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let marker = if active == Some(i) { "● " } else { "" };
                let label = format!("  {marker}{item}  ");
                let style = if i == selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(label, style))
            })
            .collect()
    }

    /// A horizontally-centered band of `height` rows
    fn centered(area: Rect, height: u16) -> Rect {
        let vertical = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(height),
                Constraint::Min(0),
            ])
            .split(area)[1];

        Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(60),
                Constraint::Percentage(20),
            ])
            .split(vertical)[1]
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
