use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::ViewState;

use super::App;

/// Render one frame: title bar, query input, content region, status bar.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Query input
            Constraint::Min(0),    // Description / error / loading
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    let title = Paragraph::new("ModelMuse: 3D Model Search")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    render_input(app, frame, chunks[1]);
    render_content(app, frame, chunks[2]);

    let status = Paragraph::new(status_text(app))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, chunks[3]);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let style = if app.entry_enabled() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Paragraph::new(app.input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title("Query"),
    );
    frame.render_widget(input, area);

    if app.entry_enabled() {
        // Place the cursor after the typed text, clamped to the box.
        let max_x = area.width.saturating_sub(2);
        let x = (app.input().len() as u16).min(max_x);
        frame.set_cursor_position(Position::new(area.x + 1 + x, area.y + 1));
    }
}

fn render_content(app: &App, frame: &mut Frame, area: Rect) {
    let (text, title, style) = match app.view() {
        ViewState::Idle => (
            "Type a query and press Enter to imagine a 3D model.",
            "Description",
            Style::default().fg(Color::DarkGray),
        ),
        ViewState::Loading => (
            "Generating description...",
            "Description",
            Style::default().fg(Color::Yellow),
        ),
        ViewState::Result(text) => (
            text.as_str(),
            "Description",
            Style::default().fg(Color::White),
        ),
        ViewState::Error(msg) => (msg.as_str(), "Error", Style::default().fg(Color::Red)),
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn status_text(app: &App) -> &'static str {
    if !app.is_configured() {
        "Search disabled: no API key configured"
    } else if app.view().is_loading() {
        "Waiting for the model, input disabled"
    } else {
        "Enter to search, Esc to quit"
    }
}
