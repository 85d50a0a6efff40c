//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::features::breath::{
    AudioSink, Border, Clock, Offset, Presentation, SessionSummary, SquareGeometry,
};
use crate::tui::app::{App, Screen};

const ACTIVE: Color = Color::Cyan;
const INACTIVE: Color = Color::DarkGray;

/// Render the application UI.
pub fn render<A: AudioSink, C: Clock>(frame: &mut Frame<'_>, app: &App<A, C>) {
    // Create layout: header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Square or summary
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let geometry = app.driver.settings().geometry;
    match (&app.screen, app.driver.presentation()) {
        (Screen::Breathing, Some(view)) => {
            render_header(frame, &view, chunks[0]);
            render_square(frame, &view, &geometry, chunks[1]);
        }
        (Screen::Finished(summary), _) => {
            render_title(frame, " Session finished ", chunks[0]);
            render_summary(frame, summary, chunks[1]);
        }
        (Screen::Breathing, None) => render_title(frame, " boxbreath ", chunks[0]),
    }
    render_status_bar(frame, app, chunks[2]);
}

/// Render the phase label, countdown, and remaining time.
fn render_header(frame: &mut Frame<'_>, view: &Presentation, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", view.phase.label()),
            Style::default().fg(ACTIVE).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{}s", view.countdown),
            Style::default().fg(Color::White),
        ),
        Span::raw("   "),
        Span::styled(view.timer.clone(), Style::default().fg(Color::Gray)),
    ];
    if view.paused {
        spans.push(Span::styled(
            "   PAUSED",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACTIVE)),
    );

    frame.render_widget(header, area);
}

fn render_title(frame: &mut Frame<'_>, title: &str, area: Rect) {
    let header = Paragraph::new(title.to_string())
        .style(Style::default().fg(ACTIVE).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACTIVE)),
        );

    frame.render_widget(header, area);
}

/// Draw the square with the active border, the trail, and the pacer.
fn render_square(frame: &mut Frame<'_>, view: &Presentation, geometry: &SquareGeometry, area: Rect) {
    let s = geometry.square_size;
    let margin = geometry.dot_size;
    let radius = geometry.dot_size / 2.0;

    let trail: Vec<(Color, (f64, f64))> = view
        .trail
        .iter()
        .filter(|slot| slot.opacity > 0.0)
        .map(|slot| (trail_color(slot.opacity), dot_center(slot.offset, geometry)))
        .collect();
    let (px, py) = dot_center(view.pacer, geometry);
    let active = view.border;

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::NONE))
        .marker(Marker::Braille)
        .x_bounds([-margin, s + margin])
        .y_bounds([-margin, s + margin])
        .paint(move |ctx| {
            for (border, (x1, y1, x2, y2)) in edges(s) {
                let color = if border == active { ACTIVE } else { INACTIVE };
                ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
            }
            ctx.layer();
            for (color, point) in &trail {
                ctx.draw(&Points {
                    coords: &[*point],
                    color: *color,
                });
            }
            ctx.draw(&Circle {
                x: px,
                y: py,
                radius,
                color: Color::White,
            });
        });

    frame.render_widget(canvas, area);
}

/// Summary of the finished session.
fn render_summary(frame: &mut Frame<'_>, summary: &SessionSummary, area: Rect) {
    let heading = if summary.completed {
        Span::styled(
            "Well done.",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "Session stopped.",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(""),
        Line::from(heading),
        Line::from(""),
        Line::from(summary.format_status()),
        Line::from(Span::styled(
            format!(
                "Pace {}s per side, music: {}",
                summary.config.pace_secs, summary.config.music
            ),
            Style::default().fg(Color::Gray),
        )),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));

    frame.render_widget(body, area);
}

/// Render the status bar.
fn render_status_bar<A: AudioSink, C: Clock>(frame: &mut Frame<'_>, app: &App<A, C>, area: Rect) {
    let help = match app.screen {
        Screen::Breathing => {
            let voice = match app.driver.presentation() {
                Some(view) if view.instructions => "on",
                _ => "off",
            };
            format!("space:pause | i:instructions ({voice}) | s:stop | q:quit")
        }
        Screen::Finished(_) => "r:repeat | q:quit".to_string(),
    };

    let text = app
        .status
        .as_ref()
        .map_or(help.clone(), |status| format!("{status} | {help}"));

    let status_bar = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}

/// The four sides in canvas space (y up), tagged with the phase border they light.
fn edges(s: f64) -> [(Border, (f64, f64, f64, f64)); 4] {
    [
        (Border::Left, (0.0, 0.0, 0.0, s)),
        (Border::Top, (0.0, s, s, s)),
        (Border::Right, (s, s, s, 0.0)),
        (Border::Bottom, (s, 0.0, 0.0, 0.0)),
    ]
}

/// Centre of a dot placed at `offset`, flipped into canvas space.
fn dot_center(offset: Offset, geometry: &SquareGeometry) -> (f64, f64) {
    let half = geometry.dot_size / 2.0;
    (offset.x + half, geometry.square_size - (offset.y + half))
}

fn trail_color(opacity: f64) -> Color {
    if opacity > 0.66 {
        Color::Cyan
    } else if opacity > 0.33 {
        Color::Blue
    } else {
        Color::DarkGray
    }
}
