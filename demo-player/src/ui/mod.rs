//! UI rendering functions for the demo player TUI
//!
//! Layout mirrors the demo section: selector and run button on the left,
//! step execution on the right, "How It Works" strip below.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;
use crate::player::PlayerSnapshot;

mod components;
mod demo_views;
mod header_footer;
mod notifications;

pub use components::{actor_style, status_icon, status_style};
pub use demo_views::{
    render_activity, render_how_it_works, render_run_button, render_selector, render_steps,
    render_workflow_card,
};
pub use header_footer::{render_footer, render_header};
pub use notifications::render_notifications;

/// Main UI rendering function - orchestrates all view rendering
pub fn ui(f: &mut Frame, app: &App) {
    let snapshot = app.player.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0], &snapshot);
    render_body(f, chunks[1], app, &snapshot);
    render_how_it_works(f, chunks[2]);
    render_footer(f, chunks[3], app, &snapshot);

    render_notifications(f, app, chunks[1]);
}

fn render_body(f: &mut Frame, area: ratatui::layout::Rect, app: &App, snapshot: &PlayerSnapshot) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(columns[0]);

    render_selector(f, left[0], app, snapshot);
    render_workflow_card(f, left[1], snapshot);
    render_run_button(f, left[2], snapshot);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(8)])
        .split(columns[1]);

    render_steps(f, right[0], app, snapshot);
    render_activity(f, right[1], app);
}
