//! Shared styling helpers

use demo_player_sdk::{Actor, StepStatus};
use ratatui::style::{Color, Modifier, Style};

pub fn status_style(status: StepStatus) -> Style {
    let (fg, bg) = match status {
        StepStatus::Pending => (Color::Gray, Color::DarkGray),
        StepStatus::Active => (Color::Black, Color::Yellow),
        StepStatus::Completed => (Color::Black, Color::Green),
        StepStatus::Failed => (Color::White, Color::Red),
    };
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

pub fn status_icon(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pending => "○",
        StepStatus::Active => "▶",
        StepStatus::Completed => "✓",
        StepStatus::Failed => "✗",
    }
}

pub fn actor_style(actor: Actor) -> Style {
    let fg = match actor {
        Actor::Coordinator => Color::Magenta,
        Actor::WebActor => Color::Blue,
        Actor::ApiActor => Color::Cyan,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}
