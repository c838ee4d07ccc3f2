//! Header and footer rendering functions

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Pane};
use crate::player::PlayerSnapshot;

pub const TITLE: &str = "Emergence Orchestrator - Interactive Demo";

pub fn render_header(f: &mut Frame, area: Rect, snapshot: &PlayerSnapshot) {
    let state = if snapshot.running {
        Span::styled(" RUNNING ", Style::default().fg(Color::Black).bg(Color::Yellow))
    } else if snapshot.is_finished() {
        Span::styled(" DONE ", Style::default().fg(Color::Black).bg(Color::Green))
    } else {
        Span::styled(" IDLE ", Style::default().fg(Color::Gray))
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        state,
        Span::raw("      "),
        Span::styled("[Q]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("uit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub fn render_footer(f: &mut Frame, area: Rect, app: &App, snapshot: &PlayerSnapshot) {
    let key = |k: &'static str| Span::styled(k, Style::default().add_modifier(Modifier::BOLD));

    let navigate = match app.focus {
        Pane::Selector if snapshot.running => " Selection locked  ",
        Pane::Selector => " Select Workflow  ",
        Pane::Steps => " Scroll Steps  ",
    };

    let footer_text = Line::from(vec![
        key("[↑↓/jk]"),
        Span::raw(navigate),
        key("[Tab]"),
        Span::raw(" Switch Pane  "),
        key("[Enter/R]"),
        Span::raw(if snapshot.running { " Running...  " } else { " Run Workflow  " }),
        key("[Q]"),
        Span::raw(" Quit"),
    ]);

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
