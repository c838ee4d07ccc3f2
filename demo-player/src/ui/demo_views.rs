//! Demo section rendering: selector, workflow card, run button, steps

use demo_player_sdk::StepStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::components::{actor_style, status_icon, status_style};
use crate::app::{App, Pane};
use crate::catalog::WorkflowSource;
use crate::player::PlayerSnapshot;

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

pub fn render_selector(f: &mut Frame, area: Rect, app: &App, snapshot: &PlayerSnapshot) {
    let focused = app.focus == Pane::Selector;
    let title = if snapshot.running {
        " Select Workflow (locked) "
    } else {
        " Select Workflow "
    };
    let block = pane_block(title, focused);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let items: Vec<ListItem> = app
        .player
        .catalog()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = i == app.selected;
            let bullet = if is_selected { "▶" } else { " " };

            let name_style = if snapshot.running && !is_selected {
                Style::default().fg(Color::DarkGray)
            } else if is_selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![
                Span::raw(format!(" {} ", bullet)),
                Span::styled(entry.definition.name.as_str(), name_style),
            ];
            if entry.source == WorkflowSource::UserDefined {
                spans.push(Span::styled(" [User]", Style::default().fg(Color::DarkGray)));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    f.render_widget(List::new(items), inner_area);
}

pub fn render_workflow_card(f: &mut Frame, area: Rect, snapshot: &PlayerSnapshot) {
    let workflow = &snapshot.workflow;
    let mut lines = vec![
        Line::from(Span::styled(
            workflow.name.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            workflow.description.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ];

    let done = snapshot.count(StepStatus::Completed);
    let progress = match (snapshot.started_at, snapshot.finished_at) {
        (Some(start), Some(end)) => format!(
            "{}/{} steps · {} → {}",
            done,
            snapshot.steps.len(),
            start.format("%H:%M:%S"),
            end.format("%H:%M:%S")
        ),
        (Some(start), None) => format!(
            "{}/{} steps · started {}",
            done,
            snapshot.steps.len(),
            start.format("%H:%M:%S")
        ),
        _ => format!("{} steps", snapshot.steps.len()),
    };
    lines.push(Line::from(Span::styled(progress, Style::default().fg(Color::DarkGray))));

    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}

pub fn render_run_button(f: &mut Frame, area: Rect, snapshot: &PlayerSnapshot) {
    let (label, style) = if snapshot.running {
        (
            "Running...",
            Style::default().fg(Color::Gray).bg(Color::DarkGray),
        )
    } else {
        (
            "Run Workflow",
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
    };

    let button = Paragraph::new(Line::from(Span::styled(format!(" {} ", label), style)))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, area);
}

pub fn render_steps(f: &mut Frame, area: Rect, app: &App, snapshot: &PlayerSnapshot) {
    let block = pane_block(" Workflow Execution ", app.focus == Pane::Steps);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let items: Vec<ListItem> = snapshot
        .steps
        .iter()
        .enumerate()
        .skip(app.step_scroll)
        .map(|(idx, step)| {
            let def = &step.definition;
            let is_current = snapshot.current_step == Some(idx);

            let name_style = if is_current {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let marker = if is_current {
                Span::styled("▌", Style::default().fg(Color::Cyan))
            } else {
                Span::raw(" ")
            };

            let lines = vec![
                Line::from(vec![
                    marker.clone(),
                    Span::styled(
                        format!("{} ", status_icon(step.status)),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(format!("{}. ", def.id), Style::default().fg(Color::DarkGray)),
                    Span::styled(def.name.as_str(), name_style),
                    Span::raw("  "),
                    Span::styled(format!("[{}]", def.actor.label()), actor_style(def.actor)),
                    Span::raw(" "),
                    Span::styled(format!(" {} ", step.status.label()), status_style(step.status)),
                ]),
                Line::from(vec![
                    marker,
                    Span::styled(
                        format!("     {}", def.description),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(""),
            ];

            ListItem::new(lines)
        })
        .collect();

    f.render_widget(List::new(items), inner_area);
}

pub fn render_activity(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Activity ")
        .border_style(Style::default().fg(Color::DarkGray));
    let visible = block.inner(area).height as usize;

    let start = app.activity.len().saturating_sub(visible);
    let lines: Vec<Line> = app.activity[start..]
        .iter()
        .map(|l| Line::from(Span::styled(l.as_str(), Style::default().fg(Color::Gray))))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_how_it_works(f: &mut Frame, area: Rect) {
    let panels = [
        (
            "1. Select a Workflow",
            "Choose from different workflow scenarios to see how agents collaborate.",
            Color::Blue,
        ),
        (
            "2. Run the Workflow",
            "Watch as the Orchestrator coordinates between different agents.",
            Color::Magenta,
        ),
        (
            "3. Observe the Process",
            "See real-time updates as each agent completes its tasks.",
            Color::Cyan,
        ),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (chunk, (title, body, color)) in chunks.iter().zip(panels) {
        let paragraph = Paragraph::new(Line::from(Span::styled(body, Style::default().fg(Color::Gray))))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(Span::styled(
                        format!(" {} ", title),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
            );
        f.render_widget(paragraph, *chunk);
    }
}
