// UI rendering logic
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use hubscout_core::models::{
    ContentType, DatasetRecord, ModelRecord, PaperRecord, SpaceRecord, TimeFrame,
};

use crate::app::{App, Phase, ToastKind};

const ACCENT: Color = Color::Yellow;

pub fn render(frame: &mut Frame, app: &mut App) {
    let show_time_frames = app.active_tab == ContentType::Papers;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if show_time_frames {
            vec![
                Constraint::Length(3), // Header
                Constraint::Length(3), // Tabs
                Constraint::Length(1), // Time range selector
                Constraint::Length(1), // Item count
                Constraint::Min(5),    // Content
                Constraint::Length(1), // Status bar
            ]
        } else {
            vec![
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ]
        })
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_tabs(frame, app, chunks[1]);

    let (count_area, content_area, status_area) = if show_time_frames {
        render_time_frames(frame, app, chunks[2]);
        (chunks[3], chunks[4], chunks[5])
    } else {
        (chunks[2], chunks[3], chunks[4])
    };

    render_item_count(frame, app, count_area);
    render_content(frame, app, content_area);
    render_status_bar(frame, app, status_area);

    if app.show_subscribe {
        render_subscribe_modal(frame, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "HUBSCOUT",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  trending from the Hugging Face community"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}

fn tab_label(tab: ContentType) -> &'static str {
    match tab {
        ContentType::Papers => "📄 Papers",
        ContentType::Models => "🤖 Models",
        ContentType::Datasets => "📊 Datasets",
        ContentType::Spaces => "🚀 Spaces",
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in ContentType::ALL.into_iter().enumerate() {
        let label = format!(" {} [{}] ", tab_label(tab), i + 1);
        if tab == app.active_tab {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(ACCENT)));
        }
        spans.push(Span::raw(" "));
    }

    let tabs = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, area);
}

fn render_time_frames(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw("Range: ")];
    for time_frame in TimeFrame::ALL {
        let label = format!(" {} ", time_frame.label());
        if time_frame == app.time_frame {
            spans.push(Span::styled(
                label,
                Style::default().fg(Color::Black).bg(ACCENT),
            ));
        } else {
            spans.push(Span::raw(label));
        }
    }
    spans.push(Span::styled(
        "  (t to cycle)",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_item_count(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.phase {
        Phase::Loading => String::new(),
        _ => format!("Showing {} items", app.items_len()),
    };

    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(ACCENT))
            .alignment(Alignment::Center),
        area,
    );
}

fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    match &app.phase {
        Phase::Loading => {
            let loading = Paragraph::new(format!("Loading {}...", app.active_tab))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(loading, area);
        }
        Phase::Errored(message) => {
            let error = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "⚠ Error loading content",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(message.clone()),
                Line::from(""),
                Line::from(Span::styled(
                    "press r to try again",
                    Style::default().fg(ACCENT),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(error, area);
        }
        Phase::Idle | Phase::Loaded => {
            let items = match app.active_tab {
                ContentType::Papers => paper_items(&app.papers),
                ContentType::Models => model_items(&app.models),
                ContentType::Datasets => dataset_items(&app.datasets),
                ContentType::Spaces => space_items(&app.spaces),
            };

            if items.is_empty() {
                let empty = Paragraph::new("Nothing trending here right now")
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(empty, area);
                return;
            }

            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL))
                .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
                .highlight_symbol("▶ ");

            frame.render_stateful_widget(list, area, &mut app.list_state);
        }
    }
}

fn paper_items(papers: &[PaperRecord]) -> Vec<ListItem<'static>> {
    papers
        .iter()
        .map(|paper| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    format!("📄 {}", paper.title),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!(
                        "   ▲ {} · 💬 {} · by {} {}",
                        paper.upvotes,
                        paper.comments,
                        author_badge(&paper.submitted_by),
                        paper.submitted_by
                    ),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(""),
            ])
        })
        .collect()
}

fn model_items(models: &[ModelRecord]) -> Vec<ListItem<'static>> {
    models
        .iter()
        .map(|model| {
            let mut title = format!("🤖 {}", model.short_name());
            if model.is_gated {
                title.push_str("  🔒 gated");
            }
            if model.is_private {
                title.push_str("  (private)");
            }

            let mut meta = format!(
                "   {} {} · ⬇ {} · ❤ {}",
                author_badge(&model.author),
                model.author,
                model.downloads,
                model.likes
            );
            if let Some(tag) = &model.pipeline_tag {
                meta.push_str(&format!(" · {}", tag));
            }
            if let Some(date) = &model.last_modified {
                meta.push_str(&format!(" · updated {}", display_date(date)));
            }

            ListItem::new(vec![
                Line::from(Span::styled(
                    title,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(meta, Style::default().fg(Color::Gray))),
                Line::from(""),
            ])
        })
        .collect()
}

fn dataset_items(datasets: &[DatasetRecord]) -> Vec<ListItem<'static>> {
    datasets
        .iter()
        .map(|dataset| {
            let mut title = format!("📊 {}", dataset.short_name());
            if dataset.is_gated {
                title.push_str("  🔒 gated");
            }

            let mut meta = format!(
                "   {} {} · ⬇ {} · ❤ {}",
                author_badge(&dataset.author),
                dataset.author,
                dataset.downloads,
                dataset.likes
            );
            if let Some(rows) = dataset.num_rows {
                meta.push_str(&format!(" · {} rows", rows));
            }
            if !dataset.modalities.is_empty() {
                meta.push_str(&format!(" · {}", dataset.modalities.join(", ")));
            }

            let mut lines = vec![
                Line::from(Span::styled(
                    title,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(meta, Style::default().fg(Color::Gray))),
            ];

            if !dataset.formats.is_empty() || !dataset.libraries.is_empty() {
                let mut extras: Vec<String> = Vec::new();
                if !dataset.formats.is_empty() {
                    extras.push(dataset.formats.join(", "));
                }
                if !dataset.libraries.is_empty() {
                    extras.push(dataset.libraries.join(", "));
                }
                lines.push(Line::from(Span::styled(
                    format!("   {}", extras.join(" · ")),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::from(""));

            ListItem::new(lines)
        })
        .collect()
}

fn space_items(spaces: &[SpaceRecord]) -> Vec<ListItem<'static>> {
    spaces
        .iter()
        .map(|space| {
            let emoji = space.emoji.as_deref().unwrap_or("🚀");
            let title = format!("{} {}", emoji, space.title);

            let mut meta = format!(
                "   {} {} · ❤ {}",
                author_badge(&space.author),
                space.author,
                space.likes
            );
            if let Some(domain) = &space.primary_domain {
                meta.push_str(&format!(" · {}", domain));
            }

            let mut lines = vec![
                Line::from(Span::styled(
                    title,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(meta, Style::default().fg(Color::Gray))),
            ];
            if let Some(description) = &space.description {
                lines.push(Line::from(Span::styled(
                    format!("   {}", description),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::from(""));

            ListItem::new(lines)
        })
        .collect()
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let keys =
        "q quit · Tab/1-4 switch · j/k move · Enter open · p pdf · r refresh · t range · n subscribe";

    let line = if let Some(toast) = &app.toast {
        let style = match toast.kind {
            ToastKind::Info => Style::default().fg(Color::Green),
            ToastKind::Error => Style::default().fg(Color::Red),
        };
        Line::from(vec![Span::styled(toast.text.clone(), style)])
    } else {
        Line::from(Span::styled(keys, Style::default().fg(Color::DarkGray)))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_subscribe_modal(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 7, frame.area());

    frame.render_widget(Clear, area);

    let input_style = if app.email_is_plausible() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let modal = Paragraph::new(vec![
        Line::from("Get trending picks in your inbox"),
        Line::from(""),
        Line::from(vec![
            Span::raw("email: "),
            Span::styled(format!("{}█", app.email_input), input_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to subscribe · Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 📩 Subscribe for Updates ")
            .border_style(Style::default().fg(ACCENT)),
    );

    frame.render_widget(modal, area);
}

/// Centered fixed-height popup area.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(height),
            Constraint::Min(1),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Avatar stand-in: the author's first initial, uppercased. Must never
/// panic on an empty author string.
fn author_badge(author: &str) -> String {
    match author.chars().next() {
        Some(first) => format!("({})", first.to_uppercase()),
        None => "( )".to_string(),
    }
}

/// Timestamps are display-only; show the date part and leave the rest.
fn display_date(raw: &str) -> &str {
    raw.split_once('T').map_or(raw, |(date, _)| date)
}
