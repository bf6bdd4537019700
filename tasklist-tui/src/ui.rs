use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, EditState, InputMode, NotificationLevel};

pub fn ui(f: &mut Frame, app: &mut App) {
    let [title_area, input_area, list_area, status_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        "My To-Do List",
        Style::default()
            .fg(Color::Indexed(63))
            .add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, title_area);

    let input_style = match app.input_mode {
        InputMode::Composing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default(),
    };
    let input_text = if app.input.is_empty() && app.input_mode == InputMode::Normal {
        Span::styled("Add a new task...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.input.as_str())
    };
    let input = Paragraph::new(Line::from(input_text))
        .style(input_style)
        .block(Block::default().borders(Borders::ALL).title("New task"));
    f.render_widget(input, input_area);

    if app.tasks.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No tasks yet, start by adding one!",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .block(Block::default().borders(Borders::ALL).title("Tasks"));
        f.render_widget(empty, list_area);
    } else {
        let items: Vec<ListItem> = app
            .tasks
            .iter()
            .map(|task| match &app.edit {
                EditState::Editing { id, buffer } if *id == task.id => ListItem::new(Line::from(vec![
                    Span::styled("[edit] ", Style::default().fg(Color::Green)),
                    Span::styled(
                        format!("{buffer}_"),
                        Style::default().add_modifier(Modifier::UNDERLINED),
                    ),
                ])),
                _ => {
                    let (mark, style) = if task.completed {
                        (
                            "[x] ",
                            Style::default()
                                .fg(Color::DarkGray)
                                .add_modifier(Modifier::CROSSED_OUT),
                        )
                    } else {
                        ("[ ] ", Style::default())
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(mark),
                        Span::styled(task.text.as_str(), style),
                    ]))
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Tasks"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, list_area, &mut app.list_state);
    }

    if let Some(notification) = &app.notification {
        let color = match notification.level {
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Info => Color::Cyan,
            NotificationLevel::Warning => Color::Yellow,
            NotificationLevel::Error => Color::Red,
        };
        let status = Paragraph::new(Span::styled(
            notification.message.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(status, status_area);
    }

    let help = match (&app.edit, &app.input_mode) {
        (EditState::Editing { .. }, _) => "Enter: save  Esc: cancel  Up/Down: edit another",
        (EditState::Idle, InputMode::Composing) => "Enter: add  Esc: stop typing",
        (EditState::Idle, InputMode::Normal) => {
            "a: add  Space: toggle  e: edit  d: delete  j/k: move  Esc: dismiss  q: quit"
        }
    };
    f.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray))),
        help_area,
    );
}
