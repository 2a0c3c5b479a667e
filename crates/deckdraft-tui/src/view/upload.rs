use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::app::App;
use crate::view::truncate;

/// Render the upload screen: PDF picker plus the detail-level selector.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui;
    let picker = &app.file_picker;

    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(1), // current dir
        Constraint::Min(5),    // file list
        Constraint::Length(2), // detail level
        Constraint::Length(1), // status
        Constraint::Length(1), // footer
    ])
    .split(area);

    let header = Line::from(vec![
        Span::styled(" deckdraft ", theme.header_style()),
        Span::styled(
            " Upload a PDF to start a deck",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let dir_line = Line::from(vec![
        Span::styled(" dir: ", Style::default().fg(theme.dim)),
        Span::styled(
            truncate(
                &picker.current_dir.display().to_string(),
                (area.width as usize).saturating_sub(7),
            ),
            Style::default().fg(theme.text),
        ),
    ]);
    f.render_widget(Paragraph::new(dir_line), chunks[1]);

    let items: Vec<ListItem> = picker
        .entries
        .iter()
        .map(|entry| {
            let (marker, style) = if entry.is_dir {
                ("/", Style::default().fg(theme.active))
            } else if entry.is_pdf {
                ("", Style::default().fg(theme.text))
            } else {
                ("", Style::default().fg(theme.dim))
            };
            ListItem::new(Line::from(Span::styled(
                format!(" {}{}", entry.name, marker),
                style,
            )))
        })
        .collect();

    let mut state = ListState::default()
        .with_selected(Some(picker.cursor))
        .with_offset(picker.scroll_offset);
    let list = List::new(items).highlight_style(theme.highlight_style());
    f.render_stateful_widget(list, chunks[2], &mut state);

    let level = app.detail_level;
    let detail_lines = vec![
        Line::from(vec![
            Span::styled(" Detail level: ", Style::default().fg(theme.dim)),
            Span::styled(
                format!("\u{25C2} {} \u{25B8}", level.label()),
                Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({}/4)", level.value()),
                Style::default().fg(theme.dim),
            ),
        ]),
        Line::from(Span::styled(
            format!(" {}", level.description()),
            Style::default().fg(theme.dim),
        )),
    ];
    f.render_widget(Paragraph::new(detail_lines), chunks[3]);

    let status_line = match &app.status {
        Some(status) => Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(if status.is_error {
                theme.error
            } else {
                theme.ok
            }),
        )),
        None => Line::default(),
    };
    f.render_widget(Paragraph::new(status_line), chunks[4]);

    let footer = Line::from(Span::styled(
        " \u{2191}\u{2193} browse  Enter open/upload  \u{2190}\u{2192} detail  Esc back  ? help  q quit",
        theme.footer_style(),
    ));
    f.render_widget(Paragraph::new(footer), chunks[5]);
}
