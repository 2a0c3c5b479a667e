use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, Phase};
use crate::view::{progress_bar, spinner_char};

/// Render the in-flight view shown while a gateway call is outstanding.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui;

    let (label, detail, value) = match app.phase {
        Phase::Extracting => (
            "Processing PDF...",
            app.pending_upload
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| format!("Extracting content from {}", n.to_string_lossy()))
                .unwrap_or_else(|| "Extracting content from your document".to_string()),
            app.extract_progress,
        ),
        Phase::Generating => (
            "Generating presentation...",
            format!("Rendering {} slides", app.deck.len()),
            app.generate_progress,
        ),
        // Only the two in-flight phases route here.
        _ => return,
    };

    let vertical = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .split(area);
    let center = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(area.width.min(60)),
        Constraint::Min(0),
    ])
    .split(vertical[1])[1];

    let bar_width = center.width.saturating_sub(8) as usize;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", spinner_char(app.tick)),
                Style::default().fg(theme.spinner),
            ),
            Span::styled(
                label,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(detail, Style::default().fg(theme.dim))),
        Line::default(),
        Line::from(vec![
            Span::styled(
                progress_bar(value, bar_width),
                Style::default().fg(theme.active),
            ),
            Span::styled(format!(" {value:>3}%"), Style::default().fg(theme.text)),
        ]),
        Line::from(match &app.status {
            Some(status) if status.is_error => Span::styled(
                status.text.clone(),
                Style::default().fg(theme.error),
            ),
            Some(status) => Span::styled(status.text.clone(), Style::default().fg(theme.ok)),
            None => Span::raw(""),
        }),
    ];

    f.render_widget(Paragraph::new(lines), center);
}
