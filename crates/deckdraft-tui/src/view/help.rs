use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;

/// Render the help overlay.
pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered(f.area(), 52, 18);
    f.render_widget(Clear, area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:<10}"), Style::default().fg(theme.active)),
            Span::styled(desc, Style::default().fg(theme.text)),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            " Keys",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        key("Tab", "cycle pane (slides / slide / theme)"),
        key("\u{2191}\u{2193} j k", "move within the pane"),
        key("Enter", "open dir, upload PDF, edit field, pick theme"),
        key("a", "add slide (sidebar) / bullet (form)"),
        key("d", "delete slide (sidebar) / bullet (form)"),
        key("t", "toggle bullets / text content"),
        key("x", "remove the slide image"),
        key("u", "upload another PDF"),
        key("n", "discard the deck and start over"),
        key("G", "generate and download the presentation"),
        key("\u{2190}\u{2192}", "detail level (upload) / theme tab"),
        key("Esc", "cancel edit, go back"),
        key("q", "quit"),
        Line::default(),
        Line::from(Span::styled(
            " ? or Esc closes this help",
            Style::default().fg(theme.dim),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Help ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the quit confirmation modal.
pub fn render_quit_confirm(f: &mut Frame, theme: &Theme) {
    let area = centered(f.area(), 44, 5);
    f.render_widget(Clear, area);

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "  Quit? Unsaved edits will be lost.",
            Style::default().fg(theme.text),
        )),
        Line::from(vec![
            Span::styled("  q", Style::default().fg(theme.error)),
            Span::styled(" quit   ", Style::default().fg(theme.text)),
            Span::styled("Esc", Style::default().fg(theme.ok)),
            Span::styled(" stay", Style::default().fg(theme.text)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height.min(area.height)),
        Constraint::Min(0),
    ])
    .split(area);
    Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width.min(area.width)),
        Constraint::Min(0),
    ])
    .split(vertical[1])[1]
}
